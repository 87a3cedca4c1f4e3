use actix_web::{get, http::header::ContentType, post, web, HttpResponse};

use super::pages;
use crate::{error::AppError, features::SubmissionForm, service::PredictionService};

#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(pages::index())
}

#[post("/predict")]
pub async fn predict(
    service: web::Data<PredictionService>,
    form: web::Form<SubmissionForm>,
) -> Result<HttpResponse, AppError> {
    let outcome = service.submit(form.into_inner()).await?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(pages::result(outcome.prediction)))
}

#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::plaintext()).body("ok")
}
