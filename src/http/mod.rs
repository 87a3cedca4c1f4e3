//! HTTP surface: the HTML form, its result page and a small JSON API.

pub mod api;
pub mod handlers;
pub mod pages;

use actix_web::{
    error::{JsonPayloadError, QueryPayloadError, UrlencodedError},
    http::{header::ContentType, StatusCode},
    web, HttpRequest, HttpResponse, ResponseError,
};

use crate::error::AppError;

/// Registers every route. The caller provides a `web::Data<PredictionService>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(form_error))
        .app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .service(handlers::index)
        .service(handlers::predict)
        .service(handlers::health)
        .service(
            web::scope("/api")
                .service(api::predict)
                .service(api::predictions),
        );
}

/// Undecodable fields are a validation error; size and content-type
/// failures keep actix's own status codes.
fn form_error(err: UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    match err {
        UrlencodedError::Parse(_) | UrlencodedError::Serialize(_) => {
            AppError::validation("form", err.to_string()).into()
        }
        other => other.into(),
    }
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    api::ApiError(AppError::validation("body", err.to_string())).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    api::ApiError(AppError::validation("query", err.to_string())).into()
}

/// Message safe to show to the caller. Internal failures are not detailed.
pub(crate) fn public_message(err: &AppError) -> String {
    match err {
        AppError::Validation { .. } => err.to_string(),
        AppError::ModelInvocation(_) | AppError::ModelLoad { .. } => {
            "the model could not produce a prediction".to_string()
        }
        AppError::StorageUnavailable(_) | AppError::Io(_) => "internal server error".to_string(),
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type(ContentType::html())
            .body(pages::error(&public_message(self)))
    }
}
