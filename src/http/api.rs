//! JSON variant of the prediction route plus read access to the log.

use std::fmt;

use actix_web::{get, http::StatusCode, post, web, HttpResponse, ResponseError};
use log::error;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error::AppError, features::SubmissionForm, service::PredictionService};

const DEFAULT_HISTORY: usize = 20;
const MAX_HISTORY: usize = 500;

/// JSON body of `POST /api/predict`. Numeric fields may be sent as JSON
/// numbers or as strings.
#[derive(Debug, Deserialize)]
pub struct JsonSubmission {
    age: Value,
    sex: String,
    bmi: Value,
    children: Value,
    smoker: String,
    region: String,
}

impl From<JsonSubmission> for SubmissionForm {
    fn from(body: JsonSubmission) -> Self {
        SubmissionForm {
            age: field_text(body.age),
            sex: body.sex,
            bmi: field_text(body.bmi),
            children: field_text(body.children),
            smoker: body.smoker,
            region: body.region,
        }
    }
}

fn field_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

#[derive(Debug, Serialize)]
struct PredictionBody {
    prediction: f64,
    record_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    limit: Option<usize>,
}

/// `AppError` rendered as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        Self(e)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.0.status_code()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": super::public_message(&self.0) }))
    }
}

#[post("/predict")]
pub async fn predict(
    service: web::Data<PredictionService>,
    body: web::Json<JsonSubmission>,
) -> Result<HttpResponse, ApiError> {
    let outcome = service.submit(body.into_inner().into()).await?;

    Ok(HttpResponse::Ok().json(PredictionBody {
        prediction: outcome.prediction,
        record_id: outcome.record_id,
    }))
}

#[get("/predictions")]
pub async fn predictions(
    service: web::Data<PredictionService>,
    query: web::Query<HistoryQuery>,
) -> Result<HttpResponse, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY).min(MAX_HISTORY);
    let log = service.log().clone();

    let records = tokio::task::spawn_blocking(move || log.recent(limit))
        .await
        .map_err(|e| {
            error!("history query did not complete: {e}");
            AppError::Io(std::io::Error::other(e.to_string()))
        })??;

    Ok(HttpResponse::Ok().json(records))
}
