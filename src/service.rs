use std::sync::Arc;

use log::{error, info, warn};

use crate::{
    error::{AppError, Result},
    features::{encode_submission, Submission, SubmissionForm},
    model::Predictor,
    storage::PredictionLog,
};

/// What a caller gets back for one submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub prediction: f64,
    /// Row id of the logged record, `None` if logging failed.
    pub record_id: Option<i64>,
}

/// Immutable request pipeline shared by every handler.
///
/// Runs parse, encode, predict and persist strictly in that order.
/// Nothing is persisted unless a prediction was produced.
#[derive(Clone)]
pub struct PredictionService {
    predictor: Arc<dyn Predictor>,
    log: PredictionLog,
}

impl PredictionService {
    pub fn new(predictor: Arc<dyn Predictor>, log: PredictionLog) -> Self {
        Self { predictor, log }
    }

    pub fn log(&self) -> &PredictionLog {
        &self.log
    }

    /// Runs the full pipeline for one submitted form.
    ///
    /// A failed write to the prediction log does not fail the request: the
    /// prediction is still returned and the failure is logged.
    ///
    /// # Errors
    /// Returns `AppError::Validation` for bad input and
    /// `AppError::ModelInvocation` if the predictor fails.
    pub async fn submit(&self, form: SubmissionForm) -> Result<Outcome> {
        let (submission, prediction) = self.predict(form).inspect_err(|e| match e {
            AppError::Validation { .. } => warn!("rejected submission: {e}"),
            _ => error!("prediction failed: {e}"),
        })?;

        let record_id = self.persist(submission, prediction).await;
        info!("predicted {prediction:.2}");

        Ok(Outcome {
            prediction,
            record_id,
        })
    }

    fn predict(&self, form: SubmissionForm) -> Result<(Submission, f64)> {
        let submission: Submission = form.try_into()?;
        let features = encode_submission(&submission)?;
        let prediction = self.predictor.predict(&features)?;
        Ok((submission, prediction))
    }

    async fn persist(&self, submission: Submission, prediction: f64) -> Option<i64> {
        let log = self.log.clone();
        let written =
            tokio::task::spawn_blocking(move || log.record(&submission, prediction)).await;

        match written {
            Ok(Ok(id)) => Some(id),
            Ok(Err(e)) => {
                error!("prediction not recorded in {}: {e}", self.log.path().display());
                None
            }
            Err(e) => {
                error!("storage task did not complete: {e}");
                None
            }
        }
    }
}
