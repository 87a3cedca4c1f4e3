//! Predictor capability and the adapters over serialized model artifacts.

mod linear;
mod oblivious;

use std::{fs, path::Path};

use serde_json::Value;

use crate::{
    error::{AppError, Result},
    features::FeatureVector,
};

pub use linear::LinearModel;
pub use oblivious::ObliviousEnsemble;

/// Anything that can turn a feature vector into a prediction.
///
/// Implementations must be deterministic and safe to call concurrently
/// from every request handler.
pub trait Predictor: Send + Sync {
    /// # Errors
    /// Returns `AppError::ModelInvocation` if the model cannot evaluate `features`.
    fn predict(&self, features: &FeatureVector) -> Result<f64>;
}

/// A model loaded from a JSON artifact.
#[derive(Debug, Clone)]
pub enum Model {
    ObliviousTrees(ObliviousEnsemble),
    Linear(LinearModel),
}

impl Model {
    /// Reads and validates the artifact at `path`.
    ///
    /// # Errors
    /// Returns `AppError::ModelLoad` if the file is missing, is not JSON,
    /// or does not describe a model over the nine encoded features.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let load_err = |reason: String| AppError::ModelLoad {
            path: path.display().to_string(),
            reason,
        };

        let content = fs::read_to_string(path).map_err(|e| load_err(e.to_string()))?;
        Self::from_json(&content).map_err(load_err)
    }

    /// Parses an artifact from its JSON text, dispatching on its top-level keys.
    pub fn from_json(content: &str) -> std::result::Result<Self, String> {
        let val: Value = serde_json::from_str(content).map_err(|e| format!("invalid JSON: {e}"))?;

        let model = if val.get("oblivious_trees").is_some() {
            let ensemble: ObliviousEnsemble = serde_json::from_value(val)
                .map_err(|e| format!("invalid oblivious tree ensemble: {e}"))?;
            ensemble.validate()?;
            Model::ObliviousTrees(ensemble)
        } else if val.get("weights").is_some() {
            let linear: LinearModel =
                serde_json::from_value(val).map_err(|e| format!("invalid linear model: {e}"))?;
            linear.validate()?;
            Model::Linear(linear)
        } else {
            return Err("unrecognised artifact: expected 'oblivious_trees' or 'weights'".into());
        };

        Ok(model)
    }

    /// Short human-readable summary for startup logs.
    pub fn describe(&self) -> String {
        match self {
            Model::ObliviousTrees(e) => format!("oblivious tree ensemble ({} trees)", e.len()),
            Model::Linear(_) => "linear model".to_string(),
        }
    }
}

impl Predictor for Model {
    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        match self {
            Model::ObliviousTrees(e) => e.predict(features),
            Model::Linear(m) => m.predict(features),
        }
    }
}
