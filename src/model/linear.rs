use serde::Deserialize;

use crate::{
    error::{AppError, Result},
    features::{FeatureVector, FEATURE_COUNT},
};

/// Plain linear regressor: `dot(weights, x) + bias`.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearModel {
    weights: Vec<f64>,
    #[serde(default)]
    bias: f64,
}

impl LinearModel {
    pub fn new(weights: Vec<f64>, bias: f64) -> Self {
        Self { weights, bias }
    }

    pub(super) fn validate(&self) -> std::result::Result<(), String> {
        if self.weights.len() != FEATURE_COUNT {
            return Err(format!(
                "expected {FEATURE_COUNT} weights, got {}",
                self.weights.len()
            ));
        }
        if self.weights.iter().any(|w| !w.is_finite()) || !self.bias.is_finite() {
            return Err("weights and bias must be finite".into());
        }
        Ok(())
    }

    pub fn predict(&self, x: &FeatureVector) -> Result<f64> {
        let x = x.as_slice();
        if x.len() != self.weights.len() {
            return Err(AppError::ModelInvocation(format!(
                "expected {} features, got {}",
                self.weights.len(),
                x.len()
            )));
        }

        let out = self
            .weights
            .iter()
            .zip(x)
            .map(|(w, v)| w * v)
            .sum::<f64>()
            + self.bias;

        if !out.is_finite() {
            return Err(AppError::ModelInvocation(format!(
                "linear model produced a non-finite value ({out})"
            )));
        }
        Ok(out)
    }
}
