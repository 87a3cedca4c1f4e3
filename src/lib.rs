pub mod config;
pub mod error;
pub mod features;
pub mod http;
pub mod model;
pub mod service;
pub mod storage;

pub use error::{AppError, Result};
pub use model::{Model, Predictor};
pub use service::{Outcome, PredictionService};
