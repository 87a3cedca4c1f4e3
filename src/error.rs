use std::{fmt, io};

/// The crate's result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// All errors that can occur while serving a prediction.
#[derive(Debug)]
pub enum AppError {
    /// Malformed or out-of-vocabulary input, caught before the model runs.
    Validation { field: &'static str, reason: String },
    /// The model artifact could not be read or is structurally invalid.
    ModelLoad { path: String, reason: String },
    /// The predictor failed on a well-formed feature vector.
    ModelInvocation(String),
    /// The prediction log could not be opened or written.
    StorageUnavailable(rusqlite::Error),
    /// An underlying I/O error not covered by the above variants.
    Io(io::Error),
}

impl AppError {
    /// Shorthand for a validation failure on `field`.
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Returns `true` when the failure was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { field, reason } => write!(f, "invalid {field}: {reason}"),
            Self::ModelLoad { path, reason } => {
                write!(f, "cannot load model from '{path}': {reason}")
            }
            Self::ModelInvocation(msg) => write!(f, "model invocation failed: {msg}"),
            Self::StorageUnavailable(e) => write!(f, "storage unavailable: {e}"),
            Self::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::StorageUnavailable(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        Self::StorageUnavailable(e)
    }
}
