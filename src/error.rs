use std::path::PathBuf;

use crate::model::ModelError;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The model could not be loaded; nothing can be served
    #[error("Startup failure: cannot load model from {}: {source}", path.display())]
    StartupFailure {
        path: PathBuf,
        #[source]
        source: ModelError,
    },
    /// Caller contract violation (unknown city code, out-of-range input)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// The model failed on a structurally valid feature vector
    #[error("Prediction failed for {city}: {reason}")]
    PredictionFailure { city: String, reason: String },
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::StartupFailure { .. } => "startup_failure",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::PredictionFailure { .. } => "prediction_failure",
            Self::Config(_) => "config_error",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
