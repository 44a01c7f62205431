//! Error types for fitstage-linear

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinearError {
    #[error("Invalid hyperparameter: {0}")]
    InvalidParams(String),

    #[error("Cannot fit with zero samples")]
    EmptyInput,

    #[error("Cannot fit without feature columns")]
    NoFeatures,

    #[error("Number of samples ({samples}) does not match target length ({targets})")]
    SampleMismatch { samples: usize, targets: usize },

    #[error("Expected {expected} feature columns, got {actual}")]
    FeatureMismatch { expected: usize, actual: usize },

    #[error("Input contains NaN or infinity in {0}")]
    NonFinite(&'static str),

    #[error("Model not fitted")]
    NotFitted,
}

// Convert LinearError to CoreError
impl From<LinearError> for fitstage_core::CoreError {
    fn from(err: LinearError) -> Self {
        match err {
            LinearError::NotFitted => fitstage_core::CoreError::NotFitted,
            LinearError::FeatureMismatch { expected, actual } => {
                fitstage_core::CoreError::ShapeMismatch {
                    expected: format!("{} features", expected),
                    actual: format!("{} features", actual),
                }
            }
            other => fitstage_core::CoreError::Fit(other.to_string()),
        }
    }
}
