//! Error types for fitstage-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    #[error("Model not fitted")]
    NotFitted,

    #[error("Fit error: {0}")]
    Fit(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
