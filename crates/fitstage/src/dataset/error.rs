use std::path::PathBuf;
use thiserror::Error;

/// Dataset loading and column selection errors
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read dataset {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in {source_name}: {message}")]
    Csv {
        source_name: String,
        message: String,
    },

    #[error("Duplicate column '{column}' in {source_name}")]
    DuplicateColumn { source_name: String, column: String },

    #[error("Non-numeric value '{value}' in {source_name} at line {line}, column '{column}'")]
    NonNumeric {
        source_name: String,
        line: u64,
        column: String,
        value: String,
    },

    #[error("Column '{column}' not found (available: {available:?})")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("Invalid table shape: {0}")]
    Shape(String),
}

/// Result type for dataset operations
pub type Result<T> = std::result::Result<T, DatasetError>;
