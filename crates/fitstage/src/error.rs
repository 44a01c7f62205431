//! Error types for the fitstage crate

use fitstage_core::CoreError;
use thiserror::Error;

use crate::artifact::ArtifactError;
use crate::config::ConfigError;
use crate::dataset::DatasetError;
use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum StageError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Data load error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Fit error: {0}")]
    Fit(#[source] CoreError),

    #[error("Metrics error: {0}")]
    Metrics(#[source] CoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Model artifact error: {0}")]
    Artifact(#[from] ArtifactError),
}

pub type Result<T> = std::result::Result<T, StageError>;
