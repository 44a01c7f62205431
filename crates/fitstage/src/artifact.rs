//! Serialized model artifact
//!
//! `model.joblib` holds a bincode-encoded [`ModelArtifact`]: the fitted
//! estimator together with the feature columns it expects and the digests of
//! the files it was trained and evaluated on.

use fitstage_core::{CoreError, Regressor, RunId};
use fitstage_linear::ElasticNet;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::dataset::{DataSource, DatasetError, Table};
use crate::storage::{Storage, StorageError};

/// File name of the model inside `model_dir`
pub const MODEL_FILE_NAME: &str = "model.joblib";

/// Bumped whenever the encoded layout changes
pub const FORMAT_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to encode model: {0}")]
    Encode(String),

    #[error("Failed to decode model: {0}")]
    Decode(String),

    #[error("Unsupported model format version {found} (expected {FORMAT_VERSION})")]
    UnsupportedVersion { found: u32 },

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Model error: {0}")]
    Model(#[from] CoreError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub run_id: RunId,
    /// RFC 3339 creation time
    pub created_at: String,
    /// Feature columns in the order the model was fitted on
    pub feature_names: Vec<String>,
    pub train_source: Option<DataSource>,
    pub test_source: Option<DataSource>,
    pub model: ElasticNet,
}

impl ModelArtifact {
    pub fn new(run_id: RunId, model: ElasticNet, feature_names: Vec<String>) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            run_id,
            created_at: chrono::Utc::now().to_rfc3339(),
            feature_names,
            train_source: None,
            test_source: None,
            model,
        }
    }

    /// Record where the train and test data came from
    pub fn with_sources(mut self, train: Option<DataSource>, test: Option<DataSource>) -> Self {
        self.train_source = train;
        self.test_source = test;
        self
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ArtifactError> {
        bincode::serialize(self).map_err(|e| ArtifactError::Encode(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArtifactError> {
        let artifact: Self =
            bincode::deserialize(bytes).map_err(|e| ArtifactError::Decode(e.to_string()))?;
        if artifact.format_version != FORMAT_VERSION {
            return Err(ArtifactError::UnsupportedVersion {
                found: artifact.format_version,
            });
        }
        Ok(artifact)
    }

    pub fn save(&self, storage: &dyn Storage, path: &Path) -> Result<(), ArtifactError> {
        let bytes = self.to_bytes()?;
        storage.write(path, &bytes)?;
        Ok(())
    }

    pub fn load(storage: &dyn Storage, path: &Path) -> Result<Self, ArtifactError> {
        let bytes = storage.read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Predict for a table, picking the feature columns by name
    pub fn predict(&self, table: &Table) -> Result<Array1<f64>, ArtifactError> {
        let features = table.select_columns(&self.feature_names)?;
        Ok(self.model.predict(features.data())?)
    }
}
