//! Main crate for the fitstage train/evaluate stage
//!
//! Reads a stage configuration, fits an elastic net on the training CSV,
//! scores it on the test CSV and writes the scores, the hyperparameters and
//! the fitted model to the configured locations.

pub mod artifact;
pub mod config;
pub mod dataset;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod storage;

// Re-export core types
pub use fitstage_core::{CoreError, RegressionMetrics, Regressor, RegressorMetadata, RunId};
pub use fitstage_linear::{ElasticNet, ElasticNetParams, Selection};

pub use artifact::{ArtifactError, MODEL_FILE_NAME, ModelArtifact};
pub use config::{ConfigError, ConfigFormat, StageConfig};
pub use dataset::{DataSource, DatasetError, Split, TARGET_COLUMN, Table};
pub use error::{Result as StageResult, StageError};
pub use pipeline::{TrainReport, run_stage, run_stage_with_storage, train_and_evaluate};
pub use report::{ParamsReport, ScoresReport};
pub use storage::{LocalStorage, Storage, StorageError};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::StageConfig;
    pub use crate::pipeline::{TrainReport, train_and_evaluate};
    pub use fitstage_core::Regressor;
}
