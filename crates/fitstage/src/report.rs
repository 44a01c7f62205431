//! JSON reports written at the end of a run
//!
//! Both documents are pretty-printed with two-space indentation. JSON has no
//! literal for NaN or infinity, so a non-finite score is written as `null`.

use fitstage_core::RegressionMetrics;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::storage::{Storage, StorageError, StorageResult};

/// `{"rmse": .., "mae": .., "r2": ..}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoresReport {
    /// Mean squared error, written under the `rmse` key
    pub rmse: f64,
    /// Mean absolute error
    pub mae: f64,
    /// Coefficient of determination
    pub r2: f64,
}

impl From<RegressionMetrics> for ScoresReport {
    fn from(m: RegressionMetrics) -> Self {
        Self {
            rmse: m.rmse,
            mae: m.mae,
            r2: m.r2,
        }
    }
}

/// `{"alpha": .., "l1_ratio": ..}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamsReport {
    pub alpha: f64,
    pub l1_ratio: f64,
}

/// Serialize `value` as indented JSON and write it through `storage`
pub fn write_json<T: Serialize>(storage: &dyn Storage, path: &Path, value: &T) -> StorageResult<()> {
    let content = serde_json::to_vec_pretty(value).map_err(|e| {
        StorageError::Serialization(format!("Failed to serialize {}: {}", path.display(), e))
    })?;
    storage.write(path, &content)
}
