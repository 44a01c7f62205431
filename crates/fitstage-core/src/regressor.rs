//! Regressor trait for fitstage-core
//!
//! Every estimator the stage can fit implements [`Regressor`].

use crate::{CoreError, Result, metrics};
use ndarray::{Array1, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Core trait for supervised regression estimators
pub trait Regressor {
    /// Fit the estimator on a feature matrix (rows = samples) and target vector
    fn fit(&mut self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>) -> Result<()>;

    /// Predict targets for a feature matrix
    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>>;

    /// Whether `fit` has completed successfully
    fn is_fitted(&self) -> bool;

    /// Coefficient of determination of the predictions for `x` against `y`
    fn score(&self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>) -> Result<f64> {
        let predicted = self.predict(x)?;
        let actual = y.insert_axis(Axis(1));
        metrics::r2_score(actual, predicted.view().insert_axis(Axis(1)))
    }

    /// Optional method to get estimator metadata
    fn metadata(&self) -> RegressorMetadata {
        RegressorMetadata::default()
    }
}

/// Metadata about a regressor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegressorMetadata {
    /// Human-readable name of the estimator
    pub name: Option<String>,
    /// Description of what this estimator does
    pub description: Option<String>,
    /// Version information
    pub version: Option<String>,
    /// Hyperparameters, keyed by name
    pub hyperparameters: BTreeMap<String, serde_json::Value>,
}

impl RegressorMetadata {
    /// Create metadata with a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Record a hyperparameter; non-finite floats are stored as null
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> &mut Self {
        self.hyperparameters.insert(key.into(), value.into());
        self
    }

    /// Look up a hyperparameter
    pub fn get<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.hyperparameters.get(key) {
            Some(value) => {
                let parsed = serde_json::from_value(value.clone()).map_err(|e| {
                    CoreError::InvalidInput(format!(
                        "Failed to deserialize hyperparameter {}: {}",
                        key, e
                    ))
                })?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }
}
