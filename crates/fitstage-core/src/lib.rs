//! # fitstage core
//!
//! Shared abstractions for the fitstage train/evaluate stage: the
//! [`Regressor`] trait every estimator implements, the regression metrics
//! and the core error type.

pub mod error;
pub mod metrics;
pub mod regressor;
pub mod types;

pub use error::{CoreError, Result};
pub use metrics::RegressionMetrics;
pub use regressor::{Regressor, RegressorMetadata};
pub use types::RunId;
