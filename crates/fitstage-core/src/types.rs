//! Identifiers shared across the stage

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one execution of the stage.
///
/// A fresh id is drawn when a run starts. It is logged, stored in the saved
/// model artifact and returned in the run summary, so a `model.joblib` can
/// be matched to the log lines of the run that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(String);

impl RunId {
    /// Random (v4 uuid) id for a new run
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Rebuild an id read back from an artifact or a log
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
