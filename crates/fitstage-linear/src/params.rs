//! Hyperparameters for the elastic net

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::LinearError;

/// Order in which coordinate descent visits the coefficients
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Selection {
    /// Sweep features in column order
    #[default]
    Cyclic,
    /// Draw a feature uniformly at random (seeded by `random_state`) at every step
    Random,
}

/// Elastic-net configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElasticNetParams {
    /// Overall regularization strength
    pub alpha: f64,
    /// Mix between L1 and L2 (0.0 = ridge, 1.0 = lasso)
    pub l1_ratio: f64,
    pub fit_intercept: bool,
    /// Maximum number of coordinate descent sweeps
    pub max_iter: usize,
    /// Convergence tolerance on the scaled duality gap
    pub tol: f64,
    pub selection: Selection,
    /// Seed for `Selection::Random`
    pub random_state: u64,
}

impl Default for ElasticNetParams {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            l1_ratio: 0.5,
            fit_intercept: true,
            max_iter: 1000,
            tol: 1e-4,
            selection: Selection::Cyclic,
            random_state: 0,
        }
    }
}

impl ElasticNetParams {
    /// Create parameters with the given penalty and defaults elsewhere
    pub fn new(alpha: f64, l1_ratio: f64) -> Self {
        Self {
            alpha,
            l1_ratio,
            ..Default::default()
        }
    }

    /// Set whether to fit an intercept
    pub fn fit_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    /// Set the iteration cap
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the convergence tolerance
    pub fn tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the coordinate selection rule
    pub fn selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Set the random seed
    pub fn random_state(mut self, random_state: u64) -> Self {
        self.random_state = random_state;
        self
    }

    /// L1 penalty weight (`alpha * l1_ratio`)
    pub fn l1_penalty(&self) -> f64 {
        self.alpha * self.l1_ratio
    }

    /// L2 penalty weight (`alpha * (1 - l1_ratio)`)
    pub fn l2_penalty(&self) -> f64 {
        self.alpha * (1.0 - self.l1_ratio)
    }

    pub fn validate(&self) -> Result<(), LinearError> {
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(LinearError::InvalidParams(format!(
                "alpha must be a finite value >= 0, got {}",
                self.alpha
            )));
        }
        if !(0.0..=1.0).contains(&self.l1_ratio) {
            return Err(LinearError::InvalidParams(format!(
                "l1_ratio must be within [0, 1], got {}",
                self.l1_ratio
            )));
        }
        if self.max_iter == 0 {
            return Err(LinearError::InvalidParams(
                "max_iter must be at least 1".to_string(),
            ));
        }
        if !self.tol.is_finite() || self.tol <= 0.0 {
            return Err(LinearError::InvalidParams(format!(
                "tol must be a finite value > 0, got {}",
                self.tol
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_builder() {
        let params = ElasticNetParams::new(0.3, 0.7)
            .max_iter(50)
            .tol(1e-6)
            .selection(Selection::Random)
            .random_state(42)
            .fit_intercept(false);
        assert_eq!(params.alpha, 0.3);
        assert_eq!(params.max_iter, 50);
        assert_eq!(params.selection, Selection::Random);
        assert_eq!(params.random_state, 42);
        assert!(!params.fit_intercept);
        assert!((params.l1_penalty() - 0.21).abs() < 1e-12);
        assert!((params.l2_penalty() - 0.09).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(ElasticNetParams::new(1.0, 0.5).validate().is_ok());
        assert!(ElasticNetParams::new(0.0, 0.0).validate().is_ok());
        assert!(ElasticNetParams::new(-0.1, 0.5).validate().is_err());
        assert!(ElasticNetParams::new(f64::NAN, 0.5).validate().is_err());
        assert!(ElasticNetParams::new(1.0, 1.5).validate().is_err());
        assert!(ElasticNetParams::new(1.0, 0.5).max_iter(0).validate().is_err());
        assert!(ElasticNetParams::new(1.0, 0.5).tol(0.0).validate().is_err());
    }

    #[test]
    fn test_selection_strings() {
        assert_eq!(Selection::Cyclic.to_string(), "cyclic");
        assert_eq!(Selection::from_str("random").unwrap(), Selection::Random);
        assert!(Selection::from_str("greedy").is_err());
    }
}
