//! Elastic-net regression fitted by coordinate descent
//!
//! Minimizes
//!
//! ```text
//! 1 / (2 * n) * ||y - Xw - b||^2
//!     + alpha * l1_ratio * ||w||_1
//!     + 0.5 * alpha * (1 - l1_ratio) * ||w||^2
//! ```
//!
//! Each sweep updates one coefficient at a time with a soft-threshold
//! followed by L2 shrinkage. When the largest coefficient change in a sweep
//! becomes small the duality gap is checked, and the fit stops once the gap
//! is below `tol * ||y||^2`.

use fitstage_core::{Regressor, RegressorMetadata, Result as CoreResult};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{ElasticNetParams, LinearError, Selection};

/// Elastic-net regressor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElasticNet {
    params: ElasticNetParams,
    /// Coefficients for features (excluding intercept)
    coefficients: Option<Array1<f64>>,
    intercept: f64,
    /// Sweeps performed by the last fit
    n_iter: usize,
    converged: bool,
    /// Duality gap at the last check, in the unscaled objective
    dual_gap: f64,
}

impl ElasticNet {
    /// Create an unfitted model
    pub fn new(params: ElasticNetParams) -> Self {
        Self {
            params,
            coefficients: None,
            intercept: 0.0,
            n_iter: 0,
            converged: false,
            dual_gap: f64::INFINITY,
        }
    }

    pub fn params(&self) -> &ElasticNetParams {
        &self.params
    }

    /// Fitted coefficients, if any
    pub fn coefficients(&self) -> Option<&Array1<f64>> {
        self.coefficients.as_ref()
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    pub fn converged(&self) -> bool {
        self.converged
    }

    pub fn dual_gap(&self) -> f64 {
        self.dual_gap
    }

    /// Number of feature columns the model was fitted on
    pub fn n_features(&self) -> Option<usize> {
        self.coefficients.as_ref().map(|c| c.len())
    }

    /// Fit the model
    pub fn fit_arrays(
        &mut self,
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, f64>,
    ) -> Result<(), LinearError> {
        self.params.validate()?;

        let (n_samples, n_features) = x.dim();
        if n_samples == 0 {
            return Err(LinearError::EmptyInput);
        }
        if n_features == 0 {
            return Err(LinearError::NoFeatures);
        }
        if n_samples != y.len() {
            return Err(LinearError::SampleMismatch {
                samples: n_samples,
                targets: y.len(),
            });
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(LinearError::NonFinite("features"));
        }
        if y.iter().any(|v| !v.is_finite()) {
            return Err(LinearError::NonFinite("target"));
        }

        // Center data if fitting intercept
        let (x_offset, y_offset) = if self.params.fit_intercept {
            let x_mean = x.mean_axis(Axis(0)).ok_or(LinearError::EmptyInput)?;
            let y_mean = y.mean().ok_or(LinearError::EmptyInput)?;
            (x_mean, y_mean)
        } else {
            (Array1::zeros(n_features), 0.0)
        };
        let xc: Array2<f64> = &x - &x_offset;
        let yc: Array1<f64> = y.mapv(|v| v - y_offset);

        let n = n_samples as f64;
        let l1_reg = self.params.l1_penalty() * n;
        let l2_reg = self.params.l2_penalty() * n;

        let col_norms_sq: Array1<f64> = xc.map_axis(Axis(0), |col| col.dot(&col));
        let tol = self.params.tol * yc.dot(&yc);

        let mut rng = StdRng::seed_from_u64(self.params.random_state);
        let mut w = Array1::<f64>::zeros(n_features);
        let mut residual = yc.clone();
        let mut gap = f64::INFINITY;
        let mut converged = false;
        let mut n_iter = 0;

        for iter in 0..self.params.max_iter {
            let mut w_max = 0.0f64;
            let mut d_w_max = 0.0f64;

            for step in 0..n_features {
                let j = match self.params.selection {
                    Selection::Cyclic => step,
                    Selection::Random => rng.gen_range(0..n_features),
                };
                if col_norms_sq[j] == 0.0 {
                    continue;
                }

                let col = xc.column(j);
                let w_old = w[j];
                if w_old != 0.0 {
                    residual.scaled_add(w_old, &col);
                }

                let rho = col.dot(&residual);
                w[j] = soft_threshold(rho, l1_reg) / (col_norms_sq[j] + l2_reg);

                if w[j] != 0.0 {
                    residual.scaled_add(-w[j], &col);
                }

                d_w_max = d_w_max.max((w[j] - w_old).abs());
                w_max = w_max.max(w[j].abs());
            }
            n_iter = iter + 1;

            let last = iter + 1 == self.params.max_iter;
            if w_max == 0.0 || d_w_max / w_max < self.params.tol || last {
                gap = duality_gap(xc.view(), yc.view(), w.view(), residual.view(), l1_reg, l2_reg);
                if gap <= tol {
                    converged = true;
                    break;
                }
            }
        }

        if converged {
            debug!(n_iter, gap, "elastic net converged");
        } else {
            warn!(
                n_iter,
                gap,
                tol,
                "elastic net did not converge; consider raising max_iter or tol"
            );
        }

        self.intercept = if self.params.fit_intercept {
            y_offset - x_offset.dot(&w)
        } else {
            0.0
        };
        self.coefficients = Some(w);
        self.n_iter = n_iter;
        self.converged = converged;
        self.dual_gap = gap / n;
        Ok(())
    }

    /// Predict targets
    pub fn predict_arrays(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>, LinearError> {
        let coefficients = self.coefficients.as_ref().ok_or(LinearError::NotFitted)?;
        if x.ncols() != coefficients.len() {
            return Err(LinearError::FeatureMismatch {
                expected: coefficients.len(),
                actual: x.ncols(),
            });
        }
        Ok(x.dot(coefficients) + self.intercept)
    }
}

impl Regressor for ElasticNet {
    fn fit(&mut self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>) -> CoreResult<()> {
        Ok(self.fit_arrays(x, y)?)
    }

    fn predict(&self, x: ArrayView2<'_, f64>) -> CoreResult<Array1<f64>> {
        Ok(self.predict_arrays(x)?)
    }

    fn is_fitted(&self) -> bool {
        self.coefficients.is_some()
    }

    fn metadata(&self) -> RegressorMetadata {
        let mut meta = RegressorMetadata::named("ElasticNet");
        meta.description = Some("Linear regression with combined L1 and L2 priors".to_string());
        meta.version = Some(env!("CARGO_PKG_VERSION").to_string());
        meta.insert("alpha", self.params.alpha)
            .insert("l1_ratio", self.params.l1_ratio)
            .insert("tol", self.params.tol)
            .insert("max_iter", self.params.max_iter)
            .insert("random_state", self.params.random_state)
            .insert("fit_intercept", self.params.fit_intercept)
            .insert("selection", self.params.selection.to_string());
        meta
    }
}

fn soft_threshold(value: f64, threshold: f64) -> f64 {
    if value > threshold {
        value - threshold
    } else if value < -threshold {
        value + threshold
    } else {
        0.0
    }
}

/// Duality gap of the n-scaled primal problem
fn duality_gap(
    x: ArrayView2<'_, f64>,
    y: ArrayView1<'_, f64>,
    w: ArrayView1<'_, f64>,
    residual: ArrayView1<'_, f64>,
    l1_reg: f64,
    l2_reg: f64,
) -> f64 {
    let xt_r = x.t().dot(&residual) - &(&w * l2_reg);
    let dual_norm = xt_r.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    let r_norm2 = residual.dot(&residual);
    let w_norm2 = w.dot(&w);

    let (scale, mut gap) = if dual_norm > l1_reg {
        let scale = l1_reg / dual_norm;
        (scale, 0.5 * (r_norm2 + r_norm2 * scale * scale))
    } else {
        (1.0, r_norm2)
    };

    let l1_norm: f64 = w.iter().map(|v| v.abs()).sum();
    gap += l1_reg * l1_norm - scale * residual.dot(&y)
        + 0.5 * l2_reg * (1.0 + scale * scale) * w_norm2;
    gap
}
