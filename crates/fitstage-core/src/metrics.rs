//! Regression metrics
//!
//! All functions take `(actual, predicted)` as `n x k` column matrices,
//! evaluate each output column independently and average the per-column
//! values uniformly. A single target is passed as an `n x 1` column.
//! NaN and infinite values are not special-cased; they propagate.

use crate::{CoreError, Result};
use ndarray::{Array1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

/// The three scores reported for every run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionMetrics {
    /// Mean squared error. The key keeps its historical name; the value is
    /// not square-rooted.
    pub rmse: f64,
    pub mae: f64,
    pub r2: f64,
}

impl RegressionMetrics {
    /// Compute all three scores for one `(actual, predicted)` pair
    pub fn evaluate(actual: ArrayView2<'_, f64>, predicted: ArrayView2<'_, f64>) -> Result<Self> {
        Ok(Self {
            rmse: mean_squared_error(actual, predicted)?,
            mae: mean_absolute_error(actual, predicted)?,
            r2: r2_score(actual, predicted)?,
        })
    }
}

fn check_shapes(actual: &ArrayView2<'_, f64>, predicted: &ArrayView2<'_, f64>) -> Result<()> {
    if actual.shape() != predicted.shape() {
        return Err(CoreError::ShapeMismatch {
            expected: format!("{:?}", actual.shape()),
            actual: format!("{:?}", predicted.shape()),
        });
    }
    if actual.nrows() == 0 || actual.ncols() == 0 {
        return Err(CoreError::InvalidInput(
            "metrics require at least one sample and one output".to_string(),
        ));
    }
    Ok(())
}

fn uniform_average(per_output: Array1<f64>) -> Result<f64> {
    per_output
        .mean()
        .ok_or_else(|| CoreError::InvalidInput("no outputs to average".to_string()))
}

fn per_output_mean(values: ndarray::Array2<f64>) -> Result<Array1<f64>> {
    values
        .mean_axis(Axis(0))
        .ok_or_else(|| CoreError::InvalidInput("no samples to average".to_string()))
}

/// Mean of squared residuals
pub fn mean_squared_error(actual: ArrayView2<'_, f64>, predicted: ArrayView2<'_, f64>) -> Result<f64> {
    check_shapes(&actual, &predicted)?;
    let residuals = &actual - &predicted;
    uniform_average(per_output_mean(residuals.mapv(|r| r * r))?)
}

/// Square root of the per-output mean squared error
pub fn root_mean_squared_error(
    actual: ArrayView2<'_, f64>,
    predicted: ArrayView2<'_, f64>,
) -> Result<f64> {
    check_shapes(&actual, &predicted)?;
    let residuals = &actual - &predicted;
    let mse = per_output_mean(residuals.mapv(|r| r * r))?;
    uniform_average(mse.mapv(f64::sqrt))
}

/// Mean of absolute residuals
pub fn mean_absolute_error(
    actual: ArrayView2<'_, f64>,
    predicted: ArrayView2<'_, f64>,
) -> Result<f64> {
    check_shapes(&actual, &predicted)?;
    let residuals = &actual - &predicted;
    uniform_average(per_output_mean(residuals.mapv(f64::abs))?)
}

/// Coefficient of determination.
///
/// A column with zero variance scores 1.0 when predicted exactly and 0.0
/// otherwise, so the result stays finite.
pub fn r2_score(actual: ArrayView2<'_, f64>, predicted: ArrayView2<'_, f64>) -> Result<f64> {
    check_shapes(&actual, &predicted)?;
    let mut scores = Array1::zeros(actual.ncols());
    for (j, score) in scores.iter_mut().enumerate() {
        let a = actual.column(j);
        let p = predicted.column(j);
        let mean = a
            .mean()
            .ok_or_else(|| CoreError::InvalidInput("empty target column".to_string()))?;
        let ss_res: f64 = a.iter().zip(p.iter()).map(|(y, f)| (y - f) * (y - f)).sum();
        let ss_tot: f64 = a.iter().map(|y| (y - mean) * (y - mean)).sum();
        *score = if ss_tot == 0.0 {
            if ss_res == 0.0 { 1.0 } else { 0.0 }
        } else {
            1.0 - ss_res / ss_tot
        };
    }
    uniform_average(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_perfect_prediction() {
        let y = array![[1.0], [2.0], [3.0]];
        let m = RegressionMetrics::evaluate(y.view(), y.view()).unwrap();
        assert_eq!(m.rmse, 0.0);
        assert_eq!(m.mae, 0.0);
        assert_eq!(m.r2, 1.0);
    }

    #[test]
    fn test_known_values() {
        let actual = array![[3.0], [-0.5], [2.0], [7.0]];
        let predicted = array![[2.5], [0.0], [2.0], [8.0]];
        let mse = mean_squared_error(actual.view(), predicted.view()).unwrap();
        let mae = mean_absolute_error(actual.view(), predicted.view()).unwrap();
        let r2 = r2_score(actual.view(), predicted.view()).unwrap();
        assert!((mse - 0.375).abs() < 1e-12);
        assert!((mae - 0.5).abs() < 1e-12);
        assert!((r2 - 0.948_608_137_044_967_9).abs() < 1e-12);

        let rmse = root_mean_squared_error(actual.view(), predicted.view()).unwrap();
        assert!((rmse - 0.375f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_reported_rmse_is_mean_squared_error() {
        let actual = array![[3.0], [-0.5], [2.0], [7.0]];
        let predicted = array![[2.5], [0.0], [2.0], [8.0]];
        let m = RegressionMetrics::evaluate(actual.view(), predicted.view()).unwrap();
        assert!((m.rmse - 0.375).abs() < 1e-12);
        assert!((m.mae - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_r2_can_be_negative() {
        let actual = array![[1.0], [2.0], [3.0]];
        let predicted = array![[3.0], [2.0], [1.0]];
        let r2 = r2_score(actual.view(), predicted.view()).unwrap();
        assert!((r2 - (-3.0)).abs() < 1e-12);
    }

    #[test]
    fn test_r2_constant_target() {
        let actual = array![[2.0], [2.0]];
        assert_eq!(r2_score(actual.view(), actual.view()).unwrap(), 1.0);
        let off = array![[2.0], [3.0]];
        assert_eq!(r2_score(actual.view(), off.view()).unwrap(), 0.0);
    }

    #[test]
    fn test_multi_output_is_uniform_average() {
        let actual = array![[1.0, 0.0], [2.0, 0.0]];
        let predicted = array![[1.0, 1.0], [2.0, 1.0]];
        let mae = mean_absolute_error(actual.view(), predicted.view()).unwrap();
        assert!((mae - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_shape_mismatch() {
        let actual = array![[1.0], [2.0]];
        let predicted = array![[1.0], [2.0], [3.0]];
        assert!(matches!(
            mean_squared_error(actual.view(), predicted.view()),
            Err(CoreError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_input() {
        let empty = ndarray::Array2::<f64>::zeros((0, 1));
        assert!(mean_absolute_error(empty.view(), empty.view()).is_err());
    }

    #[test]
    fn test_nan_propagates() {
        let actual = array![[1.0], [f64::NAN]];
        let predicted = array![[1.0], [2.0]];
        let m = RegressionMetrics::evaluate(actual.view(), predicted.view()).unwrap();
        assert!(m.rmse.is_nan());
        assert!(m.mae.is_nan());
        assert!(m.r2.is_nan());
    }
}
