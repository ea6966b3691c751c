//! Leverage (hat matrix diagonal) for the weighted IRLS fit.

use crate::utils::matrix::row_quadratic_form;
use faer::{Col, Mat};

/// Compute hat values h_ii = w_i · x_iᵀ (X'WX)⁻¹ x_i.
///
/// `design` is the full design matrix (intercept column included),
/// `weights` the IRLS weights at convergence and `xtwx_inverse` the matching
/// (X'WX)⁻¹.
///
/// # Properties
/// - h_ii ∈ [0, 1]
/// - Σ h_ii = p (number of parameters)
pub fn hat_values(design: &Mat<f64>, weights: &Col<f64>, xtwx_inverse: &Mat<f64>) -> Col<f64> {
    Col::from_fn(design.nrows(), |i| {
        (weights[i] * row_quadratic_form(design, i, xtwx_inverse)).clamp(0.0, 1.0)
    })
}

/// Identify high leverage points.
///
/// Returns indices of observations with leverage > threshold.
/// Default threshold is 2p/n where p is number of parameters.
pub fn high_leverage_points(
    leverage: &Col<f64>,
    n_params: usize,
    threshold: Option<f64>,
) -> Vec<usize> {
    let n = leverage.nrows();
    let cutoff = threshold.unwrap_or(2.0 * n_params as f64 / n as f64);

    leverage
        .iter()
        .enumerate()
        .filter(|(_, &h)| h > cutoff)
        .map(|(i, _)| i)
        .collect()
}
