//! GLM residual types for the Poisson family.
//!
//! - **Response**: `y - μ`
//! - **Pearson**: `(y - μ) / sqrt(μ)`
//! - **Deviance**: `sign(y - μ) * sqrt(d_i)` where `d_i` is the unit deviance
//! - **Working**: `(y - μ) / μ`, the residual IRLS regresses on
//!
//! # Reference
//!
//! McCullagh, P. and Nelder, J.A. (1989). Generalized Linear Models, 2nd ed.

use crate::core::PoissonFamily;
use faer::Col;

/// Compute response residuals: y - μ.
pub fn response_residuals(y: &Col<f64>, mu: &Col<f64>) -> Col<f64> {
    let n = y.nrows();
    Col::from_fn(n, |i| y[i] - mu[i])
}

/// Compute Pearson residuals: (y - μ) / sqrt(V(μ)).
pub fn pearson_residuals(y: &Col<f64>, mu: &Col<f64>, family: &PoissonFamily) -> Col<f64> {
    let n = y.nrows();
    Col::from_fn(n, |i| (y[i] - mu[i]) / family.variance(mu[i]).sqrt())
}

/// Compute deviance residuals: sign(y - μ) * sqrt(d_i).
///
/// The squared residuals sum to the residual deviance.
pub fn deviance_residuals(y: &Col<f64>, mu: &Col<f64>, family: &PoissonFamily) -> Col<f64> {
    let n = y.nrows();
    Col::from_fn(n, |i| {
        let d_i = family.unit_deviance(y[i], mu[i]).max(0.0);
        let sign = if y[i] >= mu[i] { 1.0 } else { -1.0 };
        sign * d_i.sqrt()
    })
}

/// Compute working residuals: (y - μ) * (dη/dμ).
pub fn working_residuals(y: &Col<f64>, mu: &Col<f64>, family: &PoissonFamily) -> Col<f64> {
    let n = y.nrows();
    Col::from_fn(n, |i| (y[i] - mu[i]) * family.link_derivative(mu[i]))
}

/// Compute standardized deviance residuals: r_D / sqrt(φ * (1 - h_ii)).
pub fn standardized_deviance_residuals(
    y: &Col<f64>,
    mu: &Col<f64>,
    family: &PoissonFamily,
    leverage: &Col<f64>,
    dispersion: f64,
) -> Col<f64> {
    let deviance = deviance_residuals(y, mu, family);
    let n = y.nrows();

    Col::from_fn(n, |i| {
        let scale = (dispersion * (1.0 - leverage[i])).max(1e-14).sqrt();
        deviance[i] / scale
    })
}

/// Compute standardized Pearson residuals: r_P / sqrt(φ * (1 - h_ii)).
pub fn standardized_pearson_residuals(
    y: &Col<f64>,
    mu: &Col<f64>,
    family: &PoissonFamily,
    leverage: &Col<f64>,
    dispersion: f64,
) -> Col<f64> {
    let pearson = pearson_residuals(y, mu, family);
    let n = y.nrows();

    Col::from_fn(n, |i| {
        let scale = (dispersion * (1.0 - leverage[i])).max(1e-14).sqrt();
        pearson[i] / scale
    })
}
