//! Common test utilities and data generators.

#![allow(dead_code)]

use faer::{Col, Mat};
use goalglm::data::{simulate_poisson_response, uniform_design};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Draw x ~ U(-2, 2) and y ~ Poisson(exp(beta0 + beta1 * x)).
pub fn generate_poisson_data(n_samples: usize, beta0: f64, beta1: f64, seed: u64) -> (Mat<f64>, Col<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let x = uniform_design(n_samples, -2.0, 2.0, &mut rng).unwrap();
    let y = simulate_poisson_response(&x, &[beta0, beta1], true, &mut rng).unwrap();
    (x, y)
}

/// Exact means y = exp(beta0 + beta1 * x) on an even grid of x in [0, 10).
pub fn generate_noiseless_data(n_samples: usize, beta0: f64, beta1: f64) -> (Mat<f64>, Col<f64>) {
    let x = Mat::from_fn(n_samples, 1, |i, _| 10.0 * i as f64 / n_samples as f64);
    let y = Col::from_fn(n_samples, |i| (beta0 + beta1 * x[(i, 0)]).exp());
    (x, y)
}

/// Two covariates where the second is twice the first.
pub fn generate_collinear_data(n_samples: usize) -> (Mat<f64>, Col<f64>) {
    let x = Mat::from_fn(n_samples, 2, |i, j| (j + 1) as f64 * (i % 7) as f64);
    let y = Col::from_fn(n_samples, |i| ((i * 3) % 5) as f64);
    (x, y)
}

/// Group indicator design with counts whose group means are 2 and 5.
///
/// The MLE is available in closed form: β₀ = ln 2, β₁ = ln(5/2).
pub fn generate_two_group_data() -> (Mat<f64>, Col<f64>) {
    let counts = [1.0, 2.0, 3.0, 0.0, 4.0, 3.0, 5.0, 4.0, 6.0, 7.0];
    let x = Mat::from_fn(10, 1, |i, _| if i < 5 { 0.0 } else { 1.0 });
    let y = Col::from_fn(10, |i| counts[i]);
    (x, y)
}

/// The ten-count sample used for intercept-only checks (mean 1.6).
pub fn intercept_only_counts() -> Col<f64> {
    let counts = [0.0, 1.0, 2.0, 1.0, 3.0, 0.0, 2.0, 4.0, 1.0, 2.0];
    Col::from_fn(10, |i| counts[i])
}

/// log(k!) by direct summation.
pub fn ln_factorial(k: u64) -> f64 {
    (2..=k).map(|i| (i as f64).ln()).sum()
}

/// Check if two floats are approximately equal.
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}
