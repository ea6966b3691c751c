//! Coefficient inference calculations.
//!
//! The Poisson dispersion is fixed at 1, so Wald statistics are referred to
//! the standard normal distribution rather than Student's t.

use faer::Col;
use statrs::distribution::{ContinuousCDF, Normal};

/// Computes inference statistics for regression coefficients.
pub struct CoefficientInference;

impl CoefficientInference {
    /// Compute Wald z-statistics.
    ///
    /// z_j = β_j / SE(β_j)
    pub fn z_statistics(coefficients: &Col<f64>, std_errors: &Col<f64>) -> Col<f64> {
        let n = coefficients.nrows();
        let mut z_stats = Col::zeros(n);

        for j in 0..n {
            if std_errors[j].is_nan() || std_errors[j] == 0.0 {
                z_stats[j] = f64::NAN;
            } else {
                z_stats[j] = coefficients[j] / std_errors[j];
            }
        }

        z_stats
    }

    /// Compute two-sided p-values from z-statistics.
    ///
    /// p_j = 2 * P(Z > |z_j|) where Z ~ N(0, 1)
    pub fn p_values(z_statistics: &Col<f64>) -> Col<f64> {
        let n = z_statistics.nrows();
        let mut p_vals = Col::zeros(n);

        let normal = match Normal::new(0.0, 1.0) {
            Ok(d) => d,
            Err(_) => {
                for j in 0..n {
                    p_vals[j] = f64::NAN;
                }
                return p_vals;
            }
        };

        for j in 0..n {
            if z_statistics[j].is_nan() {
                p_vals[j] = f64::NAN;
            } else {
                p_vals[j] = (2.0 * normal.sf(z_statistics[j].abs())).min(1.0);
            }
        }

        p_vals
    }

    /// Two-sided standard normal critical value for `confidence_level`.
    pub fn critical_value(confidence_level: f64) -> f64 {
        let alpha = 1.0 - confidence_level;
        Normal::new(0.0, 1.0)
            .map(|d| d.inverse_cdf(1.0 - alpha / 2.0))
            .unwrap_or(f64::NAN)
    }

    /// Compute Wald confidence intervals for coefficients.
    ///
    /// CI_j = β_j ± z_{α/2} * SE(β_j)
    pub fn confidence_intervals(
        coefficients: &Col<f64>,
        std_errors: &Col<f64>,
        confidence_level: f64,
    ) -> (Col<f64>, Col<f64>) {
        let n = coefficients.nrows();
        let z_crit = Self::critical_value(confidence_level);

        let mut lower = Col::zeros(n);
        let mut upper = Col::zeros(n);
        for j in 0..n {
            if std_errors[j].is_nan() {
                lower[j] = f64::NAN;
                upper[j] = f64::NAN;
            } else {
                let margin = z_crit * std_errors[j];
                lower[j] = coefficients[j] - margin;
                upper[j] = coefficients[j] + margin;
            }
        }

        (lower, upper)
    }
}
