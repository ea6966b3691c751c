//! Deviance-based tests and dispersion estimates.

use crate::core::{PoissonFamily, RegressionResult};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Likelihood-ratio (analysis of deviance) test between nested models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DevianceTest {
    /// Drop in deviance, D_reduced - D_full.
    pub statistic: f64,
    /// Difference in residual degrees of freedom.
    pub df: usize,
    /// Upper-tail χ² probability of `statistic` on `df` degrees of freedom.
    pub p_value: f64,
}

impl DevianceTest {
    /// Compare a reduced model (larger deviance) with a full model.
    pub fn new(deviance_reduced: f64, df_reduced: usize, deviance_full: f64, df_full: usize) -> Self {
        let statistic = (deviance_reduced - deviance_full).max(0.0);
        let df = df_reduced.saturating_sub(df_full);
        let p_value = if df == 0 {
            f64::NAN
        } else {
            ChiSquared::new(df as f64)
                .map(|d| d.sf(statistic))
                .unwrap_or(f64::NAN)
        };
        Self {
            statistic,
            df,
            p_value,
        }
    }

    /// Test a fitted model against its null model.
    pub fn against_null(result: &RegressionResult) -> Self {
        Self::new(
            result.null_deviance,
            result.df_null,
            result.deviance,
            result.df_residual,
        )
    }
}

/// Pearson's chi-squared statistic: Σ (y - μ)² / V(μ).
pub fn pearson_chi_squared(y: &[f64], mu: &[f64], family: &PoissonFamily) -> f64 {
    y.iter()
        .zip(mu.iter())
        .map(|(&yi, &mui)| (yi - mui).powi(2) / family.variance(mui))
        .sum()
}

/// Estimate the dispersion φ̂ = X² / df_residual.
///
/// The Poisson model assumes φ = 1; the estimate is a diagnostic for
/// overdispersion and is `NaN` when there are no residual degrees of freedom.
pub fn pearson_dispersion(y: &[f64], mu: &[f64], family: &PoissonFamily, df_residual: usize) -> f64 {
    if df_residual == 0 {
        return f64::NAN;
    }
    pearson_chi_squared(y, mu, family) / df_residual as f64
}
