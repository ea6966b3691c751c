//! Poisson family with the canonical log link.
//!
//! # Example
//!
//! ```ignore
//! use goalglm::PoissonFamily;
//!
//! let poisson = PoissonFamily::new();
//! let mu = poisson.link_inverse(0.5);
//! assert!((poisson.link(mu) - 0.5).abs() < 1e-12);
//! ```

use statrs::function::gamma::ln_gamma;

/// Largest |η| passed to `exp`; keeps μ and the IRLS weights finite.
pub const ETA_BOUND: f64 = 30.0;

/// Smallest fitted mean; keeps 1/μ and log(μ) finite.
pub const MU_MIN: f64 = f64::EPSILON;

/// Offset added to y for the IRLS starting means.
pub const MU_START_SHIFT: f64 = 0.1;

/// Poisson family for count data regression.
///
/// # Variance Function
///
/// V(μ) = μ
///
/// # Unit Deviance
///
/// d(y, μ) = 2[y·log(y/μ) - (y - μ)], with d(0, μ) = 2μ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoissonFamily;

impl PoissonFamily {
    /// Create the Poisson family (log link).
    pub fn new() -> Self {
        Self
    }

    /// Variance function V(μ) = μ.
    #[inline]
    pub fn variance(&self, mu: f64) -> f64 {
        mu.max(MU_MIN)
    }

    /// Log link: η = log(μ).
    #[inline]
    pub fn link(&self, mu: f64) -> f64 {
        mu.max(MU_MIN).ln()
    }

    /// Inverse link μ = exp(η), with η clamped to `±ETA_BOUND`.
    #[inline]
    pub fn link_inverse(&self, eta: f64) -> f64 {
        eta.clamp(-ETA_BOUND, ETA_BOUND).exp().max(MU_MIN)
    }

    /// dη/dμ = 1/μ.
    #[inline]
    pub fn link_derivative(&self, mu: f64) -> f64 {
        1.0 / mu.max(MU_MIN)
    }

    /// dμ/dη = μ.
    #[inline]
    pub fn link_inverse_derivative(&self, eta: f64) -> f64 {
        self.link_inverse(eta)
    }

    /// IRLS weight w = 1 / (V(μ)·(dη/dμ)²), which is μ for the log link.
    #[inline]
    pub fn irls_weight(&self, mu: f64) -> f64 {
        mu.max(MU_MIN)
    }

    /// Working response z = η + (y - μ)·dη/dμ.
    #[inline]
    pub fn working_response(&self, y: f64, mu: f64, eta: f64) -> f64 {
        eta + (y - mu) * self.link_derivative(mu)
    }

    /// Unit deviance d(y, μ).
    pub fn unit_deviance(&self, y: f64, mu: f64) -> f64 {
        let mu = mu.max(MU_MIN);
        if y == 0.0 {
            2.0 * mu
        } else {
            2.0 * (y * (y / mu).ln() - (y - mu))
        }
    }

    /// Total deviance Σ d(yᵢ, μᵢ).
    pub fn deviance(&self, y: &[f64], mu: &[f64]) -> f64 {
        y.iter()
            .zip(mu.iter())
            .map(|(&yi, &mui)| self.unit_deviance(yi, mui))
            .sum()
    }

    /// Deviance of the null model.
    ///
    /// With an intercept the null model fits μ = ȳ; without one it has no
    /// parameters and μ = exp(0) = 1.
    pub fn null_deviance(&self, y: &[f64], with_intercept: bool) -> f64 {
        let mu_null = if with_intercept {
            y.iter().sum::<f64>() / y.len() as f64
        } else {
            1.0
        };
        y.iter().map(|&yi| self.unit_deviance(yi, mu_null)).sum()
    }

    /// Log-likelihood Σ [y·log(μ) - μ - log(y!)].
    pub fn log_likelihood(&self, y: &[f64], mu: &[f64]) -> f64 {
        y.iter()
            .zip(mu.iter())
            .map(|(&yi, &mui)| {
                let mui = mui.max(MU_MIN);
                let y_log_mu = if yi == 0.0 { 0.0 } else { yi * mui.ln() };
                y_log_mu - mui - ln_gamma(yi + 1.0)
            })
            .sum()
    }

    /// Starting means for IRLS: μ⁽⁰⁾ = y + 0.1.
    pub fn initialize_mu(&self, y: &[f64]) -> Vec<f64> {
        y.iter().map(|&yi| yi + MU_START_SHIFT).collect()
    }
}
