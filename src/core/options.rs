//! Fitting options and configuration.

use thiserror::Error;

/// Configuration options for Poisson regression.
#[derive(Debug, Clone)]
pub struct RegressionOptions {
    /// Whether to prepend an intercept column (default: true).
    pub with_intercept: bool,
    /// Confidence level for Wald intervals (default: 0.95).
    pub confidence_level: f64,
    /// Maximum IRLS iterations (default: 25).
    pub max_iterations: usize,
    /// Relative deviance change that counts as converged (default: 1e-8).
    pub tolerance: f64,
    /// Relative pivot size below which a column is treated as collinear.
    pub rank_tolerance: f64,
    /// Accept non-integer responses (quasi-count data, default: false).
    pub allow_non_integer: bool,
    /// Names of the predictor columns, excluding the intercept.
    pub feature_names: Option<Vec<String>>,
}

impl Default for RegressionOptions {
    fn default() -> Self {
        Self {
            with_intercept: true,
            confidence_level: 0.95,
            max_iterations: 25,
            tolerance: 1e-8,
            rank_tolerance: 1e-10,
            allow_non_integer: false,
            feature_names: None,
        }
    }
}

/// Errors that can occur when validating regression options.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionsError {
    #[error("confidence_level must be in (0, 1), got {0}")]
    InvalidConfidenceLevel(f64),
    #[error("tolerance must be positive, got {0}")]
    InvalidTolerance(f64),
    #[error("rank_tolerance must be positive, got {0}")]
    InvalidRankTolerance(f64),
    #[error("max_iterations must be at least 1, got {0}")]
    InvalidMaxIterations(usize),
}

impl RegressionOptions {
    /// Create a new builder for regression options.
    pub fn builder() -> RegressionOptionsBuilder {
        RegressionOptionsBuilder::default()
    }

    /// Validate the options and return an error if invalid.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(OptionsError::InvalidConfidenceLevel(self.confidence_level));
        }
        if !(self.tolerance > 0.0) {
            return Err(OptionsError::InvalidTolerance(self.tolerance));
        }
        if !(self.rank_tolerance > 0.0) {
            return Err(OptionsError::InvalidRankTolerance(self.rank_tolerance));
        }
        if self.max_iterations < 1 {
            return Err(OptionsError::InvalidMaxIterations(self.max_iterations));
        }
        Ok(())
    }
}

/// Builder for `RegressionOptions`.
#[derive(Debug, Clone, Default)]
pub struct RegressionOptionsBuilder {
    options: RegressionOptions,
}

impl RegressionOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to include an intercept term.
    pub fn with_intercept(mut self, include: bool) -> Self {
        self.options.with_intercept = include;
        self
    }

    /// Set the confidence level for confidence intervals.
    pub fn confidence_level(mut self, level: f64) -> Self {
        self.options.confidence_level = level;
        self
    }

    /// Set the maximum iterations for IRLS.
    pub fn max_iterations(mut self, max_iter: usize) -> Self {
        self.options.max_iterations = max_iter;
        self
    }

    /// Set the convergence tolerance.
    pub fn tolerance(mut self, tol: f64) -> Self {
        self.options.tolerance = tol;
        self
    }

    /// Set the rank tolerance for the QR decomposition.
    pub fn rank_tolerance(mut self, tol: f64) -> Self {
        self.options.rank_tolerance = tol;
        self
    }

    /// Accept responses that are nonnegative but not whole numbers.
    pub fn allow_non_integer(mut self, allow: bool) -> Self {
        self.options.allow_non_integer = allow;
        self
    }

    /// Name the predictor columns (the intercept is always `(Intercept)`).
    pub fn feature_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.feature_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Build and validate the options.
    pub fn build(self) -> Result<RegressionOptions, OptionsError> {
        self.options.validate()?;
        Ok(self.options)
    }

    /// Build the options without validation.
    pub fn build_unchecked(self) -> RegressionOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = RegressionOptions::default();
        assert!(opts.with_intercept);
        assert!(!opts.allow_non_integer);
        assert_eq!(opts.max_iterations, 25);
        assert!((opts.tolerance - 1e-8).abs() < 1e-20);
        assert!((opts.confidence_level - 0.95).abs() < 1e-10);
        assert!(opts.feature_names.is_none());
    }

    #[test]
    fn test_builder() {
        let opts = RegressionOptions::builder()
            .with_intercept(false)
            .max_iterations(50)
            .feature_names(["shots"])
            .build()
            .unwrap();

        assert!(!opts.with_intercept);
        assert_eq!(opts.max_iterations, 50);
        assert_eq!(opts.feature_names, Some(vec!["shots".to_string()]));
    }

    #[test]
    fn test_validation_invalid_confidence_level() {
        let result = RegressionOptions::builder().confidence_level(1.0).build();
        assert!(matches!(
            result,
            Err(OptionsError::InvalidConfidenceLevel(_))
        ));

        let result = RegressionOptions::builder().confidence_level(f64::NAN).build();
        assert!(matches!(
            result,
            Err(OptionsError::InvalidConfidenceLevel(_))
        ));
    }

    #[test]
    fn test_validation_invalid_tolerance() {
        let result = RegressionOptions::builder().tolerance(0.0).build();
        assert!(matches!(result, Err(OptionsError::InvalidTolerance(_))));
    }

    #[test]
    fn test_validation_invalid_rank_tolerance() {
        let result = RegressionOptions::builder().rank_tolerance(-1.0).build();
        assert!(matches!(result, Err(OptionsError::InvalidRankTolerance(_))));
    }

    #[test]
    fn test_validation_invalid_max_iterations() {
        let result = RegressionOptions::builder().max_iterations(0).build();
        assert!(matches!(result, Err(OptionsError::InvalidMaxIterations(0))));
    }
}
