//! Core traits for regression estimators.

use crate::core::{OptionsError, PredictionResult, PredictionType, RegressionResult};
use faer::{Col, Mat};
use thiserror::Error;

/// Errors that can occur during regression fitting.
///
/// There is no partial success: every variant means no fitted model was
/// produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegressionError {
    /// The arguments violate the fitting contract.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// The weighted least-squares system is singular.
    #[error("design matrix is rank deficient; collinear columns: {}", columns.join(", "))]
    RankDeficient {
        /// Names of the columns that are linear combinations of earlier ones.
        columns: Vec<String>,
    },

    /// IRLS hit the iteration cap before the deviance settled.
    #[error(
        "IRLS did not converge after {iterations} iterations (last deviance {deviance})"
    )]
    NonConvergence {
        /// Iterations performed.
        iterations: usize,
        /// Deviance of the last iterate.
        deviance: f64,
        /// Coefficients of the last iterate, in design-column order.
        coefficients: Vec<f64>,
    },
}

/// Contract violations detected before fitting starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("dimension mismatch: X has {x_rows} rows but y has {y_len} elements")]
    DimensionMismatch { x_rows: usize, y_len: usize },

    #[error("insufficient observations: need more than {n_params} for {n_params} parameters, got {got}")]
    InsufficientObservations { n_params: usize, got: usize },

    #[error("design matrix has no columns")]
    EmptyDesign,

    #[error("response must be non-negative, got y[{index}] = {value}")]
    NegativeResponse { index: usize, value: f64 },

    #[error("response must be a whole-number count, got y[{index}] = {value}")]
    NonIntegerResponse { index: usize, value: f64 },

    #[error("non-finite value in {what} at row {index}")]
    NonFinite { what: &'static str, index: usize },

    #[error("expected {expected} feature names, got {got}")]
    FeatureNameMismatch { expected: usize, got: usize },

    #[error(transparent)]
    Options(#[from] OptionsError),
}

impl From<OptionsError> for RegressionError {
    fn from(err: OptionsError) -> Self {
        RegressionError::InvalidInput(InputError::Options(err))
    }
}

/// A regression estimator that can be fit to data.
///
/// Fitting returns a separate fitted model; the estimator itself keeps no
/// state between calls.
pub trait Regressor {
    /// The type of the fitted model.
    type Fitted: FittedRegressor;

    /// Fit the model to the data.
    ///
    /// # Arguments
    /// * `x` - Predictor matrix of shape (n_samples, n_features)
    /// * `y` - Response vector of length n_samples
    fn fit(&self, x: &Mat<f64>, y: &Col<f64>) -> Result<Self::Fitted, RegressionError>;
}

/// A fitted regression model that can make predictions.
pub trait FittedRegressor {
    /// Predict on the response scale.
    ///
    /// `x` has the same columns as the matrix passed to `fit`.
    fn predict(&self, x: &Mat<f64>) -> Col<f64>;

    /// Access the regression results (coefficients, statistics, etc.).
    fn result(&self) -> &RegressionResult;

    /// Get the coefficients, intercept first when present.
    fn coefficients(&self) -> &Col<f64> {
        &self.result().coefficients
    }

    /// Get the intercept (convenience method).
    fn intercept(&self) -> Option<f64> {
        self.result().intercept()
    }

    /// Predictions with standard errors and confidence intervals at `level`.
    fn predict_with_interval(
        &self,
        x: &Mat<f64>,
        pred_type: PredictionType,
        level: f64,
    ) -> PredictionResult;
}
