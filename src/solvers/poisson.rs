//! Poisson regression solver.
//!
//! Implements the log-link Poisson GLM using Iteratively Reweighted Least
//! Squares (IRLS).
//!
//! # Algorithm
//!
//! Starting from μ = y + 0.1, each iteration forms the weights w = μ and
//! the working response z = η + (y - μ)/μ, then solves the weighted
//! least-squares problem through a QR decomposition of √W·X. Iteration
//! stops once |D - D_old| / (|D| + 0.1) drops below the tolerance.
//!
//! # Example
//!
//! ```rust,ignore
//! use goalglm::solvers::{PoissonRegressor, Regressor, FittedRegressor};
//! use faer::{Mat, Col};
//!
//! let shots = Mat::from_fn(6, 1, |i, _| [8.0, 12.0, 15.0, 9.0, 20.0, 11.0][i]);
//! let goals = Col::from_fn(6, |i| [0.0, 1.0, 2.0, 1.0, 3.0, 1.0][i]);
//!
//! let fitted = PoissonRegressor::builder()
//!     .feature_names(["shots"])
//!     .build()
//!     .fit(&shots, &goals)?;
//!
//! println!("{}", fitted.result());
//! ```

use crate::core::{
    PoissonFamily, PredictionResult, PredictionType, RegressionOptions,
    RegressionOptionsBuilder, RegressionResult, INTERCEPT_NAME,
};
use crate::diagnostics::{
    cooks_distance, deviance_residuals, hat_values, pearson_residuals, response_residuals,
    standardized_deviance_residuals, working_residuals,
};
use crate::inference::{pearson_dispersion, CoefficientInference, DevianceTest};
use crate::solvers::traits::{FittedRegressor, InputError, RegressionError, Regressor};
use crate::utils::matrix::{
    back_substitute, build_design_matrix, column_norms, gram_inverse_from_r, mat_vec,
    row_quadratic_form, sqrt_weighted_rows,
};
use faer::{Col, Mat};
use log::{debug, warn};

/// Guard added to |D| in the relative convergence criterion.
const DEVIANCE_GUARD: f64 = 0.1;

/// Poisson GLM regression estimator.
///
/// # Model
///
/// - `log E[Y] = Xβ`
/// - `Var[Y] = E[Y]`
///
/// The estimator holds only configuration, so one instance can fit any
/// number of data sets, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct PoissonRegressor {
    options: RegressionOptions,
    family: PoissonFamily,
}

/// State of the linear predictor for a given β.
struct Iterate {
    eta: Vec<f64>,
    mu: Vec<f64>,
    deviance: f64,
}

impl PoissonRegressor {
    /// Create a new Poisson regressor with the given options.
    pub fn new(options: RegressionOptions) -> Self {
        Self {
            options,
            family: PoissonFamily::new(),
        }
    }

    /// Create a general builder.
    pub fn builder() -> PoissonRegressorBuilder {
        PoissonRegressorBuilder::default()
    }

    /// Options this regressor fits with.
    pub fn options(&self) -> &RegressionOptions {
        &self.options
    }

    /// Fit integer counts directly.
    pub fn fit_counts(&self, x: &Mat<f64>, counts: &[u64]) -> Result<FittedPoisson, RegressionError> {
        let y = Col::from_fn(counts.len(), |i| counts[i] as f64);
        self.fit(x, &y)
    }

    fn validate(&self, x: &Mat<f64>, y: &Col<f64>) -> Result<(), InputError> {
        self.options.validate()?;

        let n_samples = x.nrows();
        let n_features = x.ncols();

        if n_samples != y.nrows() {
            return Err(InputError::DimensionMismatch {
                x_rows: n_samples,
                y_len: y.nrows(),
            });
        }

        let n_params = n_features + usize::from(self.options.with_intercept);
        if n_params == 0 {
            return Err(InputError::EmptyDesign);
        }
        if n_samples <= n_params {
            return Err(InputError::InsufficientObservations {
                n_params,
                got: n_samples,
            });
        }

        if let Some(names) = &self.options.feature_names {
            if names.len() != n_features {
                return Err(InputError::FeatureNameMismatch {
                    expected: n_features,
                    got: names.len(),
                });
            }
        }

        for i in 0..n_samples {
            if (0..n_features).any(|j| !x[(i, j)].is_finite()) {
                return Err(InputError::NonFinite { what: "X", index: i });
            }
            let yi = y[i];
            if !yi.is_finite() {
                return Err(InputError::NonFinite { what: "y", index: i });
            }
            if yi < 0.0 {
                return Err(InputError::NegativeResponse { index: i, value: yi });
            }
            if !self.options.allow_non_integer && yi.fract() != 0.0 {
                return Err(InputError::NonIntegerResponse { index: i, value: yi });
            }
        }

        Ok(())
    }

    /// Whether the design has an intercept: prepended, or supplied by the
    /// caller as a leading column of ones.
    fn has_intercept(&self, x_design: &Mat<f64>) -> bool {
        self.options.with_intercept
            || (x_design.ncols() > 0 && (0..x_design.nrows()).all(|i| x_design[(i, 0)] == 1.0))
    }

    fn coefficient_names(&self, n_features: usize, has_intercept: bool) -> Vec<String> {
        let mut names = Vec::with_capacity(n_features + 1);
        if self.options.with_intercept {
            names.push(INTERCEPT_NAME.to_string());
        }
        match &self.options.feature_names {
            Some(given) => names.extend(given.iter().cloned()),
            None => {
                let supplied_intercept = has_intercept && !self.options.with_intercept;
                if supplied_intercept {
                    names.push(INTERCEPT_NAME.to_string());
                }
                let start = usize::from(supplied_intercept);
                names.extend((start..n_features).map(|j| format!("x{}", j + 1 - start)));
            }
        }
        names
    }

    /// Fit the GLM using IRLS (Iteratively Reweighted Least Squares).
    fn fit_irls(&self, x: &Mat<f64>, y: &Col<f64>) -> Result<FittedPoisson, RegressionError> {
        let n_samples = x.nrows();
        let x_design = build_design_matrix(x, self.options.with_intercept);
        let has_intercept = self.has_intercept(&x_design);
        let names = self.coefficient_names(x.ncols(), has_intercept);

        let y_vec: Vec<f64> = (0..n_samples).map(|i| y[i]).collect();

        let mut mu = self.family.initialize_mu(&y_vec);
        let mut eta: Vec<f64> = mu.iter().map(|&m| self.family.link(m)).collect();
        let mut dev_old = self.family.deviance(&y_vec, &mu);
        let mut beta = Col::zeros(x_design.ncols());

        let max_iter = self.options.max_iterations;
        let tol = self.options.tolerance;
        let mut converged = false;
        let mut iterations = 0;

        for iter in 1..=max_iter {
            iterations = iter;

            let weights: Vec<f64> = mu.iter().map(|&m| self.family.irls_weight(m)).collect();
            let z: Vec<f64> = (0..n_samples)
                .map(|i| self.family.working_response(y_vec[i], mu[i], eta[i]))
                .collect();

            beta = self.solve_weighted_ls(&x_design, &z, &weights, &names)?;
            let state = self.evaluate(&x_design, &beta, &y_vec);

            let rel_change =
                (state.deviance - dev_old).abs() / (state.deviance.abs() + DEVIANCE_GUARD);
            debug!(
                "IRLS iteration {iter}: deviance {:.10}, relative change {:.3e}",
                state.deviance, rel_change
            );

            eta = state.eta;
            mu = state.mu;
            dev_old = state.deviance;

            if rel_change < tol {
                converged = true;
                break;
            }
        }

        if !converged {
            warn!(
                "IRLS did not converge after {max_iter} iterations (deviance {dev_old})"
            );
            return Err(RegressionError::NonConvergence {
                iterations: max_iter,
                deviance: dev_old,
                coefficients: beta.iter().copied().collect(),
            });
        }

        debug!("IRLS converged after {iterations} iterations (deviance {dev_old})");

        self.build_result(
            y, x_design, &beta, &eta, &mu, names, has_intercept, iterations,
        )
    }

    /// Linear predictor, means and deviance at `beta`.
    fn evaluate(&self, x_design: &Mat<f64>, beta: &Col<f64>, y: &[f64]) -> Iterate {
        let eta: Vec<f64> = mat_vec(x_design, beta).iter().copied().collect();
        let mu: Vec<f64> = eta.iter().map(|&e| self.family.link_inverse(e)).collect();
        let deviance = self.family.deviance(y, &mu);
        Iterate { eta, mu, deviance }
    }

    fn is_negligible(&self, r_kk: f64, norm: f64) -> bool {
        norm == 0.0 || r_kk.abs() <= self.options.rank_tolerance * norm
    }

    /// Thin QR factors of √W·X.
    ///
    /// With full column rank every diagonal entry of R is large next to the
    /// norm of its column. Otherwise the offending columns are named by
    /// [`Self::collinear_columns`].
    fn factor_weighted(
        &self,
        x: &Mat<f64>,
        weights: &[f64],
        names: &[String],
    ) -> Result<(Mat<f64>, Mat<f64>), RegressionError> {
        let x_weighted = sqrt_weighted_rows(x, weights);
        let norms = column_norms(&x_weighted);

        let qr = x_weighted.qr();
        let r = qr.R().to_owned();

        if (0..x.ncols()).any(|k| self.is_negligible(r[(k, k)], norms[k])) {
            let collinear: Vec<String> = self
                .collinear_columns(&x_weighted, &norms)
                .into_iter()
                .map(|k| names[k].clone())
                .collect();
            warn!("rank deficient design; collinear columns: {collinear:?}");
            return Err(RegressionError::RankDeficient { columns: collinear });
        }

        Ok((qr.compute_thin_Q(), r))
    }

    /// Columns lying in the span of the independent columns before them.
    ///
    /// Columns are admitted left to right; each candidate is factored
    /// together with the columns admitted so far, so its last diagonal entry
    /// of R is the norm of its residual after projecting onto them.
    fn collinear_columns(&self, x_weighted: &Mat<f64>, norms: &[f64]) -> Vec<usize> {
        let n_samples = x_weighted.nrows();
        let mut kept: Vec<usize> = Vec::with_capacity(x_weighted.ncols());
        let mut collinear = Vec::new();

        for k in 0..x_weighted.ncols() {
            if norms[k] == 0.0 {
                collinear.push(k);
                continue;
            }
            let m = kept.len();
            let trial = Mat::from_fn(n_samples, m + 1, |i, j| {
                let col = if j < m { kept[j] } else { k };
                x_weighted[(i, col)]
            });
            let r = trial.qr().R().to_owned();
            if self.is_negligible(r[(m, m)], norms[k]) {
                collinear.push(k);
            } else {
                kept.push(k);
            }
        }
        collinear
    }

    /// Solve min ‖√W(z - Xβ)‖² through the QR decomposition of √W·X.
    fn solve_weighted_ls(
        &self,
        x: &Mat<f64>,
        z: &[f64],
        weights: &[f64],
        names: &[String],
    ) -> Result<Col<f64>, RegressionError> {
        let n_samples = x.nrows();
        let n_params = x.ncols();

        let (q, r) = self.factor_weighted(x, weights, names)?;
        let z_weighted = Col::from_fn(n_samples, |i| weights[i].sqrt() * z[i]);

        // thin Q: Qᵀz has exactly one entry per column
        let qtz = q.transpose() * z_weighted;
        let rhs: Vec<f64> = (0..n_params).map(|i| qtz[i]).collect();

        Ok(back_substitute(&r, &rhs))
    }

    #[allow(clippy::too_many_arguments)]
    fn build_result(
        &self,
        y: &Col<f64>,
        x_design: Mat<f64>,
        beta: &Col<f64>,
        eta: &[f64],
        mu: &[f64],
        names: Vec<String>,
        has_intercept: bool,
        iterations: usize,
    ) -> Result<FittedPoisson, RegressionError> {
        let n_samples = x_design.nrows();
        let n_params = x_design.ncols();
        let y_vec: Vec<f64> = (0..n_samples).map(|i| y[i]).collect();

        // (X'WX)⁻¹ at the converged weights
        let weights: Vec<f64> = mu.iter().map(|&m| self.family.irls_weight(m)).collect();
        let (_, r) = self.factor_weighted(&x_design, &weights, &names)?;
        let covariance = gram_inverse_from_r(&r, n_params);

        let std_errors = Col::from_fn(n_params, |j| {
            let var = covariance[(j, j)];
            if var >= 0.0 {
                var.sqrt()
            } else {
                f64::NAN
            }
        });
        let z_statistics = CoefficientInference::z_statistics(beta, &std_errors);
        let p_values = CoefficientInference::p_values(&z_statistics);
        let (conf_interval_lower, conf_interval_upper) = CoefficientInference::confidence_intervals(
            beta,
            &std_errors,
            self.options.confidence_level,
        );

        let deviance = self.family.deviance(&y_vec, mu);
        let null_deviance = self.family.null_deviance(&y_vec, has_intercept);
        let log_likelihood = self.family.log_likelihood(&y_vec, mu);

        let n = n_samples as f64;
        let k = n_params as f64;
        let aic = -2.0 * log_likelihood + 2.0 * k;
        let bic = -2.0 * log_likelihood + k * n.ln();

        let result = RegressionResult {
            names,
            coefficients: beta.clone(),
            has_intercept,
            fitted_values: Col::from_fn(n_samples, |i| mu[i]),
            linear_predictor: Col::from_fn(n_samples, |i| eta[i]),
            weights: Col::from_fn(n_samples, |i| weights[i]),
            n_parameters: n_params,
            n_observations: n_samples,
            deviance,
            null_deviance,
            df_residual: n_samples - n_params,
            df_null: n_samples - usize::from(has_intercept),
            log_likelihood,
            aic,
            bic,
            std_errors,
            z_statistics,
            p_values,
            conf_interval_lower,
            conf_interval_upper,
            confidence_level: self.options.confidence_level,
            covariance,
            iterations,
        };

        Ok(FittedPoisson {
            result,
            with_intercept: self.options.with_intercept,
            family: self.family,
            y_values: y.clone(),
            x_design,
        })
    }
}

impl Regressor for PoissonRegressor {
    type Fitted = FittedPoisson;

    fn fit(&self, x: &Mat<f64>, y: &Col<f64>) -> Result<Self::Fitted, RegressionError> {
        self.validate(x, y)?;
        self.fit_irls(x, y)
    }
}

/// Fitted Poisson GLM model.
///
/// Produced only by a converged fit and read-only afterwards.
#[derive(Debug, Clone)]
pub struct FittedPoisson {
    result: RegressionResult,
    with_intercept: bool,
    family: PoissonFamily,
    y_values: Col<f64>,
    x_design: Mat<f64>,
}

impl FittedPoisson {
    /// Get the Poisson family used for this model.
    pub fn family(&self) -> &PoissonFamily {
        &self.family
    }

    /// Residual deviance.
    pub fn deviance(&self) -> f64 {
        self.result.deviance
    }

    /// Null deviance.
    pub fn null_deviance(&self) -> f64 {
        self.result.null_deviance
    }

    /// Akaike Information Criterion.
    pub fn aic(&self) -> f64 {
        self.result.aic
    }

    /// Number of IRLS iterations.
    pub fn iterations(&self) -> usize {
        self.result.iterations
    }

    /// The design matrix the model was fit on, intercept column included.
    pub fn design_matrix(&self) -> &Mat<f64> {
        &self.x_design
    }

    /// Response values the model was fit on.
    pub fn response(&self) -> &Col<f64> {
        &self.y_values
    }

    fn design_for(&self, x: &Mat<f64>) -> Mat<f64> {
        build_design_matrix(x, self.with_intercept)
    }

    /// Compute predicted counts (response scale).
    pub fn predict_count(&self, x: &Mat<f64>) -> Col<f64> {
        self.predict(x)
    }

    /// Compute predicted linear predictor (link scale).
    pub fn predict_linear(&self, x: &Mat<f64>) -> Col<f64> {
        mat_vec(&self.design_for(x), &self.result.coefficients)
    }

    /// Compute predictions with standard errors and confidence intervals.
    ///
    /// Intervals are built on the link scale and mapped through exp for
    /// [`PredictionType::Response`], so they stay positive.
    pub fn predict_with_se(
        &self,
        x: &Mat<f64>,
        pred_type: PredictionType,
        level: f64,
    ) -> PredictionResult {
        let x_design = self.design_for(x);
        let n_new = x_design.nrows();
        let eta = mat_vec(&x_design, &self.result.coefficients);
        let se_eta = Col::from_fn(n_new, |i| {
            row_quadratic_form(&x_design, i, &self.result.covariance)
                .max(0.0)
                .sqrt()
        });
        let z = CoefficientInference::critical_value(level);

        match pred_type {
            PredictionType::Link => PredictionResult::with_intervals(
                eta.clone(),
                Col::from_fn(n_new, |i| eta[i] - z * se_eta[i]),
                Col::from_fn(n_new, |i| eta[i] + z * se_eta[i]),
                se_eta,
            ),
            PredictionType::Response => {
                let mu = Col::from_fn(n_new, |i| self.family.link_inverse(eta[i]));
                let se_mu = Col::from_fn(n_new, |i| {
                    se_eta[i] * self.family.link_inverse_derivative(eta[i])
                });
                PredictionResult::with_intervals(
                    mu,
                    Col::from_fn(n_new, |i| self.family.link_inverse(eta[i] - z * se_eta[i])),
                    Col::from_fn(n_new, |i| self.family.link_inverse(eta[i] + z * se_eta[i])),
                    se_mu,
                )
            }
        }
    }

    /// Compute response residuals: y - μ.
    pub fn response_residuals(&self) -> Col<f64> {
        response_residuals(&self.y_values, &self.result.fitted_values)
    }

    /// Compute Pearson residuals: (y - μ) / sqrt(μ).
    pub fn pearson_residuals(&self) -> Col<f64> {
        pearson_residuals(&self.y_values, &self.result.fitted_values, &self.family)
    }

    /// Compute deviance residuals: sign(y - μ) * sqrt(d_i).
    pub fn deviance_residuals(&self) -> Col<f64> {
        deviance_residuals(&self.y_values, &self.result.fitted_values, &self.family)
    }

    /// Compute working residuals: (y - μ) / μ.
    pub fn working_residuals(&self) -> Col<f64> {
        working_residuals(&self.y_values, &self.result.fitted_values, &self.family)
    }

    /// Deviance residuals scaled by sqrt(1 - h_ii).
    pub fn standardized_deviance_residuals(&self) -> Col<f64> {
        standardized_deviance_residuals(
            &self.y_values,
            &self.result.fitted_values,
            &self.family,
            &self.hat_values(),
            1.0,
        )
    }

    /// Diagonal of the weighted hat matrix at convergence.
    pub fn hat_values(&self) -> Col<f64> {
        hat_values(&self.x_design, &self.result.weights, &self.result.covariance)
    }

    /// Cook's distance for each observation.
    pub fn cooks_distance(&self) -> Col<f64> {
        cooks_distance(
            &self.pearson_residuals(),
            &self.hat_values(),
            1.0,
            self.result.n_parameters,
        )
    }

    /// Pearson χ² / df; values well above 1 indicate overdispersion.
    pub fn dispersion(&self) -> f64 {
        let y: Vec<f64> = self.y_values.iter().copied().collect();
        let mu: Vec<f64> = self.result.fitted_values.iter().copied().collect();
        pearson_dispersion(&y, &mu, &self.family, self.result.df_residual)
    }

    /// Likelihood-ratio test of the fitted model against the null model.
    pub fn likelihood_ratio_test(&self) -> DevianceTest {
        DevianceTest::against_null(&self.result)
    }
}

impl FittedRegressor for FittedPoisson {
    fn predict(&self, x: &Mat<f64>) -> Col<f64> {
        let eta = self.predict_linear(x);
        Col::from_fn(eta.nrows(), |i| self.family.link_inverse(eta[i]))
    }

    fn result(&self) -> &RegressionResult {
        &self.result
    }

    fn predict_with_interval(
        &self,
        x: &Mat<f64>,
        pred_type: PredictionType,
        level: f64,
    ) -> PredictionResult {
        self.predict_with_se(x, pred_type, level)
    }
}

/// Builder for `PoissonRegressor`.
#[derive(Debug, Clone, Default)]
pub struct PoissonRegressorBuilder {
    options_builder: RegressionOptionsBuilder,
}

impl PoissonRegressorBuilder {
    /// Set whether to include an intercept term.
    pub fn with_intercept(mut self, include: bool) -> Self {
        self.options_builder = self.options_builder.with_intercept(include);
        self
    }

    /// Set the confidence level for confidence intervals.
    pub fn confidence_level(mut self, level: f64) -> Self {
        self.options_builder = self.options_builder.confidence_level(level);
        self
    }

    /// Set the maximum iterations for IRLS.
    pub fn max_iterations(mut self, max_iter: usize) -> Self {
        self.options_builder = self.options_builder.max_iterations(max_iter);
        self
    }

    /// Set the convergence tolerance.
    pub fn tolerance(mut self, tol: f64) -> Self {
        self.options_builder = self.options_builder.tolerance(tol);
        self
    }

    /// Set the rank tolerance.
    pub fn rank_tolerance(mut self, tol: f64) -> Self {
        self.options_builder = self.options_builder.rank_tolerance(tol);
        self
    }

    /// Accept nonnegative responses that are not whole numbers.
    pub fn allow_non_integer(mut self, allow: bool) -> Self {
        self.options_builder = self.options_builder.allow_non_integer(allow);
        self
    }

    /// Name the predictor columns.
    pub fn feature_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options_builder = self.options_builder.feature_names(names);
        self
    }

    /// Build the regressor. Options are validated when fitting.
    pub fn build(self) -> PoissonRegressor {
        PoissonRegressor::new(self.options_builder.build_unchecked())
    }
}
