//! Regression result structures.

use faer::{Col, Mat};
use std::fmt;

/// Name given to the intercept column.
pub const INTERCEPT_NAME: &str = "(Intercept)";

/// One row of the coefficient table.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientSummary {
    /// Column name (`(Intercept)` for the intercept).
    pub name: String,
    /// Maximum likelihood estimate.
    pub estimate: f64,
    /// Standard error from the inverse Fisher information.
    pub std_error: f64,
    /// Wald z-statistic, estimate / std_error.
    pub z_value: f64,
    /// Two-sided p-value from the standard normal distribution.
    pub p_value: f64,
}

/// Complete result from a Poisson regression fit.
///
/// All vectors indexed by coefficient follow the column order of the design
/// matrix, with the intercept first when the model has one.
#[derive(Debug, Clone)]
pub struct RegressionResult {
    // ========== Core Results ==========
    /// Coefficient names in design-column order.
    pub names: Vec<String>,

    /// Estimated coefficients, intercept included.
    pub coefficients: Col<f64>,

    /// Whether the first coefficient is an intercept.
    pub has_intercept: bool,

    /// Fitted means μ̂.
    pub fitted_values: Col<f64>,

    /// Linear predictor η̂ = Xβ̂.
    pub linear_predictor: Col<f64>,

    /// IRLS weights at convergence.
    pub weights: Col<f64>,

    /// Number of parameters (including intercept if present).
    pub n_parameters: usize,

    /// Number of observations.
    pub n_observations: usize,

    // ========== Goodness of Fit ==========
    /// Residual deviance.
    pub deviance: f64,

    /// Deviance of the null model.
    pub null_deviance: f64,

    /// Residual degrees of freedom (n - p).
    pub df_residual: usize,

    /// Null degrees of freedom (n - 1 with an intercept, n without).
    pub df_null: usize,

    // ========== Information Criteria ==========
    /// Log-likelihood.
    pub log_likelihood: f64,

    /// Akaike Information Criterion.
    pub aic: f64,

    /// Bayesian Information Criterion.
    pub bic: f64,

    // ========== Inference Statistics ==========
    /// Standard errors of coefficients.
    pub std_errors: Col<f64>,

    /// Wald z-statistics.
    pub z_statistics: Col<f64>,

    /// Two-sided p-values.
    pub p_values: Col<f64>,

    /// Lower bounds of Wald confidence intervals.
    pub conf_interval_lower: Col<f64>,

    /// Upper bounds of Wald confidence intervals.
    pub conf_interval_upper: Col<f64>,

    /// Confidence level used for intervals.
    pub confidence_level: f64,

    /// (X'WX)⁻¹ at convergence.
    pub covariance: Mat<f64>,

    /// Number of IRLS iterations performed.
    pub iterations: usize,
}

impl RegressionResult {
    /// Coefficient table in design-column order.
    pub fn coefficient_table(&self) -> Vec<CoefficientSummary> {
        (0..self.n_parameters).map(|j| self.summary_at(j)).collect()
    }

    /// Find a coefficient row by name.
    pub fn coefficient(&self, name: &str) -> Option<CoefficientSummary> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|j| self.summary_at(j))
    }

    fn summary_at(&self, j: usize) -> CoefficientSummary {
        CoefficientSummary {
            name: self.names[j].clone(),
            estimate: self.coefficients[j],
            std_error: self.std_errors[j],
            z_value: self.z_statistics[j],
            p_value: self.p_values[j],
        }
    }

    /// Intercept estimate, if the model has one.
    pub fn intercept(&self) -> Option<f64> {
        self.has_intercept.then(|| self.coefficients[0])
    }

    /// Estimates of the non-intercept coefficients.
    pub fn slopes(&self) -> Col<f64> {
        let start = usize::from(self.has_intercept);
        Col::from_fn(self.n_parameters - start, |j| self.coefficients[j + start])
    }
}

/// Significance code for a p-value, in the usual `*** ** * .` scheme.
pub fn significance_stars(p_value: f64) -> &'static str {
    if p_value.is_nan() {
        ""
    } else if p_value < 0.001 {
        "***"
    } else if p_value < 0.01 {
        "**"
    } else if p_value < 0.05 {
        "*"
    } else if p_value < 0.1 {
        "."
    } else {
        ""
    }
}

fn format_p_value(p: f64) -> String {
    if p < 2e-16 {
        "<2e-16".to_string()
    } else if p < 1e-4 {
        format!("{p:.2e}")
    } else {
        format!("{p:.4}")
    }
}

impl fmt::Display for RegressionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name_width = self.names.iter().map(|n| n.len()).max().unwrap_or(0).max(11);

        writeln!(f, "Coefficients:")?;
        writeln!(
            f,
            "{:<name_width$} {:>10} {:>10} {:>8} {:>9}",
            "", "Estimate", "Std. Error", "z value", "Pr(>|z|)"
        )?;
        for row in self.coefficient_table() {
            writeln!(
                f,
                "{:<name_width$} {:>10.5} {:>10.5} {:>8.3} {:>9} {}",
                row.name,
                row.estimate,
                row.std_error,
                row.z_value,
                format_p_value(row.p_value),
                significance_stars(row.p_value)
            )?;
        }
        writeln!(f, "---")?;
        writeln!(
            f,
            "Signif. codes:  0 '***' 0.001 '**' 0.01 '*' 0.05 '.' 0.1 ' ' 1"
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "(Dispersion parameter for poisson family taken to be 1)"
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "    Null deviance: {:.4}  on {} degrees of freedom",
            self.null_deviance, self.df_null
        )?;
        writeln!(
            f,
            "Residual deviance: {:.4}  on {} degrees of freedom",
            self.deviance, self.df_residual
        )?;
        writeln!(f, "AIC: {:.4}", self.aic)?;
        writeln!(f)?;
        write!(
            f,
            "Number of Fisher Scoring iterations: {}",
            self.iterations
        )
    }
}
