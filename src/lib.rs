//! Poisson regression for count data.
//!
//! Fits a Poisson generalized linear model with the canonical log link by
//! Iteratively Reweighted Least Squares and reports the usual inference:
//! coefficients with standard errors, z-values and p-values, null and
//! residual deviance with their degrees of freedom, log-likelihood and AIC.
//!
//! # Example
//!
//! ```rust,ignore
//! use goalglm::prelude::*;
//!
//! let table = MatchTable::from_path("E0.csv")?.home_matches("Arsenal")?;
//! let (shots, goals) = table.goals_vs_shots()?;
//!
//! let fitted = PoissonRegressor::builder()
//!     .feature_names(["shots"])
//!     .build()
//!     .fit(&shots, &goals)?;
//!
//! println!("{}", fitted.result());
//! let per_shot = fitted.result().coefficient("shots").map(|c| c.estimate.exp());
//! ```

pub mod core;
pub mod data;
pub mod diagnostics;
pub mod inference;
pub mod solvers;
pub mod utils;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::{
        CoefficientSummary, PoissonFamily, PredictionResult, PredictionType, RegressionOptions,
        RegressionOptionsBuilder, RegressionResult,
    };
    pub use crate::data::{DataError, MatchRecord, MatchTable};
    pub use crate::diagnostics::{
        cooks_distance, deviance_residuals, hat_values, influential_cooks, pearson_residuals,
        qq_points, working_residuals,
    };
    pub use crate::inference::DevianceTest;
    pub use crate::solvers::{
        FittedPoisson, FittedRegressor, InputError, PoissonRegressor, RegressionError, Regressor,
    };
}

pub use crate::core::{
    CoefficientSummary, PoissonFamily, PredictionResult, PredictionType, RegressionOptions,
    RegressionOptionsBuilder, RegressionResult,
};
pub use crate::solvers::{
    FittedPoisson, FittedRegressor, InputError, PoissonRegressor, RegressionError, Regressor,
};
