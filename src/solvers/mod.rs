//! Regression solvers.

mod poisson;
mod traits;

pub use poisson::{FittedPoisson, PoissonRegressor, PoissonRegressorBuilder};
pub use traits::{FittedRegressor, InputError, RegressionError, Regressor};
