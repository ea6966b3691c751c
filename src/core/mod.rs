//! Core types for Poisson regression.

mod options;
mod poisson;
mod prediction;
mod result;

pub use options::{OptionsError, RegressionOptions, RegressionOptionsBuilder};
pub use poisson::{PoissonFamily, ETA_BOUND, MU_MIN, MU_START_SHIFT};
pub use prediction::{PredictionResult, PredictionType};
pub use result::{significance_stars, CoefficientSummary, RegressionResult, INTERCEPT_NAME};
