//! Statistical inference for fitted Poisson models.

mod coefficient;
mod deviance;

pub use coefficient::CoefficientInference;
pub use deviance::{pearson_chi_squared, pearson_dispersion, DevianceTest};
