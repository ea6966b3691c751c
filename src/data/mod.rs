//! Data preparation: football match tables and synthetic count data.

mod error;
mod matches;
mod simulate;

pub use error::DataError;
pub use matches::{MatchRecord, MatchTable};
pub use simulate::{simulate_poisson_response, uniform_design};
