//! Errors raised while loading or generating data.

use thiserror::Error;

/// Errors from the data preparation layer.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("malformed match data: {0}")]
    Csv(#[from] csv::Error),

    #[error("no home matches found for team {team:?}")]
    NoHomeMatches { team: String },

    #[error("no rows with both goals and shots recorded")]
    NoUsableRows,

    #[error("expected {expected} coefficients, got {got}")]
    CoefficientMismatch { expected: usize, got: usize },

    #[error("invalid Poisson mean {mu} at row {index}")]
    InvalidMean { index: usize, mu: f64 },

    #[error("invalid covariate range [{low}, {high})")]
    InvalidRange { low: f64, high: f64 },
}
