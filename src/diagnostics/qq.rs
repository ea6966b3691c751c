//! Normal Q-Q plot coordinates.

use faer::Col;
use statrs::distribution::{ContinuousCDF, Normal};

/// Points of a normal Q-Q plot.
#[derive(Debug, Clone)]
pub struct QqPoints {
    /// Standard normal quantiles at the plotting positions.
    pub theoretical: Vec<f64>,
    /// Sorted sample values.
    pub sample: Vec<f64>,
    /// Original index of each sorted sample value.
    pub index: Vec<usize>,
}

/// Plotting position (i - a) / (n + 1 - 2a) for the i-th order statistic
/// (1-based), with a = 3/8 for n ≤ 10 and a = 1/2 otherwise.
pub fn plotting_positions(n: usize) -> Vec<f64> {
    let a = if n <= 10 { 0.375 } else { 0.5 };
    (1..=n)
        .map(|i| (i as f64 - a) / (n as f64 + 1.0 - 2.0 * a))
        .collect()
}

/// Pair sorted residuals with standard normal quantiles.
///
/// Non-finite residuals are dropped.
pub fn qq_points(residuals: &Col<f64>) -> QqPoints {
    let mut indexed: Vec<(usize, f64)> = residuals
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, r)| r.is_finite())
        .collect();
    indexed.sort_by(|a, b| a.1.total_cmp(&b.1));

    let positions = plotting_positions(indexed.len());
    let theoretical = match Normal::new(0.0, 1.0) {
        Ok(normal) => positions.iter().map(|&p| normal.inverse_cdf(p)).collect(),
        Err(_) => vec![f64::NAN; positions.len()],
    };

    QqPoints {
        theoretical,
        sample: indexed.iter().map(|&(_, r)| r).collect(),
        index: indexed.iter().map(|&(i, _)| i).collect(),
    }
}
