//! Influence measures: Cook's distance.

use faer::Col;

/// Compute Cook's distance for each observation of a GLM fit.
///
/// D_i = (r_Pi² / (p * φ)) * (h_ii / (1 - h_ii)²)
///
/// where r_Pi is the Pearson residual and φ the dispersion (1 for Poisson).
/// Observations with D_i > 4/n or D_i > 1 are typically considered influential.
pub fn cooks_distance(
    pearson_residuals: &Col<f64>,
    leverage: &Col<f64>,
    dispersion: f64,
    n_params: usize,
) -> Col<f64> {
    let n = pearson_residuals.nrows();

    if dispersion <= 0.0 || !dispersion.is_finite() || n_params == 0 {
        return Col::from_fn(n, |_| f64::NAN);
    }

    Col::from_fn(n, |i| {
        let r_i = pearson_residuals[i];
        let h_ii = leverage[i];
        let one_minus_h = (1.0 - h_ii).max(1e-14);

        let d_i = (r_i * r_i / (n_params as f64 * dispersion)) * (h_ii / (one_minus_h * one_minus_h));

        if d_i.is_finite() {
            d_i.max(0.0)
        } else {
            f64::NAN
        }
    })
}

/// Identify influential observations based on Cook's distance.
///
/// Returns indices of observations with D_i > threshold.
/// Common thresholds: 4/n or 1.
pub fn influential_cooks(cooks_d: &Col<f64>, threshold: Option<f64>) -> Vec<usize> {
    let n = cooks_d.nrows();
    let cutoff = threshold.unwrap_or(4.0 / n as f64);

    cooks_d
        .iter()
        .enumerate()
        .filter(|(_, &d)| d.is_finite() && d > cutoff)
        .map(|(i, _)| i)
        .collect()
}
