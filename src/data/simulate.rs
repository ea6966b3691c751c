//! Synthetic Poisson count data.

use faer::{Col, Mat};
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::Poisson;

use super::DataError;
use crate::core::PoissonFamily;

/// Draw `n` rows of a single covariate uniformly from `[low, high)`.
pub fn uniform_design<R: Rng + ?Sized>(
    n: usize,
    low: f64,
    high: f64,
    rng: &mut R,
) -> Result<Mat<f64>, DataError> {
    if !(low < high) || !low.is_finite() || !high.is_finite() {
        return Err(DataError::InvalidRange { low, high });
    }
    let dist = Uniform::new(low, high);
    let draws: Vec<f64> = (0..n).map(|_| dist.sample(&mut *rng)).collect();
    Ok(Mat::from_fn(n, 1, |i, _| draws[i]))
}

/// Draw counts yᵢ ~ Poisson(exp(xᵢᵀβ)).
///
/// With `with_intercept` the first element of `beta` is the intercept and the
/// remaining ones match the columns of `x`.
pub fn simulate_poisson_response<R: Rng + ?Sized>(
    x: &Mat<f64>,
    beta: &[f64],
    with_intercept: bool,
    rng: &mut R,
) -> Result<Col<f64>, DataError> {
    let offset = usize::from(with_intercept);
    let expected = x.ncols() + offset;
    if beta.len() != expected {
        return Err(DataError::CoefficientMismatch {
            expected,
            got: beta.len(),
        });
    }

    let family = PoissonFamily::new();
    let mut y = Col::zeros(x.nrows());
    for i in 0..x.nrows() {
        let intercept = if with_intercept { beta[0] } else { 0.0 };
        let eta = intercept
            + (0..x.ncols())
                .map(|j| x[(i, j)] * beta[j + offset])
                .sum::<f64>();
        let mu = family.link_inverse(eta);

        let dist = Poisson::new(mu).map_err(|_| DataError::InvalidMean { index: i, mu })?;
        y[i] = dist.sample(&mut *rng);
    }
    Ok(y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_uniform_design_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let x = uniform_design(200, -2.0, 2.0, &mut rng).unwrap();
        assert_eq!(x.nrows(), 200);
        assert_eq!(x.ncols(), 1);
        assert!((0..200).all(|i| (-2.0..2.0).contains(&x[(i, 0)])));
    }

    #[test]
    fn test_uniform_design_rejects_empty_range() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(matches!(
            uniform_design(10, 1.0, 1.0, &mut rng),
            Err(DataError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_simulated_counts_are_non_negative_integers() {
        let mut rng = StdRng::seed_from_u64(42);
        let x = uniform_design(500, -1.0, 1.0, &mut rng).unwrap();
        let y = simulate_poisson_response(&x, &[0.5, 0.3], true, &mut rng).unwrap();

        assert_eq!(y.nrows(), 500);
        assert!(y.iter().all(|&v| v >= 0.0 && v.fract() == 0.0));
    }

    #[test]
    fn test_simulated_mean_tracks_intercept() {
        // E[y] = exp(1) with no covariate effect
        let mut rng = StdRng::seed_from_u64(3);
        let x = Mat::<f64>::zeros(4000, 1);
        let y = simulate_poisson_response(&x, &[1.0, 0.0], true, &mut rng).unwrap();
        let mean = y.iter().sum::<f64>() / 4000.0;
        assert!((mean - 1.0f64.exp()).abs() < 0.15);
    }

    #[test]
    fn test_coefficient_count_checked() {
        let mut rng = StdRng::seed_from_u64(1);
        let x = Mat::<f64>::zeros(5, 2);
        let err = simulate_poisson_response(&x, &[0.1, 0.2], true, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            DataError::CoefficientMismatch {
                expected: 3,
                got: 2
            }
        ));
    }
}
