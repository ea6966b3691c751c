//! Matrix utility functions.

use faer::{Col, Mat};

/// Build the design matrix, optionally prepending an intercept column.
pub fn build_design_matrix(x: &Mat<f64>, with_intercept: bool) -> Mat<f64> {
    let n = x.nrows();
    let p = x.ncols();

    if with_intercept {
        Mat::from_fn(n, p + 1, |i, j| if j == 0 { 1.0 } else { x[(i, j - 1)] })
    } else {
        x.to_owned()
    }
}

/// Scale each row of `x` by `sqrt(w_i)`.
pub fn sqrt_weighted_rows(x: &Mat<f64>, weights: &[f64]) -> Mat<f64> {
    Mat::from_fn(x.nrows(), x.ncols(), |i, j| weights[i].sqrt() * x[(i, j)])
}

/// Compute X'WX.
#[cfg(test)]
pub fn weighted_cross_product(x: &Mat<f64>, weights: &[f64]) -> Mat<f64> {
    let n = x.nrows();
    let p = x.ncols();
    let mut xtwx = Mat::zeros(p, p);

    for i in 0..n {
        let w = weights[i];
        for j in 0..p {
            let wx = w * x[(i, j)];
            for k in 0..p {
                xtwx[(j, k)] += wx * x[(i, k)];
            }
        }
    }
    xtwx
}

/// Euclidean norm of each column.
pub fn column_norms(x: &Mat<f64>) -> Vec<f64> {
    (0..x.ncols())
        .map(|j| (0..x.nrows()).map(|i| x[(i, j)].powi(2)).sum::<f64>().sqrt())
        .collect()
}

/// Solve R·b = rhs for upper triangular R (leading p×p block of `r`).
pub fn back_substitute(r: &Mat<f64>, rhs: &[f64]) -> Col<f64> {
    let p = rhs.len();
    let mut sol = Col::zeros(p);

    for i in (0..p).rev() {
        let mut sum = rhs[i];
        for j in (i + 1)..p {
            sum -= r[(i, j)] * sol[j];
        }
        sol[i] = sum / r[(i, i)];
    }
    sol
}

/// Compute (RᵀR)⁻¹ = R⁻¹R⁻ᵀ from an upper triangular factor R.
///
/// When R comes from the QR decomposition of √W·X this is (X'WX)⁻¹.
pub fn gram_inverse_from_r(r: &Mat<f64>, p: usize) -> Mat<f64> {
    let mut r_inv: Mat<f64> = Mat::zeros(p, p);
    for col in 0..p {
        let mut e = vec![0.0; p];
        e[col] = 1.0;
        let sol = back_substitute(r, &e);
        for row in 0..p {
            r_inv[(row, col)] = sol[row];
        }
    }

    Mat::from_fn(p, p, |i, j| {
        let start = i.max(j);
        (start..p).map(|k| r_inv[(i, k)] * r_inv[(j, k)]).sum()
    })
}

/// Compute xᵢᵀ·A·xᵢ for row `i` of `x`.
pub fn row_quadratic_form(x: &Mat<f64>, i: usize, a: &Mat<f64>) -> f64 {
    let p = x.ncols();
    let mut q = 0.0;
    for j in 0..p {
        for k in 0..p {
            q += x[(i, j)] * a[(j, k)] * x[(i, k)];
        }
    }
    q
}

/// Compute X·β.
pub fn mat_vec(x: &Mat<f64>, beta: &Col<f64>) -> Col<f64> {
    Col::from_fn(x.nrows(), |i| {
        (0..x.ncols()).map(|j| x[(i, j)] * beta[j]).sum()
    })
}
