//! Small dense linear algebra helpers on top of `faer`.
//!
//! Element matrices are at most a few dozen rows, so products are written as plain
//! loops over `faer::Mat` entries. Inversion goes through a fully pivoted LU and is
//! checked afterwards: `faer` does not report singular factorizations, so a result
//! with non-finite entries or a large residual `A * A^{-1} - I` is rejected.

use faer::{Mat, Side, linalg::solvers::Solve};

use crate::error::{DgError, Result};

/// Residual tolerance for accepting a computed inverse.
const INVERSE_RESIDUAL_TOL: f64 = 1e-8;

/// Dense product `a * b`.
pub fn matmul(a: &Mat<f64>, b: &Mat<f64>) -> Mat<f64> {
    debug_assert_eq!(a.ncols(), b.nrows());
    let mut c = Mat::zeros(a.nrows(), b.ncols());
    for i in 0..a.nrows() {
        for j in 0..b.ncols() {
            let mut sum = 0.0;
            for k in 0..a.ncols() {
                sum += a[(i, k)] * b[(k, j)];
            }
            c[(i, j)] = sum;
        }
    }
    c
}

/// Dense product `a * a^T`.
pub fn gram(a: &Mat<f64>) -> Mat<f64> {
    let n = a.nrows();
    Mat::from_fn(n, n, |i, j| {
        let mut sum = 0.0;
        for k in 0..a.ncols() {
            sum += a[(i, k)] * a[(j, k)];
        }
        sum
    })
}

/// Inverse of a square matrix.
///
/// `what` names the matrix in the error message.
pub fn invert(a: &Mat<f64>, what: &str) -> Result<Mat<f64>> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(DgError::invalid_argument(format!(
            "cannot invert {} of shape {}x{}",
            what,
            n,
            a.ncols()
        )));
    }

    let lu = a.as_ref().full_piv_lu();
    let inverse = lu.solve(&Mat::<f64>::identity(n, n));

    for j in 0..n {
        for i in 0..n {
            if !inverse[(i, j)].is_finite() {
                return Err(DgError::numerical_failure(format!(
                    "{} ({}x{}) is singular",
                    what, n, n
                )));
            }
        }
    }

    let product = matmul(a, &inverse);
    let residual = max_abs_diff(&product, &Mat::identity(n, n));
    if residual > INVERSE_RESIDUAL_TOL {
        return Err(DgError::numerical_failure(format!(
            "{} ({}x{}) is numerically singular: |A A^-1 - I| = {:e}",
            what, n, n, residual
        )));
    }

    Ok(inverse)
}

/// Largest entrywise difference between two matrices of equal shape.
pub fn max_abs_diff(a: &Mat<f64>, b: &Mat<f64>) -> f64 {
    debug_assert_eq!((a.nrows(), a.ncols()), (b.nrows(), b.ncols()));
    let mut max: f64 = 0.0;
    for j in 0..a.ncols() {
        for i in 0..a.nrows() {
            max = max.max((a[(i, j)] - b[(i, j)]).abs());
        }
    }
    max
}

/// Eigenvalues of the symmetric tridiagonal matrix with the given diagonal and
/// off-diagonal, in increasing order.
pub fn symmetric_tridiagonal_eigenvalues(diag: &[f64], off_diag: &[f64]) -> Result<Vec<f64>> {
    let n = diag.len();
    if n == 0 {
        return Ok(Vec::new());
    }
    if off_diag.len() + 1 != n {
        return Err(DgError::invalid_argument(format!(
            "tridiagonal matrix of size {} needs {} off-diagonal entries, got {}",
            n,
            n - 1,
            off_diag.len()
        )));
    }

    let t = Mat::from_fn(n, n, |i, j| {
        if i == j {
            diag[i]
        } else if i == j + 1 {
            off_diag[j]
        } else if j == i + 1 {
            off_diag[i]
        } else {
            0.0
        }
    });

    let mut eigenvalues = t
        .as_ref()
        .self_adjoint_eigenvalues(Side::Lower)
        .map_err(|e| {
            DgError::numerical_failure(format!(
                "eigenvalue iteration failed for tridiagonal matrix of size {}: {:?}",
                n, e
            ))
        })?;
    eigenvalues.sort_by(f64::total_cmp);
    Ok(eigenvalues)
}
