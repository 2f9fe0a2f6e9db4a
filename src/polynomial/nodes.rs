//! Gauss-Jacobi and Gauss-Lobatto quadrature nodes.
//!
//! Gauss-Jacobi nodes are computed with the Golub-Welsch algorithm: they are the
//! eigenvalues of the symmetric tridiagonal Jacobi matrix built from the
//! recurrence coefficients of the orthonormal polynomials. The Gauss-Lobatto
//! nodes add the endpoints ±1 to the Gauss-Jacobi nodes of parameters (α+1, β+1).
//!
//! For α = β = 0 these are the Legendre-Gauss-Lobatto nodes used by the nodal
//! DG operators: surface nodes coincide with volume nodes, so face values are
//! simply the first and last nodal values.

use crate::error::{DgError, Result};
use crate::linalg::symmetric_tridiagonal_eigenvalues;

/// Gauss-Jacobi quadrature nodes of order n (n + 1 nodes, increasing).
///
/// # Errors
/// `InvalidArgument` for α ≤ -1, β ≤ -1, or when the eigenvalue solver does not
/// return n + 1 values.
pub fn gauss_jacobi_nodes(alpha: f64, beta: f64, n: usize) -> Result<Vec<f64>> {
    if alpha <= -1.0 || beta <= -1.0 {
        return Err(DgError::invalid_argument(format!(
            "Gauss-Jacobi nodes need alpha > -1 and beta > -1, got alpha = {}, beta = {}",
            alpha, beta
        )));
    }

    let ab = alpha + beta;
    if n == 0 {
        return Ok(vec![(beta - alpha) / (ab + 2.0)]);
    }

    let mut diag = Vec::with_capacity(n + 1);
    diag.push((beta - alpha) / (ab + 2.0));
    for j in 1..=n {
        let h = 2.0 * j as f64 + ab;
        diag.push((beta * beta - alpha * alpha) / h / (h + 2.0));
    }

    let off_diag: Vec<f64> = (1..=n)
        .map(|j| {
            let jf = j as f64;
            let h = 2.0 * jf + ab;
            2.0 / h
                * (jf * (jf + ab) * (jf + alpha) * (jf + beta) / (h + 1.0) / (h - 1.0)).sqrt()
        })
        .collect();

    let nodes = symmetric_tridiagonal_eigenvalues(&diag, &off_diag)?;
    if nodes.len() != n + 1 {
        return Err(DgError::invalid_argument(format!(
            "expected {} Gauss-Jacobi nodes of order {}, eigenvalue solver returned {}",
            n + 1,
            n,
            nodes.len()
        )));
    }
    Ok(nodes)
}

/// Gauss-Lobatto quadrature nodes of order n (n + 1 nodes including ±1).
///
/// # Errors
/// `InvalidArgument` for n < 1 or invalid Jacobi parameters.
pub fn gauss_lobatto_nodes(alpha: f64, beta: f64, n: usize) -> Result<Vec<f64>> {
    if n < 1 {
        return Err(DgError::invalid_argument(format!(
            "Gauss-Lobatto nodes need polynomial order n >= 1, got n = {}",
            n
        )));
    }
    if alpha <= -1.0 || beta <= -1.0 {
        return Err(DgError::invalid_argument(format!(
            "Gauss-Lobatto nodes need alpha > -1 and beta > -1, got alpha = {}, beta = {}",
            alpha, beta
        )));
    }
    if n == 1 {
        return Ok(vec![-1.0, 1.0]);
    }

    let interior = gauss_jacobi_nodes(alpha + 1.0, beta + 1.0, n - 2)?;

    let mut nodes = Vec::with_capacity(n + 1);
    nodes.push(-1.0);
    nodes.extend(interior);
    nodes.push(1.0);
    Ok(nodes)
}

/// Smallest absolute gap between consecutive nodes.
///
/// The nodes are taken in the given order. Fewer than two nodes have no gap and
/// yield `f64::INFINITY`.
pub fn min_node_distance(nodes: &[f64]) -> f64 {
    nodes
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(f64::INFINITY, f64::min)
}
