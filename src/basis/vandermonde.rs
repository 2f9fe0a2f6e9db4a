//! Vandermonde matrix for nodal-modal transformations.
//!
//! The Vandermonde matrix V connects nodal and modal representations:
//! - V[i,j] = φ_j(r_i) where φ_j is the j-th basis polynomial and r_i is the i-th node
//! - nodal_values = V * modal_coeffs
//! - modal_coeffs = V^{-1} * nodal_values
//!
//! With an orthonormal basis the modal mass matrix is the identity, so the nodal
//! inverse mass matrix is simply V V^T.

use super::Basis;
use crate::error::{DgError, Result};
use crate::linalg::invert;
use faer::Mat;

/// Vandermonde matrix, its inverse and the derivative Vandermonde matrix.
#[derive(Clone)]
pub struct Vandermonde {
    /// Vandermonde matrix: V[i,j] = φ_j(r_i)
    pub v: Mat<f64>,
    /// Inverse Vandermonde matrix
    pub v_inv: Mat<f64>,
    /// Derivative Vandermonde: Vr[i,j] = φ'_j(r_i)
    pub vr: Mat<f64>,
    /// Polynomial order
    pub order: usize,
}

impl Vandermonde {
    /// Build the Vandermonde matrices of `basis` for the given order and nodes.
    ///
    /// # Errors
    /// `InvalidArgument` if `nodes` does not hold order + 1 values, any basis
    /// evaluation error, and `NumericalFailure` if V is singular (repeated nodes).
    pub fn new<B: Basis + ?Sized>(basis: &B, order: usize, nodes: &[f64]) -> Result<Self> {
        let n = order + 1;
        if nodes.len() != n {
            return Err(DgError::invalid_argument(format!(
                "Vandermonde matrix of order {} needs {} nodes, got {}",
                order,
                n,
                nodes.len()
            )));
        }

        let v = vandermonde_matrix(basis, order, nodes)?;
        let vr = grad_vandermonde_matrix(basis, order, nodes)?;
        let v_inv = invert(&v, "Vandermonde matrix")?;

        Ok(Self {
            v,
            v_inv,
            vr,
            order,
        })
    }

    /// Number of nodes (order + 1).
    pub fn n_nodes(&self) -> usize {
        self.order + 1
    }
}

/// V[i,j] = φ_j(r_i) for j = 0..=order.
pub fn vandermonde_matrix<B: Basis + ?Sized>(
    basis: &B,
    order: usize,
    nodes: &[f64],
) -> Result<Mat<f64>> {
    let mut v = Mat::zeros(nodes.len(), order + 1);
    for (i, &r) in nodes.iter().enumerate() {
        for j in 0..=order {
            v[(i, j)] = basis.polynomial(j, r)?;
        }
    }
    Ok(v)
}

/// Vr[i,j] = φ'_j(r_i) for j = 0..=order.
pub fn grad_vandermonde_matrix<B: Basis + ?Sized>(
    basis: &B,
    order: usize,
    nodes: &[f64],
) -> Result<Mat<f64>> {
    let mut vr = Mat::zeros(nodes.len(), order + 1);
    for (i, &r) in nodes.iter().enumerate() {
        for j in 0..=order {
            vr[(i, j)] = basis.polynomial_gradient(j, r)?;
        }
    }
    Ok(vr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basis::LegendreBasis;
    use crate::linalg::{matmul, max_abs_diff};
    use approx::assert_relative_eq;

    #[test]
    fn test_vandermonde_reference_values() {
        let basis = LegendreBasis::new();
        let nodes = basis.quad_nodes(2).unwrap();
        let vander = Vandermonde::new(&basis, 2, &nodes).unwrap();

        let expected = [
            [0.707106781186547, -1.224744871391589, 1.58113883008419],
            [0.707106781186547, 0.0, -0.790569415042095],
            [0.707106781186547, 1.224744871391589, 1.58113883008419],
        ];
        for i in 0..3 {
            for j in 0..3 {
                assert!(
                    (vander.v[(i, j)] - expected[i][j]).abs() < 1e-14,
                    "V[{},{}] = {}",
                    i,
                    j,
                    vander.v[(i, j)]
                );
            }
        }
    }

    #[test]
    fn test_grad_vandermonde_reference_values() {
        let basis = LegendreBasis::new();

        let nodes = basis.quad_nodes(1).unwrap();
        let vr = grad_vandermonde_matrix(&basis, 1, &nodes).unwrap();
        assert_eq!(vr[(0, 0)], 0.0);
        assert_relative_eq!(vr[(0, 1)], 1.224744871391589, max_relative = 1e-14);
        assert_relative_eq!(vr[(1, 1)], 1.224744871391589, max_relative = 1e-14);

        let nodes = basis.quad_nodes(3).unwrap();
        let vr = grad_vandermonde_matrix(&basis, 3, &nodes).unwrap();
        let col2 = [
            -4.743416490252569,
            -2.121320343559642,
            2.121320343559642,
            4.743416490252569,
        ];
        let col3 = [11.224972160321824, 0.0, 0.0, 11.224972160321824];
        for i in 0..4 {
            assert!((vr[(i, 2)] - col2[i]).abs() < 1e-13, "Vr[{},2]", i);
            assert!((vr[(i, 3)] - col3[i]).abs() < 1e-13, "Vr[{},3]", i);
        }
    }

    #[test]
    fn test_vandermonde_invertibility() {
        let basis = LegendreBasis::new();
        for order in 1..=6 {
            let nodes = basis.quad_nodes(order).unwrap();
            let vander = Vandermonde::new(&basis, order, &nodes).unwrap();
            let product = matmul(&vander.v, &vander.v_inv);
            let n = vander.n_nodes();
            assert!(
                max_abs_diff(&product, &Mat::identity(n, n)) < 1e-12,
                "V * V^{{-1}} should be identity for order {}",
                order
            );
        }
    }

    #[test]
    fn test_repeated_nodes_are_singular() {
        let basis = LegendreBasis::new();
        let err = Vandermonde::new(&basis, 2, &[-1.0, 0.5, 0.5]).err().unwrap();
        assert!(matches!(err, DgError::NumericalFailure(_)), "{}", err);
    }

    #[test]
    fn test_wrong_node_count() {
        let basis = LegendreBasis::new();
        assert!(matches!(
            Vandermonde::new(&basis, 3, &[-1.0, 1.0]),
            Err(DgError::InvalidArgument(_))
        ));
    }
}
