//! DG operators: differentiation, mass, LIFT matrices and element geometry.
//!
//! This module provides:
//! - Reference-element operators for a polynomial order (`ElementOperators`)
//! - Geometric factors and coordinate maps for mesh elements (`GeometricOperations`)
//!
//! The reference operators do not depend on element size: they are built once per
//! polynomial order and shared by every element.

mod differentiation;
mod geometric;
mod lift;
mod mass;

pub use differentiation::differentiation_matrix;
pub use geometric::GeometricOperations;
pub use lift::lift_matrix;
pub use mass::{inverse_mass_matrix, mass_matrix};

use crate::basis::{Basis, Vandermonde};
use crate::error::Result;
use faer::Mat;
use log::debug;

/// All DG operators for 1D elements bundled together.
#[derive(Clone)]
pub struct ElementOperators {
    /// Polynomial order
    pub order: usize,
    /// Number of nodes per element (order + 1)
    pub n_nodes: usize,
    /// Reference nodes in [-1, 1]
    pub nodes: Vec<f64>,
    /// Vandermonde matrix and its inverse
    pub vandermonde: Vandermonde,
    /// Differentiation matrix: Dr[i,j] = dφ_j/dr at node i
    pub dr: Mat<f64>,
    /// Inverse mass matrix V V^T
    pub mass_inv: Mat<f64>,
    /// LIFT matrix: maps face values to volume
    pub lift: Mat<f64>,
}

impl ElementOperators {
    /// Create DG operators of `basis` for a given polynomial order.
    ///
    /// # Errors
    /// `InvalidArgument` if the basis has no nodes for this order and
    /// `NumericalFailure` if the Vandermonde matrix is singular.
    pub fn new<B: Basis + ?Sized>(basis: &B, order: usize) -> Result<Self> {
        let nodes = basis.quad_nodes(order)?;
        let vandermonde = Vandermonde::new(basis, order, &nodes)?;

        let dr = differentiation_matrix(&vandermonde);
        let mass_inv = inverse_mass_matrix(&vandermonde);
        let lift = lift_matrix(&mass_inv);

        debug!(
            "Built {} element operators of order {} ({} nodes)",
            basis.name(),
            order,
            nodes.len()
        );

        Ok(Self {
            order,
            n_nodes: order + 1,
            nodes,
            vandermonde,
            dr,
            mass_inv,
            lift,
        })
    }

    /// Vandermonde matrix V[i,j] = φ_j(r_i).
    pub fn vandermonde_matrix(&self) -> &Mat<f64> {
        &self.vandermonde.v
    }

    /// Derivative Vandermonde matrix Vr[i,j] = φ'_j(r_i).
    pub fn grad_vandermonde_matrix(&self) -> &Mat<f64> {
        &self.vandermonde.vr
    }

    /// Differentiation matrix Dr = Vr V^{-1}.
    pub fn differentiation_matrix(&self) -> &Mat<f64> {
        &self.dr
    }

    /// LIFT matrix, columns for the left and right face.
    pub fn lift_matrix(&self) -> &Mat<f64> {
        &self.lift
    }

    /// Reference mass matrix (V V^T)^{-1}.
    pub fn mass_matrix(&self) -> Result<Mat<f64>> {
        mass_matrix(&self.vandermonde)
    }

    /// Reference inverse mass matrix V V^T.
    pub fn inverse_mass_matrix(&self) -> &Mat<f64> {
        &self.mass_inv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basis::LegendreBasis;
    use crate::error::DgError;

    #[test]
    fn test_operator_dimensions() {
        let basis = LegendreBasis::new();
        for order in 1..=6 {
            let ops = ElementOperators::new(&basis, order).unwrap();
            let n = order + 1;
            assert_eq!(ops.n_nodes, n);
            assert_eq!(ops.nodes.len(), n);
            assert_eq!(
                (ops.vandermonde_matrix().nrows(), ops.vandermonde_matrix().ncols()),
                (n, n)
            );
            assert_eq!(
                (ops.grad_vandermonde_matrix().nrows(), ops.grad_vandermonde_matrix().ncols()),
                (n, n)
            );
            assert_eq!((ops.dr.nrows(), ops.dr.ncols()), (n, n));
            assert_eq!((ops.lift.nrows(), ops.lift.ncols()), (n, 2));
            assert_eq!(ops.mass_matrix().unwrap().nrows(), n);
        }
    }

    #[test]
    fn test_order_zero_has_no_lobatto_nodes() {
        let basis = LegendreBasis::new();
        assert!(matches!(
            ElementOperators::new(&basis, 0),
            Err(DgError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_mass_times_inverse_is_identity() {
        let basis = LegendreBasis::new();
        let ops = ElementOperators::new(&basis, 4).unwrap();
        let m = ops.mass_matrix().unwrap();
        let product = crate::linalg::matmul(&m, ops.inverse_mass_matrix());
        assert!(crate::linalg::max_abs_diff(&product, &Mat::identity(5, 5)) < 1e-12);
    }
}
