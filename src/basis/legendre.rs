//! Orthonormal Legendre basis at Legendre-Gauss-Lobatto nodes.

use super::Basis;
use crate::error::Result;
use crate::polynomial::{gauss_lobatto_nodes, jacobi_polynomial, jacobi_polynomial_gradient};

/// Orthonormal Legendre polynomials, the Jacobi family with α = β = 0.
///
/// Quadrature nodes are the Legendre-Gauss-Lobatto points, which include the
/// element endpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LegendreBasis;

impl LegendreBasis {
    const ALPHA: f64 = 0.0;
    const BETA: f64 = 0.0;

    /// Create the Legendre basis.
    pub fn new() -> Self {
        Self
    }
}

impl Basis for LegendreBasis {
    fn name(&self) -> &'static str {
        "legendre"
    }

    fn quad_nodes(&self, order: usize) -> Result<Vec<f64>> {
        gauss_lobatto_nodes(Self::ALPHA, Self::BETA, order)
    }

    fn polynomial(&self, order: usize, x: f64) -> Result<f64> {
        jacobi_polynomial(Self::ALPHA, Self::BETA, order, x)
    }

    fn polynomial_gradient(&self, order: usize, x: f64) -> Result<f64> {
        jacobi_polynomial_gradient(Self::ALPHA, Self::BETA, order, x)
    }
}
