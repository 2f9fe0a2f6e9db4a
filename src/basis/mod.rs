//! Polynomial basis representations.
//!
//! A [`Basis`] provides everything the element operators need from a family of
//! polynomials: quadrature nodes on the reference interval, point evaluation and
//! derivatives. [`LegendreBasis`] (orthonormal Legendre polynomials at
//! Gauss-Lobatto nodes) is the basis used by the solver.
//!
//! The [`Vandermonde`] matrices connect nodal and modal representations.

mod legendre;
mod vandermonde;

pub use legendre::LegendreBasis;
pub use vandermonde::Vandermonde;

use crate::error::Result;
use crate::polynomial::min_node_distance;

/// A polynomial basis on the reference interval [-1, 1].
pub trait Basis {
    /// Human-readable name for logging.
    fn name(&self) -> &'static str;

    /// Quadrature nodes for polynomial order `order` (order + 1 nodes, increasing).
    fn quad_nodes(&self, order: usize) -> Result<Vec<f64>>;

    /// Evaluate the basis polynomial of degree `order` at `x`.
    fn polynomial(&self, order: usize, x: f64) -> Result<f64>;

    /// Evaluate the derivative of the basis polynomial of degree `order` at `x`.
    fn polynomial_gradient(&self, order: usize, x: f64) -> Result<f64>;

    /// Smallest gap between consecutive nodes.
    fn min_node_distance(&self, nodes: &[f64]) -> f64 {
        min_node_distance(nodes)
    }
}
