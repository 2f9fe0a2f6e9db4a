//! Polynomial evaluation and node generation.
//!
//! This module provides:
//! - Orthonormal Jacobi polynomials P_n^{α,β} and their derivatives
//! - Gauss-Jacobi nodes via the Golub-Welsch eigenvalue method
//! - Gauss-Lobatto nodes (Gauss-Jacobi interior nodes plus the endpoints ±1)

mod jacobi;
mod nodes;

pub use jacobi::{jacobi_polynomial, jacobi_polynomial_gradient};
pub use nodes::{gauss_jacobi_nodes, gauss_lobatto_nodes, min_node_distance};
