//! Differentiation matrix for nodal DG.
//!
//! The differentiation matrix Dr maps nodal values to derivative values:
//! (du/dr)_i = Σ_j Dr[i,j] * u_j
//!
//! Computed as Dr = Vr * V^{-1} where:
//! - V[i,j] = φ_j(r_i) is the Vandermonde matrix
//! - Vr[i,j] = φ'_j(r_i) is the derivative Vandermonde matrix

use crate::basis::Vandermonde;
use crate::linalg::matmul;
use faer::Mat;

/// Compute the differentiation matrix Dr = Vr * V^{-1}.
///
/// Order 0 has a single constant mode and yields the 1x1 zero matrix.
pub fn differentiation_matrix(vander: &Vandermonde) -> Mat<f64> {
    if vander.order == 0 {
        return Mat::zeros(1, 1);
    }
    matmul(&vander.vr, &vander.v_inv)
}
