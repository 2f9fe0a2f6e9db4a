//! Mass matrix for the nodal basis.
//!
//! With orthonormal modes the modal mass matrix is the identity, so on the
//! reference element
//!
//! M^{-1} = V V^T
//!
//! The inverse mass matrix is therefore available without any inversion; the mass
//! matrix itself needs one.

use crate::basis::Vandermonde;
use crate::error::Result;
use crate::linalg::{gram, invert};
use faer::Mat;

/// Inverse of the reference mass matrix, V V^T.
pub fn inverse_mass_matrix(vander: &Vandermonde) -> Mat<f64> {
    gram(&vander.v)
}

/// Reference mass matrix M = (V V^T)^{-1}.
///
/// # Errors
/// `NumericalFailure` if V V^T is singular.
pub fn mass_matrix(vander: &Vandermonde) -> Result<Mat<f64>> {
    invert(&inverse_mass_matrix(vander), "inverse mass matrix V V^T")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basis::{Basis, LegendreBasis};

    #[test]
    fn test_mass_integrates_constants() {
        // 1^T M 1 = ∫ 1 dr = 2
        let basis = LegendreBasis::new();
        for order in 1..=5 {
            let nodes = basis.quad_nodes(order).unwrap();
            let vander = Vandermonde::new(&basis, order, &nodes).unwrap();
            let m = mass_matrix(&vander).unwrap();

            let mut total = 0.0;
            for i in 0..=order {
                for j in 0..=order {
                    total += m[(i, j)];
                }
            }
            assert!(
                (total - 2.0).abs() < 1e-12,
                "Order {}: sum of mass entries = {}",
                order,
                total
            );
        }
    }

    #[test]
    fn test_mass_is_symmetric() {
        let basis = LegendreBasis::new();
        let nodes = basis.quad_nodes(4).unwrap();
        let vander = Vandermonde::new(&basis, 4, &nodes).unwrap();
        let m = mass_matrix(&vander).unwrap();
        for i in 0..5 {
            for j in 0..5 {
                assert!((m[(i, j)] - m[(j, i)]).abs() < 1e-13);
            }
        }
    }

    #[test]
    fn test_order_one_mass() {
        // Linear elements: M = [[2/3, 1/3], [1/3, 2/3]]
        let basis = LegendreBasis::new();
        let nodes = basis.quad_nodes(1).unwrap();
        let vander = Vandermonde::new(&basis, 1, &nodes).unwrap();
        let m = mass_matrix(&vander).unwrap();
        assert!((m[(0, 0)] - 2.0 / 3.0).abs() < 1e-14);
        assert!((m[(0, 1)] - 1.0 / 3.0).abs() < 1e-14);
        assert!((m[(1, 1)] - 2.0 / 3.0).abs() < 1e-14);
    }
}
