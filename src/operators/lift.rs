//! LIFT matrix for surface integral contributions in DG.
//!
//! The LIFT matrix maps surface values to volume contributions:
//! LIFT = M^{-1} * E^T
//!
//! where E is the extraction matrix that evaluates polynomials at face nodes.
//!
//! In 1D, each element has 2 faces (left at r=-1, right at r=+1).
//! The LIFT matrix has shape (n_nodes, 2) and maps [flux_left, flux_right]
//! to volume contributions.

use faer::Mat;

/// Compute the LIFT matrix for 1D elements.
///
/// LIFT has shape (n_nodes, 2) where column 0 is for the left face (r=-1)
/// and column 1 is for the right face (r=+1).
///
/// With Gauss-Lobatto nodes the faces are the first and last nodes, so E^T has a
/// single 1 in each column and LIFT is made of two columns of M^{-1}:
/// - LIFT[:, 0] = M^{-1}[:, 0]
/// - LIFT[:, 1] = M^{-1}[:, n-1]
pub fn lift_matrix(mass_inv: &Mat<f64>) -> Mat<f64> {
    let n = mass_inv.nrows();
    let mut lift = Mat::zeros(n, 2);

    for i in 0..n {
        lift[(i, 0)] = mass_inv[(i, 0)];
        lift[(i, 1)] = mass_inv[(i, n - 1)];
    }

    lift
}
