//! PDE models.
//!
//! A [`Pde`] describes a linear hyperbolic equation
//!
//! ∂u/∂t + ∂(c u)/∂x = 0
//!
//! by the data the nodal DG scheme needs: boundary and initial values, flux
//! prefactors and the upwinding of the numerical flux. The spatial discretization
//! itself is shared by all models (see [`crate::solver::rhs`]).

mod advection;

pub use advection::Advection;

use faer::Mat;

use crate::solver::FieldMatrix;
use crate::solver::rhs;

/// Values at the (left, right) face of an element or of the domain.
pub type FacePair = (f64, f64);

/// A PDE model for the nodal DG solver.
///
/// # Example
///
/// ```
/// use dgtd::equations::{Advection, Pde};
///
/// let pde = Advection::new(2.0 * std::f64::consts::PI, 1.0).unwrap();
/// assert_eq!(pde.field_names(), &["Advection"]);
/// assert_eq!(pde.volume_flux_prefactor(), 2.0 * std::f64::consts::PI);
/// ```
pub trait Pde: Clone + Send + Sync {
    /// Name used to select the model in input files.
    fn name(&self) -> &'static str;

    /// Dirichlet values at the left and right end of the domain at `time`.
    fn boundary_conditions(&self, fields: &FieldMatrix, time: f64) -> FacePair;

    /// Initial condition evaluated at the physical node coordinates.
    fn initial_values(&self, phys_node_coords: &FieldMatrix) -> FieldMatrix;

    /// Flux prefactor of the volume term, f(u) = c u.
    fn volume_flux_prefactor(&self) -> f64;

    /// Flux prefactors at the (left, right) face of each element.
    fn surface_flux_prefactors(&self, num_elems: usize) -> Vec<FacePair>;

    /// Blend between central (0) and fully upwind (1) numerical flux.
    fn upwind_param(&self) -> f64;

    /// Names of the fields of the model.
    fn field_names(&self) -> &'static [&'static str];

    /// Semi-discrete right-hand side: volume term plus lifted surface term.
    fn spatial_scheme(
        &self,
        fields: &FieldMatrix,
        time: f64,
        diff_matrix: &Mat<f64>,
        lift_matrix: &Mat<f64>,
        geo: &[f64],
    ) -> FieldMatrix {
        rhs::spatial_scheme(self, fields, time, diff_matrix, lift_matrix, geo)
    }
}
