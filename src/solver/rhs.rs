//! Right-hand side of the nodal DG discretization in 1D.
//!
//! For a linear conservation law du/dt + d(c u)/dx = 0 the semi-discrete form is:
//!
//! du/dt = -g * Dr * (c u) + g * LIFT * (surface flux)
//!
//! Here:
//! - Dr is the differentiation matrix in reference coordinates
//! - g = 2/h is the geometric factor dr/dx of each element
//! - LIFT maps the two face contributions of an element to its nodes
//!
//! The surface flux is built from field jumps at element faces. The central part
//! uses the outward normals (-1, +1); the upwind part adds a dissipative term
//! with weight `upwind_param` at both faces.

use faer::Mat;

use super::FieldMatrix;
use crate::equations::{FacePair, Pde};

/// Physical flux f(u) = c u at every node.
pub fn get_flux(fields: &FieldMatrix, prefactor: f64) -> FieldMatrix {
    fields.map(|u| prefactor * u)
}

/// Volume contribution -g_k * Dr * (c u_k) for every element k.
pub fn volume_fields(
    fields: &FieldMatrix,
    flux_prefactor: f64,
    diff_matrix: &Mat<f64>,
    geo: &[f64],
) -> FieldMatrix {
    let n = fields.n_nodes();
    let flux = get_flux(fields, flux_prefactor);
    let mut volume = FieldMatrix::zeros(n, fields.n_elements());

    for k in 0..fields.n_elements() {
        let f_k = flux.element(k);
        let out = volume.element_mut(k);
        for i in 0..n {
            let mut df_dr = 0.0;
            for j in 0..n {
                df_dr += diff_matrix[(i, j)] * f_k[j];
            }
            out[i] = -df_dr * geo[k];
        }
    }

    volume
}

/// Field jumps at the (left, right) face of every element.
///
/// The left face of the first element jumps against the left boundary value;
/// the right face of the last element carries the right boundary value itself.
/// An interior face jump is u_last(k) - u_first(k + 1) seen from element k, and
/// its negative seen from element k + 1.
pub fn field_jumps(fields: &FieldMatrix, boundary_values: FacePair) -> Vec<FacePair> {
    let num_elems = fields.n_elements();
    let (left_bc, right_bc) = boundary_values;
    let mut jumps = Vec::with_capacity(num_elems);

    let mut left_jump = fields.first_node(0) - left_bc;
    for k in 0..num_elems {
        let right_jump = if k + 1 < num_elems {
            fields.last_node(k) - fields.first_node(k + 1)
        } else {
            right_bc
        };
        jumps.push((left_jump, right_jump));
        left_jump = -right_jump;
    }

    jumps
}

/// Lift weighted face jumps into the element nodes.
///
/// For element k and node i:
/// (n_l * p_l * LIFT[i,0] * j_l + n_r * p_r * LIFT[i,1] * j_r) * g_k
/// with face normals (n_l, n_r) and flux prefactors (p_l, p_r).
pub fn lifted_jumps(
    jumps: &[FacePair],
    prefactors: &[FacePair],
    normals: FacePair,
    lift_matrix: &Mat<f64>,
    geo: &[f64],
) -> FieldMatrix {
    let n = lift_matrix.nrows();
    let (n_left, n_right) = normals;

    FieldMatrix::from_fn(n, jumps.len(), |i, k| {
        let (j_left, j_right) = jumps[k];
        let (p_left, p_right) = prefactors[k];
        (n_left * p_left * lift_matrix[(i, 0)] * j_left
            + n_right * p_right * lift_matrix[(i, 1)] * j_right)
            * geo[k]
    })
}

/// Surface contribution: central flux plus the upwind correction when
/// `upwind_param` is nonzero.
pub fn surface_fields(
    jumps: &[FacePair],
    prefactors: &[FacePair],
    lift_matrix: &Mat<f64>,
    geo: &[f64],
    upwind_param: f64,
) -> FieldMatrix {
    let mut surface = lifted_jumps(jumps, prefactors, (-1.0, 1.0), lift_matrix, geo);
    if upwind_param != 0.0 {
        let upwind = lifted_jumps(
            jumps,
            prefactors,
            (-upwind_param, -upwind_param),
            lift_matrix,
            geo,
        );
        surface.axpy(1.0, &upwind);
    }
    surface
}

/// Semi-discrete right-hand side of `pde` for the current fields.
pub fn spatial_scheme<P: Pde + ?Sized>(
    pde: &P,
    fields: &FieldMatrix,
    time: f64,
    diff_matrix: &Mat<f64>,
    lift_matrix: &Mat<f64>,
    geo: &[f64],
) -> FieldMatrix {
    let mut rhs = volume_fields(fields, pde.volume_flux_prefactor(), diff_matrix, geo);

    let boundary_values = pde.boundary_conditions(fields, time);
    let jumps = field_jumps(fields, boundary_values);
    let prefactors = pde.surface_flux_prefactors(fields.n_elements());
    let surface = surface_fields(&jumps, &prefactors, lift_matrix, geo, pde.upwind_param());

    rhs.axpy(1.0, &surface);
    rhs
}
