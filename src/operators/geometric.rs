//! Geometric factors for 1D elements.
//!
//! Element k with physical extent [x_l, x_r] is the image of the reference
//! interval [-1, 1] under the affine map
//!
//! x(r) = x_l + (r + 1) / g_k,    g_k = 2 / h_k = dr/dx
//!
//! The geometric factor g_k converts reference derivatives and lifted surface
//! terms to physical ones.

use crate::error::Result;
use crate::mesh::Mesh1D;
use crate::polynomial::min_node_distance;

/// Geometric operations on the elements of a mesh.
#[derive(Clone, Copy)]
pub struct GeometricOperations<'a> {
    mesh: &'a Mesh1D,
}

impl<'a> GeometricOperations<'a> {
    /// Wrap a mesh.
    pub fn new(mesh: &'a Mesh1D) -> Self {
        Self { mesh }
    }

    /// The underlying mesh.
    pub fn mesh(&self) -> &'a Mesh1D {
        self.mesh
    }

    /// Geometric factor 2 / h_k of element k.
    pub fn geometric_factor(&self, elem: usize) -> f64 {
        2.0 / self.mesh.elem_size(elem)
    }

    /// Geometric factors of the given elements, in the given order.
    pub fn geometric_factors(&self, elements: &[usize]) -> Vec<f64> {
        elements
            .iter()
            .map(|&k| self.geometric_factor(k))
            .collect()
    }

    /// Map a physical coordinate in element k to the reference interval.
    ///
    /// r = -1 + (x - x_l) g_k
    pub fn convert_phys_to_ref(&self, x: f64, elem: usize) -> f64 {
        let (left, _) = self.mesh.elem_coords(elem);
        -1.0 + (x - left) * self.geometric_factor(elem)
    }

    /// Map a reference coordinate to the physical coordinate in element k.
    ///
    /// x = x_l + (r + 1) / g_k
    pub fn convert_ref_to_phys(&self, r: f64, elem: usize) -> f64 {
        let (left, _) = self.mesh.elem_coords(elem);
        left + (r + 1.0) / self.geometric_factor(elem)
    }

    /// Smallest physical distance between quadrature nodes over the mesh.
    ///
    /// The reference node spacing is scaled by the smallest element: d_min h_min / 2.
    pub fn min_node_dist(&self, quad_nodes: &[f64]) -> f64 {
        min_node_distance(quad_nodes) * self.mesh.min_elem_size() / 2.0
    }

    /// Smallest physical distance between quadrature nodes within a region.
    pub fn min_node_dist_in_region(&self, quad_nodes: &[f64], region: usize) -> Result<f64> {
        Ok(min_node_distance(quad_nodes) * self.mesh.min_elem_size_in(region)? / 2.0)
    }
}
