//! Mesh representation.
//!
//! Provides the 1D mesh consumed by the solver:
//! - Ordered line elements grouped into physical regions
//! - Gmsh MSH 4.1 file input and structural checks

pub mod gmsh;
mod mesh1d;

pub use gmsh::{GmshError, check_mesh, read_gmsh_mesh};
pub use mesh1d::{Element1D, Mesh1D, Region};
