//! # dgtd
//!
//! A one-dimensional nodal Discontinuous Galerkin time-domain solver for
//! hyperbolic PDEs.
//!
//! This crate provides:
//! - Jacobi polynomials and Gauss(-Lobatto) quadrature nodes
//! - Polynomial basis functions (orthonormal Legendre) and Vandermonde matrices
//! - DG operators (differentiation, mass, LIFT) and element geometry
//! - Mesh representation and a Gmsh 4.1 reader
//! - PDE models (advection) with a shared upwind/central spatial scheme
//! - Low-storage explicit Runge-Kutta time integration
//! - JSON input and solution recorders
//!
//! # Example
//!
//! ```
//! use dgtd::basis::LegendreBasis;
//! use dgtd::equations::Advection;
//! use dgtd::io::NullRecorder;
//! use dgtd::mesh::Mesh1D;
//! use dgtd::solver::{DgtdSolver, SolverParameters};
//! use dgtd::time::LowStorageRungeKutta;
//!
//! let mesh = Mesh1D::uniform(0.0, 2.0 * std::f64::consts::PI, 8).unwrap();
//! let params = SolverParameters {
//!     polynomial_order: 3,
//!     end_time: 0.5,
//!     dt_factor: 0.375,
//!     upwind_param: 1.0,
//! };
//! let solver =
//!     DgtdSolver::new(&mesh, params, LegendreBasis, LowStorageRungeKutta::default()).unwrap();
//!
//! let pde = Advection::new(1.0, 1.0).unwrap();
//! let u = solver.get_solution(&pde, &mut NullRecorder).unwrap();
//! let coords = solver.get_phys_node_coords();
//! assert!(u.linf_error(&coords, |x| pde.exact_solution(x, 0.5)) < 1e-3);
//! ```

pub mod basis;
pub mod equations;
pub mod error;
pub mod io;
pub mod linalg;
pub mod mesh;
pub mod operators;
pub mod polynomial;
pub mod simulation;
pub mod solver;
pub mod time;

// Re-export main types for convenience
pub use basis::{Basis, LegendreBasis, Vandermonde};
pub use equations::{Advection, Pde};
pub use error::{DgError, Result};
pub use io::{MemoryRecorder, SolutionRecorder, SolverConfig, TextRecorder, TimeStepPolicy};
pub use mesh::{Mesh1D, read_gmsh_mesh};
pub use operators::{ElementOperators, GeometricOperations};
pub use simulation::solve;
pub use solver::{DgtdSolver, FieldMatrix, SolverParameters};
pub use time::{LowStorageRungeKutta, TimeIntegrator};
