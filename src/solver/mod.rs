//! DG solver components.
//!
//! # Submodules
//!
//! - [`FieldMatrix`]: nodal values, one column per element
//! - [`rhs`]: the shared spatial discretization (volume and lifted surface terms)
//! - [`DgtdSolver`]: operator setup, time step selection and the outer time loop

mod dgtd;
mod field;
pub mod rhs;

pub use dgtd::{DgtdSolver, SolverParameters, TimeStep};
pub use field::FieldMatrix;
