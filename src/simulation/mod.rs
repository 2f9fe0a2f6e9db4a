//! Simulation entry points.
//!
//! This module ties together:
//! - The JSON input ([`crate::io::SolverConfig`])
//! - PDE selection by name
//! - The Legendre basis and the low-storage Runge-Kutta integrator
//! - The solver's time loop and a solution recorder
//!
//! # Example
//! ```
//! use dgtd::io::{MemoryRecorder, SolverConfig};
//! use dgtd::mesh::Mesh1D;
//! use dgtd::simulation::solve;
//!
//! let mesh = Mesh1D::uniform(-3.0, 6.0, 3).unwrap();
//! let config = SolverConfig::advection(0.1);
//! let mut recorder = MemoryRecorder::new();
//!
//! let fields = solve(&mesh, &config, &mut recorder).unwrap();
//! assert_eq!(fields.n_elements(), 3);
//! assert_eq!(recorder.times().len(), 4);
//! ```

mod runner;

pub use runner::{LOW_STORAGE_RUNGE_KUTTA, solve, solve_files};
