//! Input and output of the solver.
//!
//! This module provides:
//! - **Input configuration**: JSON solver input ([`SolverConfig`])
//! - **Solution output**: recorders for times, field snapshots and node coordinates
//!
//! Mesh files are read by [`crate::mesh::gmsh`].
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use dgtd::io::{SolverConfig, TextRecorder};
//!
//! let config = SolverConfig::from_json_file(Path::new("data/advection.json")).unwrap();
//! let mut recorder = TextRecorder::new(Path::new("results")).unwrap();
//! ```

mod config;
mod output;

pub use config::{ConfigError, KNOWN_PDES, SolverConfig, TimeStepPolicy};
pub use output::{MemoryRecorder, NullRecorder, OutputError, SolutionRecorder, TextRecorder};
