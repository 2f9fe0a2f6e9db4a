//! Crate-level error type.
//!
//! Numerical routines fail with one of three kinds:
//! - [`DgError::InvalidArgument`]: malformed numeric input (Jacobi parameters out of
//!   domain, polynomial order too small, eigenvalue count mismatch)
//! - [`DgError::NotImplemented`]: unsupported time integrator or Butcher table request
//! - [`DgError::NumericalFailure`]: singular matrix inversion while building operators
//!
//! Failures of the mesh reader, the JSON input and the output writers are wrapped so a
//! whole solve can be driven with `?`.

use thiserror::Error;

use crate::io::{ConfigError, OutputError};
use crate::mesh::GmshError;

/// Error type for the DGTD solver.
#[derive(Debug, Error)]
pub enum DgError {
    /// Numeric input outside the domain of the routine.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Requested combination is not available.
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Matrix inversion or decomposition broke down.
    #[error("Numerical failure: {0}")]
    NumericalFailure(String),

    /// Mesh could not be read or failed its structural checks.
    #[error("Mesh error: {0}")]
    Mesh(#[from] GmshError),

    /// Input configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Results could not be written.
    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

impl DgError {
    /// Create an invalid-argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        DgError::InvalidArgument(msg.into())
    }

    /// Create a not-implemented error.
    pub fn not_implemented(msg: impl Into<String>) -> Self {
        DgError::NotImplemented(msg.into())
    }

    /// Create a numerical-failure error.
    pub fn numerical_failure(msg: impl Into<String>) -> Self {
        DgError::NumericalFailure(msg.into())
    }
}

/// Result type for fallible solver operations.
pub type Result<T> = std::result::Result<T, DgError>;
