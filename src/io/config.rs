//! Solver input configuration.
//!
//! The input file is a JSON object:
//!
//! ```text
//! {
//!     "pde_name": "advection",
//!     "polynomial_order": 3,
//!     "end_time": 0.1,
//!     "dt_factor": 0.375,
//!     "upwind_param": 1.0,
//!     "runge_kutta_order": 4,
//!     "runge_kutta_stages": 5,
//!     "pde_parameters": [6.283185307179586],
//!     "time_step_policy": "global"
//! }
//! ```
//!
//! `upwind_param`, `runge_kutta_order`, `runge_kutta_stages`, `time_integrator` and
//! `time_step_policy` may be omitted.

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// PDEs known to the input layer with the names of their parameters.
pub const KNOWN_PDES: &[(&str, &[&str])] = &[("advection", &["advection_speed"])];

/// Error type for loading the input configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the input file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed JSON or wrong field types
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// PDE name not in [`KNOWN_PDES`]
    #[error("Unknown PDE: {0}")]
    UnknownPde(String),

    /// PDE parameter list too short
    #[error("PDE {pde} requires parameter {name}")]
    MissingParameter {
        /// PDE name
        pde: String,
        /// Name of the first missing parameter
        name: String,
    },

    /// Field value outside its admissible range
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// How the time step is chosen when the mesh has several regions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeStepPolicy {
    /// One time step from the smallest element of the mesh; regions advance in
    /// lockstep.
    #[default]
    Global,
    /// Each region uses the time step of its own smallest element.
    PerRegion,
}

/// Solver input read from JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Name of the PDE to solve
    pub pde_name: String,
    /// Polynomial order of the element basis
    pub polynomial_order: usize,
    /// Final simulation time
    pub end_time: f64,
    /// Safety factor of the time step
    pub dt_factor: f64,
    /// Central (0) to upwind (1) blending of the numerical flux
    #[serde(default = "default_upwind_param")]
    pub upwind_param: f64,
    /// Order of the low-storage Runge-Kutta scheme
    #[serde(default = "default_runge_kutta_order")]
    pub runge_kutta_order: usize,
    /// Stages of the low-storage Runge-Kutta scheme
    #[serde(default = "default_runge_kutta_stages")]
    pub runge_kutta_stages: usize,
    /// PDE-specific parameters, in the order listed in [`KNOWN_PDES`]
    #[serde(default)]
    pub pde_parameters: Vec<f64>,
    /// Time integrator kind
    #[serde(default = "default_time_integrator")]
    pub time_integrator: String,
    /// Time step policy for multi-region meshes
    #[serde(default)]
    pub time_step_policy: TimeStepPolicy,
}

fn default_upwind_param() -> f64 {
    1.0
}

fn default_runge_kutta_order() -> usize {
    4
}

fn default_runge_kutta_stages() -> usize {
    5
}

fn default_time_integrator() -> String {
    "low_storage_runge_kutta".to_string()
}

impl SolverConfig {
    /// Advection with speed 2π, order 3, the classic test case.
    pub fn advection(end_time: f64) -> Self {
        Self {
            pde_name: "advection".to_string(),
            polynomial_order: 3,
            end_time,
            dt_factor: 0.375,
            upwind_param: default_upwind_param(),
            runge_kutta_order: default_runge_kutta_order(),
            runge_kutta_stages: default_runge_kutta_stages(),
            pde_parameters: vec![2.0 * std::f64::consts::PI],
            time_integrator: default_time_integrator(),
            time_step_policy: TimeStepPolicy::Global,
        }
    }

    /// Parse and validate a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: SolverConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        info!(
            "Loaded input {}: {} with order {} until t = {}",
            path.display(),
            config.pde_name,
            config.polynomial_order,
            config.end_time
        );
        Ok(config)
    }

    /// Check value ranges and the parameters of the PDE.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.polynomial_order < 1 {
            return Err(ConfigError::InvalidValue(format!(
                "polynomial_order must be at least 1, got {}",
                self.polynomial_order
            )));
        }
        if !(self.end_time > 0.0 && self.end_time.is_finite()) {
            return Err(ConfigError::InvalidValue(format!(
                "end_time must be positive, got {}",
                self.end_time
            )));
        }
        if !(self.dt_factor > 0.0 && self.dt_factor.is_finite()) {
            return Err(ConfigError::InvalidValue(format!(
                "dt_factor must be positive, got {}",
                self.dt_factor
            )));
        }
        if !(0.0..=1.0).contains(&self.upwind_param) {
            return Err(ConfigError::InvalidValue(format!(
                "upwind_param must lie in [0, 1], got {}",
                self.upwind_param
            )));
        }

        let parameter_names = KNOWN_PDES
            .iter()
            .find(|(name, _)| *name == self.pde_name)
            .map(|(_, params)| *params)
            .ok_or_else(|| ConfigError::UnknownPde(self.pde_name.clone()))?;

        if let Some(missing) = parameter_names.get(self.pde_parameters.len()) {
            return Err(ConfigError::MissingParameter {
                pde: self.pde_name.clone(),
                name: missing.to_string(),
            });
        }

        Ok(())
    }
}
