//! Scalar advection equation.
//!
//! The 1D linear advection equation:
//!
//! ∂u/∂t + a ∂u/∂x = 0
//!
//! where a is the constant advection speed. The initial condition is u(x, 0) =
//! sin(x) with the inflow value u(0, t) = -sin(a t) imposed on the left, so that
//! on a domain starting at x = 0 the exact solution is sin(x - a t).

use super::{FacePair, Pde};
use crate::error::{DgError, Result};
use crate::solver::FieldMatrix;

/// 1D linear advection equation.
///
/// du/dt + a * du/dx = 0
#[derive(Clone, Debug, PartialEq)]
pub struct Advection {
    /// Advection speed, rightward
    speed: f64,
    /// Upwind blending parameter in [0, 1]
    upwind_param: f64,
}

impl Advection {
    /// Create an advection model with given speed and upwind parameter.
    ///
    /// # Errors
    /// `InvalidArgument` for a negative or non-finite speed, or an upwind
    /// parameter outside [0, 1]. Inflow is imposed on the left face only, so the
    /// flow must run to the right.
    pub fn new(speed: f64, upwind_param: f64) -> Result<Self> {
        if !(speed.is_finite() && speed >= 0.0) {
            return Err(DgError::invalid_argument(format!(
                "advection speed must be finite and non-negative, got {}",
                speed
            )));
        }
        if !(0.0..=1.0).contains(&upwind_param) {
            return Err(DgError::invalid_argument(format!(
                "upwind parameter must lie in [0, 1], got {}",
                upwind_param
            )));
        }
        Ok(Self {
            speed,
            upwind_param,
        })
    }

    /// Create the model from the input parameter list `[advection_speed]`.
    pub fn from_parameters(parameters: &[f64], upwind_param: f64) -> Result<Self> {
        let speed = parameters.first().copied().ok_or_else(|| {
            DgError::invalid_argument("advection needs the parameter advection_speed")
        })?;
        Self::new(speed, upwind_param)
    }

    /// Advection speed.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Exact solution sin(x - a t) for a domain whose left end is x = 0.
    pub fn exact_solution(&self, x: f64, t: f64) -> f64 {
        (x - self.speed * t).sin()
    }
}

impl Pde for Advection {
    fn name(&self) -> &'static str {
        "advection"
    }

    fn boundary_conditions(&self, _fields: &FieldMatrix, time: f64) -> FacePair {
        (-(self.speed * time).sin(), 0.0)
    }

    fn initial_values(&self, phys_node_coords: &FieldMatrix) -> FieldMatrix {
        phys_node_coords.map(f64::sin)
    }

    fn volume_flux_prefactor(&self) -> f64 {
        self.speed
    }

    fn surface_flux_prefactors(&self, num_elems: usize) -> Vec<FacePair> {
        vec![(0.5 * self.speed, 0.5 * self.speed); num_elems]
    }

    fn upwind_param(&self) -> f64 {
        self.upwind_param
    }

    fn field_names(&self) -> &'static [&'static str] {
        &["Advection"]
    }
}
