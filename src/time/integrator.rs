//! Integrator traits shared by the solver and the Runge-Kutta schemes.
//!
//! A state type only needs in-place scaling and `axpy` to be advanced; the
//! solver never looks inside the integrator beyond [`IntegratorInfo`].
//!
//! ```
//! use dgtd::solver::FieldMatrix;
//! use dgtd::time::{LowStorageRungeKutta, TimeIntegrator};
//!
//! let mut u = FieldMatrix::from_fn(4, 3, |_, _| 1.0);
//! let rk = LowStorageRungeKutta::default();
//!
//! // du/dt = -u
//! rk.step(&mut u, 0.01, 0.0, |state, _| {
//!     let mut rhs = state.clone();
//!     rhs.scale(-1.0);
//!     rhs
//! });
//! assert!((u[(0, 0)] - (-0.01f64).exp()).abs() < 1e-10);
//! ```

use crate::solver::FieldMatrix;

/// Vector-space operations a state needs for explicit stepping.
pub trait Integrable: Clone + Send + Sized {
    /// `self <- c * self`
    fn scale(&mut self, c: f64);

    /// `self <- self + c * other`
    fn axpy(&mut self, c: f64, other: &Self);

    /// State of the same shape filled with zeros.
    fn zeros_like(&self) -> Self {
        let mut zeros = self.clone();
        zeros.scale(0.0);
        zeros
    }
}

impl Integrable for FieldMatrix {
    fn scale(&mut self, c: f64) {
        FieldMatrix::scale(self, c);
    }

    fn axpy(&mut self, c: f64, other: &Self) {
        FieldMatrix::axpy(self, c, other);
    }

    fn zeros_like(&self) -> Self {
        FieldMatrix::zeros(self.n_nodes(), self.n_elements())
    }
}

/// Scheme metadata, independent of the state type.
pub trait IntegratorInfo: Send + Sync {
    fn name(&self) -> &'static str;

    fn order(&self) -> usize;

    fn n_stages(&self) -> usize;

    /// True when stages share a single residual register.
    fn is_low_storage(&self) -> bool;
}

/// An explicit one-step method for states of type `S`.
pub trait TimeIntegrator<S: Integrable>: IntegratorInfo {
    /// Replace `state` at time `t` with its value at `t + dt`.
    ///
    /// `rhs(state, time)` returns the time derivative.
    fn step<F>(&self, state: &mut S, dt: f64, t: f64, rhs: F)
    where
        F: Fn(&S, f64) -> S;
}
