//! Time integration methods.
//!
//! Explicit low-storage Runge-Kutta schemes advance a field in place with a single
//! extra residual register per step.

mod butcher;
mod integrator;
mod low_storage_rk;

pub use butcher::{ButcherCoefficients, CARPENTER_KENNEDY_4_5, get_butcher_coeffs};
pub use integrator::{Integrable, IntegratorInfo, TimeIntegrator};
pub use low_storage_rk::{LowStorageRungeKutta, evolve_in_time};
