//! Low-storage explicit Runge-Kutta integration.

use super::butcher::{ButcherCoefficients, CARPENTER_KENNEDY_4_5, get_butcher_coeffs};
use super::integrator::{Integrable, IntegratorInfo, TimeIntegrator};
use crate::error::Result;

/// Advance `initial_values` from `time` to `time + dt` with a low-storage scheme.
///
/// ```text
/// solution = initial_values; residual = 0
/// for stage in 0..num_stages:
///     residual = a[stage] * residual + dt * rhs(solution, time + c[stage] * dt)
///     solution = solution + b[stage] * residual
/// ```
pub fn evolve_in_time<S, F>(
    rhs: F,
    initial_values: &S,
    time: f64,
    dt: f64,
    coeffs: &ButcherCoefficients,
) -> S
where
    S: Integrable,
    F: Fn(&S, f64) -> S,
{
    let mut solution = initial_values.clone();
    let mut residual = initial_values.zeros_like();

    for stage in 0..coeffs.num_stages() {
        let interim_time = time + dt * coeffs.c[stage];
        let l_u = rhs(&solution, interim_time);
        residual.scale(coeffs.a[stage]);
        residual.axpy(dt, &l_u);
        solution.axpy(coeffs.b[stage], &residual);
    }

    solution
}

/// Low-storage Runge-Kutta integrator.
///
/// Holds one tabulated scheme; the default is the five-stage fourth-order scheme
/// of Carpenter & Kennedy.
#[derive(Clone, Copy, Debug)]
pub struct LowStorageRungeKutta {
    coeffs: ButcherCoefficients,
}

impl LowStorageRungeKutta {
    /// Integrator for the scheme with the given order and number of stages.
    ///
    /// # Errors
    /// `NotImplemented` when the scheme is not tabulated.
    pub fn new(order: usize, stages: usize) -> Result<Self> {
        Ok(Self {
            coeffs: get_butcher_coeffs(order, stages)?,
        })
    }

    /// Coefficients of the scheme.
    pub fn coefficients(&self) -> &ButcherCoefficients {
        &self.coeffs
    }

    /// Advance `initial_values` by one step, returning the new state.
    pub fn evolve_in_time<S, F>(&self, rhs: F, initial_values: &S, time: f64, dt: f64) -> S
    where
        S: Integrable,
        F: Fn(&S, f64) -> S,
    {
        evolve_in_time(rhs, initial_values, time, dt, &self.coeffs)
    }
}

impl Default for LowStorageRungeKutta {
    fn default() -> Self {
        Self {
            coeffs: CARPENTER_KENNEDY_4_5,
        }
    }
}

impl IntegratorInfo for LowStorageRungeKutta {
    fn name(&self) -> &'static str {
        "low-storage-rk"
    }

    fn order(&self) -> usize {
        self.coeffs.order
    }

    fn n_stages(&self) -> usize {
        self.coeffs.num_stages()
    }

    fn is_low_storage(&self) -> bool {
        true
    }
}

impl<S: Integrable> TimeIntegrator<S> for LowStorageRungeKutta {
    fn step<F>(&self, state: &mut S, dt: f64, t: f64, rhs: F)
    where
        F: Fn(&S, f64) -> S,
    {
        *state = evolve_in_time(rhs, state, t, dt, &self.coeffs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DgError;
    use crate::solver::FieldMatrix;

    #[test]
    fn test_single_step_reference() {
        // du/dt = (5 t^2 - u) / exp(u + t), one step from u(7) = 0 with dt = 0.1
        let rhs = |u: &FieldMatrix, t: f64| u.map(|x| (5.0 * t * t - x) / (x + t).exp());
        let u0 = FieldMatrix::zeros(1, 1);
        let u1 = evolve_in_time(rhs, &u0, 7.0, 0.1, &CARPENTER_KENNEDY_4_5);
        assert!(
            (u1[(0, 0)] - 0.021330398714844).abs() < 1e-13,
            "got {}",
            u1[(0, 0)]
        );
    }

    #[test]
    fn test_exponential_decay_convergence() {
        // du/dt = -u: fourth-order convergence of the final error
        let integrator = LowStorageRungeKutta::default();
        let t_final = 1.0;
        let errors: Vec<f64> = [10, 20, 40]
            .iter()
            .map(|&n| {
                let dt = t_final / n as f64;
                let mut u = FieldMatrix::from_fn(2, 1, |_, _| 1.0);
                for step in 0..n {
                    integrator.step(&mut u, dt, step as f64 * dt, |s, _| {
                        let mut r = s.clone();
                        r.scale(-1.0);
                        r
                    });
                }
                (u[(0, 0)] - (-t_final).exp()).abs()
            })
            .collect();

        for i in 1..errors.len() {
            let order = (errors[i - 1] / errors[i]).log2();
            assert!(order > 3.8, "observed order {} ({:?})", order, errors);
        }
    }

    #[test]
    fn test_integrator_info() {
        let integrator = LowStorageRungeKutta::new(4, 5).unwrap();
        assert!(integrator.is_low_storage());
        assert_eq!(integrator.order(), 4);
        assert_eq!(integrator.n_stages(), 5);
        assert_eq!(integrator.coefficients().c[0], 0.0);
        assert!((integrator.coefficients().c[1] - 0.149659021999229).abs() < 1e-14);
    }

    #[test]
    fn test_time_dependent_rhs_is_exact_for_cubic() {
        // du/dt = 3 t^2 has the cubic solution t^3, integrated exactly by a
        // fourth-order scheme
        let integrator = LowStorageRungeKutta::default();
        let mut u = FieldMatrix::zeros(1, 1);
        let dt = 0.25;
        for step in 0..4 {
            integrator.step(&mut u, dt, step as f64 * dt, |s, t| s.map(|_| 3.0 * t * t));
        }
        assert!((u[(0, 0)] - 1.0).abs() < 1e-14);
    }

    #[test]
    fn test_unknown_scheme() {
        assert!(matches!(
            LowStorageRungeKutta::new(3, 3),
            Err(DgError::NotImplemented(_))
        ));
    }
}
