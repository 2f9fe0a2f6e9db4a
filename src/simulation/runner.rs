//! Simulation runner implementation.
//!
//! Builds the PDE, basis and integrator named by a [`SolverConfig`] and runs the
//! solver on a mesh.

use std::path::Path;

use log::info;

use crate::basis::LegendreBasis;
use crate::equations::{Advection, Pde};
use crate::error::{DgError, Result};
use crate::io::{ConfigError, SolutionRecorder, SolverConfig, TimeStepPolicy};
use crate::mesh::{Mesh1D, check_mesh, read_gmsh_mesh};
use crate::solver::{DgtdSolver, FieldMatrix, SolverParameters};
use crate::time::LowStorageRungeKutta;

/// Integrator kind accepted in [`SolverConfig::time_integrator`].
pub const LOW_STORAGE_RUNGE_KUTTA: &str = "low_storage_runge_kutta";

/// Solve the configured PDE on `mesh`.
///
/// A mesh with one region is solved as a single domain. With several regions the
/// configured [`TimeStepPolicy`] applies.
///
/// # Errors
/// `Config` for an invalid configuration or unknown PDE, `NotImplemented` for an
/// unsupported integrator or Runge-Kutta scheme, and any solver error.
pub fn solve<R>(mesh: &Mesh1D, config: &SolverConfig, recorder: &mut R) -> Result<FieldMatrix>
where
    R: SolutionRecorder + ?Sized,
{
    config.validate()?;
    let integrator = build_integrator(config)?;
    let params = SolverParameters::from(config);

    match config.pde_name.as_str() {
        "advection" => {
            let pde = Advection::from_parameters(&config.pde_parameters, config.upwind_param)?;
            run(mesh, params, integrator, &pde, config.time_step_policy, recorder)
        }
        other => Err(ConfigError::UnknownPde(other.to_string()).into()),
    }
}

/// Check and read a Gmsh mesh, load a JSON input and solve.
pub fn solve_files<R>(mesh_path: &Path, input_path: &Path, recorder: &mut R) -> Result<FieldMatrix>
where
    R: SolutionRecorder + ?Sized,
{
    check_mesh(mesh_path)?;
    let mesh = read_gmsh_mesh(mesh_path)?;
    let config = SolverConfig::from_json_file(input_path)?;
    solve(&mesh, &config, recorder)
}

fn build_integrator(config: &SolverConfig) -> Result<LowStorageRungeKutta> {
    if config.time_integrator != LOW_STORAGE_RUNGE_KUTTA {
        return Err(DgError::not_implemented(format!(
            "time integrator {:?} is not available, use {:?}",
            config.time_integrator, LOW_STORAGE_RUNGE_KUTTA
        )));
    }
    LowStorageRungeKutta::new(config.runge_kutta_order, config.runge_kutta_stages)
}

fn run<P, R>(
    mesh: &Mesh1D,
    params: SolverParameters,
    integrator: LowStorageRungeKutta,
    pde: &P,
    policy: TimeStepPolicy,
    recorder: &mut R,
) -> Result<FieldMatrix>
where
    P: Pde,
    R: SolutionRecorder + ?Sized,
{
    let solver = DgtdSolver::new(mesh, params, LegendreBasis, integrator)?;
    if mesh.regions().len() > 1 {
        info!("{} regions, {:?} time step policy", mesh.regions().len(), policy);
        solver.get_regional_solution(pde, policy, recorder)
    } else {
        solver.get_solution(pde, recorder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{MemoryRecorder, NullRecorder};

    #[test]
    fn test_solve_advection() {
        let mesh = Mesh1D::uniform(-3.0, 6.0, 3).unwrap();
        let config = SolverConfig::advection(0.1);
        let mut recorder = MemoryRecorder::new();
        let fields = solve(&mesh, &config, &mut recorder).unwrap();
        assert_eq!(fields.n_nodes(), 4);
        assert_eq!(fields.n_elements(), 3);
        assert_eq!(recorder.times().len(), 4);
    }

    #[test]
    fn test_unsupported_integrator() {
        let mesh = Mesh1D::uniform(0.0, 1.0, 2).unwrap();
        let mut config = SolverConfig::advection(0.1);
        config.time_integrator = "ssp_rk3".to_string();
        assert!(matches!(
            solve(&mesh, &config, &mut NullRecorder),
            Err(DgError::NotImplemented(_))
        ));
    }

    #[test]
    fn test_unsupported_runge_kutta_scheme() {
        let mesh = Mesh1D::uniform(0.0, 1.0, 2).unwrap();
        let mut config = SolverConfig::advection(0.1);
        config.runge_kutta_order = 14;
        config.runge_kutta_stages = 4;
        assert!(matches!(
            solve(&mesh, &config, &mut NullRecorder),
            Err(DgError::NotImplemented(_))
        ));
    }

    #[test]
    fn test_unknown_pde() {
        let mesh = Mesh1D::uniform(0.0, 1.0, 2).unwrap();
        let mut config = SolverConfig::advection(0.1);
        config.pde_name = "maxwell".to_string();
        assert!(matches!(
            solve(&mesh, &config, &mut NullRecorder),
            Err(DgError::Config(ConfigError::UnknownPde(_)))
        ));
    }

    #[test]
    fn test_leftward_advection_is_rejected() {
        let mesh = Mesh1D::uniform(0.0, 1.0, 2).unwrap();
        let mut config = SolverConfig::advection(0.1);
        config.pde_parameters = vec![-1.0];
        let mut recorder = MemoryRecorder::new();
        assert!(matches!(
            solve(&mesh, &config, &mut recorder),
            Err(DgError::InvalidArgument(_))
        ));
        assert!(recorder.times().is_empty());
    }
}
