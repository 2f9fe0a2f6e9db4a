//! Time-domain DG solver.
//!
//! Ties together a mesh, a polynomial basis and a time integrator:
//! - Reference operators (nodes, Dr, LIFT) are built once at construction
//! - The time step follows from the smallest node distance on the mesh
//! - The outer loop runs a fixed number of steps so the last one lands on `end_time`

use std::f64::consts::PI;

use log::{debug, info, warn};

use super::FieldMatrix;
use crate::basis::Basis;
use crate::equations::Pde;
use crate::error::{DgError, Result};
use crate::io::{SolutionRecorder, SolverConfig, TimeStepPolicy};
use crate::mesh::Mesh1D;
use crate::operators::{ElementOperators, GeometricOperations};
use crate::time::TimeIntegrator;

// =============================================================================
// Solver Parameters
// =============================================================================

/// Discretization and run parameters of a solve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverParameters {
    /// Polynomial order of the element basis.
    pub polynomial_order: usize,
    /// Final simulation time.
    pub end_time: f64,
    /// Safety factor on the time step.
    pub dt_factor: f64,
    /// Central (0) to upwind (1) blending of the numerical flux.
    pub upwind_param: f64,
}

impl SolverParameters {
    fn validate(&self) -> Result<()> {
        if self.polynomial_order < 1 {
            return Err(DgError::invalid_argument(format!(
                "polynomial order must be at least 1, got {}",
                self.polynomial_order
            )));
        }
        if !(self.end_time > 0.0 && self.end_time.is_finite()) {
            return Err(DgError::invalid_argument(format!(
                "end time must be positive, got {}",
                self.end_time
            )));
        }
        if !(self.dt_factor > 0.0 && self.dt_factor.is_finite()) {
            return Err(DgError::invalid_argument(format!(
                "dt factor must be positive, got {}",
                self.dt_factor
            )));
        }
        if !(0.0..=1.0).contains(&self.upwind_param) {
            return Err(DgError::invalid_argument(format!(
                "upwind parameter must lie in [0, 1], got {}",
                self.upwind_param
            )));
        }
        Ok(())
    }
}

impl From<&SolverConfig> for SolverParameters {
    fn from(config: &SolverConfig) -> Self {
        Self {
            polynomial_order: config.polynomial_order,
            end_time: config.end_time,
            dt_factor: config.dt_factor,
            upwind_param: config.upwind_param,
        }
    }
}

/// Uniform time step reaching `end_time` in `num_steps` steps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeStep {
    /// Step size.
    pub dt: f64,
    /// Number of steps.
    pub num_steps: usize,
}

impl TimeStep {
    /// Step for the smallest node distance `min_node_dist`.
    ///
    /// dt = dt_factor * d_min / (2π), rounded down so that an integer number of
    /// steps reaches `end_time` exactly.
    pub fn new(end_time: f64, dt_factor: f64, min_node_dist: f64) -> Self {
        let dt_candidate = dt_factor * min_node_dist / (2.0 * PI);
        let num_steps = ((end_time / dt_candidate).ceil() as usize).max(1);
        Self {
            dt: end_time / num_steps as f64,
            num_steps,
        }
    }

    /// Time at the start of step `n`.
    pub fn time_at(&self, n: usize) -> f64 {
        n as f64 * self.dt
    }
}

// =============================================================================
// Solver
// =============================================================================

/// Per-region state while regions advance together.
struct RegionState {
    geo: Vec<f64>,
    fields: FieldMatrix,
}

/// Nodal DG time-domain solver.
///
/// # Type Parameters
///
/// * `B` - Polynomial basis (must implement [`Basis`])
/// * `T` - Time integrator (must implement [`TimeIntegrator<FieldMatrix>`])
pub struct DgtdSolver<'m, B, T>
where
    B: Basis,
    T: TimeIntegrator<FieldMatrix>,
{
    mesh: &'m Mesh1D,
    params: SolverParameters,
    basis: B,
    integrator: T,
    ops: ElementOperators,
}

impl<'m, B, T> DgtdSolver<'m, B, T>
where
    B: Basis,
    T: TimeIntegrator<FieldMatrix>,
{
    /// Create a solver and build the element operators.
    ///
    /// # Errors
    /// `NotImplemented` for an integrator that is not low-storage,
    /// `InvalidArgument` for out-of-range parameters, and any error of the
    /// operator construction.
    pub fn new(mesh: &'m Mesh1D, params: SolverParameters, basis: B, integrator: T) -> Result<Self> {
        if !integrator.is_low_storage() {
            return Err(DgError::not_implemented(format!(
                "time integrator {} is not supported with the {} basis",
                integrator.name(),
                basis.name()
            )));
        }
        params.validate()?;

        let ops = ElementOperators::new(&basis, params.polynomial_order)?;
        if params.upwind_param != 0.0 && params.upwind_param != 1.0 {
            debug!(
                "Blending central and upwind flux with upwind parameter {}",
                params.upwind_param
            );
        }

        info!(
            "DGTD solver: order {} on {} elements ({} regions), {} of order {} with {} stages",
            params.polynomial_order,
            mesh.n_elements(),
            mesh.regions().len(),
            integrator.name(),
            integrator.order(),
            integrator.n_stages()
        );

        Ok(Self {
            mesh,
            params,
            basis,
            integrator,
            ops,
        })
    }

    /// The mesh.
    pub fn mesh(&self) -> &'m Mesh1D {
        self.mesh
    }

    /// Solver parameters.
    pub fn parameters(&self) -> &SolverParameters {
        &self.params
    }

    /// The polynomial basis.
    pub fn basis(&self) -> &B {
        &self.basis
    }

    /// The time integrator.
    pub fn integrator(&self) -> &T {
        &self.integrator
    }

    /// Reference element operators.
    pub fn operators(&self) -> &ElementOperators {
        &self.ops
    }

    /// Quadrature nodes on the reference element.
    pub fn quad_nodes(&self) -> &[f64] {
        &self.ops.nodes
    }

    fn geometry(&self) -> GeometricOperations<'m> {
        GeometricOperations::new(self.mesh)
    }

    /// Physical node coordinates of the given elements, one column per element.
    pub fn phys_node_coords(&self, elements: &[usize]) -> FieldMatrix {
        let geom = self.geometry();
        FieldMatrix::from_fn(self.ops.n_nodes, elements.len(), |i, k| {
            geom.convert_ref_to_phys(self.ops.nodes[i], elements[k])
        })
    }

    /// Physical node coordinates of the whole mesh.
    pub fn get_phys_node_coords(&self) -> FieldMatrix {
        self.phys_node_coords(&self.mesh.all_elements())
    }

    /// Geometric factors of the whole mesh.
    pub fn get_geometric_factors(&self) -> Vec<f64> {
        self.geometry().geometric_factors(&self.mesh.all_elements())
    }

    /// Smallest physical distance between nodes on the mesh.
    pub fn min_node_dist(&self) -> f64 {
        self.geometry().min_node_dist(&self.ops.nodes)
    }

    /// Time step and step count for the whole mesh.
    pub fn time_stepping(&self) -> TimeStep {
        TimeStep::new(
            self.params.end_time,
            self.params.dt_factor,
            self.min_node_dist(),
        )
    }

    /// Time step size for the whole mesh.
    pub fn time_step(&self) -> f64 {
        self.time_stepping().dt
    }

    /// Time step and step count from the smallest element of one region.
    pub fn time_stepping_in_region(&self, region: usize) -> Result<TimeStep> {
        let min_dist = self
            .geometry()
            .min_node_dist_in_region(&self.ops.nodes, region)?;
        Ok(TimeStep::new(
            self.params.end_time,
            self.params.dt_factor,
            min_dist,
        ))
    }

    /// Whether `name` is one of the fields of `pde`.
    pub fn is_field_name_valid<P: Pde>(&self, pde: &P, name: &str) -> bool {
        pde.field_names().contains(&name)
    }

    fn check_pde<P: Pde>(&self, pde: &P) -> Result<()> {
        if pde.upwind_param() != self.params.upwind_param {
            return Err(DgError::invalid_argument(format!(
                "PDE upwind parameter {} differs from the solver's {}",
                pde.upwind_param(),
                self.params.upwind_param
            )));
        }
        Ok(())
    }

    /// Evolve one set of fields by a single step.
    fn advance<P: Pde>(&self, pde: &P, fields: &mut FieldMatrix, geo: &[f64], time: f64, dt: f64) {
        let dr = &self.ops.dr;
        let lift = &self.ops.lift;
        self.integrator.step(fields, dt, time, |u: &FieldMatrix, t: f64| {
            pde.spatial_scheme(u, t, dr, lift, geo)
        });
    }

    fn record_snapshot<P, R>(
        &self,
        pde: &P,
        recorder: &mut R,
        time: f64,
        fields: &FieldMatrix,
    ) -> Result<()>
    where
        P: Pde,
        R: SolutionRecorder + ?Sized,
    {
        recorder.record_time(time)?;
        for name in pde.field_names() {
            recorder.record_field(name, fields)?;
        }
        Ok(())
    }

    /// Solve `pde` on the whole mesh as a single domain.
    ///
    /// Records the node coordinates once, then the time and fields before every
    /// step and after the last one. Returns the fields at `end_time`.
    pub fn get_solution<P, R>(&self, pde: &P, recorder: &mut R) -> Result<FieldMatrix>
    where
        P: Pde,
        R: SolutionRecorder + ?Sized,
    {
        self.check_pde(pde)?;

        let coords = self.get_phys_node_coords();
        let geo = self.get_geometric_factors();
        let step = self.time_stepping();
        let mut fields = pde.initial_values(&coords);

        info!(
            "Solving {} until t = {} with dt = {:.6e} ({} steps)",
            pde.name(),
            self.params.end_time,
            step.dt,
            step.num_steps
        );
        recorder.record_coordinates(&coords)?;

        for n in 0..step.num_steps {
            let time = step.time_at(n);
            self.record_snapshot(pde, recorder, time, &fields)?;
            self.advance(pde, &mut fields, &geo, time, step.dt);
            debug!("step {}/{}: t = {:.6e}", n + 1, step.num_steps, time + step.dt);
        }
        self.record_snapshot(pde, recorder, self.params.end_time, &fields)?;

        Ok(fields)
    }

    /// Solve `pde` region by region.
    ///
    /// Regions do not exchange fluxes: each one applies the boundary conditions of
    /// `pde` at its own outer faces. The result concatenates the region columns in
    /// left-to-right region order.
    pub fn get_regional_solution<P, R>(
        &self,
        pde: &P,
        policy: TimeStepPolicy,
        recorder: &mut R,
    ) -> Result<FieldMatrix>
    where
        P: Pde,
        R: SolutionRecorder + ?Sized,
    {
        self.check_pde(pde)?;
        let geom = self.geometry();

        let mut coords = Vec::with_capacity(self.mesh.regions().len());
        let mut states = Vec::with_capacity(self.mesh.regions().len());
        for region in self.mesh.regions() {
            let elements = self.mesh.region_elements(region.tag)?;
            if elements.len() == 1 {
                warn!("Region {} ({}) has a single element", region.tag, region.name);
            }
            let region_coords = self.phys_node_coords(&elements);
            states.push(RegionState {
                geo: geom.geometric_factors(&elements),
                fields: pde.initial_values(&region_coords),
            });
            coords.push(region_coords);
        }
        recorder.record_coordinates(&FieldMatrix::hcat(&coords)?)?;

        match policy {
            TimeStepPolicy::Global => {
                let step = self.time_stepping();
                info!(
                    "Solving {} on {} regions until t = {} with dt = {:.6e} ({} steps)",
                    pde.name(),
                    states.len(),
                    self.params.end_time,
                    step.dt,
                    step.num_steps
                );

                for n in 0..step.num_steps {
                    let time = step.time_at(n);
                    self.record_snapshot(pde, recorder, time, &concat_fields(&states)?)?;
                    for state in &mut states {
                        self.advance(pde, &mut state.fields, &state.geo, time, step.dt);
                    }
                    debug!("step {}/{}: t = {:.6e}", n + 1, step.num_steps, time + step.dt);
                }
            }
            TimeStepPolicy::PerRegion => {
                self.record_snapshot(pde, recorder, 0.0, &concat_fields(&states)?)?;
                for (region, state) in self.mesh.regions().iter().zip(states.iter_mut()) {
                    let step = self.time_stepping_in_region(region.tag)?;
                    info!(
                        "Region {} ({}): dt = {:.6e} ({} steps)",
                        region.tag, region.name, step.dt, step.num_steps
                    );
                    for n in 0..step.num_steps {
                        self.advance(pde, &mut state.fields, &state.geo, step.time_at(n), step.dt);
                    }
                }
            }
        }

        let fields = concat_fields(&states)?;
        self.record_snapshot(pde, recorder, self.params.end_time, &fields)?;
        Ok(fields)
    }
}

fn concat_fields(states: &[RegionState]) -> Result<FieldMatrix> {
    let parts: Vec<FieldMatrix> = states.iter().map(|s| s.fields.clone()).collect();
    FieldMatrix::hcat(&parts)
}
