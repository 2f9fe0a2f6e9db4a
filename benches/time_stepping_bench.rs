//! Benchmarks for time stepping.
//!
//! Run with: `cargo bench --bench time_stepping_bench`
//!
//! Benchmarks single low-storage Runge-Kutta steps and complete solves.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use dgtd::equations::{Advection, Pde};
use dgtd::io::NullRecorder;
use dgtd::mesh::Mesh1D;
use dgtd::solver::{DgtdSolver, SolverParameters};
use dgtd::time::{LowStorageRungeKutta, TimeIntegrator};
use dgtd::LegendreBasis;
use std::f64::consts::PI;

fn parameters(end_time: f64) -> SolverParameters {
    SolverParameters {
        polynomial_order: 3,
        end_time,
        dt_factor: 0.375,
        upwind_param: 1.0,
    }
}

/// Benchmark a single five-stage step.
fn bench_rk_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("low_storage_rk_step");
    let pde = Advection::new(2.0 * PI, 1.0).unwrap();

    for n_elements in [16, 128, 1024] {
        let mesh = Mesh1D::uniform(0.0, 2.0 * PI, n_elements).unwrap();
        let solver = DgtdSolver::new(
            &mesh,
            parameters(1.0),
            LegendreBasis,
            LowStorageRungeKutta::default(),
        )
        .unwrap();
        let u0 = pde.initial_values(&solver.get_phys_node_coords());
        let geo = solver.get_geometric_factors();
        let ops = solver.operators();
        let dt = solver.time_step();

        group.bench_with_input(
            BenchmarkId::new("advection_p3", format!("{}_elements", n_elements)),
            &n_elements,
            |b, _| {
                b.iter(|| {
                    let mut u = u0.clone();
                    solver.integrator().step(&mut u, black_box(dt), 0.0, |s, t| {
                        pde.spatial_scheme(s, t, &ops.dr, &ops.lift, &geo)
                    });
                    u
                });
            },
        );
    }

    group.finish();
}

/// Benchmark a complete solve to t = 0.1.
fn bench_full_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_solve");
    group.sample_size(20);
    let pde = Advection::new(2.0 * PI, 1.0).unwrap();

    for n_elements in [16, 64] {
        let mesh = Mesh1D::uniform(0.0, 2.0 * PI, n_elements).unwrap();
        let solver = DgtdSolver::new(
            &mesh,
            parameters(0.1),
            LegendreBasis,
            LowStorageRungeKutta::default(),
        )
        .unwrap();

        group.bench_with_input(
            BenchmarkId::new("advection_p3", format!("{}_elements", n_elements)),
            &n_elements,
            |b, _| {
                b.iter(|| solver.get_solution(black_box(&pde), &mut NullRecorder));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_rk_step, bench_full_solve);
criterion_main!(benches);
