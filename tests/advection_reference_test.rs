//! Reference-value tests for advection with speed 2π on three elements of [-3, 6].
//!
//! Order 3, dt_factor 0.375, fully upwind flux, end time 0.1.

use std::f64::consts::PI;
use std::fs;
use std::path::PathBuf;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use dgtd::equations::{Advection, Pde};
use dgtd::io::{MemoryRecorder, SolverConfig, TextRecorder};
use dgtd::simulation::{solve, solve_files};
use dgtd::{
    DgtdSolver, FieldMatrix, LegendreBasis, LowStorageRungeKutta, Mesh1D, SolverParameters,
    read_gmsh_mesh,
};

const TOL: f64 = 1e-14;

fn data_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

fn reference_mesh() -> Mesh1D {
    Mesh1D::uniform(-3.0, 6.0, 3).unwrap()
}

fn reference_solver(mesh: &Mesh1D) -> DgtdSolver<'_, LegendreBasis, LowStorageRungeKutta> {
    let params = SolverParameters {
        polynomial_order: 3,
        end_time: 0.1,
        dt_factor: 0.375,
        upwind_param: 1.0,
    };
    DgtdSolver::new(mesh, params, LegendreBasis, LowStorageRungeKutta::default()).unwrap()
}

fn pde() -> Advection {
    Advection::new(2.0 * PI, 1.0).unwrap()
}

fn assert_columns(actual: &FieldMatrix, expected: &[[f64; 4]; 3]) {
    assert_eq!(actual.n_nodes(), 4);
    assert_eq!(actual.n_elements(), 3);
    for (k, column) in expected.iter().enumerate() {
        for (i, &value) in column.iter().enumerate() {
            assert_relative_eq!(actual[(i, k)], value, epsilon = TOL, max_relative = TOL);
        }
    }
}

#[test]
fn test_node_coordinates() {
    let mesh = reference_mesh();
    let solver = reference_solver(&mesh);
    assert_columns(
        &solver.get_phys_node_coords(),
        &[
            [-3.0, -2.17082039324994, -0.829179606750063, 0.0],
            [0.0, 0.829179606750063, 2.17082039324994, 3.0],
            [3.0, 3.82917960675006, 5.17082039324994, 6.0],
        ],
    );
}

#[test]
fn test_initial_values() {
    let mesh = reference_mesh();
    let solver = reference_solver(&mesh);
    let u0 = pde().initial_values(&solver.get_phys_node_coords());
    assert_columns(
        &u0,
        &[
            [
                -0.141120008059867,
                -0.825322025727965,
                -0.737377459323434,
                0.0,
            ],
            [
                0.0,
                0.737377459323434,
                0.825322025727965,
                0.141120008059867,
            ],
            [
                0.141120008059867,
                -0.634674278057035,
                -0.896747766176097,
                -0.279415498198926,
            ],
        ],
    );
}

#[test]
fn test_geometry_and_time_step() {
    let mesh = reference_mesh();
    let solver = reference_solver(&mesh);

    for g in solver.get_geometric_factors() {
        assert_abs_diff_eq!(g, 2.0 / 3.0, epsilon = 1e-15);
    }
    assert_relative_eq!(
        solver.min_node_dist(),
        0.829179606750063,
        epsilon = TOL,
        max_relative = TOL
    );

    let step = solver.time_stepping();
    assert_eq!(step.num_steps, 3);
    assert_relative_eq!(solver.time_step(), 0.1 / 3.0, max_relative = TOL);
}

#[test]
fn test_initial_spatial_scheme() {
    let mesh = reference_mesh();
    let solver = reference_solver(&mesh);
    let pde = pde();
    let u0 = pde.initial_values(&solver.get_phys_node_coords());
    let ops = solver.operators();
    let rhs = pde.spatial_scheme(&u0, 0.0, &ops.dr, &ops.lift, &solver.get_geometric_factors());

    assert_columns(
        &rhs,
        &[
            [
                12.167543049968685,
                2.446349842261556,
                -3.153773753054189,
                -8.630423496005506,
            ],
            [
                -7.448179281084415,
                -3.682489439168079,
                2.975065528375442,
                7.438566190284294,
            ],
            [
                7.308717012932643,
                4.316208298798116,
                -2.208095660804580,
                -7.280070146609996,
            ],
        ],
    );
}

#[test]
fn test_solution_at_end_time() {
    let mesh = reference_mesh();
    let solver = reference_solver(&mesh);
    let mut recorder = MemoryRecorder::new();
    let u = solver.get_solution(&pde(), &mut recorder).unwrap();

    assert_columns(
        &u,
        &[
            [
                -0.40974408547688707,
                -0.4066630081297646,
                -0.9867362020687426,
                -0.5856772587953052,
            ],
            [
                -0.6381513776144263,
                0.23042733042769614,
                0.9691576508914713,
                0.7065927785219267,
            ],
            [
                0.7747571240696941,
                -0.08448832684200787,
                -0.9556124070700188,
                -0.799399161901477,
            ],
        ],
    );

    let times = recorder.times();
    assert_eq!(times.len(), 4);
    for (n, &t) in times.iter().enumerate() {
        assert_abs_diff_eq!(t, n as f64 * 0.1 / 3.0, epsilon = 1e-15);
    }
}

#[test]
fn test_queries_are_idempotent() {
    let mesh = reference_mesh();
    let solver = reference_solver(&mesh);
    assert_eq!(solver.get_phys_node_coords(), solver.get_phys_node_coords());
    assert_eq!(solver.get_geometric_factors(), solver.get_geometric_factors());
}

#[test]
fn test_gmsh_mesh_matches_uniform_mesh() {
    let mesh = read_gmsh_mesh(&data_file("three_elements.msh")).unwrap();
    let uniform = reference_mesh();
    assert_eq!(mesh.n_elements(), 3);
    for k in 0..3 {
        assert_eq!(mesh.elem_coords(k), uniform.elem_coords(k));
    }

    let config = SolverConfig::from_json_file(&data_file("advection.json")).unwrap();
    let from_file = solve(&mesh, &config, &mut MemoryRecorder::new()).unwrap();
    let from_uniform = solve(&uniform, &config, &mut MemoryRecorder::new()).unwrap();
    assert_eq!(from_file, from_uniform);
}

#[test]
fn test_text_output() {
    let out = tempfile::tempdir().unwrap();
    let mut recorder = TextRecorder::new(out.path()).unwrap();
    solve_files(
        &data_file("three_elements.msh"),
        &data_file("advection.json"),
        &mut recorder,
    )
    .unwrap();
    recorder.flush().unwrap();

    let times = fs::read_to_string(out.path().join("times.txt")).unwrap();
    assert_eq!(times.lines().count(), 4);

    let snapshots = fs::read_to_string(out.path().join("Advection.txt")).unwrap();
    let last: Vec<f64> = snapshots
        .lines()
        .last()
        .unwrap()
        .split_whitespace()
        .map(|v| v.parse().unwrap())
        .collect();
    assert_eq!(last.len(), 12);
    assert_relative_eq!(last[0], -0.40974408547688707, max_relative = TOL);

    let coords = fs::read_to_string(out.path().join("coordinates.txt")).unwrap();
    assert_eq!(coords.split_whitespace().count(), 12);
}
