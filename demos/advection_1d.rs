//! 1D advection example using DG.
//!
//! Solves du/dt + a * du/dx = 0 on [0, 2π] with:
//! - Initial condition: u(x, 0) = sin(x)
//! - Advection velocity: a = 2π
//! - Inflow BC u(0, t) = -sin(a t) at left, outflow at right
//!
//! After time t, exact solution is u(x, t) = sin(x - a*t)

use dgtd::equations::Advection;
use dgtd::io::MemoryRecorder;
use dgtd::{DgtdSolver, LegendreBasis, LowStorageRungeKutta, Mesh1D, SolverParameters};
use std::f64::consts::PI;

fn main() -> dgtd::Result<()> {
    // Parameters
    let order = 3; // P3 (4th order accuracy)
    let n_elements = 20;
    let x_min = 0.0;
    let x_max = 2.0 * PI;
    let a = 2.0 * PI;
    let t_final = 1.0; // One period

    println!("1D DG Advection Solver");
    println!("======================");
    println!("Order: P{}", order);
    println!("Elements: {}", n_elements);
    println!("Domain: [{}, {:.4}]", x_min, x_max);
    println!("Advection velocity: {:.4}", a);
    println!("Final time: {}", t_final);
    println!();

    let mesh = Mesh1D::uniform(x_min, x_max, n_elements)?;
    let params = SolverParameters {
        polynomial_order: order,
        end_time: t_final,
        dt_factor: 0.375,
        upwind_param: 1.0,
    };
    let solver = DgtdSolver::new(&mesh, params, LegendreBasis, LowStorageRungeKutta::default())?;
    let pde = Advection::new(a, 1.0)?;

    let ops = solver.operators();
    println!("Nodes per element: {}", ops.n_nodes);
    println!("Total DOFs: {}", n_elements * ops.n_nodes);

    let step = solver.time_stepping();
    println!("Time step: {:.4e}", step.dt);
    println!("Number of steps: {}", step.num_steps);
    println!();

    let mut recorder = MemoryRecorder::new();
    let u = solver.get_solution(&pde, &mut recorder)?;

    let coords = solver.get_phys_node_coords();
    let mass = ops.mass_matrix()?;
    let geo = solver.get_geometric_factors();

    // Errors of the recorded snapshots
    if let Some(snapshots) = recorder.field("Advection") {
        let stride = (snapshots.len() / 5).max(1);
        for (n, (snapshot, &t)) in snapshots.iter().zip(recorder.times()).enumerate() {
            if n % stride == 0 || n + 1 == snapshots.len() {
                let error = snapshot.l2_error(&coords, &mass, &geo, |x| pde.exact_solution(x, t));
                println!(
                    "Step {:5} / {:5}: t = {:.4}, L2 error = {:.4e}",
                    n, step.num_steps, t, error
                );
            }
        }
    }

    // Final error
    println!();
    let final_error = u.l2_error(&coords, &mass, &geo, |x| pde.exact_solution(x, t_final));
    let linf_error = u.linf_error(&coords, |x| pde.exact_solution(x, t_final));

    println!("Final L2 error:   {:.4e}", final_error);
    println!("Final L∞ error:   {:.4e}", linf_error);
    Ok(())
}
