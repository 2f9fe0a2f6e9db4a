//! Benchmarks for element operator construction and the spatial scheme.
//!
//! Run with: `cargo bench --bench operators_bench`
//!
//! Benchmarks building Dr and LIFT at various polynomial orders, and one
//! evaluation of the advection right-hand side at various mesh sizes.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use dgtd::equations::{Advection, Pde};
use dgtd::mesh::Mesh1D;
use dgtd::operators::{ElementOperators, GeometricOperations};
use dgtd::solver::FieldMatrix;
use dgtd::LegendreBasis;
use std::f64::consts::PI;

/// Benchmark construction of the reference operators.
fn bench_element_operators(c: &mut Criterion) {
    let mut group = c.benchmark_group("element_operators");

    for order in [1, 3, 5, 8] {
        group.bench_with_input(BenchmarkId::new("legendre", order), &order, |b, &order| {
            b.iter(|| ElementOperators::new(&LegendreBasis, black_box(order)));
        });
    }

    group.finish();
}

/// Benchmark one evaluation of the advection right-hand side.
fn bench_spatial_scheme(c: &mut Criterion) {
    let mut group = c.benchmark_group("spatial_scheme");
    let pde = Advection::new(2.0 * PI, 1.0).unwrap();

    for n_elements in [16, 128, 1024] {
        let mesh = Mesh1D::uniform(0.0, 2.0 * PI, n_elements).unwrap();
        let ops = ElementOperators::new(&LegendreBasis, 3).unwrap();
        let geom = GeometricOperations::new(&mesh);
        let geo = geom.geometric_factors(&mesh.all_elements());
        let u = FieldMatrix::from_fn(ops.n_nodes, n_elements, |i, k| {
            geom.convert_ref_to_phys(ops.nodes[i], k).sin()
        });

        group.bench_with_input(
            BenchmarkId::new("advection_p3", format!("{}_elements", n_elements)),
            &n_elements,
            |b, _| {
                b.iter(|| {
                    pde.spatial_scheme(
                        black_box(&u),
                        black_box(0.1),
                        &ops.dr,
                        &ops.lift,
                        &geo,
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_element_operators, bench_spatial_scheme);
criterion_main!(benches);
