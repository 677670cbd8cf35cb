use criterion::{Criterion, criterion_group, criterion_main};
use hedron::{BevelVertices, RemoveDoubles, Solidify, Subdivide, primitive};
use std::hint::black_box;

fn bench_subdivide(c: &mut Criterion) {
    let mut group = c.benchmark_group("subdivide");
    group.bench_function("box_3_iterations", |b| {
        b.iter(|| {
            let mut mesh = primitive::unit_box().unwrap();
            mesh.apply(&Subdivide { iterations: 3 }).unwrap();
            black_box(mesh);
        });
    });
    group.bench_function("grid_32x32", |b| {
        b.iter(|| {
            let mut mesh = primitive::quad_grid(32, 32).unwrap();
            mesh.apply(&Subdivide { iterations: 1 }).unwrap();
            black_box(mesh);
        });
    });
    group.finish();
}

fn bench_remove_doubles(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_doubles");
    group.bench_function("overlapping_boxes", |b| {
        b.iter(|| {
            let mut mesh = primitive::unit_box().unwrap();
            for _ in 0..16 {
                let other = primitive::unit_box().unwrap();
                mesh.append(&other);
            }
            mesh.apply(&RemoveDoubles::exact()).unwrap();
            black_box(mesh);
        });
    });
    group.bench_function("beveled_box", |b| {
        b.iter(|| {
            let mut mesh = primitive::unit_box().unwrap();
            mesh.apply(&Subdivide { iterations: 2 }).unwrap();
            mesh.apply(&BevelVertices { amount: 0.25 }).unwrap();
            mesh.apply(&RemoveDoubles::exact()).unwrap();
            black_box(mesh);
        });
    });
    group.finish();
}

fn bench_solidify(c: &mut Criterion) {
    let mut group = c.benchmark_group("solidify");
    group.bench_function("grid_64x64", |b| {
        b.iter(|| {
            let mut mesh = primitive::quad_grid(64, 64).unwrap();
            mesh.apply(&Solidify { thickness: 0.1 }).unwrap();
            black_box(mesh);
        });
    });
    group.finish();
}

criterion_group!(benches, bench_subdivide, bench_remove_doubles, bench_solidify);
criterion_main!(benches);
