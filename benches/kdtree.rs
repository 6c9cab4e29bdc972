use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use kd_index::{HyperRect, KDTree};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstar::RTree;
use std::hint::black_box;

fn generate_points(n: usize, seed: u64) -> Vec<[f64; 3]> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            [
                rng.gen_range(0.0..1.0),
                rng.gen_range(0.0..1.0),
                rng.gen_range(0.0..1.0),
            ]
        })
        .collect()
}

fn build_kdtree(points: &[[f64; 3]]) -> KDTree<f64> {
    let bounds = HyperRect::<f64>::new([0.; 3], [1.; 3]).unwrap();
    KDTree::build(points.iter().copied(), bounds).unwrap()
}

fn benchmark_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");
    for size in [1_000, 100_000] {
        let points = generate_points(size, 42);

        group.bench_with_input(BenchmarkId::new("kd-index", size), &size, |b, _| {
            b.iter(|| build_kdtree(&points))
        });

        group.bench_with_input(BenchmarkId::new("rstar", size), &size, |b, _| {
            b.iter(|| RTree::bulk_load(points.clone()))
        });
    }
    group.finish();
}

fn benchmark_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest");
    for size in [1_000, 100_000] {
        let points = generate_points(size, 42);
        let tree = build_kdtree(&points);
        let rtree = RTree::bulk_load(points.clone());
        let targets = generate_points(1_000, 7);

        group.bench_with_input(BenchmarkId::new("kd-index", size), &size, |b, _| {
            b.iter(|| {
                for target in targets.iter() {
                    black_box(tree.nearest(target).unwrap());
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("rstar", size), &size, |b, _| {
            b.iter(|| {
                for target in targets.iter() {
                    black_box(rtree.nearest_neighbor(target));
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_construction, benchmark_nearest);
criterion_main!(benches);
