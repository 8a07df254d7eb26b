//! Criterion microbenches for the quiver engine (group "quiver").
//!
//! - Exchange-matrix rebuild with principal laminations on random
//!   triangulations (8, 16, 32 vertices).
//! - `express_target` across the polygon on a fan (6, 8, 10 vertices).
//! - Random flip walks.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use cluster_algebra::api::*;

fn principal_random(n: usize, seed: u64) -> Quiver {
    let mut q = Quiver::new(n).unwrap();
    random_flips(&mut q, 4 * n, FlipReplay { seed, index: 0 }).unwrap();
    Quiver::from_parts(n, q.clusters().to_vec(), Vec::new(), true).unwrap()
}

fn bench_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("quiver");
    for n in [8usize, 16, 32] {
        let q = principal_random(n, 42);
        group.bench_with_input(BenchmarkId::new("exchange_matrix", n), &q, |b, q| {
            b.iter(|| q.exchange_matrix())
        });
    }
    group.finish();
}

fn bench_express(c: &mut Criterion) {
    let mut group = c.benchmark_group("quiver");
    group.sample_size(20);
    for n in [6usize, 8, 10] {
        let q = Quiver::new(n).unwrap();
        group.bench_with_input(BenchmarkId::new("express_target", n), &q, |b, q| {
            b.iter(|| q.express_target(0, n - 2).unwrap())
        });
    }
    group.finish();
}

fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("quiver");
    group.bench_function(BenchmarkId::new("random_flips", "n=16,steps=64"), |b| {
        b.iter_batched(
            || (Quiver::new(16).unwrap(), FlipReplay { seed: 7, index: 0 }),
            |(mut q, tok)| random_flips(&mut q, 64, tok).unwrap(),
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_matrix, bench_express, bench_walk);
criterion_main!(benches);
