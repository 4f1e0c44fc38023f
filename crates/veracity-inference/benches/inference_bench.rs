//! Per-primitive benchmarks.
//!
//! Run with: cargo bench --package veracity-inference

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array1;
use veracity_bench::fixtures::{generate_crowd, FixtureSize};
use veracity_inference::{
    expected_lower_bound, gradients, lower_bound, posterior, softplus_array, Prior,
};

fn bench_softplus(c: &mut Criterion) {
    let x = Array1::linspace(-40.0, 40.0, 100_000);
    c.bench_function("softplus_100k", |b| b.iter(|| softplus_array(black_box(x.view()))));
}

fn bench_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitives");
    for size in [FixtureSize::Small, FixtureSize::Medium] {
        let crowd = generate_crowd(size, 42);
        let (alpha, beta, labels) = (crowd.alpha.view(), crowd.beta.view(), crowd.labels.view());
        let q = posterior(alpha, beta, labels, Prior::default()).unwrap();
        let n = crowd.n_items();

        group.bench_with_input(BenchmarkId::new("posterior", n), &n, |b, _| {
            b.iter(|| posterior(alpha, beta, labels, Prior::default()).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("gradients", n), &n, |b, _| {
            b.iter(|| gradients(alpha, beta, labels, q.view()).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("lower_bound_masked", n), &n, |b, _| {
            b.iter(|| lower_bound(alpha, beta, labels, q.view()).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("lower_bound_full", n), &n, |b, _| {
            b.iter(|| expected_lower_bound(alpha, beta, labels, q.view(), Prior::default()).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_softplus, bench_primitives);
criterion_main!(benches);
