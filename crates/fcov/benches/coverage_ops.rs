//! Coverage Operations Benchmarks
//!
//! Benchmarks for bin registration, value generation and hit tracking.
//!
//! Run with: `cargo bench --bench coverage_ops`

#![allow(clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fcov::{bin_range, bin_transition, CoverageConfig, CoveragePoint};

fn point_with_bins(num_bins: u32) -> CoveragePoint {
    let config = CoverageConfig::builder()
        .seed(12345)
        .log_calls(false)
        .build()
        .unwrap();
    let mut point = CoveragePoint::with_config(config).unwrap();
    point
        .add_bins(&bin_range(0, 100_000, num_bins).unwrap())
        .unwrap();
    point.add_bins(&bin_transition(&[1, 2, 3, 4]).unwrap()).unwrap();
    point
}

fn bench_rand(c: &mut Criterion) {
    let mut group = c.benchmark_group("rand");

    for num_bins in [10, 100, 900] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_bins", num_bins)),
            &num_bins,
            |bench, &n| {
                let mut point = point_with_bins(n);
                bench.iter(|| black_box(point.rand().unwrap()));
            },
        );
    }

    group.finish();
}

fn bench_sample_coverage(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_coverage");

    for num_bins in [10, 100, 900] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_bins", num_bins)),
            &num_bins,
            |bench, &n| {
                let mut point = point_with_bins(n);
                let mut value = 0_i64;
                bench.iter(|| {
                    value = (value + 7919) % 100_000;
                    point.sample_coverage(black_box(value));
                });
            },
        );
    }

    group.finish();
}

fn bench_closure_campaign(c: &mut Criterion) {
    c.bench_function("closure_campaign_100_bins", |bench| {
        bench.iter(|| {
            let mut point = point_with_bins(100);
            while !point.coverage_completed() {
                let value = point.rand().unwrap();
                point.sample_coverage(value);
            }
            black_box(point.coverage(fcov::CoverageMetric::Hits))
        });
    });
}

criterion_group!(
    benches,
    bench_rand,
    bench_sample_coverage,
    bench_closure_campaign
);
criterion_main!(benches);
