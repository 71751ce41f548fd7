//! Benchmarks for the pure hot paths: sanitization and unit conversion.

use criterion::{criterion_group, criterion_main, Criterion};
use linkwatch::models::{throughput_mbps, ProbeResult};
use linkwatch::sanitize::sanitize;
use linkwatch::types::ProbeKind;
use std::hint::black_box;
use std::time::Duration;

fn bench_sanitize(c: &mut Criterion) {
    let results = vec![
        ProbeResult::ok(ProbeKind::Download, 95.37),
        ProbeResult::ok(ProbeKind::Upload, 12.5),
        ProbeResult::ok(ProbeKind::Latency, 42.0),
    ];

    c.bench_function("sanitize_batch", |b| {
        b.iter(|| sanitize(black_box(&results)))
    });
}

fn bench_throughput_conversion(c: &mut Criterion) {
    c.bench_function("throughput_mbps", |b| {
        b.iter(|| throughput_mbps(black_box(25_000_000), black_box(Duration::from_secs(2))))
    });
}

criterion_group!(benches, bench_sanitize, bench_throughput_conversion);
criterion_main!(benches);
