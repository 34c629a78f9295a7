//! Benchmarks for the encoding hot paths: collection assembly and
//! coverage document serialization.

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use edr_core::{build_collection, CollectionConfig, Coverage, Domain};

fn bench_collection_assembly(c: &mut Criterion) {
    let config = CollectionConfig::demo();

    c.bench_function("build_collection", |b| {
        b.iter(|| {
            let collection = build_collection(black_box(&config), "http://localhost:8080");
            black_box(collection)
        })
    });
}

fn bench_coverage_encoding(c: &mut Criterion) {
    let instants: Vec<_> = (0..48)
        .map(|h| Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::hours(h))
        .collect();
    let values: Vec<f32> = (0..48).map(|i| -20.0 + 0.1 * i as f32).collect();

    let coverage = Coverage::new(Domain::point_series(11.0, 60.0, &instants, Some(100000.0)))
        .with_series("air_temperature", values)
        .unwrap();

    c.bench_function("serialize_coverage_48h", |b| {
        b.iter(|| serde_json::to_string(black_box(&coverage)).unwrap())
    });
}

criterion_group!(benches, bench_collection_assembly, bench_coverage_encoding);
criterion_main!(benches);
