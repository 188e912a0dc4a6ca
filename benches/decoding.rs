use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use serde_record::{
    decode, decode_with, from_str, from_str_with_options, to_string, ParseOptions, Record,
};

#[derive(Serialize, Deserialize, Clone)]
struct Reading {
    sensor: String,
    value: i64,
    scale: f64,
    ok: bool,
}

fn readings(size: u32) -> Vec<Reading> {
    (0..size)
        .map(|i| Reading {
            sensor: format!("sensor-{}", i),
            value: i64::from(i) * 7,
            scale: 0.5 + f64::from(i),
            ok: i % 3 != 0,
        })
        .collect()
}

fn benchmark_decode_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_record");
    let relaxed = ParseOptions::relaxed();

    group.bench_function("strict", |b| {
        b.iter(|| decode(black_box(r#"{"val": 5}"#)))
    });
    group.bench_function("relaxed_quoted", |b| {
        b.iter(|| decode_with(black_box(r#"{"val": 5}"#), &relaxed))
    });
    group.bench_function("relaxed_unquoted", |b| {
        b.iter(|| decode_with(black_box("{val: 5}"), &relaxed))
    });
    group.bench_function("strict_with_extra_members", |b| {
        b.iter(|| decode(black_box(r#"{"id": 9, "tags": ["a", "b"], "val": 5}"#)))
    });

    group.finish();
}

fn benchmark_decode_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_array");
    let relaxed = ParseOptions::relaxed();

    for size in [10, 100, 1000].iter() {
        let text = to_string(&readings(*size)).unwrap();

        group.bench_with_input(BenchmarkId::new("strict", size), &text, |b, text| {
            b.iter(|| from_str::<Vec<Reading>>(black_box(text)))
        });
        group.bench_with_input(BenchmarkId::new("relaxed", size), &text, |b, text| {
            b.iter(|| from_str_with_options::<Vec<Reading>>(black_box(text), &relaxed))
        });
    }
    group.finish();
}

fn benchmark_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    let record = Record::new(5);
    group.bench_function("record", |b| b.iter(|| to_string(black_box(&record))));

    let data = readings(100);
    group.bench_function("readings_100", |b| b.iter(|| to_string(black_box(&data))));

    group.finish();
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let mut group = c.benchmark_group("comparison");
    let text = to_string(&readings(100)).unwrap();

    group.bench_function("serde_record_decode", |b| {
        b.iter(|| from_str::<Vec<Reading>>(black_box(&text)))
    });
    group.bench_function("serde_json_decode", |b| {
        b.iter(|| serde_json::from_str::<Vec<Reading>>(black_box(&text)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_decode_record,
    benchmark_decode_array,
    benchmark_encode,
    benchmark_comparison_with_json
);
criterion_main!(benches);
