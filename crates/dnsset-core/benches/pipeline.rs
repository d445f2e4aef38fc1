//! Extraction and pipeline benchmarks
//!
//! Run with: `cargo bench --bench pipeline`

use base64::{engine::general_purpose::STANDARD as B64, Engine};
use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dnsset_core::{extract, Pipeline};

const RULES: &[&str] = &[
    "||google.com",
    "|http://85.17.73.31/",
    "https://www.example.com/path?x=1",
    ".blogspot.com",
    "@@||safe.example.org",
    "!--------------Comment--------------",
    "||youtu.be^$important",
    "*.twimg.com",
];

/// Synthetic gfwlist-like feed with `n` distinct blocking rules
fn feed(n: usize) -> String {
    let mut text = String::from("[AutoProxy 0.2.9]\n! Synthetic feed\n");
    for i in 0..n {
        match i % 4 {
            0 => text.push_str(&format!("||host{i}.example.com^\n")),
            1 => text.push_str(&format!("https://www.site{i}.example.net/path\n")),
            2 => text.push_str(&format!(".cdn{i}.example.org\n")),
            _ => text.push_str(&format!("@@||host{}.example.com\n", i - 3)),
        }
    }
    text
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    group.throughput(Throughput::Elements(RULES.len() as u64));

    group.bench_function("mixed_rules", |b| {
        b.iter(|| {
            for rule in RULES {
                black_box(extract(black_box(rule)));
            }
        })
    });

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let pipeline = Pipeline::default();
    let created = Utc::now();

    let mut group = c.benchmark_group("pipeline");
    for size in [1_000, 10_000] {
        let plain = feed(size);
        let encoded = B64.encode(&plain);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("plain", size), &plain, |b, text| {
            b.iter(|| pipeline.run_at(black_box(text.as_bytes()), created))
        });
        group.bench_with_input(BenchmarkId::new("base64", size), &encoded, |b, text| {
            b.iter(|| pipeline.run_at(black_box(text.as_bytes()), created))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_extract, bench_pipeline);
criterion_main!(benches);
