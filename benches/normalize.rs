//! Benchmarks for blacklist normalization.

use blacklist::store::{normalize_lines, BlacklistStore};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use tempfile::TempDir;

/// Generate addresses with roughly one duplicate in four
fn generate_lines(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let i = if i % 4 == 3 { i - 1 } else { i };
            format!("{}.{}.{}.{}", 10 + i % 200, (i / 256) % 256, (i / 7) % 256, i % 256)
        })
        .collect()
}

fn bench_normalize_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_lines");

    for size in [100, 1000, 10000, 50000] {
        let lines = generate_lines(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &lines, |b, lines| {
            b.iter(|| normalize_lines(black_box(lines.clone())))
        });
    }

    group.finish();
}

fn bench_normalize_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_file");
    let temp_dir = TempDir::new().unwrap();

    for size in [1000, 10000] {
        let path = temp_dir.path().join(format!("blacklist-{}", size));
        let content = generate_lines(size).join("\n") + "\n";
        let store = BlacklistStore::new(&path);

        group.bench_with_input(BenchmarkId::from_parameter(size), &content, |b, content| {
            b.iter(|| {
                std::fs::write(&path, content).unwrap();
                store.normalize().unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize_lines, bench_normalize_file);
criterion_main!(benches);
