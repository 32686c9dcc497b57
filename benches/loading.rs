//! Path list loading benchmarks.
//!
//! Run with: `cargo bench --bench loading`
//! Save baseline: `cargo bench --bench loading -- --save-baseline main`
//! Compare: `cargo bench --bench loading -- --baseline main`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fsearch::index::{EntryIndex, IndexEntry, MemoryIndex};
use std::fs;
use tempfile::TempDir;

fn path_list(count: usize) -> String {
    let mut list = String::with_capacity(count * 48);
    for d in 0..(count / 100).max(1) {
        list.push_str(&format!("/srv/data/d{:04}/\n", d));
    }
    for i in 0..count {
        list.push_str(&format!("/srv/data/d{:04}/entry_{:07}.bin\n", i / 100, i));
    }
    list
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_path_list");
    for count in [10_000usize, 100_000] {
        let list = path_list(count);
        group.throughput(Throughput::Bytes(list.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &list, |b, list| {
            b.iter(|| MemoryIndex::parse_path_list(black_box(list)))
        });
    }
    group.finish();
}

fn bench_load_file(c: &mut Criterion) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("paths.txt");
    fs::write(&path, path_list(100_000)).expect("Failed to write path list");

    c.bench_function("load_file_100k", |b| b.iter(|| MemoryIndex::load(black_box(&path))));
}

fn bench_full_path(c: &mut Criterion) {
    let index = MemoryIndex::parse_path_list(&path_list(10_000)).expect("Failed to parse");
    let mut buf = String::with_capacity(256);

    c.bench_function("write_full_path_10k", |b| {
        b.iter(|| {
            for id in 0..index.len() {
                if let Some(entry) = index.get(id) {
                    let _ = entry.write_full_path(black_box(&mut buf));
                }
            }
        })
    });
}

criterion_group!(benches, bench_parse, bench_load_file, bench_full_path);
criterion_main!(benches);
