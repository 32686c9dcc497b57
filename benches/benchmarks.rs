//! Performance benchmarks for fsearch
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fsearch::index::MemoryIndex;
use fsearch::query::{compile_query, CompileOptions};
use fsearch::search::{SearchEngine, SearchOptions};

/// Synthetic corpus: `count` files spread over 100 nested folders
fn create_benchmark_index(count: usize) -> MemoryIndex {
    let mut list = String::with_capacity(count * 48);
    for i in 0..count {
        list.push_str(&format!(
            "/home/user/projects/dir{:02}/sub{}/file_{:06}.{}\n",
            i % 100,
            i % 7,
            i,
            ["rs", "txt", "jpg", "md"][i % 4]
        ));
    }
    MemoryIndex::parse_path_list(&list).expect("Failed to build benchmark index")
}

fn bench_query_compile(c: &mut Criterion) {
    let queries = vec![
        ("literal", "file_0042", CompileOptions::default()),
        ("utf8", "文档", CompileOptions::default()),
        (
            "glob",
            "*.jpg",
            CompileOptions {
                enable_wildcards: true,
                ..Default::default()
            },
        ),
        (
            "regex",
            r"^file_[0-9]+\.rs$",
            CompileOptions {
                enable_regex: true,
                ..Default::default()
            },
        ),
        (
            "split",
            "dir12 sub3 rs",
            CompileOptions {
                split_terms: true,
                ..Default::default()
            },
        ),
    ];

    let mut group = c.benchmark_group("query_compile");
    for (name, query, options) in queries {
        group.bench_with_input(BenchmarkId::from_parameter(name), &query, |b, &q| {
            b.iter(|| compile_query(black_box(q), options))
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let index = create_benchmark_index(200_000);
    let engine = SearchEngine::with_threads(0).expect("Failed to build pool");

    let mut group = c.benchmark_group("search");
    group.sample_size(20);

    let cases = vec![
        ("name_literal", "file_0042", SearchOptions::default()),
        (
            "name_glob",
            "*.jpg",
            SearchOptions {
                enable_wildcards: true,
                ..Default::default()
            },
        ),
        (
            "name_regex",
            r"^file_[0-9]+7\.rs$",
            SearchOptions {
                enable_regex: true,
                ..Default::default()
            },
        ),
        ("auto_path", "dir42/sub3", SearchOptions::default()),
        (
            "forced_path",
            "projects",
            SearchOptions {
                force_search_in_path: true,
                limit: 1000,
                ..Default::default()
            },
        ),
        ("empty_query", "", SearchOptions::default()),
    ];

    for (name, query, options) in cases {
        group.bench_function(name, |b| {
            b.iter(|| engine.search(&index, black_box(query), &options))
        });
    }
    group.finish();
}

fn bench_worker_scaling(c: &mut Criterion) {
    let index = create_benchmark_index(200_000);
    let options = SearchOptions::default();

    let mut group = c.benchmark_group("worker_scaling");
    group.sample_size(20);
    for threads in [1, 2, 4, 8] {
        let engine = SearchEngine::with_threads(threads).expect("Failed to build pool");
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, _| {
            b.iter(|| engine.search(&index, black_box("file_1"), &options))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_query_compile, bench_search, bench_worker_scaling);

criterion_main!(benches);
