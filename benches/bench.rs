//! Criterion benchmarks for the temu retrieval methods.
//!
//! Covers normalization (with a cold and a warm stem cache), the two
//! ranking methods, boolean retrieval, regex matching and k-means
//! clustering.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use temu::analysis::{Normalizer, NormalizerConfig};
use temu::cluster::{ClusterEngine, KMeansConfig};
use temu::document::Document;
use temu::query::{BooleanSearcher, regex_search};
use temu::ranking::{Bm25Config, Bm25Ranker, VectorSpaceRanker};

/// Generate test documents for benchmarking.
fn generate_test_documents(count: usize) -> Vec<Document> {
    let words = [
        "kucing", "anjing", "makan", "ikan", "memakan", "berlari", "pelari", "rumah",
        "perumahan", "mobil", "balap", "kecepatan", "jalan", "berjalan", "sekolah",
        "bersekolah", "guru", "pengajar", "mengajar", "buku", "membaca", "bacaan",
        "the", "cat", "dog", "search", "engine", "yang", "dan", "di",
    ];

    let contents: Vec<String> = (0..count)
        .map(|i| {
            let doc_length = 20 + (i % 40); // Variable length documents
            (0..doc_length)
                .map(|j| words[(i * 7 + j * 13) % words.len()]) // Pseudo-random distribution
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();

    Document::from_contents(contents)
}

fn normalizer() -> Arc<Normalizer> {
    Arc::new(Normalizer::new(NormalizerConfig::default()).unwrap())
}

/// Benchmark tokenization, stop word removal and stemming.
fn bench_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalization");
    let documents = generate_test_documents(100);

    group.throughput(Throughput::Elements(100));
    group.bench_function("normalize_cold_cache", |b| {
        b.iter_with_setup(normalizer, |normalizer| {
            for doc in &documents {
                black_box(normalizer.normalize(black_box(&doc.content)));
            }
        })
    });

    let warm = normalizer();
    for doc in &documents {
        warm.normalize(&doc.content);
    }
    group.bench_function("normalize_warm_cache", |b| {
        b.iter(|| {
            for doc in &documents {
                black_box(warm.normalize(black_box(&doc.content)));
            }
        })
    });

    group.finish();
}

/// Benchmark VSM and BM25 ranking.
fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking");
    let normalizer = normalizer();
    let documents = generate_test_documents(200);

    let vsm = VectorSpaceRanker::new(Arc::clone(&normalizer));
    group.bench_function("vsm_rank", |b| {
        b.iter(|| black_box(vsm.rank(black_box("kucing makan ikan"), &documents)))
    });

    let bm25 = Bm25Ranker::new(Arc::clone(&normalizer), Bm25Config::default());
    group.bench_function("bm25_rank", |b| {
        b.iter(|| black_box(bm25.rank(black_box("kucing makan ikan"), &documents)))
    });

    group.finish();
}

/// Benchmark boolean and regex retrieval.
fn bench_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("matching");
    let documents = generate_test_documents(200);

    let boolean = BooleanSearcher::new(normalizer());
    group.bench_function("boolean_search", |b| {
        b.iter(|| {
            black_box(
                boolean
                    .search(black_box("(kucing OR anjing) AND NOT mobil"), &documents)
                    .unwrap(),
            )
        })
    });

    group.bench_function("regex_search", |b| {
        b.iter(|| black_box(regex_search(black_box(r"ber\w+"), &documents).unwrap()))
    });

    group.finish();
}

/// Benchmark k-means clustering.
fn bench_clustering(c: &mut Criterion) {
    let mut group = c.benchmark_group("clustering");
    group.sample_size(20);

    let documents = generate_test_documents(100);
    let engine = ClusterEngine::new(
        normalizer(),
        KMeansConfig {
            seed: Some(42),
            ..KMeansConfig::default()
        },
    );

    group.bench_function("kmeans_k4", |b| {
        b.iter(|| black_box(engine.cluster_k(black_box(4), &documents).unwrap()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_normalization,
    bench_ranking,
    bench_matching,
    bench_clustering
);

criterion_main!(benches);
