//! Criterion benchmarks for whole-buffer compression and decompression.
//!
//! Run with:
//!   cargo bench --bench codec
//!
//! Optionally set ORZ_BENCH_CORPUS_DIR for real-world corpus data.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use orz::{compress, decompress, LzCfg, LEVEL_MAX};

mod corpus {
    include!("corpus.rs");
}

const CHUNK_SIZE: usize = 1 << 20;

fn bench_compress_levels(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");
    group.sample_size(10);

    for (name, chunk) in corpus::corpus_chunks(CHUNK_SIZE) {
        group.throughput(Throughput::Bytes(chunk.len() as u64));
        for level in 0..=LEVEL_MAX {
            let cfg = LzCfg::from_level(level).unwrap_or_default();
            group.bench_with_input(
                BenchmarkId::new(format!("{}/level", name), level),
                &chunk,
                |b, chunk| b.iter(|| compress(chunk, &cfg)),
            );
        }
    }
    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");

    for (name, chunk) in corpus::corpus_chunks(CHUNK_SIZE) {
        let packed = compress(&chunk, &LzCfg::default());
        group.throughput(Throughput::Bytes(chunk.len() as u64));
        group.bench_with_input(BenchmarkId::new("default", name), &packed, |b, packed| {
            b.iter(|| decompress(packed).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compress_levels, bench_decompress);
criterion_main!(benches);
