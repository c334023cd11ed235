//! Benchmarks for draft parsing.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use wmdf_draft::DraftModel;

#[path = "../tests/common/mod.rs"]
mod common;

use common::{FileBuilder, as_rows, straight_draw};

/// A wide-loom draft with `threads` warps and as many picks.
fn synthetic_draft(threads: usize, shafts: usize) -> Vec<u8> {
    let threading = straight_draw(shafts, threads);
    let treadling: Vec<Vec<usize>> = (0..threads).map(|i| vec![(threads - i) % shafts]).collect();
    let tieup: Vec<Vec<usize>> = (0..shafts).map(|s| vec![s, (s + 1) % shafts]).collect();
    let warp_colors: Vec<i8> = (0..threads).map(|i| (i % 3) as i8 + 2).collect();
    let weft_colors: Vec<i8> = (0..threads).map(|i| (i % 2) as i8 + 2).collect();

    FileBuilder::new()
        .swatch([65535, 0, 0], "Red")
        .swatch([0, 65535, 0], "Green")
        .swatch([0, 0, 65535], "Blue")
        .text(b'n', "Benchmark")
        .text(b'D', "1034")
        .wide_grid(b't', 28, &as_rows(&threading))
        .wide_grid(b'r', 28, &as_rows(&treadling))
        .wide_grid(b'u', 28, &as_rows(&tieup))
        .indices(b's', &warp_colors)
        .indices(b'q', &weft_colors)
        .indices(b'C', &[2, 3, 0, 0, 2, 0, 0, 2, 3, 4, 2, 3, 4, 3, 2, 4, 3])
        .build()
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for threads in [64, 512, 4096] {
        let data = synthetic_draft(threads, 24);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("wide", threads), &data, |b, data| {
            b.iter(|| DraftModel::parse(black_box(data), "bench.wmdf"));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
