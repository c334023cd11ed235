//! Benchmarks for WIF rendering.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use wmdf_draft::DraftModel;
use wmdf_wif::{ConvertOptions, WifConfig, render, render_all};

#[path = "../tests/common/mod.rs"]
mod common;

use common::{FileBuilder, as_rows, straight_draw};

fn synthetic_draft(threads: usize, shafts: usize) -> DraftModel {
    let threading = straight_draw(shafts, threads);
    let pegplan: Vec<Vec<usize>> = (0..threads)
        .map(|i| vec![i % shafts, (i + 3) % shafts])
        .collect();
    let warp_colors: Vec<i8> = (0..threads).map(|i| (i % 5) as i8 + 2).collect();

    let data = FileBuilder::new()
        .swatch([65535, 0, 0], "Red")
        .swatch([0, 65535, 0], "Green")
        .swatch([0, 0, 65535], "Blue")
        .wide_grid(b't', 16, &as_rows(&threading))
        .wide_grid(b'p', 16, &as_rows(&pegplan))
        .indices(b's', &warp_colors)
        .text(b'T', "y")
        .indices(b'C', &[2, 5, 0, 0, 5, 0, 0, 2, 3, 4, 2, 3, 4, 3, 2, 4, 3, 3, 2, 3, 2, 3, 2, 3, 2, 3, 2])
        .build();
    DraftModel::parse(&data, "bench.wmdf").unwrap()
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for threads in [64, 512, 4096] {
        let draft = synthetic_draft(threads, 96);
        group.throughput(Throughput::Elements(threads as u64));
        group.bench_with_input(BenchmarkId::new("liftplan", threads), &draft, |b, draft| {
            b.iter(|| render(black_box(draft), &ConvertOptions::new()));
        });
        group.bench_with_input(BenchmarkId::new("all_colorways", threads), &draft, |b, draft| {
            b.iter(|| render_all(black_box(draft), &WifConfig::DEFAULT));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
