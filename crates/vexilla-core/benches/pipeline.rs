//! Benchmarks for the Vexilla pipelines.
//!
//! Run with: cargo bench -p vexilla-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, Rgb, RgbImage};
use vexilla_core::config::ThumbnailConfig;
use vexilla_core::pipeline::{ColorAverager, ImageDecoder, ThumbnailGenerator};

/// A 1024px-wide flag-like image with three horizontal stripes.
fn striped_flag() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(1024, 538, |_, y| match y * 3 / 538 {
        0 => Rgb([178, 34, 52]),
        1 => Rgb([255, 255, 255]),
        _ => Rgb([60, 59, 110]),
    }))
}

fn benchmark_average(c: &mut Criterion) {
    let img = striped_flag();
    let averager = ColorAverager::new();

    c.bench_function("average_1024", |b| {
        b.iter(|| averager.average(black_box(&img)))
    });
}

fn benchmark_thumbnail(c: &mut Criterion) {
    let img = striped_flag();
    let generator = ThumbnailGenerator::new(ThumbnailConfig::default());

    c.bench_function("thumbnail_128px", |b| {
        b.iter(|| generator.generate(black_box(&img)))
    });

    let canvas = generator.generate(&img);
    c.bench_function("thumbnail_encode_png", |b| {
        b.iter(|| generator.encode(black_box(&canvas)))
    });
}

fn benchmark_decode(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flag.png");
    striped_flag().save(&path).unwrap();
    let decoder = ImageDecoder::new();

    c.bench_function("decode_png_1024", |b| {
        b.iter(|| decoder.decode(black_box(&path)))
    });
}

criterion_group!(
    benches,
    benchmark_average,
    benchmark_thumbnail,
    benchmark_decode,
);
criterion_main!(benches);
