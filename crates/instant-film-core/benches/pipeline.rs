//! Benchmarks for the instant film pipeline.
//!
//! Run with: cargo bench -p instant-film-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::Rgba;
use instant_film_core::{EffectStack, FilmProcessor, ProcessingRequest, RasterImage, Resampler};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn photo(width: u32, height: u32) -> RasterImage {
    RasterImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    })
}

fn benchmark_resample(c: &mut Criterion) {
    let img = photo(1920, 1080);

    c.bench_function("resample_1080p", |b| {
        b.iter(|| {
            let _ = Resampler::resize(black_box(&img), 1920, 1080);
        })
    });
}

fn benchmark_effect_stack(c: &mut Criterion) {
    let img = photo(1024, 768);
    let stack = EffectStack::monochrome(false);
    let mut rng = StdRng::seed_from_u64(42);

    c.bench_function("effect_stack_1024x768", |b| {
        b.iter(|| {
            let mut frame = img.clone();
            stack.apply(black_box(&mut frame), &mut rng);
        })
    });
}

fn benchmark_process(c: &mut Criterion) {
    let img = photo(640, 480);
    let mut rng = StdRng::seed_from_u64(42);

    c.bench_function("process_640x480", |b| {
        b.iter(|| {
            let request = ProcessingRequest::new("bench.jpg", img.clone(), false);
            let _ = FilmProcessor::process_with_rng(black_box(request), &mut rng);
        })
    });
}

criterion_group!(
    benches,
    benchmark_resample,
    benchmark_effect_stack,
    benchmark_process,
);
criterion_main!(benches);
