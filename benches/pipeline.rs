use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgba, RgbaImage};
use rand::{rngs::StdRng, SeedableRng};

use spooky_booth::assembly::{PrintSheet, StripAssembler};
use spooky_booth::effects::swirl::swirl_crop;

fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x ^ y) % 256) as u8, 255])
    })
}

fn bench_swirl(c: &mut Criterion) {
    let face = gradient(240, 300);
    c.bench_function("swirl_crop 240x300", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| swirl_crop(black_box(&face), 1.0, &mut rng))
    });
}

fn bench_strip(c: &mut Criterion) {
    let photos: Vec<RgbaImage> = (0..4).map(|_| gradient(1280, 720)).collect();
    let assembler = StripAssembler::new(Rgba([0, 0, 0, 255]));

    c.bench_function("assemble 4x 1280x720", |b| {
        b.iter(|| assembler.assemble(black_box(&photos)))
    });

    let strip = match assembler.assemble(&photos) {
        Ok(strip) => strip,
        Err(e) => panic!("strip assembly failed: {}", e),
    };
    c.bench_function("print sheet", |b| {
        b.iter(|| PrintSheet::compose(black_box(&strip), Rgba([255, 255, 255, 255])))
    });
}

criterion_group!(benches, bench_swirl, bench_strip);
criterion_main!(benches);
