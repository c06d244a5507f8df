use criterion::{Criterion, black_box, criterion_group, criterion_main};
use zenbmp::*;

fn noise_rgb(width: u32, height: u32) -> Bitmap<RGB8> {
    let mut state = 0x9E37_79B9u32;
    let pixels = (0..width * height)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let [r, g, b, _] = state.to_le_bytes();
            RGB8::new(r, g, b)
        })
        .collect();
    Bitmap::from_pixels(width, height, pixels).unwrap()
}

fn codec(c: &mut Criterion) {
    let bitmap = noise_rgb(641, 480);
    let encoded = bitmap.encode().unwrap();

    c.bench_function("decode 641x480 rgb", |b| {
        b.iter(|| decode(black_box(&encoded)).unwrap())
    });
    c.bench_function("encode 641x480 rgb", |b| {
        b.iter(|| black_box(&bitmap).encode().unwrap())
    });
}

fn transforms(c: &mut Criterion) {
    let image: Image = noise_rgb(641, 480).into();

    c.bench_function("rotate 90 641x480 rgb", |b| {
        b.iter(|| {
            let mut image = image.clone();
            image.rotate(90).unwrap();
            image
        })
    });
    c.bench_function("resize_image 641x480 -> 320x240 rgb", |b| {
        b.iter(|| {
            let mut image = image.clone();
            image.resize_image(320, 240).unwrap();
            image
        })
    });
    c.bench_function("grey_scale 641x480 rgb", |b| {
        b.iter(|| {
            let mut image = image.clone();
            image.to_grey_scale(16).unwrap();
            image
        })
    });
}

criterion_group!(benches, codec, transforms);
criterion_main!(benches);
