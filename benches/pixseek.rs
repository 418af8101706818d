use criterion::{criterion_group, criterion_main, Criterion};
use pixseek::{MatchConfig, Matcher, OwnedImage, Picture, Rgba16};
use std::hint::black_box;

fn make_image(width: usize, height: usize) -> OwnedImage {
    OwnedImage::from_fn(width, height, |x, y| {
        let value = ((x * 13) ^ (y * 7) ^ (x * y)) & 0xFF;
        Rgba16::from_rgb8(value as u8, (x & 0xFF) as u8, (y & 0xFF) as u8)
    })
    .unwrap()
}

fn bench_locate(c: &mut Criterion) {
    let haystack = Picture::new(make_image(512, 512), "bench");
    let needle = haystack
        .crop(pixseek::Rect::from_anchor(300, 280, 64, 48))
        .unwrap();

    for (label, stride) in [("stride_1", 1usize), ("stride_10", 10)] {
        let matcher = Matcher::new(&needle).unwrap().with_config(MatchConfig {
            sample_stride: stride,
            color_tolerance: 0,
        });
        c.bench_function(&format!("find_first_{label}"), |b| {
            b.iter(|| black_box(matcher.find_first(haystack.image()).unwrap()));
        });
        c.bench_function(&format!("find_all_{label}"), |b| {
            b.iter(|| black_box(matcher.find_all(haystack.image()).unwrap()));
        });
    }

    let tolerant = Matcher::new(&needle)
        .unwrap()
        .with_config(MatchConfig::default());
    c.bench_function("find_all_default_tolerance", |b| {
        b.iter(|| black_box(tolerant.find_all(haystack.image()).unwrap()));
    });
}

criterion_group!(benches, bench_locate);
criterion_main!(benches);
