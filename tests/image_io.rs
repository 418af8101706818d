#![cfg(feature = "image-io")]

use pixseek::io::owned_from_dynamic_image;
use pixseek::{
    decode_image, encode_png, load_image, save_image, Picture, PixSeekError, PixelSource, Rect,
    Rgba16,
};
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("pixseek-{}-{name}", std::process::id()))
}

fn scene() -> image::RgbaImage {
    image::RgbaImage::from_fn(40, 30, |x, y| {
        if (12..18).contains(&x) && (8..14).contains(&y) {
            image::Rgba([200, 30, 30, 255])
        } else {
            image::Rgba([250, 250, 250, 255])
        }
    })
}

#[test]
fn rgba8_buffers_are_expanded_to_sixteen_bits() {
    let img = scene();
    assert_eq!(PixelSource::width(&img), 40);
    assert_eq!(
        img.channels_at(12, 8),
        Some(Rgba16::new(200 * 257, 30 * 257, 30 * 257, u16::MAX))
    );
    assert_eq!(img.channels_at(40, 0), None);

    let owned = owned_from_dynamic_image(&image::DynamicImage::ImageRgba8(img)).unwrap();
    assert_eq!(owned.get(0, 0), Some(Rgba16::from_rgb8(250, 250, 250)));
}

#[test]
fn png_round_trip_preserves_matches() {
    let path = temp_path("scene.png");
    scene().save(&path).unwrap();

    let mut haystack = load_image(&path).unwrap();
    assert_eq!(haystack.source(), path.display().to_string());
    let needle = haystack.crop(Rect::new(12, 8, 18, 14)).unwrap();
    assert_eq!(haystack.find_first(&needle).unwrap(), Some(Rect::new(12, 8, 18, 14)));

    let replacement = Picture::filled(6, 6, Rgba16::from_rgb8(0, 0, 255), "blue").unwrap();
    haystack.replace_all(&needle, &replacement).unwrap();
    save_image(&haystack, &path).unwrap();

    let reloaded = load_image(&path).unwrap();
    assert_eq!(reloaded.image(), haystack.image());
    std::fs::remove_file(&path).ok();
}

#[test]
fn encoded_png_decodes_to_the_same_pixels() {
    let pic = Picture::new(
        owned_from_dynamic_image(&image::DynamicImage::ImageRgba8(scene())).unwrap(),
        "scene",
    );
    let bytes = encode_png(&pic).unwrap();
    let decoded = decode_image(&bytes, "memory").unwrap();
    assert_eq!(decoded.source(), "memory");
    assert_eq!(decoded.image(), pic.image());
}

#[test]
fn undecodable_bytes_surface_as_image_io() {
    let err = decode_image(b"not an image", "junk").err().unwrap();
    assert!(matches!(err, PixSeekError::ImageIo { .. }));
}
