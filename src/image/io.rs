//! Loading and saving pictures through the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Every format is converted
//! to 16-bit RGBA on load; 8-bit channels are expanded by `v * 257`.

use crate::image::{OwnedImage, PixelSource, Rgba16};
use crate::picture::Picture;
use crate::util::{PixSeekError, PixSeekResult};
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// 16-bit RGBA buffer as produced by `DynamicImage::to_rgba16`.
pub type Rgba16Buffer = ImageBuffer<Rgba<u16>, Vec<u16>>;

fn io_error(err: impl std::fmt::Display) -> PixSeekError {
    PixSeekError::ImageIo {
        reason: err.to_string(),
    }
}

/// Converts a decoded image into an owned RGBA16 buffer.
pub fn owned_from_dynamic_image(img: &DynamicImage) -> PixSeekResult<OwnedImage> {
    let rgba = img.to_rgba16();
    let width = rgba.width() as usize;
    let height = rgba.height() as usize;
    let data = rgba
        .pixels()
        .map(|px| Rgba16::new(px[0], px[1], px[2], px[3]))
        .collect();
    OwnedImage::new(data, width, height)
}

/// Loads an image from disk; the path becomes the picture's source id.
pub fn load_image<P: AsRef<Path>>(path: P) -> PixSeekResult<Picture> {
    let path = path.as_ref();
    let img = image::open(path).map_err(io_error)?;
    let owned = owned_from_dynamic_image(&img)?;
    Ok(Picture::new(owned, path.display().to_string()))
}

/// Decodes an in-memory encoded image (format guessed from its header).
pub fn decode_image(bytes: &[u8], source: impl Into<String>) -> PixSeekResult<Picture> {
    let img = image::load_from_memory(bytes).map_err(io_error)?;
    Ok(Picture::new(owned_from_dynamic_image(&img)?, source))
}

/// Converts an owned buffer into an `image` crate RGBA16 buffer.
pub fn to_rgba16_buffer(img: &OwnedImage) -> PixSeekResult<Rgba16Buffer> {
    let width = u32::try_from(img.width()).map_err(io_error)?;
    let height = u32::try_from(img.height()).map_err(io_error)?;
    let raw: Vec<u16> = img.data().iter().flat_map(|px| px.to_array()).collect();
    ImageBuffer::from_raw(width, height, raw).ok_or(PixSeekError::InvalidDimensions {
        width: img.width(),
        height: img.height(),
    })
}

/// Encodes a picture as a 16-bit RGBA PNG.
pub fn encode_png(picture: &Picture) -> PixSeekResult<Vec<u8>> {
    let buf = to_rgba16_buffer(picture.image())?;
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba16(buf)
        .write_to(&mut out, ImageFormat::Png)
        .map_err(io_error)?;
    Ok(out.into_inner())
}

/// Saves a picture, choosing the encoder from the path's extension.
///
/// PNG keeps the full 16-bit RGBA data; JPEG has neither alpha nor 16-bit
/// samples, so it receives an 8-bit RGB conversion.
pub fn save_image<P: AsRef<Path>>(picture: &Picture, path: P) -> PixSeekResult<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path).map_err(io_error)?;
    let dynamic = DynamicImage::ImageRgba16(to_rgba16_buffer(picture.image())?);
    let result = match format {
        ImageFormat::Png => dynamic.save_with_format(path, format),
        _ => DynamicImage::ImageRgb8(dynamic.to_rgb8()).save_with_format(path, format),
    };
    result.map_err(io_error)
}

impl PixelSource for RgbaImage {
    fn width(&self) -> usize {
        ImageBuffer::width(self) as usize
    }

    fn height(&self) -> usize {
        ImageBuffer::height(self) as usize
    }

    fn channels_at(&self, x: usize, y: usize) -> Option<Rgba16> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        self.get_pixel_checked(x, y)
            .map(|px| Rgba16::from_rgba8(px.0))
    }
}

impl PixelSource for Rgba16Buffer {
    fn width(&self) -> usize {
        ImageBuffer::width(self) as usize
    }

    fn height(&self) -> usize {
        ImageBuffer::height(self) as usize
    }

    fn channels_at(&self, x: usize, y: usize) -> Option<Rgba16> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        self.get_pixel_checked(x, y)
            .map(|px| Rgba16::new(px[0], px[1], px[2], px[3]))
    }
}
