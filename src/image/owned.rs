//! Owned contiguous RGBA16 buffer with in-place region writes.

use crate::image::{check_region, read_pixel, ImageView, PixelSource, Rgba16};
use crate::rect::Rect;
use crate::util::{PixSeekError, PixSeekResult};

/// Owned contiguous RGBA16 image buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedImage {
    data: Vec<Rgba16>,
    width: usize,
    height: usize,
}

impl OwnedImage {
    /// Wraps a row-major pixel buffer of exactly `width * height` pixels.
    pub fn new(data: Vec<Rgba16>, width: usize, height: usize) -> PixSeekResult<Self> {
        let needed = width
            .checked_mul(height)
            .ok_or(PixSeekError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(PixSeekError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(PixSeekError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates an image filled with a single pixel value.
    pub fn filled(width: usize, height: usize, pixel: Rgba16) -> PixSeekResult<Self> {
        let len = width
            .checked_mul(height)
            .ok_or(PixSeekError::InvalidDimensions { width, height })?;
        Self::new(vec![pixel; len], width, height)
    }

    /// Creates an image by evaluating `f(x, y)` for every pixel in raster order.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> PixSeekResult<Self>
    where
        F: FnMut(usize, usize) -> Rgba16,
    {
        let len = width
            .checked_mul(height)
            .ok_or(PixSeekError::InvalidDimensions { width, height })?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self::new(data, width, height)
    }

    /// Expands an interleaved 8-bit RGBA buffer to 16-bit channels.
    pub fn from_rgba8(raw: &[u8], width: usize, height: usize) -> PixSeekResult<Self> {
        let needed = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(4))
            .ok_or(PixSeekError::InvalidDimensions { width, height })?;
        if raw.len() != needed {
            return Err(PixSeekError::BufferTooSmall {
                needed,
                got: raw.len(),
            });
        }
        let data = raw
            .chunks_exact(4)
            .map(|px| Rgba16::from_rgba8([px[0], px[1], px[2], px[3]]))
            .collect();
        Self::new(data, width, height)
    }

    /// Copies every pixel of a source into a new contiguous buffer.
    pub fn from_source<S: PixelSource + ?Sized>(src: &S) -> PixSeekResult<Self> {
        let width = src.width();
        let height = src.height();
        let len = width
            .checked_mul(height)
            .ok_or(PixSeekError::InvalidDimensions { width, height })?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                data.push(read_pixel(src, x, y)?);
            }
        }
        Self::new(data, width, height)
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the row-major pixel buffer.
    pub fn data(&self) -> &[Rgba16] {
        &self.data
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }

    /// Returns the pixel at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<Rgba16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Returns a mutable reference to the pixel at `(x, y)`.
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Rgba16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get_mut(y * self.width + x)
    }

    /// Overwrites `rect` with the pixels of `src`, all four channels included.
    ///
    /// Source pixel `(i, j)` lands on `(rect.min_x + i, rect.min_y + j)`. The
    /// rectangle must be non-empty and lie inside this image, and the source
    /// must have exactly its size. The source is read in full before the
    /// first write, so on any error nothing is written.
    pub fn paste<S: PixelSource + ?Sized>(&mut self, rect: Rect, src: &S) -> PixSeekResult<()> {
        check_region(
            rect.min_x,
            rect.min_y,
            rect.width(),
            rect.height(),
            self.width,
            self.height,
        )?;
        if src.width() != rect.width() || src.height() != rect.height() {
            return Err(PixSeekError::DimensionMismatch {
                needle_width: rect.width(),
                needle_height: rect.height(),
                replacement_width: src.width(),
                replacement_height: src.height(),
            });
        }
        let pixels = OwnedImage::from_source(src)?;

        let width = rect.width();
        for (j, src_row) in pixels.data.chunks_exact(width).enumerate() {
            let start = (rect.min_y + j) * self.width + rect.min_x;
            self.data[start..start + width].copy_from_slice(src_row);
        }
        Ok(())
    }
}

impl PixelSource for OwnedImage {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn channels_at(&self, x: usize, y: usize) -> Option<Rgba16> {
        self.get(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::OwnedImage;
    use crate::image::{PixelSource, Rgba16};
    use crate::rect::Rect;
    use crate::util::PixSeekError;

    const WHITE: Rgba16 = Rgba16::opaque(u16::MAX, u16::MAX, u16::MAX);
    const BLUE: Rgba16 = Rgba16::opaque(0, 0, u16::MAX);

    #[test]
    fn paste_writes_only_the_target_region() {
        let mut dst = OwnedImage::filled(6, 5, WHITE).unwrap();
        let src = OwnedImage::filled(2, 3, BLUE).unwrap();
        dst.paste(Rect::new(3, 1, 5, 4), &src).unwrap();

        for y in 0..5 {
            for x in 0..6 {
                let expected = if (3..5).contains(&x) && (1..4).contains(&y) {
                    BLUE
                } else {
                    WHITE
                };
                assert_eq!(dst.get(x, y), Some(expected), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn paste_copies_alpha() {
        let mut dst = OwnedImage::filled(2, 2, WHITE).unwrap();
        let clear = OwnedImage::filled(1, 1, Rgba16::new(1, 2, 3, 0)).unwrap();
        dst.paste(Rect::new(1, 1, 2, 2), &clear).unwrap();
        assert_eq!(dst.get(1, 1), Some(Rgba16::new(1, 2, 3, 0)));
    }

    #[test]
    fn paste_rejects_out_of_bounds_without_writing() {
        let mut dst = OwnedImage::filled(4, 4, WHITE).unwrap();
        let before = dst.clone();
        let src = OwnedImage::filled(2, 2, BLUE).unwrap();
        let err = dst.paste(Rect::new(3, 3, 5, 5), &src).unwrap_err();
        assert_eq!(
            err,
            PixSeekError::RegionOutOfBounds {
                x: 3,
                y: 3,
                width: 2,
                height: 2,
                img_width: 4,
                img_height: 4,
            }
        );
        assert_eq!(dst, before);
    }

    #[test]
    fn paste_rejects_inverted_rect() {
        let mut dst = OwnedImage::filled(8, 8, WHITE).unwrap();
        let before = dst.clone();
        let src = OwnedImage::filled(2, 2, BLUE).unwrap();
        let err = dst.paste(Rect::new(5, 5, 3, 3), &src).unwrap_err();
        assert_eq!(
            err,
            PixSeekError::InvalidDimensions {
                width: 0,
                height: 0,
            }
        );
        assert_eq!(dst, before);
    }

    /// Replacement that loses its last row.
    struct TruncatedSource;

    impl PixelSource for TruncatedSource {
        fn width(&self) -> usize {
            2
        }

        fn height(&self) -> usize {
            3
        }

        fn channels_at(&self, x: usize, y: usize) -> Option<Rgba16> {
            (y < 2 && x < 2).then_some(BLUE)
        }
    }

    #[test]
    fn paste_failing_source_writes_nothing() {
        let mut dst = OwnedImage::filled(4, 4, WHITE).unwrap();
        let before = dst.clone();
        let err = dst.paste(Rect::new(1, 0, 3, 3), &TruncatedSource).unwrap_err();
        assert_eq!(
            err,
            PixSeekError::InvalidChannelRead {
                x: 0,
                y: 2,
                width: 2,
                height: 3,
            }
        );
        assert_eq!(dst, before);
    }

    #[test]
    fn from_rgba8_expands_channels() {
        let img = OwnedImage::from_rgba8(&[255, 0, 128, 255], 1, 1).unwrap();
        assert_eq!(img.get(0, 0), Some(Rgba16::new(u16::MAX, 0, 0x8080, u16::MAX)));
    }
}
