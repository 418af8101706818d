//! Pixel types, the `PixelSource` read contract and RGBA16 buffers.
//!
//! `ImageView` is a borrowed 2D view into a 1D pixel buffer with an explicit
//! stride. The stride counts pixels between the starts of consecutive rows, so
//! a stride larger than the width represents padded rows. Region views are
//! zero-copy and keep the original stride.

use crate::util::math::expand_u8;
use crate::util::{PixSeekError, PixSeekResult};

#[cfg(feature = "image-io")]
pub mod io;
mod owned;

pub use owned::OwnedImage;

/// One pixel with four channels on the 16-bit scale (0..=65535).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba16 {
    pub r: u16,
    pub g: u16,
    pub b: u16,
    pub a: u16,
}

impl Rgba16 {
    pub const fn new(r: u16, g: u16, b: u16, a: u16) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque pixel from 16-bit color channels.
    pub const fn opaque(r: u16, g: u16, b: u16) -> Self {
        Self::new(r, g, b, u16::MAX)
    }

    /// Expands 8-bit channels to the 16-bit scale.
    pub fn from_rgba8(rgba: [u8; 4]) -> Self {
        Self::new(
            expand_u8(rgba[0]),
            expand_u8(rgba[1]),
            expand_u8(rgba[2]),
            expand_u8(rgba[3]),
        )
    }

    /// Opaque pixel from 8-bit color channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8([r, g, b, u8::MAX])
    }

    pub fn to_array(self) -> [u16; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Read access to a decoded image.
///
/// Matching depends only on this trait. `channels_at` returns `None` only when
/// the source cannot produce a pixel for `(x, y)`; inside
/// `0..width() x 0..height()` that is treated as a fatal read failure.
pub trait PixelSource {
    /// Image width in pixels.
    fn width(&self) -> usize;
    /// Image height in pixels.
    fn height(&self) -> usize;
    /// Channel samples at `(x, y)`.
    fn channels_at(&self, x: usize, y: usize) -> Option<Rgba16>;
}

impl<S: PixelSource + ?Sized> PixelSource for &S {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    fn channels_at(&self, x: usize, y: usize) -> Option<Rgba16> {
        (**self).channels_at(x, y)
    }
}

/// Reads a pixel, turning a missing sample into `InvalidChannelRead`.
#[inline]
pub(crate) fn read_pixel<S: PixelSource + ?Sized>(
    src: &S,
    x: usize,
    y: usize,
) -> PixSeekResult<Rgba16> {
    src.channels_at(x, y)
        .ok_or_else(|| PixSeekError::InvalidChannelRead {
            x,
            y,
            width: src.width(),
            height: src.height(),
        })
}

/// Borrowed RGBA16 view with an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a> {
    data: &'a [Rgba16],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> ImageView<'a> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [Rgba16], width: usize, height: usize) -> PixSeekResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(
        data: &'a [Rgba16],
        width: usize,
        height: usize,
        stride: usize,
    ) -> PixSeekResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(PixSeekError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in pixels between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the pixel at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<Rgba16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y.checked_mul(self.stride)?.checked_add(x)?;
        self.data.get(idx).copied()
    }

    /// Returns a contiguous slice for row `y` with length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [Rgba16]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }

    /// Returns a zero-copy view of a sub-region.
    pub fn region(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> PixSeekResult<ImageView<'a>> {
        check_region(x, y, width, height, self.width, self.height)?;
        let start = y * self.stride + x;
        let data = self
            .data
            .get(start..)
            .ok_or(PixSeekError::BufferTooSmall {
                needed: start.saturating_add(1),
                got: self.data.len(),
            })?;
        ImageView::new(data, width, height, self.stride)
    }
}

impl PixelSource for ImageView<'_> {
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

/// Validates that a `width` x `height` region at `(x, y)` lies inside an
/// `img_width` x `img_height` image.
pub(crate) fn check_region(
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    img_width: usize,
    img_height: usize,
) -> PixSeekResult<()> {
    if width == 0 || height == 0 {
        return Err(PixSeekError::InvalidDimensions { width, height });
    }
    let out_of_bounds = PixSeekError::RegionOutOfBounds {
        x,
        y,
        width,
        height,
        img_width,
        img_height,
    };
    let end_x = x.checked_add(width).ok_or_else(|| out_of_bounds.clone())?;
    let end_y = y.checked_add(height).ok_or_else(|| out_of_bounds.clone())?;
    if end_x > img_width || end_y > img_height {
        return Err(out_of_bounds);
    }
    Ok(())
}

// Empty images (zero width or height) are valid and need no storage.
fn required_len(width: usize, height: usize, stride: usize) -> PixSeekResult<usize> {
    if stride < width {
        return Err(PixSeekError::InvalidStride { width, stride });
    }
    if width == 0 || height == 0 {
        return Ok(0);
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(PixSeekError::InvalidDimensions { width, height })
}
