//! Tolerance arithmetic and sampling helpers.

use crate::image::Rgba16;

/// Returns true when two channel samples differ by at most `tolerance`.
///
/// The band is closed: a difference equal to `tolerance` still matches.
#[inline]
pub(crate) fn channel_within(a: u16, b: u16, tolerance: u32) -> bool {
    u32::from(a.abs_diff(b)) <= tolerance
}

/// Compares the color channels of two pixels. Alpha never takes part.
#[inline]
pub(crate) fn rgb_within(a: Rgba16, b: Rgba16, tolerance: u32) -> bool {
    channel_within(a.r, b.r, tolerance)
        && channel_within(a.g, b.g, tolerance)
        && channel_within(a.b, b.b, tolerance)
}

/// Resolves the stride actually used to sample a `width` x `height` needle.
///
/// A stride of zero, or one larger than the needle's last column or last row
/// index, falls back to 1.
pub(crate) fn effective_stride(stride: usize, width: usize, height: usize) -> usize {
    let last_x = width.saturating_sub(1);
    let last_y = height.saturating_sub(1);
    if stride == 0 || stride > last_x || stride > last_y {
        1
    } else {
        stride
    }
}

/// Expands an 8-bit channel to the 16-bit scale (`0xAB` -> `0xABAB`).
#[inline]
pub(crate) fn expand_u8(value: u8) -> u16 {
    u16::from(value) * 257
}
