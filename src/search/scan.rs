//! Sparse interior verification.

use crate::image::{read_pixel, PixelSource};
use crate::util::math::{effective_stride, rgb_within};
use crate::util::PixSeekResult;

/// Verifies a candidate anchor by sampling the needle on a `stride` grid.
///
/// Rows `0, s, 2s, ..` up to `height - 1` and the same columns are compared;
/// the stride is clamped to 1 when it is zero or does not fit inside the
/// needle. Returns at the first sample outside `tolerance`.
pub fn verify_interior<H, N>(
    haystack: &H,
    needle: &N,
    x: usize,
    y: usize,
    stride: usize,
    tolerance: u32,
) -> PixSeekResult<bool>
where
    H: PixelSource + ?Sized,
    N: PixelSource + ?Sized,
{
    let width = needle.width();
    let height = needle.height();
    if width == 0 || height == 0 {
        return Ok(false);
    }
    let step = effective_stride(stride, width, height);

    for ty in (0..height).step_by(step) {
        for tx in (0..width).step_by(step) {
            let expected = read_pixel(needle, tx, ty)?;
            let actual = read_pixel(haystack, x + tx, y + ty)?;
            if !rgb_within(actual, expected, tolerance) {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::verify_interior;
    use crate::image::{OwnedImage, Rgba16};

    fn checker(width: usize, height: usize) -> OwnedImage {
        OwnedImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba16::from_rgb8(0, 0, 0)
            } else {
                Rgba16::from_rgb8(255, 255, 255)
            }
        })
        .unwrap()
    }

    #[test]
    fn sparse_stride_skips_unsampled_pixels() {
        let needle = checker(7, 7);
        let mut haystack = needle.clone();
        // (1, 1) is off the stride-3 grid {0, 3, 6}.
        *haystack.get_mut(1, 1).unwrap() = Rgba16::from_rgb8(255, 0, 0);
        assert!(verify_interior(&haystack, &needle, 0, 0, 3, 0).unwrap());
        assert!(!verify_interior(&haystack, &needle, 0, 0, 1, 0).unwrap());
    }

    #[test]
    fn oversized_stride_falls_back_to_exhaustive() {
        let needle = checker(4, 4);
        let mut haystack = needle.clone();
        *haystack.get_mut(2, 1).unwrap() = Rgba16::from_rgb8(255, 0, 0);
        assert!(!verify_interior(&haystack, &needle, 0, 0, 10, 0).unwrap());
        assert!(!verify_interior(&haystack, &needle, 0, 0, 0, 0).unwrap());
    }

    #[test]
    fn verification_is_relative_to_the_anchor() {
        let needle = checker(3, 3);
        let haystack = OwnedImage::from_fn(8, 8, |x, y| {
            if (2..5).contains(&x) && (4..7).contains(&y) {
                needle.get(x - 2, y - 4).unwrap()
            } else {
                Rgba16::from_rgb8(255, 0, 0)
            }
        })
        .unwrap();
        assert!(verify_interior(&haystack, &needle, 2, 4, 1, 0).unwrap());
        assert!(!verify_interior(&haystack, &needle, 3, 4, 1, 0).unwrap());
    }
}
