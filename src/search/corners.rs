//! Corner pre-filter.
//!
//! Most anchors fail on one of the needle's four corners, so the corners are
//! sampled once per needle and each anchor costs at most four comparisons
//! before the interior scan runs.

use crate::image::{read_pixel, PixelSource, Rgba16};
use crate::util::math::rgb_within;
use crate::util::PixSeekResult;

/// The needle's four corner pixels with their offsets from the anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NeedleCorners {
    // Order: top-left, top-right, bottom-left, bottom-right.
    samples: [(usize, usize, Rgba16); 4],
}

impl NeedleCorners {
    /// Samples the corners of a needle.
    ///
    /// Returns `Ok(None)` for an empty needle, which has no corners.
    pub fn sample<N: PixelSource + ?Sized>(needle: &N) -> PixSeekResult<Option<Self>> {
        let width = needle.width();
        let height = needle.height();
        if width == 0 || height == 0 {
            return Ok(None);
        }
        let right = width - 1;
        let bottom = height - 1;
        let offsets = [(0, 0), (right, 0), (0, bottom), (right, bottom)];
        let mut samples = [(0, 0, Rgba16::default()); 4];
        for (slot, &(dx, dy)) in samples.iter_mut().zip(offsets.iter()) {
            *slot = (dx, dy, read_pixel(needle, dx, dy)?);
        }
        Ok(Some(Self { samples }))
    }

    /// Returns true when every corner of the needle placed at `(x, y)` matches
    /// the haystack within `tolerance`.
    ///
    /// The caller guarantees the placement lies inside the haystack.
    pub fn matches_at<H: PixelSource + ?Sized>(
        &self,
        haystack: &H,
        x: usize,
        y: usize,
        tolerance: u32,
    ) -> PixSeekResult<bool> {
        for &(dx, dy, expected) in &self.samples {
            let actual = read_pixel(haystack, x + dx, y + dy)?;
            if !rgb_within(actual, expected, tolerance) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
