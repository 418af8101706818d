//! Building blocks for custom search loops.
//!
//! These expose the two matching phases separately, for callers that walk
//! their own anchor ranges. Most users should prefer `Matcher` or the
//! `Picture` query methods.

pub use crate::search::corners::NeedleCorners;
pub use crate::search::scan::verify_interior;

use crate::image::Rgba16;

/// Per-channel tolerance test used by both phases; alpha is ignored.
pub fn pixels_match(a: Rgba16, b: Rgba16, tolerance: u32) -> bool {
    crate::util::math::rgb_within(a, b, tolerance)
}

/// Interior sampling stride after clamping for a `width` x `height` needle.
pub fn sampling_stride(stride: usize, width: usize, height: usize) -> usize {
    crate::util::math::effective_stride(stride, width, height)
}
