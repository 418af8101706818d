//! PixSeek finds a small reference image (the needle) inside a larger image
//! (the haystack) by direct color comparison, and can paint a same-size
//! replacement over what it finds.
//!
//! Matching is translation-only. Each placement is first checked at the
//! needle's four corners, then verified on a sparse grid controlled by
//! `MatchConfig::sample_stride`. Channels are compared on a 16-bit scale
//! with a per-channel tolerance (`MatchConfig::color_tolerance`) that absorbs
//! compression noise. Loading and saving files requires the `image-io`
//! feature.

pub mod image;
pub mod lowlevel;
mod picture;
pub mod rect;
pub mod replace;
pub mod search;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;
#[cfg(feature = "image-io")]
pub use crate::image::io::{decode_image, encode_png, load_image, save_image};

pub use crate::image::{ImageView, OwnedImage, PixelSource, Rgba16};
pub use picture::Picture;
pub use rect::Rect;
pub use replace::{replace, replace_matches, replace_with_stats};
pub use search::{
    locate, MatchConfig, MatchStats, Matcher, DEFAULT_COLOR_TOLERANCE, DEFAULT_SAMPLE_STRIDE,
};
pub use util::{PixSeekError, PixSeekResult};
