//! Error types for pixseek.

use thiserror::Error;

/// Result alias for pixseek operations.
pub type PixSeekResult<T> = std::result::Result<T, PixSeekError>;

/// Errors that can occur when building images, searching or replacing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PixSeekError {
    /// Width or height is zero or overflows the addressable buffer size.
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The backing buffer does not hold enough pixels for the requested shape.
    #[error("buffer too small: needed {needed} pixels, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Row stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// A region does not fit inside the image it addresses.
    #[error(
        "region {width}x{height} at ({x}, {y}) is outside image {img_width}x{img_height}"
    )]
    RegionOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// The replacement image does not have the needle's dimensions.
    #[error(
        "replacement is {replacement_width}x{replacement_height} but needle is {needle_width}x{needle_height}"
    )]
    DimensionMismatch {
        needle_width: usize,
        needle_height: usize,
        replacement_width: usize,
        replacement_height: usize,
    },
    /// No placement of the needle satisfied the match predicate.
    #[error("{needle} was not found in {haystack}")]
    NotFound { haystack: String, needle: String },
    /// A pixel source could not produce channel values for a valid coordinate.
    ///
    /// This is a broken-invariant failure and aborts the whole operation.
    #[error("pixel source {width}x{height} returned no channels at ({x}, {y})")]
    InvalidChannelRead {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    /// Decoding, encoding or file access failed in the image collaborator.
    #[error("image I/O failed: {reason}")]
    ImageIo { reason: String },
}
