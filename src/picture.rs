//! Decoded images tagged with their origin and per-image match defaults.

use crate::image::{ImageView, OwnedImage, PixelSource, Rgba16};
use crate::rect::Rect;
use crate::replace::replace;
use crate::search::{MatchConfig, Matcher};
use crate::util::PixSeekResult;

/// An owned RGBA16 image plus the identifier it was loaded from.
///
/// A picture searched as a haystack uses its own [`MatchConfig`]; changing
/// the stride or tolerance on one picture never affects searches on another.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Picture {
    img: OwnedImage,
    source: String,
    cfg: MatchConfig,
}

impl Picture {
    /// Wraps an owned buffer with the default match configuration.
    pub fn new(img: OwnedImage, source: impl Into<String>) -> Self {
        Self {
            img,
            source: source.into(),
            cfg: MatchConfig::default(),
        }
    }

    /// Builds a picture from interleaved 8-bit RGBA bytes.
    pub fn from_rgba8(
        raw: &[u8],
        width: usize,
        height: usize,
        source: impl Into<String>,
    ) -> PixSeekResult<Self> {
        Ok(Self::new(OwnedImage::from_rgba8(raw, width, height)?, source))
    }

    /// Builds a single-color picture.
    pub fn filled(
        width: usize,
        height: usize,
        pixel: Rgba16,
        source: impl Into<String>,
    ) -> PixSeekResult<Self> {
        Ok(Self::new(OwnedImage::filled(width, height, pixel)?, source))
    }

    pub fn width(&self) -> usize {
        self.img.width()
    }

    pub fn height(&self) -> usize {
        self.img.height()
    }

    /// Identifier used in diagnostics, usually the file path.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn image(&self) -> &OwnedImage {
        &self.img
    }

    pub(crate) fn image_mut(&mut self) -> &mut OwnedImage {
        &mut self.img
    }

    pub fn into_image(self) -> OwnedImage {
        self.img
    }

    pub fn view(&self) -> ImageView<'_> {
        self.img.view()
    }

    /// Match configuration used when this picture is the haystack.
    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    /// Sets the interior sampling stride for later searches in this picture.
    pub fn set_sample_stride(&mut self, sample_stride: usize) {
        self.cfg.sample_stride = sample_stride;
    }

    /// Sets the per-channel color tolerance for later searches in this picture.
    pub fn set_color_tolerance(&mut self, color_tolerance: u32) {
        self.cfg.color_tolerance = color_tolerance;
    }

    /// Builder form of [`Picture::set_sample_stride`] and
    /// [`Picture::set_color_tolerance`].
    pub fn with_config(mut self, cfg: MatchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// First placement of `needle`, top-to-bottom then left-to-right.
    pub fn find_first<N: PixelSource + ?Sized>(
        &self,
        needle: &N,
    ) -> PixSeekResult<Option<Rect>> {
        Matcher::new(needle)?
            .with_config(self.cfg)
            .find_first(&self.img)
    }

    /// Every placement of `needle`, overlapping ones included.
    pub fn find_all<N: PixelSource + ?Sized>(&self, needle: &N) -> PixSeekResult<Vec<Rect>> {
        Matcher::new(needle)?
            .with_config(self.cfg)
            .find_all(&self.img)
    }

    /// Overwrites the first match of `needle` with `replacement`.
    pub fn replace_first(
        &mut self,
        needle: &Picture,
        replacement: &Picture,
    ) -> PixSeekResult<&mut Self> {
        let cfg = self.cfg;
        replace(self, needle, replacement, &cfg, false)
    }

    /// Overwrites every match of `needle` with `replacement`, in scan order.
    pub fn replace_all(
        &mut self,
        needle: &Picture,
        replacement: &Picture,
    ) -> PixSeekResult<&mut Self> {
        let cfg = self.cfg;
        replace(self, needle, replacement, &cfg, true)
    }

    /// Copies `rect` into a new picture that inherits this picture's config.
    pub fn crop(&self, rect: Rect) -> PixSeekResult<Picture> {
        let region = self
            .img
            .view()
            .region(rect.min_x, rect.min_y, rect.width(), rect.height())?;
        let source = format!(
            "{}[{},{} {}x{}]",
            self.source,
            rect.min_x,
            rect.min_y,
            rect.width(),
            rect.height()
        );
        Ok(Picture {
            img: OwnedImage::from_source(&region)?,
            source,
            cfg: self.cfg,
        })
    }
}

impl PixelSource for Picture {
    fn width(&self) -> usize {
        self.img.width()
    }

    fn height(&self) -> usize {
        self.img.height()
    }

    fn channels_at(&self, x: usize, y: usize) -> Option<Rgba16> {
        self.img.get(x, y)
    }
}
