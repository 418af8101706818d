//! Needle search over every valid placement in a haystack.
//!
//! Each anchor goes through two phases: the corner pre-filter rejects most
//! placements after at most four pixel comparisons, and the survivors are
//! verified by a sparse scan of the needle on a `sample_stride` grid. Anchors
//! are visited in raster order, so results come out top-to-bottom,
//! left-to-right.

pub mod corners;
pub mod scan;

use crate::image::PixelSource;
use crate::rect::Rect;
use crate::search::corners::NeedleCorners;
use crate::search::scan::verify_interior;
use crate::trace::{trace_event, trace_span};
use crate::util::PixSeekResult;

/// Default interior sampling stride.
pub const DEFAULT_SAMPLE_STRIDE: usize = 10;

/// Default per-channel tolerance on the 16-bit channel scale.
pub const DEFAULT_COLOR_TOLERANCE: u32 = 20_000;

/// Tunables for a single search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchConfig {
    /// Step between sampled needle rows and columns during verification.
    ///
    /// Zero, or a value larger than the needle's last row/column index, is
    /// treated as 1.
    pub sample_stride: usize,
    /// Maximum absolute difference per color channel for two pixels to match.
    pub color_tolerance: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            sample_stride: DEFAULT_SAMPLE_STRIDE,
            color_tolerance: DEFAULT_COLOR_TOLERANCE,
        }
    }
}

impl MatchConfig {
    /// Exhaustive, exact-color configuration.
    pub fn exact() -> Self {
        Self {
            sample_stride: 1,
            color_tolerance: 0,
        }
    }

    pub fn with_sample_stride(mut self, sample_stride: usize) -> Self {
        self.sample_stride = sample_stride;
        self
    }

    pub fn with_color_tolerance(mut self, color_tolerance: u32) -> Self {
        self.color_tolerance = color_tolerance;
        self
    }
}

/// Counters collected during one `locate` pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchStats {
    /// Anchors examined before the scan finished or stopped.
    pub anchors: usize,
    /// Anchors rejected by the corner pre-filter.
    pub corner_rejects: usize,
    /// Anchors that passed the corners but failed interior verification.
    pub interior_rejects: usize,
    /// Anchors reported as matches.
    pub matches: usize,
}

/// Matcher bound to one needle.
///
/// The needle's corners are read once at construction and reused for every
/// haystack searched with this matcher.
pub struct Matcher<'n, N: PixelSource + ?Sized> {
    needle: &'n N,
    corners: Option<NeedleCorners>,
    cfg: MatchConfig,
}

impl<'n, N: PixelSource + ?Sized> Matcher<'n, N> {
    /// Creates a matcher with the default configuration.
    pub fn new(needle: &'n N) -> PixSeekResult<Self> {
        Ok(Self {
            needle,
            corners: NeedleCorners::sample(needle)?,
            cfg: MatchConfig::default(),
        })
    }

    /// Replaces the search configuration.
    pub fn with_config(mut self, cfg: MatchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    /// Returns the first match in raster order, if any.
    pub fn find_first<H: PixelSource + ?Sized>(
        &self,
        haystack: &H,
    ) -> PixSeekResult<Option<Rect>> {
        Ok(self.locate(haystack, true)?.into_iter().next())
    }

    /// Returns every match in raster order, overlapping ones included.
    pub fn find_all<H: PixelSource + ?Sized>(&self, haystack: &H) -> PixSeekResult<Vec<Rect>> {
        self.locate(haystack, false)
    }

    /// Scans the haystack; stops after the first match when `stop_at_first`.
    pub fn locate<H: PixelSource + ?Sized>(
        &self,
        haystack: &H,
        stop_at_first: bool,
    ) -> PixSeekResult<Vec<Rect>> {
        self.locate_with_stats(haystack, stop_at_first)
            .map(|(rects, _)| rects)
    }

    /// Same as [`Matcher::locate`], also returning scan counters.
    pub fn locate_with_stats<H: PixelSource + ?Sized>(
        &self,
        haystack: &H,
        stop_at_first: bool,
    ) -> PixSeekResult<(Vec<Rect>, MatchStats)> {
        let mut stats = MatchStats::default();
        let mut rects = Vec::new();

        let hay_width = haystack.width();
        let hay_height = haystack.height();
        let width = self.needle.width();
        let height = self.needle.height();
        let corners = match self.corners {
            Some(corners) if width <= hay_width && height <= hay_height => corners,
            _ => return Ok((rects, stats)),
        };

        let _span = trace_span!(
            "locate",
            haystack_w = hay_width,
            haystack_h = hay_height,
            needle_w = width,
            needle_h = height,
            stop_at_first = stop_at_first
        )
        .entered();

        let tolerance = self.cfg.color_tolerance;
        'scan: for y in 0..=(hay_height - height) {
            for x in 0..=(hay_width - width) {
                stats.anchors += 1;
                if !corners.matches_at(haystack, x, y, tolerance)? {
                    stats.corner_rejects += 1;
                    continue;
                }
                let stride = self.cfg.sample_stride;
                if !verify_interior(haystack, self.needle, x, y, stride, tolerance)? {
                    stats.interior_rejects += 1;
                    continue;
                }
                stats.matches += 1;
                rects.push(Rect::from_anchor(x, y, width, height));
                if stop_at_first {
                    break 'scan;
                }
            }
        }

        trace_event!(
            "locate_done",
            anchors = stats.anchors,
            corner_rejects = stats.corner_rejects,
            interior_rejects = stats.interior_rejects,
            matches = stats.matches
        );
        Ok((rects, stats))
    }
}

/// Finds placements of `needle` inside `haystack`.
///
/// An empty result means "not found". Errors only arise when a pixel source
/// fails to produce channels inside its own bounds.
pub fn locate<H, N>(
    haystack: &H,
    needle: &N,
    cfg: &MatchConfig,
    stop_at_first: bool,
) -> PixSeekResult<Vec<Rect>>
where
    H: PixelSource + ?Sized,
    N: PixelSource + ?Sized,
{
    Matcher::new(needle)?
        .with_config(*cfg)
        .locate(haystack, stop_at_first)
}
