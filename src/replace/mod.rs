//! Overwriting matched regions with a same-size replacement.

use crate::image::{OwnedImage, PixelSource};
use crate::picture::Picture;
use crate::rect::Rect;
use crate::search::{MatchConfig, MatchStats, Matcher};
use crate::trace::{trace_debug, trace_span};
use crate::util::{PixSeekError, PixSeekResult};

/// Replaces the first match (or every match when `all`) of `needle` inside
/// `haystack` and returns the mutated haystack.
///
/// Fails with `DimensionMismatch` when `replacement` and `needle` differ in
/// size, and with `NotFound` when nothing matches. In both cases the haystack
/// is left untouched.
pub fn replace<'h>(
    haystack: &'h mut Picture,
    needle: &Picture,
    replacement: &Picture,
    cfg: &MatchConfig,
    all: bool,
) -> PixSeekResult<&'h mut Picture> {
    replace_with_stats(haystack, needle, replacement, cfg, all)?;
    Ok(haystack)
}

/// Same as [`replace`], returning the rectangles written and the scan
/// counters of the single search pass instead of the haystack.
pub fn replace_with_stats(
    haystack: &mut Picture,
    needle: &Picture,
    replacement: &Picture,
    cfg: &MatchConfig,
    all: bool,
) -> PixSeekResult<(Vec<Rect>, MatchStats)> {
    let _span = trace_span!("replace", haystack = haystack.source(), all = all).entered();

    let (rects, stats) = paste_matches(haystack.image_mut(), needle, replacement, cfg, all)?;
    if rects.is_empty() {
        return Err(PixSeekError::NotFound {
            haystack: haystack.source().to_owned(),
            needle: needle.source().to_owned(),
        });
    }
    Ok((rects, stats))
}

/// Buffer-level replace: locates `needle` in `dst` and pastes `replacement`
/// over each match in scan order, later regions winning where they overlap.
///
/// Returns the rectangles written; an empty vector means nothing matched and
/// nothing was written. The replacement is read in full before the first
/// write, so a failing read leaves `dst` untouched.
pub fn replace_matches<N, R>(
    dst: &mut OwnedImage,
    needle: &N,
    replacement: &R,
    cfg: &MatchConfig,
    all: bool,
) -> PixSeekResult<Vec<Rect>>
where
    N: PixelSource + ?Sized,
    R: PixelSource + ?Sized,
{
    paste_matches(dst, needle, replacement, cfg, all).map(|(rects, _)| rects)
}

fn paste_matches<N, R>(
    dst: &mut OwnedImage,
    needle: &N,
    replacement: &R,
    cfg: &MatchConfig,
    all: bool,
) -> PixSeekResult<(Vec<Rect>, MatchStats)>
where
    N: PixelSource + ?Sized,
    R: PixelSource + ?Sized,
{
    check_same_size(needle, replacement)?;
    let patch = OwnedImage::from_source(replacement)?;

    let (rects, stats) = Matcher::new(needle)?
        .with_config(*cfg)
        .locate_with_stats(&*dst, !all)?;
    for rect in &rects {
        trace_debug!("paste", x = rect.min_x, y = rect.min_y);
        dst.paste(*rect, &patch)?;
    }
    Ok((rects, stats))
}

fn check_same_size<N, R>(needle: &N, replacement: &R) -> PixSeekResult<()>
where
    N: PixelSource + ?Sized,
    R: PixelSource + ?Sized,
{
    if needle.width() != replacement.width() || needle.height() != replacement.height() {
        return Err(PixSeekError::DimensionMismatch {
            needle_width: needle.width(),
            needle_height: needle.height(),
            replacement_width: replacement.width(),
            replacement_height: replacement.height(),
        });
    }
    Ok(())
}
