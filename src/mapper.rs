// ABOUTME: Cursor to slide mapping for the quickslides engine
// ABOUTME: Maps a text offset to a slide index and a slide index back to a selection

use crate::segment::{segment, SlideSpan};
use serde::Serialize;

/// A selection range inside the document, plus where to scroll a linear
/// text view so that the range is visible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
    /// Fraction of the document, in `[0, 1]`, at the middle of the slide.
    ///
    /// Computed over byte counts, so it only approximates the visual line
    /// position when lines wrap or glyph widths vary.
    pub scroll_hint: f32,
}

/// The slide that owns `offset`.
///
/// A slide owns `[start, end]` inclusive. An offset sitting inside a
/// separator (or inside a dropped empty slide) goes to the slide that
/// follows it. Offsets past the last slide, and empty documents, fall back
/// to the last index, floored at 0.
pub fn offset_to_slide_index(offset: usize, spans: &[SlideSpan]) -> usize {
    spans
        .iter()
        .position(|span| offset <= span.end)
        .unwrap_or_else(|| spans.len().saturating_sub(1))
}

/// The selection that focuses slide `index` of `document`.
///
/// `index` is clamped to the slide range. Returns `None` when the document
/// has no slides.
pub fn slide_index_to_selection(index: usize, document: &str) -> Option<Selection> {
    let spans = segment(document);
    selection_for_span(&spans, index, document)
}

/// Same as [`slide_index_to_selection`] but reuses spans already computed
/// for `document`.
pub fn selection_for_span(spans: &[SlideSpan], index: usize, document: &str) -> Option<Selection> {
    let last = spans.len().checked_sub(1)?;
    let span = &spans[index.min(last)];

    let start = skip_leading_blank_run(document, span.start, span.end);
    let end = span.end;
    let scroll_hint = if document.is_empty() {
        0.0
    } else {
        let midpoint = (start + end) as f32 / 2.0;
        (midpoint / document.len() as f32).clamp(0.0, 1.0)
    };

    Some(Selection {
        start,
        end,
        scroll_hint,
    })
}

/// Skip a line break at `start` and the whitespace that follows it.
///
/// Authors leave a blank line after a separator; this moves the caret onto
/// the content itself. Never returns a position past `end`.
fn skip_leading_blank_run(document: &str, start: usize, end: usize) -> usize {
    let region = &document[start..end];
    let after_break = if let Some(rest) = region.strip_prefix("\r\n") {
        rest
    } else if let Some(rest) = region.strip_prefix('\n') {
        rest
    } else {
        return start;
    };

    let content = after_break.trim_start();
    end - content.len()
}

/// Clamp an offset from outside into `document`, rounding down to a char
/// boundary.
pub fn clamp_offset(document: &str, offset: usize) -> usize {
    let mut offset = offset.min(document.len());
    while !document.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
