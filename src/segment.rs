// ABOUTME: Segmenter for the quickslides engine
// ABOUTME: Splits a document on the line-based separator into slide spans with raw offsets

use serde::Serialize;

/// The separator between two slides: a line holding exactly three hyphens.
pub const SEPARATOR: &str = "\n---\n";

/// One slide as seen in the document.
///
/// `text` is trimmed, while `start..end` is the untrimmed candidate range in
/// the full document, so a caller can recover the exact characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideSpan {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl SlideSpan {
    /// Whether a byte offset falls inside this span, end boundary included.
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset <= self.end
    }
}

/// Split a document into slides.
///
/// Candidates that are empty once trimmed are dropped, so consecutive,
/// leading and trailing separators never produce blank slides.
pub fn segment(document: &str) -> Vec<SlideSpan> {
    let mut spans = Vec::new();
    let mut candidate_start = 0;

    loop {
        let rest = &document[candidate_start..];
        let candidate_end = match rest.find(SEPARATOR) {
            Some(pos) => candidate_start + pos,
            None => document.len(),
        };

        let raw = &document[candidate_start..candidate_end];
        let text = raw.trim();
        if !text.is_empty() {
            spans.push(SlideSpan {
                text: text.to_string(),
                start: candidate_start,
                end: candidate_end,
            });
        }

        if candidate_end == document.len() {
            break;
        }
        candidate_start = candidate_end + SEPARATOR.len();
    }

    spans
}

/// Number of slides a document holds.
pub fn slide_count(document: &str) -> usize {
    segment(document).len()
}

/// Reassemble slide texts into a document.
///
/// Interior whitespace trimmed by [`segment`] is not restored.
pub fn join<S: AsRef<str>>(slides: &[S]) -> String {
    slides
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<&str>>()
        .join(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(document: &str) -> Vec<String> {
        segment(document).into_iter().map(|s| s.text).collect()
    }

    #[test]
    fn test_empty_document() {
        assert!(segment("").is_empty());
        assert!(segment("  \n\n ").is_empty());
    }

    #[test]
    fn test_single_slide_without_separator() {
        let spans = segment("a");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "a");
        assert_eq!((spans[0].start, spans[0].end), (0, 1));
    }

    #[test]
    fn test_three_slides_in_order() {
        assert_eq!(texts("a\n---\nb\n---\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_middle_slide_dropped() {
        assert_eq!(texts("a\n---\n\n---\nb"), vec!["a", "b"]);
    }

    #[test]
    fn test_leading_and_trailing_separators() {
        assert_eq!(texts("\n---\na\n---\n"), vec!["a"]);
    }

    #[test]
    fn test_offsets_are_untrimmed() {
        let doc = "# One\n\n---\n\n# Two\n";
        let spans = segment(doc);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].start, 0);
        assert_eq!(&doc[spans[0].start..spans[0].end], "# One\n");
        assert_eq!(&doc[spans[1].start..spans[1].end], "\n# Two\n");
        assert_eq!(spans[1].text, "# Two");
    }

    #[test]
    fn test_separator_matching_is_non_overlapping() {
        assert_eq!(texts("a\n---\n---\nb"), vec!["a", "---\nb"]);
    }

    #[test]
    fn test_dashes_inside_line_do_not_split() {
        assert_eq!(texts("a --- b\n----\nc"), vec!["a --- b\n----\nc"]);
    }

    #[test]
    fn test_join_reassembles() {
        let joined = join(&["a", "b"]);
        assert_eq!(joined, "a\n---\nb");
        assert_eq!(texts(&joined), vec!["a", "b"]);
    }
}
