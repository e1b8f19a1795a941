// ABOUTME: Content classifier for the quickslides engine
// ABOUTME: Decides which render variant a slide's text gets

use regex::Regex;
use serde::Serialize;
use std::ops::Range;
use std::sync::OnceLock;

/// How a slide should be drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum ContentVariant {
    /// A raw markup block, handed verbatim to a sandboxed renderer.
    PureMarkup { markup: String },
    /// A slide holding a single image, drawn full-bleed.
    SingleCover { url: String },
    /// A slide holding exactly two images, drawn as a diagonal split.
    SplitCover { first: String, second: String },
    /// Everything else, rendered as markdown.
    RichText { text: String },
}

impl ContentVariant {
    pub fn name(&self) -> &'static str {
        match self {
            ContentVariant::PureMarkup { .. } => "pure_markup",
            ContentVariant::SingleCover { .. } => "single_cover",
            ContentVariant::SplitCover { .. } => "split_cover",
            ContentVariant::RichText { .. } => "rich_text",
        }
    }
}

fn image_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"!\[[^\]]*\]\(([^)]+)\)").expect("image reference pattern is valid")
    })
}

/// Image references with a non-blank url, as (byte range, url).
fn image_references(text: &str) -> Vec<(Range<usize>, String)> {
    image_pattern()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let url = caps.get(1)?.as_str().trim();
            (!url.is_empty()).then(|| (whole.range(), url.to_string()))
        })
        .collect()
}

/// Whether `text` holds nothing but the given references and whitespace.
fn only_references(text: &str, references: &[(Range<usize>, String)]) -> bool {
    let mut last = 0;
    for (range, _) in references {
        if !text[last..range.start].trim().is_empty() {
            return false;
        }
        last = range.end;
    }
    text[last..].trim().is_empty()
}

/// Urls of every `![alt](url)` reference in `text`, in document order.
pub fn image_urls(text: &str) -> Vec<String> {
    image_references(text)
        .into_iter()
        .map(|(_, url)| url)
        .collect()
}

/// Classify one slide.
///
/// Rules apply in order and the first match wins: a markup block, then two
/// images and nothing else, then exactly one image, then rich text.
pub fn classify(slide_text: &str) -> ContentVariant {
    let trimmed = slide_text.trim();

    if trimmed.starts_with('<') && trimmed.ends_with('>') {
        return ContentVariant::PureMarkup {
            markup: trimmed.to_string(),
        };
    }

    let references = image_references(trimmed);
    if only_references(trimmed, &references) {
        let mut urls = references.into_iter().map(|(_, url)| url);
        match (urls.next(), urls.next(), urls.next()) {
            (Some(first), Some(second), None) => {
                return ContentVariant::SplitCover { first, second };
            }
            (Some(url), None, None) => return ContentVariant::SingleCover { url },
            _ => {}
        }
    }

    ContentVariant::RichText {
        text: slide_text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_cover() {
        assert_eq!(
            classify("![alt](x.png)"),
            ContentVariant::SingleCover {
                url: "x.png".to_string()
            }
        );
    }

    #[test]
    fn test_single_cover_with_surrounding_whitespace() {
        assert_eq!(
            classify("\n  ![](https://example.com/a.jpg)\n"),
            ContentVariant::SingleCover {
                url: "https://example.com/a.jpg".to_string()
            }
        );
    }

    #[test]
    fn test_split_cover() {
        assert_eq!(
            classify("![a](1.png)![b](2.png)"),
            ContentVariant::SplitCover {
                first: "1.png".to_string(),
                second: "2.png".to_string()
            }
        );
        assert_eq!(
            classify("![a](1.png)\n\n![b](2.png)\n"),
            ContentVariant::SplitCover {
                first: "1.png".to_string(),
                second: "2.png".to_string()
            }
        );
    }

    #[test]
    fn test_rich_text() {
        assert_eq!(
            classify("# Title\ntext"),
            ContentVariant::RichText {
                text: "# Title\ntext".to_string()
            }
        );
    }

    #[test]
    fn test_pure_markup() {
        assert_eq!(
            classify("<div>raw</div>"),
            ContentVariant::PureMarkup {
                markup: "<div>raw</div>".to_string()
            }
        );
    }

    #[test]
    fn test_markup_wins_over_images() {
        let variant = classify("<p>![a](1.png)![b](2.png)</p>");
        assert_eq!(variant.name(), "pure_markup");
    }

    #[test]
    fn test_image_with_caption_is_rich_text() {
        assert_eq!(classify("![a](1.png)\nA caption").name(), "rich_text");
        assert_eq!(classify("Two: ![a](1.png) ![b](2.png)").name(), "rich_text");
    }

    #[test]
    fn test_three_images_is_rich_text() {
        assert_eq!(classify("![a](1.png)![b](2.png)![c](3.png)").name(), "rich_text");
    }

    #[test]
    fn test_malformed_image_falls_through() {
        assert_eq!(classify("![broken(x.png)").name(), "rich_text");
        assert_eq!(classify("![alt](x.png").name(), "rich_text");
    }

    #[test]
    fn test_image_without_url_is_rich_text() {
        assert_eq!(
            classify("![alt]()"),
            ContentVariant::RichText {
                text: "![alt]()".to_string()
            }
        );
        assert_eq!(classify("![a]( )").name(), "rich_text");
        assert_eq!(classify("![a]( )\n![b](2.png)").name(), "rich_text");
        assert_eq!(image_urls("![a]() ![b](2.png)"), vec!["2.png".to_string()]);
    }
}
