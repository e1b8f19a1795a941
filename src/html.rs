// ABOUTME: HTML generation module for the quickslides engine
// ABOUTME: Builds standalone deck and single-slide pages from a document

use crate::classify::classify;
use crate::errors::{Result, SlideError};
use crate::navigation::route_to_index;
use crate::render::{escape_html, render_variant, MarkdownRenderer};
use crate::segment::{segment, SlideSpan};
use log::info;
use std::fs;
use std::path::Path;

const STYLESHEET: &str = r#"html, body { margin: 0; height: 100%; background: #111; color: #eee; font-family: system-ui, sans-serif; }
.slide { position: relative; width: 100vw; height: 100vh; overflow: hidden; box-sizing: border-box; }
.markdown-slide { display: flex; flex-direction: column; justify-content: center; height: 100%; padding: 2rem 4rem; box-sizing: border-box; font-size: 1.5rem; }
.markdown-slide h1 { font-size: 3.5rem; }
.markdown-slide a { color: #60a5fa; }
.markup-slide { width: 100%; height: 100%; border: 0; background: #fff; }
.cover-slide, .split-first, .split-second { position: absolute; inset: 0; background-size: cover; background-position: center; }
.split-first { clip-path: polygon(0 0, 100% 0, 0 100%); }
.split-second { clip-path: polygon(100% 0, 100% 100%, 0 100%); }
.slide-error { display: flex; flex-direction: column; align-items: center; justify-content: center; height: 100%; color: #fca5a5; border: 1px solid #b91c1c; }
.slide-counter { position: absolute; right: 1rem; bottom: 1rem; opacity: 0.5; font-size: 0.9rem; }
.empty-deck { display: flex; align-items: center; justify-content: center; height: 100vh; opacity: 0.6; }
"#;

fn page_head(title: &str) -> String {
    let mut head = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    head.push_str("<meta charset=\"UTF-8\">\n");
    head.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=0\">\n",
    );
    head.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    head.push_str(&format!("<style>\n{}</style>\n", STYLESHEET));
    head.push_str("</head>\n<body>\n");
    head
}

fn slide_section(
    span: &SlideSpan,
    index: usize,
    count: usize,
    renderer: &dyn MarkdownRenderer,
) -> String {
    let variant = classify(&span.text);
    format!(
        "<section class=\"slide {}\" id=\"slide-{}\">{}<div class=\"slide-counter\">{} / {}</div></section>\n",
        variant.name(),
        index + 1,
        render_variant(&variant, renderer),
        index + 1,
        count
    )
}

/// Title of a document: its first heading, or a fallback.
pub fn document_title(document: &str) -> String {
    document
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| "Presentation".to_string())
}

/// Generate a full HTML page holding every slide of `document`.
///
/// A document with no slides gets a notice and the renderer is never called.
pub fn generate_deck(document: &str, renderer: &dyn MarkdownRenderer) -> String {
    let spans = segment(document);
    info!("Generating HTML deck with {} slides", spans.len());

    let mut html_doc = page_head(&document_title(document));
    if spans.is_empty() {
        html_doc.push_str("<div class=\"empty-deck\">No slides</div>\n");
    }
    for (index, span) in spans.iter().enumerate() {
        html_doc.push_str(&slide_section(span, index, spans.len(), renderer));
    }
    html_doc.push_str("</body>\n</html>");
    html_doc
}

/// Generate a page for one slide, addressed by its 1-based number.
///
/// Numbers out of range are clamped, a missing or zero number shows slide 1.
pub fn generate_slide_page(
    document: &str,
    number: Option<usize>,
    renderer: &dyn MarkdownRenderer,
) -> String {
    let spans = segment(document);
    let mut html_doc = page_head(&document_title(document));
    if spans.is_empty() {
        html_doc.push_str("<div class=\"empty-deck\">No slides</div>\n");
    } else {
        let index = route_to_index(number, spans.len());
        html_doc.push_str(&slide_section(&spans[index], index, spans.len(), renderer));
    }
    html_doc.push_str("</body>\n</html>");
    html_doc
}

/// Utility function to write HTML content to a file
pub fn write_html_to_file(html_content: &str, output_path: &Path) -> Result<()> {
    info!("Writing HTML to file: {:?}", output_path);

    // Ensure parent directory exists
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(SlideError::FileError)?;
        }
    }

    fs::write(output_path, html_content).map_err(SlideError::FileError)?;

    Ok(())
}
