// ABOUTME: Slide rendering for the quickslides engine
// ABOUTME: Turns a content variant into HTML and isolates markdown renderer failures per slide

use crate::classify::ContentVariant;
use crate::errors::{Result, SlideError};
use comrak::{markdown_to_html, ComrakOptions};
use log::warn;
use std::panic::{self, AssertUnwindSafe};

/// Renders the markdown of a rich text slide.
pub trait MarkdownRenderer {
    fn render(&self, markdown: &str) -> Result<String>;
}

/// Markdown renderer backed by comrak, with GFM extensions and raw HTML.
pub struct ComrakRenderer {
    options: ComrakOptions,
}

impl Default for ComrakRenderer {
    fn default() -> Self {
        let mut options = ComrakOptions::default();
        options.render.unsafe_ = true; // Allow raw HTML
        options.extension.table = true;
        options.extension.strikethrough = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        Self { options }
    }
}

impl MarkdownRenderer for ComrakRenderer {
    fn render(&self, markdown: &str) -> Result<String> {
        let html = markdown_to_html(markdown, &self.options);
        // Links leave the presentation instead of replacing it.
        Ok(html.replace("<a href=", "<a target=\"_blank\" rel=\"noopener noreferrer\" href="))
    }
}

/// Escape text for use inside HTML text or a double-quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape a url for a CSS `url("...")` inside a `style` attribute.
fn css_url(url: &str) -> String {
    escape_html(&url.replace('\\', "\\\\").replace('"', "\\\""))
}

/// The panel shown in place of a slide whose renderer failed.
pub fn error_panel(message: &str) -> String {
    format!(
        "<div class=\"slide-error\"><h2>Slide Error</h2><p>There was an error rendering this slide. Please check the Markdown/HTML syntax.</p><pre><code>{}</code></pre></div>",
        escape_html(message)
    )
}

/// Render one slide.
///
/// Never fails: a renderer error or panic on a rich text slide becomes an
/// error panel for that slide only.
pub fn render_variant(variant: &ContentVariant, renderer: &dyn MarkdownRenderer) -> String {
    match variant {
        ContentVariant::PureMarkup { markup } => format!(
            "<iframe class=\"markup-slide\" sandbox=\"allow-scripts\" srcdoc=\"{}\"></iframe>",
            escape_html(markup)
        ),
        ContentVariant::SingleCover { url } => format!(
            "<div class=\"cover-slide\" style=\"background-image: url(&quot;{}&quot;)\" aria-label=\"Slide with cover image\"></div>",
            css_url(url)
        ),
        ContentVariant::SplitCover { first, second } => format!(
            "<div class=\"split-cover-slide\"><div class=\"split-first\" style=\"background-image: url(&quot;{}&quot;)\" aria-label=\"Top-left part of split cover image\"></div><div class=\"split-second\" style=\"background-image: url(&quot;{}&quot;)\" aria-label=\"Bottom-right part of split cover image\"></div></div>",
            css_url(first),
            css_url(second)
        ),
        ContentVariant::RichText { text } => match render_isolated(text, renderer) {
            Ok(html) => format!("<div class=\"markdown-slide\">{}</div>", html),
            Err(e) => {
                warn!("Slide failed to render: {}", e);
                error_panel(&e.to_string())
            }
        },
    }
}

fn render_isolated(text: &str, renderer: &dyn MarkdownRenderer) -> Result<String> {
    match panic::catch_unwind(AssertUnwindSafe(|| renderer.render(text))) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "renderer panicked".to_string());
            Err(SlideError::RenderError(message))
        }
    }
}
