//! Text extraction from raw body markup.
//!
//! Converts a [`RichBody`] into plain text plus the three structural
//! counts the content scorer consumes. The counts are taken by scanning
//! the raw markup for opening tags, not by walking the parsed DOM: the
//! plain-text conversion discards the structural tags, so counting has to
//! happen before it. Malformed markup never raises an error; tags that do
//! not appear simply count zero.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::document::RichBody;

/// Block elements that become one line each in the plain-text rendering.
const BLOCK_ELEMENTS: [&str; 9] = ["p", "h1", "h2", "h3", "h4", "h5", "h6", "li", "blockquote"];

const BLOCK_SELECTOR: &str = "p, h1, h2, h3, h4, h5, h6, li, blockquote";

/// Derived structural view of one post body.
///
/// Immutable; lives for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Plain-text rendering: tags stripped, whitespace normalized inside
    /// each block, one line per block element.
    pub text: String,
    /// Count of `<h1>`..`<h6>` opening tags in the raw markup.
    pub heading_count: usize,
    /// Count of `<p>` opening tags in the raw markup.
    pub paragraph_count: usize,
    /// Count of `<img>` tags in the raw markup.
    pub image_count: usize,
}

/// Extracts plain text and structural counts from a body.
///
/// Pure function: same body in, same extraction out.
pub fn extract(body: &RichBody) -> Extraction {
    extract_markup(&body.to_markup())
}

/// Extracts plain text and structural counts from a raw markup string.
pub fn extract_markup(markup: &str) -> Extraction {
    Extraction {
        text: markup_to_text(markup),
        heading_count: count_tag(markup, r"(?i)<h[1-6][\s>/]"),
        paragraph_count: count_tag(markup, r"(?i)<p[\s>/]"),
        image_count: count_tag(markup, r"(?i)<img[\s>/]"),
    }
}

fn count_tag(markup: &str, pattern: &str) -> usize {
    let re = Regex::new(pattern).unwrap();
    re.find_iter(markup).count()
}

/// Converts markup to plain text, one line per block element.
///
/// Whitespace inside a block collapses to single spaces. Only outermost
/// block elements are emitted: a `<p>` inside a `<blockquote>` belongs to
/// the blockquote's line, not to a second one. Documents with no
/// recognized block elements fall back to the whole-document text so bare
/// text bodies are not lost.
fn markup_to_text(markup: &str) -> String {
    if markup.trim().is_empty() {
        return String::new();
    }

    let document = Html::parse_document(markup);
    let selector = Selector::parse(BLOCK_SELECTOR).unwrap();

    let mut lines: Vec<String> = Vec::new();
    for element in document.select(&selector) {
        if has_block_ancestor(&element) {
            continue;
        }
        let text = element.text().collect::<String>();
        let line = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if !line.is_empty() {
            lines.push(line);
        }
    }

    if lines.is_empty() {
        let text = document.root_element().text().collect::<String>();
        return text.split_whitespace().collect::<Vec<_>>().join(" ");
    }

    lines.join("\n")
}

fn has_block_ancestor(element: &ElementRef) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| BLOCK_ELEMENTS.contains(&ancestor.value().name().to_lowercase().as_str()))
}
