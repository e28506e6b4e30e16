//! Markup extraction
//!
//! This module turns HTML into the two things a harvest keeps:
//! - The human-visible text, one trimmed text node per line
//! - The `src` of every `<img>`, in document order
//!
//! Parsing is lenient. Malformed markup never produces an error; at worst it
//! yields empty text and no image references.

use html5ever::driver::{self, ParseOpts};
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use scraper::node::Node;
use scraper::{Html, Selector};

/// Elements whose text content is never visible
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Content extracted from one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedContent {
    /// Visible text, newline separated
    pub text: String,

    /// Raw `src` values of image elements; never contains empty strings
    pub image_refs: Vec<String>,
}

/// Extracts visible text and image references from HTML
///
/// # Example
///
/// ```
/// use page_harvest::scrape::extract;
///
/// let content = extract(r#"<html><body><p>Hi</p><img src="/a.png"></body></html>"#);
/// assert_eq!(content.text, "Hi");
/// assert_eq!(content.image_refs, vec!["/a.png".to_string()]);
/// ```
pub fn extract(html: &str) -> ExtractedContent {
    let document = parse_document(html);

    ExtractedContent {
        text: extract_text(&document),
        image_refs: extract_image_refs(&document),
    }
}

/// Parses with scripting disabled
///
/// `<noscript>` content then becomes real elements, so lazy-loaded fallback
/// images are found. Its text is still skipped by `extract_text`.
fn parse_document(html: &str) -> Html {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    driver::parse_document(Html::new_document(), opts).one(html)
}

/// Collects every visible text node, trimmed, one per line
fn extract_text(document: &Html) -> String {
    let mut lines: Vec<&str> = Vec::new();

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let trimmed = text.trim();
        if trimmed.is_empty() {
            continue;
        }

        let hidden = node.ancestors().any(|ancestor| match ancestor.value() {
            Node::Element(element) => HIDDEN_ELEMENTS.contains(&element.name()),
            _ => false,
        });
        if hidden {
            continue;
        }

        lines.push(trimmed);
    }

    lines.join("\n")
}

/// Collects non-empty `src` attributes of `<img>` elements
fn extract_image_refs(document: &Html) -> Vec<String> {
    let mut refs = Vec::new();

    if let Ok(img_selector) = Selector::parse("img[src]") {
        for element in document.select(&img_selector) {
            if let Some(src) = element.value().attr("src") {
                let src = src.trim();
                if !src.is_empty() {
                    refs.push(src.to_string());
                }
            }
        }
    }

    refs
}
