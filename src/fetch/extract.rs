//! HTML → plain text extraction.

use scraper::{Html, Node};

use crate::utils::collapse_whitespace;

/// Elements whose text is never part of the readable content.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style"];

/// Extract the readable text of an HTML document.
///
/// Text nodes are concatenated in document order, skipping anything nested in
/// a `script` or `style` element. Comments and the doctype are not text nodes
/// and never appear. The result is flattened with [`collapse_whitespace`].
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut raw = String::with_capacity(html.len() / 2);

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let skipped = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| SKIPPED_ELEMENTS.contains(&el.name()))
        });
        if !skipped {
            raw.push_str(text);
        }
    }

    collapse_whitespace(&raw)
}
