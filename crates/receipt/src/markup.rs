//! Rich text → plain text for receipt headers.

use scraper::{ElementRef, Html, Node};

/// Elements whose text content is never printed.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "template", "head", "title"];

/// Strip all markup from `raw`, decode entities, and collapse whitespace.
///
/// Every element boundary counts as a word break, so `<p>Acme</p><p>Ltd</p>`
/// becomes `Acme Ltd` rather than `AcmeLtd`. Runs of whitespace (including
/// non-breaking spaces) collapse to one space; the result is trimmed.
///
/// Plain text is returned unchanged only when it reads as plain text to an
/// HTML parser: a `<` directly followed by a letter opens a tag, so `x<y`
/// strips to `x`, and entity references such as `&amp;` are decoded. A
/// spaced comparison like `a < b` survives.
pub fn strip_markup(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    let fragment = Html::parse_fragment(raw);
    let mut text = String::with_capacity(raw.len());
    collect_text(fragment.root_element(), &mut text);
    collapse_whitespace(&text)
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if SKIPPED_ELEMENTS.contains(&el.name()) => {}
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    out.push(' ');
                    collect_text(child_el, out);
                    out.push(' ');
                }
            }
            _ => {}
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
