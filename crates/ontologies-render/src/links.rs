//! Cross-reference link substitution.

use ontologies_core::reference_regex;
use std::borrow::Cow;

/// Replace every `[[Name]]` with `<a href="#Name">Name</a>`.
///
/// Targets are not checked; a reference to a missing page is a dangling anchor.
pub fn link_references(html: &str) -> Cow<'_, str> {
    reference_regex().replace_all(html, r##"<a href="#${1}">${1}</a>"##)
}

/// Escape text for an HTML text node.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}
