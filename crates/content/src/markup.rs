//! Markup escaping and stripping.

use regex::Regex;

#[allow(clippy::unwrap_used)]
static TAG_RE: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Escape HTML special characters.
#[must_use]
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Plain-text preview: every `<...>` span becomes a single space.
#[must_use]
pub fn strip_markup(text: Option<&str>) -> String {
    text.map_or_else(String::new, |t| TAG_RE.replace_all(t, " ").into_owned())
}
