//! Text helpers shared by both renderers
//!
//! Anything that decides what a node's "text" is lives here, because the
//! live tree and the markup scanner must agree on it byte for byte.

use regex::Regex;
use std::sync::OnceLock;

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)<!--.*?-->|<[^>]*>").unwrap())
}

/// Decode character references with the full HTML5 named table, matching
/// what the live tree's parser produces.
///
/// Unknown named references are left untouched.
pub fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

/// Collapse whitespace runs to a single space and trim
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove tags and comments from a markup fragment, keeping text only
pub fn strip_tags(markup: &str) -> String {
    tag_pattern().replace_all(markup, "").into_owned()
}

/// Plain text of a rich-text fragment (tags removed, entities decoded, whitespace collapsed)
pub fn strip_rich_text(markup: &str) -> String {
    collapse_whitespace(&decode_entities(&strip_tags(markup)))
}

/// Escape text for an HTML text or attribute position
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Keep a user-supplied CSS value from breaking out of its declaration
pub fn css_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '<' | '>' | '\\'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// First `max_chars` characters of `text`
pub fn take_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("Tea &amp; Cake"), "Tea & Cake");
        assert_eq!(decode_entities("&copy; 2023"), "© 2023");
        assert_eq!(decode_entities("&#169; &#xA9;"), "© ©");
        assert_eq!(decode_entities("&unknown; stays"), "&unknown; stays");
        assert_eq!(decode_entities("a&nbsp;b"), "a\u{a0}b");
        assert_eq!(decode_entities("Caf&eacute; &euro;5 &hearts;"), "Café €5 ♥");
    }

    #[test]
    fn test_strip_rich_text() {
        let rich = "<p>Hand-thrown <strong>stoneware</strong>,</p>\n<p>fired   &amp; glazed</p>";
        assert_eq!(strip_rich_text(rich), "Hand-thrown stoneware, fired & glazed");
        assert_eq!(strip_rich_text("<!-- note -->Hello"), "Hello");
    }

    #[test]
    fn test_css_value_strips_breakouts() {
        assert_eq!(css_value("red; } body { display:none"), "red  body  display:none");
        assert_eq!(css_value(" 'Playfair Display', serif "), "'Playfair Display', serif");
    }

    #[test]
    fn test_take_chars_respects_char_boundaries() {
        assert_eq!(take_chars("₱₱₱", 2), "₱₱");
        assert_eq!(take_chars("abc", 10), "abc");
    }
}
