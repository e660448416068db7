//! String surgery on raw markup.
//!
//! Every rewrite rule goes through these helpers, so none of them ever
//! touches tag syntax by accident.

use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

fn markup_token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?is)<!--.*?-->|<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>|<[^>]*>")
            .unwrap()
    })
}

pub fn replace_range(markup: &str, range: Range<usize>, with: &str) -> String {
    let mut out = String::with_capacity(markup.len() + with.len());
    out.push_str(&markup[..range.start]);
    out.push_str(with);
    out.push_str(&markup[range.end..]);
    out
}

/// Byte offset of the last `</tag>` (any case), if present
pub fn closing_tag_offset(markup: &str, tag: &str) -> Option<usize> {
    let needle = format!("</{}", tag.to_ascii_lowercase());
    markup.to_ascii_lowercase().rfind(&needle)
}

/// Insert `fragment` right before the last `</tag>`, or append it when the
/// document has no such tag
pub fn insert_before_closing(markup: &str, tag: &str, fragment: &str) -> String {
    let at = closing_tag_offset(markup, tag).unwrap_or(markup.len());
    replace_range(markup, at..at, fragment)
}

/// Rewrite only the text between tags.
///
/// Tags, comments and the bodies of `script`/`style` elements are copied
/// through untouched.
pub fn map_text_segments(markup: &str, mut f: impl FnMut(&str) -> String) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut cursor = 0;

    for token in markup_token_pattern().find_iter(markup) {
        if token.start() > cursor {
            out.push_str(&f(&markup[cursor..token.start()]));
        }
        out.push_str(token.as_str());
        cursor = token.end();
    }
    if cursor < markup.len() {
        out.push_str(&f(&markup[cursor..]));
    }

    out
}

/// Keep the whitespace around a text segment, swap what is inside
pub fn replace_trimmed(segment: &str, with: &str) -> String {
    let start = segment.len() - segment.trim_start().len();
    let end = segment.trim_end().len().max(start);
    format!("{}{}{}", &segment[..start], with, &segment[end..])
}

/// Drop ranges nested inside an earlier range, leaving disjoint ranges in
/// document order
pub fn outermost(mut ranges: Vec<Range<usize>>) -> Vec<Range<usize>> {
    ranges.sort_by_key(|r| (r.start, std::cmp::Reverse(r.end)));
    let mut kept: Vec<Range<usize>> = Vec::new();
    for range in ranges {
        if kept.last().map_or(true, |last| range.start >= last.end) {
            kept.push(range);
        }
    }
    kept
}
