//! # Markup Scanner
//!
//! Pattern-based element discovery over raw markup. No tree is built: open
//! tags are matched with a regular expression and each element's extent is
//! found by counting same-name open/close tags from the open tag onwards.
//!
//! Comments and raw-text elements (`script`, `style`, `textarea`) are skipped
//! so tag-like text inside them never matches.
//!
//! This is the static renderer's half of the identity contract. The editor's
//! half walks a parsed tree; both feed the same
//! [`IdentityResolver`](crate::IdentityResolver) and must agree.

use crate::identity::{
    is_allow_listed, ElementDescriptor, IdentifiedElement, IdentityResolver, GENERATED_ATTRIBUTE,
    ID_ATTRIBUTE,
};
use crate::text::{collapse_whitespace, decode_entities, strip_tags};
use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9-]*)((?:\s[^<>]*?)?)\s*(/?)>").unwrap())
}

fn skip_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?is)<!--.*?-->|<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>|<textarea\b[^>]*>.*?</textarea\s*>",
        )
        .unwrap()
    })
}

fn attribute_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"([^\s"'=<>/]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#).unwrap()
    })
}

pub fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

/// One element located in raw markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedElement {
    /// Lowercase tag name
    pub tag: String,
    /// Attributes in source order, names lowercased, values entity-decoded
    pub attributes: Vec<(String, String)>,
    /// Byte range of the open tag
    pub open: Range<usize>,
    /// Byte range between the open and close tag (empty for void elements)
    pub inner: Range<usize>,
    /// Byte range of the close tag (empty, at `open.end`, when there is none)
    pub close: Range<usize>,
}

impl ScannedElement {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn class(&self) -> &str {
        self.attribute("class").unwrap_or("")
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.class().split_whitespace().any(|c| c == name)
    }

    /// Whole element including both tags
    pub fn outer(&self) -> Range<usize> {
        self.open.start..self.close.end.max(self.open.end)
    }

    /// Collapsed, decoded text content
    pub fn text(&self, markup: &str) -> String {
        collapse_whitespace(&decode_entities(&strip_tags(&markup[self.inner.clone()])))
    }

    pub fn descriptor(&self, markup: &str) -> ElementDescriptor {
        ElementDescriptor::new(self.tag.clone(), self.class(), &self.text(markup))
            .with_existing_id(self.attribute(ID_ATTRIBUTE).map(str::to_string))
    }
}

/// A selectable element and the id it resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedSelectable {
    pub element: ScannedElement,
    pub identified: IdentifiedElement,
}

/// One attribute of an open tag, with its decoded value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSpan {
    pub name: String,
    pub value: String,
    /// Byte range of `name=value` within the scanned section
    pub range: Range<usize>,
}

/// Attributes of an open tag section with their positions.
///
/// Double-quoted, single-quoted and unquoted values are all accepted.
pub fn attribute_spans(section: &str) -> Vec<AttributeSpan> {
    attribute_pattern()
        .captures_iter(section)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| decode_entities(m.as_str()))
                .unwrap_or_default();
            Some(AttributeSpan {
                name: caps[1].to_ascii_lowercase(),
                value,
                range: whole.range(),
            })
        })
        .collect()
}

/// Parse the attribute section of an open tag
pub fn parse_attributes(section: &str) -> Vec<(String, String)> {
    attribute_spans(section)
        .into_iter()
        .map(|attr| (attr.name, attr.value))
        .collect()
}

fn skip_ranges(markup: &str) -> Vec<Range<usize>> {
    skip_pattern()
        .find_iter(markup)
        .map(|m| {
            // Keep the raw-text element's own open tag visible to the scan
            let text = m.as_str();
            if text.starts_with("<!--") {
                m.range()
            } else {
                let open_end = text.find('>').map(|i| m.start() + i + 1).unwrap_or(m.start());
                let close_start = text.rfind("</").map(|i| m.start() + i).unwrap_or(m.end());
                open_end..close_start
            }
        })
        .collect()
}

fn in_ranges(ranges: &[Range<usize>], pos: usize) -> bool {
    ranges.iter().any(|r| r.contains(&pos))
}

/// Every element in the markup, in document order
pub fn scan_elements(markup: &str) -> Vec<ScannedElement> {
    let skips = skip_ranges(markup);
    let mut elements = Vec::new();

    for caps in tag_pattern().captures_iter(markup) {
        let whole = match caps.get(0) {
            Some(m) => m,
            None => continue,
        };
        if !caps[1].is_empty() || in_ranges(&skips, whole.start()) {
            continue;
        }

        let tag = caps[2].to_ascii_lowercase();
        let attributes = parse_attributes(caps.get(3).map(|m| m.as_str()).unwrap_or(""));
        let self_closing = !caps[4].is_empty();
        let open = whole.range();

        let (inner, close) = if self_closing || is_void_tag(&tag) {
            (open.end..open.end, open.end..open.end)
        } else {
            match find_close(markup, &tag, open.end, &skips) {
                Some(close) => (open.end..close.start, close),
                None => (open.end..open.end, open.end..open.end),
            }
        };

        elements.push(ScannedElement {
            tag,
            attributes,
            open,
            inner,
            close,
        });
    }

    elements
}

/// Locate the close tag balancing an element opened just before `from`
fn find_close(markup: &str, tag: &str, from: usize, skips: &[Range<usize>]) -> Option<Range<usize>> {
    let mut depth = 1usize;

    for caps in tag_pattern().captures_iter(&markup[from..]) {
        let whole = caps.get(0)?;
        let start = from + whole.start();
        if in_ranges(skips, start) || !caps[2].eq_ignore_ascii_case(tag) {
            continue;
        }

        if !caps[1].is_empty() {
            depth -= 1;
            if depth == 0 {
                return Some(start..from + whole.end());
            }
        } else if caps[4].is_empty() {
            depth += 1;
        }
    }

    None
}

/// Allow-listed elements with their ids, in document order.
///
/// Elements inside a generated subtree are excluded.
pub fn scan_selectable(markup: &str) -> Vec<ScannedSelectable> {
    let elements = scan_elements(markup);
    let generated: Vec<Range<usize>> = elements
        .iter()
        .filter(|e| e.attribute(GENERATED_ATTRIBUTE).is_some())
        .map(ScannedElement::outer)
        .collect();

    let mut resolver = IdentityResolver::new();
    elements
        .into_iter()
        .filter(|e| is_allow_listed(&e.tag, e.class()))
        .filter(|e| !in_ranges(&generated, e.open.start))
        .map(|element| {
            let descriptor = element.descriptor(markup);
            let id = resolver.resolve(&descriptor);
            ScannedSelectable {
                element,
                identified: IdentifiedElement { id, descriptor },
            }
        })
        .collect()
}

/// Element carrying `data-sf-id="<id>"`
pub fn find_by_id(markup: &str, id: &str) -> Option<ScannedElement> {
    scan_elements(markup)
        .into_iter()
        .find(|e| e.attribute(ID_ATTRIBUTE) == Some(id))
}
