//! [`RenderBackend`] over a markup string.
//!
//! Nodes are addressed by their stamped `data-sf-id`, located with the pattern
//! scanner on every call. Content goes into the element body; visibility and
//! offsets go into the open tag's inline `style`, the same declarations the
//! live editor writes.

use crate::splice::replace_range;
use storefront_content::markup_scan::{attribute_spans, find_by_id, ScannedElement};
use storefront_content::text::escape_html;
use storefront_content::{ElementId, Offset, RenderBackend, Visibility};

fn px(value: f64) -> String {
    format!("{}px", value)
}

pub struct MarkupRewriter {
    markup: String,
}

impl MarkupRewriter {
    pub fn new(markup: impl Into<String>) -> Self {
        Self { markup: markup.into() }
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn into_markup(self) -> String {
        self.markup
    }

    fn find(&self, id: &ElementId) -> Option<ScannedElement> {
        find_by_id(&self.markup, id.as_str())
    }

    /// Set or remove inline style declarations on the element's open tag
    fn restyle(&mut self, id: &ElementId, changes: &[(&str, Option<String>)]) -> bool {
        let Some(element) = self.find(id) else {
            return false;
        };
        // Attributes follow `<tag`
        let section_start = element.open.start + 1 + element.tag.len();
        let section = &self.markup[section_start..element.open.end];

        let existing = attribute_spans(section).into_iter().find(|attr| attr.name == "style");
        let mut decls = existing
            .as_ref()
            .map(|attr| parse_style(&attr.value))
            .unwrap_or_default();

        for (property, value) in changes {
            match value {
                Some(value) => match decls.iter_mut().find(|(p, _)| p == property) {
                    Some((_, v)) => *v = value.clone(),
                    None => decls.push((property.to_string(), value.clone())),
                },
                None => decls.retain(|(p, _)| p != property),
            }
        }

        let attribute = if decls.is_empty() {
            String::new()
        } else {
            format!(" style=\"{}\"", escape_html(&format_style(&decls)))
        };

        let range = match &existing {
            Some(attr) => {
                // Take the whitespace before the attribute along with it
                let leading = section[..attr.range.start].len() - section[..attr.range.start].trim_end().len();
                section_start + attr.range.start - leading..section_start + attr.range.end
            }
            None => section_start..section_start,
        };
        self.markup = replace_range(&self.markup, range, &attribute);
        true
    }
}

impl RenderBackend for MarkupRewriter {
    fn set_content(&mut self, id: &ElementId, text: &str) -> bool {
        let Some(element) = self.find(id) else {
            return false;
        };
        if element.close.is_empty() {
            return false;
        }

        let escaped = escape_html(text);
        if self.markup[element.inner.clone()] != escaped {
            self.markup = replace_range(&self.markup, element.inner, &escaped);
        }
        true
    }

    fn set_visibility(&mut self, id: &ElementId, visibility: Visibility) -> bool {
        let display = (!visibility.is_visible()).then(|| "none".to_string());
        self.restyle(id, &[("display", display)])
    }

    fn set_offset(&mut self, id: &ElementId, offset: Offset) -> bool {
        if offset.is_zero() {
            return self.restyle(id, &[("position", None), ("left", None), ("top", None)]);
        }
        self.restyle(
            id,
            &[
                ("position", Some("relative".to_string())),
                ("left", Some(px(offset.left))),
                ("top", Some(px(offset.top))),
            ],
        )
    }
}

fn parse_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (prop, value) = decl.split_once(':')?;
            let prop = prop.trim().to_ascii_lowercase();
            let value = value.trim();
            (!prop.is_empty() && !value.is_empty()).then(|| (prop, value.to_string()))
        })
        .collect()
}

fn format_style(decls: &[(String, String)]) -> String {
    decls
        .iter()
        .map(|(p, v)| format!("{}: {};", p, v))
        .collect::<Vec<_>>()
        .join(" ")
}
