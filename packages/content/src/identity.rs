//! # Element Identity
//!
//! Stable identifiers for template nodes.
//!
//! The override map in a [`ContentDocument`](crate::ContentDocument) is keyed
//! by these ids. The live editor computes them from a parsed tree and the
//! static renderer from a pattern scan of raw markup, so the id must be a pure
//! function of `(tag, class, text)` plus the node's position among collisions:
//!
//! ```text
//! tag-sanitize(class)-sanitize(trim(text)[:60])   → lowercase, [^a-z0-9]+ → "-", max 50 chars
//! (no class, no text)                             → tag-<ordinal>
//! (seen before)                                   → <id>-2, <id>-3, ...
//! ```
//!
//! Editing a template so a node's tag, class or text changes orphans any
//! override saved for it. That is accepted.

use crate::text::{collapse_whitespace, take_chars};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Attribute carrying an already-assigned id
pub const ID_ATTRIBUTE: &str = "data-sf-id";

/// Attribute marking nodes inserted by the renderers (never selectable)
pub const GENERATED_ATTRIBUTE: &str = "data-sf-generated";

/// Tags that are always selectable
pub const SELECTABLE_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6", "p", "button"];

/// Class names that make any element selectable
pub const SELECTABLE_CLASSES: &[&str] = &[
    "logo",
    "brand",
    "nav-link",
    "btn",
    "hero-title",
    "hero-subtitle",
    "hero-text",
    "hero-btn",
    "cta-button",
    "section-title",
    "section-lead",
    "tagline",
    "footer-brand",
    "footer-text",
    "footer-note",
    "copyright",
];

const MAX_TEXT_CHARS: usize = 60;
const MAX_ID_CHARS: usize = 50;

/// Identifier of one template node
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// What the resolver needs to know about a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementDescriptor {
    /// Lowercase tag name
    pub tag: String,
    /// Raw `class` attribute value
    pub class: String,
    /// Text content, whitespace-collapsed and trimmed
    pub text: String,
    /// Id already stamped on the node, if any
    pub existing_id: Option<String>,
}

impl ElementDescriptor {
    pub fn new(tag: impl Into<String>, class: impl Into<String>, text: &str) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            class: class.into(),
            text: collapse_whitespace(text),
            existing_id: None,
        }
    }

    pub fn with_existing_id(mut self, id: Option<String>) -> Self {
        self.existing_id = id.filter(|id| !id.trim().is_empty());
        self
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.class.split_whitespace().any(|c| c == name)
    }

    pub fn is_heading(&self) -> bool {
        matches!(self.tag.as_str(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
    }
}

/// A descriptor paired with the id it resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifiedElement {
    pub id: ElementId,
    pub descriptor: ElementDescriptor,
}

/// Whether a `(tag, class)` pair is on the selectable allow-list
pub fn is_allow_listed(tag: &str, class: &str) -> bool {
    let tag = tag.to_ascii_lowercase();
    SELECTABLE_TAGS.contains(&tag.as_str())
        || class
            .split_whitespace()
            .any(|c| SELECTABLE_CLASSES.contains(&c))
}

/// Lowercase, collapse runs of non-alphanumerics to `-`, trim dashes
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last_dash = true;

    for c in input.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }

    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Base id for a node, `None` when neither class nor text contribute
pub fn compose_base(tag: &str, class: &str, text: &str) -> Option<String> {
    let class_part = sanitize(class);
    let text_part = sanitize(take_chars(text.trim(), MAX_TEXT_CHARS));

    if class_part.is_empty() && text_part.is_empty() {
        return None;
    }

    let joined = [sanitize(tag), class_part, text_part]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    let mut id = take_chars(&joined, MAX_ID_CHARS).to_string();
    while id.ends_with('-') {
        id.pop();
    }
    Some(id)
}

/// Assigns ids to the selectable nodes of one document, in document order
#[derive(Debug, Default)]
pub struct IdentityResolver {
    used: HashSet<String>,
    fallback_ordinals: HashMap<String, usize>,
}

impl IdentityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the next node in document order
    pub fn resolve(&mut self, descriptor: &ElementDescriptor) -> ElementId {
        if let Some(existing) = &descriptor.existing_id {
            self.used.insert(existing.clone());
            return ElementId::new(existing.clone());
        }

        let base = match compose_base(&descriptor.tag, &descriptor.class, &descriptor.text) {
            Some(base) => base,
            None => {
                let tag = sanitize(&descriptor.tag);
                let ordinal = self.fallback_ordinals.entry(tag.clone()).or_insert(0);
                *ordinal += 1;
                format!("{}-{}", tag, ordinal)
            }
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while self.used.contains(&candidate) {
            suffix += 1;
            candidate = format!("{}-{}", base, suffix);
        }

        self.used.insert(candidate.clone());
        ElementId::new(candidate)
    }

    /// Resolve a whole document's worth of descriptors
    pub fn resolve_all(descriptors: Vec<ElementDescriptor>) -> Vec<IdentifiedElement> {
        let mut resolver = Self::new();
        descriptors
            .into_iter()
            .map(|descriptor| IdentifiedElement {
                id: resolver.resolve(&descriptor),
                descriptor,
            })
            .collect()
    }
}
