//! # Render Model
//!
//! The one description of "what to change on the template" that both
//! renderers consume. Built from the selectable elements of a template (in
//! document order) plus the content document; applied through the
//! [`RenderBackend`] trait, implemented by the editor's tree and by the static
//! renderer's markup rewriter.
//!
//! A new kind of override is added here once and both backends pick it up
//! through the trait.

use crate::identity::{ElementId, IdentifiedElement};
use crate::model::{ContentDocument, ElementState, TextStyle};
use crate::roles::{HeroRole, HeroRoles};
use crate::store::StoreProfile;
use crate::text::strip_rich_text;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
    Deleted,
}

impl Visibility {
    pub fn from_state(state: &ElementState) -> Self {
        if state.deleted {
            Visibility::Deleted
        } else if state.hidden {
            Visibility::Hidden
        } else {
            Visibility::Visible
        }
    }

    pub fn is_visible(&self) -> bool {
        *self == Visibility::Visible
    }
}

/// Pixel offset from the template position
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub left: f64,
    pub top: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset { left: 0.0, top: 0.0 };

    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }

    pub fn is_zero(&self) -> bool {
        self.left == 0.0 && self.top == 0.0
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.left + dx, self.top + dy)
    }
}

/// Everything to apply to one node
#[derive(Debug, Clone, PartialEq)]
pub struct RenderEntry {
    pub id: ElementId,
    pub role: Option<HeroRole>,
    /// Text from the hero content (with store fallbacks)
    pub content: Option<String>,
    /// Text from an inline-edit override
    pub text_override: Option<String>,
    pub style: Option<TextStyle>,
    pub visibility: Visibility,
    pub offset: Offset,
}

impl RenderEntry {
    fn new(id: ElementId) -> Self {
        Self {
            id,
            role: None,
            content: None,
            text_override: None,
            style: None,
            visibility: Visibility::Visible,
            offset: Offset::ZERO,
        }
    }

    pub fn has_state(&self) -> bool {
        self.text_override.is_some() || !self.visibility.is_visible() || !self.offset.is_zero()
    }
}

/// Which parts of an entry a backend should apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyScope {
    pub content: bool,
    pub element_states: bool,
}

impl ApplyScope {
    pub const ALL: ApplyScope = ApplyScope {
        content: true,
        element_states: true,
    };
    pub const CONTENT_ONLY: ApplyScope = ApplyScope {
        content: true,
        element_states: false,
    };
    pub const STATES_ONLY: ApplyScope = ApplyScope {
        content: false,
        element_states: true,
    };
}

/// Ordered overrides for one (template, content, store) triple
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderModel {
    pub roles: HeroRoles,
    pub entries: Vec<RenderEntry>,
    /// Override keys with no matching node in the template
    pub orphans: Vec<ElementId>,
}

impl RenderModel {
    pub fn build(elements: &[IdentifiedElement], content: &ContentDocument, store: &StoreProfile) -> Self {
        let roles = HeroRoles::assign(elements);
        let mut entries = Vec::new();

        for element in elements {
            let mut entry = RenderEntry::new(element.id.clone());
            entry.role = roles.role_of(&element.id);

            if let Some(role) = entry.role {
                entry.content = hero_text(role, content, store);
                let style = content.hero.style(role);
                if !style.is_empty() {
                    entry.style = Some(style.clone());
                }
            }

            if let Some(state) = content.element_states.get(&element.id) {
                entry.visibility = Visibility::from_state(state);
                entry.offset = Offset::new(state.offset_left, state.offset_top);
                if entry.role.is_none() {
                    entry.text_override = state.text.clone();
                }
            }

            if entry.role.is_some() || entry.has_state() {
                entries.push(entry);
            }
        }

        let known: HashSet<&ElementId> = elements.iter().map(|e| &e.id).collect();
        let orphans: Vec<ElementId> = content
            .element_states
            .keys()
            .filter(|id| !known.contains(id))
            .cloned()
            .collect();
        for orphan in &orphans {
            warn!(id = %orphan, "Element override has no matching node in the template");
        }

        debug!(entries = entries.len(), orphans = orphans.len(), "Built render model");
        Self { roles, entries, orphans }
    }

    pub fn entry(&self, id: &ElementId) -> Option<&RenderEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    pub fn entry_for_role(&self, role: HeroRole) -> Option<&RenderEntry> {
        self.entries.iter().find(|e| e.role == Some(role))
    }

    /// Entries carrying a style, for the typography stylesheet
    pub fn styled_entries(&self) -> impl Iterator<Item = (&ElementId, &TextStyle)> {
        self.entries
            .iter()
            .filter_map(|e| e.style.as_ref().map(|style| (&e.id, style)))
    }
}

/// Hero slot text after fallbacks: title → display name, subtitle → description
fn hero_text(role: HeroRole, content: &ContentDocument, store: &StoreProfile) -> Option<String> {
    let non_blank = |s: &str| {
        let trimmed = s.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    };

    match role {
        HeroRole::Title => non_blank(&content.hero.title).or_else(|| non_blank(&store.display_name)),
        HeroRole::Subtitle => {
            non_blank(&strip_rich_text(&content.hero.subtitle)).or_else(|| non_blank(&store.description))
        }
        HeroRole::Button => non_blank(&content.hero.button_text),
    }
}

/// Something the render model can be applied to.
///
/// Setters return false when the node is not present; callers treat that as a
/// silent no-op.
pub trait RenderBackend {
    fn set_content(&mut self, id: &ElementId, text: &str) -> bool;

    fn set_visibility(&mut self, id: &ElementId, visibility: Visibility) -> bool;

    fn set_offset(&mut self, id: &ElementId, offset: Offset) -> bool;

    fn apply_entry(&mut self, entry: &RenderEntry, scope: ApplyScope) -> bool {
        let mut applied = false;

        if scope.content {
            if let Some(text) = &entry.content {
                applied |= self.set_content(&entry.id, text);
            }
        }

        if scope.element_states {
            if let Some(text) = &entry.text_override {
                applied |= self.set_content(&entry.id, text);
            }
            if !entry.visibility.is_visible() {
                applied |= self.set_visibility(&entry.id, entry.visibility);
            }
            if !entry.offset.is_zero() {
                applied |= self.set_offset(&entry.id, entry.offset);
            }
        }

        applied
    }

    /// Apply every entry in order, returning how many touched a node
    fn apply_model(&mut self, model: &RenderModel, scope: ApplyScope) -> usize {
        model
            .entries
            .iter()
            .filter(|entry| self.apply_entry(entry, scope))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{ElementDescriptor, IdentityResolver};
    use std::collections::HashMap;

    fn elements() -> Vec<IdentifiedElement> {
        IdentityResolver::resolve_all(vec![
            ElementDescriptor::new("a", "logo", "LUXE"),
            ElementDescriptor::new("h1", "", "Template Title"),
            ElementDescriptor::new("p", "hero-subtitle", "Template subtitle"),
            ElementDescriptor::new("a", "btn hero-btn", "Shop"),
            ElementDescriptor::new("p", "footer-text", "Footer"),
        ])
    }

    #[derive(Default)]
    struct Recorder {
        content: HashMap<String, String>,
        visibility: HashMap<String, Visibility>,
        offsets: HashMap<String, Offset>,
    }

    impl RenderBackend for Recorder {
        fn set_content(&mut self, id: &ElementId, text: &str) -> bool {
            self.content.insert(id.to_string(), text.to_string());
            true
        }

        fn set_visibility(&mut self, id: &ElementId, visibility: Visibility) -> bool {
            self.visibility.insert(id.to_string(), visibility);
            true
        }

        fn set_offset(&mut self, id: &ElementId, offset: Offset) -> bool {
            self.offsets.insert(id.to_string(), offset);
            true
        }
    }

    #[test]
    fn test_blank_title_falls_back_to_display_name() {
        let store = StoreProfile {
            display_name: "Fireside Pottery".into(),
            description: "Stoneware from the hills".into(),
            ..Default::default()
        };
        let model = RenderModel::build(&elements(), &ContentDocument::new(), &store);

        let title = model.entry_for_role(HeroRole::Title).unwrap();
        assert_eq!(title.content.as_deref(), Some("Fireside Pottery"));
        let subtitle = model.entry_for_role(HeroRole::Subtitle).unwrap();
        assert_eq!(subtitle.content.as_deref(), Some("Stoneware from the hills"));
        let button = model.entry_for_role(HeroRole::Button).unwrap();
        assert_eq!(button.content, None);
    }

    #[test]
    fn test_rich_subtitle_is_stripped() {
        let mut content = ContentDocument::new();
        content.hero.subtitle = "<p>Small <b>batch</b></p>".into();
        let model = RenderModel::build(&elements(), &content, &StoreProfile::default());
        assert_eq!(
            model.entry_for_role(HeroRole::Subtitle).unwrap().content.as_deref(),
            Some("Small batch")
        );
    }

    #[test]
    fn test_states_and_orphans() {
        let mut content = ContentDocument::new();
        content.element_states.insert(
            ElementId::new("p-footer-text-footer"),
            ElementState {
                hidden: true,
                offset_left: 4.0,
                text: Some("Edited footer".into()),
                ..Default::default()
            },
        );
        content
            .element_states
            .insert(ElementId::new("p-gone"), ElementState { deleted: true, ..Default::default() });

        let model = RenderModel::build(&elements(), &content, &StoreProfile::default());
        assert_eq!(model.orphans, vec![ElementId::new("p-gone")]);

        let footer = model.entry(&ElementId::new("p-footer-text-footer")).unwrap();
        assert_eq!(footer.visibility, Visibility::Hidden);
        assert_eq!(footer.offset, Offset::new(4.0, 0.0));
        assert_eq!(footer.text_override.as_deref(), Some("Edited footer"));

        assert!(model.entry(&ElementId::new("a-logo-luxe")).is_none());
    }

    #[test]
    fn test_scope_controls_what_a_backend_receives() {
        let mut content = ContentDocument::new();
        content.hero.title = "New".into();
        content.element_states.insert(
            ElementId::new("h1-template-title"),
            ElementState { offset_top: 10.0, ..Default::default() },
        );
        let model = RenderModel::build(&elements(), &content, &StoreProfile::default());

        let mut content_only = Recorder::default();
        content_only.apply_model(&model, ApplyScope::CONTENT_ONLY);
        assert_eq!(content_only.content["h1-template-title"], "New");
        assert!(content_only.offsets.is_empty());

        let mut all = Recorder::default();
        all.apply_model(&model, ApplyScope::ALL);
        assert_eq!(all.offsets["h1-template-title"], Offset::new(0.0, 10.0));
    }
}
