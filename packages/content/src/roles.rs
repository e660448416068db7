//! Which template nodes carry the hero content.
//!
//! Roles are picked from the resolved selectable list, so the editor (tree
//! scan) and the static renderer (pattern scan) land on the same nodes.

use crate::identity::{ElementId, IdentifiedElement};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

fn subtitle_class_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)\b(hero[-_][a-z-]*|subtitle|tagline|lead)\b").unwrap())
}

fn button_class_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)\b(hero-btn|cta-button|cta)\b").unwrap())
}

/// Hero slot a node fills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HeroRole {
    Title,
    Subtitle,
    Button,
}

/// Ids of the nodes bound to each hero slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeroRoles {
    pub title: Option<ElementId>,
    pub subtitle: Option<ElementId>,
    pub button: Option<ElementId>,
}

impl HeroRoles {
    /// Assign roles from selectable elements in document order.
    ///
    /// - title: the first heading
    /// - subtitle: the first paragraph with a hero-ish class, else the first
    ///   paragraph after the title
    /// - button: the first element with a call-to-action class, else the first
    ///   `button` / `.btn` after the title
    pub fn assign(elements: &[IdentifiedElement]) -> Self {
        let title_index = elements.iter().position(|e| e.descriptor.is_heading());
        let after_title = |idx: &usize| title_index.map_or(true, |t| *idx > t);

        let subtitle = elements
            .iter()
            .find(|e| e.descriptor.tag == "p" && subtitle_class_pattern().is_match(&e.descriptor.class))
            .or_else(|| {
                elements
                    .iter()
                    .enumerate()
                    .filter(|(idx, _)| after_title(idx))
                    .map(|(_, e)| e)
                    .find(|e| e.descriptor.tag == "p")
            });

        let button = elements
            .iter()
            .find(|e| button_class_pattern().is_match(&e.descriptor.class))
            .or_else(|| {
                elements
                    .iter()
                    .enumerate()
                    .filter(|(idx, _)| after_title(idx))
                    .map(|(_, e)| e)
                    .find(|e| e.descriptor.tag == "button" || e.descriptor.has_class("btn"))
            });

        Self {
            title: title_index.map(|idx| elements[idx].id.clone()),
            subtitle: subtitle.map(|e| e.id.clone()),
            button: button.map(|e| e.id.clone()),
        }
    }

    pub fn role_of(&self, id: &ElementId) -> Option<HeroRole> {
        if self.title.as_ref() == Some(id) {
            Some(HeroRole::Title)
        } else if self.subtitle.as_ref() == Some(id) {
            Some(HeroRole::Subtitle)
        } else if self.button.as_ref() == Some(id) {
            Some(HeroRole::Button)
        } else {
            None
        }
    }

    pub fn id_for(&self, role: HeroRole) -> Option<&ElementId> {
        match role {
            HeroRole::Title => self.title.as_ref(),
            HeroRole::Subtitle => self.subtitle.as_ref(),
            HeroRole::Button => self.button.as_ref(),
        }
    }
}
