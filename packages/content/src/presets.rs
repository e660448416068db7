//! Named text styles that can be stamped onto hero slots.

use crate::model::{ContentDocument, Preset, TextStyle};
use crate::roles::HeroRole;
use tracing::debug;

/// Presets every store starts with
pub fn builtin_presets() -> Vec<Preset> {
    vec![
        Preset {
            name: "Elegant".to_string(),
            style: TextStyle {
                font_family: Some("'Playfair Display', Georgia, serif".to_string()),
                font_weight: Some("400".to_string()),
                font_style: Some("italic".to_string()),
                center: Some(true),
                ..Default::default()
            },
        },
        Preset {
            name: "Bold".to_string(),
            style: TextStyle {
                font_family: Some("'Helvetica Neue', Arial, sans-serif".to_string()),
                font_weight: Some("800".to_string()),
                ..Default::default()
            },
        },
        Preset {
            name: "Minimal".to_string(),
            style: TextStyle {
                font_family: Some("'Inter', system-ui, sans-serif".to_string()),
                font_weight: Some("300".to_string()),
                color: Some("#1a1a1a".to_string()),
                ..Default::default()
            },
        },
    ]
}

impl ContentDocument {
    pub fn preset(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }

    /// Add a preset, replacing one with the same name
    pub fn upsert_preset(&mut self, preset: Preset) {
        match self.presets.iter_mut().find(|p| p.name == preset.name) {
            Some(existing) => existing.style = preset.style,
            None => self.presets.push(preset),
        }
    }

    pub fn remove_preset(&mut self, name: &str) -> Option<Preset> {
        let idx = self.presets.iter().position(|p| p.name == name)?;
        Some(self.presets.remove(idx))
    }

    /// Copy a preset's style onto a hero slot. Returns false if no such preset.
    pub fn apply_preset(&mut self, name: &str, role: HeroRole) -> bool {
        let style = match self.preset(name) {
            Some(preset) => preset.style.clone(),
            None => return false,
        };

        debug!(preset = %name, role = ?role, "Applying preset");
        *self.hero.style_mut(role) = style;
        true
    }
}

impl crate::model::HeroContent {
    pub fn style(&self, role: HeroRole) -> &TextStyle {
        match role {
            HeroRole::Title => &self.title_style,
            HeroRole::Subtitle => &self.subtitle_style,
            HeroRole::Button => &self.button_style,
        }
    }

    pub fn style_mut(&mut self, role: HeroRole) -> &mut TextStyle {
        match role {
            HeroRole::Title => &mut self.title_style,
            HeroRole::Subtitle => &mut self.subtitle_style,
            HeroRole::Button => &mut self.button_style,
        }
    }
}
