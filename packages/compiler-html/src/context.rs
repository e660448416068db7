use chrono::Datelike;
use serde::{Deserialize, Serialize};
use storefront_content::markup_scan::scan_selectable;
use storefront_content::text::escape_html;
use storefront_content::{AssetResolver, ContentDocument, IdentifiedElement, RenderModel, StoreProfile};
use storefront_products::Product;
use storefront_templates::{TemplateDocument, TemplateKey};

/// Whether saved element states (hidden, deleted, moved) reach the public page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementStateReplay {
    /// Public page shows the template layout; states only exist in the editor
    #[default]
    Skip,
    /// Replay states with the same render model the editor applies
    Apply,
}

impl ElementStateReplay {
    pub fn from_flag(apply: bool) -> Self {
        if apply {
            ElementStateReplay::Apply
        } else {
            ElementStateReplay::Skip
        }
    }
}

/// Options for static rendering
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub element_state_replay: ElementStateReplay,
    /// Year in the copyright notice. When unset the local calendar year is
    /// used, so output for fixed inputs only stays byte-identical within
    /// one year; pin it for reproducible renders.
    pub copyright_year: Option<i32>,
}

/// Everything a rewrite rule may read.
///
/// The render model is built once from the pristine template, so every rule
/// sees the same ids whatever earlier rules did to the text.
pub struct RenderContext<'a> {
    pub template_key: TemplateKey,
    pub content: &'a ContentDocument,
    pub products: &'a [Product],
    pub store: &'a StoreProfile,
    pub resolver: &'a dyn AssetResolver,
    pub model: RenderModel,
    pub copyright_year: i32,
    pub element_state_replay: ElementStateReplay,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        template: &TemplateDocument,
        content: &'a ContentDocument,
        products: &'a [Product],
        store: &'a StoreProfile,
        resolver: &'a dyn AssetResolver,
        options: &RenderOptions,
    ) -> Self {
        let elements: Vec<IdentifiedElement> = scan_selectable(&template.raw_markup)
            .into_iter()
            .map(|s| s.identified)
            .collect();

        Self {
            template_key: template.key,
            content,
            products,
            store,
            resolver,
            model: RenderModel::build(&elements, content, store),
            copyright_year: options
                .copyright_year
                .unwrap_or_else(|| chrono::Local::now().year()),
            element_state_replay: options.element_state_replay,
        }
    }

    pub fn placeholder_brand(&self) -> &'static str {
        self.template_key.placeholder_brand()
    }

    /// Escaped brand text, `None` when the store has neither domain nor name
    pub fn brand(&self) -> Option<String> {
        self.store.brand_text().map(|brand| escape_html(&brand))
    }

    /// Escaped standard copyright line
    pub fn copyright_notice(&self) -> Option<String> {
        let owner = self.store.display_name.trim();
        let owner = if owner.is_empty() {
            self.store.brand_text()?
        } else {
            owner.to_string()
        };
        Some(escape_html(&format!(
            "© {} {}. All rights reserved.",
            self.copyright_year, owner
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::Fixture;

    #[test]
    fn test_copyright_year_pins_or_follows_the_clock() {
        let mut fixture = Fixture::new("<html><body></body></html>");
        assert_eq!(fixture.context().copyright_year, 2026);

        fixture.options.copyright_year = None;
        assert_eq!(fixture.context().copyright_year, chrono::Local::now().year());
    }
}
