use super::RewriteRule;
use crate::context::RenderContext;
use crate::markup_backend::MarkupRewriter;
use storefront_content::{ApplyScope, HeroRole, RenderBackend};

/// Replaces the text of one hero node with its content value.
///
/// The node and the fallback chain (title → display name, subtitle → store
/// description) come from the render model.
pub struct HeroTextRule {
    role: HeroRole,
}

impl HeroTextRule {
    pub fn new(role: HeroRole) -> Self {
        Self { role }
    }
}

impl RewriteRule for HeroTextRule {
    fn name(&self) -> &'static str {
        match self.role {
            HeroRole::Title => "hero-title",
            HeroRole::Subtitle => "hero-subtitle",
            HeroRole::Button => "hero-button",
        }
    }

    fn description(&self) -> &'static str {
        match self.role {
            HeroRole::Title => "Replace the first heading with the hero title",
            HeroRole::Subtitle => "Replace the hero paragraph with the plain-text subtitle",
            HeroRole::Button => "Replace the hero button label when one is set",
        }
    }

    fn apply(&self, markup: &str, ctx: &RenderContext) -> Option<String> {
        let entry = ctx.model.entry_for_role(self.role)?;
        entry.content.as_ref()?;

        let mut rewriter = MarkupRewriter::new(markup);
        rewriter.apply_entry(entry, ApplyScope::CONTENT_ONLY);
        let out = rewriter.into_markup();
        (out != markup).then_some(out)
    }
}
