use super::RewriteRule;
use crate::context::RenderContext;
use crate::markup_backend::MarkupRewriter;
use storefront_content::{ApplyScope, RenderBackend};
use tracing::debug;

/// Replays saved element states (text, hidden, deleted, moved) onto the page,
/// through the same render model the editor applies
pub struct ReplayElementStatesRule;

impl RewriteRule for ReplayElementStatesRule {
    fn name(&self) -> &'static str {
        "replay-element-states"
    }

    fn description(&self) -> &'static str {
        "Apply saved element states the way the editor does"
    }

    fn apply(&self, markup: &str, ctx: &RenderContext) -> Option<String> {
        let mut rewriter = MarkupRewriter::new(markup);
        let applied = rewriter.apply_model(&ctx.model, ApplyScope::STATES_ONLY);
        debug!(applied, orphans = ctx.model.orphans.len(), "Replayed element states");

        let out = rewriter.into_markup();
        (out != markup).then_some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::Fixture;
    use crate::rules::StampElementIdsRule;
    use storefront_content::{ElementId, ElementState};

    const MARKUP: &str = r#"<body><h1>Title</h1><p class="footer-text">Footer</p><p class="tagline">Tag</p></body>"#;

    #[test]
    fn test_states_replayed_by_id() {
        let mut fixture = Fixture::new(MARKUP);
        fixture.content.element_states.insert(
            ElementId::new("p-footer-text-footer"),
            ElementState {
                hidden: true,
                text: Some("Edited".into()),
                ..Default::default()
            },
        );
        fixture.content.element_states.insert(
            ElementId::new("p-tagline-tag"),
            ElementState {
                offset_left: 12.0,
                offset_top: -3.0,
                ..Default::default()
            },
        );
        let ctx = fixture.context();
        let stamped = StampElementIdsRule.apply(MARKUP, &ctx).unwrap();
        let out = ReplayElementStatesRule.apply(&stamped, &ctx).unwrap();

        assert!(out.contains(
            r#"<p style="display: none;" data-sf-id="p-footer-text-footer" class="footer-text">Edited</p>"#
        ));
        assert!(out.contains(
            r#"<p style="position: relative; left: 12px; top: -3px;" data-sf-id="p-tagline-tag" class="tagline">Tag</p>"#
        ));
    }

    #[test]
    fn test_orphans_are_ignored() {
        let mut fixture = Fixture::new(MARKUP);
        fixture
            .content
            .element_states
            .insert(ElementId::new("p-gone"), ElementState { deleted: true, ..Default::default() });
        let ctx = fixture.context();
        let stamped = StampElementIdsRule.apply(MARKUP, &ctx).unwrap();
        assert!(ReplayElementStatesRule.apply(&stamped, &ctx).is_none());
    }
}
