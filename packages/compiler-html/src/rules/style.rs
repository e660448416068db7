use super::RewriteRule;
use crate::context::RenderContext;
use crate::splice::insert_before_closing;
use storefront_content::stylesheet::{content_css, style_block, STYLE_MARKER};
use storefront_content::GENERATED_ATTRIBUTE;

/// Appends the background and hero typography stylesheet to `<head>`
pub struct ContentStyleRule;

impl RewriteRule for ContentStyleRule {
    fn name(&self) -> &'static str {
        "content-style"
    }

    fn description(&self) -> &'static str {
        "Append background and typography styles before </head>"
    }

    fn apply(&self, markup: &str, ctx: &RenderContext) -> Option<String> {
        let marker = format!("{}=\"{}\"", GENERATED_ATTRIBUTE, STYLE_MARKER);
        if markup.contains(&marker) {
            return None;
        }

        let css = content_css(&ctx.content.background, &ctx.model, ctx.resolver);
        let block = style_block(&css)?;
        Some(insert_before_closing(markup, "head", &block))
    }
}
