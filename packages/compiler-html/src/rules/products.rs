use super::RewriteRule;
use crate::context::RenderContext;
use crate::splice::{insert_before_closing, replace_range};
use storefront_content::markup_scan::scan_elements;
use storefront_products::{is_product_region, ProductInjector};
use tracing::debug;

/// Fills the template's product region with cards, or appends a products
/// section when the template has none
pub struct ProductsRule;

impl RewriteRule for ProductsRule {
    fn name(&self) -> &'static str {
        "products"
    }

    fn description(&self) -> &'static str {
        "Insert one card per active product into the product region"
    }

    fn apply(&self, markup: &str, ctx: &RenderContext) -> Option<String> {
        let injector = ProductInjector::new(ctx.resolver);
        let cards = injector.render_cards(ctx.products);
        if cards.is_empty() {
            return None;
        }

        let region = scan_elements(markup)
            .into_iter()
            .find(|e| !e.close.is_empty() && is_product_region(e.class()));

        let out = match region {
            Some(region) => replace_range(markup, region.inner, &format!("\n{}\n", cards.join("\n"))),
            None => {
                debug!("No product region in template, appending a products section");
                insert_before_closing(markup, "body", &injector.fallback_section(ctx.products)?)
            }
        };
        (out != markup).then_some(out)
    }
}
