use super::RewriteRule;
use crate::context::RenderContext;
use crate::splice::{map_text_segments, outermost, replace_range};
use std::ops::Range;
use storefront_content::markup_scan::{scan_elements, ScannedElement};
use tracing::debug;

const BRAND_CLASSES: &[&str] = &["logo", "brand", "footer-brand", "navbar-brand", "site-title"];

/// Where a brand pass looks for the placeholder
#[derive(Debug, Clone, Copy)]
enum BrandPass {
    /// Elements with a logo/brand class
    Classes,
    Nav,
    Footer,
    Title,
    /// The whole body
    CatchAll,
}

impl BrandPass {
    const ORDER: [BrandPass; 5] = [
        BrandPass::Classes,
        BrandPass::Nav,
        BrandPass::Footer,
        BrandPass::Title,
        BrandPass::CatchAll,
    ];

    fn matches(&self, element: &ScannedElement) -> bool {
        match self {
            BrandPass::Classes => BRAND_CLASSES.iter().any(|c| element.has_class(c)),
            BrandPass::Nav => matches!(element.tag.as_str(), "nav" | "header"),
            BrandPass::Footer => element.tag == "footer",
            BrandPass::Title => element.tag == "title",
            BrandPass::CatchAll => element.tag == "body",
        }
    }
}

/// Swaps the template's placeholder brand for the store's brand.
///
/// Passes run from most to least targeted. A region that already shows the
/// store's brand is skipped, so a brand that contains the placeholder (say
/// `LUXEHOME` over `LUXE`) is never rewritten twice.
pub struct BrandRule;

impl BrandRule {
    fn run_pass(markup: &str, pass: BrandPass, placeholder: &str, brand: &str) -> String {
        let regions: Vec<Range<usize>> = outermost(
            scan_elements(markup)
                .into_iter()
                .filter(|e| pass.matches(e))
                .map(|e| e.inner)
                .collect(),
        );

        let mut out = markup.to_string();
        for region in regions.into_iter().rev() {
            let inner = &markup[region.clone()];
            if !inner.contains(placeholder) || inner.contains(brand) {
                continue;
            }
            let replaced = map_text_segments(inner, |text| text.replace(placeholder, brand));
            if replaced != inner {
                debug!(pass = ?pass, "Replaced placeholder brand");
                out = replace_range(&out, region, &replaced);
            }
        }
        out
    }
}

impl RewriteRule for BrandRule {
    fn name(&self) -> &'static str {
        "brand"
    }

    fn description(&self) -> &'static str {
        "Replace the template's placeholder brand in logo, nav, footer and title"
    }

    fn apply(&self, markup: &str, ctx: &RenderContext) -> Option<String> {
        let brand = ctx.brand()?;
        let placeholder = ctx.placeholder_brand();
        if brand == placeholder {
            return None;
        }

        let out = BrandPass::ORDER
            .iter()
            .fold(markup.to_string(), |acc, pass| Self::run_pass(&acc, *pass, placeholder, &brand));
        (out != markup).then_some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::Fixture;

    const MARKUP: &str = r#"<html><head><title>LUXE | Boutique</title></head><body>
<nav class="navbar"><a class="logo">LUXE</a><a class="nav-link" title="LUXE">Home</a></nav>
<h1>Welcome to LUXE</h1>
<footer><p class="footer-brand">LUXE</p><p>Made by LUXE</p></footer>
</body></html>"#;

    #[test]
    fn test_targeted_passes_cover_logo_footer_and_title() {
        let fixture = Fixture::new(MARKUP);
        let out = BrandRule.apply(MARKUP, &fixture.context()).unwrap();

        assert!(out.contains("<title>FIRESIDE | Boutique</title>"));
        assert!(out.contains(r#"<a class="logo">FIRESIDE</a>"#));
        assert!(out.contains(r#"<p class="footer-brand">FIRESIDE</p>"#));
        // Attributes are not text
        assert!(out.contains(r#"title="LUXE""#));
        // Footer already shows the brand after the class pass
        assert!(out.contains("<p>Made by LUXE</p>"));
        // Body already shows the brand, the catch-all stays quiet
        assert!(out.contains("<h1>Welcome to LUXE</h1>"));
    }

    #[test]
    fn test_catch_all_when_no_region_matches() {
        let markup = "<html><body><div><h1>LUXE goods</h1></div></body></html>";
        let fixture = Fixture::new(markup);
        let out = BrandRule.apply(markup, &fixture.context()).unwrap();
        assert_eq!(out, "<html><body><div><h1>FIRESIDE goods</h1></div></body></html>");
    }

    #[test]
    fn test_idempotent_when_brand_contains_placeholder() {
        let mut fixture = Fixture::new(MARKUP);
        fixture.store.domain = "luxehome.example".into();
        let once = BrandRule.apply(MARKUP, &fixture.context()).unwrap();
        assert!(once.contains(r#"<a class="logo">LUXEHOME</a>"#));
        assert!(BrandRule.apply(&once, &fixture.context()).is_none());
    }

    #[test]
    fn test_no_brand_no_change() {
        let mut fixture = Fixture::new(MARKUP);
        fixture.store.domain.clear();
        fixture.store.display_name.clear();
        assert!(BrandRule.apply(MARKUP, &fixture.context()).is_none());
    }
}
