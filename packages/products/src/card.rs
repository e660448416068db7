use crate::format::{format_price, truncate_description};
use crate::product::{active_products, Product};
use storefront_content::text::escape_html;
use storefront_content::{AssetResolver, GENERATED_ATTRIBUTE, PLACEHOLDER_IMAGE};
use tracing::debug;

/// Class tokens that mark a template's product region, in priority order
pub const PRODUCT_REGION_CLASSES: &[&str] = &["products-grid", "product-grid", "products", "product-list"];

/// Does this class attribute mark a product region?
pub fn is_product_region(class: &str) -> bool {
    class
        .split_whitespace()
        .any(|token| PRODUCT_REGION_CLASSES.contains(&token))
}

/// Builds product card markup. Both renderers go through this so preview and
/// published pages agree.
pub struct ProductInjector<'a> {
    resolver: &'a dyn AssetResolver,
}

impl<'a> ProductInjector<'a> {
    pub fn new(resolver: &'a dyn AssetResolver) -> Self {
        Self { resolver }
    }

    pub fn image_url(&self, product: &Product) -> String {
        let resolved = self.resolver.resolve(&product.image);
        if resolved.is_empty() {
            PLACEHOLDER_IMAGE.to_string()
        } else {
            resolved
        }
    }

    /// One card, single line
    pub fn render_card(&self, product: &Product) -> String {
        let id = escape_html(&product.id);
        let name = escape_html(product.name.trim());

        format!(
            concat!(
                "<div class=\"product-card\" {marker}=\"product\" data-product-id=\"{id}\">",
                "<div class=\"product-image\"><img src=\"{src}\" alt=\"{name}\" loading=\"lazy\"></div>",
                "<div class=\"product-info\">",
                "<h3 class=\"product-name\">{name}</h3>",
                "<p class=\"product-description\">{description}</p>",
                "<div class=\"product-footer\">",
                "<span class=\"product-price\">{price}</span>",
                "<button type=\"button\" class=\"inquire-btn\" data-product-id=\"{id}\" data-product-name=\"{name}\">Inquire</button>",
                "</div></div></div>"
            ),
            marker = GENERATED_ATTRIBUTE,
            id = id,
            src = escape_html(&self.image_url(product)),
            name = name,
            description = escape_html(&truncate_description(&product.description)),
            price = format_price(product.price),
        )
    }

    /// Cards for the active products, in input order
    pub fn render_cards(&self, products: &[Product]) -> Vec<String> {
        let cards: Vec<String> = active_products(products)
            .into_iter()
            .map(|p| self.render_card(p))
            .collect();
        debug!(total = products.len(), rendered = cards.len(), "Rendered product cards");
        cards
    }

    /// Section appended before `</body>` when the template has no product region
    pub fn fallback_section(&self, products: &[Product]) -> Option<String> {
        let cards = self.render_cards(products);
        if cards.is_empty() {
            return None;
        }

        Some(format!(
            concat!(
                "<section class=\"products-section\" id=\"products\" {marker}=\"products\">",
                "<h2 class=\"section-title\">Products</h2>",
                "<div class=\"products-grid\">{cards}</div>",
                "</section>\n"
            ),
            marker = GENERATED_ATTRIBUTE,
            cards = cards.join("\n"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_content::BaseUrlResolver;

    #[test]
    fn test_card_markup() {
        let resolver = BaseUrlResolver::new("https://cdn.example.com");
        let injector = ProductInjector::new(&resolver);
        let card = injector.render_card(
            &Product::new("7", "Mug & Saucer", 199.5)
                .with_description("Glazed <stoneware>")
                .with_image("products/mug.jpg"),
        );

        assert!(card.starts_with("<div class=\"product-card\" data-sf-generated=\"product\" data-product-id=\"7\">"));
        assert!(card.contains("src=\"https://cdn.example.com/products/mug.jpg\""));
        assert!(card.contains("<h3 class=\"product-name\">Mug &amp; Saucer</h3>"));
        assert!(card.contains("Glazed &lt;stoneware&gt;"));
        assert!(card.contains("<span class=\"product-price\">₱199.50</span>"));
        assert!(card.contains("data-product-name=\"Mug &amp; Saucer\""));
        assert!(!card.contains('\n'));
    }

    #[test]
    fn test_placeholder_image() {
        let resolver = BaseUrlResolver::default();
        let injector = ProductInjector::new(&resolver);
        let card = injector.render_card(&Product::new("1", "Bare", 10.0));
        assert!(card.contains(PLACEHOLDER_IMAGE));
    }

    #[test]
    fn test_fallback_section_only_with_active_products() {
        let resolver = BaseUrlResolver::default();
        let injector = ProductInjector::new(&resolver);
        assert!(injector.fallback_section(&[]).is_none());
        assert!(injector
            .fallback_section(&[Product::new("1", "Hidden", 1.0).inactive()])
            .is_none());

        let section = injector.fallback_section(&[Product::new("1", "Mug", 1.0)]).unwrap();
        assert!(section.contains("data-sf-generated=\"products\""));
        assert!(section.contains("<div class=\"products-grid\"><div class=\"product-card\""));
    }

    #[test]
    fn test_region_classes() {
        assert!(is_product_region("container products-grid"));
        assert!(is_product_region("products"));
        assert!(!is_product_region("products-section"));
    }
}
