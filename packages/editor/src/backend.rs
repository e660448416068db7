//! Applying content to the live tree: the tree-mutating [`RenderBackend`],
//! the content stylesheet and the product cards.

use crate::document::{LiveDocument, NodeId};
use storefront_content::stylesheet::style_block;
use storefront_content::{AssetResolver, ElementId, Offset, RenderBackend, Visibility, GENERATED_ATTRIBUTE};
use storefront_products::{is_product_region, Product, ProductInjector};
use tracing::debug;

fn px(value: f64) -> String {
    format!("{}px", value)
}

impl LiveDocument {
    pub fn show(&mut self, node: NodeId, visibility: Visibility) -> bool {
        match visibility {
            Visibility::Visible => {
                self.remove_style_property(node, "display");
                true
            }
            Visibility::Hidden | Visibility::Deleted => self.set_style_property(node, "display", "none"),
        }
    }

    pub fn place(&mut self, node: NodeId, offset: Offset) -> bool {
        if offset.is_zero() {
            for property in ["position", "left", "top"] {
                self.remove_style_property(node, property);
            }
            return self.element(node).is_some();
        }
        self.set_style_property(node, "position", "relative")
            && self.set_style_property(node, "left", &px(offset.left))
            && self.set_style_property(node, "top", &px(offset.top))
    }

    /// Append the content stylesheet to `<head>`
    pub fn inject_stylesheet(&mut self, css: &str) -> bool {
        let (Some(block), Some(head)) = (style_block(css), self.head()) else {
            return false;
        };
        !self.append_markup(head, &block).is_empty()
    }

    /// First product region, in document order, outside generated content
    pub fn product_region(&self) -> Option<NodeId> {
        self.descendants(self.root()).into_iter().find(|n| {
            self.element(*n).is_some_and(|el| is_product_region(el.class()))
                && !std::iter::once(*n)
                    .chain(self.ancestors(*n))
                    .any(|a| self.attribute(a, GENERATED_ATTRIBUTE).is_some())
        })
    }

    /// Fill the product region with cards, or append a products section
    pub fn inject_products(&mut self, products: &[Product], resolver: &dyn AssetResolver) -> usize {
        let injector = ProductInjector::new(resolver);
        let cards = injector.render_cards(products);
        if cards.is_empty() {
            return 0;
        }

        match self.product_region() {
            Some(region) => {
                self.clear_children(region);
                self.append_markup(region, &cards.join("\n"));
            }
            None => {
                debug!("No product region in template, appending a products section");
                let (Some(section), Some(body)) = (injector.fallback_section(products), self.body()) else {
                    return 0;
                };
                self.append_markup(body, &section);
            }
        }
        cards.len()
    }
}

impl RenderBackend for LiveDocument {
    fn set_content(&mut self, id: &ElementId, text: &str) -> bool {
        match self.find_by_element_id(id.as_str()) {
            Some(node) => self.set_text(node, text),
            None => false,
        }
    }

    fn set_visibility(&mut self, id: &ElementId, visibility: Visibility) -> bool {
        match self.find_by_element_id(id.as_str()) {
            Some(node) => self.show(node, visibility),
            None => false,
        }
    }

    fn set_offset(&mut self, id: &ElementId, offset: Offset) -> bool {
        match self.find_by_element_id(id.as_str()) {
            Some(node) => self.place(node, offset),
            None => false,
        }
    }
}
