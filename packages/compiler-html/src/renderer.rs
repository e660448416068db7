use crate::context::{RenderContext, RenderOptions};
use crate::errors::RenderError;
use crate::rules::RuleRegistry;
use serde_json::Value;
use storefront_content::{AssetResolver, ContentDocument, StoreProfile};
use storefront_products::Product;
use storefront_templates::{TemplateCatalog, TemplateDocument};
use tracing::{debug, info, warn};

/// Produces the public page for a store: template markup in, final markup
/// out, one ordered pass per rule.
///
/// Rendering is a pure function of its inputs and holds no state between
/// calls, so one renderer can serve any number of requests concurrently.
#[derive(Debug)]
pub struct StaticRenderer {
    registry: RuleRegistry,
    options: RenderOptions,
}

impl StaticRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            registry: RuleRegistry::for_options(&options),
            options,
        }
    }

    /// Use a custom rule set
    pub fn with_registry(registry: RuleRegistry, options: RenderOptions) -> Self {
        Self { registry, options }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn render(
        &self,
        template: &TemplateDocument,
        content: &ContentDocument,
        products: &[Product],
        store: &StoreProfile,
        resolver: &dyn AssetResolver,
    ) -> String {
        let ctx = RenderContext::new(template, content, products, store, resolver, &self.options);
        if !ctx.model.orphans.is_empty() {
            debug!(count = ctx.model.orphans.len(), "Content has states for nodes missing from the template");
        }

        let mut markup = template.raw_markup.clone();
        for rule in self.registry.rules() {
            match rule.apply(&markup, &ctx) {
                Some(next) => {
                    debug!(rule = rule.name(), "Rule rewrote markup");
                    markup = next;
                }
                None => debug!(rule = rule.name(), "Rule made no change"),
            }
        }

        info!(
            template = %template.key,
            store = %store.domain,
            bytes = markup.len(),
            "Rendered storefront page"
        );
        markup
    }

    /// Render from the raw JSON a record store holds.
    ///
    /// Malformed content fields and product entries are logged and replaced
    /// by defaults; this never fails.
    pub fn render_json(
        &self,
        template: &TemplateDocument,
        content: Option<&Value>,
        products: &Value,
        store: &StoreProfile,
        resolver: &dyn AssetResolver,
    ) -> String {
        let content = match content {
            Some(value) => {
                let (document, errors) = ContentDocument::from_value_lenient(value);
                if !errors.is_empty() {
                    warn!(store = %store.domain, count = errors.len(), "Rendering with recovered content fields");
                }
                document
            }
            None => ContentDocument::new(),
        };
        let products = Product::list_from_value(products);

        self.render(template, &content, &products, store, resolver)
    }

    /// Load the template by its stored key, then render.
    ///
    /// Unknown keys fall back to the default template; a template that cannot
    /// be read is the only error.
    pub fn render_page(
        &self,
        catalog: &TemplateCatalog,
        template_key: &str,
        content: &ContentDocument,
        products: &[Product],
        store: &StoreProfile,
        resolver: &dyn AssetResolver,
    ) -> Result<String, RenderError> {
        let template = catalog.load_named(template_key)?;
        Ok(self.render(&template, content, products, store, resolver))
    }
}

impl Default for StaticRenderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}
