//! # Storefront Static Renderer
//!
//! Renders the public page for a store from template markup, the content
//! document, the product list and the store record. No tree is built and no
//! script runs: the page is produced by an ordered list of named text-level
//! rewrite rules.
//!
//! ```text
//! stamp-element-ids → hero-title → hero-subtitle → hero-button → brand
//!   → content-style → products → contact-section → copyright
//!   → [replay-element-states] → inquiry-script
//! ```
//!
//! Every rule is a fixed point on its own output, so rendering a rendered
//! page changes nothing.
//!
//! ```rust,ignore
//! use storefront_compiler_html::{RenderOptions, StaticRenderer};
//!
//! let renderer = StaticRenderer::new(RenderOptions::default());
//! let html = renderer.render(&template, &content, &products, &store, &resolver);
//! ```

mod context;
mod errors;
mod markup_backend;
mod renderer;
mod rules;
mod splice;

pub use context::{ElementStateReplay, RenderContext, RenderOptions};
pub use errors::RenderError;
pub use markup_backend::MarkupRewriter;
pub use renderer::StaticRenderer;
pub use rules::{
    BrandRule, ContactSectionRule, ContentStyleRule, CopyrightRule, HeroTextRule, InquiryScriptRule,
    ProductsRule, ReplayElementStatesRule, RewriteRule, RuleRegistry, StampElementIdsRule,
};

#[cfg(test)]
mod tests;
