mod brand;
mod contact;
mod copyright;
mod hero;
mod inquiry;
mod products;
mod replay;
mod stamp;
mod style;

pub use brand::BrandRule;
pub use contact::ContactSectionRule;
pub use copyright::CopyrightRule;
pub use hero::HeroTextRule;
pub use inquiry::InquiryScriptRule;
pub use products::ProductsRule;
pub use replay::ReplayElementStatesRule;
pub use stamp::StampElementIdsRule;
pub use style::ContentStyleRule;

use crate::context::{ElementStateReplay, RenderContext, RenderOptions};
use storefront_content::HeroRole;

/// One named text-level pass over the page markup
pub trait RewriteRule: Send + Sync {
    /// Rule name (e.g., "hero-title")
    fn name(&self) -> &'static str;

    /// Rule description
    fn description(&self) -> &'static str;

    /// Rewritten markup, or `None` when the rule leaves it unchanged
    fn apply(&self, markup: &str, ctx: &RenderContext) -> Option<String>;
}

/// Ordered rewrite rules. Order matters: later rules address nodes by the
/// ids the first rule stamps.
pub struct RuleRegistry {
    rules: Vec<Box<dyn RewriteRule>>,
}

impl RuleRegistry {
    /// Create a new registry with the built-in rules
    pub fn new() -> Self {
        Self::for_options(&RenderOptions::default())
    }

    /// Built-in rules, with state replay when the options ask for it
    pub fn for_options(options: &RenderOptions) -> Self {
        let mut registry = Self::empty();
        registry.add_rule(Box::new(StampElementIdsRule));
        registry.add_rule(Box::new(HeroTextRule::new(HeroRole::Title)));
        registry.add_rule(Box::new(HeroTextRule::new(HeroRole::Subtitle)));
        registry.add_rule(Box::new(HeroTextRule::new(HeroRole::Button)));
        registry.add_rule(Box::new(BrandRule));
        registry.add_rule(Box::new(ContentStyleRule));
        registry.add_rule(Box::new(ProductsRule));
        registry.add_rule(Box::new(ContactSectionRule));
        registry.add_rule(Box::new(CopyrightRule));
        if options.element_state_replay == ElementStateReplay::Apply {
            registry.add_rule(Box::new(ReplayElementStatesRule));
        }
        registry.add_rule(Box::new(InquiryScriptRule));
        registry
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[Box<dyn RewriteRule>] {
        &self.rules
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Create an empty registry (no rules)
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a custom rule to the end of the registry
    pub fn add_rule(&mut self, rule: Box<dyn RewriteRule>) {
        self.rules.push(rule);
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.names())
            .finish()
    }
}
