use super::RewriteRule;
use crate::context::RenderContext;
use storefront_content::markup_scan::scan_selectable;
use storefront_content::ID_ATTRIBUTE;

/// Writes each selectable node's id into its open tag so later rules (and the
/// editor, when it loads this markup) can address it
pub struct StampElementIdsRule;

impl RewriteRule for StampElementIdsRule {
    fn name(&self) -> &'static str {
        "stamp-element-ids"
    }

    fn description(&self) -> &'static str {
        "Stamp data-sf-id onto every selectable element"
    }

    fn apply(&self, markup: &str, _ctx: &RenderContext) -> Option<String> {
        let mut inserts: Vec<(usize, String)> = scan_selectable(markup)
            .into_iter()
            .filter(|s| s.element.attribute(ID_ATTRIBUTE).is_none())
            .map(|s| {
                let at = s.element.open.start + 1 + s.element.tag.len();
                (at, format!(" {}=\"{}\"", ID_ATTRIBUTE, s.identified.id))
            })
            .collect();

        if inserts.is_empty() {
            return None;
        }

        let mut out = markup.to_string();
        inserts.sort_by_key(|(at, _)| std::cmp::Reverse(*at));
        for (at, attribute) in inserts {
            out.insert_str(at, &attribute);
        }
        Some(out)
    }
}
