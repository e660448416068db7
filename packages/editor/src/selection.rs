//! Which node a click lands on

use crate::document::LiveDocument;
use crate::document::NodeId;
use std::collections::HashSet;
use storefront_content::GENERATED_ATTRIBUTE;

/// Elements that plausibly carry their own text
const TEXT_BEARING_TAGS: &[&str] = &[
    "a", "span", "li", "label", "strong", "em", "b", "i", "small", "div", "blockquote", "figcaption", "td", "th",
    "dt", "dd",
];

fn is_text_bearing(doc: &LiveDocument, node: NodeId) -> bool {
    doc.tag(node).is_some_and(|tag| TEXT_BEARING_TAGS.contains(&tag)) && doc.has_own_text(node)
}

/// Resolve a pointer target to the node that should be selected.
///
/// The nearest allow-listed node within `max_depth` ancestor levels (target
/// included), else the nearest text-bearing one. Nothing inside generated
/// content is selectable.
pub fn resolve_target(
    doc: &LiveDocument,
    target: NodeId,
    listed: &HashSet<NodeId>,
    max_depth: usize,
) -> Option<NodeId> {
    let in_generated = std::iter::once(target)
        .chain(doc.ancestors(target))
        .any(|n| doc.attribute(n, GENERATED_ATTRIBUTE).is_some());
    if in_generated {
        return None;
    }

    let chain: Vec<NodeId> = std::iter::once(target)
        .chain(doc.ancestors(target))
        .take(max_depth + 1)
        .take_while(|n| !matches!(doc.tag(*n), Some("body") | Some("html")) && doc.element(*n).is_some())
        .collect();

    chain
        .iter()
        .find(|n| listed.contains(*n))
        .or_else(|| chain.iter().find(|n| is_text_bearing(doc, **n)))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::scan_selectable;

    fn setup(markup: &str) -> (LiveDocument, HashSet<NodeId>) {
        let doc = LiveDocument::parse(markup);
        let listed = scan_selectable(&doc).into_iter().map(|s| s.node).collect();
        (doc, listed)
    }

    fn find(doc: &LiveDocument, tag: &str) -> NodeId {
        doc.find_tag(tag).unwrap()
    }

    #[test]
    fn test_listed_target_selects_itself() {
        let (doc, listed) = setup("<html><body><h1>Hi</h1></body></html>");
        let h1 = find(&doc, "h1");
        assert_eq!(resolve_target(&doc, h1, &listed, 5), Some(h1));
    }

    #[test]
    fn test_inline_child_climbs_to_listed_parent() {
        let (doc, listed) = setup("<html><body><p>Hello <em>there</em></p></body></html>");
        let em = find(&doc, "em");
        assert_eq!(resolve_target(&doc, em, &listed, 5), Some(find(&doc, "p")));

        let (doc, listed) = setup("<html><body><p>Hello <img src=x></p></body></html>");
        let img = find(&doc, "img");
        assert_eq!(resolve_target(&doc, img, &listed, 5), Some(find(&doc, "p")));
    }

    #[test]
    fn test_depth_limit() {
        let markup = "<html><body><section><div><div><div><div><div><div><img src=x></div></div></div></div></div></div></section></body></html>";
        let (doc, listed) = setup(markup);
        let img = find(&doc, "img");
        assert_eq!(resolve_target(&doc, img, &listed, 5), None);
    }

    #[test]
    fn test_text_bearing_fallback() {
        let (doc, listed) = setup("<html><body><ul><li>Free shipping <img src=x></li></ul></body></html>");
        let img = find(&doc, "img");
        assert_eq!(resolve_target(&doc, img, &listed, 5), Some(find(&doc, "li")));
    }

    #[test]
    fn test_generated_content_is_not_selectable() {
        let (doc, listed) =
            setup(r#"<html><body><div data-sf-generated="product"><h3>Mug</h3></div></body></html>"#);
        let h3 = find(&doc, "h3");
        assert_eq!(resolve_target(&doc, h3, &listed, 5), None);
    }
}
