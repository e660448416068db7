//! Tree-walk half of the identity contract.
//!
//! Visits elements in document order (pre-order, which is open-tag order) and
//! feeds the same descriptors to the same resolver the markup scanner uses.

use crate::document::{LiveDocument, NodeId};
use storefront_content::{
    is_allow_listed, ElementDescriptor, IdentifiedElement, IdentityResolver, GENERATED_ATTRIBUTE, ID_ATTRIBUTE,
};

/// A selectable element of the live tree
#[derive(Debug, Clone, PartialEq)]
pub struct SelectableNode {
    pub node: NodeId,
    pub identified: IdentifiedElement,
}

/// Allow-listed elements with their ids, skipping generated subtrees
pub fn scan_selectable(doc: &LiveDocument) -> Vec<SelectableNode> {
    let mut resolver = IdentityResolver::new();
    let mut out = Vec::new();
    let mut stack = vec![doc.root()];

    while let Some(node) = stack.pop() {
        if let Some(el) = doc.element(node) {
            if el.attribute(GENERATED_ATTRIBUTE).is_some() {
                continue;
            }
            if is_allow_listed(&el.tag, el.class()) {
                let descriptor = ElementDescriptor::new(el.tag.clone(), el.class(), &doc.text_content(node))
                    .with_existing_id(el.attribute(ID_ATTRIBUTE).map(str::to_string));
                out.push(SelectableNode {
                    node,
                    identified: IdentifiedElement {
                        id: resolver.resolve(&descriptor),
                        descriptor,
                    },
                });
            }
        }
        stack.extend(doc.children(node).iter().rev().copied());
    }

    out
}

/// Scan and write each id onto its node
pub fn stamp_ids(doc: &mut LiveDocument) -> Vec<SelectableNode> {
    let selectable = scan_selectable(doc);
    for entry in &selectable {
        doc.set_attribute(entry.node, ID_ATTRIBUTE, entry.identified.id.as_str());
    }
    selectable
}
