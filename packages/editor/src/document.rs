//! # Live Document
//!
//! The editor's own copy of the page: an arena tree converted from
//! html5ever's DOM, mutated in place by the session and serialized back to
//! HTML for the preview surface.
//!
//! Nodes are never removed structurally while a session is open. Hide and
//! delete are inline styles, so every id stays addressable and every change
//! stays reversible.

use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use storefront_content::markup_scan::is_void_tag;
use storefront_content::text::collapse_whitespace;
use storefront_content::ID_ATTRIBUTE;

/// Index of a node in a [`LiveDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    /// Lowercase local name
    pub tag: String,
    /// Attributes in source order
    pub attributes: Vec<(String, String)>,
}

impl ElementData {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn class(&self) -> &str {
        self.attribute("class").unwrap_or("")
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.class().split_whitespace().any(|c| c == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Document,
    Doctype(String),
    Element(ElementData),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct LiveDocument {
    nodes: Vec<Node>,
}

const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

impl LiveDocument {
    /// Parse a complete HTML document
    pub fn parse(markup: &str) -> Self {
        let dom: RcDom = parse_document(RcDom::default(), ParseOpts::default()).one(markup);

        let mut doc = Self {
            nodes: vec![Node {
                data: NodeData::Document,
                parent: None,
                children: Vec::new(),
            }],
        };
        let root = doc.root();
        for child in dom.document.children.borrow().iter() {
            doc.convert(child, root);
        }
        doc
    }

    fn convert(&mut self, handle: &Handle, parent: NodeId) {
        let data = match &handle.data {
            RcNodeData::Document => {
                for child in handle.children.borrow().iter() {
                    self.convert(child, parent);
                }
                return;
            }
            RcNodeData::Doctype { name, .. } => NodeData::Doctype(name.to_string()),
            RcNodeData::Text { contents } => NodeData::Text(contents.borrow().to_string()),
            RcNodeData::Comment { contents } => NodeData::Comment(contents.to_string()),
            RcNodeData::Element { name, attrs, .. } => NodeData::Element(ElementData {
                tag: name.local.to_string().to_ascii_lowercase(),
                attributes: attrs
                    .borrow()
                    .iter()
                    .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                    .collect(),
            }),
            RcNodeData::ProcessingInstruction { .. } => return,
        };

        let node = self.create(data);
        self.append_child(parent, node);
        for child in handle.children.borrow().iter() {
            self.convert(child, node);
        }
    }

    fn create(&mut self, data: NodeData) -> NodeId {
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
        });
        NodeId(self.nodes.len() - 1)
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0).map(|n| &n.data)
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match self.data(id)? {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.nodes.get_mut(id.0)?.data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|el| el.tag.as_str())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id.0).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Ancestors from the parent upwards
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |n| self.parent(*n))
    }

    /// Pre-order traversal of the subtree under `id`, `id` included
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attribute(name)
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> bool {
        let Some(el) = self.element_mut(id) else {
            return false;
        };
        match el.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => el.attributes.push((name.to_string(), value.to_string())),
        }
        true
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> bool {
        let Some(el) = self.element_mut(id) else {
            return false;
        };
        let before = el.attributes.len();
        el.attributes.retain(|(n, _)| n != name);
        el.attributes.len() != before
    }

    /// Concatenated descendant text, whitespace-collapsed
    pub fn text_content(&self, id: NodeId) -> String {
        let raw: String = self
            .descendants(id)
            .into_iter()
            .filter_map(|n| match self.data(n) {
                Some(NodeData::Text(text)) => Some(text.as_str()),
                _ => None,
            })
            .collect();
        collapse_whitespace(&raw)
    }

    /// Whether the element has a non-blank text node as a direct child
    pub fn has_own_text(&self, id: NodeId) -> bool {
        self.children(id)
            .iter()
            .any(|c| matches!(self.data(*c), Some(NodeData::Text(t)) if !t.trim().is_empty()))
    }

    /// Detach every child of `id`
    pub fn clear_children(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(id.0) else {
            return;
        };
        for child in std::mem::take(&mut node.children) {
            self.nodes[child.0].parent = None;
        }
    }

    /// Replace all children with a single text node
    pub fn set_text(&mut self, id: NodeId, text: &str) -> bool {
        if self.element(id).is_none() {
            return false;
        }
        self.clear_children(id);
        let node = self.create(NodeData::Text(text.to_string()));
        self.append_child(id, node);
        true
    }

    /// First element with this tag, in document order
    pub fn find_tag(&self, tag: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|n| self.tag(*n) == Some(tag))
    }

    pub fn head(&self) -> Option<NodeId> {
        self.find_tag("head")
    }

    pub fn body(&self) -> Option<NodeId> {
        self.find_tag("body")
    }

    /// Element carrying `data-sf-id="<id>"`
    pub fn find_by_element_id(&self, element_id: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|n| self.attribute(*n, ID_ATTRIBUTE) == Some(element_id))
    }

    /// Parse `markup` as body content and append the resulting nodes
    pub fn append_markup(&mut self, parent: NodeId, markup: &str) -> Vec<NodeId> {
        let wrapped = format!("<!DOCTYPE html><html><head></head><body>{}</body></html>", markup);
        let fragment = LiveDocument::parse(&wrapped);
        let Some(body) = fragment.body() else {
            return Vec::new();
        };

        fragment
            .children(body)
            .iter()
            .map(|child| {
                let copied = self.copy_from(&fragment, *child);
                self.append_child(parent, copied);
                copied
            })
            .collect()
    }

    fn copy_from(&mut self, other: &LiveDocument, node: NodeId) -> NodeId {
        let data = other.nodes[node.0].data.clone();
        let copied = self.create(data);
        for child in other.children(node) {
            let child_copy = self.copy_from(other, *child);
            self.append_child(copied, child_copy);
        }
        copied
    }

    // Inline style

    pub fn style_property(&self, id: NodeId, property: &str) -> Option<String> {
        parse_style(self.attribute(id, "style").unwrap_or(""))
            .into_iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v)
    }

    pub fn set_style_property(&mut self, id: NodeId, property: &str, value: &str) -> bool {
        let mut decls = parse_style(self.attribute(id, "style").unwrap_or(""));
        match decls.iter_mut().find(|(p, _)| p == property) {
            Some((_, v)) => *v = value.to_string(),
            None => decls.push((property.to_string(), value.to_string())),
        }
        self.set_attribute(id, "style", &format_style(&decls))
    }

    pub fn remove_style_property(&mut self, id: NodeId, property: &str) -> bool {
        let mut decls = parse_style(self.attribute(id, "style").unwrap_or(""));
        let before = decls.len();
        decls.retain(|(p, _)| p != property);
        if decls.len() == before {
            return false;
        }
        if decls.is_empty() {
            self.remove_attribute(id, "style")
        } else {
            self.set_attribute(id, "style", &format_style(&decls))
        }
    }

    // Serialization

    pub fn to_html(&self) -> String {
        let mut buffer = String::new();
        for child in self.children(self.root()) {
            self.write_node(*child, &mut buffer, false);
        }
        buffer
    }

    /// Markup of one element and its subtree
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut buffer = String::new();
        self.write_node(id, &mut buffer, false);
        buffer
    }

    fn write_node(&self, id: NodeId, buffer: &mut String, raw_text: bool) {
        match &self.nodes[id.0].data {
            NodeData::Document => {
                for child in self.children(id) {
                    self.write_node(*child, buffer, false);
                }
            }
            NodeData::Doctype(name) => {
                buffer.push_str(&format!("<!DOCTYPE {}>", name));
            }
            NodeData::Text(text) => {
                if raw_text {
                    buffer.push_str(text);
                } else {
                    buffer.push_str(&escape_text(text));
                }
            }
            NodeData::Comment(text) => {
                buffer.push_str(&format!("<!--{}-->", text));
            }
            NodeData::Element(el) => {
                buffer.push('<');
                buffer.push_str(&el.tag);
                for (name, value) in &el.attributes {
                    buffer.push_str(&format!(" {}=\"{}\"", name, escape_attribute(value)));
                }
                buffer.push('>');

                if is_void_tag(&el.tag) {
                    return;
                }

                let raw = RAW_TEXT_TAGS.contains(&el.tag.as_str());
                for child in self.children(id) {
                    self.write_node(*child, buffer, raw);
                }
                buffer.push_str(&format!("</{}>", el.tag));
            }
        }
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\u{a0}', "&nbsp;")
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('\u{a0}', "&nbsp;")
}

fn parse_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (prop, value) = decl.split_once(':')?;
            let prop = prop.trim().to_ascii_lowercase();
            let value = value.trim();
            (!prop.is_empty() && !value.is_empty()).then(|| (prop, value.to_string()))
        })
        .collect()
}

fn format_style(decls: &[(String, String)]) -> String {
    decls
        .iter()
        .map(|(p, v)| format!("{}: {};", p, v))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>T</title><style>p > a { color: red; }</style></head>
<body><div class="hero"><h1>Hello <em>there</em></h1><p class="lead">Tea &amp; cake</p><br></div></body></html>"#;

    #[test]
    fn test_parse_and_serialize() {
        let doc = LiveDocument::parse(PAGE);
        let html = doc.to_html();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<style>p > a { color: red; }</style>"));
        assert!(html.contains("<p class=\"lead\">Tea &amp; cake</p>"));
        assert!(html.contains("<br></div>"));
    }

    #[test]
    fn test_text_content_and_set_text() {
        let mut doc = LiveDocument::parse(PAGE);
        let h1 = doc.find_tag("h1").unwrap();
        assert_eq!(doc.text_content(h1), "Hello there");

        doc.set_text(h1, "Fireside <Pottery>");
        assert_eq!(doc.text_content(h1), "Fireside <Pottery>");
        assert!(doc.outer_html(h1).contains("Fireside &lt;Pottery&gt;"));
    }

    #[test]
    fn test_inline_style_editing() {
        let mut doc = LiveDocument::parse(PAGE);
        let p = doc.find_tag("p").unwrap();
        doc.set_style_property(p, "position", "relative");
        doc.set_style_property(p, "left", "4px");
        doc.set_style_property(p, "left", "6px");
        assert_eq!(doc.attribute(p, "style"), Some("position: relative; left: 6px;"));
        assert_eq!(doc.style_property(p, "left").as_deref(), Some("6px"));

        doc.remove_style_property(p, "left");
        doc.remove_style_property(p, "position");
        assert_eq!(doc.attribute(p, "style"), None);
    }

    #[test]
    fn test_append_markup() {
        let mut doc = LiveDocument::parse(PAGE);
        let hero = doc
            .descendants(doc.root())
            .into_iter()
            .find(|n| doc.element(*n).is_some_and(|el| el.has_class("hero")))
            .unwrap();
        let added = doc.append_markup(hero, r#"<div class="card"><h3>Mug</h3></div>"#);
        assert_eq!(added.len(), 1);
        assert_eq!(doc.parent(added[0]), Some(hero));
        assert!(doc.to_html().contains("<div class=\"card\"><h3>Mug</h3></div></div>"));
    }
}
