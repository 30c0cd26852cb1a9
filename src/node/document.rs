//! Document arena and traversal utilities
//!
//! The root container for parsed trees. Every node lives in `nodes`; the
//! top-level sequence (a fragment may have several roots) lives in `roots`.

use smallvec::SmallVec;

use crate::id::NodeId;

use super::{Element, Node, Text};

// =============================================================================
// Document
// =============================================================================

/// Arena-owned document tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
    roots: SmallVec<[NodeId; 8]>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Construction
    // ─────────────────────────────────────────────────────────────────────────

    /// Append an element under `parent` (or as a root) and return its id.
    ///
    /// A parent that is not an element of this document is treated as
    /// absent, so the node becomes a root instead of being lost.
    pub fn push_element(&mut self, parent: Option<NodeId>, element: Element) -> NodeId {
        self.push(parent, Node::Element(element))
    }

    /// Append a text node under `parent` (or as a root) and return its id.
    pub fn push_text(&mut self, parent: Option<NodeId>, content: impl Into<String>) -> NodeId {
        self.push(parent, Node::Text(Text::new(content)))
    }

    fn push(&mut self, parent: Option<NodeId>, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        match parent.and_then(|p| self.nodes.get_mut(p.index())) {
            Some(Node::Element(parent)) => parent.children.push(id),
            _ => self.roots.push(id),
        }
        id
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query API
    // ─────────────────────────────────────────────────────────────────────────

    /// Top-level nodes in document order
    #[inline]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.get(id).and_then(Node::as_element)
    }

    pub fn text(&self, id: NodeId) -> Option<&Text> {
        self.get(id).and_then(Node::as_text)
    }

    /// Children of `id`; empty for text nodes and unknown ids
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.element(id).map(Element::children).unwrap_or(&[])
    }

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Count element nodes
    pub fn element_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_element()).count()
    }

    /// Iterate over all nodes in creation order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i as u32), n))
    }

    /// Pre-order traversal of `id` and everything below it
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants { doc: self, stack: vec![id] }
    }

    /// Concatenated text of `id` and its descendants, in document order
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node in self.descendants(id) {
            if let Some(Node::Text(text)) = self.get(node) {
                out.push_str(&text.content);
            }
        }
        out
    }

    /// Concatenated text of the whole document
    pub fn full_text(&self) -> String {
        self.roots.iter().map(|&id| self.text_content(id)).collect()
    }
}

// =============================================================================
// Descendants
// =============================================================================

/// Iterative pre-order walk; deep trees cannot overflow the stack
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        loop {
            let id = self.stack.pop()?;
            let Some(node) = self.doc.get(id) else { continue };
            if let Node::Element(elem) = node {
                self.stack.extend(elem.children.iter().rev().copied());
            }
            return Some(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let p = doc.push_element(None, Element::new("p"));
        doc.push_text(Some(p), "Hello ");
        let strong = doc.push_element(Some(p), Element::new("strong"));
        doc.push_text(Some(strong), "World");
        doc.push_text(None, "!");
        (doc, p, strong)
    }

    #[test]
    fn test_arena_links_children_once() {
        let (doc, p, strong) = sample();
        assert_eq!(doc.len(), 5);
        assert_eq!(doc.roots().len(), 2);
        assert_eq!(doc.children(p).len(), 2);
        assert_eq!(doc.children(strong).len(), 1);
        assert_eq!(doc.element_count(), 2);
    }

    #[test]
    fn test_text_content() {
        let (doc, p, strong) = sample();
        assert_eq!(doc.text_content(p), "Hello World");
        assert_eq!(doc.text_content(strong), "World");
        assert_eq!(doc.full_text(), "Hello World!");
    }

    #[test]
    fn test_text_parent_becomes_root() {
        let mut doc = Document::new();
        let text = doc.push_text(None, "a");
        let orphan = doc.push_text(Some(text), "b");
        assert_eq!(doc.roots(), &[text, orphan]);
        assert!(doc.children(text).is_empty());
    }

    #[test]
    fn test_unknown_id_is_tolerated() {
        let doc = Document::new();
        assert!(doc.get(NodeId::from_raw(3)).is_none());
        assert!(doc.children(NodeId::from_raw(3)).is_empty());
        assert_eq!(doc.text_content(NodeId::from_raw(3)), "");
    }

    #[test]
    fn test_deep_tree_text_content() {
        let mut doc = Document::new();
        let mut parent = None;
        for _ in 0..20_000 {
            parent = Some(doc.push_element(parent, Element::new("span")));
        }
        doc.push_text(parent, "deep");
        assert_eq!(doc.full_text(), "deep");
    }
}
