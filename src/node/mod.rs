//! Arena node types.
//!
//! This module provides `Element`, `Node`, `Text`, and `Document` types.
//! A `Document` owns every node in a single `Vec`; elements refer to their
//! children by [`NodeId`](crate::id::NodeId).
//!
//! # Key Features
//!
//! - Strict ownership: a node is linked to exactly one parent, at creation
//! - No back-references, so cycles cannot be expressed
//! - Text content is kept exactly as parsed, including decoded entities

mod document;
mod element;
mod text;

pub use document::{Descendants, Document};
pub use element::{Children, Element};
pub use text::{Text, is_blank};

/// Node in an arena tree - either Element or Text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(Text),
}

impl Node {
    impl_enum_accessors!(element, text);

    /// Tag name for elements, `#text` for text nodes
    pub fn name(&self) -> &str {
        match self {
            Node::Element(e) => &e.tag,
            Node::Text(_) => "#text",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_accessors() {
        let node = Node::Element(Element::new("p"));
        assert!(node.is_element());
        assert!(!node.is_text());
        assert_eq!(node.as_element().map(|e| e.tag.as_str()), Some("p"));
        assert_eq!(node.name(), "p");

        let node = Node::Text(Text::new("hi"));
        assert!(node.is_text());
        assert_eq!(node.as_text().map(|t| t.content.as_str()), Some("hi"));
        assert_eq!(node.name(), "#text");
    }
}
