//! Element node type

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::attr::{Attrs, AttrsExt};
use crate::id::NodeId;

/// Child id list; most editor elements have few children
pub type Children = SmallVec<[NodeId; 8]>;

// =============================================================================
// Element
// =============================================================================

/// Element node
///
/// Children are owned by the [`Document`](super::Document) arena and only
/// appended through it, which keeps the single-parent rule intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lower-case tag name
    pub tag: CompactString,
    /// Attributes in source order
    pub attrs: Attrs,
    pub(crate) children: Children,
}

impl Element {
    /// Create an element with no attributes; the tag is lower-cased
    pub fn new(tag: impl AsRef<str>) -> Self {
        let mut tag = CompactString::from(tag.as_ref());
        tag.make_ascii_lowercase();
        Self {
            tag,
            attrs: Attrs::new(),
            children: Children::new(),
        }
    }

    /// Create an element with attributes
    pub fn with_attrs(tag: impl AsRef<str>, attrs: Attrs) -> Self {
        Self { attrs, ..Self::new(tag) }
    }

    /// Builder: add or replace an attribute
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set_attr(name, value);
        self
    }

    /// Child ids in document order
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get_attr(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.has_attr(name)
    }

    /// Check tag name (case-insensitive)
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_builder() {
        let elem = Element::new("LI")
            .attr("class", "ql-indent-1")
            .attr("data-list", "bullet");

        assert_eq!(elem.tag, "li");
        assert!(elem.is_tag("li"));
        assert_eq!(elem.get_attr("data-list"), Some("bullet"));
        assert!(elem.has_attr("class"));
        assert!(elem.is_empty());
    }

    #[test]
    fn test_with_attrs() {
        let elem = Element::with_attrs("a", vec![("href".into(), "https://x.org".into())]);
        assert_eq!(elem.get_attr("href"), Some("https://x.org"));
        assert!(elem.children().is_empty());
    }
}
