//! Arena node identity
//!
//! Nodes of a [`Document`](crate::node::Document) live in one `Vec` and refer
//! to their children by index. A `NodeId` is that index.
//!
//! # Memory Layout
//!
//! - 4 bytes (u32)
//! - Copy, no heap allocation
//!
//! Ids are only minted by the arena when a node is pushed, so an id is
//! always valid for the document that produced it.

use std::fmt;

// =============================================================================
// NodeId
// =============================================================================

/// Index of a node inside its document arena
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Create a NodeId from a raw index.
    ///
    /// Intended for tests and debug tooling. The arena hands out ids itself.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 representation
    #[inline]
    pub const fn as_raw(&self) -> u32 {
        self.0
    }

    /// Position in the arena
    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_round_trip() {
        let id = NodeId::from_raw(42);
        assert_eq!(id.as_raw(), 42);
        assert_eq!(id.index(), 42);
    }

    #[test]
    fn test_formatting() {
        let id = NodeId::from_raw(7);
        assert_eq!(format!("{id}"), "#7");
        assert_eq!(format!("{id:?}"), "NodeId(7)");
    }

    #[test]
    fn test_size() {
        assert_eq!(std::mem::size_of::<NodeId>(), 4);
    }
}
