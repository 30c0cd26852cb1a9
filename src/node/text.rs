//! Text node type

// =============================================================================
// Text
// =============================================================================

/// Text content node, exactly as the parser produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub content: String,
}

impl Text {
    /// Create a new text node
    pub fn new(content: impl Into<String>) -> Self {
        Self { content: content.into() }
    }

    /// Check if text content is empty
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Get text length in bytes
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if text is only whitespace, counting non-breaking spaces
    pub fn is_blank(&self) -> bool {
        is_blank(&self.content)
    }
}

/// Whitespace test used by the emptiness rule.
///
/// U+00A0 is already `White_Space` in Unicode; U+200B (zero width space) and
/// U+FEFF (BOM) are not, but editors leave them in otherwise empty runs.
pub fn is_blank(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_whitespace() || matches!(c, '\u{200B}' | '\u{FEFF}'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_node() {
        let text = Text::new("  hello world  ");
        assert!(!text.is_empty());
        assert!(!text.is_blank());
        assert_eq!(text.len(), 15);
    }

    #[test]
    fn test_blank_counts_nbsp() {
        assert!(is_blank(""));
        assert!(is_blank(" \n\t"));
        assert!(is_blank("\u{a0}"));
        assert!(is_blank(" \u{a0}\u{200B} "));
        assert!(!is_blank("\u{a0}x"));
    }
}
