//! TranslationContext: per-call traversal state
//!
//! Created fresh for every translation and dropped with it; nothing here
//! outlives a call. The translator pushes on the way down and pops on the
//! way up, so every stack is balanced when a call returns.

use smallvec::SmallVec;

use crate::fragment::Marker;
use crate::style::{Alignment, ListKind};

/// How newlines in emitted text are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineMode {
    /// Newlines are kept as written
    #[default]
    Free,
    /// Inside a list item: newlines continue at this column
    Continuation(usize),
    /// Inside a heading: newlines become spaces
    Single,
}

/// Stacks and counters threaded through one translation
#[derive(Debug, Default)]
pub struct TranslationContext {
    lists: SmallVec<[ListKind; 4]>,
    alignments: SmallVec<[Alignment; 4]>,
    strong: u32,
    emph: u32,
    list_items: u32,
    line_mode: LineMode,
    depth: usize,
}

impl TranslationContext {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lists
    // ─────────────────────────────────────────────────────────────────────────

    pub fn push_list(&mut self, kind: ListKind) {
        self.lists.push(kind);
    }

    pub fn pop_list(&mut self) {
        self.lists.pop();
    }

    /// Number of enclosing `ul`/`ol` elements
    pub fn list_depth(&self) -> usize {
        self.lists.len()
    }

    /// Kind of the innermost enclosing list
    pub fn current_list(&self) -> Option<ListKind> {
        self.lists.last().copied()
    }

    pub fn enter_list_item(&mut self) {
        self.list_items += 1;
    }

    pub fn exit_list_item(&mut self) {
        self.list_items = self.list_items.saturating_sub(1);
    }

    pub fn in_list_item(&self) -> bool {
        self.list_items > 0
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Alignment
    // ─────────────────────────────────────────────────────────────────────────

    /// Push an explicit alignment; returns whether anything was pushed
    pub fn push_alignment(&mut self, alignment: Alignment) -> bool {
        if alignment.is_none() {
            return false;
        }
        self.alignments.push(alignment);
        true
    }

    pub fn pop_alignment(&mut self) {
        self.alignments.pop();
    }

    /// Innermost explicit alignment on the ancestor chain
    pub fn alignment(&self) -> Alignment {
        self.alignments.last().copied().unwrap_or_default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Emphasis
    // ─────────────────────────────────────────────────────────────────────────

    /// Enter an emphasis; returns false when the same emphasis is already
    /// active (the inner one then passes through)
    pub fn enter_marker(&mut self, marker: Marker) -> bool {
        let count = self.marker_count(marker);
        *count += 1;
        *count == 1
    }

    pub fn exit_marker(&mut self, marker: Marker) {
        let count = self.marker_count(marker);
        *count = count.saturating_sub(1);
    }

    pub fn is_active(&self, marker: Marker) -> bool {
        match marker {
            Marker::Strong => self.strong > 0,
            Marker::Emph => self.emph > 0,
        }
    }

    fn marker_count(&mut self, marker: Marker) -> &mut u32 {
        match marker {
            Marker::Strong => &mut self.strong,
            Marker::Emph => &mut self.emph,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Line mode and depth
    // ─────────────────────────────────────────────────────────────────────────

    pub fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Switch line mode, returning the previous one for restoring
    pub fn replace_line_mode(&mut self, mode: LineMode) -> LineMode {
        std::mem::replace(&mut self.line_mode, mode)
    }

    pub fn enter(&mut self) -> usize {
        self.depth += 1;
        self.depth
    }

    pub fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// All stacks unwound (true between top-level nodes)
    pub fn is_balanced(&self) -> bool {
        self.lists.is_empty()
            && self.alignments.is_empty()
            && self.strong == 0
            && self.emph == 0
            && self.list_items == 0
            && self.depth == 0
            && self.line_mode == LineMode::Free
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_stack() {
        let mut ctx = TranslationContext::new();
        assert_eq!(ctx.current_list(), None);
        ctx.push_list(ListKind::Ordered);
        ctx.push_list(ListKind::Unordered);
        assert_eq!(ctx.list_depth(), 2);
        assert_eq!(ctx.current_list(), Some(ListKind::Unordered));
        ctx.pop_list();
        assert_eq!(ctx.current_list(), Some(ListKind::Ordered));
    }

    #[test]
    fn test_alignment_innermost_wins() {
        let mut ctx = TranslationContext::new();
        assert!(!ctx.push_alignment(Alignment::None));
        assert!(ctx.push_alignment(Alignment::Center));
        assert!(ctx.push_alignment(Alignment::Justify));
        assert_eq!(ctx.alignment(), Alignment::Justify);
        ctx.pop_alignment();
        assert_eq!(ctx.alignment(), Alignment::Center);
        ctx.pop_alignment();
        assert_eq!(ctx.alignment(), Alignment::None);
    }

    #[test]
    fn test_nested_marker_detected() {
        let mut ctx = TranslationContext::new();
        assert!(ctx.enter_marker(Marker::Strong));
        assert!(!ctx.enter_marker(Marker::Strong));
        assert!(ctx.enter_marker(Marker::Emph));
        ctx.exit_marker(Marker::Strong);
        assert!(ctx.is_active(Marker::Strong));
        ctx.exit_marker(Marker::Strong);
        ctx.exit_marker(Marker::Emph);
        assert!(ctx.is_balanced());
    }

    #[test]
    fn test_line_mode_restore() {
        let mut ctx = TranslationContext::new();
        let prev = ctx.replace_line_mode(LineMode::Continuation(2));
        assert_eq!(ctx.line_mode(), LineMode::Continuation(2));
        ctx.replace_line_mode(prev);
        assert!(ctx.is_balanced());
    }
}
