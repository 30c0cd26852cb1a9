//! NodeTranslator: arena tree → fragment sequence
//!
//! Depth-first walk. Block framing is decided on the way down (line start,
//! list markers, heading prefixes) and inline wrappers on the way up, once
//! the children's fragments exist and the emptiness rule can inspect them.
//!
//! # Dispatch
//!
//! [`style::resolve`] turns every element into a closed [`BlockKind`] plus
//! inline flags; the walk matches on it exhaustively. `BlockKind::Container`
//! is the catch-all: children pass through with no wrapper, so every text
//! node reaches the output whatever the tag.
//!
//! # Emptiness rule
//!
//! Emphasis, underline, strike, super- and subscript only wrap content that
//! has a visible character. Whitespace-only content (non-breaking spaces
//! included) is emitted unwrapped, which rules out `* *`-style output.

use std::borrow::Cow;
use std::fmt;

use smallvec::SmallVec;

use crate::debug::{DebugRecord, DebugSink};
use crate::escape::{code_fence, escape_string, escape_text, inline_raw, line_marker_at, raw_call};
use crate::fragment::{Delim, Fragment, FragmentKind, Marker};
use crate::id::NodeId;
use crate::node::{Document, Element, Node, Text, is_blank};
use crate::style::{self, Alignment, BlockKind, ListKind, StyleDirective};

use super::context::{LineMode, TranslationContext};

/// Elements nested deeper than this are flattened to their text
pub const MAX_DEPTH: usize = 512;

// =============================================================================
// Actions
// =============================================================================

/// Decision taken for an element, reported to the debug sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Paragraph,
    Heading(u8),
    List(ListKind),
    ListItem(ListKind),
    Blockquote,
    CodeBlock,
    CodeInline,
    /// Inline code with a backtick, emitted as `#raw("...")`
    RawCall,
    Link,
    Image,
    LineBreak,
    Align(Alignment),
    /// Wrapped in a marker pair
    Marker(Marker),
    /// Wrapped in `#name[...]`
    Command(&'static str),
    /// Emptiness rule: wrapper skipped
    Empty(&'static str),
    /// Same emphasis already active: wrapper skipped
    Nested(Marker),
    /// Nothing emitted (image without alt, empty code, ...)
    Omit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Paragraph => f.write_str("paragraph"),
            Action::Heading(level) => write!(f, "heading({level})"),
            Action::List(kind) => write!(f, "list({})", kind.marker().trim_end()),
            Action::ListItem(kind) => write!(f, "list-item({})", kind.marker().trim_end()),
            Action::Blockquote => f.write_str("blockquote"),
            Action::CodeBlock => f.write_str("code-block"),
            Action::CodeInline => f.write_str("code-inline"),
            Action::RawCall => f.write_str("raw-call"),
            Action::Link => f.write_str("link"),
            Action::Image => f.write_str("image"),
            Action::LineBreak => f.write_str("line-break"),
            Action::Align(alignment) => write!(f, "align({})", alignment.name()),
            Action::Marker(marker) => write!(f, "marker({})", marker.as_str()),
            Action::Command(name) => write!(f, "command({name})"),
            Action::Empty(name) => write!(f, "empty({name})"),
            Action::Nested(marker) => write!(f, "nested({})", marker.as_str()),
            Action::Omit => f.write_str("omit"),
        }
    }
}

type Actions = SmallVec<[Action; 2]>;

// =============================================================================
// Entry points
// =============================================================================

/// Translate a whole document into fragments
pub fn translate(doc: &Document, sink: &dyn DebugSink) -> Vec<Fragment> {
    Translator::new(doc, sink).translate()
}

// =============================================================================
// Translator
// =============================================================================

/// Tree walker holding the per-call context and the output sequence
pub struct Translator<'a> {
    doc: &'a Document,
    sink: &'a dyn DebugSink,
    ctx: TranslationContext,
    out: Vec<Fragment>,
}

impl<'a> Translator<'a> {
    pub fn new(doc: &'a Document, sink: &'a dyn DebugSink) -> Self {
        Self {
            doc,
            sink,
            ctx: TranslationContext::new(),
            out: Vec::with_capacity(doc.len() * 2),
        }
    }

    pub fn translate(mut self) -> Vec<Fragment> {
        let doc = self.doc;
        for &root in doc.roots() {
            self.node(root);
        }
        debug_assert!(self.ctx.is_balanced());
        escape_line_starts(&mut self.out);
        self.out
    }

    fn node(&mut self, id: NodeId) {
        let doc = self.doc;
        match doc.get(id) {
            Some(Node::Text(text)) => self.text(id, text),
            Some(Node::Element(elem)) => self.element(id, elem),
            None => {}
        }
    }

    fn children(&mut self, id: NodeId) {
        let doc = self.doc;
        for &child in doc.children(id) {
            self.node(child);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Text
    // ─────────────────────────────────────────────────────────────────────────

    fn text(&mut self, id: NodeId, text: &Text) {
        if text.is_empty() {
            return;
        }
        let escaped = self.push_text(&text.content);
        if self.sink.is_enabled() {
            self.sink.record(DebugRecord::Text { node: id, bytes: text.len(), escaped });
        }
    }

    /// Push source text shaped for the current line mode; returns whether
    /// escaping changed it
    fn push_text(&mut self, content: &str) -> bool {
        let shaped = shape_lines(content, self.ctx.line_mode());
        let escaped = escape_text(&shaped, self.at_line_start());
        let changed = *escaped != *shaped;
        self.out.push(Fragment::text(&*escaped));
        changed
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Elements
    // ─────────────────────────────────────────────────────────────────────────

    fn element(&mut self, id: NodeId, elem: &Element) {
        let depth = self.ctx.enter();
        if depth > MAX_DEPTH {
            self.degrade(id, depth);
            self.ctx.exit();
            return;
        }

        let directive = style::resolve_element(elem);
        let pushed_alignment = self.ctx.push_alignment(directive.alignment);
        let first = self.out.len();
        let mut actions = Actions::new();

        match &directive.block {
            BlockKind::Container => self.with_inline(&directive, &mut actions, |t| t.children(id)),
            BlockKind::Paragraph => self.paragraph(id, &directive, &mut actions),
            BlockKind::Heading(level) => self.heading(id, *level, &directive, &mut actions),
            BlockKind::List(kind) => self.list(id, *kind, &directive, &mut actions),
            BlockKind::ListItem { kind, indent } => {
                self.list_item(id, *kind, *indent, &directive, &mut actions)
            }
            BlockKind::Blockquote => self.blockquote(id, &directive, &mut actions),
            BlockKind::CodeBlock => self.code_block(id, &mut actions),
            BlockKind::CodeInline => self.code_inline(id, &directive, &mut actions),
            BlockKind::Link { href } => self.link(id, href.as_deref(), &directive, &mut actions),
            BlockKind::Image { alt } => self.image(alt.as_deref(), &directive, &mut actions),
            BlockKind::LineBreak => self.line_break(&mut actions),
        }

        if pushed_alignment {
            self.ctx.pop_alignment();
        }
        self.ctx.exit();

        if self.sink.is_enabled() {
            self.sink.record(DebugRecord::Dispatch {
                node: id,
                tag: elem.tag.clone(),
                directive,
                actions,
                fragments: self.out.len() - first,
            });
        }
    }

    fn degrade(&mut self, id: NodeId, depth: usize) {
        let text = self.doc.text_content(id);
        if !text.is_empty() {
            self.push_text(&text);
        }
        if self.sink.is_enabled() {
            self.sink.record(DebugRecord::Degraded { node: id, depth });
        }
    }

    /// Translate content via `content`, then apply the directive's inline
    /// wrappers around whatever it produced
    fn with_inline(
        &mut self,
        d: &StyleDirective,
        actions: &mut Actions,
        content: impl FnOnce(&mut Self),
    ) {
        let start = self.out.len();
        let bold = d.bold.then(|| self.ctx.enter_marker(Marker::Strong));
        let italic = d.italic.then(|| self.ctx.enter_marker(Marker::Emph));

        content(self);

        if italic.is_some() {
            self.ctx.exit_marker(Marker::Emph);
        }
        if bold.is_some() {
            self.ctx.exit_marker(Marker::Strong);
        }

        // innermost first
        if d.subscript {
            self.wrap_command(start, "sub", actions);
        }
        if d.superscript {
            self.wrap_command(start, "super", actions);
        }
        if d.strike {
            self.wrap_command(start, "strike", actions);
        }
        if d.underline {
            self.wrap_command(start, "underline", actions);
        }
        for (state, marker) in [(italic, Marker::Emph), (bold, Marker::Strong)] {
            match state {
                Some(true) => self.wrap_marker(start, marker, actions),
                Some(false) => actions.push(Action::Nested(marker)),
                None => {}
            }
        }
    }

    fn wrap_command(&mut self, start: usize, name: &'static str, actions: &mut Actions) {
        if !has_visible(&self.out[start..]) {
            actions.push(Action::Empty(name));
            return;
        }
        self.out.insert(start, Fragment::command_open(format!("#{name}[")));
        self.out.push(Fragment::command_close());
        actions.push(Action::Command(name));
    }

    fn wrap_marker(&mut self, start: usize, marker: Marker, actions: &mut Actions) {
        let content = &self.out[start..];
        if !has_visible(content) {
            actions.push(Action::Empty(marker.command()));
        } else if spans_blocks(content) {
            // markers cannot cross a paragraph break
            self.wrap_command(start, marker.command(), actions);
        } else {
            self.out.insert(start, Fragment::marker_open(marker));
            self.out.push(Fragment::marker_close(marker));
            actions.push(Action::Marker(marker));
        }
    }

    /// Wrap `out[start..]` in `#align(..)[...]` when the context asks for it
    fn wrap_alignment(&mut self, start: usize, actions: &mut Actions) {
        let alignment = self.ctx.alignment();
        if let Some(arg) = alignment.wrapper()
            && self.out.len() > start
        {
            self.out.insert(start, Fragment::command_open(format!("#align({arg})[")));
            self.out.push(Fragment::command_close());
            actions.push(Action::Align(alignment));
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Blocks
    // ─────────────────────────────────────────────────────────────────────────

    fn paragraph(&mut self, id: NodeId, d: &StyleDirective, actions: &mut Actions) {
        actions.push(Action::Paragraph);
        if self.ctx.in_list_item() {
            self.item_line();
            let start = self.out.len();
            self.with_inline(d, actions, |t| t.children(id));
            self.wrap_alignment(start, actions);
            return;
        }

        self.block_start();
        let start = self.out.len();
        self.with_inline(d, actions, |t| t.children(id));
        self.wrap_alignment(start, actions);
        self.paragraph_break();
    }

    fn heading(&mut self, id: NodeId, level: u8, d: &StyleDirective, actions: &mut Actions) {
        if self.ctx.in_list_item() {
            return self.paragraph(id, d, actions);
        }
        actions.push(Action::Heading(level));

        self.block_start();
        let outer = self.out.len();
        self.out.push(Fragment::block(format!("{} ", "=".repeat(level as usize))));

        let prev = self.ctx.replace_line_mode(LineMode::Single);
        let start = self.out.len();
        self.with_inline(d, actions, |t| t.children(id));
        self.ctx.replace_line_mode(prev);
        trim_edges(&mut self.out, start);

        if self.out.len() == start {
            // no content: drop the lone prefix
            self.out.truncate(outer);
            return;
        }
        self.wrap_alignment(outer, actions);
        self.paragraph_break();
    }

    fn list(&mut self, id: NodeId, kind: ListKind, d: &StyleDirective, actions: &mut Actions) {
        actions.push(Action::List(kind));
        let nested = self.ctx.in_list_item();
        if nested {
            self.ensure_column_zero();
        } else {
            self.block_start();
        }

        self.ctx.push_list(kind);
        let prev = self.ctx.replace_line_mode(LineMode::Free);
        self.with_inline(d, actions, |t| t.children(id));
        self.ctx.replace_line_mode(prev);
        self.ctx.pop_list();

        self.ensure_column_zero();
        if !nested && self.ctx.list_depth() == 0 {
            self.paragraph_break();
        }
    }

    fn list_item(
        &mut self,
        id: NodeId,
        kind: Option<ListKind>,
        indent: u8,
        d: &StyleDirective,
        actions: &mut Actions,
    ) {
        // an item outside any list is unordered and not indented
        let kind = kind.or(self.ctx.current_list()).unwrap_or_default();
        let level = match self.ctx.list_depth() {
            0 => 0,
            depth => depth - 1 + indent as usize,
        };
        actions.push(Action::ListItem(kind));

        self.ensure_column_zero();
        let pad = "  ".repeat(level);
        self.out.push(Fragment::block(format!("{pad}{}", kind.marker())));

        let prev = self.ctx.replace_line_mode(LineMode::Continuation(pad.len() + 2));
        self.ctx.enter_list_item();
        let start = self.out.len();
        self.with_inline(d, actions, |t| t.children(id));
        trim_edges(&mut self.out, start);
        self.ctx.exit_list_item();
        self.ctx.replace_line_mode(prev);

        self.ensure_column_zero();
    }

    fn blockquote(&mut self, id: NodeId, d: &StyleDirective, actions: &mut Actions) {
        actions.push(Action::Blockquote);
        let in_item = self.ctx.in_list_item();
        if in_item {
            self.item_line();
        } else {
            self.block_start();
        }

        let start = self.out.len();
        self.with_inline(d, actions, |t| t.children(id));
        trim_edges(&mut self.out, start);
        if self.out.len() > start {
            for frag in &mut self.out[start..] {
                if frag.kind != FragmentKind::Raw && frag.content.contains('\n') {
                    frag.content = frag.content.replace('\n', "\n> ").into();
                }
            }
            self.out.insert(start, Fragment::block("> "));
        }

        if !in_item {
            self.paragraph_break();
        }
    }

    fn code_block(&mut self, id: NodeId, actions: &mut Actions) {
        let code = self.doc.text_content(id);
        if code.is_empty() {
            actions.push(Action::Omit);
            return;
        }
        actions.push(Action::CodeBlock);

        let in_item = self.ctx.in_list_item();
        if in_item {
            self.ensure_column_zero();
        } else {
            self.block_start();
        }
        let fence = code_fence(&code);
        self.out.push(Fragment::raw(format!("{fence}\n{code}\n{fence}")));
        if in_item {
            self.ensure_column_zero();
        } else {
            self.paragraph_break();
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Inline leaves
    // ─────────────────────────────────────────────────────────────────────────

    fn code_inline(&mut self, id: NodeId, d: &StyleDirective, actions: &mut Actions) {
        let code = self.doc.text_content(id);
        if code.is_empty() {
            actions.push(Action::Omit);
            return;
        }
        self.with_inline(d, actions, |t| match inline_raw(&code) {
            Some(raw) => t.out.push(Fragment::raw_inline(raw)),
            None => {
                // `#raw(...)` ends like a call, so it closes a command
                let mut call = Fragment::raw(raw_call(&code));
                call.opens = Some(Delim::Command);
                call.closes = Some(Delim::Command);
                t.out.push(call);
            }
        });
        actions.insert(0, if code.contains('`') { Action::RawCall } else { Action::CodeInline });
    }

    fn link(&mut self, id: NodeId, href: Option<&str>, d: &StyleDirective, actions: &mut Actions) {
        let start = self.out.len();
        self.with_inline(d, actions, |t| t.children(id));

        // missing href: the text passes through unwrapped
        if let Some(href) = href {
            if self.out.len() == start {
                actions.push(Action::Omit);
                return;
            }
            let head = format!("#link(\"{}\")[", escape_string(href));
            self.out.insert(start, Fragment::command_open(head));
            self.out.push(Fragment::command_close());
            actions.push(Action::Link);
        }
    }

    fn image(&mut self, alt: Option<&str>, d: &StyleDirective, actions: &mut Actions) {
        match alt {
            Some(alt) => {
                actions.push(Action::Image);
                self.with_inline(d, actions, |t| {
                    t.push_text(alt);
                });
            }
            None => actions.push(Action::Omit),
        }
    }

    fn line_break(&mut self, actions: &mut Actions) {
        actions.push(Action::LineBreak);
        let markup = match self.ctx.line_mode() {
            LineMode::Free => "\\\n".to_string(),
            LineMode::Continuation(col) => format!("\\\n{}", " ".repeat(col)),
            LineMode::Single => "\\ ".to_string(),
        };
        self.out.push(Fragment::markup(markup));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Line bookkeeping
    // ─────────────────────────────────────────────────────────────────────────

    fn last_char(&self) -> Option<char> {
        self.out.iter().rev().find_map(Fragment::last_char)
    }

    /// True when only spaces/tabs follow the last newline (or nothing was
    /// emitted yet)
    fn at_line_start(&self) -> bool {
        for frag in self.out.iter().rev() {
            for c in frag.content.chars().rev() {
                match c {
                    ' ' | '\t' => continue,
                    '\n' => return true,
                    _ => return false,
                }
            }
        }
        true
    }

    /// Newlines at the end of the output, ignoring trailing spaces/tabs
    fn trailing_newlines(&self) -> usize {
        let mut count = 0;
        for frag in self.out.iter().rev() {
            for c in frag.content.chars().rev() {
                match c {
                    ' ' | '\t' => {}
                    '\n' => count += 1,
                    _ => return count,
                }
            }
        }
        count
    }

    fn ensure_column_zero(&mut self) {
        if matches!(self.last_char(), Some(c) if c != '\n') {
            self.out.push(Fragment::block("\n"));
        }
    }

    /// End the current block with a blank line
    fn paragraph_break(&mut self) {
        if self.out.is_empty() {
            return;
        }
        match self.trailing_newlines() {
            0 => self.out.push(Fragment::block("\n\n")),
            1 => self.out.push(Fragment::block("\n")),
            _ => {}
        }
    }

    /// Start a top-level block: blank line before, column zero
    fn block_start(&mut self) {
        self.paragraph_break();
        self.ensure_column_zero();
    }

    /// Inside a list item, start a new line of the item's body unless the
    /// item marker was just emitted
    fn item_line(&mut self) {
        let at_marker = self
            .out
            .last()
            .is_some_and(|f| f.kind == FragmentKind::Block && (f.content.ends_with("- ") || f.content.ends_with("+ ")));
        if at_marker {
            return;
        }
        let col = match self.ctx.line_mode() {
            LineMode::Continuation(col) => col,
            _ => 0,
        };
        self.out.push(Fragment::markup(format!("\\\n{}", " ".repeat(col))));
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Apply the line mode to raw source text
fn shape_lines(content: &str, mode: LineMode) -> Cow<'_, str> {
    if !content.contains(['\n', '\r']) {
        return Cow::Borrowed(content);
    }
    match mode {
        LineMode::Free => Cow::Borrowed(content),
        LineMode::Single => Cow::Owned(content.replace("\r\n", " ").replace(['\n', '\r'], " ")),
        LineMode::Continuation(col) => {
            let newline = format!("\n{}", " ".repeat(col));
            Cow::Owned(content.replace("\r\n", "\n").replace('\r', "\n").replace('\n', &newline))
        }
    }
}

/// Escape list, enum, term and heading markers wherever a text run starts a
/// line in the finished output.
///
/// Per-fragment escaping cannot see two cases: content that only starts a
/// line once a wrapper is inserted in front of it (`#underline[- x]`), and
/// a marker split across text fragments (`1` + `. x`).
fn escape_line_starts(out: &mut [Fragment]) {
    let mut line_start = true;
    for i in 0..out.len() {
        if line_start && out[i].kind == FragmentKind::Text {
            escape_run_head(&mut out[i..]);
        }
        line_start = line_start_after(&out[i], line_start);
    }
}

/// Insert a backslash at the marker heading the leading run of text
/// fragments of `frags`
fn escape_run_head(frags: &mut [Fragment]) {
    let run = frags.iter().take_while(|f| f.kind == FragmentKind::Text).count();
    let text: String = frags[..run].iter().map(Fragment::as_str).collect();
    let Some(mut at) = line_marker_at(&text) else { return };

    for frag in &mut frags[..run] {
        if at < frag.content.len() {
            let content = &frag.content;
            frag.content = format!("{}\\{}", &content[..at], &content[at..]).into();
            return;
        }
        at -= frag.content.len();
    }
}

/// Line-start state after emitting `frag`
fn line_start_after(frag: &Fragment, line_start: bool) -> bool {
    // a content block starts like a fresh line, and so does an item body
    if (frag.kind == FragmentKind::Markup && frag.opens == Some(Delim::Command))
        || (frag.kind == FragmentKind::Block && frag.content.ends_with(' '))
    {
        return true;
    }
    frag.content.chars().fold(line_start, |state, c| match c {
        '\n' => true,
        ' ' | '\t' => state,
        _ => false,
    })
}

/// Content has a visible character (emptiness rule)
fn has_visible(frags: &[Fragment]) -> bool {
    frags.iter().any(|f| f.is_content() && !is_blank(&f.content))
}

/// Content contains block structure or a blank line
fn spans_blocks(frags: &[Fragment]) -> bool {
    let mut newline = false;
    for frag in frags {
        match frag.kind {
            FragmentKind::Block => return true,
            FragmentKind::Raw => newline = false,
            _ => {
                for c in frag.content.chars() {
                    if c == '\n' {
                        if newline {
                            return true;
                        }
                        newline = true;
                    } else if !c.is_whitespace() {
                        newline = false;
                    }
                }
            }
        }
    }
    false
}

/// Trim ASCII whitespace off the text at both edges of `out[start..]`
fn trim_edges(out: &mut Vec<Fragment>, start: usize) {
    // block prefixes keep their indentation; only blank block fragments go
    let trimmable = |f: &Fragment| match f.kind {
        FragmentKind::Text => true,
        FragmentKind::Block => f.content.trim().is_empty(),
        _ => false,
    };

    while start < out.len() && trimmable(&out[start]) {
        let trimmed = out[start].content.trim_start_matches(|c: char| c.is_ascii_whitespace());
        if trimmed.is_empty() {
            out.remove(start);
        } else {
            out[start].content = trimmed.into();
            break;
        }
    }

    while out.len() > start && out.last().is_some_and(trimmable) {
        let Some(last) = out.last_mut() else { break };
        let trimmed = last.content.trim_end_matches(|c: char| c.is_ascii_whitespace());
        if trimmed.is_empty() {
            out.pop();
        } else {
            last.content = trimmed.into();
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::from_html;
    use crate::debug::{MemorySink, NoopSink};

    fn fragments(html: &str) -> Vec<Fragment> {
        translate(&from_html(html), &NoopSink)
    }

    fn joined(html: &str) -> String {
        fragments(html).iter().map(Fragment::as_str).collect()
    }

    #[test]
    fn test_paragraph() {
        assert_eq!(joined("<p>Hello World</p>"), "Hello World\n\n");
        assert_eq!(joined("<p>a</p><p>b</p>"), "a\n\nb\n\n");
    }

    #[test]
    fn test_emphasis_markers() {
        assert_eq!(joined("<p><strong>Bold text</strong></p>"), "*Bold text*\n\n");
        assert_eq!(joined("<p><em>Italic text</em></p>"), "_Italic text_\n\n");
        assert_eq!(joined("<p><b><i>both</i></b></p>"), "*_both_*\n\n");
    }

    #[test]
    fn test_marker_boundaries_recorded() {
        let frags = fragments("<p><strong>x</strong></p>");
        assert_eq!(frags[0].opens_marker(), Some(Marker::Strong));
        assert_eq!(frags[2].closes_marker(), Some(Marker::Strong));
    }

    #[test]
    fn test_commands() {
        assert_eq!(joined("<p><u>Underlined</u></p>"), "#underline[Underlined]\n\n");
        assert_eq!(joined("<p><s>gone</s></p>"), "#strike[gone]\n\n");
        assert_eq!(joined("<p>H<sub>2</sub>O</p>"), "H#sub[2]O\n\n");
        assert_eq!(joined("<p>x<sup>2</sup></p>"), "x#super[2]\n\n");
    }

    #[test]
    fn test_emptiness_rule() {
        assert_eq!(joined("<p><strong>&nbsp;</strong>Text</p>"), "\u{a0}Text\n\n");
        assert_eq!(joined("<p><em> </em>x</p>"), " x\n\n");
        assert_eq!(joined("<p><u>  </u>x</p>"), "  x\n\n");
        assert_eq!(joined("<p><s></s>x</p>"), "x\n\n");
        assert_eq!(joined("<p><strong><br></strong>x</p>"), "\\\nx\n\n");
    }

    #[test]
    fn test_nested_same_emphasis_passes_through() {
        assert_eq!(joined("<p><strong>a <b>b</b> c</strong></p>"), "*a b c*\n\n");
    }

    #[test]
    fn test_emphasis_across_paragraphs_uses_command() {
        assert_eq!(joined("<strong><p>a</p><p>b</p></strong>"), "#strong[a\n\nb\n\n]");
    }

    #[test]
    fn test_headings() {
        assert_eq!(joined("<h1>Heading 1</h1>"), "= Heading 1\n\n");
        assert_eq!(joined("<h3>  Spaced\nout  </h3>"), "=== Spaced out\n\n");
        assert_eq!(joined("<h2>a<br>b</h2>"), "== a\\ b\n\n");
        assert_eq!(joined("<h2></h2>"), "");
    }

    #[test]
    fn test_lists() {
        assert_eq!(joined("<ul><li>Item 1</li><li>Item 2</li></ul>"), "- Item 1\n- Item 2\n\n");
        assert_eq!(joined("<ol><li>First</li></ol>"), "+ First\n\n");
        assert_eq!(
            joined("<ul><li>a<ul><li>b</li></ul></li><li>c</li></ul>"),
            "- a\n  - b\n- c\n\n"
        );
    }

    #[test]
    fn test_quill_flat_list() {
        let html = r#"<ol><li data-list="bullet">a</li><li data-list="ordered" class="ql-indent-1">b</li></ol>"#;
        assert_eq!(joined(html), "- a\n  + b\n\n");
    }

    #[test]
    fn test_orphan_list_item() {
        let html = "<li class=\"ql-indent-1\" style=\"text-align: justify;\">\n <span style=\"color: windowtext;\"><strong>Tekst</strong></span>\n</li>";
        assert_eq!(joined(html), "- *Tekst*\n");
    }

    #[test]
    fn test_list_item_continuation() {
        assert_eq!(joined("<ul><li>a<br>b</li></ul>"), "- a\\\n  b\n\n");
        assert_eq!(joined("<ul><li>a\nb</li></ul>"), "- a\n  b\n\n");
    }

    #[test]
    fn test_alignment() {
        assert_eq!(
            joined(r#"<p class="ql-align-center">Centered text</p>"#),
            "#align(center)[Centered text]\n\n"
        );
        assert_eq!(
            joined(r#"<p style="text-align: right">R</p>"#),
            "#align(right)[R]\n\n"
        );
        assert_eq!(joined(r#"<p style="text-align: justify">J</p>"#), "J\n\n");
        assert_eq!(
            joined(r#"<div class="ql-align-center"><p>in</p><p style="text-align:left">out</p></div>"#),
            "#align(center)[in]\n\nout\n\n"
        );
        assert_eq!(
            joined(r#"<h1 class="ql-align-center">T</h1>"#),
            "#align(center)[= T]\n\n"
        );
    }

    #[test]
    fn test_blockquote() {
        assert_eq!(joined("<blockquote>Quoted text</blockquote>"), "> Quoted text\n\n");
        assert_eq!(joined("<blockquote>a<br>b</blockquote>"), "> a\\\n> b\n\n");
    }

    #[test]
    fn test_code() {
        assert_eq!(joined("<p>This is <code>inline code</code></p>"), "This is `inline code`\n\n");
        assert_eq!(joined("<p><code>a`b</code></p>"), "#raw(\"a`b\")\n\n");
        assert_eq!(joined("<p><code></code>x</p>"), "x\n\n");
        assert_eq!(
            joined("<pre><code>def hello():\n    print('*x*')</code></pre>"),
            "```\ndef hello():\n    print('*x*')\n```\n\n"
        );
    }

    #[test]
    fn test_links_and_images() {
        assert_eq!(
            joined(r#"<p><a href="https://example.com">Link</a></p>"#),
            "#link(\"https://example.com\")[Link]\n\n"
        );
        assert_eq!(joined("<p><a>No href</a></p>"), "No href\n\n");
        assert_eq!(joined(r#"<p><img src="i.jpg" alt="Description"></p>"#), "Description\n\n");
        assert_eq!(joined(r#"<p>a<img src="i.jpg">b</p>"#), "ab\n\n");
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(joined("<p>5*3 = #15 @home</p>"), "5\\*3 = \\#15 \\@home\n\n");
        assert_eq!(joined("<p>- not a list</p>"), "\\- not a list\n\n");
    }

    #[test]
    fn test_markers_escaped_at_content_start() {
        assert_eq!(joined("<p>see <u>- note</u></p>"), "see #underline[\\- note]\n\n");
        assert_eq!(joined("<p>x<sup>+ 1</sup></p>"), "x#super[\\+ 1]\n\n");
        assert_eq!(joined("<p>a<s>= b</s></p>"), "a#strike[\\= b]\n\n");
        assert_eq!(joined("<p>a<sub>1. b</sub></p>"), "a#sub[1\\. b]\n\n");
        assert_eq!(
            joined(r#"<p>a <a href="https://x.org">- b</a></p>"#),
            "a #link(\"https://x.org\")[\\- b]\n\n"
        );
        assert_eq!(joined("<ul><li>- x</li></ul>"), "- \\- x\n\n");
        // mid-line text stays as written
        assert_eq!(joined("<p>a - b</p>"), "a - b\n\n");
        assert_eq!(joined("<p><u>a - b</u></p>"), "#underline[a - b]\n\n");
    }

    #[test]
    fn test_marker_split_across_text_nodes() {
        assert_eq!(joined("<p><span>1</span>. x</p>"), "1\\. x\n\n");
        assert_eq!(joined("<p>a<br><span>2</span>. y</p>"), "a\\\n2\\. y\n\n");
        assert_eq!(joined("<p><span>1</span>.5 kg</p>"), "1.5 kg\n\n");
    }

    #[test]
    fn test_escape_line_starts_is_stable() {
        let mut out = vec![Fragment::text("1"), Fragment::text(". x")];
        escape_line_starts(&mut out);
        escape_line_starts(&mut out);
        let joined: String = out.iter().map(Fragment::as_str).collect();
        assert_eq!(joined, "1\\. x");
    }

    #[test]
    fn test_unknown_tags_pass_through() {
        assert_eq!(joined("<custom-tag>Custom</custom-tag>"), "Custom");
        assert_eq!(joined(r#"<p class="unsupported-class">Text</p>"#), "Text\n\n");
    }

    #[test]
    fn test_depth_limit_degrades_to_text() {
        let mut html = String::new();
        for _ in 0..(MAX_DEPTH + 50) {
            html.push_str("<span>");
        }
        html.push_str("deep*text");
        assert_eq!(joined(&html), "deep\\*text");
    }

    #[test]
    fn test_sink_receives_dispatch_records() {
        let sink = MemorySink::new();
        let doc = from_html("<p><strong>x</strong></p>");
        let out = translate(&doc, &sink);
        assert_eq!(out.len(), 4);

        let lines = sink.lines();
        assert!(lines.iter().any(|l| l.contains("tag=strong") && l.contains("action=marker(*)")));
        assert!(lines.iter().any(|l| l.contains("tag=p") && l.contains("action=paragraph")));
        // children are recorded before their parent
        let strong = lines.iter().position(|l| l.contains("tag=strong"));
        let para = lines.iter().position(|l| l.contains("tag=p "));
        assert!(strong < para);
    }

    #[test]
    fn test_trim_edges() {
        let mut out = vec![
            Fragment::block("- "),
            Fragment::text("\n  "),
            Fragment::text("  x "),
            Fragment::markup("*"),
            Fragment::text(" \n"),
        ];
        trim_edges(&mut out, 1);
        let joined: String = out.iter().map(Fragment::as_str).collect();
        assert_eq!(joined, "- x *");
    }

    #[test]
    fn test_spans_blocks() {
        assert!(!spans_blocks(&[Fragment::text("a\nb")]));
        assert!(spans_blocks(&[Fragment::text("a\n  \nb")]));
        assert!(spans_blocks(&[Fragment::markup("\\\n"), Fragment::text("\nb")]));
        assert!(spans_blocks(&[Fragment::block("\n")]));
    }
}
