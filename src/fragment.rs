//! Fragment: the intermediate representation between translation and repair
//!
//! The translator produces an ordered `Vec<Fragment>`. Each fragment carries
//! its emitted text plus boundary metadata, so the repair pass can reason
//! about adjacency without re-parsing the target markup:
//!
//! - `opens` / `closes`: which delimiter, if any, the fragment starts or ends
//! - `kind`: how the content must be treated (escaped text, structural
//!   markup, raw code, inserted separator)

use compact_str::CompactString;

// =============================================================================
// Boundary kinds
// =============================================================================

/// One-character emphasis marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// `*...*`
    Strong,
    /// `_..._`
    Emph,
}

impl Marker {
    pub const fn char(self) -> char {
        match self {
            Marker::Strong => '*',
            Marker::Emph => '_',
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Marker::Strong => "*",
            Marker::Emph => "_",
        }
    }

    /// Bracketed function with the same meaning, used when markers cannot
    /// span the content
    pub const fn command(self) -> &'static str {
        match self {
            Marker::Strong => "strong",
            Marker::Emph => "emph",
        }
    }
}

/// Delimiter a fragment opens or closes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delim {
    /// Bracketed command: `#name[` ... `]`
    Command,
    /// Emphasis marker pair
    Marker(Marker),
    /// Inline raw text in backticks
    Raw,
}

/// Treatment of a fragment's content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    /// Escaped source text
    Text,
    /// Inline markup (markers, command brackets, line breaks)
    Markup,
    /// Block structure (heading/list prefixes, paragraph breaks, fences)
    Block,
    /// Verbatim code; never rewritten after translation
    Raw,
    /// Protective separator inserted by repair
    Separator,
}

// =============================================================================
// Fragment
// =============================================================================

/// Ordered unit of emitted text with boundary metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub content: CompactString,
    pub kind: FragmentKind,
    pub opens: Option<Delim>,
    pub closes: Option<Delim>,
}

impl Fragment {
    fn new(content: impl Into<CompactString>, kind: FragmentKind) -> Self {
        Self { content: content.into(), kind, opens: None, closes: None }
    }

    /// Escaped text
    pub fn text(content: impl Into<CompactString>) -> Self {
        Self::new(content, FragmentKind::Text)
    }

    /// Inline markup without delimiter semantics (e.g. a line break)
    pub fn markup(content: impl Into<CompactString>) -> Self {
        Self::new(content, FragmentKind::Markup)
    }

    /// Block structure
    pub fn block(content: impl Into<CompactString>) -> Self {
        Self::new(content, FragmentKind::Block)
    }

    /// Verbatim code block
    pub fn raw(content: impl Into<CompactString>) -> Self {
        Self::new(content, FragmentKind::Raw)
    }

    /// Inline raw, which opens and closes its own backtick delimiter
    pub fn raw_inline(content: impl Into<CompactString>) -> Self {
        Self { opens: Some(Delim::Raw), closes: Some(Delim::Raw), ..Self::raw(content) }
    }

    /// Protective separator
    pub fn separator(content: &'static str) -> Self {
        Self::new(content, FragmentKind::Separator)
    }

    /// Command head such as `#underline[` or `#link("..")[`
    pub fn command_open(head: impl Into<CompactString>) -> Self {
        Self { opens: Some(Delim::Command), ..Self::markup(head) }
    }

    /// Closing `]` of a bracketed command
    pub fn command_close() -> Self {
        Self { closes: Some(Delim::Command), ..Self::markup("]") }
    }

    pub fn marker_open(marker: Marker) -> Self {
        Self { opens: Some(Delim::Marker(marker)), ..Self::markup(marker.as_str()) }
    }

    pub fn marker_close(marker: Marker) -> Self {
        Self { closes: Some(Delim::Marker(marker)), ..Self::markup(marker.as_str()) }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn is_separator(&self) -> bool {
        self.kind == FragmentKind::Separator
    }

    /// Starts a bracketed command
    pub fn opens_command(&self) -> bool {
        self.opens == Some(Delim::Command)
    }

    /// Ends a bracketed command
    pub fn closes_command(&self) -> bool {
        self.closes == Some(Delim::Command)
    }

    pub fn opens_marker(&self) -> Option<Marker> {
        match self.opens {
            Some(Delim::Marker(m)) => Some(m),
            _ => None,
        }
    }

    pub fn closes_marker(&self) -> Option<Marker> {
        match self.closes {
            Some(Delim::Marker(m)) => Some(m),
            _ => None,
        }
    }

    pub fn first_char(&self) -> Option<char> {
        self.content.chars().next()
    }

    pub fn last_char(&self) -> Option<char> {
        self.content.chars().next_back()
    }

    /// Carries visible source content (text or code)
    pub fn is_content(&self) -> bool {
        matches!(self.kind, FragmentKind::Text | FragmentKind::Raw)
    }
}
