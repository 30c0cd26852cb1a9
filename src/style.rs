//! StyleResolver: element → semantic style directive
//!
//! A pure, total mapping from an element's tag name, class list and inline
//! style declarations to a [`StyleDirective`]. Unknown tags, classes and
//! properties never fail; they resolve to pass-through (visual decoration
//! such as colors and fonts is recorded as ignored and otherwise dropped).
//!
//! Resolution is per element. Directives compose along the ancestor chain
//! in the translator, never here.

use std::fmt;

use crate::attr::{Attrs, AttrsExt, ClassList, Declaration};
use crate::node::Element;

// =============================================================================
// Directive types
// =============================================================================

/// Horizontal alignment requested by an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Nothing requested; inherits from ancestors
    #[default]
    None,
    /// Explicit start alignment; overrides ancestors, never emitted
    Left,
    Center,
    Right,
    /// Justify is the implicit default of the target and is never emitted
    Justify,
}

impl Alignment {
    /// Argument of the `#align(..)` wrapper, if this alignment needs one
    pub fn wrapper(self) -> Option<&'static str> {
        match self {
            Alignment::Center => Some("center"),
            Alignment::Right => Some("right"),
            Alignment::None | Alignment::Left | Alignment::Justify => None,
        }
    }

    pub fn is_none(self) -> bool {
        self == Alignment::None
    }

    fn from_keyword(value: &str) -> Option<Self> {
        match value {
            "center" | "-webkit-center" => Some(Alignment::Center),
            "right" | "end" => Some(Alignment::Right),
            "left" | "start" => Some(Alignment::Left),
            "justify" => Some(Alignment::Justify),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Alignment::None => "none",
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "justify",
        }
    }
}

/// List flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListKind {
    #[default]
    Unordered,
    Ordered,
}

impl ListKind {
    /// Item marker including the trailing space
    pub fn marker(self) -> &'static str {
        match self {
            ListKind::Unordered => "- ",
            ListKind::Ordered => "+ ",
        }
    }

    /// Quill 2 `data-list` values
    fn from_data_list(value: &str) -> Option<Self> {
        match value.trim() {
            "ordered" => Some(ListKind::Ordered),
            "bullet" | "checked" | "unchecked" => Some(ListKind::Unordered),
            _ => None,
        }
    }
}

/// Structural role of an element
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BlockKind {
    /// Unknown or purely presentational; children pass through
    #[default]
    Container,
    Paragraph,
    /// Heading level, 1-6
    Heading(u8),
    /// `ul`/`ol`: list context for the items inside
    List(ListKind),
    /// `li`; `kind` is an explicit override, `indent` the extra nesting level
    ListItem { kind: Option<ListKind>, indent: u8 },
    Blockquote,
    CodeBlock,
    CodeInline,
    /// `a`; `None` when the href is missing or empty
    Link { href: Option<String> },
    /// `img`; `None` when the alt text is missing or empty
    Image { alt: Option<String> },
    LineBreak,
}

impl BlockKind {
    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::Container => "container",
            BlockKind::Paragraph => "paragraph",
            BlockKind::Heading(_) => "heading",
            BlockKind::List(_) => "list",
            BlockKind::ListItem { .. } => "list-item",
            BlockKind::Blockquote => "blockquote",
            BlockKind::CodeBlock => "code-block",
            BlockKind::CodeInline => "code-inline",
            BlockKind::Link { .. } => "link",
            BlockKind::Image { .. } => "image",
            BlockKind::LineBreak => "line-break",
        }
    }
}

/// Independent flags resolved for one element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDirective {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
    pub superscript: bool,
    pub subscript: bool,
    pub alignment: Alignment,
    pub block: BlockKind,
    /// Visual decoration (color, font, size, ...) was present and discarded
    pub ignored: bool,
}

impl StyleDirective {
    /// Any inline wrapper requested
    pub fn has_inline(&self) -> bool {
        self.bold || self.italic || self.underline || self.strike || self.superscript || self.subscript
    }

    /// No directive at all: the element is pure pass-through
    pub fn is_pass_through(&self) -> bool {
        !self.has_inline() && self.alignment.is_none() && self.block == BlockKind::Container
    }
}

impl fmt::Display for StyleDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.block.name())?;
        match &self.block {
            BlockKind::Heading(level) => write!(f, "({level})")?,
            BlockKind::List(kind) => write!(f, "({kind:?})")?,
            BlockKind::ListItem { kind, indent } => write!(f, "({kind:?}, +{indent})")?,
            BlockKind::Link { href: Some(href) } => write!(f, "({href:?})")?,
            _ => {}
        }
        let flags = [
            (self.bold, "bold"),
            (self.italic, "italic"),
            (self.underline, "underline"),
            (self.strike, "strike"),
            (self.superscript, "super"),
            (self.subscript, "sub"),
            (self.ignored, "ignored"),
        ];
        for (_, name) in flags.iter().filter(|(on, _)| *on) {
            write!(f, " {name}")?;
        }
        if !self.alignment.is_none() {
            write!(f, " align={}", self.alignment.name())?;
        }
        Ok(())
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolve an element's directive from its tag and attributes.
pub fn resolve(tag: &str, attrs: &Attrs) -> StyleDirective {
    let mut directive = StyleDirective::default();
    let classes = attrs.class_list();
    resolve_tag(tag, attrs, &classes, &mut directive);
    resolve_classes(&classes, &mut directive);
    for decl in attrs.declarations() {
        resolve_declaration(&decl, &mut directive);
    }
    directive
}

/// Resolve a parsed element
pub fn resolve_element(elem: &Element) -> StyleDirective {
    resolve(&elem.tag, &elem.attrs)
}

fn resolve_tag(tag: &str, attrs: &Attrs, classes: &ClassList<'_>, d: &mut StyleDirective) {
    match tag {
        "strong" | "b" => d.bold = true,
        "em" | "i" => d.italic = true,
        "u" | "ins" => d.underline = true,
        "s" | "strike" | "del" => d.strike = true,
        "sup" => d.superscript = true,
        "sub" => d.subscript = true,
        "p" => d.block = BlockKind::Paragraph,
        "ul" => d.block = BlockKind::List(ListKind::Unordered),
        "ol" => d.block = BlockKind::List(ListKind::Ordered),
        "li" => {
            d.block = BlockKind::ListItem {
                kind: attrs.get_attr("data-list").and_then(ListKind::from_data_list),
                indent: indent_level(classes),
            }
        }
        "blockquote" => d.block = BlockKind::Blockquote,
        "pre" => d.block = BlockKind::CodeBlock,
        "code" => d.block = BlockKind::CodeInline,
        "a" => d.block = BlockKind::Link { href: non_empty(attrs.get_attr("href")) },
        "img" => d.block = BlockKind::Image { alt: non_empty(attrs.get_attr("alt")) },
        "br" => d.block = BlockKind::LineBreak,
        _ => {
            if let Some(level) = heading_level(tag) {
                d.block = BlockKind::Heading(level);
            }
        }
    }
}

/// Heading level from tag name (h1 → 1, ..., h6 → 6)
pub fn heading_level(tag: &str) -> Option<u8> {
    match tag.as_bytes() {
        [b'h', digit @ b'1'..=b'6'] => Some(digit - b'0'),
        _ => None,
    }
}

fn indent_level(classes: &ClassList<'_>) -> u8 {
    classes
        .suffix("ql-indent-")
        .and_then(|n| n.parse::<u8>().ok())
        .map_or(0, |n| n.min(8))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_owned)
}

fn resolve_classes(classes: &ClassList<'_>, d: &mut StyleDirective) {
    for class in classes.iter() {
        match class {
            "ql-align-center" => d.alignment = Alignment::Center,
            "ql-align-right" => d.alignment = Alignment::Right,
            "ql-align-justify" => d.alignment = Alignment::Justify,
            _ if class.starts_with("ql-size-")
                || class.starts_with("ql-font-")
                || class.starts_with("ql-color-")
                || class.starts_with("ql-bg-")
                || class.starts_with("ql-direction-") =>
            {
                d.ignored = true
            }
            _ => {}
        }
    }
}

fn resolve_declaration(decl: &Declaration<'_>, d: &mut StyleDirective) {
    let value = decl.keyword();
    match decl.property.as_str() {
        "text-align" => match Alignment::from_keyword(&value) {
            Some(alignment) => d.alignment = alignment,
            None => d.ignored = true,
        },
        "font-weight" => {
            if is_bold_weight(&value) {
                d.bold = true;
            }
        }
        "font-style" => {
            if value == "italic" || value.starts_with("oblique") {
                d.italic = true;
            }
        }
        "text-decoration" | "text-decoration-line" => {
            if value.contains("underline") {
                d.underline = true;
            }
            if value.contains("line-through") {
                d.strike = true;
            }
        }
        "vertical-align" => match value.as_str() {
            "super" => d.superscript = true,
            "sub" => d.subscript = true,
            _ => {}
        },
        // color, background-color, font-size, font-family, mso-*, ...
        _ => d.ignored = true,
    }
}

fn is_bold_weight(value: &str) -> bool {
    match value {
        "bold" | "bolder" => true,
        _ => value.parse::<u16>().is_ok_and(|w| w >= 600),
    }
}

// =============================================================================
// Tests
// =============================================================================
