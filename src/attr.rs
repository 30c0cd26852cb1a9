//! Attribute system for arena elements
//!
//! - Direct `Vec<(String, String)>` for attributes, in source order
//! - Class list and inline `style` declarations are parsed on demand
//!
//! Both parsers are tolerant: malformed pieces are skipped, never rejected.

use smallvec::SmallVec;

/// Element attributes as simple key-value pairs
pub type Attrs = Vec<(String, String)>;

/// Extension trait for attribute operations on Attrs
pub trait AttrsExt {
    /// Get an attribute value by name
    fn get_attr(&self, name: &str) -> Option<&str>;

    /// Check if an attribute exists
    fn has_attr(&self, name: &str) -> bool;

    /// Set an attribute value (insert or update)
    fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>);

    /// Whitespace-separated entries of the `class` attribute
    fn class_list(&self) -> ClassList<'_>;

    /// Parsed declarations of the `style` attribute
    fn declarations(&self) -> Declarations<'_>;
}

impl AttrsExt for Attrs {
    fn get_attr(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn has_attr(&self, name: &str) -> bool {
        self.iter().any(|(k, _)| k == name)
    }

    fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(attr) = self.iter_mut().find(|(k, _)| k == &name) {
            attr.1 = value;
        } else {
            self.push((name, value));
        }
    }

    fn class_list(&self) -> ClassList<'_> {
        ClassList::parse(self.get_attr("class").unwrap_or(""))
    }

    fn declarations(&self) -> Declarations<'_> {
        parse_declarations(self.get_attr("style").unwrap_or(""))
    }
}

// =============================================================================
// Class list
// =============================================================================

/// Borrowed view over the entries of a `class` attribute
#[derive(Debug, Clone, Default)]
pub struct ClassList<'a> {
    classes: SmallVec<[&'a str; 4]>,
}

impl<'a> ClassList<'a> {
    /// Split a raw `class` value on ASCII whitespace
    pub fn parse(raw: &'a str) -> Self {
        Self { classes: raw.split_ascii_whitespace().collect() }
    }

    /// Check for an exact class entry
    pub fn contains(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }

    /// Find the suffix of the first class starting with `prefix`
    ///
    /// `ClassList::parse("ql-indent-2").suffix("ql-indent-") == Some("2")`
    pub fn suffix(&self, prefix: &str) -> Option<&'a str> {
        self.classes.iter().find_map(|c| c.strip_prefix(prefix))
    }

    /// Iterate over class entries in source order
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.classes.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }
}

// =============================================================================
// Style declarations
// =============================================================================

/// One `property: value` pair of an inline style
///
/// The property is lower-cased; the value is trimmed and stripped of
/// `!important`, but otherwise left as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration<'a> {
    pub property: String,
    pub value: &'a str,
}

impl Declaration<'_> {
    /// Value lower-cased for keyword comparison
    pub fn keyword(&self) -> String {
        self.value.to_ascii_lowercase()
    }
}

/// Declarations of one `style` attribute, in source order
pub type Declarations<'a> = SmallVec<[Declaration<'a>; 4]>;

/// Parse an inline `style` attribute value.
///
/// `;` separates declarations and the first `:` splits property from value.
/// Empty pieces, pieces without `:` and pieces with an empty property are
/// dropped.
pub fn parse_declarations(style: &str) -> Declarations<'_> {
    let mut out = Declarations::new();
    for piece in style.split(';') {
        let Some(colon) = piece.find(':') else { continue };
        let property = piece[..colon].trim();
        if property.is_empty() {
            continue;
        }
        let mut value = piece[colon + 1..].trim();
        if let Some(stripped) = strip_important(value) {
            value = stripped;
        }
        out.push(Declaration { property: property.to_ascii_lowercase(), value });
    }
    out
}

fn strip_important(value: &str) -> Option<&str> {
    let bang = value.rfind('!')?;
    value[bang + 1..]
        .trim()
        .eq_ignore_ascii_case("important")
        .then(|| value[..bang].trim_end())
}

// =============================================================================
// Tests
// =============================================================================
