//! Prelude module for common imports.
//!
//! ```ignore
//! use html2typst::prelude::*;
//! ```

// Entry points
pub use crate::{translate, translate_all, translate_document, translate_with};

// Node types
pub use crate::node::{Children, Document, Element, Node, Text};

// Identity
pub use crate::id::NodeId;

// Attributes
pub use crate::attr::{Attrs, AttrsExt, ClassList, Declaration};

// Parsing
pub use crate::convert::{from_html, from_rcdom};

// Style
pub use crate::style::{Alignment, BlockKind, ListKind, StyleDirective, resolve, resolve_element};

// Fragments
pub use crate::fragment::{Delim, Fragment, FragmentKind, Marker};

// Transform
pub use crate::transform::{
    Action, Emitter, LineMode, RepairRule, TranslationContext, Translator, emit, repair, repair_with,
};

// Debug
pub use crate::debug::{DebugRecord, DebugSink, LogSink, MemorySink, NoopSink, Summary};

// Options
pub use crate::options::TranslateOptions;

// Error
pub use crate::error::{TranslateError, TranslateResult};
