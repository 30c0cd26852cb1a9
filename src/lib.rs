//! html2typst - Syntax-safe translation of editor HTML into Typst markup
//!
//! ## Core Concepts
//!
//! **Total text preservation**: every character of every text node reaches
//! the output, in order. Unknown tags, classes and styles pass their
//! children through; visual decoration is dropped, never its text.
//!
//! **Always-valid markup**: whitespace-only emphasis is left unwrapped,
//! source text is escaped, and a repair pass separates neighbours the
//! Typst parser would otherwise fuse (`]` before `(`, `*a**b*`, ...).
//!
//! ## Pipeline
//!
//! ```text
//! HTML ──html5ever──▶ Document ──Translator──▶ [Fragment] ──repair──▶ [Fragment] ──Emitter──▶ String
//!                                     │                        │
//!                                     └────── DebugSink ◀──────┘
//! ```
//!
//! ## Modules
//! - `node`: arena `Document`, `Element`, `Text`
//! - `convert`: lenient HTML parsing into the arena
//! - `style`: StyleResolver (element → `StyleDirective`)
//! - `transform`: Translator, repair, Emitter
//! - `debug`: DebugSink family and decision records
//!
//! ## Usage
//!
//! ```
//! let typst = html2typst::translate("<p>Hello <strong>World</strong></p>");
//! assert_eq!(typst, "Hello *World*\n\n");
//! ```

#[macro_use]
mod macros;

// =============================================================================
// Core modules
// =============================================================================

/// Node identity within a document arena
pub mod id;

/// Attribute helpers: class lists, inline style declarations
pub mod attr;

/// Node types: Document, Element, Node, Text
pub mod node;

/// HTML parsing into the arena
pub mod convert;

/// StyleResolver
pub mod style;

/// Fragment intermediate representation
pub mod fragment;

/// Escaping for Typst markup and strings
pub mod escape;

/// Translation, repair and emission
pub mod transform;

/// Debug sinks and decision records
pub mod debug;

/// Translation options
pub mod options;

/// Error types
pub mod error;

/// Batch translation
pub mod batch;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Node types
pub use node::{Children, Document, Element, Node, Text};

// Identity
pub use id::NodeId;

// Parsing
pub use convert::from_html;

// Style
pub use style::{Alignment, BlockKind, ListKind, StyleDirective};

// Fragments
pub use fragment::{Delim, Fragment, FragmentKind, Marker};

// Transform
pub use transform::{Emitter, RepairRule, TranslationContext, Translator, repair, repair_with};

// Debug
pub use debug::{DebugRecord, DebugSink, LogSink, MemorySink, NoopSink, Summary};

// Options
pub use options::TranslateOptions;

// Error types
pub use error::{TranslateError, TranslateResult};

// Batch
pub use batch::translate_all;

// =============================================================================
// Entry points
// =============================================================================

/// Translate an HTML fragment with default options (debug off).
///
/// Never fails; the empty string yields the empty string.
pub fn translate(html: &str) -> String {
    translate_with(html, &TranslateOptions::PROD)
}

/// Translate an HTML fragment, optionally recording decisions.
///
/// With debug on, records go to `options.debug_log_path` (appended, created
/// when needed) or to the `log` facade. Log failures are reported through
/// `log::warn!` and never change the returned string.
pub fn translate_with(html: &str, options: &TranslateOptions) -> String {
    let doc = from_html(html);
    if !options.debug {
        return run(&doc, &NoopSink).0;
    }

    let sink = MemorySink::new();
    let (output, fragments) = run(&doc, &sink);
    sink.record(DebugRecord::Summary(Summary {
        input_bytes: html.len(),
        nodes: doc.len(),
        fragments,
        output_bytes: output.len(),
        repairs: sink.repair_counts(),
    }));

    match options.log_path() {
        Some(path) => {
            if let Err(err) = sink.append_to(path) {
                log::warn!(target: debug::LOG_TARGET, "{err}");
            }
        }
        None => sink.forward_to_log(),
    }
    output
}

/// Translate an already-built document, reporting decisions to `sink`.
pub fn translate_document(doc: &Document, sink: &dyn DebugSink) -> String {
    run(doc, sink).0
}

/// Translate, repair and emit; returns the output and its fragment count
fn run(doc: &Document, sink: &dyn DebugSink) -> (String, usize) {
    let fragments = transform::translate(doc, sink);
    let repaired = transform::repair_with(fragments, sink);
    (transform::emit(&repaired), repaired.len())
}

// =============================================================================
// Tests
// =============================================================================
