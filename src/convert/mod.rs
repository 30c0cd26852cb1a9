//! Source format converters to the arena [`Document`](crate::node::Document)
//!
//! | Format | Module | Function |
//! |--------|--------|----------|
//! | HTML (editor output, lenient) | [`html`] | [`from_html()`] |
//!
//! A converter only needs to produce a valid `Document`; the translation
//! pipeline (translator → repair → emit) handles the rest.

// =============================================================================
// HTML converter
// =============================================================================

pub mod html;

pub use self::html::{from_html, from_rcdom};
