//! Translation core: tree → fragments → repaired fragments → string
//!
//! # Module Structure
//!
//! - `TranslationContext` - per-call list/alignment/emphasis stacks
//! - `Translator` - NodeTranslator, the depth-first tree walk
//! - `repair` / `repair_with` - SafetyRepair post-pass
//! - `Emitter` - joins fragments into the output string
//!
//! # Example
//!
//! ```ignore
//! use html2typst::transform::{translate, repair, emit};
//!
//! let fragments = repair(translate(&doc, &NoopSink));
//! let typst = emit(&fragments);
//! ```

mod context;
mod emit;
mod repair;
mod translator;

pub use context::{LineMode, TranslationContext};
pub use emit::{Emitter, emit};
pub use repair::{RepairRule, repair, repair_with};
pub use translator::{Action, MAX_DEPTH, Translator, translate};
