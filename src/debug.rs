//! DebugSink: side channel for translation decisions
//!
//! The translator and the repair pass report every decision they make to a
//! [`DebugSink`]. A sink observes only: it receives records after the
//! fragments they describe are final and it has no way to reach back into
//! the output.
//!
//! # Implementations
//!
//! | Sink | Behavior |
//! |------|----------|
//! | [`NoopSink`] | disabled; records are never built |
//! | [`MemorySink`] | collects records, then appends them to a file or the `log` facade |
//! | [`LogSink`] | forwards each record to the `log` facade immediately |
//!
//! Every record renders as one line starting with its level word (`DEBUG`
//! or `INFO`), which is the format appended to log files.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use compact_str::CompactString;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::error::{TranslateError, TranslateResult};
use crate::id::NodeId;
use crate::style::StyleDirective;
use crate::transform::{Action, RepairRule};

/// Log target used for forwarded records
pub const LOG_TARGET: &str = "html2typst";

/// Serializes file appends from concurrent translations
static APPEND_LOCK: Mutex<()> = parking_lot::const_mutex(());

// =============================================================================
// DebugRecord
// =============================================================================

/// One structured decision record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebugRecord {
    /// An element was dispatched
    Dispatch {
        node: NodeId,
        tag: CompactString,
        directive: StyleDirective,
        actions: SmallVec<[Action; 2]>,
        /// Fragments produced for the element, children included
        fragments: usize,
    },
    /// A text node was emitted
    Text { node: NodeId, bytes: usize, escaped: bool },
    /// Nesting limit reached; the subtree was flattened to text
    Degraded { node: NodeId, depth: usize },
    /// Repair inserted a protective separator before `position`
    Repair { position: usize, rule: RepairRule, separator: &'static str },
    /// Per-call totals
    Summary(Summary),
}

/// Totals of one translation call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub input_bytes: usize,
    pub nodes: usize,
    pub fragments: usize,
    pub output_bytes: usize,
    pub repairs: FxHashMap<&'static str, usize>,
}

impl DebugRecord {
    pub fn level(&self) -> log::Level {
        match self {
            DebugRecord::Summary(_) => log::Level::Info,
            _ => log::Level::Debug,
        }
    }

    /// Record text without the level word
    pub fn body(&self) -> RecordBody<'_> {
        RecordBody(self)
    }
}

impl fmt::Display for DebugRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.level() {
            log::Level::Info => "INFO",
            _ => "DEBUG",
        };
        write!(f, "{level} {}", self.body())
    }
}

/// Display adapter for a record's message
pub struct RecordBody<'a>(&'a DebugRecord);

impl fmt::Display for RecordBody<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            DebugRecord::Dispatch { node, tag, directive, actions, fragments } => {
                write!(f, "dispatch node={node} tag={tag} directive=[{directive}] action=")?;
                if actions.is_empty() {
                    f.write_str("pass-through")?;
                }
                for (i, action) in actions.iter().enumerate() {
                    if i > 0 {
                        f.write_str("+")?;
                    }
                    write!(f, "{action}")?;
                }
                write!(f, " fragments={fragments}")
            }
            DebugRecord::Text { node, bytes, escaped } => {
                write!(f, "text node={node} bytes={bytes} escaped={escaped}")
            }
            DebugRecord::Degraded { node, depth } => {
                write!(f, "degraded node={node} depth={depth} action=flatten-text")
            }
            DebugRecord::Repair { position, rule, separator } => {
                write!(f, "repair position={position} rule={} separator={separator:?}", rule.name())
            }
            DebugRecord::Summary(s) => {
                write!(
                    f,
                    "summary input_bytes={} nodes={} fragments={} output_bytes={} repairs=",
                    s.input_bytes, s.nodes, s.fragments, s.output_bytes
                )?;
                let mut repairs: Vec<_> = s.repairs.iter().collect();
                repairs.sort();
                if repairs.is_empty() {
                    f.write_str("none")?;
                }
                for (i, (rule, count)) in repairs.into_iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{rule}:{count}")?;
                }
                Ok(())
            }
        }
    }
}

// =============================================================================
// DebugSink
// =============================================================================

/// Receiver of decision records.
///
/// `record` must not fail or panic; sinks with fallible destinations buffer
/// and report errors separately.
pub trait DebugSink {
    /// When false, callers skip building records entirely
    fn is_enabled(&self) -> bool {
        true
    }

    fn record(&self, record: DebugRecord);
}

/// Disabled sink
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DebugSink for NoopSink {
    fn is_enabled(&self) -> bool {
        false
    }

    fn record(&self, _record: DebugRecord) {}
}

/// Forwards records to the `log` facade as they arrive
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DebugSink for LogSink {
    fn is_enabled(&self) -> bool {
        log::log_enabled!(target: LOG_TARGET, log::Level::Debug)
    }

    fn record(&self, record: DebugRecord) {
        log::log!(target: LOG_TARGET, record.level(), "{}", record.body());
    }
}

/// Buffers records in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<DebugRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Snapshot of the collected records
    pub fn records(&self) -> Vec<DebugRecord> {
        self.records.lock().clone()
    }

    /// Take the collected records, leaving the sink empty
    pub fn take(&self) -> Vec<DebugRecord> {
        std::mem::take(&mut *self.records.lock())
    }

    /// Rendered lines, one per record
    pub fn lines(&self) -> Vec<String> {
        self.records.lock().iter().map(ToString::to_string).collect()
    }

    /// Repairs collected so far, per rule name
    pub fn repair_counts(&self) -> FxHashMap<&'static str, usize> {
        let mut counts = FxHashMap::default();
        for record in self.records.lock().iter() {
            if let DebugRecord::Repair { rule, .. } = record {
                *counts.entry(rule.name()).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Append every record to `path`, creating the file if needed.
    ///
    /// Nothing is created when no records were collected. Returns the number
    /// of records written.
    pub fn append_to(&self, path: &Path) -> TranslateResult<usize> {
        let records = self.records.lock();
        if records.is_empty() {
            return Ok(0);
        }

        let _guard = APPEND_LOCK.lock();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| TranslateError::log_open(path, e))?;

        let mut writer = BufWriter::new(file);
        for record in records.iter() {
            writeln!(writer, "{record}").map_err(|e| TranslateError::log_write(path, e))?;
        }
        writer.flush().map_err(|e| TranslateError::log_write(path, e))?;
        Ok(records.len())
    }

    /// Forward every record to the `log` facade
    pub fn forward_to_log(&self) {
        for record in self.records.lock().iter() {
            log::log!(target: LOG_TARGET, record.level(), "{}", record.body());
        }
    }
}

impl DebugSink for MemorySink {
    fn record(&self, record: DebugRecord) {
        self.records.lock().push(record);
    }
}

impl<S: DebugSink + ?Sized> DebugSink for &S {
    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }

    fn record(&self, record: DebugRecord) {
        (**self).record(record)
    }
}
