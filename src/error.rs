//! Error types for html2typst.
//!
//! Translation itself is infallible: unknown markup passes through, empty
//! emphasis is unwrapped and ambiguous adjacency is repaired in place. The
//! only fallible surface is the debug log writer, and `translate_with`
//! absorbs those errors after logging them.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing debug records.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The debug log destination could not be opened for appending
    #[error("cannot open debug log {}: {source}", path.display())]
    LogOpen {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Writing or flushing debug records failed
    #[error("cannot write debug log {}: {source}", path.display())]
    LogWrite {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Result type alias for debug sink operations.
pub type TranslateResult<T> = Result<T, TranslateError>;

impl TranslateError {
    /// Create an open error for `path`.
    pub fn log_open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::LogOpen { path: path.into(), source }
    }

    /// Create a write error for `path`.
    pub fn log_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::LogWrite { path: path.into(), source }
    }

    /// Path of the log destination that failed.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::LogOpen { path, .. } | Self::LogWrite { path, .. } => path,
        }
    }
}
