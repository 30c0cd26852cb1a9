//! Translation options
//!
//! Debug output is the only knob: everything else about the translation is
//! fixed, so the same input always yields the same string.

use std::path::{Path, PathBuf};

/// Environment variable enabling debug records (`1`, `true`, `yes`, `on`)
pub const ENV_DEBUG: &str = "HTML2TYPST_DEBUG";

/// Environment variable naming the debug log file; implies debug
pub const ENV_DEBUG_LOG: &str = "HTML2TYPST_DEBUG_LOG";

/// Options for [`translate_with`](crate::translate_with).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Record dispatch/repair decisions
    pub debug: bool,
    /// Append records to this file instead of the `log` facade
    pub debug_log_path: Option<PathBuf>,
}

impl TranslateOptions {
    /// Production options (no debug records).
    pub const PROD: Self = Self { debug: false, debug_log_path: None };

    /// Development options (records forwarded to the `log` facade).
    pub const DEV: Self = Self { debug: true, debug_log_path: None };

    pub fn new(debug: bool) -> Self {
        Self { debug, debug_log_path: None }
    }

    /// Same as [`Self::DEV`]
    pub fn debug() -> Self {
        Self::DEV
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Append debug records to `path` (enables debug).
    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.debug = true;
        self.debug_log_path = Some(path.into());
        self
    }

    /// Log destination when debug is on
    pub fn log_path(&self) -> Option<&Path> {
        self.debug_log_path.as_deref().filter(|_| self.debug)
    }

    /// Read [`ENV_DEBUG`] and [`ENV_DEBUG_LOG`] from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build options from a variable lookup (the environment, a config map, ...)
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut options = Self::PROD;
        if let Some(value) = lookup(ENV_DEBUG) {
            options.debug = is_truthy(&value);
        }
        if let Some(path) = lookup(ENV_DEBUG_LOG).filter(|p| !p.trim().is_empty()) {
            options = options.with_log_path(path);
        }
        options
    }
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self::PROD
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
