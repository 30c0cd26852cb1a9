//! Emitter: fragment sequence → final string

use crate::fragment::Fragment;

/// Joins fragments verbatim
#[derive(Debug, Default)]
pub struct Emitter {
    buf: String,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { buf: String::with_capacity(capacity) }
    }

    /// Append one fragment's content
    #[inline]
    pub fn push(&mut self, fragment: &Fragment) {
        self.buf.push_str(fragment.as_str());
    }

    /// Append every fragment and return the finished string
    pub fn emit(mut self, fragments: &[Fragment]) -> String {
        self.buf.reserve(fragments.iter().map(|f| f.content.len()).sum());
        for fragment in fragments {
            self.push(fragment);
        }
        self.finish()
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

/// Concatenate fragments into the output string
pub fn emit(fragments: &[Fragment]) -> String {
    Emitter::new().emit(fragments)
}
