//! Source positions and spans.
//!
//! Mirrors the shape of positions the external SOURCE parser/type-checker is assumed to attach to
//! every node: a file path plus a `(line, column)` pair. Lines and columns are 1-indexed, matching
//! common diagnostic conventions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single point in a SOURCE file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A file plus a position within it.
///
/// `Span` is deliberately a single point rather than a start/end range: the translator never
/// needs to highlight a range of SOURCE text, only to say "here".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub file: String,
    pub pos: Pos,
}

impl Span {
    pub fn new(file: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            pos: Pos { line, column },
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.pos)
    }
}
