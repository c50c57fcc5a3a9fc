//! The diagnostic layer.
//!
//! Every translator function appends to a shared sink instead of aborting on the first error,
//! enabling multi-error reports. `Diagnostics` is held behind a `RefCell` in `TranslateCtx` so
//! that translator functions can take `&TranslateCtx` (shared reference) rather than fight the
//! borrow checker over one `&mut` context threaded through every call.

use std::cell::RefCell;
use std::error::Error;
use std::fmt;

use colored::Colorize;

use crate::span::Span;

/// Why a construct could not be translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Outside the translatable subset entirely (channels, interfaces, variadic calls, ...).
    Unsupported,
    /// A subset constraint was violated (e.g. a non-`uint64` map key).
    Expected,
    /// In principle translatable, not yet implemented.
    Todo,
    /// The input AST is internally inconsistent; should not occur for well-formed input.
    Invalid,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DiagnosticKind::Unsupported => "unsupported",
            DiagnosticKind::Expected => "expected",
            DiagnosticKind::Todo => "todo",
            DiagnosticKind::Invalid => "invalid",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub span: Span,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            kind,
            message: message.into(),
        }
    }

    pub fn unsupported(span: Span, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Unsupported, span, message)
    }

    pub fn expected(span: Span, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Expected, span, message)
    }

    pub fn todo(span: Span, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Todo, span, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            DiagnosticKind::Unsupported | DiagnosticKind::Invalid => self.kind.to_string().red(),
            DiagnosticKind::Expected | DiagnosticKind::Todo => self.kind.to_string().yellow(),
        };
        write!(f, "{}: {kind}: {}", self.span, self.message)
    }
}

impl Error for Diagnostic {}

/// Append-only collector of diagnostics for a single translation run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: RefCell<Vec<Diagnostic>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, diagnostic: Diagnostic) {
        self.entries.borrow_mut().push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Diagnostics sorted in source-position order.
    pub fn into_sorted(self) -> Vec<Diagnostic> {
        let mut entries = self.entries.into_inner();
        entries.sort_by(|a, b| a.span.cmp(&b.span));
        entries
    }
}
