//! `effectify`: a source-to-source translator lowering a statically-typed, garbage-collected
//! imperative language into a pure, monadic functional representation suitable for mechanized
//! reasoning.
//!
//! The crate is organized leaves-first, the way the translation pipeline itself is built up:
//! [`source`] is the assumed-given decorated input tree, [`target`] is the output AST and its
//! pretty-printer, [`translate`] is the lowering between the two, and [`driver`] is the thin
//! collaborator boundary that reads a package off disk. Library code never initializes a logging
//! backend — only `src/bin/efc.rs` does that — so every `log::*` call here is safe to run in a
//! test harness with no subscriber installed.

pub mod config;
pub mod diagnostics;
pub mod driver;
pub mod error;
pub mod source;
pub mod span;
pub mod target;
pub mod translate;

pub use config::Config;
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use error::DriverError;
pub use span::{Pos, Span};
pub use translate::translate_package;
