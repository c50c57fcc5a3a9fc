//! The assumed-given SOURCE AST.
//!
//! This module tree mirrors the shape an external SOURCE-language parser/type-checker hands off:
//! packages containing ordered declarations, expressions carrying a resolved [`types::Type`], and
//! identifiers resolved to an [`expr::ObjectKind`]. Nothing in this crate parses SOURCE-language
//! concrete syntax into these types — they exist so the translator (`crate::translate`) has a
//! concrete input to lower and so tests can build fixtures directly.

pub mod decl;
pub mod expr;
pub mod stmt;
pub mod types;

pub use decl::{ConstDecl, Decl, FuncDecl, Package, Param, StructDecl, StructField, TypeAliasDecl};
pub use expr::{BinOp, Expr, ExprKind, Field, ObjectKind};
pub use stmt::{Block, Stmt, StmtKind};
pub use types::Type;
