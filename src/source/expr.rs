//! SOURCE expression representation.

use serde::{Deserialize, Serialize};

use crate::source::types::Type;
use crate::span::Span;

/// How an identifier was resolved by the external type-checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Variable,
    Parameter,
    Function,
    Constant,
    Type,
    /// An imported package, e.g. the primitive-providing `fs`/`data`/`globals` packages.
    Package,
}

#[derive(Debug, Clone, PartialEq, Eq, Copy, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    /// Division, modulus, shifts, and bitwise ops are parsed but always rejected by the
    /// expression translator unless explicitly whitelisted — none are, currently.
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: Expr,
}

/// A SOURCE expression, carrying its resolved static type and source position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: Type,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, ty: Type, span: Span) -> Self {
        Self { kind, ty, span }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExprKind {
    IntLit(u64),
    StringLit(String),
    BoolLit(bool),
    Ident {
        name: String,
        kind: ObjectKind,
    },
    /// `pkg.Fn(args)` or `Fn(args)`; `package` is `Some("fs")` etc. for a primitive-package call.
    Call {
        package: Option<String>,
        func: String,
        args: Vec<Expr>,
    },
    Field {
        base: Box<Expr>,
        name: String,
    },
    Index {
        base: Box<Expr>,
        index: Box<Expr>,
    },
    Slice {
        base: Box<Expr>,
        low: Option<Box<Expr>>,
        high: Option<Box<Expr>>,
    },
    Composite {
        type_name: String,
        fields: Vec<Field>,
    },
    AddrOf(Box<Expr>),
    Deref(Box<Expr>),
    Not(Box<Expr>),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// A conversion between supported integer types, `T(e)`.
    Conversion {
        to: Type,
        expr: Box<Expr>,
    },
    /// Anything the expression translator has no case for (channel receive, variadic call, ...).
    Unsupported(String),
}
