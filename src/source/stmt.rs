//! SOURCE statement representation.

use serde::{Deserialize, Serialize};

use crate::source::expr::Expr;
use crate::span::Span;

pub type Block = Vec<Stmt>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StmtKind {
    /// `a, b := rhs` (one or two names).
    ShortDecl {
        names: Vec<String>,
        rhs: Expr,
    },
    /// `x = e`, `*p = e`, or `x.f = e`.
    Assign {
        lhs: Expr,
        rhs: Expr,
    },
    /// `m[k] = v`.
    ElemWrite {
        map: Expr,
        key: Expr,
        value: Expr,
    },
    If {
        cond: Expr,
        then_branch: Block,
        else_branch: Option<Block>,
    },
    /// `for init; cond; post { body }`.
    ForClassic {
        init: Box<Stmt>,
        cond: Expr,
        post: Box<Stmt>,
        body: Block,
    },
    /// `for cond { body }`.
    ForCond {
        cond: Expr,
        body: Block,
    },
    /// `for { body }`.
    ForInfinite {
        body: Block,
    },
    /// `for k, v := range m { body }`.
    RangeMap {
        key_name: String,
        value_name: String,
        map: Expr,
        body: Block,
    },
    /// `for i, x := range s { body }`.
    RangeSlice {
        index_name: String,
        elem_name: String,
        slice: Expr,
        body: Block,
    },
    Return {
        values: Vec<Expr>,
    },
    /// `go f(args)`.
    Go {
        call: Expr,
    },
    Block(Block),
    Break,
    Continue,
    /// A bare call used as a statement; any other expression statement is unsupported.
    ExprStmt(Expr),
}
