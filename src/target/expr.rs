//! TARGET expressions.

use crate::target::binding::Binding;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
}

impl BinOp {
    /// The gallina operator token rendered by the pretty-printer.
    pub fn token(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Le => "<=",
            BinOp::Ge => ">=",
            BinOp::Eq => "=",
        }
    }
}

/// A TARGET-level identifier is either a gallina (gold-standard prelude) name, rendered bare, or
/// a program variable, rendered quoted. The wildcard `_` renders as `<>` in both cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentKind {
    Gallina,
    Program,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TExpr {
    Ident(String, IdentKind),
    StringLit(String),
    IntLit(u64),
    Int32Lit(u32),
    BoolLit(bool),
    UnitLit,
    Call(String, Vec<TExpr>),
    FieldAccess {
        struct_name: String,
        field: String,
        value: Box<TExpr>,
        through_ptr: bool,
    },
    StructLiteral {
        name: String,
        fields: Vec<(String, TExpr)>,
        /// Set when lowering `&T{...}`: emits the heap-allocating constructor.
        heap: bool,
    },
    Tuple(Vec<TExpr>),
    Binary {
        op: BinOp,
        lhs: Box<TExpr>,
        rhs: Box<TExpr>,
    },
    Not(Box<TExpr>),
    Deref(Box<TExpr>),
    Ref(Box<TExpr>),
    Store {
        dst: Box<TExpr>,
        val: Box<TExpr>,
    },
    If {
        cond: Box<TExpr>,
        then_branch: Box<TExpr>,
        else_branch: Box<TExpr>,
    },
    Block(Vec<Binding>),
    ForLoop {
        init: Box<Binding>,
        cond: Box<TExpr>,
        post: Box<TExpr>,
        body: Box<TExpr>,
    },
    MapIter {
        key: String,
        value: String,
        map: Box<TExpr>,
        body: Box<TExpr>,
    },
    Spawn(Box<TExpr>),
    Return(Box<TExpr>),
    HashTableInsert(Box<TExpr>),
}

impl TExpr {
    pub fn ident_program(name: impl Into<String>) -> Self {
        TExpr::Ident(name.into(), IdentKind::Program)
    }

    pub fn ident_gallina(name: impl Into<String>) -> Self {
        TExpr::Ident(name.into(), IdentKind::Gallina)
    }

    pub fn call(name: impl Into<String>, args: Vec<TExpr>) -> Self {
        TExpr::Call(name.into(), args)
    }

    /// True for expressions the pretty-printer considers "already balanced" when used as a call
    /// argument — a leaf identifier or literal needs no parenthesization.
    pub fn is_atomic(&self) -> bool {
        matches!(
            self,
            TExpr::Ident(..)
                | TExpr::StringLit(_)
                | TExpr::IntLit(_)
                | TExpr::Int32Lit(_)
                | TExpr::BoolLit(_)
                | TExpr::UnitLit
        )
    }
}
