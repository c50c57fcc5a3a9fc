//! SOURCE declaration and package representation.

use serde::{Deserialize, Serialize};

use crate::source::expr::Expr;
use crate::source::stmt::Block;
use crate::source::types::Type;
use crate::span::Span;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructField {
    pub name: String,
    pub ty: Type,
    /// Set for a field promoted from an embedded (anonymous) type; the declaration translator
    /// flags these as unsupported rather than attempting to lower the promotion.
    #[serde(default)]
    pub embedded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncDecl {
    pub name: String,
    /// `Some(param)` for a method with a pointer-to-struct receiver; any other receiver shape is
    /// flagged unsupported by the declaration translator.
    pub receiver: Option<Param>,
    pub params: Vec<Param>,
    /// Named results, used to synthesize tuple returns for bare `return` statements.
    pub results: Vec<Param>,
    pub body: Block,
    pub doc: Option<String>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructDecl {
    pub name: String,
    pub fields: Vec<StructField>,
    pub doc: Option<String>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeAliasDecl {
    pub name: String,
    pub underlying: Type,
    pub doc: Option<String>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstDecl {
    pub name: String,
    pub value: Expr,
    pub doc: Option<String>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decl {
    Func(FuncDecl),
    Struct(StructDecl),
    TypeAlias(TypeAliasDecl),
    Const(ConstDecl),
}

impl Decl {
    pub fn span(&self) -> &Span {
        match self {
            Decl::Func(d) => &d.span,
            Decl::Struct(d) => &d.span,
            Decl::TypeAlias(d) => &d.span,
            Decl::Const(d) => &d.span,
        }
    }
}

/// A single SOURCE package, as handed off by the external parser/type-checker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub path: String,
    pub decls: Vec<Decl>,
}
