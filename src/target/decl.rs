//! TARGET declarations.

use crate::span::Span;
use crate::target::expr::TExpr;
use crate::target::ty::TargetType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncParam {
    pub name: String,
    pub ty: TargetType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub name: String,
    pub params: Vec<FuncParam>,
    pub ret: TargetType,
    pub body: TExpr,
    pub doc: Option<String>,
    /// The originating SOURCE position, rendered as a comment when `Config::add_source_comments`
    /// is set.
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructField {
    pub name: String,
    pub ty: TargetType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDecl {
    pub name: String,
    pub fields: Vec<StructField>,
    pub doc: Option<String>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    pub underlying: TargetType,
    pub doc: Option<String>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstDecl {
    pub name: String,
    pub ty: TargetType,
    pub value: TExpr,
    pub doc: Option<String>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    Func(FuncDecl),
    Struct(StructDecl),
    Type(TypeDecl),
    Const(ConstDecl),
    /// A standalone comment, carrying no semantic content (used for the declarations the source
    /// translator chose not to emit but still wants acknowledged in the output, if ever needed).
    Comment(String),
}

/// The top-level translated artifact: one `Decl` per original SOURCE declaration, in order,
/// plus the originating package path for the preamble comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub package_path: String,
    pub decls: Vec<Decl>,
}
