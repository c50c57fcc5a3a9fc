//! `Binding`: a single line in a sequenced `Block`.

use crate::target::expr::TExpr;

/// A binding with 0, 1, or 2 names; anonymous if `names` is empty, tuple-destructuring if it
/// holds two. `Binding::new` enforces the invariant that there are never three or more names —
/// that is an internal invariant violation and aborts the translator rather than producing
/// a malformed AST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub names: Vec<String>,
    pub expr: TExpr,
}

impl Binding {
    pub fn new(names: Vec<String>, expr: TExpr) -> Self {
        assert!(
            names.len() <= 2,
            "a Binding may have at most 2 names, got {}: {:?}",
            names.len(),
            names
        );
        Self { names, expr }
    }

    pub fn anonymous(expr: TExpr) -> Self {
        Self::new(Vec::new(), expr)
    }

    pub fn named(name: impl Into<String>, expr: TExpr) -> Self {
        Self::new(vec![name.into()], expr)
    }

    pub fn tuple(a: impl Into<String>, b: impl Into<String>, expr: TExpr) -> Self {
        Self::new(vec![a.into(), b.into()], expr)
    }
}
