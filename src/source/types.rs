//! SOURCE type representation.

use serde::{Deserialize, Serialize};

/// A SOURCE-language type, as attached to every typed node by the external type-checker.
///
/// This is intentionally the full set a real SOURCE type-checker would report, including the
/// constructs this translator cannot lower (`Interface`, `Chan`, `Other`) — the type translator
/// (`translate::types`) is what narrows this down to the supported subset and raises diagnostics
/// for the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Type {
    Bool,
    String,
    Byte,
    Uint32,
    Uint64,
    /// A named struct type, referenced by name.
    Struct(String),
    Pointer(Box<Type>),
    Slice(Box<Type>),
    /// `map[K]V`. Only `Uint64` keys are in the supported subset; others are flagged.
    Map(Box<Type>, Box<Type>),
    Tuple(Vec<Type>),
    Function {
        params: Vec<Type>,
        results: Vec<Type>,
    },
    Interface,
    Chan(Box<Type>),
    /// Anything else the type-checker can report that this translator has no mapping for.
    Other(String),
}

impl Type {
    pub fn is_struct(&self) -> bool {
        matches!(self, Type::Struct(_))
    }

    pub fn is_pointer_to_struct(&self) -> bool {
        matches!(self, Type::Pointer(inner) if inner.is_struct())
    }
}
