//! TARGET types.

/// A TARGET-level type, as it appears in a `FuncDecl` signature, a struct field, or a
/// `StructLiteral`'s implicit zero value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetType {
    /// A built-in scalar or a directly-named gallina type (`bool`, `string`, `uint64`, ...).
    NamedType(String),
    /// A reference to a struct's module, rendered `Name.t`.
    StructName(String),
    /// `refT B` for a pointer to a non-struct base type.
    PointerType(Box<TargetType>),
    /// `slice.t E`.
    SliceType(Box<TargetType>),
    /// `Map V`, always `uint64`-keyed per the supported subset.
    MapType(Box<TargetType>),
    TupleType(Vec<TargetType>),
}

impl TargetType {
    pub fn unit() -> Self {
        TargetType::NamedType("unit".to_string())
    }
}
