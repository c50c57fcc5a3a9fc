//! SOURCE → TARGET type translation.

use crate::source::Type;
use crate::span::Span;
use crate::target::TargetType;
use crate::translate::TranslateCtx;

pub fn translate_type(ty: &Type, ctx: &TranslateCtx, span: &Span) -> TargetType {
    match ty {
        Type::Bool => TargetType::NamedType("bool".to_string()),
        Type::String => TargetType::NamedType("string".to_string()),
        Type::Byte => TargetType::NamedType("byte".to_string()),
        Type::Uint32 => TargetType::NamedType("uint32".to_string()),
        Type::Uint64 => TargetType::NamedType("uint64".to_string()),
        Type::Struct(name) => TargetType::StructName(name.clone()),
        Type::Pointer(inner) => {
            if inner.is_struct() {
                // A pointer to a struct is modeled by the struct's own heap reference; the
                // pointed-to type carries the distinction via `FieldAccess.through_ptr` instead.
                translate_type(inner, ctx, span)
            } else {
                TargetType::PointerType(Box::new(translate_type(inner, ctx, span)))
            }
        }
        Type::Slice(inner) => TargetType::SliceType(Box::new(translate_type(inner, ctx, span))),
        Type::Map(key, value) => {
            if !matches!(key.as_ref(), Type::Uint64) {
                ctx.diagnostics.push(crate::diagnostics::Diagnostic::expected(
                    span.clone(),
                    "map keys must be uint64 in the supported subset",
                ));
            }
            TargetType::MapType(Box::new(translate_type(value, ctx, span)))
        }
        Type::Tuple(items) => {
            TargetType::TupleType(items.iter().map(|t| translate_type(t, ctx, span)).collect())
        }
        Type::Function { .. } => {
            ctx.diagnostics.push(crate::diagnostics::Diagnostic::unsupported(
                span.clone(),
                "function-typed values are unsupported outside of a direct call target",
            ));
            TargetType::unit()
        }
        Type::Interface => {
            ctx.diagnostics.push(crate::diagnostics::Diagnostic::unsupported(
                span.clone(),
                "interface types are unsupported",
            ));
            TargetType::unit()
        }
        Type::Chan(_) => {
            ctx.diagnostics.push(crate::diagnostics::Diagnostic::unsupported(
                span.clone(),
                "channel types are unsupported",
            ));
            TargetType::unit()
        }
        Type::Other(name) => {
            ctx.diagnostics.push(crate::diagnostics::Diagnostic::unsupported(
                span.clone(),
                format!("type `{name}` has no supported translation"),
            ));
            TargetType::unit()
        }
    }
}

/// The struct name a `Type` refers to, whether named directly or through a pointer, used by the
/// expression translator to decide `FieldAccess.through_ptr`.
pub fn struct_name_of(ty: &Type) -> Option<(&str, bool)> {
    match ty {
        Type::Struct(name) => Some((name.as_str(), false)),
        Type::Pointer(inner) => match inner.as_ref() {
            Type::Struct(name) => Some((name.as_str(), true)),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn ctx() -> TranslateCtx {
        TranslateCtx::new(crate::config::Config::default(), HashMap::new())
    }

    #[test]
    fn maps_scalars_directly() {
        let c = ctx();
        let span = Span::new("f.go", 1, 1);
        assert_eq!(
            translate_type(&Type::Uint64, &c, &span),
            TargetType::NamedType("uint64".to_string())
        );
        assert!(c.diagnostics.is_empty());
    }

    #[test]
    fn flags_non_uint64_map_key() {
        let c = ctx();
        let span = Span::new("f.go", 1, 1);
        translate_type(
            &Type::Map(Box::new(Type::String), Box::new(Type::Uint64)),
            &c,
            &span,
        );
        assert!(!c.diagnostics.is_empty());
    }

    #[test]
    fn struct_name_through_pointer() {
        assert_eq!(
            struct_name_of(&Type::Pointer(Box::new(Type::Struct("T".to_string())))),
            Some(("T", true))
        );
        assert_eq!(
            struct_name_of(&Type::Struct("T".to_string())),
            Some(("T", false))
        );
    }
}
