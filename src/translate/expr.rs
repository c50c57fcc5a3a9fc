//! SOURCE → TARGET expression translation.

use crate::source::{BinOp as SourceBinOp, Expr, ExprKind, ObjectKind, Type};
use crate::target::{BinOp as TargetBinOp, TExpr};
use crate::translate::types::{struct_name_of, translate_type};
use crate::translate::TranslateCtx;

const FS_FUNCS: &[&str] = &[
    "open",
    "create",
    "close",
    "readAt",
    "append",
    "list",
    "delete",
    "link",
    "atomicCreate",
];

const DATA_FUNCS: &[&str] = &[
    "newSlice",
    "newMap",
    "newPtr",
    "sliceAppend",
    "sliceAppendSlice",
    "sliceRead",
    "mapGet",
    "mapAlter",
    "readPtr",
    "writePtr",
    "uint64Get",
    "uint64Put",
    "randomUint64",
    "newLock",
    "lockAcquire",
    "lockRelease",
];

/// Rewrites a `pkg.Fn` call to its TARGET primitive name.
/// Returns `None` if `package` names an import this translator does not recognize.
fn rewrite_primitive(package: &str, func: &str) -> Option<String> {
    match package {
        "fs" if FS_FUNCS.contains(&func) => Some(format!("FS.{func}")),
        "data" if DATA_FUNCS.contains(&func) => Some(format!("Data.{func}")),
        "globals" if func.starts_with("get") || func.starts_with("set") => {
            Some(format!("Globals.{func}"))
        }
        _ => None,
    }
}

fn translate_binop(op: &SourceBinOp) -> Option<TargetBinOp> {
    match op {
        SourceBinOp::Add => Some(TargetBinOp::Add),
        SourceBinOp::Sub => Some(TargetBinOp::Sub),
        SourceBinOp::Mul => Some(TargetBinOp::Mul),
        SourceBinOp::Lt => Some(TargetBinOp::Lt),
        SourceBinOp::Gt => Some(TargetBinOp::Gt),
        SourceBinOp::Le => Some(TargetBinOp::Le),
        SourceBinOp::Ge => Some(TargetBinOp::Ge),
        SourceBinOp::Eq => Some(TargetBinOp::Eq),
        SourceBinOp::Ne | SourceBinOp::Other(_) => None,
    }
}

/// Lowers a SOURCE expression. Never fails outright: unsupported constructs push a diagnostic and
/// fall back to a unit-valued placeholder so the surrounding tree still has something to render
///.
pub fn translate_expr(expr: &Expr, ctx: &TranslateCtx) -> TExpr {
    match &expr.kind {
        ExprKind::IntLit(n) => TExpr::IntLit(*n),
        ExprKind::StringLit(s) => TExpr::StringLit(s.clone()),
        ExprKind::BoolLit(b) => TExpr::BoolLit(*b),
        ExprKind::Ident { name, kind } => match kind {
            ObjectKind::Variable | ObjectKind::Parameter => TExpr::ident_program(name.clone()),
            ObjectKind::Function | ObjectKind::Constant | ObjectKind::Type => {
                TExpr::ident_gallina(name.clone())
            }
            ObjectKind::Package => {
                ctx.diagnostics.push(crate::diagnostics::Diagnostic::new(
                    crate::diagnostics::DiagnosticKind::Invalid,
                    expr.span.clone(),
                    format!("package identifier `{name}` used outside of a call"),
                ));
                TExpr::ident_gallina(name.clone())
            }
        },
        ExprKind::Call { package, func, args } => translate_call(expr, package, func, args, ctx),
        ExprKind::Field { base, name } => translate_field(expr, base, name, ctx),
        ExprKind::Index { base, index } => translate_index(expr, base, index, ctx),
        ExprKind::Slice { base, low, high } => translate_slice(base, low, high, ctx),
        ExprKind::Composite { type_name, fields } => {
            translate_composite(type_name, fields, ctx, false)
        }
        ExprKind::AddrOf(inner) => match &inner.kind {
            ExprKind::Composite { type_name, fields } => {
                translate_composite(type_name, fields, ctx, true)
            }
            _ => TExpr::Ref(Box::new(translate_expr(inner, ctx))),
        },
        ExprKind::Deref(inner) => TExpr::Deref(Box::new(translate_expr(inner, ctx))),
        ExprKind::Not(inner) => TExpr::Not(Box::new(translate_expr(inner, ctx))),
        ExprKind::Binary { op, lhs, rhs } => translate_binary(expr, op, lhs, rhs, ctx),
        ExprKind::Conversion { to, expr: inner } => translate_conversion(expr, to, inner, ctx),
        ExprKind::Unsupported(desc) => {
            ctx.diagnostics.push(crate::diagnostics::Diagnostic::unsupported(
                expr.span.clone(),
                desc.clone(),
            ));
            TExpr::UnitLit
        }
    }
}

fn translate_call(
    expr: &Expr,
    package: &Option<String>,
    func: &str,
    args: &[Expr],
    ctx: &TranslateCtx,
) -> TExpr {
    let translated_args: Vec<TExpr> = args.iter().map(|a| translate_expr(a, ctx)).collect();
    match package {
        Some(pkg) => match rewrite_primitive(pkg, func) {
            Some(name) => TExpr::Call(name, translated_args),
            None => {
                ctx.diagnostics.push(crate::diagnostics::Diagnostic::unsupported(
                    expr.span.clone(),
                    format!("call to unrecognized import `{pkg}.{func}`"),
                ));
                TExpr::UnitLit
            }
        },
        None => TExpr::Call(func.to_string(), translated_args),
    }
}

fn translate_field(expr: &Expr, base: &Expr, field: &str, ctx: &TranslateCtx) -> TExpr {
    let base_t = translate_expr(base, ctx);
    match struct_name_of(&base.ty) {
        Some((struct_name, through_ptr)) => TExpr::FieldAccess {
            struct_name: struct_name.to_string(),
            field: field.to_string(),
            value: Box::new(base_t),
            through_ptr,
        },
        None => {
            ctx.diagnostics.push(crate::diagnostics::Diagnostic::new(
                crate::diagnostics::DiagnosticKind::Invalid,
                expr.span.clone(),
                format!("field access `.{field}` on a non-struct-typed base"),
            ));
            TExpr::UnitLit
        }
    }
}

fn translate_index(expr: &Expr, base: &Expr, index: &Expr, ctx: &TranslateCtx) -> TExpr {
    let base_t = translate_expr(base, ctx);
    let index_t = translate_expr(index, ctx);
    match &base.ty {
        Type::Map(..) => TExpr::call("Data.mapGet", vec![base_t, index_t]),
        Type::Slice(_) => TExpr::call("Data.sliceRead", vec![base_t, index_t]),
        _ => {
            ctx.diagnostics.push(crate::diagnostics::Diagnostic::unsupported(
                expr.span.clone(),
                "indexing is only supported on maps and slices",
            ));
            TExpr::UnitLit
        }
    }
}

fn translate_slice(
    base: &Expr,
    low: &Option<Box<Expr>>,
    high: &Option<Box<Expr>>,
    ctx: &TranslateCtx,
) -> TExpr {
    let base_t = translate_expr(base, ctx);
    match (low, high) {
        (Some(l), Some(h)) => TExpr::call(
            "slice.subslice",
            vec![translate_expr(l, ctx), translate_expr(h, ctx), base_t],
        ),
        (Some(l), None) => TExpr::call("slice.skip", vec![translate_expr(l, ctx), base_t]),
        (None, Some(h)) => TExpr::call("slice.take", vec![translate_expr(h, ctx), base_t]),
        (None, None) => base_t,
    }
}

fn translate_composite(
    type_name: &str,
    fields: &[crate::source::Field],
    ctx: &TranslateCtx,
    heap: bool,
) -> TExpr {
    let by_name: std::collections::HashMap<&str, &Expr> =
        fields.iter().map(|f| (f.name.as_str(), &f.value)).collect();

    let ordered_fields = match ctx.structs.get(type_name) {
        Some(info) => info
            .fields
            .iter()
            .map(|(name, ty)| {
                let value = match by_name.get(name.as_str()) {
                    Some(expr) => translate_expr(expr, ctx),
                    None => {
                        let span = fields
                            .first()
                            .map(|f| f.value.span.clone())
                            .unwrap_or_else(|| crate::span::Span::new("<unknown>", 0, 0));
                        crate::target::render::zero_value(&translate_type(ty, ctx, &span))
                    }
                };
                (name.clone(), value)
            })
            .collect(),
        None => {
            let span = fields
                .first()
                .map(|f| f.value.span.clone())
                .unwrap_or_else(|| crate::span::Span::new("<unknown>", 0, 0));
            ctx.diagnostics.push(crate::diagnostics::Diagnostic::new(
                crate::diagnostics::DiagnosticKind::Invalid,
                span,
                format!("composite literal names unknown struct `{type_name}`"),
            ));
            fields
                .iter()
                .map(|f| (f.name.clone(), translate_expr(&f.value, ctx)))
                .collect()
        }
    };

    TExpr::StructLiteral {
        name: type_name.to_string(),
        fields: ordered_fields,
        heap,
    }
}

fn translate_binary(expr: &Expr, op: &SourceBinOp, lhs: &Expr, rhs: &Expr, ctx: &TranslateCtx) -> TExpr {
    let lhs_t = translate_expr(lhs, ctx);
    let rhs_t = translate_expr(rhs, ctx);
    match op {
        SourceBinOp::Ne => TExpr::Not(Box::new(TExpr::Binary {
            op: TargetBinOp::Eq,
            lhs: Box::new(lhs_t),
            rhs: Box::new(rhs_t),
        })),
        SourceBinOp::Other(name) => {
            ctx.diagnostics.push(crate::diagnostics::Diagnostic::unsupported(
                expr.span.clone(),
                format!("operator `{name}` is outside the supported subset"),
            ));
            TExpr::UnitLit
        }
        _ => TExpr::Binary {
            op: translate_binop(op).expect("non-Other, non-Ne ops always map"),
            lhs: Box::new(lhs_t),
            rhs: Box::new(rhs_t),
        },
    }
}

fn translate_conversion(expr: &Expr, to: &Type, inner: &Expr, ctx: &TranslateCtx) -> TExpr {
    let inner_t = translate_expr(inner, ctx);
    let type_name = match to {
        Type::Uint32 => "uint32",
        Type::Uint64 => "uint64",
        Type::Byte => "byte",
        _ => {
            ctx.diagnostics.push(crate::diagnostics::Diagnostic::unsupported(
                expr.span.clone(),
                "conversions are only supported between the built-in integer types",
            ));
            return TExpr::UnitLit;
        }
    };
    TExpr::call(format!("Data.to_{type_name}"), vec![inner_t])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ExprKind;
    use crate::span::Span;
    use std::collections::HashMap;

    fn ctx() -> TranslateCtx {
        TranslateCtx::new(crate::config::Config::default(), HashMap::new())
    }

    fn lit(kind: ExprKind, ty: Type) -> Expr {
        Expr::new(kind, ty, Span::new("f.go", 1, 1))
    }

    #[test]
    fn rewrites_primitive_calls() {
        let c = ctx();
        let call = lit(
            ExprKind::Call {
                package: Some("data".to_string()),
                func: "mapAlter".to_string(),
                args: vec![],
            },
            Type::Other("proc".to_string()),
        );
        let t = translate_expr(&call, &c);
        assert_eq!(t, TExpr::Call("Data.mapAlter".to_string(), vec![]));
    }

    #[test]
    fn unrecognized_import_is_flagged() {
        let c = ctx();
        let call = lit(
            ExprKind::Call {
                package: Some("net".to_string()),
                func: "dial".to_string(),
                args: vec![],
            },
            Type::Other("proc".to_string()),
        );
        translate_expr(&call, &c);
        assert!(!c.diagnostics.is_empty());
    }

    #[test]
    fn not_equal_desugars_to_negated_equality() {
        let c = ctx();
        let a = lit(ExprKind::IntLit(1), Type::Uint64);
        let b = lit(ExprKind::IntLit(2), Type::Uint64);
        let expr = lit(
            ExprKind::Binary {
                op: SourceBinOp::Ne,
                lhs: Box::new(a),
                rhs: Box::new(b),
            },
            Type::Bool,
        );
        let t = translate_expr(&expr, &c);
        assert!(matches!(t, TExpr::Not(_)));
    }
}
