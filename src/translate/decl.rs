//! SOURCE → TARGET declaration translation.

use std::collections::HashMap;

use crate::source::{self, Package};
use crate::target::{self, Decl as TDecl};
use crate::translate::stmt::translate_stmts;
use crate::translate::types::translate_type;
use crate::translate::{StructInfo, TranslateCtx};

/// Pre-pass collecting every struct's field order and SOURCE types, so that composite-literal
/// lowering (which runs interleaved with declaration translation) can always resolve field order
/// and zero values regardless of declaration order in the source file.
pub fn collect_struct_info(package: &Package) -> HashMap<String, StructInfo> {
    let mut structs = HashMap::new();
    for decl in &package.decls {
        if let source::Decl::Struct(s) = decl {
            structs.insert(
                s.name.clone(),
                StructInfo {
                    fields: s.fields.iter().map(|f| (f.name.clone(), f.ty.clone())).collect(),
                },
            );
        }
    }
    structs
}

pub fn translate_decl(decl: &source::Decl, ctx: &TranslateCtx) -> TDecl {
    match decl {
        source::Decl::Func(f) => TDecl::Func(translate_func(f, ctx)),
        source::Decl::Struct(s) => TDecl::Struct(translate_struct(s, ctx)),
        source::Decl::TypeAlias(t) => TDecl::Type(translate_type_alias(t, ctx)),
        source::Decl::Const(c) => TDecl::Const(translate_const(c, ctx)),
    }
}

fn translate_func(f: &source::FuncDecl, ctx: &TranslateCtx) -> target::FuncDecl {
    if let Some(receiver) = &f.receiver {
        if !receiver.ty.is_pointer_to_struct() {
            ctx.diagnostics.push(crate::diagnostics::Diagnostic::unsupported(
                f.span.clone(),
                "method receivers must be a pointer to a struct",
            ));
        }
    }

    ctx.enter_function(f.results.clone());

    let mut params: Vec<target::FuncParam> = Vec::new();
    if let Some(receiver) = &f.receiver {
        params.push(target::FuncParam {
            name: receiver.name.clone(),
            ty: translate_type(&receiver.ty, ctx, &f.span),
        });
    }
    for p in &f.params {
        params.push(target::FuncParam {
            name: p.name.clone(),
            ty: translate_type(&p.ty, ctx, &f.span),
        });
    }

    let ret = match f.results.len() {
        0 => target::TargetType::unit(),
        1 => translate_type(&f.results[0].ty, ctx, &f.span),
        _ => target::TargetType::TupleType(
            f.results
                .iter()
                .map(|r| translate_type(&r.ty, ctx, &f.span))
                .collect(),
        ),
    };

    let body = target::TExpr::Block(translate_stmts(&f.body, ctx));

    target::FuncDecl {
        name: f.name.clone(),
        params,
        ret,
        body,
        doc: f.doc.clone(),
        span: f.span.clone(),
    }
}

fn translate_struct(s: &source::StructDecl, ctx: &TranslateCtx) -> target::StructDecl {
    let fields = s
        .fields
        .iter()
        .map(|field| {
            if field.embedded {
                ctx.diagnostics.push(crate::diagnostics::Diagnostic::unsupported(
                    s.span.clone(),
                    format!("embedded field `{}` is not supported", field.name),
                ));
            }
            target::StructField {
                name: field.name.clone(),
                ty: translate_type(&field.ty, ctx, &s.span),
            }
        })
        .collect();
    target::StructDecl {
        name: s.name.clone(),
        fields,
        doc: s.doc.clone(),
        span: s.span.clone(),
    }
}

fn translate_type_alias(t: &source::TypeAliasDecl, ctx: &TranslateCtx) -> target::TypeDecl {
    target::TypeDecl {
        name: t.name.clone(),
        underlying: translate_type(&t.underlying, ctx, &t.span),
        doc: t.doc.clone(),
        span: t.span.clone(),
    }
}

fn translate_const(c: &source::ConstDecl, ctx: &TranslateCtx) -> target::ConstDecl {
    use crate::source::ExprKind;
    let ty = match &c.value.kind {
        ExprKind::IntLit(_) => target::TargetType::NamedType("uint64".to_string()),
        ExprKind::StringLit(_) => target::TargetType::NamedType("string".to_string()),
        ExprKind::BoolLit(_) => target::TargetType::NamedType("bool".to_string()),
        _ => {
            ctx.diagnostics.push(crate::diagnostics::Diagnostic::expected(
                c.span.clone(),
                "constants must resolve to a literal of a supported scalar type",
            ));
            target::TargetType::unit()
        }
    };
    target::ConstDecl {
        name: c.name.clone(),
        ty,
        value: crate::translate::expr::translate_expr(&c.value, ctx),
        doc: c.doc.clone(),
        span: c.span.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Block, FuncDecl};
    use crate::span::Span;

    fn ctx() -> TranslateCtx {
        TranslateCtx::new(crate::config::Config::default(), HashMap::new())
    }

    #[test]
    fn empty_function_body_is_unit() {
        let c = ctx();
        let f = FuncDecl {
            name: "Empty".to_string(),
            receiver: None,
            params: vec![],
            results: vec![],
            body: Block::new(),
            doc: None,
            span: Span::new("f.go", 1, 1),
        };
        let translated = translate_func(&f, &c);
        assert_eq!(translated.name, "Empty");
        assert_eq!(translated.ret, target::TargetType::unit());
        match translated.body {
            target::TExpr::Block(bindings) => {
                assert_eq!(bindings.len(), 1);
                assert_eq!(bindings[0].expr, target::TExpr::UnitLit);
            }
            other => panic!("expected Block, got {other:?}"),
        }
    }
}
