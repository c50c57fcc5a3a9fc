//! SOURCE → TARGET statement translation.

use std::collections::BTreeSet;

use crate::source::{Block, Expr, ExprKind, ObjectKind, Stmt, StmtKind};
use crate::target::{BinOp, Binding, TExpr};
use crate::translate::expr::translate_expr;
use crate::translate::TranslateCtx;

/// Translates a statement list into its `Binding` sequence. Always returns at least one binding:
/// an empty input produces a single `()`-valued terminal binding.
pub fn translate_stmts(stmts: &[Stmt], ctx: &TranslateCtx) -> Vec<Binding> {
    let mut out = Vec::new();
    for stmt in stmts {
        translate_stmt(stmt, ctx, &mut out);
    }
    if out.is_empty() {
        out.push(Binding::anonymous(TExpr::UnitLit));
    }
    out
}

fn block_expr(block: &Block, ctx: &TranslateCtx) -> TExpr {
    TExpr::Block(translate_stmts(block, ctx))
}

fn current_accumulator_expr(ctx: &TranslateCtx) -> TExpr {
    match ctx.current_loop_accumulator() {
        Some(names) => names_to_expr(&names),
        None => TExpr::UnitLit,
    }
}

/// Builds the accumulator value expression for a name group: empty is the unit value, one name
/// is a bare reference, two are packed into a tuple.
fn names_to_expr(names: &[String]) -> TExpr {
    match names.len() {
        0 => TExpr::UnitLit,
        1 => TExpr::ident_program(names[0].clone()),
        _ => TExpr::Tuple(names.iter().cloned().map(TExpr::ident_program).collect()),
    }
}

fn translate_stmt(stmt: &Stmt, ctx: &TranslateCtx, out: &mut Vec<Binding>) {
    match &stmt.kind {
        StmtKind::ShortDecl { names, rhs } => {
            let rhs_t = translate_expr(rhs, ctx);
            match names.len() {
                1 => out.push(Binding::named(names[0].clone(), rhs_t)),
                2 => out.push(Binding::tuple(names[0].clone(), names[1].clone(), rhs_t)),
                n => {
                    ctx.diagnostics.push(crate::diagnostics::Diagnostic::new(
                        crate::diagnostics::DiagnosticKind::Invalid,
                        stmt.span.clone(),
                        format!("short declaration names {n} identifiers; only 1 or 2 are supported"),
                    ));
                    out.push(Binding::anonymous(rhs_t));
                }
            }
        }
        StmtKind::Assign { lhs, rhs } => out.push(translate_assign(stmt, lhs, rhs, ctx)),
        StmtKind::ElemWrite { map, key, value } => {
            let map_t = translate_expr(map, ctx);
            let key_t = translate_expr(key, ctx);
            let value_t = translate_expr(value, ctx);
            // `fun _ => Some v`, built as a `Call` so the existing argument-wrapping logic in the
            // renderer parenthesizes it correctly as `Data.mapAlter`'s third argument.
            let updater = TExpr::call("fun _ => Some", vec![value_t]);
            out.push(Binding::anonymous(TExpr::call(
                "Data.mapAlter",
                vec![map_t, key_t, updater],
            )));
        }
        StmtKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            let cond_t = translate_expr(cond, ctx);
            let then_t = block_expr(then_branch, ctx);
            let else_t = match else_branch {
                Some(block) => block_expr(block, ctx),
                None => TExpr::UnitLit,
            };
            out.push(Binding::anonymous(TExpr::If {
                cond: Box::new(cond_t),
                then_branch: Box::new(then_t),
                else_branch: Box::new(else_t),
            }));
        }
        StmtKind::ForClassic {
            init,
            cond,
            post,
            body,
        } => out.push(translate_for_classic(stmt, init, cond, post, body, ctx)),
        StmtKind::ForCond { cond, body } => {
            let cond_t = translate_expr(cond, ctx);
            ctx.push_loop_accumulator(Vec::new());
            let body_t = block_expr(body, ctx);
            ctx.pop_loop_accumulator();
            out.push(Binding::anonymous(TExpr::ForLoop {
                init: Box::new(Binding::anonymous(TExpr::UnitLit)),
                cond: Box::new(cond_t),
                post: Box::new(TExpr::UnitLit),
                body: Box::new(body_t),
            }));
        }
        StmtKind::ForInfinite { body } => {
            ctx.push_loop_accumulator(Vec::new());
            let body_t = block_expr(body, ctx);
            ctx.pop_loop_accumulator();
            out.push(Binding::anonymous(TExpr::ForLoop {
                init: Box::new(Binding::anonymous(TExpr::UnitLit)),
                cond: Box::new(TExpr::BoolLit(true)),
                post: Box::new(TExpr::UnitLit),
                body: Box::new(body_t),
            }));
        }
        StmtKind::RangeMap {
            key_name,
            value_name,
            map,
            body,
        } => {
            let map_t = translate_expr(map, ctx);
            ctx.push_loop_accumulator(Vec::new());
            let body_t = block_expr(body, ctx);
            ctx.pop_loop_accumulator();
            out.push(Binding::anonymous(TExpr::MapIter {
                key: key_name.clone(),
                value: value_name.clone(),
                map: Box::new(map_t),
                body: Box::new(body_t),
            }));
        }
        StmtKind::RangeSlice {
            index_name,
            elem_name,
            slice,
            body,
        } => out.push(translate_range_slice(index_name, elem_name, slice, body, ctx)),
        StmtKind::Return { values } => out.push(Binding::anonymous(translate_return(values, ctx))),
        StmtKind::Go { call } => {
            let call_t = translate_expr(call, ctx);
            out.push(Binding::anonymous(TExpr::Spawn(Box::new(call_t))));
        }
        StmtKind::Block(block) => out.push(Binding::anonymous(block_expr(block, ctx))),
        StmtKind::Break => out.push(Binding::anonymous(TExpr::call(
            "LoopRet",
            vec![current_accumulator_expr(ctx)],
        ))),
        StmtKind::Continue => out.push(Binding::anonymous(TExpr::call(
            "Continue",
            vec![current_accumulator_expr(ctx)],
        ))),
        StmtKind::ExprStmt(expr) => {
            if !matches!(expr.kind, ExprKind::Call { .. }) {
                ctx.diagnostics.push(crate::diagnostics::Diagnostic::unsupported(
                    expr.span.clone(),
                    "only a bare call is supported as an expression statement",
                ));
            }
            out.push(Binding::anonymous(translate_expr(expr, ctx)));
        }
    }
}

fn translate_assign(stmt: &Stmt, lhs: &Expr, rhs: &Expr, ctx: &TranslateCtx) -> Binding {
    let rhs_t = translate_expr(rhs, ctx);
    match &lhs.kind {
        ExprKind::Deref(inner) => {
            let dst_t = translate_expr(inner, ctx);
            Binding::anonymous(TExpr::Store {
                dst: Box::new(dst_t),
                val: Box::new(rhs_t),
            })
        }
        ExprKind::Field { base, name } => {
            let base_t = translate_expr(base, ctx);
            Binding::anonymous(TExpr::call(
                "struct.storeF",
                vec![base_t, TExpr::StringLit(name.clone()), rhs_t],
            ))
        }
        ExprKind::Ident {
            name,
            kind: ObjectKind::Variable,
        } => Binding::named(name.clone(), rhs_t),
        _ => {
            ctx.diagnostics.push(crate::diagnostics::Diagnostic::new(
                crate::diagnostics::DiagnosticKind::Invalid,
                stmt.span.clone(),
                "unsupported assignment target",
            ));
            Binding::anonymous(rhs_t)
        }
    }
}

/// Extracts `(induction variable name, translated initial value)` from a `for` init clause, if it
/// has the recognized single-variable short-declaration shape.
fn extract_induction_init(stmt: &Stmt, ctx: &TranslateCtx) -> Option<(String, TExpr)> {
    match &stmt.kind {
        StmtKind::ShortDecl { names, rhs } if names.len() == 1 => {
            Some((names[0].clone(), translate_expr(rhs, ctx)))
        }
        _ => None,
    }
}

/// Extracts `(induction variable name, translated post value)` from a `for` post clause, if it is
/// a plain assignment to a single variable (the normalized shape of `i++`/`i += 1`).
fn extract_induction_post(stmt: &Stmt, ctx: &TranslateCtx) -> Option<(String, TExpr)> {
    match &stmt.kind {
        StmtKind::Assign {
            lhs:
                Expr {
                    kind: ExprKind::Ident { name, kind: ObjectKind::Variable },
                    ..
                },
            rhs,
        } => Some((name.clone(), translate_expr(rhs, ctx))),
        _ => None,
    }
}

/// Collects locals mutated by plain assignment anywhere in `body`, excluding `induction_var` and
/// any name the body itself introduces via `ShortDecl` (those are fresh per-iteration locals, not
/// state that needs to be carried between iterations). Recurses into `If` branches and nested
/// `Block`s, but not into nested loops — their own bodies own their own accumulators. The
/// `BTreeSet` return gives sorted-by-name order for determinism.
fn collect_mutated_locals(body: &Block, induction_var: &str) -> BTreeSet<String> {
    let mut declared = BTreeSet::new();
    let mut mutated = BTreeSet::new();
    collect_mutated_locals_into(body, induction_var, &mut declared, &mut mutated);
    mutated
}

fn collect_mutated_locals_into(
    body: &Block,
    induction_var: &str,
    declared: &mut BTreeSet<String>,
    mutated: &mut BTreeSet<String>,
) {
    for stmt in body {
        match &stmt.kind {
            StmtKind::ShortDecl { names, .. } => {
                declared.extend(names.iter().cloned());
            }
            StmtKind::Assign {
                lhs:
                    Expr {
                        kind: ExprKind::Ident { name, kind: ObjectKind::Variable },
                        ..
                    },
                ..
            } => {
                if name != induction_var && !declared.contains(name) {
                    mutated.insert(name.clone());
                }
            }
            StmtKind::If { then_branch, else_branch, .. } => {
                collect_mutated_locals_into(then_branch, induction_var, declared, mutated);
                if let Some(else_branch) = else_branch {
                    collect_mutated_locals_into(else_branch, induction_var, declared, mutated);
                }
            }
            StmtKind::Block(inner) => {
                collect_mutated_locals_into(inner, induction_var, declared, mutated)
            }
            _ => {}
        }
    }
}

fn translate_for_classic(
    stmt: &Stmt,
    init: &Stmt,
    cond: &Expr,
    post: &Stmt,
    body: &Block,
    ctx: &TranslateCtx,
) -> Binding {
    let induction = match (extract_induction_init(init, ctx), extract_induction_post(post, ctx)) {
        (Some((a, init_e)), Some((p, post_e))) if a == p => Some((a, init_e, post_e)),
        _ => None,
    };
    let cond_t = translate_expr(cond, ctx);

    let induction_name = induction.as_ref().map(|(name, ..)| name.as_str()).unwrap_or("");
    let mut others: Vec<String> = collect_mutated_locals(body, induction_name).into_iter().collect();

    // The accumulator is packed into a `Binding`, which holds at most two names: the induction
    // variable (if any) plus one other mutated local.
    let max_others = if induction.is_some() { 1 } else { 2 };
    if others.len() > max_others {
        let dropped = others.split_off(max_others);
        ctx.diagnostics.push(crate::diagnostics::Diagnostic::todo(
            stmt.span.clone(),
            format!(
                "loop body mutates more locals than the accumulator can carry; dropping: {}",
                dropped.join(", ")
            ),
        ));
    }

    let mut names = Vec::new();
    let mut init_exprs = Vec::new();
    let mut post_exprs = Vec::new();
    if let Some((name, init_e, post_e)) = induction {
        names.push(name);
        init_exprs.push(init_e);
        post_exprs.push(post_e);
    }
    for other in others {
        init_exprs.push(TExpr::ident_program(other.clone()));
        post_exprs.push(TExpr::ident_program(other.clone()));
        names.push(other);
    }

    if names.is_empty() {
        ctx.diagnostics.push(crate::diagnostics::Diagnostic::todo(
            stmt.span.clone(),
            "for-loop post clause does not name a simple induction variable matching the init \
             clause, and the body mutates no other locals; falling back to a unit accumulator",
        ));
    }

    let init_binding = match names.len() {
        0 => Binding::anonymous(TExpr::UnitLit),
        1 => Binding::named(names[0].clone(), init_exprs.remove(0)),
        2 => Binding::tuple(names[0].clone(), names[1].clone(), TExpr::Tuple(init_exprs)),
        n => unreachable!("accumulator packing capped at 2 names, got {n}"),
    };
    let post_expr = match post_exprs.len() {
        0 => TExpr::UnitLit,
        1 => post_exprs.remove(0),
        2 => TExpr::Tuple(post_exprs),
        n => unreachable!("accumulator packing capped at 2 names, got {n}"),
    };

    ctx.push_loop_accumulator(names.clone());
    let body_t = block_expr(body, ctx);
    ctx.pop_loop_accumulator();

    Binding::anonymous(TExpr::ForLoop {
        init: Box::new(init_binding),
        cond: Box::new(cond_t),
        post: Box::new(post_expr),
        body: Box::new(body_t),
    })
}

fn translate_range_slice(
    index_name: &str,
    elem_name: &str,
    slice: &Expr,
    body: &Block,
    ctx: &TranslateCtx,
) -> Binding {
    let slice_t = translate_expr(slice, ctx);
    let cond_t = TExpr::Binary {
        op: BinOp::Lt,
        lhs: Box::new(TExpr::ident_program(index_name.to_string())),
        rhs: Box::new(TExpr::call("slice.length", vec![slice_t.clone()])),
    };
    let post_t = TExpr::Binary {
        op: BinOp::Add,
        lhs: Box::new(TExpr::ident_program(index_name.to_string())),
        rhs: Box::new(TExpr::IntLit(1)),
    };

    ctx.push_loop_accumulator(vec![index_name.to_string()]);
    let mut bindings = vec![Binding::named(
        elem_name.to_string(),
        TExpr::call(
            "Data.sliceRead",
            vec![slice_t, TExpr::ident_program(index_name.to_string())],
        ),
    )];
    bindings.extend(translate_stmts(body, ctx));
    ctx.pop_loop_accumulator();

    Binding::anonymous(TExpr::ForLoop {
        init: Box::new(Binding::named(index_name.to_string(), TExpr::IntLit(0))),
        cond: Box::new(cond_t),
        post: Box::new(post_t),
        body: Box::new(TExpr::Block(bindings)),
    })
}

fn translate_return(values: &[Expr], ctx: &TranslateCtx) -> TExpr {
    if values.is_empty() {
        let results = ctx.current_results();
        if results.is_empty() {
            return TExpr::Return(Box::new(TExpr::UnitLit));
        }
        if results.len() == 1 {
            return TExpr::Return(Box::new(TExpr::ident_program(results[0].name.clone())));
        }
        let tuple = TExpr::Tuple(
            results
                .iter()
                .map(|r| TExpr::ident_program(r.name.clone()))
                .collect(),
        );
        return TExpr::Return(Box::new(tuple));
    }
    if values.len() == 1 {
        return TExpr::Return(Box::new(translate_expr(&values[0], ctx)));
    }
    let tuple = TExpr::Tuple(values.iter().map(|v| translate_expr(v, ctx)).collect());
    TExpr::Return(Box::new(tuple))
}
