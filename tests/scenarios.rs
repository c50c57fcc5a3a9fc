//! End-to-end scenarios exercising the full SOURCE → TARGET → text pipeline.

use effectify::config::Config;
use effectify::source::{
    BinOp, Block, ConstDecl, Decl, Expr, ExprKind, Field, FuncDecl, ObjectKind, Package, Param,
    Stmt, StmtKind, StructDecl, StructField, Type,
};
use effectify::span::Span;
use effectify::target::render_file;
use effectify::translate_package;

fn span() -> Span {
    Span::new("f.go", 1, 1)
}

fn ident(name: &str, kind: ObjectKind, ty: Type) -> Expr {
    Expr::new(ExprKind::Ident { name: name.to_string(), kind }, ty, span())
}

fn var(name: &str, ty: Type) -> Expr {
    ident(name, ObjectKind::Variable, ty)
}

fn int_lit(n: u64) -> Expr {
    Expr::new(ExprKind::IntLit(n), Type::Uint64, span())
}

fn package(decls: Vec<Decl>) -> Package {
    Package {
        path: "example.go".to_string(),
        decls,
    }
}

/// Scenario 1: an empty function renders a body that is the unit value.
#[test]
fn empty_function() {
    let pkg = package(vec![Decl::Func(FuncDecl {
        name: "Empty".to_string(),
        receiver: None,
        params: vec![],
        results: vec![],
        body: Block::new(),
        doc: None,
        span: span(),
    })]);

    let file = translate_package(&pkg, Config::default()).expect("translation should succeed");
    let rendered = render_file(&file, &Config::default());

    assert!(rendered.contains("Definition Empty"));
    assert!(rendered.contains("tt"));
    assert!(!rendered.contains('\t'));
    for line in rendered.lines() {
        assert_eq!(line, line.trim_end());
    }
}

/// Scenario 2: `p := new(uint64); *p = 1; x := *p; *p = x` sequences four bindings.
#[test]
fn pointer_use() {
    let new_ptr_call = Expr::new(
        ExprKind::Call {
            package: Some("data".to_string()),
            func: "newPtr".to_string(),
            args: vec![],
        },
        Type::Pointer(Box::new(Type::Uint64)),
        span(),
    );

    let p = || var("p", Type::Pointer(Box::new(Type::Uint64)));
    let deref_p = || Expr::new(ExprKind::Deref(Box::new(p())), Type::Uint64, span());

    let body = vec![
        Stmt::new(
            StmtKind::ShortDecl {
                names: vec!["p".to_string()],
                rhs: new_ptr_call,
            },
            span(),
        ),
        Stmt::new(
            StmtKind::Assign {
                lhs: Expr::new(ExprKind::Deref(Box::new(p())), Type::Uint64, span()),
                rhs: int_lit(1),
            },
            span(),
        ),
        Stmt::new(
            StmtKind::ShortDecl {
                names: vec!["x".to_string()],
                rhs: deref_p(),
            },
            span(),
        ),
        Stmt::new(
            StmtKind::Assign {
                lhs: Expr::new(ExprKind::Deref(Box::new(p())), Type::Uint64, span()),
                rhs: var("x", Type::Uint64),
            },
            span(),
        ),
    ];

    let pkg = package(vec![Decl::Func(FuncDecl {
        name: "UsePtr".to_string(),
        receiver: None,
        params: vec![],
        results: vec![],
        body,
        doc: None,
        span: span(),
    })]);

    let file = translate_package(&pkg, Config::default()).expect("translation should succeed");
    assert_eq!(file.decls.len(), 1);
    let effectify::target::Decl::Func(f) = &file.decls[0] else {
        panic!("expected a function declaration");
    };
    match &f.body {
        effectify::target::TExpr::Block(bindings) => {
            assert_eq!(bindings.len(), 4);
            assert_eq!(bindings[0].names, vec!["p".to_string()]);
            assert_eq!(bindings[2].names, vec!["x".to_string()]);
        }
        other => panic!("expected Block, got {other:?}"),
    }

    let rendered = render_file(&file, &Config::default());
    assert!(rendered.contains("Data.newPtr"));
    assert!(rendered.contains("Data.writePtr"));
    assert!(rendered.contains("Data.readPtr"));
}

/// Scenario 3: constructing a map, altering a key, reading another key, and altering a third key
/// on absence lowers index/element-write forms to `Data.mapGet`/`Data.mapAlter`, with the
/// two-name read binding tuple-destructured.
#[test]
fn map_alter_then_get() {
    let map_ty = Type::Map(Box::new(Type::Uint64), Box::new(Type::Slice(Box::new(Type::Byte))));
    let m = || var("m", map_ty.clone());
    let new_map_call = Expr::new(
        ExprKind::Call {
            package: Some("data".to_string()),
            func: "newMap".to_string(),
            args: vec![],
        },
        map_ty.clone(),
        span(),
    );
    let new_slice_call = Expr::new(
        ExprKind::Call {
            package: Some("data".to_string()),
            func: "newSlice".to_string(),
            args: vec![],
        },
        Type::Slice(Box::new(Type::Byte)),
        span(),
    );

    let body = vec![
        Stmt::new(
            StmtKind::ShortDecl {
                names: vec!["m".to_string()],
                rhs: new_map_call,
            },
            span(),
        ),
        Stmt::new(
            StmtKind::ElemWrite {
                map: m(),
                key: int_lit(1),
                value: new_slice_call.clone(),
            },
            span(),
        ),
        Stmt::new(
            StmtKind::ShortDecl {
                names: vec!["v".to_string(), "ok".to_string()],
                rhs: Expr::new(
                    ExprKind::Index {
                        base: Box::new(m()),
                        index: Box::new(int_lit(2)),
                    },
                    Type::Slice(Box::new(Type::Byte)),
                    span(),
                ),
            },
            span(),
        ),
        Stmt::new(
            StmtKind::If {
                cond: Expr::new(
                    ExprKind::Not(Box::new(var("ok", Type::Bool))),
                    Type::Bool,
                    span(),
                ),
                then_branch: vec![Stmt::new(
                    StmtKind::ElemWrite {
                        map: m(),
                        key: int_lit(3),
                        value: new_slice_call,
                    },
                    span(),
                )],
                else_branch: None,
            },
            span(),
        ),
    ];

    let pkg = package(vec![Decl::Func(FuncDecl {
        name: "AlterThenGet".to_string(),
        receiver: None,
        params: vec![],
        results: vec![],
        body,
        doc: None,
        span: span(),
    })]);

    let file = translate_package(&pkg, Config::default()).expect("translation should succeed");
    let effectify::target::Decl::Func(f) = &file.decls[0] else {
        panic!("expected a function declaration");
    };
    let effectify::target::TExpr::Block(bindings) = &f.body else {
        panic!("expected Block");
    };
    assert_eq!(bindings.len(), 4);
    assert_eq!(bindings[2].names, vec!["v".to_string(), "ok".to_string()]);

    let rendered = render_file(&file, &Config::default());
    assert!(rendered.contains("Data.mapAlter"));
    assert!(rendered.contains("Data.mapGet"));
    assert!(rendered.contains("let: (\"v\", \"ok\") :="));
}

/// Scenario 5: a writer lock acquired and released, then a reader lock acquired twice and
/// released twice, lowers to six anonymous bindings (five followed by a terminal release) in
/// source order.
#[test]
fn reader_writer_lock_sequencing() {
    let lock_ty = Type::Uint64;
    let lock = || var("lock", lock_ty.clone());
    let bool_lit = |b: bool| Expr::new(ExprKind::BoolLit(b), Type::Bool, span());
    let acquire = |writer: bool| {
        Expr::new(
            ExprKind::Call {
                package: Some("data".to_string()),
                func: "lockAcquire".to_string(),
                args: vec![lock(), bool_lit(writer)],
            },
            Type::Other("unit".to_string()),
            span(),
        )
    };
    let release = || {
        Expr::new(
            ExprKind::Call {
                package: Some("data".to_string()),
                func: "lockRelease".to_string(),
                args: vec![lock()],
            },
            Type::Other("unit".to_string()),
            span(),
        )
    };

    let body = vec![
        Stmt::new(StmtKind::ExprStmt(acquire(true)), span()),
        Stmt::new(StmtKind::ExprStmt(release()), span()),
        Stmt::new(StmtKind::ExprStmt(acquire(false)), span()),
        Stmt::new(StmtKind::ExprStmt(acquire(false)), span()),
        Stmt::new(StmtKind::ExprStmt(release()), span()),
        Stmt::new(StmtKind::ExprStmt(release()), span()),
    ];

    let pkg = package(vec![Decl::Func(FuncDecl {
        name: "Sequence".to_string(),
        receiver: None,
        params: vec![Param { name: "lock".to_string(), ty: lock_ty }],
        results: vec![],
        body,
        doc: None,
        span: span(),
    })]);

    let file = translate_package(&pkg, Config::default()).expect("translation should succeed");
    let effectify::target::Decl::Func(f) = &file.decls[0] else {
        panic!("expected a function declaration");
    };
    let effectify::target::TExpr::Block(bindings) = &f.body else {
        panic!("expected Block");
    };
    assert_eq!(bindings.len(), 6);
    assert!(bindings.iter().all(|b| b.names.is_empty()));

    let rendered = render_file(&file, &Config::default());
    assert_eq!(rendered.matches("Data.lockAcquire").count(), 3);
    assert_eq!(rendered.matches("Data.lockRelease").count(), 3);
}

/// Scenario 4: a three-clause `for` with a simple increment threads an index accumulator.
#[test]
fn three_clause_for_with_index_accumulator() {
    let names_slice = var("names", Type::Slice(Box::new(Type::String)));
    let cond = Expr::new(
        ExprKind::Binary {
            op: BinOp::Lt,
            lhs: Box::new(var("i", Type::Uint64)),
            rhs: Box::new(Expr::new(
                ExprKind::Call {
                    package: None,
                    func: "slice.length".to_string(),
                    args: vec![names_slice.clone()],
                },
                Type::Uint64,
                span(),
            )),
        },
        Type::Bool,
        span(),
    );

    let init = Stmt::new(
        StmtKind::ShortDecl {
            names: vec!["i".to_string()],
            rhs: int_lit(0),
        },
        span(),
    );
    let post = Stmt::new(
        StmtKind::Assign {
            lhs: var("i", Type::Uint64),
            rhs: Expr::new(
                ExprKind::Binary {
                    op: BinOp::Add,
                    lhs: Box::new(var("i", Type::Uint64)),
                    rhs: Box::new(int_lit(1)),
                },
                Type::Uint64,
                span(),
            ),
        },
        span(),
    );

    let body = vec![Stmt::new(StmtKind::ExprStmt(Expr::new(
        ExprKind::Call {
            package: None,
            func: "noop".to_string(),
            args: vec![],
        },
        Type::Other("unit".to_string()),
        span(),
    )), span())];

    let for_stmt = Stmt::new(
        StmtKind::ForClassic {
            init: Box::new(init),
            cond,
            post: Box::new(post),
            body,
        },
        span(),
    );

    let pkg = package(vec![Decl::Func(FuncDecl {
        name: "Walk".to_string(),
        receiver: None,
        params: vec![Param {
            name: "names".to_string(),
            ty: Type::Slice(Box::new(Type::String)),
        }],
        results: vec![],
        body: vec![for_stmt],
        doc: None,
        span: span(),
    })]);

    let file = translate_package(&pkg, Config::default()).expect("translation should succeed");
    let effectify::target::Decl::Func(f) = &file.decls[0] else {
        panic!("expected a function declaration");
    };
    let effectify::target::TExpr::Block(bindings) = &f.body else {
        panic!("expected Block");
    };
    let effectify::target::TExpr::ForLoop { init, .. } = &bindings[0].expr else {
        panic!("expected ForLoop");
    };
    assert_eq!(init.names, vec!["i".to_string()]);
    assert_eq!(init.expr, effectify::target::TExpr::IntLit(0));
}

/// Scenario 6: composite-literal fields are reordered to declaration order regardless of the
/// order they were written in.
#[test]
fn struct_literal_field_order() {
    let struct_decl = Decl::Struct(StructDecl {
        name: "E".to_string(),
        fields: vec![
            StructField {
                name: "Key".to_string(),
                ty: Type::Uint64,
                embedded: false,
            },
            StructField {
                name: "Value".to_string(),
                ty: Type::Slice(Box::new(Type::Byte)),
                embedded: false,
            },
        ],
        doc: None,
        span: span(),
    });

    let composite = Expr::new(
        ExprKind::Composite {
            type_name: "E".to_string(),
            fields: vec![
                Field {
                    name: "Value".to_string(),
                    value: var("v", Type::Slice(Box::new(Type::Byte))),
                },
                Field {
                    name: "Key".to_string(),
                    value: var("k", Type::Uint64),
                },
            ],
        },
        Type::Struct("E".to_string()),
        span(),
    );

    let const_decl = Decl::Const(ConstDecl {
        name: "Dummy".to_string(),
        value: int_lit(1),
        doc: None,
        span: span(),
    });

    let func_decl = Decl::Func(FuncDecl {
        name: "MakeE".to_string(),
        receiver: None,
        params: vec![
            Param { name: "k".to_string(), ty: Type::Uint64 },
            Param { name: "v".to_string(), ty: Type::Slice(Box::new(Type::Byte)) },
        ],
        results: vec![Param { name: "_".to_string(), ty: Type::Struct("E".to_string()) }],
        body: vec![Stmt::new(StmtKind::Return { values: vec![composite] }, span())],
        doc: None,
        span: span(),
    });

    let pkg = package(vec![struct_decl, const_decl, func_decl]);
    let file = translate_package(&pkg, Config::default()).expect("translation should succeed");

    let effectify::target::Decl::Func(f) = &file.decls[2] else {
        panic!("expected the function declaration last");
    };
    let effectify::target::TExpr::Block(bindings) = &f.body else {
        panic!("expected Block");
    };
    let effectify::target::TExpr::Return(ret) = &bindings[0].expr else {
        panic!("expected Return");
    };
    let effectify::target::TExpr::StructLiteral { fields, .. } = ret.as_ref() else {
        panic!("expected StructLiteral");
    };
    assert_eq!(fields[0].0, "Key");
    assert_eq!(fields[1].0, "Value");
}

/// Declaration order and count are preserved end to end.
#[test]
fn declarations_preserve_order_and_count() {
    let decls = vec![
        Decl::Const(ConstDecl {
            name: "A".to_string(),
            value: int_lit(1),
            doc: None,
            span: span(),
        }),
        Decl::Func(FuncDecl {
            name: "B".to_string(),
            receiver: None,
            params: vec![],
            results: vec![],
            body: Block::new(),
            doc: None,
            span: span(),
        }),
    ];
    let pkg = package(decls);
    let file = translate_package(&pkg, Config::default()).unwrap();
    assert_eq!(file.decls.len(), 2);
    assert!(matches!(file.decls[0], effectify::target::Decl::Const(_)));
    assert!(matches!(file.decls[1], effectify::target::Decl::Func(_)));
}

/// Unsupported constructs accumulate diagnostics rather than aborting the whole package.
#[test]
fn unsupported_constructs_are_collected_not_aborted() {
    let bad_call = Expr::new(
        ExprKind::Call {
            package: Some("net".to_string()),
            func: "dial".to_string(),
            args: vec![],
        },
        Type::Other("unit".to_string()),
        span(),
    );
    let pkg = package(vec![Decl::Func(FuncDecl {
        name: "Bad".to_string(),
        receiver: None,
        params: vec![],
        results: vec![],
        body: vec![Stmt::new(StmtKind::ExprStmt(bad_call), span())],
        doc: None,
        span: span(),
    })]);

    let result = translate_package(&pkg, Config::default());
    let diagnostics = result.expect_err("unsupported import should fail translation");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, effectify::DiagnosticKind::Unsupported);
}
