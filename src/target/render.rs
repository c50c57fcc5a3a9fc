//! The pretty-printer and its indenting buffer.
//!
//! Rendering is split in two layers: [`Buffer`] is the stateful indenting accumulator used for
//! top-level composition (one call per declaration), while expressions are rendered by pure,
//! recursive functions that hand back an already-indented string fragment whose *first* line is
//! unindented (so the caller can splice it after a prefix on the same source line) and whose
//! subsequent lines, if any, carry the full indentation for their nesting depth. Only the
//! control-flow constructs that contain a `Block` (`If` with a multi-line branch, `ForLoop`,
//! `MapIter`, `Spawn`) ever produce more than one line; every other expression renders to a
//! single line, which keeps the parenthesization rules mechanical rather than requiring a general
//! line-wrapping pass.

use crate::config::Config;
use crate::span::Span;
use crate::target::binding::Binding;
use crate::target::decl::{Decl, File};
use crate::target::expr::{IdentKind, TExpr};
use crate::target::ty::TargetType;

/// An indenting output accumulator.
pub struct Buffer {
    out: String,
    indent_level: usize,
    indent_unit: String,
}

impl Buffer {
    pub fn new(indent_width: usize) -> Self {
        Self::at_indent(indent_width, 0)
    }

    /// Seeds a buffer starting at a given nesting depth, used when a nested expression renderer
    /// needs to produce text that is later spliced in at that depth.
    pub fn at_indent(indent_width: usize, indent_level: usize) -> Self {
        Self {
            out: String::new(),
            indent_level,
            indent_unit: " ".repeat(indent_width.max(1)),
        }
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    fn prefix(&self) -> String {
        self.indent_unit.repeat(self.indent_level)
    }

    /// Ensures the buffer is positioned at the start of a fresh line.
    fn newline_if_needed(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    /// Writes a full line at the current indent level.
    pub fn add_line(&mut self, s: &str) {
        self.newline_if_needed();
        self.out.push_str(&self.prefix());
        self.out.push_str(s);
        self.out.push('\n');
    }

    /// Appends a blank line, collapsing runs so the output never carries more than one.
    pub fn blank_line(&mut self) {
        self.newline_if_needed();
        if !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    /// Appends `s` as a fragment continuing the current line. Embedded newlines in `s` are
    /// re-indented so continuation lines land at the column where this `add` started.
    pub fn add(&mut self, s: &str) {
        if self.out.is_empty() || self.out.ends_with('\n') {
            self.out.push_str(&self.prefix());
        }
        let column = self.out.rsplit('\n').next().unwrap_or("").chars().count();
        let pad = " ".repeat(column);
        let mut first = true;
        for part in s.split('\n') {
            if first {
                self.out.push_str(part);
                first = false;
            } else {
                self.out.push('\n');
                self.out.push_str(&pad);
                self.out.push_str(part);
            }
        }
    }

    /// Emits `prefix + body`, indenting every continuation line of `body` by `len(prefix)`
    /// relative to the current indent level.
    pub fn block(&mut self, prefix: &str, body: &str) {
        self.newline_if_needed();
        self.out.push_str(&self.prefix());
        let pad = " ".repeat(prefix.chars().count());
        let mut first = true;
        for part in body.split('\n') {
            if first {
                self.out.push_str(prefix);
                self.out.push_str(part);
                first = false;
            } else {
                self.out.push('\n');
                self.out.push_str(&self.prefix());
                self.out.push_str(&pad);
                self.out.push_str(part);
            }
        }
        self.out.push('\n');
    }

    /// Finalizes the buffer, guaranteeing the textual invariants: no tabs, no trailing
    /// whitespace on any line.
    pub fn finish(self) -> String {
        self.out
            .lines()
            .map(|line| line.trim_end().replace('\t', "    "))
            .collect::<Vec<_>>()
            .join("\n")
            + "\n"
    }
}

/// Wraps a rendered fragment in parentheses unless it is already balanced (`(...)`, `{|...|}`) or
/// contains no whitespace.
fn wrap_conservatively(rendered: &str) -> String {
    let trimmed = rendered.trim();
    let balanced = (trimmed.starts_with('(') && trimmed.ends_with(')'))
        || (trimmed.starts_with("{|") && trimmed.ends_with("|}"));
    let no_whitespace = !trimmed.chars().any(char::is_whitespace);
    if balanced || no_whitespace {
        trimmed.to_string()
    } else {
        format!("({trimmed})")
    }
}

fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\"\""),
            '\\' => out.push_str("\\\\"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

fn quote_ident(name: &str) -> String {
    if name == "_" {
        "<>".to_string()
    } else {
        format!("\"{name}\"")
    }
}

fn render_ident(name: &str, kind: IdentKind) -> String {
    match kind {
        IdentKind::Gallina => {
            if name == "_" {
                "<>".to_string()
            } else {
                name.to_string()
            }
        }
        IdentKind::Program => quote_ident(name),
    }
}

/// Renders a type for use in a struct field / zero-value position.
pub fn render_type(ty: &TargetType) -> String {
    match ty {
        TargetType::NamedType(name) => name.clone(),
        TargetType::StructName(name) => format!("{name}.t"),
        TargetType::PointerType(inner) => format!("refT ({})", render_type(inner)),
        TargetType::SliceType(inner) => format!("slice.t ({})", render_type(inner)),
        TargetType::MapType(value) => format!("Map ({})", render_type(value)),
        TargetType::TupleType(items) => {
            let parts: Vec<_> = items.iter().map(render_type).collect();
            format!("({})", parts.join(" * "))
        }
    }
}

/// The canonical zero value for a type, used for the struct module's `zero` instance and for
/// composite literals that omit fields.
pub fn zero_value(ty: &TargetType) -> TExpr {
    match ty {
        TargetType::NamedType(name) => match name.as_str() {
            "bool" => TExpr::BoolLit(false),
            "string" => TExpr::StringLit(String::new()),
            "unit" => TExpr::UnitLit,
            "uint32" => TExpr::Int32Lit(0),
            _ => TExpr::IntLit(0),
        },
        TargetType::StructName(name) => TExpr::ident_gallina(format!("{name}.zero")),
        TargetType::PointerType(_) => TExpr::ident_gallina("null"),
        TargetType::SliceType(_) => TExpr::ident_gallina("slice.nil"),
        TargetType::MapType(_) => TExpr::call("Data.mapEmpty", vec![]),
        TargetType::TupleType(items) => TExpr::Tuple(items.iter().map(zero_value).collect()),
    }
}

/// Renders a single expression. The returned string's first line is unindented (for splicing
/// after a prefix); any further lines are indented for `indent_level`.
pub fn render_expr(expr: &TExpr, indent_level: usize, cfg: &Config) -> String {
    match expr {
        TExpr::Ident(name, kind) => render_ident(name, *kind),
        TExpr::StringLit(s) => escape_string(s),
        TExpr::IntLit(n) => n.to_string(),
        TExpr::Int32Lit(n) => format!("(W32 {n})"),
        TExpr::BoolLit(b) => b.to_string(),
        TExpr::UnitLit => "tt".to_string(),
        TExpr::Call(name, args) => {
            let mut parts = vec![name.clone()];
            for arg in args {
                let rendered = render_expr(arg, indent_level, cfg);
                parts.push(wrap_conservatively(&rendered));
            }
            parts.join(" ")
        }
        TExpr::FieldAccess {
            struct_name,
            field,
            value,
            through_ptr,
        } => {
            let value_rendered = wrap_conservatively(&render_expr(value, indent_level, cfg));
            if *through_ptr {
                format!("struct.loadF {struct_name} {} {value_rendered}", quote_ident(field))
            } else {
                format!("{struct_name}.get {} {value_rendered}", quote_ident(field))
            }
        }
        TExpr::StructLiteral { name, fields, heap } => {
            let body = fields
                .iter()
                .map(|(field, value)| format!("{field} := {}", render_expr(value, indent_level, cfg)))
                .collect::<Vec<_>>()
                .join("; ");
            let literal = format!("{{| {body} |}}");
            if *heap {
                format!("struct.new {name}.t {literal}")
            } else {
                literal
            }
        }
        TExpr::Tuple(items) => {
            let parts: Vec<_> = items
                .iter()
                .map(|item| render_expr(item, indent_level, cfg))
                .collect();
            format!("({})", parts.join(", "))
        }
        TExpr::Binary { op, lhs, rhs } => {
            let lhs = wrap_conservatively(&render_expr(lhs, indent_level, cfg));
            let rhs = wrap_conservatively(&render_expr(rhs, indent_level, cfg));
            format!("{lhs} {} {rhs}", op.token())
        }
        TExpr::Not(inner) => {
            format!("negb {}", wrap_conservatively(&render_expr(inner, indent_level, cfg)))
        }
        TExpr::Deref(inner) => {
            format!("Data.readPtr {}", wrap_conservatively(&render_expr(inner, indent_level, cfg)))
        }
        TExpr::Ref(inner) => {
            format!("Data.refPtr {}", wrap_conservatively(&render_expr(inner, indent_level, cfg)))
        }
        TExpr::Store { dst, val } => {
            let dst = wrap_conservatively(&render_expr(dst, indent_level, cfg));
            let val = wrap_conservatively(&render_expr(val, indent_level, cfg));
            format!("Data.writePtr {dst} {val}")
        }
        TExpr::If {
            cond,
            then_branch,
            else_branch,
        } => render_if(cond, then_branch, else_branch, indent_level, cfg),
        TExpr::Block(bindings) => render_block(bindings, indent_level, cfg),
        TExpr::ForLoop {
            init,
            cond,
            post,
            body,
        } => render_for_loop(init, cond, post, body, indent_level, cfg),
        TExpr::MapIter {
            key,
            value,
            map,
            body,
        } => render_map_iter(key, value, map, body, indent_level, cfg),
        TExpr::Spawn(body) => {
            let rendered = render_expr(body, indent_level + 1, cfg);
            let mut buf = Buffer::at_indent(cfg.indent_width, indent_level);
            buf.block("Fork: ", &rendered);
            format!("({})", buf.finish().trim_end())
        }
        TExpr::Return(value) => {
            format!("Ret {}", wrap_conservatively(&render_expr(value, indent_level, cfg)))
        }
        TExpr::HashTableInsert(value) => {
            format!(
                "Data.hashTableInsert {}",
                wrap_conservatively(&render_expr(value, indent_level, cfg))
            )
        }
    }
}

fn render_if(
    cond: &TExpr,
    then_branch: &TExpr,
    else_branch: &TExpr,
    indent_level: usize,
    cfg: &Config,
) -> String {
    let cond_s = render_expr(cond, indent_level, cfg);
    let then_s = render_expr(then_branch, indent_level + 1, cfg);
    let else_s = render_expr(else_branch, indent_level + 1, cfg);

    if !then_s.contains('\n') && !else_s.contains('\n') {
        return format!("(if: {cond_s} then {then_s} else {else_s})");
    }

    let mut buf = Buffer::at_indent(cfg.indent_width, indent_level);
    buf.add(&format!("(if: {cond_s}"));
    buf.indent();
    buf.add_line(&format!("then {then_s}"));
    buf.add_line(&format!("else {else_s}"));
    buf.dedent();
    let rendered = buf.finish();
    let mut trimmed = rendered.trim_end().to_string();
    trimmed.push(')');
    trimmed
}

fn render_block(bindings: &[Binding], indent_level: usize, cfg: &Config) -> String {
    let mut buf = Buffer::at_indent(cfg.indent_width, indent_level);
    let last = bindings.len().saturating_sub(1);
    for (i, binding) in bindings.iter().enumerate() {
        let terminal = i == last;
        let rendered_expr = render_expr(&binding.expr, indent_level, cfg);
        if terminal {
            buf.add_line(&rendered_expr);
            continue;
        }
        match binding.names.len() {
            0 => buf.add_line(&format!("{rendered_expr};;")),
            1 => {
                let name = quote_ident(&binding.names[0]);
                buf.block(&format!("let: {name} := "), &format!("{rendered_expr} in"));
            }
            2 => {
                let a = quote_ident(&binding.names[0]);
                let b = quote_ident(&binding.names[1]);
                buf.block(
                    &format!("let: ({a}, {b}) := "),
                    &format!("{rendered_expr} in"),
                );
            }
            n => unreachable!("Binding invariant violated: {n} names"),
        }
    }
    buf.finish().trim_end().to_string()
}

fn render_for_loop(
    init: &Binding,
    cond: &TExpr,
    post: &TExpr,
    body: &TExpr,
    indent_level: usize,
    cfg: &Config,
) -> String {
    let mut buf = Buffer::at_indent(cfg.indent_width, indent_level);
    let init_expr = render_expr(&init.expr, indent_level, cfg);
    match init.names.len() {
        0 => buf.add_line(&format!("{init_expr};;")),
        1 => buf.block(
            &format!("let: {} := ", quote_ident(&init.names[0])),
            &format!("{init_expr} in"),
        ),
        2 => {
            let a = quote_ident(&init.names[0]);
            let b = quote_ident(&init.names[1]);
            buf.block(&format!("let: ({a}, {b}) := "), &format!("{init_expr} in"));
        }
        n => unreachable!("Binding invariant violated: {n} names"),
    }
    let cond_s = render_expr(cond, indent_level, cfg);
    let post_s = render_expr(post, indent_level, cfg);
    let body_s = render_expr(body, indent_level + 1, cfg);
    buf.add_line(&format!("(for: ({cond_s}); ({post_s}) :="));
    buf.indent();
    buf.add_line(&body_s);
    buf.dedent();
    buf.add_line(")");
    let rendered = buf.finish();
    rendered.trim_end().to_string()
}

fn render_map_iter(
    key: &str,
    value: &str,
    map: &TExpr,
    body: &TExpr,
    indent_level: usize,
    cfg: &Config,
) -> String {
    let map_s = render_expr(map, indent_level, cfg);
    let body_s = render_expr(body, indent_level + 1, cfg);
    let mut buf = Buffer::at_indent(cfg.indent_width, indent_level);
    buf.add_line(&format!(
        "(for_range_map: {} {} := {map_s} do",
        quote_ident(key),
        quote_ident(value)
    ));
    buf.indent();
    buf.add_line(&body_s);
    buf.dedent();
    buf.add_line(")");
    buf.finish().trim_end().to_string()
}

fn render_doc_comment(doc: &Option<String>) -> Option<String> {
    doc.as_ref().map(|text| format!("(* {} *)", text.trim()))
}

/// Renders the originating SOURCE position as a comment, when `cfg.add_source_comments` is set.
fn render_source_comment(span: &Span, cfg: &Config) -> Option<String> {
    if cfg.add_source_comments {
        Some(format!("(* from {span} *)"))
    } else {
        None
    }
}

fn render_decl(decl: &Decl, indent_level: usize, cfg: &Config) -> String {
    let mut buf = Buffer::at_indent(cfg.indent_width, indent_level);
    match decl {
        Decl::Comment(text) => {
            buf.add_line(&format!("(* {text} *)"));
        }
        Decl::Func(func) => {
            if let Some(doc) = render_doc_comment(&func.doc) {
                buf.add_line(&doc);
            }
            if let Some(comment) = render_source_comment(&func.span, cfg) {
                buf.add_line(&comment);
            }
            let params = if func.params.is_empty() {
                "<>".to_string()
            } else {
                func.params
                    .iter()
                    .map(|p| quote_ident(&p.name))
                    .collect::<Vec<_>>()
                    .join(" ")
            };
            buf.add_line(&format!("Definition {} : val := rec: {params} :=", func.name));
            buf.indent();
            let body = render_expr(&func.body, indent_level + 1, cfg);
            buf.add_line(&body);
            buf.dedent();
            buf.add_line(".");
        }
        Decl::Struct(s) => {
            if let Some(doc) = render_doc_comment(&s.doc) {
                buf.add_line(&doc);
            }
            if let Some(comment) = render_source_comment(&s.span, cfg) {
                buf.add_line(&comment);
            }
            buf.add_line(&format!("Module {}.", s.name));
            buf.indent();
            buf.add_line("Record t := mk {");
            buf.indent();
            for field in &s.fields {
                buf.add_line(&format!("{} : {};", field.name, render_type(&field.ty)));
            }
            buf.dedent();
            buf.add_line("}.");
            buf.blank_line();
            let zero_fields: Vec<_> = s
                .fields
                .iter()
                .map(|f| wrap_conservatively(&render_expr(&zero_value(&f.ty), indent_level, cfg)))
                .collect();
            buf.add_line(&format!("Definition zero : t := mk {}.", zero_fields.join(" ")));
            buf.blank_line();
            for field in &s.fields {
                buf.add_line(&format!(
                    "Definition get_{} (v : t) : {} := v.({}).",
                    field.name,
                    render_type(&field.ty),
                    field.name
                ));
            }
            buf.dedent();
            buf.add_line(&format!("End {}.", s.name));
        }
        Decl::Type(t) => {
            if let Some(doc) = render_doc_comment(&t.doc) {
                buf.add_line(&doc);
            }
            if let Some(comment) = render_source_comment(&t.span, cfg) {
                buf.add_line(&comment);
            }
            buf.add_line(&format!(
                "Definition {} : Type := {}.",
                t.name,
                render_type(&t.underlying)
            ));
        }
        Decl::Const(c) => {
            if let Some(doc) = render_doc_comment(&c.doc) {
                buf.add_line(&doc);
            }
            if let Some(comment) = render_source_comment(&c.span, cfg) {
                buf.add_line(&comment);
            }
            buf.add_line(&format!(
                "Definition {} : {} := {}.",
                c.name,
                render_type(&c.ty),
                render_expr(&c.value, indent_level, cfg)
            ));
        }
    }
    buf.finish().trim_end().to_string()
}

/// Renders the whole `File`: preamble comment, prelude import, then one declaration per original
/// SOURCE declaration in order, separated by a blank line.
pub fn render_file(file: &File, cfg: &Config) -> String {
    let mut buf = Buffer::new(cfg.indent_width);
    buf.add_line(&format!("(* autogenerated from {} *)", file.package_path));
    buf.add_line("From Perennial.goose_lang Require Import prelude.");
    buf.blank_line();
    for (i, decl) in file.decls.iter().enumerate() {
        if i > 0 {
            buf.blank_line();
        }
        let rendered = render_decl(decl, 0, cfg);
        buf.add(&rendered);
        buf.add("\n");
    }
    buf.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::decl::{FuncDecl, FuncParam};

    #[test]
    fn no_tabs_or_trailing_whitespace() {
        let mut buf = Buffer::new(2);
        buf.add_line("foo  ");
        buf.add_line("bar\t");
        let out = buf.finish();
        assert!(!out.contains('\t'));
        for line in out.lines() {
            assert_eq!(line, line.trim_end());
        }
    }

    #[test]
    fn call_arg_wrapping() {
        assert_eq!(wrap_conservatively("x"), "x");
        assert_eq!(wrap_conservatively("(a + b)"), "(a + b)");
        assert_eq!(wrap_conservatively("a + b"), "(a + b)");
        assert_eq!(wrap_conservatively("{| x := 1 |}"), "{| x := 1 |}");
    }

    #[test]
    fn wildcard_identifiers_render_as_angle_brackets() {
        assert_eq!(render_ident("_", IdentKind::Program), "<>");
        assert_eq!(render_ident("_", IdentKind::Gallina), "<>");
        assert_eq!(render_ident("x", IdentKind::Program), "\"x\"");
    }

    #[test]
    fn rendering_the_same_file_twice_is_byte_identical() {
        let file = File {
            package_path: "example.go".to_string(),
            decls: vec![Decl::Func(FuncDecl {
                name: "Double".to_string(),
                params: vec![FuncParam {
                    name: "x".to_string(),
                    ty: TargetType::NamedType("uint64".to_string()),
                }],
                ret: TargetType::NamedType("uint64".to_string()),
                body: TExpr::Block(vec![Binding::anonymous(TExpr::Binary {
                    op: crate::target::BinOp::Add,
                    lhs: Box::new(TExpr::ident_program("x")),
                    rhs: Box::new(TExpr::ident_program("x")),
                })]),
                doc: Some("Doubles a value.".to_string()),
                span: Span::new("f.go", 3, 1),
            })],
        };
        let cfg = Config {
            add_source_comments: true,
            ..Config::default()
        };
        assert_eq!(render_file(&file, &cfg), render_file(&file, &cfg));
    }
}
