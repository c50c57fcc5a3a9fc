//! The translator: SOURCE package → TARGET `File`.

pub mod decl;
pub mod expr;
pub mod stmt;
pub mod types;

use std::cell::RefCell;
use std::collections::HashMap;

use crate::config::Config;
use crate::diagnostics::Diagnostics;
use crate::source::{Param, Type};
use crate::target::File;

/// A struct's fields in declaration order, carrying SOURCE types so composite-literal lowering
/// can reorder fields and synthesize zero values for any left unspecified.
#[derive(Debug, Clone)]
pub struct StructInfo {
    pub fields: Vec<(String, Type)>,
}

/// Context threaded by shared reference through every translator function: interior-mutable
/// state accessed through `&self` rather than `&mut self`, so sibling declarations can be
/// translated without fighting the borrow checker over a single mutable context.
pub struct TranslateCtx {
    pub config: Config,
    pub diagnostics: Diagnostics,
    pub structs: HashMap<String, StructInfo>,
    /// Declared named results of the function currently being translated, used to synthesize
    /// tuple returns for a bare `return`.
    current_results: RefCell<Vec<Param>>,
    /// Stack of in-scope loop accumulator name groups, innermost last; `break`/`continue` read the
    /// top to know what value to carry through `LoopRet`/`Continue`. A group is empty for a unit
    /// accumulator, one name for a single induction variable, or two names for an induction
    /// variable packed with one other mutated local.
    loop_accumulators: RefCell<Vec<Vec<String>>>,
}

impl TranslateCtx {
    pub fn new(config: Config, structs: HashMap<String, StructInfo>) -> Self {
        Self {
            config,
            diagnostics: Diagnostics::new(),
            structs,
            current_results: RefCell::new(Vec::new()),
            loop_accumulators: RefCell::new(Vec::new()),
        }
    }

    pub fn enter_function(&self, results: Vec<Param>) {
        *self.current_results.borrow_mut() = results;
    }

    pub fn current_results(&self) -> Vec<Param> {
        self.current_results.borrow().clone()
    }

    pub fn push_loop_accumulator(&self, names: Vec<String>) {
        self.loop_accumulators.borrow_mut().push(names);
    }

    pub fn pop_loop_accumulator(&self) {
        self.loop_accumulators.borrow_mut().pop();
    }

    pub fn current_loop_accumulator(&self) -> Option<Vec<String>> {
        self.loop_accumulators.borrow().last().cloned()
    }
}

/// Translates a single SOURCE package into a TARGET `File`, or returns the accumulated
/// diagnostics if any declaration could not be lowered.
pub fn translate_package(
    package: &crate::source::Package,
    config: Config,
) -> Result<File, Vec<crate::diagnostics::Diagnostic>> {
    let structs = decl::collect_struct_info(package);
    let ctx = TranslateCtx::new(config, structs);

    log::info!("translating package {}", package.path);

    let mut decls = Vec::with_capacity(package.decls.len());
    for source_decl in &package.decls {
        log::debug!("translating declaration at {}", source_decl.span());
        decls.push(decl::translate_decl(source_decl, &ctx));
    }

    if ctx.diagnostics.is_empty() {
        Ok(File {
            package_path: package.path.clone(),
            decls,
        })
    } else {
        let sorted = ctx.diagnostics.into_sorted();
        log::error!(
            "translation of package {} failed with {} diagnostic(s)",
            package.path,
            sorted.len()
        );
        Err(sorted)
    }
}
