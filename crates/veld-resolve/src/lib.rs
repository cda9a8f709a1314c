#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Veld name resolution: declaration trees in, frozen symbol tables out.
//!
//! # Example
//!
//! ```no_run
//! use veld_core::Interner;
//! use veld_resolve::Unit;
//!
//! let names = Interner::new();
//! let decls = Vec::new(); // produced by the parser
//! let unit = Unit::new(decls, names);
//! match unit.resolve() {
//!     Ok(resolved) => {
//!         let names: Vec<_> = resolved.export_names(resolved.root()).collect();
//!         eprintln!("root exports: {}", names.len());
//!     }
//!     Err(err) => eprintln!("{err}"),
//! }
//! ```
//!
//! Stages: build (namespace tree + queued bindings) → bind (imports,
//! exports, cycle detection) → types (pointer and struct-field references).
//! Each stage accumulates diagnostics and keeps going past failures, so a
//! single pass surfaces as many errors as possible. The pass as a whole
//! either succeeds completely or yields only an error report; no partially
//! resolved table ever escapes.

pub mod diagnostics;
pub mod table;
pub mod unit;

#[cfg(test)]
pub mod test_utils;

pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use table::{
    Binding, BindingState, Namespace, NamespaceId, NamespaceTree, Symbol, SymbolData, SymbolId,
    SymbolKind, TableKind,
};
pub use unit::{Resolved, TreePrinter, Unit, Visibility};

/// Errors that can terminate resolution of a compilation unit.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// One or more declarations failed to resolve. Carries the complete
    /// accumulated report; no partial symbol table is produced.
    #[error("name resolution failed with {} errors", .0.error_count())]
    ResolveFailed(Diagnostics),
}

impl Error {
    /// The accumulated diagnostics behind this error.
    pub fn diagnostics(&self) -> &Diagnostics {
        match self {
            Error::ResolveFailed(diags) => diags,
        }
    }
}
