#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures shared by the Veld front end.
//!
//! Three layers:
//! - **Interning** (`interner`): cheap `Name` handles for identifiers
//! - **Source anchoring** (`span`): byte ranges into the original source
//! - **Declaration tree** (`decl`, `path`): the parser's output, consumed
//!   by the resolver in `veld-resolve`
//!
//! This crate deliberately knows nothing about resolution: it is the
//! contract between the parser and everything downstream.

pub mod decl;
pub mod interner;
pub mod path;
pub mod span;


pub use decl::{
    Decl, DeclKind, ExportDecl, FieldDecl, FunctionDecl, GlobalDecl, Literal, NamespaceDecl,
    PathEntry, StructDecl, TypeAliasDecl, TypeExpr, TypeExprKind, UseDecl, UseSpelling,
};
pub use interner::{Interner, Name};
pub use path::Path;
pub use span::Span;
