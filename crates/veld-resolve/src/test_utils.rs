//! Test fixtures: a small builder vocabulary for declaration trees.
//!
//! Tests sketch declarations with plain string names and paths
//! (`"::core::s32"`); `build_unit` interns everything, assigns synthetic
//! spans, and hands back a [`Unit`]. No parsing is involved; path
//! strings are split on `::`, nothing more.

use veld_core::{
    Decl, DeclKind, ExportDecl, FieldDecl, FunctionDecl, GlobalDecl, Interner, Literal,
    NamespaceDecl, Path, PathEntry, Span, StructDecl, TypeAliasDecl, TypeExpr, TypeExprKind,
    UseDecl, UseSpelling,
};

use crate::table::SymbolId;
use crate::unit::{Resolved, Unit, Visibility};

/// Declaration sketch; `build_unit` lowers it to the real tree.
pub enum TDecl {
    Ns(&'static str, bool, Vec<TDecl>),
    Use(UseSpelling, Vec<Entry>),
    ExportPaths(Vec<Entry>),
    ExportDecl(Box<TDecl>),
    TypeAlias(&'static str, TTy),
    Struct(&'static str, Vec<(&'static str, TTy)>),
    Func(&'static str),
    Global(&'static str, TTy, Option<Literal>),
}

/// `path [as rename]`.
pub type Entry = (&'static str, Option<&'static str>);

/// Type expression sketch.
pub enum TTy {
    Path(&'static str),
    Ptr(Box<TTy>),
}

pub fn ns(name: &'static str, body: Vec<TDecl>) -> TDecl {
    TDecl::Ns(name, false, body)
}

pub fn export_ns(name: &'static str, body: Vec<TDecl>) -> TDecl {
    TDecl::Ns(name, true, body)
}

pub fn import(path: &'static str) -> TDecl {
    TDecl::Use(UseSpelling::Import, vec![(path, None)])
}

pub fn import_as(path: &'static str, rename: &'static str) -> TDecl {
    TDecl::Use(UseSpelling::Import, vec![(path, Some(rename))])
}

pub fn imports(entries: Vec<Entry>) -> TDecl {
    TDecl::Use(UseSpelling::Import, entries)
}

pub fn alias(path: &'static str) -> TDecl {
    TDecl::Use(UseSpelling::Alias, vec![(path, None)])
}

pub fn alias_as(path: &'static str, rename: &'static str) -> TDecl {
    TDecl::Use(UseSpelling::Alias, vec![(path, Some(rename))])
}

pub fn export(path: &'static str) -> TDecl {
    TDecl::ExportPaths(vec![(path, None)])
}

pub fn export_as(path: &'static str, rename: &'static str) -> TDecl {
    TDecl::ExportPaths(vec![(path, Some(rename))])
}

pub fn exports(entries: Vec<Entry>) -> TDecl {
    TDecl::ExportPaths(entries)
}

pub fn export_decl(decl: TDecl) -> TDecl {
    TDecl::ExportDecl(Box::new(decl))
}

pub fn type_alias(name: &'static str, ty: TTy) -> TDecl {
    TDecl::TypeAlias(name, ty)
}

pub fn struct_decl(name: &'static str, fields: Vec<(&'static str, TTy)>) -> TDecl {
    TDecl::Struct(name, fields)
}

pub fn func(name: &'static str) -> TDecl {
    TDecl::Func(name)
}

pub fn global(name: &'static str, ty: TTy, init: Option<Literal>) -> TDecl {
    TDecl::Global(name, ty, init)
}

pub fn t(path: &'static str) -> TTy {
    TTy::Path(path)
}

pub fn ptr(inner: TTy) -> TTy {
    TTy::Ptr(Box::new(inner))
}

/// Lower a sketch and run the build stage.
pub fn build_unit(decls: Vec<TDecl>) -> Unit {
    let mut names = Interner::new();
    let mut pos = 0u32;
    let lowered: Vec<Decl> = decls
        .iter()
        .map(|d| lower_decl(d, &mut names, &mut pos))
        .collect();
    Unit::new(lowered, names)
}

/// Resolve a sketch, panicking with the rendered report on failure.
pub fn resolve_ok(decls: Vec<TDecl>) -> Resolved {
    match build_unit(decls).resolve() {
        Ok(resolved) => resolved,
        Err(err) => panic!("expected resolution to succeed:\n{}", err.diagnostics().render()),
    }
}

/// Resolve a sketch that must fail; returns the rendered report.
pub fn resolve_err(decls: Vec<TDecl>) -> String {
    match build_unit(decls).resolve() {
        Ok(_) => panic!("expected resolution to fail"),
        Err(err) => err.diagnostics().render(),
    }
}

/// Absolute lookup through a `::`-separated string.
pub fn lookup(resolved: &Resolved, path: &str, visibility: Visibility) -> Option<SymbolId> {
    let segments: Vec<&str> = path.trim_start_matches("::").split("::").collect();
    resolved.lookup(&segments, visibility)
}

/// Absolute lookup that must succeed.
pub fn lookup_ok(resolved: &Resolved, path: &str, visibility: Visibility) -> SymbolId {
    lookup(resolved, path, visibility).unwrap_or_else(|| panic!("`{path}` did not resolve"))
}

fn next_span(pos: &mut u32) -> Span {
    let span = Span::new(*pos, *pos + 8);
    *pos += 10;
    span
}

fn parse_path(text: &str, names: &mut Interner) -> Path {
    let absolute = text.starts_with("::");
    let rest = if absolute { &text[2..] } else { text };
    let segments = rest.split("::").map(|s| names.intern(s)).collect();
    if absolute {
        Path::absolute(segments)
    } else {
        Path::relative(segments)
    }
}

fn lower_entries(entries: &[Entry], names: &mut Interner, pos: &mut u32) -> Vec<PathEntry> {
    entries
        .iter()
        .map(|(path, rename)| PathEntry {
            path: parse_path(path, names),
            rename: rename.map(|r| names.intern(r)),
            span: next_span(pos),
        })
        .collect()
}

fn lower_ty(ty: &TTy, names: &mut Interner, pos: &mut u32) -> TypeExpr {
    let span = next_span(pos);
    match ty {
        TTy::Path(path) => TypeExpr::new(TypeExprKind::Path(parse_path(path, names)), span),
        TTy::Ptr(inner) => TypeExpr::new(
            TypeExprKind::Pointer(Box::new(lower_ty(inner, names, pos))),
            span,
        ),
    }
}

fn lower_decl(decl: &TDecl, names: &mut Interner, pos: &mut u32) -> Decl {
    let span = next_span(pos);
    match decl {
        TDecl::Ns(name, exported, body) => Decl::new(
            DeclKind::Namespace(NamespaceDecl {
                name: names.intern(name),
                exported: *exported,
                body: body.iter().map(|d| lower_decl(d, names, pos)).collect(),
            }),
            span,
        ),
        TDecl::Use(spelling, entries) => Decl::new(
            DeclKind::Use(UseDecl {
                spelling: *spelling,
                entries: lower_entries(entries, names, pos),
            }),
            span,
        ),
        TDecl::ExportPaths(entries) => Decl::new(
            DeclKind::Export(ExportDecl::Paths(lower_entries(entries, names, pos))),
            span,
        ),
        TDecl::ExportDecl(inner) => Decl::new(
            DeclKind::Export(ExportDecl::Decl(Box::new(lower_decl(inner, names, pos)))),
            span,
        ),
        TDecl::TypeAlias(name, ty) => Decl::new(
            DeclKind::TypeAlias(TypeAliasDecl {
                name: names.intern(name),
                ty: lower_ty(ty, names, pos),
            }),
            span,
        ),
        TDecl::Struct(name, fields) => Decl::new(
            DeclKind::Struct(StructDecl {
                name: names.intern(name),
                fields: fields
                    .iter()
                    .map(|(field, ty)| FieldDecl {
                        name: names.intern(field),
                        ty: lower_ty(ty, names, pos),
                        span: next_span(pos),
                    })
                    .collect(),
            }),
            span,
        ),
        TDecl::Func(name) => Decl::new(
            DeclKind::Function(FunctionDecl {
                name: names.intern(name),
            }),
            span,
        ),
        TDecl::Global(name, ty, init) => Decl::new(
            DeclKind::Global(GlobalDecl {
                name: names.intern(name),
                ty: lower_ty(ty, names, pos),
                init: init.clone(),
            }),
            span,
        ),
    }
}
