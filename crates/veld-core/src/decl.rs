//! The declaration tree handed over by the parser.
//!
//! This is the resolver's entire input: an ordered sequence of declarations,
//! some of which nest (namespace blocks). Bodies of functions and values of
//! globals are opaque at this stage; only names, kinds, and type references
//! matter to resolution.

use crate::interner::Name;
use crate::path::Path;
use crate::span::Span;

/// One parsed declaration with its source anchor.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Decl {
    pub kind: DeclKind,
    pub span: Span,
}

impl Decl {
    pub fn new(kind: DeclKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum DeclKind {
    /// `ns Name { … }`
    Namespace(NamespaceDecl),
    /// `import …;` / `alias …;` - one operation, two spellings.
    Use(UseDecl),
    /// `export …;` in any of its forms.
    Export(ExportDecl),
    /// `type Name = <type-expression>;`
    TypeAlias(TypeAliasDecl),
    /// `struct Name { field: T, … }`
    Struct(StructDecl),
    /// `fn Name …` - body opaque to resolution.
    Function(FunctionDecl),
    /// `global Name: T = <literal>;`
    Global(GlobalDecl),
}

/// A namespace block. `exported` is set when the block was written
/// `export ns Name { … }`, which exposes the namespace's own identity to
/// the parent's importers.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct NamespaceDecl {
    pub name: Name,
    pub exported: bool,
    pub body: Vec<Decl>,
}

/// Which keyword the user wrote. The two are semantically identical; the
/// spelling is kept only so diagnostics can echo the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum UseSpelling {
    Import,
    Alias,
}

impl UseSpelling {
    pub fn keyword(self) -> &'static str {
        match self {
            UseSpelling::Import => "import",
            UseSpelling::Alias => "alias",
        }
    }
}

/// `import p;`, `alias p as N;`, `import { p1, p2 as N, … };`
///
/// Grouped forms arrive as multiple entries; each entry is an independent
/// binding. All bind into the local (non-exported) table.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct UseDecl {
    pub spelling: UseSpelling,
    pub entries: Vec<PathEntry>,
}

/// One `path [as Name]` element of a use or export statement.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PathEntry {
    pub path: Path,
    pub rename: Option<Name>,
    pub span: Span,
}

impl PathEntry {
    /// The name this entry binds: the rename if present, else the path's
    /// final segment.
    pub fn bound_name(&self) -> Name {
        self.rename.unwrap_or_else(|| self.path.last())
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum ExportDecl {
    /// `export <declaration>` - declares the entity locally and exports it
    /// under the same name. Covers the `export ns Name { … }` form too.
    Decl(Box<Decl>),
    /// `export p [as N];` and `export { e1, e2, … };` - re-exports of
    /// already-declared (possibly imported) entities.
    Paths(Vec<PathEntry>),
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TypeAliasDecl {
    pub name: Name,
    pub ty: TypeExpr,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct StructDecl {
    pub name: Name,
    /// Declaration order is semantically significant for layout decisions
    /// made downstream; the resolver preserves it.
    pub fields: Vec<FieldDecl>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FieldDecl {
    pub name: Name,
    pub ty: TypeExpr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FunctionDecl {
    pub name: Name,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct GlobalDecl {
    pub name: Name,
    pub ty: TypeExpr,
    pub init: Option<Literal>,
}

/// A type expression appearing in a type alias, struct field, or global.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TypeExpr {
    pub kind: TypeExprKind,
    pub span: Span,
}

impl TypeExpr {
    pub fn new(kind: TypeExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum TypeExprKind {
    /// A named type, builtin or user-defined.
    Path(Path),
    /// `^T` - pointer-to-T. Nests to unbounded depth.
    Pointer(Box<TypeExpr>),
}

/// Opaque initializer literal on a global. Resolution records it verbatim.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Int(v) => write!(f, "{v}"),
            Literal::Float(v) => write!(f, "{v}"),
            Literal::Bool(v) => write!(f, "{v}"),
            Literal::Str(v) => write!(f, "{v:?}"),
        }
    }
}
