//! Resolution pipeline for one compilation unit.
//!
//! Stages: build → bind → types. Each stage accumulates diagnostics and
//! never aborts early; `resolve()` hands back either a fully frozen table
//! or the complete error report, never a partial table.

mod bind;
mod build;
mod paths;
mod printer;
mod types;

#[cfg(test)]
mod mod_tests;
#[cfg(test)]
mod printer_tests;

use veld_core::{Decl, Interner, Name, TypeExpr};

use crate::Error;
use crate::diagnostics::Diagnostics;
use crate::table::{
    Binding, BindingState, Namespace, NamespaceId, NamespaceTree, Symbol, SymbolId, TableKind,
};

pub use printer::{BindingDump, NamespaceDump, TreePrinter};

/// A type expression queued during building for the type pass: struct
/// fields and global types resolve after every binding has a target.
#[derive(Debug, Clone)]
pub(crate) struct PendingType {
    /// Scope the expression was written in.
    pub ns: NamespaceId,
    pub expr: TypeExpr,
    pub target: PendingTarget,
}

#[derive(Debug, Clone)]
pub(crate) enum PendingTarget {
    StructField { symbol: SymbolId, field: Name },
    GlobalType { symbol: SymbolId },
}

/// Shared state for the resolution passes. The passes live in `paths`,
/// `bind`, and `types`; all of them work through this one view so path
/// resolution, binding resolution, and type resolution can recurse into
/// each other.
pub(crate) struct Resolver<'a> {
    pub tree: &'a mut NamespaceTree,
    pub names: &'a Interner,
    pub diagnostics: &'a mut Diagnostics,
}

/// A parsed compilation unit moving through resolution.
///
/// Construction runs the tree-building stage eagerly; [`Unit::resolve`]
/// runs the remaining stages and freezes the result.
#[derive(Debug, Clone)]
pub struct Unit {
    names: Interner,
    tree: NamespaceTree,
    pending_types: Vec<PendingType>,
    build_diagnostics: Diagnostics,
    resolve_diagnostics: Diagnostics,
}

impl Unit {
    /// Build the namespace tree for `decls`. `names` must be the interner
    /// the parser used for the declarations' identifiers.
    pub fn new(decls: Vec<Decl>, mut names: Interner) -> Self {
        let mut tree = NamespaceTree::new(&mut names);
        let mut build_diagnostics = Diagnostics::new();
        let mut pending_types = Vec::new();

        build::build(
            &decls,
            &mut tree,
            &names,
            &mut build_diagnostics,
            &mut pending_types,
        );

        Self {
            names,
            tree,
            pending_types,
            build_diagnostics,
            resolve_diagnostics: Diagnostics::new(),
        }
    }

    /// All diagnostics accumulated so far, across stages.
    pub fn diagnostics(&self) -> Diagnostics {
        let mut merged = self.build_diagnostics.clone();
        merged.extend(self.resolve_diagnostics.clone());
        merged
    }

    pub fn is_valid(&self) -> bool {
        !self.build_diagnostics.has_errors() && !self.resolve_diagnostics.has_errors()
    }

    /// Run binding and type resolution, then freeze.
    ///
    /// Resolution keeps going past individual failures so the report is as
    /// complete as one pass can make it. Any error means no table.
    pub fn resolve(mut self) -> Result<Resolved, Error> {
        let pending = std::mem::take(&mut self.pending_types);
        {
            let mut resolver = Resolver {
                tree: &mut self.tree,
                names: &self.names,
                diagnostics: &mut self.resolve_diagnostics,
            };
            resolver.resolve_bindings();
            resolver.resolve_pending(pending);
        }

        let mut diagnostics = self.build_diagnostics;
        diagnostics.extend(self.resolve_diagnostics);

        if diagnostics.has_errors() {
            return Err(Error::ResolveFailed(diagnostics));
        }

        Ok(Resolved {
            names: self.names,
            tree: self.tree,
        })
    }
}

/// Which bindings a lookup may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// What other compilation units see: export tables (and namespace
    /// structure) only.
    Exported,
    /// Same-unit view: local tables are visible too.
    Unit,
}

/// A fully resolved, frozen compilation unit.
///
/// Every binding in every table is `Resolved`; the tree is read-only from
/// here on. Plain owned data, so sharing across threads is free.
#[derive(Debug, Clone)]
pub struct Resolved {
    names: Interner,
    tree: NamespaceTree,
}

impl Resolved {
    #[inline]
    pub fn root(&self) -> NamespaceId {
        self.tree.root()
    }

    #[inline]
    pub fn names(&self) -> &Interner {
        &self.names
    }

    #[inline]
    pub fn tree(&self) -> &NamespaceTree {
        &self.tree
    }

    pub fn namespace(&self, id: NamespaceId) -> &Namespace {
        self.tree.namespace(id)
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        self.tree.symbol(id)
    }

    /// Resolve an absolute path given as string segments, e.g.
    /// `["C", "D", "X"]` for `::C::D::X`. Returns `None` for anything the
    /// requested visibility cannot see.
    pub fn lookup(&self, segments: &[&str], visibility: Visibility) -> Option<SymbolId> {
        let mut cursor = self.tree.namespace(self.tree.root()).symbol;

        for seg in segments {
            let ns = self.tree.symbol(cursor).data.as_namespace()?;
            let name = self.names.get(seg)?;
            cursor = self.member(ns, name, visibility)?;
        }

        Some(cursor)
    }

    /// Resolve a [`veld_core::Path`] from the root. Relative paths are
    /// treated as root-relative; in-scope resolution only exists while the
    /// unit is being resolved.
    pub fn resolve_path(&self, path: &veld_core::Path, visibility: Visibility) -> Option<SymbolId> {
        let mut cursor = self.tree.namespace(self.tree.root()).symbol;

        for &seg in path.segments() {
            let ns = self.tree.symbol(cursor).data.as_namespace()?;
            cursor = self.member(ns, seg, visibility)?;
        }

        Some(cursor)
    }

    fn member(&self, ns: NamespaceId, name: Name, visibility: Visibility) -> Option<SymbolId> {
        let node = self.tree.namespace(ns);

        if let Some(&child) = node.children.get(&name) {
            return Some(self.tree.namespace(child).symbol);
        }
        if let Some(Binding {
            state: BindingState::Resolved(symbol),
            ..
        }) = node.binding(TableKind::Export, name)
        {
            return Some(*symbol);
        }
        if visibility == Visibility::Unit
            && let Some(Binding {
                state: BindingState::Resolved(symbol),
                ..
            }) = node.binding(TableKind::Local, name)
        {
            return Some(*symbol);
        }

        None
    }

    /// Exported names of a namespace, in declaration order.
    pub fn export_names(&self, ns: NamespaceId) -> impl Iterator<Item = &str> {
        self.tree
            .namespace(ns)
            .exports
            .keys()
            .map(|name| self.names.resolve(*name))
    }

    /// Ordered `(field name, field type)` pairs of a struct symbol.
    pub fn struct_fields(&self, id: SymbolId) -> Option<Vec<(&str, SymbolId)>> {
        match &self.tree.symbol(id).data {
            crate::table::SymbolData::Struct { fields, .. } => Some(
                fields
                    .iter()
                    .filter_map(|(name, ty)| ty.map(|ty| (self.names.resolve(*name), ty)))
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Human description of a symbol, e.g. `^^s32` or `ns ::C::D`.
    pub fn describe(&self, id: SymbolId) -> String {
        self.tree.describe_symbol(id, &self.names)
    }

    pub fn printer(&self) -> TreePrinter<'_> {
        TreePrinter::new(self)
    }

    /// Serializable dump of the whole table, builtins included.
    pub fn dump(&self) -> NamespaceDump {
        printer::dump_namespace(self, self.tree.root())
    }
}
