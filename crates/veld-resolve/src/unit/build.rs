//! Tree-building stage: declarations in, namespace tree with queued
//! bindings out.
//!
//! Nothing is resolved here. Every import, export, and type alias lands in
//! its table as an unresolved target so that forward references, and
//! exports of things imported later in the same body, cost nothing to
//! support. Structural conflicts (duplicate names, namespace/symbol
//! clashes) are the only errors this stage can raise.

use indexmap::IndexMap;

use veld_core::{
    Decl, DeclKind, ExportDecl, Interner, Name, NamespaceDecl, Path, PathEntry, Span,
};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::table::{Binding, BindingState, NamespaceId, NamespaceTree, SymbolData, TableKind};

use super::{PendingTarget, PendingType};

pub(crate) fn build(
    decls: &[Decl],
    tree: &mut NamespaceTree,
    names: &Interner,
    diagnostics: &mut Diagnostics,
    pending: &mut Vec<PendingType>,
) {
    let root = tree.root();
    let mut builder = TreeBuilder {
        tree,
        names,
        diagnostics,
        pending,
    };
    builder.declare_all(root, decls);
}

struct TreeBuilder<'a> {
    tree: &'a mut NamespaceTree,
    names: &'a Interner,
    diagnostics: &'a mut Diagnostics,
    pending: &'a mut Vec<PendingType>,
}

impl TreeBuilder<'_> {
    fn declare_all(&mut self, ns: NamespaceId, decls: &[Decl]) {
        for decl in decls {
            self.declare(ns, decl, false);
        }
    }

    fn declare(&mut self, ns: NamespaceId, decl: &Decl, exported: bool) {
        match &decl.kind {
            DeclKind::Namespace(block) => {
                self.declare_namespace(ns, block, exported || block.exported, decl.span);
            }
            DeclKind::Use(stmt) => {
                for entry in &stmt.entries {
                    self.insert_path_entry(ns, TableKind::Local, entry);
                }
            }
            DeclKind::Export(ExportDecl::Paths(entries)) => {
                for entry in entries {
                    self.insert_path_entry(ns, TableKind::Export, entry);
                }
            }
            DeclKind::Export(ExportDecl::Decl(inner)) => {
                self.declare(ns, inner, true);
            }
            DeclKind::TypeAlias(alias) => {
                self.declare_entity(
                    ns,
                    alias.name,
                    BindingState::Type(alias.ty.clone()),
                    decl.span,
                    exported,
                );
            }
            DeclKind::Struct(decl_struct) => {
                // Field types stay pending until every binding has a target.
                let mut fields = IndexMap::new();
                for field in &decl_struct.fields {
                    fields.entry(field.name).or_insert(None);
                }
                let symbol = self.tree.alloc_symbol(SymbolData::Struct {
                    name: decl_struct.name,
                    fields,
                });
                for field in &decl_struct.fields {
                    self.pending.push(PendingType {
                        ns,
                        expr: field.ty.clone(),
                        target: PendingTarget::StructField {
                            symbol,
                            field: field.name,
                        },
                    });
                }
                self.declare_entity(
                    ns,
                    decl_struct.name,
                    BindingState::Resolved(symbol),
                    decl.span,
                    exported,
                );
            }
            DeclKind::Function(func) => {
                let symbol = self.tree.alloc_symbol(SymbolData::Function { name: func.name });
                self.declare_entity(
                    ns,
                    func.name,
                    BindingState::Resolved(symbol),
                    decl.span,
                    exported,
                );
            }
            DeclKind::Global(global) => {
                let symbol = self.tree.alloc_symbol(SymbolData::Global {
                    name: global.name,
                    ty: None,
                    init: global.init.clone(),
                });
                self.pending.push(PendingType {
                    ns,
                    expr: global.ty.clone(),
                    target: PendingTarget::GlobalType { symbol },
                });
                self.declare_entity(
                    ns,
                    global.name,
                    BindingState::Resolved(symbol),
                    decl.span,
                    exported,
                );
            }
        }
    }

    /// Create or reopen a child namespace and walk its body.
    fn declare_namespace(
        &mut self,
        parent: NamespaceId,
        block: &NamespaceDecl,
        exported: bool,
        span: Span,
    ) {
        if block.name == self.tree.core_name() {
            self.report_reserved(block.name, span);
            return;
        }

        if let Some(&existing) = self.tree.namespace(parent).children.get(&block.name) {
            // Reopening. The namespace is exported if any block was.
            if exported {
                self.export_namespace_identity(parent, existing, block.name, span);
            }
            self.declare_all(existing, &block.body);
            return;
        }

        if let Some(conflicting) = self.tree.namespace(parent).binding(TableKind::Local, block.name)
        {
            let first = conflicting.span;
            self.diagnostics
                .report(DiagnosticKind::DuplicateNamespace, span)
                .message(self.names.resolve(block.name))
                .related_to("conflicting declaration here", first)
                .emit();
            return;
        }

        let child = self.tree.alloc_namespace(block.name, Some(parent), span);
        if exported {
            self.export_namespace_identity(parent, child, block.name, span);
        }
        self.declare_all(child, &block.body);
    }

    /// Make a namespace's own identity visible in its parent's export
    /// table, independent of what the namespace exports internally.
    fn export_namespace_identity(
        &mut self,
        parent: NamespaceId,
        child: NamespaceId,
        name: Name,
        span: Span,
    ) {
        let symbol = self.tree.namespace(child).symbol;
        if let Some(existing) = self.tree.namespace(parent).binding(TableKind::Export, name) {
            // Reopened `export ns` blocks re-export the same identity.
            if let BindingState::Resolved(bound) = &existing.state
                && *bound == symbol
            {
                return;
            }
            let first = existing.span;
            self.diagnostics
                .report(DiagnosticKind::DuplicateExport, span)
                .message(self.names.resolve(name))
                .related_to("first exported here", first)
                .emit();
            return;
        }
        self.tree
            .namespace_mut(parent)
            .exports
            .insert(name, Binding::new(BindingState::Resolved(symbol), span));
    }

    /// Queue one `path [as Name]` entry of a use or export statement.
    fn insert_path_entry(&mut self, ns: NamespaceId, table: TableKind, entry: &PathEntry) {
        self.insert_binding(
            ns,
            table,
            entry.bound_name(),
            BindingState::Path(entry.path.clone()),
            entry.span,
        );
    }

    /// Declare an entity locally and, when exported, queue an export
    /// binding that re-resolves to the just-declared local.
    fn declare_entity(
        &mut self,
        ns: NamespaceId,
        name: Name,
        state: BindingState,
        span: Span,
        exported: bool,
    ) {
        self.insert_binding(ns, TableKind::Local, name, state, span);
        if exported {
            self.insert_binding(
                ns,
                TableKind::Export,
                name,
                BindingState::Path(Path::ident(name)),
                span,
            );
        }
    }

    fn insert_binding(
        &mut self,
        ns: NamespaceId,
        table: TableKind,
        name: Name,
        state: BindingState,
        span: Span,
    ) {
        if name == self.tree.core_name() {
            self.report_reserved(name, span);
            return;
        }

        // A local binding may not shadow a sibling child namespace; it
        // would make relative lookup ambiguous. Exports may coexist with
        // children (that is how `export ns` works).
        if table == TableKind::Local
            && let Some(&child) = self.tree.namespace(ns).children.get(&name)
        {
            let declared = self.tree.namespace(child).span;
            self.diagnostics
                .report(DiagnosticKind::DuplicateNamespace, span)
                .message(self.names.resolve(name))
                .related_to("namespace declared here", declared)
                .emit();
            return;
        }

        if let Some(existing) = self.tree.namespace(ns).binding(table, name) {
            let first = existing.span;
            let (kind, note) = match table {
                TableKind::Local => (DiagnosticKind::DuplicateBinding, "first bound here"),
                TableKind::Export => (DiagnosticKind::DuplicateExport, "first exported here"),
            };
            self.diagnostics
                .report(kind, span)
                .message(self.names.resolve(name))
                .related_to(note, first)
                .emit();
            return;
        }

        self.tree
            .namespace_mut(ns)
            .table_mut(table)
            .insert(name, Binding::new(state, span));
    }

    fn report_reserved(&mut self, name: Name, span: Span) {
        self.diagnostics
            .report(DiagnosticKind::DuplicateNamespace, span)
            .message(self.names.resolve(name))
            .hint("`core` is reserved for the builtin namespace")
            .emit();
    }
}
