//! Path resolution: a qualified path plus a starting scope, down to one
//! symbol.
//!
//! Absolute paths walk from the root. Relative paths resolve their first
//! segment lexically (the scope's own locals and children, then each
//! ancestor's, innermost match wins) and the rest downward. Foreign
//! namespaces expose their export table and their namespace structure;
//! local tables are visible only from the scope chain that owns them.
//!
//! Hitting a still-unresolved binding along the way forces it first, which
//! is what makes forward references order-independent. The shared chain
//! keeps that recursion cycle-safe (see `bind`).

use veld_core::{Interner, Name, Path, Span};

use crate::diagnostics::DiagnosticKind;
use crate::table::{NamespaceId, SymbolId, TableKind};

use super::Resolver;
use super::bind::{BindingRef, Chain};

impl Resolver<'_> {
    /// Resolve `path` as seen from `scope`. Errors are reported against
    /// `origin` (the referencing binding or type expression); the caller
    /// only learns that resolution failed.
    pub(crate) fn resolve_path(
        &mut self,
        path: &Path,
        scope: NamespaceId,
        origin: Span,
        chain: &mut Chain,
    ) -> Result<SymbolId, ()> {
        let segments = path.segments();

        let (mut cursor, mut idx) = if path.is_absolute() {
            (self.tree.namespace(self.tree.root()).symbol, 0)
        } else {
            let first = self.lookup_lexical(segments[0], scope, origin, chain)?;
            (first, 1)
        };

        while idx < segments.len() {
            let segment = segments[idx];
            let Some(ns) = self.tree.symbol(cursor).data.as_namespace() else {
                self.diagnostics
                    .report(DiagnosticKind::NotANamespace, origin)
                    .message(display_prefix(path, idx, self.names))
                    .emit();
                return Err(());
            };
            cursor = self.lookup_member(ns, segment, scope, origin, chain)?;
            idx += 1;
        }

        Ok(cursor)
    }

    /// First-segment lookup for relative paths: the scope chain from the
    /// inside out, locals before children within each scope.
    fn lookup_lexical(
        &mut self,
        first: Name,
        scope: NamespaceId,
        origin: Span,
        chain: &mut Chain,
    ) -> Result<SymbolId, ()> {
        let mut cursor = Some(scope);
        while let Some(ns) = cursor {
            let node = self.tree.namespace(ns);
            if node.locals.contains_key(&first) {
                return self.force_binding(BindingRef::new(ns, TableKind::Local, first), chain);
            }
            if let Some(&child) = node.children.get(&first) {
                return Ok(self.tree.namespace(child).symbol);
            }
            cursor = node.parent;
        }

        self.diagnostics
            .report(DiagnosticKind::UnresolvedPath, origin)
            .message(self.names.resolve(first))
            .emit();
        Err(())
    }

    /// Non-first segment lookup inside namespace `ns`. Namespace structure
    /// is always traversable; bindings are filtered by who is asking.
    fn lookup_member(
        &mut self,
        ns: NamespaceId,
        segment: Name,
        scope: NamespaceId,
        origin: Span,
        chain: &mut Chain,
    ) -> Result<SymbolId, ()> {
        if let Some(&child) = self.tree.namespace(ns).children.get(&segment) {
            return Ok(self.tree.namespace(child).symbol);
        }

        if self.in_scope_chain(scope, ns) && self.tree.namespace(ns).locals.contains_key(&segment) {
            return self.force_binding(BindingRef::new(ns, TableKind::Local, segment), chain);
        }

        if self.tree.namespace(ns).exports.contains_key(&segment) {
            return self.force_binding(BindingRef::new(ns, TableKind::Export, segment), chain);
        }

        self.diagnostics
            .report(DiagnosticKind::UnresolvedPath, origin)
            .message(self.tree.display_member(ns, segment, self.names))
            .emit();
        Err(())
    }

    /// Whether `ns` is `scope` or one of its ancestors: the namespaces
    /// whose local tables `scope` may see.
    fn in_scope_chain(&self, scope: NamespaceId, ns: NamespaceId) -> bool {
        let mut cursor = Some(scope);
        while let Some(id) = cursor {
            if id == ns {
                return true;
            }
            cursor = self.tree.namespace(id).parent;
        }
        false
    }
}

/// Render the first `len` segments of `path`, e.g. `::C::D` for the
/// failing prefix of `::C::D::X`.
fn display_prefix(path: &Path, len: usize, names: &Interner) -> String {
    let mut out = String::new();
    if path.is_absolute() {
        out.push_str("::");
    }
    for (i, seg) in path.segments()[..len].iter().enumerate() {
        if i > 0 {
            out.push_str("::");
        }
        out.push_str(names.resolve(*seg));
    }
    out
}
