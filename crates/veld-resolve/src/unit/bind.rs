//! Binding resolution: every queued import/export target chased to a
//! terminal symbol, cycles detected along the way.
//!
//! The sweep visits every binding of every namespace; order does not
//! matter because forcing a binding recursively forces whatever it
//! depends on, and results are memoized in place. A chain of
//! `(namespace, table, name)` frames guards the recursion: revisiting a
//! frame before reaching a terminal symbol is a cycle, reported once with
//! the full chain.

use veld_core::Name;

use crate::diagnostics::DiagnosticKind;
use crate::table::{BindingState, NamespaceId, SymbolId, TableKind};

use super::Resolver;

/// Identity of one binding: which table of which namespace, under which
/// name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BindingRef {
    pub ns: NamespaceId,
    pub table: TableKind,
    pub name: Name,
}

impl BindingRef {
    pub fn new(ns: NamespaceId, table: TableKind, name: Name) -> Self {
        Self { ns, table, name }
    }
}

/// The stack of bindings currently being forced. Shared down through
/// path and type resolution so indirect cycles surface no matter how
/// many hops they take.
#[derive(Debug, Default)]
pub(crate) struct Chain {
    frames: Vec<BindingRef>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, frame: &BindingRef) -> Option<usize> {
        self.frames.iter().position(|f| f == frame)
    }

    fn push(&mut self, frame: BindingRef) {
        self.frames.push(frame);
    }

    fn pop(&mut self) {
        self.frames.pop();
    }
}

impl Resolver<'_> {
    /// Force every binding in the tree to a terminal state.
    pub(crate) fn resolve_bindings(&mut self) {
        let ids: Vec<NamespaceId> = self.tree.namespace_ids().collect();
        for ns in ids {
            for table in [TableKind::Local, TableKind::Export] {
                let names: Vec<Name> = self.tree.namespace(ns).table(table).keys().copied().collect();
                for name in names {
                    let mut chain = Chain::new();
                    let _ = self.force_binding(BindingRef::new(ns, table, name), &mut chain);
                }
            }
        }
    }

    /// Resolve one binding, recursing through its target chain. Returns
    /// the terminal symbol, or `Err` if this chain already produced a
    /// diagnostic (directly or through an earlier sweep step).
    pub(crate) fn force_binding(
        &mut self,
        at: BindingRef,
        chain: &mut Chain,
    ) -> Result<SymbolId, ()> {
        let binding = self
            .tree
            .namespace(at.ns)
            .binding(at.table, at.name)
            .expect("binding exists for its own ref")
            .clone();

        match binding.state {
            BindingState::Resolved(symbol) => Ok(symbol),
            BindingState::Failed => Err(()),
            BindingState::Path(path) => {
                if let Some(pos) = chain.position(&at) {
                    self.report_cycle(&chain.frames[pos..].to_vec(), at);
                    self.set_state(at, BindingState::Failed);
                    return Err(());
                }
                chain.push(at);
                let result = self.resolve_path(&path, at.ns, binding.span, chain);
                chain.pop();
                self.finish_binding(at, result)
            }
            BindingState::Type(expr) => {
                if let Some(pos) = chain.position(&at) {
                    self.report_cycle(&chain.frames[pos..].to_vec(), at);
                    self.set_state(at, BindingState::Failed);
                    return Err(());
                }
                chain.push(at);
                let result = self.resolve_type_expr(&expr, at.ns, chain);
                chain.pop();
                self.finish_binding(at, result)
            }
        }
    }

    fn finish_binding(&mut self, at: BindingRef, result: Result<SymbolId, ()>) -> Result<SymbolId, ()> {
        match result {
            Ok(symbol) => {
                self.set_state(at, BindingState::Resolved(symbol));
                Ok(symbol)
            }
            Err(()) => {
                self.set_state(at, BindingState::Failed);
                Err(())
            }
        }
    }

    fn set_state(&mut self, at: BindingRef, state: BindingState) {
        let binding = self
            .tree
            .namespace_mut(at.ns)
            .table_mut(at.table)
            .get_mut(&at.name)
            .expect("binding exists for its own ref");
        binding.state = state;
    }

    /// One diagnostic per cycle: the primary span is where the loop
    /// starts, related spans walk it hop by hop.
    ///
    /// A local binding and the export that re-exports it render under the
    /// same qualified name, so consecutive duplicates are collapsed before
    /// printing.
    fn report_cycle(&mut self, cycle: &[BindingRef], repeated: BindingRef) {
        let mut hops: Vec<(String, veld_core::Span)> = Vec::new();
        for frame in cycle.iter().chain(std::iter::once(&repeated)) {
            let rendered = self.tree.display_member(frame.ns, frame.name, self.names);
            let span = self
                .tree
                .namespace(frame.ns)
                .binding(frame.table, frame.name)
                .expect("binding exists for its own ref")
                .span;
            if hops.last().is_none_or(|(prev, _)| *prev != rendered) {
                hops.push((rendered, span));
            }
        }
        if hops.len() == 1 {
            // Direct self-reference; show the closing hop anyway.
            hops.push(hops[0].clone());
        }

        let detail = hops
            .iter()
            .map(|(name, _)| name.as_str())
            .collect::<Vec<_>>()
            .join(" → ");

        let mut builder = self
            .diagnostics
            .report(DiagnosticKind::CyclicExport, hops[0].1)
            .message(detail);

        for i in 0..hops.len() - 1 {
            let msg = if i + 2 == hops.len() {
                format!(
                    "`{}` refers back to `{}`, completing the cycle",
                    hops[i].0,
                    hops[i + 1].0
                )
            } else {
                format!("`{}` refers to `{}`", hops[i].0, hops[i + 1].0)
            };
            builder = builder.related_to(msg, hops[i].1);
        }

        builder.emit();
    }
}
