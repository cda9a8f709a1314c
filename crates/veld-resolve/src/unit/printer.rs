//! Builder-pattern printer and serializable dump for resolved trees.

use std::fmt::Write;

use crate::table::{BindingState, NamespaceId, SymbolKind, TableKind};

use super::Resolved;

/// Renders a resolved tree as an indented textual dump, mainly for
/// snapshot tests and debugging.
pub struct TreePrinter<'r> {
    resolved: &'r Resolved,
    builtins: bool,
}

impl<'r> TreePrinter<'r> {
    pub fn new(resolved: &'r Resolved) -> Self {
        Self {
            resolved,
            builtins: false,
        }
    }

    /// Include the builtin `core` namespace in the output. Off by
    /// default; it is the same for every unit.
    pub fn with_builtins(mut self, value: bool) -> Self {
        self.builtins = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        self.format_namespace(w, self.resolved.root(), 0)
    }

    fn format_namespace(&self, w: &mut impl Write, ns: NamespaceId, depth: usize) -> std::fmt::Result {
        let resolved = self.resolved;
        let node = resolved.namespace(ns);

        let label = if node.parent.is_none() {
            "::".to_string()
        } else {
            resolved.names().resolve(node.name).to_string()
        };
        writeln!(w, "{}ns {}", "  ".repeat(depth), label)?;

        for table in [TableKind::Local, TableKind::Export] {
            for (name, binding) in node.table(table) {
                let BindingState::Resolved(symbol) = &binding.state else {
                    // Frozen trees only contain resolved bindings.
                    continue;
                };
                writeln!(
                    w,
                    "{}{} {} -> {}",
                    "  ".repeat(depth + 1),
                    table_label(table),
                    resolved.names().resolve(*name),
                    resolved.describe(*symbol),
                )?;
            }
        }

        for &child in node.children.values() {
            if !self.builtins && child == resolved.tree().core() {
                continue;
            }
            self.format_namespace(w, child, depth + 1)?;
        }

        Ok(())
    }
}

fn table_label(table: TableKind) -> &'static str {
    match table {
        TableKind::Local => "local",
        TableKind::Export => "export",
    }
}

/// Serializable rendering of one namespace, nested to the full tree.
#[derive(Debug, Clone, serde::Serialize)]
pub struct NamespaceDump {
    pub name: String,
    pub locals: Vec<BindingDump>,
    pub exports: Vec<BindingDump>,
    pub children: Vec<NamespaceDump>,
}

/// Serializable rendering of one resolved binding.
#[derive(Debug, Clone, serde::Serialize)]
pub struct BindingDump {
    pub name: String,
    pub kind: SymbolKind,
    pub target: String,
}

pub(super) fn dump_namespace(resolved: &Resolved, ns: NamespaceId) -> NamespaceDump {
    let node = resolved.namespace(ns);

    let collect = |table: TableKind| -> Vec<BindingDump> {
        node.table(table)
            .iter()
            .filter_map(|(name, binding)| match &binding.state {
                BindingState::Resolved(symbol) => Some(BindingDump {
                    name: resolved.names().resolve(*name).to_string(),
                    kind: resolved.symbol(*symbol).data.kind(),
                    target: resolved.describe(*symbol),
                }),
                _ => None,
            })
            .collect()
    };

    NamespaceDump {
        name: if node.parent.is_none() {
            "::".to_string()
        } else {
            resolved.names().resolve(node.name).to_string()
        },
        locals: collect(TableKind::Local),
        exports: collect(TableKind::Export),
        children: node
            .children
            .values()
            .map(|&child| dump_namespace(resolved, child))
            .collect(),
    }
}
