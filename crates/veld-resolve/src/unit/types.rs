//! Type-reference resolution: type aliases, struct fields, global types.
//!
//! A bare path names a type (builtin or user-defined); `^T` is
//! pointer-to-T, nesting without bound. Pointer symbols are interned per
//! pointee, so every spelling of `^s32` denotes the same symbol.

use veld_core::{TypeExpr, TypeExprKind};

use crate::diagnostics::DiagnosticKind;
use crate::table::{NamespaceId, SymbolData, SymbolId};

use super::bind::Chain;
use super::{PendingTarget, PendingType, Resolver};

impl Resolver<'_> {
    /// Resolve a type expression as seen from `scope`.
    pub(crate) fn resolve_type_expr(
        &mut self,
        expr: &TypeExpr,
        scope: NamespaceId,
        chain: &mut Chain,
    ) -> Result<SymbolId, ()> {
        match &expr.kind {
            TypeExprKind::Path(path) => {
                let symbol = self.resolve_path(path, scope, expr.span, chain)?;
                if !self.tree.symbol(symbol).data.is_type() {
                    self.diagnostics
                        .report(DiagnosticKind::TypeMismatch, expr.span)
                        .message(path.display(self.names).to_string())
                        .emit();
                    return Err(());
                }
                Ok(symbol)
            }
            TypeExprKind::Pointer(pointee) => {
                let pointee = self.resolve_type_expr(pointee, scope, chain)?;
                Ok(self.tree.intern_pointer(pointee))
            }
        }
    }

    /// Resolve the type expressions queued during building and write the
    /// results into their symbols. Failures are already reported; the
    /// affected slots simply stay unfilled and the unit fails to freeze.
    pub(crate) fn resolve_pending(&mut self, pending: Vec<PendingType>) {
        for item in pending {
            let mut chain = Chain::new();
            let Ok(resolved) = self.resolve_type_expr(&item.expr, item.ns, &mut chain) else {
                continue;
            };
            match item.target {
                PendingTarget::StructField { symbol, field } => {
                    if let SymbolData::Struct { fields, .. } = &mut self.tree.symbol_mut(symbol).data
                    {
                        fields.insert(field, Some(resolved));
                    }
                }
                PendingTarget::GlobalType { symbol } => {
                    if let SymbolData::Global { ty, .. } = &mut self.tree.symbol_mut(symbol).data {
                        *ty = Some(resolved);
                    }
                }
            }
        }
    }
}
