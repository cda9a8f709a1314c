//! The builtin `core` namespace.
//!
//! Seeded into every tree before any user declaration exists and immutable
//! afterwards. Builtins are ordinary export bindings, so `core::s32` is an
//! ordinary absolute-path lookup, with no special casing in the resolver.

use veld_core::{Interner, Span};

use super::{Binding, BindingState, NamespaceId, NamespaceTree, SymbolData};

/// Primitive type names provided by `core`, in seeding order.
///
/// Seeding order is fixed so builtin symbol ids are stable across
/// compilation units.
pub const BUILTIN_TYPES: &[&str] = &[
    "bool", "void", "s8", "s16", "s32", "s64", "u8", "u16", "u32", "u64", "f32", "f64",
];

/// Create `core` under the root and populate its export table.
pub(super) fn seed(tree: &mut NamespaceTree, names: &mut Interner) -> NamespaceId {
    let core_name = tree.core_name();
    let core = tree.alloc_namespace(core_name, Some(tree.root()), Span::at(0));

    for ty in BUILTIN_TYPES {
        let name = names.intern(ty);
        let symbol = tree.alloc_symbol(SymbolData::Primitive(name));
        tree.namespace_mut(core)
            .exports
            .insert(name, Binding::new(BindingState::Resolved(symbol), Span::at(0)));
    }

    core
}
