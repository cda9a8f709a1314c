//! The namespace tree and symbol arena.
//!
//! Namespaces and symbols live in flat vectors owned by [`NamespaceTree`]
//! and reference each other through `u32` id newtypes. Parent links are
//! plain ids used for lookup only, so the inevitable cycles in the
//! namespace/alias graph cost nothing to own. Bindings start out
//! unresolved and are mutated in place by the resolution passes; nothing
//! is ever deleted mid-resolution.

mod builtins;


use std::collections::HashMap;

use indexmap::IndexMap;

use veld_core::{Interner, Literal, Name, Span, TypeExpr};

pub use builtins::BUILTIN_TYPES;

/// Id of a namespace node in the tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamespaceId(u32);

impl NamespaceId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Id of a symbol in the tree's arena. Symbol identity *is* this id:
/// two paths denote the same entity exactly when they resolve to equal
/// `SymbolId`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(u32);

impl SymbolId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Which of a namespace's two name tables a binding lives in.
/// The tables are independent name spaces: a name may be bound locally
/// and exported under the same or a different name simultaneously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Local,
    Export,
}

impl TableKind {
    pub fn describe(self) -> &'static str {
        match self {
            TableKind::Local => "local binding",
            TableKind::Export => "export",
        }
    }
}

/// One named scope: child namespaces plus the local and export tables.
#[derive(Debug, Clone)]
pub struct Namespace {
    pub name: Name,
    /// Back-reference for lexical lookup; never owning. `None` only for
    /// the root.
    pub parent: Option<NamespaceId>,
    /// The namespace's own identity symbol (`SymbolData::Namespace`).
    pub symbol: SymbolId,
    /// Where the first block declaring this namespace starts; diagnostics
    /// only.
    pub span: Span,
    pub children: IndexMap<Name, NamespaceId>,
    pub locals: IndexMap<Name, Binding>,
    pub exports: IndexMap<Name, Binding>,
}

impl Namespace {
    pub fn table(&self, kind: TableKind) -> &IndexMap<Name, Binding> {
        match kind {
            TableKind::Local => &self.locals,
            TableKind::Export => &self.exports,
        }
    }

    pub fn table_mut(&mut self, kind: TableKind) -> &mut IndexMap<Name, Binding> {
        match kind {
            TableKind::Local => &mut self.locals,
            TableKind::Export => &mut self.exports,
        }
    }

    pub fn binding(&self, kind: TableKind, name: Name) -> Option<&Binding> {
        self.table(kind).get(&name)
    }
}

/// A named entry in a local or export table.
#[derive(Debug, Clone)]
pub struct Binding {
    pub state: BindingState,
    /// Where the binding was declared; diagnostics only.
    pub span: Span,
}

impl Binding {
    pub fn new(state: BindingState, span: Span) -> Self {
        Self { state, span }
    }
}

/// Resolution state machine for a binding. Built as `Path`/`Type`,
/// rewritten in place to `Resolved` (or `Failed`) by the passes.
#[derive(Debug, Clone)]
pub enum BindingState {
    /// Deferred path target, resolved relative to the owning namespace.
    Path(veld_core::Path),
    /// Deferred type expression (type aliases).
    Type(TypeExpr),
    Resolved(SymbolId),
    /// The target chain already produced a diagnostic; dependents fail
    /// silently instead of cascading.
    Failed,
}

impl BindingState {
    pub fn is_resolved(&self) -> bool {
        matches!(self, BindingState::Resolved(_))
    }
}

/// A resolved entity. Identity is the arena id; the payload describes
/// what the entity is.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub data: SymbolData,
}

#[derive(Debug, Clone)]
pub enum SymbolData {
    /// A namespace's identity, so namespaces can be imported, re-exported,
    /// and looked up exactly like any other symbol.
    Namespace(NamespaceId),
    /// A builtin primitive type such as `s32`.
    Primitive(Name),
    /// Pointer-to-pointee. Interned per pointee, see
    /// [`NamespaceTree::intern_pointer`].
    Pointer(SymbolId),
    /// A struct type. Field order is declaration order. Field types are
    /// `None` until the type pass fills them in; a successfully frozen
    /// table contains no `None` entries.
    Struct {
        name: Name,
        fields: IndexMap<Name, Option<SymbolId>>,
    },
    /// A function; the signature is opaque to resolution.
    Function { name: Name },
    /// A global variable. `ty` is `None` until the type pass runs.
    Global {
        name: Name,
        ty: Option<SymbolId>,
        init: Option<Literal>,
    },
}

/// Coarse classification of a symbol, the granularity downstream
/// collaborators care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum SymbolKind {
    Namespace,
    Type,
    StructType,
    Function,
    Global,
}

impl SymbolData {
    pub fn kind(&self) -> SymbolKind {
        match self {
            SymbolData::Namespace(_) => SymbolKind::Namespace,
            SymbolData::Primitive(_) | SymbolData::Pointer(_) => SymbolKind::Type,
            SymbolData::Struct { .. } => SymbolKind::StructType,
            SymbolData::Function { .. } => SymbolKind::Function,
            SymbolData::Global { .. } => SymbolKind::Global,
        }
    }

    /// Whether this symbol may appear where a type is required.
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            SymbolData::Primitive(_) | SymbolData::Pointer(_) | SymbolData::Struct { .. }
        )
    }

    /// The namespace behind a namespace symbol, if any.
    pub fn as_namespace(&self) -> Option<NamespaceId> {
        match self {
            SymbolData::Namespace(id) => Some(*id),
            _ => None,
        }
    }
}

/// Arena-owned namespace tree plus symbol storage for one compilation
/// unit. Seeded with the builtin `core` namespace before any user
/// declaration exists; `core` is never touched again.
#[derive(Debug, Clone)]
pub struct NamespaceTree {
    namespaces: Vec<Namespace>,
    symbols: Vec<Symbol>,
    /// pointee -> pointer-symbol memo, so `^T` denotes one symbol per T.
    pointer_types: HashMap<SymbolId, SymbolId>,
    root: NamespaceId,
    core: NamespaceId,
    core_name: Name,
}

impl NamespaceTree {
    /// Build an empty tree: a root namespace containing the frozen builtin
    /// `core` namespace.
    pub fn new(names: &mut Interner) -> Self {
        let root_name = names.intern("");
        let core_name = names.intern("core");

        let mut tree = Self {
            namespaces: Vec::new(),
            symbols: Vec::new(),
            pointer_types: HashMap::new(),
            root: NamespaceId(0),
            core: NamespaceId(0),
            core_name,
        };

        let root = tree.alloc_namespace(root_name, None, Span::at(0));
        debug_assert_eq!(root, tree.root);
        tree.core = builtins::seed(&mut tree, names);
        tree
    }

    #[inline]
    pub fn root(&self) -> NamespaceId {
        self.root
    }

    /// The builtin namespace holding primitive types.
    #[inline]
    pub fn core(&self) -> NamespaceId {
        self.core
    }

    /// The reserved name `core`.
    #[inline]
    pub fn core_name(&self) -> Name {
        self.core_name
    }

    pub fn namespace(&self, id: NamespaceId) -> &Namespace {
        &self.namespaces[id.index()]
    }

    pub fn namespace_mut(&mut self, id: NamespaceId) -> &mut Namespace {
        &mut self.namespaces[id.index()]
    }

    pub fn namespace_count(&self) -> usize {
        self.namespaces.len()
    }

    pub fn namespace_ids(&self) -> impl Iterator<Item = NamespaceId> {
        (0..self.namespaces.len() as u32).map(NamespaceId)
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    pub fn symbol_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.index()]
    }

    pub fn alloc_symbol(&mut self, data: SymbolData) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(Symbol { data });
        id
    }

    /// Create a namespace node together with its identity symbol and
    /// register it under its parent.
    pub fn alloc_namespace(
        &mut self,
        name: Name,
        parent: Option<NamespaceId>,
        span: Span,
    ) -> NamespaceId {
        let id = NamespaceId(self.namespaces.len() as u32);
        let symbol = self.alloc_symbol(SymbolData::Namespace(id));
        self.namespaces.push(Namespace {
            name,
            parent,
            symbol,
            span,
            children: IndexMap::new(),
            locals: IndexMap::new(),
            exports: IndexMap::new(),
        });
        if let Some(parent) = parent {
            self.namespace_mut(parent).children.insert(name, id);
        }
        id
    }

    /// The pointer-to-`pointee` type symbol, created on first use.
    /// Repeated requests for the same pointee return the same symbol.
    pub fn intern_pointer(&mut self, pointee: SymbolId) -> SymbolId {
        if let Some(&ptr) = self.pointer_types.get(&pointee) {
            return ptr;
        }
        let ptr = self.alloc_symbol(SymbolData::Pointer(pointee));
        self.pointer_types.insert(pointee, ptr);
        ptr
    }

    /// Segment names from the root down to `ns`. Empty for the root.
    pub fn path_of(&self, ns: NamespaceId) -> Vec<Name> {
        let mut segments = Vec::new();
        let mut cursor = Some(ns);
        while let Some(id) = cursor {
            let node = self.namespace(id);
            if node.parent.is_some() {
                segments.push(node.name);
            }
            cursor = node.parent;
        }
        segments.reverse();
        segments
    }

    /// Render `ns`'s absolute path, e.g. `::C::D`; `::` for the root.
    pub fn display_path(&self, ns: NamespaceId, names: &Interner) -> String {
        let segments = self.path_of(ns);
        if segments.is_empty() {
            return "::".to_string();
        }
        let mut out = String::new();
        for seg in segments {
            out.push_str("::");
            out.push_str(names.resolve(seg));
        }
        out
    }

    /// Render a binding's qualified name, e.g. `::C::D::X`.
    pub fn display_member(&self, ns: NamespaceId, name: Name, names: &Interner) -> String {
        let prefix = self.display_path(ns, names);
        if prefix == "::" {
            format!("::{}", names.resolve(name))
        } else {
            format!("{prefix}::{}", names.resolve(name))
        }
    }

    /// Human description of a symbol for diagnostics and dumps.
    pub fn describe_symbol(&self, id: SymbolId, names: &Interner) -> String {
        match &self.symbol(id).data {
            SymbolData::Namespace(ns) => format!("ns {}", self.display_path(*ns, names)),
            SymbolData::Primitive(name) => names.resolve(*name).to_string(),
            SymbolData::Pointer(pointee) => format!("^{}", self.describe_symbol(*pointee, names)),
            SymbolData::Struct { name, .. } => format!("struct {}", names.resolve(*name)),
            SymbolData::Function { name } => format!("fn {}", names.resolve(*name)),
            SymbolData::Global { name, .. } => format!("global {}", names.resolve(*name)),
        }
    }
}
