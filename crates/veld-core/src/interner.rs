//! String interning for identifier deduplication and comparison.
//!
//! The parser interns every identifier it sees; the resolver never touches
//! string contents again except to render diagnostics. Comparing two `Name`s
//! is O(1) integer comparison, and name tables key on the handle.

use std::collections::HashMap;

/// A lightweight handle to an interned identifier.
///
/// Comparing two names is O(1). Names are ordered by insertion order,
/// not lexicographically — use `Interner::resolve` if you need the text.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
pub struct Name(u32);

impl Name {
    /// Raw index for serialization/debugging.
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Create a Name from a raw index. Use only for deserialization.
    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }
}

impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Name {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

/// Identifier interner. Deduplicates strings and returns cheap `Name` handles.
#[derive(Debug, Clone, Default)]
pub struct Interner {
    /// Map from string to name for deduplication.
    map: HashMap<String, Name>,
    /// Storage for interned strings, indexed by Name.
    strings: Vec<String>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning its Name.
    /// If the string was already interned, returns the existing Name.
    pub fn intern(&mut self, s: &str) -> Name {
        if let Some(&name) = self.map.get(s) {
            return name;
        }

        let name = Name(self.strings.len() as u32);
        self.strings.push(s.to_owned());
        self.map.insert(s.to_owned(), name);
        name
    }

    /// Intern an owned string, avoiding a clone if not already present.
    pub fn intern_owned(&mut self, s: String) -> Name {
        if let Some(&name) = self.map.get(&s) {
            return name;
        }

        let name = Name(self.strings.len() as u32);
        self.strings.push(s.clone());
        self.map.insert(s, name);
        name
    }

    /// Look up an already-interned string without inserting it.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.map.get(s).copied()
    }

    /// Resolve a Name back to its string.
    ///
    /// # Panics
    /// Panics if the name was not created by this interner.
    #[inline]
    pub fn resolve(&self, name: Name) -> &str {
        &self.strings[name.0 as usize]
    }

    /// Try to resolve a Name, returning None if invalid.
    #[inline]
    pub fn try_resolve(&self, name: Name) -> Option<&str> {
        self.strings.get(name.0 as usize).map(|s| s.as_str())
    }

    /// Number of interned strings.
    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Whether the interner is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Iterate over all interned strings with their names.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (Name, &str)> {
        self.strings
            .iter()
            .enumerate()
            .map(|(i, s)| (Name(i as u32), s.as_str()))
    }
}
