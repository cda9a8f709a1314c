//! Qualified paths: `::`-separated segment lists, absolute or relative.

use std::fmt;

use crate::interner::{Interner, Name};

/// A qualified path reference as written in source.
///
/// A leading `::` makes the path absolute (resolved from the root
/// namespace); otherwise it is relative to the referencing scope.
/// Paths always have at least one segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Path {
    absolute: bool,
    segments: Vec<Name>,
}

impl Path {
    /// A scope-relative path. Panics on an empty segment list.
    pub fn relative(segments: Vec<Name>) -> Self {
        assert!(!segments.is_empty(), "a path needs at least one segment");
        Self {
            absolute: false,
            segments,
        }
    }

    /// A root-anchored path (written with a leading `::`).
    pub fn absolute(segments: Vec<Name>) -> Self {
        assert!(!segments.is_empty(), "a path needs at least one segment");
        Self {
            absolute: true,
            segments,
        }
    }

    /// A single-segment relative path, i.e. a bare identifier.
    pub fn ident(name: Name) -> Self {
        Self::relative(vec![name])
    }

    #[inline]
    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    #[inline]
    pub fn segments(&self) -> &[Name] {
        &self.segments
    }

    /// Segment count; never zero.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// The final segment: the name a binding defaults to.
    #[inline]
    pub fn last(&self) -> Name {
        *self.segments.last().expect("paths are never empty")
    }

    /// Render with segment text from `names`, e.g. `::C::D::X`.
    pub fn display<'a>(&'a self, names: &'a Interner) -> PathDisplay<'a> {
        PathDisplay { path: self, names }
    }
}

/// Borrowed display adapter; paths carry interned handles, not text.
pub struct PathDisplay<'a> {
    path: &'a Path,
    names: &'a Interner,
}

impl fmt::Display for PathDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.absolute {
            write!(f, "::")?;
        }
        for (i, seg) in self.path.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "::")?;
            }
            write!(f, "{}", self.names.resolve(*seg))?;
        }
        Ok(())
    }
}
