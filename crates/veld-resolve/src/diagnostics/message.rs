use std::fmt;

use veld_core::Span;

/// Diagnostic kinds, grouped by the stage that raises them.
///
/// Ordering is by how early in the pipeline the mistake was made:
/// structural conflicts first (tree building), then resolution failures,
/// then type-reference errors. Resolution never aborts on the first of
/// these; independent declarations keep resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Structural conflicts found while building the namespace tree
    DuplicateNamespace,
    DuplicateBinding,
    DuplicateExport,

    // Path and binding resolution failures
    UnresolvedPath,
    NotANamespace,
    CyclicExport,

    // Type-reference errors
    TypeMismatch,
}

impl DiagnosticKind {
    /// Default severity for this kind. Everything the resolver reports is
    /// fatal to the unit; there are no warning-level kinds today.
    pub fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Message template. `detail` carries the offending name, path, or
    /// cycle rendering; without it the fallback text is used.
    pub fn message(&self, detail: Option<&str>) -> String {
        let Some(d) = detail else {
            return self.fallback_message().to_string();
        };
        match self {
            Self::DuplicateNamespace => format!("conflicting declarations for `{d}`"),
            Self::DuplicateBinding => format!("`{d}` is already bound in this namespace"),
            Self::DuplicateExport => format!("`{d}` is already exported from this namespace"),
            Self::UnresolvedPath => format!("cannot resolve `{d}`"),
            Self::NotANamespace => format!("`{d}` is not a namespace"),
            Self::CyclicExport => format!("binding cycle: {d}"),
            Self::TypeMismatch => format!("`{d}` is not a type"),
        }
    }

    /// Base message used when no detail is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::DuplicateNamespace => "conflicting namespace declaration",
            Self::DuplicateBinding => "duplicate binding",
            Self::DuplicateExport => "duplicate export",
            Self::UnresolvedPath => "unresolved path",
            Self::NotANamespace => "expected a namespace",
            Self::CyclicExport => "binding cycle",
            Self::TypeMismatch => "expected a type",
        }
    }

    /// Default hint, automatically included. Call sites can override with
    /// context-specific help.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::CyclicExport => {
                Some("every export chain must terminate in a concrete declaration")
            }
            Self::TypeMismatch => {
                Some("functions, globals, and namespaces cannot be used as types")
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A single diagnostic: kind, primary span, rendered message, and any
/// secondary annotations.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub span: Span,
    pub message: String,
    pub related: Vec<RelatedInfo>,
    pub hint: Option<String>,
}

impl DiagnosticMessage {
    pub fn with_default_message(kind: DiagnosticKind, span: Span) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            span,
            message: kind.message(None),
            related: Vec::new(),
            hint: kind.default_hint().map(str::to_string),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        for related in &self.related {
            write!(f, "\n  note: {}", related.message)?;
        }
        if let Some(hint) = &self.hint {
            write!(f, "\n  help: {hint}")?;
        }
        Ok(())
    }
}

/// Secondary span attached to a diagnostic.
#[derive(Debug, Clone)]
pub struct RelatedInfo {
    pub span: Span,
    pub message: String,
}

impl RelatedInfo {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }
}
