//! Type checking errors.
//!
//! Every check returns [`Result`]; the first error aborts the declaration
//! being checked. A [`TypeError`] becomes a [`Diagnostic`] at the driver
//! boundary, where the file name is known.

use crate::types::{KindSet, Type};
use whilec_syntax::{Diagnostic, Span};

/// Result alias used throughout the checker.
pub type Result<T> = std::result::Result<T, TypeError>;

/// A type error with the location it was raised at.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct TypeError {
    /// What went wrong
    pub kind: TypeErrorKind,
    /// Span of the offending node, if it has one
    pub span: Option<Span>,
}

/// The kinds of type error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeErrorKind {
    /// A variable was used without being declared.
    #[error("unknown variable `{name}`")]
    UndeclaredVariable {
        /// Variable name
        name: String,
    },

    /// A name was declared twice in the same scope.
    #[error("`{name}` is already declared")]
    DuplicateDeclaration {
        /// The repeated name
        name: String,
    },

    /// A value's type is not a subtype of the required type.
    #[error("expected type {expected}, found {found}")]
    TypeMismatch {
        /// Required supertype
        expected: Type,
        /// Type that was found
        found: Type,
    },

    /// An operand has the wrong outer shape.
    #[error("expected instance of {expected}, found {found}")]
    NotInstanceOf {
        /// Accepted kinds
        expected: KindSet,
        /// Type that was found
        found: Type,
    },

    /// A call passes the wrong number of arguments.
    #[error("method `{name}` expects {expected} argument(s), found {found}")]
    ArityMismatch {
        /// Called method
        name: String,
        /// Declared parameter count
        expected: usize,
        /// Supplied argument count
        found: usize,
    },

    /// A record (or every record of a union) lacks the accessed field.
    #[error("type {ty} has no field `{field}`")]
    UnknownField {
        /// Accessed field
        field: String,
        /// Type of the accessed value
        ty: Type,
    },

    /// A type alias is not declared.
    #[error("unknown type `{name}`")]
    UnknownType {
        /// Alias name
        name: String,
    },

    /// A called method is not declared.
    #[error("unknown method `{name}`")]
    UnknownMethod {
        /// Method name
        name: String,
    },

    /// `void` appears where a value type is required.
    #[error("void type not permitted here")]
    VoidNotPermitted,

    /// An inferred declaration's type slot was already filled.
    #[error("inferred variable `{name}` has a type before being declared")]
    InferredSlotResolved {
        /// Variable name
        name: String,
    },

    /// An alias is defined in terms of itself without an array or record in between.
    #[error("type `{name}` is defined in terms of itself")]
    CyclicType {
        /// Alias name where the cycle was found
        name: String,
    },

    /// The tree contains something the checker cannot handle.
    #[error("internal failure: {message}")]
    InternalFailure {
        /// Description of the defect
        message: String,
    },
}

impl TypeErrorKind {
    /// Stable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UndeclaredVariable { .. } => "E0001",
            Self::DuplicateDeclaration { .. } => "E0002",
            Self::TypeMismatch { .. } => "E0003",
            Self::NotInstanceOf { .. } => "E0004",
            Self::ArityMismatch { .. } => "E0005",
            Self::UnknownField { .. } => "E0006",
            Self::UnknownType { .. } => "E0007",
            Self::UnknownMethod { .. } => "E0008",
            Self::VoidNotPermitted => "E0009",
            Self::InferredSlotResolved { .. } => "E0010",
            Self::CyclicType { .. } => "E0011",
            Self::InternalFailure { .. } => "E0012",
        }
    }

    /// Attaches a span.
    #[must_use]
    pub fn at(self, span: Option<Span>) -> TypeError {
        TypeError { kind: self, span }
    }
}

impl TypeError {
    /// Creates an error.
    #[must_use]
    pub const fn new(kind: TypeErrorKind, span: Option<Span>) -> Self {
        Self { kind, span }
    }

    /// `TypeMismatch` at `span`.
    #[must_use]
    pub fn mismatch(expected: &Type, found: &Type, span: Option<Span>) -> Self {
        TypeErrorKind::TypeMismatch {
            expected: expected.clone(),
            found: found.clone(),
        }
        .at(span)
    }

    /// `InternalFailure` at `span`.
    #[must_use]
    pub fn internal(message: impl Into<String>, span: Option<Span>) -> Self {
        TypeErrorKind::InternalFailure {
            message: message.into(),
        }
        .at(span)
    }

    /// Fills in `span` if the error has none yet.
    #[must_use]
    pub fn or_at(mut self, span: Option<Span>) -> Self {
        self.span = self.span.or(span);
        self
    }

    /// Stable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Returns `true` for defects in the tree rather than in the program.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self.kind, TypeErrorKind::InternalFailure { .. })
    }

    /// Converts to a diagnostic for `file`.
    ///
    /// Internal failures are reported at [`DiagnosticLevel::Bug`](whilec_syntax::DiagnosticLevel::Bug).
    #[must_use]
    pub fn to_diagnostic(&self, file: Option<&str>) -> Diagnostic {
        let builder = if self.is_internal() {
            Diagnostic::bug(self.kind.to_string())
                .note("the syntax tree handed to the checker is malformed")
        } else {
            Diagnostic::error(self.kind.to_string())
        };
        builder
            .code(self.code())
            .file(file.map(str::to_string))
            .span(self.span)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use whilec_syntax::DiagnosticLevel;

    #[test]
    fn test_messages() {
        let err = TypeError::mismatch(&Type::Int, &Type::Bool, None);
        assert_eq!(err.to_string(), "expected type int, found bool");

        let err = TypeErrorKind::NotInstanceOf {
            expected: KindSet::SEQUENCE,
            found: Type::Int,
        };
        assert_eq!(err.to_string(), "expected instance of string or array, found int");
    }

    #[test]
    fn test_to_diagnostic() {
        let err = TypeErrorKind::UndeclaredVariable {
            name: "y".to_string(),
        }
        .at(Some(Span::new(5, 6)));
        let diag = err.to_diagnostic(Some("t.while"));
        assert_eq!(diag.level, DiagnosticLevel::Error);
        assert_eq!(diag.to_string(), "t.while:5..6: error[E0001]: unknown variable `y`");
    }

    #[test]
    fn test_or_at_keeps_existing_span() {
        let unplaced = TypeErrorKind::VoidNotPermitted.at(None);
        assert_eq!(unplaced.or_at(Some(Span::new(3, 4))).span, Some(Span::new(3, 4)));

        let placed = TypeErrorKind::VoidNotPermitted.at(Some(Span::new(1, 2)));
        assert_eq!(placed.or_at(Some(Span::new(3, 4))).span, Some(Span::new(1, 2)));
    }

    #[test]
    fn test_internal_failure_is_a_bug() {
        let diag = TypeError::internal("bad assignment target", None).to_diagnostic(None);
        assert!(diag.is_bug());
        assert_eq!(diag.code.as_deref(), Some("E0012"));
        assert_eq!(diag.notes.len(), 1);
    }
}
