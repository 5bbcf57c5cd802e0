//! Diagnostics handed to an external sink.
//!
//! A [`Diagnostic`] carries everything a renderer needs: severity, a stable
//! code, the message, and where it happened. Rendering source excerpts is
//! left to the sink; [`Display`](fmt::Display) only produces the headline.

use crate::span::Span;
use std::fmt;

/// A diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Diagnostic level
    pub level: DiagnosticLevel,
    /// Error code (e.g., "E0001")
    pub code: Option<String>,
    /// Primary message
    pub message: String,
    /// Source file, if known
    pub file: Option<String>,
    /// Source span, if known
    pub span: Option<Span>,
    /// Related notes
    pub notes: Vec<String>,
}

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    /// Error in the checked program
    Error,
    /// Defect in the tool or in whatever produced the tree
    Bug,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Bug => write!(f, "internal compiler error"),
        }
    }
}

impl Diagnostic {
    /// Starts an error diagnostic.
    #[must_use]
    pub fn error(message: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder::new(DiagnosticLevel::Error, message)
    }

    /// Starts a diagnostic reporting a tool defect.
    #[must_use]
    pub fn bug(message: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder::new(DiagnosticLevel::Bug, message)
    }

    /// Returns `true` if this diagnostic reports a tool defect.
    #[must_use]
    pub fn is_bug(&self) -> bool {
        self.level == DiagnosticLevel::Bug
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.span) {
            (Some(file), Some(span)) => write!(f, "{file}:{span}: ")?,
            (Some(file), None) => write!(f, "{file}: ")?,
            (None, Some(span)) => write!(f, "{span}: ")?,
            (None, None) => {}
        }
        write!(f, "{}", self.level)?;
        if let Some(code) = &self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

/// Builder for creating diagnostics.
pub struct DiagnosticBuilder {
    diagnostic: Diagnostic,
}

impl DiagnosticBuilder {
    /// Creates a new diagnostic builder.
    #[must_use]
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            diagnostic: Diagnostic {
                level,
                code: None,
                message: message.into(),
                file: None,
                span: None,
                notes: Vec::new(),
            },
        }
    }

    /// Adds an error code to the diagnostic.
    #[must_use]
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.diagnostic.code = Some(code.into());
        self
    }

    /// Sets the source file.
    #[must_use]
    pub fn file(mut self, file: Option<String>) -> Self {
        self.diagnostic.file = file;
        self
    }

    /// Sets the source span.
    #[must_use]
    pub fn span(mut self, span: Option<Span>) -> Self {
        self.diagnostic.span = span;
        self
    }

    /// Adds a note to the diagnostic.
    #[must_use]
    pub fn note(mut self, message: impl Into<String>) -> Self {
        self.diagnostic.notes.push(message.into());
        self
    }

    /// Builds the diagnostic.
    #[must_use]
    pub fn build(self) -> Diagnostic {
        self.diagnostic
    }
}
