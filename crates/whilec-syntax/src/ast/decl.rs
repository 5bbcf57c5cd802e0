//! Top-level declarations.

use super::{Stmt, Type};
use crate::span::{Span, Spanned};

/// A parsed While source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WhileFile {
    /// Source file name used in diagnostics
    pub filename: Option<String>,
    /// Declarations in source order
    pub declarations: Vec<Decl>,
}

impl WhileFile {
    /// Creates a file from its declarations.
    #[must_use]
    pub fn new(declarations: Vec<Decl>) -> Self {
        Self {
            filename: None,
            declarations,
        }
    }

    /// Sets the file name reported in diagnostics.
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Type declarations in source order.
    pub fn type_decls(&self) -> impl Iterator<Item = &TypeDecl> {
        self.declarations.iter().filter_map(|decl| match decl {
            Decl::Type(td) => Some(td),
            Decl::Method(_) => None,
        })
    }

    /// Method declarations in source order.
    pub fn method_decls(&self) -> impl Iterator<Item = &MethodDecl> {
        self.declarations.iter().filter_map(|decl| match decl {
            Decl::Method(md) => Some(md),
            Decl::Type(_) => None,
        })
    }
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    /// `type Name is T`
    Type(TypeDecl),
    /// `T name(params) { body }`
    Method(MethodDecl),
}

impl Decl {
    /// The declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Decl::Type(td) => &td.name,
            Decl::Method(md) => &md.name,
        }
    }
}

/// `type Name is T`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    /// Alias name
    pub name: String,
    /// Defining type
    pub ty: Type,
    /// Source location
    pub span: Option<Span>,
}

impl TypeDecl {
    /// Creates a type declaration without a span.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            span: None,
        }
    }
}

/// `ret name(params) { body }`
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    /// Method name
    pub name: String,
    /// Parameters in declaration order
    pub params: Vec<Parameter>,
    /// Declared return type, `void` for none
    pub ret: Type,
    /// Method body
    pub body: Vec<Stmt>,
    /// Source location
    pub span: Option<Span>,
}

impl MethodDecl {
    /// Creates a method declaration without a span.
    #[must_use]
    pub fn new(name: impl Into<String>, params: Vec<Parameter>, ret: Type, body: Vec<Stmt>) -> Self {
        Self {
            name: name.into(),
            params,
            ret,
            body,
            span: None,
        }
    }
}

/// A method parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Parameter type
    pub ty: Type,
    /// Source location
    pub span: Option<Span>,
}

impl Parameter {
    /// Creates a parameter without a span.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            span: None,
        }
    }
}

impl Spanned for Decl {
    fn span(&self) -> Option<Span> {
        match self {
            Decl::Type(td) => td.span,
            Decl::Method(md) => md.span,
        }
    }
}

impl Spanned for TypeDecl {
    fn span(&self) -> Option<Span> {
        self.span
    }
}

impl Spanned for MethodDecl {
    fn span(&self) -> Option<Span> {
        self.span
    }
}

impl Spanned for Parameter {
    fn span(&self) -> Option<Span> {
        self.span
    }
}
