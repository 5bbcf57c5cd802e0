//! `whilec` Syntax: the tree consumed by the type checker.
//!
//! The lexer and parser live elsewhere; this crate only defines what they
//! produce and what later passes read back:
//!
//! - [`span`] - Source locations carried by nodes
//! - [`ast`] - Types, constants, expressions, statements and declarations
//! - [`diagnostic`] - The value handed to an external diagnostic sink
//!
//! # Examples
//!
//! ## Building a tree by hand
//!
//! ```
//! use whilec_syntax::ast::{Expr, Stmt, Type};
//!
//! // int x = 1 + 2
//! let stmt = Stmt::declare("x", Type::Int, Some(Expr::add(Expr::int(1), Expr::int(2))));
//! assert!(stmt.span.is_none());
//! ```
//!
//! ## Reading an annotation back
//!
//! ```
//! use whilec_syntax::ast::{Expr, Type};
//!
//! let expr = Expr::bool(true);
//! assert!(expr.annotate(Type::Bool));
//! assert_eq!(expr.ty(), Some(&Type::Bool));
//! ```

#![warn(missing_docs)]

pub mod ast;
pub mod diagnostic;
pub mod span;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticLevel};
pub use span::{Span, Spanned};
