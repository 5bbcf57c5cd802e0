//! The While abstract syntax tree.
//!
//! Nodes are owned trees. Spans are optional so tests and tools can build
//! trees directly with the constructors on [`Expr`] and [`Stmt`].
//!
//! # Modules
//!
//! - [`ty`] - The type model
//! - [`value`] - Literal constants
//! - [`expr`] - Expression nodes
//! - [`stmt`] - Statement nodes
//! - [`decl`] - Type and method declarations

pub mod decl;
pub mod expr;
pub mod stmt;
pub mod ty;
pub mod value;

pub use decl::{Decl, MethodDecl, Parameter, TypeDecl, WhileFile};
pub use expr::{BinaryOp, Expr, ExprKind, Invocation, UnaryOp};
pub use stmt::{MatchCase, Stmt, StmtKind, SwitchCase, TypeCell, VariableDeclaration};
pub use ty::{Field, Type};
pub use value::Value;
