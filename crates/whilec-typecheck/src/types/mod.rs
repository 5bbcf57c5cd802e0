//! Type representation used by the checker.
//!
//! The checker works directly on the tree's [`Type`] values; this module
//! adds the kind vocabulary used by instance-of checks.

pub mod kind;

pub use kind::{KindSet, TypeKind};
pub use whilec_syntax::ast::{Field, Type};
