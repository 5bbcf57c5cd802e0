//! Type checking passes.
//!
//! - Declarations: alias well-formedness, method signatures and bodies
//! - Statements: environment threading, branch cloning and merging
//! - Expressions: type synthesis with per-node annotation
//! - Type annotations: well-formedness and `void` placement

pub mod decl;
pub mod expr;
pub mod stmt;
pub mod ty;

pub use decl::{check_decl, check_method_decl, check_type_decl};
pub use expr::{check_invocation, synth};
pub use stmt::{check_block, check_stmt};
pub use ty::{check_not_void, check_return_type, check_value_type};

use crate::context::Registry;
use crate::subtype::Subtyping;
use crate::types::Type;

/// Read-only state shared by every check inside one method body.
#[derive(Debug, Clone)]
pub struct Context<'a> {
    registry: &'a Registry,
    subtyping: Subtyping<'a>,
    ret: Type,
}

impl<'a> Context<'a> {
    /// A context for a body returning `void`.
    #[must_use]
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            subtyping: Subtyping::new(registry),
            ret: Type::Void,
        }
    }

    /// Sets the enclosing method's return type.
    #[must_use]
    pub fn with_return(mut self, ret: Type) -> Self {
        self.ret = ret;
        self
    }

    /// Method and alias tables.
    #[must_use]
    pub const fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Subtype relation over [`registry`](Self::registry).
    #[must_use]
    pub const fn subtyping(&self) -> &Subtyping<'a> {
        &self.subtyping
    }

    /// Declared return type of the enclosing method.
    #[must_use]
    pub const fn return_type(&self) -> &Type {
        &self.ret
    }
}
