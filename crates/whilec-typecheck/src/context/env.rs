//! Scope environment for method bodies.
//!
//! An [`Environment`] maps each variable in scope to a [`Binding`]: the
//! type it was declared with and the type it currently holds. The two only
//! differ for variables introduced by `var x = e`, whose declared type stays
//! [`Type::Inferred`] and whose current type follows assignments.
//!
//! Branching statements clone the environment. After an `if`/`else` both
//! arms are merged back into the parent with [`Environment::merge`].
//!
//! # Example
//!
//! ```
//! use whilec_typecheck::context::{Environment, Registry};
//! use whilec_typecheck::subtype::Subtyping;
//! use whilec_typecheck::types::Type;
//!
//! let registry = Registry::default();
//! let subtyping = Subtyping::new(&registry);
//!
//! let mut env = Environment::new();
//! env.declare_inferred("x", Type::Int);
//!
//! let mut left = env.clone();
//! let mut right = env.clone();
//! left.refine("x", Type::Int);
//! right.refine("x", Type::Bool);
//!
//! env.merge(&left, &right, &subtyping).unwrap();
//! assert_eq!(env.get("x"), Some(&Type::union([Type::Int, Type::Bool])));
//! ```

use crate::error::Result;
use crate::subtype::Subtyping;
use crate::types::Type;
use fxhash::FxHashMap;
use whilec_log::trace;

/// What the environment knows about one variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// Type written at the declaration, `Inferred` for `var`
    pub declared: Type,
    /// Type the variable currently holds
    pub ty: Type,
}

/// Variables in scope at one point of a method body.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    bindings: FxHashMap<String, Binding>,
}

impl Environment {
    /// An empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current type of `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Type> {
        self.bindings.get(name).map(|b| &b.ty)
    }

    /// Declared type of `name`.
    #[must_use]
    pub fn declared(&self, name: &str) -> Option<&Type> {
        self.bindings.get(name).map(|b| &b.declared)
    }

    /// Returns `true` if `name` is in scope.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Binds `name` with a fixed type.
    pub fn put(&mut self, name: impl Into<String>, ty: Type) {
        self.bindings.insert(
            name.into(),
            Binding {
                declared: ty.clone(),
                ty,
            },
        );
    }

    /// Binds `name` as an inferred variable currently holding `ty`.
    pub fn declare_inferred(&mut self, name: impl Into<String>, ty: Type) {
        self.bindings.insert(
            name.into(),
            Binding {
                declared: Type::Inferred,
                ty,
            },
        );
    }

    /// Rebinds an inferred variable to `ty`.
    ///
    /// Returns `false` and changes nothing if `name` is not in scope or was
    /// declared with an explicit type.
    pub fn refine(&mut self, name: &str, ty: Type) -> bool {
        match self.bindings.get_mut(name) {
            Some(binding) if binding.declared.is_inferred() => {
                trace!("refine `{}`: {} -> {}", name, binding.ty, ty);
                binding.ty = ty;
                true
            }
            _ => false,
        }
    }

    /// Joins the two arms of a branch back into this (parent) environment.
    ///
    /// Only variables declared as `Inferred` in the parent and present in
    /// both arms are updated. Equivalent types keep the left one, otherwise
    /// the supertype wins, and unrelated types become their union. Variables
    /// with explicit types and variables local to an arm are left alone.
    ///
    /// # Errors
    ///
    /// `UnknownType`, without a span, if comparing the arms meets an
    /// undeclared alias.
    pub fn merge(
        &mut self,
        left: &Environment,
        right: &Environment,
        subtyping: &Subtyping<'_>,
    ) -> Result<()> {
        for (name, binding) in &mut self.bindings {
            if !binding.declared.is_inferred() {
                continue;
            }
            let (Some(lt), Some(rt)) = (left.get(name), right.get(name)) else {
                continue;
            };

            let merged = if subtyping.equivalent(lt, rt)? || subtyping.is_subtype(lt, rt)? {
                lt.clone()
            } else if subtyping.is_subtype(rt, lt)? {
                rt.clone()
            } else {
                Type::union([lt.clone(), rt.clone()])
            };

            trace!("merge `{}`: {} / {} => {}", name, lt, rt, merged);
            binding.ty = merged;
        }
        Ok(())
    }

    /// Number of variables in scope.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if nothing is in scope.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Registry;

    #[test]
    fn test_put_and_get() {
        let mut env = Environment::new();
        assert!(env.is_empty());
        env.put("x", Type::Int);
        assert!(env.contains("x"));
        assert_eq!(env.get("x"), Some(&Type::Int));
        assert_eq!(env.declared("x"), Some(&Type::Int));
        assert_eq!(env.get("y"), None);
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_refine_only_inferred() {
        let mut env = Environment::new();
        env.put("fixed", Type::Int);
        env.declare_inferred("flow", Type::Int);

        assert!(!env.refine("fixed", Type::Bool));
        assert_eq!(env.get("fixed"), Some(&Type::Int));

        assert!(env.refine("flow", Type::Bool));
        assert_eq!(env.get("flow"), Some(&Type::Bool));
        assert_eq!(env.declared("flow"), Some(&Type::Inferred));

        assert!(!env.refine("missing", Type::Bool));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut env = Environment::new();
        env.declare_inferred("x", Type::Int);
        let mut child = env.clone();
        child.refine("x", Type::Bool);
        child.put("y", Type::Char);
        assert_eq!(env.get("x"), Some(&Type::Int));
        assert!(!env.contains("y"));
    }

    #[test]
    fn test_merge_keeps_supertype() {
        let registry = Registry::default();
        let subtyping = Subtyping::new(&registry);
        let wide = Type::record([(Type::Int, "x")]);
        let narrow = Type::record([(Type::Int, "x"), (Type::Bool, "y")]);

        let mut env = Environment::new();
        env.declare_inferred("r", narrow.clone());
        let mut left = env.clone();
        let right = env.clone();
        left.refine("r", wide.clone());

        env.merge(&left, &right, &subtyping).unwrap();
        assert_eq!(env.get("r"), Some(&wide));

        // Symmetric case: the wider type on the right also wins.
        let mut env = Environment::new();
        env.declare_inferred("r", narrow.clone());
        let left = env.clone();
        let mut right = env.clone();
        right.refine("r", wide.clone());
        env.merge(&left, &right, &subtyping).unwrap();
        assert_eq!(env.get("r"), Some(&wide));
    }

    #[test]
    fn test_merge_flattens_unions() {
        let registry = Registry::default();
        let subtyping = Subtyping::new(&registry);

        let mut env = Environment::new();
        env.declare_inferred("x", Type::Int);
        let mut left = env.clone();
        let mut right = env.clone();
        left.refine("x", Type::union([Type::Int, Type::Char]));
        right.refine("x", Type::union([Type::Bool, Type::String]));

        env.merge(&left, &right, &subtyping).unwrap();
        assert_eq!(
            env.get("x"),
            Some(&Type::union([Type::Int, Type::Char, Type::Bool, Type::String]))
        );
    }

    #[test]
    fn test_merge_ignores_explicit_and_branch_locals() {
        let registry = Registry::default();
        let subtyping = Subtyping::new(&registry);

        let mut env = Environment::new();
        env.put("x", Type::union([Type::Int, Type::Bool]));
        let mut left = env.clone();
        let mut right = env.clone();
        left.put("x", Type::Int);
        right.put("x", Type::Bool);
        left.declare_inferred("tmp", Type::Int);
        right.declare_inferred("tmp", Type::Bool);

        env.merge(&left, &right, &subtyping).unwrap();
        assert_eq!(env.get("x"), Some(&Type::union([Type::Int, Type::Bool])));
        assert!(!env.contains("tmp"));
    }

    #[test]
    fn test_merge_reports_unknown_alias() {
        let registry = Registry::default();
        let subtyping = Subtyping::new(&registry);

        let mut env = Environment::new();
        env.declare_inferred("x", Type::Int);
        let mut left = env.clone();
        let right = env.clone();
        left.refine("x", Type::named("Ghost"));

        let err = env.merge(&left, &right, &subtyping).unwrap_err();
        assert_eq!(err.code(), "E0007");
        assert_eq!(env.get("x"), Some(&Type::Int));
    }
}
