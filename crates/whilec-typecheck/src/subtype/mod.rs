//! The subtype relation and the checks built on it.
//!
//! [`Subtyping`] answers `is_subtype(super, sub)`: may a value of type `sub`
//! be used where `super` is expected. The relation is structural:
//!
//! - `void` as the subtype is accepted everywhere; it seeds LUB folds
//! - primitives only match themselves, there is no coercion
//! - arrays are covariant (While has value semantics)
//! - records use width subtyping: the supertype's fields are a prefix of the
//!   subtype's, same names in the same order, with subtype-compatible types
//! - aliases are expanded on demand; equal names match without expanding
//! - a union supertype needs one member to accept the subtype, a union
//!   subtype needs every member accepted, and a union against a union needs
//!   every member of the subtype covered by some member of the supertype
//!
//! Least upper bounds live in [`lub`] and record intersection in
//! [`intersect`].

pub mod intersect;
pub mod lub;

use crate::context::Registry;
use crate::error::{Result, TypeError, TypeErrorKind};
use crate::types::{KindSet, Type};
use whilec_syntax::Span;

/// Subtype queries against a fixed alias registry.
#[derive(Debug, Clone, Copy)]
pub struct Subtyping<'a> {
    registry: &'a Registry,
}

impl<'a> Subtyping<'a> {
    /// Creates the relation for `registry`.
    #[must_use]
    pub const fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// The alias registry used for expansion.
    #[must_use]
    pub const fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Returns `true` if `sub` may be used where `sup` is expected.
    ///
    /// ```
    /// use whilec_typecheck::context::Registry;
    /// use whilec_typecheck::subtype::Subtyping;
    /// use whilec_typecheck::types::Type;
    ///
    /// let registry = Registry::default();
    /// let subtyping = Subtyping::new(&registry);
    ///
    /// let either = Type::union([Type::Int, Type::Bool]);
    /// assert_eq!(subtyping.is_subtype(&either, &Type::Int), Ok(true));
    /// assert_eq!(subtyping.is_subtype(&Type::Int, &either), Ok(false));
    /// ```
    ///
    /// # Errors
    ///
    /// `UnknownType`, without a span, when an alias that has to be expanded
    /// is not declared.
    pub fn is_subtype(&self, sup: &Type, sub: &Type) -> Result<bool> {
        self.subtype(sup, sub, &mut Vec::new())
    }

    /// `assumed` holds alias comparisons already in progress. Meeting one
    /// again means the types are recursive through an array or record and
    /// agree so far.
    fn subtype(&self, sup: &Type, sub: &Type, assumed: &mut Vec<(Type, Type)>) -> Result<bool> {
        match (sup, sub) {
            (_, Type::Void) => Ok(true),
            (Type::Bool, Type::Bool)
            | (Type::Char, Type::Char)
            | (Type::Int, Type::Int)
            | (Type::String, Type::String) => Ok(true),
            (Type::Array(sup_elem), Type::Array(sub_elem)) => {
                self.subtype(sup_elem, sub_elem, assumed)
            }
            (Type::Record(sup_fields), Type::Record(sub_fields)) => {
                if sup_fields.len() > sub_fields.len() {
                    return Ok(false);
                }
                for (expected, actual) in sup_fields.iter().zip(sub_fields) {
                    if expected.name != actual.name
                        || !self.subtype(&expected.ty, &actual.ty, assumed)?
                    {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            (Type::Named(a), Type::Named(b)) if a == b => Ok(true),
            (Type::Named(name), _) => {
                let body = self.registry.resolve(name)?;
                self.assuming(sup, sub, assumed, |this, assumed| {
                    this.subtype(body, sub, assumed)
                })
            }
            (_, Type::Named(name)) => {
                let body = self.registry.resolve(name)?;
                self.assuming(sup, sub, assumed, |this, assumed| {
                    this.subtype(sup, body, assumed)
                })
            }
            (Type::Union(sup_members), Type::Union(sub_members)) => {
                for member in sub_members {
                    if !self.any_accepts(sup_members, member, assumed)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            (Type::Union(members), _) => self.any_accepts(members, sub, assumed),
            (_, Type::Union(members)) => {
                for member in members {
                    if !self.subtype(sup, member, assumed)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn any_accepts(
        &self,
        candidates: &[Type],
        sub: &Type,
        assumed: &mut Vec<(Type, Type)>,
    ) -> Result<bool> {
        for candidate in candidates {
            if self.subtype(candidate, sub, assumed)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn assuming(
        &self,
        sup: &Type,
        sub: &Type,
        assumed: &mut Vec<(Type, Type)>,
        check: impl FnOnce(&Self, &mut Vec<(Type, Type)>) -> Result<bool>,
    ) -> Result<bool> {
        if assumed.iter().any(|(a, b)| a == sup && b == sub) {
            return Ok(true);
        }
        assumed.push((sup.clone(), sub.clone()));
        let result = check(self, assumed);
        assumed.pop();
        result
    }

    /// Each type is a subtype of the other.
    ///
    /// # Errors
    ///
    /// As [`is_subtype`](Self::is_subtype).
    pub fn equivalent(&self, a: &Type, b: &Type) -> Result<bool> {
        Ok(self.is_subtype(a, b)? && self.is_subtype(b, a)?)
    }

    /// Fails with `TypeMismatch` unless `sub` is a subtype of `sup`.
    ///
    /// # Errors
    ///
    /// `TypeMismatch { expected: sup, found: sub }` at `span`, or
    /// `UnknownType` at `span` for an undeclared alias.
    pub fn check_subtype(&self, sup: &Type, sub: &Type, span: Option<Span>) -> Result<()> {
        if self.is_subtype(sup, sub).map_err(|err| err.or_at(span))? {
            Ok(())
        } else {
            Err(TypeError::mismatch(sup, sub, span))
        }
    }

    /// Follows aliases until the type is no longer [`Type::Named`].
    ///
    /// # Errors
    ///
    /// `UnknownType` at `span` if an alias is not declared.
    pub fn expand<'t>(&self, ty: &'t Type, span: Option<Span>) -> Result<&'t Type>
    where
        'a: 't,
    {
        let mut current = ty;
        while let Type::Named(name) = current {
            current = self.registry.resolve(name).map_err(|err| err.kind.at(span))?;
        }
        Ok(current)
    }

    /// Expands `ty` and checks its outer shape is one of `kinds`.
    ///
    /// Returns the expanded type so callers can destructure it.
    ///
    /// # Errors
    ///
    /// `UnknownType` for an undeclared alias, `NotInstanceOf` otherwise.
    pub fn check_instance_of<'t>(
        &self,
        ty: &'t Type,
        kinds: KindSet,
        span: Option<Span>,
    ) -> Result<&'t Type>
    where
        'a: 't,
    {
        let expanded = self.expand(ty, span)?;
        if kinds.accepts(expanded) {
            Ok(expanded)
        } else {
            Err(TypeErrorKind::NotInstanceOf {
                expected: kinds,
                found: ty.clone(),
            }
            .at(span))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use whilec_syntax::ast::{Decl, TypeDecl, WhileFile};

    fn registry(aliases: &[(&str, Type)]) -> Registry {
        let decls = aliases
            .iter()
            .map(|(name, ty)| Decl::Type(TypeDecl::new(*name, ty.clone())))
            .collect();
        Registry::build(&WhileFile::new(decls)).unwrap()
    }

    #[test]
    fn test_primitives_are_reflexive_and_distinct() {
        let reg = Registry::default();
        let st = Subtyping::new(&reg);
        let prims = [Type::Bool, Type::Char, Type::Int, Type::String];
        for a in &prims {
            for b in &prims {
                assert_eq!(st.is_subtype(a, b), Ok(a == b), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn test_void_is_accepted_as_subtype() {
        let reg = Registry::default();
        let st = Subtyping::new(&reg);
        assert!(st.is_subtype(&Type::Int, &Type::Void).unwrap());
        assert!(st.is_subtype(&Type::array(Type::Bool), &Type::Void).unwrap());
        assert!(!st.is_subtype(&Type::Void, &Type::Int).unwrap());
    }

    #[test]
    fn test_record_field_names_must_match() {
        let reg = Registry::default();
        let st = Subtyping::new(&reg);
        let a = Type::record([(Type::Int, "x")]);
        let b = Type::record([(Type::Int, "y")]);
        assert!(!st.is_subtype(&a, &b).unwrap());
    }

    #[test]
    fn test_alias_expansion_both_sides() {
        let reg = registry(&[("Id", Type::Int), ("Ids", Type::array(Type::named("Id")))]);
        let st = Subtyping::new(&reg);
        assert!(st.is_subtype(&Type::named("Id"), &Type::Int).unwrap());
        assert!(st.is_subtype(&Type::Int, &Type::named("Id")).unwrap());
        assert!(st.is_subtype(&Type::named("Ids"), &Type::array(Type::Int)).unwrap());
        assert!(!st.is_subtype(&Type::named("Id"), &Type::Bool).unwrap());
        assert_eq!(
            st.is_subtype(&Type::named("Missing"), &Type::Int).unwrap_err().kind,
            TypeErrorKind::UnknownType {
                name: "Missing".to_string()
            }
        );
    }

    #[test]
    fn test_recursive_aliases_terminate() {
        let reg = registry(&[
            ("A", Type::record([(Type::array(Type::named("A")), "next")])),
            ("B", Type::record([(Type::array(Type::named("B")), "next")])),
        ]);
        let st = Subtyping::new(&reg);
        assert!(st.is_subtype(&Type::named("A"), &Type::named("B")).unwrap());
        assert!(st.equivalent(&Type::named("A"), &Type::named("B")).unwrap());
    }

    #[test]
    fn test_check_subtype_reports_mismatch() {
        let reg = Registry::default();
        let st = Subtyping::new(&reg);
        let err = st.check_subtype(&Type::Int, &Type::Bool, Some(Span::new(1, 2))).unwrap_err();
        assert_eq!(
            err.kind,
            TypeErrorKind::TypeMismatch {
                expected: Type::Int,
                found: Type::Bool
            }
        );
        assert_eq!(err.span, Some(Span::new(1, 2)));
    }

    #[test]
    fn test_check_subtype_reports_unknown_alias() {
        let reg = Registry::default();
        let st = Subtyping::new(&reg);
        let span = Some(Span::new(4, 9));

        let err = st.check_subtype(&Type::named("Ghost"), &Type::Int, span).unwrap_err();
        assert_eq!(err.code(), "E0007");
        assert_eq!(err.span, span);

        let nested = Type::array(Type::named("Ghost"));
        let err = st.check_subtype(&Type::array(Type::Int), &nested, span).unwrap_err();
        assert_eq!(err.code(), "E0007");
    }

    #[test]
    fn test_check_instance_of_expands() {
        let reg = registry(&[("Text", Type::String)]);
        let st = Subtyping::new(&reg);
        let ty = Type::named("Text");
        assert_eq!(st.check_instance_of(&ty, KindSet::SEQUENCE, None).unwrap(), &Type::String);

        let err = st.check_instance_of(&ty, KindSet::INT, None).unwrap_err();
        assert_eq!(
            err.kind,
            TypeErrorKind::NotInstanceOf {
                expected: KindSet::INT,
                found: Type::named("Text")
            }
        );
    }

    #[test]
    fn test_expand_unknown_alias() {
        let reg = Registry::default();
        let st = Subtyping::new(&reg);
        let ty = Type::named("Ghost");
        let err = st.expand(&ty, Some(Span::new(0, 5))).unwrap_err();
        assert_eq!(err.code(), "E0007");
        assert_eq!(err.span, Some(Span::new(0, 5)));
    }
}
