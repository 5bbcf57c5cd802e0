//! Least upper bound of a sequence of types.

use super::Subtyping;
use crate::error::Result;
use crate::types::Type;
use whilec_log::trace;
use whilec_syntax::Span;

impl Subtyping<'_> {
    /// Folds `types` into a common supertype, starting from `void`.
    ///
    /// Each type either accepts the running bound, and becomes the new
    /// bound, or must itself be accepted by it. No union is synthesized, so
    /// siblings such as `int` and `bool` are an error. An empty sequence
    /// yields `void`.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` at `span` for the first type that is unrelated to the
    /// bound so far, `UnknownType` for an undeclared alias.
    pub fn least_upper_bound<'t, I>(&self, types: I, span: Option<Span>) -> Result<Type>
    where
        I: IntoIterator<Item = &'t Type>,
    {
        let mut lub = Type::Void;
        for ty in types {
            if self.is_subtype(ty, &lub).map_err(|err| err.or_at(span))? {
                trace!("lub: {} -> {}", lub, ty);
                lub = ty.clone();
            } else {
                self.check_subtype(&lub, ty, span)?;
            }
        }
        Ok(lub)
    }
}

#[cfg(test)]
mod tests {
    use crate::context::Registry;
    use crate::error::TypeErrorKind;
    use crate::subtype::Subtyping;
    use crate::types::Type;

    #[test]
    fn test_lub_of_empty_is_void() {
        let reg = Registry::default();
        let st = Subtyping::new(&reg);
        assert_eq!(st.least_upper_bound([], None).unwrap(), Type::Void);
    }

    #[test]
    fn test_lub_of_equal_types() {
        let reg = Registry::default();
        let st = Subtyping::new(&reg);
        let types = [Type::Int, Type::Int, Type::Int];
        assert_eq!(st.least_upper_bound(&types, None).unwrap(), Type::Int);
    }

    #[test]
    fn test_lub_widens_to_later_supertype() {
        let reg = Registry::default();
        let st = Subtyping::new(&reg);
        let narrow = Type::record([(Type::Int, "x"), (Type::Int, "y")]);
        let wide = Type::record([(Type::Int, "x")]);
        let types = [narrow.clone(), wide.clone(), narrow];
        assert_eq!(st.least_upper_bound(&types, None).unwrap(), wide);
    }

    #[test]
    fn test_lub_keeps_union_bound() {
        let reg = Registry::default();
        let st = Subtyping::new(&reg);
        let either = Type::union([Type::Int, Type::Bool]);
        let types = [either.clone(), Type::Int, Type::Bool];
        assert_eq!(st.least_upper_bound(&types, None).unwrap(), either);
    }

    #[test]
    fn test_lub_rejects_siblings() {
        let reg = Registry::default();
        let st = Subtyping::new(&reg);
        let types = [Type::Int, Type::Bool];
        let err = st.least_upper_bound(&types, None).unwrap_err();
        assert_eq!(
            err.kind,
            TypeErrorKind::TypeMismatch {
                expected: Type::Int,
                found: Type::Bool
            }
        );
    }

    #[test]
    fn test_lub_reports_unknown_alias() {
        let reg = Registry::default();
        let st = Subtyping::new(&reg);
        let span = Some(whilec_syntax::Span::new(0, 5));
        let types = [Type::named("Ghost"), Type::Int];
        let err = st.least_upper_bound(&types, span).unwrap_err();
        assert_eq!(
            err.kind,
            TypeErrorKind::UnknownType {
                name: "Ghost".to_string()
            }
        );
        assert_eq!(err.span, span);
    }
}
