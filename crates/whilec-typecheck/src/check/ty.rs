//! Checks on written type annotations.
//!
//! Declared types must only mention declared aliases, must not contain
//! `var`, and may only be `void` in return position.

use crate::context::Registry;
use crate::error::{Result, TypeError, TypeErrorKind};
use crate::types::Type;
use whilec_syntax::Span;

/// Checks a parameter, variable, field or alias body type.
///
/// # Errors
///
/// `UnknownType`, `DuplicateDeclaration` for a repeated record field,
/// `VoidNotPermitted`, or `InternalFailure` for a stray `var`.
pub fn check_value_type(registry: &Registry, ty: &Type, span: Option<Span>) -> Result<()> {
    check_well_formed(registry, ty, span)?;
    check_not_void(ty, span)
}

/// Checks a method's return type; a bare `void` is allowed.
///
/// # Errors
///
/// As [`check_value_type`] for anything other than `void`.
pub fn check_return_type(registry: &Registry, ty: &Type, span: Option<Span>) -> Result<()> {
    match ty {
        Type::Void => Ok(()),
        _ => check_value_type(registry, ty, span),
    }
}

/// Rejects `void`, including inside arrays, records and unions.
///
/// Aliases are not expanded; their bodies are checked where declared.
///
/// # Errors
///
/// `VoidNotPermitted` at `span`.
pub fn check_not_void(ty: &Type, span: Option<Span>) -> Result<()> {
    match ty {
        Type::Void => Err(TypeErrorKind::VoidNotPermitted.at(span)),
        Type::Array(element) => check_not_void(element, span),
        Type::Record(fields) => fields.iter().try_for_each(|f| check_not_void(&f.ty, span)),
        Type::Union(members) => members.iter().try_for_each(|m| check_not_void(m, span)),
        _ => Ok(()),
    }
}

fn check_well_formed(registry: &Registry, ty: &Type, span: Option<Span>) -> Result<()> {
    match ty {
        Type::Void | Type::Bool | Type::Char | Type::Int | Type::String => Ok(()),
        Type::Array(element) => check_well_formed(registry, element, span),
        Type::Record(fields) => {
            for (i, field) in fields.iter().enumerate() {
                if fields[..i].iter().any(|f| f.name == field.name) {
                    return Err(TypeErrorKind::DuplicateDeclaration {
                        name: field.name.clone(),
                    }
                    .at(span));
                }
                check_well_formed(registry, &field.ty, span)?;
            }
            Ok(())
        }
        Type::Named(name) => {
            if registry.has_alias(name) {
                Ok(())
            } else {
                Err(TypeErrorKind::UnknownType { name: name.clone() }.at(span))
            }
        }
        Type::Union(members) => members
            .iter()
            .try_for_each(|m| check_well_formed(registry, m, span)),
        Type::Inferred => Err(TypeError::internal(
            "`var` used as a declared type outside a variable declaration",
            span,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_types() {
        let reg = Registry::default();
        assert!(check_value_type(&reg, &Type::array(Type::Int), None).is_ok());
        assert!(check_value_type(&reg, &Type::union([Type::Int, Type::Bool]), None).is_ok());
    }

    #[test]
    fn test_void_rejected_when_nested() {
        let reg = Registry::default();
        let ty = Type::record([(Type::Int, "x"), (Type::array(Type::Void), "ys")]);
        let err = check_value_type(&reg, &ty, None).unwrap_err();
        assert_eq!(err.kind, TypeErrorKind::VoidNotPermitted);

        let err = check_return_type(&reg, &Type::array(Type::Void), None).unwrap_err();
        assert_eq!(err.kind, TypeErrorKind::VoidNotPermitted);
        assert!(check_return_type(&reg, &Type::Void, None).is_ok());
    }

    #[test]
    fn test_unknown_alias() {
        let reg = Registry::default();
        let err = check_value_type(&reg, &Type::array(Type::named("Nope")), None).unwrap_err();
        assert_eq!(
            err.kind,
            TypeErrorKind::UnknownType {
                name: "Nope".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_record_field() {
        let reg = Registry::default();
        let ty = Type::record([(Type::Int, "x"), (Type::Bool, "x")]);
        let err = check_value_type(&reg, &ty, None).unwrap_err();
        assert_eq!(err.code(), "E0002");
    }

    #[test]
    fn test_inferred_is_internal() {
        let reg = Registry::default();
        let err = check_value_type(&reg, &Type::Inferred, None).unwrap_err();
        assert!(err.is_internal());
    }
}
