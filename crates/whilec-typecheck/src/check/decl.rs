//! Declaration checking.
//!
//! Signatures are already in the [`Registry`] by the time a declaration is
//! checked, so a method body can call methods declared after it.

use super::Context;
use super::stmt::check_block;
use super::ty::{check_return_type, check_value_type};
use crate::context::{Environment, Registry};
use crate::error::{Result, TypeErrorKind};
use whilec_log::debug;
use whilec_syntax::ast::{Decl, MethodDecl, TypeDecl};

/// Checks one top-level declaration.
///
/// # Errors
///
/// The first type error in the declaration.
pub fn check_decl(registry: &Registry, decl: &Decl) -> Result<()> {
    match decl {
        Decl::Type(td) => check_type_decl(registry, td),
        Decl::Method(md) => check_method_decl(registry, md),
    }
}

/// Checks that an alias body is a well-formed, non-void type.
///
/// # Errors
///
/// `UnknownType`, `VoidNotPermitted`, `DuplicateDeclaration` for a repeated
/// record field, or `InternalFailure` for `var`.
pub fn check_type_decl(registry: &Registry, td: &TypeDecl) -> Result<()> {
    debug!("checking type {} is {}", td.name, td.ty);
    check_value_type(registry, &td.ty, td.span)
}

/// Checks a method's signature, then its body in an environment seeded
/// from the parameters.
///
/// # Errors
///
/// The first type error in the signature or body.
pub fn check_method_decl(registry: &Registry, md: &MethodDecl) -> Result<()> {
    debug!(
        "checking method {}({} params) -> {}",
        md.name,
        md.params.len(),
        md.ret
    );

    let mut env = Environment::new();
    for param in &md.params {
        let span = param.span.or(md.span);
        check_value_type(registry, &param.ty, span)?;
        if env.contains(&param.name) {
            return Err(TypeErrorKind::DuplicateDeclaration {
                name: param.name.clone(),
            }
            .at(span));
        }
        env.put(param.name.clone(), param.ty.clone());
    }
    check_return_type(registry, &md.ret, md.span)?;

    let ctx = Context::new(registry).with_return(md.ret.clone());
    check_block(&ctx, &mut env, &md.body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Type;
    use whilec_syntax::ast::{Expr, Parameter, Stmt, WhileFile};

    #[test]
    fn test_type_decl_rejects_void() {
        let td = TypeDecl::new("Bad", Type::record([(Type::Void, "x")]));
        let reg = Registry::build(&WhileFile::new(vec![Decl::Type(td.clone())])).unwrap();
        let err = check_type_decl(&reg, &td).unwrap_err();
        assert_eq!(err.kind, TypeErrorKind::VoidNotPermitted);
    }

    #[test]
    fn test_method_params_seed_environment() {
        let md = MethodDecl::new(
            "inc",
            vec![Parameter::new("x", Type::Int)],
            Type::Int,
            vec![Stmt::ret(Some(Expr::add(Expr::var("x"), Expr::int(1))))],
        );
        let reg = Registry::build(&WhileFile::new(vec![Decl::Method(md.clone())])).unwrap();
        assert!(check_method_decl(&reg, &md).is_ok());
    }

    #[test]
    fn test_void_parameter() {
        let md = MethodDecl::new("f", vec![Parameter::new("x", Type::Void)], Type::Void, vec![]);
        let reg = Registry::default();
        let err = check_method_decl(&reg, &md).unwrap_err();
        assert_eq!(err.kind, TypeErrorKind::VoidNotPermitted);
    }

    #[test]
    fn test_duplicate_parameter() {
        let md = MethodDecl::new(
            "f",
            vec![Parameter::new("a", Type::Int), Parameter::new("a", Type::Bool)],
            Type::Void,
            vec![],
        );
        let reg = Registry::default();
        let err = check_method_decl(&reg, &md).unwrap_err();
        assert_eq!(err.kind, TypeErrorKind::DuplicateDeclaration { name: "a".to_string() });
    }

    #[test]
    fn test_inferred_return_type_is_internal() {
        let md = MethodDecl::new("f", vec![], Type::Inferred, vec![]);
        let reg = Registry::default();
        assert!(check_method_decl(&reg, &md).unwrap_err().is_internal());
    }
}
