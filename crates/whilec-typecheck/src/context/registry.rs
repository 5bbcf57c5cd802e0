//! Method and type alias registries.
//!
//! Both tables are filled once from the file's declarations before any body
//! is checked, and are only read afterwards. Alias chains that loop back on
//! themselves without an array or record in between are rejected here, so
//! expanding an alias during checking always makes progress.

use crate::error::{Result, TypeErrorKind};
use crate::types::Type;
use fxhash::FxHashMap;
use whilec_log::{debug, trace};
use whilec_syntax::Span;
use whilec_syntax::ast::{MethodDecl, WhileFile};

/// The externally visible shape of a method.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSignature {
    /// Method name
    pub name: String,
    /// Parameter types in declaration order
    pub params: Vec<Type>,
    /// Return type
    pub ret: Type,
    /// Span of the declaration
    pub span: Option<Span>,
}

impl MethodSignature {
    fn from_decl(decl: &MethodDecl) -> Self {
        Self {
            name: decl.name.clone(),
            params: decl.params.iter().map(|p| p.ty.clone()).collect(),
            ret: decl.ret.clone(),
            span: decl.span,
        }
    }
}

/// Read-only lookup tables for methods and type aliases.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    methods: FxHashMap<String, MethodSignature>,
    aliases: FxHashMap<String, Type>,
}

impl Registry {
    /// Collects every method signature and type alias in `file`.
    ///
    /// # Errors
    ///
    /// `DuplicateDeclaration` when a method or alias name is reused, and
    /// `CyclicType` when an alias expands to itself without passing through
    /// an array or record.
    pub fn build(file: &WhileFile) -> Result<Self> {
        let mut registry = Registry::default();

        for td in file.type_decls() {
            if registry.aliases.contains_key(&td.name) {
                return Err(TypeErrorKind::DuplicateDeclaration {
                    name: td.name.clone(),
                }
                .at(td.span));
            }
            registry.aliases.insert(td.name.clone(), td.ty.clone());
        }

        for md in file.method_decls() {
            if registry.methods.contains_key(&md.name) {
                return Err(TypeErrorKind::DuplicateDeclaration {
                    name: md.name.clone(),
                }
                .at(md.span));
            }
            registry
                .methods
                .insert(md.name.clone(), MethodSignature::from_decl(md));
        }

        for td in file.type_decls() {
            let mut path = vec![td.name.as_str()];
            if let Err(name) = registry.visit_unguarded(&td.ty, &mut path) {
                return Err(TypeErrorKind::CyclicType { name }.at(td.span));
            }
        }

        debug!(
            "registry built: {} methods, {} aliases",
            registry.methods.len(),
            registry.aliases.len()
        );
        Ok(registry)
    }

    /// Follows alias references that are not behind an array or record.
    ///
    /// Returns the name that closes a cycle, if one is found.
    fn visit_unguarded<'a>(
        &'a self,
        ty: &'a Type,
        path: &mut Vec<&'a str>,
    ) -> std::result::Result<(), String> {
        match ty {
            Type::Named(name) => {
                if path.contains(&name.as_str()) {
                    trace!("alias cycle through `{}`: {}", name, path.join(" -> "));
                    return Err(name.clone());
                }
                if let Some(body) = self.aliases.get(name) {
                    path.push(name);
                    self.visit_unguarded(body, path)?;
                    path.pop();
                }
                Ok(())
            }
            Type::Union(members) => members
                .iter()
                .try_for_each(|member| self.visit_unguarded(member, path)),
            _ => Ok(()),
        }
    }

    /// Signature of the method `name`.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&MethodSignature> {
        self.methods.get(name)
    }

    /// Defining type of the alias `name`.
    #[must_use]
    pub fn alias(&self, name: &str) -> Option<&Type> {
        self.aliases.get(name)
    }

    /// Defining type of the alias `name`.
    ///
    /// # Errors
    ///
    /// `UnknownType` if no such alias is declared.
    pub fn resolve(&self, name: &str) -> Result<&Type> {
        self.alias(name).ok_or_else(|| {
            TypeErrorKind::UnknownType {
                name: name.to_string(),
            }
            .at(None)
        })
    }

    /// Returns `true` if an alias `name` is declared.
    #[must_use]
    pub fn has_alias(&self, name: &str) -> bool {
        self.aliases.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use whilec_syntax::ast::{Decl, Parameter, TypeDecl};

    fn alias(name: &str, ty: Type) -> Decl {
        Decl::Type(TypeDecl::new(name, ty))
    }

    fn method(name: &str, params: Vec<Parameter>, ret: Type) -> Decl {
        Decl::Method(MethodDecl::new(name, params, ret, vec![]))
    }

    #[test]
    fn test_build_collects_declarations() {
        let file = WhileFile::new(vec![
            alias("Point", Type::record([(Type::Int, "x"), (Type::Int, "y")])),
            method(
                "dist",
                vec![Parameter::new("p", Type::named("Point"))],
                Type::Int,
            ),
        ]);
        let registry = Registry::build(&file).unwrap();

        let sig = registry.method("dist").unwrap();
        assert_eq!(sig.params, vec![Type::named("Point")]);
        assert_eq!(sig.ret, Type::Int);
        assert!(registry.has_alias("Point"));
        assert!(registry.method("missing").is_none());
    }

    #[test]
    fn test_resolve_unknown() {
        let registry = Registry::default();
        let err = registry.resolve("Nope").unwrap_err();
        assert_eq!(
            err.kind,
            TypeErrorKind::UnknownType {
                name: "Nope".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_method() {
        let file = WhileFile::new(vec![
            method("f", vec![], Type::Void),
            method("f", vec![], Type::Int),
        ]);
        let err = Registry::build(&file).unwrap_err();
        assert!(matches!(err.kind, TypeErrorKind::DuplicateDeclaration { ref name } if name == "f"));
    }

    #[test]
    fn test_duplicate_alias() {
        let file = WhileFile::new(vec![alias("T", Type::Int), alias("T", Type::Bool)]);
        let err = Registry::build(&file).unwrap_err();
        assert_eq!(err.code(), "E0002");
    }

    #[test]
    fn test_direct_cycle_rejected() {
        let file = WhileFile::new(vec![alias("T", Type::named("T"))]);
        let err = Registry::build(&file).unwrap_err();
        assert_eq!(err.kind, TypeErrorKind::CyclicType { name: "T".to_string() });
    }

    #[test]
    fn test_indirect_cycle_rejected() {
        let file = WhileFile::new(vec![
            alias("A", Type::named("B")),
            alias("B", Type::union([Type::Int, Type::named("A")])),
        ]);
        let err = Registry::build(&file).unwrap_err();
        assert_eq!(err.kind, TypeErrorKind::CyclicType { name: "A".to_string() });
    }

    #[test]
    fn test_cycle_through_record_accepted() {
        let file = WhileFile::new(vec![alias(
            "List",
            Type::union([
                Type::Bool,
                Type::record([(Type::Int, "value"), (Type::named("List"), "next")]),
            ]),
        )]);
        assert!(Registry::build(&file).is_ok());
    }

    #[test]
    fn test_cycle_through_array_accepted() {
        let file = WhileFile::new(vec![alias("Tree", Type::array(Type::named("Tree")))]);
        assert!(Registry::build(&file).is_ok());
    }
}
