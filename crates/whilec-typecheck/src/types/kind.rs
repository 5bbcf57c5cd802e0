//! Coarse type kinds used by instance-of checks.
//!
//! Operators only care about the outer shape of an operand: `+` wants an
//! `int`, `|e|` wants an array or a string. [`KindSet`] names the accepted
//! shapes and renders them for diagnostics as `string or array`.

use crate::types::Type;
use std::fmt;

/// The outer shape of a concrete type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// `bool`
    Bool,
    /// `char`
    Char,
    /// `int`
    Int,
    /// `string`
    String,
    /// `T[]`
    Array,
    /// `{...}`
    Record,
}

impl TypeKind {
    const ALL: [TypeKind; 6] = [
        TypeKind::Bool,
        TypeKind::Char,
        TypeKind::Int,
        TypeKind::String,
        TypeKind::Array,
        TypeKind::Record,
    ];

    /// The kind of `ty`, or `None` for `void`, aliases, unions and `var`.
    #[must_use]
    pub const fn of(ty: &Type) -> Option<TypeKind> {
        match ty {
            Type::Bool => Some(TypeKind::Bool),
            Type::Char => Some(TypeKind::Char),
            Type::Int => Some(TypeKind::Int),
            Type::String => Some(TypeKind::String),
            Type::Array(_) => Some(TypeKind::Array),
            Type::Record(_) => Some(TypeKind::Record),
            Type::Void | Type::Named(_) | Type::Union(_) | Type::Inferred => None,
        }
    }

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Bool => write!(f, "bool"),
            TypeKind::Char => write!(f, "char"),
            TypeKind::Int => write!(f, "int"),
            TypeKind::String => write!(f, "string"),
            TypeKind::Array => write!(f, "array"),
            TypeKind::Record => write!(f, "record"),
        }
    }
}

/// A set of accepted kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KindSet(u8);

impl KindSet {
    /// `bool`
    pub const BOOL: KindSet = KindSet::single(TypeKind::Bool);
    /// `int`
    pub const INT: KindSet = KindSet::single(TypeKind::Int);
    /// `record`
    pub const RECORD: KindSet = KindSet::single(TypeKind::Record);
    /// `string or array`
    pub const SEQUENCE: KindSet = KindSet(TypeKind::Array.bit() | TypeKind::String.bit());

    /// A set with one kind.
    #[must_use]
    pub const fn single(kind: TypeKind) -> Self {
        KindSet(kind.bit())
    }

    /// Returns `true` if `kind` is in the set.
    #[must_use]
    pub const fn contains(self, kind: TypeKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Returns `true` if the outer shape of `ty` is in the set.
    #[must_use]
    pub fn accepts(self, ty: &Type) -> bool {
        TypeKind::of(ty).is_some_and(|kind| self.contains(kind))
    }

    /// Kinds in the set, in a fixed order.
    pub fn iter(self) -> impl Iterator<Item = TypeKind> {
        TypeKind::ALL.into_iter().filter(move |kind| self.contains(*kind))
    }
}

impl fmt::Display for KindSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, kind) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " or ")?;
            }
            write!(f, "{kind}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_of() {
        assert_eq!(TypeKind::of(&Type::array(Type::Int)), Some(TypeKind::Array));
        assert_eq!(TypeKind::of(&Type::named("T")), None);
        assert_eq!(TypeKind::of(&Type::Void), None);
    }

    #[test]
    fn test_kind_set_accepts() {
        assert!(KindSet::SEQUENCE.accepts(&Type::String));
        assert!(KindSet::SEQUENCE.accepts(&Type::array(Type::Bool)));
        assert!(!KindSet::SEQUENCE.accepts(&Type::Int));
        assert!(!KindSet::INT.accepts(&Type::union([Type::Int])));
    }

    #[test]
    fn test_kind_set_display() {
        assert_eq!(KindSet::INT.to_string(), "int");
        assert_eq!(KindSet::RECORD.to_string(), "record");
        assert_eq!(KindSet::SEQUENCE.to_string(), "string or array");
        assert_eq!(
            KindSet::SEQUENCE.iter().collect::<Vec<_>>(),
            [TypeKind::String, TypeKind::Array]
        );
    }
}
