//! The While type model.
//!
//! Types are plain values: they are built fresh while checking and compared
//! structurally. Aliases stay as [`Type::Named`] and are only expanded on
//! demand by the checker's registry.

use std::fmt;

/// A While type.
///
/// # Examples
///
/// ```
/// use whilec_syntax::ast::Type;
///
/// let point = Type::record([(Type::Int, "x"), (Type::Int, "y")]);
/// assert_eq!(point.to_string(), "{int x, int y}");
///
/// let either = Type::union([Type::Int, Type::union([Type::Bool, Type::Int])]);
/// assert_eq!(either.to_string(), "int|bool");
/// ```
#[derive(Debug, Clone)]
pub enum Type {
    /// `void`: only legal as a return type
    Void,
    /// `bool`
    Bool,
    /// `char`
    Char,
    /// `int`
    Int,
    /// `string`
    String,
    /// `T[]`
    Array(Box<Type>),
    /// `{T1 f1, T2 f2}`: field order is significant
    Record(Vec<Field>),
    /// Reference to a type alias
    Named(String),
    /// `T1|T2`: always flattened, never directly nested
    Union(Vec<Type>),
    /// `var`: placeholder for a type not yet known
    Inferred,
}

/// A record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field type
    pub ty: Type,
    /// Field name, unique within one record
    pub name: String,
}

impl Field {
    /// Creates a field.
    #[must_use]
    pub fn new(ty: Type, name: impl Into<String>) -> Self {
        Self {
            ty,
            name: name.into(),
        }
    }
}

impl Type {
    /// `T[]`
    #[must_use]
    pub fn array(element: Type) -> Self {
        Type::Array(Box::new(element))
    }

    /// A record from `(type, name)` pairs in declaration order.
    #[must_use]
    pub fn record<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (Type, S)>,
        S: Into<String>,
    {
        Type::Record(
            fields
                .into_iter()
                .map(|(ty, name)| Field::new(ty, name))
                .collect(),
        )
    }

    /// Reference to the alias `name`.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Type::Named(name.into())
    }

    /// Builds a union, flattening nested unions and dropping duplicates.
    ///
    /// Members keep the order of their first occurrence. A single member
    /// still produces a `Union`.
    #[must_use]
    pub fn union<I>(members: I) -> Self
    where
        I: IntoIterator<Item = Type>,
    {
        let mut flat: Vec<Type> = Vec::new();
        for member in members {
            match member {
                Type::Union(inner) => {
                    for ty in inner {
                        push_unique(&mut flat, ty);
                    }
                }
                other => push_unique(&mut flat, other),
            }
        }
        Type::Union(flat)
    }

    /// Looks up a record field by name, first match wins.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Type> {
        match self {
            Type::Record(fields) => fields.iter().find(|f| f.name == name).map(|f| &f.ty),
            _ => None,
        }
    }

    /// Returns `true` for `bool`, `char`, `int` and `string`.
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        matches!(self, Type::Bool | Type::Char | Type::Int | Type::String)
    }

    /// Returns `true` for [`Type::Inferred`].
    #[must_use]
    pub const fn is_inferred(&self) -> bool {
        matches!(self, Type::Inferred)
    }
}

fn push_unique(members: &mut Vec<Type>, ty: Type) {
    if !members.contains(&ty) {
        members.push(ty);
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Type::Void, Type::Void)
            | (Type::Bool, Type::Bool)
            | (Type::Char, Type::Char)
            | (Type::Int, Type::Int)
            | (Type::String, Type::String)
            | (Type::Inferred, Type::Inferred) => true,
            (Type::Array(a), Type::Array(b)) => a == b,
            (Type::Record(a), Type::Record(b)) => a == b,
            (Type::Named(a), Type::Named(b)) => a == b,
            // Members are deduplicated, so equal length plus containment is set equality.
            (Type::Union(a), Type::Union(b)) => {
                a.len() == b.len() && a.iter().all(|m| b.contains(m))
            }
            _ => false,
        }
    }
}

impl Eq for Type {}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => write!(f, "void"),
            Type::Bool => write!(f, "bool"),
            Type::Char => write!(f, "char"),
            Type::Int => write!(f, "int"),
            Type::String => write!(f, "string"),
            Type::Array(element) => match element.as_ref() {
                Type::Union(_) => write!(f, "({element})[]"),
                _ => write!(f, "{element}[]"),
            },
            Type::Record(fields) => {
                write!(f, "{{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} {}", field.ty, field.name)?;
                }
                write!(f, "}}")
            }
            Type::Named(name) => write!(f, "{name}"),
            Type::Union(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, "|")?;
                    }
                    write!(f, "{member}")?;
                }
                Ok(())
            }
            Type::Inferred => write!(f, "var"),
        }
    }
}
