//! Expression nodes.
//!
//! Every [`Expr`] owns a write-once type slot. The checker fills it the
//! first time it synthesizes the node's type, and later passes read it back
//! through [`Expr::ty`] instead of recomputing it.
//!
//! # Examples
//!
//! ```
//! use whilec_syntax::ast::{BinaryOp, Expr, ExprKind};
//!
//! // xs[i] + 1
//! let expr = Expr::add(Expr::index(Expr::var("xs"), Expr::var("i")), Expr::int(1));
//! assert!(matches!(expr.kind, ExprKind::Binary { op: BinaryOp::Add, .. }));
//! ```

use super::{Type, Value};
use crate::span::{Span, Spanned};
use std::cell::OnceCell;
use std::fmt;

/// An expression together with its source span and type annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    /// What kind of expression this is
    pub kind: ExprKind,
    /// Source location, if the node came from source
    pub span: Option<Span>,
    ty: OnceCell<Type>,
}

/// The closed set of expression forms.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// `lhs op rhs`
    Binary {
        /// Operator
        op: BinaryOp,
        /// Left operand
        lhs: Box<Expr>,
        /// Right operand
        rhs: Box<Expr>,
    },

    /// A literal constant
    Constant(Value),

    /// `source[index]`
    IndexOf {
        /// Array or string being indexed
        source: Box<Expr>,
        /// Index expression
        index: Box<Expr>,
    },

    /// `name(args...)` used for its value
    Invoke(Invocation),

    /// `[value; size]`
    ArrayGenerator {
        /// Element value repeated `size` times
        value: Box<Expr>,
        /// Number of elements
        size: Box<Expr>,
    },

    /// `[e1, e2, ...]`
    ArrayInitialiser(Vec<Expr>),

    /// `source.field`
    RecordAccess {
        /// Record-valued expression
        source: Box<Expr>,
        /// Field name
        field: String,
    },

    /// `{f1: e1, f2: e2}` in written order
    RecordConstructor(Vec<(String, Expr)>),

    /// `op operand`
    Unary {
        /// Operator
        op: UnaryOp,
        /// Operand
        operand: Box<Expr>,
    },

    /// A variable reference
    Variable(String),
}

/// A method call, shared by the expression and statement forms.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// Name of the called method
    pub name: String,
    /// Arguments in call order
    pub args: Vec<Expr>,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// Logical and: `&&`
    And,
    /// Logical or: `||`
    Or,
    /// Addition: `+`
    Add,
    /// Subtraction: `-`
    Sub,
    /// Multiplication: `*`
    Mul,
    /// Division: `/`
    Div,
    /// Remainder: `%`
    Rem,
    /// Equality: `==`
    Eq,
    /// Inequality: `!=`
    Neq,
    /// Less than: `<`
    Lt,
    /// Less than or equal: `<=`
    LtEq,
    /// Greater than: `>`
    Gt,
    /// Greater than or equal: `>=`
    GtEq,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => write!(f, "&&"),
            Self::Or => write!(f, "||"),
            Self::Add => write!(f, "+"),
            Self::Sub => write!(f, "-"),
            Self::Mul => write!(f, "*"),
            Self::Div => write!(f, "/"),
            Self::Rem => write!(f, "%"),
            Self::Eq => write!(f, "=="),
            Self::Neq => write!(f, "!="),
            Self::Lt => write!(f, "<"),
            Self::LtEq => write!(f, "<="),
            Self::Gt => write!(f, ">"),
            Self::GtEq => write!(f, ">="),
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Arithmetic negation: `-`
    Neg,
    /// Logical negation: `!`
    Not,
    /// Length of an array or string: `|e|`
    LengthOf,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Neg => write!(f, "-"),
            Self::Not => write!(f, "!"),
            Self::LengthOf => write!(f, "|..|"),
        }
    }
}

impl Expr {
    /// Creates an unannotated expression without a span.
    #[must_use]
    pub fn new(kind: ExprKind) -> Self {
        Self {
            kind,
            span: None,
            ty: OnceCell::new(),
        }
    }

    /// Attaches a source span.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Records the synthesized type of this node.
    ///
    /// Returns `false` and leaves the slot untouched if a type was already
    /// recorded.
    pub fn annotate(&self, ty: Type) -> bool {
        self.ty.set(ty).is_ok()
    }

    /// The recorded type, if the node has been checked.
    #[must_use]
    pub fn ty(&self) -> Option<&Type> {
        self.ty.get()
    }

    /// A literal constant.
    #[must_use]
    pub fn constant(value: Value) -> Self {
        Self::new(ExprKind::Constant(value))
    }

    /// Integer literal.
    #[must_use]
    pub fn int(value: i64) -> Self {
        Self::constant(Value::Int(value))
    }

    /// Boolean literal.
    #[must_use]
    pub fn bool(value: bool) -> Self {
        Self::constant(Value::Bool(value))
    }

    /// Character literal.
    #[must_use]
    pub fn char(value: char) -> Self {
        Self::constant(Value::Char(value))
    }

    /// String literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::constant(Value::String(value.into()))
    }

    /// Variable reference.
    #[must_use]
    pub fn var(name: impl Into<String>) -> Self {
        Self::new(ExprKind::Variable(name.into()))
    }

    /// `lhs op rhs`
    #[must_use]
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Self::new(ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    /// `lhs + rhs`
    #[must_use]
    pub fn add(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinaryOp::Add, lhs, rhs)
    }

    /// `op operand`
    #[must_use]
    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Self::new(ExprKind::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    /// `source[index]`
    #[must_use]
    pub fn index(source: Expr, index: Expr) -> Self {
        Self::new(ExprKind::IndexOf {
            source: Box::new(source),
            index: Box::new(index),
        })
    }

    /// `name(args...)`
    #[must_use]
    pub fn invoke(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::new(ExprKind::Invoke(Invocation {
            name: name.into(),
            args,
        }))
    }

    /// `[value; size]`
    #[must_use]
    pub fn generator(value: Expr, size: Expr) -> Self {
        Self::new(ExprKind::ArrayGenerator {
            value: Box::new(value),
            size: Box::new(size),
        })
    }

    /// `[e1, e2, ...]`
    #[must_use]
    pub fn array(elements: Vec<Expr>) -> Self {
        Self::new(ExprKind::ArrayInitialiser(elements))
    }

    /// `source.field`
    #[must_use]
    pub fn access(source: Expr, field: impl Into<String>) -> Self {
        Self::new(ExprKind::RecordAccess {
            source: Box::new(source),
            field: field.into(),
        })
    }

    /// `{f1: e1, ...}`
    #[must_use]
    pub fn record<S: Into<String>>(fields: Vec<(S, Expr)>) -> Self {
        Self::new(ExprKind::RecordConstructor(
            fields
                .into_iter()
                .map(|(name, expr)| (name.into(), expr))
                .collect(),
        ))
    }
}

impl Spanned for Expr {
    fn span(&self) -> Option<Span> {
        self.span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotate_is_write_once() {
        let expr = Expr::int(1);
        assert_eq!(expr.ty(), None);
        assert!(expr.annotate(Type::Int));
        assert!(!expr.annotate(Type::Bool));
        assert_eq!(expr.ty(), Some(&Type::Int));
    }

    #[test]
    fn test_with_span() {
        let span = Span::new(4, 9);
        let expr = Expr::var("x").with_span(span);
        assert_eq!(expr.span(), Some(span));
        assert_eq!(Expr::var("x").span(), None);
    }

    #[test]
    fn test_record_builder_keeps_order() {
        let expr = Expr::record(vec![("b", Expr::int(1)), ("a", Expr::bool(true))]);
        let ExprKind::RecordConstructor(fields) = &expr.kind else {
            panic!("expected a record constructor");
        };
        let names: Vec<&str> = fields.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn test_op_display() {
        assert_eq!(BinaryOp::LtEq.to_string(), "<=");
        assert_eq!(BinaryOp::Rem.to_string(), "%");
        assert_eq!(UnaryOp::Not.to_string(), "!");
    }
}
