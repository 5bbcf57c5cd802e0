//! Statement nodes.

use super::{Expr, Invocation, Type};
use crate::span::{Span, Spanned};
use std::cell::RefCell;

/// A statement with its source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    /// What kind of statement this is
    pub kind: StmtKind,
    /// Source location, if the node came from source
    pub span: Option<Span>,
}

/// The closed set of statement forms.
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// `assert e`
    Assert(Expr),

    /// `lhs = rhs`
    Assign {
        /// Assignment target
        lhs: Expr,
        /// Assigned value
        rhs: Expr,
    },

    /// `break`
    Break,

    /// `continue`
    Continue,

    /// `for (T x = init; condition; increment) { body }`
    For {
        /// Loop variable declaration
        declaration: VariableDeclaration,
        /// Loop condition
        condition: Expr,
        /// Statement run after each iteration
        increment: Box<Stmt>,
        /// Loop body
        body: Vec<Stmt>,
    },

    /// `if (condition) { .. } else { .. }`
    IfElse {
        /// Branch condition
        condition: Expr,
        /// Statements run when the condition holds
        true_branch: Vec<Stmt>,
        /// Statements run otherwise, empty without `else`
        false_branch: Vec<Stmt>,
    },

    /// A call whose result is discarded
    Invoke(Invocation),

    /// `print e`
    Print(Expr),

    /// `return` or `return e`
    Return(Option<Expr>),

    /// `switch (e) { case v: .. default: .. }`
    Switch {
        /// Selector
        selector: Expr,
        /// Cases in source order
        cases: Vec<SwitchCase>,
    },

    /// `match (e) { case T x: .. }`
    Match {
        /// Selector
        selector: Expr,
        /// Cases in source order
        cases: Vec<MatchCase>,
    },

    /// `T x` or `T x = e`
    VariableDeclaration(VariableDeclaration),

    /// `var x = e`
    VariableInferredDeclaration {
        /// Variable name
        name: String,
        /// Type slot resolved from the initializer
        ty: TypeCell,
        /// Initializer
        init: Expr,
    },

    /// `while (condition) { body }`
    While {
        /// Loop condition
        condition: Expr,
        /// Loop body
        body: Vec<Stmt>,
    },
}

/// An explicitly typed variable declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    /// Variable name
    pub name: String,
    /// Declared type
    pub ty: Type,
    /// Optional initializer
    pub init: Option<Expr>,
}

/// One arm of a `switch`.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    /// Case value, `None` for `default`
    pub value: Option<Expr>,
    /// Case body
    pub body: Vec<Stmt>,
}

impl SwitchCase {
    /// Returns `true` for the `default` arm.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        self.value.is_none()
    }
}

/// One arm of a `match`: `case T name: body`.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCase {
    /// Type tested against the selector
    pub ty: Type,
    /// Name bound to the narrowed selector in the body
    pub name: String,
    /// Case body
    pub body: Vec<Stmt>,
    /// Source location
    pub span: Option<Span>,
}

/// A type slot that starts out [`Type::Inferred`] and may be rewritten.
///
/// Inferred declarations are resolved in place once their initializer has
/// been checked. Writes go through [`TypeCell::set`] so every resolution is
/// visible at the call site.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeCell(RefCell<Type>);

impl TypeCell {
    /// A slot holding [`Type::Inferred`].
    #[must_use]
    pub fn new() -> Self {
        Self(RefCell::new(Type::Inferred))
    }

    /// A copy of the current type.
    #[must_use]
    pub fn get(&self) -> Type {
        self.0.borrow().clone()
    }

    /// Replaces the current type.
    pub fn set(&self, ty: Type) {
        *self.0.borrow_mut() = ty;
    }

    /// Returns `true` while the slot is still unresolved.
    #[must_use]
    pub fn is_inferred(&self) -> bool {
        self.0.borrow().is_inferred()
    }
}

impl Default for TypeCell {
    fn default() -> Self {
        Self::new()
    }
}

impl Stmt {
    /// Creates a statement without a span.
    #[must_use]
    pub fn new(kind: StmtKind) -> Self {
        Self { kind, span: None }
    }

    /// Attaches a source span.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// `T name = init`
    #[must_use]
    pub fn declare(name: impl Into<String>, ty: Type, init: Option<Expr>) -> Self {
        Self::new(StmtKind::VariableDeclaration(VariableDeclaration {
            name: name.into(),
            ty,
            init,
        }))
    }

    /// `var name = init`
    #[must_use]
    pub fn infer(name: impl Into<String>, init: Expr) -> Self {
        Self::new(StmtKind::VariableInferredDeclaration {
            name: name.into(),
            ty: TypeCell::new(),
            init,
        })
    }

    /// `lhs = rhs`
    #[must_use]
    pub fn assign(lhs: Expr, rhs: Expr) -> Self {
        Self::new(StmtKind::Assign { lhs, rhs })
    }

    /// `assert e`
    #[must_use]
    pub fn assert(expr: Expr) -> Self {
        Self::new(StmtKind::Assert(expr))
    }

    /// `print e`
    #[must_use]
    pub fn print(expr: Expr) -> Self {
        Self::new(StmtKind::Print(expr))
    }

    /// `return e`
    #[must_use]
    pub fn ret(expr: Option<Expr>) -> Self {
        Self::new(StmtKind::Return(expr))
    }

    /// `if (condition) { .. } else { .. }`
    #[must_use]
    pub fn if_else(condition: Expr, true_branch: Vec<Stmt>, false_branch: Vec<Stmt>) -> Self {
        Self::new(StmtKind::IfElse {
            condition,
            true_branch,
            false_branch,
        })
    }

    /// `while (condition) { body }`
    #[must_use]
    pub fn while_loop(condition: Expr, body: Vec<Stmt>) -> Self {
        Self::new(StmtKind::While { condition, body })
    }

    /// `for (declaration; condition; increment) { body }`
    #[must_use]
    pub fn for_loop(
        declaration: VariableDeclaration,
        condition: Expr,
        increment: Stmt,
        body: Vec<Stmt>,
    ) -> Self {
        Self::new(StmtKind::For {
            declaration,
            condition,
            increment: Box::new(increment),
            body,
        })
    }

    /// `switch (selector) { cases }`
    #[must_use]
    pub fn switch(selector: Expr, cases: Vec<SwitchCase>) -> Self {
        Self::new(StmtKind::Switch { selector, cases })
    }

    /// `match (selector) { cases }`
    #[must_use]
    pub fn match_on(selector: Expr, cases: Vec<MatchCase>) -> Self {
        Self::new(StmtKind::Match { selector, cases })
    }

    /// `name(args...)` as a statement
    #[must_use]
    pub fn invoke(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::new(StmtKind::Invoke(Invocation {
            name: name.into(),
            args,
        }))
    }
}

impl Spanned for Stmt {
    fn span(&self) -> Option<Span> {
        self.span
    }
}

impl Spanned for MatchCase {
    fn span(&self) -> Option<Span> {
        self.span
    }
}
