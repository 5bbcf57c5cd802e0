//! Statement checking.
//!
//! Statements thread a mutable [`Environment`] through a method body:
//! - declarations bind names, `var` declarations resolve their type cell
//! - assignments to `var` variables rebind the variable's current type
//! - `if`/`else` checks each arm in its own copy, then merges them back
//! - `for` and `match` arms get a scoped copy that is discarded afterwards
//! - `while` and `switch` bodies share the enclosing environment

use super::Context;
use super::expr::{check_invocation, synth};
use super::ty::check_value_type;
use crate::context::Environment;
use crate::error::{Result, TypeError, TypeErrorKind};
use crate::types::{KindSet, Type};
use whilec_log::trace;
use whilec_syntax::Span;
use whilec_syntax::ast::{ExprKind, Stmt, StmtKind, VariableDeclaration};

/// Checks statements in order, stopping at the first error.
///
/// # Errors
///
/// The first type error in `stmts`.
pub fn check_block(ctx: &Context<'_>, env: &mut Environment, stmts: &[Stmt]) -> Result<()> {
    stmts.iter().try_for_each(|stmt| check_stmt(ctx, env, stmt))
}

/// Checks one statement, updating `env` with any bindings it introduces.
///
/// # Errors
///
/// The first type error in `stmt` or its children.
pub fn check_stmt(ctx: &Context<'_>, env: &mut Environment, stmt: &Stmt) -> Result<()> {
    let subtyping = ctx.subtyping();
    match &stmt.kind {
        StmtKind::Assert(expr) => {
            let ty = synth(ctx, env, expr)?;
            subtyping.check_instance_of(&ty, KindSet::BOOL, expr.span)?;
            Ok(())
        }

        StmtKind::Assign { lhs, rhs } => {
            if !matches!(
                lhs.kind,
                ExprKind::Variable(_) | ExprKind::IndexOf { .. } | ExprKind::RecordAccess { .. }
            ) {
                return Err(TypeError::internal("invalid assignment target", lhs.span));
            }
            let lt = synth(ctx, env, lhs)?;
            let rt = synth(ctx, env, rhs)?;
            if let ExprKind::Variable(name) = &lhs.kind {
                if env.refine(name, rt.clone()) {
                    return Ok(());
                }
            }
            subtyping.check_subtype(&lt, &rt, rhs.span)
        }

        StmtKind::Break | StmtKind::Continue => Ok(()),

        StmtKind::For {
            declaration,
            condition,
            increment,
            body,
        } => {
            check_variable_declaration(ctx, env, declaration, stmt.span)?;
            let mut scope = env.clone();
            scope.put(declaration.name.clone(), declaration.ty.clone());

            let ct = synth(ctx, &scope, condition)?;
            subtyping.check_instance_of(&ct, KindSet::BOOL, condition.span)?;
            check_stmt(ctx, &mut scope, increment)?;
            check_block(ctx, &mut scope, body)
        }

        StmtKind::IfElse {
            condition,
            true_branch,
            false_branch,
        } => {
            let ct = synth(ctx, env, condition)?;
            subtyping.check_instance_of(&ct, KindSet::BOOL, condition.span)?;

            let mut true_env = env.clone();
            let mut false_env = env.clone();
            check_block(ctx, &mut true_env, true_branch)?;
            check_block(ctx, &mut false_env, false_branch)?;

            env.merge(&true_env, &false_env, subtyping)
                .map_err(|err| err.or_at(stmt.span))
        }

        StmtKind::Invoke(invocation) => {
            check_invocation(ctx, env, invocation, stmt.span, false)?;
            Ok(())
        }

        StmtKind::Print(expr) => {
            synth(ctx, env, expr)?;
            Ok(())
        }

        StmtKind::Return(Some(expr)) => {
            let ty = synth(ctx, env, expr)?;
            subtyping.check_subtype(ctx.return_type(), &ty, expr.span)
        }

        StmtKind::Return(None) => {
            let ret = ctx.return_type();
            match subtyping.expand(ret, stmt.span)? {
                Type::Void => Ok(()),
                _ => Err(TypeError::mismatch(ret, &Type::Void, stmt.span)),
            }
        }

        StmtKind::Switch { selector, cases } => {
            let st = synth(ctx, env, selector)?;
            for case in cases {
                if let Some(value) = &case.value {
                    let vt = synth(ctx, env, value)?;
                    subtyping.check_subtype(&st, &vt, value.span)?;
                }
                check_block(ctx, env, &case.body)?;
            }
            Ok(())
        }

        StmtKind::Match { selector, cases } => {
            let st = synth(ctx, env, selector)?;
            for case in cases {
                let span = case.span.or(stmt.span);
                check_value_type(ctx.registry(), &case.ty, span)?;
                subtyping.check_subtype(&st, &case.ty, span)?;

                let mut scope = env.clone();
                scope.put(case.name.clone(), case.ty.clone());
                trace!("match case `{}`: {} narrowed to {}", case.name, st, case.ty);
                check_block(ctx, &mut scope, &case.body)?;
            }
            Ok(())
        }

        StmtKind::VariableDeclaration(declaration) => {
            check_variable_declaration(ctx, env, declaration, stmt.span)?;
            env.put(declaration.name.clone(), declaration.ty.clone());
            Ok(())
        }

        StmtKind::VariableInferredDeclaration { name, ty, init } => {
            if env.contains(name) {
                return Err(TypeErrorKind::DuplicateDeclaration { name: name.clone() }.at(stmt.span));
            }
            let it = synth(ctx, env, init)?;
            if !ty.is_inferred() {
                return Err(TypeErrorKind::InferredSlotResolved { name: name.clone() }.at(stmt.span));
            }
            trace!("resolve `var {}` to {}", name, it);
            ty.set(it.clone());
            env.declare_inferred(name.clone(), it);
            Ok(())
        }

        StmtKind::While { condition, body } => {
            let ct = synth(ctx, env, condition)?;
            subtyping.check_instance_of(&ct, KindSet::BOOL, condition.span)?;
            check_block(ctx, env, body)
        }
    }
}

/// Checks an explicitly typed declaration without binding it.
fn check_variable_declaration(
    ctx: &Context<'_>,
    env: &Environment,
    declaration: &VariableDeclaration,
    span: Option<Span>,
) -> Result<()> {
    if env.contains(&declaration.name) {
        return Err(TypeErrorKind::DuplicateDeclaration {
            name: declaration.name.clone(),
        }
        .at(span));
    }
    check_value_type(ctx.registry(), &declaration.ty, span)?;
    if let Some(init) = &declaration.init {
        let ty = synth(ctx, env, init)?;
        ctx.subtyping().check_subtype(&declaration.ty, &ty, init.span.or(span))?;
    }
    Ok(())
}
