//! Expression type synthesis.
//!
//! [`synth`] computes the type of an expression bottom-up and records it on
//! the node. A node that already carries a type is not checked again.

use super::Context;
use super::ty::check_not_void;
use crate::context::Environment;
use crate::error::{Result, TypeError, TypeErrorKind};
use crate::types::{KindSet, Type};
use whilec_log::trace;
use whilec_syntax::Span;
use whilec_syntax::ast::{BinaryOp, Expr, ExprKind, Invocation, UnaryOp, Value};

/// Synthesizes the type of `expr` in `env` and annotates the node with it.
///
/// # Errors
///
/// The first type error found in `expr` or its children.
pub fn synth(ctx: &Context<'_>, env: &Environment, expr: &Expr) -> Result<Type> {
    if let Some(ty) = expr.ty() {
        return Ok(ty.clone());
    }
    let ty = synth_kind(ctx, env, expr)?;
    expr.annotate(ty.clone());
    Ok(ty)
}

fn synth_kind(ctx: &Context<'_>, env: &Environment, expr: &Expr) -> Result<Type> {
    let subtyping = ctx.subtyping();
    match &expr.kind {
        ExprKind::Binary { op, lhs, rhs } => {
            let lt = synth(ctx, env, lhs)?;
            let rt = synth(ctx, env, rhs)?;
            match op {
                BinaryOp::And | BinaryOp::Or => {
                    subtyping.check_instance_of(&lt, KindSet::BOOL, lhs.span)?;
                    subtyping.check_instance_of(&rt, KindSet::BOOL, rhs.span)?;
                    Ok(Type::Bool)
                }
                BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => {
                    subtyping.check_instance_of(&lt, KindSet::INT, lhs.span)?;
                    subtyping.check_instance_of(&rt, KindSet::INT, rhs.span)?;
                    Ok(Type::Int)
                }
                // Operands of any type may be compared for equality.
                BinaryOp::Eq | BinaryOp::Neq => Ok(Type::Bool),
                BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
                    subtyping.check_instance_of(&lt, KindSet::INT, lhs.span)?;
                    subtyping.check_instance_of(&rt, KindSet::INT, rhs.span)?;
                    Ok(Type::Bool)
                }
            }
        }

        ExprKind::Constant(value) => type_of(ctx, value, expr.span),

        ExprKind::IndexOf { source, index } => {
            let src = synth(ctx, env, source)?;
            let idx = synth(ctx, env, index)?;
            subtyping.check_instance_of(&idx, KindSet::INT, index.span)?;
            match subtyping.check_instance_of(&src, KindSet::SEQUENCE, source.span)? {
                Type::Array(element) => Ok((**element).clone()),
                Type::String => Ok(Type::Char),
                other => Err(TypeError::internal(
                    format!("indexed value of type {other} passed the sequence check"),
                    expr.span,
                )),
            }
        }

        ExprKind::Invoke(invocation) => check_invocation(ctx, env, invocation, expr.span, true),

        ExprKind::ArrayGenerator { value, size } => {
            let element = synth(ctx, env, value)?;
            let sz = synth(ctx, env, size)?;
            subtyping.check_instance_of(&sz, KindSet::INT, size.span)?;
            Ok(Type::array(element))
        }

        ExprKind::ArrayInitialiser(elements) => {
            let types = elements
                .iter()
                .map(|e| synth(ctx, env, e))
                .collect::<Result<Vec<_>>>()?;
            let element = subtyping.least_upper_bound(&types, expr.span)?;
            Ok(Type::array(element))
        }

        ExprKind::RecordAccess { source, field } => {
            let src = synth(ctx, env, source)?;
            let record = access_target(ctx, &src, field, expr.span)?;
            let record = subtyping.check_instance_of(&record, KindSet::RECORD, source.span)?;
            record.field(field).cloned().ok_or_else(|| {
                TypeErrorKind::UnknownField {
                    field: field.clone(),
                    ty: src.clone(),
                }
                .at(expr.span)
            })
        }

        ExprKind::RecordConstructor(fields) => {
            let mut typed = Vec::with_capacity(fields.len());
            for (i, (name, value)) in fields.iter().enumerate() {
                if fields[..i].iter().any(|(other, _)| other == name) {
                    return Err(TypeErrorKind::DuplicateDeclaration { name: name.clone() }
                        .at(value.span.or(expr.span)));
                }
                typed.push((synth(ctx, env, value)?, name.as_str()));
            }
            Ok(Type::record(typed))
        }

        ExprKind::Unary { op, operand } => {
            let ty = synth(ctx, env, operand)?;
            match op {
                UnaryOp::Neg => {
                    subtyping.check_instance_of(&ty, KindSet::INT, operand.span)?;
                    Ok(Type::Int)
                }
                UnaryOp::Not => {
                    subtyping.check_instance_of(&ty, KindSet::BOOL, operand.span)?;
                    Ok(Type::Bool)
                }
                UnaryOp::LengthOf => {
                    subtyping.check_instance_of(&ty, KindSet::SEQUENCE, operand.span)?;
                    Ok(Type::Int)
                }
            }
        }

        ExprKind::Variable(name) => env.get(name).cloned().ok_or_else(|| {
            TypeErrorKind::UndeclaredVariable { name: name.clone() }.at(expr.span)
        }),
    }
}

/// The type a field is looked up in: the source itself, or the
/// intersection of its members when it is a union of records.
fn access_target(ctx: &Context<'_>, src: &Type, field: &str, span: Option<Span>) -> Result<Type> {
    let subtyping = ctx.subtyping();
    let expanded = subtyping.expand(src, span)?;
    let Type::Union(members) = expanded else {
        return Ok(expanded.clone());
    };
    match subtyping.as_records(members, span)? {
        Some(records) => {
            trace!("access `{}` on union {}", field, src);
            subtyping.record_intersection(&records, span)?.ok_or_else(|| {
                TypeErrorKind::UnknownField {
                    field: field.to_string(),
                    ty: src.clone(),
                }
                .at(span)
            })
        }
        None => Ok(expanded.clone()),
    }
}

/// Checks a call and returns the callee's return type.
///
/// Arity is checked before any argument. With `value_required` the callee
/// must not return `void`.
///
/// # Errors
///
/// `UnknownMethod`, `ArityMismatch`, `TypeMismatch` for an argument, or
/// `VoidNotPermitted`.
pub fn check_invocation(
    ctx: &Context<'_>,
    env: &Environment,
    invocation: &Invocation,
    span: Option<Span>,
    value_required: bool,
) -> Result<Type> {
    let Some(signature) = ctx.registry().method(&invocation.name) else {
        return Err(TypeErrorKind::UnknownMethod {
            name: invocation.name.clone(),
        }
        .at(span));
    };

    if invocation.args.len() != signature.params.len() {
        return Err(TypeErrorKind::ArityMismatch {
            name: invocation.name.clone(),
            expected: signature.params.len(),
            found: invocation.args.len(),
        }
        .at(span));
    }

    for (arg, param) in invocation.args.iter().zip(&signature.params) {
        let ty = synth(ctx, env, arg)?;
        ctx.subtyping().check_subtype(param, &ty, arg.span.or(span))?;
    }

    if value_required {
        check_not_void(&signature.ret, span)?;
    }
    Ok(signature.ret.clone())
}

/// Type of a literal, derived from its shape.
fn type_of(ctx: &Context<'_>, value: &Value, span: Option<Span>) -> Result<Type> {
    match value {
        Value::Bool(_) => Ok(Type::Bool),
        Value::Char(_) => Ok(Type::Char),
        Value::Int(_) => Ok(Type::Int),
        Value::String(_) => Ok(Type::String),
        Value::Array(items) => {
            let types = items
                .iter()
                .map(|item| type_of(ctx, item, span))
                .collect::<Result<Vec<_>>>()?;
            Ok(Type::array(ctx.subtyping().least_upper_bound(&types, span)?))
        }
        Value::Record(fields) => {
            let mut typed = Vec::with_capacity(fields.len());
            for (i, (name, item)) in fields.iter().enumerate() {
                if fields[..i].iter().any(|(other, _)| other == name) {
                    return Err(TypeErrorKind::DuplicateDeclaration { name: name.clone() }.at(span));
                }
                typed.push((type_of(ctx, item, span)?, name.as_str()));
            }
            Ok(Type::record(typed))
        }
    }
}
