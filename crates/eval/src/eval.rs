// SPDX-License-Identifier: MIT

//! Tree-walking evaluator. Parses and evaluates expressions against a
//! [`Context`] in one call; never mutates state, never performs I/O, and has
//! no way to reach outside the `Context` it is given — that's what makes it
//! safe to run against untrusted `when`/`check`/template expressions.

use crate::ast::{ArithOp, BoolOp, CompareOp, Expr, UnaryOp};
use crate::context::Context;
use crate::error::EvalError;
use crate::parser::parse;
use indexmap::IndexMap;
use ordo_core::Value;

pub fn safe_eval(expr: &str, context: &Context) -> Result<Value, EvalError> {
    let ast = parse(expr)?;
    eval_expr(&ast, context)
}

fn eval_expr(expr: &Expr, ctx: &Context) -> Result<Value, EvalError> {
    match expr {
        Expr::Null => Ok(Value::Null),
        Expr::Bool(b) => Ok(Value::Bool(*b)),
        Expr::Int(n) => Ok(Value::Int(*n)),
        Expr::Float(f) => Ok(Value::Float(*f)),
        Expr::Str(s) => Ok(Value::String(s.clone())),
        Expr::Ident(name) => ctx
            .get_var(name)
            .cloned()
            .ok_or_else(|| EvalError::UndefinedName(name.clone())),
        Expr::Attr(base, name) => {
            let base_val = eval_expr(base, ctx)?;
            base_val
                .get_attr(name)
                .cloned()
                .ok_or_else(|| EvalError::UndefinedName(format!("{name} (attribute access)")))
        }
        Expr::Index(base, index) => {
            let base_val = eval_expr(base, ctx)?;
            let index_val = eval_expr(index, ctx)?;
            base_val
                .get_index(&index_val)
                .cloned()
                .ok_or_else(|| EvalError::Runtime(format!("index out of range or wrong type: {index_val}")))
        }
        Expr::Unary(UnaryOp::Not, inner) => {
            let v = eval_expr(inner, ctx)?;
            Ok(Value::Bool(!v.is_truthy()))
        }
        Expr::Unary(UnaryOp::Neg, inner) => {
            let v = eval_expr(inner, ctx)?;
            match v {
                Value::Int(n) => Ok(Value::Int(-n)),
                Value::Float(f) => Ok(Value::Float(-f)),
                other => Err(EvalError::Type(format!("cannot negate {other}"))),
            }
        }
        Expr::BoolOp(BoolOp::And, lhs, rhs) => {
            let l = eval_expr(lhs, ctx)?;
            if !l.is_truthy() {
                Ok(l)
            } else {
                eval_expr(rhs, ctx)
            }
        }
        Expr::BoolOp(BoolOp::Or, lhs, rhs) => {
            let l = eval_expr(lhs, ctx)?;
            if l.is_truthy() {
                Ok(l)
            } else {
                eval_expr(rhs, ctx)
            }
        }
        Expr::Compare(first, rest) => eval_compare(first, rest, ctx),
        Expr::Arith(op, lhs, rhs) => {
            let l = eval_expr(lhs, ctx)?;
            let r = eval_expr(rhs, ctx)?;
            eval_arith(*op, l, r)
        }
        Expr::Call { func, args, kwargs } => eval_call(func, args, kwargs, ctx),
        Expr::Conditional { body, test, orelse } => {
            if eval_expr(test, ctx)?.is_truthy() {
                eval_expr(body, ctx)
            } else {
                eval_expr(orelse, ctx)
            }
        }
    }
}

fn eval_compare(first: &Expr, rest: &[(CompareOp, Expr)], ctx: &Context) -> Result<Value, EvalError> {
    let mut lhs = eval_expr(first, ctx)?;
    for (op, rhs_expr) in rest {
        let rhs = eval_expr(rhs_expr, ctx)?;
        let holds = compare_pair(*op, &lhs, &rhs)?;
        if !holds {
            return Ok(Value::Bool(false));
        }
        lhs = rhs;
    }
    Ok(Value::Bool(true))
}

fn compare_pair(op: CompareOp, lhs: &Value, rhs: &Value) -> Result<bool, EvalError> {
    match op {
        CompareOp::Eq => Ok(lhs == rhs),
        CompareOp::NotEq => Ok(lhs != rhs),
        CompareOp::Lt | CompareOp::LtEq | CompareOp::Gt | CompareOp::GtEq => {
            let ordering = numeric_or_string_cmp(lhs, rhs)?;
            Ok(match op {
                CompareOp::Lt => ordering.is_lt(),
                CompareOp::LtEq => ordering.is_le(),
                CompareOp::Gt => ordering.is_gt(),
                CompareOp::GtEq => ordering.is_ge(),
                CompareOp::Eq | CompareOp::NotEq => false,
            })
        }
    }
}

fn numeric_or_string_cmp(lhs: &Value, rhs: &Value) -> Result<std::cmp::Ordering, EvalError> {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => Ok(a.cmp(b)),
        (Value::String(a), Value::String(b)) => Ok(a.cmp(b)),
        _ => {
            let a = as_f64(lhs)?;
            let b = as_f64(rhs)?;
            a.partial_cmp(&b)
                .ok_or_else(|| EvalError::Type(format!("cannot order {lhs} and {rhs}")))
        }
    }
}

fn as_f64(value: &Value) -> Result<f64, EvalError> {
    match value {
        Value::Int(n) => Ok(*n as f64),
        Value::Float(f) => Ok(*f),
        other => Err(EvalError::Type(format!("expected a number, found {other}"))),
    }
}

fn eval_arith(op: ArithOp, lhs: Value, rhs: Value) -> Result<Value, EvalError> {
    if let ArithOp::Add = op {
        if let (Value::String(a), Value::String(b)) = (&lhs, &rhs) {
            return Ok(Value::String(format!("{a}{b}")));
        }
        if let (Value::Array(a), Value::Array(b)) = (&lhs, &rhs) {
            let mut out = a.clone();
            out.extend(b.clone());
            return Ok(Value::Array(out));
        }
    }
    if let (Value::Int(a), Value::Int(b)) = (&lhs, &rhs) {
        return Ok(Value::Int(match op {
            ArithOp::Add => a + b,
            ArithOp::Sub => a - b,
            ArithOp::Mul => a * b,
        }));
    }
    let a = as_f64(&lhs)?;
    let b = as_f64(&rhs)?;
    Ok(Value::Float(match op {
        ArithOp::Add => a + b,
        ArithOp::Sub => a - b,
        ArithOp::Mul => a * b,
    }))
}

/// Resolves and invokes a call target. Bare identifiers look up the
/// context's native function table directly; `udf.<name>(...)` calls are
/// resolved against the same table under `<name>` — the `udf.` prefix is
/// surface syntax only, not a second namespace. Any other attribute-based
/// call target is rejected: attribute access in this grammar is a field
/// read, never a side-effecting method call.
fn eval_call(func: &Expr, args: &[Expr], kwargs: &[(String, Expr)], ctx: &Context) -> Result<Value, EvalError> {
    let name = match func {
        Expr::Ident(name) => name.clone(),
        Expr::Attr(base, name) => match base.as_ref() {
            Expr::Ident(ns) if ns == "udf" => name.clone(),
            _ => return Err(EvalError::Unsupported(format!("cannot call through attribute access on {base:?}"))),
        },
        other => return Err(EvalError::Unsupported(format!("not callable: {other:?}"))),
    };

    let native = ctx
        .get_fn(&name)
        .cloned()
        .ok_or_else(|| EvalError::UnknownFunction(name.clone()))?;

    let arg_values = args
        .iter()
        .map(|a| eval_expr(a, ctx))
        .collect::<Result<Vec<_>, _>>()?;
    let mut kwarg_values = IndexMap::new();
    for (key, expr) in kwargs {
        kwarg_values.insert(key.clone(), eval_expr(expr, ctx)?);
    }
    native(&arg_values, &kwarg_values)
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod tests;
