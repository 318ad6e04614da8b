// SPDX-License-Identifier: MIT

//! Renders value trees against a context. Scalars and non-matching strings
//! pass through unchanged; a string that is exactly `{{ identifier }}`
//! (whitespace-trimmed) returns the raw bound value, type and all; any other
//! string containing template syntax renders to its string form.

use crate::error::RenderError;
use crate::parse::{parse_template, Node};
use ordo_core::Value;
use ordo_eval::{safe_eval, Context};

/// Matches the whole string against `{{ <identifier> }}` with nothing else
/// around it. Deliberately narrower than the general expression grammar —
/// attribute/index access and calls always go through string interpolation.
fn raw_passthrough_name(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    let inner = trimmed.strip_prefix("{{")?.strip_suffix("}}")?;
    let name = inner.trim();
    let mut chars = name.chars();
    let first_ok = chars.next().map(|c| c.is_alphabetic() || c == '_').unwrap_or(false);
    let rest_ok = chars.all(|c| c.is_alphanumeric() || c == '_');
    if first_ok && rest_ok && !name.is_empty() {
        Some(name)
    } else {
        None
    }
}

pub fn render_value(value: &Value, ctx: &Context) -> Result<Value, RenderError> {
    match value {
        Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) => Ok(value.clone()),
        Value::String(s) => render_string(s, ctx),
        Value::Array(items) => {
            let rendered = items
                .iter()
                .map(|item| render_value(item, ctx))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Array(rendered))
        }
        Value::Object(map) => {
            let mut out = ordo_core::Map::new();
            for (key, val) in map {
                out.insert(key.clone(), render_value(val, ctx)?);
            }
            Ok(Value::Object(out))
        }
    }
}

fn render_string(s: &str, ctx: &Context) -> Result<Value, RenderError> {
    if let Some(name) = raw_passthrough_name(s) {
        return ctx
            .get_var(name)
            .cloned()
            .ok_or_else(|| RenderError::UndefinedName(name.to_string()));
    }
    if !s.contains("{{") && !s.contains("{%") {
        return Ok(Value::String(s.to_string()));
    }
    let nodes = parse_template(s)?;
    let mut out = String::new();
    render_nodes(&nodes, ctx, &mut out)?;
    Ok(Value::String(out))
}

fn render_nodes(nodes: &[Node], ctx: &Context, out: &mut String) -> Result<(), RenderError> {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Expr(expr) => {
                let value = safe_eval(expr, ctx)?;
                out.push_str(&value.to_string());
            }
            Node::If { test, body, else_body } => {
                if safe_eval(test, ctx)?.is_truthy() {
                    render_nodes(body, ctx, out)?;
                } else {
                    render_nodes(else_body, ctx, out)?;
                }
            }
            Node::For { var, iter, body } => {
                let iterable = safe_eval(iter, ctx)?;
                let items = match &iterable {
                    Value::Array(items) => items.clone(),
                    Value::Null => return Err(RenderError::NotIterable("null".to_string())),
                    Value::Bool(_) => return Err(RenderError::NotIterable("boolean".to_string())),
                    Value::Int(_) => return Err(RenderError::NotIterable("integer".to_string())),
                    Value::Float(_) => return Err(RenderError::NotIterable("number".to_string())),
                    Value::String(_) => return Err(RenderError::NotIterable("string".to_string())),
                    Value::Object(_) => return Err(RenderError::NotIterable("object".to_string())),
                };
                for item in items {
                    let mut loop_ctx = ctx.clone();
                    loop_ctx.set_var(var.clone(), item);
                    render_nodes(body, &loop_ctx, out)?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
