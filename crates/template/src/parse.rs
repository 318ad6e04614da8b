// SPDX-License-Identifier: MIT

//! Tokenizes and parses the template subset: `{{ expr }}` interpolation,
//! `{% if %} / {% else %} / {% endif %}` conditionals, and
//! `{% for x in expr %} / {% endfor %}` loops. No other tags are
//! recognized — this is deliberately a small subset, not a general
//! templating language.

use crate::error::RenderError;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(String),
    Expr(String),
    If {
        test: String,
        body: Vec<Node>,
        else_body: Vec<Node>,
    },
    For {
        var: String,
        iter: String,
        body: Vec<Node>,
    },
}

#[derive(Debug, Clone, PartialEq)]
enum RawToken {
    Text(String),
    Expr(String),
    IfTag(String),
    Else,
    EndIf,
    ForTag(String, String),
    EndFor,
}

pub fn parse_template(src: &str) -> Result<Vec<Node>, RenderError> {
    let tokens = lex(src)?;
    let mut pos = 0;
    let (nodes, _) = parse_nodes(&tokens, &mut pos)?;
    if pos != tokens.len() {
        return Err(RenderError::Malformed(
            "unexpected closing tag with no matching opener".to_string(),
        ));
    }
    Ok(nodes)
}

fn lex(src: &str) -> Result<Vec<RawToken>, RenderError> {
    let mut tokens = Vec::new();
    let mut rest = src;
    loop {
        let next_expr = rest.find("{{");
        let next_tag = rest.find("{%");
        let next = match (next_expr, next_tag) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        };
        let Some(start) = next else {
            if !rest.is_empty() {
                tokens.push(RawToken::Text(rest.to_string()));
            }
            break;
        };
        if start > 0 {
            tokens.push(RawToken::Text(rest[..start].to_string()));
        }
        let is_expr = rest[start..].starts_with("{{");
        let close = if is_expr { "}}" } else { "%}" };
        let body_start = start + 2;
        let Some(close_rel) = rest[body_start..].find(close) else {
            return Err(RenderError::Malformed(format!(
                "unclosed {} tag",
                if is_expr { "{{ }}" } else { "{% %}" }
            )));
        };
        let inner = rest[body_start..body_start + close_rel].trim();
        if is_expr {
            tokens.push(RawToken::Expr(inner.to_string()));
        } else {
            tokens.push(parse_tag(inner)?);
        }
        rest = &rest[body_start + close_rel + close.len()..];
    }
    Ok(tokens)
}

fn parse_tag(inner: &str) -> Result<RawToken, RenderError> {
    if let Some(rest) = inner.strip_prefix("if ") {
        return Ok(RawToken::IfTag(rest.trim().to_string()));
    }
    if inner == "else" {
        return Ok(RawToken::Else);
    }
    if inner == "endif" {
        return Ok(RawToken::EndIf);
    }
    if let Some(rest) = inner.strip_prefix("for ") {
        let rest = rest.trim();
        let mid = rest
            .find(" in ")
            .ok_or_else(|| RenderError::Malformed(format!("malformed for tag: {{% for {rest} %}}")))?;
        let var = rest[..mid].trim().to_string();
        let iter = rest[mid + 4..].trim().to_string();
        return Ok(RawToken::ForTag(var, iter));
    }
    if inner == "endfor" {
        return Ok(RawToken::EndFor);
    }
    Err(RenderError::Malformed(format!("unknown tag: {{% {inner} %}}")))
}

/// Parses a run of nodes until EOF or an `else`/`endif`/`endfor` token,
/// which is left unconsumed so the caller can inspect it.
fn parse_nodes(tokens: &[RawToken], pos: &mut usize) -> Result<(Vec<Node>, ()), RenderError> {
    let mut nodes = Vec::new();
    while *pos < tokens.len() {
        match &tokens[*pos] {
            RawToken::Text(s) => {
                nodes.push(Node::Text(s.clone()));
                *pos += 1;
            }
            RawToken::Expr(s) => {
                nodes.push(Node::Expr(s.clone()));
                *pos += 1;
            }
            RawToken::IfTag(test) => {
                let test = test.clone();
                *pos += 1;
                let (body, _) = parse_nodes(tokens, pos)?;
                let mut else_body = Vec::new();
                if matches!(tokens.get(*pos), Some(RawToken::Else)) {
                    *pos += 1;
                    let (eb, _) = parse_nodes(tokens, pos)?;
                    else_body = eb;
                }
                match tokens.get(*pos) {
                    Some(RawToken::EndIf) => *pos += 1,
                    _ => return Err(RenderError::Malformed("missing {% endif %}".to_string())),
                }
                nodes.push(Node::If { test, body, else_body });
            }
            RawToken::ForTag(var, iter) => {
                let var = var.clone();
                let iter = iter.clone();
                *pos += 1;
                let (body, _) = parse_nodes(tokens, pos)?;
                match tokens.get(*pos) {
                    Some(RawToken::EndFor) => *pos += 1,
                    _ => return Err(RenderError::Malformed("missing {% endfor %}".to_string())),
                }
                nodes.push(Node::For { var, iter, body });
            }
            RawToken::Else | RawToken::EndIf | RawToken::EndFor => break,
        }
    }
    Ok((nodes, ()))
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
