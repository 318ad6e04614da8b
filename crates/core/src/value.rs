// SPDX-License-Identifier: MIT

//! The opaque JSON-like value every step passes around.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered string-keyed mapping. Iteration order is insertion order;
/// equality is order-independent (see [`IndexMap`]'s `PartialEq`).
pub type Map = IndexMap<String, Value>;

/// A null, boolean, integer, float, string, sequence, or mapping.
///
/// All inter-step data uses this shape. Equality is structural: two
/// `Object`s compare equal regardless of key order, matching the "canonical
/// key ordering" invariant in the data model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

impl Value {
    pub fn object() -> Self {
        Value::Object(Map::new())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(m) => Some(m),
            _ => None,
        }
    }

    /// Python-style truthiness: used by `when`/`assert` and `{% if %}`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Array(a) => !a.is_empty(),
            Value::Object(m) => !m.is_empty(),
        }
    }

    /// Attribute access: `Object` field lookup, falling back to nothing for
    /// other variants (the evaluator turns a miss into a runtime error).
    pub fn get_attr(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Object(m) => m.get(name),
            _ => None,
        }
    }

    /// Indexing: `Object` by string key, `Array` by integer index.
    pub fn get_index(&self, index: &Value) -> Option<&Value> {
        match (self, index) {
            (Value::Object(m), Value::String(k)) => m.get(k),
            (Value::Array(a), Value::Int(i)) => {
                let i = if *i < 0 { a.len() as i64 + i } else { *i };
                usize::try_from(i).ok().and_then(|i| a.get(i))
            }
            _ => None,
        }
    }

    /// Stable, type-tagged canonical serialization used by the trace
    /// compiler's data-flow map. Prefixes each leaf with a type tag and
    /// length-prefixes strings, so e.g. the string `"1"` and the integer `1`
    /// never collide, nor can a string boundary be forged by concatenation.
    pub fn canonical_key(&self) -> String {
        let mut out = String::new();
        write_canonical(self, &mut out);
        out
    }
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("n:"),
        Value::Bool(b) => {
            out.push_str("b:");
            out.push_str(if *b { "true" } else { "false" });
        }
        Value::Int(i) => {
            out.push_str("i:");
            out.push_str(&i.to_string());
        }
        Value::Float(f) => {
            out.push_str("f:");
            out.push_str(&f.to_string());
        }
        Value::String(s) => {
            out.push_str("s:");
            out.push_str(&s.len().to_string());
            out.push(':');
            out.push_str(s);
        }
        Value::Array(items) => {
            out.push_str("a:[");
            for item in items {
                write_canonical(item, out);
                out.push(',');
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push_str("o:{");
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            for key in keys {
                out.push_str("s:");
                out.push_str(&key.len().to_string());
                out.push(':');
                out.push_str(key);
                out.push('=');
                write_canonical(&map[key], out);
                out.push(',');
            }
            out.push('}');
        }
    }
}

/// Formats a float the way Python's `str()` (and so Jinja's string
/// interpolation) does: a whole number still carries a trailing `.0` so
/// `5.0` doesn't read as `5` once interpolated into a template string.
fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x < 0.0 { "-inf" } else { "inf" }.to_string();
    }
    let rendered = x.to_string();
    if rendered.contains('.') || rendered.contains('e') || rendered.contains('E') {
        rendered
    } else {
        format!("{rendered}.0")
    }
}

impl fmt::Display for Value {
    /// Renders the way a template context wants a scalar to appear when
    /// interpolated into a larger string (not the debug/JSON form).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, ""),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{}", format_float(*x)),
            Value::String(s) => write!(f, "{s}"),
            Value::Array(_) | Value::Object(_) => {
                write!(f, "{}", serde_json::to_string(&to_json(self)).unwrap_or_default())
            }
        }
    }
}

/// Convert to `serde_json::Value` for interop with fixtures, schemas, and
/// the `--json` CLI output mode.
pub fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(i) => serde_json::Value::Number((*i).into()),
        Value::Float(x) => serde_json::Number::from_f64(*x)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Array(items) => serde_json::Value::Array(items.iter().map(to_json).collect()),
        Value::Object(map) => {
            let mut obj = serde_json::Map::new();
            for (k, v) in map {
                obj.insert(k.clone(), to_json(v));
            }
            serde_json::Value::Object(obj)
        }
    }
}

/// Convert from `serde_json::Value`, e.g. when loading `input.json` or a
/// tool's JSON result.
pub fn from_json(value: &serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else {
                Value::Float(n.as_f64().unwrap_or(0.0))
            }
        }
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Array(items) => Value::Array(items.iter().map(from_json).collect()),
        serde_json::Value::Object(obj) => {
            let mut map = Map::new();
            for (k, v) in obj {
                map.insert(k.clone(), from_json(v));
            }
            Value::Object(map)
        }
    }
}

#[cfg(test)]
#[path = "value_tests.rs"]
mod tests;
