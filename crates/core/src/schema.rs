// SPDX-License-Identifier: MIT

//! A subset of a standard structural schema format: `type`, `properties`,
//! `required`, `items`. Used for optional validation at tool boundaries and
//! for the compiler's structural inference.

use crate::value::{Map, Value};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Schema {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SchemaType>,
    #[serde(default, skip_serializing_if = "indexmap::IndexMap::is_empty")]
    pub properties: indexmap::IndexMap<String, Schema>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
}

/// Validate `value` against `schema`, returning every violation found (an
/// empty vec means the value is valid). This deliberately only covers the
/// subset of Draft-7 the data model names — it is not a general JSON Schema
/// validator.
pub fn validate(value: &Value, schema: &Schema) -> Vec<String> {
    let mut errors = Vec::new();
    validate_at(value, schema, "$", &mut errors);
    errors
}

fn validate_at(value: &Value, schema: &Schema, path: &str, errors: &mut Vec<String>) {
    if let Some(kind) = &schema.kind {
        if !matches_kind(value, kind) {
            errors.push(format!(
                "{path}: expected {kind:?}, got {}",
                type_name(value)
            ));
            return;
        }
    }

    match (value, schema.kind.as_ref()) {
        (Value::Object(map), Some(SchemaType::Object)) | (Value::Object(map), None) => {
            for required in &schema.required {
                if !map.contains_key(required) {
                    errors.push(format!("{path}: missing required property '{required}'"));
                }
            }
            for (key, prop_schema) in &schema.properties {
                if let Some(v) = map.get(key) {
                    validate_at(v, prop_schema, &format!("{path}.{key}"), errors);
                }
            }
        }
        (Value::Array(items), Some(SchemaType::Array)) => {
            if let Some(item_schema) = &schema.items {
                for (i, item) in items.iter().enumerate() {
                    validate_at(item, item_schema, &format!("{path}[{i}]"), errors);
                }
            }
        }
        _ => {}
    }
}

fn matches_kind(value: &Value, kind: &SchemaType) -> bool {
    matches!(
        (value, kind),
        (Value::Null, SchemaType::Null)
            | (Value::Bool(_), SchemaType::Boolean)
            | (Value::Int(_), SchemaType::Integer)
            | (Value::Int(_), SchemaType::Number)
            | (Value::Float(_), SchemaType::Number)
            | (Value::String(_), SchemaType::String)
            | (Value::Array(_), SchemaType::Array)
            | (Value::Object(_), SchemaType::Object)
    )
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Int(_) => "integer",
        Value::Float(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Infer a structural schema from a sample value — used by the compiler to
/// produce `input_schema`/`output_schema`/tool `args_schema` from observed
/// trace data.
pub fn infer(value: &Value) -> Schema {
    match value {
        Value::Null => Schema {
            kind: Some(SchemaType::Null),
            ..Default::default()
        },
        Value::Bool(_) => Schema {
            kind: Some(SchemaType::Boolean),
            ..Default::default()
        },
        Value::Int(_) => Schema {
            kind: Some(SchemaType::Integer),
            ..Default::default()
        },
        Value::Float(_) => Schema {
            kind: Some(SchemaType::Number),
            ..Default::default()
        },
        Value::String(_) => Schema {
            kind: Some(SchemaType::String),
            ..Default::default()
        },
        Value::Array(items) => Schema {
            kind: Some(SchemaType::Array),
            items: items.first().map(|v| Box::new(infer(v))),
            ..Default::default()
        },
        Value::Object(map) => infer_object(map),
    }
}

fn infer_object(map: &Map) -> Schema {
    let mut properties = indexmap::IndexMap::new();
    let mut required = Vec::new();
    for (key, value) in map {
        properties.insert(key.clone(), infer(value));
        required.push(key.clone());
    }
    Schema {
        kind: Some(SchemaType::Object),
        properties,
        required,
        items: None,
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
