// SPDX-License-Identifier: MIT

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ordo-registry: a name-keyed directory of callable tools. Each entry may
//! carry an args schema and a result schema, validated at call time.

mod error;

use indexmap::IndexMap;
use ordo_core::{schema, Map, Schema, Value};
use std::sync::Arc;

pub use error::ToolError;

pub type ToolFn = dyn Fn(&Map) -> Result<Value, String> + Send + Sync;

struct ToolEntry {
    func: Arc<ToolFn>,
    args_schema: Option<Schema>,
    result_schema: Option<Schema>,
}

/// Metadata-only view of a registered tool, for introspection (`list_tools`,
/// the `validate` CLI pass).
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: String,
    pub has_args_schema: bool,
    pub has_result_schema: bool,
}

#[derive(Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, ToolEntry>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        func: impl Fn(&Map) -> Result<Value, String> + Send + Sync + 'static,
        args_schema: Option<Schema>,
        result_schema: Option<Schema>,
    ) {
        self.tools.insert(
            name.into(),
            ToolEntry {
                func: Arc::new(func),
                args_schema,
                result_schema,
            },
        );
    }

    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn list_tools(&self) -> Vec<ToolInfo> {
        self.tools
            .iter()
            .map(|(name, entry)| ToolInfo {
                name: name.clone(),
                has_args_schema: entry.args_schema.is_some(),
                has_result_schema: entry.result_schema.is_some(),
            })
            .collect()
    }

    pub fn call(&self, name: &str, args: &Map) -> Result<Value, ToolError> {
        let entry = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::Unknown(name.to_string()))?;

        if let Some(args_schema) = &entry.args_schema {
            let errors = schema::validate(&Value::Object(args.clone()), args_schema);
            if !errors.is_empty() {
                return Err(ToolError::InvalidArgs {
                    tool: name.to_string(),
                    errors,
                });
            }
        }

        let result = (entry.func)(args).map_err(|message| ToolError::Exec {
            tool: name.to_string(),
            message,
        })?;

        if let Some(result_schema) = &entry.result_schema {
            let errors = schema::validate(&result, result_schema);
            if !errors.is_empty() {
                return Err(ToolError::InvalidResult {
                    tool: name.to_string(),
                    errors,
                });
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
