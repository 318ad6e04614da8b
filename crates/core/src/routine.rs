// SPDX-License-Identifier: MIT

//! The routine document: a deterministic, sequential program of typed steps.

use crate::schema::Schema;
use crate::value::{Map, Value};
use serde::{Deserialize, Serialize};

fn default_version() -> String {
    "1".to_string()
}

/// Declaration of an externally registered tool a routine's `tool.call`
/// steps may invoke.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args_schema: Option<Schema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_schema: Option<Schema>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PromptFieldType {
    Text,
    Number,
    Confirm,
    Select,
}

fn default_true() -> bool {
    true
}

/// A single input field in a `prompt.user` step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromptField {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: PromptFieldType,
    #[serde(default = "default_true")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

/// Definition carried by a `prompt.user` step: message plus ordered fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromptDef {
    pub message: String,
    pub fields: Vec<PromptField>,
}

/// One of the five step variants. Tagged on `type` in the on-disk document;
/// `args_schema`/etc. validation and dispatch all switch on this tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Step {
    #[serde(rename = "tool.call")]
    ToolCall {
        id: String,
        tool: String,
        args: Map,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        save_as: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        when: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    #[serde(rename = "udf.call")]
    UdfCall {
        id: String,
        function: String,
        args: Map,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        save_as: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        when: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    #[serde(rename = "assert")]
    Assert {
        id: String,
        check: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        when: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    #[serde(rename = "prompt.user")]
    PromptUser {
        id: String,
        prompt: PromptDef,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        save_as: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        when: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    #[serde(rename = "return")]
    Return {
        id: String,
        value: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        when: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

impl Step {
    pub fn id(&self) -> &str {
        match self {
            Step::ToolCall { id, .. }
            | Step::UdfCall { id, .. }
            | Step::Assert { id, .. }
            | Step::PromptUser { id, .. }
            | Step::Return { id, .. } => id,
        }
    }

    pub fn when(&self) -> Option<&str> {
        match self {
            Step::ToolCall { when, .. }
            | Step::UdfCall { when, .. }
            | Step::Assert { when, .. }
            | Step::PromptUser { when, .. }
            | Step::Return { when, .. } => when.as_deref(),
        }
    }

    pub fn save_as(&self) -> Option<&str> {
        match self {
            Step::ToolCall { save_as, .. }
            | Step::UdfCall { save_as, .. }
            | Step::PromptUser { save_as, .. } => save_as.as_deref(),
            Step::Assert { .. } | Step::Return { .. } => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Step::ToolCall { .. } => "tool.call",
            Step::UdfCall { .. } => "udf.call",
            Step::Assert { .. } => "assert",
            Step::PromptUser { .. } => "prompt.user",
            Step::Return { .. } => "return",
        }
    }
}

/// A deterministic, sequential program compiled from a trace or authored
/// directly. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Routine {
    #[serde(default = "default_version")]
    pub version: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<Schema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<Schema>,
    pub steps: Vec<Step>,
}

impl Routine {
    pub fn get_step(&self, id: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.id() == id)
    }

    pub fn tool(&self, name: &str) -> Option<&ToolDef> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Index of a step by id, for resuming at `index + 1`.
    pub fn step_index(&self, id: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.id() == id)
    }
}

#[cfg(test)]
#[path = "routine_tests.rs"]
mod tests;
