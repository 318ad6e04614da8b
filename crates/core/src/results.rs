// SPDX-License-Identifier: MIT

//! Run state (the pause snapshot) and run result types.

use crate::value::{Map, Value};
use serde::{Deserialize, Serialize};

/// Durable snapshot taken when a run pauses at a `prompt.user` step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunState {
    pub run_id: String,
    pub routine_dir: String,
    pub step_index: usize,
    pub context: Map,
    pub pending_step_id: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Ok,
    Failed,
    NeedsInput,
}

/// Details about why a run failed, carrying the originating step id and a
/// context snapshot for diagnosis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FailureReport {
    pub step_id: String,
    pub error_kind: String,
    pub message: String,
    #[serde(default)]
    pub context: Map,
}

/// What comes back from `run`/`resume`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunResult {
    pub run_id: String,
    pub status: RunStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_prompt: Option<String>,
    #[serde(default)]
    pub context: Map,
}

impl RunResult {
    pub fn ok(run_id: impl Into<String>, output: Value, context: Map) -> Self {
        RunResult {
            run_id: run_id.into(),
            status: RunStatus::Ok,
            output: Some(output),
            failure: None,
            pending_prompt: None,
            context,
        }
    }

    pub fn needs_input(run_id: impl Into<String>, pending_step: impl Into<String>, context: Map) -> Self {
        RunResult {
            run_id: run_id.into(),
            status: RunStatus::NeedsInput,
            output: None,
            failure: None,
            pending_prompt: Some(pending_step.into()),
            context,
        }
    }

    pub fn failed(run_id: impl Into<String>, failure: FailureReport) -> Self {
        let context = failure.context.clone();
        RunResult {
            run_id: run_id.into(),
            status: RunStatus::Failed,
            output: None,
            failure: Some(failure),
            pending_prompt: None,
            context,
        }
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod tests;
