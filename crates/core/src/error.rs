// SPDX-License-Identifier: MIT

//! Neutral error kinds shared across crates, used at every fallible boundary
//! so callers can match on a stable vocabulary instead of per-crate error types.
//!
//! The engine never throws across its public boundary — every outcome is a
//! `RunResult`. These kinds are the vocabulary its internal components use
//! to report what went wrong before it gets folded into a `FailureReport`.

use std::fmt;

/// A stable, kebab-case error category surfaced in failure reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    RoutineLoad,
    Schema,
    UnknownTool,
    UnknownUdf,
    Render,
    Condition,
    Assertion,
    ToolExec,
    UdfExec,
    StateNotFound,
    InvalidState,
    Validation,
}

impl ErrorKind {
    /// Neutral name used in `FailureReport::error_kind`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::RoutineLoad => "routine-load",
            ErrorKind::Schema => "schema",
            ErrorKind::UnknownTool => "unknown-tool",
            ErrorKind::UnknownUdf => "unknown-udf",
            ErrorKind::Render => "render",
            ErrorKind::Condition => "condition",
            ErrorKind::Assertion => "assertion",
            ErrorKind::ToolExec => "tool-exec",
            ErrorKind::UdfExec => "udf-exec",
            ErrorKind::StateNotFound => "state-not-found",
            ErrorKind::InvalidState => "invalid-state",
            ErrorKind::Validation => "validation",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A step-level failure carrying enough context for `_run_step`-style
/// callers to build a `FailureReport` without re-deriving the kind from a
/// string.
#[derive(Debug, Clone)]
pub struct StepFault {
    pub kind: ErrorKind,
    pub message: String,
}

impl StepFault {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for StepFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for StepFault {}
