// SPDX-License-Identifier: MIT

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    Unknown(String),
    #[error("argument validation failed for {tool}: {errors:?}")]
    InvalidArgs { tool: String, errors: Vec<String> },
    #[error("result validation failed for {tool}: {errors:?}")]
    InvalidResult { tool: String, errors: Vec<String> },
    #[error("tool {tool} failed: {message}")]
    Exec { tool: String, message: String },
}
