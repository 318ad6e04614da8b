// SPDX-License-Identifier: MIT

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PkgError {
    #[error("routine document missing at {0}")]
    RoutineMissing(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed routine document: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("malformed schema document: {0}")]
    Json(#[from] serde_json::Error),
}
