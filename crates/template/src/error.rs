// SPDX-License-Identifier: MIT

use ordo_eval::EvalError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("malformed template: {0}")]
    Malformed(String),
    #[error("undefined name: {0}")]
    UndefinedName(String),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error("cannot iterate over a {0}")]
    NotIterable(String),
}
