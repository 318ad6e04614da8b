// SPDX-License-Identifier: MIT

//! The recovery-callback contract: invoked at most once per failing step,
//! never allowed to mutate context or routine — it only returns an intent.

use ordo_core::{Map, Routine, Step};

#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    ModifyArgs { new_args: Map },
    Skip { default_value: ordo_core::Value },
    Fail,
}

pub struct Fix {
    pub strategy: Strategy,
}

/// `(step, error message, context snapshot, routine) -> fix, if any`. If the
/// callback itself panics or returns `None`, the engine treats it as "no
/// fix" and aborts the run with a failure.
pub type AutoFixFn = dyn Fn(&Step, &str, &Map, &Routine) -> Option<Fix> + Send + Sync;
