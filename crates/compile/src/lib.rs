// SPDX-License-Identifier: MIT

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ordo-compile: translates a recorded [`ordo_core::Trace`] into a routine
//! package — a [`ordo_core::Routine`], Rust user-function stub source, and
//! golden fixtures — by recovering data-flow dependencies through
//! structural value equality.

mod compile;
mod error;
mod slug;
mod stub;
mod write;

pub use compile::{compile_trace, CompiledPackage};
pub use error::CompileError;
pub use slug::slugify;
pub use write::write_package;
