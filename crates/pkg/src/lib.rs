// SPDX-License-Identifier: MIT

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ordo-pkg: reads a routine package directory into a loaded, validated
//! unit the engine can run.

mod error;
mod loader;
mod udf;
mod validate;

pub use error::PkgError;
pub use loader::{load, load_without_udf, RoutinePackage};
pub use udf::{EmptyUdfModule, StaticUdfModule, UdfFn, UdfModule};
pub use validate::validate;
