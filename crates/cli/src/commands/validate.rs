// SPDX-License-Identifier: MIT

//! `ordo validate <routine_dir>` — runs every static check over a loaded
//! routine package and reports pass/fail.
//!
//! The generic `ordo` binary has no way to dynamically load a package's
//! `udf.rs` (Rust has no runtime `import`), so it loads every package with
//! an empty user-function module. A `udf.call` step therefore always
//! reports as an unknown function here; an embedder linking a real
//! `StaticUdfModule` gets a meaningful check instead. This limitation is
//! recorded in `DESIGN.md`.

use anyhow::{anyhow, Result};
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct ValidateArgs {
    /// Path to the routine package directory
    pub routine_dir: PathBuf,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let package = ordo_pkg::load_without_udf(&args.routine_dir)
        .map_err(|e| anyhow!("FAIL: {e}"))?;

    let tool_registry = crate::registry::build(&args.routine_dir);
    let errors = ordo_pkg::validate(&package, Some(&tool_registry));

    if !errors.is_empty() {
        eprintln!("Validation errors:");
        for error in &errors {
            eprintln!("  - {error}");
        }
        return Err(anyhow!("{} validation error(s)", errors.len()));
    }

    println!("OK — routine is valid");
    Ok(())
}
