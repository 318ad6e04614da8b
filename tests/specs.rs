//! Behavioral specifications for the ordo CLI.
//!
//! These tests are black-box: they invoke the `ordo` binary and verify
//! stdout, stderr, exit codes, and the files it writes.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// cli/
#[path = "specs/cli/compile.rs"]
mod cli_compile;
#[path = "specs/cli/run.rs"]
mod cli_run;
#[path = "specs/cli/validate.rs"]
mod cli_validate;
