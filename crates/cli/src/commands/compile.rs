// SPDX-License-Identifier: MIT

//! `ordo compile <trace.json> [-o <dir>]` — compiles a recorded trace into
//! a routine package on disk.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct CompileArgs {
    /// Path to the trace JSON file
    pub trace_path: PathBuf,

    /// Output directory for the compiled routine package
    #[arg(short = 'o', long = "output", default_value = "./routine_out")]
    pub output: PathBuf,
}

pub fn run(args: CompileArgs) -> Result<()> {
    let text = std::fs::read_to_string(&args.trace_path)
        .with_context(|| format!("reading trace file {}", args.trace_path.display()))?;
    let trace: ordo_core::Trace =
        serde_json::from_str(&text).with_context(|| "trace file is not a well-formed trace document")?;

    let compiled = ordo_compile::compile_trace(&trace);
    ordo_compile::write_package(&compiled, &args.output)
        .with_context(|| format!("writing routine package to {}", args.output.display()))?;

    println!("Routine package written to {}", args.output.display());
    Ok(())
}
