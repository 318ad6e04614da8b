// SPDX-License-Identifier: MIT

//! ordo — the operator-facing command-line surface: `compile`, `run`,
//! `validate`. A thin shell over `ordo-compile`, `ordo-engine`, and
//! `ordo-pkg` — no core routine semantics live here.

mod commands;
mod registry;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ordo", version, about = "Deterministic routine engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile an agent trace into a routine package
    Compile(commands::compile::CompileArgs),
    /// Run a routine, prompting interactively on `needs_input`
    Run(commands::run::RunArgs),
    /// Validate a routine package's static references
    Validate(commands::validate::ValidateArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Compile(args) => commands::compile::run(args),
        Commands::Run(args) => commands::run::run(args),
        Commands::Validate(args) => commands::validate::run(args),
    }
}
