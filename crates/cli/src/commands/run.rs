// SPDX-License-Identifier: MIT

//! `ordo run <routine_dir> [-i <input.json>] [-o <out.json>] [--json]` —
//! loops `resume` over `needs_input` outcomes, prompting at the terminal
//! for each `prompt.user` field, until a terminal status.

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use dialoguer::console::Term;
use dialoguer::{Confirm, Input, Select};
use ordo_core::{Map, PromptDef, PromptField, PromptFieldType, RunResult, RunStatus, Step, Value};
use ordo_pkg::RoutinePackage;
use ordo_store::FileStateStore;
use std::path::PathBuf;

#[derive(Args)]
pub struct RunArgs {
    /// Path to the routine package directory
    pub routine_dir: PathBuf,

    /// Input JSON file (defaults to the package's own `input.json`, if any)
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Write the run result to this JSON file
    #[arg(short = 'o', long = "out")]
    pub out: Option<PathBuf>,

    /// Print the raw run result as JSON instead of a human summary
    #[arg(long = "json")]
    pub json: bool,
}

pub fn run(args: RunArgs) -> Result<()> {
    let package = ordo_pkg::load_without_udf(&args.routine_dir)
        .with_context(|| format!("loading routine package {}", args.routine_dir.display()))?;
    let tool_registry = crate::registry::build(&args.routine_dir);
    let state_store = FileStateStore::new(state_dir());

    let input = load_input(&args, &package)?;

    let mut result = ordo_engine::run(&package, Some(input), &tool_registry, &state_store, None);

    while result.status == RunStatus::NeedsInput {
        let pending_id = result
            .pending_prompt
            .clone()
            .ok_or_else(|| anyhow!("needs_input result missing pending_prompt"))?;
        let answers = prompt_interactively(&package, &pending_id)?;
        result = ordo_engine::resume(&package, &result.run_id, answers, &tool_registry, &state_store, None);
    }

    emit(&result, &args)?;

    if result.status == RunStatus::Failed {
        bail!(
            "run failed: {}",
            result.failure.map(|f| f.message).unwrap_or_default()
        );
    }
    Ok(())
}

/// Where paused-run snapshots live between `run` and `resume` invocations.
/// Falls back to the system temp directory if no cache directory is
/// reported (e.g. a minimal container environment).
fn state_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("ordo")
        .join("state")
}

fn load_input(args: &RunArgs, package: &RoutinePackage) -> Result<Map> {
    if let Some(path) = &args.input {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading input file {}", path.display()))?;
        let json: serde_json::Value = serde_json::from_str(&text)?;
        let value = ordo_core::from_json(&json);
        return Ok(value.as_object().cloned().unwrap_or_default());
    }
    Ok(package
        .default_input()
        .and_then(|v| v.as_object().cloned())
        .unwrap_or_default())
}

fn prompt_def_for<'a>(package: &'a RoutinePackage, step_id: &str) -> Result<&'a PromptDef> {
    match package.routine.get_step(step_id) {
        Some(Step::PromptUser { prompt, .. }) => Ok(prompt),
        _ => Err(anyhow!("pending step {step_id} is not a prompt.user step")),
    }
}

fn prompt_interactively(package: &RoutinePackage, step_id: &str) -> Result<Map> {
    let prompt = prompt_def_for(package, step_id)?;
    eprintln!("\n--- {} ---", prompt.message);

    let mut answers = Map::new();
    for field in &prompt.fields {
        let value = prompt_field(field)?;
        answers.insert(field.name.clone(), value);
    }
    Ok(answers)
}

fn prompt_field(field: &PromptField) -> Result<Value> {
    match field.field_type {
        PromptFieldType::Confirm => {
            let default = field.default.as_ref().and_then(Value::as_bool).unwrap_or(false);
            let answer = Confirm::new()
                .with_prompt(&field.label)
                .default(default)
                .interact_on(&Term::stderr())?;
            Ok(Value::Bool(answer))
        }
        PromptFieldType::Select => {
            let options = field
                .options
                .as_ref()
                .ok_or_else(|| anyhow!("select field {} has no options", field.name))?;
            let choice = Select::new()
                .with_prompt(&field.label)
                .items(options)
                .default(0)
                .interact_on(&Term::stderr())?;
            Ok(Value::String(options[choice].clone()))
        }
        PromptFieldType::Number => {
            let raw: String = Input::new()
                .with_prompt(&field.label)
                .interact_text_on(&Term::stderr())?;
            parse_number(&raw).ok_or_else(|| anyhow!("'{raw}' is not a number"))
        }
        PromptFieldType::Text => {
            let raw: String = Input::new()
                .with_prompt(&field.label)
                .interact_text_on(&Term::stderr())?;
            Ok(Value::String(raw))
        }
    }
}

fn parse_number(raw: &str) -> Option<Value> {
    if let Ok(i) = raw.parse::<i64>() {
        return Some(Value::Int(i));
    }
    raw.parse::<f64>().ok().map(Value::Float)
}

fn emit(result: &RunResult, args: &RunArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        match result.status {
            RunStatus::Ok => {
                println!("Status: ok");
                if let Some(output) = &result.output {
                    println!("Output: {}", serde_json::to_string_pretty(&ordo_core::to_json(output))?);
                }
            }
            RunStatus::Failed => {
                eprintln!("Status: failed");
                if let Some(failure) = &result.failure {
                    eprintln!("Error: {}", failure.message);
                }
            }
            RunStatus::NeedsInput => {
                bail!("internal error: emitted a needs_input result after the prompt loop exited")
            }
        }
    }

    if let Some(path) = &args.out {
        std::fs::write(path, serde_json::to_string_pretty(result)?)
            .with_context(|| format!("writing output file {}", path.display()))?;
    }
    Ok(())
}
