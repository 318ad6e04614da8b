// SPDX-License-Identifier: MIT

//! Writes a [`CompiledPackage`] to a directory in a fixed layout:
//! `routine.yaml` at the root, `udf.rs` stub source, `schemas/*`,
//! `fixtures/*.json`, and the golden `input.json` / `expected_output.json`
//! pair an operator or test harness replays against.

use crate::compile::CompiledPackage;
use crate::error::CompileError;
use std::fs;
use std::path::Path;

pub fn write_package(package: &CompiledPackage, dir: &Path) -> Result<(), CompileError> {
    fs::create_dir_all(dir)?;

    // Serialize the routine directly (not via `serde_json::Value`, whose
    // default `Map` is key-sorted) so declaration order survives to disk.
    let routine_yaml = serde_yaml::to_string(&package.routine)?;
    fs::write(dir.join("routine.yaml"), routine_yaml)?;

    if !package.udf_source.trim().is_empty() {
        fs::write(dir.join("udf.rs"), &package.udf_source)?;
    }

    let schemas_dir = dir.join("schemas");
    if package.routine.input_schema.is_some() || package.routine.output_schema.is_some() {
        fs::create_dir_all(&schemas_dir)?;
    }
    if let Some(input_schema) = &package.routine.input_schema {
        write_json(&schemas_dir.join("input.schema.json"), input_schema)?;
    }
    if let Some(output_schema) = &package.routine.output_schema {
        write_json(&schemas_dir.join("output.schema.json"), output_schema)?;
    }

    if !package.fixtures.is_empty() {
        let fixtures_dir = dir.join("fixtures");
        fs::create_dir_all(&fixtures_dir)?;
        for (name, value) in &package.fixtures {
            write_json(&fixtures_dir.join(format!("{name}.json")), value)?;
        }
    }

    if let Some(input_summary) = &package.input_summary {
        write_json(&dir.join("input.json"), input_summary)?;
    }

    if let Some(final_output) = &package.final_output {
        write_json(&dir.join("expected_output.json"), final_output)?;
    }

    Ok(())
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), CompileError> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
#[path = "write_tests.rs"]
mod tests;
