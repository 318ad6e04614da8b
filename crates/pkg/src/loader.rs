// SPDX-License-Identifier: MIT

//! Reads a package directory into a [`RoutinePackage`]. The directory
//! layout is fixed: `routine.yaml` at the root, optional `schemas/*.json`,
//! optional `fixtures/*.json`, optional `input.json` / `expected_output.json`.

use crate::error::PkgError;
use crate::udf::{EmptyUdfModule, UdfModule};
use ordo_core::{Routine, Schema, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct RoutinePackage {
    pub routine: Routine,
    pub dir: PathBuf,
    pub udf: Arc<dyn UdfModule>,
    pub input_schema: Option<Schema>,
    pub output_schema: Option<Schema>,
}

impl RoutinePackage {
    pub fn fixture(&self, name: &str) -> Result<Value, PkgError> {
        let path = self.dir.join("fixtures").join(format!("{name}.json"));
        let text = fs::read_to_string(path)?;
        let json: serde_json::Value = serde_json::from_str(&text)?;
        Ok(ordo_core::from_json(&json))
    }

    pub fn default_input(&self) -> Option<Value> {
        let path = self.dir.join("input.json");
        let text = fs::read_to_string(path).ok()?;
        let json: serde_json::Value = serde_json::from_str(&text).ok()?;
        Some(ordo_core::from_json(&json))
    }

    pub fn expected_output(&self) -> Option<Value> {
        let path = self.dir.join("expected_output.json");
        let text = fs::read_to_string(path).ok()?;
        let json: serde_json::Value = serde_json::from_str(&text).ok()?;
        Some(ordo_core::from_json(&json))
    }
}

/// Loads `dir` into a package. `udf` is the embedder-supplied function
/// table; pass [`EmptyUdfModule`] for a package with no user functions.
pub fn load(dir: impl Into<PathBuf>, udf: Arc<dyn UdfModule>) -> Result<RoutinePackage, PkgError> {
    let dir = dir.into();
    let routine_path = dir.join("routine.yaml");
    if !routine_path.exists() {
        return Err(PkgError::RoutineMissing(routine_path.display().to_string()));
    }
    let routine_text = fs::read_to_string(&routine_path)?;
    let routine: Routine = serde_yaml::from_str(&routine_text)?;

    let input_schema = read_schema(&dir.join("schemas").join("input.schema.json"))?;
    let output_schema = read_schema(&dir.join("schemas").join("output.schema.json"))?;

    Ok(RoutinePackage {
        routine,
        dir,
        udf,
        input_schema,
        output_schema,
    })
}

/// Convenience wrapper around [`load`] for packages with no user functions.
pub fn load_without_udf(dir: impl Into<PathBuf>) -> Result<RoutinePackage, PkgError> {
    load(dir, Arc::new(EmptyUdfModule))
}

fn read_schema(path: &Path) -> Result<Option<Schema>, PkgError> {
    if !path.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(path)?;
    let schema: Schema = serde_json::from_str(&text)?;
    Ok(Some(schema))
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
