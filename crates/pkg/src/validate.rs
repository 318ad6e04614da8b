// SPDX-License-Identifier: MIT

//! Static checks over a loaded package: every `tool.call` names a tool the
//! routine declares (or, if a registry is supplied, one actually
//! registered there), every `udf.call` names a function the loaded module
//! provides, and any `fixture://<name>` argument reference has a matching
//! file under `fixtures/`.

use crate::loader::RoutinePackage;
use ordo_core::{Map, Step, Value};
use ordo_registry::ToolRegistry;

pub fn validate(package: &RoutinePackage, tool_registry: Option<&ToolRegistry>) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen_ids = std::collections::HashSet::new();

    for step in &package.routine.steps {
        if !seen_ids.insert(step.id().to_string()) {
            errors.push(format!("duplicate step id: {}", step.id()));
        }

        match step {
            Step::ToolCall { tool, args, .. } => {
                let declared = package.routine.tool(tool).is_some();
                let registered = tool_registry.map(|r| r.has(tool)).unwrap_or(false);
                if !declared && !registered {
                    errors.push(format!(
                        "step {}: undeclared tool: {tool}",
                        step.id()
                    ));
                }
                check_fixture_refs_map(package, step.id(), args, &mut errors);
            }
            Step::UdfCall { function, args, .. } => {
                if !package.udf.has(function) {
                    errors.push(format!(
                        "step {}: unknown user function: {function}",
                        step.id()
                    ));
                }
                check_fixture_refs_map(package, step.id(), args, &mut errors);
            }
            Step::Assert { .. } | Step::PromptUser { .. } | Step::Return { .. } => {}
        }
    }

    errors
}

fn check_fixture_refs_map(package: &RoutinePackage, step_id: &str, args: &Map, errors: &mut Vec<String>) {
    for value in args.values() {
        check_fixture_refs(package, step_id, value, errors);
    }
}

fn check_fixture_refs(package: &RoutinePackage, step_id: &str, value: &Value, errors: &mut Vec<String>) {
    match value {
        Value::String(s) => {
            if let Some(name) = s.strip_prefix("fixture://") {
                let path = package.dir.join("fixtures").join(format!("{name}.json"));
                if !path.exists() {
                    errors.push(format!(
                        "step {step_id}: missing fixture file for fixture://{name}"
                    ));
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                check_fixture_refs(package, step_id, item, errors);
            }
        }
        Value::Object(map) => {
            for v in map.values() {
                check_fixture_refs(package, step_id, v, errors);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
