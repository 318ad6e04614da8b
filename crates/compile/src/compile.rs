// SPDX-License-Identifier: MIT

//! The trace-to-routine translation: a deterministic walk
//! over a [`Trace`]'s events that recovers data-flow dependencies through
//! structural value equality, producing a [`Routine`], Rust user-function
//! stub source, and golden fixtures for the steps it emits.

use crate::slug::slugify;
use crate::stub::{build_udf_source, generate_udf_stub};
use indexmap::IndexMap;
use ordo_core::{
    schema, Map, PromptDef, PromptField, PromptFieldType, Routine, Schema, Step, ToolDef, Trace,
    TraceEventType, Value,
};
use std::collections::HashSet;

/// Everything `compile_trace` produces: the routine document itself plus
/// the side artifacts a package directory needs.
pub struct CompiledPackage {
    pub routine: Routine,
    pub udf_source: String,
    pub fixtures: IndexMap<String, Value>,
    pub input_summary: Option<Map>,
    pub final_output: Option<Value>,
}

/// Translates a validated [`Trace`] into a [`CompiledPackage`]. Total over
/// any well-formed trace, including one with zero events (property 9:
/// compiler totality) — there is no failure path once a `Trace` value
/// exists, since trace validation happens at deserialization.
pub fn compile_trace(trace: &Trace) -> CompiledPackage {
    let mut steps: Vec<Step> = Vec::new();
    let mut tools: Vec<ToolDef> = Vec::new();
    let mut tool_names: HashSet<String> = HashSet::new();
    let mut udf_names: HashSet<String> = HashSet::new();
    let mut udf_stubs: Vec<String> = Vec::new();
    let mut fixtures: IndexMap<String, Value> = IndexMap::new();
    // canonical-value-key -> save slot name; the data-flow recovery primitive.
    let mut result_map: IndexMap<String, String> = IndexMap::new();
    let mut step_counter: u64 = 0;

    if let Some(input_summary) = &trace.mission.input_summary {
        for (key, value) in input_summary {
            result_map.insert(value.canonical_key(), key.clone());
        }
    }

    for event in &trace.events {
        step_counter += 1;
        let step_id = format!("s{step_counter}");

        match event.event_type {
            TraceEventType::ToolCall => {
                let Some(tool) = &event.tool else { continue };
                if tool_names.insert(tool.clone()) {
                    tools.push(ToolDef {
                        name: tool.clone(),
                        description: None,
                        args_schema: Some(schema::infer(&Value::Object(event.args.clone()))),
                        result_schema: None,
                    });
                }

                let args = templatize_args(&event.args, &result_map);
                let save_as = format!("result_{step_id}");
                steps.push(Step::ToolCall {
                    id: step_id.clone(),
                    tool: tool.clone(),
                    args,
                    save_as: Some(save_as.clone()),
                    when: None,
                    description: Some(format!("Call {tool}")),
                });

                if let Some(result) = &event.result {
                    result_map.insert(result.canonical_key(), save_as.clone());
                    fixtures.insert(format!("{step_id}_result"), result.clone());
                }
            }
            TraceEventType::UdfCall => {
                let function = event
                    .function
                    .clone()
                    .unwrap_or_else(|| format!("udf_{step_counter}"));
                if udf_names.insert(function.clone()) {
                    udf_stubs.push(generate_udf_stub(&function, event));
                }

                let args = templatize_args(&event.args, &result_map);
                let save_as = format!("result_{step_id}");
                steps.push(Step::UdfCall {
                    id: step_id.clone(),
                    function: function.clone(),
                    args,
                    save_as: Some(save_as.clone()),
                    when: None,
                    description: Some(format!("Call {function}")),
                });

                if let Some(result) = &event.result {
                    result_map.insert(result.canonical_key(), save_as.clone());
                    fixtures.insert(format!("{step_id}_result"), result.clone());
                }
            }
            TraceEventType::Approval => {
                let message = event.prompt.clone().unwrap_or_else(|| "Please confirm".to_string());
                steps.push(Step::PromptUser {
                    id: step_id.clone(),
                    prompt: PromptDef {
                        message: message.clone(),
                        fields: vec![PromptField {
                            name: "confirm".to_string(),
                            label: message,
                            field_type: PromptFieldType::Confirm,
                            required: true,
                            default: Some(Value::Bool(true)),
                            options: None,
                        }],
                    },
                    save_as: Some(format!("approval_{step_id}")),
                    when: None,
                    description: Some("User confirmation".to_string()),
                });
            }
        }
    }

    if trace.final_output.is_some() {
        if let Some(last_save) = steps.last().and_then(|s| s.save_as()) {
            let last_save = last_save.to_string();
            step_counter += 1;
            steps.push(Step::Return {
                id: format!("s{step_counter}"),
                value: Value::String(format!("{{{{ {last_save} }}}}")),
                when: None,
                description: Some("Return final output".to_string()),
            });
        }
    }

    let input_schema: Option<Schema> = trace
        .mission
        .input_summary
        .as_ref()
        .map(|m| schema::infer(&Value::Object(m.clone())));
    let output_schema: Option<Schema> = trace.final_output.as_ref().map(schema::infer);

    let routine = Routine {
        version: "1".to_string(),
        name: slugify(&trace.mission.goal),
        description: Some(trace.mission.goal.clone()),
        tools,
        input_schema,
        output_schema,
        steps,
    };

    CompiledPackage {
        routine,
        udf_source: build_udf_source(&udf_stubs),
        fixtures,
        input_summary: trace.mission.input_summary.clone(),
        final_output: trace.final_output.clone(),
    }
}

/// Replaces each argument value structurally equal to a prior recorded
/// result (or an input field) with a `{{ name }}` reference; anything else
/// is kept literally. A mismatch is not an error — it's a literal argument.
fn templatize_args(args: &Map, result_map: &IndexMap<String, String>) -> Map {
    let mut out = Map::new();
    for (key, value) in args {
        match result_map.get(&value.canonical_key()) {
            Some(name) => out.insert(key.clone(), Value::String(format!("{{{{ {name} }}}}"))),
            None => out.insert(key.clone(), value.clone()),
        };
    }
    out
}

#[cfg(test)]
#[path = "compile_tests.rs"]
mod tests;
