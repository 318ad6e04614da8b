// SPDX-License-Identifier: MIT

//! The sequential step interpreter: `run` and `resume`.

use crate::auto_fix::{AutoFixFn, Strategy};
use crate::context_build;
use ordo_core::{ErrorKind, FailureReport, Map, PromptFieldType, RunResult, RunState, Step, Value};
use ordo_pkg::RoutinePackage;
use ordo_registry::ToolRegistry;
use ordo_store::StateStore;
use tracing::{info, warn};

pub fn run(
    package: &RoutinePackage,
    input: Option<Map>,
    tools: &ToolRegistry,
    store: &dyn StateStore,
    auto_fix: Option<&AutoFixFn>,
) -> RunResult {
    let run_id = ulid::Ulid::new().to_string();
    let context = input.unwrap_or_default();
    execute_from(package, &run_id, 0, context, tools, store, auto_fix)
}

pub fn resume(
    package: &RoutinePackage,
    run_id: &str,
    answers: Map,
    tools: &ToolRegistry,
    store: &dyn StateStore,
    auto_fix: Option<&AutoFixFn>,
) -> RunResult {
    let state = match store.load(run_id) {
        Ok(Some(state)) => state,
        Ok(None) | Err(_) => {
            return fail(run_id, "", ErrorKind::StateNotFound, "no snapshot for run id", Map::new())
        }
    };

    let Some(step) = package.routine.get_step(&state.pending_step_id) else {
        return fail(
            run_id,
            &state.pending_step_id,
            ErrorKind::InvalidState,
            "pending step no longer exists in routine",
            state.context,
        );
    };
    let Step::PromptUser { prompt, save_as, .. } = step else {
        return fail(
            run_id,
            &state.pending_step_id,
            ErrorKind::InvalidState,
            "pending step is not a prompt.user step",
            state.context,
        );
    };

    if let Err(message) = validate_answers(prompt, &answers) {
        return fail(
            run_id,
            &state.pending_step_id,
            ErrorKind::Validation,
            message,
            state.context,
        );
    }

    let mut context = state.context.clone();
    let binding_key = save_as
        .clone()
        .unwrap_or_else(|| format!("{}_answer", state.pending_step_id));
    context.insert(binding_key, Value::Object(answers));

    let next_index = package
        .routine
        .step_index(&state.pending_step_id)
        .map(|i| i + 1)
        .unwrap_or(state.step_index + 1);

    let _ = store.delete(run_id);
    execute_from(package, run_id, next_index, context, tools, store, auto_fix)
}

fn validate_answers(prompt: &ordo_core::PromptDef, answers: &Map) -> Result<(), String> {
    for field in &prompt.fields {
        match answers.get(&field.name) {
            None if field.required => {
                return Err(format!("missing required answer: {}", field.name))
            }
            Some(value) if !matches_field_type(value, field.field_type) => {
                return Err(format!(
                    "answer for {} has the wrong type for {:?}",
                    field.name, field.field_type
                ))
            }
            _ => {}
        }
    }
    Ok(())
}

fn matches_field_type(value: &Value, field_type: PromptFieldType) -> bool {
    match field_type {
        PromptFieldType::Text | PromptFieldType::Select => matches!(value, Value::String(_)),
        PromptFieldType::Number => matches!(value, Value::Int(_) | Value::Float(_)),
        PromptFieldType::Confirm => matches!(value, Value::Bool(_)),
    }
}

fn execute_from(
    package: &RoutinePackage,
    run_id: &str,
    start_index: usize,
    mut context: Map,
    tools: &ToolRegistry,
    store: &dyn StateStore,
    auto_fix: Option<&AutoFixFn>,
) -> RunResult {
    let steps = &package.routine.steps;
    let mut index = start_index;
    while index < steps.len() {
        let step = &steps[index];

        if let Some(when) = step.when() {
            let env = context_build::build(&context, &package.udf);
            match ordo_eval::safe_eval(when, &env) {
                Ok(value) if !value.is_truthy() => {
                    index += 1;
                    continue;
                }
                Ok(_) => {}
                Err(e) => {
                    return fail(run_id, step.id(), ErrorKind::Condition, e.to_string(), context);
                }
            }
        }

        match step {
            Step::Return { value, .. } => {
                let env = context_build::build(&context, &package.udf);
                return match ordo_template::render_value(value, &env) {
                    Ok(rendered) => {
                        info!(step = step.id(), "run completed");
                        RunResult::ok(run_id, rendered, context)
                    }
                    Err(e) => fail(run_id, step.id(), ErrorKind::Render, e.to_string(), context),
                };
            }
            Step::PromptUser { prompt, .. } => {
                let state = RunState {
                    run_id: run_id.to_string(),
                    routine_dir: package.dir.display().to_string(),
                    step_index: index,
                    context: context.clone(),
                    pending_step_id: step.id().to_string(),
                };
                if let Err(e) = store.save(&state) {
                    return fail(
                        run_id,
                        step.id(),
                        ErrorKind::InvalidState,
                        format!("failed to persist snapshot: {e}"),
                        context,
                    );
                }
                info!(step = step.id(), message = %prompt.message, "run paused for input");
                return RunResult::needs_input(run_id, step.id(), context);
            }
            Step::ToolCall { .. } | Step::UdfCall { .. } | Step::Assert { .. } => {
                match execute_effect_step(package, step, &context, tools) {
                    Ok(Some((name, value))) => {
                        context.insert(name, value);
                    }
                    Ok(None) => {}
                    Err((kind, message)) => {
                        match recover(package, step, &message, &context, auto_fix, tools) {
                            RecoveryOutcome::Proceed(Some((name, value))) => {
                                context.insert(name, value);
                            }
                            RecoveryOutcome::Proceed(None) => {}
                            RecoveryOutcome::Abort => {
                                return fail(run_id, step.id(), kind, message, context);
                            }
                        }
                    }
                }
            }
        }

        index += 1;
    }

    RunResult::ok(run_id, Value::Object(context.clone()), context)
}

/// Runs a `tool.call`/`udf.call`/`assert` step exactly once. Returns the
/// `(save_as, result)` pair to bind into context, if any.
fn execute_effect_step(
    package: &RoutinePackage,
    step: &Step,
    context: &Map,
    tools: &ToolRegistry,
) -> Result<Option<(String, Value)>, (ErrorKind, String)> {
    let env = context_build::build(context, &package.udf);
    match step {
        Step::ToolCall { tool, args, save_as, .. } => {
            let rendered = render_args(args, &env)?;
            let declared_or_registered = package.routine.tool(tool).is_some() || tools.has(tool);
            if !declared_or_registered {
                return Err((ErrorKind::UnknownTool, format!("unknown tool: {tool}")));
            }
            let result = tools
                .call(tool, &rendered)
                .map_err(|e| (ErrorKind::ToolExec, e.to_string()))?;
            Ok(save_as.clone().map(|name| (name, result)))
        }
        Step::UdfCall { function, args, save_as, .. } => {
            let rendered = render_args(args, &env)?;
            if !package.udf.has(function) {
                return Err((ErrorKind::UnknownUdf, format!("unknown user function: {function}")));
            }
            let result = package
                .udf
                .call(function, &rendered)
                .map_err(|e| (ErrorKind::UdfExec, e))?;
            Ok(save_as.clone().map(|name| (name, result)))
        }
        Step::Assert { check, message, .. } => {
            let value = ordo_eval::safe_eval(check, &env).map_err(|e| (ErrorKind::Assertion, e.to_string()))?;
            if value.is_truthy() {
                Ok(None)
            } else {
                let message = message.clone().unwrap_or_else(|| format!("assertion failed: {check}"));
                Err((ErrorKind::Assertion, message))
            }
        }
        Step::Return { .. } | Step::PromptUser { .. } => Ok(None),
    }
}

fn render_args(args: &Map, env: &ordo_eval::Context) -> Result<Map, (ErrorKind, String)> {
    let rendered = ordo_template::render_value(&Value::Object(args.clone()), env)
        .map_err(|e| (ErrorKind::Render, e.to_string()))?;
    Ok(rendered.as_object().cloned().unwrap_or_default())
}

enum RecoveryOutcome {
    Proceed(Option<(String, Value)>),
    Abort,
}

/// Invokes `auto_fix`, if present, exactly once. `modify_args` gets exactly
/// one retry; if that retry also fails, the run aborts regardless of what
/// the callback returns.
fn recover(
    package: &RoutinePackage,
    step: &Step,
    message: &str,
    context: &Map,
    auto_fix: Option<&AutoFixFn>,
    tools: &ToolRegistry,
) -> RecoveryOutcome {
    let Some(auto_fix) = auto_fix else {
        return RecoveryOutcome::Abort;
    };

    let fix = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        auto_fix(step, message, context, &package.routine)
    }))
    .unwrap_or_else(|_| {
        warn!(step = step.id(), "recovery callback panicked; treating as no fix");
        None
    });

    let Some(fix) = fix else {
        return RecoveryOutcome::Abort;
    };

    match fix.strategy {
        Strategy::Fail => RecoveryOutcome::Abort,
        Strategy::Skip { default_value } => {
            RecoveryOutcome::Proceed(step.save_as().map(|name| (name.to_string(), default_value)))
        }
        Strategy::ModifyArgs { new_args } => match retry_with_new_args(package, step, new_args, context, tools) {
            Ok(binding) => RecoveryOutcome::Proceed(binding),
            Err(_) => RecoveryOutcome::Abort,
        },
    }
}

fn retry_with_new_args(
    package: &RoutinePackage,
    step: &Step,
    new_args: Map,
    context: &Map,
    tools: &ToolRegistry,
) -> Result<Option<(String, Value)>, (ErrorKind, String)> {
    let patched = match step {
        Step::ToolCall { id, tool, save_as, when, description, .. } => Step::ToolCall {
            id: id.clone(),
            tool: tool.clone(),
            args: new_args,
            save_as: save_as.clone(),
            when: when.clone(),
            description: description.clone(),
        },
        Step::UdfCall { id, function, save_as, when, description, .. } => Step::UdfCall {
            id: id.clone(),
            function: function.clone(),
            args: new_args,
            save_as: save_as.clone(),
            when: when.clone(),
            description: description.clone(),
        },
        other => other.clone(),
    };
    execute_effect_step(package, &patched, context, tools)
}

fn fail(
    run_id: &str,
    step_id: &str,
    kind: ErrorKind,
    message: impl Into<String>,
    context: Map,
) -> RunResult {
    RunResult::failed(
        run_id,
        FailureReport {
            step_id: step_id.to_string(),
            error_kind: kind.as_str().to_string(),
            message: message.into(),
            context,
        },
    )
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
