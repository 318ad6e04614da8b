// SPDX-License-Identifier: MIT

//! Builds the evaluation environment shared by the template renderer (C1)
//! and the safe evaluator (C2): the run context's variables, plus every
//! callable the loaded user-function module exposes.

use ordo_core::Map;
use ordo_eval::{Context, EvalError};
use ordo_pkg::UdfModule;
use std::sync::Arc;

pub fn build(vars: &Map, udf: &Arc<dyn UdfModule>) -> Context {
    let mut ctx = Context::new();
    for (key, value) in vars {
        ctx.set_var(key.clone(), value.clone());
    }
    for name in udf.names() {
        let udf = Arc::clone(udf);
        let fn_name = name.clone();
        ctx.register_fn(name, move |args, kwargs| {
            if !args.is_empty() {
                return Err(EvalError::Runtime(format!(
                    "{fn_name}: user functions accept only keyword arguments"
                )));
            }
            let named: Map = kwargs.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
            udf.call(&fn_name, &named).map_err(EvalError::Runtime)
        });
    }
    ctx
}

#[cfg(test)]
#[path = "context_build_tests.rs"]
mod tests;
