// SPDX-License-Identifier: MIT

//! The evaluation environment: bound variables plus a table of callable
//! native functions (tools' sibling namespace, `udf.*` user functions, and a
//! handful of builtins like `len`).

use crate::error::EvalError;
use indexmap::IndexMap;
use ordo_core::Value;
use std::sync::Arc;

pub type NativeFn = dyn Fn(&[Value], &IndexMap<String, Value>) -> Result<Value, EvalError> + Send + Sync;

#[derive(Clone, Default)]
pub struct Context {
    vars: IndexMap<String, Value>,
    functions: IndexMap<String, Arc<NativeFn>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: impl Into<String>, value: Value) -> Self {
        self.vars.insert(name.into(), value);
        self
    }

    pub fn set_var(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), value);
    }

    pub fn get_var(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn register_fn(
        &mut self,
        name: impl Into<String>,
        f: impl Fn(&[Value], &IndexMap<String, Value>) -> Result<Value, EvalError> + Send + Sync + 'static,
    ) {
        self.functions.insert(name.into(), Arc::new(f));
    }

    pub fn get_fn(&self, name: &str) -> Option<&Arc<NativeFn>> {
        self.functions.get(name)
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
