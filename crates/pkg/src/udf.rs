// SPDX-License-Identifier: MIT

//! User-function bindings. Rust has no runtime equivalent of importing
//! arbitrary source code, so a package's user functions are a trait object
//! the embedder constructs once and hands to the loader — [`StaticUdfModule`]
//! is the reference implementation, a name-keyed table of closures.

use indexmap::IndexMap;
use ordo_core::{Map, Value};
use std::sync::Arc;

pub type UdfFn = dyn Fn(&Map) -> Result<Value, String> + Send + Sync;

pub trait UdfModule: Send + Sync {
    fn has(&self, name: &str) -> bool;
    fn call(&self, name: &str, args: &Map) -> Result<Value, String>;
    fn names(&self) -> Vec<String>;
}

/// A [`UdfModule`] backed by a plain table of registered closures, loaded
/// once per package instance.
#[derive(Default, Clone)]
pub struct StaticUdfModule {
    functions: IndexMap<String, Arc<UdfFn>>,
}

impl StaticUdfModule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        func: impl Fn(&Map) -> Result<Value, String> + Send + Sync + 'static,
    ) {
        self.functions.insert(name.into(), Arc::new(func));
    }
}

impl UdfModule for StaticUdfModule {
    fn has(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    fn call(&self, name: &str, args: &Map) -> Result<Value, String> {
        let f = self
            .functions
            .get(name)
            .ok_or_else(|| format!("no such user function: {name}"))?;
        f(args)
    }

    fn names(&self) -> Vec<String> {
        self.functions.keys().cloned().collect()
    }
}

/// A package with no user-function source at all: legal per load, but any
/// `udf.call` against it errors at call time.
#[derive(Default, Clone, Copy)]
pub struct EmptyUdfModule;

impl UdfModule for EmptyUdfModule {
    fn has(&self, _name: &str) -> bool {
        false
    }

    fn call(&self, name: &str, _args: &Map) -> Result<Value, String> {
        Err(format!("no user-function module loaded; cannot call {name}"))
    }

    fn names(&self) -> Vec<String> {
        Vec::new()
    }
}

#[cfg(test)]
#[path = "udf_tests.rs"]
mod tests;
