// SPDX-License-Identifier: MIT

//! Generates a Rust source stub for a `udf.call` function new to the
//! compiler: a signature documenting the inferred argument and return
//! shapes, and a body that errors rather than guesses at an
//! implementation.
//!
//! Rust has no equivalent of importing an arbitrary module at runtime, so
//! the generated stub is reference source an embedder copies into a
//! [`ordo_pkg::StaticUdfModule`] registration, not a file the engine loads
//! directly.

use ordo_core::{Map, TraceEvent, Value};

fn rust_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "Value (null)",
        Value::Bool(_) => "bool",
        Value::Int(_) => "i64",
        Value::Float(_) => "f64",
        Value::String(_) => "String",
        Value::Array(_) => "Vec<Value>",
        Value::Object(_) => "Map",
    }
}

fn describe_args(args: &Map) -> String {
    if args.is_empty() {
        return "(none)".to_string();
    }
    args.iter()
        .map(|(name, value)| format!("{name}: {}", rust_type_name(value)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Builds one `pub fn NAME(args: &Map) -> Result<Value, String>` stub,
/// documented with the parameter and return shapes inferred from `event`.
pub fn generate_udf_stub(name: &str, event: &TraceEvent) -> String {
    let arg_doc = describe_args(&event.args);
    let ret_doc = event
        .result
        .as_ref()
        .map(rust_type_name)
        .unwrap_or("Value");
    format!(
        "/// TODO: implement `{name}` — generated from trace.\n\
         /// Expected args: {arg_doc}\n\
         /// Returns: {ret_doc}\n\
         pub fn {name}(args: &Map) -> Result<Value, String> {{\n\
         \u{20}\u{20}\u{20}\u{20}let _ = args;\n\
         \u{20}\u{20}\u{20}\u{20}Err(\"not implemented: {name}\".to_string())\n\
         }}\n"
    )
}

/// Assembles the complete `udf.rs` source: a file preamble plus every
/// generated stub, in first-seen order.
pub fn build_udf_source(stubs: &[String]) -> String {
    if stubs.is_empty() {
        return String::new();
    }
    let preamble = "// SPDX-License-Identifier: MIT\n\n\
         //! User functions generated from an agent trace. Implement the TODOs,\n\
         //! then register each by name into a `StaticUdfModule` before loading\n\
         //! the package.\n\n\
         use ordo_core::{Map, Value};\n\n";
    preamble.to_string() + &stubs.join("\n")
}
