// SPDX-License-Identifier: MIT

//! The reference tool registry the CLI runs routines against: a single
//! `fetch_csv` tool that resolves `fixture://<name>` URLs against the
//! package's `fixtures/` directory, matching the original's
//! `_build_tool_registry` example tool.

use ordo_core::Value;
use ordo_registry::ToolRegistry;
use std::path::{Path, PathBuf};

pub fn build(routine_dir: &Path) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    let fixtures_dir: PathBuf = routine_dir.join("fixtures");

    registry.register(
        "fetch_csv",
        move |args| {
            let url = args
                .get("url")
                .and_then(Value::as_str)
                .ok_or_else(|| "fetch_csv requires a string 'url' argument".to_string())?;
            let Some(name) = url.strip_prefix("fixture://") else {
                return Err(format!("unsupported URL scheme: {url}"));
            };
            let path = fixtures_dir.join(name);
            std::fs::read_to_string(&path)
                .map(Value::String)
                .map_err(|e| format!("fixture not found: {} ({e})", path.display()))
        },
        None,
        None,
    );

    registry
}
