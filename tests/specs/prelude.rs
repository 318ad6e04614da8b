//! Shared helpers for the black-box `ordo` CLI specs.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;
use std::process::Output;
use tempfile::TempDir;

/// A `Command` for the `ordo` binary, freshly resolved per call so each
/// test gets an independent process.
pub fn ordo() -> Command {
    #[allow(clippy::expect_used)]
    Command::cargo_bin("ordo").expect("ordo binary should build")
}

pub trait OutputExt {
    fn stdout_str(&self) -> String;
    fn stderr_str(&self) -> String;
}

impl OutputExt for Output {
    fn stdout_str(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    fn stderr_str(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

pub fn write_json(dir: &Path, name: &str, value: &serde_json::Value) {
    std::fs::write(dir.join(name), serde_json::to_string_pretty(value).expect("serialize"))
        .expect("write file");
}

pub fn tempdir() -> TempDir {
    TempDir::new().expect("tempdir")
}

/// A minimal trace: one `fetch_csv` tool call whose result becomes the
/// final output, with a matching CSV fixture dropped alongside it so a
/// subsequent `ordo run` can resolve the `fixture://` URL.
pub fn sample_trace() -> serde_json::Value {
    serde_json::json!({
        "version": "1",
        "app": {"name": "demo-agent"},
        "mission": {
            "goal": "Fetch the report",
            "input_summary": {"path": "fixture://report.csv"}
        },
        "events": [
            {
                "type": "tool_call",
                "seq": 0,
                "tool": "fetch_csv",
                "args": {"url": "fixture://report.csv"},
                "result": "name,value\nwidgets,3"
            }
        ],
        "final_output": "name,value\nwidgets,3"
    })
}
