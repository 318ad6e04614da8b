//! `ordo run` specs: a simple tool-call chain, and a confirm-prompt
//! pause/resume round trip.

use crate::prelude::*;

fn compile_sample(workdir: &std::path::Path) -> std::path::PathBuf {
    let trace_path = workdir.join("trace.json");
    write_json(workdir, "trace.json", &sample_trace());
    let out_dir = workdir.join("out");
    let output = ordo()
        .args(["compile", trace_path.to_str().expect("utf8 path")])
        .args(["-o", out_dir.to_str().expect("utf8 path")])
        .output()
        .expect("run ordo compile");
    assert!(output.status.success(), "stderr: {}", output.stderr_str());
    out_dir
}

#[test]
fn run_resolves_a_fixture_backed_tool_call_and_returns_its_result() {
    let workdir = tempdir();
    let out_dir = compile_sample(workdir.path());

    std::fs::create_dir_all(out_dir.join("fixtures")).expect("mkdir fixtures");
    std::fs::write(out_dir.join("fixtures/report.csv"), "name,value\nwidgets,3").expect("write fixture");

    let output = ordo()
        .args(["run", out_dir.to_str().expect("utf8 path"), "--json"])
        .output()
        .expect("run ordo run");

    assert!(output.status.success(), "stderr: {}", output.stderr_str());
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).expect("parse run result json");
    assert_eq!(result["status"], "ok");
    assert_eq!(result["output"], "name,value\nwidgets,3");
}

#[test]
fn run_fails_cleanly_when_the_fixture_is_missing() {
    let workdir = tempdir();
    let out_dir = compile_sample(workdir.path());

    let output = ordo()
        .args(["run", out_dir.to_str().expect("utf8 path"), "--json"])
        .output()
        .expect("run ordo run");

    assert!(!output.status.success());
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).expect("parse run result json");
    assert_eq!(result["status"], "failed");
    assert_eq!(result["failure"]["error_kind"], "tool-exec");
}

#[test]
fn run_pauses_at_a_confirm_prompt_and_resumes_after_an_answer() {
    let workdir = tempdir();
    let trace = serde_json::json!({
        "version": "1",
        "app": {"name": "demo-agent"},
        "mission": {"goal": "Ship the release"},
        "events": [
            {"type": "approval", "seq": 0, "prompt": "Ship it?"}
        ],
        "final_output": {"confirm": true}
    });
    write_json(workdir.path(), "trace.json", &trace);
    let out_dir = workdir.path().join("out");
    let compile_output = ordo()
        .args(["compile", "trace.json", "-o", out_dir.to_str().expect("utf8 path")])
        .current_dir(workdir.path())
        .output()
        .expect("run ordo compile");
    assert!(compile_output.status.success());

    let run_output = ordo()
        .args(["run", out_dir.to_str().expect("utf8 path"), "--json"])
        .write_stdin("y\n")
        .output()
        .expect("run ordo run");

    assert!(run_output.status.success(), "stderr: {}", run_output.stderr_str());
    let result: serde_json::Value = serde_json::from_slice(&run_output.stdout).expect("parse run result json");
    assert_eq!(result["status"], "ok");
    assert_eq!(result["output"]["confirm"], true);
}
