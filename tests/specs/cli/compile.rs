//! `ordo compile` specs.

use crate::prelude::*;

#[test]
fn compile_writes_a_routine_package() {
    let workdir = tempdir();
    let trace_path = workdir.path().join("trace.json");
    write_json(workdir.path(), "trace.json", &sample_trace());
    let out_dir = workdir.path().join("out");

    let output = ordo()
        .args(["compile", trace_path.to_str().expect("utf8 path")])
        .args(["-o", out_dir.to_str().expect("utf8 path")])
        .output()
        .expect("run ordo compile");

    assert!(output.status.success(), "stderr: {}", output.stderr_str());
    assert!(output.stdout_str().contains("Routine package written to"));

    assert!(out_dir.join("routine.yaml").exists());
    assert!(out_dir.join("schemas/input.schema.json").exists());
    assert!(out_dir.join("schemas/output.schema.json").exists());
    assert!(out_dir.join("fixtures/s1_result.json").exists());
    assert!(out_dir.join("input.json").exists());
    assert!(out_dir.join("expected_output.json").exists());

    let routine_yaml = std::fs::read_to_string(out_dir.join("routine.yaml")).expect("read routine.yaml");
    assert!(routine_yaml.contains("name: fetch_the_report"));
    assert!(routine_yaml.contains("fetch_csv"));
    // The tool arg equals the mission's input field by value, so the
    // compiler recovers a template reference instead of a literal.
    assert!(routine_yaml.contains("{{ path }}"));
}

#[test]
fn compile_rejects_a_malformed_trace_file() {
    let workdir = tempdir();
    std::fs::write(workdir.path().join("trace.json"), "not json").expect("write");

    let output = ordo()
        .args(["compile", "trace.json"])
        .current_dir(workdir.path())
        .output()
        .expect("run ordo compile");

    assert!(!output.status.success());
    assert!(output.stderr_str().contains("Error"));
}

#[test]
fn compile_rejects_a_missing_trace_file() {
    let workdir = tempdir();

    let output = ordo()
        .args(["compile", "does-not-exist.json"])
        .current_dir(workdir.path())
        .output()
        .expect("run ordo compile");

    assert!(!output.status.success());
}
