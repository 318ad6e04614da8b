//! `ordo validate` specs.

use crate::prelude::*;

fn compile_sample(workdir: &std::path::Path) -> std::path::PathBuf {
    write_json(workdir, "trace.json", &sample_trace());
    let out_dir = workdir.join("out");
    let output = ordo()
        .args(["compile", "trace.json"])
        .args(["-o", out_dir.to_str().expect("utf8 path")])
        .current_dir(workdir)
        .output()
        .expect("run ordo compile");
    assert!(output.status.success(), "stderr: {}", output.stderr_str());
    out_dir
}

#[test]
fn validate_accepts_a_freshly_compiled_package() {
    let workdir = tempdir();
    let out_dir = compile_sample(workdir.path());

    let output = ordo()
        .args(["validate", out_dir.to_str().expect("utf8 path")])
        .output()
        .expect("run ordo validate");

    assert!(output.status.success(), "stderr: {}", output.stderr_str());
    assert!(output.stdout_str().contains("OK — routine is valid"));
}

#[test]
fn validate_rejects_a_directory_with_no_routine() {
    let workdir = tempdir();

    let output = ordo()
        .args(["validate", workdir.path().to_str().expect("utf8 path")])
        .output()
        .expect("run ordo validate");

    assert!(!output.status.success());
    assert!(output.stderr_str().contains("Error"));
}

#[test]
fn validate_reports_an_undeclared_unregistered_tool() {
    let workdir = tempdir();
    let out_dir = compile_sample(workdir.path());

    // Rename only the step's tool reference, leaving the routine's own
    // `tools:` declaration and the CLI's fixture tool registry (which
    // only knows `fetch_csv`) both pointed at the old name.
    let routine_path = out_dir.join("routine.yaml");
    let routine = std::fs::read_to_string(&routine_path).expect("read routine.yaml");
    let corrupted = routine.replace("tool: fetch_csv", "tool: fetch_csv_bogus");
    assert_ne!(routine, corrupted, "expected to find a `tool: fetch_csv` step field");
    std::fs::write(&routine_path, corrupted).expect("write routine.yaml");

    let output = ordo()
        .args(["validate", out_dir.to_str().expect("utf8 path")])
        .output()
        .expect("run ordo validate");

    assert!(!output.status.success());
    assert!(output.stderr_str().contains("Validation errors"));
    assert!(output.stderr_str().contains("undeclared tool"));
}
