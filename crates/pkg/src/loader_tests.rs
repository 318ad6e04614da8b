use super::*;
use std::sync::Arc;

fn write_routine(dir: &std::path::Path, yaml: &str) {
    std::fs::write(dir.join("routine.yaml"), yaml).unwrap();
}

const MINIMAL_ROUTINE: &str = r#"
name: demo
steps:
  - type: return
    id: s1
    value: "ok"
"#;

#[test]
fn load_fails_when_routine_yaml_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_without_udf(dir.path()).unwrap_err();
    assert!(matches!(err, PkgError::RoutineMissing(_)));
}

#[test]
fn load_reads_minimal_routine() {
    let dir = tempfile::tempdir().unwrap();
    write_routine(dir.path(), MINIMAL_ROUTINE);
    let package = load_without_udf(dir.path()).unwrap();
    assert_eq!(package.routine.name, "demo");
    assert_eq!(package.routine.steps.len(), 1);
    assert!(package.input_schema.is_none());
}

#[test]
fn load_reads_optional_schemas() {
    let dir = tempfile::tempdir().unwrap();
    write_routine(dir.path(), MINIMAL_ROUTINE);
    let schemas_dir = dir.path().join("schemas");
    std::fs::create_dir_all(&schemas_dir).unwrap();
    std::fs::write(
        schemas_dir.join("input.schema.json"),
        r#"{"type": "object"}"#,
    )
    .unwrap();
    let package = load_without_udf(dir.path()).unwrap();
    assert!(package.input_schema.is_some());
    assert!(package.output_schema.is_none());
}

#[test]
fn fixture_reads_json_file_as_value() {
    let dir = tempfile::tempdir().unwrap();
    write_routine(dir.path(), MINIMAL_ROUTINE);
    let fixtures_dir = dir.path().join("fixtures");
    std::fs::create_dir_all(&fixtures_dir).unwrap();
    std::fs::write(fixtures_dir.join("s1_result.json"), r#"{"x": 1}"#).unwrap();
    let package = load_without_udf(dir.path()).unwrap();
    let fixture = package.fixture("s1_result").unwrap();
    assert_eq!(fixture.get_attr("x"), Some(&Value::Int(1)));
}

#[test]
fn load_accepts_custom_udf_module() {
    let dir = tempfile::tempdir().unwrap();
    write_routine(dir.path(), MINIMAL_ROUTINE);
    let mut module = crate::udf::StaticUdfModule::new();
    module.register("noop", |_| Ok(Value::Null));
    let package = load(dir.path(), Arc::new(module)).unwrap();
    assert!(package.udf.has("noop"));
}
