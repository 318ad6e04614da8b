use super::*;
use crate::loader::load_without_udf;

fn write_routine(dir: &std::path::Path, yaml: &str) {
    std::fs::write(dir.join("routine.yaml"), yaml).unwrap();
}

#[test]
fn flags_undeclared_tool() {
    let dir = tempfile::tempdir().unwrap();
    write_routine(
        dir.path(),
        r#"
name: demo
steps:
  - type: tool.call
    id: s1
    tool: fetch
    args: {}
    save_as: result
  - type: return
    id: s2
    value: "{{ result }}"
"#,
    );
    let package = load_without_udf(dir.path()).unwrap();
    let errors = validate(&package, None);
    assert!(errors.iter().any(|e| e.contains("undeclared tool: fetch")));
}

#[test]
fn accepts_tool_declared_in_routine() {
    let dir = tempfile::tempdir().unwrap();
    write_routine(
        dir.path(),
        r#"
name: demo
tools:
  - name: fetch
steps:
  - type: tool.call
    id: s1
    tool: fetch
    args: {}
    save_as: result
  - type: return
    id: s2
    value: "{{ result }}"
"#,
    );
    let package = load_without_udf(dir.path()).unwrap();
    let errors = validate(&package, None);
    assert!(errors.is_empty());
}

#[test]
fn accepts_tool_registered_at_runtime_but_undeclared() {
    let dir = tempfile::tempdir().unwrap();
    write_routine(
        dir.path(),
        r#"
name: demo
steps:
  - type: tool.call
    id: s1
    tool: fetch
    args: {}
    save_as: result
  - type: return
    id: s2
    value: "{{ result }}"
"#,
    );
    let package = load_without_udf(dir.path()).unwrap();
    let mut registry = ToolRegistry::new();
    registry.register("fetch", |_| Ok(Value::Null), None, None);
    let errors = validate(&package, Some(&registry));
    assert!(errors.is_empty());
}

#[test]
fn flags_missing_fixture_reference() {
    let dir = tempfile::tempdir().unwrap();
    write_routine(
        dir.path(),
        r#"
name: demo
tools:
  - name: fetch
steps:
  - type: tool.call
    id: s1
    tool: fetch
    args:
      url: "fixture://missing_fixture"
    save_as: result
  - type: return
    id: s2
    value: "{{ result }}"
"#,
    );
    let package = load_without_udf(dir.path()).unwrap();
    let errors = validate(&package, None);
    assert!(errors.iter().any(|e| e.contains("missing_fixture")));
}

#[test]
fn flags_unknown_user_function() {
    let dir = tempfile::tempdir().unwrap();
    write_routine(
        dir.path(),
        r#"
name: demo
steps:
  - type: udf.call
    id: s1
    function: greet
    args: {}
    save_as: result
  - type: return
    id: s2
    value: "{{ result }}"
"#,
    );
    let package = load_without_udf(dir.path()).unwrap();
    let errors = validate(&package, None);
    assert!(errors.iter().any(|e| e.contains("unknown user function: greet")));
}
