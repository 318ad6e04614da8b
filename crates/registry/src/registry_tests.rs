use super::*;
use ordo_core::SchemaType;

fn echo_schema() -> Schema {
    Schema {
        kind: Some(SchemaType::Object),
        ..Default::default()
    }
}

#[test]
fn calls_registered_tool() {
    let mut registry = ToolRegistry::new();
    registry.register(
        "fetch",
        |args| {
            let url = args.get("url").and_then(Value::as_str).unwrap_or_default();
            Ok(Value::String(format!("data from {url}")))
        },
        None,
        None,
    );
    let mut args = Map::new();
    args.insert("url".to_string(), Value::String("http://x".to_string()));
    let result = registry.call("fetch", &args).unwrap();
    assert_eq!(result, Value::String("data from http://x".to_string()));
}

#[test]
fn unknown_tool_is_an_error() {
    let registry = ToolRegistry::new();
    assert!(matches!(
        registry.call("missing", &Map::new()),
        Err(ToolError::Unknown(_))
    ));
}

#[test]
fn invalid_args_are_rejected_before_calling() {
    let mut registry = ToolRegistry::new();
    let mut called = false;
    registry.register(
        "strict",
        move |_args| {
            called = true;
            Ok(Value::Null)
        },
        Some(Schema {
            kind: Some(SchemaType::Object),
            required: vec!["id".to_string()],
            ..Default::default()
        }),
        None,
    );
    assert!(matches!(
        registry.call("strict", &Map::new()),
        Err(ToolError::InvalidArgs { .. })
    ));
}

#[test]
fn tool_exec_error_is_wrapped() {
    let mut registry = ToolRegistry::new();
    registry.register("boom", |_args| Err("kaboom".to_string()), None, None);
    match registry.call("boom", &Map::new()) {
        Err(ToolError::Exec { tool, message }) => {
            assert_eq!(tool, "boom");
            assert_eq!(message, "kaboom");
        }
        other => panic!("expected Exec error, got {other:?}"),
    }
}

#[test]
fn list_tools_reports_schema_presence() {
    let mut registry = ToolRegistry::new();
    registry.register("plain", |_| Ok(Value::Null), None, None);
    registry.register("checked", |_| Ok(Value::Null), Some(echo_schema()), None);
    let names: Vec<_> = registry.list_tools();
    assert!(names.iter().any(|t| t.name == "plain" && !t.has_args_schema));
    assert!(names.iter().any(|t| t.name == "checked" && t.has_args_schema));
}
