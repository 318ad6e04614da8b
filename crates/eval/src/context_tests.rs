use super::*;

#[test]
fn stores_and_retrieves_vars() {
    let ctx = Context::new().with_var("x", Value::Int(5));
    assert_eq!(ctx.get_var("x"), Some(&Value::Int(5)));
    assert_eq!(ctx.get_var("missing"), None);
}

#[test]
fn registers_and_invokes_native_fn() {
    let mut ctx = Context::new();
    ctx.register_fn("double", |args, _kwargs| match args.first() {
        Some(Value::Int(n)) => Ok(Value::Int(n * 2)),
        _ => Err(EvalError::Type("expected int".into())),
    });
    let f = ctx.get_fn("double").expect("function registered");
    let result = f(&[Value::Int(21)], &IndexMap::new()).unwrap();
    assert_eq!(result, Value::Int(42));
}
