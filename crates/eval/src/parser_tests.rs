use super::*;

#[test]
fn parses_arithmetic_precedence() {
    let expr = parse("1 + 2 * 3").unwrap();
    assert_eq!(
        expr,
        Expr::Arith(
            ArithOp::Add,
            Box::new(Expr::Int(1)),
            Box::new(Expr::Arith(
                ArithOp::Mul,
                Box::new(Expr::Int(2)),
                Box::new(Expr::Int(3))
            ))
        )
    );
}

#[test]
fn parses_chained_comparison() {
    let expr = parse("1 < x < 10").unwrap();
    match expr {
        Expr::Compare(first, rest) => {
            assert_eq!(*first, Expr::Int(1));
            assert_eq!(rest.len(), 2);
        }
        other => panic!("expected Compare, got {other:?}"),
    }
}

#[test]
fn parses_ternary_conditional() {
    let expr = parse("1 if x else 2").unwrap();
    assert_eq!(
        expr,
        Expr::Conditional {
            body: Box::new(Expr::Int(1)),
            test: Box::new(Expr::Ident("x".to_string())),
            orelse: Box::new(Expr::Int(2)),
        }
    );
}

#[test]
fn parses_attribute_and_index_chain() {
    let expr = parse("a.b[0]").unwrap();
    assert_eq!(
        expr,
        Expr::Index(
            Box::new(Expr::Attr(Box::new(Expr::Ident("a".to_string())), "b".to_string())),
            Box::new(Expr::Int(0)),
        )
    );
}

#[test]
fn parses_call_with_positional_and_keyword_args() {
    let expr = parse("udf.double(x, scale=2)").unwrap();
    match expr {
        Expr::Call { func, args, kwargs } => {
            assert_eq!(
                *func,
                Expr::Attr(Box::new(Expr::Ident("udf".to_string())), "double".to_string())
            );
            assert_eq!(args, vec![Expr::Ident("x".to_string())]);
            assert_eq!(kwargs, vec![("scale".to_string(), Expr::Int(2))]);
        }
        other => panic!("expected Call, got {other:?}"),
    }
}

#[test]
fn parses_boolean_and_not_precedence() {
    let expr = parse("not a and b or c").unwrap();
    assert_eq!(
        expr,
        Expr::BoolOp(
            BoolOp::Or,
            Box::new(Expr::BoolOp(
                BoolOp::And,
                Box::new(Expr::Unary(UnaryOp::Not, Box::new(Expr::Ident("a".to_string())))),
                Box::new(Expr::Ident("b".to_string())),
            )),
            Box::new(Expr::Ident("c".to_string())),
        )
    );
}

#[test]
fn rejects_trailing_garbage() {
    assert!(parse("1 + 2 3").is_err());
}

#[test]
fn rejects_division_operator() {
    assert!(parse("1 / 2").is_err());
}
