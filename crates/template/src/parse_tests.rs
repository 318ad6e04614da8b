use super::*;

#[test]
fn parses_plain_text() {
    assert_eq!(
        parse_template("hello world").unwrap(),
        vec![Node::Text("hello world".to_string())]
    );
}

#[test]
fn parses_expr_interpolation() {
    assert_eq!(
        parse_template("hi {{ name }}!").unwrap(),
        vec![
            Node::Text("hi ".to_string()),
            Node::Expr("name".to_string()),
            Node::Text("!".to_string()),
        ]
    );
}

#[test]
fn parses_if_else() {
    let nodes = parse_template("{% if ok %}yes{% else %}no{% endif %}").unwrap();
    assert_eq!(
        nodes,
        vec![Node::If {
            test: "ok".to_string(),
            body: vec![Node::Text("yes".to_string())],
            else_body: vec![Node::Text("no".to_string())],
        }]
    );
}

#[test]
fn parses_for_loop() {
    let nodes = parse_template("{% for x in xs %}{{ x }},{% endfor %}").unwrap();
    assert_eq!(
        nodes,
        vec![Node::For {
            var: "x".to_string(),
            iter: "xs".to_string(),
            body: vec![Node::Expr("x".to_string()), Node::Text(",".to_string())],
        }]
    );
}

#[test]
fn rejects_unclosed_expr() {
    assert!(parse_template("{{ name").is_err());
}

#[test]
fn rejects_if_without_endif() {
    assert!(parse_template("{% if ok %}yes").is_err());
}

#[test]
fn rejects_unknown_tag() {
    assert!(parse_template("{% bogus %}").is_err());
}
