// Integration tests for the definition parser
//
// These tests verify the parser's behavior on complete definitions.
// Tests cover:
// - Leaf expressions (identifiers, integers, strings, booleans)
// - Operator precedence and associativity
// - Arrays, grouping, and calls
// - Rejection of malformed input with positioned error messages

use defgraph::ast::Expr;
use defgraph::parser::parse_definition;

fn parse(definition: &str) -> Expr {
    parse_definition(definition).expect("definition should parse")
}

fn ident(name: &str) -> Expr {
    Expr::Identifier(name.to_string())
}

fn int(value: i64) -> Expr {
    Expr::Int(value)
}

fn infix(op: &str, left: Expr, right: Expr) -> Expr {
    Expr::Infix {
        op: op.to_string(),
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn prefix(op: &str, right: Expr) -> Expr {
    Expr::Prefix {
        op: op.to_string(),
        right: Box::new(right),
    }
}

#[test]
fn test_parses_leaf_expressions() {
    assert_eq!(parse("balance"), ident("balance"));
    assert_eq!(parse("42"), int(42));
    assert_eq!(parse("true"), Expr::Bool(true));
    assert_eq!(parse("false"), Expr::Bool(false));
    assert_eq!(parse("\"hello\""), Expr::String("hello".to_string()));
}

#[test]
fn test_string_escapes_are_decoded() {
    assert_eq!(
        parse(r#""line\nbreak \"quoted\" back\\slash""#),
        Expr::String("line\nbreak \"quoted\" back\\slash".to_string())
    );
}

#[test]
fn test_negative_number_is_a_prefix_expression() {
    assert_eq!(parse("-7"), prefix("-", int(7)));
}

#[test]
fn test_product_binds_tighter_than_sum() {
    assert_eq!(
        parse("1 + 2 * 3"),
        infix("+", int(1), infix("*", int(2), int(3)))
    );
}

#[test]
fn test_parentheses_override_precedence() {
    assert_eq!(
        parse("(1 + 2) * 3"),
        infix("*", infix("+", int(1), int(2)), int(3))
    );
}

#[test]
fn test_subtraction_is_left_associative() {
    assert_eq!(
        parse("1 - 2 - 3"),
        infix("-", infix("-", int(1), int(2)), int(3))
    );
}

#[test]
fn test_comparison_binds_tighter_than_logical_and() {
    assert_eq!(
        parse("a < b && c"),
        infix("&&", infix("<", ident("a"), ident("b")), ident("c"))
    );
}

#[test]
fn test_logical_or_is_lowest_precedence() {
    assert_eq!(
        parse("a || b && c"),
        infix("||", ident("a"), infix("&&", ident("b"), ident("c")))
    );
}

#[test]
fn test_equality_operators() {
    assert_eq!(parse("x != y"), infix("!=", ident("x"), ident("y")));
    assert_eq!(parse("x == y"), infix("==", ident("x"), ident("y")));
}

#[test]
fn test_prefix_binds_tighter_than_product() {
    assert_eq!(parse("-2 * 3"), infix("*", prefix("-", int(2)), int(3)));
}

#[test]
fn test_double_prefix() {
    assert_eq!(parse("!!ok"), prefix("!", prefix("!", ident("ok"))));
}

#[test]
fn test_array_literals() {
    assert_eq!(
        parse("[1, two, \"three\"]"),
        Expr::Array(vec![
            int(1),
            ident("two"),
            Expr::String("three".to_string())
        ])
    );
    assert_eq!(parse("[]"), Expr::Array(vec![]));
    // Trailing commas are accepted
    assert_eq!(parse("[1, 2,]"), Expr::Array(vec![int(1), int(2)]));
}

#[test]
fn test_nested_arrays() {
    assert_eq!(
        parse("[[1], []]"),
        Expr::Array(vec![Expr::Array(vec![int(1)]), Expr::Array(vec![])])
    );
}

#[test]
fn test_call_with_arguments() {
    assert_eq!(
        parse("any(2, owners)"),
        Expr::Call {
            function: "any".to_string(),
            args: vec![int(2), ident("owners")],
        }
    );
}

#[test]
fn test_call_without_arguments() {
    assert_eq!(
        parse("now()"),
        Expr::Call {
            function: "now".to_string(),
            args: vec![],
        }
    );
}

#[test]
fn test_nested_calls() {
    assert_eq!(
        parse("f(g(1))"),
        Expr::Call {
            function: "f".to_string(),
            args: vec![Expr::Call {
                function: "g".to_string(),
                args: vec![int(1)],
            }],
        }
    );
}

#[test]
fn test_calls_participate_in_infix_expressions() {
    assert_eq!(
        parse("any(2, owners) && ready"),
        infix(
            "&&",
            Expr::Call {
                function: "any".to_string(),
                args: vec![int(2), ident("owners")],
            },
            ident("ready")
        )
    );
}

#[test]
fn test_callee_must_be_an_identifier() {
    let err = parse_definition("5(1)").expect_err("should fail");
    assert!(err.to_string().contains("unexpected"));
}

#[test]
fn test_call_result_is_not_callable() {
    let err = parse_definition("foo(1)(2)").expect_err("should fail");
    assert!(err.to_string().contains("after expression"));
}

#[test]
fn test_empty_definition_is_rejected() {
    let err = parse_definition("").expect_err("should fail");
    assert!(err.to_string().contains("empty definition"));

    let err = parse_definition("   \n\t").expect_err("should fail");
    assert!(err.to_string().contains("empty definition"));
}

#[test]
fn test_trailing_tokens_are_rejected() {
    let err = parse_definition("1 2").expect_err("should fail");
    assert!(err.to_string().contains("after expression"));
    assert!(err.to_string().contains("column 3"));
}

#[test]
fn test_unclosed_paren_is_rejected() {
    let err = parse_definition("(1 + 2").expect_err("should fail");
    assert!(err.to_string().contains("expected `)`"));
}

#[test]
fn test_unclosed_array_is_rejected() {
    let err = parse_definition("[1, 2").expect_err("should fail");
    assert!(err.to_string().contains("expected `]`"));
}

#[test]
fn test_unclosed_call_is_rejected() {
    let err = parse_definition("foo(1,").expect_err("should fail");
    assert!(err.to_string().contains(")"));
}

#[test]
fn test_errors_report_line_numbers() {
    let err = parse_definition("1 +\n+ 2").expect_err("should fail");
    assert!(err.to_string().contains("line 2"));
}

#[test]
fn test_lexer_errors_surface_through_parse() {
    let err = parse_definition("\"abc").expect_err("should fail");
    assert!(err.to_string().contains("unterminated string literal"));

    let err = parse_definition("1 $ 2").expect_err("should fail");
    assert!(err.to_string().contains("unexpected character `$`"));
}
