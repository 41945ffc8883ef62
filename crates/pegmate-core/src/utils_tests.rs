use crate::utils::{to_pascal_case, to_rust_ident, to_snake_case};

#[test]
fn pascal_case() {
    let cases = [
        ("binary_expr", "BinaryExpr"),
        ("expr", "Expr"),
        ("_leading", "Leading"),
        ("SCREAMING_CASE", "ScreamingCase"),
        ("IF", "If"),
        ("BinaryExpr", "BinaryExpr"),
        ("QName", "QName"),
        ("keyword.control", "KeywordControl"),
        ("kebab-case-name", "KebabCaseName"),
        ("camelCase", "CamelCase"),
    ];
    for (input, expected) in cases {
        assert_eq!(to_pascal_case(input), expected, "{input}");
    }
}

#[test]
fn snake_case() {
    let cases = [
        ("BinaryExpr", "binary_expr"),
        ("Expr", "expr"),
        ("camelCaseName", "camel_case_name"),
        ("HTTPHeader", "http_header"),
        ("Expr2Value", "expr2_value"),
        ("already_snake", "already_snake"),
        ("keyword.control", "keyword_control"),
        ("FooBar", "foo_bar"),
    ];
    for (input, expected) in cases {
        assert_eq!(to_snake_case(input), expected, "{input}");
    }
}

#[test]
fn case_conversions_agree() {
    for name in ["Sum", "BinaryExpr", "HTTPHeader", "string_literal"] {
        assert_eq!(to_snake_case(&to_pascal_case(name)), to_snake_case(name));
    }
}

#[test]
fn rust_idents() {
    assert_eq!(to_rust_ident("expr"), "expr");
    assert_eq!(to_rust_ident("match"), "r#match");
    assert_eq!(to_rust_ident("self"), "self_");
    assert_eq!(to_rust_ident("9lives"), "_9lives");
    assert_eq!(to_rust_ident("a-b"), "a_b");
}
