use indoc::indoc;
use pegmate_core::LineCol;
use pegmate_program::{Combinator as C, Program, Rule, RuleId};

use super::{Interpreter, Parse, ParseLimits, RuntimeError};

fn program(rules: Vec<Rule>) -> Program {
    Program::new(rules, RuleId(0)).unwrap()
}

fn parse(rules: Vec<Rule>, input: &str) -> Parse {
    let program = program(rules);
    Interpreter::new(&program).unwrap().parse(input).unwrap()
}

fn message(parse: &Parse) -> String {
    assert_eq!(parse.messages.len(), 1);
    parse.messages[0].to_string()
}

#[test]
fn choice_reports_all_alternatives() {
    let root = Rule::new("Root", C::choice(C::literal("foo"), C::literal("bar")));
    let result = parse(vec![root], "baz");

    assert!(!result.success);
    assert_eq!(result.failure_offset, Some(0));
    insta::assert_snapshot!(
        message(&result),
        @r#"1:1: error: Expected literal `"foo"` or literal `"bar"`, found `"b"`"#
    );
}

#[test]
fn sequence_flattens_into_rule() {
    let root = Rule::new("Root", C::sequence(C::literal("a"), C::literal("b")));
    let result = parse(vec![root], "ab");

    assert!(result.success);
    assert!(result.messages.is_empty());
    assert_eq!(
        result.tree().unwrap().dump(),
        indoc! {r#"
            Root 0..2
              "a" 0..1
              "b" 1..2
        "#}
    );
}

#[test]
fn sequence_failure_at_second_element() {
    let root = Rule::new("Root", C::sequence(C::literal("a"), C::literal("b")));
    let result = parse(vec![root], "ac");

    assert!(!result.success);
    assert_eq!(result.failure_offset, Some(1));
    insta::assert_snapshot!(message(&result), @r#"1:2: error: Expected literal `"b"`, found `"c"`"#);
}

#[test]
fn zero_or_more() {
    let rules = || vec![Rule::new("Root", C::zero_or_more(C::literal("x")))];

    let empty = parse(rules(), "");
    assert!(empty.success);
    assert!(empty.tree().unwrap().children.is_empty());

    let three = parse(rules(), "xxx");
    assert!(three.success);
    assert_eq!(three.tree().unwrap().children.len(), 3);
    assert_eq!(three.tree().unwrap().end, 3);
}

#[test]
fn nullable_repeat_terminates() {
    let body = C::zero_or_more(C::optional(C::literal("x")));
    let result = parse(vec![Rule::new("Root", C::one_or_more(body))], "xx");
    assert!(result.success);

    let result = parse(vec![Rule::new("Root", C::zero_or_more(C::literal("")))], "");
    assert!(result.success);
}

#[test]
fn one_or_more_needs_one() {
    let result = parse(vec![Rule::new("Root", C::one_or_more(C::literal("x")))], "");
    assert!(!result.success);
    insta::assert_snapshot!(message(&result), @r#"1:1: error: Expected literal `"x"`, found end of input"#);
}

#[test]
fn unconsumed_input_fails() {
    let result = parse(vec![Rule::new("Root", C::literal("a"))], "a\nb");
    assert!(!result.success);
    assert_eq!(result.messages[0].position, LineCol { line: 1, column: 2 });
    insta::assert_snapshot!(message(&result), @r#"1:2: error: Expected end of input, found `"\n"`"#);
}

#[test]
fn furthest_failure_wins_over_later_alternatives() {
    // ("a" "b" "c") | "a"
    let long = C::sequence(C::literal("a"), C::sequence(C::literal("b"), C::literal("c")));
    let root = Rule::new("Root", C::choice(long, C::literal("a")));
    let result = parse(vec![root], "abx");

    assert!(!result.success);
    assert_eq!(result.failure_offset, Some(2));
    insta::assert_snapshot!(message(&result), @r#"1:3: error: Expected literal `"c"`, found `"x"`"#);
}

#[test]
fn patterns_match_and_report() {
    let sum = C::sequence(
        C::pattern("[0-9]+"),
        C::zero_or_more(C::sequence(C::literal("+"), C::pattern("[0-9]+"))),
    );
    let rules = || vec![Rule::new("Sum", sum.clone())];

    let ok = parse(rules(), "12+3");
    assert!(ok.success);
    let texts: Vec<_> = ok.tree().unwrap().children.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, ["12", "+", "3"]);

    let bad = parse(rules(), "12+a");
    insta::assert_snapshot!(message(&bad), @r#"1:4: error: Expected pattern `/[0-9]+/`, found `"a"`"#);

    let bad = parse(rules(), "12a");
    insta::assert_snapshot!(
        message(&bad),
        @r#"1:3: error: Expected literal `"+"` or end of input, found `"a"`"#
    );
}

#[test]
fn repeated_pattern() {
    let hex = C::Pattern {
        pattern: "[0-9a-f]".to_string(),
        repeat: 2,
    };
    let rules = || vec![Rule::new("Byte", hex.clone())];
    assert!(parse(rules(), "ff").success);
    assert!(!parse(rules(), "f").success);
}

#[test]
fn not_is_zero_width_and_silent() {
    // !"-" [a-z]+
    let root = Rule::new(
        "Root",
        C::sequence(C::not(C::literal("-")), C::pattern("[a-z]+")),
    );
    let rules = || vec![root.clone()];

    let ok = parse(rules(), "abc");
    assert!(ok.success);
    assert_eq!(ok.tree().unwrap().children.len(), 1);

    let bad = parse(rules(), "-abc");
    assert!(!bad.success);
    insta::assert_snapshot!(message(&bad), @r#"1:1: error: Unexpected `"-"`"#);
}

#[test]
fn drop_discards_output() {
    let root = Rule::new(
        "Root",
        C::sequence(C::drop(C::pattern(" +")), C::literal("x")),
    );
    let result = parse(vec![root], "  x");
    assert!(result.success);
    let tree = result.tree().unwrap();
    assert_eq!(tree.children.len(), 1);
    assert_eq!(tree.children[0].text, "x");
}

#[test]
fn terminal_collapses_text() {
    let string = C::sequence(
        C::literal("\""),
        C::sequence(C::pattern(r#"(?:[^"\\]|\\.)*"#), C::literal("\"")),
    );
    let rules = |unescape| vec![Rule::new("Str", C::terminal(unescape, string.clone()))];

    let raw = parse(rules(false), r#""a\tb""#);
    let tree = raw.tree().unwrap();
    assert!(tree.children.is_empty());
    assert_eq!(tree.text, r#""a\tb""#);

    let decoded = parse(rules(true), r#""a\tb""#);
    assert_eq!(decoded.tree().unwrap().text, "\"a\tb\"");
}

#[test]
fn error_name_always_relabels() {
    let num = Rule::new("Number", C::error_name("Number", false, C::pattern("[0-9]+")));
    let root = Rule::new("Root", C::sequence(C::literal("="), C::Call(RuleId(1))));
    let result = parse(vec![root, num], "=x");
    insta::assert_snapshot!(message(&result), @r#"1:2: error: Expected Number, found `"x"`"#);
}

#[test]
fn promoted_error_name_only_at_start() {
    let pair = C::sequence(C::literal("("), C::literal(")"));
    let root = Rule::new("Root", C::error_name("Unit", true, pair));
    let rules = || vec![root.clone()];

    let at_start = parse(rules(), "x");
    insta::assert_snapshot!(message(&at_start), @r#"1:1: error: Expected Unit, found `"x"`"#);

    let inside = parse(rules(), "(x");
    insta::assert_snapshot!(message(&inside), @r#"1:2: error: Expected literal `")"`, found `"x"`"#);
}

#[test]
fn rule_nodes_and_splicing() {
    let rules = vec![
        Rule::new(
            "Pair",
            C::sequence(C::Call(RuleId(1)), C::sequence(C::Call(RuleId(2)), C::Call(RuleId(1)))),
        ),
        Rule::new("Word", C::terminal(false, C::pattern("[a-z]+"))),
        Rule::new("Eq", C::literal("=")).with_capture(false),
    ];
    let result = parse(rules, "ab=cd");
    assert!(result.success);
    assert_eq!(
        result.tree().unwrap().dump(),
        indoc! {r#"
            Pair 0..5
              Word 0..2 = "ab"
              "=" 2..3
              Word 3..5 = "cd"
        "#}
    );
}

#[test]
fn recursion_is_allowed() {
    // Nest := "(" Nest? ")"
    let nest = Rule::new(
        "Nest",
        C::sequence(
            C::literal("("),
            C::sequence(C::optional(C::Call(RuleId(0))), C::literal(")")),
        ),
    );
    let result = parse(vec![nest], "((()))");
    assert!(result.success);
    assert_eq!(result.root.find_all("Nest").count(), 3);
}

#[test]
fn left_recursion_hits_limit() {
    let root = Rule::new("Expr", C::sequence(C::Call(RuleId(0)), C::literal("+")));
    let program = program(vec![root]);
    let interpreter = Interpreter::new(&program)
        .unwrap()
        .limits(ParseLimits::new().recursion_limit(64));

    assert_eq!(
        interpreter.parse("+"),
        Err(RuntimeError::RecursionLimitExceeded(64))
    );
}

#[test]
fn interpreter_is_reusable() {
    let program = program(vec![Rule::new("Root", C::pattern("[a-z]+"))]);
    let interpreter = Interpreter::new(&program).unwrap();
    assert!(interpreter.parse("abc").unwrap().success);
    assert!(!interpreter.parse("123").unwrap().success);
    assert!(interpreter.parse("xyz").unwrap().success);
}
