use indoc::indoc;
use rowan::TextRange;

use super::{ReduceError, reduce};
use crate::ir::{DefKind, GrammarError, Marker, Value};
use crate::syntax::{SyntaxKind, TreeBuilder};
use crate::test_utils::{parse_grammar, reduce_grammar};

fn bodies(src: &str) -> String {
    let grammar = reduce_grammar(src);
    grammar
        .all()
        .map(|d| format!("{} = {}", d.name, d.body))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn sequence_folds_right() {
    insta::assert_snapshot!(bodies(r#"Sum = Num "+" Num;"#), @r#"Sum = (seq Num (seq "+" Num))"#);
}

#[test]
fn choice_folds_right() {
    insta::assert_snapshot!(
        bodies(r#"A = "a" | "b" | "c";"#),
        @r#"A = (choice "a" (choice "b" "c"))"#
    );
}

#[test]
fn choice_of_sequences() {
    insta::assert_snapshot!(
        bodies(r#"A = "a" B | "c";"#),
        @r#"A = (choice (seq "a" B) "c")"#
    );
}

#[test]
fn suffixes_and_groups() {
    insta::assert_snapshot!(
        bodies(r#"A = ("a" "b")* "c"? D+;"#),
        @r#"A = (seq (star (seq "a" "b")) (seq (opt "c") (plus D)))"#
    );
}

#[test]
fn negation() {
    insta::assert_snapshot!(bodies(r#"A = !"x" /./;"#), @r#"A = (seq (not "x") /./)"#);
}

#[test]
fn definition_markers_first_popped_innermost() {
    let grammar = reduce_grammar(r#"@inline @drop A = "a";"#);
    let def = grammar.find("A").unwrap();

    insta::assert_snapshot!(def.body, @r#"(@inline (@drop "a"))"#);
    assert_eq!(def.markers(), vec![Marker::TreatInline, Marker::Drop]);
    assert!(def.is_inline());
    assert!(def.is_dropped());
    assert!(!def.is_terminal());
}

#[test]
fn marked_element_inside_body() {
    insta::assert_snapshot!(
        bodies(r#"A = @raw /[0-9]+/ "x" @drop @terminal B;"#),
        @r#"A = (seq (@raw /[0-9]+/) (seq "x" (@drop (@terminal B))))"#
    );
}

#[test]
fn regex_repeat_count() {
    insta::assert_snapshot!(
        bodies(r#"A = /ab/{3} /c/;"#),
        @"A = (seq /ab/{3} /c/)"
    );
}

#[test]
fn string_escapes_are_decoded() {
    let grammar = reduce_grammar(r#"A = "a\n\"b\u{41}";"#);
    let body = &grammar.find("A").unwrap().body;
    assert_eq!(
        body.kind,
        crate::ir::ElementKind::Text("a\n\"bA".to_owned())
    );
}

#[test]
fn regex_escaped_slash() {
    insta::assert_snapshot!(bodies(r#"A = /a\/b/;"#), @"A = /a/b/");
}

#[test]
fn options_and_properties() {
    let grammar = reduce_grammar(indoc! {r#"
        option root = Expr;
        option scope_suffix = "demo";
        option generate_visitor = true;
        Expr = Keyword;
        tm Keyword = "if" [scope = "keyword.control", include = Expr];
    "#});

    assert_eq!(grammar.option("root"), Some(&Value::Reference("Expr".into())));
    assert_eq!(grammar.option("scope_suffix").and_then(Value::as_str), Some("demo"));
    assert_eq!(grammar.option("generate_visitor").and_then(Value::as_bool), Some(true));

    assert_eq!(grammar.definitions().count(), 1);
    let keyword = grammar.tm_definitions().next().unwrap();
    assert_eq!(keyword.kind, DefKind::Highlight);
    assert_eq!(
        keyword.property("scope").and_then(Value::as_str),
        Some("keyword.control")
    );
    assert_eq!(
        keyword.properties.keys().collect::<Vec<_>>(),
        vec!["scope", "include"]
    );
}

#[test]
fn repeated_option_overrides() {
    let grammar = reduce_grammar(indoc! {r#"
        option root = A;
        option root = B;
        A = "a";
        B = "b";
    "#});
    assert_eq!(grammar.option("root").and_then(Value::as_str), Some("B"));
}

#[test]
fn trivia_and_comments_are_ignored() {
    insta::assert_snapshot!(
        bodies(indoc! {r#"
            // leading comment
            A =
                "a"   // trailing
                B;
            B = "b";
        "#}),
        @r#"
    A = (seq "a" B)
    B = "b"
    "#
    );
}

#[test]
fn definitions_get_ids_in_source_order() {
    let grammar = reduce_grammar(r#"A = "a"; tm T = "t"; B = "b";"#);
    let ids: Vec<_> = grammar.all().map(|d| (d.name.as_str(), d.id().index())).collect();
    assert_eq!(ids, vec![("A", 0), ("T", 1), ("B", 2)]);
    assert_eq!(grammar.get(grammar.find("B").unwrap().id()).name, "B");
}

#[test]
fn duplicate_name_is_case_insensitive() {
    let err = reduce(&parse_grammar("A = \"a\";\na = \"b\";")).unwrap_err();
    assert_eq!(
        err,
        ReduceError::Grammar(GrammarError::DuplicateName {
            name: "A".into(),
            span: TextRange::new(0.into(), 1.into()),
            duplicate: TextRange::new(9.into(), 10.into()),
        })
    );
    insta::assert_snapshot!(err, @"`A` is defined more than once (names are case-insensitive)");
}

#[test]
fn duplicate_name_across_highlight_definitions() {
    let err = reduce(&parse_grammar(r#"Key = "a"; tm KEY = "b";"#)).unwrap_err();
    assert!(matches!(
        err,
        ReduceError::Grammar(GrammarError::DuplicateName { ref name, .. }) if name == "Key"
    ));
}

#[test]
fn orphan_suffix_operator() {
    let mut b = TreeBuilder::new();
    b.start_node(SyntaxKind::Root);
    b.start_node(SyntaxKind::Definition);
    b.token(SyntaxKind::Ident, "A");
    b.token(SyntaxKind::Equals, "=");
    b.start_node(SyntaxKind::Suffix);
    b.token(SyntaxKind::Star, "*");
    b.finish_node();
    b.finish_node();
    b.finish_node();

    let err = reduce(&b.finish()).unwrap_err();
    assert_eq!(
        err,
        ReduceError::OrphanOperator {
            operator: "*",
            span: TextRange::new(2.into(), 3.into()),
        }
    );
}

#[test]
fn stray_top_level_item() {
    let mut b = TreeBuilder::new();
    b.start_node(SyntaxKind::Root);
    b.token(SyntaxKind::Ident, "Stray");
    b.finish_node();

    let err = reduce(&b.finish()).unwrap_err();
    insta::assert_snapshot!(err, @"unexpected reference left over in Root node");
}

#[test]
fn leftover_inside_definition() {
    let mut b = TreeBuilder::new();
    b.start_node(SyntaxKind::Root);
    b.start_node(SyntaxKind::Definition);
    b.token(SyntaxKind::Ident, "A");
    b.token(SyntaxKind::Ident, "B");
    b.token(SyntaxKind::Ident, "C");
    b.finish_node();
    b.finish_node();

    let err = reduce(&b.finish()).unwrap_err();
    assert!(matches!(
        err,
        ReduceError::Leftover {
            kind: SyntaxKind::Definition,
            found: "reference",
            ..
        }
    ));
}

#[test]
fn empty_sequence_node() {
    let mut b = TreeBuilder::new();
    b.start_node(SyntaxKind::Root);
    b.start_node(SyntaxKind::Definition);
    b.token(SyntaxKind::Ident, "A");
    b.start_node(SyntaxKind::Sequence);
    b.finish_node();
    b.finish_node();
    b.finish_node();

    let err = reduce(&b.finish()).unwrap_err();
    insta::assert_snapshot!(err, @"Sequence node contains no elements");
}

#[test]
fn missing_definition_body() {
    let mut b = TreeBuilder::new();
    b.start_node(SyntaxKind::Root);
    b.start_node(SyntaxKind::Definition);
    b.token(SyntaxKind::Ident, "A");
    b.finish_node();
    b.finish_node();

    let err = reduce(&b.finish()).unwrap_err();
    insta::assert_snapshot!(
        err,
        @"malformed Definition node: expected element, but the current scope is empty"
    );
}

#[test]
fn regex_rejected_as_property_value() {
    let mut b = TreeBuilder::new();
    b.start_node(SyntaxKind::Root);
    b.start_node(SyntaxKind::OptionDecl);
    b.token(SyntaxKind::Ident, "root");
    b.token(SyntaxKind::Equals, "=");
    b.token(SyntaxKind::Regex, "/x/");
    b.finish_node();
    b.finish_node();

    let err = reduce(&b.finish()).unwrap_err();
    assert_eq!(
        err,
        ReduceError::InvalidValue {
            found: "regex",
            span: TextRange::new(5.into(), 8.into()),
        }
    );
}

#[test]
fn zero_repeat_count_is_rejected() {
    let err = reduce(&parse_grammar("A = /a/{0};")).unwrap_err();
    insta::assert_snapshot!(err, @"invalid repeat count `0`");
}

#[test]
fn tree_must_start_at_root() {
    let mut b = TreeBuilder::new();
    b.start_node(SyntaxKind::Definition);
    b.finish_node();

    let err = reduce(&b.finish()).unwrap_err();
    assert!(matches!(
        err,
        ReduceError::UnexpectedKind {
            kind: SyntaxKind::Definition,
            ..
        }
    ));
}
