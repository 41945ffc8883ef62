use indoc::indoc;
use pegmate_core::LineIndex;

use super::{Analysis, analyze};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::ir::{DefId, Grammar};
use crate::test_utils::reduce_grammar;

fn run(src: &str, root: Option<&str>) -> (Grammar, Analysis, Diagnostics) {
    let grammar = reduce_grammar(src);
    let mut diag = Diagnostics::new();
    let analysis = analyze(&grammar, root, &mut diag);
    (grammar, analysis, diag)
}

fn messages(src: &str, root: Option<&str>) -> String {
    let (_, _, diag) = run(src, root);
    diag.to_messages(&LineIndex::new(src))
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn names(grammar: &Grammar, ids: impl Iterator<Item = DefId>) -> Vec<&str> {
    ids.map(|id| grammar.get(id).name.as_str()).collect()
}

#[test]
fn unknown_option_and_property() {
    let src = indoc! {r#"
        option colour = "red";
        option root = A;
        A = "a" [flavour = "x", scope = "s"];
    "#};
    insta::assert_snapshot!(messages(src, Some("A")), @r"
    1:8: warning: unknown option `colour`
    3:10: warning: unknown property `flavour`
    ");
}

#[test]
fn undefined_reference() {
    let src = indoc! {r#"
        A = B Missing;
        B = "b";
    "#};
    insta::assert_snapshot!(messages(src, Some("A")), @"1:7: warning: `Missing` is not defined");
}

#[test]
fn unused_definitions() {
    let src = indoc! {r#"
        A = B;
        B = "b" B;
        C = C;
        tm T = D;
        D = "d";
    "#};
    insta::assert_snapshot!(messages(src, Some("A")), @"3:1: warning: `C` is never used");

    let (grammar, analysis, _) = run(src, Some("A"));
    assert_eq!(names(&grammar, analysis.unused().iter().copied()), vec!["C"]);
}

#[test]
fn highlight_properties_keep_rules_alive() {
    let src = indoc! {r#"
        A = "a";
        Open = "(";
        Close = ")";
        Inner = "x";
        tm Block = Inner [begin = Open, end = Close, include = "Inner"];
    "#};
    assert_eq!(messages(src, Some("A")), "");
}

#[test]
fn no_root_no_unused_check() {
    let src = indoc! {r#"
        A = "a";
        B = "b";
    "#};
    assert_eq!(messages(src, None), "");

    let (_, analysis, _) = run(src, None);
    assert_eq!(analysis, Analysis::default());
}

#[test]
fn inline_self_cycle() {
    insta::assert_snapshot!(
        messages("@inline A = A;", None),
        @"1:9: error: inline definitions form a cycle: A -> A"
    );
    assert_eq!(messages("A = A;", None), "");
}

#[test]
fn inline_cycle_through_two_definitions() {
    let src = indoc! {r#"
        @inline A = "a" B;
        @inline B = A;
    "#};
    let (_, _, diag) = run(src, None);
    assert_eq!(diag.kinds(), vec![DiagnosticKind::InlineCycle]);
    assert!(diag.has_errors());
    insta::assert_snapshot!(diag.printer().render(), @"error at 8..9: inline definitions form a cycle: A -> B -> A (related: A references B at 16..17) (related: B references A at 31..32)");
}

#[test]
fn inline_cycle_through_a_call() {
    let src = indoc! {r#"
        @inline A = B;
        B = "x" A?;
    "#};
    let (_, _, diag) = run(src, None);
    assert_eq!(diag.kinds(), vec![DiagnosticKind::InlineCycle]);
    insta::assert_snapshot!(
        messages(src, None),
        @"1:9: error: inline definitions form a cycle: A -> B -> A"
    );
}

#[test]
fn recursion_through_calls_is_legal() {
    let src = indoc! {r#"
        A = "(" B ")";
        B = A | "x";
    "#};
    assert_eq!(messages(src, Some("B")), "");
}

#[test]
fn back_edge_to_a_call_is_legal() {
    let src = indoc! {r#"
        B = "x" A?;
        @inline A = "(" B ")";
    "#};
    assert_eq!(messages(src, Some("B")), "");
}

#[test]
fn callable_and_relevant_rules() {
    let src = indoc! {r#"
        Sum = Num (Plus Num)*;
        @inline Plus = Ws "+" Ws;
        @drop Ws = /[ ]*/;
        Num = @raw Digits;
        Digits = /[0-9]+/;
        Unused = "u";
    "#};
    let (grammar, analysis, diag) = run(src, Some("Sum"));

    assert_eq!(
        names(&grammar, analysis.callable()),
        vec!["Sum", "Num", "Digits", "Ws"]
    );
    assert_eq!(names(&grammar, analysis.relevant()), vec!["Sum", "Num"]);
    assert_eq!(diag.kinds(), vec![DiagnosticKind::UnusedDefinition]);
    assert_eq!(analysis.root(), grammar.find("Sum").map(|d| d.id()));
}

#[test]
fn optional_context_forces_relevance() {
    let (grammar, analysis, _) = run(r#"Root = Kw? Sep; Kw = "if"; Sep = ";";"#, Some("Root"));
    assert_eq!(names(&grammar, analysis.relevant()), vec!["Root", "Kw"]);
}

#[test]
fn choice_context_forces_relevance() {
    let (grammar, analysis, _) = run(r#"Root = A | B; A = "a"; B = "b";"#, Some("Root"));
    assert_eq!(names(&grammar, analysis.relevant()), vec!["Root", "A", "B"]);
}

#[test]
fn highlight_definition_cannot_be_root() {
    let (_, analysis, diag) = run(r#"tm T = "t";"#, Some("T"));
    assert_eq!(analysis.root(), None);
    assert!(diag.is_empty());
}

#[test]
fn variable_text() {
    let grammar = reduce_grammar(indoc! {r#"
        Fixed = "a" "b";
        Loop = "x" Loop;
        Var = Fixed /[a-z]/;
        Dropped = @drop /[a-z]/;
        Neg = !/[a-z]/ "x";
        Ref = Var;
        Op = "+" | "-";
        Many = "x"+;
    "#});
    let variable = |name: &str| grammar.find(name).unwrap().body.matches_variable_text(&grammar);

    assert!(!variable("Fixed"));
    assert!(!variable("Loop"));
    assert!(variable("Var"));
    assert!(!variable("Dropped"));
    assert!(!variable("Neg"));
    assert!(variable("Ref"));
    assert!(variable("Op"));
    assert!(variable("Many"));
}

#[test]
fn fixed_choice_is_relevant_in_sequence() {
    let src = indoc! {r#"
        Root = Op Num;
        Op = "+" | "-";
        Num = /[0-9]/;
    "#};
    let (grammar, analysis, _) = run(src, Some("Root"));
    assert_eq!(names(&grammar, analysis.relevant()), vec!["Root", "Op", "Num"]);
}
