use super::{END_OF_INPUT, FurthestFailure};

#[test]
fn later_failure_resets_expectations() {
    let mut failure = FurthestFailure::new();
    failure.record(0, "a".into());
    failure.record(2, "b".into());
    failure.record(1, "ignored".into());
    failure.record(2, "c".into());
    failure.record(2, "b".into());

    assert_eq!(failure.position(), 2);
    assert_eq!(failure.expected().collect::<Vec<_>>(), ["b", "c"]);
}

#[test]
fn success_past_failure_clears() {
    let mut failure = FurthestFailure::new();
    failure.record(1, "x".into());
    failure.reached(1);
    assert_eq!(failure.expected().count(), 1);
    failure.reached(2);
    assert_eq!(failure.expected().count(), 0);
    assert_eq!(failure.position(), 1);
}

#[test]
fn describe_messages() {
    let mut failure = FurthestFailure::new();
    insta::assert_snapshot!(failure.describe("z"), @r#"Unexpected `"z"`"#);

    failure.record(0, "literal `\"+\"`".into());
    insta::assert_snapshot!(failure.describe("a"), @r#"Expected literal `"+"`, found `"a"`"#);

    failure.record(0, "pattern `/[0-9]+/`".into());
    insta::assert_snapshot!(
        failure.describe("a"),
        @r#"Expected literal `"+"` or pattern `/[0-9]+/`, found `"a"`"#
    );

    failure.record(0, END_OF_INPUT.into());
    insta::assert_snapshot!(
        failure.describe("\n"),
        @r#"Expected literal `"+"`, pattern `/[0-9]+/` or end of input, found `"\n"`"#
    );
}

#[test]
fn describe_at_end_of_input() {
    let mut failure = FurthestFailure::new();
    failure.record(2, "literal `\"b\"`".into());
    insta::assert_snapshot!(failure.describe("ab"), @r#"Expected literal `"b"`, found end of input"#);
}
