use crate::{Combinator, Program, ProgramError, Rule, RuleId};

fn rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "Root",
            Combinator::sequence(Combinator::Call(RuleId(1)), Combinator::pattern("[0-9]+")),
        ),
        Rule::new("Sign", Combinator::optional(Combinator::literal("-"))).with_capture(false),
    ]
}

#[test]
fn lookup_by_name() {
    let program = Program::new(rules(), RuleId(0)).unwrap();
    assert_eq!(program.len(), 2);
    assert_eq!(program.find("Sign"), Some(RuleId(1)));
    assert_eq!(program.find("sign"), None);
    assert_eq!(program.rule(program.entry()).name, "Root");
    assert!(!program.rule(RuleId(1)).capture);
}

#[test]
fn dangling_call_is_rejected() {
    let rules = vec![Rule::new("Root", Combinator::Call(RuleId(4)))];
    let err = Program::new(rules, RuleId(0)).unwrap_err();
    assert_eq!(
        err,
        ProgramError::DanglingCall {
            rule: "Root".to_string(),
            target: RuleId(4),
        }
    );
    insta::assert_snapshot!(err, @"rule `Root` calls R4, which does not exist");
}

#[test]
fn bad_entry_and_empty() {
    assert_eq!(
        Program::new(rules(), RuleId(2)).unwrap_err(),
        ProgramError::EntryOutOfRange(RuleId(2))
    );
    assert_eq!(Program::new(vec![], RuleId(0)).unwrap_err(), ProgramError::Empty);
}

#[test]
fn duplicate_rule_names() {
    let rules = vec![
        Rule::new("A", Combinator::literal("a")),
        Rule::new("A", Combinator::literal("b")),
    ];
    assert_eq!(
        Program::new(rules, RuleId(0)).unwrap_err(),
        ProgramError::DuplicateName("A".to_string())
    );
}

#[test]
fn patterns_are_deduplicated() {
    let rules = vec![
        Rule::new(
            "Root",
            Combinator::sequence(
                Combinator::pattern("[a-z]"),
                Combinator::sequence(
                    Combinator::Pattern {
                        pattern: "[a-z]".to_string(),
                        repeat: 2,
                    },
                    Combinator::pattern("[a-z]"),
                ),
            ),
        ),
        Rule::new("Other", Combinator::pattern("\\d")),
    ];
    let program = Program::new(rules, RuleId(0)).unwrap();
    assert_eq!(program.patterns(), vec![("[a-z]", 1), ("[a-z]", 2), ("\\d", 1)]);
}
