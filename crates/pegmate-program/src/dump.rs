//! Human-readable program dump for debugging and snapshot tests.

use std::fmt::Write as _;

use pegmate_core::escape::escape_string;

use crate::{Combinator, Program};

/// Render every rule as an indented combinator tree.
pub fn dump(program: &Program) -> String {
    let mut out = String::new();
    for (id, rule) in program.iter() {
        write!(out, "{id} {}", rule.name).unwrap();
        if id == program.entry() {
            out.push_str(" (entry)");
        }
        if !rule.capture {
            out.push_str(" (spliced)");
        }
        out.push('\n');
        dump_combinator(&mut out, program, &rule.body, 1);
    }
    out
}

fn dump_combinator(out: &mut String, program: &Program, c: &Combinator, indent: usize) {
    for _ in 0..indent {
        out.push_str("  ");
    }
    match c {
        Combinator::Literal(text) => writeln!(out, "\"{}\"", escape_string(text)),
        Combinator::Pattern { pattern, repeat: 1 } => writeln!(out, "/{pattern}/"),
        Combinator::Pattern { pattern, repeat } => writeln!(out, "/{pattern}/{{{repeat}}}"),
        Combinator::Sequence(..) => writeln!(out, "seq"),
        Combinator::Choice(..) => writeln!(out, "choice"),
        Combinator::Repeat { min, max, .. } => match max {
            Some(max) => writeln!(out, "repeat {min}..={max}"),
            None => writeln!(out, "repeat {min}.."),
        },
        Combinator::Not(_) => writeln!(out, "not"),
        Combinator::Drop(_) => writeln!(out, "drop"),
        Combinator::Terminal { unescape: true, .. } => writeln!(out, "terminal unescape"),
        Combinator::Terminal { unescape: false, .. } => writeln!(out, "terminal"),
        Combinator::ErrorName { label, promote, .. } => {
            let mode = if *promote { "promote" } else { "always" };
            writeln!(out, "error_name \"{}\" {mode}", escape_string(label))
        }
        Combinator::Call(id) => {
            let name = program.rules().get(id.index()).map_or("?", |r| r.name.as_str());
            writeln!(out, "call {id} {name}")
        }
    }
    .unwrap();
    for child in c.children() {
        dump_combinator(out, program, child, indent + 1);
    }
}
