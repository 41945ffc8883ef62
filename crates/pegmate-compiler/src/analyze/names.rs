//! Name checks: unknown options, unknown properties, undefined references.

use super::visitor::Visitor;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::ir::{Element, Grammar};

pub const KNOWN_OPTIONS: &[&str] = &[
    "namespace",
    "class_name",
    "root",
    "scope_suffix",
    "tm_name",
    "tm_scope_name",
    "tm_file_types",
    "generate_visitor",
];

pub const KNOWN_PROPERTIES: &[&str] = &[
    "scope",
    "begin",
    "end",
    "include",
    "bracket_open",
    "bracket_close",
    "error_name",
];

pub fn check_names(grammar: &Grammar, diag: &mut Diagnostics) {
    for option in grammar.options() {
        if !KNOWN_OPTIONS.contains(&option.name.as_str()) {
            diag.report(DiagnosticKind::UnknownOption, option.name_span)
                .message(&option.name)
                .emit();
        }
    }

    for def in grammar.all() {
        for property in def.properties.values() {
            if !KNOWN_PROPERTIES.contains(&property.name.as_str()) {
                diag.report(DiagnosticKind::UnknownProperty, property.name_span)
                    .message(&property.name)
                    .emit();
            }
        }

        let mut checker = UndefinedChecker { grammar, diag };
        checker.visit_definition(def);
    }
}

struct UndefinedChecker<'a, 'd> {
    grammar: &'a Grammar,
    diag: &'d mut Diagnostics,
}

impl<'g> Visitor<'g> for UndefinedChecker<'_, '_> {
    fn visit_reference(&mut self, element: &'g Element, name: &'g str) {
        if self.grammar.find(name).is_none() {
            self.diag
                .report(DiagnosticKind::UndefinedReference, element.span)
                .message(name)
                .emit();
        }
    }
}
