//! Highlighting back end: one capturing pattern per highlight definition.
//!
//! A highlight definition derives either a single match pattern, or, when it
//! names `begin` and `end` rules, a region whose body references (plus the
//! `include` property) list the nested rules active inside it.

mod derive;
mod error;
mod types;


use indexmap::IndexMap;
use pegmate_core::utils::to_snake_case;
use rowan::TextRange;

pub use derive::{Deriver, scope_of, with_suffix};
pub use error::DeriveError;
pub use types::{Capture, Derived, HighlightGrammar, HighlightRule};

use crate::Config;
use crate::analyze::visitor::collect_references;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::ir::{DefKind, Definition, Grammar};

/// Derive every highlight definition of `grammar`.
///
/// Shadowed scopes are reported to `diag` as warnings; anything that cannot
/// be expressed as a pattern fails the whole derivation.
pub fn derive_grammar(
    grammar: &Grammar,
    config: &Config,
    diag: &mut Diagnostics,
) -> Result<HighlightGrammar, DeriveError> {
    let suffix = config.get_scope_suffix();
    let rules = grammar
        .tm_definitions()
        .map(|def| derive_rule(grammar, def, suffix, diag))
        .collect::<Result<Vec<_>, _>>()?;

    let name = config
        .get_tm_name()
        .or(config.get_class_name())
        .or(config.get_root())
        .unwrap_or("grammar");
    let scope_name = match config.get_tm_scope_name() {
        Some(scope) => scope.to_owned(),
        None => format!("source.{}", to_snake_case(name)),
    };
    log::debug!("derived {} highlight rules for `{scope_name}`", rules.len());

    Ok(HighlightGrammar {
        name: name.to_owned(),
        scope_name,
        file_types: config.get_tm_file_types().to_vec(),
        rules,
    })
}

fn derive_rule(
    grammar: &Grammar,
    def: &Definition,
    suffix: Option<&str>,
    diag: &mut Diagnostics,
) -> Result<HighlightRule, DeriveError> {
    let begin = delimiter(def, "begin");
    let end = delimiter(def, "end");

    match (begin, end) {
        (None, None) => {
            check_shadowed(grammar, def, suffix, diag);
            let Derived { pattern, captures } = Deriver::new(grammar, suffix).derive_scoped(def)?;
            log::trace!("`{}` matches /{pattern}/", def.name);
            Ok(HighlightRule::Match {
                name: def.name.clone(),
                pattern,
                captures,
            })
        }
        (Some(begin), Some(end)) => {
            let begin = derive_delimiter(grammar, begin, suffix)?;
            let end = derive_delimiter(grammar, end, suffix)?;
            Ok(HighlightRule::BeginEnd {
                name: def.name.clone(),
                scope: scope_of(def, suffix),
                begin: begin.pattern,
                begin_captures: begin.captures,
                end: end.pattern,
                end_captures: end.captures,
                includes: includes(grammar, def)?,
            })
        }
        _ => Err(DeriveError::MissingBeginEnd {
            rule: def.name.clone(),
            span: def.name_span,
        }),
    }
}

/// Name given by a `begin`/`end` property, with the property's span.
fn delimiter<'d>(def: &'d Definition, property: &str) -> Option<(&'d str, TextRange)> {
    let span = def.properties.get(property)?.span;
    def.property_names(property).first().map(|&name| (name, span))
}

fn derive_delimiter(
    grammar: &Grammar,
    (name, span): (&str, TextRange),
    suffix: Option<&str>,
) -> Result<Derived, DeriveError> {
    let Some(target) = grammar.find(name) else {
        return Err(DeriveError::UndefinedReference {
            name: name.to_owned(),
            span,
        });
    };
    Deriver::new(grammar, suffix).derive_scoped(target)
}

/// Highlight rules nested in a region, in order of first mention.
fn includes(grammar: &Grammar, def: &Definition) -> Result<Vec<String>, DeriveError> {
    let mut names: IndexMap<&str, TextRange> = IndexMap::new();
    for reference in collect_references(&def.body) {
        if let Some(name) = reference.as_reference() {
            names.entry(name).or_insert(reference.span);
        }
    }
    if let Some(attribute) = def.properties.get("include") {
        for name in def.property_names("include") {
            names.entry(name).or_insert(attribute.span);
        }
    }

    names
        .into_iter()
        .map(|(name, span)| match grammar.find(name) {
            Some(target) if target.kind == DefKind::Highlight => Ok(target.name.clone()),
            Some(_) => Err(DeriveError::InvalidRuleReference {
                name: name.to_owned(),
                span,
            }),
            None => Err(DeriveError::UndefinedReference {
                name: name.to_owned(),
                span,
            }),
        })
        .collect()
}

/// Warn when a scoped definition wraps nothing but another scoped one: both
/// captures cover the same text and only the inner scope shows.
fn check_shadowed(grammar: &Grammar, def: &Definition, suffix: Option<&str>, diag: &mut Diagnostics) {
    if scope_of(def, suffix).is_none() {
        return;
    }
    let (_, body) = def.body.peel_markers();
    let Some(target) = body.as_reference().and_then(|name| grammar.find(name)) else {
        return;
    };
    if target.is_inline() {
        return;
    }
    let Some(inner) = scope_of(target, suffix) else {
        return;
    };
    diag.report(DiagnosticKind::ShadowedScope, def.name_span)
        .message(format!("`{inner}`"))
        .related_to(format!("`{}` has its own scope", target.name), body.span)
        .emit();
}
