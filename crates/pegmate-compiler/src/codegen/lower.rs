//! Lowering of the grammar IR to a parser [`Program`].

use std::collections::HashMap;

use indexmap::IndexSet;
use pegmate_program::{Combinator, Program, Rule, RuleId};

use super::CodegenError;
use crate::analyze::Analysis;
use crate::ir::{DefId, DefKind, Definition, Element, ElementKind, Grammar, Marker, Value};

/// Compile every callable definition into a rule. The root becomes the
/// entry; rules keep their own node when they are relevant.
pub fn lower(grammar: &Grammar, analysis: &Analysis) -> Result<Program, CodegenError> {
    let Some(root) = analysis.root() else {
        return Err(CodegenError::MissingRoot);
    };

    let rule_ids: HashMap<DefId, RuleId> = analysis
        .callable()
        .enumerate()
        .map(|(i, id)| (id, RuleId(i as u16)))
        .collect();
    let mut lowerer = Lowerer {
        grammar,
        rule_ids: &rule_ids,
        labels: Vec::new(),
        expanding: IndexSet::new(),
    };

    let mut rules = Vec::with_capacity(rule_ids.len());
    for id in analysis.callable() {
        let def = grammar.get(id);
        let body = lowerer.lower_definition(def)?;
        let capture = id == root || analysis.is_relevant(id);
        log::trace!("rule `{}` capture={capture}", def.name);
        rules.push(Rule::new(def.name.clone(), body).with_capture(capture));
    }

    let entry = rule_ids.get(&root).copied().unwrap_or(RuleId(0));
    let program = Program::new(rules, entry)?;
    log::debug!("lowered {} rules", program.len());
    Ok(program)
}

struct Lowerer<'g, 'm> {
    grammar: &'g Grammar,
    rule_ids: &'m HashMap<DefId, RuleId>,
    /// Error label of every definition being lowered, innermost last.
    labels: Vec<String>,
    expanding: IndexSet<DefId>,
}

impl Lowerer<'_, '_> {
    fn lower_definition(&mut self, def: &Definition) -> Result<Combinator, CodegenError> {
        self.labels.push(error_label(def));
        let body = self.lower(&def.body);
        self.labels.pop();
        body
    }

    fn lower(&mut self, element: &Element) -> Result<Combinator, CodegenError> {
        Ok(match &element.kind {
            ElementKind::Text(text) => Combinator::literal(text.as_str()),
            ElementKind::Regex { pattern, repeat } => {
                check_pattern(pattern, element)?;
                Combinator::Pattern {
                    pattern: pattern.clone(),
                    repeat: *repeat,
                }
            }
            ElementKind::Number(_) | ElementKind::Boolean(_) => {
                return Err(CodegenError::UnsupportedElement {
                    found: element.describe(),
                    span: element.span,
                });
            }
            ElementKind::Reference(name) => return self.lower_reference(name, element),
            ElementKind::Sequence(l, r) => Combinator::sequence(self.lower(l)?, self.lower(r)?),
            ElementKind::Choice(l, r) => Combinator::choice(self.lower(l)?, self.lower(r)?),
            ElementKind::Optional(e) => Combinator::optional(self.lower(e)?),
            ElementKind::ZeroOrMore(e) => Combinator::zero_or_more(self.lower(e)?),
            ElementKind::OneOrMore(e) => Combinator::one_or_more(self.lower(e)?),
            ElementKind::Not(e) => Combinator::not(self.lower(e)?),
            ElementKind::Marked { marker, child } => {
                let body = self.lower(child)?;
                match marker {
                    Marker::Drop => Combinator::drop(body),
                    Marker::IsTerminal { unescape } => Combinator::terminal(*unescape, body),
                    Marker::TreatInline => body,
                    Marker::PromoteErrorName => Combinator::error_name(self.label(), true, body),
                    Marker::UseNameAsError => Combinator::error_name(self.label(), false, body),
                }
            }
        })
    }

    fn lower_reference(&mut self, name: &str, element: &Element) -> Result<Combinator, CodegenError> {
        let grammar = self.grammar;
        let Some(target) = grammar.find(name) else {
            return Err(CodegenError::UndefinedReference {
                name: name.to_owned(),
                span: element.span,
            });
        };
        if target.kind == DefKind::Highlight {
            return Err(CodegenError::HighlightReference {
                name: name.to_owned(),
                span: element.span,
            });
        }
        if let Some(&rule) = self.rule_ids.get(&target.id()) {
            return Ok(Combinator::Call(rule));
        }

        // Not callable: an inline definition, expanded in place.
        if !self.expanding.insert(target.id()) {
            return Err(CodegenError::InlineCycle {
                name: name.to_owned(),
                span: element.span,
            });
        }
        let body = self.lower_definition(target);
        self.expanding.swap_remove(&target.id());
        body
    }

    fn label(&self) -> String {
        self.labels.last().cloned().unwrap_or_default()
    }
}

/// The `error_name` property when present, else the definition's name.
fn error_label(def: &Definition) -> String {
    match def.property("error_name") {
        Some(Value::Text(label) | Value::Reference(label)) => label.clone(),
        _ => def.name.clone(),
    }
}

fn check_pattern(pattern: &str, element: &Element) -> Result<(), CodegenError> {
    regex_syntax::ParserBuilder::new()
        .build()
        .parse(pattern)
        .map(|_| ())
        .map_err(|e| CodegenError::InvalidPattern {
            pattern: pattern.to_owned(),
            message: match &e {
                regex_syntax::Error::Parse(e) => e.kind().to_string(),
                regex_syntax::Error::Translate(e) => e.kind().to_string(),
                _ => e.to_string(),
            },
            span: element.span,
        })
}
