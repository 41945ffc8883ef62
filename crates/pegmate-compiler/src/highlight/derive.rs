//! Pattern derivation for one definition.
//!
//! Elements are emitted left to right into a single pattern. A capture is
//! numbered when its group opens, so an enclosing scope always gets a lower
//! index than the scopes nested inside it.

use std::fmt::Write;

use regex_syntax::ast::{Ast, parse::Parser as AstParser};

use super::{Capture, DeriveError, Derived};
use crate::ir::{Definition, Element, ElementKind, Grammar, Value};

pub struct Deriver<'g> {
    grammar: &'g Grammar,
    suffix: Option<&'g str>,
    output: Derived,
    /// Definitions being expanded, innermost last.
    expanding: Vec<&'g Definition>,
}

impl<'g> Deriver<'g> {
    pub fn new(grammar: &'g Grammar, suffix: Option<&'g str>) -> Self {
        Self {
            grammar,
            suffix,
            output: Derived::default(),
            expanding: Vec::new(),
        }
    }

    /// Derive the body of `def` as is.
    pub fn derive_body(mut self, def: &'g Definition) -> Result<Derived, DeriveError> {
        self.expand(def)?;
        Ok(self.output)
    }

    /// Derive `def` as one unit: a capture carrying its scope, or a
    /// non-capturing group when it has none.
    pub fn derive_scoped(mut self, def: &'g Definition) -> Result<Derived, DeriveError> {
        match scope_of(def, self.suffix) {
            Some(scope) => self.capture(scope, |d| d.expand(def))?,
            None => {
                self.output.pattern.push_str("(?:");
                self.expand(def)?;
                self.output.pattern.push(')');
            }
        }
        Ok(self.output)
    }

    fn expand(&mut self, def: &'g Definition) -> Result<(), DeriveError> {
        self.expanding.push(def);
        let result = self.element(&def.body);
        self.expanding.pop();
        result
    }

    fn capture(
        &mut self,
        scope: String,
        inner: impl FnOnce(&mut Self) -> Result<(), DeriveError>,
    ) -> Result<(), DeriveError> {
        let index = self.output.captures.len() as u32 + 1;
        self.output.captures.push(Capture { index, scope });
        self.output.pattern.push('(');
        inner(self)?;
        self.output.pattern.push(')');
        Ok(())
    }

    fn element(&mut self, element: &'g Element) -> Result<(), DeriveError> {
        match &element.kind {
            ElementKind::Text(text) | ElementKind::Number(text) => self.literal(text),
            ElementKind::Boolean(value) => self.literal(if *value { "true" } else { "false" }),
            ElementKind::Regex { pattern, repeat } => self.regex(pattern, *repeat),
            ElementKind::Reference(name) => self.reference(name, element)?,
            ElementKind::Sequence(l, r) => {
                self.element(l)?;
                self.element(r)?;
            }
            ElementKind::Choice(..) => {
                return Err(DeriveError::Choice {
                    rule: self
                        .expanding
                        .last()
                        .map(|def| def.name.clone())
                        .unwrap_or_default(),
                    span: element.span,
                });
            }
            ElementKind::Optional(inner) => self.group(inner, "?")?,
            ElementKind::ZeroOrMore(inner) => self.group(inner, "*")?,
            ElementKind::OneOrMore(inner) => self.group(inner, "+")?,
            ElementKind::Not(inner) => {
                self.output.pattern.push_str("(?!");
                self.element(inner)?;
                self.output.pattern.push(')');
            }
            ElementKind::Marked { child, .. } => self.element(child)?,
        }
        Ok(())
    }

    fn literal(&mut self, text: &str) {
        self.output.pattern.push_str(&regex_syntax::escape(text));
    }

    fn regex(&mut self, pattern: &str, repeat: u32) {
        let out = &mut self.output.pattern;
        if repeat > 1 {
            write!(out, "(?:{pattern}){{{repeat}}}").expect("String write never fails");
        } else if has_top_level_alternation(pattern) {
            write!(out, "(?:{pattern})").expect("String write never fails");
        } else {
            out.push_str(pattern);
        }
    }

    fn group(&mut self, inner: &'g Element, operator: &str) -> Result<(), DeriveError> {
        self.output.pattern.push_str("(?:");
        self.element(inner)?;
        self.output.pattern.push(')');
        self.output.pattern.push_str(operator);
        Ok(())
    }

    fn reference(&mut self, name: &str, element: &Element) -> Result<(), DeriveError> {
        let grammar = self.grammar;
        let Some(target) = grammar.find(name) else {
            return Err(DeriveError::UndefinedReference {
                name: name.to_owned(),
                span: element.span,
            });
        };
        if self.expanding.iter().any(|def| def.id() == target.id()) {
            return Err(DeriveError::RecursiveReference {
                name: name.to_owned(),
                span: element.span,
            });
        }

        if target.is_inline() {
            return self.expand(target);
        }
        match scope_of(target, self.suffix) {
            Some(scope) => self.capture(scope, |d| d.expand(target)),
            None => self.expand(target),
        }
    }
}

/// The `scope` property of `def`, suffixed.
pub fn scope_of(def: &Definition, suffix: Option<&str>) -> Option<String> {
    def.property("scope")
        .and_then(Value::as_str)
        .map(|scope| with_suffix(scope, suffix))
}

/// Append `.suffix` unless `scope` already ends with it.
pub fn with_suffix(scope: &str, suffix: Option<&str>) -> String {
    match suffix {
        Some(suffix) if scope != suffix && !scope.ends_with(&format!(".{suffix}")) => {
            format!("{scope}.{suffix}")
        }
        _ => scope.to_owned(),
    }
}

/// Whether `pattern` must be grouped before something is appended to it.
fn has_top_level_alternation(pattern: &str) -> bool {
    match AstParser::new().parse(pattern) {
        Ok(ast) => matches!(ast, Ast::Alternation(_)),
        Err(_) => pattern.contains('|'),
    }
}
