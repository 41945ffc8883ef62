//! Direct execution of a compiled [`Program`].

use pegmate_program::{Combinator, Program, RuleId};

use super::node::ParseNode;
use super::parser::{Parse, ParseLimits, ParseResult, Parser};
use super::patterns::PatternTable;
use super::trace::{NoopTracer, Tracer};
use super::RuntimeError;

/// Runs a program's rules through the [`Parser`] combinators.
///
/// Patterns are compiled once at construction and shared by every parse.
pub struct Interpreter<'p> {
    program: &'p Program,
    patterns: PatternTable,
    limits: ParseLimits,
}

impl<'p> Interpreter<'p> {
    pub fn new(program: &'p Program) -> Result<Self, RuntimeError> {
        Ok(Self {
            program,
            patterns: PatternTable::for_program(program)?,
            limits: ParseLimits::default(),
        })
    }

    pub fn limits(mut self, limits: ParseLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn program(&self) -> &'p Program {
        self.program
    }

    /// Parse `input` from the program's entry rule.
    pub fn parse(&self, input: &str) -> Result<Parse, RuntimeError> {
        self.parse_with(input, self.program.entry(), NoopTracer)
            .map(|(parse, _)| parse)
    }

    /// Parse `input` from `rule` with a tracer, handing the tracer back.
    pub fn parse_with<T: Tracer>(
        &self,
        input: &str,
        rule: RuleId,
        tracer: T,
    ) -> Result<(Parse, T), RuntimeError> {
        let mut parser = Parser::with_tracer(input, &self.patterns, tracer).limits(self.limits);
        let parse = parser.run(|p, n| self.call(p, n, rule))?;
        Ok((parse, parser.into_tracer()))
    }

    fn call<T: Tracer>(&self, p: &mut Parser<'_, T>, node: &mut ParseNode, id: RuleId) -> ParseResult {
        let rule = self.program.rule(id);
        p.call(node, &rule.name, rule.capture, |p, n| self.eval(p, n, &rule.body))
    }

    fn eval<T: Tracer>(
        &self,
        p: &mut Parser<'_, T>,
        node: &mut ParseNode,
        c: &Combinator,
    ) -> ParseResult {
        match c {
            Combinator::Literal(text) => p.literal(node, text),
            Combinator::Pattern { pattern, repeat } => {
                let id = self
                    .patterns
                    .index_of(pattern, *repeat)
                    .ok_or_else(|| RuntimeError::UncompiledPattern(pattern.clone()))?;
                p.pattern(node, id)
            }
            Combinator::Sequence(left, right) => p.sequence(
                node,
                |p, n| self.eval(p, n, left),
                |p, n| self.eval(p, n, right),
            ),
            Combinator::Choice(left, right) => p.choice(
                node,
                |p, n| self.eval(p, n, left),
                |p, n| self.eval(p, n, right),
            ),
            Combinator::Repeat { min, max, body } => {
                p.repeat(node, *min, *max, |p, n| self.eval(p, n, body))
            }
            Combinator::Not(body) => p.not(node, |p, n| self.eval(p, n, body)),
            Combinator::Drop(body) => p.drop(node, |p, n| self.eval(p, n, body)),
            Combinator::Terminal { unescape, body } => {
                p.terminal(node, *unescape, |p, n| self.eval(p, n, body))
            }
            Combinator::ErrorName {
                label,
                promote,
                body,
            } => p.error_name(node, label, *promote, |p, n| self.eval(p, n, body)),
            Combinator::Call(id) => self.call(p, node, *id),
        }
    }
}
