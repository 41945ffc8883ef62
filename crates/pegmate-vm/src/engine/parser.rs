//! Parse state and backtracking combinators.
//!
//! Every combinator takes the node it contributes to and returns whether it
//! matched. Failure always leaves the cursor where the combinator started
//! and the node untouched; partial output is built in temporary nodes and
//! spliced in only on success.

use pegmate_core::escape::unescape;
use pegmate_core::{LineIndex, ParserMessage};
use pegmate_program::{literal_label, pattern_label};

use super::failure::{END_OF_INPUT, FurthestFailure};
use super::node::ParseNode;
use super::patterns::PatternTable;
use super::trace::{NoopTracer, Tracer};
use super::RuntimeError;

/// `Ok(true)` on a match, `Ok(false)` on an ordinary failure.
pub type ParseResult = Result<bool, RuntimeError>;

/// Runtime limits for a parse.
#[derive(Clone, Copy, Debug)]
pub struct ParseLimits {
    /// Maximum nested rule calls (default: 1,024).
    pub(crate) recursion_limit: u32,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            recursion_limit: 1024,
        }
    }
}

impl ParseLimits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the recursion limit.
    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn get_recursion_limit(&self) -> u32 {
        self.recursion_limit
    }
}

/// Result of a whole-input parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    /// The entry rule matched and consumed the whole input.
    pub success: bool,
    /// Synthetic container holding the entry rule's output.
    pub root: ParseNode,
    /// Empty on success, one error otherwise.
    pub messages: Vec<ParserMessage>,
    /// Byte offset of the furthest failure, on failure.
    pub failure_offset: Option<usize>,
}

impl Parse {
    /// The entry rule's node, when it is captured.
    pub fn tree(&self) -> Option<&ParseNode> {
        self.root.children.first().filter(|n| !n.is_leaf())
    }
}

/// Diagnostic label override installed by `error_name`.
#[derive(Debug, Clone)]
struct LabelOverride {
    label: String,
    promote: bool,
    start: usize,
}

pub struct Parser<'s, T: Tracer = NoopTracer> {
    input: &'s str,
    patterns: &'s PatternTable,
    pos: usize,
    failure: FurthestFailure,
    labels: Vec<LabelOverride>,
    /// Nesting of `not`; failures inside are not diagnostics.
    suppress: u32,
    depth: u32,
    limits: ParseLimits,
    tracer: T,
}

impl<'s> Parser<'s, NoopTracer> {
    pub fn new(input: &'s str, patterns: &'s PatternTable) -> Self {
        Self::with_tracer(input, patterns, NoopTracer)
    }
}

impl<'s, T: Tracer> Parser<'s, T> {
    pub fn with_tracer(input: &'s str, patterns: &'s PatternTable, tracer: T) -> Self {
        Self {
            input,
            patterns,
            pos: 0,
            failure: FurthestFailure::new(),
            labels: Vec::new(),
            suppress: 0,
            depth: 0,
            limits: ParseLimits::default(),
            tracer,
        }
    }

    pub fn limits(mut self, limits: ParseLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn input(&self) -> &'s str {
        self.input
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn failure(&self) -> &FurthestFailure {
        &self.failure
    }

    pub fn tracer(&self) -> &T {
        &self.tracer
    }

    pub fn into_tracer(self) -> T {
        self.tracer
    }

    /// Run `entry` from the start of the input and require it to consume
    /// everything.
    pub fn run(
        &mut self,
        entry: impl FnOnce(&mut Self, &mut ParseNode) -> ParseResult,
    ) -> Result<Parse, RuntimeError> {
        self.pos = 0;
        self.failure = FurthestFailure::new();
        self.labels.clear();
        self.suppress = 0;
        self.depth = 0;

        let mut root = ParseNode::default();
        let matched = entry(self, &mut root)?;
        root.end = self.pos;

        if matched && self.pos == self.input.len() {
            return Ok(Parse {
                success: true,
                root,
                messages: Vec::new(),
                failure_offset: None,
            });
        }

        if matched {
            self.fail(self.pos, || END_OF_INPUT.to_string());
        }
        let offset = self.failure.position();
        let position = LineIndex::new(self.input).line_col(offset);
        Ok(Parse {
            success: false,
            root,
            messages: vec![ParserMessage::error(
                self.failure.describe(self.input),
                position,
            )],
            failure_offset: Some(offset),
        })
    }

    /// Consume `text` exactly.
    pub fn literal(&mut self, node: &mut ParseNode, text: &str) -> ParseResult {
        if !self.input[self.pos..].starts_with(text) {
            self.fail(self.pos, || literal_label(text));
            return Ok(false);
        }
        let start = self.pos;
        self.pos += text.len();
        self.matched(node, start);
        Ok(true)
    }

    /// Match pattern `id` of the pattern table anchored at the cursor.
    pub fn pattern(&mut self, node: &mut ParseNode, id: usize) -> ParseResult {
        let patterns = self.patterns;
        match patterns.match_at(id, self.input, self.pos)? {
            Some(end) => {
                let start = self.pos;
                self.pos = end;
                self.matched(node, start);
                Ok(true)
            }
            None => {
                let pattern = patterns.pattern(id).unwrap_or_default();
                self.fail(self.pos, || pattern_label(pattern));
                Ok(false)
            }
        }
    }

    pub fn sequence(
        &mut self,
        node: &mut ParseNode,
        left: impl FnOnce(&mut Self, &mut ParseNode) -> ParseResult,
        right: impl FnOnce(&mut Self, &mut ParseNode) -> ParseResult,
    ) -> ParseResult {
        let start = self.pos;
        let mut temp = ParseNode::default();
        if !left(self, &mut temp)? || !right(self, &mut temp)? {
            self.restore(start);
            return Ok(false);
        }
        node.splice(temp);
        Ok(true)
    }

    /// Ordered choice: `right` is only tried when `left` fails.
    pub fn choice(
        &mut self,
        node: &mut ParseNode,
        left: impl FnOnce(&mut Self, &mut ParseNode) -> ParseResult,
        right: impl FnOnce(&mut Self, &mut ParseNode) -> ParseResult,
    ) -> ParseResult {
        let start = self.pos;
        let mut temp = ParseNode::default();
        if left(self, &mut temp)? {
            node.splice(temp);
            return Ok(true);
        }
        self.restore(start);

        let mut temp = ParseNode::default();
        if right(self, &mut temp)? {
            node.splice(temp);
            return Ok(true);
        }
        self.restore(start);
        Ok(false)
    }

    /// Apply `body` until it fails, stops making progress, or `max` is hit.
    pub fn repeat(
        &mut self,
        node: &mut ParseNode,
        min: u32,
        max: Option<u32>,
        mut body: impl FnMut(&mut Self, &mut ParseNode) -> ParseResult,
    ) -> ParseResult {
        let start = self.pos;
        let mut acc = ParseNode::default();
        let mut count = 0u32;

        while max.is_none_or(|max| count < max) {
            let iter_start = self.pos;
            let mut temp = ParseNode::default();
            if !body(self, &mut temp)? {
                self.restore(iter_start);
                break;
            }
            acc.splice(temp);
            count += 1;
            if self.pos == iter_start {
                break;
            }
        }

        if count < min {
            self.restore(start);
            return Ok(false);
        }
        node.splice(acc);
        Ok(true)
    }

    /// Zero-width negative lookahead.
    pub fn not(
        &mut self,
        _node: &mut ParseNode,
        body: impl FnOnce(&mut Self, &mut ParseNode) -> ParseResult,
    ) -> ParseResult {
        let start = self.pos;
        let mut scratch = ParseNode::default();
        self.suppress += 1;
        let matched = body(self, &mut scratch);
        self.suppress -= 1;
        let matched = matched?;
        self.restore(start);
        Ok(!matched)
    }

    /// Match `body` but discard its output.
    pub fn drop(
        &mut self,
        _node: &mut ParseNode,
        body: impl FnOnce(&mut Self, &mut ParseNode) -> ParseResult,
    ) -> ParseResult {
        let mut scratch = ParseNode::default();
        body(self, &mut scratch)
    }

    /// Match `body` and append its whole matched text to `node.text`.
    pub fn terminal(
        &mut self,
        node: &mut ParseNode,
        unescape_text: bool,
        body: impl FnOnce(&mut Self, &mut ParseNode) -> ParseResult,
    ) -> ParseResult {
        let start = self.pos;
        let mut scratch = ParseNode::default();
        if !body(self, &mut scratch)? {
            return Ok(false);
        }
        let text = &self.input[start..self.pos];
        if unescape_text {
            node.text.push_str(&unescape(text));
        } else {
            node.text.push_str(text);
        }
        Ok(true)
    }

    /// Report failures inside `body` as `label`. With `promote`, only
    /// failures at the position `body` started at are relabeled.
    pub fn error_name(
        &mut self,
        node: &mut ParseNode,
        label: &str,
        promote: bool,
        body: impl FnOnce(&mut Self, &mut ParseNode) -> ParseResult,
    ) -> ParseResult {
        self.labels.push(LabelOverride {
            label: label.to_string(),
            promote,
            start: self.pos,
        });
        let matched = body(self, node);
        self.labels.pop();
        matched
    }

    /// Call a rule. A captured rule adds one named child to `node`; an
    /// uncaptured one splices its output in place.
    pub fn call(
        &mut self,
        node: &mut ParseNode,
        name: &str,
        capture: bool,
        body: impl FnOnce(&mut Self, &mut ParseNode) -> ParseResult,
    ) -> ParseResult {
        if self.depth >= self.limits.recursion_limit {
            return Err(RuntimeError::RecursionLimitExceeded(
                self.limits.recursion_limit,
            ));
        }

        let start = self.pos;
        self.tracer.trace_enter_rule(name, start);
        self.depth += 1;
        let mut child = ParseNode::rule(name, start);
        let matched = body(self, &mut child);
        self.depth -= 1;
        let matched = matched?;
        self.tracer.trace_exit_rule(name, self.pos, matched);

        if !matched {
            self.restore(start);
            return Ok(false);
        }
        child.end = self.pos;
        if capture {
            node.children.push(child);
        } else {
            node.splice(child);
        }
        Ok(true)
    }

    fn matched(&mut self, node: &mut ParseNode, start: usize) {
        let end = self.pos;
        self.tracer.trace_match_success(start, end);
        if self.suppress == 0 {
            self.failure.reached(end);
        }
        node.children
            .push(ParseNode::leaf(&self.input[start..end], start, end));
    }

    fn fail(&mut self, pos: usize, natural: impl FnOnce() -> String) {
        let natural = natural();
        self.tracer.trace_match_failure(&natural, pos);
        if self.suppress > 0 {
            return;
        }
        let label = self
            .labels
            .iter()
            .rev()
            .find(|o| !o.promote || o.start == pos)
            .map_or(natural, |o| o.label.clone());
        self.failure.record(pos, label);
    }

    fn restore(&mut self, to: usize) {
        if self.pos != to {
            self.tracer.trace_backtrack(self.pos, to);
            self.pos = to;
        }
    }
}
