//! Tracing hooks for debugging parses.
//!
//! `NoopTracer` methods are empty and `#[inline(always)]`, so a parser built
//! with it carries no tracing cost. `PrintTracer` collects an indented
//! transcript of rule calls, leaf matches and backtracking.

use pegmate_core::escape::escape_string;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Rule entry/exit and backtracking only.
    #[default]
    Default,
    /// Also leaf successes and failures.
    Verbose,
    /// Leaf lines include the matched text.
    VeryVerbose,
}

/// Parser instrumentation. Positions are byte offsets into the input.
pub trait Tracer {
    /// Called when a rule call starts.
    fn trace_enter_rule(&mut self, name: &str, pos: usize);

    /// Called when a rule call returns.
    fn trace_exit_rule(&mut self, name: &str, pos: usize, matched: bool);

    /// Called after a literal or pattern matched `start..end`.
    fn trace_match_success(&mut self, start: usize, end: usize);

    /// Called after a literal or pattern failed at `pos`.
    fn trace_match_failure(&mut self, expectation: &str, pos: usize);

    /// Called when the cursor is restored from `from` back to `to`.
    fn trace_backtrack(&mut self, from: usize, to: usize);
}

/// No-op tracer that gets optimized away completely.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_enter_rule(&mut self, _name: &str, _pos: usize) {}

    #[inline(always)]
    fn trace_exit_rule(&mut self, _name: &str, _pos: usize, _matched: bool) {}

    #[inline(always)]
    fn trace_match_success(&mut self, _start: usize, _end: usize) {}

    #[inline(always)]
    fn trace_match_failure(&mut self, _expectation: &str, _pos: usize) {}

    #[inline(always)]
    fn trace_backtrack(&mut self, _from: usize, _to: usize) {}
}

/// Tracer that collects a readable transcript.
#[derive(Debug, Clone)]
pub struct PrintTracer<'s> {
    /// Input being parsed, for matched-text display.
    source: &'s str,
    verbosity: Verbosity,
    lines: Vec<String>,
    /// Current rule nesting, for indentation.
    depth: usize,
}

impl<'s> PrintTracer<'s> {
    pub fn new(source: &'s str, verbosity: Verbosity) -> Self {
        Self {
            source,
            verbosity,
            lines: Vec::new(),
            depth: 0,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The transcript, one event per line.
    pub fn output(&self) -> String {
        let mut out = self.lines.join("\n");
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }

    fn push(&mut self, line: String) {
        let indent = "  ".repeat(self.depth);
        self.lines.push(format!("{indent}{line}"));
    }
}

impl Tracer for PrintTracer<'_> {
    fn trace_enter_rule(&mut self, name: &str, pos: usize) {
        self.push(format!("> {name} @{pos}"));
        self.depth += 1;
    }

    fn trace_exit_rule(&mut self, name: &str, pos: usize, matched: bool) {
        self.depth = self.depth.saturating_sub(1);
        let outcome = if matched { "ok" } else { "fail" };
        self.push(format!("< {name} @{pos} {outcome}"));
    }

    fn trace_match_success(&mut self, start: usize, end: usize) {
        match self.verbosity {
            Verbosity::Default => {}
            Verbosity::Verbose => self.push(format!("+ {start}..{end}")),
            Verbosity::VeryVerbose => {
                let text = escape_string(self.source.get(start..end).unwrap_or_default());
                self.push(format!("+ {start}..{end} \"{text}\""));
            }
        }
    }

    fn trace_match_failure(&mut self, expectation: &str, pos: usize) {
        if self.verbosity >= Verbosity::Verbose {
            self.push(format!("- {expectation} @{pos}"));
        }
    }

    fn trace_backtrack(&mut self, from: usize, to: usize) {
        self.push(format!("<< {from} -> {to}"));
    }
}
