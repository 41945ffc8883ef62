//! Furthest-failure tracking.
//!
//! Only the rightmost failure position matters for the final message: a
//! failure before it belongs to a branch that was abandoned earlier, a
//! failure at it adds another expectation, and a failure past it starts a
//! new expectation set.

use indexmap::IndexSet;
use pegmate_core::escape::escape_string;

/// Label recorded when the entry rule matched but input remains.
pub const END_OF_INPUT: &str = "end of input";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FurthestFailure {
    position: usize,
    expected: IndexSet<String>,
}

impl FurthestFailure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn expected(&self) -> impl Iterator<Item = &str> {
        self.expected.iter().map(String::as_str)
    }

    /// Record a failed expectation at `position`.
    pub fn record(&mut self, position: usize, label: String) {
        if position < self.position {
            return;
        }
        if position > self.position {
            self.position = position;
            self.expected.clear();
        }
        self.expected.insert(label);
    }

    /// A match ended at `end`; if that is past the furthest failure, its
    /// expectations are stale.
    pub fn reached(&mut self, end: usize) {
        if end > self.position {
            self.expected.clear();
        }
    }

    /// `Expected a, b or c, found "x"`, or `Unexpected "x"` when nothing
    /// is expected at the failure position.
    pub fn describe(&self, input: &str) -> String {
        let found = found_at(input, self.position);
        let labels: Vec<&str> = self.expected().collect();
        match labels.split_last() {
            None => format!("Unexpected {found}"),
            Some((last, [])) => format!("Expected {last}, found {found}"),
            Some((last, init)) => {
                format!("Expected {} or {last}, found {found}", init.join(", "))
            }
        }
    }
}

fn found_at(input: &str, position: usize) -> String {
    match input.get(position..).and_then(|rest| rest.chars().next()) {
        Some(c) => format!("`\"{}\"`", escape_string(c.encode_utf8(&mut [0; 4]))),
        None => END_OF_INPUT.to_string(),
    }
}
