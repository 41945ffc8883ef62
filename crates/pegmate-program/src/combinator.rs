//! Backtracking combinator tree.

use pegmate_core::escape::escape_string;

use crate::RuleId;

/// One parsing operation. Operators own their operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Combinator {
    /// Consume exactly this text.
    Literal(String),
    /// Anchored regular expression, applied `repeat` times in a row.
    Pattern { pattern: String, repeat: u32 },
    Sequence(Box<Combinator>, Box<Combinator>),
    /// Ordered choice: the left alternative wins if it succeeds.
    Choice(Box<Combinator>, Box<Combinator>),
    /// `max = None` is unbounded.
    Repeat {
        min: u32,
        max: Option<u32>,
        body: Box<Combinator>,
    },
    /// Zero-width negative lookahead.
    Not(Box<Combinator>),
    /// Match the body but keep none of its output.
    Drop(Box<Combinator>),
    /// Collapse the body's matched text into one text value.
    Terminal { unescape: bool, body: Box<Combinator> },
    /// Report failures inside the body under `label`.
    ErrorName {
        label: String,
        promote: bool,
        body: Box<Combinator>,
    },
    Call(RuleId),
}

impl Combinator {
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            repeat: 1,
        }
    }

    pub fn sequence(left: Combinator, right: Combinator) -> Self {
        Self::Sequence(Box::new(left), Box::new(right))
    }

    pub fn choice(left: Combinator, right: Combinator) -> Self {
        Self::Choice(Box::new(left), Box::new(right))
    }

    pub fn optional(body: Combinator) -> Self {
        Self::repeat(0, Some(1), body)
    }

    pub fn zero_or_more(body: Combinator) -> Self {
        Self::repeat(0, None, body)
    }

    pub fn one_or_more(body: Combinator) -> Self {
        Self::repeat(1, None, body)
    }

    pub fn repeat(min: u32, max: Option<u32>, body: Combinator) -> Self {
        Self::Repeat {
            min,
            max,
            body: Box::new(body),
        }
    }

    pub fn not(body: Combinator) -> Self {
        Self::Not(Box::new(body))
    }

    pub fn drop(body: Combinator) -> Self {
        Self::Drop(Box::new(body))
    }

    pub fn terminal(unescape: bool, body: Combinator) -> Self {
        Self::Terminal {
            unescape,
            body: Box::new(body),
        }
    }

    pub fn error_name(label: impl Into<String>, promote: bool, body: Combinator) -> Self {
        Self::ErrorName {
            label: label.into(),
            promote,
            body: Box::new(body),
        }
    }

    /// Expectation label reported when this leaf fails, e.g. ``literal `"+"` ``.
    ///
    /// `None` for everything but `Literal` and `Pattern`.
    pub fn expectation(&self) -> Option<String> {
        match self {
            Self::Literal(text) => Some(literal_label(text)),
            Self::Pattern { pattern, .. } => Some(pattern_label(pattern)),
            _ => None,
        }
    }

    /// Direct operands, left to right.
    pub fn children(&self) -> impl Iterator<Item = &Combinator> {
        let (first, second): (Option<&Combinator>, Option<&Combinator>) = match self {
            Self::Sequence(l, r) | Self::Choice(l, r) => (Some(l), Some(r)),
            Self::Repeat { body, .. }
            | Self::Terminal { body, .. }
            | Self::ErrorName { body, .. }
            | Self::Not(body)
            | Self::Drop(body) => (Some(body), None),
            Self::Literal(_) | Self::Pattern { .. } | Self::Call(_) => (None, None),
        };
        first.into_iter().chain(second)
    }

    /// Pre-order walk over this tree.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Combinator)) {
        f(self);
        for child in self.children() {
            child.walk(f);
        }
    }
}

pub fn literal_label(text: &str) -> String {
    format!("literal `\"{}\"`", escape_string(text))
}

pub fn pattern_label(pattern: &str) -> String {
    format!("pattern `/{pattern}/`")
}
