//! Highlighting output, shaped after a TextMate grammar.

use serde::Serialize;

/// Every highlight definition of a grammar, derived into patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightGrammar {
    /// Display name of the language.
    pub name: String,
    /// Top-level scope (e.g. "source.calc").
    pub scope_name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub file_types: Vec<String>,
    /// One rule per highlight definition, in definition order.
    pub rules: Vec<HighlightRule>,
}

/// A derived highlight rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HighlightRule {
    /// A single pattern.
    /// The definition's own scope, if any, is capture 1.
    Match {
        name: String,
        pattern: String,
        captures: Vec<Capture>,
    },
    /// A region opened by `begin` and closed by `end`, with nested rules.
    BeginEnd {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        scope: Option<String>,
        begin: String,
        begin_captures: Vec<Capture>,
        end: String,
        end_captures: Vec<Capture>,
        includes: Vec<String>,
    },
}

impl HighlightRule {
    pub fn name(&self) -> &str {
        match self {
            HighlightRule::Match { name, .. } | HighlightRule::BeginEnd { name, .. } => name,
        }
    }
}

/// Scope assigned to a 1-based capture group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Capture {
    pub index: u32,
    pub scope: String,
}

/// A pattern with its captures in group order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Derived {
    pub pattern: String,
    pub captures: Vec<Capture>,
}
