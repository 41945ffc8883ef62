//! Positioned user-facing messages.

use std::fmt;

use crate::LineCol;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A message with a 1-based line/column position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserMessage {
    pub severity: Severity,
    pub text: String,
    pub position: LineCol,
}

impl ParserMessage {
    pub fn error(text: impl Into<String>, position: LineCol) -> Self {
        Self {
            severity: Severity::Error,
            text: text.into(),
            position,
        }
    }

    pub fn warning(text: impl Into<String>, position: LineCol) -> Self {
        Self {
            severity: Severity::Warning,
            text: text.into(),
            position,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ParserMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.position, self.severity, self.text)
    }
}
