use std::fmt;

use pegmate_core::Severity;
use rowan::TextRange;

/// What an analysis pass found. Variants are ordered most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Blocks both back ends
    InlineCycle,

    // Reported; generation proceeds
    UndefinedReference,
    UnknownOption,
    UnknownProperty,
    UnusedDefinition,
    ShadowedScope,
}

impl DiagnosticKind {
    pub fn severity(self) -> Severity {
        match self {
            Self::InlineCycle => Severity::Error,
            Self::UndefinedReference
            | Self::UnknownOption
            | Self::UnknownProperty
            | Self::UnusedDefinition
            | Self::ShadowedScope => Severity::Warning,
        }
    }

    /// Message used when the reporter gives no detail.
    pub fn title(self) -> &'static str {
        match self {
            Self::InlineCycle => "inline definitions form a cycle",
            Self::UndefinedReference => "undefined reference",
            Self::UnknownOption => "unknown option",
            Self::UnknownProperty => "unknown property",
            Self::UnusedDefinition => "definition is never used",
            Self::ShadowedScope => "scope is shadowed by the inner scope",
        }
    }

    /// Message around a detail; `{}` marks where it goes.
    fn template(self) -> &'static str {
        match self {
            Self::InlineCycle => "inline definitions form a cycle: {}",
            Self::UndefinedReference => "`{}` is not defined",
            Self::UnknownOption => "unknown option `{}`",
            Self::UnknownProperty => "unknown property `{}`",
            Self::UnusedDefinition => "`{}` is never used",
            Self::ShadowedScope => "scope is shadowed by the inner scope: {}",
        }
    }

    pub fn message(self, detail: Option<&str>) -> String {
        match detail {
            Some(detail) => self.template().replacen("{}", detail, 1),
            None => self.title().to_owned(),
        }
    }
}

/// A secondary location shown next to the primary one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// Underlined in rendered output.
    pub(crate) range: TextRange,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange) -> Self {
        Self {
            kind,
            range,
            message: kind.title().to_owned(),
            related: Vec::new(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn related(&self) -> &[RelatedInfo] {
        &self.related
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

/// Source-less form: `error at 0..1: message (related: note at 4..5)`.
impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {:?}: {}", self.severity(), self.range, self.message)?;
        for related in &self.related {
            write!(f, " (related: {} at {:?})", related.message, related.range)?;
        }
        Ok(())
    }
}
