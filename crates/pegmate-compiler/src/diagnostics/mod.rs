//! Analysis findings: accumulation, conversion to positioned messages, and
//! rendering with source snippets.

mod message;
mod printer;


use pegmate_core::{LineIndex, ParserMessage, Severity};
use rowan::TextRange;

pub use message::{DiagnosticKind, DiagnosticMessage, RelatedInfo};
pub use printer::DiagnosticsPrinter;

/// Findings of the analysis passes, in the order they were reported.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

/// Fills in one diagnostic; nothing is recorded until [`emit`](Self::emit).
#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    message: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a diagnostic of `kind` underlining `range`, with the kind's
    /// title as its message until `.message()` supplies a detail.
    pub fn report(&mut self, kind: DiagnosticKind, range: TextRange) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            message: DiagnosticMessage::new(kind, range),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages.iter()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.messages.iter().filter(|d| d.severity() == severity).count()
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(DiagnosticMessage::is_error)
    }

    pub fn kinds(&self) -> Vec<DiagnosticKind> {
        self.messages.iter().map(DiagnosticMessage::kind).collect()
    }

    /// Counts as `1 error, 2 warnings`, omitting a zero count.
    pub fn summary(&self) -> String {
        let plural = |n: usize, word: &str| match n {
            1 => format!("1 {word}"),
            n => format!("{n} {word}s"),
        };
        let errors = self.count(Severity::Error);
        let warnings = self.count(Severity::Warning);
        match (errors, warnings) {
            (0, 0) => "no problems".to_owned(),
            (e, 0) => plural(e, "error"),
            (0, w) => plural(w, "warning"),
            (e, w) => format!("{}, {}", plural(e, "error"), plural(w, "warning")),
        }
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }

    pub fn printer(&self) -> DiagnosticsPrinter<'_, '_> {
        DiagnosticsPrinter::new(self)
    }

    /// Uncolored rendering with snippets of `source`.
    pub fn render(&self, source: &str) -> String {
        self.printer().source(source).render()
    }

    /// Positioned messages, in emission order. Related notes are dropped.
    pub fn to_messages(&self, index: &LineIndex<'_>) -> Vec<ParserMessage> {
        self.messages
            .iter()
            .map(|d| ParserMessage {
                severity: d.severity(),
                text: d.message.clone(),
                position: index.line_col(d.range.start().into()),
            })
            .collect()
    }
}

impl<'a> DiagnosticBuilder<'a> {
    /// Detail rendered into the kind's message template.
    pub fn message(mut self, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        self.message.message = self.message.kind.message(Some(&detail));
        self
    }

    pub fn related_to(mut self, msg: impl Into<String>, range: TextRange) -> Self {
        self.message.related.push(RelatedInfo::new(range, msg));
        self
    }

    pub fn emit(self) {
        self.diagnostics.messages.push(self.message);
    }
}
