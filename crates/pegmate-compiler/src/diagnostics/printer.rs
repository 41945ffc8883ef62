//! Rendering of diagnostics, with source snippets when the grammar text is
//! available.

use std::fmt::Write;
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};
use pegmate_core::Severity;
use rowan::TextRange;

use super::{DiagnosticMessage, Diagnostics};

pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
    summary: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            source: None,
            path: None,
            colored: false,
            summary: false,
        }
    }

    /// Grammar text the ranges point into. Without it, output is one plain
    /// line per diagnostic.
    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    /// File name shown in the `-->` line.
    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    /// End with a count line such as `1 error, 2 warnings`.
    pub fn summary(mut self, value: bool) -> Self {
        self.summary = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            match self.source {
                Some(source) => self.format_snippet(w, &renderer, diag, source)?,
                None => write!(w, "{diag}")?,
            }
        }

        if self.summary && !self.diagnostics.is_empty() {
            write!(w, "\n{}", self.diagnostics.summary())?;
        }
        Ok(())
    }

    fn format_snippet(
        &self,
        w: &mut impl Write,
        renderer: &Renderer,
        diag: &DiagnosticMessage,
        source: &str,
    ) -> std::fmt::Result {
        let mut snippet = Snippet::source(source).line_start(1).annotation(
            AnnotationKind::Primary
                .span(underline(diag.range, source.len()))
                .label(&diag.message),
        );
        if let Some(path) = self.path {
            snippet = snippet.path(path);
        }
        for related in &diag.related {
            snippet = snippet.annotation(
                AnnotationKind::Context
                    .span(underline(related.range, source.len()))
                    .label(&related.message),
            );
        }

        let level = match diag.severity() {
            Severity::Error => Level::ERROR,
            Severity::Warning => Level::WARNING,
        };
        let report = [level.primary_title(&diag.message).element(snippet)];
        write!(w, "{}", renderer.render(&report))
    }
}

/// Byte range to underline. An empty range still marks one character.
fn underline(range: TextRange, len: usize) -> Range<usize> {
    let start = usize::from(range.start());
    if range.is_empty() {
        start..(start + 1).min(len)
    } else {
        start..usize::from(range.end())
    }
}
