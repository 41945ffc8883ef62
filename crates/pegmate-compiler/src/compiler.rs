//! The compiler facade: reduce a contract tree once, then generate either
//! artifact from the same validated grammar.

use pegmate_core::{LineIndex, ParserMessage};
use pegmate_program::Program;
use rowan::TextRange;

use crate::Config;
use crate::analyze::{Analysis, analyze};
use crate::codegen;
use crate::diagnostics::Diagnostics;
use crate::highlight::{self, HighlightGrammar};
use crate::ir::Grammar;
use crate::reduce::{ReduceError, reduce};
use crate::syntax::SyntaxNode;

/// Errors that stop a grammar from being constructed at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("{message}")]
    Reduce {
        error: ReduceError,
        message: ParserMessage,
    },
}

/// Result of [`Compiler::compile_parser`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOutput {
    pub success: bool,
    /// Generated Rust source; empty on failure.
    pub code: String,
    pub program: Option<Program>,
    pub messages: Vec<ParserMessage>,
}

/// Result of [`Compiler::derive_highlighting`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightOutput {
    pub success: bool,
    pub grammar: Option<HighlightGrammar>,
    pub messages: Vec<ParserMessage>,
}

/// A reduced and analyzed grammar.
#[derive(Debug, Clone)]
pub struct Compiler {
    source: String,
    grammar: Grammar,
    config: Config,
    analysis: Analysis,
    diagnostics: Diagnostics,
}

impl Compiler {
    /// Reduce `root` and run every analysis pass, configured from the
    /// grammar's own options.
    pub fn new(root: &SyntaxNode) -> Result<Self, Error> {
        let source = root.text().to_string();
        let grammar = reduce(root).map_err(|error| {
            let position = LineIndex::new(&source).line_col(error.span().start().into());
            let message = ParserMessage::error(error.to_string(), position);
            Error::Reduce { error, message }
        })?;

        let config = Config::from_grammar(&grammar);
        let mut diagnostics = Diagnostics::new();
        let analysis = analyze(&grammar, config.get_root(), &mut diagnostics);
        log::debug!(
            "compiler ready: {} definitions, {} diagnostics",
            grammar.len(),
            diagnostics.len()
        );

        Ok(Self {
            source,
            grammar,
            config,
            analysis,
            diagnostics,
        })
    }

    /// Override grammar options with `config`; unset settings keep the
    /// grammar's values. Analysis is rerun against the resulting root.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config.or(Config::from_grammar(&self.grammar));
        self.diagnostics = Diagnostics::new();
        self.analysis = analyze(&self.grammar, self.config.get_root(), &mut self.diagnostics);
        self
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn analysis(&self) -> &Analysis {
        &self.analysis
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Analysis findings as positioned messages.
    pub fn messages(&self) -> Vec<ParserMessage> {
        self.diagnostics.to_messages(&LineIndex::new(&self.source))
    }

    /// Analysis findings with source snippets.
    pub fn render_diagnostics(&self) -> String {
        self.diagnostics.render(&self.source)
    }

    /// Generate the parser. Analysis errors or a generation error leave
    /// `code` empty and `program` unset.
    pub fn compile_parser(&self) -> ParserOutput {
        let mut messages = self.messages();
        if self.diagnostics.has_errors() {
            return ParserOutput::failed(messages);
        }

        match codegen::generate(&self.grammar, &self.analysis, &self.config) {
            Ok((program, code)) => ParserOutput {
                success: true,
                code,
                program: Some(program),
                messages,
            },
            Err(error) => {
                log::debug!("parser generation failed: {error}");
                messages.push(self.error(error.to_string(), error.span()));
                ParserOutput::failed(messages)
            }
        }
    }

    /// Derive highlight patterns. Fails like [`Compiler::compile_parser`].
    pub fn derive_highlighting(&self) -> HighlightOutput {
        let mut messages = self.messages();
        if self.diagnostics.has_errors() {
            return HighlightOutput::failed(messages);
        }

        let mut diagnostics = Diagnostics::new();
        let result = highlight::derive_grammar(&self.grammar, &self.config, &mut diagnostics);
        messages.extend(diagnostics.to_messages(&LineIndex::new(&self.source)));
        match result {
            Ok(grammar) => HighlightOutput {
                success: true,
                grammar: Some(grammar),
                messages,
            },
            Err(error) => {
                log::debug!("highlight derivation failed: {error}");
                messages.push(self.error(error.to_string(), Some(error.span())));
                HighlightOutput::failed(messages)
            }
        }
    }

    /// An error message at `span`, or at the start of the source.
    fn error(&self, text: String, span: Option<TextRange>) -> ParserMessage {
        let offset: usize = span.map_or(0, |span| span.start().into());
        ParserMessage::error(text, LineIndex::new(&self.source).line_col(offset))
    }
}

impl ParserOutput {
    fn failed(messages: Vec<ParserMessage>) -> Self {
        Self {
            success: false,
            code: String::new(),
            program: None,
            messages,
        }
    }
}

impl HighlightOutput {
    fn failed(messages: Vec<ParserMessage>) -> Self {
        Self {
            success: false,
            grammar: None,
            messages,
        }
    }
}
