use pegmate_program::ProgramError;
use rowan::TextRange;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodegenError {
    #[error("no root rule configured")]
    MissingRoot,

    #[error("root rule `{0}` is not a parser rule")]
    UnknownRoot(String),

    #[error("`{name}` is not defined")]
    UndefinedReference { name: String, span: TextRange },

    #[error("`{name}` is a highlight definition and cannot be called from a parser rule")]
    HighlightReference { name: String, span: TextRange },

    #[error("{found} cannot appear in a parser rule")]
    UnsupportedElement { found: &'static str, span: TextRange },

    #[error("invalid pattern `/{pattern}/`: {message}")]
    InvalidPattern {
        pattern: String,
        message: String,
        span: TextRange,
    },

    #[error("inline definition `{name}` expands into itself")]
    InlineCycle { name: String, span: TextRange },

    #[error(transparent)]
    Program(#[from] ProgramError),
}

impl CodegenError {
    pub fn span(&self) -> Option<TextRange> {
        match self {
            CodegenError::UndefinedReference { span, .. }
            | CodegenError::HighlightReference { span, .. }
            | CodegenError::UnsupportedElement { span, .. }
            | CodegenError::InvalidPattern { span, .. }
            | CodegenError::InlineCycle { span, .. } => Some(*span),
            CodegenError::MissingRoot
            | CodegenError::UnknownRoot(_)
            | CodegenError::Program(_) => None,
        }
    }
}
