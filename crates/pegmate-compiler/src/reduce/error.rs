use pegmate_core::StackError;
use rowan::TextRange;

use crate::ir::GrammarError;
use crate::syntax::SyntaxKind;

/// Structural problem in the contract tree, or an IR construction failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReduceError {
    #[error("malformed {kind:?} node: {source}")]
    Stack {
        source: StackError,
        kind: SyntaxKind,
        span: TextRange,
    },

    #[error("unexpected {found} left over in {kind:?} node")]
    Leftover {
        kind: SyntaxKind,
        found: &'static str,
        span: TextRange,
    },

    #[error("suffix operator `{operator}` has no operand")]
    OrphanOperator { operator: &'static str, span: TextRange },

    #[error("{kind:?} node contains no elements")]
    EmptyOperator { kind: SyntaxKind, span: TextRange },

    #[error("{found} cannot be used as a value")]
    InvalidValue { found: &'static str, span: TextRange },

    #[error("invalid repeat count `{text}`")]
    InvalidRepeatCount { text: String, span: TextRange },

    #[error("repeat count applied to {found}, expected a regex")]
    ExpectedRegex { found: &'static str, span: TextRange },

    #[error("unexpected {kind:?} in grammar tree")]
    UnexpectedKind { kind: SyntaxKind, span: TextRange },

    #[error(transparent)]
    Grammar(#[from] GrammarError),
}

impl ReduceError {
    pub fn span(&self) -> TextRange {
        match self {
            ReduceError::Stack { span, .. }
            | ReduceError::Leftover { span, .. }
            | ReduceError::OrphanOperator { span, .. }
            | ReduceError::EmptyOperator { span, .. }
            | ReduceError::InvalidValue { span, .. }
            | ReduceError::InvalidRepeatCount { span, .. }
            | ReduceError::ExpectedRegex { span, .. }
            | ReduceError::UnexpectedKind { span, .. } => *span,
            ReduceError::Grammar(e) => e.span(),
        }
    }
}
