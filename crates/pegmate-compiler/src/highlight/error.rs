use rowan::TextRange;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeriveError {
    #[error("`{rule}` uses a choice, which a highlight pattern cannot express")]
    Choice { rule: String, span: TextRange },

    #[error("`{name}` is not defined")]
    UndefinedReference { name: String, span: TextRange },

    #[error("`{name}` refers to itself and cannot be expanded into a pattern")]
    RecursiveReference { name: String, span: TextRange },

    #[error("`{rule}` sets only one of `begin` and `end`")]
    MissingBeginEnd { rule: String, span: TextRange },

    #[error("`{name}` is not a highlight definition")]
    InvalidRuleReference { name: String, span: TextRange },
}

impl DeriveError {
    pub fn span(&self) -> TextRange {
        match self {
            DeriveError::Choice { span, .. }
            | DeriveError::UndefinedReference { span, .. }
            | DeriveError::RecursiveReference { span, .. }
            | DeriveError::MissingBeginEnd { span, .. }
            | DeriveError::InvalidRuleReference { span, .. } => *span,
        }
    }
}
