//! Errors that abort a parse.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// Too many nested rule calls, usually left recursion.
    #[error("runtime recursion limit exceeded ({0} nested rule calls)")]
    RecursionLimitExceeded(u32),

    #[error("invalid pattern `/{pattern}/`: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("pattern `/{pattern}/` could not be searched: {message}")]
    PatternSearch { pattern: String, message: String },

    #[error("pattern #{0} is not in the pattern table")]
    UnknownPatternId(usize),

    #[error("pattern `/{0}/` was not compiled")]
    UncompiledPattern(String),
}
