//! Syntax kinds for the contract tree.
//!
//! `SyntaxKind` serves dual roles: token kinds and node kinds.
//! `GrammarLang` implements Rowan's `Language` trait for tree construction.

use rowan::Language;

/// All token and node kinds. Tokens first, then nodes, then `__LAST` sentinel.
/// `#[repr(u16)]` enables safe transmute in `kind_from_raw`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // --- Trivia ---
    Whitespace = 0,
    Newline,
    Comment,

    // --- Value tokens ---
    /// Rule or option name; as a value, a reference.
    Ident,
    /// Quoted literal, quotes and escapes included.
    String,
    /// `/pattern/`, delimiters included.
    Regex,
    Number,
    True,
    False,

    // --- Marker keywords ---
    KwDrop,
    /// Collapse to text and decode escapes.
    KwTerminal,
    /// Collapse to text verbatim.
    KwRawTerminal,
    KwInline,
    KwPromoteError,
    KwNameAsError,

    // --- Suffix operators ---
    Question,
    Star,
    Plus,

    // --- Punctuation and keywords without payload ---
    KwOption,
    KwTm,
    Bang,
    Pipe,
    Equals,
    Semicolon,
    Comma,
    ParenOpen,
    ParenClose,
    BraceOpen,
    BraceClose,
    BracketOpen,
    BracketClose,
    Error,

    // --- Node kinds ---
    Root,
    OptionDecl,
    Definition,
    TmDefinition,
    Property,
    Marker,
    Marked,
    Sequence,
    Choice,
    Suffix,
    Not,
    Group,
    RegexTerm,
    RepeatCount,

    // Must be last - used for bounds checking in `kind_from_raw`
    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace | Newline | Comment)
    }

    #[inline]
    pub fn is_marker_keyword(self) -> bool {
        matches!(
            self,
            KwDrop | KwTerminal | KwRawTerminal | KwInline | KwPromoteError | KwNameAsError
        )
    }

    #[inline]
    pub fn is_suffix_operator(self) -> bool {
        matches!(self, Question | Star | Plus)
    }

    /// Tokens that never push a value.
    #[inline]
    pub fn is_punctuation(self) -> bool {
        matches!(
            self,
            KwOption
                | KwTm
                | Bang
                | Pipe
                | Equals
                | Semicolon
                | Comma
                | ParenOpen
                | ParenClose
                | BraceOpen
                | BraceClose
                | BracketOpen
                | BracketClose
        )
    }

    #[inline]
    pub fn is_node(self) -> bool {
        self >= Root && self < __LAST
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    #[inline]
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language tag for Rowan's tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GrammarLang {}

impl Language for GrammarLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 < __LAST as u16);
        // SAFETY: We've verified the value is in bounds, and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for Rowan types parameterized by our language.
pub type SyntaxNode = rowan::SyntaxNode<GrammarLang>;
pub type SyntaxToken = rowan::SyntaxToken<GrammarLang>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;
