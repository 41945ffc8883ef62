//! Contract syntax tree consumed by the reducer.
//!
//! A front end (outside this crate) turns grammar source into a rowan tree
//! over [`GrammarLang`]. The reducer only relies on node kinds, token kinds,
//! token text and ranges; whitespace and punctuation tokens may appear
//! anywhere and carry no meaning.

mod builder;
mod kind;

pub use builder::TreeBuilder;
pub use kind::{GrammarLang, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
