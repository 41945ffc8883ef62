//! Grammar intermediate representation.
//!
//! Built once by the reducer, read-only afterwards. Definitions refer to each
//! other by name; resolution goes through [`Grammar`].

mod element;
mod grammar;
mod value;

pub use element::{Element, ElementKind, Marker};
pub use grammar::{DefId, DefKind, Definition, Grammar, GrammarError};
pub use value::{Attribute, Value};
