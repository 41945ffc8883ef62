#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures shared by the pegmate crates.
//!
//! - [`ScopedStack`]: operand stack partitioned into nested scopes, used by the
//!   shift-reduce construction of the grammar IR
//! - [`LineIndex`]: byte offset to 1-based line/column conversion for messages
//! - [`ParserMessage`]: positioned warning or error shown to the grammar author
//! - [`escape`]: escape-sequence decoding for collapsed terminals
//! - [`utils`]: identifier case conversion for generated code

pub mod escape;
mod line_index;
mod message;
mod stack;
pub mod utils;

#[cfg(test)]
mod utils_tests;

pub use line_index::{LineCol, LineIndex};
pub use message::{ParserMessage, Severity};
pub use stack::{Describe, ScopedStack, StackError, StackKind};
