//! Grammar compiler for pegmate.
//!
//! A grammar arrives as a lossless [`rowan`] tree (see [`syntax`]) built by
//! some front end. The compiler reduces it to the grammar IR, validates it,
//! and derives two artifacts from the same IR:
//!
//! - a parser: a [`pegmate_program::Program`] plus Rust source that runs on
//!   `pegmate-vm`
//! - highlighting: one capturing pattern per highlight definition
//!
//! # Example
//!
//! ```ignore
//! let compiler = Compiler::new(&tree)?;
//! let parser = compiler.compile_parser();
//! for message in &parser.messages {
//!     eprintln!("{message}");
//! }
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analyze;
pub mod codegen;
mod compiler;
mod config;
pub mod diagnostics;
pub mod highlight;
pub mod ir;
pub mod reduce;
pub mod syntax;

#[cfg(test)]
mod test_utils;

pub use compiler::{Compiler, Error, HighlightOutput, ParserOutput};
pub use config::Config;
