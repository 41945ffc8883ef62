#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Compiled parser program format.
//!
//! A [`Program`] is the output of parser code generation and the input of the
//! runtime: a table of named rules, each holding one [`Combinator`] tree.
//! Rules refer to each other by [`RuleId`], so recursion is a plain index.

mod combinator;
pub mod dump;
mod program;

#[cfg(test)]
mod program_tests;

pub use combinator::{Combinator, literal_label, pattern_label};
pub use dump::dump;
pub use program::{Program, ProgramError, Rule, RuleId};
