//! Runtime for compiled pegmate parsers.
//!
//! This crate provides the backtracking combinators that generated parser
//! code calls into, and an interpreter that runs a [`pegmate_program::Program`]
//! directly. Both report failures through furthest-failure diagnostics.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod engine;

pub use engine::{
    END_OF_INPUT, FurthestFailure, Interpreter, NoopTracer, Parse, ParseLimits, ParseNode,
    ParseResult, Parser, PatternTable, PrintTracer, RuntimeError, Tracer, Verbosity,
};
