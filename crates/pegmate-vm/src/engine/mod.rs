//! Parse engine: state, combinators, interpreter and tracing.

mod error;
mod failure;
mod interpreter;
mod node;
mod parser;
mod patterns;
mod trace;

#[cfg(test)]
mod engine_tests;
#[cfg(test)]
mod failure_tests;

pub use error::RuntimeError;
pub use failure::{END_OF_INPUT, FurthestFailure};
pub use interpreter::Interpreter;
pub use node::ParseNode;
pub use parser::{Parse, ParseLimits, ParseResult, Parser};
pub use patterns::PatternTable;
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
