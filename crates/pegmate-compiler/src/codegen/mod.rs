//! Parser back end: IR to [`Program`], and program to Rust source.

mod error;
mod lower;
mod render;


use pegmate_program::Program;

pub use error::CodegenError;
pub use lower::lower;
pub use render::render;

use crate::Config;
use crate::analyze::Analysis;
use crate::ir::Grammar;

/// Lower and render in one step.
pub fn generate(
    grammar: &Grammar,
    analysis: &Analysis,
    config: &Config,
) -> Result<(Program, String), CodegenError> {
    let root = config.get_root().ok_or(CodegenError::MissingRoot)?;
    if analysis.root().is_none() {
        return Err(CodegenError::UnknownRoot(root.to_owned()));
    }
    let program = lower(grammar, analysis)?;
    let code = render(&program, config);
    Ok((program, code))
}
