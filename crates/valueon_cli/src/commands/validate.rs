//! Validate command - Report inconsistent inputs.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use thiserror::Error;
use tracing::info;

use valueon_core::InputValidator;

use super::Context;
use crate::render;

/// Raised by `--strict` when warnings were found.
#[derive(Debug, Error)]
#[error("Validation failed with {0} warning(s)")]
pub struct ValidationFailed(pub usize);

#[derive(Args)]
pub struct ValidateArgs {
    /// JSON or YAML inputs document (defaults to the saved session)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Fail when any warning is reported
    #[arg(long)]
    strict: bool,
}

pub fn execute(args: ValidateArgs, ctx: &Context) -> Result<()> {
    let inputs = ctx.load_inputs(args.input.as_deref())?;
    let report = InputValidator::validate(&inputs);
    info!("Validation found {} warning(s)", report.warnings.len());

    print!("{}", render::validation_lines(&report));

    if args.strict && !report.is_clean() {
        return Err(ValidationFailed(report.warnings.len()).into());
    }
    Ok(())
}
