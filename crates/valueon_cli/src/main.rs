//! Valueon CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Validation failure

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod render;

use commands::validate::ValidationFailed;
use commands::{Cli, Commands, Context};
use valueon_core::CoreError;

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over the flags
    let default_filter = log_filter(cli.verbose, cli.quiet);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let result = Context::new(&cli).and_then(|ctx| match cli.command {
        Commands::Init(args) => commands::init::execute(args, &ctx),
        Commands::Analyze(args) => commands::analyze::execute(args, &ctx),
        Commands::Validate(args) => commands::validate::execute(args, &ctx),
        Commands::SetCount(args) => commands::set_count::execute(args, &ctx),
        Commands::SetTotal(args) => commands::set_total::execute(args, &ctx),
        Commands::SuggestBasis(args) => commands::suggest_basis::execute(args, &ctx),
        Commands::Export(args) => commands::export::execute(args, &ctx),
        Commands::Reset(args) => commands::reset::execute(args, &ctx),
    });

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Default log filter for the verbosity flags.
fn log_filter(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "valueon=debug,info"
    } else if quiet {
        "warn"
    } else {
        "valueon=info,warn"
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if e.downcast_ref::<ValidationFailed>().is_some() {
        return ExitCodes::VALIDATION_FAILURE;
    }

    match e.downcast_ref::<CoreError>() {
        Some(
            CoreError::CategoryNotFound(_)
            | CoreError::ItemNotFound { .. }
            | CoreError::UnitTypeNotFound(_)
            | CoreError::AllocationNotFound(_)
            | CoreError::UnsupportedFormat(_),
        ) => ExitCodes::INVALID_ARGS,
        _ => {
            let msg = e.to_string().to_lowercase();
            if msg.contains("argument") || msg.contains("option") || msg.contains("not found") {
                ExitCodes::INVALID_ARGS
            } else {
                ExitCodes::GENERAL_ERROR
            }
        }
    }
}
