//! Export command - Write the saved snapshot as JSON or YAML.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Args, ValueEnum};
use tracing::info;

use valueon_core::{DocumentFormat, InputReader};

use super::Context;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExportFormat {
    Json,
    Yaml,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Output file; the format follows its extension
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Format when writing to stdout
    #[arg(short, long, value_enum, default_value = "json")]
    format: ExportFormat,
}

pub fn execute(args: ExportArgs, ctx: &Context) -> Result<()> {
    let session = ctx.open_session();

    match &args.output {
        Some(path) => {
            let format = DocumentFormat::from_path(path)?;
            let content = InputReader::to_string(session.inputs(), format)?;
            fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Exported snapshot to {:?}", path);
            if !ctx.quiet {
                println!("✅ Exported to {}", path.display());
            }
        }
        None => {
            let format = match args.format {
                ExportFormat::Json => DocumentFormat::Json,
                ExportFormat::Yaml => DocumentFormat::Yaml,
            };
            println!("{}", InputReader::to_string(session.inputs(), format)?);
        }
    }

    Ok(())
}
