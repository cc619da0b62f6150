//! Init command - Save a starting snapshot.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use tracing::info;

use valueon_core::{default_inputs, InputReader};
use valueon_store::{JsonFileStore, SnapshotEnvelope, SnapshotStore};

use super::Context;

#[derive(Args)]
pub struct InitArgs {
    /// Start from this JSON or YAML document instead of the defaults
    #[arg(long)]
    from: Option<PathBuf>,

    /// Overwrite an existing snapshot
    #[arg(short, long)]
    force: bool,
}

pub fn execute(args: InitArgs, ctx: &Context) -> Result<()> {
    let path = ctx.store.snapshot_path();
    if path.exists() && !args.force {
        anyhow::bail!(
            "Saved data already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    let inputs = match &args.from {
        Some(file) => InputReader::read_file(file)
            .with_context(|| format!("Failed to read inputs from {}", file.display()))?,
        None => default_inputs(),
    };

    info!("Initializing snapshot at {:?}", path);
    let content = SnapshotEnvelope::new(inputs).to_json()?;
    JsonFileStore::new(&ctx.store)
        .save_raw(&content)
        .context("Failed to save snapshot")?;

    if !ctx.quiet {
        println!("✅ Snapshot saved to {}", path.display());
    }
    Ok(())
}
