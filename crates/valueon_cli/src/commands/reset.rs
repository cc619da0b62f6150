//! Reset command - Forget the saved snapshot.

use anyhow::Result;
use clap::Args;
use tracing::info;

use valueon_store::SnapshotStore;

use super::Context;

#[derive(Args)]
pub struct ResetArgs {
    /// Required; the saved snapshot cannot be recovered
    #[arg(long)]
    yes: bool,
}

pub fn execute(args: ResetArgs, ctx: &Context) -> Result<()> {
    if !args.yes {
        anyhow::bail!("Refusing to delete saved data without --yes option");
    }

    let mut session = ctx.open_session();
    session.reset();
    if session.store().path().exists() {
        // reset only logs storage failures; surface them here
        session.store().clear()?;
    }
    info!("Saved snapshot removed");

    if !ctx.quiet {
        println!("✅ Saved data cleared");
    }
    Ok(())
}
