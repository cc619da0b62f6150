//! Set-count command - Change an allocation's unit count.

use anyhow::Result;
use clap::Args;

use valueon_core::InputAction;

use super::Context;
use crate::render;

#[derive(Args)]
pub struct SetCountArgs {
    /// Allocation id
    #[arg(short, long)]
    allocation: String,

    /// New unit count
    #[arg(short, long)]
    count: u32,
}

pub fn execute(args: SetCountArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session();
    let unit_type_id = session
        .inputs()
        .require_allocation(&args.allocation)?
        .unit_type_id
        .clone();

    let inputs = session.dispatch(InputAction::SetAllocationCount {
        allocation_id: args.allocation,
        count: args.count,
    });

    if !ctx.quiet {
        println!("{}: {}", unit_type_id, render::type_counts(inputs, &unit_type_id));
    }
    Ok(())
}
