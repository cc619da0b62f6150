//! Set-total command - Change a unit type's total and rescale its tiers.

use anyhow::Result;
use clap::Args;

use valueon_core::InputAction;

use super::Context;
use crate::render;

#[derive(Args)]
pub struct SetTotalArgs {
    /// Unit type id
    #[arg(short, long)]
    unit_type: String,

    /// New total units across all tiers
    #[arg(short, long)]
    total: u32,
}

pub fn execute(args: SetTotalArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session();
    session.inputs().require_unit_type(&args.unit_type)?;

    let unit_type_id = args.unit_type.clone();
    let inputs = session.dispatch(InputAction::SetUnitTypeTotalUnits {
        unit_type_id: args.unit_type,
        total: args.total,
    });

    if !ctx.quiet {
        println!(
            "{} ({} units): {}",
            unit_type_id,
            args.total,
            render::type_counts(inputs, &unit_type_id)
        );
    }
    Ok(())
}
