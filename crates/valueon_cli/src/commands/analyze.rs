//! Analyze command - Print costs, prices and revenue.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tracing::info;

use valueon_core::{
    additional_contribution, analyze, tier_stats, AnalysisInputs, AnalysisResult, MemberTier,
    TierStat,
};

use super::Context;
use crate::config::OutputFormat;
use crate::render;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// JSON or YAML inputs document (defaults to the saved session)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisReport<'a> {
    #[serde(flatten)]
    result: &'a AnalysisResult,
    tier_stats: Vec<TierStat>,
    additional_contributions: Vec<ExtraContribution>,
}

/// Amount a 1st-tier member pays on top of the initial payment.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExtraContribution {
    allocation_id: String,
    unit_name: String,
    amount: f64,
}

fn extra_contributions(inputs: &AnalysisInputs, result: &AnalysisResult) -> Vec<ExtraContribution> {
    result
        .unit_pricing
        .iter()
        .filter(|p| p.tier == MemberTier::First)
        .map(|p| ExtraContribution {
            allocation_id: p.allocation_id.clone(),
            unit_name: p.unit_name.clone(),
            amount: additional_contribution(p.total_price, inputs.initial_payment),
        })
        .collect()
}

pub fn execute(args: AnalyzeArgs, ctx: &Context) -> Result<()> {
    let inputs = ctx.load_inputs(args.input.as_deref())?;
    let result = analyze(&inputs);
    info!(
        "Analyzed {} allocations, total cost {}",
        inputs.unit_allocations.len(),
        result.total_project_cost
    );

    match args.format.unwrap_or(ctx.format) {
        OutputFormat::Json => {
            let report = AnalysisReport {
                result: &result,
                tier_stats: tier_stats(&inputs.unit_types, &inputs.unit_allocations, &result.unit_pricing),
                additional_contributions: extra_contributions(&inputs, &result),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => print!("{}", render::analysis_table(&inputs, &result)),
    }

    Ok(())
}
