//! One-shot analysis of an input snapshot: cost aggregation followed by the
//! pricing solver, packaged into the result consumed by dashboards.

use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};

use crate::aggregator::{aggregate, CategoryTotal};
use crate::model::{AnalysisInputs, MemberTier};
use crate::solver::{solve, PricingResult};

/// Nominal supply areas behind the legacy 59/84 price estimates.
const TYPE59_PYUNG: f64 = 25.0;
const TYPE84_PYUNG: f64 = 34.0;

/// Legacy per-type price view.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatedPrices {
    pub type59: f64,
    pub type84: f64,
}

/// Everything downstream views read.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub total_project_cost: f64,
    /// Cost per pyung of floor area
    pub cost_per_pyung: f64,
    pub estimated_prices: EstimatedPrices,
    pub cost_breakdown: Vec<CategoryTotal>,
    pub unit_pricing: Vec<PricingResult>,
    pub total_revenue: f64,
    pub base_price_per_pyung: f64,
    pub general_revenue: f64,
    pub required_member_contribution: f64,
    /// `total_revenue - total_project_cost`
    pub profit: f64,
}

fn estimate_for(pricing: &[PricingResult], marker: &str, fallback: f64) -> f64 {
    pricing
        .iter()
        .find(|p| p.tier == MemberTier::First && p.unit_name.contains(marker))
        .map(|p| p.total_price)
        .unwrap_or(fallback)
}

/// Run the full computation for a snapshot.
pub fn analyze(inputs: &AnalysisInputs) -> AnalysisResult {
    let span = info_span!("analyze", categories = inputs.advanced_categories.len());
    let _guard = span.enter();

    let costs = aggregate(
        &inputs.advanced_categories,
        &inputs.project_target,
        &inputs.unit_allocations,
    );

    let floor_area = inputs.project_target.total_floor_area;
    let cost_per_pyung = if floor_area > 0.0 {
        costs.total_cost / floor_area
    } else {
        0.0
    };

    let outcome = solve(costs.total_cost, &inputs.unit_types, &inputs.unit_allocations);

    let estimated_prices = EstimatedPrices {
        type59: estimate_for(&outcome.pricing, "59", cost_per_pyung * TYPE59_PYUNG),
        type84: estimate_for(&outcome.pricing, "84", cost_per_pyung * TYPE84_PYUNG),
    };

    debug!(
        "Total cost {}, revenue {}, base price {}",
        costs.total_cost, outcome.total_revenue, outcome.base_price_per_pyung
    );

    AnalysisResult {
        total_project_cost: costs.total_cost,
        cost_per_pyung,
        estimated_prices,
        cost_breakdown: costs.breakdown,
        profit: outcome.total_revenue - costs.total_cost,
        unit_pricing: outcome.pricing,
        total_revenue: outcome.total_revenue,
        base_price_per_pyung: outcome.base_price_per_pyung,
        general_revenue: outcome.general_revenue,
        required_member_contribution: outcome.required_member_contribution,
    }
}
