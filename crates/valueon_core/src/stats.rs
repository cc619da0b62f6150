//! Per-tier unit and revenue statistics for the unit-mix dashboard.

use serde::{Deserialize, Serialize};

use crate::lenient::finite;
use crate::model::{MemberTier, UnitAllocation, UnitType};
use crate::solver::{allocation_revenue, PricingResult, UnitCatalog};

/// Revenue group shown in the statistics: a member tier, or rental housing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RevenueGroup {
    Tier(MemberTier),
    Rental,
}

impl RevenueGroup {
    pub fn label(&self) -> &'static str {
        match self {
            RevenueGroup::Tier(MemberTier::First) => "1차 조합원",
            RevenueGroup::Tier(MemberTier::Second) => "2차 조합원",
            RevenueGroup::Tier(MemberTier::General) => "일반분양",
            RevenueGroup::Rental => "임대주택",
        }
    }
}

/// Units and revenue of one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierStat {
    pub group: RevenueGroup,
    pub count: u64,
    pub revenue: f64,
    /// Percent of the summed revenue of all groups
    pub share: f64,
}

/// Tally units and revenue per tier over non-rental types, plus a rental row.
///
/// Allocations whose unit type is unknown are left out.
pub fn tier_stats(
    unit_types: &[UnitType],
    allocations: &[UnitAllocation],
    pricing: &[PricingResult],
) -> Vec<TierStat> {
    let catalog = UnitCatalog::new(unit_types);
    let mut rows: Vec<TierStat> = MemberTier::ALL
        .iter()
        .map(|tier| RevenueGroup::Tier(*tier))
        .chain(std::iter::once(RevenueGroup::Rental))
        .map(|group| TierStat {
            group,
            count: 0,
            revenue: 0.0,
            share: 0.0,
        })
        .collect();

    for alloc in allocations {
        let Some(unit_type) = catalog.get(&alloc.unit_type_id) else {
            continue;
        };
        let group = if unit_type.is_rental() {
            RevenueGroup::Rental
        } else {
            RevenueGroup::Tier(alloc.tier)
        };
        let solved = pricing.iter().find(|p| p.allocation_id == alloc.id);
        if let Some(row) = rows.iter_mut().find(|r| r.group == group) {
            row.count += u64::from(alloc.count);
            row.revenue += allocation_revenue(alloc, unit_type, solved);
        }
    }

    let total: f64 = rows.iter().map(|r| r.revenue).sum();
    if total > 0.0 {
        for row in &mut rows {
            row.share = row.revenue / total * 100.0;
        }
    }
    rows
}

/// What a 1st-tier member still owes on top of the initial payment.
pub fn additional_contribution(sales_price: f64, initial_payment: f64) -> f64 {
    finite(sales_price) - finite(initial_payment)
}
