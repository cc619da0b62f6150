//! Unit pricing solver.
//!
//! General-tier units are priced directly (fixed price or rate × area). What
//! remains of the project cost is recovered from 1st and 2nd tier members at
//! a single base price per pyung `X`, with 2nd-tier units paying their premium
//! on top:
//!
//! ```text
//! required = Σ member area × X + Σ 2nd-tier premiums
//! ```
//!
//! Manual `fixedTotalPrice` overrides are applied after `X` is solved and do
//! not rebalance the other allocations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::lenient::finite;
use crate::model::{MemberTier, UnitAllocation, UnitType};

/// Computed price of one allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    pub allocation_id: String,
    pub unit_name: String,
    pub tier: MemberTier,
    /// Supply area (pyung)
    pub supply_area: f64,
    /// Price of a single unit
    pub total_price: f64,
    pub price_per_pyung: f64,
    /// `total_price × count`
    pub revenue_contribution: f64,
}

/// Everything the solver derives from one snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingOutcome {
    /// General allocations first, then 1st/2nd, each in input order
    pub pricing: Vec<PricingResult>,
    pub total_revenue: f64,
    /// The solved `X`
    pub base_price_per_pyung: f64,
    pub general_revenue: f64,
    /// Cost left for 1st and 2nd tier members after general sales
    pub required_member_contribution: f64,
    pub total_member_area: f64,
    pub total_premiums: f64,
}

impl PricingOutcome {
    pub fn for_allocation(&self, allocation_id: &str) -> Option<&PricingResult> {
        self.pricing.iter().find(|p| p.allocation_id == allocation_id)
    }
}

/// Id-indexed view over the unit types.
pub struct UnitCatalog<'a> {
    types: HashMap<&'a str, &'a UnitType>,
}

impl<'a> UnitCatalog<'a> {
    pub fn new(unit_types: &'a [UnitType]) -> Self {
        let mut types = HashMap::with_capacity(unit_types.len());
        for unit in unit_types {
            // first definition wins, like a linear find
            types.entry(unit.id.as_str()).or_insert(unit);
        }
        Self { types }
    }

    pub fn get(&self, id: &str) -> Option<&'a UnitType> {
        self.types.get(id).copied()
    }

    /// Supply area of a type; 0 when the type is unknown.
    pub fn area(&self, id: &str) -> f64 {
        self.get(id).map(|u| finite(u.supply_area)).unwrap_or(0.0)
    }

    /// Display name of a type; `"?"` when the type is unknown.
    pub fn name(&self, id: &str) -> String {
        self.get(id).map(|u| u.name.clone()).unwrap_or_else(|| "?".to_string())
    }
}

/// Apply override precedence to a computed unit price: a manual fixed price
/// always wins.
pub fn resolve_allocation_price(allocation: &UnitAllocation, calculated: f64) -> f64 {
    allocation.fixed_override().unwrap_or(calculated)
}

/// Price a General allocation: its target rate times the unit area.
pub fn general_unit_price(allocation: &UnitAllocation, area: f64) -> f64 {
    area * allocation.target_price_per_pyung.map(finite).unwrap_or(0.0)
}

/// Price a 1st/2nd allocation at base price `x`, premium included for 2nd tier.
pub fn member_unit_price(allocation: &UnitAllocation, area: f64, x: f64) -> f64 {
    let mut price = area * x;
    if allocation.tier == MemberTier::Second {
        price += allocation.premium.map(finite).unwrap_or(0.0);
    }
    price
}

/// Solve `required = area × X + premiums` for `X`; 0 when there is no member area.
pub fn solve_base_price(required: f64, total_member_area: f64, total_premiums: f64) -> f64 {
    if total_member_area > 0.0 {
        (required - total_premiums) / total_member_area
    } else {
        0.0
    }
}

/// Revenue an allocation contributes to the project total.
///
/// Precedence: rental units earn their rate × area (or nothing); then a manual
/// fixed price; then the solved price.
pub fn allocation_revenue(
    allocation: &UnitAllocation,
    unit_type: &UnitType,
    solved: Option<&PricingResult>,
) -> f64 {
    let count = f64::from(allocation.count);

    if unit_type.is_rental() {
        return allocation
            .target_price_per_pyung
            .map(finite)
            .filter(|rate| *rate != 0.0)
            .map(|rate| rate * finite(unit_type.supply_area) * count)
            .unwrap_or(0.0);
    }

    if let Some(fixed) = allocation.fixed_override() {
        return fixed * count;
    }

    solved.map(|p| p.total_price * count).unwrap_or(0.0)
}

fn pricing_result(allocation: &UnitAllocation, catalog: &UnitCatalog<'_>, price: f64) -> PricingResult {
    let area = catalog.area(&allocation.unit_type_id);
    PricingResult {
        allocation_id: allocation.id.clone(),
        unit_name: catalog.name(&allocation.unit_type_id),
        tier: allocation.tier,
        supply_area: area,
        total_price: price,
        price_per_pyung: if area > 0.0 { price / area } else { 0.0 },
        revenue_contribution: price * f64::from(allocation.count),
    }
}

/// Price every allocation so member contributions plus general revenue cover
/// `total_project_cost`.
pub fn solve(
    total_project_cost: f64,
    unit_types: &[UnitType],
    allocations: &[UnitAllocation],
) -> PricingOutcome {
    let catalog = UnitCatalog::new(unit_types);
    let mut pricing = Vec::with_capacity(allocations.len());

    let mut general_revenue = 0.0;
    for alloc in allocations.iter().filter(|a| a.tier == MemberTier::General) {
        let area = catalog.area(&alloc.unit_type_id);
        let price = resolve_allocation_price(alloc, general_unit_price(alloc, area));
        let result = pricing_result(alloc, &catalog, price);
        general_revenue += result.revenue_contribution;
        pricing.push(result);
    }

    let required = finite(total_project_cost) - general_revenue;

    let members: Vec<&UnitAllocation> = allocations.iter().filter(|a| a.tier.is_member()).collect();
    let mut total_member_area = 0.0;
    let mut total_premiums = 0.0;
    for alloc in &members {
        let count = f64::from(alloc.count);
        total_member_area += count * catalog.area(&alloc.unit_type_id);
        if alloc.tier == MemberTier::Second {
            total_premiums += count * alloc.premium.map(finite).unwrap_or(0.0);
        }
    }

    let base_price = solve_base_price(required, total_member_area, total_premiums);
    debug!(
        "Solved base price {} per pyung (required {}, member area {}, premiums {})",
        base_price, required, total_member_area, total_premiums
    );

    for alloc in &members {
        let area = catalog.area(&alloc.unit_type_id);
        let price = resolve_allocation_price(alloc, member_unit_price(alloc, area, base_price));
        pricing.push(pricing_result(alloc, &catalog, price));
    }

    let total_revenue = allocations
        .iter()
        .filter_map(|alloc| {
            let unit_type = catalog.get(&alloc.unit_type_id)?;
            let solved = pricing.iter().find(|p| p.allocation_id == alloc.id);
            Some(allocation_revenue(alloc, unit_type, solved))
        })
        .sum();

    PricingOutcome {
        pricing,
        total_revenue,
        base_price_per_pyung: base_price,
        general_revenue,
        required_member_contribution: required,
        total_member_area,
        total_premiums,
    }
}
