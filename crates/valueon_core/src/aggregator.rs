//! Cost aggregation.
//!
//! Resolves every cost item against the project target (or the unit mix, for
//! mix-linked items), applies the item's application rate and sums items into
//! category totals and a grand total.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::lenient::finite;
use crate::model::{CalculationBasis, CostCategory, CostItem, ProjectTarget, SiteArea, UnitAllocation};

/// Chart colors cycled over the categories, in display order.
pub const BREAKDOWN_PALETTE: [&str; 10] = [
    "#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#8884d8", "#82ca9d", "#ffc658", "#ff7300",
    "#a4de6c", "#d0ed57",
];

/// Total of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub name: String,
    pub value: f64,
    pub fill: String,
}

/// Output of [`aggregate`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSummary {
    pub total_cost: f64,
    pub breakdown: Vec<CategoryTotal>,
}

/// The scalar a basis multiplies the item amount by.
///
/// Mix-linked items have no scalar driver and return `None`.
pub fn basis_value(basis: &CalculationBasis, target: &ProjectTarget) -> Option<f64> {
    let value = match basis {
        CalculationBasis::Fixed => 1.0,
        CalculationBasis::PerUnit => target.total_households,
        CalculationBasis::PerSiteArea(SiteArea::Total) => target.total_land_area,
        CalculationBasis::PerSiteArea(SiteArea::Private) => target.private_land_area.unwrap_or(0.0),
        CalculationBasis::PerSiteArea(SiteArea::Public) => target.public_land_area.unwrap_or(0.0),
        CalculationBasis::PerFloorArea => target.total_floor_area,
        CalculationBasis::ManualArea(area) => *area,
        CalculationBasis::MixLinked(_) => return None,
    };
    Some(finite(value))
}

/// Σ count × per-unit rate over the allocations named in `conditions`.
pub fn mix_linked_amount(
    conditions: &std::collections::BTreeMap<String, f64>,
    allocations: &[UnitAllocation],
) -> f64 {
    allocations
        .iter()
        .map(|alloc| {
            let rate = conditions.get(&alloc.id).copied().map(finite).unwrap_or(0.0);
            f64::from(alloc.count) * rate
        })
        .sum()
}

/// Contribution of one item before the application rate.
///
/// Sub-items take precedence over the basis: when present, their sum is the
/// amount and the basis is not consulted.
pub fn raw_item_amount(item: &CostItem, target: &ProjectTarget, allocations: &[UnitAllocation]) -> f64 {
    if !item.sub_items.is_empty() {
        return item.sub_items.iter().map(|s| finite(s.amount)).sum();
    }

    match &item.basis {
        CalculationBasis::MixLinked(conditions) => mix_linked_amount(conditions, allocations),
        basis => finite(item.amount) * basis_value(basis, target).unwrap_or(0.0),
    }
}

/// Contribution of one item to its category total.
pub fn resolve_item_amount(item: &CostItem, target: &ProjectTarget, allocations: &[UnitAllocation]) -> f64 {
    let raw = raw_item_amount(item, target, allocations);
    finite(raw * item.rate_percent() / 100.0)
}

/// Sum of a category's item contributions.
pub fn category_total(category: &CostCategory, target: &ProjectTarget, allocations: &[UnitAllocation]) -> f64 {
    category
        .items
        .iter()
        .map(|item| resolve_item_amount(item, target, allocations))
        .sum()
}

/// Aggregate all categories into a total project cost and a per-category breakdown.
pub fn aggregate(
    categories: &[CostCategory],
    target: &ProjectTarget,
    allocations: &[UnitAllocation],
) -> CostSummary {
    let breakdown: Vec<CategoryTotal> = categories
        .iter()
        .enumerate()
        .map(|(index, category)| CategoryTotal {
            name: category.title.clone(),
            value: category_total(category, target, allocations),
            fill: BREAKDOWN_PALETTE[index % BREAKDOWN_PALETTE.len()].to_string(),
        })
        .collect();

    let total_cost = breakdown.iter().map(|c| c.value).sum();
    debug!(
        "Aggregated {} categories into total cost {}",
        breakdown.len(),
        total_cost
    );

    CostSummary {
        total_cost,
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MemberTier, SubItem};
    use std::collections::BTreeMap;

    fn target() -> ProjectTarget {
        ProjectTarget {
            total_land_area: 10.0,
            total_floor_area: 40.0,
            total_households: 5.0,
            private_land_area: Some(6.0),
            public_land_area: None,
        }
    }

    fn land(item: CostItem) -> Vec<CostCategory> {
        vec![CostCategory::new("land", "Land").with_item(item)]
    }

    #[test]
    fn test_per_site_pyung() {
        let item = CostItem::new("l1", "Land purchase", 100_000_000.0)
            .with_basis(CalculationBasis::PerSiteArea(SiteArea::Total))
            .with_rate(100.0);
        let summary = aggregate(&land(item), &target(), &[]);
        assert_eq!(summary.total_cost, 1_000_000_000.0);
        assert_eq!(summary.breakdown[0].value, 1_000_000_000.0);
        assert_eq!(summary.breakdown[0].name, "Land");
    }

    #[test]
    fn test_application_rate() {
        let item = CostItem::new("l1", "Land purchase", 100_000_000.0)
            .with_basis(CalculationBasis::PerSiteArea(SiteArea::Total))
            .with_rate(50.0);
        let summary = aggregate(&land(item), &target(), &[]);
        assert_eq!(summary.total_cost, 500_000_000.0);
    }

    #[test]
    fn test_basis_values() {
        let t = target();
        assert_eq!(basis_value(&CalculationBasis::Fixed, &t), Some(1.0));
        assert_eq!(basis_value(&CalculationBasis::PerUnit, &t), Some(5.0));
        assert_eq!(basis_value(&CalculationBasis::PerFloorArea, &t), Some(40.0));
        assert_eq!(basis_value(&CalculationBasis::PerSiteArea(SiteArea::Private), &t), Some(6.0));
        assert_eq!(basis_value(&CalculationBasis::PerSiteArea(SiteArea::Public), &t), Some(0.0));
        assert_eq!(basis_value(&CalculationBasis::ManualArea(7.5), &t), Some(7.5));
        assert_eq!(basis_value(&CalculationBasis::MixLinked(BTreeMap::new()), &t), None);
    }

    #[test]
    fn test_mix_linked_ignores_amount() {
        let allocations = vec![
            UnitAllocation::new("a1", "u1", MemberTier::First, 10),
            UnitAllocation::new("a2", "u1", MemberTier::Second, 4),
            UnitAllocation::new("a3", "u2", MemberTier::General, 7),
        ];
        let mut conditions = BTreeMap::new();
        conditions.insert("a1".to_string(), 1_000.0);
        conditions.insert("a2".to_string(), 2_500.0);
        conditions.insert("ghost".to_string(), 99.0);

        let item = CostItem::new("m", "Move-in fee", 123_456.0)
            .with_basis(CalculationBasis::MixLinked(conditions))
            .with_rate(50.0);
        assert_eq!(resolve_item_amount(&item, &target(), &allocations), 10_000.0);
    }

    #[test]
    fn test_sub_items_override_basis_but_not_rate() {
        let mut item = CostItem::new("c", "Construction", 1.0)
            .with_basis(CalculationBasis::PerFloorArea)
            .with_rate(10.0);
        item.sub_items = vec![
            SubItem { id: "s1".into(), name: "a".into(), amount: 600.0, note: None },
            SubItem { id: "s2".into(), name: "b".into(), amount: 400.0, note: None },
        ];
        assert_eq!(resolve_item_amount(&item, &target(), &[]), 100.0);
    }

    #[test]
    fn test_breakdown_colors_cycle() {
        let categories: Vec<CostCategory> = (0..12)
            .map(|i| CostCategory::new(format!("c{}", i), format!("Category {}", i)))
            .collect();
        let summary = aggregate(&categories, &target(), &[]);
        assert_eq!(summary.breakdown.len(), 12);
        assert_eq!(summary.breakdown[10].fill, BREAKDOWN_PALETTE[0]);
        assert_eq!(summary.total_cost, 0.0);
    }

    #[test]
    fn test_nan_inputs_resolve_to_zero() {
        let item = CostItem::new("x", "Broken", f64::NAN).with_basis(CalculationBasis::PerUnit);
        assert_eq!(resolve_item_amount(&item, &target(), &[]), 0.0);
    }
}
