//! Integration tests for the feasibility engine.

use std::fs;
use tempfile::tempdir;

use valueon_core::{
    analyze, apply, default_inputs, format_korean_currency, tier_stats, AllocationField,
    AnalysisInputs, CalculationBasis, DocumentFormat, InputAction, InputReader, InputValidator,
    MemberTier, SubItemField,
};

fn relative_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1.0)
}

fn price_of(result: &valueon_core::AnalysisResult, allocation_id: &str) -> f64 {
    result
        .unit_pricing
        .iter()
        .find(|p| p.allocation_id == allocation_id)
        .map(|p| p.total_price)
        .unwrap()
}

/// Without manual prices the solved revenue covers the total project cost.
#[test]
fn test_revenue_balances_cost_without_overrides() {
    let mut inputs = default_inputs();
    for count in [10, 75, 0] {
        inputs = apply(
            &inputs,
            InputAction::SetAllocationCount { allocation_id: "a5".into(), count },
        );
        let result = analyze(&inputs);
        assert!(
            relative_eq(result.total_revenue, result.total_project_cost),
            "revenue {} != cost {}",
            result.total_revenue,
            result.total_project_cost
        );
    }
}

/// A manual member price replaces that allocation's price and leaves the
/// solved base price and every other price untouched.
#[test]
fn test_member_override_is_independent() {
    let before = analyze(&default_inputs());
    let inputs = apply(
        &default_inputs(),
        InputAction::SetAllocationField {
            allocation_id: "a1".into(),
            field: AllocationField::FixedTotalPrice(Some(500_000_000.0)),
        },
    );
    let after = analyze(&inputs);

    assert_eq!(price_of(&after, "a1"), 500_000_000.0);
    assert_eq!(after.base_price_per_pyung, before.base_price_per_pyung);
    for id in ["a2", "a3", "a4", "a5", "a6"] {
        assert_eq!(price_of(&after, id), price_of(&before, id), "price of {} moved", id);
    }

    let delta = (500_000_000.0 - price_of(&before, "a1")) * 50.0;
    assert!(relative_eq(after.total_revenue, before.total_revenue + delta));

    // clearing the field to zero restores the computed price
    let inputs = apply(
        &inputs,
        InputAction::SetAllocationField {
            allocation_id: "a1".into(),
            field: AllocationField::FixedTotalPrice(Some(0.0)),
        },
    );
    assert_eq!(price_of(&analyze(&inputs), "a1"), price_of(&before, "a1"));
}

/// Editing sub-items keeps the parent amount equal to their sum and feeds
/// straight into the total cost.
#[test]
fn test_sub_item_edits_flow_into_total_cost() {
    let base = analyze(&default_inputs());
    let l1_before = default_inputs().require_item("land", "l1").unwrap().clone();

    let mut inputs = default_inputs();
    for amount in [1_000_000_000.0, 500_000_000.0] {
        inputs = apply(
            &inputs,
            InputAction::AddSubItem {
                category_id: "land".into(),
                item_id: "l1".into(),
                name: "parcel".into(),
                amount,
            },
        );
    }
    let sub_id = inputs.require_item("land", "l1").unwrap().sub_items[1].id.clone();
    inputs = apply(
        &inputs,
        InputAction::UpdateSubItem {
            category_id: "land".into(),
            item_id: "l1".into(),
            sub_item_id: sub_id,
            field: SubItemField::Amount(2_000_000_000.0),
        },
    );

    let l1 = inputs.require_item("land", "l1").unwrap();
    let sum: f64 = l1.sub_items.iter().map(|s| s.amount).sum();
    assert_eq!(l1.amount, sum);
    assert_eq!(l1.amount, 3_000_000_000.0);
    assert_eq!(l1.basis, CalculationBasis::Fixed);

    let before_item = valueon_core::resolve_item_amount(
        &l1_before,
        &default_inputs().project_target,
        &default_inputs().unit_allocations,
    );
    let after_item =
        valueon_core::resolve_item_amount(l1, &inputs.project_target, &inputs.unit_allocations);
    let result = analyze(&inputs);
    assert!(relative_eq(
        result.total_project_cost,
        base.total_project_cost - before_item + after_item
    ));
}

/// Count edits and total changes never change a unit type's total.
#[test]
fn test_redistribution_conserves_type_totals() {
    let type_sum = |inputs: &AnalysisInputs, unit_type_id: &str| -> u32 {
        inputs
            .unit_allocations
            .iter()
            .filter(|a| a.unit_type_id == unit_type_id)
            .map(|a| a.count)
            .sum()
    };

    // declare the current totals first so count-linking is active
    let mut inputs = default_inputs();
    for (id, total) in [("u1", 100), ("u2", 154)] {
        inputs = apply(
            &inputs,
            InputAction::SetUnitTypeTotalUnits { unit_type_id: id.into(), total },
        );
    }

    for (id, count) in [("a1", 70), ("a3", 5), ("a5", 0), ("a2", 100), ("a4", 10)] {
        inputs = apply(
            &inputs,
            InputAction::SetAllocationCount { allocation_id: id.into(), count },
        );
        assert_eq!(type_sum(&inputs, "u1"), 100);
        assert_eq!(type_sum(&inputs, "u2"), 154);
    }

    for total in [31, 200, 1] {
        inputs = apply(
            &inputs,
            InputAction::SetUnitTypeTotalUnits { unit_type_id: "u2".into(), total },
        );
        assert_eq!(type_sum(&inputs, "u2"), total);
    }
    assert!(InputValidator::validate_allocations(&inputs).is_clean());
}

/// Analysis is a pure function of its inputs.
#[test]
fn test_analysis_is_deterministic() {
    let inputs = default_inputs();
    assert_eq!(analyze(&inputs), analyze(&inputs));
}

/// Tier statistics account for the whole revenue.
#[test]
fn test_tier_stats_cover_total_revenue() {
    let inputs = default_inputs();
    let result = analyze(&inputs);
    let rows = tier_stats(&inputs.unit_types, &inputs.unit_allocations, &result.unit_pricing);

    let revenue: f64 = rows.iter().map(|r| r.revenue).sum();
    assert!(relative_eq(revenue, result.total_revenue));
    let first = rows.iter().find(|r| r.group.label() == "1차 조합원").unwrap();
    assert_eq!(first.count, 130);
}

/// Snapshots survive a trip through a file in either format.
#[test]
fn test_snapshot_file_round_trip() {
    let temp = tempdir().unwrap();
    let inputs = apply(
        &default_inputs(),
        InputAction::SetItemBasis {
            category_id: "general".into(),
            item_id: "g5".into(),
            basis: CalculationBasis::ManualArea(120.0),
        },
    );

    for (name, format) in [("inputs.json", DocumentFormat::Json), ("inputs.yaml", DocumentFormat::Yaml)] {
        let path = temp.path().join(name);
        fs::write(&path, InputReader::to_string(&inputs, format).unwrap()).unwrap();
        let loaded = InputReader::read_file(&path).unwrap();
        assert_eq!(loaded, inputs);
        assert_eq!(analyze(&loaded), analyze(&inputs));
    }
}

/// Loosely typed documents from the browser client still analyze.
#[test]
fn test_loose_json_document() {
    let content = r#"{
        "projectTarget": {"totalLandArea": "100", "totalFloorArea": "", "totalHouseholds": null},
        "advancedCategories": [{
            "id": "c", "title": "Costs",
            "items": [{"id": "i", "name": "Lump", "amount": "1억 5,000만", "calculationBasis": "fixed"}]
        }],
        "unitTypes": [{"id": "u1", "name": "Small", "supplyArea": 10}],
        "unitAllocations": [{"id": "a1", "unitTypeId": "u1", "tier": "1st", "count": "3"}]
    }"#;
    let inputs = InputReader::from_str(content, DocumentFormat::Json).unwrap();
    let result = analyze(&inputs);

    assert_eq!(result.total_project_cost, 150_000_000.0);
    assert_eq!(result.cost_per_pyung, 0.0);
    assert_eq!(result.base_price_per_pyung, 5_000_000.0);
    assert_eq!(inputs.unit_allocations[0].tier, MemberTier::First);
    assert_eq!(format_korean_currency(result.total_revenue), "1억 5,000만");
}
