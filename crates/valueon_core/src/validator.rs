//! Advisory input checks.
//!
//! Nothing here rejects input: every finding is a warning the user can act on
//! while the numbers keep rendering.

use std::collections::{BTreeMap, HashSet};

use crate::model::{AnalysisInputs, CalculationBasis};

/// Warnings produced by [`InputValidator`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ValidationReport {
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.warnings.extend(other.warnings);
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Validator for input snapshots.
pub struct InputValidator;

impl InputValidator {
    /// Run every check.
    pub fn validate(inputs: &AnalysisInputs) -> ValidationReport {
        let mut report = ValidationReport::new();
        report.merge(Self::validate_land_split(inputs));
        report.merge(Self::validate_allocations(inputs));
        report.merge(Self::validate_mix_conditions(inputs));
        report
    }

    /// Private and public land together should not exceed the site.
    pub fn validate_land_split(inputs: &AnalysisInputs) -> ValidationReport {
        let mut report = ValidationReport::new();
        let target = &inputs.project_target;

        let split = target.private_land_area.unwrap_or(0.0) + target.public_land_area.unwrap_or(0.0);
        if split > target.total_land_area {
            report.add_warning(format!(
                "Private + public land area ({}) exceeds total land area ({})",
                split, target.total_land_area
            ));
        }

        report
    }

    /// Allocations should reference known types, be unique per (type, tier)
    /// and add up to the type's declared total.
    pub fn validate_allocations(inputs: &AnalysisInputs) -> ValidationReport {
        let mut report = ValidationReport::new();
        let mut seen = HashSet::new();
        let mut sums: BTreeMap<&str, u64> = BTreeMap::new();
        let mut member_area = 0.0;

        for alloc in &inputs.unit_allocations {
            let Some(unit_type) = inputs.unit_type(&alloc.unit_type_id) else {
                report.add_warning(format!(
                    "Allocation '{}' references unknown unit type '{}'",
                    alloc.id, alloc.unit_type_id
                ));
                continue;
            };

            if !seen.insert((alloc.unit_type_id.as_str(), alloc.tier)) {
                report.add_warning(format!(
                    "Unit type '{}' has more than one {} tier allocation",
                    unit_type.name, alloc.tier
                ));
            }

            *sums.entry(unit_type.id.as_str()).or_insert(0) += u64::from(alloc.count);
            if alloc.tier.is_member() {
                member_area += f64::from(alloc.count) * unit_type.supply_area;
            }
        }

        for unit_type in &inputs.unit_types {
            let Some(total) = unit_type.total_units.filter(|t| *t > 0) else {
                continue;
            };
            let allocated = sums.get(unit_type.id.as_str()).copied().unwrap_or(0);
            if allocated != u64::from(total) {
                report.add_warning(format!(
                    "Unit type '{}' allocates {} units but declares {}",
                    unit_type.name, allocated, total
                ));
            }
        }

        if !inputs.unit_allocations.is_empty() && member_area <= 0.0 {
            report.add_warning("No 1st or 2nd tier member area; base price is fixed at 0");
        }

        report
    }

    /// Mix-linked items should only name existing allocations.
    pub fn validate_mix_conditions(inputs: &AnalysisInputs) -> ValidationReport {
        let mut report = ValidationReport::new();

        for category in &inputs.advanced_categories {
            for item in &category.items {
                if let CalculationBasis::MixLinked(conditions) = &item.basis {
                    for allocation_id in conditions.keys() {
                        if inputs.allocation(allocation_id).is_none() {
                            report.add_warning(format!(
                                "Cost item '{}' has a condition for unknown allocation '{}'",
                                item.name, allocation_id
                            ));
                        }
                    }
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_inputs;
    use crate::model::{CostItem, MemberTier, UnitAllocation};

    #[test]
    fn test_defaults_are_clean() {
        let report = InputValidator::validate(&default_inputs());
        assert!(report.is_clean(), "{:?}", report.warnings);
    }

    #[test]
    fn test_land_split_warning() {
        let mut inputs = default_inputs();
        inputs.project_target.private_land_area = Some(3_000.0);
        inputs.project_target.public_land_area = Some(1_000.0);
        let report = InputValidator::validate_land_split(&inputs);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_allocation_warnings() {
        let mut inputs = default_inputs();
        inputs.unit_types[0].total_units = Some(99);
        inputs
            .unit_allocations
            .push(UnitAllocation::new("dup", "u2", MemberTier::First, 1));
        inputs
            .unit_allocations
            .push(UnitAllocation::new("lost", "u9", MemberTier::General, 1));

        let report = InputValidator::validate_allocations(&inputs);
        assert_eq!(report.warnings.len(), 3, "{:?}", report.warnings);
    }

    #[test]
    fn test_mix_condition_warning() {
        let mut inputs = default_inputs();
        let mut conditions = std::collections::BTreeMap::new();
        conditions.insert("a1".to_string(), 10.0);
        conditions.insert("gone".to_string(), 10.0);
        inputs.advanced_categories[0]
            .items
            .push(CostItem::new("m1", "Move-in", 0.0).with_basis(CalculationBasis::MixLinked(conditions)));

        let report = InputValidator::validate_mix_conditions(&inputs);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_huge_counts_do_not_overflow() {
        let mut inputs = default_inputs();
        inputs.unit_types[0].total_units = Some(u32::MAX);
        for alloc in inputs.unit_allocations.iter_mut().filter(|a| a.unit_type_id == "u1") {
            alloc.count = u32::MAX;
        }

        let report = InputValidator::validate_allocations(&inputs);
        assert_eq!(report.warnings.len(), 1, "{:?}", report.warnings);
        assert!(report.warnings[0].contains(&(3 * u64::from(u32::MAX)).to_string()));
    }
}
