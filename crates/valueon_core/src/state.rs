//! Input snapshot updates.
//!
//! [`apply`] takes the current snapshot and an [`InputAction`] and returns the
//! next snapshot; the input is never mutated. Actions naming ids that do not
//! exist leave the snapshot unchanged.

use tracing::debug;
use uuid::Uuid;

use crate::defaults::default_inputs;
use crate::lenient::finite;
use crate::model::{
    AddedCosts, AnalysisInputs, CalculationBasis, CostCategory, CostItem, SubItem, VariableCosts,
};
use crate::redistribute::{link_count, rescale_allocations};

/// Numeric field of the project target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetField {
    TotalLandArea,
    TotalFloorArea,
    TotalHouseholds,
    PrivateLandArea,
    PublicLandArea,
}

/// Editable field of a sub-item.
#[derive(Debug, Clone, PartialEq)]
pub enum SubItemField {
    Name(String),
    Amount(f64),
}

/// Editable pricing field of an allocation. `None` clears the field.
#[derive(Debug, Clone, PartialEq)]
pub enum AllocationField {
    TargetPricePerPyung(Option<f64>),
    Premium(Option<f64>),
    FixedTotalPrice(Option<f64>),
    Note(Option<String>),
}

/// Every change a user can make to the input snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    SetTarget { field: TargetField, value: f64 },
    SetAdvancedMode(bool),
    SetAddedCosts(AddedCosts),
    SetVariableCosts(VariableCosts),
    SetInitialPayment(f64),

    AddCategory { title: String },
    RemoveCategory { category_id: String },
    RenameCategory { category_id: String, title: String },
    SetCategoryNote { category_id: String, note: String },
    /// Move `active_id` to the position currently held by `over_id`
    ReorderCategory { active_id: String, over_id: String },

    AddItem { category_id: String, name: String, amount: f64 },
    RemoveItem { category_id: String, item_id: String },
    RenameItem { category_id: String, item_id: String, name: String },
    SetItemAmount { category_id: String, item_id: String, amount: f64 },
    SetItemBasis { category_id: String, item_id: String, basis: CalculationBasis },
    SetItemRate { category_id: String, item_id: String, rate: f64 },
    SetItemNote { category_id: String, item_id: String, note: String },
    SetMixCondition { category_id: String, item_id: String, allocation_id: String, amount: f64 },
    ReorderItem { category_id: String, active_id: String, over_id: String },

    AddSubItem { category_id: String, item_id: String, name: String, amount: f64 },
    UpdateSubItem { category_id: String, item_id: String, sub_item_id: String, field: SubItemField },
    RemoveSubItem { category_id: String, item_id: String, sub_item_id: String },
    SetSubItemNote { category_id: String, item_id: String, sub_item_id: String, note: String },

    /// Count edit; linked to sibling tiers for non-rental types with a total
    SetAllocationCount { allocation_id: String, count: u32 },
    SetAllocationField { allocation_id: String, field: AllocationField },
    SetUnitTypeTotalUnits { unit_type_id: String, total: u32 },

    Reset,
}

/// Short random id for user-created entities.
pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()[..9].to_string()
}

/// Produce the snapshot that results from applying `action` to `inputs`.
pub fn apply(inputs: &AnalysisInputs, action: InputAction) -> AnalysisInputs {
    let mut next = inputs.clone();

    match action {
        InputAction::SetTarget { field, value } => {
            let value = finite(value);
            let target = &mut next.project_target;
            match field {
                TargetField::TotalLandArea => target.total_land_area = value,
                TargetField::TotalFloorArea => target.total_floor_area = value,
                TargetField::TotalHouseholds => target.total_households = value,
                TargetField::PrivateLandArea => target.private_land_area = Some(value),
                TargetField::PublicLandArea => target.public_land_area = Some(value),
            }
        }
        InputAction::SetAdvancedMode(enabled) => next.is_advanced_mode = enabled,
        InputAction::SetAddedCosts(costs) => next.added_costs = costs,
        InputAction::SetVariableCosts(costs) => next.variable_costs = costs,
        InputAction::SetInitialPayment(amount) => next.initial_payment = finite(amount),

        InputAction::AddCategory { title } => {
            next.advanced_categories.push(CostCategory::new(new_id(), title));
        }
        InputAction::RemoveCategory { category_id } => {
            next.advanced_categories.retain(|c| c.id != category_id);
        }
        InputAction::RenameCategory { category_id, title } => {
            with_category(&mut next, &category_id, |cat| cat.title = title);
        }
        InputAction::SetCategoryNote { category_id, note } => {
            with_category(&mut next, &category_id, |cat| cat.note = Some(note));
        }
        InputAction::ReorderCategory { active_id, over_id } => {
            move_by_id(&mut next.advanced_categories, |c| &c.id, &active_id, &over_id);
        }

        InputAction::AddItem { category_id, name, amount } => {
            with_category(&mut next, &category_id, |cat| {
                cat.items.push(CostItem::new(new_id(), name, finite(amount)));
            });
        }
        InputAction::RemoveItem { category_id, item_id } => {
            with_category(&mut next, &category_id, |cat| cat.items.retain(|i| i.id != item_id));
        }
        InputAction::RenameItem { category_id, item_id, name } => {
            with_item(&mut next, &category_id, &item_id, |item| item.name = name);
        }
        InputAction::SetItemAmount { category_id, item_id, amount } => {
            with_item(&mut next, &category_id, &item_id, |item| {
                if item.sub_items.is_empty() {
                    item.amount = finite(amount);
                } else {
                    debug!("Item {} amount is derived from its sub-items", item.id);
                }
            });
        }
        InputAction::SetItemBasis { category_id, item_id, basis } => {
            with_item(&mut next, &category_id, &item_id, |item| {
                if item.sub_items.is_empty() {
                    item.basis = basis;
                } else {
                    debug!("Item {} has sub-items; basis stays fixed", item.id);
                }
            });
        }
        InputAction::SetItemRate { category_id, item_id, rate } => {
            with_item(&mut next, &category_id, &item_id, |item| {
                item.application_rate = Some(finite(rate));
            });
        }
        InputAction::SetItemNote { category_id, item_id, note } => {
            with_item(&mut next, &category_id, &item_id, |item| item.note = Some(note));
        }
        InputAction::SetMixCondition { category_id, item_id, allocation_id, amount } => {
            with_item(&mut next, &category_id, &item_id, |item| match &mut item.basis {
                CalculationBasis::MixLinked(conditions) => {
                    conditions.insert(allocation_id, finite(amount));
                }
                _ => debug!("Item {} is not mix-linked; condition ignored", item.id),
            });
        }
        InputAction::ReorderItem { category_id, active_id, over_id } => {
            with_category(&mut next, &category_id, |cat| {
                move_by_id(&mut cat.items, |i| &i.id, &active_id, &over_id);
            });
        }

        InputAction::AddSubItem { category_id, item_id, name, amount } => {
            with_item(&mut next, &category_id, &item_id, |item| {
                item.sub_items.push(SubItem {
                    id: new_id(),
                    name,
                    amount: finite(amount),
                    note: None,
                });
                item.sync_sub_items();
            });
        }
        InputAction::UpdateSubItem { category_id, item_id, sub_item_id, field } => {
            with_item(&mut next, &category_id, &item_id, |item| {
                if let Some(sub) = item.sub_items.iter_mut().find(|s| s.id == sub_item_id) {
                    match field {
                        SubItemField::Name(name) => sub.name = name,
                        SubItemField::Amount(amount) => sub.amount = finite(amount),
                    }
                    item.sync_sub_items();
                }
            });
        }
        InputAction::RemoveSubItem { category_id, item_id, sub_item_id } => {
            with_item(&mut next, &category_id, &item_id, |item| {
                let before = item.sub_items.len();
                item.sub_items.retain(|s| s.id != sub_item_id);
                if item.sub_items.len() != before {
                    item.sync_sub_items();
                }
            });
        }
        InputAction::SetSubItemNote { category_id, item_id, sub_item_id, note } => {
            with_item(&mut next, &category_id, &item_id, |item| {
                if let Some(sub) = item.sub_items.iter_mut().find(|s| s.id == sub_item_id) {
                    sub.note = Some(note);
                }
            });
        }

        InputAction::SetAllocationCount { allocation_id, count } => {
            set_allocation_count(&mut next, &allocation_id, count);
        }
        InputAction::SetAllocationField { allocation_id, field } => {
            match next.unit_allocations.iter_mut().find(|a| a.id == allocation_id) {
                Some(alloc) => match field {
                    AllocationField::TargetPricePerPyung(v) => alloc.target_price_per_pyung = v.map(finite),
                    AllocationField::Premium(v) => alloc.premium = v.map(finite),
                    AllocationField::FixedTotalPrice(v) => alloc.fixed_total_price = v.map(finite),
                    AllocationField::Note(note) => alloc.note = note,
                },
                None => debug!("Allocation not found: {}", allocation_id),
            }
        }
        InputAction::SetUnitTypeTotalUnits { unit_type_id, total } => {
            set_unit_type_total(&mut next, &unit_type_id, total);
        }

        InputAction::Reset => next = default_inputs(),
    }

    next
}

fn set_allocation_count(inputs: &mut AnalysisInputs, allocation_id: &str, count: u32) {
    let Some(alloc) = inputs.allocation(allocation_id) else {
        debug!("Allocation not found: {}", allocation_id);
        return;
    };

    let linked = inputs
        .unit_type(&alloc.unit_type_id)
        .map(|unit| !unit.is_rental() && unit.total_units.unwrap_or(0) > 0)
        .unwrap_or(false);

    if linked {
        inputs.unit_allocations = link_count(&inputs.unit_allocations, allocation_id, count);
    } else if let Some(alloc) = inputs.unit_allocations.iter_mut().find(|a| a.id == allocation_id) {
        alloc.count = count;
    }
}

fn set_unit_type_total(inputs: &mut AnalysisInputs, unit_type_id: &str, total: u32) {
    let Some(unit) = inputs.unit_types.iter_mut().find(|u| u.id == unit_type_id) else {
        debug!("Unit type not found: {}", unit_type_id);
        return;
    };

    let old_total = unit.total_units.unwrap_or(0);
    unit.total_units = Some(total);
    inputs.unit_allocations = rescale_allocations(&inputs.unit_allocations, unit_type_id, old_total, total);
}

fn with_category(inputs: &mut AnalysisInputs, category_id: &str, f: impl FnOnce(&mut CostCategory)) {
    match inputs.advanced_categories.iter_mut().find(|c| c.id == category_id) {
        Some(category) => f(category),
        None => debug!("Cost category not found: {}", category_id),
    }
}

fn with_item(inputs: &mut AnalysisInputs, category_id: &str, item_id: &str, f: impl FnOnce(&mut CostItem)) {
    with_category(inputs, category_id, |cat| match cat.items.iter_mut().find(|i| i.id == item_id) {
        Some(item) => f(item),
        None => debug!("Cost item not found: {}/{}", category_id, item_id),
    });
}

fn move_by_id<T>(list: &mut Vec<T>, id_of: impl Fn(&T) -> &String, active_id: &str, over_id: &str) {
    let from = list.iter().position(|x| id_of(x) == active_id);
    let to = list.iter().position(|x| id_of(x) == over_id);
    if let (Some(from), Some(to)) = (from, to) {
        if from != to {
            let moved = list.remove(from);
            list.insert(to, moved);
        }
    }
}
