//! Unit count redistribution across the tiers of one unit type.
//!
//! Two operations keep a unit type's allocations consistent with its total:
//! - [`link_count`] moves the delta of a single edit onto sibling tiers.
//! - [`rescale_allocations`] scales every tier when the type's total changes.

use std::cmp::Ordering;

use tracing::debug;

use crate::model::{MemberTier, UnitAllocation};

/// Split `new_total` into integer shares proportional to `weights`, where
/// `weights` were drawn from `old_total`.
///
/// Pass the weights' own sum as `old_total` for a plain proportional split,
/// or a declared total when the weights are counts out of it. Each share is
/// rounded independently and the rounding remainder goes to the largest
/// share (the last one on ties), so the result always sums to `new_total`.
/// With `old_total == 0` there are no proportions and the weights come back
/// unchanged.
pub fn redistribute_proportionally(new_total: u32, weights: &[u32], old_total: u64) -> Vec<u32> {
    if weights.is_empty() || old_total == 0 {
        return weights.to_vec();
    }

    let ratio = f64::from(new_total) / old_total as f64;
    let mut shares: Vec<u32> = weights
        .iter()
        .map(|w| (f64::from(*w) * ratio).round() as u32)
        .collect();

    let assigned: i64 = shares.iter().map(|s| i64::from(*s)).sum();
    let remainder = i64::from(new_total) - assigned;
    if remainder != 0 {
        if let Some(largest) = largest_index(&shares) {
            let patched = i64::from(shares[largest]) + remainder;
            shares[largest] = patched.clamp(0, i64::from(u32::MAX)) as u32;
        }
    }
    shares
}

fn largest_index(values: &[u32]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, u32)>, (i, v)| match best {
            Some((_, b)) if b > *v => best,
            _ => Some((i, *v)),
        })
        .map(|(i, _)| i)
}

/// Spread `delta` over `capacities` in order.
///
/// A negative delta is taken from each slot up to its current value before
/// moving on to the next; a positive delta lands entirely on the first slot.
/// Returns the per-slot adjustment and whatever could not be placed.
pub fn absorb_in_order(delta: i64, capacities: &[u32]) -> (Vec<i64>, i64) {
    let mut remaining = delta;
    let mut adjustments = vec![0i64; capacities.len()];

    for (slot, capacity) in capacities.iter().enumerate() {
        match remaining.cmp(&0) {
            Ordering::Equal => break,
            Ordering::Greater => {
                adjustments[slot] = remaining;
                remaining = 0;
            }
            Ordering::Less => {
                let take = (-remaining).min(i64::from(*capacity));
                adjustments[slot] = -take;
                remaining += take;
            }
        }
    }

    (adjustments, remaining)
}

/// Order in which sibling tiers absorb a count change: 2nd tier first.
fn absorb_priority(tier: MemberTier) -> u8 {
    match tier {
        MemberTier::Second => 0,
        MemberTier::First | MemberTier::General => 1,
    }
}

/// Set an allocation's count and shift the difference onto the other tiers of
/// the same unit type so the type's total stays constant.
///
/// Siblings give up units (or receive them) 2nd tier first, then General; a
/// sibling never drops below zero. Unknown ids leave the list unchanged.
pub fn link_count(allocations: &[UnitAllocation], allocation_id: &str, new_count: u32) -> Vec<UnitAllocation> {
    let Some(target) = allocations.iter().find(|a| a.id == allocation_id) else {
        return allocations.to_vec();
    };

    let diff = i64::from(new_count) - i64::from(target.count);
    if diff == 0 {
        return allocations.to_vec();
    }

    let mut siblings: Vec<usize> = allocations
        .iter()
        .enumerate()
        .filter(|(_, a)| a.unit_type_id == target.unit_type_id && a.tier != target.tier)
        .map(|(i, _)| i)
        .collect();
    siblings.sort_by_key(|i| absorb_priority(allocations[*i].tier));

    let capacities: Vec<u32> = siblings.iter().map(|i| allocations[*i].count).collect();
    let (adjustments, unplaced) = absorb_in_order(-diff, &capacities);
    if unplaced != 0 {
        debug!(
            "Count change on {} exceeds sibling capacity by {} units",
            allocation_id, -unplaced
        );
    }

    let mut updated = allocations.to_vec();
    for (slot, index) in siblings.iter().enumerate() {
        let count = i64::from(updated[*index].count) + adjustments[slot];
        updated[*index].count = count.clamp(0, i64::from(u32::MAX)) as u32;
    }
    if let Some(alloc) = updated.iter_mut().find(|a| a.id == allocation_id) {
        alloc.count = new_count;
    }
    updated
}

/// Rescale every allocation of `unit_type_id` from `old_total` to `new_total`
/// units, keeping the tier proportions.
///
/// With `old_total == 0` there are no proportions to keep and the allocations
/// are returned unchanged.
pub fn rescale_allocations(
    allocations: &[UnitAllocation],
    unit_type_id: &str,
    old_total: u32,
    new_total: u32,
) -> Vec<UnitAllocation> {
    if old_total == 0 || old_total == new_total {
        return allocations.to_vec();
    }

    let indices: Vec<usize> = allocations
        .iter()
        .enumerate()
        .filter(|(_, a)| a.unit_type_id == unit_type_id)
        .map(|(i, _)| i)
        .collect();
    if indices.is_empty() {
        return allocations.to_vec();
    }

    // Shares are relative to the type's declared total, not the current sum.
    let weights: Vec<u32> = indices.iter().map(|i| allocations[*i].count).collect();
    let counts = redistribute_proportionally(new_total, &weights, u64::from(old_total));

    let mut updated = allocations.to_vec();
    for (index, count) in indices.iter().zip(counts) {
        updated[*index].count = count;
    }
    debug!(
        "Rescaled {} allocations of {} from {} to {} units",
        indices.len(),
        unit_type_id,
        old_total,
        new_total
    );
    updated
}
