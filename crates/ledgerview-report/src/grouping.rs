//! Utilities for shaping grouped aggregates.
//!
//! The month report builds its expense and category lists out of raw
//! [`GroupedTotal`] rows: key them by id (merging duplicates), optionally
//! merge two keyed maps, sort, and cut to the top entries. Expense lists
//! sort descending (largest spend first); category lists carry negative
//! amounts and sort most-negative-first. Both orderings put the largest
//! magnitude on top.

use ledgerview_core::GroupedTotal;
use std::collections::BTreeMap;

/// Key rows by id, summing the amounts of duplicate ids.
#[must_use]
pub fn key_by_id(rows: Vec<GroupedTotal>) -> BTreeMap<i64, GroupedTotal> {
    let mut keyed: BTreeMap<i64, GroupedTotal> = BTreeMap::new();
    for row in rows {
        keyed
            .entry(row.id)
            .and_modify(|existing| existing.amount += row.amount)
            .or_insert(row);
    }
    keyed
}

/// Merge two keyed maps, summing amounts where ids collide.
#[must_use]
pub fn merge(
    mut left: BTreeMap<i64, GroupedTotal>,
    right: BTreeMap<i64, GroupedTotal>,
) -> BTreeMap<i64, GroupedTotal> {
    for (id, row) in right {
        left.entry(id)
            .and_modify(|existing| existing.amount += row.amount)
            .or_insert(row);
    }
    left
}

/// Rows sorted by amount, largest first.
#[must_use]
pub fn sort_descending(keyed: BTreeMap<i64, GroupedTotal>) -> Vec<GroupedTotal> {
    let mut rows: Vec<GroupedTotal> = keyed.into_values().collect();
    rows.sort_by(|a, b| b.amount.cmp(&a.amount));
    rows
}

/// Rows sorted by amount, most negative first.
#[must_use]
pub fn sort_most_negative_first(keyed: BTreeMap<i64, GroupedTotal>) -> Vec<GroupedTotal> {
    let mut rows: Vec<GroupedTotal> = keyed.into_values().collect();
    rows.sort_by(|a, b| a.amount.cmp(&b.amount));
    rows
}

/// At most the first `limit` rows.
#[must_use]
pub fn limit(mut rows: Vec<GroupedTotal>, limit: usize) -> Vec<GroupedTotal> {
    rows.truncate(limit);
    rows
}
