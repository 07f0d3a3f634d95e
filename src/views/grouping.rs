//! Collapses same-series occurrences for compact transaction lists.
//!
//! Grouped rows only exist for display. Totals and summaries are always computed
//! from the ungrouped entries.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::ledger::{LedgerEntry, YearMonth};

use super::filter::TransactionFilter;

/// Several occurrences of one daily/weekly/fortnightly series within one month.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedRow {
    pub original_id: String,
    pub month: YearMonth,
    pub count: usize,
    pub total_amount: f64,
    pub members: Vec<LedgerEntry>,
}

impl GroupedRow {
    /// Member shown in place of the group (the earliest one in input order).
    pub fn representative(&self) -> &LedgerEntry {
        &self.members[0]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListRow {
    Single(LedgerEntry),
    Grouped(GroupedRow),
}

impl ListRow {
    pub fn entry(&self) -> &LedgerEntry {
        match self {
            Self::Single(entry) => entry,
            Self::Grouped(group) => group.representative(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.entry().date
    }

    pub fn amount(&self) -> f64 {
        match self {
            Self::Single(entry) => entry.amount,
            Self::Grouped(group) => group.total_amount,
        }
    }

    pub fn count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Grouped(group) => group.count,
        }
    }
}

type GroupKey = (String, YearMonth);

fn group_key(entry: &LedgerEntry) -> Option<GroupKey> {
    let original_id = entry.original_id.as_ref()?;
    let rule = entry.recurrence.as_ref()?;
    if !rule.kind.is_sub_monthly() {
        return None;
    }
    Some((original_id.clone(), YearMonth::of(entry.date)))
}

/// Replaces every group of two or more generated daily, weekly or fortnightly
/// occurrences sharing an origin and month with a single [`GroupedRow`] placed
/// where its first member was. Everything else passes through unchanged.
pub fn group_for_list(entries: Vec<LedgerEntry>) -> Vec<ListRow> {
    let mut sizes: HashMap<GroupKey, usize> = HashMap::new();
    for key in entries.iter().filter_map(group_key) {
        *sizes.entry(key).or_default() += 1;
    }

    let mut rows: Vec<ListRow> = Vec::with_capacity(entries.len());
    let mut slots: HashMap<GroupKey, usize> = HashMap::new();

    for entry in entries {
        let key = match group_key(&entry) {
            Some(key) if sizes.get(&key).copied().unwrap_or(0) > 1 => key,
            _ => {
                rows.push(ListRow::Single(entry));
                continue;
            }
        };

        if let Some(&index) = slots.get(&key) {
            if let ListRow::Grouped(group) = &mut rows[index] {
                group.count += 1;
                group.total_amount += entry.amount;
                group.members.push(entry);
            }
            continue;
        }

        slots.insert(key.clone(), rows.len());
        let (original_id, month) = key;
        rows.push(ListRow::Grouped(GroupedRow {
            original_id,
            month,
            count: 1,
            total_amount: entry.amount,
            members: vec![entry],
        }));
    }

    rows
}

/// Filter, group, order newest first, then truncate to `limit`.
pub fn build_list(
    entries: &[LedgerEntry],
    filter: &TransactionFilter,
    today: NaiveDate,
    limit: Option<usize>,
) -> Vec<ListRow> {
    let mut rows = group_for_list(filter.apply(entries, today));
    rows.sort_by(|a, b| b.date().cmp(&a.date()));
    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    rows
}
