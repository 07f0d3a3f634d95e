use std::collections::HashSet;

use chrono::{Months, NaiveDate};

use super::transaction::{BaseTransaction, LedgerEntry, Recurrence};

/// Hard limit on occurrences generated for a single rule.
pub const MAX_OCCURRENCES_PER_RULE: usize = 500;
/// Forward horizon for rules without an end date.
pub const DEFAULT_HORIZON_YEARS: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct OccurrenceKey {
    date: NaiveDate,
    category_id: String,
    amount_bits: u64,
    original_id: String,
}

impl OccurrenceKey {
    fn new(base: &BaseTransaction, date: NaiveDate) -> Self {
        // -0.0 and 0.0 must collide
        let amount = if base.amount == 0.0 { 0.0 } else { base.amount };
        Self {
            date,
            category_id: base.category_id.clone(),
            amount_bits: amount.to_bits(),
            original_id: base.id.clone(),
        }
    }
}

/// Last day a rule may produce an occurrence on.
pub fn expansion_ceiling(rule: &Recurrence, today: NaiveDate) -> NaiveDate {
    rule.end_date.unwrap_or_else(|| default_horizon(today))
}

pub fn default_horizon(today: NaiveDate) -> NaiveDate {
    today
        .checked_add_months(Months::new(12 * DEFAULT_HORIZON_YEARS))
        .unwrap_or(NaiveDate::MAX)
}

/// Returns every stored transaction followed by the occurrences generated from
/// the recurring ones.
///
/// Occurrences fall strictly after their origin's date and never past the
/// rule's end date (or the default horizon when it has none). At most
/// [`MAX_OCCURRENCES_PER_RULE`] steps are taken per rule, and an occurrence
/// matching an already generated one on date, category, amount and origin is
/// skipped. Rules with an unrecognised cadence contribute nothing.
///
/// Month-based steps are measured from the stored date, not from the previous
/// occurrence: a series on Jan 31 yields Feb 29, Mar 31, Apr 30 rather than
/// settling on the 29th after February.
pub fn expand_transactions(transactions: &[BaseTransaction], today: NaiveDate) -> Vec<LedgerEntry> {
    let mut entries: Vec<LedgerEntry> = transactions.iter().map(LedgerEntry::from_base).collect();
    let mut seen = HashSet::new();

    for base in transactions {
        let Some(rule) = base.recurrence.as_ref() else {
            continue;
        };
        let generated = project_series(base, rule, today, &mut seen);
        entries.extend(generated);
    }

    entries
}

/// Occurrences of a single recurring transaction, without the transaction itself.
pub fn occurrences_of(base: &BaseTransaction, today: NaiveDate) -> Vec<LedgerEntry> {
    match base.recurrence.as_ref() {
        Some(rule) => project_series(base, rule, today, &mut HashSet::new()),
        None => Vec::new(),
    }
}

fn project_series(
    base: &BaseTransaction,
    rule: &Recurrence,
    today: NaiveDate,
    seen: &mut HashSet<OccurrenceKey>,
) -> Vec<LedgerEntry> {
    let Some(interval) = rule.kind.interval() else {
        tracing::debug!(
            transaction = %base.id,
            kind = rule.kind.as_str(),
            "skipping recurrence with unknown cadence"
        );
        return Vec::new();
    };

    let ceiling = expansion_ceiling(rule, today);
    let mut generated = Vec::new();
    let mut capped = true;

    for step in 1..=MAX_OCCURRENCES_PER_RULE as u32 {
        let Some(date) = interval.advance(base.date, step) else {
            capped = false;
            break;
        };
        if date > ceiling {
            capped = false;
            break;
        }
        if !seen.insert(OccurrenceKey::new(base, date)) {
            tracing::debug!(transaction = %base.id, %date, "duplicate occurrence skipped");
            continue;
        }
        generated.push(LedgerEntry::occurrence(base, date, step));
    }

    if capped {
        tracing::debug!(
            transaction = %base.id,
            limit = MAX_OCCURRENCES_PER_RULE,
            %ceiling,
            "recurrence truncated at occurrence limit"
        );
    }

    generated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::transaction::RecurrenceKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 6, 15)
    }

    fn recurring(id: &str, start: NaiveDate, rule: Recurrence) -> BaseTransaction {
        BaseTransaction::new(start, -10.0, "cat")
            .with_id(id)
            .with_recurrence(rule)
    }

    #[test]
    fn plain_transactions_pass_through() {
        let txn = BaseTransaction::new(date(2024, 1, 1), 5.0, "cat").with_id("one");
        let entries = expand_transactions(std::slice::from_ref(&txn), today());
        assert_eq!(entries, vec![LedgerEntry::from_base(&txn)]);
    }

    #[test]
    fn weekly_rule_stops_at_inclusive_end_date() {
        let rule = Recurrence::new(RecurrenceKind::Weekly).until(date(2024, 1, 29));
        let txn = recurring("w", date(2024, 1, 1), rule);
        let dates: Vec<_> = occurrences_of(&txn, today()).iter().map(|e| e.date).collect();
        assert_eq!(
            dates,
            vec![date(2024, 1, 8), date(2024, 1, 15), date(2024, 1, 22), date(2024, 1, 29)]
        );
    }

    #[test]
    fn bimonthly_label_steps_fourteen_days() {
        let rule = Recurrence::new(RecurrenceKind::parse("bimonthly")).until(date(2024, 2, 12));
        let txn = recurring("b", date(2024, 1, 1), rule);
        let dates: Vec<_> = occurrences_of(&txn, today()).iter().map(|e| e.date).collect();
        assert_eq!(
            dates,
            vec![date(2024, 1, 15), date(2024, 1, 29), date(2024, 2, 12)]
        );
    }

    #[test]
    fn quarterly_and_yearly_use_calendar_months() {
        let quarterly = recurring(
            "q",
            date(2024, 1, 31),
            Recurrence::new(RecurrenceKind::Quarterly).until(date(2024, 12, 31)),
        );
        let dates: Vec<_> = occurrences_of(&quarterly, today())
            .iter()
            .map(|e| e.date)
            .collect();
        assert_eq!(
            dates,
            vec![date(2024, 4, 30), date(2024, 7, 31), date(2024, 10, 31)]
        );

        let yearly = recurring(
            "y",
            date(2020, 3, 1),
            Recurrence::new(RecurrenceKind::Yearly).until(date(2023, 3, 1)),
        );
        assert_eq!(occurrences_of(&yearly, today()).len(), 3);
    }

    #[test]
    fn open_ended_rule_stops_at_default_horizon() {
        let txn = recurring("m", date(2024, 6, 15), Recurrence::new(RecurrenceKind::Monthly));
        let generated = occurrences_of(&txn, today());
        assert_eq!(generated.len(), 24);
        assert_eq!(generated.last().unwrap().date, date(2026, 6, 15));
    }

    #[test]
    fn end_date_before_start_generates_nothing() {
        let rule = Recurrence::new(RecurrenceKind::Daily).until(date(2023, 12, 31));
        let txn = recurring("d", date(2024, 1, 1), rule);
        assert!(occurrences_of(&txn, today()).is_empty());
    }

    #[test]
    fn unknown_cadence_keeps_base_entry_only() {
        let rule = Recurrence::new(RecurrenceKind::Unknown("hourly".into()));
        let txn = recurring("u", date(2024, 1, 1), rule);
        let entries = expand_transactions(&[txn], today());
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].is_generated());
    }

    #[test]
    fn duplicated_stored_rule_is_materialized_once() {
        let rule = Recurrence::new(RecurrenceKind::Monthly).until(date(2024, 4, 1));
        let txn = recurring("dup", date(2024, 1, 1), rule);
        let entries = expand_transactions(&[txn.clone(), txn], today());
        let generated: Vec<_> = entries.iter().filter(|e| e.is_generated()).collect();
        assert_eq!(generated.len(), 3);
        assert_eq!(entries.len(), 5);
    }

    #[test]
    fn daily_rule_is_capped() {
        let txn = recurring("cap", date(2024, 1, 1), Recurrence::new(RecurrenceKind::Daily));
        let generated = occurrences_of(&txn, today());
        assert_eq!(generated.len(), MAX_OCCURRENCES_PER_RULE);
        assert_eq!(generated[0].id, "cap-r1");
        assert_eq!(generated.last().unwrap().date, date(2025, 5, 15));
    }
}
