use chrono::{Datelike, Days, NaiveDate};

use crate::ledger::{BaseTransaction, DateWindow, LedgerEntry, RecurrenceKind, YearMonth};

use super::summary::PeriodTotals;

/// Month-end balance projection for the month containing `today`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalancePrediction {
    pub month: YearMonth,
    /// Balance of entries dated from the 1st through today.
    pub balance_so_far: f64,
    pub scheduled_income: f64,
    pub scheduled_expense: f64,
    pub average_daily_expense: f64,
    /// Days of the month after today.
    pub remaining_days: u32,
    pub predicted_balance: f64,
}

/// Projects the balance at the end of the current month.
///
/// Scheduled amounts come from stored monthly rules whose day of month is still
/// ahead of today, not from the expanded entries, so nothing already counted in
/// `balance_so_far` is counted twice. The daily spending rate only looks at
/// one-off expenses dated before today.
pub fn predict_month_end(
    transactions: &[BaseTransaction],
    entries: &[LedgerEntry],
    today: NaiveDate,
) -> BalancePrediction {
    let month = YearMonth::of(today);
    let so_far = DateWindow {
        start: month.first_day(),
        end: today,
    };
    let balance_so_far = PeriodTotals::for_window(entries, &so_far).balance;

    let (scheduled_income, scheduled_expense) = scheduled_monthly(transactions, month, today);

    let days_elapsed = today.day() - 1;
    let past_expense: f64 = entries
        .iter()
        .filter(|entry| !entry.is_recurring() && entry.is_expense())
        .filter(|entry| entry.date >= month.first_day() && entry.date < today)
        .map(|entry| entry.amount.abs())
        .sum();
    let average_daily_expense = if days_elapsed == 0 {
        0.0
    } else {
        past_expense / f64::from(days_elapsed)
    };

    let remaining_days = month.days_in_month() - today.day();
    let predicted_balance = balance_so_far + scheduled_income
        - scheduled_expense
        - average_daily_expense * f64::from(remaining_days);

    BalancePrediction {
        month,
        balance_so_far,
        scheduled_income,
        scheduled_expense,
        average_daily_expense,
        remaining_days,
        predicted_balance,
    }
}

fn scheduled_monthly(
    transactions: &[BaseTransaction],
    month: YearMonth,
    today: NaiveDate,
) -> (f64, f64) {
    let mut income = 0.0;
    let mut expense = 0.0;
    for txn in transactions {
        let Some(rule) = txn.recurrence.as_ref() else {
            continue;
        };
        if rule.kind != RecurrenceKind::Monthly {
            continue;
        }
        let due = month.clamp_day(txn.date.day());
        if due <= today || due < txn.date || !rule.allows(due) {
            continue;
        }
        if txn.amount > 0.0 {
            income += txn.amount;
        } else {
            expense += txn.amount.abs();
        }
    }
    (income, expense)
}

/// Recurring entries scheduled after `today` and at most `days` ahead, soonest first.
pub fn upcoming(entries: &[LedgerEntry], today: NaiveDate, days: u32) -> Vec<LedgerEntry> {
    let horizon = today
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX);
    let mut due: Vec<LedgerEntry> = entries
        .iter()
        .filter(|entry| entry.is_recurring() && entry.date > today && entry.date <= horizon)
        .cloned()
        .collect();
    due.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
    due
}
