use std::collections::HashMap;

use chrono::NaiveDate;

use crate::ledger::{Category, DateWindow, LedgerEntry, YearMonth};

/// Income, expense and balance over a set of entries. Expense is reported as a
/// positive magnitude.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeriodTotals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
    pub entries: usize,
}

impl PeriodTotals {
    pub fn for_window(entries: &[LedgerEntry], window: &DateWindow) -> Self {
        Self::from_entries(entries.iter().filter(|entry| window.contains(entry.date)))
    }

    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a LedgerEntry>) -> Self {
        let mut totals = Self::default();
        for entry in entries {
            totals.record(entry.amount);
        }
        totals
    }

    pub fn record(&mut self, amount: f64) {
        if amount > 0.0 {
            self.income += amount;
        } else {
            self.expense += amount.abs();
        }
        self.balance = self.income - self.expense;
        self.entries += 1;
    }
}

/// Percentage change of each metric against the previous period.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeriodChange {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

impl PeriodChange {
    pub fn between(current: &PeriodTotals, previous: &PeriodTotals) -> Self {
        Self {
            income: percent_change(current.income, previous.income),
            expense: percent_change(current.expense, previous.expense),
            balance: percent_change_signed(current.balance, previous.balance),
        }
    }
}

/// `(current - previous) / previous * 100`, or 0 when there is nothing to compare against.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) / previous * 100.0
}

/// Like [`percent_change`] but relative to the magnitude of `previous`, so a
/// move from -100 to -50 reads as an improvement.
pub fn percent_change_signed(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) / previous.abs() * 100.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthSummary {
    pub month: YearMonth,
    pub current: PeriodTotals,
    pub previous: PeriodTotals,
    pub change: PeriodChange,
}

pub fn month_summary(entries: &[LedgerEntry], month: YearMonth) -> MonthSummary {
    let current = PeriodTotals::for_window(entries, &month.window());
    let previous = PeriodTotals::for_window(entries, &month.previous().window());
    MonthSummary {
        month,
        current,
        previous,
        change: PeriodChange::between(&current, &previous),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekSummary {
    pub window: DateWindow,
    pub totals: PeriodTotals,
}

/// Totals for the Monday-to-Sunday week containing `date`.
pub fn week_summary(entries: &[LedgerEntry], date: NaiveDate) -> WeekSummary {
    let window = DateWindow::week_of(date);
    WeekSummary {
        window,
        totals: PeriodTotals::for_window(entries, &window),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub totals: PeriodTotals,
    pub entries: Vec<LedgerEntry>,
}

pub fn day_summary(entries: &[LedgerEntry], date: NaiveDate) -> DaySummary {
    let mut day: Vec<LedgerEntry> = entries
        .iter()
        .filter(|entry| entry.date == date)
        .cloned()
        .collect();
    day.sort_by(|a, b| a.amount.total_cmp(&b.amount));
    DaySummary {
        date,
        totals: PeriodTotals::from_entries(&day),
        entries: day,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthTotals {
    pub month: YearMonth,
    pub totals: PeriodTotals,
}

/// One [`PeriodTotals`] per calendar month of `year`, January first.
pub fn year_overview(entries: &[LedgerEntry], year: i32) -> Vec<MonthTotals> {
    let mut totals: HashMap<u32, PeriodTotals> = HashMap::new();
    for entry in entries {
        let month = YearMonth::of(entry.date);
        if month.year() == year {
            totals.entry(month.month()).or_default().record(entry.amount);
        }
    }
    (1..=12)
        .filter_map(|month| YearMonth::new(year, month).ok())
        .map(|month| MonthTotals {
            month,
            totals: totals.get(&month.month()).copied().unwrap_or_default(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpend {
    pub category: Category,
    pub total: f64,
    /// Percentage of all expense in the window.
    pub share: f64,
    pub entries: usize,
}

/// Expense per category inside `window`, largest first. Entries whose category
/// no longer exists are reported under a placeholder.
pub fn category_breakdown(
    entries: &[LedgerEntry],
    window: &DateWindow,
    categories: &[Category],
) -> Vec<CategorySpend> {
    let mut spend: HashMap<&str, (f64, usize)> = HashMap::new();
    for entry in entries {
        if entry.is_income() || !window.contains(entry.date) {
            continue;
        }
        let slot = spend.entry(entry.category_id.as_str()).or_default();
        slot.0 += entry.amount.abs();
        slot.1 += 1;
    }

    let overall: f64 = spend.values().map(|(total, _)| total).sum();
    let mut breakdown: Vec<CategorySpend> = spend
        .into_iter()
        .map(|(id, (total, count))| CategorySpend {
            category: categories
                .iter()
                .find(|category| category.id == id)
                .cloned()
                .unwrap_or_else(|| Category::placeholder(id)),
            total,
            share: if overall > 0.0 {
                total / overall * 100.0
            } else {
                0.0
            },
            entries: count,
        })
        .collect();
    breakdown.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.category.name.cmp(&b.category.name))
    });
    breakdown
}
