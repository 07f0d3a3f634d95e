use chrono::NaiveDate;

use crate::ledger::{DateWindow, LedgerEntry, YearMonth};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    pub fn matches(&self, amount: f64) -> bool {
        match self {
            Self::All => true,
            Self::Income => amount > 0.0,
            Self::Expense => amount <= 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeriodFilter {
    #[default]
    Any,
    Month(YearMonth),
    Range(DateWindow),
}

impl PeriodFilter {
    pub fn matches(&self, date: NaiveDate) -> bool {
        match self {
            Self::Any => true,
            Self::Month(month) => month.contains(date),
            Self::Range(window) => window.contains(date),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecurrenceFilter {
    #[default]
    All,
    /// Has a rule or was generated by one; end dates are not consulted.
    Recurring,
    /// Has a rule that is open-ended or ends on or after today.
    Active,
    /// Has a rule whose end date is before today.
    Inactive,
}

impl RecurrenceFilter {
    pub fn matches(&self, entry: &LedgerEntry, today: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::Recurring => entry.is_recurring(),
            Self::Active => entry
                .recurrence
                .as_ref()
                .map_or(false, |rule| rule.is_active_on(today)),
            Self::Inactive => entry
                .recurrence
                .as_ref()
                .map_or(false, |rule| rule.has_ended_before(today)),
        }
    }
}

/// Conjunction of every active filter dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub kind: TypeFilter,
    pub category_id: Option<String>,
    pub period: PeriodFilter,
    pub recurrence: RecurrenceFilter,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: TypeFilter) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn with_period(mut self, period: PeriodFilter) -> Self {
        self.period = period;
        self
    }

    pub fn with_recurrence(mut self, recurrence: RecurrenceFilter) -> Self {
        self.recurrence = recurrence;
        self
    }

    /// Same type and category filters over `window`, ignoring recurrence status,
    /// so a day or week breakdown always shows everything scheduled in it.
    pub fn for_detail(&self, window: DateWindow) -> Self {
        Self {
            kind: self.kind,
            category_id: self.category_id.clone(),
            period: PeriodFilter::Range(window),
            recurrence: RecurrenceFilter::All,
        }
    }

    pub fn for_day(&self, date: NaiveDate) -> Self {
        self.for_detail(DateWindow::single_day(date))
    }

    pub fn for_week(&self, date: NaiveDate) -> Self {
        self.for_detail(DateWindow::week_of(date))
    }

    fn matches_category(&self, entry: &LedgerEntry) -> bool {
        match self.category_id.as_deref() {
            None | Some("") => true,
            Some(category_id) => entry.category_id == category_id,
        }
    }

    pub fn matches(&self, entry: &LedgerEntry, today: NaiveDate) -> bool {
        self.kind.matches(entry.amount)
            && self.matches_category(entry)
            && self.period.matches(entry.date)
            && self.recurrence.matches(entry, today)
    }

    pub fn apply(&self, entries: &[LedgerEntry], today: NaiveDate) -> Vec<LedgerEntry> {
        entries
            .iter()
            .filter(|entry| self.matches(entry, today))
            .cloned()
            .collect()
    }

    /// Entries inside `window` passing the type and category dimensions.
    pub fn apply_detail(
        &self,
        entries: &[LedgerEntry],
        window: DateWindow,
        today: NaiveDate,
    ) -> Vec<LedgerEntry> {
        self.for_detail(window).apply(entries, today)
    }
}
