use chrono::NaiveDate;

use crate::ledger::{DateWindow, LedgerData, LedgerEntry, YearMonth};

use super::{
    calendar::{calendar_month, CalendarMonth},
    filter::{PeriodFilter, TransactionFilter},
    forecast::{predict_month_end, BalancePrediction},
    grouping::{build_list, ListRow},
    summary::{day_summary, month_summary, week_summary, DaySummary, MonthSummary, WeekSummary},
};

/// Everything a view needs besides the ledger itself: today's date, the day
/// the calendar is focused on, and the active filters. Passed by value so views
/// never reach for shared state.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewContext {
    pub today: NaiveDate,
    pub focus: NaiveDate,
    pub filter: TransactionFilter,
}

impl ViewContext {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            focus: today,
            filter: TransactionFilter::default(),
        }
    }

    pub fn with_focus(mut self, focus: NaiveDate) -> Self {
        self.focus = focus;
        self
    }

    pub fn with_filter(mut self, filter: TransactionFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn focus_month(&self) -> YearMonth {
        YearMonth::of(self.focus)
    }

    /// Context moved to the first day of the next (`steps > 0`) or previous month.
    pub fn shift_month(&self, steps: i32) -> Self {
        let mut month = self.focus_month();
        for _ in 0..steps.unsigned_abs() {
            month = if steps > 0 { month.next() } else { month.previous() };
        }
        self.clone().with_focus(month.first_day())
    }
}

/// Ledger snapshot expanded once for a [`ViewContext`] and queried by the views.
#[derive(Debug, Clone)]
pub struct LedgerView<'a> {
    data: &'a LedgerData,
    context: ViewContext,
    entries: Vec<LedgerEntry>,
}

impl<'a> LedgerView<'a> {
    pub fn new(data: &'a LedgerData, context: ViewContext) -> Self {
        let entries = data.expand(context.today);
        Self {
            data,
            context,
            entries,
        }
    }

    pub fn context(&self) -> &ViewContext {
        &self.context
    }

    pub fn data(&self) -> &LedgerData {
        self.data
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Entries passing the context's filters, ignoring its period dimension.
    pub fn filtered(&self) -> Vec<LedgerEntry> {
        let filter = TransactionFilter {
            period: PeriodFilter::Any,
            ..self.context.filter.clone()
        };
        filter.apply(&self.entries, self.context.today)
    }

    pub fn month_summary(&self) -> MonthSummary {
        month_summary(&self.filtered(), self.context.focus_month())
    }

    pub fn week_summary(&self) -> WeekSummary {
        let window = DateWindow::week_of(self.context.focus);
        let entries = self
            .context
            .filter
            .apply_detail(&self.entries, window, self.context.today);
        week_summary(&entries, self.context.focus)
    }

    pub fn day_summary(&self) -> DaySummary {
        let window = DateWindow::single_day(self.context.focus);
        let entries = self
            .context
            .filter
            .apply_detail(&self.entries, window, self.context.today);
        day_summary(&entries, self.context.focus)
    }

    pub fn calendar(&self) -> CalendarMonth {
        calendar_month(
            &self.filtered(),
            self.context.focus_month(),
            self.context.today,
        )
    }

    pub fn list(&self, limit: Option<usize>) -> Vec<ListRow> {
        build_list(
            &self.entries,
            &self.context.filter,
            self.context.today,
            limit,
        )
    }

    pub fn prediction(&self) -> BalancePrediction {
        predict_month_end(&self.data.transactions, &self.entries, self.context.today)
    }
}
