//! Pure view computations over an expanded ledger: filters, period summaries,
//! calendar and heatmap data, projections, and list grouping.

pub mod calendar;
pub mod context;
pub mod filter;
pub mod forecast;
pub mod grouping;
pub mod heatmap;
pub mod summary;

pub use calendar::{calendar_month, CalendarDay, CalendarMonth};
pub use context::{LedgerView, ViewContext};
pub use filter::{PeriodFilter, RecurrenceFilter, TransactionFilter, TypeFilter};
pub use forecast::{predict_month_end, upcoming, BalancePrediction};
pub use grouping::{build_list, group_for_list, GroupedRow, ListRow};
pub use heatmap::{year_heatmap, HeatmapDay, YearHeatmap};
pub use summary::{
    category_breakdown, day_summary, month_summary, percent_change, percent_change_signed,
    week_summary, year_overview, CategorySpend, DaySummary, MonthSummary, MonthTotals,
    PeriodChange, PeriodTotals, WeekSummary,
};
