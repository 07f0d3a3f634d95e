use std::fmt::{self, Write as _};

use chrono::{Datelike, NaiveDate};
use colored::Colorize;

use crate::{
    ledger::{LedgerData, LedgerEntry},
    views::{
        BalancePrediction, CalendarMonth, CategorySpend, DaySummary, ListRow, MonthSummary,
        PeriodTotals, WeekSummary, YearHeatmap,
    },
};

const HEAT_LEVELS: [char; 5] = ['.', '░', '▒', '▓', '█'];
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Maps view results onto plain terminal text.
pub struct Renderer<'a> {
    currency: &'a str,
    data: &'a LedgerData,
}

impl<'a> Renderer<'a> {
    pub fn new(currency: &'a str, data: &'a LedgerData) -> Self {
        Self { currency, data }
    }

    pub fn header_text(&self, title: impl fmt::Display) -> String {
        format!("=== {} ===", title).bold().to_string()
    }

    pub fn money(&self, amount: f64) -> String {
        let text = format!("{:.2} {}", amount, self.currency);
        if amount > 0.0 {
            text.green().to_string()
        } else if amount < 0.0 {
            text.red().to_string()
        } else {
            text
        }
    }

    fn change(&self, percent: f64) -> String {
        format!("({:+.1}%)", percent).dimmed().to_string()
    }

    fn totals(&self, out: &mut String, totals: &PeriodTotals) {
        let _ = writeln!(out, "Income:   {}", self.money(totals.income));
        let _ = writeln!(out, "Expense:  {}", self.money(-totals.expense));
        let _ = writeln!(out, "Balance:  {}", self.money(totals.balance));
    }

    fn entry_line(&self, entry: &LedgerEntry) -> String {
        let category = self.data.category_or_placeholder(&entry.category_id);
        let marker = if entry.is_recurring() { " ↻" } else { "" };
        format!(
            "{}  {:<16} {:<24} {}{}",
            entry.date,
            category.name,
            entry.description.as_deref().unwrap_or("-"),
            self.money(entry.amount),
            marker
        )
    }

    pub fn month(&self, summary: &MonthSummary) -> String {
        let mut out = String::new();
        let title = format!(
            "{} {}",
            month_name(summary.month.month()),
            summary.month.year()
        );
        let _ = writeln!(out, "{}", self.header_text(title));
        let current = &summary.current;
        let change = &summary.change;
        let _ = writeln!(
            out,
            "Income:   {} {}",
            self.money(current.income),
            self.change(change.income)
        );
        let _ = writeln!(
            out,
            "Expense:  {} {}",
            self.money(-current.expense),
            self.change(change.expense)
        );
        let _ = writeln!(
            out,
            "Balance:  {} {}",
            self.money(current.balance),
            self.change(change.balance)
        );
        out
    }

    pub fn week(&self, summary: &WeekSummary) -> String {
        let mut out = String::new();
        let title = format!("Week {} to {}", summary.window.start, summary.window.end);
        let _ = writeln!(out, "{}", self.header_text(title));
        self.totals(&mut out, &summary.totals);
        out
    }

    pub fn day(&self, summary: &DaySummary) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.header_text(summary.date));
        for entry in &summary.entries {
            let _ = writeln!(out, "{}", self.entry_line(entry));
        }
        if summary.entries.is_empty() {
            let _ = writeln!(out, "No transactions.");
        }
        self.totals(&mut out, &summary.totals);
        out
    }

    pub fn calendar(&self, calendar: &CalendarMonth) -> String {
        let mut out = String::new();
        let title = format!(
            "{} {}",
            month_name(calendar.month.month()),
            calendar.month.year()
        );
        let _ = writeln!(out, "{}", self.header_text(title));
        let _ = writeln!(
            out,
            "{}",
            ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
                .map(|day| format!("{day:>10}"))
                .concat()
        );
        for week in &calendar.weeks {
            let mut days = String::new();
            let mut nets = String::new();
            for cell in week {
                let label = if cell.is_today {
                    format!("[{:>2}]", cell.date.day())
                } else {
                    format!("{:>2}", cell.date.day())
                };
                let label = format!("{label:>10}");
                if cell.in_month {
                    days.push_str(&label);
                } else {
                    days.push_str(&label.dimmed().to_string());
                }
                let net = if cell.totals.entries == 0 {
                    String::new()
                } else {
                    format!("{:+.0}", cell.totals.balance)
                };
                let _ = write!(nets, "{net:>10}");
            }
            let _ = writeln!(out, "{days}");
            let _ = writeln!(out, "{nets}");
        }
        self.totals(&mut out, &calendar.totals);
        out
    }

    pub fn heatmap(&self, heatmap: &YearHeatmap) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.header_text(format!("Spending {}", heatmap.year)));
        let mut month = 0;
        let mut line = String::new();
        for day in &heatmap.days {
            if day.date.month() != month {
                if !line.is_empty() {
                    let _ = writeln!(out, "{line}");
                }
                month = day.date.month();
                line = format!("{:<4}", &month_name(month)[..3]);
            }
            line.push(heat_char(day.intensity, day.expense));
        }
        if !line.is_empty() {
            let _ = writeln!(out, "{line}");
        }
        let _ = writeln!(
            out,
            "Busiest day: {}",
            self.money(-heatmap.max_daily_expense)
        );
        out
    }

    pub fn prediction(&self, prediction: &BalancePrediction) -> String {
        let mut out = String::new();
        let title = format!(
            "Forecast {} {}",
            month_name(prediction.month.month()),
            prediction.month.year()
        );
        let _ = writeln!(out, "{}", self.header_text(title));
        let _ = writeln!(out, "Balance so far:      {}", self.money(prediction.balance_so_far));
        let _ = writeln!(out, "Scheduled income:    {}", self.money(prediction.scheduled_income));
        let _ = writeln!(
            out,
            "Scheduled expense:   {}",
            self.money(-prediction.scheduled_expense)
        );
        let _ = writeln!(
            out,
            "Daily spending:      {} x {} days",
            self.money(-prediction.average_daily_expense),
            prediction.remaining_days
        );
        let _ = writeln!(
            out,
            "Predicted balance:   {}",
            self.money(prediction.predicted_balance)
        );
        out
    }

    pub fn list(&self, rows: &[ListRow]) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.header_text("Transactions"));
        for row in rows {
            match row {
                ListRow::Single(entry) => {
                    let _ = writeln!(out, "{}", self.entry_line(entry));
                }
                ListRow::Grouped(group) => {
                    let entry = group.representative();
                    let category = self.data.category_or_placeholder(&entry.category_id);
                    let _ = writeln!(
                        out,
                        "{}  {:<16} {:<24} {} ↻ x{}",
                        group.month,
                        category.name,
                        entry.description.as_deref().unwrap_or("-"),
                        self.money(group.total_amount),
                        group.count
                    );
                }
            }
        }
        if rows.is_empty() {
            let _ = writeln!(out, "No transactions.");
        }
        out
    }

    pub fn upcoming(&self, entries: &[LedgerEntry], days: u32) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.header_text(format!("Next {days} days")));
        for entry in entries {
            let _ = writeln!(out, "{}", self.entry_line(entry));
        }
        if entries.is_empty() {
            let _ = writeln!(out, "Nothing scheduled.");
        }
        out
    }

    pub fn categories(&self, title: impl fmt::Display, breakdown: &[CategorySpend]) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.header_text(title));
        for spend in breakdown {
            let _ = writeln!(
                out,
                "{:<20} {} {:>5.1}%",
                spend.category.name,
                self.money(-spend.total),
                spend.share
            );
        }
        if breakdown.is_empty() {
            let _ = writeln!(out, "No expenses.");
        }
        out
    }
}

pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("?")
}

fn heat_char(intensity: f64, expense: f64) -> char {
    if expense <= 0.0 {
        return HEAT_LEVELS[0];
    }
    let level = (intensity * 4.0).ceil().clamp(1.0, 4.0) as usize;
    HEAT_LEVELS[level]
}

/// Parses a `YYYY-MM-DD` argument.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{BaseTransaction, YearMonth};
    use crate::views::month_summary;

    #[test]
    fn month_render_shows_totals_and_changes() {
        colored::control::set_override(false);
        let data = LedgerData::new();
        let entries = vec![
            LedgerEntry::from_base(&BaseTransaction::new(
                NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(),
                -40.0,
                "x",
            )),
            LedgerEntry::from_base(&BaseTransaction::new(
                NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
                -50.0,
                "x",
            )),
        ];
        let summary = month_summary(&entries, YearMonth::new(2024, 3).unwrap());
        let text = Renderer::new("EUR", &data).month(&summary);
        assert!(text.contains("March 2024"));
        assert!(text.contains("-50.00 EUR"));
        assert!(text.contains("(+25.0%)"));
    }

    #[test]
    fn heat_levels_scale_with_intensity() {
        assert_eq!(heat_char(0.0, 0.0), '.');
        assert_eq!(heat_char(0.1, 5.0), '░');
        assert_eq!(heat_char(1.0, 50.0), '█');
    }

    #[test]
    fn month_names_are_one_based() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(13), "?");
    }
}
