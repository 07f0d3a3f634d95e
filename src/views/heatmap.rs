use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::ledger::LedgerEntry;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatmapDay {
    pub date: NaiveDate,
    pub expense: f64,
    /// `expense / max_daily_expense`, in `[0, 1]`.
    pub intensity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearHeatmap {
    pub year: i32,
    pub max_daily_expense: f64,
    pub days: Vec<HeatmapDay>,
}

impl YearHeatmap {
    pub fn day(&self, date: NaiveDate) -> Option<&HeatmapDay> {
        let index = date.ordinal0() as usize;
        self.days.get(index).filter(|day| day.date == date)
    }
}

/// Daily spending for every day of `year`, scaled against the busiest day.
pub fn year_heatmap(entries: &[LedgerEntry], year: i32) -> YearHeatmap {
    let mut spending: HashMap<NaiveDate, f64> = HashMap::new();
    for entry in entries {
        if entry.amount < 0.0 && entry.date.year() == year {
            *spending.entry(entry.date).or_default() += entry.amount.abs();
        }
    }

    let max_daily_expense = spending.values().copied().fold(0.0, f64::max);
    let denominator = if max_daily_expense > 0.0 {
        max_daily_expense
    } else {
        1.0
    };

    let days = NaiveDate::from_ymd_opt(year, 1, 1)
        .map(|first| {
            first
                .iter_days()
                .take_while(|day| day.year() == year)
                .map(|date| {
                    let expense = spending.get(&date).copied().unwrap_or(0.0);
                    HeatmapDay {
                        date,
                        expense,
                        intensity: expense / denominator,
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    YearHeatmap {
        year,
        max_daily_expense,
        days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::BaseTransaction;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(day: NaiveDate, amount: f64) -> LedgerEntry {
        LedgerEntry::from_base(&BaseTransaction::new(day, amount, "cat"))
    }

    #[test]
    fn intensity_is_relative_to_busiest_day() {
        let entries = vec![
            entry(date(2024, 2, 1), -40.0),
            entry(date(2024, 2, 1), -60.0),
            entry(date(2024, 5, 3), -25.0),
            entry(date(2024, 5, 3), 500.0),
            entry(date(2023, 5, 3), -900.0),
        ];
        let heatmap = year_heatmap(&entries, 2024);
        assert_eq!(heatmap.days.len(), 366);
        assert_eq!(heatmap.max_daily_expense, 100.0);
        assert_eq!(heatmap.day(date(2024, 2, 1)).unwrap().intensity, 1.0);
        assert_eq!(heatmap.day(date(2024, 5, 3)).unwrap().intensity, 0.25);
        assert_eq!(heatmap.day(date(2024, 5, 4)).unwrap().expense, 0.0);
    }

    #[test]
    fn year_without_expense_has_zero_intensity() {
        let entries = vec![entry(date(2023, 7, 1), 10.0)];
        let heatmap = year_heatmap(&entries, 2023);
        assert_eq!(heatmap.days.len(), 365);
        assert_eq!(heatmap.max_daily_expense, 0.0);
        assert!(heatmap.days.iter().all(|day| day.intensity == 0.0));
    }
}
