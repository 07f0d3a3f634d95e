use std::collections::HashMap;

use chrono::NaiveDate;

use crate::ledger::{DateWindow, LedgerEntry, YearMonth};

use super::summary::PeriodTotals;

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// False for the leading and trailing days borrowed from neighbouring months.
    pub in_month: bool,
    pub is_today: bool,
    pub totals: PeriodTotals,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarMonth {
    pub month: YearMonth,
    pub window: DateWindow,
    /// Whole Monday-first weeks covering the month.
    pub weeks: Vec<Vec<CalendarDay>>,
    pub totals: PeriodTotals,
}

impl CalendarMonth {
    pub fn day(&self, date: NaiveDate) -> Option<&CalendarDay> {
        self.weeks.iter().flatten().find(|day| day.date == date)
    }
}

pub fn calendar_month(
    entries: &[LedgerEntry],
    month: YearMonth,
    today: NaiveDate,
) -> CalendarMonth {
    let window = DateWindow {
        start: DateWindow::week_of(month.first_day()).start,
        end: DateWindow::week_of(month.last_day()).end,
    };

    let mut per_day: HashMap<NaiveDate, PeriodTotals> = HashMap::new();
    for entry in entries.iter().filter(|entry| window.contains(entry.date)) {
        per_day.entry(entry.date).or_default().record(entry.amount);
    }

    let cells: Vec<CalendarDay> = window
        .days()
        .map(|date| CalendarDay {
            date,
            in_month: month.contains(date),
            is_today: date == today,
            totals: per_day.get(&date).copied().unwrap_or_default(),
        })
        .collect();

    CalendarMonth {
        month,
        window,
        weeks: cells.chunks(7).map(|week| week.to_vec()).collect(),
        totals: PeriodTotals::for_window(entries, &month.window()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::BaseTransaction;
    use chrono::{Datelike, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn grid_pads_to_whole_weeks() {
        let entries = vec![
            LedgerEntry::from_base(&BaseTransaction::new(date(2024, 2, 26), -30.0, "x")),
            LedgerEntry::from_base(&BaseTransaction::new(date(2024, 3, 4), -10.0, "x")),
            LedgerEntry::from_base(&BaseTransaction::new(date(2024, 3, 4), 25.0, "x")),
        ];
        let calendar = calendar_month(&entries, YearMonth::new(2024, 3).unwrap(), date(2024, 3, 4));

        assert_eq!(calendar.window.start, date(2024, 2, 26));
        assert_eq!(calendar.window.end, date(2024, 3, 31));
        assert_eq!(calendar.weeks.len(), 5);
        assert!(calendar.weeks.iter().all(|week| week.len() == 7));
        assert!(calendar
            .weeks
            .iter()
            .all(|week| week[0].date.weekday() == Weekday::Mon));

        let padding = calendar.day(date(2024, 2, 26)).unwrap();
        assert!(!padding.in_month);
        assert_eq!(padding.totals.expense, 30.0);

        let busy = calendar.day(date(2024, 3, 4)).unwrap();
        assert!(busy.in_month && busy.is_today);
        assert_eq!(busy.totals.balance, 15.0);
        assert_eq!(calendar.totals.entries, 2);
    }
}
