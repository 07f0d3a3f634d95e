use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimeUnit {
    Day,
    Week,
    Month,
    Year,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeInterval {
    pub every: u32,
    pub unit: TimeUnit,
}

impl TimeInterval {
    pub const fn new(every: u32, unit: TimeUnit) -> Self {
        Self { every, unit }
    }

    /// Date reached after `steps` whole intervals from `anchor`.
    ///
    /// Month and year units are measured from the anchor rather than chained, so
    /// a day-of-month clamped by a short month (Jan 31 -> Feb 29) does not carry
    /// over into later steps. Returns `None` once chrono's date range is exceeded.
    pub fn advance(&self, anchor: NaiveDate, steps: u32) -> Option<NaiveDate> {
        let count = self.every.checked_mul(steps)?;
        match self.unit {
            TimeUnit::Day => anchor.checked_add_days(Days::new(u64::from(count))),
            TimeUnit::Week => anchor.checked_add_days(Days::new(u64::from(count) * 7)),
            TimeUnit::Month => anchor.checked_add_months(Months::new(count)),
            TimeUnit::Year => anchor.checked_add_months(Months::new(count.checked_mul(12)?)),
        }
    }

    pub fn next_date(&self, from: NaiveDate) -> Option<NaiveDate> {
        self.advance(from, 1)
    }

    pub fn label(&self) -> String {
        match (self.every, &self.unit) {
            (1, TimeUnit::Day) => "Daily".into(),
            (1, TimeUnit::Week) => "Weekly".into(),
            (2, TimeUnit::Week) => "Biweekly".into(),
            (1, TimeUnit::Month) => "Monthly".into(),
            (3, TimeUnit::Month) => "Quarterly".into(),
            (1, TimeUnit::Year) => "Yearly".into(),
            (n, unit) => format!("Every {} {:?}{}", n, unit, if n > 1 { "s" } else { "" }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn advance_counts_days_and_weeks() {
        let start = date(2025, 1, 1);
        let day = TimeInterval::new(1, TimeUnit::Day);
        assert_eq!(day.advance(start, 3), Some(date(2025, 1, 4)));

        let fortnight = TimeInterval::new(2, TimeUnit::Week);
        assert_eq!(fortnight.next_date(start), Some(date(2025, 1, 15)));
    }

    #[test]
    fn month_steps_clamp_without_drifting() {
        let anchor = date(2024, 1, 31);
        let monthly = TimeInterval::new(1, TimeUnit::Month);
        assert_eq!(monthly.advance(anchor, 1), Some(date(2024, 2, 29)));
        assert_eq!(monthly.advance(anchor, 2), Some(date(2024, 3, 31)));
        assert_eq!(monthly.advance(anchor, 3), Some(date(2024, 4, 30)));
    }

    #[test]
    fn leap_day_anniversary_falls_back_to_28th() {
        let yearly = TimeInterval::new(1, TimeUnit::Year);
        assert_eq!(yearly.advance(date(2024, 2, 29), 1), Some(date(2025, 2, 28)));
        assert_eq!(yearly.advance(date(2024, 2, 29), 4), Some(date(2028, 2, 29)));
    }

    #[test]
    fn advance_stops_at_calendar_limit() {
        let daily = TimeInterval::new(1, TimeUnit::Day);
        assert_eq!(daily.advance(NaiveDate::MAX, 1), None);
    }

    #[test]
    fn labels_cover_known_cadences() {
        assert_eq!(TimeInterval::new(2, TimeUnit::Week).label(), "Biweekly");
        assert_eq!(TimeInterval::new(3, TimeUnit::Month).label(), "Quarterly");
        assert_eq!(TimeInterval::new(5, TimeUnit::Day).label(), "Every 5 Days");
    }
}
