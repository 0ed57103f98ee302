//! Week arithmetic for planning reading sessions.
//!
//! Weeks run Monday through Sunday.

use chrono::{Datelike, Days, NaiveDate};

/// Key dates around a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekSummary {
    pub today: NaiveDate,
    pub tomorrow: NaiveDate,
    pub this_week_monday: NaiveDate,
    pub this_week_sunday: NaiveDate,
    pub next_week_monday: NaiveDate,
    pub next_week_sunday: NaiveDate,
    /// Days left until (and including) Sunday; 0 on a Sunday.
    pub days_until_sunday: u32,
}

impl WeekSummary {
    /// Compute the summary for `today`.
    #[must_use]
    pub fn for_date(today: NaiveDate) -> Self {
        let weekday = today.weekday().num_days_from_monday();

        let this_week_monday = today - Days::new(u64::from(weekday));
        let this_week_sunday = this_week_monday + Days::new(6);
        let next_week_monday = this_week_sunday + Days::new(1);
        let next_week_sunday = next_week_monday + Days::new(6);

        Self {
            today,
            tomorrow: today + Days::new(1),
            this_week_monday,
            this_week_sunday,
            next_week_monday,
            next_week_sunday,
            days_until_sunday: 6 - weekday,
        }
    }

    /// Compute the summary for the local current date.
    #[must_use]
    pub fn today() -> Self {
        Self::for_date(chrono::Local::now().date_naive())
    }
}
