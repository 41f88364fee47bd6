//! Formatting collaborator
//!
//! The calendar treats display formatting as an opaque external
//! collaborator behind the [`DateFormatter`] trait; hosts may plug in a
//! locale-aware implementation. [`EnUsFormatter`] is the built-in default.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};

/// Produces locale-formatted display strings for calendar render-data.
pub trait DateFormatter: Send + Sync {
    /// Input-field text for a selected date, e.g. "Mar 15, 2024".
    fn format_date(&self, date: NaiveDate) -> String;

    /// Input-field text for a selected date and time, e.g.
    /// "Mar 15, 2024 09:30".
    fn format_datetime(&self, datetime: NaiveDateTime) -> String;

    /// Time-field text, e.g. "09:30".
    fn format_time(&self, time: NaiveTime) -> String;

    /// Day-view header title, e.g. "March 2024".
    fn format_month_year(&self, date: NaiveDate) -> String;

    /// Year label, e.g. "2024".
    fn format_year(&self, year: i32) -> String;

    /// Short month-cell label for a 1-based month, e.g. "Mar".
    fn month_label(&self, month: u32) -> String;

    /// Short weekday label, e.g. "Sun".
    fn weekday_label(&self, weekday: Weekday) -> String;
}

const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// English (US) formatter backed by chrono's strftime.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnUsFormatter;

impl DateFormatter for EnUsFormatter {
    fn format_date(&self, date: NaiveDate) -> String {
        date.format("%b %d, %Y").to_string()
    }

    fn format_datetime(&self, datetime: NaiveDateTime) -> String {
        datetime.format("%b %d, %Y %H:%M").to_string()
    }

    fn format_time(&self, time: NaiveTime) -> String {
        time.format("%H:%M").to_string()
    }

    fn format_month_year(&self, date: NaiveDate) -> String {
        date.format("%B %Y").to_string()
    }

    fn format_year(&self, year: i32) -> String {
        year.to_string()
    }

    fn month_label(&self, month: u32) -> String {
        MONTHS_SHORT
            .get(month.saturating_sub(1) as usize)
            .copied()
            .unwrap_or("???")
            .to_string()
    }

    fn weekday_label(&self, weekday: Weekday) -> String {
        // chrono's Display is the short English name ("Sun", "Mon", ...)
        weekday.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_en_us_date() {
        let fmt = EnUsFormatter;
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(fmt.format_date(date), "Mar 05, 2024");
        assert_eq!(fmt.format_month_year(date), "March 2024");
        assert_eq!(fmt.format_year(2024), "2024");
    }

    #[test]
    fn test_en_us_time() {
        let fmt = EnUsFormatter;
        let time = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
        assert_eq!(fmt.format_time(time), "09:05");

        let dt = NaiveDateTime::new(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(), time);
        assert_eq!(fmt.format_datetime(dt), "Dec 31, 2024 09:05");
    }

    #[test]
    fn test_labels() {
        let fmt = EnUsFormatter;
        assert_eq!(fmt.month_label(1), "Jan");
        assert_eq!(fmt.month_label(12), "Dec");
        assert_eq!(fmt.weekday_label(Weekday::Sun), "Sun");
    }
}
