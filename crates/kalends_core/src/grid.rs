//! Grid render-data producers
//!
//! Pure functions computing the complete grid of selectable cells for a
//! given anchor. No side effects; callable repeatedly for every rebuild.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::bounds::DateBounds;
use crate::view::{month_start, year_start, YEARS_BACK, YEAR_WINDOW};

/// The day grid is always a fixed 6x7 layout regardless of month length.
pub const DAY_GRID_LEN: usize = 42;

/// Days shown per week row.
pub const WEEK_LEN: usize = 7;

/// The week starts on Sunday.
pub const WEEK_START: Weekday = Weekday::Sun;

/// One cell of the day grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// Falls within the displayed month (leading/trailing cells don't).
    pub in_period: bool,
    pub selected: bool,
    pub disabled: bool,
}

/// One cell of the month grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthCell {
    /// 1-based month number.
    pub month: u32,
    /// First day of the month, the anchor used when the cell is activated.
    pub start: NaiveDate,
    /// Whether this is the anchor's month.
    pub current: bool,
}

/// One cell of the year grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct YearCell {
    pub year: i32,
    /// January 1st, the anchor used when the cell is activated.
    pub start: NaiveDate,
    /// Whether this is the anchor's year.
    pub current: bool,
}

/// Start of the week containing `date`.
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().days_since(WEEK_START);
    date.checked_sub_days(Days::new(back as u64)).unwrap_or(date)
}

/// Compute the 6-week day grid for the anchor's month.
///
/// Begins at the start-of-week of the start-of-month and always yields
/// exactly [`DAY_GRID_LEN`] cells. `is_selected` is supplied by the
/// selection state so single and range modes share the producer.
pub fn day_grid(
    anchor: NaiveDate,
    bounds: &DateBounds,
    is_selected: impl Fn(NaiveDate) -> bool,
) -> Vec<DayCell> {
    let first = week_start_of(month_start(anchor));
    first
        .iter_days()
        .take(DAY_GRID_LEN)
        .map(|date| DayCell {
            date,
            in_period: date.year() == anchor.year() && date.month() == anchor.month(),
            selected: is_selected(date),
            disabled: bounds.is_disabled(date),
        })
        .collect()
}

/// Compute the 12 month cells for the anchor's year.
pub fn month_grid(anchor: NaiveDate) -> Vec<MonthCell> {
    (1..=12)
        .filter_map(|month| {
            NaiveDate::from_ymd_opt(anchor.year(), month, 1).map(|start| MonthCell {
                month,
                start,
                current: month == anchor.month(),
            })
        })
        .collect()
}

/// Compute the 12 year cells for the anchor's window.
///
/// The window floats around the anchor year: [`YEARS_BACK`] years before
/// through 5 after, ascending.
pub fn year_grid(anchor: NaiveDate) -> Vec<YearCell> {
    let first = year_start(anchor).year() - YEARS_BACK;
    (0..YEAR_WINDOW as i32)
        .filter_map(|offset| {
            let year = first + offset;
            NaiveDate::from_ymd_opt(year, 1, 1).map(|start| YearCell {
                year,
                start,
                current: year == anchor.year(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn open_bounds() -> DateBounds {
        DateBounds::new(ymd(1900, 1, 1), ymd(2100, 12, 31)).unwrap()
    }

    #[test]
    fn test_day_grid_always_42_cells() {
        // Feb 2021: 28 days starting on a Monday (would fit 5 rows)
        let cells = day_grid(ymd(2021, 2, 10), &open_bounds(), |_| false);
        assert_eq!(cells.len(), DAY_GRID_LEN);

        // A 31-day month spilling into 6 rows
        let cells = day_grid(ymd(2024, 3, 1), &open_bounds(), |_| false);
        assert_eq!(cells.len(), DAY_GRID_LEN);
    }

    #[test]
    fn test_day_grid_starts_at_week_start() {
        // March 2024 starts on a Friday; the grid starts the preceding Sunday
        let cells = day_grid(ymd(2024, 3, 15), &open_bounds(), |_| false);
        assert_eq!(cells[0].date, ymd(2024, 2, 25));
        assert_eq!(cells[0].date.weekday(), WEEK_START);
        assert!(!cells[0].in_period);
    }

    #[test]
    fn test_day_grid_month_membership() {
        let cells = day_grid(ymd(2024, 3, 15), &open_bounds(), |_| false);
        // The 15th cell of any grid is inside week 3: always in the month
        assert!(cells[14].in_period);
        for cell in &cells {
            assert_eq!(
                cell.in_period,
                cell.date.year() == 2024 && cell.date.month() == 3
            );
        }
    }

    #[test]
    fn test_day_grid_flags() {
        let bounds = DateBounds::new(ymd(2024, 3, 10), ymd(2024, 3, 20)).unwrap();
        let selected = ymd(2024, 3, 12);
        let cells = day_grid(ymd(2024, 3, 1), &bounds, |d| d == selected);

        let cell = cells.iter().find(|c| c.date == selected).unwrap();
        assert!(cell.selected && !cell.disabled && cell.in_period);

        let out = cells.iter().find(|c| c.date == ymd(2024, 3, 9)).unwrap();
        assert!(out.disabled);
        assert_eq!(cells.iter().filter(|c| c.selected).count(), 1);
    }

    #[test]
    fn test_month_grid() {
        let cells = month_grid(ymd(2024, 3, 17));
        assert_eq!(cells.len(), 12);
        assert_eq!(cells[2].month, 3);
        assert_eq!(cells[2].start, ymd(2024, 3, 1));
        assert!(cells[2].current);
        assert_eq!(cells.iter().filter(|c| c.current).count(), 1);
    }

    #[test]
    fn test_year_grid_window() {
        let cells = year_grid(ymd(2024, 6, 15));
        assert_eq!(cells.len(), YEAR_WINDOW);
        assert_eq!(cells[0].year, 2018);
        assert_eq!(cells[11].year, 2029);
        assert!(cells.windows(2).all(|w| w[0].year + 1 == w[1].year));
        assert!(cells.iter().find(|c| c.year == 2024).unwrap().current);
    }

    #[test]
    fn test_week_start_of() {
        // 2024-03-15 is a Friday
        assert_eq!(week_start_of(ymd(2024, 3, 15)), ymd(2024, 3, 10));
        // A Sunday is its own week start
        assert_eq!(week_start_of(ymd(2024, 3, 10)), ymd(2024, 3, 10));
    }
}
