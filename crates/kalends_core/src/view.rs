//! View granularity machine and anchor stepping
//!
//! The calendar browses one period at a time at one of three
//! granularities. The anchor date is the period being browsed; it is
//! independent of the selected date and never bounds-checked.

use chrono::{Datelike, Months, NaiveDate};

use crate::fsm::StateMachine;

/// Number of cells in the year grid window.
pub const YEAR_WINDOW: usize = 12;

/// Years shown before the anchor year (the window is skewed: 6 back, 5
/// forward).
pub const YEARS_BACK: i32 = 6;

/// Calendar granularity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    /// Day grid (6x7 cells of a single month).
    #[default]
    Day,
    /// Month grid (12 months of a single year).
    Month,
    /// Year grid (12-year window).
    Year,
}

/// Events driving the view machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewEvent {
    /// Header title clicked: widen granularity.
    TitleClicked,
    /// A month/year cell activated: narrow granularity onto it.
    CellActivated,
}

/// Build the view machine.
///
/// Title clicks step `Day -> Month -> Year` and stop there: `Year` has no
/// `TitleClicked` edge, so further clicks are no-ops (no wrap back to
/// `Day`). Cell activation narrows `Month -> Day` and `Year -> Month`.
pub fn view_machine() -> StateMachine<ViewMode, ViewEvent> {
    StateMachine::builder(ViewMode::Day)
        .on(ViewMode::Day, ViewEvent::TitleClicked, ViewMode::Month)
        .on(ViewMode::Month, ViewEvent::TitleClicked, ViewMode::Year)
        .on(ViewMode::Month, ViewEvent::CellActivated, ViewMode::Day)
        .on(ViewMode::Year, ViewEvent::CellActivated, ViewMode::Month)
        .build()
}

/// First day of the anchor's month.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// January 1st of the anchor's year.
pub fn year_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date)
}

/// Shift the anchor one period backward for the given granularity.
///
/// One month in day view, one year in month view, twelve years in year
/// view (paging the visible 12-cell window). Saturates at the calendar's
/// representable range instead of failing.
pub fn prev_anchor(mode: ViewMode, anchor: NaiveDate) -> NaiveDate {
    let months = match mode {
        ViewMode::Day => 1,
        ViewMode::Month => 12,
        ViewMode::Year => 12 * YEAR_WINDOW as u32,
    };
    anchor.checked_sub_months(Months::new(months)).unwrap_or(anchor)
}

/// Shift the anchor one period forward for the given granularity.
pub fn next_anchor(mode: ViewMode, anchor: NaiveDate) -> NaiveDate {
    let months = match mode {
        ViewMode::Day => 1,
        ViewMode::Month => 12,
        ViewMode::Year => 12 * YEAR_WINDOW as u32,
    };
    anchor.checked_add_months(Months::new(months)).unwrap_or(anchor)
}
