//! Calendar interaction events
//!
//! The discrete intents a host delivers to a picker instance. Events are
//! applied synchronously, one at a time, in delivery order; each completes
//! atomically within one handling turn.

use chrono::NaiveDate;

/// A resolved interaction intent for one picker instance.
///
/// Cell clicks carry the resolved target (a date, a month number, a year)
/// rather than pointer coordinates; hit-testing belongs to the host
/// rendering layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalendarEvent {
    /// The input trigger was clicked: toggle popup visibility.
    InputClicked,
    /// The header's previous-period arrow was clicked.
    PrevClicked,
    /// The header's next-period arrow was clicked.
    NextClicked,
    /// The header title was clicked: step view granularity.
    TitleClicked,
    /// A day cell was clicked (day view only).
    DayClicked(NaiveDate),
    /// A month cell was clicked (month view only); months are 1-based.
    MonthClicked(u32),
    /// A year cell was clicked (year view only).
    YearClicked(i32),
    /// The "Today" quick action was clicked.
    TodayClicked,
    /// The "Clear" action was clicked (range pickers).
    ClearClicked,
    /// The confirm/apply button was clicked: close the popup.
    ConfirmClicked,
    /// The popup was dismissed (click-away, escape).
    DismissClicked,
}
