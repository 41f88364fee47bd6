//! Kalends core
//!
//! The calendar navigation & selection state machine underlying the
//! Kalends picker family (single date, range, date + time):
//!
//! - **View machine**: day/month/year granularity with title-click
//!   widening and cell-click narrowing
//! - **Bounds**: inclusive `[min, max]` gating selection (never browsing)
//! - **Selection**: single date or two-phase range with an
//!   inverted-range-free invariant
//! - **Render-data**: pure producers for the 6x7 day grid, month grid,
//!   and floating 12-year window
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use kalends_core::{CalendarConfig, CalendarEvent, CalendarState};
//!
//! let value = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//! let mut calendar = CalendarState::new(CalendarConfig::new(value)).unwrap();
//!
//! calendar.handle_event(CalendarEvent::InputClicked);
//! assert!(calendar.is_open());
//!
//! let picked = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
//! calendar.handle_event(CalendarEvent::DayClicked(picked));
//! assert_eq!(calendar.selected_date(), Some(picked));
//! assert!(!calendar.is_open());
//! ```

pub mod bounds;
pub mod error;
pub mod event;
pub mod format;
pub mod fsm;
pub mod grid;
pub mod picker;
pub mod selection;
pub mod view;

pub use bounds::DateBounds;
pub use error::CalendarError;
pub use event::CalendarEvent;
pub use format::{DateFormatter, EnUsFormatter};
pub use grid::{DayCell, MonthCell, YearCell, DAY_GRID_LEN};
pub use picker::{
    CalendarConfig, CalendarState, PopupState, SelectOutcome, SelectionMode,
};
pub use selection::{RangeOutcome, RangePhase, RangeSelection, Selection};
pub use view::{ViewEvent, ViewMode};
