//! Kalends widgets
//!
//! Picker widgets built on the [`kalends_core`] state machine: a single
//! date picker, a two-phase date-range picker, and a date-time picker.
//! Widgets are render-agnostic; each produces a plain view model per
//! rebuild and a host rendering layer draws it.
//!
//! State lives in a [`PickerContext`] keyed by [`PickerId`]; widgets hold
//! only their id, formatting collaborator, and callbacks.

pub mod calendar_view;
pub mod context;
pub mod date_picker;
pub mod datetime_picker;
pub mod range_picker;
pub mod widget;

pub use calendar_view::{
    calendar_view, CalendarBody, CalendarView, FooterAction, MonthCellView, YearCellView,
};
pub use context::PickerContext;
pub use date_picker::{date_picker, DatePicker, DatePickerBuilder, DatePickerConfig, DatePickerView};
pub use datetime_picker::{
    datetime_picker, DateTimePicker, DateTimePickerBuilder, DateTimePickerView,
};
pub use range_picker::{
    date_range_picker, DateRangePicker, DateRangePickerBuilder, DateRangePickerView,
};
pub use widget::{PickerId, PickerWidget};
