//! Date-time picker widget
//!
//! A single-date calendar plus a time-of-day field. The calendar half is
//! the same machine the date picker uses; the time half lives in the
//! widget and recombines with the selected date into a `NaiveDateTime`
//! for every change notification.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use kalends_core::{
    CalendarConfig, CalendarError, CalendarEvent, CalendarState, DateFormatter, EnUsFormatter,
    SelectOutcome,
};

use crate::calendar_view::{calendar_view, CalendarView};
use crate::context::PickerContext;
use crate::widget::{PickerId, PickerWidget};

/// Change callback, invoked once per accepted date or time change.
pub type DateTimeCallback = Box<dyn FnMut(NaiveDateTime) + Send>;

fn midnight() -> NaiveTime {
    NaiveTime::from_hms_opt(0, 0, 0).unwrap_or_default()
}

// Seconds are not part of the picker's granularity.
fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or_else(midnight)
}

/// Render-data for one rebuild of the date-time picker.
#[derive(Clone, Debug)]
pub struct DateTimePickerView {
    /// Formatted date and time for the readonly input.
    pub input_text: String,
    /// Formatted time for the time field.
    pub time_text: String,
    pub placeholder: String,
    /// Present while the popup is open.
    pub popup: Option<CalendarView>,
}

/// Date-time picker widget
pub struct DateTimePicker {
    id: PickerId,
    time: NaiveTime,
    now_override: Option<NaiveDateTime>,
    placeholder: String,
    formatter: Box<dyn DateFormatter>,
    on_change: Option<DateTimeCallback>,
}

impl DateTimePicker {
    /// Get the widget ID
    pub fn id(&self) -> PickerId {
        self.id
    }

    /// Whether the popup is open
    pub fn is_open(&self, ctx: &PickerContext) -> bool {
        ctx.state(self.id).is_some_and(CalendarState::is_open)
    }

    /// The selected time of day
    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// The combined selected date and time
    pub fn selected(&self, ctx: &PickerContext) -> Option<NaiveDateTime> {
        let date = ctx.state(self.id).and_then(CalendarState::selected_date)?;
        Some(NaiveDateTime::new(date, self.time))
    }

    fn notify(&mut self, date: NaiveDate) {
        if let Some(callback) = self.on_change.as_mut() {
            callback(NaiveDateTime::new(date, self.time));
        }
    }

    /// Replace the time of day, keeping the selected date.
    ///
    /// Fires the change callback with the recombined value when a date is
    /// selected. Seconds are truncated.
    pub fn set_time(&mut self, ctx: &PickerContext, time: NaiveTime) {
        self.time = truncate_to_minute(time);
        if let Some(date) = ctx.state(self.id).and_then(CalendarState::selected_date) {
            self.notify(date);
        }
    }

    /// Select the current wall-clock date and time.
    ///
    /// The date goes through the same bounds check as any click; when it
    /// is out of bounds neither the date nor the time changes.
    pub fn set_now(&mut self, ctx: &mut PickerContext) -> Option<NaiveDateTime> {
        let now = self
            .now_override
            .unwrap_or_else(|| Local::now().naive_local());
        let state = ctx.state_mut(self.id)?;
        match state.select_date(now.date()) {
            SelectOutcome::Accepted { .. } => {
                self.time = truncate_to_minute(now.time());
                self.notify(now.date());
                Some(NaiveDateTime::new(now.date(), self.time))
            }
            SelectOutcome::Rejected => None,
        }
    }

    /// Build the picker's render-data (pure)
    pub fn view(&self, ctx: &PickerContext) -> Option<DateTimePickerView> {
        let state = ctx.state(self.id)?;
        Some(DateTimePickerView {
            input_text: state
                .selected_date()
                .map(|d| {
                    self.formatter
                        .format_datetime(NaiveDateTime::new(d, self.time))
                })
                .unwrap_or_default(),
            time_text: self.formatter.format_time(self.time),
            placeholder: self.placeholder.clone(),
            popup: state
                .is_open()
                .then(|| calendar_view(state, self.formatter.as_ref())),
        })
    }
}

impl PickerWidget for DateTimePicker {
    fn id(&self) -> PickerId {
        self.id
    }

    fn handle_event(
        &mut self,
        ctx: &mut PickerContext,
        event: CalendarEvent,
    ) -> Option<NaiveDate> {
        let accepted = ctx.dispatch(self.id, event)?;
        self.notify(accepted);
        Some(accepted)
    }
}

/// Create a date-time picker builder
pub fn datetime_picker(value: NaiveDateTime) -> DateTimePickerBuilder {
    DateTimePickerBuilder {
        config: CalendarConfig::new(value.date()),
        time: truncate_to_minute(value.time()),
        now_override: None,
        placeholder: "Select date and time".to_string(),
        formatter: None,
        on_change: None,
    }
}

/// Builder for creating date-time pickers
pub struct DateTimePickerBuilder {
    config: CalendarConfig,
    time: NaiveTime,
    now_override: Option<NaiveDateTime>,
    placeholder: String,
    formatter: Option<Box<dyn DateFormatter>>,
    on_change: Option<DateTimeCallback>,
}

impl DateTimePickerBuilder {
    /// Set the earliest selectable date
    pub fn min_date(mut self, date: NaiveDate) -> Self {
        self.config = self.config.min_date(date);
        self
    }

    /// Set the latest selectable date
    pub fn max_date(mut self, date: NaiveDate) -> Self {
        self.config = self.config.max_date(date);
        self
    }

    /// Set the input placeholder
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Pin the Now quick action to a fixed instant
    pub fn now(mut self, now: NaiveDateTime) -> Self {
        self.now_override = Some(now);
        self.config = self.config.today(now.date());
        self
    }

    /// Replace the formatting collaborator
    pub fn formatter<F: DateFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Some(Box::new(formatter));
        self
    }

    /// Set the change callback, invoked once per accepted change
    pub fn on_change<F: FnMut(NaiveDateTime) + Send + 'static>(mut self, callback: F) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Build the widget, registering its state machine
    pub fn build(self, ctx: &mut PickerContext) -> Result<DateTimePicker, CalendarError> {
        let state = CalendarState::new(self.config)?;
        let id = ctx.register(state);

        Ok(DateTimePicker {
            id,
            time: self.time,
            now_override: self.now_override,
            placeholder: self.placeholder,
            formatter: self.formatter.unwrap_or_else(|| Box::new(EnUsFormatter)),
            on_change: self.on_change,
        })
    }
}
