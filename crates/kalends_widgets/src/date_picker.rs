//! Single-date picker widget
//!
//! An input trigger plus a calendar popup. Clicking the input toggles the
//! popup; selecting an in-bounds day replaces the value, fires the change
//! callback once, and closes the popup. A "Today" quick action selects
//! the current date through the same bounds-checked path.

use chrono::NaiveDate;
use kalends_core::{
    CalendarConfig, CalendarError, CalendarEvent, CalendarState, DateFormatter, EnUsFormatter,
};

use crate::calendar_view::{calendar_view, CalendarView};
use crate::context::PickerContext;
use crate::widget::{PickerId, PickerWidget};

/// Date picker configuration
#[derive(Clone, Debug)]
pub struct DatePickerConfig {
    /// Earliest selectable date (inclusive)
    pub min_date: NaiveDate,
    /// Latest selectable date (inclusive)
    pub max_date: NaiveDate,
    /// Initially selected date
    pub value: NaiveDate,
    /// Input placeholder text
    pub placeholder: String,
    /// Fixed "today" for the Today quick action
    pub today: Option<NaiveDate>,
}

impl DatePickerConfig {
    /// Create a config with the default 1900..2100 bounds.
    pub fn new(value: NaiveDate) -> Self {
        let defaults = CalendarConfig::new(value);
        Self {
            min_date: defaults.min_date,
            max_date: defaults.max_date,
            value,
            placeholder: "Select date".to_string(),
            today: None,
        }
    }

    /// Set the earliest selectable date
    pub fn min_date(mut self, date: NaiveDate) -> Self {
        self.min_date = date;
        self
    }

    /// Set the latest selectable date
    pub fn max_date(mut self, date: NaiveDate) -> Self {
        self.max_date = date;
        self
    }

    /// Set the input placeholder
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Pin the Today quick action to a fixed date
    pub fn today(mut self, date: NaiveDate) -> Self {
        self.today = Some(date);
        self
    }

    fn calendar(&self) -> CalendarConfig {
        let mut config = CalendarConfig::new(self.value)
            .min_date(self.min_date)
            .max_date(self.max_date);
        if let Some(today) = self.today {
            config = config.today(today);
        }
        config
    }
}

/// Render-data for one rebuild of the date picker.
#[derive(Clone, Debug)]
pub struct DatePickerView {
    /// Formatted selected date for the readonly input.
    pub input_text: String,
    pub placeholder: String,
    /// Present while the popup is open.
    pub popup: Option<CalendarView>,
}

impl core::fmt::Debug for DatePicker {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DatePicker")
            .field("id", &self.id)
            .field("placeholder", &self.placeholder)
            .finish_non_exhaustive()
    }
}

/// Single-date picker widget
pub struct DatePicker {
    id: PickerId,
    placeholder: String,
    formatter: Box<dyn DateFormatter>,
}

impl DatePicker {
    /// Create a picker with default configuration
    pub fn new(ctx: &mut PickerContext, value: NaiveDate) -> Result<Self, CalendarError> {
        Self::with_config(ctx, DatePickerConfig::new(value))
    }

    /// Create a picker with custom config
    pub fn with_config(
        ctx: &mut PickerContext,
        config: DatePickerConfig,
    ) -> Result<Self, CalendarError> {
        let state = CalendarState::new(config.calendar())?;
        let id = ctx.register(state);

        Ok(Self {
            id,
            placeholder: config.placeholder,
            formatter: Box::new(EnUsFormatter),
        })
    }

    /// Get the widget ID
    pub fn id(&self) -> PickerId {
        self.id
    }

    /// Whether the popup is open
    pub fn is_open(&self, ctx: &PickerContext) -> bool {
        ctx.state(self.id).is_some_and(CalendarState::is_open)
    }

    /// The currently selected date
    pub fn selected(&self, ctx: &PickerContext) -> Option<NaiveDate> {
        ctx.state(self.id).and_then(CalendarState::selected_date)
    }

    /// Build the picker's render-data (pure)
    pub fn view(&self, ctx: &PickerContext) -> Option<DatePickerView> {
        let state = ctx.state(self.id)?;
        Some(DatePickerView {
            input_text: state
                .selected_date()
                .map(|d| self.formatter.format_date(d))
                .unwrap_or_default(),
            placeholder: self.placeholder.clone(),
            popup: state
                .is_open()
                .then(|| calendar_view(state, self.formatter.as_ref())),
        })
    }
}

impl PickerWidget for DatePicker {
    fn id(&self) -> PickerId {
        self.id
    }

    fn handle_event(
        &mut self,
        ctx: &mut PickerContext,
        event: CalendarEvent,
    ) -> Option<NaiveDate> {
        ctx.dispatch(self.id, event)
    }
}

/// Create a date picker builder
pub fn date_picker(value: NaiveDate) -> DatePickerBuilder {
    DatePickerBuilder {
        config: DatePickerConfig::new(value),
        formatter: None,
        on_change: None,
    }
}

/// Builder for creating date pickers
pub struct DatePickerBuilder {
    config: DatePickerConfig,
    formatter: Option<Box<dyn DateFormatter>>,
    on_change: Option<Box<dyn FnMut(NaiveDate) + Send>>,
}

impl DatePickerBuilder {
    /// Set the earliest selectable date
    pub fn min_date(mut self, date: NaiveDate) -> Self {
        self.config.min_date = date;
        self
    }

    /// Set the latest selectable date
    pub fn max_date(mut self, date: NaiveDate) -> Self {
        self.config.max_date = date;
        self
    }

    /// Set the input placeholder
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.config.placeholder = text.into();
        self
    }

    /// Pin the Today quick action to a fixed date
    pub fn today(mut self, date: NaiveDate) -> Self {
        self.config.today = Some(date);
        self
    }

    /// Replace the formatting collaborator
    pub fn formatter<F: DateFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Some(Box::new(formatter));
        self
    }

    /// Set the change callback, invoked once per accepted selection
    pub fn on_change<F: FnMut(NaiveDate) + Send + 'static>(mut self, callback: F) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Build the widget, registering its state machine
    pub fn build(self, ctx: &mut PickerContext) -> Result<DatePicker, CalendarError> {
        let mut state = CalendarState::new(self.config.calendar())?;
        if let Some(callback) = self.on_change {
            state.set_on_change(callback);
        }
        let id = ctx.register(state);

        Ok(DatePicker {
            id,
            placeholder: self.config.placeholder,
            formatter: self.formatter.unwrap_or_else(|| Box::new(EnUsFormatter)),
        })
    }
}
