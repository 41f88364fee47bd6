//! Date-range picker widget
//!
//! Two input fields (start, end) sharing one calendar popup. Selection is
//! two-phase: the first accepted date starts the range and the second
//! closes it, unless it precedes the start, in which case it restarts
//! the range. The popup stays open between the two phases and closes on
//! completion.

use chrono::NaiveDate;
use kalends_core::{
    CalendarConfig, CalendarError, CalendarEvent, CalendarState, DateFormatter, EnUsFormatter,
    RangePhase,
};

use crate::calendar_view::{calendar_view, CalendarView};
use crate::context::PickerContext;
use crate::widget::{PickerId, PickerWidget};

/// Completion callback, invoked once per completed range.
pub type RangeCallback = Box<dyn FnMut(NaiveDate, NaiveDate) + Send>;

/// Render-data for one rebuild of the range picker.
#[derive(Clone, Debug)]
pub struct DateRangePickerView {
    /// Formatted start date, if chosen.
    pub start_text: Option<String>,
    /// Formatted end date, if chosen.
    pub end_text: Option<String>,
    pub start_placeholder: String,
    pub end_placeholder: String,
    /// Which field the next accepted date fills.
    pub active: RangePhase,
    /// Present while the popup is open.
    pub popup: Option<CalendarView>,
}

/// Date-range picker widget
pub struct DateRangePicker {
    id: PickerId,
    start_placeholder: String,
    end_placeholder: String,
    formatter: Box<dyn DateFormatter>,
    on_complete: Option<RangeCallback>,
}

impl DateRangePicker {
    /// Get the widget ID
    pub fn id(&self) -> PickerId {
        self.id
    }

    /// Whether the popup is open
    pub fn is_open(&self, ctx: &PickerContext) -> bool {
        ctx.state(self.id).is_some_and(CalendarState::is_open)
    }

    /// The chosen `(start, end)` pair once the range is complete
    pub fn range(&self, ctx: &PickerContext) -> Option<(NaiveDate, NaiveDate)> {
        ctx.state(self.id)
            .and_then(CalendarState::range)
            .and_then(|r| r.completed())
    }

    /// Build the picker's render-data (pure)
    pub fn view(&self, ctx: &PickerContext) -> Option<DateRangePickerView> {
        let state = ctx.state(self.id)?;
        let range = state.range()?;
        Some(DateRangePickerView {
            start_text: range.start.map(|d| self.formatter.format_date(d)),
            end_text: range.end.map(|d| self.formatter.format_date(d)),
            start_placeholder: self.start_placeholder.clone(),
            end_placeholder: self.end_placeholder.clone(),
            active: range.phase,
            popup: state
                .is_open()
                .then(|| calendar_view(state, self.formatter.as_ref())),
        })
    }
}

impl PickerWidget for DateRangePicker {
    fn id(&self) -> PickerId {
        self.id
    }

    fn handle_event(
        &mut self,
        ctx: &mut PickerContext,
        event: CalendarEvent,
    ) -> Option<NaiveDate> {
        let accepted = ctx.dispatch(self.id, event)?;

        // The completing click's accepted date is the range end; earlier
        // clicks only move the start.
        let completed = ctx
            .state(self.id)
            .and_then(CalendarState::range)
            .and_then(|r| r.completed())
            .filter(|&(_, end)| end == accepted);
        if let Some((start, end)) = completed {
            if let Some(callback) = self.on_complete.as_mut() {
                callback(start, end);
            }
        }

        Some(accepted)
    }
}

/// Create a date-range picker builder; `anchor` is the initially browsed
/// month.
pub fn date_range_picker(anchor: NaiveDate) -> DateRangePickerBuilder {
    DateRangePickerBuilder {
        config: CalendarConfig::new(anchor).range(),
        start_placeholder: "Select start date".to_string(),
        end_placeholder: "Select end date".to_string(),
        formatter: None,
        on_change: None,
        on_complete: None,
    }
}

/// Builder for creating date-range pickers
pub struct DateRangePickerBuilder {
    config: CalendarConfig,
    start_placeholder: String,
    end_placeholder: String,
    formatter: Option<Box<dyn DateFormatter>>,
    on_change: Option<Box<dyn FnMut(NaiveDate) + Send>>,
    on_complete: Option<RangeCallback>,
}

impl DateRangePickerBuilder {
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

    /// Set the start-field placeholder
    pub fn start_placeholder(mut self, text: impl Into<String>) -> Self {
        self.start_placeholder = text.into();
        self
    }

    /// Set the end-field placeholder
    pub fn end_placeholder(mut self, text: impl Into<String>) -> Self {
        self.end_placeholder = text.into();
        self
    }

    /// Pin the Today quick action to a fixed date
    pub fn today(mut self, date: NaiveDate) -> Self {
        self.config = self.config.today(date);
        self
    }

    /// Replace the formatting collaborator
    pub fn formatter<F: DateFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Some(Box::new(formatter));
        self
    }

    /// Set the per-date change callback (fires for start and end alike)
    pub fn on_change<F: FnMut(NaiveDate) + Send + 'static>(mut self, callback: F) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Set the completion callback, invoked once per completed range
    pub fn on_complete<F: FnMut(NaiveDate, NaiveDate) + Send + 'static>(
        mut self,
        callback: F,
    ) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Build the widget, registering its state machine
    pub fn build(self, ctx: &mut PickerContext) -> Result<DateRangePicker, CalendarError> {
        let mut state = CalendarState::new(self.config)?;
        if let Some(callback) = self.on_change {
            state.set_on_change(callback);
        }
        let id = ctx.register(state);

        Ok(DateRangePicker {
            id,
            start_placeholder: self.start_placeholder,
            end_placeholder: self.end_placeholder,
            formatter: self.formatter.unwrap_or_else(|| Box::new(EnUsFormatter)),
            on_complete: self.on_complete,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn picker(ctx: &mut PickerContext) -> DateRangePicker {
        date_range_picker(ymd(2024, 3, 1))
            .min_date(ymd(2000, 1, 1))
            .max_date(ymd(2100, 12, 31))
            .build(ctx)
            .unwrap()
    }

    #[test]
    fn test_two_phase_selection() {
        let mut ctx = PickerContext::new();
        let mut picker = picker(&mut ctx);

        picker.handle_event(&mut ctx, CalendarEvent::InputClicked);
        picker.handle_event(&mut ctx, CalendarEvent::DayClicked(ymd(2024, 3, 10)));

        // Mid-range: popup stays open, end field still empty
        assert!(picker.is_open(&ctx));
        let view = picker.view(&ctx).unwrap();
        assert_eq!(view.start_text.as_deref(), Some("Mar 10, 2024"));
        assert_eq!(view.end_text, None);
        assert_eq!(view.active, RangePhase::End);

        picker.handle_event(&mut ctx, CalendarEvent::DayClicked(ymd(2024, 3, 20)));
        assert_eq!(picker.range(&ctx), Some((ymd(2024, 3, 10), ymd(2024, 3, 20))));
        assert!(!picker.is_open(&ctx));
    }

    #[test]
    fn test_completion_callback_fires_once() {
        let mut ctx = PickerContext::new();
        let completed = Arc::new(Mutex::new(Vec::new()));
        let completed_clone = completed.clone();

        let mut picker = date_range_picker(ymd(2024, 3, 1))
            .on_complete(move |s, e| completed_clone.lock().unwrap().push((s, e)))
            .build(&mut ctx)
            .unwrap();

        picker.handle_event(&mut ctx, CalendarEvent::DayClicked(ymd(2024, 3, 10)));
        assert!(completed.lock().unwrap().is_empty());

        // Reversal restarts instead of completing
        picker.handle_event(&mut ctx, CalendarEvent::DayClicked(ymd(2024, 3, 5)));
        assert!(completed.lock().unwrap().is_empty());

        picker.handle_event(&mut ctx, CalendarEvent::DayClicked(ymd(2024, 3, 25)));
        assert_eq!(
            *completed.lock().unwrap(),
            vec![(ymd(2024, 3, 5), ymd(2024, 3, 25))]
        );
    }

    #[test]
    fn test_clear_resets_fields() {
        let mut ctx = PickerContext::new();
        let mut picker = picker(&mut ctx);

        picker.handle_event(&mut ctx, CalendarEvent::DayClicked(ymd(2024, 3, 10)));
        picker.handle_event(&mut ctx, CalendarEvent::ClearClicked);

        let view = picker.view(&ctx).unwrap();
        assert_eq!(view.start_text, None);
        assert_eq!(view.end_text, None);
        assert_eq!(view.active, RangePhase::Start);
    }

    #[test]
    fn test_today_routed_through_bounds_check() {
        let mut ctx = PickerContext::new();
        let mut picker = date_range_picker(ymd(2024, 3, 1))
            .min_date(ymd(2024, 1, 1))
            .max_date(ymd(2024, 12, 31))
            .today(ymd(2025, 2, 1))
            .build(&mut ctx)
            .unwrap();

        // Out-of-bounds "today" is rejected like any other selection
        assert_eq!(picker.handle_event(&mut ctx, CalendarEvent::TodayClicked), None);
        let view = picker.view(&ctx).unwrap();
        assert_eq!(view.start_text, None);
    }
}
