//! Calendar state machine
//!
//! One [`CalendarState`] per picker instance: the anchor being browsed,
//! the view granularity machine, popup visibility, the selection state,
//! and the bounds check gating selection. All transitions happen
//! synchronously in [`CalendarState::handle_event`]; there are no fatal
//! errors once the state is constructed — invalid interactions are
//! sanitized to no-ops.

use chrono::{Datelike, Local, NaiveDate};
use tracing::debug;

use crate::bounds::DateBounds;
use crate::error::CalendarError;
use crate::event::CalendarEvent;
use crate::format::DateFormatter;
use crate::fsm::StateMachine;
use crate::grid::{day_grid, month_grid, week_start_of, year_grid, DayCell, MonthCell, YearCell, WEEK_LEN};
use crate::selection::{RangeOutcome, RangeSelection, Selection};
use crate::view::{
    next_anchor, prev_anchor, view_machine, year_start, ViewEvent, ViewMode, YEARS_BACK,
    YEAR_WINDOW,
};

/// Popup visibility states.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PopupState {
    #[default]
    Closed,
    Open,
}

/// Events driving the popup machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopupEvent {
    Toggled,
    Dismissed,
}

fn popup_machine() -> StateMachine<PopupState, PopupEvent> {
    StateMachine::builder(PopupState::Closed)
        .on(PopupState::Closed, PopupEvent::Toggled, PopupState::Open)
        .on(PopupState::Open, PopupEvent::Toggled, PopupState::Closed)
        .on(PopupState::Open, PopupEvent::Dismissed, PopupState::Closed)
        .build()
}

/// Whether the picker selects one date or a range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionMode {
    #[default]
    Single,
    Range,
}

/// What a selection attempt did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Out of bounds: no state change, no change notification.
    Rejected,
    /// The date entered the selection state; `completed` means the
    /// selection gesture is finished and the popup was closed.
    Accepted { completed: bool },
}

fn default_min() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn default_max() -> NaiveDate {
    NaiveDate::from_ymd_opt(2100, 12, 31).unwrap_or(NaiveDate::MAX)
}

/// Configuration for one calendar instance.
#[derive(Clone, Copy, Debug)]
pub struct CalendarConfig {
    /// Earliest selectable date (inclusive).
    pub min_date: NaiveDate,
    /// Latest selectable date (inclusive).
    pub max_date: NaiveDate,
    /// Initial value: the selected date in single mode, the initial
    /// anchor in range mode.
    pub value: NaiveDate,
    /// Single date or two-phase range.
    pub mode: SelectionMode,
    /// Fixed "today" for the Today quick action (deterministic tests and
    /// snapshots); defaults to the wall clock.
    pub today: Option<NaiveDate>,
}

impl CalendarConfig {
    /// Create a config with the default 1900-01-01..2100-12-31 bounds.
    pub fn new(value: NaiveDate) -> Self {
        Self {
            min_date: default_min(),
            max_date: default_max(),
            value,
            mode: SelectionMode::Single,
            today: None,
        }
    }

    /// Set the earliest selectable date.
    pub fn min_date(mut self, date: NaiveDate) -> Self {
        self.min_date = date;
        self
    }

    /// Set the latest selectable date.
    pub fn max_date(mut self, date: NaiveDate) -> Self {
        self.max_date = date;
        self
    }

    /// Select a two-phase date range instead of a single date.
    pub fn range(mut self) -> Self {
        self.mode = SelectionMode::Range;
        self
    }

    /// Pin the Today quick action to a fixed date.
    pub fn today(mut self, date: NaiveDate) -> Self {
        self.today = Some(date);
        self
    }
}

/// Change notification callback, invoked exactly once per accepted date.
pub type ChangeCallback = Box<dyn FnMut(NaiveDate) + Send>;

/// The calendar navigation & selection state machine.
///
/// Created when a picker mounts, mutated only through [`handle_event`]
/// and the action methods, discarded on unmount. Exclusively owned by one
/// picker instance; no persistence across sessions.
///
/// [`handle_event`]: CalendarState::handle_event
pub struct CalendarState {
    bounds: DateBounds,
    anchor: NaiveDate,
    view: StateMachine<ViewMode, ViewEvent>,
    popup: StateMachine<PopupState, PopupEvent>,
    selection: Selection,
    today_override: Option<NaiveDate>,
    on_change: Option<ChangeCallback>,
}

impl core::fmt::Debug for CalendarState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CalendarState")
            .field("anchor", &self.anchor)
            .finish_non_exhaustive()
    }
}

impl CalendarState {
    /// Build the machine, validating the configuration.
    ///
    /// In single mode the initial value must satisfy the bounds — a
    /// malformed seed is rejected here so interaction handling can stay
    /// total. In range mode the value only seeds the anchor and is not
    /// checked (browsing is unrestricted).
    pub fn new(config: CalendarConfig) -> Result<Self, CalendarError> {
        let bounds = DateBounds::new(config.min_date, config.max_date)?;
        let selection = match config.mode {
            SelectionMode::Single => Selection::Single {
                selected: bounds.check(config.value)?,
            },
            SelectionMode::Range => Selection::Range(RangeSelection::new()),
        };

        Ok(Self {
            bounds,
            anchor: config.value,
            view: view_machine(),
            popup: popup_machine(),
            selection,
            today_override: config.today,
            on_change: None,
        })
    }

    /// Register the change notification callback.
    pub fn set_on_change<F: FnMut(NaiveDate) + Send + 'static>(&mut self, callback: F) {
        self.on_change = Some(Box::new(callback));
    }

    // =========================================================================
    // State snapshot
    // =========================================================================

    pub fn bounds(&self) -> &DateBounds {
        &self.bounds
    }

    /// The month/year currently being browsed (independent of selection).
    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view.current_state()
    }

    pub fn is_open(&self) -> bool {
        self.popup.is_in(PopupState::Open)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The selected date in single mode.
    pub fn selected_date(&self) -> Option<NaiveDate> {
        match self.selection {
            Selection::Single { selected } => Some(selected),
            Selection::Range(_) => None,
        }
    }

    /// The range selection state in range mode.
    pub fn range(&self) -> Option<&RangeSelection> {
        match &self.selection {
            Selection::Range(range) => Some(range),
            Selection::Single { .. } => None,
        }
    }

    /// `true` iff `date < min || date > max`.
    pub fn is_date_disabled(&self, date: NaiveDate) -> bool {
        self.bounds.is_disabled(date)
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Toggle popup visibility.
    pub fn toggle_popup(&mut self) {
        self.popup.send(PopupEvent::Toggled);
    }

    /// Move the browsed period without touching the selection.
    pub fn set_anchor(&mut self, anchor: NaiveDate) {
        self.anchor = anchor;
    }

    /// Attempt a selection; out-of-bounds dates are silently ignored.
    ///
    /// On acceptance the change notification fires exactly once and the
    /// popup closes when the gesture is complete (always in single mode;
    /// on range completion in range mode). Repeating a rejected selection
    /// has no cumulative effect.
    pub fn select_date(&mut self, date: NaiveDate) -> SelectOutcome {
        if self.bounds.is_disabled(date) {
            debug!(date = %date, "selection rejected: out of bounds");
            return SelectOutcome::Rejected;
        }

        let completed = match &mut self.selection {
            Selection::Single { selected } => {
                *selected = date;
                true
            }
            Selection::Range(range) => matches!(range.accept(date), RangeOutcome::Completed),
        };

        if let Some(callback) = self.on_change.as_mut() {
            callback(date);
        }
        if completed {
            self.popup.send(PopupEvent::Dismissed);
        }

        SelectOutcome::Accepted { completed }
    }

    fn today(&self) -> NaiveDate {
        self.today_override
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Apply one interaction event.
    ///
    /// Total: unknown or out-of-place events are no-ops. Returns the date
    /// this event caused to be accepted into the selection, if any.
    pub fn handle_event(&mut self, event: CalendarEvent) -> Option<NaiveDate> {
        match event {
            CalendarEvent::InputClicked => {
                self.popup.send(PopupEvent::Toggled);
                None
            }
            CalendarEvent::ConfirmClicked | CalendarEvent::DismissClicked => {
                self.popup.send(PopupEvent::Dismissed);
                None
            }
            CalendarEvent::PrevClicked => {
                self.anchor = prev_anchor(self.view_mode(), self.anchor);
                None
            }
            CalendarEvent::NextClicked => {
                self.anchor = next_anchor(self.view_mode(), self.anchor);
                None
            }
            CalendarEvent::TitleClicked => {
                let from = self.view_mode();
                let to = self.view.send(ViewEvent::TitleClicked);
                if from != to {
                    debug!(?from, ?to, "view mode widened");
                }
                None
            }
            CalendarEvent::DayClicked(date) => {
                if self.view.is_in(ViewMode::Day) {
                    match self.select_date(date) {
                        SelectOutcome::Accepted { .. } => Some(date),
                        SelectOutcome::Rejected => None,
                    }
                } else {
                    None
                }
            }
            CalendarEvent::MonthClicked(month) => {
                if self.view.is_in(ViewMode::Month) {
                    if let Some(start) = NaiveDate::from_ymd_opt(self.anchor.year(), month, 1) {
                        self.anchor = start;
                        self.view.send(ViewEvent::CellActivated);
                    }
                }
                None
            }
            CalendarEvent::YearClicked(year) => {
                if self.view.is_in(ViewMode::Year) {
                    if let Some(start) = NaiveDate::from_ymd_opt(year, 1, 1) {
                        self.anchor = start;
                        self.view.send(ViewEvent::CellActivated);
                    }
                }
                None
            }
            CalendarEvent::TodayClicked => {
                let today = self.today();
                match self.select_date(today) {
                    SelectOutcome::Accepted { .. } => Some(today),
                    SelectOutcome::Rejected => None,
                }
            }
            CalendarEvent::ClearClicked => {
                if let Selection::Range(range) = &mut self.selection {
                    range.clear();
                }
                None
            }
        }
    }

    // =========================================================================
    // Render-data producers (pure, callable repeatedly)
    // =========================================================================

    /// Header title for the current view.
    pub fn header_title(&self, fmt: &dyn DateFormatter) -> String {
        match self.view_mode() {
            ViewMode::Day => fmt.format_month_year(self.anchor),
            ViewMode::Month => fmt.format_year(self.anchor.year()),
            ViewMode::Year => {
                let first = year_start(self.anchor).year() - YEARS_BACK;
                format!(
                    "{} - {}",
                    fmt.format_year(first),
                    fmt.format_year(first + YEAR_WINDOW as i32 - 1)
                )
            }
        }
    }

    /// The seven weekday labels, starting at the week start.
    pub fn weekday_labels(&self, fmt: &dyn DateFormatter) -> Vec<String> {
        week_start_of(self.anchor)
            .iter_days()
            .take(WEEK_LEN)
            .map(|d| fmt.weekday_label(d.weekday()))
            .collect()
    }

    /// The 42-cell day grid for the anchor month.
    pub fn day_cells(&self) -> Vec<DayCell> {
        day_grid(self.anchor, &self.bounds, |d| self.selection.is_selected(d))
    }

    /// The 12 month cells for the anchor year.
    pub fn month_cells(&self) -> Vec<MonthCell> {
        month_grid(self.anchor)
    }

    /// The 12 year cells for the anchor window.
    pub fn year_cells(&self) -> Vec<YearCell> {
        year_grid(self.anchor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use crate::grid::DAY_GRID_LEN;
    use crate::selection::RangePhase;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn state(value: NaiveDate) -> CalendarState {
        CalendarState::new(
            CalendarConfig::new(value)
                .min_date(ymd(2000, 1, 1))
                .max_date(ymd(2100, 12, 31)),
        )
        .unwrap()
    }

    fn counting_callback(state: &mut CalendarState) -> Arc<Mutex<Vec<NaiveDate>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        state.set_on_change(move |date| {
            seen_clone.lock().unwrap().push(date);
        });
        seen
    }

    #[test]
    fn test_out_of_bounds_selection_is_silent_noop() {
        let mut st = state(ymd(2024, 3, 15));
        let seen = counting_callback(&mut st);

        let before = *st.selection();
        assert_eq!(st.select_date(ymd(1999, 12, 31)), SelectOutcome::Rejected);
        // Repeating a rejected selection has no cumulative effect
        assert_eq!(st.select_date(ymd(1999, 12, 31)), SelectOutcome::Rejected);

        assert_eq!(*st.selection(), before);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_accepted_selection_fires_change_once() {
        let mut st = state(ymd(2024, 3, 15));
        let seen = counting_callback(&mut st);
        st.toggle_popup();
        assert!(st.is_open());

        let picked = ymd(2050, 6, 15);
        assert_eq!(
            st.select_date(picked),
            SelectOutcome::Accepted { completed: true }
        );

        assert_eq!(st.selected_date(), Some(picked));
        assert_eq!(*seen.lock().unwrap(), vec![picked]);
        // Single-mode selection closes the popup
        assert!(!st.is_open());
    }

    #[test]
    fn test_day_click_requires_day_view() {
        let mut st = state(ymd(2024, 3, 15));
        st.handle_event(CalendarEvent::TitleClicked);
        assert_eq!(st.view_mode(), ViewMode::Month);

        assert_eq!(st.handle_event(CalendarEvent::DayClicked(ymd(2024, 3, 20))), None);
        assert_eq!(st.selected_date(), Some(ymd(2024, 3, 15)));
    }

    #[test]
    fn test_month_cell_click_anchors_and_narrows() {
        let mut st = state(ymd(2024, 7, 15));
        st.handle_event(CalendarEvent::TitleClicked);
        assert_eq!(st.view_mode(), ViewMode::Month);

        // Clicking "Mar" with anchor year 2024
        st.handle_event(CalendarEvent::MonthClicked(3));
        assert_eq!(st.anchor(), ymd(2024, 3, 1));
        assert_eq!(st.view_mode(), ViewMode::Day);
    }

    #[test]
    fn test_year_cell_click_anchors_and_narrows() {
        let mut st = state(ymd(2024, 7, 15));
        st.handle_event(CalendarEvent::TitleClicked);
        st.handle_event(CalendarEvent::TitleClicked);
        assert_eq!(st.view_mode(), ViewMode::Year);

        st.handle_event(CalendarEvent::YearClicked(2030));
        assert_eq!(st.anchor(), ymd(2030, 1, 1));
        assert_eq!(st.view_mode(), ViewMode::Month);
    }

    #[test]
    fn test_invalid_month_number_is_noop() {
        let mut st = state(ymd(2024, 7, 15));
        st.handle_event(CalendarEvent::TitleClicked);

        st.handle_event(CalendarEvent::MonthClicked(13));
        assert_eq!(st.anchor(), ymd(2024, 7, 15));
        assert_eq!(st.view_mode(), ViewMode::Month);
    }

    #[test]
    fn test_navigation_never_bounds_checked() {
        let mut st = CalendarState::new(
            CalendarConfig::new(ymd(2024, 1, 15))
                .min_date(ymd(2024, 1, 1))
                .max_date(ymd(2024, 1, 31)),
        )
        .unwrap();

        // Browsing past the bounds is allowed; only selection is gated
        st.handle_event(CalendarEvent::PrevClicked);
        assert_eq!(st.anchor(), ymd(2023, 12, 15));
        assert_eq!(st.select_date(ymd(2023, 12, 20)), SelectOutcome::Rejected);
    }

    #[test]
    fn test_popup_lifecycle() {
        let mut st = state(ymd(2024, 3, 15));
        assert!(!st.is_open());

        st.handle_event(CalendarEvent::InputClicked);
        assert!(st.is_open());
        st.handle_event(CalendarEvent::InputClicked);
        assert!(!st.is_open());

        st.handle_event(CalendarEvent::InputClicked);
        st.handle_event(CalendarEvent::ConfirmClicked);
        assert!(!st.is_open());
    }

    #[test]
    fn test_range_reversal_restarts() {
        let mut st = CalendarState::new(
            CalendarConfig::new(ymd(2024, 3, 1))
                .min_date(ymd(2000, 1, 1))
                .max_date(ymd(2100, 12, 31))
                .range(),
        )
        .unwrap();
        let seen = counting_callback(&mut st);
        st.toggle_popup();

        let a = ymd(2024, 3, 10);
        let b = ymd(2024, 3, 5);

        assert_eq!(
            st.select_date(a),
            SelectOutcome::Accepted { completed: false }
        );
        // Popup stays open awaiting the end date
        assert!(st.is_open());

        assert_eq!(
            st.select_date(b),
            SelectOutcome::Accepted { completed: false }
        );
        let range = st.range().unwrap();
        assert_eq!(range.start, Some(b));
        assert_eq!(range.end, None);
        assert_eq!(range.phase, RangePhase::End);
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_range_completion_closes_popup() {
        let mut st = CalendarState::new(CalendarConfig::new(ymd(2024, 3, 1)).range()).unwrap();
        st.toggle_popup();

        let a = ymd(2024, 3, 10);
        let c = ymd(2024, 3, 20);

        st.select_date(a);
        assert_eq!(
            st.select_date(c),
            SelectOutcome::Accepted { completed: true }
        );

        let range = st.range().unwrap();
        assert_eq!(range.completed(), Some((a, c)));
        assert_eq!(range.phase, RangePhase::Start);
        assert!(!st.is_open());
    }

    #[test]
    fn test_today_respects_bounds() {
        let mut st = CalendarState::new(
            CalendarConfig::new(ymd(2024, 3, 15))
                .min_date(ymd(2024, 1, 1))
                .max_date(ymd(2024, 12, 31))
                .today(ymd(2025, 6, 1)),
        )
        .unwrap();
        let seen = counting_callback(&mut st);

        // Pinned "today" is outside the bounds: same silent rejection as
        // any other selection
        assert_eq!(st.handle_event(CalendarEvent::TodayClicked), None);
        assert_eq!(st.selected_date(), Some(ymd(2024, 3, 15)));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_today_selects_when_in_bounds() {
        let mut st = CalendarState::new(
            CalendarConfig::new(ymd(2024, 3, 15)).today(ymd(2024, 6, 1)),
        )
        .unwrap();

        assert_eq!(
            st.handle_event(CalendarEvent::TodayClicked),
            Some(ymd(2024, 6, 1))
        );
        assert_eq!(st.selected_date(), Some(ymd(2024, 6, 1)));
    }

    #[test]
    fn test_clear_resets_range_only() {
        let mut st = CalendarState::new(CalendarConfig::new(ymd(2024, 3, 1)).range()).unwrap();
        st.select_date(ymd(2024, 3, 10));
        st.handle_event(CalendarEvent::ClearClicked);

        let range = st.range().unwrap();
        assert_eq!(range.start, None);
        assert_eq!(range.phase, RangePhase::Start);

        // Single mode: clear is a no-op
        let mut single = state(ymd(2024, 3, 15));
        single.handle_event(CalendarEvent::ClearClicked);
        assert_eq!(single.selected_date(), Some(ymd(2024, 3, 15)));
    }

    #[test]
    fn test_header_titles_per_view() {
        use crate::format::EnUsFormatter;
        let fmt = EnUsFormatter;

        let mut st = state(ymd(2024, 3, 15));
        assert_eq!(st.header_title(&fmt), "March 2024");

        st.handle_event(CalendarEvent::TitleClicked);
        assert_eq!(st.header_title(&fmt), "2024");

        st.handle_event(CalendarEvent::TitleClicked);
        assert_eq!(st.header_title(&fmt), "2018 - 2029");
    }

    #[test]
    fn test_render_data_shapes() {
        use crate::format::EnUsFormatter;
        let st = state(ymd(2024, 3, 15));

        assert_eq!(st.day_cells().len(), DAY_GRID_LEN);
        assert_eq!(st.month_cells().len(), 12);
        assert_eq!(st.year_cells().len(), 12);

        let labels = st.weekday_labels(&EnUsFormatter);
        assert_eq!(labels.len(), 7);
        assert_eq!(labels[0], "Sun");
        assert_eq!(labels[6], "Sat");
    }

    #[test]
    fn test_initial_value_must_satisfy_bounds() {
        let err = CalendarState::new(
            CalendarConfig::new(ymd(1999, 12, 31))
                .min_date(ymd(2000, 1, 1))
                .max_date(ymd(2100, 12, 31)),
        )
        .unwrap_err();
        assert!(matches!(err, CalendarError::ValueOutOfBounds { .. }));
    }
}
