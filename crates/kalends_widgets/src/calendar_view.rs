//! Shared calendar popup view model
//!
//! Render-data handed to the host rendering layer. The body is a tagged
//! variant resolved once per rebuild from the current view mode, so hosts
//! match on it instead of re-checking the mode per cell.

use kalends_core::{
    CalendarState, DateFormatter, DayCell, MonthCell, Selection, ViewMode, YearCell,
};

/// A month cell together with its display label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthCellView {
    pub cell: MonthCell,
    pub label: String,
}

/// A year cell together with its display label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YearCellView {
    pub cell: YearCell,
    pub label: String,
}

/// The grid for the active view mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CalendarBody {
    Days(Vec<DayCell>),
    Months(Vec<MonthCellView>),
    Years(Vec<YearCellView>),
}

/// Footer quick actions offered below the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FooterAction {
    Today,
    Clear,
    Confirm,
}

/// Complete popup render-data for one rebuild.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarView {
    pub mode: ViewMode,
    /// Header title between the prev/next arrows.
    pub title: String,
    /// Weekday labels for the day grid's columns.
    pub weekdays: Vec<String>,
    pub body: CalendarBody,
    /// Footer actions; range pickers add Clear.
    pub footer: Vec<FooterAction>,
}

/// Produce the popup view model for a calendar's current state.
///
/// Pure: no side effects, callable repeatedly.
pub fn calendar_view(state: &CalendarState, fmt: &dyn DateFormatter) -> CalendarView {
    let mode = state.view_mode();
    let body = match mode {
        ViewMode::Day => CalendarBody::Days(state.day_cells()),
        ViewMode::Month => CalendarBody::Months(
            state
                .month_cells()
                .into_iter()
                .map(|cell| MonthCellView {
                    label: fmt.month_label(cell.month),
                    cell,
                })
                .collect(),
        ),
        ViewMode::Year => CalendarBody::Years(
            state
                .year_cells()
                .into_iter()
                .map(|cell| YearCellView {
                    label: fmt.format_year(cell.year),
                    cell,
                })
                .collect(),
        ),
    };

    let footer = match state.selection() {
        Selection::Single { .. } => vec![FooterAction::Today, FooterAction::Confirm],
        Selection::Range(_) => vec![
            FooterAction::Today,
            FooterAction::Clear,
            FooterAction::Confirm,
        ],
    };

    CalendarView {
        mode,
        title: state.header_title(fmt),
        weekdays: state.weekday_labels(fmt),
        body,
        footer,
    }
}
