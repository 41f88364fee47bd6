//! Selection state
//!
//! Single-date and two-phase range selection. The range algorithm keeps an
//! inverted range unrepresentable: an end candidate earlier than the start
//! collapses into a fresh start instead.

use chrono::NaiveDate;

/// Which slot the next accepted date fills in range mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RangePhase {
    #[default]
    Start,
    End,
}

/// What an accepted date did to a range selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeOutcome {
    /// The date became the start of a fresh range.
    Started,
    /// The date preceded the current start and restarted the range.
    Restarted,
    /// The date completed the range as its end.
    Completed,
}

/// Two-phase range selection state.
///
/// Invariant: `end` is never set while `start` is `None`, and
/// `start <= end` whenever both are set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RangeSelection {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub phase: RangePhase,
}

impl RangeSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an accepted (already bounds-checked) date.
    pub fn accept(&mut self, date: NaiveDate) -> RangeOutcome {
        match self.phase {
            RangePhase::Start => {
                self.start = Some(date);
                self.end = None;
                self.phase = RangePhase::End;
                RangeOutcome::Started
            }
            RangePhase::End => match self.start {
                // An end candidate before the start becomes the new start;
                // the phase stays End so the next date can still close it.
                Some(start) if date < start => {
                    self.start = Some(date);
                    self.end = None;
                    RangeOutcome::Restarted
                }
                Some(_) => {
                    self.end = Some(date);
                    self.phase = RangePhase::Start;
                    RangeOutcome::Completed
                }
                // Cleared mid-phase: treat as a fresh start.
                None => {
                    self.start = Some(date);
                    self.end = None;
                    RangeOutcome::Started
                }
            },
        }
    }

    /// Reset to an empty range awaiting a start date.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Both endpoints are set.
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// The completed `(start, end)` pair, if any.
    pub fn completed(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.start.zip(self.end)
    }

    /// Whether `date` is one of the endpoints.
    pub fn is_endpoint(&self, date: NaiveDate) -> bool {
        self.start == Some(date) || self.end == Some(date)
    }
}

/// Selection state for one picker instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Single { selected: NaiveDate },
    Range(RangeSelection),
}

impl Selection {
    /// Whether `date` should render as selected.
    pub fn is_selected(&self, date: NaiveDate) -> bool {
        match self {
            Selection::Single { selected } => *selected == date,
            Selection::Range(range) => range.is_endpoint(date),
        }
    }
}
