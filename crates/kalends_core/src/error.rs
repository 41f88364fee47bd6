use chrono::NaiveDate;
use thiserror::Error;

/// Errors surfaced while constructing calendar state.
///
/// Interaction handling itself is total: once a [`crate::CalendarState`]
/// exists, every event is either applied or silently ignored.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CalendarError {
    #[error("invalid bounds: min {min} is after max {max}")]
    InvalidBounds { min: NaiveDate, max: NaiveDate },

    #[error("initial value {value} is outside bounds [{min}, {max}]")]
    ValueOutOfBounds {
        value: NaiveDate,
        min: NaiveDate,
        max: NaiveDate,
    },
}
