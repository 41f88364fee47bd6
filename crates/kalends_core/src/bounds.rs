//! Selection bounds
//!
//! The inclusive `[min, max]` interval restricting selectable dates.
//! Bounds are immutable for the lifetime of one picker instance; only
//! selection is checked against them, never navigation.

use chrono::NaiveDate;

use crate::error::CalendarError;

/// Inclusive date interval for valid selections.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateBounds {
    min: NaiveDate,
    max: NaiveDate,
}

impl DateBounds {
    /// Create bounds, rejecting an inverted interval.
    pub fn new(min: NaiveDate, max: NaiveDate) -> Result<Self, CalendarError> {
        if min > max {
            return Err(CalendarError::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> NaiveDate {
        self.min
    }

    pub fn max(&self) -> NaiveDate {
        self.max
    }

    /// Whether `date` falls inside the inclusive interval.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min <= date && date <= self.max
    }

    /// Whether `date` is unselectable: `date < min || date > max`.
    pub fn is_disabled(&self, date: NaiveDate) -> bool {
        !self.contains(date)
    }

    /// Validate a configured value against the bounds.
    pub fn check(&self, value: NaiveDate) -> Result<NaiveDate, CalendarError> {
        if self.is_disabled(value) {
            return Err(CalendarError::ValueOutOfBounds {
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(value)
    }
}
