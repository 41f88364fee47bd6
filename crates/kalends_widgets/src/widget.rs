//! Base picker trait and id type

use chrono::NaiveDate;
use kalends_core::CalendarEvent;
use slotmap::new_key_type;

use crate::context::PickerContext;

new_key_type! {
    pub struct PickerId;
}

/// Base trait for all picker widgets
pub trait PickerWidget {
    /// Get the picker's unique ID
    fn id(&self) -> PickerId;

    /// Handle an interaction event.
    ///
    /// Returns the date the event accepted into the selection, if any.
    fn handle_event(&mut self, ctx: &mut PickerContext, event: CalendarEvent)
        -> Option<NaiveDate>;
}
