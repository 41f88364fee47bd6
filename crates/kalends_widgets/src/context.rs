//! Picker context
//!
//! Owns the calendar state machines for every mounted picker. Each state
//! is exclusively owned by one picker instance and discarded when the
//! picker unmounts. The context also tracks which pickers changed since
//! the host last rebuilt, so re-render requests can be batched.

use chrono::NaiveDate;
use kalends_core::{CalendarEvent, CalendarState};
use rustc_hash::FxHashSet;
use slotmap::SlotMap;
use tracing::trace;

use crate::widget::PickerId;

/// Runtime that manages all mounted picker state machines.
pub struct PickerContext {
    pickers: SlotMap<PickerId, CalendarState>,
    dirty: FxHashSet<PickerId>,
}

impl PickerContext {
    pub fn new() -> Self {
        Self {
            pickers: SlotMap::with_key(),
            dirty: FxHashSet::default(),
        }
    }

    /// Mount a picker's state machine.
    pub fn register(&mut self, state: CalendarState) -> PickerId {
        let id = self.pickers.insert(state);
        self.dirty.insert(id);
        id
    }

    /// Unmount a picker, discarding its state.
    pub fn remove(&mut self, id: PickerId) -> Option<CalendarState> {
        self.dirty.remove(&id);
        self.pickers.remove(id)
    }

    /// Get a reference to a picker's state
    pub fn state(&self, id: PickerId) -> Option<&CalendarState> {
        self.pickers.get(id)
    }

    /// Get a mutable reference to a picker's state; marks it dirty.
    pub fn state_mut(&mut self, id: PickerId) -> Option<&mut CalendarState> {
        let state = self.pickers.get_mut(id);
        if state.is_some() {
            self.dirty.insert(id);
        }
        state
    }

    /// Dispatch an interaction event to a picker.
    ///
    /// Returns the date the event accepted into the selection, if any.
    /// Unregistered ids are ignored.
    pub fn dispatch(&mut self, id: PickerId, event: CalendarEvent) -> Option<NaiveDate> {
        let state = self.pickers.get_mut(id)?;
        trace!(?id, ?event, "dispatching picker event");
        self.dirty.insert(id);
        state.handle_event(event)
    }

    pub fn is_registered(&self, id: PickerId) -> bool {
        self.pickers.contains_key(id)
    }

    /// Flag a picker for re-render.
    pub fn mark_dirty(&mut self, id: PickerId) {
        if self.pickers.contains_key(id) {
            self.dirty.insert(id);
        }
    }

    /// Take the set of pickers that changed since the last call.
    pub fn take_dirty(&mut self) -> Vec<PickerId> {
        self.dirty.drain().collect()
    }

    /// Get the number of mounted pickers
    pub fn len(&self) -> usize {
        self.pickers.len()
    }

    /// Check if no pickers are mounted
    pub fn is_empty(&self) -> bool {
        self.pickers.is_empty()
    }
}

impl Default for PickerContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use kalends_core::CalendarConfig;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn mount(ctx: &mut PickerContext) -> PickerId {
        let state = CalendarState::new(CalendarConfig::new(ymd(2024, 3, 15))).unwrap();
        ctx.register(state)
    }

    #[test]
    fn test_register_and_remove() {
        let mut ctx = PickerContext::new();
        let a = mount(&mut ctx);
        let b = mount(&mut ctx);

        assert_eq!(ctx.len(), 2);
        assert!(ctx.is_registered(a));

        ctx.remove(a);
        assert_eq!(ctx.len(), 1);
        assert!(!ctx.is_registered(a));
        assert!(ctx.state(b).is_some());
    }

    #[test]
    fn test_dispatch_isolated_per_picker() {
        let mut ctx = PickerContext::new();
        let a = mount(&mut ctx);
        let b = mount(&mut ctx);

        ctx.dispatch(a, CalendarEvent::InputClicked);

        assert!(ctx.state(a).unwrap().is_open());
        assert!(!ctx.state(b).unwrap().is_open());
    }

    #[test]
    fn test_dirty_tracking() {
        let mut ctx = PickerContext::new();
        let a = mount(&mut ctx);
        let _b = mount(&mut ctx);
        ctx.take_dirty();

        ctx.dispatch(a, CalendarEvent::NextClicked);
        let dirty = ctx.take_dirty();
        assert_eq!(dirty, vec![a]);
        assert!(ctx.take_dirty().is_empty());
    }

    #[test]
    fn test_dispatch_unregistered_is_noop() {
        let mut ctx = PickerContext::new();
        let a = mount(&mut ctx);
        ctx.remove(a);

        assert_eq!(ctx.dispatch(a, CalendarEvent::InputClicked), None);
    }
}
