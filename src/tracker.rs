//! Active contacts keyed by pointer id.
//!
//! The tracker is the ground truth for how many contacts are down and which
//! one is primary. Entries keep insertion order: updating an existing
//! contact leaves it in place, removing one shifts later contacts forward.

#[cfg(test)]
#[path = "tracker_test.rs"]
mod tracker_test;

use indexmap::IndexMap;

use crate::input::PointerEvent;

#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    active: IndexMap<i32, PointerEvent>,
}

impl PointerTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the contact with `event.pointer_id`.
    pub fn upsert(&mut self, event: &PointerEvent) {
        self.active.insert(event.pointer_id, event.clone());
    }

    /// Forget the contact. Returns the last event seen for it, if it was active.
    pub fn remove(&mut self, pointer_id: i32) -> Option<PointerEvent> {
        self.active.shift_remove(&pointer_id)
    }

    #[must_use]
    pub fn get(&self, pointer_id: i32) -> Option<&PointerEvent> {
        self.active.get(&pointer_id)
    }

    /// Number of active contacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// The first active contact flagged as primary by the platform.
    #[must_use]
    pub fn primary(&self) -> Option<&PointerEvent> {
        self.active.values().find(|e| e.is_primary)
    }

    /// Active contacts in insertion order.
    pub fn events(&self) -> impl Iterator<Item = &PointerEvent> {
        self.active.values()
    }

    /// The first two contacts, when at least two are active.
    #[must_use]
    pub fn first_pair(&self) -> Option<(&PointerEvent, &PointerEvent)> {
        let mut events = self.active.values();
        Some((events.next()?, events.next()?))
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}
