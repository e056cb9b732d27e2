//! Per-event-type buffer pair and handler list.
//!
//! `latest` collects events since the last flush; `previous` holds what the
//! last flush delivered. `latest` lives behind an `Rc<RefCell<_>>` because the
//! upstream sink appends to it from the provider's emit path while the buffer
//! itself is owned by the dispatcher.

#[cfg(test)]
#[path = "buffer_test.rs"]
mod buffer_test;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Callback invoked on flush with `(context, latest, previous)`.
pub type Handler<C, E> = Box<dyn FnMut(&mut C, &[E], &[E])>;

pub struct EventBuffer<C, E> {
    latest: Rc<RefCell<Vec<E>>>,
    previous: Vec<E>,
    handlers: Vec<Handler<C, E>>,
}

impl<C, E> Default for EventBuffer<C, E> {
    fn default() -> Self {
        Self { latest: Rc::new(RefCell::new(Vec::new())), previous: Vec::new(), handlers: Vec::new() }
    }
}

impl<C, E> fmt::Debug for EventBuffer<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBuffer")
            .field("latest", &self.pending())
            .field("previous", &self.previous.len())
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl<C, E> EventBuffer<C, E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one event to `latest`.
    pub fn push(&self, event: E) {
        self.latest.borrow_mut().push(event);
    }

    /// A sink closure that appends clones of observed events to `latest` and
    /// then runs `after` (used for redraw requests).
    pub fn appender(&self, mut after: impl FnMut() + 'static) -> Box<dyn FnMut(&E)>
    where
        E: Clone + 'static,
    {
        let latest = Rc::clone(&self.latest);
        Box::new(move |event: &E| {
            latest.borrow_mut().push(event.clone());
            after();
        })
    }

    /// Register a handler. Handlers run in registration order.
    pub fn push_handler(&mut self, handler: Handler<C, E>) {
        self.handlers.push(handler);
    }

    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Number of events waiting for the next flush.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.latest.borrow().len()
    }

    /// Events delivered by the most recent flush.
    #[must_use]
    pub fn previous(&self) -> &[E] {
        &self.previous
    }

    /// Deliver `latest` to every handler, then move it into `previous`.
    ///
    /// Returns `false` without touching either sequence when nothing arrived
    /// since the last flush. Events appended while handlers run are kept for
    /// the next flush.
    pub fn flush(&mut self, ctx: &mut C) -> bool {
        let latest = std::mem::take(&mut *self.latest.borrow_mut());
        if latest.is_empty() {
            return false;
        }
        for handler in &mut self.handlers {
            handler(ctx, &latest, &self.previous);
        }
        self.previous = latest;
        true
    }

    /// Drop every buffered event, pending and previous.
    pub fn clear(&mut self) {
        self.latest.borrow_mut().clear();
        self.previous.clear();
    }
}
