//! Upstream event sources.
//!
//! DESIGN
//! ======
//! An `EventProvider` is the seam between the host's raw listeners and the
//! dispatcher. The host calls `emit` from its listener the instant an event
//! fires; every sink subscribed to that event type runs synchronously. The
//! return value tells the host whether to suppress the platform's default
//! handling for the event, based on the provider's prevent-default set.
//!
//! Providers are cheap handles (`Rc` inside). The host keeps one clone to
//! emit into, the dispatcher keeps another to subscribe with.
//!
//! Subscriptions are released explicitly via [`Subscription::unsubscribe`].
//! Dropping a `Subscription` does not release it.
//!
//! A sink may call `emit` on its own provider. The nested event is queued and
//! delivered after the current one finishes, so delivery order matches emit
//! order. A listener released mid-delivery receives nothing further, nested
//! events included.
//!
//! A provider built with [`EventProvider::with_replay`] keeps the events of
//! the last `window` and hands those of the subscribed type to every new sink
//! before it sees live traffic.

#[cfg(test)]
#[path = "provider_test.rs"]
mod provider_test;

use std::cell::{Cell, RefCell};
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use tracing::trace;
use web_time::Instant;

use crate::input::{
    EventKind, KeyboardEvent, KeyboardEventType, MouseEvent, MouseEventType, PointerEvent, PointerEventType,
    TouchEvent, TouchEventType,
};

// =============================================================================
// SUBSCRIPTION
// =============================================================================

/// Handle for one upstream listener.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(release: impl FnOnce() + 'static) -> Self {
        Self { release: Some(Box::new(release)) }
    }

    /// Detach the listener from its provider. Safe to call more than once.
    pub fn unsubscribe(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }

    /// Whether `unsubscribe` has already run.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.release.is_none()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("closed", &self.is_closed()).finish()
    }
}

// =============================================================================
// EVENT PROVIDER
// =============================================================================

struct Listener<K, E> {
    id: u64,
    kind: K,
    sink: Box<dyn FnMut(&E)>,
}

struct Inner<K, E> {
    next_id: u64,
    listeners: Vec<Listener<K, E>>,
    /// Ids unsubscribed while their listener was checked out by `emit`.
    /// Folded into the checked-out list after each delivery pass.
    released_during_emit: Vec<u64>,
    /// True while an `emit` is delivering.
    emitting: bool,
    /// Events emitted from inside a sink, awaiting delivery.
    pending: VecDeque<(K, E)>,
    prevented: HashSet<K>,
    replay_window: Option<Duration>,
    history: VecDeque<(Instant, K, E)>,
}

impl<K: EventKind, E> Inner<K, E> {
    fn remove(&mut self, id: u64) {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        if self.listeners.len() == before {
            self.released_during_emit.push(id);
        }
    }

    fn prune_history(&mut self, now: Instant) {
        let Some(window) = self.replay_window else {
            return;
        };
        while self.history.front().is_some_and(|(at, _, _)| now.duration_since(*at) > window) {
            self.history.pop_front();
        }
    }
}

/// Event source for one input family.
pub struct EventProvider<K, E> {
    inner: Rc<RefCell<Inner<K, E>>>,
}

impl<K, E> Clone for EventProvider<K, E> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<K: EventKind, E: Clone + 'static> Default for EventProvider<K, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: EventKind, E: 'static> fmt::Debug for EventProvider<K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("EventProvider")
            .field("family", &K::FAMILY)
            .field("listeners", &inner.listeners.len())
            .field("prevented", &inner.prevented)
            .field("replay_window", &inner.replay_window)
            .finish()
    }
}

impl<K: EventKind, E: Clone + 'static> EventProvider<K, E> {
    #[must_use]
    pub fn new() -> Self {
        Self::build(None)
    }

    /// A provider that replays events younger than `window` to late subscribers.
    #[must_use]
    pub fn with_replay(window: Duration) -> Self {
        Self::build(Some(window))
    }

    fn build(replay_window: Option<Duration>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                next_id: 0,
                listeners: Vec::new(),
                released_during_emit: Vec::new(),
                emitting: false,
                pending: VecDeque::new(),
                prevented: HashSet::new(),
                replay_window,
                history: VecDeque::new(),
            })),
        }
    }

    /// Attach `sink` to events of type `kind`.
    ///
    /// On a replaying provider the sink first receives the retained events of
    /// `kind`, oldest first.
    pub fn subscribe(&self, kind: K, mut sink: impl FnMut(&E) + 'static) -> Subscription {
        let replay: Vec<E> = {
            let mut inner = self.inner.borrow_mut();
            inner.prune_history(Instant::now());
            inner.history.iter().filter(|(_, k, _)| *k == kind).map(|(_, _, e)| e.clone()).collect()
        };
        for event in &replay {
            sink(event);
        }

        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push(Listener { id, kind, sink: Box::new(sink) });
            id
        };
        let family = K::FAMILY;
        trace!(%family, ?kind, id, replayed = replay.len(), "listener subscribed");

        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().remove(id);
                trace!(%family, ?kind, id, "listener released");
            }
        })
    }

    /// Deliver `event` to every sink subscribed to `kind`, in subscription order.
    ///
    /// Returns `true` when default handling of this event type is prevented.
    pub fn emit(&self, kind: K, event: &E) -> bool {
        let (mut listeners, prevented) = {
            let mut inner = self.inner.borrow_mut();
            if inner.replay_window.is_some() {
                let now = Instant::now();
                inner.prune_history(now);
                inner.history.push_back((now, kind, event.clone()));
            }
            let prevented = inner.prevented.contains(&kind);
            if inner.emitting {
                inner.pending.push_back((kind, event.clone()));
                trace!(family = %K::FAMILY, ?kind, "nested emit queued");
                return prevented;
            }
            inner.emitting = true;
            // Sinks run with the listener list checked out so they may
            // subscribe, unsubscribe or emit without a double borrow.
            (std::mem::take(&mut inner.listeners), prevented)
        };

        self.deliver(&mut listeners, kind, event);
        loop {
            let next = self.inner.borrow_mut().pending.pop_front();
            let Some((kind, event)) = next else {
                break;
            };
            self.deliver(&mut listeners, kind, &event);
        }

        let mut inner = self.inner.borrow_mut();
        inner.listeners = listeners;
        inner.emitting = false;
        prevented
    }

    /// One delivery pass, then fold in listeners added and released by the sinks.
    fn deliver(&self, listeners: &mut Vec<Listener<K, E>>, kind: K, event: &E) {
        for listener in listeners.iter_mut().filter(|l| l.kind == kind) {
            if self.inner.borrow().released_during_emit.contains(&listener.id) {
                continue;
            }
            (listener.sink)(event);
        }

        let mut inner = self.inner.borrow_mut();
        let added = std::mem::take(&mut inner.listeners);
        listeners.extend(added);
        let released = std::mem::take(&mut inner.released_during_emit);
        listeners.retain(|l| !released.contains(&l.id));
    }

    /// Prevent default handling on the given event types.
    pub fn prevent_default(&self, kinds: &[K]) {
        self.inner.borrow_mut().prevented.extend(kinds.iter().copied());
    }

    /// Allow default handling on the given event types.
    pub fn allow_default(&self, kinds: &[K]) {
        let mut inner = self.inner.borrow_mut();
        for kind in kinds {
            inner.prevented.remove(kind);
        }
    }

    #[must_use]
    pub fn is_default_prevented(&self, kind: K) -> bool {
        self.inner.borrow().prevented.contains(&kind)
    }

    /// Number of live sinks for `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: K) -> usize {
        self.inner.borrow().listeners.iter().filter(|l| l.kind == kind).count()
    }
}

pub type PointerEventProvider = EventProvider<PointerEventType, PointerEvent>;
pub type MouseEventProvider = EventProvider<MouseEventType, MouseEvent>;
pub type TouchEventProvider = EventProvider<TouchEventType, TouchEvent>;
pub type KeyboardEventProvider = EventProvider<KeyboardEventType, KeyboardEvent>;

// =============================================================================
// POINTER LOCK
// =============================================================================

#[derive(Debug, Clone, Copy, Default)]
struct LockState {
    requested: bool,
    active: bool,
}

/// Shared pointer-lock state.
///
/// Platforms only grant pointer lock from inside a user gesture, so a request
/// is recorded as pending and the host's click listener consumes it with
/// [`PointerLock::take_request`]. The host reports the platform's actual lock
/// state back through [`PointerLock::set_active`].
#[derive(Debug, Clone, Default)]
pub struct PointerLock {
    state: Rc<Cell<LockState>>,
}

impl PointerLock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for pointer lock on the next user gesture.
    pub fn request(&self) {
        let mut s = self.state.get();
        s.requested = true;
        self.state.set(s);
    }

    /// Drop any pending request and release the lock.
    pub fn exit(&self) {
        self.state.set(LockState::default());
    }

    /// Consume a pending request. Returns whether one was pending.
    pub fn take_request(&self) -> bool {
        let mut s = self.state.get();
        let requested = s.requested;
        s.requested = false;
        self.state.set(s);
        requested
    }

    /// Record the platform's pointer-lock state.
    pub fn set_active(&self, active: bool) {
        let mut s = self.state.get();
        s.active = active;
        self.state.set(s);
    }

    #[must_use]
    pub fn active(&self) -> bool {
        self.state.get().active
    }

    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.state.get().requested
    }
}

// =============================================================================
// PROVIDER SET
// =============================================================================

/// The upstream providers available to a dispatcher. Families left `None`
/// cannot have handlers registered.
#[derive(Debug, Clone, Default)]
pub struct EventProviders {
    pub pointer: Option<PointerEventProvider>,
    pub mouse: Option<MouseEventProvider>,
    pub touch: Option<TouchEventProvider>,
    pub keyboard: Option<KeyboardEventProvider>,
    pub pointer_lock: PointerLock,
}

impl EventProviders {
    /// A provider for every family.
    #[must_use]
    pub fn all() -> Self {
        Self {
            pointer: Some(EventProvider::new()),
            mouse: Some(EventProvider::new()),
            touch: Some(EventProvider::new()),
            keyboard: Some(EventProvider::new()),
            pointer_lock: PointerLock::new(),
        }
    }
}
