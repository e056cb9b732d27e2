//! Tick-driven event dispatch.
//!
//! DESIGN
//! ======
//! Input arrives whenever the platform fires it; gesture logic runs once per
//! render tick. The dispatcher bridges the two. Each event type that has at
//! least one handler gets an [`EventBuffer`] and exactly one upstream sink on
//! its family's provider. The sink only appends and requests an optional
//! redraw. [`EventDispatcher::update`] then flushes every buffer in a fixed
//! order: pointer, mouse, touch, keyboard, each family in its `ALL` order.
//!
//! Handlers receive a caller-owned context `&mut C` alongside the event
//! slices, so the state they mutate can live next to the dispatcher instead
//! of behind shared pointers.
//!
//! Subscriptions are acquired lazily on first registration for a type and
//! released in one place, [`EventDispatcher::dispose`], which also runs on
//! drop.

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod dispatch_test;

use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::buffer::{EventBuffer, Handler};
use crate::error::NavigationError;
use crate::input::{
    EventKind, KeyboardEvent, KeyboardEventType, MouseEvent, MouseEventType, PointerEvent, PointerEventType,
    TouchEvent, TouchEventType,
};
use crate::provider::{EventProvider, EventProviders, PointerLock, Subscription};

/// Redraw request callback. `true` forces a redraw; `false` leaves the
/// decision to the host's own damage tracking.
pub type Invalidate = Rc<dyn Fn(bool)>;

// =============================================================================
// FAMILY
// =============================================================================

/// Buffers of one input family, indexed by [`EventKind::index`].
struct Family<C, K, E> {
    provider: Option<EventProvider<K, E>>,
    buffers: Vec<Option<EventBuffer<C, E>>>,
}

impl<C: 'static, K: EventKind, E: Clone + 'static> Family<C, K, E> {
    fn new(provider: Option<EventProvider<K, E>>) -> Self {
        Self { provider, buffers: K::ALL.iter().map(|_| None).collect() }
    }

    fn register(
        &mut self,
        kind: K,
        handler: Handler<C, E>,
        invalidate: Option<&Invalidate>,
        subscriptions: &mut Vec<Subscription>,
    ) -> Result<(), NavigationError> {
        let slot = &mut self.buffers[kind.index()];
        if let Some(buffer) = slot.as_mut() {
            buffer.push_handler(handler);
            return Ok(());
        }

        let Some(provider) = &self.provider else {
            return Err(NavigationError::MissingProvider { family: K::FAMILY });
        };

        let mut buffer = EventBuffer::new();
        let invalidate = invalidate.cloned();
        let sink = buffer.appender(move || {
            if let Some(invalidate) = &invalidate {
                invalidate(false);
            }
        });
        subscriptions.push(provider.subscribe(kind, sink));
        buffer.push_handler(handler);
        *slot = Some(buffer);

        let family = K::FAMILY;
        debug!(%family, ?kind, "subscribed upstream listener");
        Ok(())
    }

    fn flush(&mut self, ctx: &mut C) {
        for kind in K::ALL {
            if let Some(buffer) = &mut self.buffers[kind.index()] {
                let pending = buffer.pending();
                if buffer.flush(ctx) {
                    trace!(?kind, events = pending, "flushed");
                }
            }
        }
    }

    fn clear(&mut self) {
        for buffer in self.buffers.iter_mut().flatten() {
            buffer.clear();
        }
    }

    fn pending(&self, kind: K) -> usize {
        self.buffers[kind.index()].as_ref().map_or(0, EventBuffer::pending)
    }

    fn handler_count(&self, kind: K) -> usize {
        self.buffers[kind.index()].as_ref().map_or(0, EventBuffer::handler_count)
    }
}

// =============================================================================
// DISPATCHER
// =============================================================================

pub struct EventDispatcher<C> {
    invalidate: Option<Invalidate>,
    pointer: Family<C, PointerEventType, PointerEvent>,
    mouse: Family<C, MouseEventType, MouseEvent>,
    touch: Family<C, TouchEventType, TouchEvent>,
    keyboard: Family<C, KeyboardEventType, KeyboardEvent>,
    has_mouse_provider: bool,
    pointer_lock: PointerLock,
    subscriptions: Vec<Subscription>,
    disposed: bool,
}

impl<C> fmt::Debug for EventDispatcher<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("subscriptions", &self.subscriptions.len())
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

impl<C: 'static> EventDispatcher<C> {
    /// Build a dispatcher over `providers`. Wheel events on the mouse
    /// provider have their default handling (page scroll) prevented.
    #[must_use]
    pub fn new(invalidate: Option<Invalidate>, providers: EventProviders) -> Self {
        let EventProviders { pointer, mouse, touch, keyboard, pointer_lock } = providers;
        if let Some(mouse) = &mouse {
            mouse.prevent_default(&[MouseEventType::Wheel]);
        }
        Self {
            invalidate,
            has_mouse_provider: mouse.is_some(),
            pointer: Family::new(pointer),
            mouse: Family::new(mouse),
            touch: Family::new(touch),
            keyboard: Family::new(keyboard),
            pointer_lock,
            subscriptions: Vec::new(),
            disposed: false,
        }
    }

    /// Register a handler for a pointer event type.
    ///
    /// # Errors
    ///
    /// [`NavigationError::MissingProvider`] when no pointer provider is
    /// configured, [`NavigationError::Disposed`] after [`Self::dispose`].
    pub fn register_pointer_handler(
        &mut self,
        kind: PointerEventType,
        handler: impl FnMut(&mut C, &[PointerEvent], &[PointerEvent]) + 'static,
    ) -> Result<(), NavigationError> {
        self.ensure_live()?;
        self.pointer.register(kind, Box::new(handler), self.invalidate.as_ref(), &mut self.subscriptions)
    }

    /// Register a handler for a mouse event type (including wheel).
    ///
    /// # Errors
    ///
    /// See [`Self::register_pointer_handler`].
    pub fn register_mouse_handler(
        &mut self,
        kind: MouseEventType,
        handler: impl FnMut(&mut C, &[MouseEvent], &[MouseEvent]) + 'static,
    ) -> Result<(), NavigationError> {
        self.ensure_live()?;
        self.mouse.register(kind, Box::new(handler), self.invalidate.as_ref(), &mut self.subscriptions)
    }

    /// Register a handler for a touch event type.
    ///
    /// # Errors
    ///
    /// See [`Self::register_pointer_handler`].
    pub fn register_touch_handler(
        &mut self,
        kind: TouchEventType,
        handler: impl FnMut(&mut C, &[TouchEvent], &[TouchEvent]) + 'static,
    ) -> Result<(), NavigationError> {
        self.ensure_live()?;
        self.touch.register(kind, Box::new(handler), self.invalidate.as_ref(), &mut self.subscriptions)
    }

    /// Register a handler for a keyboard event type.
    ///
    /// # Errors
    ///
    /// See [`Self::register_pointer_handler`].
    pub fn register_keyboard_handler(
        &mut self,
        kind: KeyboardEventType,
        handler: impl FnMut(&mut C, &[KeyboardEvent], &[KeyboardEvent]) + 'static,
    ) -> Result<(), NavigationError> {
        self.ensure_live()?;
        self.keyboard.register(kind, Box::new(handler), self.invalidate.as_ref(), &mut self.subscriptions)
    }

    fn ensure_live(&self) -> Result<(), NavigationError> {
        if self.disposed { Err(NavigationError::Disposed) } else { Ok(()) }
    }

    /// Flush every buffered event type to its handlers.
    pub fn update(&mut self, ctx: &mut C) {
        if self.disposed {
            return;
        }
        self.pointer.flush(ctx);
        self.mouse.flush(ctx);
        self.touch.flush(ctx);
        self.keyboard.flush(ctx);
    }

    /// Release every upstream subscription and drop all buffered events.
    /// Further updates deliver nothing.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.pointer.clear();
        self.mouse.clear();
        self.touch.clear();
        self.keyboard.clear();
        for subscription in &mut self.subscriptions {
            subscription.unsubscribe();
        }
        debug!(released = self.subscriptions.len(), "event dispatcher disposed");
        self.subscriptions.clear();
        self.disposed = true;
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Number of live upstream subscriptions (one per registered type).
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    #[must_use]
    pub fn pending_pointer_events(&self, kind: PointerEventType) -> usize {
        self.pointer.pending(kind)
    }

    #[must_use]
    pub fn pointer_handler_count(&self, kind: PointerEventType) -> usize {
        self.pointer.handler_count(kind)
    }

    #[must_use]
    pub fn mouse_handler_count(&self, kind: MouseEventType) -> usize {
        self.mouse.handler_count(kind)
    }

    /// Ask for pointer lock on the next click. Ignored without a mouse provider.
    pub fn request_pointer_lock(&self) {
        if self.has_mouse_provider {
            self.pointer_lock.request();
        }
    }

    /// Release pointer lock. Ignored without a mouse provider.
    pub fn exit_pointer_lock(&self) {
        if self.has_mouse_provider {
            self.pointer_lock.exit();
        }
    }

    /// The shared pointer-lock state.
    #[must_use]
    pub fn pointer_lock(&self) -> &PointerLock {
        &self.pointer_lock
    }
}

impl<C> Drop for EventDispatcher<C> {
    fn drop(&mut self) {
        // Same teardown as `dispose`, without the `C: 'static` bound.
        if !self.disposed {
            for subscription in &mut self.subscriptions {
                subscription.unsubscribe();
            }
            self.disposed = true;
        }
    }
}
