//! Navigation controller.
//!
//! DESIGN
//! ======
//! `Navigation` pairs an [`EventDispatcher`] with the state its handlers
//! mutate. The dispatcher buffers pointer and wheel events as they arrive;
//! [`Navigation::update`] flushes them into [`NavigationState`], which keeps
//! the active contacts, resolves the gesture and drives the modifiers.
//!
//! Pointer handlers follow a small state machine:
//!
//! - **down**: track the contacts, resolve the mode, `initiate` the gesture.
//!   An undecided two-contact gesture (`MultiTouch`) initiates nothing.
//! - **move**: track the contacts. Nothing happens while no gesture is
//!   active. A mouse primary re-resolves the mode on every move since button
//!   release only shows up in the live button mask. A pending `MultiTouch`
//!   is settled here and the resulting gesture is initiated once; any other
//!   gesture is continued with `process`.
//! - **up / leave / cancel**: forget the contacts. The mode is left as is and
//!   re-resolved on the next down or move.
//!
//! Wheel events bypass the mode entirely and go to the wheel-zoom modifier.
//!
//! The rotate modifier is held in [`ActiveRotation`], a tagged variant with
//! one live payload per metaphor, so switching metaphors is a single
//! assignment.

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

use std::fmt;

use tracing::{debug, info, trace, warn};
use web_time::Instant;

use crate::camera::{Point, SharedCamera};
use crate::config::{NavigationConfig, NavigationMetaphor};
use crate::consts::MULTI_TOUCH_CONTACTS;
use crate::dispatch::{EventDispatcher, Invalidate};
use crate::error::NavigationError;
use crate::gesture::{self, NavigationMode};
use crate::input::{MouseEvent, MouseEventType, PointerEvent, PointerEventType, PointerType};
use crate::modifier::{DragModifier, ModifierFactory, PinchModifier, WheelModifier};
use crate::offsets::{Offsets, Viewport};
use crate::provider::{EventProviders, PointerLock};
use crate::tracker::PointerTracker;

// =============================================================================
// ACTIVE ROTATION
// =============================================================================

/// The rotate modifier of the current metaphor.
enum ActiveRotation {
    Turntable(Box<dyn DragModifier>),
    Trackball(Box<dyn DragModifier>),
}

impl ActiveRotation {
    fn build(metaphor: NavigationMetaphor, factory: &dyn ModifierFactory) -> Self {
        match metaphor {
            NavigationMetaphor::Turntable => Self::Turntable(factory.turntable()),
            NavigationMetaphor::Trackball => Self::Trackball(factory.trackball()),
        }
    }

    fn metaphor(&self) -> NavigationMetaphor {
        match self {
            Self::Turntable(_) => NavigationMetaphor::Turntable,
            Self::Trackball(_) => NavigationMetaphor::Trackball,
        }
    }

    fn modifier_mut(&mut self) -> &mut dyn DragModifier {
        match self {
            Self::Turntable(m) | Self::Trackball(m) => m.as_mut(),
        }
    }
}

// =============================================================================
// STATE
// =============================================================================

/// Everything the pointer and wheel handlers read and write.
struct NavigationState {
    tracker: PointerTracker,
    mode: NavigationMode,
    rotation: ActiveRotation,
    pan: Box<dyn DragModifier>,
    pinch: Box<dyn PinchModifier>,
    wheel: Box<dyn WheelModifier>,
    offsets: Box<dyn Offsets>,
    pointer_lock: PointerLock,
    always_rotate_on_move: bool,
    pan_threshold: f64,
    normalize: bool,
    /// Recorded on every handled move. Not consulted yet.
    last_interaction: Option<Instant>,
    invalidate: Option<Invalidate>,
    camera: Option<SharedCamera>,
}

impl NavigationState {
    fn invalidate(&self, force: bool) {
        if let Some(invalidate) = &self.invalidate {
            invalidate(force);
        }
    }

    fn set_mode(&mut self, mode: NavigationMode) {
        if self.mode == mode {
            return;
        }
        debug!(from = ?self.mode, to = ?mode, contacts = self.tracker.len(), "navigation: mode changed");
        self.mode = mode;
        self.invalidate(true);
    }

    fn resolve_mode(&self) -> NavigationMode {
        let locked_rotate = self.pointer_lock.active() && self.always_rotate_on_move;
        gesture::resolve_mode(&self.tracker, locked_rotate)
    }

    fn set_camera(&mut self, camera: Option<SharedCamera>) {
        self.rotation.modifier_mut().set_camera(camera.clone());
        self.pan.set_camera(camera.clone());
        self.pinch.set_camera(camera.clone());
        self.wheel.set_camera(camera.clone());
        self.camera = camera;
    }

    // -------------------------------------------------------------------------
    // Handlers
    // -------------------------------------------------------------------------

    fn on_pointer_down(&mut self, latest: &[PointerEvent], _previous: &[PointerEvent]) {
        for event in latest {
            self.tracker.upsert(event);
        }
        let mode = self.resolve_mode();
        self.set_mode(mode);
        self.apply(true);
    }

    fn on_pointer_move(&mut self, latest: &[PointerEvent], _previous: &[PointerEvent]) {
        for event in latest {
            self.tracker.upsert(event);
        }
        if !self.mode.is_active() {
            return;
        }

        if self.tracker.primary().is_some_and(|p| p.pointer_type == PointerType::Mouse) {
            let mode = self.resolve_mode();
            self.set_mode(mode);
        }

        let start = self.mode == NavigationMode::MultiTouch;
        if start {
            let mode = gesture::resolve_multi_touch(&self.tracker, self.pan_threshold);
            self.set_mode(mode);
        }
        self.apply(start);

        self.last_interaction = Some(Instant::now());
    }

    fn on_pointer_release(&mut self, latest: &[PointerEvent], _previous: &[PointerEvent]) {
        for event in latest {
            if self.tracker.remove(event.pointer_id).is_some() {
                trace!(pointer_id = event.pointer_id, remaining = self.tracker.len(), "navigation: contact released");
            }
        }
    }

    fn on_wheel(&mut self, latest: &[MouseEvent], _previous: &[MouseEvent]) {
        let Some(delta) = latest.iter().find_map(|e| e.wheel) else {
            debug!(events = latest.len(), "navigation: wheel batch without delta");
            return;
        };
        self.wheel.process(delta.dy);
    }

    // -------------------------------------------------------------------------
    // Gestures
    // -------------------------------------------------------------------------

    /// Start (`start = true`) or continue the gesture of the current mode.
    fn apply(&mut self, start: bool) {
        match self.mode {
            NavigationMode::Rotate => self.rotate(start),
            NavigationMode::Pan => self.pan(start),
            NavigationMode::Zoom => self.pinch(start),
            _ => {}
        }
    }

    fn project(&self, event: &PointerEvent) -> Option<Point> {
        let point = self.offsets.offsets(event, self.normalize).into_iter().next();
        if point.is_none() {
            warn!(pointer_id = event.pointer_id, "navigation: event projected to no point");
        }
        point
    }

    fn rotate(&mut self, start: bool) {
        if self.tracker.len() != 1 {
            info!(contacts = self.tracker.len(), "navigation: rotate needs exactly one contact");
            return;
        }
        let Some(point) = self.tracker.events().next().and_then(|e| self.project(e)) else {
            return;
        };
        let rotate = self.rotation.modifier_mut();
        if start {
            rotate.initiate(point);
        } else {
            rotate.process(point);
        }
    }

    fn pan(&mut self, start: bool) {
        let Some(primary) = self.tracker.primary() else {
            warn!(contacts = self.tracker.len(), "navigation: pan without primary contact");
            return;
        };
        let Some(point) = self.project(primary) else {
            return;
        };
        if start {
            self.pan.initiate(point);
        } else {
            self.pan.process(point);
        }
    }

    fn pinch(&mut self, start: bool) {
        if self.tracker.len() != MULTI_TOUCH_CONTACTS {
            info!(contacts = self.tracker.len(), "navigation: pinch needs exactly two contacts");
            return;
        }
        let Some((first, second)) = self.tracker.first_pair() else {
            return;
        };
        let (Some(a), Some(b)) = (self.project(first), self.project(second)) else {
            return;
        };
        if start {
            self.pinch.initiate(a, b);
        } else {
            self.pinch.process(a, b);
        }
    }
}

// =============================================================================
// NAVIGATION
// =============================================================================

/// Maps buffered pointer and wheel input to camera modifiers.
pub struct Navigation {
    dispatcher: EventDispatcher<NavigationState>,
    state: NavigationState,
    factory: Box<dyn ModifierFactory>,
}

impl fmt::Debug for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigation")
            .field("metaphor", &self.state.rotation.metaphor())
            .field("mode", &self.state.mode)
            .field("contacts", &self.state.tracker.len())
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}

impl Navigation {
    /// Wire navigation to `providers` and build its modifiers.
    ///
    /// # Errors
    ///
    /// [`NavigationError::MissingProvider`] when `providers` lacks the pointer
    /// or mouse family.
    pub fn new(
        config: NavigationConfig,
        providers: EventProviders,
        factory: Box<dyn ModifierFactory>,
        invalidate: Option<Invalidate>,
    ) -> Result<Self, NavigationError> {
        let pointer_lock = providers.pointer_lock.clone();
        let mut dispatcher = EventDispatcher::new(invalidate.clone(), providers);

        dispatcher.register_pointer_handler(PointerEventType::Down, NavigationState::on_pointer_down)?;
        dispatcher.register_pointer_handler(PointerEventType::Move, NavigationState::on_pointer_move)?;
        dispatcher.register_pointer_handler(PointerEventType::Up, NavigationState::on_pointer_release)?;
        dispatcher.register_pointer_handler(PointerEventType::Leave, NavigationState::on_pointer_release)?;
        dispatcher.register_pointer_handler(PointerEventType::Cancel, NavigationState::on_pointer_release)?;
        dispatcher.register_mouse_handler(MouseEventType::Wheel, NavigationState::on_wheel)?;

        let state = NavigationState {
            tracker: PointerTracker::new(),
            mode: NavigationMode::None,
            rotation: ActiveRotation::build(config.metaphor, factory.as_ref()),
            pan: factory.pan(),
            pinch: factory.pinch_zoom(),
            wheel: factory.wheel_zoom(),
            offsets: Box::new(Viewport::default()),
            pointer_lock,
            always_rotate_on_move: config.always_rotate_on_move,
            pan_threshold: config.pan_threshold,
            normalize: config.normalize_offsets,
            last_interaction: None,
            invalidate,
            camera: None,
        };

        info!(metaphor = %config.metaphor, "navigation: ready");
        Ok(Self { dispatcher, state, factory })
    }

    /// Process everything buffered since the last call. Call once per tick.
    pub fn update(&mut self) {
        self.dispatcher.update(&mut self.state);
    }

    /// Hand `camera` to every modifier.
    pub fn set_camera(&mut self, camera: Option<SharedCamera>) {
        self.state.set_camera(camera);
    }

    #[must_use]
    pub fn camera(&self) -> Option<&SharedCamera> {
        self.state.camera.as_ref()
    }

    /// Switch the rotate modifier. Switching releases pointer lock and turns
    /// off always-rotate-on-move.
    pub fn set_metaphor(&mut self, metaphor: NavigationMetaphor) {
        if self.state.rotation.metaphor() == metaphor {
            return;
        }

        self.dispatcher.exit_pointer_lock();
        self.state.always_rotate_on_move = false;

        let mut rotation = ActiveRotation::build(metaphor, self.factory.as_ref());
        rotation.modifier_mut().set_camera(self.state.camera.clone());
        self.state.rotation = rotation;

        info!(%metaphor, "navigation: metaphor changed");
        self.state.invalidate(true);
    }

    #[must_use]
    pub fn metaphor(&self) -> NavigationMetaphor {
        self.state.rotation.metaphor()
    }

    #[must_use]
    pub fn mode(&self) -> NavigationMode {
        self.state.mode
    }

    /// Number of contacts currently down.
    #[must_use]
    pub fn active_pointers(&self) -> usize {
        self.state.tracker.len()
    }

    #[must_use]
    pub fn tracker(&self) -> &PointerTracker {
        &self.state.tracker
    }

    /// When the last gesture-driving move was handled.
    #[must_use]
    pub fn last_interaction(&self) -> Option<Instant> {
        self.state.last_interaction
    }

    pub fn set_always_rotate_on_move(&mut self, enabled: bool) {
        self.state.always_rotate_on_move = enabled;
    }

    #[must_use]
    pub fn always_rotate_on_move(&self) -> bool {
        self.state.always_rotate_on_move
    }

    /// Replace the point projection, e.g. after the viewer element moved or
    /// the device pixel ratio changed.
    pub fn set_offsets(&mut self, offsets: impl Offsets + 'static) {
        self.state.offsets = Box::new(offsets);
    }

    pub fn request_pointer_lock(&self) {
        self.dispatcher.request_pointer_lock();
    }

    pub fn exit_pointer_lock(&self) {
        self.dispatcher.exit_pointer_lock();
    }

    /// Detach from the providers and forget all contacts.
    pub fn dispose(&mut self) {
        self.dispatcher.dispose();
        self.state.tracker.clear();
        self.state.mode = NavigationMode::None;
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.dispatcher.is_disposed()
    }
}
