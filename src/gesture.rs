//! Gesture resolution.
//!
//! DESIGN
//! ======
//! Both resolvers are pure functions over the [`PointerTracker`] snapshot.
//! `resolve_mode` picks the gesture from the primary contact and the contact
//! count; `resolve_multi_touch` settles the ambiguous two-contact state by
//! comparing the directions the two contacts moved in.
//!
//! Rules for `resolve_mode`, first match wins:
//!
//! | # | Condition                                                   | Mode         |
//! |---|-------------------------------------------------------------|--------------|
//! | 1 | pointer lock active and always-rotate-on-move               | `Rotate`     |
//! | 2 | mouse, primary button, shift, one contact                   | `Pan`        |
//! | 3 | touch or pen, two contacts                                  | `MultiTouch` |
//! | 4 | mouse with primary button, or touch or pen; one contact     | `Rotate`     |
//! | 5 | anything else                                               | `None`       |

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use tracing::warn;

use crate::consts::MULTI_TOUCH_CONTACTS;
use crate::input::PointerType;
use crate::tracker::PointerTracker;

/// The navigation intent derived from the active contacts, independent of
/// the metaphor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NavigationMode {
    /// No gesture in progress.
    #[default]
    None,
    Move,
    Pan,
    /// Two contacts are down but it is not yet clear whether they pan or
    /// pinch. Settled on the next move.
    MultiTouch,
    Rotate,
    Zoom,
    ZoomStep,
}

impl NavigationMode {
    #[must_use]
    pub fn is_active(self) -> bool {
        self != Self::None
    }
}

/// Select the navigation mode for the current set of contacts.
///
/// `pointer_locked_rotate` is true when pointer lock is active and the
/// controller rotates on every move regardless of buttons.
#[must_use]
pub fn resolve_mode(tracker: &PointerTracker, pointer_locked_rotate: bool) -> NavigationMode {
    let Some(primary) = tracker.primary() else {
        warn!(contacts = tracker.len(), "no primary pointer event detected");
        return NavigationMode::None;
    };

    if pointer_locked_rotate {
        return NavigationMode::Rotate;
    }

    let contacts = tracker.len();
    let is_mouse = primary.pointer_type == PointerType::Mouse;
    let is_touch = primary.pointer_type.is_touch_like();
    let button = primary.is_primary_button_down();

    if is_mouse && button && primary.modifiers.shift && contacts == 1 {
        NavigationMode::Pan
    } else if is_touch && contacts == MULTI_TOUCH_CONTACTS {
        NavigationMode::MultiTouch
    } else if ((is_mouse && button) || is_touch) && contacts == 1 {
        NavigationMode::Rotate
    } else {
        NavigationMode::None
    }
}

/// Decide whether an undecided two-contact gesture is a pan or a pinch zoom.
///
/// Parallel movement (cosine above `threshold`) pans; converging, diverging or
/// one stationary contact zooms.
#[must_use]
pub fn resolve_multi_touch(tracker: &PointerTracker, threshold: f64) -> NavigationMode {
    let pair = if tracker.len() == MULTI_TOUCH_CONTACTS { tracker.first_pair() } else { None };
    let Some((first, second)) = pair else {
        warn!(contacts = tracker.len(), "multi-touch resolution needs exactly two contacts");
        return NavigationMode::None;
    };

    let (Some(a), Some(b)) = (first.movement.normalized(), second.movement.normalized()) else {
        return NavigationMode::Zoom;
    };

    if a.dot(b) > threshold { NavigationMode::Pan } else { NavigationMode::Zoom }
}
