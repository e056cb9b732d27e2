use super::*;
use crate::camera::Point;
use crate::consts::PAN_COSINE_THRESHOLD;
use crate::input::{Modifiers, PointerEvent};

fn mouse(buttons: u16) -> PointerEvent {
    PointerEvent::new(1, PointerType::Mouse, Point::new(10.0, 10.0)).with_buttons(buttons)
}

fn touch(id: i32, primary: bool, movement: Point) -> PointerEvent {
    PointerEvent::new(id, PointerType::Touch, Point::new(f64::from(id) * 10.0, 0.0))
        .with_primary(primary)
        .with_movement(movement)
}

fn tracker_of(events: &[PointerEvent]) -> PointerTracker {
    let mut tracker = PointerTracker::new();
    for event in events {
        tracker.upsert(event);
    }
    tracker
}

fn pair(a: Point, b: Point) -> PointerTracker {
    tracker_of(&[touch(1, true, a), touch(2, false, b)])
}

// =============================================================
// resolve_mode
// =============================================================

#[test]
fn mouse_with_primary_button_rotates() {
    let tracker = tracker_of(&[mouse(1)]);
    assert_eq!(resolve_mode(&tracker, false), NavigationMode::Rotate);
}

#[test]
fn mouse_with_shift_pans() {
    let tracker = tracker_of(&[mouse(1).with_modifiers(Modifiers::shift())]);
    assert_eq!(resolve_mode(&tracker, false), NavigationMode::Pan);
}

#[test]
fn mouse_without_button_is_idle() {
    let tracker = tracker_of(&[mouse(0)]);
    assert_eq!(resolve_mode(&tracker, false), NavigationMode::None);
}

#[test]
fn shift_without_button_is_idle() {
    let tracker = tracker_of(&[mouse(0).with_modifiers(Modifiers::shift())]);
    assert_eq!(resolve_mode(&tracker, false), NavigationMode::None);
}

#[test]
fn secondary_button_alone_is_idle() {
    let tracker = tracker_of(&[mouse(2)]);
    assert_eq!(resolve_mode(&tracker, false), NavigationMode::None);
}

#[test]
fn single_touch_rotates() {
    let tracker = tracker_of(&[touch(1, true, Point::default())]);
    assert_eq!(resolve_mode(&tracker, false), NavigationMode::Rotate);
}

#[test]
fn single_pen_rotates() {
    let pen = PointerEvent::new(4, PointerType::Pen, Point::default());
    assert_eq!(resolve_mode(&tracker_of(&[pen]), false), NavigationMode::Rotate);
}

#[test]
fn two_touches_are_multi_touch() {
    let tracker = pair(Point::default(), Point::default());
    assert_eq!(resolve_mode(&tracker, false), NavigationMode::MultiTouch);
}

#[test]
fn three_touches_are_idle() {
    let tracker = tracker_of(&[
        touch(1, true, Point::default()),
        touch(2, false, Point::default()),
        touch(3, false, Point::default()),
    ]);
    assert_eq!(resolve_mode(&tracker, false), NavigationMode::None);
}

#[test]
fn pointer_locked_rotate_wins_over_everything() {
    let tracker = tracker_of(&[mouse(0).with_modifiers(Modifiers::shift())]);
    assert_eq!(resolve_mode(&tracker, true), NavigationMode::Rotate);
}

#[test]
fn no_primary_contact_is_idle() {
    let tracker = tracker_of(&[touch(1, false, Point::default())]);
    assert_eq!(resolve_mode(&tracker, true), NavigationMode::None);
}

#[test]
fn empty_tracker_is_idle() {
    assert_eq!(resolve_mode(&PointerTracker::new(), false), NavigationMode::None);
}

// =============================================================
// resolve_multi_touch
// =============================================================

#[test]
fn parallel_movement_pans() {
    let tracker = pair(Point::new(1.0, 0.0), Point::new(2.0, 0.0));
    assert_eq!(resolve_multi_touch(&tracker, PAN_COSINE_THRESHOLD), NavigationMode::Pan);
}

#[test]
fn anti_parallel_movement_zooms() {
    let tracker = pair(Point::new(1.0, 0.0), Point::new(-1.0, 0.0));
    assert_eq!(resolve_multi_touch(&tracker, PAN_COSINE_THRESHOLD), NavigationMode::Zoom);
}

#[test]
fn perpendicular_movement_zooms() {
    let tracker = pair(Point::new(1.0, 0.0), Point::new(0.0, 1.0));
    assert_eq!(resolve_multi_touch(&tracker, PAN_COSINE_THRESHOLD), NavigationMode::Zoom);
}

#[test]
fn stationary_contact_zooms() {
    let tracker = pair(Point::new(3.0, 4.0), Point::default());
    assert_eq!(resolve_multi_touch(&tracker, PAN_COSINE_THRESHOLD), NavigationMode::Zoom);
}

#[test]
fn threshold_splits_pan_from_zoom() {
    // 60 degrees apart, cosine 0.5.
    let tracker = pair(Point::new(1.0, 0.0), Point::new(0.5, 3.0_f64.sqrt() / 2.0));
    assert_eq!(resolve_multi_touch(&tracker, 0.6), NavigationMode::Zoom);
    assert_eq!(resolve_multi_touch(&tracker, 0.4), NavigationMode::Pan);
}

#[test]
fn single_contact_cannot_resolve() {
    let tracker = tracker_of(&[touch(1, true, Point::new(1.0, 0.0))]);
    assert_eq!(resolve_multi_touch(&tracker, PAN_COSINE_THRESHOLD), NavigationMode::None);
}

#[test]
fn mode_default_is_inactive() {
    assert!(!NavigationMode::default().is_active());
    assert!(NavigationMode::MultiTouch.is_active());
}
