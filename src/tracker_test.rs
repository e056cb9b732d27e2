use super::*;
use crate::camera::Point;
use crate::input::PointerType;

fn touch(id: i32, primary: bool) -> PointerEvent {
    PointerEvent::new(id, PointerType::Touch, Point::new(f64::from(id), 0.0)).with_primary(primary)
}

fn ids(tracker: &PointerTracker) -> Vec<i32> {
    tracker.events().map(|e| e.pointer_id).collect()
}

#[test]
fn new_tracker_is_empty() {
    let tracker = PointerTracker::new();
    assert!(tracker.is_empty());
    assert_eq!(tracker.len(), 0);
    assert!(tracker.primary().is_none());
}

#[test]
fn upsert_adds_and_replaces_by_id() {
    let mut tracker = PointerTracker::new();
    tracker.upsert(&touch(1, true));
    tracker.upsert(&touch(2, false));
    assert_eq!(tracker.len(), 2);

    let moved = touch(1, true).with_movement(Point::new(3.0, 0.0));
    tracker.upsert(&moved);

    assert_eq!(tracker.len(), 2);
    assert_eq!(tracker.get(1).map(|e| e.movement), Some(Point::new(3.0, 0.0)));
}

#[test]
fn update_keeps_insertion_position() {
    let mut tracker = PointerTracker::new();
    tracker.upsert(&touch(5, true));
    tracker.upsert(&touch(3, false));
    tracker.upsert(&touch(5, true));
    assert_eq!(ids(&tracker), vec![5, 3]);
}

#[test]
fn remove_preserves_order_of_rest() {
    let mut tracker = PointerTracker::new();
    tracker.upsert(&touch(1, true));
    tracker.upsert(&touch(2, false));
    tracker.upsert(&touch(3, false));

    assert!(tracker.remove(2).is_some());
    assert_eq!(ids(&tracker), vec![1, 3]);
}

#[test]
fn remove_unknown_id_is_noop() {
    let mut tracker = PointerTracker::new();
    tracker.upsert(&touch(1, true));
    assert!(tracker.remove(42).is_none());
    assert_eq!(tracker.len(), 1);
}

#[test]
fn primary_is_first_flagged_contact() {
    let mut tracker = PointerTracker::new();
    tracker.upsert(&touch(1, false));
    tracker.upsert(&touch(2, true));
    assert_eq!(tracker.primary().map(|e| e.pointer_id), Some(2));
}

#[test]
fn primary_absent_when_no_contact_flagged() {
    let mut tracker = PointerTracker::new();
    tracker.upsert(&touch(1, false));
    assert!(tracker.primary().is_none());
}

#[test]
fn first_pair_requires_two_contacts() {
    let mut tracker = PointerTracker::new();
    tracker.upsert(&touch(1, true));
    assert!(tracker.first_pair().is_none());
    tracker.upsert(&touch(2, false));
    let pair = tracker.first_pair().map(|(a, b)| (a.pointer_id, b.pointer_id));
    assert_eq!(pair, Some((1, 2)));
}

#[test]
fn clear_empties_tracker() {
    let mut tracker = PointerTracker::new();
    tracker.upsert(&touch(1, true));
    tracker.clear();
    assert!(tracker.is_empty());
}
