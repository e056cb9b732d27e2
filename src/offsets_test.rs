use super::*;
use crate::input::{PointerType, Touch};

fn pointer_at(client: Point, offset: Point) -> PointerEvent {
    PointerEvent::new(1, PointerType::Mouse, client).with_offset(offset)
}

#[test]
fn reported_offset_is_used_when_both_axes_set() {
    let viewport = Viewport::new(100.0, 50.0, 2.0);
    let event = pointer_at(Point::new(400.0, 300.0), Point::new(12.0, 7.0));

    assert_eq!(viewport.offsets(&event, false), vec![Point::new(12.0, 7.0)]);
    assert_eq!(viewport.offsets(&event, true), vec![Point::new(24.0, 14.0)]);
}

#[test]
fn zero_axis_falls_back_to_client_minus_origin() {
    let viewport = Viewport::new(100.0, 50.0, 1.0);
    let event = pointer_at(Point::new(130.7, 80.2), Point::new(0.0, 7.0));

    assert_eq!(viewport.offsets(&event, false), vec![Point::new(30.0, 30.0)]);
}

#[test]
fn client_rule_scales_by_pixel_ratio_when_normalized() {
    let viewport = Viewport::new(10.0, 10.0, 1.5);
    let event = pointer_at(Point::new(30.0, 50.0), Point::default());

    assert_eq!(viewport.offsets(&event, true), vec![Point::new(30.0, 60.0)]);
    assert_eq!(viewport.offsets(&event, false), vec![Point::new(20.0, 40.0)]);
}

#[test]
fn mouse_events_follow_the_same_rule() {
    let viewport = Viewport::default();
    let mut event = MouseEvent::new(Point::new(5.5, 6.5));
    assert_eq!(viewport.offsets(&event, true), vec![Point::new(5.0, 6.0)]);

    event.offset = Point::new(1.0, 2.0);
    assert_eq!(viewport.offsets(&event, true), vec![Point::new(1.0, 2.0)]);
}

#[test]
fn touch_events_yield_one_point_per_touch() {
    let viewport = Viewport::new(0.0, 100.0, 2.0);
    let event = TouchEvent {
        touches: vec![
            Touch { identifier: 0, client: Point::new(10.0, 110.0) },
            Touch { identifier: 1, client: Point::new(20.0, 120.0) },
        ],
        ..TouchEvent::default()
    };

    assert_eq!(viewport.offsets(&event, true), vec![Point::new(20.0, 20.0), Point::new(40.0, 40.0)]);
}

#[test]
fn empty_touch_event_yields_nothing() {
    assert!(Viewport::default().offsets(&TouchEvent::default(), true).is_empty());
}
