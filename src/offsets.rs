//! Projection of input events to element-relative points.
//!
//! Gesture math never sees raw client coordinates. Every point handed to a
//! camera modifier goes through an [`Offsets`] implementation first, which
//! folds in the element position and the device pixel ratio.

#[cfg(test)]
#[path = "offsets_test.rs"]
mod offsets_test;

use crate::camera::Point;
use crate::consts::DEFAULT_DEVICE_PIXEL_RATIO;
use crate::input::{MouseEvent, PointerEvent, TouchEvent};

/// An event that can be placed on screen.
pub trait Located {
    /// Element-relative position reported by the platform, if the event
    /// family reports one at all.
    fn reported_offset(&self) -> Option<Point>;

    /// Viewport positions, one per contact.
    fn client_points(&self) -> Vec<Point>;
}

impl Located for PointerEvent {
    fn reported_offset(&self) -> Option<Point> {
        Some(self.offset)
    }

    fn client_points(&self) -> Vec<Point> {
        vec![self.client]
    }
}

impl Located for MouseEvent {
    fn reported_offset(&self) -> Option<Point> {
        Some(self.offset)
    }

    fn client_points(&self) -> Vec<Point> {
        vec![self.client]
    }
}

impl Located for TouchEvent {
    fn reported_offset(&self) -> Option<Point> {
        None
    }

    fn client_points(&self) -> Vec<Point> {
        self.touches.iter().map(|t| t.client).collect()
    }
}

/// Maps an event to one point per contact.
pub trait Offsets {
    /// Element-relative points for `event`, scaled to device pixels when
    /// `normalize` is set.
    fn offsets(&self, event: &dyn Located, normalize: bool) -> Vec<Point>;
}

/// Default projection: the target element's top-left corner in client space
/// and the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub left: f64,
    pub top: f64,
    pub device_pixel_ratio: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { left: 0.0, top: 0.0, device_pixel_ratio: DEFAULT_DEVICE_PIXEL_RATIO }
    }
}

impl Viewport {
    #[must_use]
    pub fn new(left: f64, top: f64, device_pixel_ratio: f64) -> Self {
        Self { left, top, device_pixel_ratio }
    }

    fn scale(&self, point: Point, normalize: bool) -> Point {
        if normalize { point.scale(self.device_pixel_ratio) } else { point }
    }
}

impl Offsets for Viewport {
    fn offsets(&self, event: &dyn Located, normalize: bool) -> Vec<Point> {
        // Some platforms report a zero offset instead of omitting it, so the
        // reported offset only counts when both axes are non-zero.
        if let Some(offset) = event.reported_offset().filter(|o| o.x.abs() > 0.0 && o.y.abs() > 0.0) {
            return vec![self.scale(offset, normalize)];
        }

        let origin = Point::new(self.left, self.top);
        event.client_points().into_iter().map(|client| self.scale((client - origin).floor(), normalize)).collect()
    }
}
