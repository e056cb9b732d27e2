//! Camera modifier contracts.
//!
//! The modifiers own the camera math (turntable and trackball rotation, pan,
//! pinch and wheel zoom). Navigation only decides *which* modifier runs and
//! feeds it projected points through `initiate` (gesture start) and `process`
//! (gesture continuation). Concrete modifiers come from a
//! [`ModifierFactory`] supplied by the host.

use crate::camera::{Point, SharedCamera};

/// Anything that manipulates the shared camera.
pub trait CameraModifier {
    /// Point the modifier at a camera, or detach it with `None`.
    fn set_camera(&mut self, camera: Option<SharedCamera>);
}

/// A single-point drag gesture: turntable, trackball or pan.
pub trait DragModifier: CameraModifier {
    fn initiate(&mut self, point: Point);
    fn process(&mut self, point: Point);
}

/// A two-point pinch gesture.
pub trait PinchModifier: CameraModifier {
    fn initiate(&mut self, first: Point, second: Point);
    fn process(&mut self, first: Point, second: Point);
}

/// Stateless wheel zoom. `delta` is the vertical wheel delta.
pub trait WheelModifier: CameraModifier {
    fn process(&mut self, delta: f64);
}

/// Builds the modifiers navigation drives.
pub trait ModifierFactory {
    fn turntable(&self) -> Box<dyn DragModifier>;
    fn trackball(&self) -> Box<dyn DragModifier>;
    fn pan(&self) -> Box<dyn DragModifier>;
    fn pinch_zoom(&self) -> Box<dyn PinchModifier>;
    fn wheel_zoom(&self) -> Box<dyn WheelModifier>;
}
