//! Screen-space points and the shared camera handle modifiers act on.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use std::cell::RefCell;
use std::ops::{Add, Sub};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// A point (or per-frame movement vector) in element-relative screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length when treated as a vector.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction, or `None` for the zero vector.
    #[must_use]
    pub fn normalized(self) -> Option<Self> {
        let len = self.length();
        if len <= 0.0 || !len.is_finite() {
            return None;
        }
        Some(Self { x: self.x / len, y: self.y / len })
    }

    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self { x: self.x * factor, y: self.y * factor }
    }

    #[must_use]
    pub fn floor(self) -> Self {
        Self { x: self.x.floor(), y: self.y.floor() }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

/// Viewer camera state that the modifiers manipulate.
///
/// This crate only routes the camera to the modifiers; it never reads or
/// writes these fields itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Eye position in world space.
    pub eye: [f64; 3],
    /// Look-at target in world space.
    pub center: [f64; 3],
    /// Up direction.
    pub up: [f64; 3],
    /// Vertical field of view in degrees.
    pub fovy: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { eye: [0.0, 0.0, 1.0], center: [0.0, 0.0, 0.0], up: [0.0, 1.0, 0.0], fovy: 45.0 }
    }
}

/// Camera handle shared between the host renderer and the modifiers.
pub type SharedCamera = Rc<RefCell<Camera>>;

/// Wrap a camera into a [`SharedCamera`].
#[must_use]
pub fn shared(camera: Camera) -> SharedCamera {
    Rc::new(RefCell::new(camera))
}
