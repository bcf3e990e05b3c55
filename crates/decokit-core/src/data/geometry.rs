//! Canvas geometry types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of an object on a render surface
///
/// Handles are allocated by the surface, never reused, and survive a
/// serialize/deserialize round trip of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectHandle(pub u64);

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A point in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point moved by the given offsets
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Natural pixel dimensions of a decoded image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    /// Create a new image size
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The longer side in pixels
    pub fn longer_side(&self) -> f64 {
        f64::from(self.width.max(self.height))
    }

    /// Whether either side is zero
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Placement of an object on the canvas
///
/// `position` is the object's centre. `angle` is in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Point,
    pub scale_x: f64,
    pub scale_y: f64,
    pub angle: f64,
    pub flip_x: bool,
}

impl Transform {
    /// Uniformly scaled transform centred at `position`
    pub fn centered(position: Point, scale: f64) -> Self {
        Self {
            position,
            scale_x: scale,
            scale_y: scale,
            angle: 0.0,
            flip_x: false,
        }
    }

    /// Same transform moved by the given offsets
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            position: self.position.offset(dx, dy),
            ..*self
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::centered(Point::default(), 1.0)
    }
}
