//! Render surface contract.
//!
//! The surface draws image objects with affine transforms, tracks the active
//! selection and keeps objects in z-order. The scene document drives it
//! through [`RenderSurface`] and learns about changes by draining
//! [`SurfaceEvent`]s after each call.
//!
//! Surfaces are built from a [`RenderSurfaceConfig`] value; control styling is
//! fixed for the lifetime of the instance.

mod memory;

pub use memory::MemorySurface;

use serde::{Deserialize, Serialize};

use decokit_core::constants::{DEFAULT_CANVAS_COLOR, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use decokit_core::{ImageRef, ImageSize, ObjectHandle, Point, Transform};

/// Z-order move applied to a single object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZOrder {
    ToFront,
    ToBack,
    ForwardOne,
    BackwardOne,
}

/// Lifecycle notification produced by a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    ObjectAdded(ObjectHandle),
    ObjectRemoved(ObjectHandle),
    /// Transform or stacking changed.
    ObjectModified(ObjectHandle),
    /// All objects and the background were dropped in one step.
    Cleared,
    /// Something became active while nothing was.
    SelectionCreated(ObjectHandle),
    /// The active object changed to another one.
    SelectionUpdated(ObjectHandle),
    SelectionCleared,
}

/// Shape of the resize/rotate corner handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CornerStyle {
    #[default]
    Circle,
    Rect,
}

/// Control handles that can be hidden on every object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlPoint {
    MiddleTop,
    MiddleBottom,
    MiddleLeft,
    MiddleRight,
}

/// Appearance of selection controls shared by all objects on a surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlStyle {
    pub corner_style: CornerStyle,
    pub corner_color: String,
    pub corner_stroke_color: String,
    pub border_color: String,
    pub transparent_corners: bool,
    pub corner_size: f64,
    pub rotate_handle_offset: f64,
    pub rotate_handle_size: f64,
    pub hidden_controls: Vec<ControlPoint>,
}

impl Default for ControlStyle {
    fn default() -> Self {
        Self {
            corner_style: CornerStyle::Circle,
            corner_color: "#6366f1".to_string(),
            corner_stroke_color: "#ffffff".to_string(),
            border_color: "#6366f1".to_string(),
            transparent_corners: false,
            corner_size: 12.0,
            rotate_handle_offset: 30.0,
            rotate_handle_size: 16.0,
            hidden_controls: vec![
                ControlPoint::MiddleTop,
                ControlPoint::MiddleBottom,
                ControlPoint::MiddleLeft,
                ControlPoint::MiddleRight,
            ],
        }
    }
}

/// Construction-time configuration of a render surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSurfaceConfig {
    pub width: f64,
    pub height: f64,
    pub background_color: String,
    /// Keep the selected object at its z position instead of lifting it.
    pub preserve_object_stacking: bool,
    pub controls: ControlStyle,
}

impl RenderSurfaceConfig {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Canvas centre in canvas coordinates.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Build a headless surface configured with these settings.
    pub fn build(self) -> Box<dyn RenderSurface> {
        Box::new(MemorySurface::new(self))
    }
}

impl Default for RenderSurfaceConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            background_color: DEFAULT_CANVAS_COLOR.to_string(),
            preserve_object_stacking: true,
            controls: ControlStyle::default(),
        }
    }
}

/// One drawable image object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceObject {
    pub handle: ObjectHandle,
    pub image: ImageRef,
    /// Natural pixel size of the decoded image.
    pub natural_size: ImageSize,
    pub transform: Transform,
}

impl SurfaceObject {
    /// Rendered width and height after scaling.
    pub fn scaled_size(&self) -> (f64, f64) {
        (
            f64::from(self.natural_size.width) * self.transform.scale_x.abs(),
            f64::from(self.natural_size.height) * self.transform.scale_y.abs(),
        )
    }

    /// Whether a canvas point falls inside the (rotated) object bounds.
    pub fn contains_point(&self, point: &Point) -> bool {
        let (w, h) = self.scaled_size();
        let dx = point.x - self.transform.position.x;
        let dy = point.y - self.transform.position.y;
        let (sin, cos) = (-self.transform.angle).to_radians().sin_cos();
        let local_x = dx * cos - dy * sin;
        let local_y = dx * sin + dy * cos;
        local_x.abs() <= w / 2.0 && local_y.abs() <= h / 2.0
    }
}

/// Background image stretched over the whole canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceBackground {
    pub image: ImageRef,
    pub natural_size: ImageSize,
    pub scale_x: f64,
    pub scale_y: f64,
}

/// Full serialized surface content.
///
/// Opaque to the document: it is stored and handed back whole.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceSnapshot {
    objects: Vec<SurfaceObject>,
    background: Option<SurfaceBackground>,
}

impl SurfaceSnapshot {
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }
}

/// Drawing and hit-testing capability consumed by the scene document.
pub trait RenderSurface: Send {
    fn config(&self) -> &RenderSurfaceConfig;

    /// Add an object on top of the stack.
    fn add_object(&mut self, image: ImageRef, natural_size: ImageSize, transform: Transform)
        -> ObjectHandle;

    /// Returns false for an unknown handle.
    fn remove_object(&mut self, handle: ObjectHandle) -> bool;

    fn object(&self, handle: ObjectHandle) -> Option<&SurfaceObject>;

    /// All handles, bottom of the stack first.
    fn handles(&self) -> Vec<ObjectHandle>;

    /// Make a single object active, or clear the selection with `None`.
    fn set_active(&mut self, handle: Option<ObjectHandle>) -> bool;

    /// Make several objects active at once; the last one is the primary.
    fn set_active_many(&mut self, handles: &[ObjectHandle]) -> bool;

    /// Primary active object.
    fn active_handle(&self) -> Option<ObjectHandle>;

    /// Every active object, primary last.
    fn active_handles(&self) -> Vec<ObjectHandle>;

    fn set_transform(&mut self, handle: ObjectHandle, transform: Transform) -> bool;

    fn reorder(&mut self, handle: ObjectHandle, direction: ZOrder) -> bool;

    fn set_background(&mut self, background: Option<SurfaceBackground>);

    fn background(&self) -> Option<&SurfaceBackground>;

    /// Drop every object and the background.
    fn clear(&mut self);

    fn serialize(&self) -> SurfaceSnapshot;

    /// Replace the whole content, keeping the snapshot's handles.
    fn deserialize(&mut self, snapshot: &SurfaceSnapshot);

    /// Take the events produced since the last call, oldest first.
    fn drain_events(&mut self) -> Vec<SurfaceEvent>;

    /// Recompute the on-screen offset after the host layout changed.
    fn recalculate_offset(&mut self);

    /// Topmost object under a canvas point.
    fn object_at(&self, point: &Point) -> Option<ObjectHandle>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RenderSurfaceConfig::default();
        assert_eq!(config.width, 800.0);
        assert_eq!(config.height, 600.0);
        assert!(config.preserve_object_stacking);
        assert_eq!(config.center(), Point::new(400.0, 300.0));
        assert_eq!(config.controls.hidden_controls.len(), 4);
    }

    #[test]
    fn test_factory_uses_config() {
        let surface = RenderSurfaceConfig::new(1024.0, 768.0).build();
        assert_eq!(surface.config().width, 1024.0);
        assert!(surface.handles().is_empty());
    }

    #[test]
    fn test_contains_point_rotated() {
        let object = SurfaceObject {
            handle: ObjectHandle(1),
            image: ImageRef::new("bar.png"),
            natural_size: ImageSize::new(100, 10),
            transform: Transform {
                angle: 90.0,
                ..Transform::centered(Point::new(0.0, 0.0), 1.0)
            },
        };
        // Rotated a quarter turn the bar stands upright.
        assert!(object.contains_point(&Point::new(0.0, 40.0)));
        assert!(!object.contains_point(&Point::new(40.0, 0.0)));
    }
}
