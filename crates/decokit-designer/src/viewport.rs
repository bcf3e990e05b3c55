//! View zoom.
//!
//! Zoom is a pure visual scale applied to the canvas container. Document
//! coordinates, item transforms and history never see it.

use std::fmt;

use decokit_core::constants::{MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
use decokit_core::Point;

const ZOOM_PRECISION: f64 = 1e9;

/// Clamped, stepped view scale (1.0 = 100%).
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomController {
    zoom: f64,
    min: f64,
    max: f64,
    step: f64,
}

impl ZoomController {
    /// Bounds are swapped if given in the wrong order.
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            zoom: 1.0_f64.clamp(min, max),
            min,
            max,
            step: step.abs(),
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Clamp to the bounds. Returns the new zoom.
    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        let clamped = zoom.clamp(self.min, self.max);
        self.zoom = (clamped * ZOOM_PRECISION).round() / ZOOM_PRECISION;
        self.zoom
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.set_zoom(self.snap(self.zoom + self.step))
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.set_zoom(self.snap(self.zoom - self.step))
    }

    /// Nearest point on the step grid anchored at `min`, so repeated steps
    /// do not accumulate float drift.
    fn snap(&self, zoom: f64) -> f64 {
        if self.step <= 0.0 {
            return zoom;
        }
        self.min + ((zoom - self.min) / self.step).round() * self.step
    }

    pub fn reset(&mut self) -> f64 {
        self.set_zoom(1.0)
    }

    pub fn is_at_max(&self) -> bool {
        self.zoom >= self.max
    }

    pub fn is_at_min(&self) -> bool {
        self.zoom <= self.min
    }

    /// Converts a point on the zoomed container to canvas coordinates.
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point::new(screen.x / self.zoom, screen.y / self.zoom)
    }

    /// Converts canvas coordinates to a point on the zoomed container.
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point::new(canvas.x * self.zoom, canvas.y * self.zoom)
    }
}

impl Default for ZoomController {
    fn default() -> Self {
        Self::new(MIN_ZOOM, MAX_ZOOM, ZOOM_STEP)
    }
}

impl fmt::Display for ZoomController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.zoom * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let mut zoom = ZoomController::default();
        assert_eq!(zoom.to_string(), "100%");
        zoom.zoom_out();
        assert_eq!(zoom.to_string(), "90%");
    }

    #[test]
    fn test_screen_canvas_mapping() {
        let mut zoom = ZoomController::default();
        zoom.set_zoom(2.0);
        let screen = zoom.canvas_to_screen(Point::new(10.0, 20.0));
        assert_eq!(screen, Point::new(20.0, 40.0));
        assert_eq!(zoom.screen_to_canvas(screen), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_fine_step_still_moves() {
        let mut zoom = ZoomController::new(0.5, 2.0, 0.004);
        assert_eq!(zoom.zoom_in(), 1.004);
        assert_eq!(zoom.zoom_out(), 1.0);
        assert_eq!(zoom.zoom_out(), 0.996);
    }

    #[test]
    fn test_swapped_bounds() {
        let zoom = ZoomController::new(2.0, 0.5, -0.1);
        assert_eq!(zoom.min(), 0.5);
        assert_eq!(zoom.max(), 2.0);
        assert_eq!(zoom.step(), 0.1);
    }
}
