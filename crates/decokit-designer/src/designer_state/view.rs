//! Zoom and resize handling for designer state.

use std::time::Instant;

use decokit_core::{AppEvent, ViewEvent};

use super::DesignerState;

impl DesignerState {
    pub fn zoom_in(&mut self) -> f64 {
        let zoom = self.zoom.zoom_in();
        self.emit_zoom(zoom);
        zoom
    }

    pub fn zoom_out(&mut self) -> f64 {
        let zoom = self.zoom.zoom_out();
        self.emit_zoom(zoom);
        zoom
    }

    pub fn reset_zoom(&mut self) -> f64 {
        let zoom = self.zoom.reset();
        self.emit_zoom(zoom);
        zoom
    }

    /// Record a window resize. The offset is recalculated once the burst
    /// settles, on a later [`Self::tick`].
    pub fn on_window_resize(&mut self, now: Instant) {
        self.resize.trigger(now);
    }

    /// Run deferred work that is due at `now`. Returns true if the surface
    /// offset was recalculated.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.resize.poll(now) {
            return false;
        }
        self.document.recalculate_offset();
        tracing::debug!("Surface offset recalculated");
        self.emit(AppEvent::View(ViewEvent::SurfaceOffsetRecalculated));
        true
    }

    fn emit_zoom(&self, zoom: f64) {
        self.emit(AppEvent::View(ViewEvent::ZoomChanged { zoom }));
    }
}
