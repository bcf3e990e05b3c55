//! Selection operations for designer state.

use decokit_core::{AppEvent, ObjectHandle, Point, SceneError};

use super::DesignerState;

impl DesignerState {
    /// Make `handle` the active item, or clear the selection.
    pub fn select(&mut self, handle: Option<ObjectHandle>) -> Result<(), SceneError> {
        self.document.select(handle)?;
        self.pump();
        Ok(())
    }

    /// Select whatever is under `point`, topmost first. Clicking empty
    /// canvas clears the selection.
    pub fn click(&mut self, point: Point) -> Option<ObjectHandle> {
        let hit = self
            .document
            .surface()
            .object_at(&point)
            .filter(|h| self.document.record(*h).is_some());
        if self.select(hit).is_err() {
            return None;
        }
        hit
    }

    /// Select every member of a summary row.
    pub fn select_group(&mut self, group_index: usize) -> Result<(), SceneError> {
        // Rows must reflect host edits made since the last pump.
        self.pump();
        let handles = self
            .grouping
            .groups(&self.document)
            .get(group_index)
            .map(|g| g.handles())
            .unwrap_or_default();
        if handles.is_empty() {
            return Err(SceneError::NothingSelected);
        }
        self.document.select_many(&handles)?;
        self.pump();
        Ok(())
    }

    pub(super) fn sync_selection(&mut self, active: Option<ObjectHandle>) {
        let groups = self.grouping.groups(&self.document);
        let event = self.bridge.on_selection(active, groups);
        self.emit(AppEvent::Selection(event));
    }
}
