//! Item operations (place, remove, duplicate, layers, quantities) for designer state.

use std::future::Future;

use decokit_core::{Background, CatalogItem, ObjectHandle, SceneError, Transform};

use super::DesignerState;
use crate::document::PreparedBackground;
use crate::grouping::{parse_quantity, GroupKey, QuantityStep};
use crate::placement::{PlacementOptions, PreparedPlacement};
use crate::render_surface::ZOrder;

impl DesignerState {
    /// Load and place a catalog item. Failures leave the document untouched
    /// and raise a notification.
    pub async fn add_item(
        &mut self,
        item: &CatalogItem,
        options: &PlacementOptions,
    ) -> Result<ObjectHandle, SceneError> {
        let pending = self.document.prepare_item(item, options);
        self.finish_placement(pending.await)
    }

    /// Start loading an item without holding the designer.
    ///
    /// Several loads may be in flight; hand each result to
    /// [`Self::finish_placement`] as it completes.
    pub fn begin_placement(
        &self,
        item: &CatalogItem,
        options: &PlacementOptions,
    ) -> impl Future<Output = Result<PreparedPlacement, SceneError>> + Send + 'static {
        self.document.prepare_item(item, options)
    }

    pub fn finish_placement(
        &mut self,
        prepared: Result<PreparedPlacement, SceneError>,
    ) -> Result<ObjectHandle, SceneError> {
        match prepared {
            Ok(prepared) => {
                let handle = self.document.apply_placement(prepared);
                self.pump();
                Ok(handle)
            }
            Err(e) => {
                self.notify_error("Could not add item", &e);
                Err(e)
            }
        }
    }

    pub async fn set_background(&mut self, background: &Background) -> Result<(), SceneError> {
        let pending = self.document.prepare_background(background);
        self.finish_background(pending.await)
    }

    pub fn begin_background(
        &self,
        background: &Background,
    ) -> impl Future<Output = Result<PreparedBackground, SceneError>> + Send + 'static {
        self.document.prepare_background(background)
    }

    pub fn finish_background(
        &mut self,
        prepared: Result<PreparedBackground, SceneError>,
    ) -> Result<(), SceneError> {
        match prepared {
            Ok(prepared) => {
                self.document.apply_background(prepared);
                self.pump();
                Ok(())
            }
            Err(e) => {
                self.notify_error("Could not set background", &e);
                Err(e)
            }
        }
    }

    /// Delete one placed item, e.g. from its summary row.
    pub fn remove_item(&mut self, handle: ObjectHandle) -> Result<(), SceneError> {
        self.document.remove_item(handle)?;
        self.pump();
        Ok(())
    }

    /// Delete every selected item as one undo step.
    pub fn remove_selected(&mut self) -> Result<usize, SceneError> {
        let removed = self.document.remove_selected()?;
        self.pump();
        Ok(removed)
    }

    pub fn duplicate_selected(&mut self) -> Result<ObjectHandle, SceneError> {
        let clone = self.document.duplicate_selected()?;
        self.pump();
        Ok(clone)
    }

    pub fn duplicate(&mut self, handle: ObjectHandle) -> Result<ObjectHandle, SceneError> {
        let clone = self.document.duplicate(handle)?;
        self.pump();
        Ok(clone)
    }

    pub fn reorder_selected(&mut self, direction: ZOrder) -> Result<(), SceneError> {
        self.document.reorder_selected(direction)?;
        self.pump();
        Ok(())
    }

    pub fn reorder(&mut self, handle: ObjectHandle, direction: ZOrder) -> Result<(), SceneError> {
        self.document.reorder(handle, direction)?;
        self.pump();
        Ok(())
    }

    /// Move, scale, rotate or flip an item as a direct manipulation would.
    pub fn set_transform(
        &mut self,
        handle: ObjectHandle,
        transform: Transform,
    ) -> Result<(), SceneError> {
        self.document.set_transform(handle, transform)?;
        self.pump();
        Ok(())
    }

    /// Empty the canvas. Undoable.
    pub fn clear(&mut self) {
        self.document.clear();
        self.pump();
    }

    /// Key of the group at `group_index` in the current summary.
    pub fn group_key(&mut self, group_index: usize) -> Option<GroupKey> {
        self.pump();
        self.grouping
            .groups(&self.document)
            .get(group_index)
            .map(|g| g.key.clone())
    }

    pub fn group_quantity(&mut self, group_index: usize) -> Option<usize> {
        self.pump();
        self.grouping
            .groups(&self.document)
            .get(group_index)
            .map(|g| g.quantity())
    }

    pub async fn increment(&mut self, group_index: usize) -> Result<(), SceneError> {
        let Some(key) = self.group_key(group_index) else {
            return Ok(());
        };
        self.step_quantity(&key, QuantityStep::Increment).await.map(|_| ())
    }

    pub fn decrement(&mut self, group_index: usize) -> Result<(), SceneError> {
        let Some(key) = self.group_key(group_index) else {
            return Ok(());
        };
        let removed = self.grouping.decrement(&mut self.document, &key)?;
        if removed.is_some() {
            self.pump();
        }
        Ok(())
    }

    /// Bring a group to `target` members, one unit change at a time.
    ///
    /// Each unit change is its own undo step.
    pub async fn set_quantity(
        &mut self,
        group_index: usize,
        target: usize,
    ) -> Result<usize, SceneError> {
        let Some(key) = self.group_key(group_index) else {
            return Ok(0);
        };

        let mut steps = 0;
        while let Some(step) = self.grouping.next_step(&self.document, &key, target) {
            if !self.step_quantity(&key, step).await? {
                break;
            }
            steps += 1;
        }
        tracing::debug!("Quantity of group {} set to {} in {} steps", group_index, target.max(1), steps);
        Ok(steps)
    }

    /// Quantity entry from the summary list. Invalid text is treated as 1.
    pub async fn set_quantity_text(
        &mut self,
        group_index: usize,
        input: &str,
    ) -> Result<usize, SceneError> {
        self.set_quantity(group_index, parse_quantity(input)).await
    }

    async fn step_quantity(&mut self, key: &GroupKey, step: QuantityStep) -> Result<bool, SceneError> {
        let changed = match step {
            QuantityStep::Increment => match self.grouping.increment(&mut self.document, key).await {
                Ok(handle) => handle.is_some(),
                Err(e) => {
                    self.notify_error("Could not add item", &e);
                    return Err(e);
                }
            },
            QuantityStep::Decrement => self.grouping.decrement(&mut self.document, key)?.is_some(),
        };
        if changed {
            self.pump();
        }
        Ok(changed)
    }
}
