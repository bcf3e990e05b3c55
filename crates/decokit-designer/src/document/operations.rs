//! Document mutations.
//!
//! Fallible operations check everything they need before touching the
//! surface, so an error always leaves the document as it was.

use std::future::Future;
use std::sync::Arc;

use decokit_core::{Background, CatalogItem, ImageSize, ObjectHandle, SceneError, Transform};

use super::{PlacementRecord, SceneDocument, SceneEvent, SceneSnapshot};
use crate::placement::{self, PlacementOptions, PreparedPlacement};
use crate::render_surface::{SurfaceBackground, ZOrder};

/// A background whose image is already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedBackground {
    pub background: Background,
    pub natural_size: ImageSize,
}

impl SceneDocument {
    /// Resolve and load the item's image without borrowing the document.
    ///
    /// The returned future can run while other edits proceed; apply its
    /// result with [`Self::apply_placement`] in completion order.
    pub fn prepare_item(
        &self,
        item: &CatalogItem,
        options: &PlacementOptions,
    ) -> impl Future<Output = Result<PreparedPlacement, SceneError>> + Send + 'static {
        let loader = Arc::clone(&self.loader);
        let item = item.clone();
        let options = options.clone();
        let settings = self.settings.clone();
        let center = self.surface.config().center();

        async move { placement::prepare(loader.as_ref(), &item, &options, &settings, center).await }
    }

    /// Put a prepared item on the canvas and make it active.
    pub fn apply_placement(&mut self, prepared: PreparedPlacement) -> ObjectHandle {
        let PreparedPlacement {
            item,
            image,
            natural_size,
            transform,
            variant,
        } = prepared;

        let handle = self
            .surface
            .add_object(image.clone(), natural_size, transform);
        tracing::info!("Placed '{}' as {}", item.name, handle);

        self.records.insert(
            handle,
            PlacementRecord {
                item,
                image,
                variant,
            },
        );
        self.surface.set_active(Some(handle));
        self.set_placeholder(false);
        self.collect_surface_events();
        handle
    }

    /// Load and place a catalog item centred on the canvas.
    pub async fn add_item(
        &mut self,
        item: &CatalogItem,
        options: &PlacementOptions,
    ) -> Result<ObjectHandle, SceneError> {
        let prepared = self.prepare_item(item, options).await?;
        Ok(self.apply_placement(prepared))
    }

    /// Validate the background record and load its image.
    pub fn prepare_background(
        &self,
        background: &Background,
    ) -> impl Future<Output = Result<PreparedBackground, SceneError>> + Send + 'static {
        let loader = Arc::clone(&self.loader);
        let background = background.clone();

        async move {
            let image = background
                .image()
                .cloned()
                .ok_or_else(|| SceneError::InvalidBackgroundData {
                    reason: format!("background '{}' has no image reference", background.name),
                })?;
            let natural_size = loader.load(&image).await?;
            Ok(PreparedBackground {
                background,
                natural_size,
            })
        }
    }

    /// Stretch a prepared background over the whole canvas.
    pub fn apply_background(&mut self, prepared: PreparedBackground) {
        let PreparedBackground {
            background,
            natural_size,
        } = prepared;
        let Some(image) = background.image().cloned() else {
            return;
        };

        let config = self.surface.config();
        let scale_x = config.width / f64::from(natural_size.width.max(1));
        let scale_y = config.height / f64::from(natural_size.height.max(1));

        self.surface.set_background(Some(SurfaceBackground {
            image: image.clone(),
            natural_size,
            scale_x,
            scale_y,
        }));
        tracing::info!("Background set to '{}'", background.name);
        self.background = Some(background);

        self.outbox
            .push(SceneEvent::BackgroundChanged { image: Some(image) });
        self.set_placeholder(false);
        self.mark_changed();
    }

    pub async fn set_background(&mut self, background: &Background) -> Result<(), SceneError> {
        let prepared = self.prepare_background(background).await?;
        self.apply_background(prepared);
        Ok(())
    }

    /// Remove one item and clear the selection.
    pub fn remove_item(&mut self, handle: ObjectHandle) -> Result<(), SceneError> {
        if !self.surface.remove_object(handle) {
            return Err(SceneError::UnknownHandle { handle });
        }
        self.records.remove(&handle);
        self.surface.set_active(None);
        tracing::debug!("Removed {}", handle);
        self.collect_surface_events();
        Ok(())
    }

    /// Remove every selected item. Returns how many were removed.
    pub fn remove_selected(&mut self) -> Result<usize, SceneError> {
        let handles = self.surface.active_handles();
        if handles.is_empty() {
            return Err(SceneError::NothingSelected);
        }

        let mut removed = 0;
        for handle in handles {
            if self.surface.remove_object(handle) {
                self.records.remove(&handle);
                removed += 1;
            }
        }
        self.surface.set_active(None);
        tracing::debug!("Removed {} selected items", removed);
        self.collect_surface_events();
        Ok(removed)
    }

    pub fn reorder(&mut self, handle: ObjectHandle, direction: ZOrder) -> Result<(), SceneError> {
        if !self.surface.reorder(handle, direction) {
            return Err(SceneError::UnknownHandle { handle });
        }
        self.collect_surface_events();
        Ok(())
    }

    pub fn reorder_selected(&mut self, direction: ZOrder) -> Result<(), SceneError> {
        let handle = self
            .surface
            .active_handle()
            .ok_or(SceneError::NothingSelected)?;
        self.reorder(handle, direction)
    }

    /// Clone an item, offset it and make the clone active.
    pub fn duplicate(&mut self, handle: ObjectHandle) -> Result<ObjectHandle, SceneError> {
        let (object, record) = match (self.surface.object(handle), self.records.get(&handle)) {
            (Some(object), Some(record)) => (object.clone(), record.clone()),
            _ => return Err(SceneError::UnknownHandle { handle }),
        };

        let offset = self.settings.duplicate_offset;
        let clone = self.surface.add_object(
            object.image,
            object.natural_size,
            object.transform.translated(offset, offset),
        );
        self.records.insert(clone, record);
        self.surface.set_active(Some(clone));
        tracing::debug!("Duplicated {} as {}", handle, clone);
        self.collect_surface_events();
        Ok(clone)
    }

    pub fn duplicate_selected(&mut self) -> Result<ObjectHandle, SceneError> {
        let handle = self
            .surface
            .active_handle()
            .ok_or(SceneError::NothingSelected)?;
        self.duplicate(handle)
    }

    /// Apply a transform as if the user dragged the object.
    pub fn set_transform(
        &mut self,
        handle: ObjectHandle,
        transform: Transform,
    ) -> Result<(), SceneError> {
        if !self.records.contains_key(&handle) || !self.surface.set_transform(handle, transform) {
            return Err(SceneError::UnknownHandle { handle });
        }
        self.collect_surface_events();
        Ok(())
    }

    pub fn select(&mut self, handle: Option<ObjectHandle>) -> Result<(), SceneError> {
        if let Some(handle) = handle {
            if !self.records.contains_key(&handle) {
                return Err(SceneError::UnknownHandle { handle });
            }
        }
        self.surface.set_active(handle);
        self.collect_surface_events();
        Ok(())
    }

    pub fn select_many(&mut self, handles: &[ObjectHandle]) -> Result<(), SceneError> {
        if let Some(unknown) = handles.iter().find(|h| !self.records.contains_key(h)) {
            return Err(SceneError::UnknownHandle { handle: *unknown });
        }
        self.surface.set_active_many(handles);
        self.collect_surface_events();
        Ok(())
    }

    /// Empty the document and show the placeholder again.
    pub fn clear(&mut self) {
        let had_background = self.background.take().is_some();
        self.surface.clear();
        self.records.clear();
        if had_background {
            self.outbox
                .push(SceneEvent::BackgroundChanged { image: None });
        }
        self.set_placeholder(true);
        tracing::info!("Canvas cleared");
        self.collect_surface_events();
    }

    /// Replace the whole document with a snapshot.
    pub fn restore(&mut self, snapshot: &SceneSnapshot) {
        self.surface.deserialize(&snapshot.surface);
        self.records = snapshot.records.clone();

        if self.background != snapshot.background {
            self.background = snapshot.background.clone();
            self.outbox.push(SceneEvent::BackgroundChanged {
                image: self.background.as_ref().and_then(|b| b.image().cloned()),
            });
        }
        self.set_placeholder(snapshot.is_empty());
        self.collect_surface_events();
    }

    pub fn recalculate_offset(&mut self) {
        self.surface.recalculate_offset();
    }
}
