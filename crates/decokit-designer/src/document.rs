//! Scene document.
//!
//! Owns the placed items and the background, drives the render surface and
//! keeps a handle-keyed association table from surface objects to the catalog
//! items they came from.
//!
//! Every mutation, whether it comes from a document method or from direct
//! manipulation on the surface, ends up as a [`SceneEvent::StateChanged`] in
//! the outbox. Callers drain the outbox with [`SceneDocument::drain_events`].
//!
//! - `operations`: add, remove, reorder, duplicate, clear, restore
//! - `types`: records, snapshots and events

mod operations;
mod types;

pub use operations::PreparedBackground;
pub use types::{PlacedItem, PlacementRecord, SceneEvent, SceneSnapshot};

use std::collections::BTreeMap;
use std::sync::Arc;

use decokit_core::{Background, ObjectHandle};

use crate::image_loader::ImageLoader;
use crate::placement::PlacementSettings;
use crate::render_surface::{RenderSurface, SurfaceEvent};

pub struct SceneDocument {
    surface: Box<dyn RenderSurface>,
    loader: Arc<dyn ImageLoader>,
    settings: PlacementSettings,
    records: BTreeMap<ObjectHandle, PlacementRecord>,
    background: Option<Background>,
    placeholder_visible: bool,
    revision: u64,
    outbox: Vec<SceneEvent>,
}

impl SceneDocument {
    pub fn new(
        surface: Box<dyn RenderSurface>,
        loader: Arc<dyn ImageLoader>,
        settings: PlacementSettings,
    ) -> Self {
        Self {
            surface,
            loader,
            settings,
            records: BTreeMap::new(),
            background: None,
            placeholder_visible: true,
            revision: 0,
            outbox: Vec::new(),
        }
    }

    pub fn surface(&self) -> &dyn RenderSurface {
        self.surface.as_ref()
    }

    /// Direct access for host-driven manipulation (drag, rotate, resize).
    /// Changes made here are picked up on the next [`Self::drain_events`].
    pub fn surface_mut(&mut self) -> &mut dyn RenderSurface {
        self.surface.as_mut()
    }

    pub fn settings(&self) -> &PlacementSettings {
        &self.settings
    }

    pub fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }

    pub fn record(&self, handle: ObjectHandle) -> Option<&PlacementRecord> {
        self.records.get(&handle)
    }

    /// Placed items in stacking order, bottom first.
    ///
    /// Surface objects without a catalog record are not placed items.
    pub fn placed_items(&self) -> Vec<PlacedItem> {
        self.surface
            .handles()
            .into_iter()
            .enumerate()
            .filter_map(|(z_index, handle)| self.placed_item_at(handle, z_index))
            .collect()
    }

    pub fn placed_item(&self, handle: ObjectHandle) -> Option<PlacedItem> {
        let z_index = self.surface.handles().iter().position(|h| *h == handle)?;
        self.placed_item_at(handle, z_index)
    }

    fn placed_item_at(&self, handle: ObjectHandle, z_index: usize) -> Option<PlacedItem> {
        let record = self.records.get(&handle)?;
        let object = self.surface.object(handle)?;
        Some(PlacedItem {
            handle,
            item: record.item.clone(),
            image: record.image.clone(),
            variant: record.variant.clone(),
            transform: object.transform,
            z_index,
        })
    }

    pub fn item_count(&self) -> usize {
        self.surface
            .handles()
            .iter()
            .filter(|h| self.records.contains_key(h))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0 && self.background.is_none()
    }

    pub fn active_handle(&self) -> Option<ObjectHandle> {
        self.surface.active_handle()
    }

    pub fn active_handles(&self) -> Vec<ObjectHandle> {
        self.surface.active_handles()
    }

    pub fn has_active_item(&self) -> bool {
        self.surface.active_handle().is_some()
    }

    pub fn placeholder_visible(&self) -> bool {
        self.placeholder_visible
    }

    /// Number of state changes so far; replays count too.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            surface: self.surface.serialize(),
            background: self.background.clone(),
            records: self.records.clone(),
        }
    }

    /// Take pending notifications, oldest first.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        self.collect_surface_events();
        std::mem::take(&mut self.outbox)
    }

    fn collect_surface_events(&mut self) {
        for event in self.surface.drain_events() {
            match event {
                SurfaceEvent::ObjectRemoved(handle) => {
                    self.records.remove(&handle);
                    self.mark_changed();
                }
                SurfaceEvent::ObjectAdded(_)
                | SurfaceEvent::ObjectModified(_)
                | SurfaceEvent::Cleared => self.mark_changed(),
                SurfaceEvent::SelectionCreated(handle) | SurfaceEvent::SelectionUpdated(handle) => {
                    self.outbox.push(SceneEvent::SelectionChanged {
                        active: Some(handle),
                    })
                }
                SurfaceEvent::SelectionCleared => {
                    self.outbox.push(SceneEvent::SelectionChanged { active: None })
                }
            }
        }
    }

    fn mark_changed(&mut self) {
        self.revision += 1;
        self.outbox.push(SceneEvent::StateChanged {
            revision: self.revision,
        });
    }

    fn set_placeholder(&mut self, visible: bool) {
        if self.placeholder_visible != visible {
            self.placeholder_visible = visible;
            self.outbox
                .push(SceneEvent::PlaceholderVisibility { visible });
        }
    }
}

impl std::fmt::Debug for SceneDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneDocument")
            .field("items", &self.item_count())
            .field("background", &self.background.as_ref().map(|b| &b.name))
            .field("revision", &self.revision)
            .finish()
    }
}
