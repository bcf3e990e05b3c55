//! Scene document value types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use decokit_core::{Background, CatalogItem, Error, ImageRef, ObjectHandle, Result, Transform};

use crate::placement::SizeVariant;
use crate::render_surface::SurfaceSnapshot;

/// What the document remembers about a surface object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRecord {
    /// Catalog item the object was created from.
    pub item: CatalogItem,
    /// Image actually drawn.
    pub image: ImageRef,
    /// Variant chosen at placement time.
    pub variant: Option<SizeVariant>,
}

/// A placed item as seen from outside the document.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedItem {
    pub handle: ObjectHandle,
    pub item: CatalogItem,
    pub image: ImageRef,
    pub variant: Option<SizeVariant>,
    pub transform: Transform,
    /// Position in the stack, 0 is the bottom.
    pub z_index: usize,
}

/// Immutable copy of the whole document at one point in time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub(crate) surface: SurfaceSnapshot,
    pub(crate) background: Option<Background>,
    pub(crate) records: BTreeMap<ObjectHandle, PlacementRecord>,
}

impl SceneSnapshot {
    pub fn item_count(&self) -> usize {
        self.surface.object_count()
    }

    pub fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0 && self.background.is_none()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::other(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::other(e.to_string()))
    }
}

/// Notification raised by the scene document.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    /// One mutation happened. Replays produce these too; the history guard
    /// decides whether they are captured.
    StateChanged { revision: u64 },
    /// The primary selection changed.
    SelectionChanged { active: Option<ObjectHandle> },
    PlaceholderVisibility { visible: bool },
    BackgroundChanged { image: Option<ImageRef> },
}
