//! # DecoKit Designer
//!
//! The scene document and everything that keeps it consistent: placement of
//! catalog items on a render surface, bounded undo/redo over whole-document
//! snapshots, quantity grouping for the summary list, selection sync and the
//! view zoom.
//!
//! ## Architecture
//!
//! ```text
//! RenderSurface (objects, z-order, selection, snapshots)
//!   └── SceneDocument (placed items + background, handle → catalog record)
//!         ├── HistoryManager (snapshots, cursor, replay guard)
//!         ├── GroupingIndex (equality groups, quantity edits)
//!         │     └── SelectionBridge (active summary row)
//!         └── ZoomController (view only)
//!
//! DesignerState wires them together and publishes AppEvents.
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use decokit_core::{CatalogItem, EventBus};
//! use decokit_designer::{
//!     DesignerState, MemoryImageLoader, PlacementOptions, PlacementSettings,
//!     RenderSurfaceConfig, SceneDocument,
//! };
//!
//! let loader = Arc::new(MemoryImageLoader::new().with_image("bead.png", 200, 100));
//! let document = SceneDocument::new(
//!     RenderSurfaceConfig::default().build(),
//!     loader,
//!     PlacementSettings::default(),
//! );
//! let mut designer = DesignerState::new(document, Arc::new(EventBus::new()));
//!
//! let bead = CatalogItem::new("Bead").with_id("b-1").with_image("bead.png");
//! designer.add_item(&bead, &PlacementOptions::default()).await?;
//! designer.undo();
//! ```

pub mod designer_state;
pub mod document;
pub mod grouping;
pub mod history;
pub mod image_loader;
pub mod placement;
pub mod render_surface;
pub mod selection_bridge;
pub mod viewport;

pub use designer_state::{DesignerState, Key, KeyAction, KeyInput};
pub use document::{
    PlacedItem, PlacementRecord, PreparedBackground, SceneDocument, SceneEvent, SceneSnapshot,
};
pub use grouping::{parse_quantity, Group, GroupKey, GroupingIndex, QuantityStep};
pub use history::HistoryManager;
pub use image_loader::{FsImageLoader, ImageLoader, MemoryImageLoader};
pub use placement::{PlacementOptions, PlacementSettings, PreparedPlacement, SizeVariant};
pub use render_surface::{
    ControlPoint, ControlStyle, CornerStyle, MemorySurface, RenderSurface, RenderSurfaceConfig,
    SurfaceBackground, SurfaceEvent, SurfaceObject, SurfaceSnapshot, ZOrder,
};
pub use selection_bridge::SelectionBridge;
pub use viewport::ZoomController;
