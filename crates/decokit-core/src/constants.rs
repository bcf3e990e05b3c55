//! Application-wide defaults.
//!
//! Every value here can be overridden through `decokit-settings`; these are
//! the fallbacks used when no configuration file is present.

/// Default canvas width in canvas units.
pub const DEFAULT_CANVAS_WIDTH: f64 = 800.0;

/// Default canvas height in canvas units.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;

/// Default canvas background colour.
pub const DEFAULT_CANVAS_COLOR: &str = "#ffffff";

/// Longer side of a newly placed item when the catalog has no physical size.
pub const DEFAULT_MAX_ITEM_SIZE: f64 = 100.0;

/// Screen density used to turn physical millimetres into canvas pixels (96 dpi).
pub const PX_PER_MM: f64 = 3.78;

/// Offset applied to both axes when duplicating an item.
pub const DUPLICATE_OFFSET: f64 = 20.0;

/// Image used when a catalog item provides no placeable image.
pub const FALLBACK_IMAGE: &str = "placeholder.png";

/// Maximum number of snapshots kept for undo/redo.
pub const MAX_HISTORY_SIZE: usize = 50;

/// Zoom bounds and increment.
pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 2.0;
pub const ZOOM_STEP: f64 = 0.1;

/// Window resize bursts are coalesced over this delay.
pub const RESIZE_DEBOUNCE_MS: u64 = 100;

/// Search input is applied after typing pauses for this long.
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

/// Events buffered per broadcast receiver before it starts lagging.
pub const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Sentinel facet value meaning "unrestricted".
pub const ALL_FACET: &str = "all";
