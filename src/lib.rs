//! # DecoKit
//!
//! Decoration studio core: place catalog artwork on a canvas with unlimited
//! edits, bounded undo/redo, per-item quantity grouping and a faceted catalog
//! filter.
//!
//! ## Architecture
//!
//! DecoKit is organized as a workspace with multiple crates:
//!
//! 1. **decokit-core** - Catalog data model, geometry, errors, event bus
//! 2. **decokit-designer** - Render surface, scene document, history, grouping, zoom
//! 3. **decokit-catalog** - Catalog documents and the faceted filter engine
//! 4. **decokit-settings** - Configuration files and validation
//! 5. **decokit** - Logging setup and the headless driver
//!
//! Every observable change is published on an [`EventBus`] that the host
//! creates and passes in; nothing is global.

use std::sync::Arc;

pub use decokit_catalog as catalog;
pub use decokit_designer as designer;
pub use decokit_settings as settings;

pub use decokit_catalog::{Catalog, FacetChange, FilterEngine, SubFacetSource, SubFacetSpec};
pub use decokit_core::{
    AppEvent, Background, CatalogItem, Error, EventBus, EventCategory, EventFilter, FilterState,
    Result, SceneError, SortMode,
};
pub use decokit_designer::{
    DesignerState, FsImageLoader, HistoryManager, ImageLoader, PlacementOptions, SceneDocument,
    ZoomController,
};
pub use decokit_settings::{default_config_path, Config, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Assemble a designer from validated configuration, loading images from
/// the configured asset root.
pub fn build_designer(config: &Config, bus: Arc<EventBus>) -> DesignerState {
    let loader: Arc<dyn ImageLoader> = Arc::new(config.canvas.image_loader());
    build_designer_with_loader(config, loader, bus)
}

/// Same as [`build_designer`] with a caller-provided image loader.
pub fn build_designer_with_loader(
    config: &Config,
    loader: Arc<dyn ImageLoader>,
    bus: Arc<EventBus>,
) -> DesignerState {
    config.build_designer(loader, bus)
}
