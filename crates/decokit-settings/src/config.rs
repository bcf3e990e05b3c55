//! Configuration and settings management for DecoKit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Canvas settings (size, colour, placement density, assets)
//! - History depth
//! - Zoom bounds
//! - Catalog filter behaviour
//! - Selection control styling

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use decokit_catalog::{FilterEngine, SubFacetSource, SubFacetSpec};
use decokit_core::constants::{
    DEFAULT_CANVAS_COLOR, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_MAX_ITEM_SIZE,
    DUPLICATE_OFFSET, FALLBACK_IMAGE, MAX_HISTORY_SIZE, MAX_ZOOM, MIN_ZOOM, PX_PER_MM,
    RESIZE_DEBOUNCE_MS, SEARCH_DEBOUNCE_MS, ZOOM_STEP,
};
use decokit_core::{CatalogItem, EventBus, ImageRef};
use decokit_designer::{
    ControlStyle, DesignerState, FsImageLoader, HistoryManager, ImageLoader, PlacementSettings,
    RenderSurfaceConfig, SceneDocument, ZoomController,
};

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

/// Canvas settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Canvas width in pixels
    pub width: f64,
    /// Canvas height in pixels
    pub height: f64,
    /// Fill colour behind the background image
    pub background_color: String,
    /// Longer side of items that have no physical size
    pub max_item_size: f64,
    /// Display density used to convert millimetres to pixels
    pub px_per_mm: f64,
    /// Offset applied to duplicated items
    pub duplicate_offset: f64,
    /// Directory image references are resolved against
    pub asset_root: PathBuf,
    /// Image used when a catalog item has none
    pub fallback_image: String,
    /// Quiet period before the surface offset is recalculated after a resize
    pub resize_debounce_ms: u64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            background_color: DEFAULT_CANVAS_COLOR.to_string(),
            max_item_size: DEFAULT_MAX_ITEM_SIZE,
            px_per_mm: PX_PER_MM,
            duplicate_offset: DUPLICATE_OFFSET,
            asset_root: PathBuf::from("./public/assets"),
            fallback_image: FALLBACK_IMAGE.to_string(),
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
        }
    }
}

impl CanvasSettings {
    pub fn placement(&self) -> PlacementSettings {
        PlacementSettings {
            max_item_size: self.max_item_size,
            px_per_mm: self.px_per_mm,
            fallback_image: ImageRef::new(self.fallback_image.clone()),
            duplicate_offset: self.duplicate_offset,
        }
    }

    pub fn image_loader(&self) -> FsImageLoader {
        FsImageLoader::new(self.asset_root.clone())
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

/// Undo/redo settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of retained snapshots
    pub max_size: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_size: MAX_HISTORY_SIZE,
        }
    }
}

impl HistorySettings {
    pub fn manager(&self) -> HistoryManager {
        HistoryManager::new(self.max_size)
    }
}

/// Zoom bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomSettings {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            min: MIN_ZOOM,
            max: MAX_ZOOM,
            step: ZOOM_STEP,
        }
    }
}

impl ZoomSettings {
    pub fn controller(&self) -> ZoomController {
        ZoomController::new(self.min, self.max, self.step)
    }
}

/// Catalog filter settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Quiet period before search input is applied
    pub search_debounce_ms: u64,
    /// Facets that only apply under their owning type
    pub sub_facets: Vec<SubFacetSpec>,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            search_debounce_ms: SEARCH_DEBOUNCE_MS,
            sub_facets: vec![SubFacetSpec::new(
                "direction",
                "비즈",
                SubFacetSource::Orientation,
            )],
        }
    }
}

impl FilterSettings {
    /// Filter engine over `items` with these sub-facets and debounce.
    pub fn engine(&self, items: Vec<CatalogItem>) -> FilterEngine {
        FilterEngine::new(items)
            .with_sub_facets(self.sub_facets.clone())
            .with_search_debounce(Duration::from_millis(self.search_debounce_ms))
    }
}

/// Selection control styling shared by every object on the surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceSettings {
    /// Keep the selected object at its z position instead of lifting it
    pub preserve_object_stacking: bool,
    pub controls: ControlStyle,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            preserve_object_stacking: true,
            controls: ControlStyle::default(),
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub canvas: CanvasSettings,
    pub history: HistorySettings,
    pub zoom: ZoomSettings,
    pub filter: FilterSettings,
    pub surface: SurfaceSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::of(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| SettingsError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
        std::fs::write(path, content).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;

        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let canvas = &self.canvas;
        if !(canvas.width > 0.0) {
            return Err(ConfigError::out_of_range("canvas.width", canvas.width));
        }
        if !(canvas.height > 0.0) {
            return Err(ConfigError::out_of_range("canvas.height", canvas.height));
        }
        if !(canvas.px_per_mm > 0.0) {
            return Err(ConfigError::out_of_range("canvas.px_per_mm", canvas.px_per_mm));
        }
        if !(canvas.max_item_size > 0.0) {
            return Err(ConfigError::out_of_range(
                "canvas.max_item_size",
                canvas.max_item_size,
            ));
        }

        if self.history.max_size == 0 {
            return Err(ConfigError::out_of_range("history.max_size", 0));
        }

        let zoom = &self.zoom;
        if !(zoom.min > 0.0) {
            return Err(ConfigError::out_of_range("zoom.min", zoom.min));
        }
        if zoom.min > zoom.max {
            return Err(ConfigError::out_of_range(
                "zoom.max",
                format!("{} < {}", zoom.max, zoom.min),
            ));
        }
        if !(zoom.step > 0.0) {
            return Err(ConfigError::out_of_range("zoom.step", zoom.step));
        }

        Ok(())
    }

    /// Surface factory configuration from the canvas and surface sections.
    pub fn surface_config(&self) -> RenderSurfaceConfig {
        RenderSurfaceConfig {
            width: self.canvas.width,
            height: self.canvas.height,
            background_color: self.canvas.background_color.clone(),
            preserve_object_stacking: self.surface.preserve_object_stacking,
            controls: self.surface.controls.clone(),
        }
    }

    /// Designer wired from every section, with images served by `loader`.
    pub fn build_designer(
        &self,
        loader: Arc<dyn ImageLoader>,
        bus: Arc<EventBus>,
    ) -> DesignerState {
        let document = SceneDocument::new(
            self.surface_config().build(),
            loader,
            self.canvas.placement(),
        );
        DesignerState::with_parts(
            document,
            self.history.manager(),
            self.zoom.controller(),
            self.canvas.resize_debounce(),
            bus,
        )
    }
}

/// Platform config location, `<config dir>/decokit/config.toml`.
pub fn default_config_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("decokit").join("config.toml"))
        .ok_or_else(|| {
            SettingsError::ConfigDirectory("no configuration directory on this platform".into())
        })
}
