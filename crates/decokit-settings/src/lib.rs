//! DecoKit Settings Crate
//!
//! Handles application configuration: loading, saving and validating the
//! settings file, and turning its sections into configured designer parts.

pub mod config;
pub mod error;

pub use config::{
    default_config_path, CanvasSettings, Config, FilterSettings, HistorySettings,
    SurfaceSettings, ZoomSettings,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
