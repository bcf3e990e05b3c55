use std::sync::Arc;

use decokit_catalog::{FacetChange, SubFacetSource, SubFacetSpec};
use decokit_core::{CatalogItem, EventBus};
use decokit_designer::{ControlPoint, CornerStyle, MemoryImageLoader, PlacementOptions};
use decokit_settings::{Config, ConfigError, SettingsError};

fn customised() -> Config {
    let mut config = Config::default();
    config.canvas.width = 1024.0;
    config.canvas.asset_root = "/srv/assets".into();
    config.history.max_size = 20;
    config.zoom.max = 3.0;
    config.filter.sub_facets.push(SubFacetSpec::new(
        "punch",
        "비즈",
        SubFacetSource::SubCategory,
    ));
    config.surface.controls.corner_style = CornerStyle::Rect;
    config.surface.controls.hidden_controls = vec![ControlPoint::MiddleTop];
    config
}

#[test]
fn test_toml_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = customised();
    config.save_to_file(&path).unwrap();
    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_json_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let config = customised();
    config.save_to_file(&path).unwrap();
    assert_eq!(Config::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_invalid_file_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[history]\nmax_size = 0\n").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(
        err,
        SettingsError::Config(ConfigError::ValueOutOfRange { ref key, .. }) if key == "history.max_size"
    ));
}

#[test]
fn test_load_or_default_without_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_or_default(&dir.path().join("missing.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load_from_file(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, SettingsError::Io { .. }));
}

#[test]
fn test_sections_build_parts() {
    let config = customised();

    let surface = config.surface_config();
    assert_eq!(surface.width, 1024.0);
    assert_eq!(surface.height, 600.0);
    assert_eq!(surface.controls.corner_style, CornerStyle::Rect);

    assert_eq!(config.history.manager().max_size(), 20);
    assert_eq!(config.zoom.controller().max(), 3.0);
    assert_eq!(config.canvas.placement().px_per_mm, 3.78);
    assert_eq!(
        config.canvas.image_loader().root(),
        std::path::Path::new("/srv/assets")
    );

    let engine = config.filter.engine(vec![CatalogItem::new("a")]);
    assert_eq!(engine.sub_facets().len(), 2);
    assert_eq!(engine.total(), 1);
}

#[tokio::test]
async fn test_configured_designer_places_filtered_items() {
    let mut config = Config::default();
    config.history.max_size = 3;
    config.zoom.max = 3.0;
    config.canvas.width = 400.0;

    let loader = Arc::new(
        MemoryImageLoader::new()
            .with_image("bead.png", 100, 100)
            .with_image("star.png", 50, 50),
    );
    let bus = Arc::new(EventBus::new());
    let mut designer = config.build_designer(loader, bus.clone());

    let catalog = vec![
        CatalogItem::new("Red bead")
            .with_id("b-1")
            .with_image("bead.png")
            .with_category("비즈-세로펀칭")
            .with_color("red"),
        CatalogItem::new("Gold star")
            .with_id("s-1")
            .with_image("star.png")
            .with_category("참")
            .with_color("gold"),
    ];
    let mut engine = config.filter.engine(catalog).with_bus(bus);
    engine.update(FacetChange::Type("비즈".into()));
    let beads = engine.filtered().to_vec();
    assert_eq!(beads.len(), 1);

    let options = PlacementOptions::default();
    for _ in 0..4 {
        designer.add_item(&beads[0], &options).await.unwrap();
    }

    assert_eq!(designer.document().item_count(), 4);
    assert_eq!(designer.history().len(), 3);
    assert_eq!(designer.document().surface().config().width, 400.0);

    let summary = designer.summary();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].quantity, 4);

    for _ in 0..20 {
        designer.zoom_in();
    }
    assert_eq!(designer.zoom().zoom(), 3.0);
}
