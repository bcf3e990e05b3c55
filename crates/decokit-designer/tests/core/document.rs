use std::sync::Arc;

use decokit_core::{Background, CatalogItem, ImageSize, ObjectHandle, Point, SceneError, Transform};
use decokit_designer::{
    MemoryImageLoader, PlacementOptions, PlacementSettings, RenderSurfaceConfig, SceneDocument,
    SceneEvent, SizeVariant, ZOrder,
};

fn loader() -> MemoryImageLoader {
    MemoryImageLoader::new()
        .with_image("bead.png", 200, 100)
        .with_image("star.png", 50, 50)
        .with_image("bg.png", 400, 300)
        .with_image("tall-bg.png", 200, 600)
}

fn document() -> SceneDocument {
    SceneDocument::new(
        RenderSurfaceConfig::default().build(),
        Arc::new(loader()),
        PlacementSettings::default(),
    )
}

fn bead() -> CatalogItem {
    CatalogItem::new("Bead").with_id("b-1").with_image("bead.png")
}

#[tokio::test]
async fn test_add_item_centres_and_activates() {
    let mut doc = document();
    assert!(doc.placeholder_visible());

    let handle = doc
        .add_item(&bead(), &PlacementOptions::default())
        .await
        .unwrap();

    assert_eq!(doc.item_count(), 1);
    assert_eq!(doc.active_handle(), Some(handle));
    assert!(!doc.placeholder_visible());

    let placed = doc.placed_item(handle).unwrap();
    assert_eq!(placed.transform.position, Point::new(400.0, 300.0));
    // Longer side 200px capped at 100.
    assert!((placed.transform.scale_x - 0.5).abs() < 1e-9);
    assert_eq!(placed.item.id.as_deref(), Some("b-1"));

    let events = doc.drain_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, SceneEvent::StateChanged { .. })));
    assert!(events.contains(&SceneEvent::PlaceholderVisibility { visible: false }));
    assert!(events.contains(&SceneEvent::SelectionChanged {
        active: Some(handle)
    }));
}

#[tokio::test]
async fn test_add_item_uses_physical_size() {
    let mut doc = document();
    // 50mm at 3.78 px/mm over a 200px image.
    let item = bead().with_size_mm(50.0, 10.0);
    let handle = doc.add_item(&item, &PlacementOptions::default()).await.unwrap();

    let placed = doc.placed_item(handle).unwrap();
    assert!((placed.transform.scale_x - 0.945).abs() < 1e-9);
}

#[tokio::test]
async fn test_add_item_with_variant_records_it() {
    let mut doc = document();
    let options = PlacementOptions::with_variant(SizeVariant::new("small").with_image("star.png"));
    let handle = doc.add_item(&bead(), &options).await.unwrap();

    let placed = doc.placed_item(handle).unwrap();
    assert_eq!(placed.image.as_str(), "star.png");
    assert_eq!(placed.variant.map(|v| v.label), Some("small".to_string()));
}

#[tokio::test]
async fn test_failed_load_leaves_document_unchanged() {
    let mut doc = document();
    doc.add_item(&bead(), &PlacementOptions::default())
        .await
        .unwrap();
    doc.drain_events();
    let before = doc.snapshot();

    let missing = CatalogItem::new("Ghost").with_image("ghost.png");
    let result = doc.add_item(&missing, &PlacementOptions::default()).await;

    assert!(matches!(result, Err(SceneError::ImageLoad { .. })));
    assert_eq!(doc.snapshot(), before);
    assert!(doc.drain_events().is_empty());
}

#[tokio::test]
async fn test_item_without_image_uses_fallback() {
    let loader = loader().with_image("placeholder.png", 10, 10);
    let mut doc = SceneDocument::new(
        RenderSurfaceConfig::default().build(),
        Arc::new(loader),
        PlacementSettings::default(),
    );

    let handle = doc
        .add_item(&CatalogItem::new("Bare"), &PlacementOptions::default())
        .await
        .unwrap();
    assert_eq!(doc.placed_item(handle).unwrap().image.as_str(), "placeholder.png");
}

#[tokio::test]
async fn test_background_fills_canvas() {
    let mut doc = document();
    doc.set_background(&Background::new("Paper", "bg.png"))
        .await
        .unwrap();

    let bg = doc.surface().background().unwrap();
    assert_eq!(bg.scale_x, 2.0);
    assert_eq!(bg.scale_y, 2.0);
    assert!(!doc.placeholder_visible());

    doc.set_background(&Background::new("Tall", "tall-bg.png"))
        .await
        .unwrap();
    let bg = doc.surface().background().unwrap();
    assert_eq!(bg.scale_x, 4.0);
    assert_eq!(bg.scale_y, 1.0);
    assert_eq!(doc.background().map(|b| b.name.as_str()), Some("Tall"));
}

#[tokio::test]
async fn test_background_without_image_is_rejected() {
    let mut doc = document();
    let before = doc.snapshot();

    let mut broken = Background::new("Broken", "");
    let result = doc.set_background(&broken).await;
    assert!(matches!(result, Err(SceneError::InvalidBackgroundData { .. })));

    broken.image = None;
    let result = doc.set_background(&broken).await;
    assert!(matches!(result, Err(SceneError::InvalidBackgroundData { .. })));

    assert_eq!(doc.snapshot(), before);
    assert!(doc.placeholder_visible());
}

#[tokio::test]
async fn test_remove_selected_clears_selection() {
    let mut doc = document();
    let a = doc.add_item(&bead(), &PlacementOptions::default()).await.unwrap();
    let b = doc.add_item(&bead(), &PlacementOptions::default()).await.unwrap();
    doc.select_many(&[a, b]).unwrap();

    assert_eq!(doc.remove_selected().unwrap(), 2);
    assert_eq!(doc.item_count(), 0);
    assert_eq!(doc.active_handle(), None);
    assert!(doc.record(a).is_none());

    assert_eq!(doc.remove_selected(), Err(SceneError::NothingSelected));
}

#[tokio::test]
async fn test_remove_unknown_handle() {
    let mut doc = document();
    assert_eq!(
        doc.remove_item(ObjectHandle(99)),
        Err(SceneError::UnknownHandle {
            handle: ObjectHandle(99)
        })
    );
}

#[tokio::test]
async fn test_duplicate_offsets_and_activates_clone() {
    let mut doc = document();
    let original = doc.add_item(&bead(), &PlacementOptions::default()).await.unwrap();

    let clone = doc.duplicate(original).unwrap();
    assert_ne!(clone, original);
    assert_eq!(doc.active_handle(), Some(clone));

    let a = doc.placed_item(original).unwrap();
    let b = doc.placed_item(clone).unwrap();
    assert_eq!(b.transform.position, Point::new(420.0, 320.0));
    assert_eq!(b.transform.scale_x, a.transform.scale_x);
    assert_eq!(b.item, a.item);
    assert_eq!(b.z_index, 1);
}

#[tokio::test]
async fn test_reorder_changes_stacking() {
    let mut doc = document();
    let a = doc.add_item(&bead(), &PlacementOptions::default()).await.unwrap();
    let b = doc.add_item(&bead(), &PlacementOptions::default()).await.unwrap();
    let c = doc.add_item(&bead(), &PlacementOptions::default()).await.unwrap();

    doc.reorder(c, ZOrder::ToBack).unwrap();
    let order: Vec<_> = doc.placed_items().iter().map(|p| p.handle).collect();
    assert_eq!(order, vec![c, a, b]);

    doc.reorder(c, ZOrder::ForwardOne).unwrap();
    let order: Vec<_> = doc.placed_items().iter().map(|p| p.handle).collect();
    assert_eq!(order, vec![a, c, b]);

    doc.select(Some(a)).unwrap();
    doc.reorder_selected(ZOrder::ToFront).unwrap();
    let order: Vec<_> = doc.placed_items().iter().map(|p| p.handle).collect();
    assert_eq!(order, vec![c, b, a]);
}

#[tokio::test]
async fn test_clear_restores_placeholder() {
    let mut doc = document();
    doc.add_item(&bead(), &PlacementOptions::default()).await.unwrap();
    doc.set_background(&Background::new("Paper", "bg.png"))
        .await
        .unwrap();
    doc.drain_events();

    doc.clear();
    assert!(doc.is_empty());
    assert!(doc.placeholder_visible());
    assert!(doc.surface().background().is_none());

    let events = doc.drain_events();
    assert!(events.contains(&SceneEvent::BackgroundChanged { image: None }));
    assert!(events.contains(&SceneEvent::PlaceholderVisibility { visible: true }));
}

#[tokio::test]
async fn test_restore_replaces_everything() {
    let mut doc = document();
    doc.add_item(&bead(), &PlacementOptions::default()).await.unwrap();
    let saved = doc.snapshot();

    doc.add_item(&bead(), &PlacementOptions::default()).await.unwrap();
    doc.set_background(&Background::new("Paper", "bg.png"))
        .await
        .unwrap();
    assert_ne!(doc.snapshot(), saved);

    doc.restore(&saved);
    assert_eq!(doc.snapshot(), saved);
    assert_eq!(doc.item_count(), 1);
    assert!(doc.background().is_none());
    assert!(!doc.placeholder_visible());
}

#[tokio::test]
async fn test_snapshot_json_round_trip() {
    let mut doc = document();
    doc.add_item(&bead(), &PlacementOptions::default()).await.unwrap();
    let snap = doc.snapshot();

    let json = snap.to_json().unwrap();
    let back = decokit_designer::SceneSnapshot::from_json(&json).unwrap();
    assert_eq!(back, snap);
}

#[test]
fn test_host_object_is_not_an_item() {
    let mut doc = document();
    let handle = doc.surface_mut().add_object(
        "star.png".into(),
        ImageSize::new(50, 50),
        Transform::default(),
    );

    assert_eq!(doc.item_count(), 0);
    assert!(doc.placed_item(handle).is_none());
    assert!(doc.select(Some(handle)).is_err());

    // The surface change still counts as a document change.
    let events = doc.drain_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, SceneEvent::StateChanged { .. })));
}

#[tokio::test]
async fn test_host_removal_drops_record() {
    let mut doc = document();
    let handle = doc.add_item(&bead(), &PlacementOptions::default()).await.unwrap();

    doc.surface_mut().remove_object(handle);
    doc.drain_events();
    assert!(doc.record(handle).is_none());
    assert_eq!(doc.item_count(), 0);
}
