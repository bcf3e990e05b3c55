use std::collections::BTreeSet;
use std::sync::Arc;

use decokit_core::{CatalogItem, ImageSize, Point, ScrollRequest, SelectionEvent, Transform};
use decokit_designer::{
    parse_quantity, GroupKey, GroupingIndex, MemoryImageLoader, PlacedItem, PlacementOptions,
    PlacementSettings, PreparedPlacement, RenderSurfaceConfig, SceneDocument, SelectionBridge,
    SizeVariant,
};
use proptest::prelude::*;

fn document() -> SceneDocument {
    SceneDocument::new(
        RenderSurfaceConfig::default().build(),
        Arc::new(
            MemoryImageLoader::new()
                .with_image("a.png", 100, 100)
                .with_image("b.png", 100, 100),
        ),
        PlacementSettings::default(),
    )
}

fn item_a() -> CatalogItem {
    CatalogItem::new("A").with_id("a").with_image("a.png")
}

fn item_b() -> CatalogItem {
    CatalogItem::new("B").with_id("b").with_image("b.png")
}

fn place_sync(doc: &mut SceneDocument, item: CatalogItem, variant: Option<SizeVariant>) {
    let image = item.primary_image().cloned().unwrap_or_else(|| "a.png".into());
    doc.apply_placement(PreparedPlacement {
        item,
        image,
        natural_size: ImageSize::new(100, 100),
        transform: Transform::centered(Point::new(400.0, 300.0), 1.0),
        variant,
    });
}

#[tokio::test]
async fn test_same_id_forms_one_group() {
    let mut doc = document();
    doc.add_item(&item_a(), &PlacementOptions::default()).await.unwrap();
    doc.add_item(&item_a(), &PlacementOptions::default()).await.unwrap();

    let mut index = GroupingIndex::new();
    let groups = index.groups(&doc);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].quantity(), 2);
    assert_eq!(groups[0].catalog_item().name, "A");
}

#[test]
fn test_groups_in_first_seen_order() {
    let mut doc = document();
    place_sync(&mut doc, item_b(), None);
    place_sync(&mut doc, item_a(), None);
    place_sync(&mut doc, item_b(), None);

    let mut index = GroupingIndex::new();
    let summary = index.summary(&doc);
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0].name, "B");
    assert_eq!(summary[0].quantity, 2);
    assert_eq!(summary[1].name, "A");
    assert_eq!(summary[1].index, 1);
}

#[test]
fn test_variant_splits_group() {
    let mut doc = document();
    place_sync(&mut doc, item_a(), None);
    place_sync(&mut doc, item_a(), Some(SizeVariant::new("large")));
    place_sync(&mut doc, item_a(), Some(SizeVariant::new("large")));

    let mut index = GroupingIndex::new();
    let groups = index.groups(&doc);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[1].quantity(), 2);
    assert_eq!(
        groups[1].key,
        GroupKey::Identity {
            id: "a".to_string(),
            variant: Some("large".to_string())
        }
    );
}

#[test]
fn test_fallback_groups_by_name_and_image() {
    let mut doc = document();
    let charm = || CatalogItem::new("Charm").with_image("a.png");
    place_sync(&mut doc, charm(), None);
    place_sync(&mut doc, charm(), None);
    place_sync(&mut doc, CatalogItem::new("Charm").with_image("b.png"), None);
    place_sync(&mut doc, CatalogItem::new("Charm").with_id("").with_image("a.png"), None);

    let mut index = GroupingIndex::new();
    let groups = index.groups(&doc);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].quantity(), 3);
    assert!(matches!(groups[0].key, GroupKey::Fallback { .. }));
}

#[test]
fn test_cache_follows_revision() {
    let mut doc = document();
    place_sync(&mut doc, item_a(), None);

    let mut index = GroupingIndex::new();
    assert_eq!(index.groups(&doc).len(), 1);

    place_sync(&mut doc, item_b(), None);
    assert_eq!(index.groups(&doc).len(), 2);
}

#[tokio::test]
async fn test_increment_and_decrement() {
    let mut doc = document();
    doc.add_item(&item_a(), &PlacementOptions::default()).await.unwrap();
    let key = GroupKey::of(&doc.placed_items()[0]);

    let mut index = GroupingIndex::new();
    let added = index.increment(&mut doc, &key).await.unwrap();
    assert!(added.is_some());
    assert_eq!(index.find(&doc, &key).unwrap().quantity(), 2);

    let removed = index.decrement(&mut doc, &key).unwrap();
    assert_eq!(removed, added);
    assert_eq!(index.find(&doc, &key).unwrap().quantity(), 1);

    // Quantity floor.
    assert_eq!(index.decrement(&mut doc, &key).unwrap(), None);
    assert_eq!(doc.item_count(), 1);
}

#[tokio::test]
async fn test_increment_keeps_variant() {
    let mut doc = document();
    let variant = SizeVariant::new("small").with_image("b.png");
    doc.add_item(&item_a(), &PlacementOptions::with_variant(variant))
        .await
        .unwrap();
    let key = GroupKey::of(&doc.placed_items()[0]);

    let mut index = GroupingIndex::new();
    index.increment(&mut doc, &key).await.unwrap();

    let group = index.find(&doc, &key).unwrap();
    assert_eq!(group.quantity(), 2);
    assert!(group.members.iter().all(|m| m.image.as_str() == "b.png"));
}

#[tokio::test]
async fn test_set_quantity_clamps_and_round_trips() {
    let mut doc = document();
    doc.add_item(&item_a(), &PlacementOptions::default()).await.unwrap();
    let key = GroupKey::of(&doc.placed_items()[0]);
    let mut index = GroupingIndex::new();

    assert_eq!(index.set_quantity(&mut doc, &key, 4).await.unwrap(), 3);
    assert_eq!(index.find(&doc, &key).unwrap().quantity(), 4);

    assert_eq!(index.set_quantity(&mut doc, &key, 0).await.unwrap(), 3);
    assert_eq!(index.find(&doc, &key).unwrap().quantity(), 1);

    assert_eq!(index.set_quantity(&mut doc, &key, 1).await.unwrap(), 0);
}

#[test]
fn test_invalid_quantity_text_becomes_one() {
    assert_eq!(parse_quantity("5"), 5);
    assert_eq!(parse_quantity("-1"), 1);
    assert_eq!(parse_quantity("many"), 1);
}

#[test]
fn test_selection_bridge_activates_one_group() {
    let mut doc = document();
    place_sync(&mut doc, item_a(), None);
    place_sync(&mut doc, item_b(), None);
    place_sync(&mut doc, item_a(), None);
    let handles: Vec<_> = doc.placed_items().iter().map(|p| p.handle).collect();

    let mut index = GroupingIndex::new();
    let mut bridge = SelectionBridge::new();

    let event = bridge.on_selection(Some(handles[2]), index.groups(&doc));
    assert_eq!(
        event,
        SelectionEvent::GroupActivated {
            group_index: 0,
            handle: handles[2],
            scroll: ScrollRequest::CenterVertically,
        }
    );
    assert_eq!(bridge.active_group(), Some(0));

    bridge.on_selection(Some(handles[1]), index.groups(&doc));
    assert_eq!(bridge.active_group(), Some(1));

    let event = bridge.on_selection(None, index.groups(&doc));
    assert_eq!(event, SelectionEvent::Cleared);
    assert_eq!(bridge.active_group(), None);
}

fn placed(picks: &[(u8, u8, bool)]) -> Vec<PlacedItem> {
    let mut doc = document();
    for (id, variant, with_id) in picks {
        let mut item = CatalogItem::new(format!("item-{}", id)).with_image("a.png");
        if *with_id {
            item = item.with_id(format!("id-{}", id));
        }
        let variant = (*variant > 0).then(|| SizeVariant::new(format!("v{}", variant)));
        place_sync(&mut doc, item, variant);
    }
    doc.placed_items()
}

proptest! {
    #[test]
    fn groups_partition_items(picks in prop::collection::vec((0u8..4, 0u8..3, any::<bool>()), 0..25)) {
        let items = placed(&picks);
        let groups = GroupingIndex::compute_groups(&items);

        let all: Vec<_> = groups.iter().flat_map(|g| g.handles()).collect();
        let unique: BTreeSet<_> = all.iter().copied().collect();
        let expected: BTreeSet<_> = items.iter().map(|i| i.handle).collect();

        prop_assert_eq!(all.len(), items.len());
        prop_assert_eq!(unique, expected);

        for group in &groups {
            for member in &group.members {
                prop_assert_eq!(&GroupKey::of(member), &group.key);
            }
        }
    }
}
