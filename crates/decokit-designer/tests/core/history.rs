use std::sync::Arc;

use decokit_core::{CatalogItem, ImageSize, Point, Transform};
use decokit_designer::{
    HistoryManager, MemoryImageLoader, PlacementSettings, PreparedPlacement, RenderSurfaceConfig,
    SceneDocument, SceneSnapshot,
};
use proptest::prelude::*;

fn document() -> SceneDocument {
    SceneDocument::new(
        RenderSurfaceConfig::default().build(),
        Arc::new(MemoryImageLoader::new()),
        PlacementSettings::default(),
    )
}

fn place(doc: &mut SceneDocument, name: &str) {
    doc.apply_placement(PreparedPlacement {
        item: CatalogItem::new(name).with_image("a.png"),
        image: "a.png".into(),
        natural_size: ImageSize::new(100, 100),
        transform: Transform::centered(Point::new(400.0, 300.0), 1.0),
        variant: None,
    });
}

/// Snapshots of a document holding 0, 1, 2, ... items.
fn snapshots(count: usize) -> Vec<SceneSnapshot> {
    let mut doc = document();
    let mut out = vec![doc.snapshot()];
    for i in 1..count {
        place(&mut doc, &format!("item-{}", i));
        out.push(doc.snapshot());
    }
    out
}

#[test]
fn test_history_starts_empty() {
    let history = HistoryManager::default();
    assert!(history.is_empty());
    assert_eq!(history.cursor(), -1);
    assert_eq!(history.max_size(), 50);
    assert!(!history.can_undo());
    assert!(!history.can_redo());
}

#[test]
fn test_undo_redo_walks_cursor() {
    let snaps = snapshots(3);
    let mut history = HistoryManager::default();
    for snap in &snaps {
        history.capture(snap.clone());
    }

    assert_eq!(history.cursor(), 2);
    assert_eq!(history.undo().as_ref(), Some(&snaps[1]));
    assert_eq!(history.undo().as_ref(), Some(&snaps[0]));
    assert!(history.undo().is_none());
    assert_eq!(history.cursor(), 0);

    assert_eq!(history.redo().as_ref(), Some(&snaps[1]));
    assert_eq!(history.redo().as_ref(), Some(&snaps[2]));
    assert!(history.redo().is_none());
}

#[test]
fn test_capture_after_undo_drops_redo_branch() {
    let snaps = snapshots(4);
    let mut history = HistoryManager::default();
    for snap in &snaps[..3] {
        history.capture(snap.clone());
    }

    history.undo();
    history.undo();
    assert!(history.can_redo());

    history.capture(snaps[3].clone());
    assert_eq!(history.len(), 2);
    assert_eq!(history.cursor(), 1);
    assert!(!history.can_redo());
    assert_eq!(history.current(), Some(&snaps[3]));
}

#[test]
fn test_capacity_evicts_oldest() {
    let snaps = snapshots(5);
    let mut history = HistoryManager::new(3);
    for snap in &snaps {
        history.capture(snap.clone());
    }

    assert_eq!(history.len(), 3);
    assert_eq!(history.cursor(), 2);

    history.undo();
    assert_eq!(history.undo().as_ref(), Some(&snaps[2]));
    assert!(!history.can_undo());
}

#[test]
fn test_capture_suppressed_during_replay() {
    let snaps = snapshots(2);
    let mut history = HistoryManager::default();
    history.capture(snaps[0].clone());

    history.begin_replay();
    assert!(history.is_replaying());
    assert!(!history.capture(snaps[1].clone()));
    history.end_replay();

    assert_eq!(history.len(), 1);
    assert!(history.capture(snaps[1].clone()));
    assert_eq!(history.len(), 2);
}

#[test]
fn test_zero_capacity_keeps_one() {
    let snaps = snapshots(2);
    let mut history = HistoryManager::new(0);
    history.capture(snaps[0].clone());
    history.capture(snaps[1].clone());

    assert_eq!(history.max_size(), 1);
    assert_eq!(history.len(), 1);
    assert_eq!(history.current(), Some(&snaps[1]));
}

#[test]
fn test_reset_starts_over() {
    let snaps = snapshots(3);
    let mut history = HistoryManager::default();
    for snap in &snaps {
        history.capture(snap.clone());
    }

    history.reset(snaps[0].clone());
    assert_eq!(history.len(), 1);
    assert_eq!(history.cursor(), 0);
    assert!(!history.can_undo());
}

#[derive(Debug, Clone)]
enum Op {
    Capture,
    Undo,
    Redo,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![Just(Op::Capture), Just(Op::Undo), Just(Op::Redo)]
}

proptest! {
    #[test]
    fn history_bounds_hold(max in 1usize..8, ops in prop::collection::vec(op_strategy(), 0..60)) {
        let snap = SceneSnapshot::default();
        let mut history = HistoryManager::new(max);

        for op in ops {
            match op {
                Op::Capture => { history.capture(snap.clone()); }
                Op::Undo => { history.undo(); }
                Op::Redo => { history.redo(); }
            }
            prop_assert!(history.len() <= max);
            prop_assert!(history.cursor() >= -1);
            prop_assert!(history.cursor() <= history.len() as isize - 1);
            prop_assert_eq!(history.can_undo(), history.cursor() > 0);
        }
    }
}
