//! Designer state for UI integration.
//! Wires the scene document to history, grouping, selection and zoom, and
//! publishes every observable change on the event bus.
//!
//! This module is split into submodules:
//! - `history`: undo/redo
//! - `items`: placement, background, removal, duplication, layers, quantities
//! - `selection`: summary-row selection and surface selection sync
//! - `view`: zoom and resize debouncing
//! - `input`: keyboard shortcuts

mod history;
mod input;
mod items;
mod selection;
mod view;

pub use input::{Key, KeyAction, KeyInput};

use std::sync::Arc;
use std::time::Duration;

use decokit_core::constants::RESIZE_DEBOUNCE_MS;
use decokit_core::{
    AppEvent, Debouncer, DocumentEvent, EventBus, GroupSummary, HistoryEvent, NotificationEvent,
    ObjectHandle, SceneError,
};

use crate::document::{SceneDocument, SceneEvent};
use crate::grouping::GroupingIndex;
use crate::history::HistoryManager;
use crate::selection_bridge::SelectionBridge;
use crate::viewport::ZoomController;

pub struct DesignerState {
    pub(crate) document: SceneDocument,
    pub(crate) history: HistoryManager,
    pub(crate) grouping: GroupingIndex,
    pub(crate) bridge: SelectionBridge,
    pub(crate) zoom: ZoomController,
    pub(crate) resize: Debouncer,
    bus: Arc<EventBus>,
}

impl DesignerState {
    /// Creates a designer with default history capacity, zoom bounds and
    /// resize debounce.
    pub fn new(document: SceneDocument, bus: Arc<EventBus>) -> Self {
        Self::with_parts(
            document,
            HistoryManager::default(),
            ZoomController::default(),
            Duration::from_millis(RESIZE_DEBOUNCE_MS),
            bus,
        )
    }

    /// Creates a designer from configured parts. The current document becomes
    /// the first history entry.
    pub fn with_parts(
        mut document: SceneDocument,
        mut history: HistoryManager,
        zoom: ZoomController,
        resize_debounce: Duration,
        bus: Arc<EventBus>,
    ) -> Self {
        document.drain_events();
        history.reset(document.snapshot());

        Self {
            document,
            history,
            grouping: GroupingIndex::new(),
            bridge: SelectionBridge::new(),
            zoom,
            resize: Debouncer::new(resize_debounce),
            bus,
        }
    }

    pub fn document(&self) -> &SceneDocument {
        &self.document
    }

    /// Mutable document access for host-driven manipulation. Call
    /// [`Self::pump`] afterwards so the change is captured.
    pub fn document_mut(&mut self) -> &mut SceneDocument {
        &mut self.document
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn zoom(&self) -> &ZoomController {
        &self.zoom
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    /// Layer controls are enabled only while something is selected.
    pub fn has_active_item(&self) -> bool {
        self.document.has_active_item()
    }

    pub fn active_group(&self) -> Option<usize> {
        self.bridge.active_group()
    }

    /// Current quantity rows.
    pub fn summary(&mut self) -> Vec<GroupSummary> {
        self.pump();
        self.grouping.summary(&self.document)
    }

    /// Dispatch everything the document reported since the last call.
    ///
    /// A batch containing any state change produces exactly one history
    /// capture, so a multi-object removal is one undo step.
    pub fn pump(&mut self) {
        let events = self.document.drain_events();
        if events.is_empty() {
            return;
        }

        let mut state_changed = false;
        let mut selection: Option<Option<ObjectHandle>> = None;

        for event in events {
            match event {
                SceneEvent::StateChanged { .. } => state_changed = true,
                SceneEvent::SelectionChanged { active } => selection = Some(active),
                SceneEvent::PlaceholderVisibility { visible } => {
                    self.emit(AppEvent::Document(DocumentEvent::PlaceholderVisibility {
                        visible,
                    }))
                }
                SceneEvent::BackgroundChanged { image } => {
                    self.emit(AppEvent::Document(DocumentEvent::BackgroundChanged { image }))
                }
            }
        }

        if state_changed {
            if self.history.capture(self.document.snapshot()) {
                self.emit(AppEvent::Document(DocumentEvent::StateChanged {
                    revision: self.document.revision(),
                    item_count: self.document.item_count(),
                }));
                self.emit_history();
            }
            let groups = self.grouping.summary(&self.document);
            self.emit(AppEvent::Document(DocumentEvent::SummaryUpdated { groups }));
            // Row indices shift when groups are added or removed.
            selection.get_or_insert(self.document.active_handle());
        }

        if let Some(active) = selection {
            self.sync_selection(active);
        }
    }

    pub(crate) fn emit(&self, event: AppEvent) {
        if let Err(e) = self.bus.publish(event) {
            tracing::trace!("Event dropped: {}", e);
        }
    }

    pub(crate) fn emit_history(&self) {
        self.emit(AppEvent::History(HistoryEvent::Changed {
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
            len: self.history.len(),
            cursor: self.history.cursor(),
        }));
    }

    /// Surface a recovered failure to the user.
    pub(crate) fn notify_error(&self, context: &str, error: &SceneError) {
        tracing::warn!("{}: {}", context, error);
        self.emit(AppEvent::Notification(NotificationEvent::error(format!(
            "{}: {}",
            context, error
        ))));
    }
}

impl std::fmt::Debug for DesignerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesignerState")
            .field("document", &self.document)
            .field("history_len", &self.history.len())
            .field("cursor", &self.history.cursor())
            .field("zoom", &self.zoom.zoom())
            .finish()
    }
}
