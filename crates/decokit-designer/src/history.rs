//! Bounded linear undo/redo over whole-document snapshots.
//!
//! The cursor points at the snapshot that matches the current document.
//! Capturing after an undo drops everything forward of the cursor; capturing
//! past capacity evicts the oldest snapshot.
//!
//! While a snapshot is being replayed into the document, the document still
//! reports state changes. [`HistoryManager::begin_replay`] raises a guard so
//! those reports are not captured again.

use std::collections::VecDeque;

use decokit_core::constants::MAX_HISTORY_SIZE;

use crate::document::SceneSnapshot;

#[derive(Debug, Clone)]
pub struct HistoryManager {
    entries: VecDeque<SceneSnapshot>,
    /// -1 only while empty.
    cursor: isize,
    max_size: usize,
    replaying: bool,
}

impl HistoryManager {
    /// A capacity of zero is treated as one.
    pub fn new(max_size: usize) -> Self {
        let max_size = max_size.max(1);
        Self {
            entries: VecDeque::with_capacity(max_size),
            cursor: -1,
            max_size,
            replaying: false,
        }
    }

    /// Record the current document. Ignored (returns false) during replay.
    pub fn capture(&mut self, snapshot: SceneSnapshot) -> bool {
        if self.replaying {
            tracing::trace!("Capture suppressed during replay");
            return false;
        }

        self.entries.truncate((self.cursor + 1) as usize);
        self.entries.push_back(snapshot);
        while self.entries.len() > self.max_size {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len() as isize - 1;

        tracing::debug!("History captured {}/{}", self.cursor + 1, self.entries.len());
        true
    }

    /// Step back. Returns the snapshot to replay, or `None` at the start.
    pub fn undo(&mut self) -> Option<SceneSnapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.current().cloned()
    }

    /// Step forward. Returns the snapshot to replay, or `None` at the tip.
    pub fn redo(&mut self) -> Option<SceneSnapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.current().cloned()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len() as isize - 1
    }

    pub fn begin_replay(&mut self) {
        self.replaying = true;
    }

    pub fn end_replay(&mut self) {
        self.replaying = false;
    }

    pub fn is_replaying(&self) -> bool {
        self.replaying
    }

    /// Snapshot under the cursor.
    pub fn current(&self) -> Option<&SceneSnapshot> {
        usize::try_from(self.cursor)
            .ok()
            .and_then(|index| self.entries.get(index))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> isize {
        self.cursor
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Forget everything and start from `snapshot`.
    pub fn reset(&mut self, snapshot: SceneSnapshot) {
        self.entries.clear();
        self.cursor = -1;
        self.replaying = false;
        self.capture(snapshot);
    }
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(MAX_HISTORY_SIZE)
    }
}
