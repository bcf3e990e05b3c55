//! Undo/redo for designer state.

use super::DesignerState;
use crate::document::SceneSnapshot;

impl DesignerState {
    /// Step back one snapshot. Returns false at the start of history.
    pub fn undo(&mut self) -> bool {
        // Flush pending host edits first so they are not lost to the replay.
        self.pump();
        match self.history.undo() {
            Some(snapshot) => {
                self.replay(&snapshot);
                tracing::debug!("Undo to {}", self.history.cursor());
                true
            }
            None => false,
        }
    }

    /// Step forward one snapshot. Returns false at the tip.
    pub fn redo(&mut self) -> bool {
        self.pump();
        match self.history.redo() {
            Some(snapshot) => {
                self.replay(&snapshot);
                tracing::debug!("Redo to {}", self.history.cursor());
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn replay(&mut self, snapshot: &SceneSnapshot) {
        self.history.begin_replay();
        self.document.restore(snapshot);
        self.pump();
        self.history.end_replay();
        self.emit_history();
    }
}
