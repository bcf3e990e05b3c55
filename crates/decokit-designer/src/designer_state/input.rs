//! Keyboard shortcuts for designer state.

use super::DesignerState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Delete,
    Backspace,
    Other,
}

/// A key press as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub ctrl: bool,
    /// Cmd on macOS.
    pub meta: bool,
}

impl KeyInput {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
        }
    }

    pub fn ctrl(c: char) -> Self {
        Self {
            key: Key::Char(c),
            ctrl: true,
            meta: false,
        }
    }

    pub fn meta(c: char) -> Self {
        Self {
            key: Key::Char(c),
            ctrl: false,
            meta: true,
        }
    }

    fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// What a shortcut did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Undo,
    Redo,
    RemoveSelected,
}

impl DesignerState {
    /// Ctrl/Cmd+Z undoes, Ctrl/Cmd+Y redoes, Delete or Backspace removes the
    /// selection. Returns the action taken, if any.
    pub fn handle_key(&mut self, input: KeyInput) -> Option<KeyAction> {
        match input.key {
            Key::Char(c) if input.command() && c.eq_ignore_ascii_case(&'z') => {
                self.undo().then_some(KeyAction::Undo)
            }
            Key::Char(c) if input.command() && c.eq_ignore_ascii_case(&'y') => {
                self.redo().then_some(KeyAction::Redo)
            }
            Key::Delete | Key::Backspace => self
                .remove_selected()
                .ok()
                .map(|_| KeyAction::RemoveSelected),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_modifiers() {
        assert!(KeyInput::ctrl('z').command());
        assert!(KeyInput::meta('y').command());
        assert!(!KeyInput::plain(Key::Char('z')).command());
    }
}
