//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps Normal-mode keyboard events to domain actions.
///
/// Input-mode keys (typing, Backspace, Enter) are not bound here; they are
/// interpreted directly by the session controller.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Only the code and modifiers take part in the lookup; event kind and
    /// state flags are ignored.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings
            .get(&KeyEvent::new(key.code, key.modifiers))
            .copied()
    }

    /// Whether the key is the unconditional quit chord (Ctrl+C).
    pub fn is_force_quit(key: KeyEvent) -> bool {
        key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let defaults = [
            ('i', KeyAction::EnterInput),
            ('p', KeyAction::TogglePause),
            ('m', KeyAction::SwitchMode),
            ('z', KeyAction::ToggleFullScreen),
            ('c', KeyAction::ClearMessages),
            ('f', KeyAction::ToggleFollow),
            ('s', KeyAction::ToggleTimestamps),
            ('h', KeyAction::ToggleHex),
            ('j', KeyAction::HalfPageDown),
            ('k', KeyAction::HalfPageUp),
            ('b', KeyAction::ScrollToBottom),
            ('t', KeyAction::ScrollToTop),
        ];

        let mut bindings: HashMap<KeyEvent, KeyAction> = defaults
            .into_iter()
            .map(|(ch, action)| (KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE), action))
            .collect();

        bindings.insert(
            KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            KeyAction::Quit,
        );

        Self { bindings }
    }
}
