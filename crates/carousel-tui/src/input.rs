use crossterm::event::{KeyEvent, KeyModifiers};

use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Close,
    Previous,
    Next,
    First,
    Last,
    ToggleFullscreen,
    OpenExternal,
    /// First 'g' press, waiting for the second
    PendingG,
    None,
}

/// Map a key event to an action. `pending_key` is the previous key of a pending sequence.
pub fn handle_key_event(key: KeyEvent, keymap: &Keymap, pending_key: Option<char>) -> Action {
    // Crossterm reports uppercase letters with or without SHIFT depending on the terminal
    let modifiers = match key.code {
        crossterm::event::KeyCode::Char(c) if c.is_ascii_uppercase() => {
            key.modifiers | KeyModifiers::SHIFT
        }
        _ => key.modifiers,
    };
    let binding = KeyBinding::new(key.code, modifiers);

    if keymap.is_g_prefix(&binding) {
        return if pending_key == Some('g') {
            keymap.get_pending_g_action().copied().unwrap_or(Action::None)
        } else {
            Action::PendingG
        };
    }

    keymap.get(&binding).copied().unwrap_or(Action::None)
}
