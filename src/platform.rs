//! Platform abstraction layer
//!
//! Maps host key names (DOM `KeyboardEvent.key` values) onto simulation input.

use crate::sim::InputEvent;

/// Whether a key went down or came up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Translate a key name into an input event, if the game uses that key
pub fn key_to_input(key: &str, state: KeyState) -> Option<InputEvent> {
    match (key, state) {
        ("ArrowRight" | "Right", KeyState::Pressed) => Some(InputEvent::RightDown),
        ("ArrowLeft" | "Left", KeyState::Pressed) => Some(InputEvent::LeftDown),
        ("ArrowRight" | "Right", KeyState::Released) => Some(InputEvent::RightUp),
        ("ArrowLeft" | "Left", KeyState::Released) => Some(InputEvent::LeftUp),
        (" ", KeyState::Pressed) => Some(InputEvent::Restart),
        _ => None,
    }
}
