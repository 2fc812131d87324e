//! Keyboard state to input flags.
use raylib::prelude::*;

use crate::core::input::InputState;

/// Arrows move and turn, E/D fly up and down, Q/W tilt the horizon.
/// Closing the window (or Esc) quits.
pub fn process_events(window: &RaylibHandle) -> InputState {
    InputState {
        forward: window.is_key_down(KeyboardKey::KEY_UP),
        backward: window.is_key_down(KeyboardKey::KEY_DOWN),
        turn_left: window.is_key_down(KeyboardKey::KEY_LEFT),
        turn_right: window.is_key_down(KeyboardKey::KEY_RIGHT),
        ascend: window.is_key_down(KeyboardKey::KEY_E),
        descend: window.is_key_down(KeyboardKey::KEY_D),
        pitch_up: window.is_key_down(KeyboardKey::KEY_Q),
        pitch_down: window.is_key_down(KeyboardKey::KEY_W),
        quit: window.window_should_close(),
    }
}
