//! winit event translation
//!
//! Physical keys are reported by winit as `winit::keyboard::KeyCode`; the
//! binding layer works in DOM-style numeric codes. Keys with no DOM
//! counterpart in the standard table are dropped.

use crate::input::InputState;
use bindery_core::{KeyCode, MouseButton};
use winit::event::{ElementState, MouseButton as WinitMouseButton};
use winit::keyboard::{KeyCode as WinitKey, PhysicalKey};

/// DOM key code for a physical winit key
pub fn key_code(key: WinitKey) -> Option<KeyCode> {
    let code = match key {
        WinitKey::KeyA => 65,
        WinitKey::KeyB => 66,
        WinitKey::KeyC => 67,
        WinitKey::KeyD => 68,
        WinitKey::KeyE => 69,
        WinitKey::KeyF => 70,
        WinitKey::KeyG => 71,
        WinitKey::KeyH => 72,
        WinitKey::KeyI => 73,
        WinitKey::KeyJ => 74,
        WinitKey::KeyK => 75,
        WinitKey::KeyL => 76,
        WinitKey::KeyM => 77,
        WinitKey::KeyN => 78,
        WinitKey::KeyO => 79,
        WinitKey::KeyP => 80,
        WinitKey::KeyQ => 81,
        WinitKey::KeyR => 82,
        WinitKey::KeyS => 83,
        WinitKey::KeyT => 84,
        WinitKey::KeyU => 85,
        WinitKey::KeyV => 86,
        WinitKey::KeyW => 87,
        WinitKey::KeyX => 88,
        WinitKey::KeyY => 89,
        WinitKey::KeyZ => 90,
        WinitKey::Digit0 => 48,
        WinitKey::Digit1 => 49,
        WinitKey::Digit2 => 50,
        WinitKey::Digit3 => 51,
        WinitKey::Digit4 => 52,
        WinitKey::Digit5 => 53,
        WinitKey::Digit6 => 54,
        WinitKey::Digit7 => 55,
        WinitKey::Digit8 => 56,
        WinitKey::Digit9 => 57,
        WinitKey::Backspace => 8,
        WinitKey::Tab => 9,
        WinitKey::Enter | WinitKey::NumpadEnter => 13,
        WinitKey::ShiftLeft | WinitKey::ShiftRight => 16,
        WinitKey::ControlLeft | WinitKey::ControlRight => 17,
        WinitKey::AltLeft | WinitKey::AltRight => 18,
        WinitKey::Escape => 27,
        WinitKey::Space => 32,
        WinitKey::PageUp => 33,
        WinitKey::PageDown => 34,
        WinitKey::End => 35,
        WinitKey::Home => 36,
        WinitKey::ArrowLeft => 37,
        WinitKey::ArrowUp => 38,
        WinitKey::ArrowRight => 39,
        WinitKey::ArrowDown => 40,
        WinitKey::Insert => 45,
        WinitKey::Delete => 46,
        WinitKey::Numpad0 => 96,
        WinitKey::Numpad1 => 97,
        WinitKey::Numpad2 => 98,
        WinitKey::Numpad3 => 99,
        WinitKey::Numpad4 => 100,
        WinitKey::Numpad5 => 101,
        WinitKey::Numpad6 => 102,
        WinitKey::Numpad7 => 103,
        WinitKey::Numpad8 => 104,
        WinitKey::Numpad9 => 105,
        WinitKey::F1 => 112,
        WinitKey::F2 => 113,
        WinitKey::F3 => 114,
        WinitKey::F4 => 115,
        WinitKey::F5 => 116,
        WinitKey::F6 => 117,
        WinitKey::F7 => 118,
        WinitKey::F8 => 119,
        WinitKey::F9 => 120,
        WinitKey::F10 => 121,
        WinitKey::F11 => 122,
        WinitKey::F12 => 123,
        WinitKey::Semicolon => 186,
        WinitKey::Equal => 187,
        WinitKey::Comma => 188,
        WinitKey::Minus => 189,
        WinitKey::Period => 190,
        WinitKey::Slash => 191,
        WinitKey::Backquote => 192,
        WinitKey::BracketLeft => 219,
        WinitKey::Backslash => 220,
        WinitKey::BracketRight => 221,
        WinitKey::Quote => 222,
        _ => return None,
    };
    Some(KeyCode(code))
}

/// Binding-layer button for a winit mouse button
pub fn mouse_button(button: WinitMouseButton) -> Option<MouseButton> {
    match button {
        WinitMouseButton::Left => Some(MouseButton::Left),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        WinitMouseButton::Right => Some(MouseButton::Right),
        _ => None,
    }
}

impl InputState {
    /// Feed a winit keyboard event
    pub fn process_physical_key(&mut self, key: PhysicalKey, state: ElementState) {
        let PhysicalKey::Code(key) = key else {
            return;
        };
        let Some(code) = key_code(key) else {
            log::trace!("Ignoring unmapped key {:?}", key);
            return;
        };
        match state {
            ElementState::Pressed => self.process_key_down(code),
            ElementState::Released => self.process_key_up(code),
        }
    }

    /// Feed a winit mouse button event
    pub fn process_winit_mouse_button(&mut self, button: WinitMouseButton, state: ElementState) {
        let Some(button) = mouse_button(button) else {
            return;
        };
        match state {
            ElementState::Pressed => self.process_mouse_button_down(button),
            ElementState::Released => self.process_mouse_button_up(button),
        }
    }
}
