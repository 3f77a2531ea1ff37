//! winit Adapter
//!
//! Translates `winit` events into [`DeviceInput`] values for
//! [`InputSystem::handle_device_input`](super::system::InputSystem::handle_device_input).
//!
//! Keys are taken from both the raw device stream and the focused window's
//! keyboard events. The tracker ignores repeated downs, so a key seen on both
//! paths only counts once. Motion and wheel come from the device stream only,
//! since those deltas would otherwise accumulate twice.

use winit::event::{
    DeviceEvent, ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent,
};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

use super::keys::{KeyCode, MouseButton};
use super::raw::WHEEL_DELTA;

/// A backend-independent device event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceInput {
    Key { key: KeyCode, is_down: bool },
    MouseButton { button: MouseButton, is_down: bool },
    /// Relative motion in device units.
    MouseMotion { dx: i32, dy: i32 },
    /// Vertical wheel movement in `WHEEL_DELTA` units.
    Wheel { delta: i32 },
    /// The window lost focus; key-up events may never arrive.
    FocusLost,
}

/// Translate a raw device event.
pub fn translate_device_event(event: &DeviceEvent) -> Option<DeviceInput> {
    match event {
        DeviceEvent::Key(raw) => {
            let key = map_physical_key(raw.physical_key)?;
            Some(DeviceInput::Key {
                key,
                is_down: raw.state == ElementState::Pressed,
            })
        }
        DeviceEvent::MouseMotion { delta: (dx, dy) } => {
            let (dx, dy) = (dx.round() as i32, dy.round() as i32);
            (dx != 0 || dy != 0).then_some(DeviceInput::MouseMotion { dx, dy })
        }
        DeviceEvent::MouseWheel { delta } => {
            let delta = wheel_units(delta);
            (delta != 0).then_some(DeviceInput::Wheel { delta })
        }
        _ => None,
    }
}

/// Translate a window event.
pub fn translate_window_event(event: &WindowEvent) -> Option<DeviceInput> {
    match event {
        WindowEvent::KeyboardInput { event, .. } => {
            let key = map_physical_key(event.physical_key)?;
            Some(DeviceInput::Key {
                key,
                is_down: event.state == ElementState::Pressed,
            })
        }
        WindowEvent::MouseInput { state, button, .. } => Some(DeviceInput::MouseButton {
            button: map_mouse_button(*button)?,
            is_down: *state == ElementState::Pressed,
        }),
        WindowEvent::Focused(false) => Some(DeviceInput::FocusLost),
        _ => None,
    }
}

/// Line deltas are notches; pixel deltas are passed through as-is.
fn wheel_units(delta: &MouseScrollDelta) -> i32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => (y * WHEEL_DELTA as f32).round() as i32,
        MouseScrollDelta::PixelDelta(pos) => pos.y.round() as i32,
    }
}

pub fn map_physical_key(key: PhysicalKey) -> Option<KeyCode> {
    match key {
        PhysicalKey::Code(code) => map_key_code(code),
        PhysicalKey::Unidentified(_) => None,
    }
}

pub fn map_mouse_button(button: WinitMouseButton) -> Option<MouseButton> {
    match button {
        WinitMouseButton::Left => Some(MouseButton::Left),
        WinitMouseButton::Right => Some(MouseButton::Right),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        WinitMouseButton::Back => Some(MouseButton::X1),
        WinitMouseButton::Forward => Some(MouseButton::X2),
        WinitMouseButton::Other(_) => None,
    }
}

/// Map a winit physical key onto our key space. Keys we do not track map to
/// `None`.
pub fn map_key_code(code: WinitKeyCode) -> Option<KeyCode> {
    let key = match code {
        WinitKeyCode::Backspace => KeyCode::Backspace,
        WinitKeyCode::Tab => KeyCode::Tab,
        WinitKeyCode::Enter | WinitKeyCode::NumpadEnter => KeyCode::Enter,
        WinitKeyCode::CapsLock => KeyCode::CapsLock,
        WinitKeyCode::Escape => KeyCode::Escape,
        WinitKeyCode::Space => KeyCode::Space,
        WinitKeyCode::PageUp => KeyCode::PageUp,
        WinitKeyCode::PageDown => KeyCode::PageDown,
        WinitKeyCode::End => KeyCode::End,
        WinitKeyCode::Home => KeyCode::Home,
        WinitKeyCode::ArrowLeft => KeyCode::LeftArrow,
        WinitKeyCode::ArrowUp => KeyCode::UpArrow,
        WinitKeyCode::ArrowRight => KeyCode::RightArrow,
        WinitKeyCode::ArrowDown => KeyCode::DownArrow,
        WinitKeyCode::PrintScreen => KeyCode::PrintScreen,
        WinitKeyCode::Insert => KeyCode::Insert,
        WinitKeyCode::Delete => KeyCode::Delete,

        WinitKeyCode::Digit0 => KeyCode::Num0,
        WinitKeyCode::Digit1 => KeyCode::Num1,
        WinitKeyCode::Digit2 => KeyCode::Num2,
        WinitKeyCode::Digit3 => KeyCode::Num3,
        WinitKeyCode::Digit4 => KeyCode::Num4,
        WinitKeyCode::Digit5 => KeyCode::Num5,
        WinitKeyCode::Digit6 => KeyCode::Num6,
        WinitKeyCode::Digit7 => KeyCode::Num7,
        WinitKeyCode::Digit8 => KeyCode::Num8,
        WinitKeyCode::Digit9 => KeyCode::Num9,

        WinitKeyCode::KeyA => KeyCode::A,
        WinitKeyCode::KeyB => KeyCode::B,
        WinitKeyCode::KeyC => KeyCode::C,
        WinitKeyCode::KeyD => KeyCode::D,
        WinitKeyCode::KeyE => KeyCode::E,
        WinitKeyCode::KeyF => KeyCode::F,
        WinitKeyCode::KeyG => KeyCode::G,
        WinitKeyCode::KeyH => KeyCode::H,
        WinitKeyCode::KeyI => KeyCode::I,
        WinitKeyCode::KeyJ => KeyCode::J,
        WinitKeyCode::KeyK => KeyCode::K,
        WinitKeyCode::KeyL => KeyCode::L,
        WinitKeyCode::KeyM => KeyCode::M,
        WinitKeyCode::KeyN => KeyCode::N,
        WinitKeyCode::KeyO => KeyCode::O,
        WinitKeyCode::KeyP => KeyCode::P,
        WinitKeyCode::KeyQ => KeyCode::Q,
        WinitKeyCode::KeyR => KeyCode::R,
        WinitKeyCode::KeyS => KeyCode::S,
        WinitKeyCode::KeyT => KeyCode::T,
        WinitKeyCode::KeyU => KeyCode::U,
        WinitKeyCode::KeyV => KeyCode::V,
        WinitKeyCode::KeyW => KeyCode::W,
        WinitKeyCode::KeyX => KeyCode::X,
        WinitKeyCode::KeyY => KeyCode::Y,
        WinitKeyCode::KeyZ => KeyCode::Z,

        WinitKeyCode::SuperLeft => KeyCode::LeftWin,
        WinitKeyCode::SuperRight => KeyCode::RightWin,
        WinitKeyCode::ContextMenu => KeyCode::Apps,

        WinitKeyCode::Numpad0 => KeyCode::Numpad0,
        WinitKeyCode::Numpad1 => KeyCode::Numpad1,
        WinitKeyCode::Numpad2 => KeyCode::Numpad2,
        WinitKeyCode::Numpad3 => KeyCode::Numpad3,
        WinitKeyCode::Numpad4 => KeyCode::Numpad4,
        WinitKeyCode::Numpad5 => KeyCode::Numpad5,
        WinitKeyCode::Numpad6 => KeyCode::Numpad6,
        WinitKeyCode::Numpad7 => KeyCode::Numpad7,
        WinitKeyCode::Numpad8 => KeyCode::Numpad8,
        WinitKeyCode::Numpad9 => KeyCode::Numpad9,
        WinitKeyCode::NumpadMultiply => KeyCode::NumpadMultiply,
        WinitKeyCode::NumpadAdd => KeyCode::NumpadAdd,
        WinitKeyCode::NumpadComma => KeyCode::NumpadSeparator,
        WinitKeyCode::NumpadSubtract => KeyCode::NumpadSubtract,
        WinitKeyCode::NumpadDecimal => KeyCode::NumpadDecimal,
        WinitKeyCode::NumpadDivide => KeyCode::NumpadDivide,

        WinitKeyCode::F1 => KeyCode::F1,
        WinitKeyCode::F2 => KeyCode::F2,
        WinitKeyCode::F3 => KeyCode::F3,
        WinitKeyCode::F4 => KeyCode::F4,
        WinitKeyCode::F5 => KeyCode::F5,
        WinitKeyCode::F6 => KeyCode::F6,
        WinitKeyCode::F7 => KeyCode::F7,
        WinitKeyCode::F8 => KeyCode::F8,
        WinitKeyCode::F9 => KeyCode::F9,
        WinitKeyCode::F10 => KeyCode::F10,
        WinitKeyCode::F11 => KeyCode::F11,
        WinitKeyCode::F12 => KeyCode::F12,

        WinitKeyCode::NumLock => KeyCode::NumLock,
        WinitKeyCode::ScrollLock => KeyCode::ScrollLock,
        WinitKeyCode::ShiftLeft => KeyCode::LeftShift,
        WinitKeyCode::ShiftRight => KeyCode::RightShift,
        WinitKeyCode::ControlLeft => KeyCode::LeftCtrl,
        WinitKeyCode::ControlRight => KeyCode::RightCtrl,
        WinitKeyCode::AltLeft => KeyCode::LeftAlt,
        WinitKeyCode::AltRight => KeyCode::RightAlt,

        _ => return None,
    };
    Some(key)
}
