//! Key Identifiers
//!
//! A single flat key space shared by keyboard keys and mouse buttons. Every
//! per-key container in the input layer is indexed by [`KeyCode::index`], so
//! the discriminants are kept below [`KEY_COUNT`].
//!
//! Keyboard keys use their Win32 virtual-key values; mouse buttons occupy the
//! low identifiers 0..=4, which are unused by keyboard virtual keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Upper bound of the key identifier space.
pub const KEY_COUNT: usize = 256;

/// Flat key identifier covering keyboard keys and mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum KeyCode {
    // Mouse buttons
    MouseLeft = 0,
    MouseRight = 1,
    MouseMiddle = 2,
    MouseX1 = 3,
    MouseX2 = 4,

    // Control keys
    Backspace = 8,
    Tab = 9,
    Enter = 13,
    CapsLock = 20,
    Escape = 27,
    Space = 32,
    PageUp = 33,
    PageDown = 34,
    End = 35,
    Home = 36,
    LeftArrow = 37,
    UpArrow = 38,
    RightArrow = 39,
    DownArrow = 40,
    PrintScreen = 44,
    Insert = 45,
    Delete = 46,

    // Number row
    Num0 = 48,
    Num1 = 49,
    Num2 = 50,
    Num3 = 51,
    Num4 = 52,
    Num5 = 53,
    Num6 = 54,
    Num7 = 55,
    Num8 = 56,
    Num9 = 57,

    // Letters
    A = 65,
    B = 66,
    C = 67,
    D = 68,
    E = 69,
    F = 70,
    G = 71,
    H = 72,
    I = 73,
    J = 74,
    K = 75,
    L = 76,
    M = 77,
    N = 78,
    O = 79,
    P = 80,
    Q = 81,
    R = 82,
    S = 83,
    T = 84,
    U = 85,
    V = 86,
    W = 87,
    X = 88,
    Y = 89,
    Z = 90,

    LeftWin = 91,
    RightWin = 92,
    Apps = 93,
    Sleep = 95,

    // Numpad
    Numpad0 = 96,
    Numpad1 = 97,
    Numpad2 = 98,
    Numpad3 = 99,
    Numpad4 = 100,
    Numpad5 = 101,
    Numpad6 = 102,
    Numpad7 = 103,
    Numpad8 = 104,
    Numpad9 = 105,
    NumpadMultiply = 106,
    NumpadAdd = 107,
    NumpadSeparator = 108,
    NumpadSubtract = 109,
    NumpadDecimal = 110,
    NumpadDivide = 111,

    // Function keys
    F1 = 112,
    F2 = 113,
    F3 = 114,
    F4 = 115,
    F5 = 116,
    F6 = 117,
    F7 = 118,
    F8 = 119,
    F9 = 120,
    F10 = 121,
    F11 = 122,
    F12 = 123,

    NumLock = 144,
    ScrollLock = 145,

    // Modifiers
    LeftShift = 160,
    RightShift = 161,
    LeftCtrl = 162,
    RightCtrl = 163,
    LeftAlt = 164,
    RightAlt = 165,
}

/// Every key identifier paired with its configuration name.
const KEY_NAMES: &[(KeyCode, &str)] = &[
    (KeyCode::MouseLeft, "MouseLeft"),
    (KeyCode::MouseRight, "MouseRight"),
    (KeyCode::MouseMiddle, "MouseMiddle"),
    (KeyCode::MouseX1, "MouseX1"),
    (KeyCode::MouseX2, "MouseX2"),
    (KeyCode::Backspace, "Backspace"),
    (KeyCode::Tab, "Tab"),
    (KeyCode::Enter, "Enter"),
    (KeyCode::CapsLock, "CapsLock"),
    (KeyCode::Escape, "Escape"),
    (KeyCode::Space, "Space"),
    (KeyCode::PageUp, "PageUp"),
    (KeyCode::PageDown, "PageDown"),
    (KeyCode::End, "End"),
    (KeyCode::Home, "Home"),
    (KeyCode::LeftArrow, "LeftArrow"),
    (KeyCode::UpArrow, "UpArrow"),
    (KeyCode::RightArrow, "RightArrow"),
    (KeyCode::DownArrow, "DownArrow"),
    (KeyCode::PrintScreen, "PrintScreen"),
    (KeyCode::Insert, "Insert"),
    (KeyCode::Delete, "Delete"),
    (KeyCode::Num0, "0"),
    (KeyCode::Num1, "1"),
    (KeyCode::Num2, "2"),
    (KeyCode::Num3, "3"),
    (KeyCode::Num4, "4"),
    (KeyCode::Num5, "5"),
    (KeyCode::Num6, "6"),
    (KeyCode::Num7, "7"),
    (KeyCode::Num8, "8"),
    (KeyCode::Num9, "9"),
    (KeyCode::A, "A"),
    (KeyCode::B, "B"),
    (KeyCode::C, "C"),
    (KeyCode::D, "D"),
    (KeyCode::E, "E"),
    (KeyCode::F, "F"),
    (KeyCode::G, "G"),
    (KeyCode::H, "H"),
    (KeyCode::I, "I"),
    (KeyCode::J, "J"),
    (KeyCode::K, "K"),
    (KeyCode::L, "L"),
    (KeyCode::M, "M"),
    (KeyCode::N, "N"),
    (KeyCode::O, "O"),
    (KeyCode::P, "P"),
    (KeyCode::Q, "Q"),
    (KeyCode::R, "R"),
    (KeyCode::S, "S"),
    (KeyCode::T, "T"),
    (KeyCode::U, "U"),
    (KeyCode::V, "V"),
    (KeyCode::W, "W"),
    (KeyCode::X, "X"),
    (KeyCode::Y, "Y"),
    (KeyCode::Z, "Z"),
    (KeyCode::LeftWin, "LeftWin"),
    (KeyCode::RightWin, "RightWin"),
    (KeyCode::Apps, "Apps"),
    (KeyCode::Sleep, "Sleep"),
    (KeyCode::Numpad0, "Numpad0"),
    (KeyCode::Numpad1, "Numpad1"),
    (KeyCode::Numpad2, "Numpad2"),
    (KeyCode::Numpad3, "Numpad3"),
    (KeyCode::Numpad4, "Numpad4"),
    (KeyCode::Numpad5, "Numpad5"),
    (KeyCode::Numpad6, "Numpad6"),
    (KeyCode::Numpad7, "Numpad7"),
    (KeyCode::Numpad8, "Numpad8"),
    (KeyCode::Numpad9, "Numpad9"),
    (KeyCode::NumpadMultiply, "NumpadMultiply"),
    (KeyCode::NumpadAdd, "NumpadAdd"),
    (KeyCode::NumpadSeparator, "NumpadSeparator"),
    (KeyCode::NumpadSubtract, "NumpadSubtract"),
    (KeyCode::NumpadDecimal, "NumpadDecimal"),
    (KeyCode::NumpadDivide, "NumpadDivide"),
    (KeyCode::F1, "F1"),
    (KeyCode::F2, "F2"),
    (KeyCode::F3, "F3"),
    (KeyCode::F4, "F4"),
    (KeyCode::F5, "F5"),
    (KeyCode::F6, "F6"),
    (KeyCode::F7, "F7"),
    (KeyCode::F8, "F8"),
    (KeyCode::F9, "F9"),
    (KeyCode::F10, "F10"),
    (KeyCode::F11, "F11"),
    (KeyCode::F12, "F12"),
    (KeyCode::NumLock, "NumLock"),
    (KeyCode::ScrollLock, "ScrollLock"),
    (KeyCode::LeftShift, "LeftShift"),
    (KeyCode::RightShift, "RightShift"),
    (KeyCode::LeftCtrl, "LeftCtrl"),
    (KeyCode::RightCtrl, "RightCtrl"),
    (KeyCode::LeftAlt, "LeftAlt"),
    (KeyCode::RightAlt, "RightAlt"),
];

impl KeyCode {
    /// Index of this key in any per-key container. Always `< KEY_COUNT`.
    #[inline]
    pub const fn index(self) -> usize {
        self as u8 as usize
    }

    /// Look up a key from its raw identifier (a Win32 virtual-key code or a
    /// mouse button slot). Returns `None` for identifiers with no `KeyCode`.
    pub fn from_code(code: u16) -> Option<Self> {
        if code as usize >= KEY_COUNT {
            return None;
        }
        KEY_NAMES
            .iter()
            .find(|(key, _)| key.index() == code as usize)
            .map(|&(key, _)| key)
    }

    /// Configuration name of this key (e.g. `"LeftCtrl"`, `"7"`).
    pub fn name(self) -> &'static str {
        KEY_NAMES
            .iter()
            .find(|(key, _)| *key == self)
            .map(|&(_, name)| name)
            .unwrap_or("Unknown")
    }

    /// Look up a key by configuration name.
    pub fn from_name(name: &str) -> Option<Self> {
        KEY_NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|&(key, _)| key)
    }

    /// Returns `true` for the mouse button identifiers.
    pub fn is_mouse_button(self) -> bool {
        self.index() <= KeyCode::MouseX2.index()
    }

    /// Iterate over every defined key identifier.
    pub fn all() -> impl Iterator<Item = KeyCode> {
        KEY_NAMES.iter().map(|&(key, _)| key)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown key name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key name `{0}`")]
pub struct UnknownKeyName(pub String);

impl FromStr for KeyCode {
    type Err = UnknownKeyName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyCode::from_name(s).ok_or_else(|| UnknownKeyName(s.to_string()))
    }
}

impl Serialize for KeyCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for KeyCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Mouse buttons, mapped onto the low identifiers of the key space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    /// First side button ("back").
    X1,
    /// Second side button ("forward").
    X2,
}

impl From<MouseButton> for KeyCode {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => KeyCode::MouseLeft,
            MouseButton::Right => KeyCode::MouseRight,
            MouseButton::Middle => KeyCode::MouseMiddle,
            MouseButton::X1 => KeyCode::MouseX1,
            MouseButton::X2 => KeyCode::MouseX2,
        }
    }
}
