//! Keybinds
//!
//! A keybind is an ordered chord: every key but the last must be held, and
//! the last one must be freshly pressed. It is stored as two masks over the
//! key space plus the ordered key list it was built from.

use super::device::KeyStateView;
use super::key_set::KeySet;
use super::keys::KeyCode;

/// Identity of a keybind, derived from its ordered key sequence.
///
/// The hash is order sensitive: `[Space, MouseLeft]` and `[MouseLeft, Space]`
/// are different keybinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeybindHash(pub u64);

impl KeybindHash {
    const SEED: u64 = u64::MAX;
    const GOLDEN: u64 = 0x9e37_79b9_7f4a_7c15;

    /// Mix the ordered key sequence into a hash.
    pub fn of(keys: &[KeyCode]) -> Self {
        let mut h = Self::SEED;
        for key in keys {
            let k = key.index() as u64;
            h ^= (k ^ (k << 1))
                .wrapping_add(Self::GOLDEN)
                .wrapping_add(h << 6)
                .wrapping_add(h >> 2);
        }
        KeybindHash(h)
    }
}

impl std::fmt::Display for KeybindHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Press/hold/release state of a keybind, advanced once per evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeybindState {
    #[default]
    Idle,
    Pressed,
    Down,
    Released,
}

impl KeybindState {
    /// Next state given whether the chord reads as active.
    pub fn advance(self, active: bool) -> Self {
        match (self, active) {
            (Self::Idle, true) => Self::Pressed,
            (Self::Idle, false) => Self::Idle,
            (Self::Pressed, true) | (Self::Down, true) => Self::Down,
            (Self::Pressed, false) | (Self::Down, false) => Self::Released,
            (Self::Released, true) => Self::Pressed,
            (Self::Released, false) => Self::Idle,
        }
    }

    /// Whether the chord is currently engaged (just pressed or held).
    pub fn is_engaged(self) -> bool {
        matches!(self, Self::Pressed | Self::Down)
    }
}

/// The first key that appears more than once in `keys`.
pub fn repeated_key(keys: &[KeyCode]) -> Option<KeyCode> {
    let mut seen = KeySet::new();
    for &key in keys {
        if seen.contains(key) {
            return Some(key);
        }
        seen.insert(key);
    }
    None
}

/// A registered key chord.
#[derive(Debug, Clone)]
pub struct Keybind {
    hash: KeybindHash,
    keys: Vec<KeyCode>,
    down_mask: KeySet,
    press_mask: KeySet,
    state: KeybindState,
}

impl Keybind {
    /// Build a keybind from an ordered, non-empty key sequence.
    ///
    /// Returns `None` for an empty sequence or one that repeats a key: a key
    /// cannot be both held and freshly pressed.
    pub fn new(keys: &[KeyCode]) -> Option<Self> {
        if repeated_key(keys).is_some() {
            return None;
        }
        let (&last, held) = keys.split_last()?;

        let down_mask: KeySet = held.iter().copied().collect();
        let mut press_mask = KeySet::new();
        press_mask.insert(last);

        Some(Self {
            hash: KeybindHash::of(keys),
            keys: keys.to_vec(),
            down_mask,
            press_mask,
            state: KeybindState::Idle,
        })
    }

    pub fn hash(&self) -> KeybindHash {
        self.hash
    }

    pub fn keys(&self) -> &[KeyCode] {
        &self.keys
    }

    /// Keys that must be held (all but the last).
    pub fn down_mask(&self) -> &KeySet {
        &self.down_mask
    }

    /// The trigger key (the last one).
    pub fn press_mask(&self) -> &KeySet {
        &self.press_mask
    }

    /// Every key participating in the chord.
    pub fn all_keys(&self) -> KeySet {
        self.down_mask.union(&self.press_mask)
    }

    pub fn state(&self) -> KeybindState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: KeybindState) {
        self.state = state;
    }

    /// Held keys are down and the trigger key went down this frame.
    pub fn is_pressed(&self, view: &dyn KeyStateView) -> bool {
        self.down_mask.is_subset(view.down()) && self.press_mask.is_subset(view.pressed())
    }

    /// Every key of the chord is held, regardless of freshness.
    pub fn is_down(&self, view: &dyn KeyStateView) -> bool {
        self.all_keys().is_subset(view.down())
    }

    /// The trigger key went up this frame.
    pub fn is_released(&self, view: &dyn KeyStateView) -> bool {
        self.press_mask.is_subset(view.released())
    }

    /// Activity used by the state machine: entering requires a fresh press,
    /// staying engaged only requires the chord to be held.
    pub fn is_active(&self, view: &dyn KeyStateView) -> bool {
        if self.state.is_engaged() {
            self.is_down(view)
        } else {
            self.is_pressed(view)
        }
    }

    /// Advance the state machine one step. Returns the new state.
    pub fn evaluate(&mut self, view: &dyn KeyStateView) -> KeybindState {
        self.state = self.state.advance(self.is_active(view));
        self.state
    }
}
