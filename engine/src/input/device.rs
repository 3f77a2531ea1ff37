//! Raw Device State Tracker
//!
//! Turns individual device transitions into per-frame key state:
//!
//! - `current`: keys held down right now
//! - `pressed`: keys that went down since the last [`DeviceState::begin_frame`]
//! - `released`: keys that went up since the last [`DeviceState::begin_frame`]
//!
//! plus relative mouse motion and wheel accumulators. Transitions are edge
//! triggered: a repeated "down" for a key that is already down is ignored.
//!
//! Keys in the notify mask report their effective transitions back to the
//! caller (and to an optional notify callback) so that keybinds touching the
//! key can be re-evaluated immediately instead of waiting for the next frame.

use glam::IVec2;

use super::key_set::KeySet;
use super::keys::{KeyCode, MouseButton};

/// Read-only view of key state, as needed by keybind evaluation.
pub trait KeyStateView {
    /// Keys currently held down.
    fn down(&self) -> &KeySet;
    /// Keys that went down this frame.
    fn pressed(&self) -> &KeySet;
    /// Keys that went up this frame.
    fn released(&self) -> &KeySet;

    fn is_down(&self, key: KeyCode) -> bool {
        self.down().contains(key)
    }

    fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed().contains(key)
    }

    fn is_released(&self, key: KeyCode) -> bool {
        self.released().contains(key)
    }
}

/// Direction of an effective key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTransition {
    Pressed,
    Released,
}

/// An effective transition of a key in the notify mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChange {
    pub key: KeyCode,
    pub transition: KeyTransition,
}

/// Hook invoked synchronously after a notify-masked key changes state.
pub type NotifyCallback = Box<dyn FnMut(KeyChange, &dyn KeyStateView)>;

/// Per-frame keyboard and mouse state.
#[derive(Default)]
pub struct DeviceState {
    current: KeySet,
    pressed: KeySet,
    released: KeySet,
    mouse_delta_x: i32,
    mouse_delta_y: i32,
    wheel_delta: i32,
    notify_mask: KeySet,
    notify_callback: Option<NotifyCallback>,
}

impl DeviceState {
    /// Create a tracker with every key up and nothing in the notify mask.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one key transition.
    ///
    /// Returns the effective change when the key is in the notify mask. A
    /// transition that matches the already recorded state is a no-op and
    /// reports nothing.
    pub fn inject_key_transition(&mut self, key: KeyCode, is_key_up: bool) -> Option<KeyChange> {
        let transition = if is_key_up {
            if !self.current.contains(key) {
                return None;
            }
            self.current.remove(key);
            self.released.insert(key);
            self.pressed.remove(key);
            KeyTransition::Released
        } else {
            if self.current.contains(key) {
                return None;
            }
            self.current.insert(key);
            self.pressed.insert(key);
            self.released.remove(key);
            KeyTransition::Pressed
        };

        if !self.notify_mask.contains(key) {
            return None;
        }

        let change = KeyChange { key, transition };
        // Taken out for the call so the callback can borrow the state.
        if let Some(mut callback) = self.notify_callback.take() {
            callback(change, &*self);
            self.notify_callback = Some(callback);
        }
        Some(change)
    }

    /// Apply one mouse button transition. Same edge rules as keys.
    pub fn inject_mouse_button(&mut self, button: MouseButton, is_down: bool) -> Option<KeyChange> {
        self.inject_key_transition(button.into(), !is_down)
    }

    /// Accumulate relative mouse motion for this frame.
    pub fn inject_mouse_motion(&mut self, delta_x: i32, delta_y: i32) {
        self.mouse_delta_x = self.mouse_delta_x.saturating_add(delta_x);
        self.mouse_delta_y = self.mouse_delta_y.saturating_add(delta_y);
    }

    /// Accumulate wheel movement for this frame, in `WHEEL_DELTA` units.
    pub fn inject_wheel(&mut self, delta_units: i32) {
        self.wheel_delta = self.wheel_delta.saturating_add(delta_units);
    }

    /// Clear per-frame transitions and deltas. Held keys stay held.
    pub fn begin_frame(&mut self) {
        self.pressed.clear();
        self.released.clear();
        self.mouse_delta_x = 0;
        self.mouse_delta_y = 0;
        self.wheel_delta = 0;
    }

    /// Drop all state, e.g. when the window loses focus and key-up events
    /// will not arrive. The notify configuration is kept.
    pub fn reset(&mut self) {
        self.current.clear();
        self.begin_frame();
    }

    pub fn is_down(&self, key: KeyCode) -> bool {
        self.current.contains(key)
    }

    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(key)
    }

    pub fn is_released(&self, key: KeyCode) -> bool {
        self.released.contains(key)
    }

    /// Query by raw identifier; `false` for identifiers outside the key space.
    pub fn is_code_down(&self, code: u32) -> bool {
        self.current.contains_index(code as usize)
    }

    pub fn is_code_pressed(&self, code: u32) -> bool {
        self.pressed.contains_index(code as usize)
    }

    pub fn is_code_released(&self, code: u32) -> bool {
        self.released.contains_index(code as usize)
    }

    pub fn mouse_delta_x(&self) -> i32 {
        self.mouse_delta_x
    }

    pub fn mouse_delta_y(&self) -> i32 {
        self.mouse_delta_y
    }

    pub fn mouse_delta(&self) -> IVec2 {
        IVec2::new(self.mouse_delta_x, self.mouse_delta_y)
    }

    pub fn wheel_delta(&self) -> i32 {
        self.wheel_delta
    }

    /// Replace the set of keys whose transitions are reported.
    pub fn set_notify_mask(&mut self, mask: KeySet) {
        self.notify_mask = mask;
    }

    pub fn notify_mask(&self) -> &KeySet {
        &self.notify_mask
    }

    /// Install (or clear with `None`) the notify hook.
    pub fn set_notify_callback(&mut self, callback: Option<NotifyCallback>) {
        self.notify_callback = callback;
    }
}

impl KeyStateView for DeviceState {
    fn down(&self) -> &KeySet {
        &self.current
    }

    fn pressed(&self) -> &KeySet {
        &self.pressed
    }

    fn released(&self) -> &KeySet {
        &self.released
    }
}

impl std::fmt::Debug for DeviceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceState")
            .field("current", &self.current)
            .field("pressed", &self.pressed)
            .field("released", &self.released)
            .field("mouse_delta", &self.mouse_delta())
            .field("wheel_delta", &self.wheel_delta)
            .field("notify_mask", &self.notify_mask)
            .field("notify_callback", &self.notify_callback.is_some())
            .finish()
    }
}
