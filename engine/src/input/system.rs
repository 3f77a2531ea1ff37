//! Input System
//!
//! The single entry point applications talk to. Device transitions go into
//! the [`DeviceState`]; transitions of keys used by any keybind are handed
//! straight to the [`ActionResolver`], which fires callbacks before the
//! injection call returns.
//!
//! # Frame protocol
//!
//! ```text
//! inject_* / handle_device_input / process_raw_input   (any number)
//! ... game logic polls is_action_* and is_key_* ...
//! begin_frame()   evaluates keybinds, then clears per-frame state
//! ```
//!
//! # Example
//!
//! ```rust
//! use rf_input::input::{InputAction, InputLayer, InputSystem, KeyCode};
//!
//! let mut input = InputSystem::new();
//! input.add_keybind(&[KeyCode::Space], InputAction::PlayerJump, InputLayer::Gameplay);
//! input.set_active_layer(Some(InputLayer::Gameplay));
//! input.register_callback(InputAction::PlayerJump, || true);
//!
//! let fired = input.inject_key(KeyCode::Space, true);
//! assert_eq!(fired.len(), 1);
//! assert!(input.is_action_pressed(InputAction::PlayerJump));
//! input.begin_frame();
//! ```

use glam::IVec2;
use log::{trace, warn};

use super::actions::{InputAction, InputLayer};
use super::callbacks::{ActionFired, CallbackId};
use super::device::{DeviceState, NotifyCallback};
use super::keybind::{KeybindHash, KeybindState};
use super::keys::{KeyCode, MouseButton};
use super::raw::{RawInputReader, RawInputSource, RawPacket};
use super::resolver::ActionResolver;
use super::winit_adapter::DeviceInput;

/// Device tracking, keybinds and action dispatch.
#[derive(Debug, Default)]
pub struct InputSystem {
    device: DeviceState,
    resolver: ActionResolver,
    reader: RawInputReader,
}

impl InputSystem {
    /// Create an input system with no keybinds and no active layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a key transition. Returns the actions it fired.
    pub fn inject_key(&mut self, key: KeyCode, is_down: bool) -> Vec<ActionFired> {
        match self.device.inject_key_transition(key, !is_down) {
            Some(change) => self.resolver.on_key_changed(change.key, &self.device),
            None => Vec::new(),
        }
    }

    /// Apply a key transition by raw virtual-key code. Codes with no
    /// [`KeyCode`] are ignored.
    pub fn inject_key_code(&mut self, vkey: u16, is_key_up: bool) -> Vec<ActionFired> {
        match KeyCode::from_code(vkey) {
            Some(key) => self.inject_key(key, !is_key_up),
            None => {
                trace!("ignoring untracked virtual key {vkey:#04x}");
                Vec::new()
            }
        }
    }

    pub fn inject_mouse_button(&mut self, button: MouseButton, is_down: bool) -> Vec<ActionFired> {
        self.inject_key(button.into(), is_down)
    }

    pub fn inject_mouse_motion(&mut self, dx: i32, dy: i32) {
        self.device.inject_mouse_motion(dx, dy);
    }

    pub fn inject_wheel(&mut self, delta_units: i32) {
        self.device.inject_wheel(delta_units);
    }

    /// Apply a translated windowing event.
    pub fn handle_device_input(&mut self, input: DeviceInput) -> Vec<ActionFired> {
        match input {
            DeviceInput::Key { key, is_down } => self.inject_key(key, is_down),
            DeviceInput::MouseButton { button, is_down } => self.inject_mouse_button(button, is_down),
            DeviceInput::MouseMotion { dx, dy } => {
                self.inject_mouse_motion(dx, dy);
                Vec::new()
            }
            DeviceInput::Wheel { delta } => {
                self.inject_wheel(delta);
                Vec::new()
            }
            DeviceInput::FocusLost => {
                self.reset();
                Vec::new()
            }
        }
    }

    /// Read one packet from `source` and apply it. Packets that cannot be
    /// read or decoded are logged and dropped.
    pub fn process_raw_input(&mut self, source: &mut dyn RawInputSource) -> Vec<ActionFired> {
        match self.reader.read(source) {
            Ok(packet) => self.apply_raw_packet(packet),
            Err(e) => {
                warn!("dropping raw input packet: {e}");
                Vec::new()
            }
        }
    }

    /// Apply an already decoded packet.
    pub fn apply_raw_packet(&mut self, packet: RawPacket) -> Vec<ActionFired> {
        match packet {
            RawPacket::Keyboard(kb) => self.inject_key_code(kb.vkey, kb.is_break()),
            RawPacket::Mouse(mouse) => {
                if let Some((dx, dy)) = mouse.relative_motion() {
                    self.inject_mouse_motion(dx, dy);
                }
                let mut fired = Vec::new();
                for (button, is_down) in mouse.button_transitions() {
                    fired.extend(self.inject_mouse_button(button, is_down));
                }
                if let Some(delta) = mouse.wheel_delta() {
                    self.inject_wheel(delta);
                }
                fired
            }
        }
    }

    /// Close the current frame: step every keybind's state machine against
    /// the frame's transitions, then clear them.
    ///
    /// Returns actions whose chords were only detected by the evaluation.
    pub fn begin_frame(&mut self) -> Vec<ActionFired> {
        let fired = self.resolver.evaluate(&self.device);
        self.device.begin_frame();
        fired
    }

    /// Forget every held key, e.g. on focus loss.
    pub fn reset(&mut self) {
        self.device.reset();
    }

    /// Bind an ordered chord to `action` on `layer`. Returns `None` for an
    /// empty chord or one that repeats a key.
    pub fn add_keybind(
        &mut self,
        keys: &[KeyCode],
        action: InputAction,
        layer: InputLayer,
    ) -> Option<KeybindHash> {
        let hash = self.resolver.add_keybind(keys, action, layer)?;
        self.sync_notify_mask();
        Some(hash)
    }

    pub fn remove_keybind(&mut self, hash: KeybindHash) {
        self.resolver.remove_keybind(hash);
        self.sync_notify_mask();
    }

    fn sync_notify_mask(&mut self) {
        self.device.set_notify_mask(*self.resolver.registry().key_mask());
    }

    pub fn register_callback<F>(&mut self, action: InputAction, callback: F) -> CallbackId
    where
        F: FnMut() -> bool + 'static,
    {
        self.resolver.register_callback(action, Box::new(callback))
    }

    pub fn unregister_callback(&mut self, id: CallbackId) -> bool {
        self.resolver.unregister_callback(id)
    }

    /// Observe effective transitions of keybind keys as they are injected.
    pub fn set_notify_callback(&mut self, callback: Option<NotifyCallback>) {
        self.device.set_notify_callback(callback);
    }

    pub fn set_active_layer(&mut self, layer: Option<InputLayer>) {
        self.resolver.set_active_layer(layer);
    }

    pub fn active_layer(&self) -> Option<InputLayer> {
        self.resolver.active_layer()
    }

    pub fn is_layer_active(&self, layer: InputLayer) -> bool {
        self.resolver.is_layer_active(layer)
    }

    pub fn is_action_pressed(&self, action: InputAction) -> bool {
        self.resolver.is_action_pressed(action)
    }

    pub fn is_action_down(&self, action: InputAction) -> bool {
        self.resolver.is_action_down(action)
    }

    pub fn is_action_released(&self, action: InputAction) -> bool {
        self.resolver.is_action_released(action)
    }

    pub fn action_state(&self, action: InputAction) -> Option<KeybindState> {
        self.resolver.action_state(action)
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.device.is_down(key)
    }

    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.device.is_pressed(key)
    }

    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.device.is_released(key)
    }

    pub fn is_code_down(&self, code: u32) -> bool {
        self.device.is_code_down(code)
    }

    pub fn is_code_pressed(&self, code: u32) -> bool {
        self.device.is_code_pressed(code)
    }

    pub fn is_code_released(&self, code: u32) -> bool {
        self.device.is_code_released(code)
    }

    pub fn mouse_delta_x(&self) -> i32 {
        self.device.mouse_delta_x()
    }

    pub fn mouse_delta_y(&self) -> i32 {
        self.device.mouse_delta_y()
    }

    pub fn mouse_delta(&self) -> IVec2 {
        self.device.mouse_delta()
    }

    pub fn wheel_delta(&self) -> i32 {
        self.device.wheel_delta()
    }

    pub fn device(&self) -> &DeviceState {
        &self.device
    }

    pub fn resolver(&self) -> &ActionResolver {
        &self.resolver
    }
}
