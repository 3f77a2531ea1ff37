//! Action Resolution Engine
//!
//! Decides when a keybind's chord triggers and which action that means on
//! the active layer. Two paths feed it:
//!
//! - [`ActionResolver::evaluate`] steps every keybind's state machine once,
//!   at the frame boundary.
//! - [`ActionResolver::on_key_changed`] reacts to a single key transition,
//!   checking only the keybinds that use the key and firing callbacks inline.
//!
//! Both paths write the same per-keybind state, which is what the polling
//! queries read.

use log::trace;

use super::actions::{InputAction, InputLayer};
use super::callbacks::{ActionCallback, ActionFired, CallbackId, CallbackRegistry};
use super::device::KeyStateView;
use super::keybind::{KeybindHash, KeybindState};
use super::keys::KeyCode;
use super::registry::KeybindRegistry;

/// Keybinds, callbacks and the active layer.
#[derive(Debug, Default)]
pub struct ActionResolver {
    registry: KeybindRegistry,
    callbacks: CallbackRegistry,
    active_layer: Option<InputLayer>,
}

impl ActionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the active layer. With `None`, nothing fires or polls as active.
    pub fn set_active_layer(&mut self, layer: Option<InputLayer>) {
        self.active_layer = layer;
    }

    pub fn active_layer(&self) -> Option<InputLayer> {
        self.active_layer
    }

    pub fn is_layer_active(&self, layer: InputLayer) -> bool {
        self.active_layer == Some(layer)
    }

    pub fn add_keybind(
        &mut self,
        keys: &[KeyCode],
        action: InputAction,
        layer: InputLayer,
    ) -> Option<KeybindHash> {
        self.registry.add_keybind(keys, action, layer)
    }

    pub fn remove_keybind(&mut self, hash: KeybindHash) {
        self.registry.remove_keybind(hash);
    }

    pub fn registry(&self) -> &KeybindRegistry {
        &self.registry
    }

    pub fn register_callback(&mut self, action: InputAction, callback: ActionCallback) -> CallbackId {
        self.callbacks.register(action, callback)
    }

    pub fn unregister_callback(&mut self, id: CallbackId) -> bool {
        self.callbacks.unregister(id)
    }

    pub fn callbacks(&self) -> &CallbackRegistry {
        &self.callbacks
    }

    /// Step every keybind's state machine once against `view`.
    ///
    /// Keybinds entering `Pressed` fire the active layer's action. Returns
    /// what fired. States advance with or without an active layer; only
    /// firing needs one.
    pub fn evaluate(&mut self, view: &dyn KeyStateView) -> Vec<ActionFired> {
        let mut triggered = Vec::new();
        for keybind in self.registry.iter_mut() {
            let before = keybind.state();
            let after = keybind.evaluate(view);
            if after == KeybindState::Pressed && before != KeybindState::Pressed {
                triggered.push(keybind.hash());
            }
        }

        triggered
            .into_iter()
            .filter_map(|hash| self.fire_bound(hash))
            .collect()
    }

    /// Re-check the keybinds that use `key` after it changed state.
    ///
    /// A chord that now reads as pressed moves to `Pressed` and fires its
    /// action for the active layer right away; an engaged chord that is no
    /// longer held moves to `Released`.
    pub fn on_key_changed(&mut self, key: KeyCode, view: &dyn KeyStateView) -> Vec<ActionFired> {
        let mut fired = Vec::new();
        for i in 0..self.registry.keybinds_for_key(key).len() {
            let hash = self.registry.keybinds_for_key(key)[i];
            let Some(keybind) = self.registry.get_mut(hash) else {
                continue;
            };

            if keybind.state().is_engaged() {
                if !keybind.is_down(view) {
                    keybind.set_state(KeybindState::Released);
                    trace!("keybind {hash} released by {key}");
                }
            } else if keybind.is_pressed(view) {
                keybind.set_state(KeybindState::Pressed);
                trace!("keybind {hash} pressed by {key}");
                fired.extend(self.fire_bound(hash));
            }
        }
        fired
    }

    fn fire_bound(&mut self, hash: KeybindHash) -> Option<ActionFired> {
        let layer = self.active_layer?;
        let action = self.registry.action_for(hash, layer)?;
        trace!("firing {action} on {layer}");
        Some(self.callbacks.fire(action, layer))
    }

    /// Fire `action` directly, bypassing keybinds.
    pub fn fire_action(&mut self, action: InputAction) -> Option<ActionFired> {
        let layer = self.active_layer?;
        Some(self.callbacks.fire(action, layer))
    }

    /// State of the chord polled for `action`, if it is bound on the active
    /// layer.
    pub fn action_state(&self, action: InputAction) -> Option<KeybindState> {
        let layer = self.active_layer?;
        let hash = self.registry.hash_for_action(action)?;
        if self.registry.action_for(hash, layer) != Some(action) {
            return None;
        }
        self.registry.get(hash).map(|k| k.state())
    }

    pub fn is_action_pressed(&self, action: InputAction) -> bool {
        self.action_state(action) == Some(KeybindState::Pressed)
    }

    pub fn is_action_down(&self, action: InputAction) -> bool {
        self.action_state(action) == Some(KeybindState::Down)
    }

    pub fn is_action_released(&self, action: InputAction) -> bool {
        self.action_state(action) == Some(KeybindState::Released)
    }
}
