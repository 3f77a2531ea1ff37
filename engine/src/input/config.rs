//! Keybind Configuration
//!
//! Keybinds can be described in a JSON file and applied to an
//! [`InputSystem`] at startup:
//!
//! ```json
//! {
//!   "active_layer": "Gameplay",
//!   "bindings": [
//!     { "keys": ["Space", "MouseLeft"], "action": "Player_Jump", "layer": "Gameplay" }
//!   ]
//! }
//! ```
//!
//! Keys, actions and layers are referenced by name. A file with an unknown
//! name, an empty chord or a chord repeating a key is rejected as a whole.

use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::actions::{InputAction, InputLayer};
use super::keybind::{KeybindHash, repeated_key};
use super::keys::KeyCode;
use super::system::InputSystem;
use crate::error::ConfigError;

/// One chord bound to an action on a layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BindingConfig {
    /// Ordered chord; the last key is the trigger.
    pub keys: Vec<KeyCode>,
    pub action: InputAction,
    pub layer: InputLayer,
}

impl BindingConfig {
    pub fn new(keys: &[KeyCode], action: InputAction, layer: InputLayer) -> Self {
        Self {
            keys: keys.to_vec(),
            action,
            layer,
        }
    }

    /// Why this binding, at position `index`, cannot be registered.
    fn error(&self, index: usize) -> Option<ConfigError> {
        if self.keys.is_empty() {
            return Some(ConfigError::EmptyChord {
                index,
                action: self.action,
            });
        }
        repeated_key(&self.keys).map(|key| ConfigError::RepeatedKey {
            index,
            action: self.action,
            key,
        })
    }
}

/// A full keybind set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeybindConfig {
    /// Layer selected after applying. Left unchanged when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_layer: Option<InputLayer>,
    #[serde(default)]
    pub bindings: Vec<BindingConfig>,
}

impl KeybindConfig {
    /// Read and validate a keybind file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        info!(
            "loaded {} keybinds from {}",
            config.bindings.len(),
            path.display()
        );
        Ok(config)
    }

    /// Parse and validate a keybind set from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every binding has at least one key and no key twice.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self
            .bindings
            .iter()
            .enumerate()
            .find_map(|(index, binding)| binding.error(index))
        {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Register every binding on `system` and select the active layer.
    ///
    /// The whole set is validated first, so an invalid config leaves
    /// `system` untouched. Returns the keybind hashes in binding order.
    pub fn apply(&self, system: &mut InputSystem) -> Result<Vec<KeybindHash>, ConfigError> {
        self.validate()?;

        let mut hashes = Vec::with_capacity(self.bindings.len());
        for (index, binding) in self.bindings.iter().enumerate() {
            let hash = system
                .add_keybind(&binding.keys, binding.action, binding.layer)
                .ok_or_else(|| {
                    binding.error(index).unwrap_or(ConfigError::EmptyChord {
                        index,
                        action: binding.action,
                    })
                })?;
            hashes.push(hash);
        }

        if let Some(layer) = self.active_layer {
            system.set_active_layer(Some(layer));
        }
        debug!("applied {} keybinds", hashes.len());
        Ok(hashes)
    }

    /// The built-in keybind set used when no file is given.
    pub fn default_bindings() -> Self {
        use InputAction::*;
        use InputLayer::*;

        Self {
            active_layer: Some(Gameplay),
            bindings: vec![
                BindingConfig::new(&[KeyCode::Space, KeyCode::MouseLeft], PlayerJump, Gameplay),
                BindingConfig::new(&[KeyCode::W], PlayerMoveForward, Gameplay),
                BindingConfig::new(&[KeyCode::S], PlayerMoveBackward, Gameplay),
                BindingConfig::new(&[KeyCode::A], PlayerMoveLeft, Gameplay),
                BindingConfig::new(&[KeyCode::D], PlayerMoveRight, Gameplay),
                BindingConfig::new(&[KeyCode::MouseLeft], PlayerAttack, Gameplay),
                BindingConfig::new(&[KeyCode::I], UiOpenInventory, UI),
                BindingConfig::new(&[KeyCode::Escape], UiCloseMenu, UI),
                BindingConfig::new(&[KeyCode::Enter], UiSelect, UI),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        let config = KeybindConfig::from_json(
            r#"{ "bindings": [ { "keys": ["LeftCtrl", "7"], "action": "UI_Select", "layer": "Editor" } ] }"#,
        )
        .unwrap();

        assert_eq!(config.active_layer, None);
        assert_eq!(
            config.bindings,
            vec![BindingConfig::new(
                &[KeyCode::LeftCtrl, KeyCode::Num7],
                InputAction::UiSelect,
                InputLayer::Editor
            )]
        );
    }

    #[test]
    fn test_unknown_key_name_is_rejected() {
        let err = KeybindConfig::from_json(
            r#"{ "bindings": [ { "keys": ["Hyper"], "action": "Player_Jump", "layer": "Gameplay" } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.to_string().contains("Hyper"));
    }

    #[test]
    fn test_empty_chord_is_rejected() {
        let err = KeybindConfig::from_json(
            r#"{ "bindings": [ { "keys": [], "action": "Player_Jump", "layer": "Gameplay" } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EmptyChord {
                index: 0,
                action: InputAction::PlayerJump
            }
        ));
    }

    #[test]
    fn test_repeated_key_is_rejected() {
        let err = KeybindConfig::from_json(
            r#"{ "bindings": [
                { "keys": ["A"], "action": "Player_MoveLeft", "layer": "Gameplay" },
                { "keys": ["A", "A"], "action": "Player_Jump", "layer": "Gameplay" }
            ] }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::RepeatedKey {
                index: 1,
                action: InputAction::PlayerJump,
                key: KeyCode::A
            }
        ));
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_default_bindings_cover_every_action() {
        let config = KeybindConfig::default_bindings();
        for action in InputAction::ALL {
            assert!(
                config.bindings.iter().any(|b| b.action == action),
                "{action} has no default binding"
            );
        }
    }
}
