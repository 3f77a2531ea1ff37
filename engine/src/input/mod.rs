//! Input Module
//!
//! Keyboard and mouse input for a game loop, split in three layers:
//!
//! - [`DeviceState`] tracks which keys are held and which changed this frame.
//! - [`KeybindRegistry`] maps ordered key chords to [`InputAction`]s per
//!   [`InputLayer`].
//! - [`ActionResolver`] decides when a chord triggers and dispatches the
//!   active layer's action to registered callbacks.
//!
//! [`InputSystem`] wires the three together and is what applications use.
//! Events come in from `winit` (see [`winit_adapter`]), from raw OS packets
//! (see [`raw`]) or from direct injection.
//!
//! # Example
//!
//! ```rust
//! use rf_input::input::{InputAction, InputLayer, InputSystem, KeyCode, MouseButton};
//!
//! let mut input = InputSystem::new();
//! input.add_keybind(&[KeyCode::Space, KeyCode::MouseLeft], InputAction::PlayerJump, InputLayer::Gameplay);
//! input.set_active_layer(Some(InputLayer::Gameplay));
//!
//! input.inject_key(KeyCode::Space, true);
//! input.begin_frame();
//! input.inject_mouse_button(MouseButton::Left, true);
//! assert!(input.is_action_pressed(InputAction::PlayerJump));
//! ```

pub mod actions;
pub mod callbacks;
pub mod config;
pub mod device;
pub mod key_set;
pub mod keybind;
pub mod keys;
pub mod raw;
pub mod registry;
pub mod resolver;
pub mod system;
pub mod winit_adapter;

// Re-export commonly used types at module level
pub use actions::{InputAction, InputLayer, UnknownName};
pub use callbacks::{ActionCallback, ActionFired, CallbackId};
pub use config::{BindingConfig, KeybindConfig};
pub use device::{DeviceState, KeyChange, KeyStateView, KeyTransition, NotifyCallback};
pub use key_set::KeySet;
pub use keybind::{Keybind, KeybindHash, KeybindState};
pub use keys::{KEY_COUNT, KeyCode, MouseButton, UnknownKeyName};
pub use raw::{RawInputReader, RawInputSource, RawPacket};
pub use registry::KeybindRegistry;
pub use resolver::ActionResolver;
pub use system::InputSystem;
pub use winit_adapter::DeviceInput;
