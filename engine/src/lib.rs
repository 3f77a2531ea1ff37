//! rf_input
//!
//! Input layer for a game runtime: raw keyboard and mouse state, ordered
//! key chords bound to abstract actions per input layer, and synchronous
//! action callbacks.
//!
//! # Modules
//!
//! - [`input`] - Device tracking, keybinds, action resolution and the [`InputSystem`] facade
//! - [`error`] - Raw input and configuration errors
//!
//! # Example
//!
//! ```no_run
//! use rf_input::{InputAction, InputSystem, KeybindConfig};
//!
//! let mut input = InputSystem::new();
//! KeybindConfig::load("keybinds.json")?.apply(&mut input)?;
//!
//! input.register_callback(InputAction::PlayerJump, || {
//!     println!("jump");
//!     true
//! });
//!
//! // per frame:
//! //   feed events with handle_device_input / process_raw_input
//! //   poll is_action_pressed / is_action_down
//! input.begin_frame();
//! # Ok::<(), rf_input::error::ConfigError>(())
//! ```

pub mod error;
pub mod input;

// Re-export commonly used input types
pub use error::{ConfigError, RawInputError};
pub use input::{
    DeviceInput, InputAction, InputLayer, InputSystem, KeyCode, KeybindConfig, KeybindHash,
    MouseButton,
};
