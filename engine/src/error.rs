//! Error types
//!
//! Nothing on the per-event path returns these to callers: raw input errors
//! are logged and the packet is dropped. Configuration errors surface from
//! the startup loaders only.

use std::path::PathBuf;

use crate::input::actions::InputAction;
use crate::input::keys::KeyCode;

/// Failure to fetch or decode one raw input packet.
#[derive(Debug, thiserror::Error)]
pub enum RawInputError {
    #[error("raw input size query failed: {0}")]
    SizeQuery(String),

    #[error("raw input read failed: {0}")]
    Read(String),

    #[error("raw input read returned {got} bytes, expected {expected}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("raw input packet of {got} bytes is shorter than the {needed} bytes required")]
    ShortPacket { needed: usize, got: usize },

    #[error("unsupported raw input packet type {0}")]
    UnknownType(u32),

    #[error("could not allocate {0} bytes for a raw input packet")]
    Alloc(usize),
}

/// Failure to load or apply a keybind configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read keybind file {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid keybind json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binding #{index} for {action} has no keys")]
    EmptyChord { index: usize, action: InputAction },

    #[error("binding #{index} for {action} lists {key} more than once")]
    RepeatedKey {
        index: usize,
        action: InputAction,
        key: KeyCode,
    },
}
