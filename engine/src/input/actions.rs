//! Input Actions and Layers
//!
//! Actions are the abstract events gameplay and UI code observe. They are
//! never tied to a physical key directly: a keybind maps to an action per
//! [`InputLayer`], and only the active layer's mapping fires.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Logical input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InputAction {
    PlayerMoveForward,
    PlayerMoveBackward,
    PlayerMoveLeft,
    PlayerMoveRight,
    PlayerJump,
    PlayerAttack,
    UiOpenInventory,
    UiCloseMenu,
    UiSelect,
}

impl InputAction {
    /// Number of actions; sizes action-indexed tables.
    pub const COUNT: usize = 9;

    pub const ALL: [InputAction; Self::COUNT] = [
        InputAction::PlayerMoveForward,
        InputAction::PlayerMoveBackward,
        InputAction::PlayerMoveLeft,
        InputAction::PlayerMoveRight,
        InputAction::PlayerJump,
        InputAction::PlayerAttack,
        InputAction::UiOpenInventory,
        InputAction::UiCloseMenu,
        InputAction::UiSelect,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Name used in keybind files.
    pub fn name(self) -> &'static str {
        match self {
            InputAction::PlayerMoveForward => "Player_MoveForward",
            InputAction::PlayerMoveBackward => "Player_MoveBackward",
            InputAction::PlayerMoveLeft => "Player_MoveLeft",
            InputAction::PlayerMoveRight => "Player_MoveRight",
            InputAction::PlayerJump => "Player_Jump",
            InputAction::PlayerAttack => "Player_Attack",
            InputAction::UiOpenInventory => "UI_OpenInventory",
            InputAction::UiCloseMenu => "UI_CloseMenu",
            InputAction::UiSelect => "UI_Select",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }
}

/// Mutually exclusive input contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InputLayer {
    Gameplay,
    UI,
    Editor,
}

impl InputLayer {
    pub const COUNT: usize = 3;

    pub const ALL: [InputLayer; Self::COUNT] =
        [InputLayer::Gameplay, InputLayer::UI, InputLayer::Editor];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            InputLayer::Gameplay => "Gameplay",
            InputLayer::UI => "UI",
            InputLayer::Editor => "Editor",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.name() == name)
    }
}

/// Error returned when parsing an unknown action or layer name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnknownName {
    #[error("unknown input action `{0}`")]
    Action(String),
    #[error("unknown input layer `{0}`")]
    Layer(String),
}

impl fmt::Display for InputAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for InputLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InputAction {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownName::Action(s.to_string()))
    }
}

impl FromStr for InputLayer {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownName::Layer(s.to_string()))
    }
}

impl Serialize for InputAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for InputAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

impl Serialize for InputLayer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for InputLayer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_match_table_order() {
        for (i, action) in InputAction::ALL.iter().enumerate() {
            assert_eq!(action.index(), i);
        }
        for (i, layer) in InputLayer::ALL.iter().enumerate() {
            assert_eq!(layer.index(), i);
        }
    }

    #[test]
    fn test_action_names() {
        assert_eq!(InputAction::PlayerJump.name(), "Player_Jump");
        assert_eq!(
            "UI_OpenInventory".parse::<InputAction>(),
            Ok(InputAction::UiOpenInventory)
        );
        assert_eq!(
            "Player_Fly".parse::<InputAction>(),
            Err(UnknownName::Action("Player_Fly".into()))
        );
    }

    #[test]
    fn test_layer_names() {
        assert_eq!("Editor".parse::<InputLayer>(), Ok(InputLayer::Editor));
        assert!("Menu".parse::<InputLayer>().is_err());
    }
}
