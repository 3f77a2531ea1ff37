//! Keybind Tests - Hashing, Registry Indices, State Machine
//!
//! Tests for keybind records and the registry that owns them.

use rf_input::input::{DeviceState, Keybind, KeybindRegistry, KeybindState};
use rf_input::{InputAction, InputLayer, KeyCode, KeybindHash};

// ============================================================================
// Hashing
// ============================================================================

#[test]
fn test_chord_order_gives_distinct_records() {
    let mut registry = KeybindRegistry::new();
    let ab = registry
        .add_keybind(&[KeyCode::A, KeyCode::B], InputAction::PlayerAttack, InputLayer::Gameplay)
        .unwrap();
    let ba = registry
        .add_keybind(&[KeyCode::B, KeyCode::A], InputAction::UiSelect, InputLayer::UI)
        .unwrap();

    assert_ne!(ab, ba);
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.get(ab).unwrap().keys(), &[KeyCode::A, KeyCode::B]);
    assert_eq!(registry.get(ba).unwrap().keys(), &[KeyCode::B, KeyCode::A]);
    // Both chords share keys, so both appear in each key's reverse index.
    assert_eq!(registry.keybinds_for_key(KeyCode::A).len(), 2);
}

#[test]
fn test_hash_is_stable() {
    let keys = [KeyCode::LeftCtrl, KeyCode::LeftShift, KeyCode::Z];
    assert_eq!(KeybindHash::of(&keys), KeybindHash::of(&keys));
    assert_eq!(Keybind::new(&keys).unwrap().hash(), KeybindHash::of(&keys));
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn test_chord_repeating_a_key_is_refused() {
    let mut registry = KeybindRegistry::new();
    registry.add_keybind(&[KeyCode::A], InputAction::PlayerMoveLeft, InputLayer::Gameplay);

    let doubled = registry.add_keybind(
        &[KeyCode::A, KeyCode::A],
        InputAction::PlayerJump,
        InputLayer::Gameplay,
    );
    assert!(doubled.is_none());
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.hash_for_action(InputAction::PlayerJump), None);
    assert_eq!(registry.keybinds_for_key(KeyCode::A).len(), 1);
}

#[test]
fn test_same_chord_on_two_layers() {
    let mut registry = KeybindRegistry::new();
    let gameplay = registry
        .add_keybind(&[KeyCode::E], InputAction::PlayerAttack, InputLayer::Gameplay)
        .unwrap();
    let ui = registry
        .add_keybind(&[KeyCode::E], InputAction::UiSelect, InputLayer::UI)
        .unwrap();

    assert_eq!(gameplay, ui);
    assert_eq!(registry.len(), 1);
    assert_eq!(
        registry.action_for(gameplay, InputLayer::Gameplay),
        Some(InputAction::PlayerAttack)
    );
    assert_eq!(registry.action_for(gameplay, InputLayer::UI), Some(InputAction::UiSelect));
    assert_eq!(registry.action_for(gameplay, InputLayer::Editor), None);
}

#[test]
fn test_rebinding_action_moves_polled_chord() {
    let mut registry = KeybindRegistry::new();
    let space = registry
        .add_keybind(&[KeyCode::Space], InputAction::PlayerJump, InputLayer::Gameplay)
        .unwrap();
    let j = registry
        .add_keybind(&[KeyCode::J], InputAction::PlayerJump, InputLayer::Gameplay)
        .unwrap();

    assert_eq!(registry.hash_for_action(InputAction::PlayerJump), Some(j));
    assert!(registry.get(space).is_some());
}

#[test]
fn test_remove_middle_keybind_keeps_others_reachable() {
    let mut registry = KeybindRegistry::new();
    let w = registry
        .add_keybind(&[KeyCode::W], InputAction::PlayerMoveForward, InputLayer::Gameplay)
        .unwrap();
    let s = registry
        .add_keybind(&[KeyCode::S], InputAction::PlayerMoveBackward, InputLayer::Gameplay)
        .unwrap();
    let d = registry
        .add_keybind(&[KeyCode::D], InputAction::PlayerMoveRight, InputLayer::Gameplay)
        .unwrap();

    registry.remove_keybind(w);

    assert_eq!(registry.len(), 2);
    assert!(registry.get(w).is_none());
    assert_eq!(registry.get(s).unwrap().keys(), &[KeyCode::S]);
    assert_eq!(registry.get(d).unwrap().keys(), &[KeyCode::D]);
    assert_eq!(registry.hash_for_action(InputAction::PlayerMoveRight), Some(d));

    // Removing twice is harmless.
    registry.remove_keybind(w);
    assert_eq!(registry.len(), 2);
}

// ============================================================================
// State Machine
// ============================================================================

#[test]
fn test_single_key_state_cycle() {
    let mut bind = Keybind::new(&[KeyCode::Space]).unwrap();
    let mut device = DeviceState::new();
    let mut states = Vec::new();

    device.inject_key_transition(KeyCode::Space, false);
    states.push(bind.evaluate(&device));
    device.begin_frame();

    states.push(bind.evaluate(&device));
    device.begin_frame();

    device.inject_key_transition(KeyCode::Space, true);
    states.push(bind.evaluate(&device));
    device.begin_frame();

    states.push(bind.evaluate(&device));

    assert_eq!(
        states,
        vec![
            KeybindState::Pressed,
            KeybindState::Down,
            KeybindState::Released,
            KeybindState::Idle
        ]
    );
}

#[test]
fn test_chord_held_without_fresh_trigger_stays_idle() {
    let mut bind = Keybind::new(&[KeyCode::LeftCtrl, KeyCode::S]).unwrap();
    let mut device = DeviceState::new();

    device.inject_key_transition(KeyCode::S, false);
    device.begin_frame();
    device.inject_key_transition(KeyCode::LeftCtrl, false);

    assert_eq!(bind.evaluate(&device), KeybindState::Idle);
}

#[test]
fn test_chord_releasing_held_key_releases() {
    let mut bind = Keybind::new(&[KeyCode::LeftCtrl, KeyCode::S]).unwrap();
    let mut device = DeviceState::new();

    device.inject_key_transition(KeyCode::LeftCtrl, false);
    device.inject_key_transition(KeyCode::S, false);
    assert_eq!(bind.evaluate(&device), KeybindState::Pressed);
    device.begin_frame();

    device.inject_key_transition(KeyCode::LeftCtrl, true);
    assert_eq!(bind.evaluate(&device), KeybindState::Released);
}
