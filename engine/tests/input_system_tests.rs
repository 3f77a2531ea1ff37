//! Input System Tests - End-to-End Dispatch, Layers, Polling
//!
//! Drives the `InputSystem` facade the way a game loop does: inject events,
//! poll actions, call `begin_frame()`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rf_input::input::KeybindState;
use rf_input::{InputAction, InputLayer, InputSystem, KeyCode, MouseButton};

fn counter(input: &mut InputSystem, action: InputAction) -> Rc<Cell<u32>> {
    let hits = Rc::new(Cell::new(0));
    let sink = Rc::clone(&hits);
    input.register_callback(action, move || {
        sink.set(sink.get() + 1);
        true
    });
    hits
}

// ============================================================================
// End-to-End
// ============================================================================

#[test]
fn test_space_fires_jump() {
    let mut input = InputSystem::new();
    input.add_keybind(&[KeyCode::Space], InputAction::PlayerJump, InputLayer::Gameplay);
    input.set_active_layer(Some(InputLayer::Gameplay));

    let flag = Rc::new(Cell::new(false));
    let sink = Rc::clone(&flag);
    input.register_callback(InputAction::PlayerJump, move || {
        sink.set(true);
        true
    });

    let fired = input.inject_key(KeyCode::Space, true);
    assert!(flag.get(), "callback runs during the injection call");
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].action, InputAction::PlayerJump);
    assert_eq!(fired[0].layer, InputLayer::Gameplay);

    // Pressed holds for the rest of the frame.
    input.inject_mouse_motion(3, 3);
    assert!(input.is_action_pressed(InputAction::PlayerJump));

    input.begin_frame();
    assert!(!input.is_action_pressed(InputAction::PlayerJump));
    assert!(input.is_action_down(InputAction::PlayerJump));
}

#[test]
fn test_chord_scenario() {
    let mut input = InputSystem::new();
    input.add_keybind(
        &[KeyCode::Space, KeyCode::MouseLeft],
        InputAction::PlayerJump,
        InputLayer::Gameplay,
    );
    input.set_active_layer(Some(InputLayer::Gameplay));
    let jumps = counter(&mut input, InputAction::PlayerJump);

    // Held key alone does not trigger.
    assert!(input.inject_key(KeyCode::Space, true).is_empty());
    assert_eq!(jumps.get(), 0);

    // Trigger in the same frame.
    assert_eq!(input.inject_mouse_button(MouseButton::Left, true).len(), 1);
    assert_eq!(jumps.get(), 1);
    assert!(input.is_action_pressed(InputAction::PlayerJump));

    input.begin_frame();
    assert!(input.is_action_down(InputAction::PlayerJump));

    input.inject_mouse_button(MouseButton::Left, false);
    assert!(input.is_action_released(InputAction::PlayerJump));

    input.begin_frame();
    input.inject_key(KeyCode::Space, false);
    input.begin_frame();
    assert_eq!(input.action_state(InputAction::PlayerJump), Some(KeybindState::Idle));
    assert_eq!(jumps.get(), 1);
}

#[test]
fn test_trigger_before_held_key_does_not_fire() {
    let mut input = InputSystem::new();
    input.add_keybind(
        &[KeyCode::Space, KeyCode::MouseLeft],
        InputAction::PlayerJump,
        InputLayer::Gameplay,
    );
    input.set_active_layer(Some(InputLayer::Gameplay));
    let jumps = counter(&mut input, InputAction::PlayerJump);

    input.inject_mouse_button(MouseButton::Left, true);
    input.begin_frame();
    input.inject_key(KeyCode::Space, true);
    input.begin_frame();

    assert_eq!(jumps.get(), 0);
    assert!(!input.is_action_down(InputAction::PlayerJump));
}

#[test]
fn test_press_and_release_in_one_frame_fires_once() {
    let mut input = InputSystem::new();
    input.add_keybind(&[KeyCode::E], InputAction::PlayerAttack, InputLayer::Gameplay);
    input.set_active_layer(Some(InputLayer::Gameplay));
    let attacks = counter(&mut input, InputAction::PlayerAttack);

    input.inject_key(KeyCode::E, true);
    input.inject_key(KeyCode::E, false);
    assert!(input.is_action_released(InputAction::PlayerAttack));

    assert!(input.begin_frame().is_empty());
    assert_eq!(attacks.get(), 1);
    assert_eq!(input.action_state(InputAction::PlayerAttack), Some(KeybindState::Idle));
}

#[test]
fn test_key_repeat_does_not_refire() {
    let mut input = InputSystem::new();
    input.add_keybind(&[KeyCode::W], InputAction::PlayerMoveForward, InputLayer::Gameplay);
    input.set_active_layer(Some(InputLayer::Gameplay));
    let moves = counter(&mut input, InputAction::PlayerMoveForward);

    input.inject_key(KeyCode::W, true);
    for _ in 0..5 {
        input.begin_frame();
        input.inject_key(KeyCode::W, true);
    }

    assert_eq!(moves.get(), 1);
    assert!(input.is_action_down(InputAction::PlayerMoveForward));
}

#[test]
fn test_state_cycle_across_frames() {
    let mut input = InputSystem::new();
    input.add_keybind(&[KeyCode::Space], InputAction::PlayerJump, InputLayer::Gameplay);
    input.set_active_layer(Some(InputLayer::Gameplay));
    let mut states = Vec::new();

    input.inject_key(KeyCode::Space, true);
    states.push(input.action_state(InputAction::PlayerJump));
    input.begin_frame();
    states.push(input.action_state(InputAction::PlayerJump));
    input.inject_key(KeyCode::Space, false);
    states.push(input.action_state(InputAction::PlayerJump));
    input.begin_frame();
    states.push(input.action_state(InputAction::PlayerJump));

    assert_eq!(
        states,
        vec![
            Some(KeybindState::Pressed),
            Some(KeybindState::Down),
            Some(KeybindState::Released),
            Some(KeybindState::Idle)
        ]
    );
}

// ============================================================================
// Layers
// ============================================================================

#[test]
fn test_layer_isolation() {
    let mut input = InputSystem::new();
    input.add_keybind(&[KeyCode::Enter], InputAction::PlayerAttack, InputLayer::Gameplay);
    input.add_keybind(&[KeyCode::Enter], InputAction::UiSelect, InputLayer::UI);
    let attacks = counter(&mut input, InputAction::PlayerAttack);
    let selects = counter(&mut input, InputAction::UiSelect);

    input.set_active_layer(Some(InputLayer::Gameplay));
    input.inject_key(KeyCode::Enter, true);
    input.inject_key(KeyCode::Enter, false);
    input.begin_frame();
    assert_eq!((attacks.get(), selects.get()), (1, 0));

    input.set_active_layer(Some(InputLayer::UI));
    input.inject_key(KeyCode::Enter, true);
    input.inject_key(KeyCode::Enter, false);
    input.begin_frame();
    assert_eq!((attacks.get(), selects.get()), (1, 1));
}

#[test]
fn test_no_active_layer_fires_nothing() {
    let mut input = InputSystem::new();
    input.add_keybind(&[KeyCode::Space], InputAction::PlayerJump, InputLayer::Gameplay);
    let jumps = counter(&mut input, InputAction::PlayerJump);

    assert!(input.inject_key(KeyCode::Space, true).is_empty());
    assert!(input.begin_frame().is_empty());
    assert!(!input.is_action_pressed(InputAction::PlayerJump));
    assert!(!input.is_action_down(InputAction::PlayerJump));
    assert_eq!(jumps.get(), 0);
    // Raw queries still work.
    assert!(input.is_key_down(KeyCode::Space));
}

#[test]
fn test_press_without_layer_does_not_fire_once_layer_is_set() {
    let mut input = InputSystem::new();
    input.add_keybind(&[KeyCode::Space], InputAction::PlayerJump, InputLayer::Gameplay);
    let jumps = counter(&mut input, InputAction::PlayerJump);

    input.inject_key(KeyCode::Space, true);
    input.set_active_layer(Some(InputLayer::Gameplay));
    assert!(input.begin_frame().is_empty());

    assert_eq!(jumps.get(), 0);
    // The chord kept tracking the held key while no layer was active.
    assert!(input.is_action_down(InputAction::PlayerJump));
}

#[test]
fn test_release_while_no_layer_is_active_returns_to_idle() {
    let mut input = InputSystem::new();
    input.add_keybind(&[KeyCode::Space], InputAction::PlayerJump, InputLayer::Gameplay);
    input.set_active_layer(Some(InputLayer::Gameplay));

    input.inject_key(KeyCode::Space, true);
    assert!(input.is_action_pressed(InputAction::PlayerJump));

    input.set_active_layer(None);
    input.inject_key(KeyCode::Space, false);
    for _ in 0..3 {
        input.begin_frame();
    }
    input.set_active_layer(Some(InputLayer::Gameplay));

    assert!(!input.is_key_down(KeyCode::Space));
    assert_eq!(input.action_state(InputAction::PlayerJump), Some(KeybindState::Idle));
    assert!(!input.is_action_pressed(InputAction::PlayerJump));

    input.begin_frame();
    assert!(!input.is_action_released(InputAction::PlayerJump));
}

// ============================================================================
// Polling
// ============================================================================

#[test]
fn test_unbound_polling_is_false() {
    let mut input = InputSystem::new();
    input.set_active_layer(Some(InputLayer::Editor));
    for action in InputAction::ALL {
        assert!(!input.is_action_pressed(action));
        assert!(!input.is_action_down(action));
        assert!(!input.is_action_released(action));
    }
}

#[test]
fn test_removed_keybind_stops_firing() {
    let mut input = InputSystem::new();
    let hash = input
        .add_keybind(&[KeyCode::I], InputAction::UiOpenInventory, InputLayer::UI)
        .unwrap();
    input.set_active_layer(Some(InputLayer::UI));
    let opens = counter(&mut input, InputAction::UiOpenInventory);

    input.remove_keybind(hash);
    assert!(input.inject_key(KeyCode::I, true).is_empty());
    assert_eq!(opens.get(), 0);
    assert!(!input.is_action_pressed(InputAction::UiOpenInventory));
}

// ============================================================================
// Callbacks
// ============================================================================

#[test]
fn test_every_callback_runs_and_results_are_collected() {
    let mut input = InputSystem::new();
    input.add_keybind(&[KeyCode::Escape], InputAction::UiCloseMenu, InputLayer::UI);
    input.set_active_layer(Some(InputLayer::UI));

    let order = Rc::new(RefCell::new(Vec::new()));
    let first_log = Rc::clone(&order);
    let first = input.register_callback(InputAction::UiCloseMenu, move || {
        first_log.borrow_mut().push(1);
        true
    });
    let second_log = Rc::clone(&order);
    let second = input.register_callback(InputAction::UiCloseMenu, move || {
        second_log.borrow_mut().push(2);
        false
    });

    let fired = input.inject_key(KeyCode::Escape, true);

    // A handled result from the first callback does not stop the second.
    assert_eq!(*order.borrow(), vec![1, 2]);
    assert_eq!(fired[0].results, vec![(first, true), (second, false)]);
    assert!(fired[0].consumed());
}

#[test]
fn test_unregistered_callback_is_not_called() {
    let mut input = InputSystem::new();
    input.add_keybind(&[KeyCode::Space], InputAction::PlayerJump, InputLayer::Gameplay);
    input.set_active_layer(Some(InputLayer::Gameplay));

    let hits = Rc::new(Cell::new(0));
    let sink = Rc::clone(&hits);
    let id = input.register_callback(InputAction::PlayerJump, move || {
        sink.set(sink.get() + 1);
        false
    });

    assert!(input.unregister_callback(id));
    assert!(!input.unregister_callback(id));

    let fired = input.inject_key(KeyCode::Space, true);
    assert_eq!(hits.get(), 0);
    assert!(fired[0].results.is_empty());
    assert!(!fired[0].consumed());
}
