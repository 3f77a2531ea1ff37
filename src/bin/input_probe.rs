//! Input Probe
//!
//! Run with: `cargo run --bin input_probe [keybinds.json]`
//!
//! Opens a window and logs every action the input system fires, along with
//! per-frame mouse and wheel deltas. Without an argument the built-in
//! keybinds are used.
//!
//! Set `RUST_LOG=trace` to see individual keybind transitions.
//!
//! Controls (default keybinds):
//! - WASD: Player_Move*
//! - Mouse left: Player_Attack
//! - Space held + mouse left: Player_Jump
//! - F1 / F2 / F3: switch to the Gameplay / UI / Editor layer
//! - ESC: Exit

use std::process::ExitCode;

use log::{error, info};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use rf_input::input::winit_adapter::{translate_device_event, translate_window_event};
use rf_input::input::ActionFired;
use rf_input::{InputAction, InputLayer, InputSystem, KeybindConfig};

// ============================================================================
// APPLICATION HANDLER
// ============================================================================

struct App {
    window: Option<Window>,
    input: InputSystem,
    frame: u64,
}

impl App {
    fn new(config: &KeybindConfig) -> Result<Self, rf_input::ConfigError> {
        let mut input = InputSystem::new();
        config.apply(&mut input)?;

        for action in InputAction::ALL {
            input.register_callback(action, move || {
                info!("callback: {action}");
                false
            });
        }

        Ok(Self {
            window: None,
            input,
            frame: 0,
        })
    }

    fn report(&self, fired: Vec<ActionFired>) {
        for event in fired {
            info!(
                "frame {}: {} fired on {} ({} callbacks, consumed: {})",
                self.frame,
                event.action,
                event.layer,
                event.results.len(),
                event.consumed()
            );
        }
    }

    fn switch_layer(&mut self, key: WinitKeyCode) {
        let layer = match key {
            WinitKeyCode::F1 => InputLayer::Gameplay,
            WinitKeyCode::F2 => InputLayer::UI,
            WinitKeyCode::F3 => InputLayer::Editor,
            _ => return,
        };
        self.input.set_active_layer(Some(layer));
        info!("active layer: {layer}");
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = WindowAttributes::default()
            .with_title("Input Probe - ESC to exit")
            .with_inner_size(PhysicalSize::new(640, 360));

        match event_loop.create_window(window_attrs) {
            Ok(window) => self.window = Some(window),
            Err(e) => {
                error!("failed to create window: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
                return;
            }
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if *key == WinitKeyCode::Escape {
                    event_loop.exit();
                    return;
                }
                self.switch_layer(*key);
            }
            _ => {}
        }

        if let Some(input) = translate_window_event(&event) {
            let fired = self.input.handle_device_input(input);
            self.report(fired);
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        if let Some(input) = translate_device_event(&event) {
            let fired = self.input.handle_device_input(input);
            self.report(fired);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        let delta = self.input.mouse_delta();
        let wheel = self.input.wheel_delta();
        if delta != glam::IVec2::ZERO || wheel != 0 {
            info!("frame {}: mouse {delta}, wheel {wheel}", self.frame);
        }

        let fired = self.input.begin_frame();
        self.report(fired);
        self.frame += 1;
    }
}

// ============================================================================
// MAIN
// ============================================================================

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => match KeybindConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => {
            info!("no keybind file given, using defaults");
            KeybindConfig::default_bindings()
        }
    };

    let mut app = match App::new(&config) {
        Ok(app) => app,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            error!("failed to create event loop: {e}");
            return ExitCode::FAILURE;
        }
    };
    event_loop.set_control_flow(ControlFlow::Wait);

    if let Err(e) = event_loop.run_app(&mut app) {
        error!("event loop error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
