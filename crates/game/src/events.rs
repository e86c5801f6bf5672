//! Window and device event handling for GameState.

use input::Action;
use winit::event::{DeviceEvent, ElementState, WindowEvent};
use winit::keyboard::PhysicalKey;

impl crate::GameState {
    /// Handle a window event. Returns true if the app should exit.
    pub(crate) fn handle_window_event(&mut self, event: WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => {
                self.scheduler.stop();
            }
            WindowEvent::Resized(size) => {
                self.renderer.resize(size);
                self.scheduler.resize(size.width, size.height);
            }
            WindowEvent::Focused(false) => {
                self.scheduler.pause();
                self.set_cursor_grab(false);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                ..
            } => {
                if !self.cursor_grabbed && self.scheduler.session().is_running() {
                    self.set_cursor_grab(true);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                // Held keys are state; auto-repeat carries no new information.
                if event.repeat {
                    return false;
                }
                let PhysicalKey::Code(key) = event.physical_key else {
                    return false;
                };
                let Some(action) = self.bindings.action_for(key) else {
                    return false;
                };
                if event.state.is_pressed() {
                    self.scheduler.handle_key_down(action);
                    if action == Action::Pause {
                        let running = self.scheduler.session().is_running();
                        self.set_cursor_grab(running);
                    }
                } else {
                    self.scheduler.handle_key_up(action);
                }
            }
            WindowEvent::RedrawRequested => {
                self.frame();
            }
            _ => {}
        }
        self.scheduler.session().is_stopped()
    }

    pub(crate) fn handle_device_event(&mut self, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.cursor_grabbed {
                self.scheduler.handle_mouse_motion(delta);
            }
        }
    }
}
