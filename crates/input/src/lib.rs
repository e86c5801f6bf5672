//! Input handling: semantic bindings and the per-session locomotion input flags.

mod bindings;

pub use bindings::{Action, InputBindings};

use glam::Vec2;

/// Raw boolean input state for locomotion.
///
/// Key events mutate the flags directly; the frame that runs next reads them.
/// Nothing is queued except the one-shot jump/dash requests, which the frame consumes.
#[derive(Debug)]
pub struct InputState {
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    jump_requested: bool,
    dash_requested: bool,
    sprint_held: bool,

    /// Accumulated mouse motion since the last frame.
    mouse_delta: Vec2,

    /// When false, key events are ignored and every flag stays cleared.
    enabled: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            forward: false,
            backward: false,
            left: false,
            right: false,
            jump_requested: false,
            dash_requested: false,
            sprint_held: false,
            mouse_delta: Vec2::ZERO,
            enabled: true,
        }
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a key press. Returns true when this is a fresh press of a locomotion action
    /// (not an auto-repeat, not ignored because input is disabled).
    pub fn on_key_down(&mut self, action: Action) -> bool {
        if !self.enabled {
            return false;
        }
        let flag = match action {
            Action::MoveForward => &mut self.forward,
            Action::MoveBackward => &mut self.backward,
            Action::MoveLeft => &mut self.left,
            Action::MoveRight => &mut self.right,
            Action::Sprint => &mut self.sprint_held,
            Action::Jump => {
                self.jump_requested = true;
                return true;
            }
            Action::Dash => {
                self.dash_requested = true;
                return true;
            }
            _ => return false,
        };
        let fresh = !*flag;
        *flag = true;
        fresh
    }

    /// Apply a key release. Returns true if a held locomotion flag was cleared.
    pub fn on_key_up(&mut self, action: Action) -> bool {
        if !self.enabled {
            return false;
        }
        let flag = match action {
            Action::MoveForward => &mut self.forward,
            Action::MoveBackward => &mut self.backward,
            Action::MoveLeft => &mut self.left,
            Action::MoveRight => &mut self.right,
            Action::Sprint => &mut self.sprint_held,
            _ => return false,
        };
        let was_held = *flag;
        *flag = false;
        was_held
    }

    /// Process raw mouse motion (only accumulated while enabled).
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        if self.enabled {
            self.mouse_delta.x += delta.0 as f32;
            self.mouse_delta.y += delta.1 as f32;
        }
    }

    /// Zero every movement flag and pending request, and stop listening for key events.
    pub fn disable(&mut self) {
        if self.enabled {
            log::debug!("movement input disabled");
        }
        self.clear();
        self.enabled = false;
    }

    /// Resume listening for key events.
    pub fn enable(&mut self) {
        if !self.enabled {
            log::debug!("movement input enabled");
        }
        self.enabled = true;
    }

    /// Clear flags without changing whether input is listened to.
    pub fn clear(&mut self) {
        self.forward = false;
        self.backward = false;
        self.left = false;
        self.right = false;
        self.jump_requested = false;
        self.dash_requested = false;
        self.sprint_held = false;
        self.mouse_delta = Vec2::ZERO;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Movement input as `(forward - backward, right - left)`, normalized or zero.
    pub fn movement_input(&self) -> Vec2 {
        let axis = |pos: bool, neg: bool| (pos as i32 - neg as i32) as f32;
        Vec2::new(
            axis(self.forward, self.backward),
            axis(self.right, self.left),
        )
        .normalize_or_zero()
    }

    /// Check if the sprint key is held.
    pub fn sprint_held(&self) -> bool {
        self.sprint_held
    }

    /// Check (without consuming) whether a jump is pending.
    pub fn jump_requested(&self) -> bool {
        self.jump_requested
    }

    /// Check (without consuming) whether a dash is pending.
    pub fn dash_requested(&self) -> bool {
        self.dash_requested
    }

    /// Consume the pending jump request.
    pub fn take_jump_request(&mut self) -> bool {
        std::mem::take(&mut self.jump_requested)
    }

    /// Consume the pending dash request.
    pub fn take_dash_request(&mut self) -> bool {
        std::mem::take(&mut self.dash_requested)
    }

    /// Consume the accumulated mouse motion.
    pub fn take_mouse_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.mouse_delta)
    }
}

// Re-export for convenience
pub use winit::event::ElementState;
pub use winit::keyboard::KeyCode;
