//! Sprint state machine (hold or toggle) and walk/run speed selection.

use crate::session::LocomotionSettings;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Ground speeds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SprintTuning {
    /// Walking speed (units/s).
    pub walk_speed: f32,
    /// Run speed as a multiple of walk speed.
    pub run_multiplier: f32,
}

impl Default for SprintTuning {
    fn default() -> Self {
        Self {
            walk_speed: 3.0,
            run_multiplier: 1.7,
        }
    }
}

/// Tracks whether the player is sprinting.
///
/// Hold mode follows the key. Toggle mode flips on each press, or with
/// `sprint_disable_while_stationary` a press always starts sprinting and the
/// sprint ends the frame movement input drops to zero.
#[derive(Debug, Clone)]
pub struct SprintController {
    tuning: SprintTuning,
    settings: LocomotionSettings,
    is_sprinting: bool,
    /// Movement input was nonzero on the previous update.
    was_moving: bool,
}

impl SprintController {
    pub fn new(tuning: SprintTuning, settings: LocomotionSettings) -> Self {
        Self {
            tuning,
            settings,
            is_sprinting: false,
            was_moving: false,
        }
    }

    /// Fresh press of the sprint key.
    pub fn on_sprint_pressed(&mut self) {
        let before = self.is_sprinting;
        if !self.settings.sprint_toggle_mode || self.settings.sprint_disable_while_stationary {
            self.is_sprinting = true;
        } else {
            self.is_sprinting = !self.is_sprinting;
        }
        if before != self.is_sprinting {
            log::debug!("sprint {}", if self.is_sprinting { "on" } else { "off" });
        }
    }

    /// Release of the sprint key. Only meaningful in hold mode.
    pub fn on_sprint_released(&mut self) {
        if !self.settings.sprint_toggle_mode && self.is_sprinting {
            self.is_sprinting = false;
            log::debug!("sprint off");
        }
    }

    /// Input stopped being listened to (pause, spectate). A held key is gone.
    pub fn on_input_disabled(&mut self) {
        if !self.settings.sprint_toggle_mode {
            self.is_sprinting = false;
        }
    }

    /// Per-frame update with this frame's movement input.
    pub fn update(&mut self, movement_input: Vec2) {
        let moving = movement_input != Vec2::ZERO;
        if self.settings.sprint_toggle_mode
            && self.settings.sprint_disable_while_stationary
            && self.was_moving
            && !moving
            && self.is_sprinting
        {
            self.is_sprinting = false;
            log::debug!("sprint off (stopped moving)");
        }
        self.was_moving = moving;
    }

    /// Speed for this frame: run speed only while sprinting and moving.
    pub fn speed(&self, moving: bool) -> f32 {
        if self.is_sprinting && moving {
            self.run_speed()
        } else {
            self.walk_speed()
        }
    }

    /// Get the walking speed.
    pub fn walk_speed(&self) -> f32 {
        self.tuning.walk_speed
    }

    /// Get the sprinting speed.
    pub fn run_speed(&self) -> f32 {
        self.tuning.walk_speed * self.tuning.run_multiplier
    }

    /// Whether sprint is currently active.
    pub fn is_sprinting(&self) -> bool {
        self.is_sprinting
    }

    /// Back to walking with no held key.
    pub fn reset(&mut self) {
        self.is_sprinting = false;
        self.was_moving = false;
    }
}
