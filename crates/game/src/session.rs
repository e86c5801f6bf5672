//! Per-level session state: run state and the user's locomotion settings.

use serde::{Deserialize, Serialize};

/// Whether frames advance the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// Rendering continues, simulation and timers are frozen.
    Paused,
    /// Terminal. The frame loop ends.
    Stopped,
}

/// User settings that shape sprint behaviour. Read-only during a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionSettings {
    /// Sprint key toggles instead of being held.
    pub sprint_toggle_mode: bool,
    /// In toggle mode, stop sprinting when the player stops moving.
    pub sprint_disable_while_stationary: bool,
}

impl Default for LocomotionSettings {
    fn default() -> Self {
        Self {
            sprint_toggle_mode: true,
            sprint_disable_while_stationary: true,
        }
    }
}

/// Explicit session context handed to the scheduler instead of global flags.
#[derive(Debug, Clone)]
pub struct SessionContext {
    settings: LocomotionSettings,
    run_state: RunState,
}

impl SessionContext {
    /// New session, running.
    pub fn new(settings: LocomotionSettings) -> Self {
        Self {
            settings,
            run_state: RunState::Running,
        }
    }

    /// Get the locomotion settings for this session.
    pub fn settings(&self) -> &LocomotionSettings {
        &self.settings
    }

    /// Get the current run state.
    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Whether frames advance the simulation.
    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.run_state == RunState::Paused
    }

    /// Whether the frame loop has ended.
    pub fn is_stopped(&self) -> bool {
        self.run_state == RunState::Stopped
    }

    /// Running -> Paused. Returns false if not running.
    pub fn pause(&mut self) -> bool {
        if self.run_state != RunState::Running {
            return false;
        }
        self.run_state = RunState::Paused;
        true
    }

    /// Paused -> Running. Returns false if not paused.
    pub fn resume(&mut self) -> bool {
        if self.run_state != RunState::Paused {
            return false;
        }
        self.run_state = RunState::Running;
        true
    }

    /// Enter the terminal state. Returns false if already stopped.
    pub fn stop(&mut self) -> bool {
        if self.run_state == RunState::Stopped {
            return false;
        }
        self.run_state = RunState::Stopped;
        true
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(LocomotionSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_resume_round_trip() {
        let mut session = SessionContext::default();
        assert!(session.is_running());
        assert!(!session.resume());
        assert!(session.pause());
        assert!(!session.pause());
        assert!(session.is_paused());
        assert!(session.resume());
        assert!(session.is_running());
    }

    #[test]
    fn stopped_is_terminal() {
        let mut session = SessionContext::default();
        assert!(session.pause());
        assert!(session.stop());
        assert!(!session.stop());
        assert!(!session.resume());
        assert!(!session.pause());
        assert_eq!(session.run_state(), RunState::Stopped);
    }
}
