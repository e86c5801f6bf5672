//! HUD readout: what the menu layer shows about the player each frame.

use crate::camera_rig::LocomotionMode;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudReadout {
    /// 0-100, 100 when a dash is available.
    pub dash_recharge_percent: f32,
    pub is_sprinting: bool,
    pub is_dashing: bool,
    pub grounded: bool,
    pub mode: LocomotionMode,
}

impl Default for HudReadout {
    fn default() -> Self {
        Self {
            dash_recharge_percent: 100.0,
            is_sprinting: false,
            is_dashing: false,
            grounded: false,
            mode: LocomotionMode::FirstPerson,
        }
    }
}

impl HudReadout {
    /// Whole-percent dash charge, as displayed.
    pub fn dash_percent_display(&self) -> u32 {
        self.dash_recharge_percent.clamp(0.0, 100.0).floor() as u32
    }

    /// One-line status for the window title.
    pub fn status_line(&self, paused: bool) -> String {
        let mut line = format!("VaultRun | dash {:>3}%", self.dash_percent_display());
        if self.is_dashing {
            line.push_str(" | DASH");
        } else if self.is_sprinting {
            line.push_str(" | sprint");
        }
        if self.mode == LocomotionMode::ThirdPersonSpectate {
            line.push_str(" | spectate");
        }
        if paused {
            line.push_str(" | PAUSED");
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_display_floors() {
        let hud = HudReadout {
            dash_recharge_percent: 99.9,
            ..Default::default()
        };
        assert_eq!(hud.dash_percent_display(), 99);
    }

    #[test]
    fn status_line_mentions_state() {
        let hud = HudReadout {
            dash_recharge_percent: 40.0,
            is_sprinting: true,
            mode: LocomotionMode::ThirdPersonSpectate,
            ..Default::default()
        };
        let line = hud.status_line(true);
        assert!(line.contains(" 40%"));
        assert!(line.contains("sprint"));
        assert!(line.contains("spectate"));
        assert!(line.ends_with("PAUSED"));
    }
}
