//! Dash: a short, cooldown-gated burst of speed in a fixed direction.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Slack when comparing accumulated frame time against the cooldown, so a
/// cooldown of exactly N frames is recharged after N frames.
const COOLDOWN_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashTuning {
    /// Dash start speed as a multiple of walk speed.
    pub speed_multiplier: f32,
    /// How long a dash lasts (s).
    pub duration: f32,
    /// Time from dash start to full recharge (s).
    pub cooldown: f32,
    /// Exponential decay of dash speed back toward walk speed (1/s).
    pub speed_decay: f32,
    /// Length of the FOV spike at dash start (s).
    pub fov_window: f32,
}

impl Default for DashTuning {
    fn default() -> Self {
        Self {
            speed_multiplier: 10.0,
            duration: 0.1,
            cooldown: 1.0,
            speed_decay: 25.0,
            fov_window: 0.07,
        }
    }
}

/// Idle -> Dashing -> Idle. The cooldown timer runs in both states and is
/// reset to zero when a dash starts.
#[derive(Debug, Clone)]
pub struct DashController {
    tuning: DashTuning,
    is_dashing: bool,
    dash_direction: Vec3,
    /// Time since the current dash started.
    dash_elapsed: f32,
    /// Time since the last dash started.
    cooldown_elapsed: f32,
}

impl DashController {
    /// New controller, fully recharged.
    pub fn new(tuning: DashTuning) -> Self {
        Self {
            tuning,
            is_dashing: false,
            dash_direction: Vec3::ZERO,
            dash_elapsed: 0.0,
            cooldown_elapsed: tuning.cooldown,
        }
    }

    /// Advance timers by one un-paused frame. Ends the dash once its duration is exceeded.
    pub fn advance(&mut self, dt: f32) {
        self.cooldown_elapsed += dt;
        if self.is_dashing {
            self.dash_elapsed += dt;
            if self.dash_elapsed > self.tuning.duration {
                self.is_dashing = false;
                self.dash_direction = Vec3::ZERO;
                log::debug!("dash ended");
            }
        }
    }

    pub fn can_dash(&self) -> bool {
        self.cooldown_elapsed + COOLDOWN_EPSILON >= self.tuning.cooldown
    }

    /// Recharge in percent, 0 right after a dash starts and 100 when a new dash is allowed.
    pub fn recharge_progress(&self) -> f32 {
        if self.can_dash() {
            return 100.0;
        }
        (self.cooldown_elapsed / self.tuning.cooldown).clamp(0.0, 1.0) * 100.0
    }

    /// Start a dash along `look_direction` (flattened). Dropped unless recharged.
    pub fn try_start(&mut self, look_direction: Vec3) -> bool {
        if !self.can_dash() {
            log::debug!("dash dropped ({:.0}% recharged)", self.recharge_progress());
            return false;
        }
        let flat = Vec3::new(look_direction.x, 0.0, look_direction.z).normalize_or_zero();
        if flat == Vec3::ZERO {
            return false;
        }
        self.is_dashing = true;
        self.dash_direction = flat;
        self.dash_elapsed = 0.0;
        self.cooldown_elapsed = 0.0;
        log::debug!("dash started toward {:?}", flat);
        true
    }

    pub fn is_dashing(&self) -> bool {
        self.is_dashing
    }

    /// Direction captured at dash start (zero when idle).
    pub fn dash_direction(&self) -> Vec3 {
        self.dash_direction
    }

    pub fn dash_elapsed(&self) -> f32 {
        self.dash_elapsed
    }

    /// Current dash speed, decaying from `walk * multiplier` toward `walk`.
    pub fn speed(&self, walk_speed: f32) -> f32 {
        let dash_speed = walk_speed * self.tuning.speed_multiplier;
        walk_speed + (dash_speed - walk_speed) * (-self.tuning.speed_decay * self.dash_elapsed).exp()
    }

    /// Inside the FOV spike window at the start of a dash.
    pub fn in_fov_window(&self) -> bool {
        self.is_dashing && self.dash_elapsed < self.tuning.fov_window
    }

    /// Back to idle and fully recharged.
    pub fn reset(&mut self) {
        self.is_dashing = false;
        self.dash_direction = Vec3::ZERO;
        self.dash_elapsed = 0.0;
        self.cooldown_elapsed = self.tuning.cooldown;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn starts_recharged() {
        let dash = DashController::new(DashTuning::default());
        assert!(dash.can_dash());
        assert_eq!(dash.recharge_progress(), 100.0);
        assert!(!dash.is_dashing());
    }

    #[test]
    fn start_resets_cooldown_and_captures_flat_direction() {
        let mut dash = DashController::new(DashTuning::default());
        assert!(dash.try_start(Vec3::new(0.0, 0.5, -2.0)));
        assert!(dash.is_dashing());
        assert_eq!(dash.recharge_progress(), 0.0);
        assert!((dash.dash_direction() - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn request_during_cooldown_is_dropped() {
        let mut dash = DashController::new(DashTuning::default());
        assert!(dash.try_start(Vec3::NEG_Z));
        for _ in 0..30 {
            dash.advance(DT);
        }
        assert!(!dash.is_dashing());
        assert!(!dash.try_start(Vec3::X));
        assert!(!dash.is_dashing());
        assert!(dash.recharge_progress() > 49.0 && dash.recharge_progress() < 51.0);
    }

    #[test]
    fn half_second_cooldown_recharges_exactly_on_time() {
        let tuning = DashTuning {
            cooldown: 0.5,
            ..Default::default()
        };
        let mut dash = DashController::new(tuning);
        assert!(dash.try_start(Vec3::NEG_Z));

        // t + 0.4: still recharging, second request dropped
        for _ in 0..24 {
            dash.advance(DT);
        }
        let progress = dash.recharge_progress();
        assert!(!dash.try_start(Vec3::X));
        assert_eq!(dash.recharge_progress(), progress);

        // t + 0.5
        for _ in 0..6 {
            dash.advance(DT);
        }
        assert!(dash.can_dash());
        assert_eq!(dash.recharge_progress(), 100.0);
    }

    #[test]
    fn second_request_mid_dash_leaves_dash_untouched() {
        let mut dash = DashController::new(DashTuning::default());
        assert!(dash.try_start(Vec3::NEG_Z));
        dash.advance(0.02);
        assert!(!dash.try_start(Vec3::X));
        assert!(dash.is_dashing());
        assert_eq!(dash.dash_direction(), Vec3::NEG_Z);
        assert!((dash.dash_elapsed() - 0.02).abs() < 1e-6);
    }

    #[test]
    fn progress_rises_monotonically() {
        let mut dash = DashController::new(DashTuning::default());
        dash.try_start(Vec3::X);
        let mut last = dash.recharge_progress();
        for _ in 0..70 {
            dash.advance(DT);
            let now = dash.recharge_progress();
            assert!(now >= last);
            assert!((0.0..=100.0).contains(&now));
            last = now;
        }
        assert_eq!(last, 100.0);
    }

    #[test]
    fn dash_ends_after_duration() {
        let mut dash = DashController::new(DashTuning::default());
        dash.try_start(Vec3::X);
        for _ in 0..5 {
            dash.advance(DT);
        }
        assert!(dash.is_dashing());
        dash.advance(DT);
        dash.advance(DT);
        assert!(!dash.is_dashing());
        assert_eq!(dash.dash_direction(), Vec3::ZERO);
    }

    #[test]
    fn speed_decays_from_dash_toward_walk() {
        let mut dash = DashController::new(DashTuning::default());
        dash.try_start(Vec3::X);
        assert!((dash.speed(3.0) - 30.0).abs() < 1e-4);
        dash.advance(0.05);
        let mid = dash.speed(3.0);
        assert!(mid < 30.0 && mid > 3.0);
    }

    #[test]
    fn fov_window_is_shorter_than_dash() {
        let mut dash = DashController::new(DashTuning::default());
        dash.try_start(Vec3::X);
        assert!(dash.in_fov_window());
        dash.advance(0.08);
        assert!(dash.is_dashing());
        assert!(!dash.in_fov_window());
    }

    #[test]
    fn straight_down_look_is_ignored() {
        let mut dash = DashController::new(DashTuning::default());
        assert!(!dash.try_start(Vec3::NEG_Y));
        assert!(dash.can_dash());
    }
}
