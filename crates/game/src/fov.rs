//! Field-of-view animation driven by motion state.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FovTuning {
    /// Degrees when standing or walking.
    pub walk_fov: f32,
    /// Degrees when sprinting and moving.
    pub run_fov: f32,
    /// Degrees at the start of a dash.
    pub dash_fov: f32,
    /// Smoothing rate toward walk/run targets (1/s).
    pub rate: f32,
    /// Smoothing rate during the dash spike (1/s).
    pub dash_rate: f32,
}

impl Default for FovTuning {
    fn default() -> Self {
        Self {
            walk_fov: 75.0,
            run_fov: 85.0,
            dash_fov: 100.0,
            rate: 8.0,
            dash_rate: 30.0,
        }
    }
}

impl FovTuning {
    pub fn min_fov(&self) -> f32 {
        self.walk_fov.min(self.run_fov).min(self.dash_fov)
    }

    pub fn max_fov(&self) -> f32 {
        self.walk_fov.max(self.run_fov).max(self.dash_fov)
    }
}

/// Motion state that picks the FOV target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FovTarget {
    Walk,
    Run,
    DashSpike,
}

impl FovTarget {
    pub fn select(moving: bool, sprinting: bool, dash_spike: bool) -> Self {
        if dash_spike {
            FovTarget::DashSpike
        } else if moving && sprinting {
            FovTarget::Run
        } else {
            FovTarget::Walk
        }
    }
}

/// Frame-rate independent exponential approach of `current` toward `target`.
pub fn smooth_toward(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let t = 1.0 - (-rate * dt.max(0.0)).exp();
    current + (target - current) * t
}

/// Smoothed FOV value for one camera.
#[derive(Debug, Clone)]
pub struct FovAnimator {
    tuning: FovTuning,
    current: f32,
}

impl FovAnimator {
    pub fn new(tuning: FovTuning) -> Self {
        Self {
            tuning,
            current: tuning.walk_fov,
        }
    }

    /// Step toward the target for this motion state. Returns the new FOV.
    pub fn update(&mut self, target: FovTarget, dt: f32) -> f32 {
        let (goal, rate) = match target {
            FovTarget::Walk => (self.tuning.walk_fov, self.tuning.rate),
            FovTarget::Run => (self.tuning.run_fov, self.tuning.rate),
            FovTarget::DashSpike => (self.tuning.dash_fov, self.tuning.dash_rate),
        };
        self.current = smooth_toward(self.current, goal, rate, dt)
            .clamp(self.tuning.min_fov(), self.tuning.max_fov());
        self.current
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn reset(&mut self) {
        self.current = self.tuning.walk_fov;
    }
}
