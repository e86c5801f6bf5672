//! Game configuration (window, input, locomotion tuning). Loaded from config.ron at startup.

use crate::{
    camera_rig::RigTuning, dash::DashTuning, fov::FovTuning, session::LocomotionSettings,
    sprint::SprintTuning,
};
use physics::CharacterConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Radians of look rotation per pixel of mouse motion at sensitivity 1.0.
pub const BASE_MOUSE_SENSITIVITY: f32 = 0.002;

/// Largest accepted `max_frame_delta` (seconds).
const MAX_FRAME_DELTA_LIMIT: f32 = 1.0;

/// Player capsule and jump tuning, mirrored into [`CharacterConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterTuning {
    pub radius: f32,
    pub half_height: f32,
    pub step_height: f32,
    pub jump_speed: f32,
    pub gravity_scale: f32,
}

impl Default for CharacterTuning {
    fn default() -> Self {
        let c = CharacterConfig::default();
        Self {
            radius: c.radius,
            half_height: c.half_height,
            step_height: c.step_height,
            jump_speed: c.jump_speed,
            gravity_scale: c.gravity_scale,
        }
    }
}

impl CharacterTuning {
    pub fn to_character_config(&self) -> CharacterConfig {
        CharacterConfig {
            radius: self.radius,
            half_height: self.half_height,
            step_height: self.step_height,
            jump_speed: self.jump_speed,
            gravity_scale: self.gravity_scale,
            ..CharacterConfig::default()
        }
    }
}

/// Game settings. Loaded from `config.ron` in the current directory. Read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Window width in logical pixels.
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    /// Window height in logical pixels.
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    /// Enable vsync (recommended to avoid tearing).
    #[serde(default = "default_true")]
    pub vsync: bool,
    /// Start in fullscreen.
    #[serde(default)]
    pub fullscreen: bool,
    /// Mouse sensitivity multiplier (1.0 = default).
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f32,
    #[serde(default)]
    pub locomotion: LocomotionSettings,
    #[serde(default)]
    pub sprint: SprintTuning,
    #[serde(default)]
    pub dash: DashTuning,
    #[serde(default)]
    pub fov: FovTuning,
    #[serde(default)]
    pub character: CharacterTuning,
    #[serde(default)]
    pub camera: RigTuning,
    /// Physics sub-steps per frame.
    #[serde(default = "default_physics_substeps")]
    pub physics_substeps: u32,
    /// Longest frame delta fed to the simulation (seconds).
    #[serde(default = "default_max_frame_delta")]
    pub max_frame_delta: f32,
}

fn default_window_width() -> u32 {
    1280
}
fn default_window_height() -> u32 {
    720
}
fn default_true() -> bool {
    true
}
fn default_sensitivity() -> f32 {
    1.0
}
fn default_physics_substeps() -> u32 {
    4
}
fn default_max_frame_delta() -> f32 {
    engine_core::DEFAULT_MAX_FRAME_DELTA
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            vsync: default_true(),
            fullscreen: false,
            sensitivity: default_sensitivity(),
            locomotion: LocomotionSettings::default(),
            sprint: SprintTuning::default(),
            dash: DashTuning::default(),
            fov: FovTuning::default(),
            character: CharacterTuning::default(),
            camera: RigTuning::default(),
            physics_substeps: default_physics_substeps(),
            max_frame_delta: default_max_frame_delta(),
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        let Ok(data) = std::fs::read_to_string(path) else {
            log::info!("No config at {:?}, using defaults", path);
            return Self::default();
        };
        match Self::from_ron(&data) {
            Ok(c) => {
                log::info!("Loaded config from {:?}", path);
                c
            }
            Err(e) => {
                log::warn!("Invalid config at {:?}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    /// Parse a config, replacing out-of-range values with their defaults.
    pub fn from_ron(data: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str::<Self>(data).map(Self::sanitized)
    }

    fn sanitized(mut self) -> Self {
        if !(self.max_frame_delta > 0.0 && self.max_frame_delta <= MAX_FRAME_DELTA_LIMIT) {
            log::warn!(
                "max_frame_delta {} out of range (0, {}], using default",
                self.max_frame_delta,
                MAX_FRAME_DELTA_LIMIT
            );
            self.max_frame_delta = default_max_frame_delta();
        }
        if self.physics_substeps == 0 {
            log::warn!("physics_substeps must be at least 1, using default");
            self.physics_substeps = default_physics_substeps();
        }
        self
    }

    /// Look rotation per pixel of mouse motion.
    pub fn mouse_sensitivity(&self) -> f32 {
        BASE_MOUSE_SENSITIVITY * self.sensitivity
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("config.ron")
}
