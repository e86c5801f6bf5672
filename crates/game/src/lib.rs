//! VaultRun gameplay core: locomotion state machines, camera rig, trigger
//! monitoring and the frame scheduler that ties them to physics and rendering.

pub mod camera_rig;
pub mod collision_monitor;
pub mod config;
pub mod course;
pub mod dash;
pub mod fov;
pub mod hud;
pub mod movement;
pub mod player;
pub mod scheduler;
pub mod session;
pub mod sprint;

pub use camera_rig::{AvatarVisual, CameraRig, LocomotionMode};
pub use collision_monitor::{CollisionMonitor, LevelEvent, LevelEvents};
pub use config::GameConfig;
pub use course::{build_demo_course, LevelHandles};
pub use hud::HudReadout;
pub use scheduler::{FrameRequester, FrameScheduler};
pub use session::{LocomotionSettings, RunState, SessionContext};
