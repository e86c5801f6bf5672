//! Core engine types shared by every VaultRun crate.
//!
//! - Transform and spatial helpers
//! - Frame timing for the display-refresh loop

pub mod time;
pub mod transform;

pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
