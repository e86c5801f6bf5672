//! Physics for VaultRun using Rapier3D: static course geometry, sensor trigger
//! volumes, and the kinematic character controller that carries the player.

pub mod character;
pub mod collision;
pub mod physics_world;
pub mod simulation;
pub mod trigger;

pub use character::*;
pub use collision::*;
pub use physics_world::*;
pub use simulation::*;
pub use trigger::*;

// Re-export Rapier for downstream crates
pub use rapier3d;

// Re-export common Rapier types
pub use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};
