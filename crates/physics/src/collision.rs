//! Collision groups and filtering.

use rapier3d::prelude::*;

/// Collision groups for the course.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroup {
    /// Static course geometry (platforms, walls)
    Environment = 1 << 0,
    /// Player capsule
    Player = 1 << 1,
    /// Level-complete and out-of-bounds sensors
    Trigger = 1 << 2,
}

impl CollisionGroup {
    /// Membership/filter pair for static geometry.
    pub fn environment() -> (Group, Group) {
        let membership = Group::from_bits_retain(Self::Environment as u32);
        let filter = Group::ALL;
        (membership, filter)
    }

    /// Membership/filter pair for the player: blocked by geometry, seen by triggers.
    pub fn player() -> (Group, Group) {
        let membership = Group::from_bits_retain(Self::Player as u32);
        let filter = Group::from_bits_retain(Self::Environment as u32 | Self::Trigger as u32);
        (membership, filter)
    }

    /// Membership/filter pair for trigger volumes. They only care about the player.
    pub fn trigger() -> (Group, Group) {
        let membership = Group::from_bits_retain(Self::Trigger as u32);
        let filter = Group::from_bits_retain(Self::Player as u32);
        (membership, filter)
    }
}
