//! Kinematic character controller for the player capsule.
//!
//! Wraps Rapier's `KinematicCharacterController`: the game submits a horizontal
//! displacement per frame, this module adds gravity and jumping, resolves the
//! motion against static geometry (sliding, autostep) and tracks ground contact.

use crate::PhysicsWorld;
use engine_core::Vec3;
use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::prelude::*;

/// Shape and motion tuning for the player capsule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterConfig {
    /// Capsule radius (meters).
    pub radius: f32,
    /// Half height of the capsule's cylindrical section (meters).
    pub half_height: f32,
    /// Tallest ledge climbed without jumping (meters).
    pub step_height: f32,
    /// Initial vertical speed of a jump (m/s).
    pub jump_speed: f32,
    /// Multiplier on world gravity. Values above 1 give snappier jump arcs.
    pub gravity_scale: f32,
    /// Terminal falling speed (m/s).
    pub max_fall_speed: f32,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            radius: 0.3,
            half_height: 0.5,
            step_height: 0.3,
            jump_speed: 6.0,
            gravity_scale: 2.0,
            max_fall_speed: 50.0,
        }
    }
}

impl CharacterConfig {
    /// Distance from the capsule center to its lowest point.
    pub fn center_to_feet(&self) -> f32 {
        self.half_height + self.radius
    }
}

/// Player-facing physics contract. The frame loop only ever talks to the
/// character through this trait.
pub trait CharacterBody {
    /// Displacement to apply over the next simulation step (already scaled by speed and dt).
    fn set_walk_direction(&mut self, displacement: Vec3);
    /// Start a jump. Ignored (returns false) unless the character is on the ground.
    fn jump(&mut self) -> bool;
    /// Whether the last step ended in contact with walkable ground.
    fn is_grounded(&self) -> bool;
    /// Capsule center in world space.
    fn world_position(&self) -> Vec3;
    /// Trigger volumes currently overlapping the capsule.
    fn overlapping_volumes(&self) -> Vec<ColliderHandle>;
    /// Move the character instantly and drop any momentum.
    fn teleport(&mut self, position: Vec3);
}

/// Rapier-backed character state: body/collider handles plus vertical motion.
pub struct CharacterController {
    body: RigidBodyHandle,
    collider: ColliderHandle,
    controller: KinematicCharacterController,
    config: CharacterConfig,
    vertical_velocity: f32,
    grounded: bool,
}

impl CharacterController {
    /// Insert the capsule into `world` at `spawn` (capsule center).
    pub fn spawn(world: &mut PhysicsWorld, spawn: Vec3, config: CharacterConfig) -> Self {
        let body = world.add_kinematic_body(spawn);
        let collider = world.add_capsule_collider(body, config.half_height, config.radius);
        let controller = KinematicCharacterController {
            offset: CharacterLength::Absolute(0.02),
            autostep: Some(CharacterAutostep {
                max_height: CharacterLength::Absolute(config.step_height),
                min_width: CharacterLength::Absolute(config.radius * 0.5),
                include_dynamic_bodies: false,
            }),
            snap_to_ground: None,
            ..Default::default()
        };
        log::debug!(
            "character spawned at {:?} (radius {}, half height {})",
            spawn,
            config.radius,
            config.half_height
        );
        Self {
            body,
            collider,
            controller,
            config,
            vertical_velocity: 0.0,
            grounded: false,
        }
    }

    pub fn body(&self) -> RigidBodyHandle {
        self.body
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Launch upward if standing on something.
    pub fn jump(&mut self) -> bool {
        if !self.grounded {
            return false;
        }
        self.vertical_velocity = self.config.jump_speed;
        self.grounded = false;
        log::debug!("jump ({} m/s)", self.config.jump_speed);
        true
    }

    /// Drop momentum and contact state (after a teleport).
    pub fn reset_motion(&mut self) {
        self.vertical_velocity = 0.0;
        self.grounded = false;
    }

    /// Resolve one sub-step of motion and queue the corrected kinematic position.
    /// The body actually moves on the following `PhysicsWorld::step`.
    pub fn move_substep(&mut self, world: &mut PhysicsWorld, h: f32, walk: Vec3) {
        let gravity = world.gravity_magnitude() * self.config.gravity_scale;
        self.vertical_velocity = (self.vertical_velocity - gravity * h).max(-self.config.max_fall_speed);
        let desired = walk + Vec3::Y * (self.vertical_velocity * h);

        let Some(collider) = world.collider_set.get(self.collider) else {
            log::warn!("character collider {:?} missing", self.collider);
            return;
        };
        let filter = QueryFilter::default()
            .exclude_sensors()
            .exclude_rigid_body(self.body);
        let movement = self.controller.move_shape(
            h,
            &world.rigid_body_set,
            &world.collider_set,
            &world.query_pipeline,
            collider.shape(),
            collider.position(),
            vector![desired.x, desired.y, desired.z],
            filter,
            |_| {},
        );

        self.grounded = movement.grounded;
        if self.grounded && self.vertical_velocity < 0.0 {
            self.vertical_velocity = 0.0;
        }
        // Head bump: upward motion swallowed by a ceiling.
        if self.vertical_velocity > 0.0 && desired.y > 0.0 && movement.translation.y < desired.y * 0.5 {
            self.vertical_velocity = 0.0;
        }

        if let Some(body) = world.rigid_body_set.get_mut(self.body) {
            let next = *body.translation() + movement.translation;
            body.set_next_kinematic_translation(next);
        }
    }

    /// Capsule center in world space.
    pub fn position(&self, world: &PhysicsWorld) -> Vec3 {
        world
            .get_body_transform(self.body)
            .map(|t| t.position)
            .unwrap_or(Vec3::ZERO)
    }

    /// Sensors overlapping the capsule, in query pipeline order.
    pub fn overlapping_sensors(&self, world: &PhysicsWorld) -> Vec<ColliderHandle> {
        let Some(collider) = world.collider_set.get(self.collider) else {
            return Vec::new();
        };
        let filter = QueryFilter::default()
            .exclude_solids()
            .exclude_rigid_body(self.body);
        let mut hits = Vec::new();
        world.query_pipeline.intersections_with_shape(
            &world.rigid_body_set,
            &world.collider_set,
            collider.position(),
            collider.shape(),
            filter,
            |handle| {
                hits.push(handle);
                true // Continue searching
            },
        );
        hits
    }
}
