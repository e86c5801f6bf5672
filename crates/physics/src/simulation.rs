//! The physics world as seen by the frame loop: one character in a static course.

use crate::{CharacterBody, CharacterConfig, CharacterController, PhysicsWorld};
use anyhow::{bail, Result};
use engine_core::Vec3;
use rapier3d::prelude::ColliderHandle;

/// Something the frame scheduler can step once per frame.
pub trait Simulation: CharacterBody {
    /// Advance by `dt` seconds, applying the walk displacement submitted since the last step.
    fn step(&mut self, dt: f32);
}

/// Rapier world plus the player's character controller.
pub struct CourseSimulation {
    world: PhysicsWorld,
    character: CharacterController,
    /// Fixed number of physics sub-steps per frame.
    substeps: u32,
    /// Displacement to spread across the next step's sub-steps.
    pending_walk: Vec3,
}

impl CourseSimulation {
    /// Spawn the character into an already-built course.
    pub fn new(
        mut world: PhysicsWorld,
        spawn: Vec3,
        config: CharacterConfig,
        substeps: u32,
    ) -> Result<Self> {
        if !spawn.is_finite() {
            bail!("spawn position {:?} is not finite", spawn);
        }
        if config.radius <= 0.0 || config.half_height < 0.0 {
            bail!(
                "invalid capsule dimensions (radius {}, half height {})",
                config.radius,
                config.half_height
            );
        }
        if substeps == 0 {
            bail!("physics sub-step count must be at least 1");
        }

        let character = CharacterController::spawn(&mut world, spawn, config);
        world.update_query_pipeline();
        log::info!(
            "course simulation ready: {} colliders, {} sub-steps per frame",
            world.collider_set.len(),
            substeps
        );
        Ok(Self {
            world,
            character,
            substeps,
            pending_walk: Vec3::ZERO,
        })
    }
}

impl CharacterBody for CourseSimulation {
    fn set_walk_direction(&mut self, displacement: Vec3) {
        self.pending_walk = displacement;
    }

    fn jump(&mut self) -> bool {
        self.character.jump()
    }

    fn is_grounded(&self) -> bool {
        self.character.is_grounded()
    }

    fn world_position(&self) -> Vec3 {
        self.character.position(&self.world)
    }

    fn overlapping_volumes(&self) -> Vec<ColliderHandle> {
        self.character.overlapping_sensors(&self.world)
    }

    fn teleport(&mut self, position: Vec3) {
        self.world.teleport_body(self.character.body(), position);
        self.character.reset_motion();
        self.pending_walk = Vec3::ZERO;
    }
}

impl Simulation for CourseSimulation {
    fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        let n = self.substeps.max(1);
        let h = dt / n as f32;
        let walk = std::mem::take(&mut self.pending_walk) / n as f32;
        for _ in 0..n {
            self.character.move_substep(&mut self.world, h, walk);
            self.world.step(h);
        }
    }
}
