//! Demo obstacle course: static platforms, a goal trigger and an out-of-bounds slab.

use glam::Vec3;
use physics::{PhysicsWorld, TriggerKind, TriggerVolume};
use renderer::{MeshProxy, Scene};

/// What the frame loop needs to know about a loaded level.
#[derive(Debug, Clone, Copy)]
pub struct LevelHandles {
    pub level_complete: TriggerVolume,
    pub out_of_bounds: TriggerVolume,
    /// Capsule center at spawn.
    pub spawn: Vec3,
}

const GROUND: [f32; 4] = [0.35, 0.38, 0.42, 1.0];
const PLATFORM: [f32; 4] = [0.55, 0.52, 0.48, 1.0];
const STEP: [f32; 4] = [0.62, 0.6, 0.56, 1.0];
const GOAL: [f32; 4] = [0.2, 0.85, 0.35, 1.0];
const BEACON: [f32; 4] = [1.0, 0.85, 0.2, 1.0];

/// Solid box present in both the physics world and the scene.
fn solid(world: &mut PhysicsWorld, scene: &mut Scene, center: Vec3, half_extents: Vec3, color: [f32; 4]) {
    world.add_static_cuboid(center, 0.0, half_extents);
    scene.insert(MeshProxy::cuboid(center, half_extents, color));
}

/// Build the course into `world` and `scene`. Forward (-Z) from spawn leads to the goal.
pub fn build_demo_course(world: &mut PhysicsWorld, scene: &mut Scene) -> LevelHandles {
    // Start pad, top at y = 0.
    solid(world, scene, Vec3::new(0.0, -0.5, 0.0), Vec3::new(4.0, 0.5, 4.0), GROUND);

    // Stairs: 0.25 risers, walkable without jumping.
    for i in 0..4 {
        let top = 0.25 * (i + 1) as f32;
        let z = -4.5 - i as f32;
        solid(world, scene, Vec3::new(0.0, top * 0.5, z), Vec3::new(1.5, top * 0.5, 0.5), STEP);
    }

    // Upper walkway, top at y = 1.0.
    solid(world, scene, Vec3::new(0.0, 0.5, -11.0), Vec3::new(1.5, 0.5, 3.0), PLATFORM);

    // Stepping stones over the drop; the last gap wants a jump or dash.
    solid(world, scene, Vec3::new(0.0, 0.75, -16.5), Vec3::new(1.0, 0.25, 1.0), PLATFORM);
    solid(world, scene, Vec3::new(1.5, 0.75, -20.0), Vec3::new(1.0, 0.25, 1.0), PLATFORM);
    solid(world, scene, Vec3::new(0.0, 0.75, -24.0), Vec3::new(1.0, 0.25, 1.0), PLATFORM);

    // Goal platform.
    let goal_top = 1.0;
    solid(world, scene, Vec3::new(0.0, goal_top - 0.25, -31.0), Vec3::new(3.0, 0.25, 3.0), GOAL);
    scene.insert(
        MeshProxy::cuboid(Vec3::new(0.0, goal_top + 2.5, -31.0), Vec3::splat(0.35), BEACON).with_spin(1.5),
    );

    let level_complete = world.add_trigger_volume(
        TriggerKind::LevelComplete,
        Vec3::new(0.0, goal_top + 1.0, -31.0),
        Vec3::new(1.5, 1.0, 1.5),
    );
    let out_of_bounds = world.add_trigger_volume(
        TriggerKind::OutOfBounds,
        Vec3::new(0.0, -20.0, -15.0),
        Vec3::new(200.0, 2.0, 200.0),
    );

    world.update_query_pipeline();
    log::info!("demo course built: {} colliders", world.collider_set.len());

    LevelHandles {
        level_complete,
        out_of_bounds,
        spawn: Vec3::new(0.0, 1.0, 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision_monitor::{CollisionMonitor, LevelEvent};
    use physics::{CharacterBody, CharacterConfig, CourseSimulation, Simulation};

    const DT: f32 = 1.0 / 60.0;

    fn course() -> (CourseSimulation, Scene, LevelHandles) {
        let mut world = PhysicsWorld::new();
        let mut scene = Scene::new();
        let level = build_demo_course(&mut world, &mut scene);
        let sim = CourseSimulation::new(world, level.spawn, CharacterConfig::default(), 4)
            .expect("course should load");
        (sim, scene, level)
    }

    #[test]
    fn spawn_lands_safely() {
        let (mut sim, scene, level) = course();
        let monitor = CollisionMonitor::new(level.level_complete, level.out_of_bounds);
        assert!(!scene.is_empty());
        for _ in 0..60 {
            sim.step(DT);
            assert_eq!(monitor.check(&sim.overlapping_volumes()), None);
        }
        assert!(sim.is_grounded());
    }

    #[test]
    fn goal_and_pit_raise_their_events() {
        let (mut sim, _scene, level) = course();
        let monitor = CollisionMonitor::new(level.level_complete, level.out_of_bounds);

        sim.teleport(Vec3::new(0.0, 2.0, -31.0));
        sim.step(DT);
        assert_eq!(monitor.check(&sim.overlapping_volumes()), Some(LevelEvent::LevelPassed));

        sim.teleport(Vec3::new(50.0, -19.0, 50.0));
        sim.step(DT);
        assert_eq!(monitor.check(&sim.overlapping_volumes()), Some(LevelEvent::PlayerDied));
    }

    #[test]
    fn pit_shared_with_another_sensor_is_not_a_death() {
        let mut world = PhysicsWorld::new();
        let mut scene = Scene::new();
        let level = build_demo_course(&mut world, &mut scene);
        let marker = world.add_sensor_cuboid(Vec3::new(50.0, -19.0, 50.0), 0.0, Vec3::splat(2.0));
        let mut sim = CourseSimulation::new(world, level.spawn, CharacterConfig::default(), 4)
            .expect("course should load");
        let monitor = CollisionMonitor::new(level.level_complete, level.out_of_bounds);

        sim.teleport(Vec3::new(50.0, -19.0, 50.0));
        sim.step(DT);
        let overlaps = sim.overlapping_volumes();
        assert_eq!(overlaps.len(), 2);
        assert!(overlaps.contains(&marker));
        assert_eq!(monitor.check(&overlaps), None);
    }

    #[test]
    fn stairs_are_climbable_by_walking() {
        let (mut sim, _scene, _level) = course();
        for _ in 0..60 {
            sim.step(DT);
        }
        for _ in 0..240 {
            sim.set_walk_direction(Vec3::NEG_Z * 3.0 * DT);
            sim.step(DT);
        }
        let pos = sim.world_position();
        assert!(pos.z < -9.0, "stuck at {:?}", pos);
        assert!(pos.y > 1.5, "not on the walkway: {:?}", pos);
    }
}
