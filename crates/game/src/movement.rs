//! Turns input, sprint and dash state into this frame's walk displacement.

use crate::{dash::DashController, sprint::SprintController};
use glam::{Vec2, Vec3};

/// What the player is trying to do this frame. Rebuilt every frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementIntent {
    /// `(forward - backward, right - left)`, normalized or zero.
    pub input_direction: Vec2,
    /// World-space horizontal direction, normalized or zero.
    pub direction: Vec3,
    /// Units per second.
    pub speed: f32,
    /// `direction * speed * dt`, submitted to the character body.
    pub displacement: Vec3,
}

impl MovementIntent {
    pub fn is_moving(&self) -> bool {
        self.input_direction != Vec2::ZERO
    }
}

/// Camera forward with Y removed. Falls back to -Z when looking straight up or down.
pub fn flat_look_direction(camera_forward: Vec3) -> Vec3 {
    let flat = Vec3::new(camera_forward.x, 0.0, camera_forward.z).normalize_or_zero();
    if flat == Vec3::ZERO {
        Vec3::NEG_Z
    } else {
        flat
    }
}

/// Stateless planner for the per-frame displacement.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementPlanner;

impl MovementPlanner {
    pub fn plan(
        &self,
        camera_forward: Vec3,
        input: Vec2,
        sprint: &SprintController,
        dash: &DashController,
        dt: f32,
    ) -> MovementIntent {
        let forward = flat_look_direction(camera_forward);
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let input_direction = input.normalize_or_zero();
        let moving = input_direction != Vec2::ZERO;

        let (direction, speed) = if dash.is_dashing() {
            (dash.dash_direction(), dash.speed(sprint.walk_speed()))
        } else {
            let direction = (forward * input_direction.x + right * input_direction.y).normalize_or_zero();
            (direction, sprint.speed(moving))
        };

        let displacement = if direction == Vec3::ZERO {
            Vec3::ZERO
        } else {
            direction * speed * dt
        };

        MovementIntent {
            input_direction,
            direction,
            speed,
            displacement,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dash::DashTuning,
        session::LocomotionSettings,
        sprint::SprintTuning,
    };

    const DT: f32 = 1.0 / 60.0;

    fn controllers() -> (SprintController, DashController) {
        (
            SprintController::new(SprintTuning::default(), LocomotionSettings::default()),
            DashController::new(DashTuning::default()),
        )
    }

    #[test]
    fn no_input_no_drift() {
        let (sprint, dash) = controllers();
        let intent = MovementPlanner.plan(Vec3::NEG_Z, Vec2::ZERO, &sprint, &dash, DT);
        assert_eq!(intent.displacement, Vec3::ZERO);
        assert!(!intent.is_moving());
    }

    #[test]
    fn forward_follows_flattened_camera() {
        let (sprint, dash) = controllers();
        let look = Vec3::new(1.0, -1.0, 0.0).normalize();
        let intent = MovementPlanner.plan(look, Vec2::X, &sprint, &dash, DT);
        assert!((intent.direction - Vec3::X).length() < 1e-5);
        assert!((intent.displacement.length() - 3.0 * DT).abs() < 1e-6);
        assert_eq!(intent.displacement.y, 0.0);
    }

    #[test]
    fn strafe_right_is_perpendicular() {
        let (sprint, dash) = controllers();
        let intent = MovementPlanner.plan(Vec3::NEG_Z, Vec2::Y, &sprint, &dash, DT);
        assert!((intent.direction - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn diagonal_is_not_faster() {
        let (sprint, dash) = controllers();
        let intent = MovementPlanner.plan(Vec3::NEG_Z, Vec2::new(1.0, 1.0), &sprint, &dash, DT);
        assert!((intent.displacement.length() - 3.0 * DT).abs() < 1e-6);
    }

    #[test]
    fn sprint_raises_speed() {
        let (mut sprint, dash) = controllers();
        sprint.on_sprint_pressed();
        let intent = MovementPlanner.plan(Vec3::NEG_Z, Vec2::X, &sprint, &dash, DT);
        assert!((intent.speed - 5.1).abs() < 1e-4);
    }

    #[test]
    fn dash_overrides_direction_and_speed() {
        let (mut sprint, mut dash) = controllers();
        sprint.on_sprint_pressed();
        assert!(dash.try_start(Vec3::X));
        // holding back while looking -Z: dash still goes +X
        let intent = MovementPlanner.plan(Vec3::NEG_Z, Vec2::NEG_X, &sprint, &dash, DT);
        assert_eq!(intent.direction, Vec3::X);
        assert!((intent.speed - 30.0).abs() < 1e-4);
    }

    #[test]
    fn dash_moves_without_input() {
        let (sprint, mut dash) = controllers();
        dash.try_start(Vec3::NEG_Z);
        let intent = MovementPlanner.plan(Vec3::NEG_Z, Vec2::ZERO, &sprint, &dash, DT);
        assert!(intent.displacement.z < 0.0);
    }

    #[test]
    fn vertical_look_falls_back() {
        assert_eq!(flat_look_direction(Vec3::Y), Vec3::NEG_Z);
    }
}
