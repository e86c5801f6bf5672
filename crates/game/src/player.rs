//! Player locomotion: sprint, dash and FOV state stepped once per running frame.

use crate::{
    dash::{DashController, DashTuning},
    fov::{FovAnimator, FovTarget, FovTuning},
    movement::{flat_look_direction, MovementPlanner},
    session::LocomotionSettings,
    sprint::{SprintController, SprintTuning},
};
use glam::Vec3;
use input::InputState;
use physics::CharacterBody;

/// Locomotion state owned by the scheduler for the lifetime of a level.
#[derive(Debug, Clone)]
pub struct PlayerLocomotion {
    pub sprint: SprintController,
    pub dash: DashController,
    pub fov: FovAnimator,
    planner: MovementPlanner,
}

impl PlayerLocomotion {
    pub fn new(
        settings: LocomotionSettings,
        sprint: SprintTuning,
        dash: DashTuning,
        fov: FovTuning,
    ) -> Self {
        Self {
            sprint: SprintController::new(sprint, settings),
            dash: DashController::new(dash),
            fov: FovAnimator::new(fov),
            planner: MovementPlanner,
        }
    }

    /// One running frame: advance timers, consume jump/dash requests, plan the
    /// walk displacement and hand it to the body. Returns the new FOV.
    pub fn update(
        &mut self,
        input: &mut InputState,
        camera_forward: Vec3,
        body: &mut dyn CharacterBody,
        dt: f32,
    ) -> f32 {
        self.dash.advance(dt);

        let movement = input.movement_input();
        self.sprint.update(movement);

        if input.take_dash_request() {
            self.dash.try_start(flat_look_direction(camera_forward));
        }
        if input.take_jump_request() && !body.jump() {
            log::debug!("jump ignored (airborne)");
        }

        let intent = self.planner.plan(camera_forward, movement, &self.sprint, &self.dash, dt);
        body.set_walk_direction(intent.displacement);

        let target = FovTarget::select(
            intent.is_moving(),
            self.sprint.is_sprinting(),
            self.dash.in_fov_window(),
        );
        self.fov.update(target, dt)
    }

    pub fn dash_recharge_percent(&self) -> f32 {
        self.dash.recharge_progress()
    }

    /// Back to spawn state: walking, recharged dash, base FOV.
    pub fn reset(&mut self) {
        self.sprint.reset();
        self.dash.reset();
        self.fov.reset();
    }
}
