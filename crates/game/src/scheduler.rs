//! Frame scheduler: sequences simulation, locomotion, cameras, trigger checks
//! and rendering once per display refresh.

use crate::{
    camera_rig::{CameraRig, LocomotionMode},
    collision_monitor::{CollisionMonitor, LevelEvent, LevelEvents},
    config::GameConfig,
    course::LevelHandles,
    hud::HudReadout,
    player::PlayerLocomotion,
    session::{RunState, SessionContext},
};
use engine_core::FrameClock;
use glam::Vec3;
use input::{Action, InputState};
use physics::Simulation;
use renderer::{MeshProxy, RenderSink, Scene};

const AVATAR_COLOR: [f32; 4] = [0.95, 0.45, 0.15, 1.0];

/// Asks the platform for another display-refresh callback.
pub trait FrameRequester {
    fn request_frame(&self);
}

impl FrameRequester for winit::window::Window {
    fn request_frame(&self) {
        self.request_redraw();
    }
}

/// Owns everything that lives for one level and drives it frame by frame.
pub struct FrameScheduler<S: Simulation> {
    session: SessionContext,
    clock: FrameClock,
    sim: S,
    scene: Scene,
    input: InputState,
    player: PlayerLocomotion,
    rig: CameraRig,
    monitor: CollisionMonitor,
    events: LevelEvents,
    hud: HudReadout,
    spawn: Vec3,
    /// Running time since the last (re)spawn.
    run_time: f32,
}

impl<S: Simulation> FrameScheduler<S> {
    /// Build a running scheduler with the avatar at its simulation position.
    pub fn new(sim: S, scene: Scene, level: LevelHandles, config: &GameConfig) -> Self {
        let character = config.character;
        let avatar_proxy = MeshProxy::cuboid(
            Vec3::ZERO,
            Vec3::new(character.radius, character.half_height + character.radius, character.radius),
            AVATAR_COLOR,
        );
        let session = SessionContext::new(config.locomotion);
        let player = PlayerLocomotion::new(*session.settings(), config.sprint, config.dash, config.fov);
        let mut scheduler = Self {
            session,
            clock: FrameClock::new(config.max_frame_delta),
            player,
            rig: CameraRig::new(config.camera, avatar_proxy, config.mouse_sensitivity()),
            monitor: CollisionMonitor::new(level.level_complete, level.out_of_bounds),
            events: LevelEvents::new(),
            hud: HudReadout::default(),
            input: InputState::new(),
            spawn: level.spawn,
            run_time: 0.0,
            sim,
            scene,
        };
        scheduler.rig.set_first_person_fov(scheduler.player.fov.current());
        let position = scheduler.sim.world_position();
        scheduler.rig.sync(position, &mut scheduler.scene);
        scheduler
    }

    /// Display-refresh callback. Uses the scheduler's own clock for the delta.
    pub fn tick(&mut self, frames: &dyn FrameRequester, renderer: &mut dyn RenderSink) {
        if self.session.is_stopped() {
            return;
        }
        frames.request_frame();
        let dt = self.clock.update();
        self.run_frame(dt, renderer);
    }

    /// Same as [`tick`](Self::tick) with an explicit delta.
    pub fn tick_with_delta(&mut self, dt: f32, frames: &dyn FrameRequester, renderer: &mut dyn RenderSink) {
        if self.session.is_stopped() {
            return;
        }
        frames.request_frame();
        let dt = dt.clamp(0.0, self.clock.max_delta_seconds());
        self.run_frame(dt, renderer);
    }

    fn run_frame(&mut self, dt: f32, renderer: &mut dyn RenderSink) {
        if self.session.is_running() {
            self.simulate(dt);
        }

        if let Err(e) = renderer.render(&self.scene, self.rig.current()) {
            if e.is_fatal() {
                log::error!("render failed, stopping: {}", e);
                self.stop();
            } else {
                log::warn!("frame skipped: {}", e);
            }
        }
    }

    fn simulate(&mut self, dt: f32) {
        self.sim.step(dt);
        self.scene.advance(dt);

        self.rig.apply_mouse(self.input.take_mouse_delta());
        let fov = self
            .player
            .update(&mut self.input, self.rig.look_forward(), &mut self.sim, dt);
        self.rig.set_first_person_fov(fov);

        let position = self.sim.world_position();
        self.rig.sync(position, &mut self.scene);

        self.hud = HudReadout {
            dash_recharge_percent: self.player.dash_recharge_percent(),
            is_sprinting: self.player.sprint.is_sprinting(),
            is_dashing: self.player.dash.is_dashing(),
            grounded: self.sim.is_grounded(),
            mode: self.rig.mode(),
        };

        if let Some(event) = self.monitor.check(&self.sim.overlapping_volumes()) {
            self.events.push(event);
        }
        self.run_time += dt;
    }

    /// Route a key press. Session actions act immediately; locomotion actions
    /// only update input state.
    pub fn handle_key_down(&mut self, action: Action) {
        if self.session.is_stopped() {
            return;
        }
        match action {
            Action::Pause => self.toggle_pause(),
            Action::ExitLevel => self.stop(),
            Action::SwitchCamera => {
                if self.session.is_running() {
                    self.switch_camera();
                }
            }
            Action::ForceDeath => {
                if self.session.is_running() {
                    self.force_death();
                }
            }
            Action::Sprint => {
                if self.input.on_key_down(action) {
                    self.player.sprint.on_sprint_pressed();
                }
            }
            _ => {
                self.input.on_key_down(action);
            }
        }
    }

    /// Route a key release.
    pub fn handle_key_up(&mut self, action: Action) {
        if self.input.on_key_up(action) && action == Action::Sprint {
            self.player.sprint.on_sprint_released();
        }
    }

    /// Queue mouse look. Ignored unless running.
    pub fn handle_mouse_motion(&mut self, delta: (f64, f64)) {
        if self.session.is_running() {
            self.input.process_mouse_motion(delta);
        }
    }

    /// Flip between first person and spectate.
    pub fn switch_camera(&mut self) {
        self.rig.switch_camera(&mut self.input, &mut self.scene);
        if self.rig.mode() == LocomotionMode::ThirdPersonSpectate {
            self.player.sprint.on_input_disabled();
        }
        let position = self.sim.world_position();
        self.rig.sync(position, &mut self.scene);
    }

    /// Debug: die on the spot.
    pub fn force_death(&mut self) {
        log::info!("forced death");
        self.events.push(LevelEvent::PlayerDied);
    }

    /// Freeze simulation and stop listening to locomotion input.
    pub fn pause(&mut self) {
        if self.session.pause() {
            self.input.disable();
            self.player.sprint.on_input_disabled();
            log::info!("paused");
        }
    }

    pub fn resume(&mut self) {
        if self.session.resume() {
            if self.rig.mode() == LocomotionMode::FirstPerson {
                self.input.enable();
            }
            log::info!("resumed");
        }
    }

    /// Pause when running, resume when paused.
    pub fn toggle_pause(&mut self) {
        match self.session.run_state() {
            RunState::Running => self.pause(),
            RunState::Paused => self.resume(),
            RunState::Stopped => {}
        }
    }

    /// End the loop. Later ticks do nothing.
    pub fn stop(&mut self) {
        if self.session.stop() {
            self.input.disable();
            log::info!("frame loop stopped");
        }
    }

    /// Put the avatar back at spawn with fresh locomotion state.
    pub fn respawn(&mut self) {
        self.sim.teleport(self.spawn);
        self.player.reset();
        self.input.clear();
        self.events.clear();
        self.rig.reset_look();
        self.rig.set_first_person_fov(self.player.fov.current());
        self.rig.sync(self.spawn, &mut self.scene);
        self.run_time = 0.0;
        log::info!("respawned at {:?}", self.spawn);
    }

    /// Events raised since the last drain.
    pub fn drain_events(&mut self) -> Vec<LevelEvent> {
        self.events.drain().collect()
    }

    /// Update camera aspect ratios for a new surface size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.rig.set_aspect(width, height);
    }

    /// Get the dash recharge progress (0-100).
    pub fn dash_recharge_percent(&self) -> f32 {
        self.player.dash_recharge_percent()
    }

    /// Get the session context.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Get the HUD snapshot from the last running frame.
    pub fn hud(&self) -> &HudReadout {
        &self.hud
    }

    /// Get the camera rig.
    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    /// Get the player locomotion state.
    pub fn player(&self) -> &PlayerLocomotion {
        &self.player
    }

    /// Get the input state.
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Get the simulation.
    pub fn simulation(&self) -> &S {
        &self.sim
    }

    /// Get the simulation mutably.
    pub fn simulation_mut(&mut self) -> &mut S {
        &mut self.sim
    }

    /// Get the scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Get the seconds simulated since the last (re)spawn.
    pub fn run_time(&self) -> f32 {
        self.run_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera_rig::AvatarVisual;
    use physics::{CharacterBody, ColliderHandle, TriggerKind, TriggerVolume};
    use renderer::{Camera, RenderError};
    use std::cell::Cell;

    const DT: f32 = 1.0 / 60.0;

    /// Moves exactly by the submitted walk displacement each step.
    #[derive(Default)]
    struct FakeSim {
        position: Vec3,
        pending_walk: Vec3,
        grounded: bool,
        overlaps: Vec<ColliderHandle>,
        steps: usize,
        jumps: usize,
    }

    impl CharacterBody for FakeSim {
        fn set_walk_direction(&mut self, displacement: Vec3) {
            self.pending_walk = displacement;
        }
        fn jump(&mut self) -> bool {
            if !self.grounded {
                return false;
            }
            self.grounded = false;
            self.jumps += 1;
            true
        }
        fn is_grounded(&self) -> bool {
            self.grounded
        }
        fn world_position(&self) -> Vec3 {
            self.position
        }
        fn overlapping_volumes(&self) -> Vec<ColliderHandle> {
            self.overlaps.clone()
        }
        fn teleport(&mut self, position: Vec3) {
            self.position = position;
            self.pending_walk = Vec3::ZERO;
        }
    }

    impl Simulation for FakeSim {
        fn step(&mut self, _dt: f32) {
            self.position += std::mem::take(&mut self.pending_walk);
            self.steps += 1;
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        renders: usize,
        fovs: Vec<f32>,
        fail_with: Option<fn() -> RenderError>,
    }

    impl RenderSink for RecordingSink {
        fn render(&mut self, _scene: &Scene, camera: &Camera) -> Result<(), RenderError> {
            self.renders += 1;
            self.fovs.push(camera.fov_degrees);
            match self.fail_with {
                Some(make) => Err(make()),
                None => Ok(()),
            }
        }
    }

    #[derive(Default)]
    struct CountingFrames(Cell<usize>);

    impl FrameRequester for CountingFrames {
        fn request_frame(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn goal() -> ColliderHandle {
        ColliderHandle::from_raw_parts(10, 0)
    }

    fn pit() -> ColliderHandle {
        ColliderHandle::from_raw_parts(11, 0)
    }

    fn scheduler_with(config: GameConfig) -> FrameScheduler<FakeSim> {
        let level = LevelHandles {
            level_complete: TriggerVolume::new(TriggerKind::LevelComplete, goal()),
            out_of_bounds: TriggerVolume::new(TriggerKind::OutOfBounds, pit()),
            spawn: Vec3::new(0.0, 1.0, 0.0),
        };
        let sim = FakeSim {
            position: level.spawn,
            grounded: true,
            ..Default::default()
        };
        FrameScheduler::new(sim, Scene::new(), level, &config)
    }

    fn scheduler() -> FrameScheduler<FakeSim> {
        scheduler_with(GameConfig::default())
    }

    fn run(s: &mut FrameScheduler<FakeSim>, frames: usize, sink: &mut RecordingSink) {
        let requester = CountingFrames::default();
        for _ in 0..frames {
            s.tick_with_delta(DT, &requester, sink);
        }
    }

    #[test]
    fn walking_forward_for_a_second_covers_walk_speed() {
        let mut s = scheduler();
        let mut sink = RecordingSink::default();
        let start = s.simulation().world_position();
        s.handle_key_down(Action::MoveForward);
        run(&mut s, 61, &mut sink);
        let moved = s.simulation().world_position() - start;
        assert!((moved.z + 3.0).abs() < 0.01, "moved {:?}", moved);
        assert!(moved.x.abs() < 1e-5);
    }

    #[test]
    fn every_tick_requests_and_renders_once() {
        let mut s = scheduler();
        let mut sink = RecordingSink::default();
        let frames = CountingFrames::default();
        for _ in 0..5 {
            s.tick_with_delta(DT, &frames, &mut sink);
        }
        assert_eq!(frames.0.get(), 5);
        assert_eq!(sink.renders, 5);
    }

    #[test]
    fn pause_freezes_simulation_but_keeps_rendering() {
        let mut s = scheduler();
        let mut sink = RecordingSink::default();
        s.handle_key_down(Action::Dash);
        run(&mut s, 10, &mut sink);
        let percent = s.dash_recharge_percent();
        let steps = s.simulation().steps;
        let position = s.simulation().world_position();
        assert!(percent < 100.0);

        s.pause();
        s.simulation_mut().overlaps = vec![pit()];
        run(&mut s, 30, &mut sink);
        assert_eq!(s.simulation().steps, steps);
        assert_eq!(s.dash_recharge_percent(), percent);
        assert_eq!(s.simulation().world_position(), position);
        assert!(s.drain_events().is_empty());
        assert_eq!(sink.renders, 40);

        s.resume();
        run(&mut s, 1, &mut sink);
        assert!(s.dash_recharge_percent() > percent);
        assert_eq!(s.drain_events(), vec![LevelEvent::PlayerDied]);
    }

    #[test]
    fn pause_ignores_movement_keys() {
        let mut s = scheduler();
        let mut sink = RecordingSink::default();
        s.handle_key_down(Action::MoveForward);
        s.pause();
        assert!(!s.input().is_enabled());
        s.handle_key_down(Action::MoveForward);
        s.resume();
        let before = s.simulation().world_position();
        run(&mut s, 5, &mut sink);
        assert_eq!(s.simulation().world_position(), before);
    }

    #[test]
    fn stopped_scheduler_neither_renders_nor_reschedules() {
        let mut s = scheduler();
        let mut sink = RecordingSink::default();
        let frames = CountingFrames::default();
        s.handle_key_down(Action::ExitLevel);
        assert!(s.session().is_stopped());
        s.tick_with_delta(DT, &frames, &mut sink);
        s.tick(&frames, &mut sink);
        assert_eq!(frames.0.get(), 0);
        assert_eq!(sink.renders, 0);
    }

    #[test]
    fn out_of_bounds_alone_raises_death_every_frame() {
        let mut s = scheduler();
        let mut sink = RecordingSink::default();
        s.simulation_mut().overlaps = vec![pit()];
        for _ in 0..3 {
            run(&mut s, 1, &mut sink);
            assert_eq!(s.drain_events(), vec![LevelEvent::PlayerDied]);
        }
        s.simulation_mut().overlaps = vec![pit(), ColliderHandle::from_raw_parts(99, 0)];
        run(&mut s, 1, &mut sink);
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn goal_raises_level_passed() {
        let mut s = scheduler();
        let mut sink = RecordingSink::default();
        s.simulation_mut().overlaps = vec![pit(), goal()];
        run(&mut s, 1, &mut sink);
        assert_eq!(s.drain_events(), vec![LevelEvent::LevelPassed]);
    }

    #[test]
    fn force_death_goes_through_event_queue() {
        let mut s = scheduler();
        s.handle_key_down(Action::ForceDeath);
        s.handle_key_down(Action::ForceDeath);
        assert_eq!(s.drain_events(), vec![LevelEvent::PlayerDied]);
    }

    #[test]
    fn dash_gating_through_the_frame_loop() {
        let mut config = GameConfig::default();
        config.dash.cooldown = 0.5;
        let mut s = scheduler_with(config);
        let mut sink = RecordingSink::default();

        s.handle_key_down(Action::Dash);
        run(&mut s, 1, &mut sink);
        assert!(s.player().dash.is_dashing());
        assert_eq!(s.hud().dash_recharge_percent, 0.0);

        run(&mut s, 24, &mut sink);
        s.handle_key_down(Action::Dash);
        run(&mut s, 1, &mut sink);
        assert!(!s.player().dash.is_dashing());
        assert!(s.hud().dash_recharge_percent < 100.0);
        assert!(!s.input().dash_requested());

        run(&mut s, 5, &mut sink);
        assert_eq!(s.hud().dash_recharge_percent, 100.0);
        s.handle_key_down(Action::Dash);
        run(&mut s, 1, &mut sink);
        assert!(s.player().dash.is_dashing());
    }

    #[test]
    fn toggle_sprint_ends_when_forward_released() {
        let mut s = scheduler();
        let mut sink = RecordingSink::default();
        s.handle_key_down(Action::MoveForward);
        run(&mut s, 2, &mut sink);
        s.handle_key_down(Action::Sprint);
        s.handle_key_up(Action::Sprint);
        run(&mut s, 1, &mut sink);
        assert!(s.hud().is_sprinting);

        s.handle_key_up(Action::MoveForward);
        run(&mut s, 1, &mut sink);
        assert!(!s.hud().is_sprinting);
    }

    #[test]
    fn hold_sprint_setting_reaches_the_sprint_controller() {
        let mut config = GameConfig::default();
        config.locomotion.sprint_toggle_mode = false;
        let mut s = scheduler_with(config);
        let mut sink = RecordingSink::default();
        assert!(!s.session().settings().sprint_toggle_mode);

        s.handle_key_down(Action::MoveForward);
        s.handle_key_down(Action::Sprint);
        run(&mut s, 1, &mut sink);
        assert!(s.hud().is_sprinting);

        s.handle_key_up(Action::Sprint);
        run(&mut s, 1, &mut sink);
        assert!(!s.hud().is_sprinting);
    }

    #[test]
    fn sprint_widens_fov_within_bounds() {
        let mut s = scheduler();
        let mut sink = RecordingSink::default();
        s.handle_key_down(Action::MoveForward);
        s.handle_key_down(Action::Sprint);
        run(&mut s, 120, &mut sink);
        let last = sink.fovs.last().copied().unwrap_or_default();
        assert!((last - 85.0).abs() < 0.1);
        assert!(sink.fovs.iter().all(|f| (75.0..=100.0).contains(f)));
    }

    #[test]
    fn jump_only_when_grounded() {
        let mut s = scheduler();
        let mut sink = RecordingSink::default();
        s.handle_key_down(Action::Jump);
        run(&mut s, 1, &mut sink);
        assert_eq!(s.simulation().jumps, 1);
        s.handle_key_down(Action::Jump);
        run(&mut s, 1, &mut sink);
        assert_eq!(s.simulation().jumps, 1);
    }

    #[test]
    fn spectate_disables_movement_and_shows_avatar() {
        let mut s = scheduler();
        let mut sink = RecordingSink::default();
        s.handle_key_down(Action::MoveForward);
        s.handle_key_down(Action::SwitchCamera);
        assert_eq!(s.rig().mode(), LocomotionMode::ThirdPersonSpectate);
        assert!(matches!(s.rig().avatar(), AvatarVisual::Visible(_)));
        assert_eq!(s.scene().len(), 1);

        let before = s.simulation().world_position();
        s.handle_key_down(Action::MoveForward);
        run(&mut s, 10, &mut sink);
        assert_eq!(s.simulation().world_position(), before);

        s.handle_key_down(Action::SwitchCamera);
        assert!(s.scene().is_empty());
        s.handle_key_down(Action::MoveForward);
        run(&mut s, 2, &mut sink);
        assert!(s.simulation().world_position().z < before.z);
    }

    #[test]
    fn camera_switch_mid_dash_keeps_dash_direction() {
        let mut s = scheduler();
        let mut sink = RecordingSink::default();
        s.handle_key_down(Action::Dash);
        run(&mut s, 1, &mut sink);
        assert!(s.player().dash.is_dashing());
        let direction = s.player().dash.dash_direction();

        s.handle_key_down(Action::SwitchCamera);
        assert_eq!(s.rig().mode(), LocomotionMode::ThirdPersonSpectate);
        let before = s.simulation().world_position();
        run(&mut s, 2, &mut sink);

        assert!(s.player().dash.is_dashing());
        assert_eq!(s.player().dash.dash_direction(), direction);
        let moved = s.simulation().world_position() - before;
        assert!(moved.z < -0.1, "moved {:?}", moved);
        assert!(moved.x.abs() < 1e-5);
    }

    #[test]
    fn respawn_restores_spawn_state() {
        let mut s = scheduler();
        let mut sink = RecordingSink::default();
        s.handle_key_down(Action::MoveForward);
        s.handle_key_down(Action::Dash);
        run(&mut s, 10, &mut sink);
        s.respawn();
        assert_eq!(s.simulation().world_position(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(s.dash_recharge_percent(), 100.0);
        assert_eq!(s.input().movement_input(), glam::Vec2::ZERO);
        assert_eq!(s.run_time(), 0.0);
    }

    #[test]
    fn fatal_render_error_stops_the_loop() {
        let mut s = scheduler();
        let mut sink = RecordingSink {
            fail_with: Some(|| RenderError::Surface(renderer::wgpu::SurfaceError::OutOfMemory)),
            ..Default::default()
        };
        run(&mut s, 1, &mut sink);
        assert!(s.session().is_stopped());
    }

    #[test]
    fn recoverable_render_error_keeps_running() {
        let mut s = scheduler();
        let mut sink = RecordingSink {
            fail_with: Some(|| RenderError::SurfaceReconfigured),
            ..Default::default()
        };
        run(&mut s, 3, &mut sink);
        assert!(s.session().is_running());
        assert_eq!(sink.renders, 3);
    }
}
