//! VaultRun - first-person obstacle course with sprint, jump and dash.

mod events;

use anyhow::{Context, Result};
use game::{build_demo_course, FrameScheduler, GameConfig, LevelEvent};
use input::InputBindings;
use physics::{CourseSimulation, PhysicsWorld};
use renderer::{Renderer, Scene};
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{CursorGrabMode, Fullscreen, Window, WindowId},
};

/// Everything alive while the window is open.
pub struct GameState {
    window: Arc<Window>,
    renderer: Renderer,
    scheduler: FrameScheduler<CourseSimulation>,
    bindings: InputBindings,
    cursor_grabbed: bool,
    title: String,
    /// Deaths since the last completed run.
    deaths: u32,
}

impl GameState {
    async fn new(window: Arc<Window>, config: GameConfig) -> Result<Self> {
        let renderer = Renderer::new(window.clone(), config.vsync)
            .await
            .context("failed to initialise the renderer")?;

        let mut world = PhysicsWorld::new();
        let mut scene = Scene::new();
        let level = build_demo_course(&mut world, &mut scene);
        let sim = CourseSimulation::new(
            world,
            level.spawn,
            config.character.to_character_config(),
            config.physics_substeps,
        )
        .context("failed to spawn the player")?;

        let mut scheduler = FrameScheduler::new(sim, scene, level, &config);
        let (width, height) = renderer.dimensions();
        scheduler.resize(width, height);
        log::info!("level loaded, spawn at {:?}", level.spawn);

        let mut state = Self {
            window,
            renderer,
            scheduler,
            bindings: InputBindings::default(),
            cursor_grabbed: false,
            title: String::new(),
            deaths: 0,
        };
        state.set_cursor_grab(true);
        Ok(state)
    }

    /// One display refresh: tick the scheduler, then react to level events.
    fn frame(&mut self) {
        self.scheduler.tick(&*self.window, &mut self.renderer);

        for event in self.scheduler.drain_events() {
            match event {
                LevelEvent::LevelPassed => {
                    log::info!(
                        "level passed in {:.2}s ({} deaths), restarting",
                        self.scheduler.run_time(),
                        self.deaths
                    );
                    self.deaths = 0;
                    self.scheduler.respawn();
                }
                LevelEvent::PlayerDied => {
                    self.deaths += 1;
                    log::info!("player died ({} this run)", self.deaths);
                    self.scheduler.respawn();
                }
            }
        }

        let title = self
            .scheduler
            .hud()
            .status_line(self.scheduler.session().is_paused());
        if title != self.title {
            self.window.set_title(&title);
            self.title = title;
        }
    }

    fn set_cursor_grab(&mut self, grab: bool) {
        if grab {
            let grabbed = self
                .window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined));
            if let Err(e) = grabbed {
                log::warn!("cursor grab unavailable: {}", e);
            }
        } else {
            let _ = self.window.set_cursor_grab(CursorGrabMode::None);
        }
        self.window.set_cursor_visible(!grab);
        self.cursor_grabbed = grab;
    }
}

struct App {
    state: Option<GameState>,
}

impl App {
    fn new() -> Self {
        Self { state: None }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_none() {
            let config = GameConfig::load();
            let mut window_attrs = Window::default_attributes()
                .with_title("VaultRun")
                .with_inner_size(winit::dpi::LogicalSize::new(config.window_width, config.window_height));
            if config.fullscreen {
                window_attrs = window_attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
            }

            let window = match event_loop.create_window(window_attrs) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            match pollster::block_on(GameState::new(window.clone(), config)) {
                Ok(s) => {
                    self.state = Some(s);
                    window.request_redraw();
                }
                Err(e) => {
                    log::error!("Failed to initialize game: {:#}", e);
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(state) = &mut self.state {
            if state.handle_window_event(event) {
                event_loop.exit();
            }
        }
    }

    fn device_event(&mut self, _: &ActiveEventLoop, _: DeviceId, event: DeviceEvent) {
        if let Some(state) = &mut self.state {
            state.handle_device_event(event);
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("VaultRun controls:");
    println!("  WASD / arrows - move       Mouse - look");
    println!("  Shift         - sprint     Space - jump");
    println!("  E             - dash       C     - switch camera");
    println!("  P             - pause      K     - force death (debug)");
    println!("  Escape        - quit");

    log::info!("Starting VaultRun");

    let event_loop = EventLoop::new()?;
    // Poll continuously for lower input latency.
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app)?;

    Ok(())
}
