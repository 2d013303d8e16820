use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use crate::input::InputState;
use crate::renderer::Renderer;
use crate::settings::FPS;
use crate::surface::Surface;
use crate::window::{WindowConfig, apply_window_settings};

// ── Game trait ──────────────────────────────────────────────────────────────

/// What the engine drives: fixed-rate updates, one render per frame.
pub trait Game {
    /// One fixed-timestep tick. Input edges seen here are cleared afterwards.
    fn update(&mut self, engine: &mut Engine);
    /// Draw the current state into `engine.surface`.
    fn render(&mut self, engine: &mut Engine);
}

// ── Engine ──────────────────────────────────────────────────────────────────

/// What a running game can see and touch each tick.
pub struct Engine {
    pub renderer: Renderer,
    /// Logical-resolution framebuffer presented after every render.
    pub surface: Surface,
    pub input: InputState,
    dt: f32,
    ticks: u64,
}

impl Engine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Seconds per update tick.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

// ── EngineBuilder ───────────────────────────────────────────────────────────

pub struct EngineBuilder {
    title: String,
    window: WindowConfig,
    target_ups: u32,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            title: "Reluctant Hero".into(),
            window: WindowConfig::default(),
            target_ups: FPS,
        }
    }
}

impl EngineBuilder {
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }

    pub fn with_window(mut self, window: WindowConfig) -> Self {
        self.window = window;
        self
    }

    /// Updates per second. Clamped to at least one.
    pub fn with_ups(mut self, ups: u32) -> Self {
        self.target_ups = ups.max(1);
        self
    }

    /// Seconds per update tick.
    pub fn fixed_dt(&self) -> f32 {
        1.0 / self.target_ups as f32
    }

    pub fn run(self, game: impl Game + 'static) -> anyhow::Result<()> {
        let event_loop = EventLoop::new()?;
        let fixed_dt = self.fixed_dt();
        let mut app = App {
            config: self,
            game: Box::new(game),
            engine: None,
            last_instant: None,
            accumulator: 0.0,
            fixed_dt,
            failure: None,
        };
        event_loop.run_app(&mut app)?;
        match app.failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

// ── App (winit ApplicationHandler) ──────────────────────────────────────────

struct App {
    config: EngineBuilder,
    game: Box<dyn Game>,
    engine: Option<Engine>,
    last_instant: Option<Instant>,
    accumulator: f32,
    fixed_dt: f32,
    failure: Option<anyhow::Error>,
}

impl App {
    fn create_engine(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<Engine> {
        let wc = &self.config.window;
        let window = Arc::new(
            event_loop.create_window(
                Window::default_attributes()
                    .with_title(&self.config.title)
                    .with_inner_size(winit::dpi::PhysicalSize::new(
                        wc.physical_width,
                        wc.physical_height,
                    ))
                    .with_resizable(false),
            )?,
        );
        apply_window_settings(&window, wc);

        let renderer = pollster::block_on(Renderer::new(window, wc.logical_width, wc.logical_height))?;
        Ok(Engine {
            renderer,
            surface: Surface::new(wc.logical_width, wc.logical_height),
            input: InputState::new(),
            dt: self.fixed_dt,
            ticks: 0,
        })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.engine.is_some() {
            return;
        }
        match self.create_engine(event_loop) {
            Ok(engine) => {
                log::info!("[engine] running at {} ups", self.config.target_ups);
                self.engine = Some(engine);
            }
            Err(e) => {
                log::error!("[engine] startup failed: {e:#}");
                self.failure = Some(e);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(engine) = self.engine.as_ref() {
            engine.renderer.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(engine) = self.engine.as_mut() else { return };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("[engine] closed after {} ticks", engine.ticks);
                event_loop.exit();
            }

            WindowEvent::Resized(size) => engine.renderer.resize(size),

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let elapsed = match self.last_instant {
                    Some(prev) => now.duration_since(prev).as_secs_f32().min(0.25),
                    None => self.fixed_dt,
                };
                self.last_instant = Some(now);
                self.accumulator += elapsed;

                while self.accumulator >= self.fixed_dt {
                    self.accumulator -= self.fixed_dt;
                    engine.ticks += 1;
                    self.game.update(engine);
                    // Edges belong to the tick that saw them.
                    engine.input.clear_frame_state();
                }

                self.game.render(engine);
                match engine.renderer.present(&engine.surface) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = engine.renderer.window.inner_size();
                        engine.renderer.resize(size);
                    }
                    Err(e) => log::warn!("[engine] render error: {e}"),
                }
            }

            WindowEvent::KeyboardInput {
                event: KeyEvent { physical_key: PhysicalKey::Code(code), state, repeat, .. },
                ..
            } => match state {
                ElementState::Pressed if !repeat => engine.input.press(code),
                ElementState::Pressed => {}
                ElementState::Released => engine.input.release(code),
            },

            _ => {}
        }
    }
}
