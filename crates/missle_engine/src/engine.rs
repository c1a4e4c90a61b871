//! Main engine loop

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::{AppEvent, Application, Frame};
use crate::foundation::time::{FpsCounter, TickClock, DEFAULT_TICKS_PER_SECOND};
use crate::input::InputManager;
use crate::render::{Canvas, FontLibrary, Framebuffer, PresentError, Presenter, Window, WindowError, WindowSettings};

/// Frames between FPS log lines
const FPS_LOG_INTERVAL: u64 = 600;

/// Engine configuration
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Window creation settings
    pub window: WindowSettings,
    /// Simulation timing
    pub timing: TimingConfig,
}

/// Simulation timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Ticks per second; one tick is `1.0` of delta time
    pub ticks_per_second: u32,
    /// Largest delta handed to a single update after a stall
    pub max_ticks_per_update: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            max_ticks_per_update: 5.0,
        }
    }
}

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Initialization error
    #[error("Engine initialization failed: {0}")]
    InitializationFailed(String),

    /// Window system error
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    /// Frame presentation error
    #[error("Presentation error: {0}")]
    Present(#[from] PresentError),

    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),
}

/// The engine
///
/// Owns the window and everything needed to turn application updates into
/// pixels on screen. Constructed and driven by [`Engine::run`].
pub struct Engine {
    // Fields drop in order: GL objects must go before the context.
    presenter: Presenter,
    window: Window,
    canvas: Framebuffer,
    input: InputManager,
    clock: TickClock,
    fps: FpsCounter,
}

impl Engine {
    /// Create the window and presentation path
    fn new(config: &EngineConfig, fonts: FontLibrary) -> Result<Self, EngineError> {
        log::info!("Initializing engine...");

        let mut window = Window::new(&config.window)?;
        let (width, height) = window.framebuffer_size();
        let presenter = Presenter::new(&mut window, width, height)?;

        Ok(Self {
            window,
            presenter,
            canvas: Framebuffer::new(width, height, fonts),
            input: InputManager::new(),
            clock: TickClock::new(config.timing.ticks_per_second, config.timing.max_ticks_per_update),
            fps: FpsCounter::new(),
        })
    }

    /// Run the engine with the given application until the window closes
    /// or the application asks to quit
    pub fn run<T: Application>(config: EngineConfig, fonts: FontLibrary, app: &mut T) -> Result<(), EngineError> {
        let mut engine = Self::new(&config, fonts)?;

        let mut frame = Frame::new(&engine.input, engine.canvas.size());
        app.initialize(&mut frame)
            .map_err(|e| EngineError::ApplicationError(format!("App initialization: {}", e)))?;

        engine.window.show();
        log::info!("Starting main loop...");

        let result = engine.main_loop(app);

        app.cleanup();
        engine.shutdown();
        result
    }

    /// Release GL resources, then the window that owns their context
    fn shutdown(self) {
        let Self { presenter, window, fps, .. } = self;
        drop(presenter);
        drop(window);
        log::info!("Engine shutdown complete ({} frames)", fps.frame_count());
    }

    fn main_loop<T: Application>(&mut self, app: &mut T) -> Result<(), EngineError> {
        while !self.window.should_close() {
            if self.dispatch_events(app)? {
                break;
            }

            if let Some(delta_ticks) = self.clock.advance() {
                let mut frame = Frame::new(&self.input, self.canvas.size());
                app.update(&mut frame, delta_ticks)
                    .map_err(|e| EngineError::ApplicationError(format!("App update: {}", e)))?;
                let quit = frame.quit_requested();
                self.input.end_frame();

                app.render(&mut self.canvas)
                    .map_err(|e| EngineError::ApplicationError(format!("App render: {}", e)))?;
                self.presenter.present(&mut self.window, &self.canvas);

                self.fps.record_frame();
                if self.fps.frame_count() % FPS_LOG_INTERVAL == 0 {
                    log::debug!("FPS: {}", self.fps.current_fps());
                }

                if quit {
                    break;
                }
            }

            std::thread::sleep(Duration::from_millis(1));
        }

        self.window.set_should_close(true);
        Ok(())
    }

    /// Apply pending window events; returns whether the application asked
    /// to quit
    fn dispatch_events<T: Application>(&mut self, app: &mut T) -> Result<bool, EngineError> {
        let mut quit = false;

        for event in self.window.poll_events() {
            apply_input_event(&mut self.input, &event);
            if let AppEvent::WindowResized { width, height } = event {
                log::debug!("Resizing canvas to {}x{}", width, height);
                self.canvas.resize(width, height);
            }

            let mut frame = Frame::new(&self.input, self.canvas.size());
            app.handle_event(&mut frame, event)
                .map_err(|e| EngineError::ApplicationError(format!("App event: {}", e)))?;
            quit |= frame.quit_requested();
        }

        Ok(quit)
    }
}

/// Update input state from a window event
fn apply_input_event(input: &mut InputManager, event: &AppEvent) {
    match *event {
        AppEvent::KeyInput { key, pressed } => input.handle_key_input(key, pressed),
        AppEvent::MouseButton { button, pressed } => input.handle_mouse_button(button, pressed),
        AppEvent::MouseMoved { x, y } => input.handle_mouse_move(x, y),
        _ => {}
    }
}
