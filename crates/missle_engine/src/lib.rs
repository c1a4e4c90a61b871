//! # Missle Engine
//!
//! A small 2D game runtime: a glfw window, a software canvas with text,
//! fixed-rate ticks and input tracking.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use missle_engine::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, _frame: &mut Frame<'_>) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, frame: &mut Frame<'_>, _delta_ticks: f32) -> Result<(), AppError> {
//!         if frame.input().was_key_pressed(KeyCode::Escape) {
//!             frame.request_quit();
//!         }
//!         Ok(())
//!     }
//!
//!     fn render(&mut self, canvas: &mut dyn Canvas) -> Result<(), AppError> {
//!         canvas.clear(Color::BLACK);
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut app = MyApp;
//!     Engine::run(EngineConfig::default(), FontLibrary::new(), &mut app)?;
//!     Ok(())
//! }
//! ```

pub mod foundation;
pub mod assets;
pub mod config;
pub mod render;
pub mod input;

mod application;
mod engine;

pub use application::{AppError, AppEvent, Application, Frame};
pub use engine::{Engine, EngineConfig, EngineError, TimingConfig};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        AppError, AppEvent, Application, Engine, EngineConfig, EngineError, Frame, TimingConfig,
        assets::{AssetError, ImageData},
        config::{Config, ConfigError},
        foundation::{
            math::Vec2,
            time::{TickClock, DEFAULT_TICKS_PER_SECOND},
        },
        input::{InputManager, KeyCode, MouseButton},
        render::{Canvas, Color, FontLibrary, FontSource, FontWeight, WindowSettings},
    };
}
