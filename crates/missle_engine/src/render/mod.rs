//! Rendering
//!
//! Games draw into a CPU [`Framebuffer`] through the [`Canvas`] trait. The
//! [`Presenter`] copies the finished frame to the [`Window`] once per tick.

pub mod canvas;
pub mod color;
pub mod framebuffer;
pub mod presenter;
pub mod text;
pub mod window;

pub use canvas::Canvas;
pub use color::Color;
pub use framebuffer::Framebuffer;
pub use presenter::{PresentError, Presenter};
pub use text::{FontLibrary, FontSource, FontWeight};
pub use window::{Window, WindowError, WindowResult, WindowSettings};
