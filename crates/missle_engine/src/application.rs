//! Application trait and lifecycle management

use thiserror::Error;

use crate::input::InputManager;
use crate::render::Canvas;

/// Application lifecycle trait
///
/// Implement this trait to create your game using the engine. Time is
/// measured in ticks: `1.0` is one frame at the configured tick rate.
pub trait Application {
    /// Initialize the application
    ///
    /// Called once after the window exists and before it is shown.
    fn initialize(&mut self, frame: &mut Frame<'_>) -> Result<(), AppError>;

    /// Update the application
    ///
    /// # Arguments
    /// * `frame` - Input state and loop control for this frame
    /// * `delta_ticks` - Ticks elapsed since the last update
    fn update(&mut self, frame: &mut Frame<'_>, delta_ticks: f32) -> Result<(), AppError>;

    /// Draw the current state
    ///
    /// Called after every update with a canvas the size of the window.
    fn render(&mut self, canvas: &mut dyn Canvas) -> Result<(), AppError>;

    /// Handle application events
    ///
    /// The engine has already applied input events to the [`InputManager`]
    /// by the time this is called.
    fn handle_event(&mut self, frame: &mut Frame<'_>, event: AppEvent) -> Result<(), AppError> {
        if let AppEvent::WindowCloseRequested = event {
            frame.request_quit();
        }
        Ok(())
    }

    /// Cleanup the application
    ///
    /// Called once when the loop stops, also after an error.
    fn cleanup(&mut self);
}

/// Per-frame view of the engine handed to the application
pub struct Frame<'a> {
    input: &'a InputManager,
    screen_size: (u32, u32),
    quit: bool,
}

impl<'a> Frame<'a> {
    /// Create a frame over the given input state
    pub fn new(input: &'a InputManager, screen_size: (u32, u32)) -> Self {
        Self {
            input,
            screen_size,
            quit: false,
        }
    }

    /// Current input state
    pub fn input(&self) -> &'a InputManager {
        self.input
    }

    /// Drawable size in pixels
    pub fn screen_size(&self) -> (u32, u32) {
        self.screen_size
    }

    /// Ask the engine to stop after this frame
    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// Whether a quit was requested
    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// The drawable area cannot host the application
    #[error("Unusable screen size {width}x{height}")]
    ScreenSize {
        /// Drawable width
        width: u32,
        /// Drawable height
        height: u32,
    },
}

/// Application events
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Window was resized
    WindowResized {
        /// New drawable width
        width: u32,
        /// New drawable height
        height: u32,
    },

    /// Window close requested
    WindowCloseRequested,

    /// Window gained focus
    WindowFocused,

    /// Window lost focus
    WindowUnfocused,

    /// Key input event
    KeyInput {
        /// The key that was pressed/released
        key: crate::input::KeyCode,
        /// Whether the key was pressed (true) or released (false)
        pressed: bool,
    },

    /// Mouse button event
    MouseButton {
        /// The mouse button that was pressed/released
        button: crate::input::MouseButton,
        /// Whether the button was pressed (true) or released (false)
        pressed: bool,
    },

    /// Mouse movement
    MouseMoved {
        /// New X coordinate
        x: f64,
        /// New Y coordinate
        y: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Idle;

    impl Application for Idle {
        fn initialize(&mut self, _frame: &mut Frame<'_>) -> Result<(), AppError> {
            Ok(())
        }

        fn update(&mut self, _frame: &mut Frame<'_>, _delta_ticks: f32) -> Result<(), AppError> {
            Ok(())
        }

        fn render(&mut self, _canvas: &mut dyn Canvas) -> Result<(), AppError> {
            Ok(())
        }

        fn cleanup(&mut self) {}
    }

    #[test]
    fn test_default_close_handling_requests_quit() {
        let input = InputManager::new();
        let mut frame = Frame::new(&input, (800, 600));
        let mut app = Idle;

        app.handle_event(&mut frame, AppEvent::WindowFocused).unwrap();
        assert!(!frame.quit_requested());

        app.handle_event(&mut frame, AppEvent::WindowCloseRequested).unwrap();
        assert!(frame.quit_requested());
        assert_eq!(frame.screen_size(), (800, 600));
    }
}
