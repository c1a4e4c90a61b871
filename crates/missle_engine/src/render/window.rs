//! Window management using GLFW
//!
//! Creates the game window with an OpenGL 3.3 core context (used only to
//! present the software framebuffer) and translates GLFW events into
//! [`AppEvent`]s.

use std::ffi::c_void;

use glfw::{Action, Context, OpenGlProfileHint, SwapInterval, WindowHint, WindowMode};
use thiserror::Error;

use crate::application::AppEvent;
use crate::assets::ImageData;
use crate::input::{KeyCode, MouseButton};

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// GLFW could not be initialized
    #[error("GLFW initialization failed")]
    InitializationFailed,

    /// The window or its GL context could not be created
    #[error("Window creation failed")]
    CreationFailed,
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// How the window should be created
#[derive(Debug, Clone)]
pub struct WindowSettings {
    /// Window title
    pub title: String,
    /// Remove the title bar and borders
    pub borderless: bool,
    /// Cover the primary monitor and maximize
    pub fullscreen: bool,
    /// Size used when not fullscreen or when no monitor can be queried
    pub fallback_size: (u32, u32),
    /// Synchronize buffer swaps with the display
    pub vsync: bool,
    /// Window icon, if one was loaded
    pub icon: Option<ImageData>,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Missle Engine".to_string(),
            borderless: false,
            fullscreen: false,
            fallback_size: (1200, 800),
            vsync: true,
            icon: None,
        }
    }
}

/// GLFW window wrapper
///
/// The window starts hidden; call [`Window::show`] once everything that
/// draws into it is ready.
pub struct Window {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

impl Window {
    /// Create the window and make its GL context current on this thread
    pub fn new(settings: &WindowSettings) -> WindowResult<Self> {
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|_| WindowError::InitializationFailed)?;

        let (width, height) = if settings.fullscreen {
            glfw.with_primary_monitor(|_, monitor| {
                monitor
                    .and_then(|m| m.get_video_mode())
                    .map(|mode| (mode.width, mode.height))
            })
            .unwrap_or(settings.fallback_size)
        } else {
            settings.fallback_size
        };

        glfw.window_hint(WindowHint::ContextVersion(3, 3));
        glfw.window_hint(WindowHint::OpenGlProfile(OpenGlProfileHint::Core));
        glfw.window_hint(WindowHint::OpenGlForwardCompat(true));
        glfw.window_hint(WindowHint::Decorated(!settings.borderless));
        glfw.window_hint(WindowHint::Maximized(settings.fullscreen));
        glfw.window_hint(WindowHint::Visible(false));

        let (mut window, events) = glfw
            .create_window(width, height, &settings.title, WindowMode::Windowed)
            .ok_or(WindowError::CreationFailed)?;

        log::info!("Created {}x{} window '{}'", width, height, settings.title);

        if let Some(icon) = &settings.icon {
            window.set_icon_from_pixels(vec![glfw::PixelImage {
                width: icon.width,
                height: icon.height,
                pixels: icon.packed_pixels(),
            }]);
        } else {
            log::debug!("No window icon set");
        }

        window.make_current();
        glfw.set_swap_interval(if settings.vsync { SwapInterval::Sync(1) } else { SwapInterval::None });

        if settings.fullscreen {
            window.set_pos(0, 0);
            window.maximize();
        }

        window.set_key_polling(true);
        window.set_mouse_button_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_close_polling(true);
        window.set_focus_polling(true);
        window.set_framebuffer_size_polling(true);

        Ok(Self {
            glfw,
            window,
            events,
        })
    }

    /// Make the window visible
    pub fn show(&mut self) {
        self.window.show();
        log::info!(
            "Window shown (decorated: {}, maximized: {})",
            self.window.is_decorated(),
            self.window.is_maximized()
        );
    }

    /// Check if the window should close
    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    /// Set whether the window should close
    pub fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    /// Poll the OS and return the translated events
    pub fn poll_events(&mut self) -> Vec<AppEvent> {
        self.glfw.poll_events();
        glfw::flush_messages(&self.events)
            .filter_map(|(_, event)| translate_event(event))
            .collect()
    }

    /// Drawable size in pixels
    pub fn framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (width.max(1) as u32, height.max(1) as u32)
    }

    /// Present the back buffer
    pub fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    /// Address of a GL entry point in this window's context
    pub(crate) fn gl_proc_address(&mut self, symbol: &str) -> *const c_void {
        self.window.get_proc_address(symbol) as *const c_void
    }
}

/// Convert a GLFW event into an application event
fn translate_event(event: glfw::WindowEvent) -> Option<AppEvent> {
    match event {
        glfw::WindowEvent::Close => Some(AppEvent::WindowCloseRequested),
        glfw::WindowEvent::Focus(true) => Some(AppEvent::WindowFocused),
        glfw::WindowEvent::Focus(false) => Some(AppEvent::WindowUnfocused),
        glfw::WindowEvent::FramebufferSize(width, height) => Some(AppEvent::WindowResized {
            width: width.max(1) as u32,
            height: height.max(1) as u32,
        }),
        glfw::WindowEvent::Key(key, _, action, _) => {
            let key = translate_key(key)?;
            match action {
                Action::Press => Some(AppEvent::KeyInput { key, pressed: true }),
                Action::Release => Some(AppEvent::KeyInput { key, pressed: false }),
                Action::Repeat => None,
            }
        }
        glfw::WindowEvent::MouseButton(button, action, _) => {
            let button = match button {
                glfw::MouseButton::Button1 => MouseButton::Left,
                glfw::MouseButton::Button2 => MouseButton::Right,
                glfw::MouseButton::Button3 => MouseButton::Middle,
                _ => return None,
            };
            Some(AppEvent::MouseButton { button, pressed: action != Action::Release })
        }
        glfw::WindowEvent::CursorPos(x, y) => Some(AppEvent::MouseMoved { x, y }),
        _ => None,
    }
}

fn translate_key(key: glfw::Key) -> Option<KeyCode> {
    use glfw::Key;

    Some(match key {
        Key::A => KeyCode::A,
        Key::D => KeyCode::D,
        Key::E => KeyCode::E,
        Key::H => KeyCode::H,
        Key::P => KeyCode::P,
        Key::S => KeyCode::S,
        Key::W => KeyCode::W,
        Key::Num1 => KeyCode::Num1,
        Key::Num2 => KeyCode::Num2,
        Key::Num3 => KeyCode::Num3,
        Key::Space => KeyCode::Space,
        Key::Enter => KeyCode::Enter,
        Key::Escape => KeyCode::Escape,
        Key::Up => KeyCode::Up,
        Key::Down => KeyCode::Down,
        Key::Left => KeyCode::Left,
        Key::Right => KeyCode::Right,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_events_translate() {
        let event = glfw::WindowEvent::Key(glfw::Key::Escape, 0, Action::Press, glfw::Modifiers::empty());
        assert!(matches!(
            translate_event(event),
            Some(AppEvent::KeyInput { key: KeyCode::Escape, pressed: true })
        ));

        let repeat = glfw::WindowEvent::Key(glfw::Key::Escape, 0, Action::Repeat, glfw::Modifiers::empty());
        assert!(translate_event(repeat).is_none());

        let unknown = glfw::WindowEvent::Key(glfw::Key::F12, 0, Action::Press, glfw::Modifiers::empty());
        assert!(translate_event(unknown).is_none());
    }

    #[test]
    fn test_close_and_resize_translate() {
        assert!(matches!(
            translate_event(glfw::WindowEvent::Close),
            Some(AppEvent::WindowCloseRequested)
        ));
        assert!(matches!(
            translate_event(glfw::WindowEvent::FramebufferSize(0, 600)),
            Some(AppEvent::WindowResized { width: 1, height: 600 })
        ));
    }

    #[test]
    fn test_default_settings_are_windowed() {
        let settings = WindowSettings::default();
        assert!(!settings.borderless);
        assert!(!settings.fullscreen);
        assert!(settings.icon.is_none());
    }
}
