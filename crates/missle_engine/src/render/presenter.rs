//! Frame presentation
//!
//! The framebuffer is uploaded into a texture attached to a read framebuffer
//! object and blitted onto the window's default framebuffer. Rows are stored
//! top-first on the CPU, so the blit flips vertically.

#![allow(unsafe_code)]

use gl::types::{GLint, GLsizei, GLuint};
use thiserror::Error;

use super::framebuffer::Framebuffer;
use super::window::Window;
use super::canvas::Canvas;

/// Presentation errors
#[derive(Error, Debug)]
pub enum PresentError {
    /// A required GL entry point could not be loaded
    #[error("OpenGL function {0} is not available")]
    MissingFunction(&'static str),

    /// The read framebuffer could not be completed
    #[error("Incomplete framebuffer (status 0x{0:x})")]
    IncompleteFramebuffer(u32),
}

/// Copies a [`Framebuffer`] to the window every frame
pub struct Presenter {
    texture: GLuint,
    read_fbo: GLuint,
    size: (u32, u32),
}

impl Presenter {
    /// Load GL entry points from the window's context and allocate the
    /// upload texture
    pub fn new(window: &mut Window, width: u32, height: u32) -> Result<Self, PresentError> {
        gl::load_with(|symbol| window.gl_proc_address(symbol));

        if !gl::BlitFramebuffer::is_loaded() {
            return Err(PresentError::MissingFunction("glBlitFramebuffer"));
        }
        if !gl::TexSubImage2D::is_loaded() {
            return Err(PresentError::MissingFunction("glTexSubImage2D"));
        }

        let mut texture = 0;
        let mut read_fbo = 0;

        // SAFETY: the window's context is current on this thread and every
        // function used below was loaded above.
        let status = unsafe {
            gl::GenTextures(1, &mut texture);
            gl::BindTexture(gl::TEXTURE_2D, texture);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::NEAREST as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::NEAREST as GLint);
            allocate_texture(width, height);

            gl::GenFramebuffers(1, &mut read_fbo);
            gl::BindFramebuffer(gl::READ_FRAMEBUFFER, read_fbo);
            gl::FramebufferTexture2D(gl::READ_FRAMEBUFFER, gl::COLOR_ATTACHMENT0, gl::TEXTURE_2D, texture, 0);
            gl::CheckFramebufferStatus(gl::READ_FRAMEBUFFER)
        };

        let presenter = Self {
            texture,
            read_fbo,
            size: (width, height),
        };

        if status != gl::FRAMEBUFFER_COMPLETE {
            return Err(PresentError::IncompleteFramebuffer(status));
        }

        log::info!("Presenter ready ({}x{})", width, height);
        Ok(presenter)
    }

    /// Upload `frame` and swap it onto the screen
    pub fn present(&mut self, window: &mut Window, frame: &Framebuffer) {
        let (width, height) = frame.size();
        let (target_width, target_height) = window.framebuffer_size();

        // SAFETY: same context as in `new`; the pixel slice holds exactly
        // width * height RGBA8 texels.
        unsafe {
            gl::BindTexture(gl::TEXTURE_2D, self.texture);
            if (width, height) != self.size {
                allocate_texture(width, height);
                self.size = (width, height);
            }
            gl::TexSubImage2D(
                gl::TEXTURE_2D,
                0,
                0,
                0,
                width as GLsizei,
                height as GLsizei,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                frame.as_bytes().as_ptr().cast(),
            );

            gl::BindFramebuffer(gl::READ_FRAMEBUFFER, self.read_fbo);
            gl::BindFramebuffer(gl::DRAW_FRAMEBUFFER, 0);
            gl::Viewport(0, 0, target_width as GLsizei, target_height as GLsizei);
            gl::BlitFramebuffer(
                0,
                0,
                width as GLint,
                height as GLint,
                0,
                target_height as GLint,
                target_width as GLint,
                0,
                gl::COLOR_BUFFER_BIT,
                gl::NEAREST,
            );
        }

        window.swap_buffers();
    }
}

/// (Re)allocate storage for the currently bound texture
unsafe fn allocate_texture(width: u32, height: u32) {
    gl::TexImage2D(
        gl::TEXTURE_2D,
        0,
        gl::RGBA8 as GLint,
        width as GLsizei,
        height as GLsizei,
        0,
        gl::RGBA,
        gl::UNSIGNED_BYTE,
        std::ptr::null(),
    );
}

impl Drop for Presenter {
    fn drop(&mut self) {
        // SAFETY: the names were created in the window context, which `Engine` keeps alive until the presenter is dropped.
        unsafe {
            gl::DeleteFramebuffers(1, &self.read_fbo);
            gl::DeleteTextures(1, &self.texture);
        }
    }
}
