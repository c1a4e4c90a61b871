//! Asset loading
//!
//! Only images are loaded from disk at the moment (window icons). Fonts live
//! in [`crate::render::text`].

pub mod image_loader;

pub use image_loader::ImageData;

use thiserror::Error;

/// Asset errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Asset loading failed
    #[error("Asset loading failed: {0}")]
    LoadFailed(String),
}
