//! Text support
//!
//! Fonts are TrueType/OpenType files rasterized on the CPU with `fontdue`.

pub mod font_library;

pub use font_library::{FaceId, FontError, FontLibrary, FontResult, Glyph};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight
    #[default]
    Regular,
    /// Bold weight
    Bold,
}

/// Where to load a font face from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSource {
    /// Family name text is requested by (matched case-insensitively)
    pub family: String,
    /// Weight this file provides
    #[serde(default)]
    pub weight: FontWeight,
    /// Path to the font file
    pub path: PathBuf,
}
