//! Font loading and glyph caching
//!
//! A [`FontLibrary`] owns every loaded face and a cache of rasterized glyph
//! coverage bitmaps, keyed by face, character and whole pixel size. Sizes
//! are rounded before measuring or rasterizing so animated text reuses the
//! same rasters.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use fontdue::{Font, FontSettings, Metrics};

use super::{FontSource, FontWeight};

/// Result type for font operations
pub type FontResult<T> = Result<T, FontError>;

/// Errors that can occur during font operations
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// Font file could not be read
    #[error("Failed to read font {path}: {source}")]
    Io {
        /// Path that was read
        path: String,
        /// Underlying error
        source: std::io::Error,
    },

    /// Font data could not be parsed
    #[error("Failed to parse font: {0}")]
    Parse(String),
}

/// Index of a loaded face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceId(usize);

/// A rasterized glyph
#[derive(Debug, Clone)]
pub struct Glyph {
    /// Placement and advance metrics
    pub metrics: Metrics,
    /// Row-major coverage values, `metrics.width * metrics.height` bytes
    pub coverage: Vec<u8>,
}

struct FontFace {
    family: String,
    weight: FontWeight,
    font: Font,
}

/// Upper bound on cached glyph rasters
pub const MAX_CACHED_GLYPHS: usize = 2048;

/// Round a requested size to the whole pixel size actually rendered
pub fn pixel_size(size: f32) -> f32 {
    size.round().max(1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct GlyphKey {
    face: FaceId,
    ch: char,
    pixels: u32,
}

impl GlyphKey {
    fn new(face: FaceId, ch: char, size: f32) -> Self {
        Self {
            face,
            ch,
            pixels: pixel_size(size) as u32,
        }
    }
}

/// Glyph rasters with a hard size bound
///
/// When full, the whole cache is dropped and refilled on demand.
struct GlyphCache {
    glyphs: HashMap<GlyphKey, Rc<Glyph>>,
    capacity: usize,
}

impl GlyphCache {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            glyphs: HashMap::new(),
            capacity,
        }
    }

    fn get_or_insert_with(&mut self, key: GlyphKey, rasterize: impl FnOnce() -> Glyph) -> Rc<Glyph> {
        if let Some(glyph) = self.glyphs.get(&key) {
            return Rc::clone(glyph);
        }

        if self.glyphs.len() >= self.capacity {
            log::debug!("Glyph cache full ({} rasters), flushing", self.glyphs.len());
            self.glyphs.clear();
        }

        let glyph = Rc::new(rasterize());
        self.glyphs.insert(key, Rc::clone(&glyph));
        glyph
    }

    fn len(&self) -> usize {
        self.glyphs.len()
    }
}

impl Default for GlyphCache {
    fn default() -> Self {
        Self::with_capacity(MAX_CACHED_GLYPHS)
    }
}

/// Collection of font faces with a shared glyph cache
#[derive(Default)]
pub struct FontLibrary {
    faces: Vec<FontFace>,
    glyph_cache: RefCell<GlyphCache>,
}

impl FontLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every source, skipping (and logging) the ones that fail
    pub fn from_sources(sources: &[FontSource]) -> Self {
        let mut library = Self::new();
        for source in sources {
            match library.load_face(&source.family, source.weight, &source.path) {
                Ok(_) => log::info!(
                    "Loaded font '{}' ({:?}) from {}",
                    source.family,
                    source.weight,
                    source.path.display()
                ),
                Err(e) => log::error!("Could not load font '{}': {}", source.family, e),
            }
        }

        if library.is_empty() {
            log::warn!("No fonts loaded, text will not be rendered");
        }
        library
    }

    /// Load a face from a font file
    pub fn load_face(&mut self, family: &str, weight: FontWeight, path: impl AsRef<Path>) -> FontResult<FaceId> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.display().to_string(),
            source,
        })?;
        self.add_face_from_bytes(family, weight, &bytes)
    }

    /// Add a face from in-memory font data
    pub fn add_face_from_bytes(&mut self, family: &str, weight: FontWeight, bytes: &[u8]) -> FontResult<FaceId> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| FontError::Parse(e.to_string()))?;

        self.faces.push(FontFace {
            family: family.to_lowercase(),
            weight,
            font,
        });
        Ok(FaceId(self.faces.len() - 1))
    }

    /// Number of loaded faces
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Whether no face is loaded
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Pick the best face for a request
    ///
    /// Exact family and weight first, then the family at any weight, then
    /// the first loaded face. `None` only when the library is empty.
    pub fn resolve(&self, family: &str, weight: FontWeight) -> Option<FaceId> {
        let family = family.to_lowercase();
        self.faces
            .iter()
            .position(|face| face.family == family && face.weight == weight)
            .or_else(|| self.faces.iter().position(|face| face.family == family))
            .or_else(|| (!self.faces.is_empty()).then_some(0))
            .map(FaceId)
    }

    /// Advance width of `text` at `size` pixels, rounded like [`Self::glyph`]
    pub fn text_width(&self, face: FaceId, size: f32, text: &str) -> f32 {
        let Some(face) = self.faces.get(face.0) else {
            return 0.0;
        };
        let size = pixel_size(size);
        text.chars()
            .map(|ch| face.font.metrics(ch, size).advance_width)
            .sum()
    }

    /// Rasterized glyph, rendered on first use and cached afterwards
    pub fn glyph(&self, face: FaceId, ch: char, size: f32) -> Option<Rc<Glyph>> {
        let font = &self.faces.get(face.0)?.font;
        let key = GlyphKey::new(face, ch, size);

        let glyph = self.glyph_cache.borrow_mut().get_or_insert_with(key, || {
            let (metrics, coverage) = font.rasterize(ch, pixel_size(size));
            Glyph { metrics, coverage }
        });
        Some(glyph)
    }

    /// Number of cached glyph rasters
    pub fn cached_glyphs(&self) -> usize {
        self.glyph_cache.borrow().len()
    }
}
