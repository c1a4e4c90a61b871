//! Backend-agnostic 2D drawing context
//!
//! Everything the game draws goes through [`Canvas`]. Coordinates are in
//! pixels, y grows downward, and text is positioned by its left edge and
//! baseline.

use super::color::Color;
use super::text::FontWeight;

/// Immediate-mode 2D drawing surface
///
/// Drawing state (current color and font) is sticky: it applies to every
/// subsequent call until changed.
pub trait Canvas {
    /// Surface size in pixels
    fn size(&self) -> (u32, u32);

    /// Fill the whole surface with `color`, ignoring the current color
    fn clear(&mut self, color: Color);

    /// Set the color used by subsequent drawing calls
    fn set_color(&mut self, color: Color);

    /// Current drawing color
    fn color(&self) -> Color;

    /// Select the font for subsequent text calls
    fn set_font(&mut self, family: &str, weight: FontWeight, size: f32);

    /// Advance width of `text` in the current font, in pixels
    fn text_width(&self, text: &str) -> f32;

    /// Draw `text` with its left edge at `x` and baseline at `y`
    fn draw_text(&mut self, text: &str, x: f32, y: f32);

    /// Fill an axis-aligned rectangle
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Fill a circle
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32);

    /// Draw a circle outline of the given stroke thickness
    fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, thickness: f32);

    /// Draw a line segment of the given thickness
    fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, thickness: f32);
}
