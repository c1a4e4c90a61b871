//! CPU framebuffer implementing [`Canvas`]
//!
//! Pixels are stored as RGBA8, top row first. All drawing uses source-over
//! blending with the current color's alpha; shapes are clipped to the
//! surface.

use super::canvas::Canvas;
use super::color::Color;
use super::text::{FaceId, FontLibrary, FontWeight};

/// Software render target
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    color: Color,
    font: Option<(FaceId, f32)>,
    fonts: FontLibrary,
}

impl Framebuffer {
    /// Create a framebuffer cleared to black
    pub fn new(width: u32, height: u32, fonts: FontLibrary) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; (width as usize) * (height as usize)],
            color: Color::WHITE,
            font: None,
            fonts,
        }
    }

    /// Resize, discarding the current contents
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        log::debug!("Resizing framebuffer to {}x{}", width, height);
        self.width = width;
        self.height = height;
        self.pixels = vec![Color::BLACK; (width as usize) * (height as usize)];
    }

    /// Pixel at `(x, y)`, `None` when out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        (x < self.width && y < self.height).then(|| self.pixels[(y * self.width + x) as usize])
    }

    /// All pixels, row-major
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Pixel data as raw RGBA bytes for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Fonts available to this framebuffer
    pub fn fonts(&self) -> &FontLibrary {
        &self.fonts
    }

    fn blend_span(&mut self, y: i32, x0: i32, x1: i32) {
        let color = self.color;
        for x in x0..x1 {
            blend(&mut self.pixels, self.width, self.height, x, y, color, 1.0);
        }
    }

    /// Blend every pixel in the box whose center passes `inside`
    fn blend_where(&mut self, min: (f32, f32), max: (f32, f32), inside: impl Fn(f32, f32) -> bool) {
        let color = self.color;
        let x0 = min.0.floor().max(0.0) as i32;
        let y0 = min.1.floor().max(0.0) as i32;
        let x1 = max.0.ceil().min(self.width as f32) as i32;
        let y1 = max.1.ceil().min(self.height as f32) as i32;

        for y in y0..y1 {
            for x in x0..x1 {
                if inside(x as f32 + 0.5, y as f32 + 0.5) {
                    blend(&mut self.pixels, self.width, self.height, x, y, color, 1.0);
                }
            }
        }
    }
}

/// Source-over blend of `color` scaled by `coverage` into one pixel
fn blend(pixels: &mut [Color], width: u32, height: u32, x: i32, y: i32, color: Color, coverage: f32) {
    if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
        return;
    }

    let alpha = color.alpha_f32() * coverage.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }

    let dst = &mut pixels[(y as u32 * width + x as u32) as usize];
    let mix = |src: u8, dst: u8| (f32::from(src) * alpha + f32::from(dst) * (1.0 - alpha)).round() as u8;
    *dst = Color::rgba(
        mix(color.r, dst.r),
        mix(color.g, dst.g),
        mix(color.b, dst.b),
        (alpha * 255.0 + f32::from(dst.a) * (1.0 - alpha)).round() as u8,
    );
}

impl Canvas for Framebuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn color(&self) -> Color {
        self.color
    }

    fn set_font(&mut self, family: &str, weight: FontWeight, size: f32) {
        self.font = self.fonts.resolve(family, weight).map(|face| (face, size));
    }

    fn text_width(&self, text: &str) -> f32 {
        self.font
            .map_or(0.0, |(face, size)| self.fonts.text_width(face, size, text))
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32) {
        let Some((face, size)) = self.font else {
            return;
        };

        let Self { width, height, pixels, color, fonts, .. } = self;
        let baseline = y.round() as i32;
        let mut pen_x = x;

        for ch in text.chars() {
            let Some(glyph) = fonts.glyph(face, ch, size) else {
                return;
            };
            let metrics = &glyph.metrics;
            let origin_x = pen_x.round() as i32 + metrics.xmin;
            let origin_y = baseline - metrics.height as i32 - metrics.ymin;

            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let coverage = glyph.coverage[row * metrics.width + col];
                    if coverage > 0 {
                        blend(
                            pixels.as_mut_slice(),
                            *width,
                            *height,
                            origin_x + col as i32,
                            origin_y + row as i32,
                            *color,
                            f32::from(coverage) / 255.0,
                        );
                    }
                }
            }

            pen_x += metrics.advance_width;
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let x0 = x.round() as i32;
        let x1 = (x + width).round() as i32;
        let y0 = y.round() as i32;
        let y1 = (y + height).round() as i32;

        for row in y0.max(0)..y1.min(self.height as i32) {
            self.blend_span(row, x0.max(0), x1.min(self.width as i32));
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32) {
        if radius <= 0.0 {
            return;
        }

        let y0 = (cy - radius).floor().max(0.0) as i32;
        let y1 = (cy + radius).ceil().min(self.height as f32) as i32;

        for row in y0..y1 {
            let dy = row as f32 + 0.5 - cy;
            if dy.abs() > radius {
                continue;
            }
            let half = (radius * radius - dy * dy).sqrt();
            let x0 = (cx - half).round().max(0.0) as i32;
            let x1 = (cx + half).round().min(self.width as f32) as i32;
            self.blend_span(row, x0, x1);
        }
    }

    fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, thickness: f32) {
        let half = thickness.max(1.0) / 2.0;
        let outer = radius + half;
        let inner = (radius - half).max(0.0);

        self.blend_where((cx - outer, cy - outer), (cx + outer, cy + outer), |px, py| {
            let d = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
            d >= inner && d <= outer
        });
    }

    fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, thickness: f32) {
        let half = thickness.max(1.0) / 2.0;
        let (dx, dy) = (x1 - x0, y1 - y0);
        let len_sq = dx * dx + dy * dy;

        let min = (x0.min(x1) - half, y0.min(y1) - half);
        let max = (x0.max(x1) + half, y0.max(y1) + half);

        self.blend_where(min, max, |px, py| {
            let t = if len_sq > 0.0 {
                (((px - x0) * dx + (py - y0) * dy) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let (nx, ny) = (x0 + t * dx, y0 + t * dy);
            (px - nx).powi(2) + (py - ny).powi(2) <= half * half
        });
    }
}
