//! RGBA colors

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// 8-bit-per-channel RGBA color
///
/// The layout matches the framebuffer's pixel format, so a `&[Color]` can be
/// uploaded as raw bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel (255 = opaque)
    pub a: u8,
}

impl Color {
    /// Opaque white
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque red
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Gold used for "perfect" feedback
    pub const GOLD: Self = Self::rgb(255, 215, 0);

    /// Opaque color from RGB components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from RGBA components
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same RGB with the alpha channel replaced by `alpha` in `[0, 1]`
    ///
    /// Values outside the range are clamped.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { a: unit_to_byte(alpha), ..self }
    }

    /// Same RGB with the current alpha scaled by `factor` in `[0, 1]`
    pub fn fade(self, factor: f32) -> Self {
        Self {
            a: (f32::from(self.a) * factor.clamp(0.0, 1.0)) as u8,
            ..self
        }
    }

    /// Alpha as a normalized float
    pub fn alpha_f32(self) -> f32 {
        f32::from(self.a) / 255.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

fn unit_to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_alpha_replaces_channel() {
        let c = Color::rgba(10, 20, 30, 99).with_alpha(1.0);
        assert_eq!(c, Color::rgba(10, 20, 30, 255));
        assert_eq!(Color::RED.with_alpha(0.5).a, 127);
    }

    #[test]
    fn test_with_alpha_clamps() {
        assert_eq!(Color::WHITE.with_alpha(-0.25).a, 0);
        assert_eq!(Color::WHITE.with_alpha(3.0).a, 255);
    }

    #[test]
    fn test_fade_scales_existing_alpha() {
        let smoke = Color::rgba(80, 80, 80, 150);
        assert_eq!(smoke.fade(0.5).a, 75);
        assert_eq!(smoke.fade(0.0).a, 0);
    }

    #[test]
    fn test_byte_layout() {
        let pixels = [Color::rgba(1, 2, 3, 4), Color::rgba(5, 6, 7, 8)];
        let bytes: &[u8] = bytemuck::cast_slice(&pixels);
        assert_eq!(bytes, &[1, 2, 3, 4, 5, 6, 7, 8]);
    }
}
