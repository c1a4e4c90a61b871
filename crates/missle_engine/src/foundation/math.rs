//! Math utilities and types
//!
//! Screen space is y-down with the origin at the top-left corner.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Scale a 2D vector component-wise in place
pub fn damp(v: &mut Vec2, factor: f32) {
    v.x *= factor;
    v.y *= factor;
}
