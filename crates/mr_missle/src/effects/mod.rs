//! Short-lived visual effects
//!
//! Effects never remove themselves. Whoever owns them (usually an
//! [`EffectList`]) asks [`Effect::is_done`] after every update and drops the
//! ones that report true, so a finished effect is never drawn.

pub mod damage_number;
pub mod particle;

pub use damage_number::DamageNumber;
pub use particle::{Particle, ParticleKind, ParticleSystem};

use missle_engine::render::Canvas;

/// Something that animates for a while and then expires
pub trait Effect {
    /// Advance by `delta_ticks` ticks
    fn update(&mut self, delta_ticks: f32);

    /// Whether the effect has expired and should be discarded
    fn is_done(&self) -> bool;

    /// Draw the current state
    fn draw(&self, canvas: &mut dyn Canvas);
}

/// Owning collection of live effects
///
/// Keeps insertion order, which is also draw order.
#[derive(Debug, Clone)]
pub struct EffectList<E> {
    effects: Vec<E>,
}

impl<E> Default for EffectList<E> {
    fn default() -> Self {
        Self { effects: Vec::new() }
    }
}

impl<E: Effect> EffectList<E> {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a new effect
    pub fn push(&mut self, effect: E) {
        self.effects.push(effect);
    }

    /// Update every live effect, then evict the ones that are done
    pub fn update(&mut self, delta_ticks: f32) {
        for effect in &mut self.effects {
            effect.update(delta_ticks);
        }
        self.effects.retain(|effect| !effect.is_done());
    }

    /// Draw every live effect in insertion order
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for effect in &self.effects {
            effect.draw(canvas);
        }
    }

    /// Drop every effect
    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Number of live effects
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Iterate over live effects
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.effects.iter()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Canvas that records calls instead of drawing

    use missle_engine::render::{Canvas, Color, FontWeight};

    /// One recorded drawing call
    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Clear(Color),
        Text { text: String, x: f32, y: f32, color: Color, font: (String, FontWeight, f32) },
        Rect { x: f32, y: f32, width: f32, height: f32, color: Color },
        Circle { cx: f32, cy: f32, radius: f32, color: Color },
        Ring { cx: f32, cy: f32, radius: f32, thickness: f32, color: Color },
        Line { from: (f32, f32), to: (f32, f32), thickness: f32, color: Color },
    }

    /// Every character is `CHAR_WIDTH` pixels wide regardless of font
    pub const CHAR_WIDTH: f32 = 8.0;

    pub struct RecordingCanvas {
        pub calls: Vec<Call>,
        color: Color,
        font: (String, FontWeight, f32),
    }

    impl RecordingCanvas {
        pub fn new() -> Self {
            Self {
                calls: Vec::new(),
                color: Color::WHITE,
                font: (String::new(), FontWeight::Regular, 0.0),
            }
        }

        pub fn texts(&self) -> Vec<&Call> {
            self.calls.iter().filter(|c| matches!(c, Call::Text { .. })).collect()
        }
    }

    impl Canvas for RecordingCanvas {
        fn size(&self) -> (u32, u32) {
            (800, 600)
        }

        fn clear(&mut self, color: Color) {
            self.calls.push(Call::Clear(color));
        }

        fn set_color(&mut self, color: Color) {
            self.color = color;
        }

        fn color(&self) -> Color {
            self.color
        }

        fn set_font(&mut self, family: &str, weight: FontWeight, size: f32) {
            self.font = (family.to_string(), weight, size);
        }

        fn text_width(&self, text: &str) -> f32 {
            text.chars().count() as f32 * CHAR_WIDTH
        }

        fn draw_text(&mut self, text: &str, x: f32, y: f32) {
            self.calls.push(Call::Text {
                text: text.to_string(),
                x,
                y,
                color: self.color,
                font: self.font.clone(),
            });
        }

        fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
            self.calls.push(Call::Rect { x, y, width, height, color: self.color });
        }

        fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32) {
            self.calls.push(Call::Circle { cx, cy, radius, color: self.color });
        }

        fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, thickness: f32) {
            self.calls.push(Call::Ring { cx, cy, radius, thickness, color: self.color });
        }

        fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, thickness: f32) {
            self.calls.push(Call::Line { from: (x0, y0), to: (x1, y1), thickness, color: self.color });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingCanvas;
    use super::*;

    /// Expires after a fixed number of updates and records how often it was updated
    struct Countdown {
        left: u32,
        updates: u32,
    }

    impl Effect for Countdown {
        fn update(&mut self, _delta_ticks: f32) {
            self.left = self.left.saturating_sub(1);
            self.updates += 1;
        }

        fn is_done(&self) -> bool {
            self.left == 0
        }

        fn draw(&self, canvas: &mut dyn Canvas) {
            canvas.fill_rect(0.0, 0.0, self.left as f32, 1.0);
        }
    }

    #[test]
    fn test_update_evicts_exactly_the_done_effects() {
        let mut list = EffectList::new();
        list.push(Countdown { left: 1, updates: 0 });
        list.push(Countdown { left: 3, updates: 0 });
        list.push(Countdown { left: 2, updates: 0 });

        list.update(1.0);
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|e| !e.is_done()));

        list.update(1.0);
        assert_eq!(list.len(), 1);
        assert_eq!(list.iter().next().map(|e| e.updates), Some(2));

        list.update(1.0);
        assert!(list.is_empty());
    }

    #[test]
    fn test_draw_in_insertion_order() {
        let mut list = EffectList::new();
        list.push(Countdown { left: 5, updates: 0 });
        list.push(Countdown { left: 7, updates: 0 });

        let mut canvas = RecordingCanvas::new();
        list.draw(&mut canvas);

        let widths: Vec<f32> = canvas
            .calls
            .iter()
            .filter_map(|c| match c {
                testing::Call::Rect { width, .. } => Some(*width),
                _ => None,
            })
            .collect();
        assert_eq!(widths, vec![5.0, 7.0]);
    }

    #[test]
    fn test_clear() {
        let mut list = EffectList::new();
        list.push(Countdown { left: 5, updates: 0 });
        list.clear();
        assert!(list.is_empty());
    }
}
