//! Floating combat text
//!
//! A [`DamageNumber`] rises from where it was spawned, slows down and fades
//! out over one second (60 ticks).

use missle_engine::render::{Canvas, Color, FontWeight};

use super::Effect;

/// Initial vertical velocity in pixels per tick (negative is up)
const INITIAL_VELOCITY: f32 = -2.0;
/// Velocity multiplier applied on every update
const DRAG: f32 = 0.95;
/// Lifetime in ticks
const MAX_AGE: f32 = 60.0;
/// Font family the text is drawn in
const FONT_FAMILY: &str = "Arial";

/// Rising, fading text
#[derive(Debug, Clone, PartialEq)]
pub struct DamageNumber {
    text: String,
    x: f32,
    y: f32,
    vy: f32,
    age: f32,
    max_age: f32,
    color: Color,
    font_size: f32,
}

impl DamageNumber {
    /// Spawn text centered on `x` with its baseline at `y`
    ///
    /// Nothing is validated; a zero or negative `font_size` is handed to the
    /// canvas as is.
    pub fn new(text: impl Into<String>, x: f32, y: f32, color: Color, font_size: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            vy: INITIAL_VELOCITY,
            age: 0.0,
            max_age: MAX_AGE,
            color,
            font_size,
        }
    }

    /// Move, slow down and age by `delta_ticks`
    ///
    /// Age keeps growing after expiry; owners stop calling this once
    /// [`is_done`](Self::is_done) is true.
    pub fn update(&mut self, delta_ticks: f32) {
        self.y += self.vy * delta_ticks;
        self.vy *= DRAG;
        self.age += delta_ticks;
    }

    /// Whether the lifetime is used up
    pub fn is_done(&self) -> bool {
        self.age >= self.max_age
    }

    /// Opacity from 1 at spawn down to 0 at expiry
    pub fn alpha(&self) -> f32 {
        1.0 - self.age / self.max_age
    }

    /// Draw the text horizontally centered on its position
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.set_color(self.color.with_alpha(self.alpha()));
        canvas.set_font(FONT_FAMILY, FontWeight::Bold, self.font_size);

        let width = canvas.text_width(&self.text);
        canvas.draw_text(&self.text, (self.x - width / 2.0).trunc(), self.y.trunc());
    }

    /// Displayed text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current position
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Current vertical velocity
    pub fn vertical_velocity(&self) -> f32 {
        self.vy
    }

    /// Ticks lived so far
    pub fn age(&self) -> f32 {
        self.age
    }

    /// Base color; alpha is replaced when drawing
    pub fn color(&self) -> Color {
        self.color
    }

    /// Font size in pixels
    pub fn font_size(&self) -> f32 {
        self.font_size
    }
}

impl Effect for DamageNumber {
    fn update(&mut self, delta_ticks: f32) {
        Self::update(self, delta_ticks);
    }

    fn is_done(&self) -> bool {
        Self::is_done(self)
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        Self::draw(self, canvas);
    }
}
