//! Particles and the pooled particle system

use missle_engine::foundation::math::{damp, Vec2};
use missle_engine::render::{Canvas, Color};

use super::Effect;

/// Downward acceleration for sparks and explosions, pixels per tick squared
const GRAVITY: f32 = 0.2;
/// Velocity multiplier applied on every update
const DRAG: f32 = 0.98;
/// Ring stroke width of explosion particles
const EXPLOSION_STROKE: f32 = 3.0;
/// Widest trail stroke
const MAX_TRAIL_STROKE: f32 = 9.5;

/// Default live particle cap
pub const DEFAULT_MAX_PARTICLES: usize = 300;
/// Dead particles kept around for reuse
pub const POOL_CAPACITY: usize = 300;

/// How a particle moves and looks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    /// Small dot that falls
    Spark,
    /// Streak drawn behind the particle along its velocity
    Trail,
    /// Expanding ring that falls
    Explosion,
    /// Growing filled circle
    Dodge,
    /// Large, soft, growing puff
    Smoke,
}

impl ParticleKind {
    fn has_gravity(self) -> bool {
        matches!(self, Self::Spark | Self::Explosion)
    }
}

/// A single particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    position: Vec2,
    velocity: Vec2,
    color: Color,
    size: f32,
    kind: ParticleKind,
    remaining: f32,
    max_lifetime: f32,
    progress: f32,
    expansion: f32,
}

impl Particle {
    /// Create a particle living for `lifetime` ticks
    pub fn new(position: Vec2, velocity: Vec2, color: Color, lifetime: f32, size: f32, kind: ParticleKind) -> Self {
        let mut particle = Self {
            position,
            velocity,
            color,
            size,
            kind,
            remaining: lifetime,
            max_lifetime: lifetime,
            progress: 0.0,
            expansion: 0.0,
        };
        particle.refresh_cache();
        particle
    }

    /// Reinitialize a pooled particle in place
    pub fn reset(&mut self, position: Vec2, velocity: Vec2, color: Color, lifetime: f32, size: f32, kind: ParticleKind) {
        *self = Self::new(position, velocity, color, lifetime, size, kind);
    }

    /// Advance by `delta_ticks`
    pub fn update(&mut self, delta_ticks: f32) {
        self.position += self.velocity * delta_ticks;
        if self.kind.has_gravity() {
            self.velocity.y += GRAVITY * delta_ticks;
        }

        self.remaining -= delta_ticks;
        damp(&mut self.velocity, DRAG);
        self.refresh_cache();
    }

    fn refresh_cache(&mut self) {
        self.progress = if self.max_lifetime > 0.0 {
            1.0 - self.remaining / self.max_lifetime
        } else {
            1.0
        };

        self.expansion = match self.kind {
            ParticleKind::Smoke => self.size * (1.5 + self.progress * 2.5),
            ParticleKind::Dodge => self.size * (1.0 + self.progress),
            ParticleKind::Explosion => self.size * (1.0 + self.progress * 2.0),
            ParticleKind::Spark | ParticleKind::Trail => self.size,
        };
    }

    /// Whether any lifetime is left
    pub fn is_alive(&self) -> bool {
        self.remaining > 0.0
    }

    /// Opacity, 1 when spawned and 0 when dead
    pub fn alpha(&self) -> f32 {
        if self.max_lifetime > 0.0 {
            (self.remaining / self.max_lifetime).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Fraction of the lifetime used up
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Diameter of growing kinds at the current progress
    pub fn expansion_size(&self) -> f32 {
        self.expansion
    }

    /// Current position
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Current velocity
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Particle kind
    pub fn kind(&self) -> ParticleKind {
        self.kind
    }

    /// Draw according to kind
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let alpha = self.alpha();
        let x = self.position.x;
        let y = self.position.y;

        match self.kind {
            ParticleKind::Spark => {
                canvas.set_color(self.color.fade(alpha));
                canvas.fill_circle(x, y, self.size / 2.0);
            }
            ParticleKind::Trail => {
                let length = (self.size * 2.0).trunc();
                let thickness = ((self.size * 2.0).trunc() * 0.5).clamp(0.0, MAX_TRAIL_STROKE);
                canvas.set_color(self.color.fade(alpha));
                canvas.draw_line(x, y, x - self.velocity.x * length, y - self.velocity.y * length, thickness);
            }
            ParticleKind::Explosion => {
                canvas.set_color(self.color.fade(alpha));
                canvas.stroke_circle(x, y, self.expansion / 2.0, EXPLOSION_STROKE);
            }
            ParticleKind::Dodge => {
                canvas.set_color(self.color.fade(alpha));
                canvas.fill_circle(x, y, self.expansion / 2.0);
            }
            ParticleKind::Smoke => {
                canvas.set_color(self.color.fade(alpha * 0.3));
                canvas.fill_circle(x, y, self.expansion * 0.7);
                canvas.set_color(self.color.fade(alpha * 0.6));
                canvas.fill_circle(x, y, self.expansion / 2.0);
            }
        }
    }
}

impl Effect for Particle {
    fn update(&mut self, delta_ticks: f32) {
        Self::update(self, delta_ticks);
    }

    fn is_done(&self) -> bool {
        !self.is_alive()
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        Self::draw(self, canvas);
    }
}

/// Live particles plus a pool of dead ones for reuse
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    live: Vec<Particle>,
    pool: Vec<Particle>,
    max_particles: usize,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PARTICLES)
    }
}

impl ParticleSystem {
    /// Create a system holding at most `max_particles` live particles
    pub fn new(max_particles: usize) -> Self {
        Self {
            live: Vec::with_capacity(max_particles),
            pool: Vec::new(),
            max_particles,
        }
    }

    /// Spawn a particle, reusing a pooled one when possible
    ///
    /// Returns `false` and drops the request when the cap is reached.
    pub fn spawn(
        &mut self,
        position: Vec2,
        velocity: Vec2,
        color: Color,
        lifetime: f32,
        size: f32,
        kind: ParticleKind,
    ) -> bool {
        if self.live.len() >= self.max_particles {
            return false;
        }

        let particle = match self.pool.pop() {
            Some(mut recycled) => {
                recycled.reset(position, velocity, color, lifetime, size, kind);
                recycled
            }
            None => Particle::new(position, velocity, color, lifetime, size, kind),
        };
        self.live.push(particle);
        true
    }

    /// Update every live particle and retire the dead ones to the pool
    pub fn update(&mut self, delta_ticks: f32) {
        for particle in &mut self.live {
            particle.update(delta_ticks);
        }

        let mut i = 0;
        while i < self.live.len() {
            if self.live[i].is_alive() {
                i += 1;
            } else {
                let dead = self.live.swap_remove(i);
                if self.pool.len() < POOL_CAPACITY {
                    self.pool.push(dead);
                }
            }
        }
    }

    /// Draw every live particle
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for particle in &self.live {
            particle.draw(canvas);
        }
    }

    /// Retire every live particle
    pub fn clear(&mut self) {
        let room = POOL_CAPACITY.saturating_sub(self.pool.len());
        let keep = self.live.len().min(room);
        self.pool.extend(self.live.drain(..).take(keep));
    }

    /// Live particles
    pub fn particles(&self) -> &[Particle] {
        &self.live
    }

    /// Number of live particles
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Whether no particle is live
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Number of pooled particles
    pub fn pooled(&self) -> usize {
        self.pool.len()
    }

    /// Live particle cap
    pub fn max_particles(&self) -> usize {
        self.max_particles
    }
}
