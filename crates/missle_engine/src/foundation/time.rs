//! Time management utilities
//!
//! Game logic runs in *ticks*: one tick is one nominal frame at the configured
//! rate (60 per second by default). Update code receives elapsed time as a
//! tick count, so `1.0` means "one frame's worth of simulation".

use std::time::{Duration, Instant};

/// Default simulation rate in ticks per second
pub const DEFAULT_TICKS_PER_SECOND: u32 = 60;

/// Accumulates wall-clock time and converts it into ticks
///
/// The clock only releases time once at least one whole tick has built up.
/// It then hands out everything accumulated so far (capped so that a long
/// stall does not produce one enormous step) and starts over from zero.
#[derive(Debug, Clone)]
pub struct TickClock {
    ticks_per_second: f64,
    max_ticks_per_update: f32,
    accumulated: f64,
    last_instant: Instant,
}

impl TickClock {
    /// Create a new clock
    pub fn new(ticks_per_second: u32, max_ticks_per_update: f32) -> Self {
        Self {
            ticks_per_second: f64::from(ticks_per_second.max(1)),
            max_ticks_per_update: max_ticks_per_update.max(1.0),
            accumulated: 0.0,
            last_instant: Instant::now(),
        }
    }

    /// Sample the wall clock and return the ticks to simulate, if any
    pub fn advance(&mut self) -> Option<f32> {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_instant);
        self.last_instant = now;
        self.advance_by(elapsed)
    }

    /// Feed an explicit elapsed duration into the clock
    pub fn advance_by(&mut self, elapsed: Duration) -> Option<f32> {
        self.accumulated += elapsed.as_secs_f64() * self.ticks_per_second;

        if self.accumulated >= 1.0 {
            let ticks = (self.accumulated as f32).min(self.max_ticks_per_update);
            self.accumulated = 0.0;
            Some(ticks)
        } else {
            None
        }
    }

    /// Ticks accumulated but not yet handed out
    pub fn pending_ticks(&self) -> f64 {
        self.accumulated
    }

    /// Duration of a single tick
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.ticks_per_second)
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(DEFAULT_TICKS_PER_SECOND, 5.0)
    }
}

/// Counts presented frames and reports them once per second
pub struct FpsCounter {
    window_start: Instant,
    frames_in_window: u32,
    current_fps: u32,
    frame_count: u64,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    /// Create a new counter
    pub fn new() -> Self {
        Self {
            window_start: Instant::now(),
            frames_in_window: 0,
            current_fps: 0,
            frame_count: 0,
        }
    }

    /// Record one presented frame
    pub fn record_frame(&mut self) {
        self.record_frame_at(Instant::now());
    }

    /// Record one presented frame at the given instant
    pub fn record_frame_at(&mut self, now: Instant) {
        self.frames_in_window += 1;
        self.frame_count += 1;

        if now.duration_since(self.window_start) >= Duration::from_secs(1) {
            self.current_fps = self.frames_in_window;
            self.frames_in_window = 0;
            self.window_start = now;
        }
    }

    /// Frames presented during the last full second
    pub fn current_fps(&self) -> u32 {
        self.current_fps
    }

    /// Total frames recorded
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clock_waits_for_a_full_tick() {
        let mut clock = TickClock::new(60, 5.0);
        assert_eq!(clock.advance_by(Duration::from_millis(10)), None);
        assert!(clock.pending_ticks() > 0.5);

        let ticks = clock.advance_by(Duration::from_millis(10)).unwrap();
        assert_relative_eq!(ticks, 1.2, epsilon = 1e-4);
        assert_eq!(clock.pending_ticks(), 0.0);
    }

    #[test]
    fn test_clock_caps_long_stalls() {
        let mut clock = TickClock::new(60, 5.0);
        let ticks = clock.advance_by(Duration::from_secs(2)).unwrap();
        assert_eq!(ticks, 5.0);
        assert_eq!(clock.advance_by(Duration::ZERO), None);
    }

    #[test]
    fn test_one_second_is_sixty_ticks() {
        let mut clock = TickClock::new(60, 120.0);
        let ticks = clock.advance_by(Duration::from_secs(1)).unwrap();
        assert_relative_eq!(ticks, 60.0, epsilon = 1e-3);
    }

    #[test]
    fn test_tick_duration() {
        let clock = TickClock::new(50, 5.0);
        assert_eq!(clock.tick_duration(), Duration::from_millis(20));
    }

    #[test]
    fn test_fps_counter_rolls_over_each_second() {
        let start = Instant::now();
        let mut counter = FpsCounter::new();
        for i in 0..30 {
            counter.record_frame_at(start + Duration::from_millis(i * 10));
        }
        assert_eq!(counter.current_fps(), 0);

        counter.record_frame_at(start + Duration::from_millis(1_100));
        assert_eq!(counter.current_fps(), 31);
        assert_eq!(counter.frame_count(), 31);
    }
}
