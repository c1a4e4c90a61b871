//! Graze combo tracking
//!
//! Every graze adds to the combo and restarts its timer. Letting the timer
//! run out drops the combo back to zero. Crossing a milestone shows a short
//! announcement.

/// Combo lifetime without a new graze, in ticks
const BASE_TIMEOUT: f32 = 180.0;
/// How long a milestone announcement stays up, in ticks
pub const ANNOUNCEMENT_DURATION: f32 = 90.0;
/// Multiplier gained per combo level, up to [`MULTIPLIER_COMBO_CAP`] levels
const MULTIPLIER_PER_LEVEL: f64 = 0.05;
const MULTIPLIER_COMBO_CAP: u32 = 50;
const CLOSE_CALL_BONUS: f64 = 0.02;
const PERFECT_DODGE_BONUS: f64 = 0.05;

/// Combo thresholds and their announcements, ascending
pub const MILESTONES: [(u32, &str); 7] = [
    (10, "NICE!"),
    (25, "GREAT!"),
    (50, "AMAZING!"),
    (100, "INCREDIBLE!"),
    (200, "LEGENDARY!"),
    (500, "GODLIKE!"),
    (1000, "IMPOSSIBLE!"),
];

/// Combo state
#[derive(Debug, Clone, PartialEq)]
pub struct ComboSystem {
    combo: u32,
    max_combo: u32,
    timer: f32,
    timeout: f32,
    multiplier: f64,
    close_calls: u32,
    perfect_dodges: u32,
    graze_value: u32,
    announcement: Option<&'static str>,
    announcement_timer: f32,
}

impl Default for ComboSystem {
    fn default() -> Self {
        Self {
            combo: 0,
            max_combo: 0,
            timer: 0.0,
            timeout: BASE_TIMEOUT,
            multiplier: 1.0,
            close_calls: 0,
            perfect_dodges: 0,
            graze_value: 0,
            announcement: None,
            announcement_timer: 0.0,
        }
    }
}

impl ComboSystem {
    /// Create an empty combo
    pub fn new() -> Self {
        Self::default()
    }

    /// Count down the combo and announcement timers
    ///
    /// `timeout_multiplier` scales how long a combo survives without a graze.
    pub fn update(&mut self, delta_ticks: f32, timeout_multiplier: f32) {
        self.timeout = (BASE_TIMEOUT * timeout_multiplier).floor();

        if self.combo > 0 {
            self.timer -= delta_ticks;
            if self.timer <= 0.0 {
                log::debug!("Combo of {} expired", self.combo);
                self.reset();
            }
        }

        self.multiplier = 1.0
            + f64::from(self.combo.min(MULTIPLIER_COMBO_CAP)) * MULTIPLIER_PER_LEVEL
            + f64::from(self.close_calls) * CLOSE_CALL_BONUS
            + f64::from(self.perfect_dodges) * PERFECT_DODGE_BONUS;

        if self.announcement_timer > 0.0 {
            self.announcement_timer -= delta_ticks;
            if self.announcement_timer <= 0.0 {
                self.announcement = None;
            }
        }
    }

    /// Add a graze worth `value`
    ///
    /// Returns the milestone crossed by this graze, if any. When one graze
    /// crosses several milestones only the highest is announced.
    pub fn add(&mut self, value: u32, close_call: bool, perfect_dodge: bool) -> Option<u32> {
        let previous = self.combo;
        self.combo += value;
        self.graze_value += value;

        if close_call {
            self.close_calls += 1;
        }
        if perfect_dodge {
            self.perfect_dodges += 1;
        }

        self.max_combo = self.max_combo.max(self.combo);
        self.timer = self.timeout;

        let &(threshold, message) = MILESTONES
            .iter()
            .rev()
            .find(|(threshold, _)| self.combo >= *threshold && previous < *threshold)?;
        self.announcement = Some(message);
        self.announcement_timer = ANNOUNCEMENT_DURATION;
        log::info!("Combo milestone {}: {}", threshold, message);
        Some(threshold)
    }

    /// Drop the current combo; the best combo is kept
    pub fn reset(&mut self) {
        self.combo = 0;
        self.timer = 0.0;
        self.multiplier = 1.0;
        self.close_calls = 0;
        self.perfect_dodges = 0;
        self.graze_value = 0;
    }

    /// Current combo
    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// Best combo so far
    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    /// Score multiplier as of the last update
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Remaining combo time as a fraction of the timeout
    pub fn timeout_progress(&self) -> f32 {
        if self.combo == 0 {
            0.0
        } else {
            self.timer / self.timeout
        }
    }

    /// Ticks left before the combo expires
    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Current timeout in ticks
    pub fn timeout(&self) -> f32 {
        self.timeout
    }

    /// Active milestone announcement
    pub fn announcement(&self) -> Option<&'static str> {
        self.announcement
    }

    /// Ticks left on the active announcement
    pub fn announcement_timer(&self) -> f32 {
        self.announcement_timer
    }

    /// Close calls in the current combo
    pub fn close_calls(&self) -> u32 {
        self.close_calls
    }

    /// Perfect dodges in the current combo
    pub fn perfect_dodges(&self) -> u32 {
        self.perfect_dodges
    }

    /// Total graze value of the current combo
    pub fn graze_value(&self) -> u32 {
        self.graze_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_add_and_max() {
        let mut combo = ComboSystem::new();
        assert_eq!(combo.add(2, true, false), None);
        assert_eq!(combo.add(1, false, false), None);
        assert_eq!(combo.combo(), 3);
        assert_eq!(combo.graze_value(), 3);
        assert_eq!(combo.close_calls(), 1);
        assert_eq!(combo.max_combo(), 3);
        assert_eq!(combo.timer(), 180.0);

        combo.reset();
        assert_eq!(combo.combo(), 0);
        assert_eq!(combo.max_combo(), 3);
        assert_eq!(combo.multiplier(), 1.0);
    }

    #[test]
    fn test_milestone_announcement_expires() {
        let mut combo = ComboSystem::new();
        for _ in 0..9 {
            assert_eq!(combo.add(1, false, false), None);
        }
        assert_eq!(combo.add(1, false, false), Some(10));
        assert_eq!(combo.announcement(), Some("NICE!"));

        for _ in 0..89 {
            combo.update(1.0, 1.0);
        }
        assert_eq!(combo.announcement(), Some("NICE!"));
        combo.update(1.0, 1.0);
        assert_eq!(combo.announcement(), None);
    }

    #[test]
    fn test_highest_crossed_milestone_wins() {
        let mut combo = ComboSystem::new();
        combo.add(5, false, true);
        assert_eq!(combo.add(50, false, true), Some(50));
        assert_eq!(combo.announcement(), Some("AMAZING!"));

        // Already past 50, no repeat
        assert_eq!(combo.add(1, false, false), None);
    }

    #[test]
    fn test_combo_times_out() {
        let mut combo = ComboSystem::new();
        combo.add(1, false, false);
        for _ in 0..179 {
            combo.update(1.0, 1.0);
        }
        assert_eq!(combo.combo(), 1);
        assert_relative_eq!(combo.timeout_progress(), 1.0 / 180.0);

        combo.update(1.0, 1.0);
        assert_eq!(combo.combo(), 0);
        assert_eq!(combo.timeout_progress(), 0.0);
    }

    #[test]
    fn test_timeout_multiplier_scales_timeout() {
        let mut combo = ComboSystem::new();
        combo.update(1.0, 1.5);
        assert_eq!(combo.timeout(), 270.0);
        combo.add(1, false, false);
        assert_eq!(combo.timer(), 270.0);
    }

    #[test]
    fn test_multiplier_formula() {
        let mut combo = ComboSystem::new();
        combo.add(10, true, false);
        combo.add(5, false, true);
        combo.update(0.0, 1.0);
        assert_relative_eq!(combo.multiplier(), 1.0 + 15.0 * 0.05 + 0.02 + 0.05);

        // Combo part is capped at 50 levels
        combo.add(100, false, false);
        combo.update(0.0, 1.0);
        assert_relative_eq!(combo.multiplier(), 1.0 + 50.0 * 0.05 + 0.02 + 0.05);
    }
}
