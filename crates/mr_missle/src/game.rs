//! The game surface
//!
//! Owns every live effect, the combo and the score, and plugs into the engine
//! as its [`Application`].

use std::f32::consts::TAU;

use missle_engine::assets::ImageData;
use missle_engine::foundation::math::Vec2;
use missle_engine::input::KeyCode;
use missle_engine::render::{Canvas, Color, FontLibrary, FontWeight, WindowSettings};
use missle_engine::{AppError, Application, Engine, EngineConfig, EngineError, Frame};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::combo::{ComboSystem, ANNOUNCEMENT_DURATION};
use crate::config::{GameConfig, WINDOW_TITLE};
use crate::effects::{DamageNumber, EffectList, ParticleKind, ParticleSystem};

/// Screen shake below this is dropped to zero
const SHAKE_CUTOFF: f32 = 0.1;
const SHAKE_DECAY: f32 = 0.9;

const HIT_COLOR: Color = Color::rgb(255, 100, 100);
const IMPACT_WHITE: Color = Color::rgb(255, 255, 255);
const IMPACT_YELLOW: Color = Color::rgb(255, 255, 150);
const STARBURST_COLOR: Color = Color::rgba(255, 255, 200, 200);

/// Health the debug boss starts (and restarts) with
const DEBUG_BOSS_HEALTH: u32 = 10;

/// How close a bullet came to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GrazeTier {
    /// Bullet passed inside the graze radius
    Graze,
    /// Bullet passed inside the close-call radius
    CloseCall,
    /// Bullet passed inside the perfect-dodge radius
    PerfectDodge,
}

impl GrazeTier {
    /// Combo and score value
    pub fn value(self) -> u32 {
        match self {
            Self::Graze => 1,
            Self::CloseCall => 2,
            Self::PerfectDodge => 5,
        }
    }

    fn color(self) -> Color {
        match self {
            Self::Graze => Color::rgba(100, 200, 255, 200),
            Self::CloseCall => Color::rgba(150, 255, 150, 220),
            Self::PerfectDodge => Color::GOLD,
        }
    }

    fn trail_count(self) -> usize {
        match self {
            Self::Graze => 6,
            Self::CloseCall => 10,
            Self::PerfectDodge => 15,
        }
    }

    fn ring_size(self) -> f32 {
        match self {
            Self::Graze => 15.0,
            Self::CloseCall => 20.0,
            Self::PerfectDodge => 30.0,
        }
    }

    fn shake(self) -> f32 {
        match self {
            Self::Graze => 0.0,
            Self::CloseCall => 3.0,
            Self::PerfectDodge => 5.0,
        }
    }
}

/// The game
pub struct Game {
    config: GameConfig,
    damage_numbers: EffectList<DamageNumber>,
    particles: ParticleSystem,
    combo: ComboSystem,
    score: u64,
    screen_shake: f32,
    shake_offset: (f32, f32),
    boss_health: u32,
    rng: StdRng,
}

impl Game {
    /// Create a game from its configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a game with a fixed random seed
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        Self {
            particles: ParticleSystem::new(config.gameplay.max_particles),
            config,
            damage_numbers: EffectList::new(),
            combo: ComboSystem::new(),
            score: 0,
            screen_shake: 0.0,
            shake_offset: (0.0, 0.0),
            boss_health: DEBUG_BOSS_HEALTH,
            rng,
        }
    }

    /// Engine settings for this game's window
    pub fn engine_config(&self, icon: Option<ImageData>) -> EngineConfig {
        let window = &self.config.window;
        EngineConfig {
            window: WindowSettings {
                title: WINDOW_TITLE.to_string(),
                borderless: window.borderless,
                fullscreen: window.fullscreen,
                fallback_size: (window.fallback_width, window.fallback_height),
                vsync: window.vsync,
                icon,
            },
            timing: self.config.timing,
        }
    }

    /// Open the window and run until it is closed
    pub fn start(&mut self, fonts: FontLibrary, icon: Option<ImageData>) -> Result<(), EngineError> {
        let config = self.engine_config(icon);
        Engine::run(config, fonts, self)
    }

    /// Reward a bullet passing close to the player at (`x`, `y`)
    pub fn register_graze(&mut self, tier: GrazeTier, x: f32, y: f32) {
        let value = tier.value();
        self.combo.add(value, tier >= GrazeTier::CloseCall, tier == GrazeTier::PerfectDodge);

        let gained = (10.0 * f64::from(value) * self.combo.multiplier()).floor() as u64;
        self.score += gained;
        log::debug!("{:?} at ({:.0}, {:.0}): +{} score", tier, x, y, gained);

        self.screen_shake = self.screen_shake.max(tier.shake());

        if tier == GrazeTier::PerfectDodge {
            self.damage_numbers
                .push(DamageNumber::new("PERFECT!", x, y - 30.0, Color::GOLD, 24.0));
        }

        let color = tier.color();
        let (trail_size, spread) = if tier == GrazeTier::PerfectDodge { (6.0, 5.0) } else { (4.0, 3.0) };
        for _ in 0..tier.trail_count() {
            let origin = Vec2::new(x, y) + self.jitter(10.0, 10.0);
            let speed = 2.0 + self.rng.gen::<f32>() * spread;
            let velocity = self.random_direction() * speed;
            self.particles.spawn(origin, velocity, color, 20.0, trail_size, ParticleKind::Trail);
        }

        self.particles
            .spawn(Vec2::new(x, y), Vec2::zeros(), color, 15.0, tier.ring_size(), ParticleKind::Explosion);

        if tier == GrazeTier::PerfectDodge {
            for i in 0..8 {
                let angle = i as f32 / 8.0 * TAU;
                let velocity = Vec2::new(angle.cos(), angle.sin()) * 4.0;
                self.particles
                    .spawn(Vec2::new(x, y), velocity, STARBURST_COLOR, 25.0, 3.0, ParticleKind::Spark);
            }
        }
    }

    /// Show a boss taking a hit at (`x`, `y`)
    pub fn register_hit(&mut self, x: f32, y: f32, remaining_health: u32) {
        self.damage_numbers.push(DamageNumber::new(
            format!("HIT! HP: {}", remaining_health),
            x,
            y - 60.0,
            HIT_COLOR,
            36.0,
        ));
        self.screen_shake = self.screen_shake.max(5.0);

        let center = Vec2::new(x, y);
        for _ in 0..30 {
            let speed = 2.0 + self.rng.gen::<f32>() * 6.0;
            let velocity = self.random_direction() * speed;
            let color = if self.rng.gen_bool(0.5) { IMPACT_WHITE } else { IMPACT_YELLOW };
            self.particles.spawn(center, velocity, color, 20.0, 8.0, ParticleKind::Spark);
        }

        for _ in 0..8 {
            let origin = center + self.jitter(30.0, 20.0);
            let speed = 0.3 + self.rng.gen::<f32>() * 1.2;
            let velocity = self.random_direction() * speed;
            let gray = self.rng.gen_range(50..90);
            let lifetime = self.rng.gen_range(50.0..70.0);
            let size = 12.0 + self.rng.gen::<f32>() * 8.0;
            self.particles
                .spawn(origin, velocity, Color::rgba(gray, gray, gray, 120), lifetime, size, ParticleKind::Smoke);
        }

        self.particles
            .spawn(center, Vec2::zeros(), HIT_COLOR, 15.0, 30.0, ParticleKind::Explosion);
    }

    fn random_direction(&mut self) -> Vec2 {
        let angle = self.rng.gen::<f32>() * TAU;
        Vec2::new(angle.cos(), angle.sin())
    }

    /// Random offset within a `width` x `height` box centered on zero
    fn jitter(&mut self, width: f32, height: f32) -> Vec2 {
        Vec2::new(
            (self.rng.gen::<f32>() - 0.5) * width,
            (self.rng.gen::<f32>() - 0.5) * height,
        )
    }

    fn handle_input(&mut self, frame: &mut Frame<'_>) {
        let input = frame.input();
        if input.was_key_pressed(KeyCode::Escape) {
            log::info!("Escape pressed, quitting");
            frame.request_quit();
            return;
        }

        if !self.config.gameplay.debug_input {
            return;
        }

        let (x, y) = input.cursor_position();
        let (x, y) = (x as f32, y as f32);
        let tiers = [
            (KeyCode::Num1, GrazeTier::Graze),
            (KeyCode::Num2, GrazeTier::CloseCall),
            (KeyCode::Num3, GrazeTier::PerfectDodge),
        ];
        let grazes: Vec<GrazeTier> = tiers
            .iter()
            .filter(|(key, _)| input.was_key_pressed(*key))
            .map(|&(_, tier)| tier)
            .collect();
        let hit = input.was_key_pressed(KeyCode::H);

        for tier in grazes {
            self.register_graze(tier, x, y);
        }
        if hit {
            self.boss_health = self.boss_health.saturating_sub(1);
            self.register_hit(x, y, self.boss_health);
            if self.boss_health == 0 {
                self.boss_health = DEBUG_BOSS_HEALTH;
            }
        }
    }

    fn update_shake(&mut self) {
        if self.screen_shake > 0.0 {
            self.shake_offset = (
                (self.rng.gen::<f32>() - 0.5) * self.screen_shake,
                (self.rng.gen::<f32>() - 0.5) * self.screen_shake,
            );
            self.screen_shake *= SHAKE_DECAY;
            if self.screen_shake < SHAKE_CUTOFF {
                self.screen_shake = 0.0;
            }
        } else {
            self.shake_offset = (0.0, 0.0);
        }
    }

    fn draw_combo(&self, canvas: &mut dyn Canvas) {
        if self.combo.combo() <= 1 {
            return;
        }

        let (width, _) = canvas.size();
        let (dx, dy) = self.shake_offset;
        let left = width as f32 - 250.0 + dx;
        let top = 100.0 + dy;

        canvas.set_color(Color::rgba(0, 0, 0, 180));
        canvas.fill_rect(left, top, 200.0, 80.0);

        let combo_text = format!("{}x", self.combo.combo());
        canvas.set_font("Arial", FontWeight::Bold, 48.0);
        canvas.set_color(self.config.palette.hud_text);
        let text_width = canvas.text_width(&combo_text);
        canvas.draw_text(&combo_text, (left + (200.0 - text_width) / 2.0).trunc(), top + 45.0);

        let multiplier_text = format!("{:.1}x Score", self.combo.multiplier());
        canvas.set_font("Arial", FontWeight::Regular, 14.0);
        let text_width = canvas.text_width(&multiplier_text);
        canvas.draw_text(&multiplier_text, (left + (200.0 - text_width) / 2.0).trunc(), top + 65.0);

        canvas.set_color(Color::rgb(60, 60, 60));
        canvas.fill_rect(left + 10.0, top + 72.0, 180.0, 3.0);
        canvas.set_color(CLOSE_CALL_GREEN);
        canvas.fill_rect(left + 10.0, top + 72.0, (180.0 * self.combo.timeout_progress()).trunc(), 3.0);
    }

    fn draw_dodge_counts(&self, canvas: &mut dyn Canvas) {
        let perfect = self.combo.perfect_dodges();
        let close = self.combo.close_calls();
        if perfect == 0 && close == 0 {
            return;
        }

        let (width, _) = canvas.size();
        let (dx, dy) = self.shake_offset;
        let left = width as f32 - 240.0 + dx;
        let mut y = if self.combo.combo() > 1 { 200.0 } else { 114.0 } + dy;

        canvas.set_font("Arial", FontWeight::Bold, 14.0);
        if perfect > 0 {
            canvas.set_color(Color::GOLD);
            canvas.draw_text(&format!("PERFECT x{}", perfect), left, y);
            y += 18.0;
        }
        if close > 0 {
            canvas.set_color(CLOSE_CALL_GREEN);
            canvas.draw_text(&format!("CLOSE x{}", close), left, y);
        }
    }

    fn draw_announcement(&self, canvas: &mut dyn Canvas) {
        let Some(message) = self.combo.announcement() else {
            return;
        };

        let progress = self.combo.announcement_timer() / ANNOUNCEMENT_DURATION;
        let scale = if progress > 0.8 {
            (1.0 - progress) / 0.2 * 0.5 + 1.0
        } else {
            (1.5 - (0.8 - progress) * 0.25).min(1.5)
        };
        let alpha = (progress * 2.0).min(1.0);

        let (width, height) = canvas.size();
        let (dx, dy) = self.shake_offset;
        let center_x = width as f32 / 2.0 + dx;
        let center_y = (height / 3) as f32 + dy;

        canvas.set_font("Arial", FontWeight::Bold, 72.0 * scale);
        let left = (center_x - canvas.text_width(message) / 2.0).trunc();

        canvas.set_color(Color::BLACK.with_alpha(alpha * 180.0 / 255.0));
        canvas.draw_text(message, left + 4.0, center_y + 4.0);

        canvas.set_color(announcement_color(message).with_alpha(alpha));
        canvas.draw_text(message, left, center_y);
    }

    /// Current score
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Combo state
    pub fn combo(&self) -> &ComboSystem {
        &self.combo
    }

    /// Live damage numbers
    pub fn damage_numbers(&self) -> &EffectList<DamageNumber> {
        &self.damage_numbers
    }

    /// Live particles
    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    /// Current screen shake intensity
    pub fn screen_shake(&self) -> f32 {
        self.screen_shake
    }
}

const CLOSE_CALL_GREEN: Color = Color::rgb(163, 190, 140);

fn announcement_color(message: &str) -> Color {
    match message {
        "NICE!" => CLOSE_CALL_GREEN,
        "GREAT!" => Color::rgb(136, 192, 208),
        "AMAZING!" => Color::rgb(235, 203, 139),
        "INCREDIBLE!" => Color::rgb(208, 135, 112),
        "LEGENDARY!" => Color::rgb(180, 142, 173),
        "GODLIKE!" => Color::rgb(191, 97, 106),
        "IMPOSSIBLE!" => Color::GOLD,
        _ => Color::WHITE,
    }
}

impl Application for Game {
    fn initialize(&mut self, frame: &mut Frame<'_>) -> Result<(), AppError> {
        let (width, height) = frame.screen_size();
        if width == 0 || height == 0 {
            return Err(AppError::ScreenSize { width, height });
        }
        log::info!("Game surface ready at {}x{}", width, height);
        if self.config.gameplay.debug_input {
            log::info!("Debug keys: 1/2/3 graze, H hit, Escape quit");
        }
        Ok(())
    }

    fn update(&mut self, frame: &mut Frame<'_>, delta_ticks: f32) -> Result<(), AppError> {
        self.handle_input(frame);

        self.combo.update(delta_ticks, self.config.gameplay.combo_timeout_multiplier);
        self.damage_numbers.update(delta_ticks);
        self.particles.update(delta_ticks);
        self.update_shake();
        Ok(())
    }

    fn render(&mut self, canvas: &mut dyn Canvas) -> Result<(), AppError> {
        canvas.clear(self.config.palette.background);
        self.particles.draw(canvas);
        self.damage_numbers.draw(canvas);
        self.draw_combo(canvas);
        self.draw_dodge_counts(canvas);
        self.draw_announcement(canvas);
        Ok(())
    }

    fn cleanup(&mut self) {
        log::info!(
            "Final score {} (best combo {})",
            self.score,
            self.combo.max_combo()
        );
        self.damage_numbers.clear();
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::testing::{Call, RecordingCanvas};
    use missle_engine::input::InputManager;

    fn game() -> Game {
        Game::with_seed(GameConfig::default(), 7)
    }

    fn tick(game: &mut Game, input: &InputManager) -> bool {
        let mut frame = Frame::new(input, (800, 600));
        game.update(&mut frame, 1.0).unwrap();
        frame.quit_requested()
    }

    #[test]
    fn test_engine_config_is_borderless_fullscreen() {
        let config = game().engine_config(None);
        assert_eq!(config.window.title, "Mr. Missle");
        assert!(config.window.borderless);
        assert!(config.window.fullscreen);
        assert!(config.window.icon.is_none());
        assert_eq!(config.timing.ticks_per_second, 60);
    }

    #[test]
    fn test_perfect_dodge_rewards() {
        let mut game = game();
        game.register_graze(GrazeTier::PerfectDodge, 400.0, 300.0);

        assert_eq!(game.combo().combo(), 5);
        assert_eq!(game.combo().perfect_dodges(), 1);
        assert_eq!(game.combo().close_calls(), 1);
        assert_eq!(game.score(), 50);
        assert_eq!(game.screen_shake(), 5.0);

        let numbers: Vec<_> = game.damage_numbers().iter().collect();
        assert_eq!(numbers.len(), 1);
        assert_eq!(numbers[0].text(), "PERFECT!");
        assert_eq!(numbers[0].position(), (400.0, 270.0));
        assert_eq!(numbers[0].color(), Color::GOLD);
        assert_eq!(numbers[0].font_size(), 24.0);

        // 15 trails, one ring and an 8-spark starburst
        assert_eq!(game.particles().len(), 24);
    }

    #[test]
    fn test_plain_graze_has_no_text_or_shake() {
        let mut game = game();
        game.register_graze(GrazeTier::Graze, 10.0, 10.0);
        assert!(game.damage_numbers().is_empty());
        assert_eq!(game.screen_shake(), 0.0);
        assert_eq!(game.particles().len(), 7);
        assert_eq!(game.score(), 10);
    }

    #[test]
    fn test_score_uses_combo_multiplier() {
        let mut game = game();
        let input = InputManager::new();
        game.register_graze(GrazeTier::CloseCall, 0.0, 0.0);
        tick(&mut game, &input);

        // multiplier = 1 + 2 * 0.05 + 1 * 0.02
        let before = game.score();
        game.register_graze(GrazeTier::CloseCall, 0.0, 0.0);
        assert_eq!(game.score() - before, (10.0 * 2.0 * 1.12_f64).floor() as u64);
    }

    #[test]
    fn test_hit_shows_remaining_health() {
        let mut game = game();
        game.register_hit(500.0, 200.0, 7);

        let number = game.damage_numbers().iter().next().unwrap();
        assert_eq!(number.text(), "HIT! HP: 7");
        assert_eq!(number.position(), (500.0, 140.0));
        assert_eq!(number.color(), Color::rgb(255, 100, 100));
        assert_eq!(number.font_size(), 36.0);
    }

    #[test]
    fn test_damage_numbers_evicted_after_one_second() {
        let mut game = game();
        let input = InputManager::new();
        game.register_hit(0.0, 0.0, 3);

        for _ in 0..59 {
            tick(&mut game, &input);
        }
        assert_eq!(game.damage_numbers().len(), 1);
        tick(&mut game, &input);
        assert!(game.damage_numbers().is_empty());
    }

    #[test]
    fn test_particle_cap_from_config() {
        let mut config = GameConfig::default();
        config.gameplay.max_particles = 10;
        let mut game = Game::with_seed(config, 1);
        game.register_hit(0.0, 0.0, 1);
        assert_eq!(game.particles().len(), 10);
    }

    #[test]
    fn test_screen_shake_decays_to_zero() {
        let mut game = game();
        let input = InputManager::new();
        game.register_graze(GrazeTier::CloseCall, 0.0, 0.0);

        tick(&mut game, &input);
        assert!((game.screen_shake() - 2.7).abs() < 1e-5);

        for _ in 0..100 {
            tick(&mut game, &input);
        }
        assert_eq!(game.screen_shake(), 0.0);
    }

    #[test]
    fn test_debug_keys_and_escape() {
        let mut game = game();
        let mut input = InputManager::new();
        input.handle_mouse_move(120.0, 80.0);
        input.handle_key_input(KeyCode::Num3, true);
        assert!(!tick(&mut game, &input));
        input.end_frame();

        assert_eq!(game.combo().combo(), 5);
        let number = game.damage_numbers().iter().next().unwrap();
        assert_eq!(number.text(), "PERFECT!");

        input.handle_key_input(KeyCode::H, true);
        tick(&mut game, &input);
        input.end_frame();
        assert!(game.damage_numbers().iter().any(|n| n.text() == "HIT! HP: 9"));

        input.handle_key_input(KeyCode::Escape, true);
        assert!(tick(&mut game, &input));
    }

    #[test]
    fn test_debug_keys_can_be_disabled() {
        let mut config = GameConfig::default();
        config.gameplay.debug_input = false;
        let mut game = Game::with_seed(config, 3);
        let mut input = InputManager::new();
        input.handle_key_input(KeyCode::Num1, true);
        tick(&mut game, &input);
        assert_eq!(game.combo().combo(), 0);
    }

    #[test]
    fn test_render_order() {
        let mut game = game();
        for _ in 0..10 {
            game.register_graze(GrazeTier::Graze, 100.0, 100.0);
        }
        game.register_hit(300.0, 300.0, 4);

        let mut canvas = RecordingCanvas::new();
        game.render(&mut canvas).unwrap();

        assert_eq!(canvas.calls.first(), Some(&Call::Clear(game.config.palette.background)));

        let texts: Vec<String> = canvas
            .texts()
            .into_iter()
            .filter_map(|call| match call {
                Call::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["HIT! HP: 4", "10x", "1.0x Score", "NICE!", "NICE!"]);

        let first_text = canvas.calls.iter().position(|c| matches!(c, Call::Text { .. })).unwrap();
        assert!(canvas.calls[1..first_text]
            .iter()
            .all(|c| !matches!(c, Call::Rect { .. })));
    }

    #[test]
    fn test_dodge_counts_under_combo_panel() {
        let mut game = game();
        game.register_graze(GrazeTier::PerfectDodge, 100.0, 100.0);
        game.register_graze(GrazeTier::CloseCall, 100.0, 100.0);
        game.damage_numbers.clear();

        let mut canvas = RecordingCanvas::new();
        game.render(&mut canvas).unwrap();

        let indicators: Vec<(String, f32, f32, Color)> = canvas
            .texts()
            .into_iter()
            .filter_map(|call| match call {
                Call::Text { text, x, y, color, .. } if text.contains(" x") => {
                    Some((text.clone(), *x, *y, *color))
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            indicators,
            vec![
                ("PERFECT x1".to_string(), 560.0, 200.0, Color::GOLD),
                ("CLOSE x2".to_string(), 560.0, 218.0, CLOSE_CALL_GREEN),
            ]
        );
    }

    #[test]
    fn test_no_dodge_counts_for_plain_grazes() {
        let mut game = game();
        game.register_graze(GrazeTier::Graze, 100.0, 100.0);

        let mut canvas = RecordingCanvas::new();
        game.render(&mut canvas).unwrap();
        assert!(canvas.texts().iter().all(|call| match call {
            Call::Text { text, .. } => !text.contains("PERFECT") && !text.contains("CLOSE"),
            _ => true,
        }));
    }

    #[test]
    fn test_zero_sized_screen_fails_initialization() {
        let input = InputManager::new();
        let mut game = game();

        let mut frame = Frame::new(&input, (0, 600));
        let err = game.initialize(&mut frame).unwrap_err();
        assert!(matches!(err, AppError::ScreenSize { width: 0, height: 600 }));

        let mut frame = Frame::new(&input, (800, 600));
        assert!(game.initialize(&mut frame).is_ok());
    }

    #[test]
    fn test_cleanup_drops_effects() {
        let mut game = game();
        game.register_hit(0.0, 0.0, 1);
        game.cleanup();
        assert!(game.damage_numbers().is_empty());
        assert!(game.particles().is_empty());
    }
}
