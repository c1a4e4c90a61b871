//! Game configuration
//!
//! Read from `mr_missle.toml` in the working directory. Every field has a
//! default, so a partial file (or none at all) is fine.

use missle_engine::config::Config;
use missle_engine::render::{Color, FontSource, FontWeight};
use missle_engine::TimingConfig;
use serde::{Deserialize, Serialize};

use crate::assets::ICON_PATH;

/// Where the game looks for its configuration
pub const CONFIG_PATH: &str = "mr_missle.toml";

/// Title of the game window
pub const WINDOW_TITLE: &str = "Mr. Missle";

/// Game configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Window settings
    pub window: WindowConfig,
    /// Simulation timing
    pub timing: TimingConfig,
    /// Asset locations
    pub assets: AssetConfig,
    /// Gameplay tuning
    pub gameplay: GameplayConfig,
    /// HUD and background colors
    pub palette: PaletteConfig,
}

impl Config for GameConfig {}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Remove the title bar and borders
    pub borderless: bool,
    /// Size the window to the primary monitor and maximize it
    pub fullscreen: bool,
    /// Size used when the monitor cannot be queried
    pub fallback_width: u32,
    /// Size used when the monitor cannot be queried
    pub fallback_height: u32,
    /// VSync enabled
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            borderless: true,
            fullscreen: true,
            fallback_width: 1280,
            fallback_height: 720,
            vsync: true,
        }
    }
}

/// Asset locations, relative to the working directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Window icon image
    pub icon_path: String,
    /// Font faces to load
    pub fonts: Vec<FontSource>,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            icon_path: ICON_PATH.to_string(),
            fonts: vec![
                FontSource {
                    family: "Arial".to_string(),
                    weight: FontWeight::Bold,
                    path: "fonts/arialbd.ttf".into(),
                },
                FontSource {
                    family: "Arial".to_string(),
                    weight: FontWeight::Regular,
                    path: "fonts/arial.ttf".into(),
                },
            ],
        }
    }
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Scales how long a combo survives without a new graze
    pub combo_timeout_multiplier: f32,
    /// Live particle cap
    pub max_particles: usize,
    /// Enable the 1/2/3/H debug keys
    pub debug_input: bool,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            combo_timeout_multiplier: 1.0,
            max_particles: 300,
            debug_input: true,
        }
    }
}

/// HUD and background colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Screen clear color
    pub background: Color,
    /// Combo counter text
    pub hud_text: Color,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            background: Color::rgb(12, 12, 24),
            hud_text: Color::WHITE,
        }
    }
}
