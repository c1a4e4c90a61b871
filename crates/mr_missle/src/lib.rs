//! # Mr. Missle
//!
//! Combat feedback for a 2D bullet-dodging game: floating damage text,
//! particles and graze combos, hosted by the [`Game`] surface.

pub mod assets;
pub mod combo;
pub mod config;
pub mod effects;
pub mod game;

pub use combo::ComboSystem;
pub use config::GameConfig;
pub use effects::{DamageNumber, Effect, EffectList};
pub use game::{Game, GrazeTier};
