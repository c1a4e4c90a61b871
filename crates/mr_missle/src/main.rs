//! Mr. Missle
//!
//! Opens a border-less, maximized window and runs the game in it.

use std::process::ExitCode;

use missle_engine::config::Config;
use missle_engine::foundation::logging;
use missle_engine::render::FontLibrary;
use mr_missle::assets::load_icon;
use mr_missle::config::CONFIG_PATH;
use mr_missle::{Game, GameConfig};

fn main() -> ExitCode {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC occurred: {}", panic_info);
    }));

    logging::init();
    log::info!("Starting Mr. Missle");

    let config = GameConfig::load_or_default(CONFIG_PATH);
    let icon = load_icon(&config.assets.icon_path);
    let fonts = FontLibrary::from_sources(&config.assets.fonts);

    let mut game = Game::new(config);
    match game.start(fonts, icon) {
        Ok(()) => {
            log::info!("Mr. Missle finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Fatal error: {}", e);
            ExitCode::FAILURE
        }
    }
}
