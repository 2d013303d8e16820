use std::path::PathBuf;

use anyhow::Context;

use reluctant_hero::DEFAULT_CONFIG;
use reluctant_hero::audio::KiraMixer;
use reluctant_hero::config::GameConfig;
use reluctant_hero::engine::Engine;
use reluctant_hero::game::LevelManager;
use reluctant_hero::settings::FPS;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    let config = GameConfig::load(&path)
        .with_context(|| format!("failed to load game config {}", path.display()))?;

    let builder = Engine::builder()
        .with_title(&config.title)
        .with_window(config.window.clone())
        .with_ups(FPS);

    let game = LevelManager::new(config, Box::new(KiraMixer::new()))
        .context("failed to build the start level")?;

    builder.run(game)
}
