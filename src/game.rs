use glam::IVec2;

use crate::assets::{Art, AssetTable, CharacterArt};
use crate::audio::{Mixer, MusicDirector};
use crate::config::GameConfig;
use crate::engine::{Engine, Game};
use crate::error::{GameError, Result};
use crate::input::{ActionMap, GameAction, InputState};
use crate::level::Level;
use crate::score::ScoreController;
use crate::surface::Surface;

/// Load the tileset and every character sheet named by `config`.
pub fn load_art(config: &GameConfig) -> Result<Art> {
    let tile_size = u32::try_from(config.tile_size)
        .ok()
        .filter(|&size| size > 0)
        .ok_or(GameError::NonPositiveSetting { field: "tile_size", value: config.tile_size.into() })?;
    let tiles = AssetTable::load_tileset(&config.tileset, tile_size)?;
    let characters = CharacterArt::load_folder(&config.characters)?;
    characters.require_all()?;
    Ok(Art { tiles, characters })
}

/// Owns everything that outlives a single level: art, score, music and the
/// key bindings. Runs the current level.
pub struct LevelManager {
    config: GameConfig,
    art: Art,
    actions: ActionMap<GameAction>,
    mixer: Box<dyn Mixer>,
    music: MusicDirector,
    score: ScoreController,
    level: Level,
    level_key: String,
    viewport: IVec2,
}

impl LevelManager {
    pub fn new(config: GameConfig, mixer: Box<dyn Mixer>) -> Result<Self> {
        let art = load_art(&config)?;
        Self::with_art(config, art, mixer)
    }

    /// Build the start level with art that is already loaded.
    pub fn with_art(config: GameConfig, art: Art, mixer: Box<dyn Mixer>) -> Result<Self> {
        let viewport = IVec2::new(
            config.window.logical_width as i32,
            config.window.logical_height as i32,
        );
        let key = config.start_level.clone();
        let level = Level::new(&config, config.level(&key)?, &art, viewport)?;

        let mut manager = Self {
            config,
            art,
            actions: ActionMap::game_defaults(),
            mixer,
            music: MusicDirector::new(),
            score: ScoreController::new(),
            level,
            level_key: key,
            viewport,
        };
        manager.music.request(manager.mixer.as_mut(), manager.level.music());
        Ok(manager)
    }

    /// Replace the current level. The old one keeps running on error.
    pub fn load_level(&mut self, key: &str) -> Result<()> {
        let descriptor = self.config.level(key)?;
        self.level = Level::new(&self.config, descriptor, &self.art, self.viewport)?;
        self.level_key = key.to_owned();
        self.music.request(self.mixer.as_mut(), self.level.music());
        log::info!("[game] entered level '{key}'");
        Ok(())
    }

    /// One fixed-timestep tick.
    pub fn tick(&mut self, input: &InputState, dt: f32) {
        self.level.handle_input(input, &self.actions);
        let steer = self.actions.steer(input);
        self.level.update(steer, &mut self.score, dt);
        self.music.poll(self.mixer.as_mut());
    }

    pub fn draw(&mut self, surface: &mut Surface) {
        self.level.draw(surface, &self.art);
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn level_key(&self) -> &str {
        &self.level_key
    }

    pub fn score(&self) -> &ScoreController {
        &self.score
    }

    pub fn music(&self) -> &MusicDirector {
        &self.music
    }
}

impl Game for LevelManager {
    fn update(&mut self, engine: &mut Engine) {
        let dt = engine.dt();
        self.tick(&engine.input, dt);
    }

    fn render(&mut self, engine: &mut Engine) {
        self.draw(&mut engine.surface);
    }
}
