use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::entity::CharacterKeys;
use crate::error::{GameError, Result};
use crate::settings::TILE_SIZE;
use crate::window::WindowConfig;

/// Layout files and music for one level.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LevelDescriptor {
    pub ground: PathBuf,
    pub rocks: PathBuf,
    pub raised_ground: PathBuf,
    pub plants: PathBuf,
    pub fence: PathBuf,
    pub extra: PathBuf,
    pub characters: PathBuf,
    #[serde(default)]
    pub music: Option<PathBuf>,
}

impl LevelDescriptor {
    fn resolve(&mut self, root: &Path) {
        for p in [
            &mut self.ground,
            &mut self.rocks,
            &mut self.raised_ground,
            &mut self.plants,
            &mut self.fence,
            &mut self.extra,
            &mut self.characters,
        ] {
            *p = root.join(&*p);
        }
        if let Some(m) = self.music.as_mut() {
            *m = root.join(&*m);
        }
    }
}

/// Contents of `game.json`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub window: WindowConfig,
    /// Tileset image, cut into `tile_size` squares.
    pub tileset: PathBuf,
    #[serde(default = "default_tile_size")]
    pub tile_size: i32,
    /// Folder of character sprite sheets, one PNG per kind.
    pub characters: PathBuf,
    #[serde(default)]
    pub character_keys: CharacterKeys,
    pub levels: BTreeMap<String, LevelDescriptor>,
    pub start_level: String,
    /// Keep the camera inside the level instead of always centring the player.
    #[serde(default)]
    pub clamp_camera: bool,
}

fn default_title() -> String {
    "Reluctant Hero".to_owned()
}

fn default_tile_size() -> i32 {
    TILE_SIZE
}

impl GameConfig {
    /// Read and validate a config file. Relative paths inside it are taken
    /// from the file's own directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source =
            std::fs::read_to_string(path).map_err(|e| GameError::missing(path, e))?;
        let root = path.parent().unwrap_or_else(|| Path::new(""));
        let config = Self::parse(&source, path, root)?;
        log::info!(
            "[config] loaded {} ({} levels, starting at '{}')",
            path.display(),
            config.levels.len(),
            config.start_level
        );
        Ok(config)
    }

    /// Parse config JSON. `origin` names the source in errors; relative
    /// paths are joined onto `root`.
    pub fn parse(source: &str, origin: &Path, root: &Path) -> Result<Self> {
        let mut config: GameConfig = serde_json::from_str(source)
            .map_err(|source| GameError::InvalidConfig { path: origin.to_path_buf(), source })?;

        if config.tile_size <= 0 {
            return Err(GameError::NonPositiveSetting {
                field: "tile_size",
                value: config.tile_size.into(),
            });
        }
        if !config.levels.contains_key(&config.start_level) {
            return Err(GameError::UnknownLevel(config.start_level));
        }

        config.tileset = root.join(&config.tileset);
        config.characters = root.join(&config.characters);
        for level in config.levels.values_mut() {
            level.resolve(root);
        }
        Ok(config)
    }

    pub fn level(&self, key: &str) -> Result<&LevelDescriptor> {
        self.levels
            .get(key)
            .ok_or_else(|| GameError::UnknownLevel(key.to_owned()))
    }

    pub fn start(&self) -> Result<&LevelDescriptor> {
        self.level(&self.start_level)
    }
}
