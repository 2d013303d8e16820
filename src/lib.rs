pub mod assets;
pub mod audio;
pub mod camera;
pub mod config;
pub mod engine;
pub mod entity;
pub mod error;
pub mod game;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod level;
pub mod renderer;
pub mod score;
pub mod settings;
pub mod sprite;
pub mod surface;
pub mod tile;
pub mod window;

pub use error::{GameError, Result};

/// Config file read when no path is given on the command line.
pub const DEFAULT_CONFIG: &str = "assets/game.json";
