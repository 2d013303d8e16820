//! Compile-time game constants. Anything a player might want to tweak lives in
//! `GameConfig` instead.

/// Logical render resolution.
pub const WINDOW_WIDTH: u32 = 1280;
pub const WINDOW_HEIGHT: u32 = 720;

/// Fixed simulation rate (updates per second).
pub const FPS: u32 = 60;

/// Edge length of one map cell in pixels.
pub const TILE_SIZE: i32 = 16;

/// Character frame size inside a sprite sheet.
pub const ENTITY_WIDTH: u32 = 16;
pub const ENTITY_HEIGHT: u32 = 20;

/// Frames per directional walking strip.
pub const WALKING_IMAGE_COUNT: usize = 3;

/// How far the animation frame index advances per tick.
pub const ANIMATION_SPEED: f32 = 0.15;

/// Degrees the player turns per tick while a turn key is held.
pub const PLAYER_ROTATION_SPEED: f32 = 5.0;

/// Maximum queued player actions.
pub const MAX_ACTION_QUEUE_LENGTH: usize = 3;

/// NPC radar reach, in tiles, added on each axis.
pub const RADAR_INFLATION_TILES: i32 = 8;

/// Seconds an NPC patrols in one direction before turning around.
pub const PATROL_SECONDS_PER_DIRECTION: f32 = 3.0;

/// Seconds an NPC flies after being thrown.
pub const THROWN_SECONDS: f32 = 1.0;

/// Pixels per movement step while thrown.
pub const THROWN_SPEED: i32 = 5;

/// Music fade-out when a level swaps tracks.
pub const MUSIC_FADEOUT_MS: u64 = 2000;

/// Colour treated as transparent in tilesets and sprite sheets.
pub const COLOR_KEY: [u8; 3] = [0, 0, 0];
