use serde::Deserialize;

use crate::settings::{WINDOW_HEIGHT, WINDOW_WIDTH};

/// How the OS window is presented.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowMode {
    #[default]
    Windowed,
    /// Exclusive fullscreen at the video mode closest to the physical size.
    Fullscreen,
    /// Borderless window covering the current monitor.
    Borderless,
}

/// `window` section of `game.json`. Missing fields take their defaults.
///
/// `physical_*` is the requested OS window size; `logical_*` is the size of
/// the frame the game draws, letterboxed into whatever window it gets.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub physical_width: u32,
    pub physical_height: u32,
    pub logical_width: u32,
    pub logical_height: u32,
    pub mode: WindowMode,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            physical_width: WINDOW_WIDTH,
            physical_height: WINDOW_HEIGHT,
            logical_width: WINDOW_WIDTH,
            logical_height: WINDOW_HEIGHT,
            mode: WindowMode::Windowed,
        }
    }
}
