use std::path::{Path, PathBuf};
use std::time::Duration;

use kira::{
    manager::{AudioManager, AudioManagerSettings, backend::DefaultBackend},
    sound::{
        PlaybackState,
        static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings},
    },
    tween::Tween,
};

use crate::error::{GameError, Result};
use crate::settings::MUSIC_FADEOUT_MS;

/// Music channel the game talks to. One track at a time.
pub trait Mixer {
    /// Decode `path` and make it the current track, replacing any loaded one.
    fn load(&mut self, path: &Path) -> Result<()>;
    fn play(&mut self, looping: bool);
    /// Start fading the playing track out. Returns immediately.
    fn fade_out(&mut self, duration: Duration);
    /// True while a track is audible, including during a fade.
    fn is_busy(&self) -> bool;
    fn unload(&mut self);
}

// ── Kira backend ────────────────────────────────────────────────────────────

pub struct KiraMixer {
    /// `None` when audio hardware is unavailable (headless / CI / no audio device).
    manager: Option<AudioManager>,
    track: Option<StaticSoundData>,
    playing: Option<StaticSoundHandle>,
}

impl KiraMixer {
    pub fn new() -> Self {
        let manager = match AudioManager::<DefaultBackend>::new(AudioManagerSettings::default()) {
            Ok(m) => Some(m),
            Err(e) => {
                log::warn!("[audio] failed to initialize audio manager: {e}. Audio disabled.");
                None
            }
        };
        Self { manager, track: None, playing: None }
    }
}

impl Default for KiraMixer {
    fn default() -> Self {
        Self::new()
    }
}

impl Mixer for KiraMixer {
    fn load(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(GameError::missing(path, std::io::ErrorKind::NotFound.into()));
        }
        let data = StaticSoundData::from_file(path)
            .map_err(|e| GameError::Audio(format!("{}: {e}", path.display())))?;
        self.track = Some(data);
        log::debug!("[audio] loaded {}", path.display());
        Ok(())
    }

    fn play(&mut self, looping: bool) {
        let Some(manager) = self.manager.as_mut() else { return };
        let Some(data) = self.track.as_ref() else { return };

        let settings = if looping {
            StaticSoundSettings::new().loop_region(0.0..)
        } else {
            StaticSoundSettings::new()
        };
        match manager.play(data.clone().with_settings(settings)) {
            Ok(handle) => self.playing = Some(handle),
            Err(e) => log::warn!("[audio] failed to play track: {e}"),
        }
    }

    fn fade_out(&mut self, duration: Duration) {
        if let Some(handle) = self.playing.as_mut() {
            let _ = handle.stop(Tween { duration, ..Default::default() });
        }
    }

    fn is_busy(&self) -> bool {
        self.playing
            .as_ref()
            .is_some_and(|h| h.state() != PlaybackState::Stopped)
    }

    fn unload(&mut self) {
        if let Some(mut handle) = self.playing.take() {
            let _ = handle.stop(Tween::default());
        }
        self.track = None;
    }
}

// ── Music transitions ───────────────────────────────────────────────────────

/// Swaps level music without blocking: fade the old track, wait for the
/// mixer to go quiet across later ticks, then start the next one looping.
#[derive(Debug, Default)]
pub struct MusicDirector {
    waiting: bool,
    next: Option<PathBuf>,
}

impl MusicDirector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a transition to `track`; `None` just fades to silence.
    /// A request made mid-transition replaces the pending track.
    pub fn request(&mut self, mixer: &mut dyn Mixer, track: Option<&Path>) {
        mixer.fade_out(Duration::from_millis(MUSIC_FADEOUT_MS));
        self.next = track.map(Path::to_path_buf);
        self.waiting = true;
    }

    /// Call once per tick. Starts the pending track once the mixer is idle.
    pub fn poll(&mut self, mixer: &mut dyn Mixer) {
        if !self.waiting || mixer.is_busy() {
            return;
        }
        self.waiting = false;
        mixer.unload();

        let Some(path) = self.next.take() else { return };
        match mixer.load(&path) {
            Ok(()) => {
                mixer.play(true);
                log::info!("[audio] now playing {}", path.display());
            }
            Err(e) => log::warn!("[audio] {e}; continuing without music"),
        }
    }

    pub fn is_transition_complete(&self) -> bool {
        !self.waiting
    }
}
