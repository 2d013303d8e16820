use std::path::{Path, PathBuf};
use std::time::Duration;

use reluctant_hero::audio::{Mixer, MusicDirector};
use reluctant_hero::{GameError, Result};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Load(PathBuf),
    Play(bool),
    FadeOut(Duration),
    Unload,
}

#[derive(Default)]
struct RecordingMixer {
    calls: Vec<Call>,
    busy: bool,
    fail_loads: bool,
}

impl Mixer for RecordingMixer {
    fn load(&mut self, path: &Path) -> Result<()> {
        self.calls.push(Call::Load(path.to_path_buf()));
        if self.fail_loads {
            return Err(GameError::Audio("cannot decode".into()));
        }
        Ok(())
    }

    fn play(&mut self, looping: bool) {
        self.calls.push(Call::Play(looping));
    }

    fn fade_out(&mut self, duration: Duration) {
        self.calls.push(Call::FadeOut(duration));
    }

    fn is_busy(&self) -> bool {
        self.busy
    }

    fn unload(&mut self) {
        self.calls.push(Call::Unload);
    }
}

#[test]
fn waits_for_fade_then_loops_the_new_track() {
    let mut mixer = RecordingMixer { busy: true, ..Default::default() };
    let mut music = MusicDirector::new();

    music.request(&mut mixer, Some(Path::new("music/meadow.ogg")));
    assert!(matches!(mixer.calls.as_slice(), [Call::FadeOut(d)] if !d.is_zero()));
    assert!(!music.is_transition_complete());

    // Still fading: nothing happens however often we poll.
    for _ in 0..10 {
        music.poll(&mut mixer);
    }
    assert_eq!(mixer.calls.len(), 1);

    mixer.busy = false;
    music.poll(&mut mixer);
    assert!(music.is_transition_complete());
    assert_eq!(
        &mixer.calls[1..],
        &[Call::Unload, Call::Load(PathBuf::from("music/meadow.ogg")), Call::Play(true)]
    );

    // Done; further polls are no-ops.
    music.poll(&mut mixer);
    assert_eq!(mixer.calls.len(), 4);
}

#[test]
fn no_track_just_fades_to_silence() {
    let mut mixer = RecordingMixer::default();
    let mut music = MusicDirector::new();

    music.request(&mut mixer, None);
    music.poll(&mut mixer);

    assert!(music.is_transition_complete());
    assert!(matches!(mixer.calls.as_slice(), [Call::FadeOut(_), Call::Unload]));
}

#[test]
fn later_request_replaces_the_pending_track() {
    let mut mixer = RecordingMixer { busy: true, ..Default::default() };
    let mut music = MusicDirector::new();

    music.request(&mut mixer, Some(Path::new("a.ogg")));
    music.request(&mut mixer, Some(Path::new("b.ogg")));
    mixer.busy = false;
    music.poll(&mut mixer);

    assert!(mixer.calls.contains(&Call::Load(PathBuf::from("b.ogg"))));
    assert!(!mixer.calls.contains(&Call::Load(PathBuf::from("a.ogg"))));
}

#[test]
fn load_failure_leaves_the_game_silent() {
    let mut mixer = RecordingMixer { fail_loads: true, ..Default::default() };
    let mut music = MusicDirector::new();

    music.request(&mut mixer, Some(Path::new("broken.ogg")));
    music.poll(&mut mixer);

    assert!(music.is_transition_complete());
    assert!(!mixer.calls.iter().any(|c| matches!(c, Call::Play(_))));
}
