use std::fs;

use kuelap_runner::assets::{Assets, Sound};
use kuelap_runner::audio::{Audio, SoundBackend};
use kuelap_runner::error::AudioError;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

/// Records what it was asked to play.
#[derive(Default)]
struct Recorder {
    played: Vec<(Sound, Option<Vec<u8>>)>,
}

impl SoundBackend for Recorder {
    fn play(&mut self, sound: Sound, clip: Option<&[u8]>) -> Result<(), AudioError> {
        self.played.push((sound, clip.map(<[u8]>::to_vec)));
        Ok(())
    }
}

/// Fails every time.
#[derive(Default)]
struct Broken {
    attempts: u32,
}

impl SoundBackend for Broken {
    fn play(&mut self, _sound: Sound, _clip: Option<&[u8]>) -> Result<(), AudioError> {
        self.attempts += 1;
        Err(AudioError::Playback("device busy".to_string()))
    }
}

#[test]
fn plays_through_the_backend() {
    let mut audio = Audio::new(Recorder::default(), true, &Assets::placeholders());
    audio.play(Sound::Jump);
    audio.play(Sound::Hit);
    assert_eq!(audio.backend().played, vec![(Sound::Jump, None), (Sound::Hit, None)]);
}

#[test]
fn loaded_clips_are_passed_along() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(Sound::BossIntro.path());
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, b"RIFF").unwrap();
    let assets = Assets::load(dir.path()).unwrap();

    let mut audio = Audio::new(Recorder::default(), true, &assets);
    audio.play(Sound::BossIntro);
    assert_eq!(audio.backend().played, vec![(Sound::BossIntro, Some(b"RIFF".to_vec()))]);
}

#[test]
fn disabled_audio_skips_the_backend() {
    let mut audio = Audio::new(Recorder::default(), false, &Assets::placeholders());
    audio.play(Sound::Shoot);
    assert!(audio.backend().played.is_empty());

    audio.set_enabled(true);
    assert!(audio.is_enabled());
    audio.play(Sound::Shoot);
    assert_eq!(audio.backend().played.len(), 1);
}

#[test]
fn playback_failures_are_swallowed() {
    let mut audio = Audio::new(Broken::default(), true, &Assets::placeholders());
    audio.play(Sound::GameOver);
    audio.play(Sound::GameOver);
    assert_eq!(audio.backend().attempts, 2);
}
