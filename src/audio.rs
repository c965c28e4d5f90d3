//! Sound triggering.
//!
//! Playback never interrupts the game: a disabled mixer skips the sound and a
//! failing backend is logged and ignored.

use std::collections::HashMap;

use strum::IntoEnumIterator;
use tracing::{trace, warn};

use crate::assets::{Assets, Sound};
use crate::error::AudioError;

/// Something that can actually make a noise.
pub trait SoundBackend {
    /// `clip` is the loaded file, if the asset was found.
    fn play(&mut self, sound: Sound, clip: Option<&[u8]>) -> Result<(), AudioError>;
}

pub struct Audio<B: SoundBackend> {
    backend: B,
    enabled: bool,
    clips: HashMap<Sound, Vec<u8>>,
}

impl<B: SoundBackend> Audio<B> {
    pub fn new(backend: B, enabled: bool, assets: &Assets) -> Self {
        let clips = Sound::iter()
            .filter_map(|s| assets.sound(s).map(|bytes| (s, bytes.to_vec())))
            .collect();
        Self {
            backend,
            enabled,
            clips,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn play(&mut self, sound: Sound) {
        let name: &'static str = sound.into();
        if !self.enabled {
            trace!(sound = name, "Sound disabled, skipping");
            return;
        }
        let clip = self.clips.get(&sound).map(Vec::as_slice);
        if let Err(error) = self.backend.play(sound, clip) {
            warn!(sound = name, %error, "Sound playback failed");
        }
    }
}
