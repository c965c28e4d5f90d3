//! Settings that survive between sessions: the sound flag and the unlocked
//! levels, stored as a small JSON file.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::SettingsError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sound_enabled: bool,
    pub unlocked_levels: BTreeSet<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            unlocked_levels: BTreeSet::from([1]),
        }
    }
}

impl Settings {
    /// The level "Play" starts: the lowest unlocked one.
    pub fn first_unlocked(&self) -> u32 {
        self.unlocked_levels.iter().next().copied().unwrap_or(1)
    }

    pub fn is_unlocked(&self, level: u32) -> bool {
        self.unlocked_levels.contains(&level)
    }
}

/// Where settings live on disk.
#[derive(Clone, Debug)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the settings file.
    pub fn try_load(&self) -> Result<Settings, SettingsError> {
        let text = fs::read_to_string(&self.path)?;
        let mut settings: Settings = serde_json::from_str(&text)?;
        if settings.unlocked_levels.is_empty() {
            settings.unlocked_levels.insert(1);
        }
        Ok(settings)
    }

    /// Read the settings file, falling back to defaults when it is missing or
    /// malformed.
    pub fn load(&self) -> Settings {
        match self.try_load() {
            Ok(settings) => {
                debug!(path = %self.path.display(), ?settings, "Settings loaded");
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == io::ErrorKind::NotFound => Settings::default(),
            Err(error) => {
                warn!(path = %self.path.display(), %error, "Ignoring unreadable settings");
                Settings::default()
            }
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let text = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, text)?;
        debug!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}
