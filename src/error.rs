//! Error types for the runner.
//!
//! Only asset-root failures are fatal, and only at startup. Everything else is
//! recovered where it happens and logged. Audio and voice failures never leave
//! their own modules.

use std::io;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    /// A single file could not be read. Callers substitute a placeholder.
    #[error("Failed to load {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The asset root exists but cannot be listed.
    #[error("Asset root {path} is unreadable: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Asset root {0} is not a directory")]
    RootNotDirectory(PathBuf),
}

impl AssetError {
    /// Whether startup must stop because of this error.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, AssetError::Load { .. })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed settings: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum AudioError {
    #[error("Playback failed: {0}")]
    Playback(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VoiceError {
    #[error("Voice input is not supported")]
    Unsupported,

    #[error("Microphone permission denied")]
    PermissionDenied,
}

pub type GameResult<T> = Result<T, GameError>;
