//! Runtime configuration, read from the environment.

use std::env;
use std::path::PathBuf;

use crate::voice::Locale;

pub const SETTINGS_ENV: &str = "KUELAP_SETTINGS";
pub const ASSETS_ENV: &str = "KUELAP_ASSETS";
pub const LOG_ENV: &str = "KUELAP_LOG";
pub const VOICE_LOCALE_ENV: &str = "KUELAP_VOICE_LOCALE";
/// Set to `off` to disable voice commands.
pub const VOICE_ENV: &str = "KUELAP_VOICE";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub settings_path: PathBuf,
    pub assets_dir: PathBuf,
    pub log_path: PathBuf,
    pub voice_locale: Locale,
    pub voice_enabled: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key → value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let settings_path = lookup(SETTINGS_ENV).map(PathBuf::from).unwrap_or_else(|| {
            let home = lookup("HOME").unwrap_or_else(|| ".".to_string());
            PathBuf::from(home).join(".kuelap_runner.json")
        });
        let assets_dir = lookup(ASSETS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("assets"));
        let log_path = lookup(LOG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| env::temp_dir().join("kuelap_runner.log"));
        let voice_locale = lookup(VOICE_LOCALE_ENV)
            .map(|tag| Locale::from_tag(&tag))
            .unwrap_or_default();
        let voice_enabled = lookup(VOICE_ENV)
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "off" | "0" | "false"))
            .unwrap_or(true);

        Self {
            settings_path,
            assets_dir,
            log_path,
            voice_locale,
            voice_enabled,
        }
    }
}
