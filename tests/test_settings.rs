use std::collections::BTreeSet;
use std::fs;

use kuelap_runner::error::{GameError, GameResult, SettingsError};
use kuelap_runner::settings::{Settings, SettingsStore};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

#[test]
fn defaults() {
    let settings = Settings::default();
    assert!(settings.sound_enabled);
    assert_eq!(settings.unlocked_levels, BTreeSet::from([1]));
    assert_eq!(settings.first_unlocked(), 1);
    assert!(settings.is_unlocked(1));
    assert!(!settings.is_unlocked(2));
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().unwrap();
    let store = SettingsStore::new(dir.path().join("settings.json"));
    assert_eq!(store.load(), Settings::default());
    assert!(matches!(store.try_load(), Err(SettingsError::Io(_))));
}

#[test]
fn saved_settings_come_back() {
    let dir = tempdir().unwrap();
    let store = SettingsStore::new(dir.path().join("settings.json"));
    let settings = Settings {
        sound_enabled: false,
        unlocked_levels: BTreeSet::from([1, 2, 3]),
    };

    store.save(&settings).unwrap();
    assert_eq!(store.load(), settings);
}

#[test]
fn file_format_is_plain_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    SettingsStore::new(&path)
        .save(&Settings {
            sound_enabled: true,
            unlocked_levels: BTreeSet::from([2, 1]),
        })
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value, serde_json::json!({ "sound_enabled": true, "unlocked_levels": [1, 2] }));
}

#[test]
fn malformed_file_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json").unwrap();
    let store = SettingsStore::new(&path);

    assert!(matches!(store.try_load(), Err(SettingsError::Json(_))));
    assert_eq!(store.load(), Settings::default());
}

#[test]
fn missing_fields_take_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{ "sound_enabled": false }"#).unwrap();

    let settings = SettingsStore::new(&path).load();
    assert!(!settings.sound_enabled);
    assert_eq!(settings.unlocked_levels, BTreeSet::from([1]));
}

#[test]
fn level_one_is_always_unlocked() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{ "sound_enabled": true, "unlocked_levels": [] }"#).unwrap();

    let settings = SettingsStore::new(&path).load();
    assert!(settings.unlocked_levels.contains(&1));
}

#[test]
fn first_unlocked_is_the_lowest() {
    let settings = Settings {
        sound_enabled: true,
        unlocked_levels: BTreeSet::from([3, 2]),
    };
    assert_eq!(settings.first_unlocked(), 2);
}

#[test]
fn failed_save_surfaces_as_a_game_error() {
    let dir = tempdir().unwrap();
    let store = SettingsStore::new(dir.path().join("missing").join("settings.json"));
    let save = || -> GameResult<()> {
        store.save(&Settings::default())?;
        Ok(())
    };

    assert!(matches!(save(), Err(GameError::Settings(SettingsError::Io(_)))));
}
