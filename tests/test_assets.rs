use std::fs;

use kuelap_runner::assets::{Assets, Image, Sound, Sprite};
use kuelap_runner::error::AssetError;
use speculoos::prelude::*;
use strum::IntoEnumIterator;
use tempfile::tempdir;

fn put(root: &std::path::Path, relative: &str, bytes: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, bytes).unwrap();
}

#[test]
fn placeholders_cover_every_sprite() {
    let assets = Assets::placeholders();
    for sprite in Sprite::iter() {
        assert!(assets.is_placeholder(sprite));
    }
    assert_eq!(assets.missing_images(), Sprite::iter().count());
    assert_that(&assets.sound(Sound::Jump)).is_none();
}

#[test]
fn missing_root_is_not_fatal() {
    let dir = tempdir().unwrap();
    let assets = Assets::load(&dir.path().join("nowhere")).unwrap();
    assert_eq!(assets.missing_images(), Sprite::iter().count());
}

#[test]
fn empty_root_gives_placeholders() {
    let dir = tempdir().unwrap();
    let assets = Assets::load(dir.path()).unwrap();
    assert_eq!(assets.missing_images(), Sprite::iter().count());
    for sound in Sound::iter() {
        assert_that(&assets.sound(sound)).is_none();
    }
}

#[test]
fn present_files_are_loaded() {
    let dir = tempdir().unwrap();
    put(dir.path(), Sprite::PlayerJump.path(), b"png");
    put(dir.path(), Sound::Shoot.path(), b"wav");

    let assets = Assets::load(dir.path()).unwrap();

    assert_eq!(assets.image(Sprite::PlayerJump), &Image::Loaded(b"png".to_vec()));
    assert!(assets.is_placeholder(Sprite::PlayerRun1));
    assert_eq!(assets.missing_images(), Sprite::iter().count() - 1);
    assert_eq!(assets.sound(Sound::Shoot), Some(&b"wav"[..]));
}

#[test]
fn root_that_is_a_file_is_fatal() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("assets");
    fs::write(&file, b"").unwrap();

    let err = Assets::load(&file).unwrap_err();
    assert!(matches!(err, AssetError::RootNotDirectory(_)));
    assert!(err.is_fatal());
}

#[test]
fn single_file_failures_are_not_fatal() {
    let err = AssetError::Load {
        path: "images/boss/boss.png".into(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    };
    assert!(!err.is_fatal());
}

#[test]
fn manifest_paths_are_distinct() {
    let mut paths: Vec<&str> = Sprite::iter().map(Sprite::path).chain(Sound::iter().map(Sound::path)).collect();
    let total = paths.len();
    paths.sort_unstable();
    paths.dedup();
    assert_eq!(paths.len(), total);
}
