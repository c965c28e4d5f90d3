//! The fixed asset manifest and its loader.
//!
//! A sprite that fails to load becomes a placeholder and a sound that fails
//! to load is simply absent; only an asset root that exists but cannot be
//! read stops startup.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use strum::IntoEnumIterator;
use strum_macros::{EnumIter, IntoStaticStr};
use tracing::{debug, info, warn};

use crate::error::AssetError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
pub enum Sprite {
    BackgroundKuelap,
    BackgroundGocta,
    BackgroundKarajia,
    PlayerRun1,
    PlayerRun2,
    PlayerJump,
    PlayerDuck,
    PlayerShoot,
    PlayerDead,
    EnemyBird,
    ObstacleStone,
    Boss,
    Heart,
    PlayerProjectile,
    EnemyProjectile,
}

impl Sprite {
    /// Path relative to the asset root.
    pub fn path(self) -> &'static str {
        match self {
            Sprite::BackgroundKuelap => "images/background/kuelap.png",
            Sprite::BackgroundGocta => "images/background/gocta.png",
            Sprite::BackgroundKarajia => "images/background/karajia.png",
            Sprite::PlayerRun1 => "images/player/run-1.png",
            Sprite::PlayerRun2 => "images/player/run-2.png",
            Sprite::PlayerJump => "images/player/jump.png",
            Sprite::PlayerDuck => "images/player/duck.png",
            Sprite::PlayerShoot => "images/player/shoot.png",
            Sprite::PlayerDead => "images/player/dead.png",
            Sprite::EnemyBird => "images/enemies/bird.png",
            Sprite::ObstacleStone => "images/obstacles/stone.png",
            Sprite::Boss => "images/boss/boss.png",
            Sprite::Heart => "images/ui/heart.png",
            Sprite::PlayerProjectile => "images/projectile/player.png",
            Sprite::EnemyProjectile => "images/projectile/enemy.png",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
pub enum Sound {
    Jump,
    Shoot,
    Hit,
    PlayerHit,
    BossShoot,
    BossHit,
    BossIntro,
    LevelComplete,
    GameOver,
}

impl Sound {
    pub fn path(self) -> &'static str {
        match self {
            Sound::Jump => "sounds/jump.wav",
            Sound::Shoot => "sounds/shoot.wav",
            Sound::Hit => "sounds/hit.wav",
            Sound::PlayerHit => "sounds/player_hit.wav",
            Sound::BossShoot => "sounds/boss_shoot.wav",
            Sound::BossHit => "sounds/boss_hit.wav",
            Sound::BossIntro => "sounds/boss_intro.wav",
            Sound::LevelComplete => "sounds/level_complete.wav",
            Sound::GameOver => "sounds/gameover.wav",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Image {
    Loaded(Vec<u8>),
    /// Stand-in for a sprite that could not be loaded.
    Placeholder,
}

static PLACEHOLDER: Image = Image::Placeholder;

#[derive(Clone, Debug, Default)]
pub struct Assets {
    images: HashMap<Sprite, Image>,
    sounds: HashMap<Sound, Vec<u8>>,
}

impl Assets {
    /// Every sprite as a placeholder and no sounds.
    pub fn placeholders() -> Self {
        Self {
            images: Sprite::iter().map(|s| (s, Image::Placeholder)).collect(),
            sounds: HashMap::new(),
        }
    }

    /// Load the whole manifest from `root`.
    pub fn load(root: &Path) -> Result<Self, AssetError> {
        match fs::metadata(root) {
            Ok(meta) if !meta.is_dir() => {
                return Err(AssetError::RootNotDirectory(root.to_path_buf()));
            }
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(root = %root.display(), "Asset root missing, using placeholders");
                return Ok(Self::placeholders());
            }
            Err(source) => {
                return Err(AssetError::RootUnreadable {
                    path: root.to_path_buf(),
                    source,
                });
            }
        }
        fs::read_dir(root).map_err(|source| AssetError::RootUnreadable {
            path: root.to_path_buf(),
            source,
        })?;

        let mut assets = Self::default();
        for sprite in Sprite::iter() {
            let image = match read(root, sprite.path()) {
                Ok(bytes) => Image::Loaded(bytes),
                Err(e) => {
                    warn!(?sprite, error = %e, "Using placeholder image");
                    Image::Placeholder
                }
            };
            assets.images.insert(sprite, image);
        }
        for sound in Sound::iter() {
            match read(root, sound.path()) {
                Ok(bytes) => {
                    assets.sounds.insert(sound, bytes);
                }
                Err(e) => debug!(?sound, error = %e, "Sound unavailable"),
            }
        }

        info!(
            root = %root.display(),
            missing_images = assets.missing_images(),
            sounds = assets.sounds.len(),
            "Assets loaded"
        );
        Ok(assets)
    }

    pub fn image(&self, sprite: Sprite) -> &Image {
        self.images.get(&sprite).unwrap_or(&PLACEHOLDER)
    }

    pub fn is_placeholder(&self, sprite: Sprite) -> bool {
        matches!(self.image(sprite), Image::Placeholder)
    }

    pub fn sound(&self, sound: Sound) -> Option<&[u8]> {
        self.sounds.get(&sound).map(Vec::as_slice)
    }

    pub fn missing_images(&self) -> usize {
        Sprite::iter().filter(|s| self.is_placeholder(*s)).count()
    }
}

fn read(root: &Path, relative: &str) -> Result<Vec<u8>, AssetError> {
    let path: PathBuf = root.join(relative);
    fs::read(&path).map_err(|source| AssetError::Load { path, source })
}
