//! Per-level configuration and spawn timing.

use rand::Rng;
use tracing::{debug, info};

use crate::assets::Sprite;

/// Static description of a level. Built once when a run starts and never
/// changed afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelConfig {
    pub number: u32,
    pub name: String,
    /// Leftward drift of obstacles and base speed of enemies.
    pub speed: f32,
    /// Level time after which regular spawns stop and the boss appears.
    pub boss_after: f32,
    pub spawn_interval_min: f32,
    pub spawn_interval_max: f32,
    /// Chance a regular spawn is an obstacle; otherwise it is a bird.
    pub obstacle_chance: f32,
    pub background: Sprite,
    pub objective: String,
    pub has_boss: bool,
}

impl LevelConfig {
    /// Levels 1–3 have their own tables; any other number gets the default.
    pub fn for_level(number: u32) -> Self {
        match number {
            1 => Self::site(
                1,
                "Kuélap Fortress",
                "Kuélap",
                2.0,
                30_000.0,
                (1500.0, 3000.0),
                0.7,
                Sprite::BackgroundKuelap,
            ),
            2 => Self::site(
                2,
                "Gocta Falls",
                "Gocta",
                4.0,
                45_000.0,
                (1000.0, 2000.0),
                0.6,
                Sprite::BackgroundGocta,
            ),
            3 => Self::site(
                3,
                "Karajía Sarcophagi",
                "Karajía",
                6.0,
                60_000.0,
                (800.0, 1500.0),
                0.5,
                Sprite::BackgroundKarajia,
            ),
            _ => {
                debug!(number, "No table for level, using defaults");
                Self {
                    number,
                    name: format!("Level {}", number),
                    speed: 5.0,
                    boss_after: 30_000.0,
                    spawn_interval_min: 1500.0,
                    spawn_interval_max: 3000.0,
                    obstacle_chance: 0.7,
                    background: Sprite::BackgroundKuelap,
                    objective: "Defeat the Guardian".to_string(),
                    has_boss: true,
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn site(
        number: u32,
        name: &str,
        site: &str,
        speed: f32,
        boss_after: f32,
        (spawn_interval_min, spawn_interval_max): (f32, f32),
        obstacle_chance: f32,
        background: Sprite,
    ) -> Self {
        Self {
            number,
            name: name.to_string(),
            speed,
            boss_after,
            spawn_interval_min,
            spawn_interval_max,
            obstacle_chance,
            background,
            objective: format!("Defeat the Guardian of {}", site),
            has_boss: true,
        }
    }

    /// Chance a regular spawn is a bird.
    pub fn enemy_chance(&self) -> f32 {
        1.0 - self.obstacle_chance
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelPhase {
    PreBoss,
    BossSpawned,
    BossDefeated,
}

/// What the level wants spawned this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Spawn {
    Obstacle,
    Enemy,
    Boss,
}

#[derive(Clone, Debug)]
pub struct Level {
    pub config: LevelConfig,
    pub phase: LevelPhase,
    /// Total level time.
    pub elapsed: f32,
    /// Time since the last regular spawn.
    pub spawn_timer: f32,
    /// Interval that must pass before the next regular spawn.
    pub next_spawn_in: f32,
}

impl Level {
    pub fn new(number: u32, rng: &mut impl Rng) -> Self {
        let config = LevelConfig::for_level(number);
        info!(number, name = %config.name, speed = config.speed, "Loading level");
        let next_spawn_in = draw_interval(&config, rng);
        Self {
            config,
            phase: LevelPhase::PreBoss,
            elapsed: 0.0,
            spawn_timer: 0.0,
            next_spawn_in,
        }
    }

    pub fn number(&self) -> u32 {
        self.config.number
    }

    /// Advance the level clock and return at most one spawn.
    pub fn update(&mut self, dt: f32, rng: &mut impl Rng) -> Option<Spawn> {
        if self.phase != LevelPhase::PreBoss {
            return None;
        }

        self.elapsed += dt;
        self.spawn_timer += dt;

        if self.elapsed < self.config.boss_after {
            if self.spawn_timer >= self.next_spawn_in {
                self.spawn_timer = 0.0;
                self.next_spawn_in = draw_interval(&self.config, rng);
                let spawn = if rng.gen::<f32>() < self.config.obstacle_chance {
                    Spawn::Obstacle
                } else {
                    Spawn::Enemy
                };
                return Some(spawn);
            }
            return None;
        }

        if self.config.has_boss {
            self.phase = LevelPhase::BossSpawned;
            info!(elapsed = self.elapsed, "Boss trigger reached");
            return Some(Spawn::Boss);
        }
        None
    }
}

fn draw_interval(config: &LevelConfig, rng: &mut impl Rng) -> f32 {
    if config.spawn_interval_max > config.spawn_interval_min {
        rng.gen_range(config.spawn_interval_min..=config.spawn_interval_max)
    } else {
        config.spawn_interval_min
    }
}
