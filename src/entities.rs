/// Game entity types and the run state that owns them.
///
/// Obstacles, enemies and projectiles are plain data with a single
/// time-scaled `advance`; the player and boss carry more behaviour and live
/// in their own modules.

use std::collections::BTreeSet;

use rand::Rng;

use crate::boss::Boss;
use crate::constants::*;
use crate::level::Level;
use crate::player::Player;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Paused,
    GameOver,
    LevelComplete,
}

impl GameStatus {
    /// Game over and level complete both end the run.
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::GameOver | GameStatus::LevelComplete)
    }
}

/// Which side fired a projectile; decides the collision branch it takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Owner {
    Player,
    Enemy,
}

/// Converts a millisecond delta into frame units.
pub fn frame_scale(dt: f32) -> f32 {
    dt / FRAME_UNIT_MS
}

// ── Bounding boxes ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Anything that takes part in collision checks.
pub trait Hitbox {
    fn hitbox(&self) -> Rect;
}

// ── Obstacles ─────────────────────────────────────────────────────────────────

/// A stone sitting on the ground.
#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Obstacle {
    pub fn spawn(speed: f32) -> Self {
        Self {
            x: PLAYFIELD_WIDTH,
            y: ground_y() - OBSTACLE_HEIGHT,
            width: OBSTACLE_WIDTH,
            height: OBSTACLE_HEIGHT,
            speed,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.x -= self.speed * frame_scale(dt);
    }

    /// Still (partly) on screen.
    pub fn is_visible(&self) -> bool {
        self.x + self.width > 0.0
    }
}

impl Hitbox for Obstacle {
    fn hitbox(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

/// A bird flying at a random height above the ground.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Enemy {
    pub fn spawn(level_speed: f32, rng: &mut impl Rng) -> Self {
        let altitude = rng.gen_range(ENEMY_ALTITUDE_MIN..ENEMY_ALTITUDE_MAX);
        let jitter = rng.gen_range(-ENEMY_SPEED_JITTER..ENEMY_SPEED_JITTER);
        Self {
            x: PLAYFIELD_WIDTH,
            y: ground_y() - ENEMY_HEIGHT - altitude,
            width: ENEMY_WIDTH,
            height: ENEMY_HEIGHT,
            speed: level_speed + jitter,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.x -= self.speed * frame_scale(dt);
    }

    pub fn is_visible(&self) -> bool {
        self.x + self.width > 0.0
    }
}

impl Hitbox for Enemy {
    fn hitbox(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontal velocity; positive moves right.
    pub velocity: f32,
    pub damage: u32,
    pub owner: Owner,
}

impl Projectile {
    pub fn new(x: f32, y: f32, velocity: f32, damage: u32, owner: Owner) -> Self {
        Self {
            x,
            y,
            width: PROJECTILE_SIZE,
            height: PROJECTILE_SIZE,
            velocity,
            damage,
            owner,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.x += self.velocity * frame_scale(dt);
    }

    /// Inside the playfield, extended by the projectile's own size.
    pub fn in_bounds(&self, width: f32, height: f32) -> bool {
        self.x > -self.width
            && self.x < width + self.width
            && self.y > -self.height
            && self.y < height + self.height
    }
}

impl Hitbox for Projectile {
    fn hitbox(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything that belongs to one run of one level. A new value is built on
/// every (re)start, so no field survives a restart except `unlocked_levels`,
/// which the caller carries over.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub level: Level,
    pub obstacles: Vec<Obstacle>,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub boss: Option<Boss>,
    pub score: f32,
    pub status: GameStatus,
    /// Milliseconds of update time elapsed in this run.
    pub clock: f32,
    pub unlocked_levels: BTreeSet<u32>,
    pub width: f32,
    pub height: f32,
}

impl GameState {
    /// The score as shown to the player.
    pub fn display_score(&self) -> u32 {
        self.score.max(0.0).floor() as u32
    }

    /// The boss, if one exists and is still alive.
    pub fn live_boss(&self) -> Option<&Boss> {
        self.boss.as_ref().filter(|b| !b.is_dead())
    }
}
