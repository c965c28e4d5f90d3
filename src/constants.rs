//! Game tuning constants.
//!
//! Distances are logical pixels on the 1000×500 playfield, times are
//! milliseconds, and velocities are pixels per frame unit (16 ms).

// ── Playfield ────────────────────────────────────────────────────────────────

pub const PLAYFIELD_WIDTH: f32 = 1000.0;
pub const PLAYFIELD_HEIGHT: f32 = 500.0;
/// Height of the ground strip at the bottom of the playfield.
pub const GROUND_HEIGHT: f32 = 60.0;

/// Velocities are expressed per this many milliseconds.
pub const FRAME_UNIT_MS: f32 = 16.0;

/// Inward forgiveness applied to every edge in the overlap test.
pub const COLLISION_MARGIN: f32 = 5.0;

/// Highest level that exists; completing it unlocks nothing.
pub const MAX_LEVEL: u32 = 3;

// ── Player ───────────────────────────────────────────────────────────────────

pub const PLAYER_X: f32 = 100.0;
pub const PLAYER_WIDTH: f32 = 60.0;
pub const PLAYER_HEIGHT: f32 = 80.0;
pub const PLAYER_DUCK_HEIGHT: f32 = 50.0;
pub const PLAYER_MAX_HEALTH: u32 = 3;
pub const JUMP_VELOCITY: f32 = -14.0;
pub const GRAVITY: f32 = 0.4;

pub const SHOOT_COOLDOWN_MS: f32 = 300.0;
/// How long the shooting pose is held after a shot.
pub const SHOOT_POSE_MS: f32 = 100.0;

pub const BLINK_INTERVAL_MS: f32 = 100.0;
/// 10 visibility toggles, one per blink interval.
pub const INVULNERABILITY_MS: f32 = BLINK_INTERVAL_MS * 10.0;

pub const RUN_FRAME_MS: f32 = 100.0;

/// A voice "duck" releases itself after this long.
pub const VOICE_DUCK_MS: f32 = 500.0;

// ── Projectiles ──────────────────────────────────────────────────────────────

pub const PROJECTILE_SIZE: f32 = 10.0;
pub const PLAYER_PROJECTILE_SPEED: f32 = 12.0;
pub const PLAYER_PROJECTILE_DAMAGE: u32 = 1;
pub const BOSS_PROJECTILE_SPEED: f32 = -8.0;
pub const BOSS_PROJECTILE_DAMAGE: u32 = 1;

// ── Obstacles & enemies ──────────────────────────────────────────────────────

pub const OBSTACLE_WIDTH: f32 = 40.0;
pub const OBSTACLE_HEIGHT: f32 = 70.0;

pub const ENEMY_WIDTH: f32 = 60.0;
pub const ENEMY_HEIGHT: f32 = 40.0;
/// Birds fly between these heights above the ground line.
pub const ENEMY_ALTITUDE_MIN: f32 = 50.0;
pub const ENEMY_ALTITUDE_MAX: f32 = 150.0;
/// Per-bird speed jitter, uniform in [-J, J).
pub const ENEMY_SPEED_JITTER: f32 = 0.25;

// ── Boss ─────────────────────────────────────────────────────────────────────

pub const BOSS_SIZE: f32 = 120.0;
pub const BOSS_MAX_HEALTH: u32 = 20;
/// The boss spawns this far beyond the right edge.
pub const BOSS_SPAWN_OFFSET: f32 = 100.0;
pub const BOSS_SPAWN_Y: f32 = 100.0;
/// Gap between the boss's right side and the playfield edge once it stops.
pub const BOSS_STOP_GAP: f32 = 50.0;
pub const BOSS_ENTER_SPEED: f32 = -0.8;
pub const BOSS_PATROL_SPEED: f32 = 0.5;
pub const BOSS_PATROL_TOP: f32 = 80.0;
pub const BOSS_PATROL_BOTTOM: f32 = 200.0;
pub const BOSS_SHOT_COOLDOWN_MS: f32 = 2500.0;
pub const BOSS_CONTACT_DAMAGE: u32 = 5;
pub const BOSS_HEALTH_BAR_HEIGHT: f32 = 10.0;
pub const BOSS_HEALTH_BAR_OFFSET: f32 = 20.0;

// ── Scoring ──────────────────────────────────────────────────────────────────

/// Distance score per millisecond at speed 4.
pub const SCORE_PER_MS: f32 = 0.01;
pub const SCORE_ENEMY_KILL: f32 = 50.0;
pub const SCORE_BOSS_HIT: f32 = 10.0;

// ── UI ───────────────────────────────────────────────────────────────────────

pub const BOSS_WARNING_MS: u64 = 2500;
pub const VOICE_FEEDBACK_MS: u64 = 1500;

/// Logical y of the ground line.
pub fn ground_y() -> f32 {
    PLAYFIELD_HEIGHT - GROUND_HEIGHT
}
