//! The level guardian.

use crate::constants::*;
use crate::entities::{frame_scale, Hitbox, Owner, Projectile, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossPhase {
    /// Sliding in from the right until it reaches its stop x.
    Entering,
    /// Bobbing up and down between the patrol bounds.
    Patrolling,
    Dead,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Boss {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub health: u32,
    pub max_health: u32,
    pub phase: BossPhase,
    /// Milliseconds since the last shot.
    pub shot_timer: f32,
    stop_x: f32,
}

impl Boss {
    pub fn spawn(playfield_width: f32) -> Self {
        Self {
            x: playfield_width + BOSS_SPAWN_OFFSET,
            y: BOSS_SPAWN_Y,
            width: BOSS_SIZE,
            height: BOSS_SIZE,
            velocity_x: BOSS_ENTER_SPEED,
            velocity_y: BOSS_PATROL_SPEED,
            health: BOSS_MAX_HEALTH,
            max_health: BOSS_MAX_HEALTH,
            phase: BossPhase::Entering,
            shot_timer: 0.0,
            stop_x: playfield_width - BOSS_SIZE - BOSS_STOP_GAP,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.phase == BossPhase::Dead
    }

    pub fn stop_x(&self) -> f32 {
        self.stop_x
    }

    /// Move and, when the cooldown elapses, return a shot.
    pub fn update(&mut self, dt: f32) -> Option<Projectile> {
        let k = frame_scale(dt);
        match self.phase {
            BossPhase::Dead => return None,
            BossPhase::Entering => {
                self.x += self.velocity_x * k;
                if self.x <= self.stop_x {
                    self.phase = BossPhase::Patrolling;
                    self.velocity_x = 0.0;
                }
            }
            BossPhase::Patrolling => {
                if (self.y <= BOSS_PATROL_TOP && self.velocity_y < 0.0)
                    || (self.y >= BOSS_PATROL_BOTTOM && self.velocity_y > 0.0)
                {
                    self.velocity_y = -self.velocity_y;
                }
                self.y += self.velocity_y * k;
            }
        }

        self.shot_timer += dt;
        if self.shot_timer >= BOSS_SHOT_COOLDOWN_MS {
            self.shot_timer = 0.0;
            return Some(Projectile::new(
                self.x,
                self.y + self.height / 2.0,
                BOSS_PROJECTILE_SPEED,
                BOSS_PROJECTILE_DAMAGE,
                Owner::Enemy,
            ));
        }
        None
    }

    /// Returns true only on the hit that kills the boss.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if self.is_dead() {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.phase = BossPhase::Dead;
            return true;
        }
        false
    }

    /// The health bar's full background and filled foreground, in that order.
    /// `None` once the boss is dead.
    pub fn health_bar(&self) -> Option<(Rect, Rect)> {
        if self.is_dead() {
            return None;
        }
        let y = self.y - BOSS_HEALTH_BAR_OFFSET;
        let fill = self.width * self.health as f32 / self.max_health as f32;
        Some((
            Rect::new(self.x, y, self.width, BOSS_HEALTH_BAR_HEIGHT),
            Rect::new(self.x, y, fill, BOSS_HEALTH_BAR_HEIGHT),
        ))
    }
}

impl Hitbox for Boss {
    fn hitbox(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}
