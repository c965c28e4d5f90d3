//! The player character.
//!
//! Every timed effect (shooting pose, invulnerability blink, voice duck
//! release) is stored as a timestamp on the run clock and checked when the
//! player is updated or drawn, so the player can be driven entirely by
//! simulated time.

use crate::constants::*;
use crate::entities::{frame_scale, Hitbox, Owner, Projectile, Rect};

/// What the player sprite shows this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerPose {
    /// Alternates between two frames while running on the ground.
    Running(u8),
    Jumping,
    Ducking,
    Shooting,
    Dead,
}

/// Result of a call to [`Player::take_damage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Invulnerable or already dead.
    Ignored,
    Hurt,
    Killed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub velocity_y: f32,
    pub jumping: bool,
    pub ducking: bool,
    pub dead: bool,
    pub health: u32,
    pub max_health: u32,
    /// End of the current invulnerability window.
    pub invulnerable_until: Option<f32>,
    pub last_shot_at: Option<f32>,
    /// A scheduled duck release (voice "duck" is temporary).
    pub duck_release_at: Option<f32>,
    pub run_frame: u8,
    run_timer: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            x: PLAYER_X,
            y: Self::ground_level(PLAYER_HEIGHT),
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            velocity_y: 0.0,
            jumping: false,
            ducking: false,
            dead: false,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            invulnerable_until: None,
            last_shot_at: None,
            duck_release_at: None,
            run_frame: 0,
            run_timer: 0.0,
        }
    }

    /// The y at which a player of `height` stands on the ground.
    pub fn ground_level(height: f32) -> f32 {
        ground_y() - height
    }

    pub fn effective_height(&self) -> f32 {
        if self.ducking {
            PLAYER_DUCK_HEIGHT
        } else {
            self.height
        }
    }

    /// Advance by `dt` milliseconds; `now` is the run clock after the advance.
    pub fn update(&mut self, dt: f32, now: f32) {
        if self.dead {
            return;
        }

        if let Some(at) = self.duck_release_at {
            if now >= at {
                self.duck_release_at = None;
                self.duck(false);
            }
        }

        if self.invulnerable_until.is_some_and(|until| now >= until) {
            self.invulnerable_until = None;
        }

        if self.jumping {
            let k = frame_scale(dt);
            self.y += self.velocity_y * k;
            self.velocity_y += GRAVITY * k;

            let ground = Self::ground_level(self.height);
            if self.y >= ground {
                self.y = ground;
                self.jumping = false;
                self.velocity_y = 0.0;
            }
        }

        if !self.jumping && !self.ducking && !self.is_shooting(now) {
            self.run_timer += dt;
            if self.run_timer > RUN_FRAME_MS {
                self.run_timer = 0.0;
                self.run_frame = (self.run_frame + 1) % 2;
            }
        }
    }

    /// Start a jump. Returns whether the jump happened.
    pub fn jump(&mut self) -> bool {
        if self.jumping || self.ducking || self.dead {
            return false;
        }
        self.jumping = true;
        self.velocity_y = JUMP_VELOCITY;
        true
    }

    /// Press or release duck. Ignored in the air and when dead; on the ground
    /// the player shrinks or stands up in place.
    pub fn duck(&mut self, on: bool) -> bool {
        if self.jumping || self.dead {
            return false;
        }
        self.ducking = on;
        if !on {
            self.duck_release_at = None;
        }
        self.height = if on { PLAYER_DUCK_HEIGHT } else { PLAYER_HEIGHT };
        self.y = Self::ground_level(self.height);
        true
    }

    /// Duck now and stand up again at `now + duration`.
    pub fn duck_for(&mut self, now: f32, duration: f32) -> bool {
        if !self.duck(true) {
            return false;
        }
        self.duck_release_at = Some(now + duration);
        true
    }

    /// Fire if the cooldown allows it.
    pub fn try_shoot(&mut self, now: f32) -> Option<Projectile> {
        if self.dead {
            return None;
        }
        if self
            .last_shot_at
            .is_some_and(|last| now - last <= SHOOT_COOLDOWN_MS)
        {
            return None;
        }
        self.last_shot_at = Some(now);
        Some(Projectile::new(
            self.x + self.width,
            self.y + self.height / 2.0 - 4.0,
            PLAYER_PROJECTILE_SPEED,
            PLAYER_PROJECTILE_DAMAGE,
            Owner::Player,
        ))
    }

    pub fn is_shooting(&self, now: f32) -> bool {
        self.last_shot_at
            .is_some_and(|last| now - last < SHOOT_POSE_MS)
    }

    pub fn is_invulnerable(&self, now: f32) -> bool {
        self.invulnerable_until.is_some_and(|until| now < until)
    }

    pub fn take_damage(&mut self, amount: u32, now: f32) -> DamageOutcome {
        if self.dead || self.is_invulnerable(now) {
            return DamageOutcome::Ignored;
        }

        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.dead = true;
            self.invulnerable_until = None;
            self.duck_release_at = None;
            return DamageOutcome::Killed;
        }

        self.invulnerable_until = Some(now + INVULNERABILITY_MS);
        DamageOutcome::Hurt
    }

    /// Blink state. Visibility toggles every blink interval while
    /// invulnerable, starting visible; a dead player is always drawn.
    pub fn is_visible(&self, now: f32) -> bool {
        if self.dead {
            return true;
        }
        match self.invulnerable_until {
            Some(until) if now < until => {
                let since_hit = now - (until - INVULNERABILITY_MS);
                let toggles = (since_hit / BLINK_INTERVAL_MS).floor() as u32;
                toggles % 2 == 0
            }
            _ => true,
        }
    }

    pub fn pose(&self, now: f32) -> PlayerPose {
        if self.dead {
            PlayerPose::Dead
        } else if self.jumping {
            PlayerPose::Jumping
        } else if self.ducking {
            PlayerPose::Ducking
        } else if self.is_shooting(now) {
            PlayerPose::Shooting
        } else {
            PlayerPose::Running(self.run_frame)
        }
    }
}

impl Hitbox for Player {
    fn hitbox(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.effective_height())
    }
}
