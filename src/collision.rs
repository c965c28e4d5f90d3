//! Bounding-box overlap and the per-frame damage pass.

use tracing::debug;

use crate::assets::Sound;
use crate::compute::game_over;
use crate::constants::*;
use crate::entities::{GameState, Hitbox, Owner, Rect};
use crate::player::DamageOutcome;
use crate::presenter::Presenter;

/// Overlap test with every edge pulled in by the collision margin.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() - COLLISION_MARGIN
        && a.right() - COLLISION_MARGIN > b.x
        && a.y < b.bottom() - COLLISION_MARGIN
        && a.bottom() - COLLISION_MARGIN > b.y
}

pub fn check_collision(a: &impl Hitbox, b: &impl Hitbox) -> bool {
    overlaps(&a.hitbox(), &b.hitbox())
}

/// Damage the player and report it. A kill ends the run.
pub fn damage_player(state: &mut GameState, amount: u32, presenter: &mut impl Presenter) {
    let outcome = state.player.take_damage(amount, state.clock);
    if outcome == DamageOutcome::Ignored {
        return;
    }
    presenter.play_sound(Sound::Hit);
    presenter.set_health(state.player.health, state.player.max_health);
    if outcome == DamageOutcome::Killed {
        game_over(state, presenter);
    }
}

/// Resolve this frame's collisions.
///
/// Order: obstacles and enemies against the player, then projectiles, then
/// contact with the boss. The projectile pass stops at the first hit and
/// ends the whole resolution for the frame, so simultaneous projectile hits
/// land on consecutive frames.
pub fn resolve_collisions(state: &mut GameState, presenter: &mut impl Presenter) {
    for i in (0..state.obstacles.len()).rev() {
        if check_collision(&state.player, &state.obstacles[i]) {
            damage_player(state, 1, presenter);
            state.obstacles.remove(i);
            presenter.play_sound(Sound::PlayerHit);
        }
    }

    for i in (0..state.enemies.len()).rev() {
        if check_collision(&state.player, &state.enemies[i]) {
            damage_player(state, 1, presenter);
            state.enemies.remove(i);
            presenter.play_sound(Sound::PlayerHit);
        }
    }

    // A death above ends the run; nothing else may score this frame.
    if state.status.is_over() || resolve_first_projectile_hit(state, presenter) {
        return;
    }

    let touching_boss = state
        .live_boss()
        .is_some_and(|boss| !state.player.dead && check_collision(&state.player, boss));
    if touching_boss {
        damage_player(state, BOSS_CONTACT_DAMAGE, presenter);
        presenter.play_sound(Sound::PlayerHit);
    }
}

/// Returns true when a projectile hit something.
fn resolve_first_projectile_hit(state: &mut GameState, presenter: &mut impl Presenter) -> bool {
    for i in (0..state.projectiles.len()).rev() {
        let projectile = state.projectiles[i].clone();
        match projectile.owner {
            Owner::Player => {
                if let Some(j) = (0..state.enemies.len())
                    .rev()
                    .find(|&j| check_collision(&projectile, &state.enemies[j]))
                {
                    state.enemies.remove(j);
                    state.projectiles.remove(i);
                    state.score += SCORE_ENEMY_KILL;
                    presenter.play_sound(Sound::Hit);
                    return true;
                }

                if let Some(boss) = state.boss.as_mut().filter(|b| !b.is_dead()) {
                    if check_collision(&projectile, &*boss) {
                        let killed = boss.take_damage(projectile.damage);
                        debug!(
                            health = boss.health,
                            damage = projectile.damage,
                            killed,
                            "Boss hit"
                        );
                        state.projectiles.remove(i);
                        state.score += SCORE_BOSS_HIT;
                        presenter.play_sound(Sound::BossHit);
                        return true;
                    }
                }
            }
            Owner::Enemy => {
                if !state.player.dead && check_collision(&projectile, &state.player) {
                    damage_player(state, projectile.damage, presenter);
                    state.projectiles.remove(i);
                    presenter.play_sound(Sound::PlayerHit);
                    return true;
                }
            }
        }
    }
    false
}
