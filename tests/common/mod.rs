#![allow(dead_code)]

use std::collections::BTreeSet;

use kuelap_runner::compute::{init_state, tick};
use kuelap_runner::entities::{Enemy, GameState, Obstacle, Owner, Projectile};
use kuelap_runner::presenter::Presenter;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// One 16 ms frame.
pub const FRAME_MS: f32 = 16.0;

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// A fresh level-1 run with only level 1 unlocked.
pub fn make_state() -> GameState {
    init_state(1, BTreeSet::from([1]), &mut seeded_rng())
}

/// Tick whole frames until `ms` of run time has passed.
pub fn run_for(state: &mut GameState, ms: f32, rng: &mut StdRng, presenter: &mut impl Presenter) {
    let frames = (ms / FRAME_MS).ceil() as u32;
    for _ in 0..frames {
        tick(state, FRAME_MS, rng, presenter);
    }
}

/// A stone parked on the player's position.
pub fn obstacle_on_player(state: &GameState) -> Obstacle {
    Obstacle {
        x: state.player.x + 10.0,
        y: state.player.y,
        width: 40.0,
        height: 70.0,
        speed: 0.0,
    }
}

pub fn enemy_at(x: f32, y: f32) -> Enemy {
    Enemy {
        x,
        y,
        width: 60.0,
        height: 40.0,
        speed: 2.0,
    }
}

pub fn player_shot_at(x: f32, y: f32) -> Projectile {
    Projectile::new(x, y, 12.0, 1, Owner::Player)
}

/// Stop the level from spawning anything during a test.
pub fn hold_spawns(state: &mut GameState) {
    state.level.next_spawn_in = f32::MAX;
}
