/// Game-loop logic.
///
/// Every public function takes the run's `GameState` by mutable reference,
/// plus an RNG handle and a presenter where needed. There is no global state:
/// the caller owns the run and all randomness comes through `rng`, so a seeded
/// RNG makes a run fully reproducible.
use std::collections::BTreeSet;

use rand::Rng;
use tracing::{debug, info};

use crate::assets::Sound;
use crate::boss::Boss;
use crate::collision::resolve_collisions;
use crate::constants::*;
use crate::entities::{Enemy, GameState, GameStatus, Obstacle};
use crate::input::Action;
use crate::level::{Level, LevelPhase, Spawn};
use crate::player::Player;
use crate::presenter::{LevelSummary, Presenter};
use crate::voice::VoiceCommand;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh run of `level`. Unknown level numbers get the default level
/// configuration.
pub fn init_state(level: u32, unlocked_levels: BTreeSet<u32>, rng: &mut impl Rng) -> GameState {
    GameState {
        player: Player::new(),
        level: Level::new(level, rng),
        obstacles: Vec::new(),
        enemies: Vec::new(),
        projectiles: Vec::new(),
        boss: None,
        score: 0.0,
        status: GameStatus::Playing,
        clock: 0.0,
        unlocked_levels,
        width: PLAYFIELD_WIDTH,
        height: PLAYFIELD_HEIGHT,
    }
}

/// Rebuild the current level from scratch, keeping the unlocked levels.
pub fn restart(state: &GameState, rng: &mut impl Rng) -> GameState {
    init_state(state.level.number(), state.unlocked_levels.clone(), rng)
}

/// The level after `current`, if there is one.
pub fn next_level_number(current: u32) -> Option<u32> {
    (current < MAX_LEVEL).then_some(current + 1)
}

/// Push the level name, objective, health and score to the UI.
pub fn announce_level(state: &GameState, presenter: &mut impl Presenter) {
    presenter.set_level_info(&state.level.config.name, &state.level.config.objective);
    sync_ui(state, presenter);
}

fn sync_ui(state: &GameState, presenter: &mut impl Presenter) {
    presenter.set_score(state.display_score());
    presenter.set_health(state.player.health, state.player.max_health);
}

// ── Status transitions ───────────────────────────────────────────────────────

pub fn pause(state: &mut GameState) -> bool {
    if state.status != GameStatus::Playing {
        return false;
    }
    state.status = GameStatus::Paused;
    info!("Game paused");
    true
}

pub fn resume(state: &mut GameState) -> bool {
    if state.status != GameStatus::Paused {
        return false;
    }
    state.status = GameStatus::Playing;
    info!("Game resumed");
    true
}

pub fn toggle_pause(state: &mut GameState) -> bool {
    pause(state) || resume(state)
}

/// End the run in defeat. Does nothing if the run has already ended.
pub fn game_over(state: &mut GameState, presenter: &mut impl Presenter) {
    if state.status.is_over() {
        return;
    }
    state.status = GameStatus::GameOver;
    info!(score = state.display_score(), level = state.level.number(), "Game over");
    presenter.play_sound(Sound::GameOver);
    presenter.show_game_over(state.display_score());
}

/// End the run in victory and unlock the next level. Does nothing if the run
/// has already ended.
pub fn level_complete(state: &mut GameState, presenter: &mut impl Presenter) {
    if state.status.is_over() {
        return;
    }
    state.status = GameStatus::LevelComplete;
    state.level.phase = LevelPhase::BossDefeated;

    let number = state.level.number();
    info!(score = state.display_score(), level = number, "Level complete");
    presenter.play_sound(Sound::LevelComplete);

    let next = next_level_number(number);
    if let Some(next) = next {
        if state.unlocked_levels.insert(next) {
            info!(level = next, "Level unlocked");
            presenter.level_unlocked(next);
        }
    }

    presenter.show_level_complete(&LevelSummary {
        level: number,
        name: state.level.config.name.clone(),
        score: state.display_score(),
        has_next: next.is_some(),
    });
}

// ── Player actions ───────────────────────────────────────────────────────────

/// Input only reaches a running, living player.
fn accepts_input(state: &GameState) -> bool {
    state.status == GameStatus::Playing && !state.player.dead
}

pub fn player_jump(state: &mut GameState, presenter: &mut impl Presenter) -> bool {
    if !accepts_input(state) || !state.player.jump() {
        return false;
    }
    presenter.play_sound(Sound::Jump);
    true
}

pub fn player_duck(state: &mut GameState, on: bool) -> bool {
    accepts_input(state) && state.player.duck(on)
}

pub fn player_shoot(state: &mut GameState, presenter: &mut impl Presenter) -> bool {
    if !accepts_input(state) {
        return false;
    }
    match state.player.try_shoot(state.clock) {
        Some(projectile) => {
            state.projectiles.push(projectile);
            presenter.play_sound(Sound::Shoot);
            true
        }
        None => false,
    }
}

/// Apply a keyboard action to the run. Actions that concern menus or the
/// terminal (restart, quit, …) are the caller's and return false here.
pub fn apply_action(state: &mut GameState, action: Action, presenter: &mut impl Presenter) -> bool {
    match action {
        Action::Jump => player_jump(state, presenter),
        Action::Shoot => player_shoot(state, presenter),
        Action::DuckOn => player_duck(state, true),
        Action::DuckOff => player_duck(state, false),
        Action::TogglePause => toggle_pause(state),
        Action::VoicePrompt
        | Action::Restart
        | Action::NextLevel
        | Action::Menu
        | Action::Quit => false,
    }
}

/// Execute a recognised voice command. While the run is paused only
/// `Resume` does anything; after death or the end of the run nothing does.
pub fn apply_voice_command(
    state: &mut GameState,
    command: VoiceCommand,
    presenter: &mut impl Presenter,
) -> bool {
    let handled = match command {
        VoiceCommand::Resume => resume(state),
        _ if !accepts_input(state) => false,
        VoiceCommand::Pause => pause(state),
        VoiceCommand::Jump => player_jump(state, presenter),
        VoiceCommand::Shoot => player_shoot(state, presenter),
        VoiceCommand::Duck => {
            if state.player.jumping {
                presenter.show_voice_feedback("Can't duck in the air", true);
                return false;
            }
            state.player.duck_for(state.clock, VOICE_DUCK_MS)
        }
        VoiceCommand::Run => {
            if state.player.jumping {
                presenter.show_voice_feedback("Can't run in the air", true);
                return false;
            }
            state.player.duck(false)
        }
    };

    debug!(%command, handled, "Voice command");
    if handled {
        presenter.show_voice_feedback(&command.to_string(), false);
    }
    handled
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

fn spawn(state: &mut GameState, spawn: Spawn, rng: &mut impl Rng, presenter: &mut impl Presenter) {
    let speed = state.level.config.speed;
    match spawn {
        Spawn::Obstacle => state.obstacles.push(Obstacle::spawn(speed)),
        Spawn::Enemy => state.enemies.push(Enemy::spawn(speed, rng)),
        Spawn::Boss => {
            if state.boss.is_none() {
                state.boss = Some(Boss::spawn(state.width));
                info!(level = state.level.number(), "Boss spawned");
                presenter.show_boss_warning(&state.level.config.objective);
                presenter.play_sound(Sound::BossIntro);
            }
        }
    }
}

/// Advance the run by `dt` milliseconds. Does nothing unless the run is
/// playing.
pub fn tick(state: &mut GameState, dt: f32, rng: &mut impl Rng, presenter: &mut impl Presenter) {
    if state.status != GameStatus::Playing {
        return;
    }
    let dt = dt.max(0.0);
    state.clock += dt;
    let now = state.clock;

    state.player.update(dt, now);
    if state.player.dead {
        return;
    }

    if let Some(what) = state.level.update(dt, rng) {
        spawn(state, what, rng, presenter);
    }

    state.score += dt * SCORE_PER_MS * (state.level.config.speed / 4.0);

    for obstacle in &mut state.obstacles {
        obstacle.advance(dt);
    }
    state.obstacles.retain(|o| o.is_visible());

    for enemy in &mut state.enemies {
        enemy.advance(dt);
    }
    state.enemies.retain(|e| e.is_visible());

    for projectile in &mut state.projectiles {
        projectile.advance(dt);
    }
    let (width, height) = (state.width, state.height);
    state.projectiles.retain(|p| p.in_bounds(width, height));

    if let Some(boss) = state.boss.as_mut() {
        if let Some(shot) = boss.update(dt) {
            state.projectiles.push(shot);
            presenter.play_sound(Sound::BossShoot);
        }
    }
    if state.boss.as_ref().is_some_and(Boss::is_dead) {
        level_complete(state, presenter);
        return;
    }

    resolve_collisions(state, presenter);
    sync_ui(state, presenter);
}
