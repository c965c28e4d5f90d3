use kuelap_runner::boss::{Boss, BossPhase};
use kuelap_runner::entities::*;
use kuelap_runner::player::{DamageOutcome, Player, PlayerPose};
use pretty_assertions::assert_eq;

mod common;
use common::*;

// ── Rect & frame scaling ──────────────────────────────────────────────────────

#[test]
fn rect_edges() {
    let r = Rect::new(10.0, 20.0, 30.0, 40.0);
    assert_eq!(r.right(), 40.0);
    assert_eq!(r.bottom(), 60.0);
}

#[test]
fn frame_scale_is_relative_to_sixteen_ms() {
    assert_eq!(frame_scale(16.0), 1.0);
    assert_eq!(frame_scale(32.0), 2.0);
    assert_eq!(frame_scale(8.0), 0.5);
}

#[test]
fn status_is_over() {
    assert!(!GameStatus::Playing.is_over());
    assert!(!GameStatus::Paused.is_over());
    assert!(GameStatus::GameOver.is_over());
    assert!(GameStatus::LevelComplete.is_over());
}

// ── Player: movement ──────────────────────────────────────────────────────────

#[test]
fn player_starts_on_the_ground() {
    let p = Player::new();
    assert_eq!(p.x, 100.0);
    assert_eq!(p.y, 360.0); // ground line 440 - height 80
    assert_eq!(p.health, 3);
    assert_eq!(p.pose(0.0), PlayerPose::Running(0));
}

#[test]
fn jump_integrates_velocity_then_gravity() {
    let mut p = Player::new();
    assert!(p.jump());
    p.update(FRAME_MS, FRAME_MS);
    assert_eq!(p.y, 346.0);
    assert!((p.velocity_y - -13.6).abs() < 1e-4);
}

#[test]
fn jump_scales_with_elapsed_time() {
    let mut p = Player::new();
    p.jump();
    p.update(32.0, 32.0);
    assert_eq!(p.y, 332.0);
    assert!((p.velocity_y - -13.2).abs() < 1e-4);
}

#[test]
fn jump_peaks_and_lands() {
    let mut p = Player::new();
    p.jump();
    assert!(!p.jump(), "no double jump");

    let mut apex = p.y;
    let mut now = 0.0;
    for _ in 0..200 {
        now += FRAME_MS;
        p.update(FRAME_MS, now);
        apex = apex.min(p.y);
    }

    assert!(apex > 100.0 && apex < 120.0, "apex was {}", apex);
    assert!(!p.jumping);
    assert_eq!(p.y, 360.0);
    assert_eq!(p.velocity_y, 0.0);
}

#[test]
fn duck_shrinks_in_place() {
    let mut p = Player::new();
    assert!(p.duck(true));
    assert_eq!(p.height, 50.0);
    assert_eq!(p.y, 390.0);
    assert_eq!(p.hitbox().height, 50.0);
    assert_eq!(p.pose(0.0), PlayerPose::Ducking);

    p.update(FRAME_MS, FRAME_MS);
    assert_eq!(p.y, 390.0);

    p.duck(false);
    assert_eq!(p.height, 80.0);
    assert_eq!(p.y, 360.0);
}

#[test]
fn landing_restores_standing_height() {
    let mut p = Player::new();
    p.jump();
    let mut now = 0.0;
    while p.jumping {
        now += FRAME_MS;
        p.update(FRAME_MS, now);
    }
    assert_eq!(p.height, 80.0);
    assert_eq!(p.y + p.height, 440.0);
}

#[test]
fn no_duck_in_the_air_and_no_jump_while_ducking() {
    let mut p = Player::new();
    p.jump();
    assert!(!p.duck(true));

    let mut q = Player::new();
    q.duck(true);
    assert!(!q.jump());
}

#[test]
fn run_animation_alternates() {
    let mut p = Player::new();
    let mut now = 0.0;
    for _ in 0..7 {
        now += FRAME_MS;
        p.update(FRAME_MS, now);
    }
    assert_eq!(p.pose(now), PlayerPose::Running(1));
}

// ── Player: shooting ──────────────────────────────────────────────────────────

#[test]
fn shot_leaves_from_the_players_front() {
    let mut p = Player::new();
    let shot = p.try_shoot(0.0).unwrap();
    assert_eq!(shot.x, 160.0);
    assert_eq!(shot.y, 396.0);
    assert_eq!(shot.velocity, 12.0);
    assert_eq!(shot.damage, 1);
    assert_eq!(shot.owner, Owner::Player);
}

#[test]
fn shooting_pose_and_cooldown() {
    let mut p = Player::new();
    assert!(p.try_shoot(1000.0).is_some());
    assert_eq!(p.pose(1050.0), PlayerPose::Shooting);
    assert_eq!(p.pose(1150.0), PlayerPose::Running(0));

    assert!(p.try_shoot(1300.0).is_none());
    assert!(p.try_shoot(1301.0).is_some());
}

// ── Player: damage & blinking ─────────────────────────────────────────────────

#[test]
fn damage_grants_invulnerability() {
    let mut p = Player::new();
    assert_eq!(p.take_damage(1, 0.0), DamageOutcome::Hurt);
    assert_eq!(p.health, 2);
    assert!(p.is_invulnerable(999.0));
    assert_eq!(p.take_damage(1, 500.0), DamageOutcome::Ignored);
    assert_eq!(p.health, 2);

    assert!(!p.is_invulnerable(1000.0));
    assert_eq!(p.take_damage(1, 1000.0), DamageOutcome::Hurt);
    assert_eq!(p.health, 1);
}

#[test]
fn invulnerability_expires_on_update() {
    let mut p = Player::new();
    p.take_damage(1, 0.0);
    p.update(FRAME_MS, 1001.0);
    assert_eq!(p.invulnerable_until, None);
}

#[test]
fn blink_toggles_every_hundred_ms() {
    let mut p = Player::new();
    p.take_damage(1, 0.0);

    assert!(p.is_visible(50.0));
    assert!(!p.is_visible(150.0));
    assert!(p.is_visible(250.0));
    assert!(!p.is_visible(950.0));
    assert!(p.is_visible(1000.0));
}

#[test]
fn heavy_damage_kills_outright() {
    let mut p = Player::new();
    assert_eq!(p.take_damage(5, 0.0), DamageOutcome::Killed);
    assert_eq!(p.health, 0);
    assert!(p.dead);

    assert_eq!(p.pose(0.0), PlayerPose::Dead);
    assert!(p.is_visible(50.0));
    assert!(!p.jump());
    assert!(p.try_shoot(5000.0).is_none());
    assert_eq!(p.take_damage(1, 5000.0), DamageOutcome::Ignored);
}

// ── Obstacles, enemies, projectiles ───────────────────────────────────────────

#[test]
fn obstacle_sits_on_the_ground() {
    let o = Obstacle::spawn(4.0);
    assert_eq!(o.x, 1000.0);
    assert_eq!(o.y + o.height, 440.0);
}

#[test]
fn enemy_spawns_in_the_air_with_jittered_speed() {
    let mut rng = seeded_rng();
    for _ in 0..100 {
        let e = Enemy::spawn(4.0, &mut rng);
        assert_eq!(e.x, 1000.0);
        assert!(e.y >= 250.0 && e.y <= 350.0, "y was {}", e.y);
        assert!(e.speed >= 3.75 && e.speed < 4.25, "speed was {}", e.speed);
    }
}

#[test]
fn projectile_bounds_include_its_own_size() {
    let mut shot = Projectile::new(995.0, 100.0, 12.0, 1, Owner::Player);
    assert!(shot.in_bounds(1000.0, 500.0));
    shot.advance(FRAME_MS);
    assert_eq!(shot.x, 1007.0);
    assert!(shot.in_bounds(1000.0, 500.0));
    shot.advance(FRAME_MS);
    assert!(!shot.in_bounds(1000.0, 500.0));

    let back = Projectile::new(-11.0, 100.0, -8.0, 1, Owner::Enemy);
    assert!(!back.in_bounds(1000.0, 500.0));
}

// ── Boss ──────────────────────────────────────────────────────────────────────

#[test]
fn boss_enters_then_patrols() {
    let mut boss = Boss::spawn(1000.0);
    assert_eq!(boss.x, 1100.0);
    assert_eq!(boss.stop_x(), 830.0);
    assert_eq!(boss.phase, BossPhase::Entering);

    let mut frames = 0;
    while boss.phase == BossPhase::Entering && frames < 1000 {
        boss.update(FRAME_MS);
        frames += 1;
    }

    assert_eq!(boss.phase, BossPhase::Patrolling);
    assert!(boss.x <= 830.0);
    assert_eq!(boss.velocity_x, 0.0);
    assert_eq!(boss.y, 100.0, "no vertical motion while entering");
}

#[test]
fn boss_patrol_turns_at_the_bounds() {
    let mut boss = Boss::spawn(1000.0);
    boss.phase = BossPhase::Patrolling;

    boss.y = 200.0;
    boss.velocity_y = 0.5;
    boss.update(FRAME_MS);
    assert_eq!(boss.velocity_y, -0.5);
    assert_eq!(boss.y, 199.5);

    boss.y = 80.0;
    boss.update(FRAME_MS);
    assert_eq!(boss.velocity_y, 0.5);

    for _ in 0..2000 {
        boss.update(FRAME_MS);
        assert!(boss.y >= 79.5 && boss.y <= 200.5, "y was {}", boss.y);
    }
}

#[test]
fn boss_fires_every_two_and_a_half_seconds() {
    let mut boss = Boss::spawn(1000.0);
    let mut shots = Vec::new();
    for _ in 0..400 {
        if let Some(shot) = boss.update(FRAME_MS) {
            shots.push((shot, boss.y));
        }
    }

    assert_eq!(shots.len(), 2);
    for (shot, y) in &shots {
        assert_eq!(shot.owner, Owner::Enemy);
        assert_eq!(shot.velocity, -8.0);
        assert_eq!(shot.y, y + 60.0);
    }
}

#[test]
fn boss_dies_on_the_twentieth_hit() {
    let mut boss = Boss::spawn(1000.0);
    for _ in 0..19 {
        assert!(!boss.take_damage(1));
    }
    assert!(!boss.is_dead());
    assert!(boss.take_damage(1));
    assert!(boss.is_dead());
    assert!(!boss.take_damage(1));
    assert!(boss.update(10_000.0).is_none());
}

#[test]
fn boss_health_bar_tracks_health() {
    let mut boss = Boss::spawn(1000.0);
    let (bg, fill) = boss.health_bar().unwrap();
    assert_eq!(bg.width, 120.0);
    assert_eq!(fill.width, 120.0);
    assert_eq!(bg.y, boss.y - 20.0);

    for _ in 0..10 {
        boss.take_damage(1);
    }
    let (_, fill) = boss.health_bar().unwrap();
    assert_eq!(fill.width, 60.0);

    for _ in 0..10 {
        boss.take_damage(1);
    }
    assert!(boss.health_bar().is_none());
}
