/// Rendering layer: all terminal I/O lives here.
///
/// Each draw function receives a mutable writer and an immutable view of the
/// game state. No game logic is performed; this module only translates state
/// into terminal commands. The 1000×500 logical playfield is scaled onto
/// whatever terminal size is available.
use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use kuelap_runner::assets::{Assets, Sound, Sprite};
use kuelap_runner::audio::{Audio, SoundBackend};
use kuelap_runner::constants::{ground_y, BOSS_WARNING_MS, VOICE_FEEDBACK_MS};
use kuelap_runner::entities::{Enemy, GameState, GameStatus, Obstacle, Owner, Projectile, Rect};
use kuelap_runner::error::AudioError;
use kuelap_runner::player::PlayerPose;
use kuelap_runner::presenter::{LevelSummary, Presenter};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HEART: Color = Color::Red;
const C_HUD_HEART_LOST: Color = Color::DarkGrey;
const C_HUD_LEVEL: Color = Color::Green;
const C_GROUND: Color = Color::DarkYellow;
const C_PLAYER: Color = Color::White;
const C_PLAYER_DEAD: Color = Color::Red;
const C_OBSTACLE: Color = Color::Grey;
const C_ENEMY: Color = Color::Yellow;
const C_BOSS: Color = Color::Red;
const C_BOSS_BAR_EMPTY: Color = Color::DarkGrey;
const C_PROJECTILE_PLAYER: Color = Color::Cyan;
const C_PROJECTILE_ENEMY: Color = Color::Magenta;
/// Sprites whose image failed to load are drawn in this colour.
const C_PLACEHOLDER: Color = Color::DarkMagenta;
const C_BANNER: Color = Color::Red;
const C_FEEDBACK: Color = Color::White;
const C_FEEDBACK_ERROR: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

// ── Sound ─────────────────────────────────────────────────────────────────────

/// Rings the terminal bell for the sounds that matter most.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalBell;

impl SoundBackend for TerminalBell {
    fn play(&mut self, sound: Sound, _clip: Option<&[u8]>) -> Result<(), AudioError> {
        if matches!(
            sound,
            Sound::PlayerHit | Sound::BossIntro | Sound::LevelComplete | Sound::GameOver
        ) {
            let mut out = io::stdout();
            out.write_all(b"\x07")?;
            out.flush()?;
        }
        Ok(())
    }
}

// ── HUD (presentation sink) ───────────────────────────────────────────────────

/// The panel shown once a run ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EndPanel {
    GameOver { score: u32 },
    LevelComplete(LevelSummary),
}

/// Everything outside the playfield: score, hearts, level text, banners and
/// end-of-run panels. The game core writes to it through [`Presenter`].
pub struct Hud {
    pub score: u32,
    pub health: u32,
    pub max_health: u32,
    pub level_name: String,
    pub objective: String,
    banner: Option<(String, Instant)>,
    feedback: Option<(String, bool, Instant)>,
    pub end_panel: Option<EndPanel>,
    unlocked: Vec<u32>,
    pub audio: Audio<TerminalBell>,
}

impl Hud {
    pub fn new(audio: Audio<TerminalBell>) -> Self {
        Self {
            score: 0,
            health: 0,
            max_health: 0,
            level_name: String::new(),
            objective: String::new(),
            banner: None,
            feedback: None,
            end_panel: None,
            unlocked: Vec::new(),
            audio,
        }
    }

    /// Clear per-run state before a new run starts.
    pub fn reset(&mut self) {
        self.score = 0;
        self.banner = None;
        self.feedback = None;
        self.end_panel = None;
    }

    /// Levels unlocked since the last call.
    pub fn take_unlocked(&mut self) -> Vec<u32> {
        std::mem::take(&mut self.unlocked)
    }

    fn active_banner(&self) -> Option<&str> {
        self.banner
            .as_ref()
            .filter(|(_, until)| Instant::now() < *until)
            .map(|(text, _)| text.as_str())
    }

    fn active_feedback(&self) -> Option<(&str, bool)> {
        self.feedback
            .as_ref()
            .filter(|(_, _, until)| Instant::now() < *until)
            .map(|(text, is_error, _)| (text.as_str(), *is_error))
    }
}

impl Presenter for Hud {
    fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    fn set_health(&mut self, health: u32, max: u32) {
        self.health = health;
        self.max_health = max;
    }

    fn set_level_info(&mut self, name: &str, objective: &str) {
        self.level_name = name.to_string();
        self.objective = objective.to_string();
    }

    fn show_boss_warning(&mut self, objective: &str) {
        let until = Instant::now() + Duration::from_millis(BOSS_WARNING_MS);
        self.banner = Some((format!("GUARDIAN APPEARED! Objective: {}", objective), until));
    }

    fn show_game_over(&mut self, final_score: u32) {
        self.end_panel = Some(EndPanel::GameOver { score: final_score });
    }

    fn show_level_complete(&mut self, summary: &LevelSummary) {
        self.end_panel = Some(EndPanel::LevelComplete(summary.clone()));
    }

    fn level_unlocked(&mut self, level: u32) {
        self.unlocked.push(level);
    }

    fn play_sound(&mut self, sound: Sound) {
        self.audio.play(sound);
    }

    fn show_voice_feedback(&mut self, message: &str, is_error: bool) {
        let until = Instant::now() + Duration::from_millis(VOICE_FEEDBACK_MS);
        self.feedback = Some((message.to_string(), is_error, until));
    }
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps logical playfield coordinates onto terminal cells. Row 0 is the HUD,
/// rows 1 and `rows - 2` are the border, the last row is the controls hint.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub logical_width: f32,
    pub logical_height: f32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, logical_width: f32, logical_height: f32) -> Self {
        Self {
            cols,
            rows,
            logical_width,
            logical_height,
        }
    }

    fn inner_cols(&self) -> f32 {
        self.cols.saturating_sub(2).max(1) as f32
    }

    fn inner_rows(&self) -> f32 {
        self.rows.saturating_sub(4).max(1) as f32
    }

    fn col(&self, x: f32) -> i32 {
        1 + (x / self.logical_width * self.inner_cols()).floor() as i32
    }

    fn row(&self, y: f32) -> i32 {
        2 + (y / self.logical_height * self.inner_rows()).floor() as i32
    }

    /// Cells covered by `rect`, clipped to the play area; at least one cell
    /// wide and tall when any part is visible.
    fn cells(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        let c0 = self.col(rect.x);
        let c1 = self.col(rect.right()).max(c0 + 1);
        let r0 = self.row(rect.y);
        let r1 = self.row(rect.bottom()).max(r0 + 1);

        let min_c = 1;
        let max_c = self.cols as i32 - 1;
        let min_r = 2;
        let max_r = self.rows as i32 - 2;

        let (c0, c1) = (c0.max(min_c), c1.min(max_c));
        let (r0, r1) = (r0.max(min_r), r1.min(max_r));
        if c0 >= c1 || r0 >= r1 {
            return None;
        }
        Some((c0 as u16, c1 as u16, r0 as u16, r1 as u16))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame. `prompt` is the voice prompt text while it is
/// open.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    hud: &Hud,
    assets: &Assets,
    prompt: Option<&str>,
) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let view = Viewport::new(cols, rows, state.width, state.height);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &view)?;
    draw_hud(out, &view, hud, assets)?;
    draw_ground(out, &view, state)?;

    for obstacle in &state.obstacles {
        draw_obstacle(out, &view, assets, obstacle)?;
    }
    for enemy in &state.enemies {
        draw_enemy(out, &view, assets, enemy)?;
    }
    for projectile in &state.projectiles {
        draw_projectile(out, &view, assets, projectile)?;
    }

    draw_player(out, &view, assets, state)?;
    draw_boss(out, &view, assets, state)?;

    if let Some(text) = hud.active_banner() {
        draw_centered(out, &view, 3, text, C_BANNER)?;
    }
    if let Some((text, is_error)) = hud.active_feedback() {
        let color = if is_error { C_FEEDBACK_ERROR } else { C_FEEDBACK };
        draw_centered(out, &view, 4, &format!("[ {} ]", text), color)?;
    }

    match prompt {
        Some(text) => draw_prompt(out, &view, text)?,
        None => draw_controls_hint(out, &view)?,
    }

    match (&hud.end_panel, state.status) {
        (Some(EndPanel::GameOver { score }), _) => draw_game_over(out, &view, *score)?,
        (Some(EndPanel::LevelComplete(summary)), _) => draw_level_complete(out, &view, summary)?,
        (None, GameStatus::Paused) => draw_paused(out, &view)?,
        _ => {}
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: &Viewport, hud: &Hud, assets: &Assets) -> io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", hud.score)))?;

    let level_str = format!("[ {} ]", hud.level_name);
    let lx = (view.cols / 2).saturating_sub(level_str.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(&level_str))?;

    // Fixed row of hearts, lost ones greyed out
    let heart_color = sprite_color(assets, Sprite::Heart, C_HUD_HEART);
    let rx = view.cols.saturating_sub(hud.max_health as u16 * 2 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    for i in 0..hud.max_health {
        if i < hud.health {
            out.queue(style::SetForegroundColor(heart_color))?;
            out.queue(Print("♥ "))?;
        } else {
            out.queue(style::SetForegroundColor(C_HUD_HEART_LOST))?;
            out.queue(Print("♡ "))?;
        }
    }

    Ok(())
}

// ── Playfield ─────────────────────────────────────────────────────────────────

fn sprite_color(assets: &Assets, sprite: Sprite, color: Color) -> Color {
    if assets.is_placeholder(sprite) {
        C_PLACEHOLDER
    } else {
        color
    }
}

fn fill_rect<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: &Rect,
    glyph: char,
    color: Color,
) -> io::Result<()> {
    let Some((c0, c1, r0, r1)) = view.cells(rect) else {
        return Ok(());
    };
    let line: String = std::iter::repeat(glyph).take((c1 - c0) as usize).collect();
    out.queue(style::SetForegroundColor(color))?;
    for row in r0..r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

fn draw_ground<W: Write>(out: &mut W, view: &Viewport, state: &GameState) -> io::Result<()> {
    let ground = Rect::new(0.0, ground_y(), state.width, state.height - ground_y());
    fill_rect(out, view, &ground, '▀', C_GROUND)
}

fn draw_obstacle<W: Write>(
    out: &mut W,
    view: &Viewport,
    assets: &Assets,
    obstacle: &Obstacle,
) -> io::Result<()> {
    let rect = Rect::new(obstacle.x, obstacle.y, obstacle.width, obstacle.height);
    fill_rect(out, view, &rect, '▒', sprite_color(assets, Sprite::ObstacleStone, C_OBSTACLE))
}

fn draw_enemy<W: Write>(
    out: &mut W,
    view: &Viewport,
    assets: &Assets,
    enemy: &Enemy,
) -> io::Result<()> {
    let rect = Rect::new(enemy.x, enemy.y, enemy.width, enemy.height);
    fill_rect(out, view, &rect, 'ʌ', sprite_color(assets, Sprite::EnemyBird, C_ENEMY))
}

fn draw_projectile<W: Write>(
    out: &mut W,
    view: &Viewport,
    assets: &Assets,
    projectile: &Projectile,
) -> io::Result<()> {
    let rect = Rect::new(projectile.x, projectile.y, projectile.width, projectile.height);
    let (sprite, color) = match projectile.owner {
        Owner::Player => (Sprite::PlayerProjectile, C_PROJECTILE_PLAYER),
        Owner::Enemy => (Sprite::EnemyProjectile, C_PROJECTILE_ENEMY),
    };
    fill_rect(out, view, &rect, '•', sprite_color(assets, sprite, color))
}

fn draw_player<W: Write>(
    out: &mut W,
    view: &Viewport,
    assets: &Assets,
    state: &GameState,
) -> io::Result<()> {
    let player = &state.player;
    if !player.is_visible(state.clock) {
        return Ok(());
    }

    let (sprite, glyph, color) = match player.pose(state.clock) {
        PlayerPose::Running(0) => (Sprite::PlayerRun1, '█', C_PLAYER),
        PlayerPose::Running(_) => (Sprite::PlayerRun2, '▓', C_PLAYER),
        PlayerPose::Jumping => (Sprite::PlayerJump, '▀', C_PLAYER),
        PlayerPose::Ducking => (Sprite::PlayerDuck, '▄', C_PLAYER),
        PlayerPose::Shooting => (Sprite::PlayerShoot, '▶', C_PLAYER),
        PlayerPose::Dead => (Sprite::PlayerDead, '✖', C_PLAYER_DEAD),
    };
    let rect = Rect::new(player.x, player.y, player.width, player.height);
    fill_rect(out, view, &rect, glyph, sprite_color(assets, sprite, color))
}

fn draw_boss<W: Write>(
    out: &mut W,
    view: &Viewport,
    assets: &Assets,
    state: &GameState,
) -> io::Result<()> {
    let Some(boss) = state.live_boss() else {
        return Ok(());
    };
    let rect = Rect::new(boss.x, boss.y, boss.width, boss.height);
    fill_rect(out, view, &rect, '█', sprite_color(assets, Sprite::Boss, C_BOSS))?;

    if let Some((background, filled)) = boss.health_bar() {
        fill_rect(out, view, &background, '▬', C_BOSS_BAR_EMPTY)?;
        if filled.width > 0.0 {
            fill_rect(out, view, &filled, '▬', C_BOSS)?;
        }
    }
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    view: &Viewport,
    row: u16,
    text: &str,
    color: Color,
) -> io::Result<()> {
    let col = (view.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "↑/SPACE : Jump   ↓ : Duck   F : Shoot   P : Pause   TAB : Voice   Q : Quit",
    ))?;
    Ok(())
}

fn draw_prompt<W: Write>(out: &mut W, view: &Viewport, text: &str) -> io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_FEEDBACK))?;
    out.queue(Print(format!("voice> {}▏", text)))?;
    Ok(())
}

fn draw_box<W: Write>(out: &mut W, view: &Viewport, lines: &[(String, Color)]) -> io::Result<()> {
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (text, color)) in lines.iter().enumerate() {
        draw_centered(out, view, start_row + i as u16, text, *color)?;
    }
    Ok(())
}

fn draw_paused<W: Write>(out: &mut W, view: &Viewport) -> io::Result<()> {
    draw_box(
        out,
        view,
        &[
            ("╔════════════════════╗".to_string(), Color::Cyan),
            ("║       PAUSED       ║".to_string(), Color::Cyan),
            ("╚════════════════════╝".to_string(), Color::Cyan),
            ("P - Resume  Q - Quit".to_string(), Color::White),
        ],
    )
}

fn draw_game_over<W: Write>(out: &mut W, view: &Viewport, score: u32) -> io::Result<()> {
    draw_box(
        out,
        view,
        &[
            ("╔════════════════════╗".to_string(), Color::Red),
            ("║    GAME  OVER      ║".to_string(), Color::Red),
            ("╚════════════════════╝".to_string(), Color::Red),
            (format!("Final Score: {:>6}", score), Color::Yellow),
            ("R - Play Again  M - Menu  Q - Quit".to_string(), Color::White),
        ],
    )
}

fn draw_level_complete<W: Write>(
    out: &mut W,
    view: &Viewport,
    summary: &LevelSummary,
) -> io::Result<()> {
    let (message, hint) = if summary.has_next {
        (
            "You defeated the Guardian!",
            "N - Next Level  M - Menu  Q - Quit",
        )
    } else {
        ("You completed every level!", "M - Menu  Q - Quit")
    };
    draw_box(
        out,
        view,
        &[
            ("╔════════════════════╗".to_string(), Color::Green),
            ("║  LEVEL  COMPLETE   ║".to_string(), Color::Green),
            ("╚════════════════════╝".to_string(), Color::Green),
            (summary.name.clone(), Color::Green),
            (message.to_string(), Color::White),
            (format!("Final Score: {:>6}", summary.score), Color::Yellow),
            (hint.to_string(), Color::White),
        ],
    )
}
