mod display;

use std::fs::OpenOptions;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::rngs::ThreadRng;
use rand::thread_rng;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use kuelap_runner::assets::Assets;
use kuelap_runner::audio::Audio;
use kuelap_runner::compute::{
    announce_level, apply_action, apply_voice_command, init_state, next_level_number, restart, tick,
};
use kuelap_runner::config::Config;
use kuelap_runner::constants::MAX_LEVEL;
use kuelap_runner::entities::{GameState, GameStatus};
use kuelap_runner::error::{GameResult, VoiceError};
use kuelap_runner::input::{Action, Keyboard};
use kuelap_runner::level::LevelConfig;
use kuelap_runner::presenter::Presenter;
use kuelap_runner::settings::{Settings, SettingsStore};
use kuelap_runner::voice::VoiceInput;

use display::{Hud, TerminalBell};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// Longest frame fed to the simulation, so a stall doesn't teleport entities.
const MAX_FRAME_MS: f32 = 100.0;

// ── Logging ───────────────────────────────────────────────────────────────────

/// Log to a file; the terminal belongs to the game. Logging is skipped if the
/// file cannot be opened.
fn init_logging(config: &Config) {
    let file = match OpenOptions::new().create(true).append(true).open(&config.log_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Logging disabled, cannot open {}: {}", config.log_path.display(), e);
            return;
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

// ── Session ───────────────────────────────────────────────────────────────────

/// What lives across runs: persisted settings, loaded assets, the HUD with
/// its audio, and the voice source.
struct Session {
    store: SettingsStore,
    settings: Settings,
    assets: Assets,
    hud: Hud,
    voice: VoiceInput,
}

impl Session {
    fn try_save_settings(&self) -> GameResult<()> {
        self.store.save(&self.settings)?;
        Ok(())
    }

    /// A failed save is logged; the game goes on with the in-memory settings.
    fn save_settings(&self) {
        if let Err(e) = self.try_save_settings() {
            warn!(path = %self.store.path().display(), error = %e, "Could not save settings");
        }
    }

    fn toggle_sound(&mut self) {
        self.settings.sound_enabled = !self.settings.sound_enabled;
        self.hud.audio.set_enabled(self.settings.sound_enabled);
        info!(enabled = self.settings.sound_enabled, "Sound toggled");
        self.save_settings();
    }

    /// Persist levels the last tick unlocked.
    fn persist_unlocks(&mut self) {
        let unlocked = self.hud.take_unlocked();
        if unlocked.is_empty() {
            return;
        }
        self.settings.unlocked_levels.extend(unlocked);
        self.save_settings();
    }

    fn start_run(&mut self, level: u32, rng: &mut ThreadRng) -> GameState {
        let state = init_state(level, self.settings.unlocked_levels.clone(), rng);
        self.begin(&state);
        state
    }

    fn begin(&mut self, state: &GameState) {
        self.hud.reset();
        announce_level(state, &mut self.hud);
        info!(level = state.level.number(), name = %state.level.config.name, "Run started");
    }
}

/// Everything the session needs from disk. Only an unusable asset root fails.
fn open_session(config: &Config) -> GameResult<Session> {
    let assets = Assets::load(&config.assets_dir)?;
    let store = SettingsStore::new(&config.settings_path);
    let settings = store.load();
    let audio = Audio::new(TerminalBell, settings.sound_enabled, &assets);
    let voice = if config.voice_enabled {
        VoiceInput::new(config.voice_locale)
    } else {
        VoiceInput::unavailable(config.voice_locale, VoiceError::Unsupported)
    };
    info!(
        settings = %store.path().display(),
        assets = %config.assets_dir.display(),
        locale = %config.voice_locale,
        voice = voice.is_available(),
        "Starting"
    );

    Ok(Session {
        store,
        settings,
        assets,
        hud: Hud::new(audio),
        voice,
    })
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(u32),
    Quit,
}

fn draw_menu<W: Write>(out: &mut W, settings: &Settings) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;
    let left = cx.saturating_sub(18);

    let title = "▲  KUÉLAP  RUNNER  ▲";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    out.queue(cursor::MoveTo(left, cy.saturating_sub(4)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Select a level:"))?;

    for number in 1..=MAX_LEVEL {
        let config = LevelConfig::for_level(number);
        let row = cy.saturating_sub(3) + number as u16;
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", number)))?;
        if settings.is_unlocked(number) {
            out.queue(style::SetForegroundColor(Color::Green))?;
            out.queue(Print(format!("{:<20}", config.name)))?;
        } else {
            out.queue(style::SetForegroundColor(Color::DarkGrey))?;
            out.queue(Print(format!("{:<20} locked", config.name)))?;
        }
    }

    out.queue(cursor::MoveTo(left, cy + 2))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print("[ENTER] Play"))?;

    out.queue(cursor::MoveTo(left, cy + 3))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print(format!(
        "[M] Sound: {}",
        if settings.sound_enabled { "on" } else { "off" }
    )))?;

    out.queue(cursor::MoveTo(left, cy + 5))?;
    out.queue(Print("↑/SPACE : Jump   ↓ : Duck   F : Shoot"))?;
    out.queue(cursor::MoveTo(left, cy + 6))?;
    out.queue(Print("TAB : Voice   P : Pause   Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    session: &mut Session,
) -> std::io::Result<MenuResult> {
    draw_menu(out, &session.settings)?;

    // Block until the user makes a choice
    loop {
        let event = match rx.recv() {
            Ok(event) => event,
            Err(_) => return Ok(MenuResult::Quit), // input thread gone
        };
        let Event::Key(KeyEvent { code, kind, modifiers, .. }) = event else {
            continue;
        };
        if kind != KeyEventKind::Press {
            continue;
        }
        match code {
            KeyCode::Char(c @ '1'..='9') => {
                let level = c as u32 - '0' as u32;
                if session.settings.is_unlocked(level) {
                    return Ok(MenuResult::Start(level));
                }
                debug!(level, "Locked level selected");
            }
            KeyCode::Enter => return Ok(MenuResult::Start(session.settings.first_unlocked())),
            KeyCode::Char('m') | KeyCode::Char('M') => {
                session.toggle_sound();
                draw_menu(out, &session.settings)?;
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(MenuResult::Quit);
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(MenuResult::Quit),
            _ => {}
        }
    }
}

// ── Voice prompt ──────────────────────────────────────────────────────────────

fn submit_voice(state: &mut GameState, session: &mut Session, transcript: &str) {
    match session.voice.listen(transcript) {
        Ok(Some(command)) => {
            apply_voice_command(state, command, &mut session.hud);
        }
        Ok(None) => debug!(transcript, "No voice command recognised"),
        Err(e) => {
            warn!(error = %e, "Voice command refused");
            session.hud.show_voice_feedback(&e.to_string(), true);
        }
    }
}

/// Feed one key to the open prompt. Returns false once the prompt closes.
fn edit_prompt(
    prompt: &mut String,
    code: KeyCode,
    state: &mut GameState,
    session: &mut Session,
) -> bool {
    match code {
        KeyCode::Char(c) => {
            prompt.push(c);
            true
        }
        KeyCode::Backspace => {
            prompt.pop();
            true
        }
        KeyCode::Enter => {
            let transcript = std::mem::take(prompt);
            submit_voice(state, session, &transcript);
            false
        }
        KeyCode::Esc | KeyCode::Tab => false,
        _ => true,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum LoopResult {
    Menu,
    Quit,
}

/// Runs until the player goes back to the menu or quits. Restart and next
/// level are handled in place.
///
/// Input model: one-shot actions fire on key press. Duck is held, so the
/// keyboard tracks the frame each key was last seen and releases duck once its
/// keys go quiet (see [`Keyboard`]). The voice prompt, while open, takes
/// every key and the run keeps going underneath it.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    session: &mut Session,
) -> std::io::Result<LoopResult> {
    let mut rng = thread_rng();
    let mut keyboard = Keyboard::new();
    let mut prompt: Option<String> = None;
    let mut frame: u64 = 0;
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(key) = ev else { continue };

            if key.kind == KeyEventKind::Press
                && key.code == KeyCode::Char('c')
                && key.modifiers.contains(KeyModifiers::CONTROL)
            {
                return Ok(LoopResult::Quit);
            }

            if let Some(text) = prompt.as_mut() {
                if key.kind == KeyEventKind::Press && !edit_prompt(text, key.code, state, session) {
                    prompt = None;
                }
                continue;
            }

            let Some(action) = keyboard.handle(&key, frame) else { continue };
            match action {
                Action::Quit => return Ok(LoopResult::Quit),
                Action::Menu if state.status.is_over() => return Ok(LoopResult::Menu),
                Action::Restart if state.status.is_over() => {
                    *state = restart(state, &mut rng);
                    session.begin(state);
                    keyboard.reset();
                }
                Action::NextLevel if state.status == GameStatus::LevelComplete => {
                    if let Some(next) = next_level_number(state.level.number()) {
                        *state = session.start_run(next, &mut rng);
                        keyboard.reset();
                    }
                }
                Action::VoicePrompt if state.status == GameStatus::Playing => {
                    if session.voice.is_available() {
                        if let Some(release) = keyboard.reset() {
                            apply_action(state, release, &mut session.hud);
                        }
                        prompt = Some(String::new());
                    } else {
                        submit_voice(state, session, "");
                    }
                }
                other => {
                    apply_action(state, other, &mut session.hud);
                }
            }
        }

        if let Some(action) = keyboard.expire(frame) {
            apply_action(state, action, &mut session.hud);
        }

        let dt = (last_frame.elapsed().as_secs_f32() * 1000.0).min(MAX_FRAME_MS);
        last_frame = Instant::now();
        tick(state, dt, &mut rng, &mut session.hud);
        session.persist_unlocks();

        display::render(out, state, &session.hud, &session.assets, prompt.as_deref())?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let config = Config::from_env();
    init_logging(&config);

    let mut session = match open_session(&config) {
        Ok(session) => session,
        Err(e) => {
            error!(error = %e, "Cannot start");
            eprintln!("kuelap_runner: {}", e);
            std::process::exit(1);
        }
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, &mut session);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        error!(error = %e, "Terminal error");
    }
    info!("Exiting");
    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    session: &mut Session,
) -> std::io::Result<()> {
    let mut rng = thread_rng();

    loop {
        match show_menu(out, rx, session)? {
            MenuResult::Quit => break,
            MenuResult::Start(level) => {
                let mut state = session.start_run(level, &mut rng);
                match game_loop(out, &mut state, rx, session)? {
                    LoopResult::Quit => break,
                    LoopResult::Menu => {}
                }
            }
        }
    }
    Ok(())
}
