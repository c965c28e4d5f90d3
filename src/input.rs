/// Keyboard input → game actions.
///
/// Terminals differ in what they report: keyboard-enhancement capable ones
/// (kitty protocol) send `Press` / `Repeat` / `Release`, classic ones only send
/// `Press`, repeated by the OS while a key is held. Duck is the only action
/// that needs to know when a key goes up, so held keys are tracked by the frame
/// they were last seen and a key counts as released once it has been silent
/// for `HOLD_WINDOW` frames.
use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key stays "held" this many frames after its last press/repeat event.
/// At ~30 FPS that is ≈130 ms, shorter than any OS key-repeat interval.
pub const HOLD_WINDOW: u64 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Jump,
    Shoot,
    DuckOn,
    DuckOff,
    TogglePause,
    /// Open the typed voice-command prompt.
    VoicePrompt,
    Restart,
    NextLevel,
    Menu,
    Quit,
}

fn is_duck_key(code: &KeyCode) -> bool {
    matches!(code, KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S'))
}

/// One-shot action bound to a key press, if any. Duck keys are handled by
/// [`Keyboard`] because they also need a release.
pub fn action_for_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Up | KeyCode::Char(' ') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(Action::Jump)
        }
        KeyCode::Char('f') | KeyCode::Char('F') | KeyCode::Char('j') | KeyCode::Char('J') => {
            Some(Action::Shoot)
        }
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Action::TogglePause),
        KeyCode::Tab => Some(Action::VoicePrompt),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Restart),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(Action::NextLevel),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(Action::Menu),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

#[derive(Clone, Debug, Default)]
pub struct Keyboard {
    /// Each held key → the frame it was last seen (press or repeat).
    key_frame: HashMap<KeyCode, u64>,
    ducking: bool,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
    pub fn is_held(&self, key: &KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn duck_held(&self, frame: u64) -> bool {
        self.key_frame
            .keys()
            .any(|k| is_duck_key(k) && self.is_held(k, frame))
    }

    pub fn handle(&mut self, event: &KeyEvent, frame: u64) -> Option<Action> {
        match event.kind {
            KeyEventKind::Press => {
                self.key_frame.insert(event.code, frame);
                if is_duck_key(&event.code) {
                    if self.ducking {
                        return None;
                    }
                    self.ducking = true;
                    return Some(Action::DuckOn);
                }
                action_for_key(event.code, event.modifiers)
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(event.code, frame);
                None
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&event.code);
                if is_duck_key(&event.code) && self.ducking && !self.duck_held(frame) {
                    self.ducking = false;
                    return Some(Action::DuckOff);
                }
                None
            }
        }
    }

    /// Call once per frame after draining events. Releases duck when its
    /// keys have gone quiet.
    pub fn expire(&mut self, frame: u64) -> Option<Action> {
        self.key_frame
            .retain(|_, last| frame.saturating_sub(*last) <= HOLD_WINDOW);
        if self.ducking && !self.duck_held(frame) {
            self.ducking = false;
            return Some(Action::DuckOff);
        }
        None
    }

    /// Forget every held key, e.g. when a run ends or the voice prompt takes
    /// the keyboard. Returns the `DuckOff` still owed for a held duck.
    pub fn reset(&mut self) -> Option<Action> {
        self.key_frame.clear();
        if std::mem::take(&mut self.ducking) {
            return Some(Action::DuckOff);
        }
        None
    }
}
