//! The narrow interface the game core uses to talk to its UI.
//!
//! The core calls these synchronously while updating; it never reads anything
//! back. Every method has a no-op default so a sink only implements what it
//! shows.

use crate::assets::Sound;

/// Shown when a level's boss is beaten.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelSummary {
    pub level: u32,
    pub name: String,
    pub score: u32,
    /// False after the last level.
    pub has_next: bool,
}

pub trait Presenter {
    fn set_score(&mut self, _score: u32) {}

    /// A row of `max` hearts, `health` of them filled.
    fn set_health(&mut self, _health: u32, _max: u32) {}

    fn set_level_info(&mut self, _name: &str, _objective: &str) {}

    fn show_boss_warning(&mut self, _objective: &str) {}

    fn show_game_over(&mut self, _final_score: u32) {}

    fn show_level_complete(&mut self, _summary: &LevelSummary) {}

    /// A level became playable and should be persisted.
    fn level_unlocked(&mut self, _level: u32) {}

    fn play_sound(&mut self, _sound: Sound) {}

    fn show_voice_feedback(&mut self, _message: &str, _is_error: bool) {}
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {}

/// One recorded presenter call.
#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent {
    Score(u32),
    Health { health: u32, max: u32 },
    LevelInfo { name: String, objective: String },
    BossWarning(String),
    GameOver(u32),
    LevelComplete(LevelSummary),
    LevelUnlocked(u32),
    Sound(Sound),
    VoiceFeedback { message: String, is_error: bool },
}

/// Records every call, for driving the core without a screen.
#[derive(Clone, Debug, Default)]
pub struct HeadlessPresenter {
    pub events: Vec<UiEvent>,
}

impl HeadlessPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, matches: impl Fn(&UiEvent) -> bool) -> usize {
        self.events.iter().filter(|e| matches(e)).count()
    }

    pub fn last_score(&self) -> Option<u32> {
        self.events.iter().rev().find_map(|e| match e {
            UiEvent::Score(s) => Some(*s),
            _ => None,
        })
    }

    pub fn sounds(&self) -> Vec<Sound> {
        self.events
            .iter()
            .filter_map(|e| match e {
                UiEvent::Sound(s) => Some(*s),
                _ => None,
            })
            .collect()
    }
}

impl Presenter for HeadlessPresenter {
    fn set_score(&mut self, score: u32) {
        self.events.push(UiEvent::Score(score));
    }

    fn set_health(&mut self, health: u32, max: u32) {
        self.events.push(UiEvent::Health { health, max });
    }

    fn set_level_info(&mut self, name: &str, objective: &str) {
        self.events.push(UiEvent::LevelInfo {
            name: name.to_string(),
            objective: objective.to_string(),
        });
    }

    fn show_boss_warning(&mut self, objective: &str) {
        self.events.push(UiEvent::BossWarning(objective.to_string()));
    }

    fn show_game_over(&mut self, final_score: u32) {
        self.events.push(UiEvent::GameOver(final_score));
    }

    fn show_level_complete(&mut self, summary: &LevelSummary) {
        self.events.push(UiEvent::LevelComplete(summary.clone()));
    }

    fn level_unlocked(&mut self, level: u32) {
        self.events.push(UiEvent::LevelUnlocked(level));
    }

    fn play_sound(&mut self, sound: Sound) {
        self.events.push(UiEvent::Sound(sound));
    }

    fn show_voice_feedback(&mut self, message: &str, is_error: bool) {
        self.events.push(UiEvent::VoiceFeedback {
            message: message.to_string(),
            is_error,
        });
    }
}
