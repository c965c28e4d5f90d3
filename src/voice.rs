//! Free-text voice commands.
//!
//! A transcript maps to at most one [`VoiceCommand`] by case-insensitive
//! substring match against a per-locale vocabulary, checked in table order.
//! Executing the command is the game's job, not this module's.

use std::str::FromStr;

use strum_macros::{Display, EnumIter, EnumString};

use crate::error::VoiceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "UPPERCASE")]
pub enum VoiceCommand {
    Jump,
    Duck,
    Shoot,
    /// Stand back up from a duck.
    Run,
    Pause,
    Resume,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumString, Display)]
pub enum Locale {
    #[default]
    #[strum(serialize = "es", serialize = "es-ES")]
    Spanish,
    #[strum(serialize = "en", serialize = "en-US")]
    English,
}

const SPANISH: &[(&str, VoiceCommand)] = &[
    ("saltar", VoiceCommand::Jump),
    ("brincar", VoiceCommand::Jump),
    ("abajo", VoiceCommand::Duck),
    ("agacharse", VoiceCommand::Duck),
    ("fuego", VoiceCommand::Shoot),
    ("disparar", VoiceCommand::Shoot),
    ("correr", VoiceCommand::Run),
    ("pausar", VoiceCommand::Pause),
    ("reanudar", VoiceCommand::Resume),
    ("jugar", VoiceCommand::Resume),
];

const ENGLISH: &[(&str, VoiceCommand)] = &[
    ("jump", VoiceCommand::Jump),
    ("hop", VoiceCommand::Jump),
    ("duck", VoiceCommand::Duck),
    ("down", VoiceCommand::Duck),
    ("crouch", VoiceCommand::Duck),
    ("fire", VoiceCommand::Shoot),
    ("shoot", VoiceCommand::Shoot),
    ("run", VoiceCommand::Run),
    ("stand", VoiceCommand::Run),
    ("pause", VoiceCommand::Pause),
    ("resume", VoiceCommand::Resume),
    ("play", VoiceCommand::Resume),
];

impl Locale {
    /// Unknown tags fall back to the default locale.
    pub fn from_tag(tag: &str) -> Self {
        Locale::from_str(tag.trim()).unwrap_or_default()
    }

    pub fn vocabulary(self) -> &'static [(&'static str, VoiceCommand)] {
        match self {
            Locale::Spanish => SPANISH,
            Locale::English => ENGLISH,
        }
    }
}

/// First vocabulary entry contained in the transcript.
pub fn parse_transcript(transcript: &str, locale: Locale) -> Option<VoiceCommand> {
    let text = transcript.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }
    locale
        .vocabulary()
        .iter()
        .find(|(word, _)| text.contains(word))
        .map(|(_, command)| *command)
}

/// A speech source. When recognition is unavailable every transcript is
/// refused with the reason, and the game carries on with the keyboard.
#[derive(Clone, Debug)]
pub struct VoiceInput {
    locale: Locale,
    availability: Result<(), VoiceError>,
}

impl VoiceInput {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            availability: Ok(()),
        }
    }

    pub fn unavailable(locale: Locale, reason: VoiceError) -> Self {
        Self {
            locale,
            availability: Err(reason),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn is_available(&self) -> bool {
        self.availability.is_ok()
    }

    pub fn listen(&self, transcript: &str) -> Result<Option<VoiceCommand>, VoiceError> {
        self.availability.clone()?;
        Ok(parse_transcript(transcript, self.locale))
    }
}
