use kuelap_runner::error::VoiceError;
use kuelap_runner::voice::{parse_transcript, Locale, VoiceCommand, VoiceInput};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;
use strum::IntoEnumIterator;

#[test]
fn spanish_is_the_default_locale() {
    assert_eq!(Locale::default(), Locale::Spanish);
    assert_eq!(Locale::from_tag("es-ES"), Locale::Spanish);
    assert_eq!(Locale::from_tag("en"), Locale::English);
    assert_eq!(Locale::from_tag(" en-US "), Locale::English);
    assert_eq!(Locale::from_tag("fr"), Locale::Spanish);
}

#[test]
fn spanish_commands() {
    let es = Locale::Spanish;
    assert_eq!(parse_transcript("saltar", es), Some(VoiceCommand::Jump));
    assert_eq!(parse_transcript("¡Brincar ya!", es), Some(VoiceCommand::Jump));
    assert_eq!(parse_transcript("ABAJO", es), Some(VoiceCommand::Duck));
    assert_eq!(parse_transcript("fuego", es), Some(VoiceCommand::Shoot));
    assert_eq!(parse_transcript("correr", es), Some(VoiceCommand::Run));
    assert_eq!(parse_transcript("pausar", es), Some(VoiceCommand::Pause));
    assert_eq!(parse_transcript("reanudar", es), Some(VoiceCommand::Resume));
    assert_eq!(parse_transcript("jugar", es), Some(VoiceCommand::Resume));
}

#[test]
fn english_commands() {
    let en = Locale::English;
    assert_eq!(parse_transcript("please jump", en), Some(VoiceCommand::Jump));
    assert_eq!(parse_transcript("Crouch", en), Some(VoiceCommand::Duck));
    assert_eq!(parse_transcript("fire!", en), Some(VoiceCommand::Shoot));
    assert_eq!(parse_transcript("pause", en), Some(VoiceCommand::Pause));
    assert_eq!(parse_transcript("resume", en), Some(VoiceCommand::Resume));
}

#[test]
fn unknown_or_empty_transcripts_are_ignored() {
    assert_that(&parse_transcript("", Locale::Spanish)).is_none();
    assert_that(&parse_transcript("   ", Locale::English)).is_none();
    assert_that(&parse_transcript("hola", Locale::Spanish)).is_none();
    // Words of the other locale are not understood
    assert_that(&parse_transcript("jump", Locale::Spanish)).is_none();
}

#[test]
fn table_order_decides_between_two_words() {
    assert_eq!(parse_transcript("fuego y saltar", Locale::Spanish), Some(VoiceCommand::Jump));
}

#[test]
fn every_command_is_reachable_in_every_locale() {
    for locale in [Locale::Spanish, Locale::English] {
        for command in VoiceCommand::iter() {
            assert!(
                locale.vocabulary().iter().any(|(_, c)| *c == command),
                "{:?} has no word for {}",
                locale,
                command
            );
        }
    }
}

#[test]
fn command_names_are_uppercase() {
    assert_eq!(VoiceCommand::Jump.to_string(), "JUMP");
    assert_eq!(VoiceCommand::Resume.to_string(), "RESUME");
}

#[test]
fn unavailable_input_refuses_with_reason() {
    let voice = VoiceInput::unavailable(Locale::Spanish, VoiceError::PermissionDenied);
    assert!(!voice.is_available());
    assert_that(&voice.listen("saltar")).is_equal_to(Err(VoiceError::PermissionDenied));
}

#[test]
fn available_input_parses() {
    let voice = VoiceInput::new(Locale::English);
    assert!(voice.is_available());
    assert_eq!(voice.locale(), Locale::English);
    assert_eq!(voice.listen("duck"), Ok(Some(VoiceCommand::Duck)));
    assert_eq!(voice.listen("hello"), Ok(None));
}
