//! Core of a side-scrolling runner/shooter: the player auto-runs across a
//! 1000×500 playfield, jumps and ducks past stones and birds, shoots, and
//! fights a guardian at the end of each level.
//!
//! The library is renderer-agnostic. It owns the game rules and talks to the
//! outside world only through [`presenter::Presenter`] and
//! [`audio::SoundBackend`].

pub mod assets;
pub mod audio;
pub mod boss;
pub mod collision;
pub mod compute;
pub mod config;
pub mod constants;
pub mod entities;
pub mod error;
pub mod input;
pub mod level;
pub mod player;
pub mod presenter;
pub mod settings;
pub mod voice;
