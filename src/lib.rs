//! speakit - Terminal text-to-speech console
//!
//! Type text, pick an installed voice, adjust pitch/rate/volume, and have
//! the text read aloud through the platform speech-synthesis engine.

pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod speech;
pub mod terminal;
pub mod ui;

pub use error::{Result, SpeakItError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "speakit";
