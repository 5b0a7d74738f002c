//! Error types for speakit

use std::io;
use thiserror::Error;

/// Main error type for speakit
#[derive(Error, Debug)]
pub enum SpeakItError {
    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Speech synthesis error: {0}")]
    Speech(String),

    #[error("INI parse error: {0}")]
    IniParse(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for speakit operations
pub type Result<T> = std::result::Result<T, SpeakItError>;

impl From<String> for SpeakItError {
    fn from(s: String) -> Self {
        SpeakItError::Other(s)
    }
}

impl From<&str> for SpeakItError {
    fn from(s: &str) -> Self {
        SpeakItError::Other(s.to_string())
    }
}
