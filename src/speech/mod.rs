//! Speech synthesis system

pub mod backends;
pub mod service;

pub use service::{create_service, SpeechEvent, SpeechService, Utterance, Voice};
