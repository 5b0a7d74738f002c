//! Shared test support
//!
//! A scripted speech service standing in for the platform engine, plus
//! config helpers. The mock keeps its speaking/paused flags consistent
//! with the lifecycle events it queues, so controller tests can drive
//! full submit/pause/resume flows without a real synthesizer.

// Not every test binary uses every helper
#![allow(dead_code)]

use speakit::config::Config;
use speakit::speech::{SpeechEvent, SpeechService, Utterance, Voice};
use speakit::Result;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Observable state of the mock engine, shared with the test body
#[derive(Default)]
pub struct MockState {
    pub voices: Vec<Voice>,
    /// Every utterance handed to `speak`, in order
    pub spoken: Vec<Utterance>,
    pub cancels: usize,
    pub speaking: bool,
    pub paused: bool,
    pub queue: VecDeque<SpeechEvent>,
}

impl MockState {
    /// Let the active utterance finish naturally
    pub fn finish(&mut self) {
        self.speaking = false;
        self.paused = false;
        self.queue.push_back(SpeechEvent::End);
    }

    /// Fail the active utterance
    pub fn fail(&mut self, message: &str) {
        self.speaking = false;
        self.paused = false;
        self.queue.push_back(SpeechEvent::Error(message.to_string()));
    }

    /// Announce a new catalog
    pub fn replace_voices(&mut self, voices: Vec<Voice>) {
        self.voices = voices;
        self.queue.push_back(SpeechEvent::VoicesChanged);
    }
}

/// Scripted speech service for controller tests
pub struct MockService {
    state: Arc<Mutex<MockState>>,
}

impl MockService {
    /// Build a mock with the given catalog; the returned handle observes
    /// everything the controller does to the service.
    pub fn with_voices(voices: Vec<Voice>) -> (Self, Arc<Mutex<MockState>>) {
        let state = Arc::new(Mutex::new(MockState {
            voices,
            ..MockState::default()
        }));
        (
            Self {
                state: Arc::clone(&state),
            },
            state,
        )
    }
}

impl SpeechService for MockService {
    fn voices(&mut self) -> Result<Vec<Voice>> {
        Ok(self.state.lock().unwrap().voices.clone())
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.spoken.push(utterance.clone());
        state.speaking = true;
        state.paused = false;
        state.queue.push_back(SpeechEvent::Start);
        Ok(())
    }

    fn cancel(&mut self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.cancels += 1;
        if state.speaking {
            state.speaking = false;
            state.paused = false;
            state.queue.push_back(SpeechEvent::End);
        }
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.speaking && !state.paused {
            state.paused = true;
            state.queue.push_back(SpeechEvent::Pause);
        }
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.paused {
            state.paused = false;
            state.queue.push_back(SpeechEvent::Resume);
        }
        Ok(())
    }

    fn is_speaking(&self) -> bool {
        self.state.lock().unwrap().speaking
    }

    fn is_paused(&self) -> bool {
        self.state.lock().unwrap().paused
    }

    fn poll_event(&mut self) -> Option<SpeechEvent> {
        self.state.lock().unwrap().queue.pop_front()
    }
}

/// Voice record shorthand
pub fn voice(name: &str, language: &str, default: bool) -> Voice {
    Voice {
        name: name.to_string(),
        language: language.to_string(),
        default,
    }
}

/// A config with stock defaults, isolated from the user's home directory
pub fn test_config() -> Config {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    Config::load_from(dir.path().join(".speakit.cfg")).expect("Failed to load config")
}
