//! Form controller
//!
//! The central owner object for the page: it holds the speech-service
//! handle, the cached voice catalog, the rendered option list, and the
//! current form values, and it applies the speak/pause/resume semantics.
//! Utterance lifecycle is tracked by an explicit state machine so the
//! control button label and the background animation always follow what
//! the engine reports rather than what the user last pressed.

use crate::config::Config;
use crate::speech::{SpeechEvent, SpeechService, Utterance, Voice};
use crate::Result;
use log::{debug, error, info};

/// Control button labels
pub const LABEL_SPEAK: &str = "Speak It";
pub const LABEL_PAUSE: &str = "Pause It";

/// Slider bounds and steps
pub const PITCH_MIN: f32 = 0.0;
pub const PITCH_MAX: f32 = 2.0;
pub const RATE_MIN: f32 = 0.5;
pub const RATE_MAX: f32 = 2.0;
pub const SLIDER_STEP: f32 = 0.1;
pub const VOLUME_STEP: i16 = 5;

/// Utterance lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakState {
    /// No utterance active
    Idle,
    /// An utterance is playing
    Speaking,
    /// The active utterance is paused
    Paused,
}

/// Apply one lifecycle event to the current state
///
/// End collapses back to Idle from any state. So does Error: leaving the
/// state untouched after a failed utterance would strand the button on
/// "Pause It" with nothing playing.
pub fn transition(state: SpeakState, event: &SpeechEvent) -> SpeakState {
    use SpeakState::*;

    match (state, event) {
        (_, SpeechEvent::Start) => Speaking,
        (Speaking, SpeechEvent::Pause) => Paused,
        (Paused, SpeechEvent::Resume) => Speaking,
        (_, SpeechEvent::End) => Idle,
        (_, SpeechEvent::Error(_)) => Idle,
        (state, _) => state,
    }
}

/// One rendered entry in the voice selector
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceOption {
    /// Display label: `"<name> (<language>)"` plus the default suffix
    pub label: String,

    /// Voice name used to look the voice back up on speak
    pub name: String,
}

/// The page controller
///
/// Constructed once at startup with the synthesis-service handle; all
/// event-loop callbacks funnel through it.
pub struct Controller {
    /// Speech synthesis service
    service: Box<dyn SpeechService>,

    /// Cached voice catalog, sorted by name
    voices: Vec<Voice>,

    /// Rendered option list, rebuilt on every catalog load
    options: Vec<VoiceOption>,

    /// Index of the selected option
    selected: usize,

    /// Voice name to re-select across catalog reloads
    preferred: Option<String>,

    /// Text field contents
    text: String,

    /// Pitch slider (multiplier, 0.0-2.0)
    pitch: f32,

    /// Rate slider (multiplier, 0.5-2.0)
    rate: f32,

    /// Volume slider (0-100)
    volume: u8,

    /// Utterance lifecycle state
    state: SpeakState,

    /// Control button label
    label: &'static str,

    /// Whether the background animation is running
    animating: bool,

    /// Animation master switch from config
    animation_enabled: bool,

    /// Set when the rendered form is stale
    dirty: bool,
}

impl Controller {
    /// Create the controller with slider defaults from config
    pub fn new(service: Box<dyn SpeechService>, config: &Config) -> Self {
        Self {
            service,
            voices: Vec::new(),
            options: Vec::new(),
            selected: 0,
            preferred: config.voice(),
            text: String::new(),
            pitch: config.pitch(),
            rate: config.rate(),
            volume: config.volume(),
            state: SpeakState::Idle,
            label: LABEL_SPEAK,
            animating: false,
            animation_enabled: config.animation(),
            dirty: true,
        }
    }

    /// Fetch the voice catalog and rebuild the option list
    ///
    /// Called once at startup and again whenever the service reports its
    /// catalog changed. The option list is cleared before re-populating:
    /// appending on every catalog-changed event would duplicate entries.
    pub fn load_voices(&mut self) -> Result<()> {
        let mut voices = self.service.voices()?;
        voices.sort_by(|a, b| a.name.to_uppercase().cmp(&b.name.to_uppercase()));

        self.options.clear();
        for voice in &voices {
            self.options.push(VoiceOption {
                label: voice.option_label(),
                name: voice.name.clone(),
            });
        }
        self.voices = voices;

        // Re-select the prior choice when still present, else the engine
        // default, else the first option
        self.selected = self
            .preferred
            .as_deref()
            .and_then(|name| self.options.iter().position(|o| o.name == name))
            .or_else(|| self.voices.iter().position(|v| v.default))
            .unwrap_or(0);
        self.preferred = self.options.get(self.selected).map(|o| o.name.clone());

        info!("Voice catalog loaded: {} voices", self.voices.len());
        self.dirty = true;
        Ok(())
    }

    /// Build a speech request from the current form values and start it
    ///
    /// With `reset_voice` any in-flight utterance is cancelled first (used
    /// when the user changes the voice selection mid-flow). A call while an
    /// utterance is active, or with only whitespace in the text field, is a
    /// logged no-op.
    pub fn speak(&mut self, reset_voice: bool) {
        if reset_voice {
            if let Err(e) = self.service.cancel() {
                error!("Cancel failed: {}", e);
            }
        }

        if self.service.is_speaking() {
            error!("Already speaking...");
            return;
        }

        let text = self.text.trim();
        if text.is_empty() {
            debug!("Nothing to speak, text field is empty");
            return;
        }

        // Linear scan over the cached list; no match leaves the request on
        // the engine's own default voice
        let voice = self
            .options
            .get(self.selected)
            .and_then(|option| self.voices.iter().find(|v| v.name == option.name))
            .map(|v| v.name.clone());

        let utterance = Utterance {
            text: text.to_string(),
            voice,
            rate: self.rate,
            pitch: self.pitch,
            volume: self.volume as f32 / 100.0,
        };

        debug!("Speaking utterance: {:?}", utterance);
        if let Err(e) = self.service.speak(&utterance) {
            error!("Something went wrong: {}", e);
        }
    }

    /// Form submission: Idle starts speaking, Speaking pauses, Paused resumes
    pub fn submit(&mut self) {
        if self.service.is_paused() {
            debug!("Submit while paused: resuming");
            if let Err(e) = self.service.resume() {
                error!("Resume failed: {}", e);
            }
            return;
        }

        if self.service.is_speaking() {
            debug!("Submit while speaking: pausing");
            if let Err(e) = self.service.pause() {
                error!("Pause failed: {}", e);
            }
            return;
        }

        self.speak(false);
    }

    /// Select the next voice in the list, restarting speech with it
    pub fn select_next_voice(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.set_selected((self.selected + 1) % self.options.len());
    }

    /// Select the previous voice in the list, restarting speech with it
    pub fn select_prev_voice(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.set_selected((self.selected + self.options.len() - 1) % self.options.len());
    }

    /// Changing the voice selection always cancels and restarts speech
    /// from the current text with the new voice
    fn set_selected(&mut self, index: usize) {
        self.selected = index;
        self.preferred = self.options.get(index).map(|o| o.name.clone());
        self.dirty = true;
        self.speak(true);
    }

    /// Insert typed text at the end of the text field
    pub fn insert_text(&mut self, input: &str) {
        self.text.push_str(input);
        self.dirty = true;
    }

    /// Delete the last character of the text field
    pub fn backspace(&mut self) {
        if self.text.pop().is_some() {
            self.dirty = true;
        }
    }

    /// Clear the text field
    pub fn clear_text(&mut self) {
        if !self.text.is_empty() {
            self.text.clear();
            self.dirty = true;
        }
    }

    /// Nudge the pitch slider
    pub fn adjust_pitch(&mut self, steps: i16) {
        let next = (self.pitch + steps as f32 * SLIDER_STEP).clamp(PITCH_MIN, PITCH_MAX);
        if next != self.pitch {
            self.pitch = next;
            self.dirty = true;
        }
    }

    /// Nudge the rate slider
    pub fn adjust_rate(&mut self, steps: i16) {
        let next = (self.rate + steps as f32 * SLIDER_STEP).clamp(RATE_MIN, RATE_MAX);
        if next != self.rate {
            self.rate = next;
            self.dirty = true;
        }
    }

    /// Nudge the volume slider
    pub fn adjust_volume(&mut self, steps: i16) {
        let next = (self.volume as i16 + steps * VOLUME_STEP).clamp(0, 100) as u8;
        if next != self.volume {
            self.volume = next;
            self.dirty = true;
        }
    }

    /// React to one service notification
    pub fn handle_event(&mut self, event: SpeechEvent) {
        match &event {
            SpeechEvent::VoicesChanged => {
                debug!("Voice catalog changed, reloading");
                if let Err(e) = self.load_voices() {
                    error!("Failed to reload voices: {}", e);
                }
                return;
            }
            SpeechEvent::Error(msg) => error!("Something went wrong: {}", msg),
            SpeechEvent::End => debug!("Done speaking..."),
            _ => {}
        }

        let next = transition(self.state, &event);
        if next != self.state {
            debug!("State {:?} -> {:?} on {:?}", self.state, next, event);
            self.state = next;
        }
        self.apply_presentation();
    }

    /// Drain pending service notifications
    pub fn pump_events(&mut self) {
        while let Some(event) = self.service.poll_event() {
            self.handle_event(event);
        }
    }

    /// Update the button label and animation toggle from the current state
    fn apply_presentation(&mut self) {
        let (label, animating) = match self.state {
            SpeakState::Speaking => (LABEL_PAUSE, true),
            SpeakState::Idle | SpeakState::Paused => (LABEL_SPEAK, false),
        };

        if label != self.label || animating != self.animating {
            self.label = label;
            self.animating = animating;
            self.dirty = true;
        }
    }

    // Accessors for the renderer and the event loop

    pub fn state(&self) -> SpeakState {
        self.state
    }

    pub fn button_label(&self) -> &'static str {
        self.label
    }

    /// Whether the background animation should be drawn
    pub fn animation_on(&self) -> bool {
        self.animating && self.animation_enabled
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &[VoiceOption] {
        &self.options
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// Clear and return the redraw flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
