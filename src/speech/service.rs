//! Speech service abstraction
//!
//! Defines the contract between the form controller and the platform
//! speech-synthesis engine: voice enumeration, one-shot speech requests,
//! playback control, and lifecycle notifications.

use crate::Result;
use log::info;

/// A named, language-tagged voice provided by the platform engine.
///
/// Immutable, owned by the engine; the controller only caches the most
/// recently fetched list.
#[derive(Debug, Clone, PartialEq)]
pub struct Voice {
    pub name: String,
    pub language: String,
    /// True for the engine's default voice
    pub default: bool,
}

impl Voice {
    /// Selector label for this voice: `"<name> (<language>)"`,
    /// with `" -- DEFAULT"` appended for the engine default.
    pub fn option_label(&self) -> String {
        let mut label = format!("{} ({})", self.name, self.language);
        if self.default {
            label.push_str(" -- DEFAULT");
        }
        label
    }
}

/// A single speech request, built fresh from the form for each speak action.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,

    /// Requested voice name; `None` leaves the engine on its own default
    pub voice: Option<String>,

    /// Rate multiplier around 1.0 (normal speed)
    pub rate: f32,

    /// Pitch multiplier around 1.0 (normal pitch)
    pub pitch: f32,

    /// Volume as a 0.0-1.0 fraction
    pub volume: f32,
}

/// Lifecycle notifications emitted by the speech service
///
/// The controller consumes these to drive its state machine and the
/// presentation feedback (button label, background animation).
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechEvent {
    /// An utterance started playing
    Start,
    /// The active utterance was paused
    Pause,
    /// A paused utterance resumed
    Resume,
    /// The active utterance finished or was cancelled
    End,
    /// Synthesis failed
    Error(String),
    /// The installed voice catalog changed
    VoicesChanged,
}

/// Platform speech-synthesis service
///
/// The engine is an opaque asynchronous collaborator: `speak` returns
/// immediately and progress is reported through `poll_event`. All methods
/// are called from the single-threaded event loop.
pub trait SpeechService: Send {
    /// Current voice catalog
    ///
    /// May be empty on the first call if the engine populates its list
    /// asynchronously; a later `SpeechEvent::VoicesChanged` signals that
    /// the catalog should be fetched again.
    fn voices(&mut self) -> Result<Vec<Voice>>;

    /// Begin speaking an utterance
    fn speak(&mut self, utterance: &Utterance) -> Result<()>;

    /// Stop immediately, discarding the active utterance
    fn cancel(&mut self) -> Result<()>;

    /// Pause the active utterance
    fn pause(&mut self) -> Result<()>;

    /// Resume a paused utterance
    fn resume(&mut self) -> Result<()>;

    /// True while an utterance is active, including while paused
    fn is_speaking(&self) -> bool;

    /// True while the active utterance is paused
    fn is_paused(&self) -> bool;

    /// Drain the next pending notification, if any
    fn poll_event(&mut self) -> Option<SpeechEvent>;
}

/// Create the platform speech service
pub fn create_service() -> Result<Box<dyn SpeechService>> {
    use super::backends::native::NativeService;

    info!(
        "Creating native speech service for platform: {}",
        std::env::consts::OS
    );

    let service = NativeService::new()?;
    info!("Native speech service initialized");
    Ok(Box::new(service))
}
