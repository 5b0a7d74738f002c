//! Native TTS backend using the tts crate
//!
//! This backend uses the `tts` crate which provides a unified interface to:
//! - Speech Dispatcher on Linux (via native bindings)
//! - AVFoundation on macOS/iOS (via native bindings)
//! - Various other platforms
//!
//! Utterance begin/end/stop callbacks are funneled into a channel that the
//! event loop drains through `poll_event`. Catalog changes are detected by
//! comparing voice snapshots at a coarse interval.

use crate::speech::{SpeechEvent, SpeechService, Utterance, Voice};
use crate::{Result, SpeakItError};
use log::{debug, error, warn};
use std::sync::mpsc::{channel, Receiver, Sender};
use tts::Tts as TtsCrate;

/// How many `poll_event` calls pass between catalog snapshots.
/// The event loop ticks roughly every 100ms, so this checks every ~2s.
const CATALOG_POLL_INTERVAL: u32 = 20;

/// Native speech service backed by the tts crate
pub struct NativeService {
    /// The tts crate's TTS instance
    tts: TtsCrate,

    /// Lifecycle events produced by utterance callbacks
    events: Receiver<SpeechEvent>,

    /// Engine voice id that was active at startup (the platform default)
    default_voice_id: Option<String>,

    /// Last reported catalog, as (name, language) pairs
    catalog: Vec<(String, String)>,

    /// Calls since the catalog was last snapshotted
    polls_since_catalog_check: u32,
}

impl NativeService {
    /// Create a new native speech service
    ///
    /// Initializes the platform TTS engine and registers utterance
    /// callbacks when the platform supports them.
    pub fn new() -> Result<Self> {
        debug!("Creating native TTS backend");

        let mut tts = TtsCrate::default()
            .map_err(|e| SpeakItError::Speech(format!("Failed to initialize TTS: {}", e)))?;

        let features = tts.supported_features();
        debug!("TTS features: {:?}", features);

        // The engine's current voice at startup is the platform default
        let default_voice_id = if features.get_voice {
            tts.voice()
                .map_err(|e| SpeakItError::Speech(format!("Failed to query voice: {}", e)))?
                .map(|v| v.id())
        } else {
            None
        };

        let (tx, rx) = channel();
        if features.utterance_callbacks {
            Self::register_callbacks(&mut tts, tx)?;
        } else {
            warn!("Utterance callbacks not supported on this platform; lifecycle events unavailable");
        }

        let mut service = Self {
            tts,
            events: rx,
            default_voice_id,
            catalog: Vec::new(),
            polls_since_catalog_check: 0,
        };
        service.catalog = service.catalog_snapshot();

        debug!("Native TTS backend created successfully");
        Ok(service)
    }

    /// Register begin/end/stop callbacks that forward into the event channel
    fn register_callbacks(tts: &mut TtsCrate, tx: Sender<SpeechEvent>) -> Result<()> {
        let begin_tx = tx.clone();
        tts.on_utterance_begin(Some(Box::new(move |_id| {
            let _ = begin_tx.send(SpeechEvent::Start);
        })))
        .map_err(|e| SpeakItError::Speech(format!("Failed to set begin callback: {}", e)))?;

        let end_tx = tx.clone();
        tts.on_utterance_end(Some(Box::new(move |_id| {
            let _ = end_tx.send(SpeechEvent::End);
        })))
        .map_err(|e| SpeakItError::Speech(format!("Failed to set end callback: {}", e)))?;

        // A stopped utterance is done as far as the form is concerned
        tts.on_utterance_stop(Some(Box::new(move |_id| {
            let _ = tx.send(SpeechEvent::End);
        })))
        .map_err(|e| SpeakItError::Speech(format!("Failed to set stop callback: {}", e)))?;

        Ok(())
    }

    /// Current catalog as comparable (name, language) pairs
    fn catalog_snapshot(&mut self) -> Vec<(String, String)> {
        match self.tts.voices() {
            Ok(voices) => voices
                .iter()
                .map(|v| (v.name(), v.language().as_str().to_string()))
                .collect(),
            Err(e) => {
                debug!("Voice enumeration failed during snapshot: {}", e);
                Vec::new()
            }
        }
    }

    /// Convert an utterance rate multiplier to the platform rate range
    fn convert_rate(&self, rate: f32) -> f32 {
        let scaled = self.tts.normal_rate() * rate;
        scaled.clamp(self.tts.min_rate(), self.tts.max_rate())
    }

    /// Convert an utterance pitch multiplier to the platform pitch range
    fn convert_pitch(&self, pitch: f32) -> f32 {
        let scaled = self.tts.normal_pitch() * pitch;
        scaled.clamp(self.tts.min_pitch(), self.tts.max_pitch())
    }

    /// Convert a 0.0-1.0 volume fraction to the platform volume range
    fn convert_volume(&self, volume: f32) -> f32 {
        let min = self.tts.min_volume();
        let max = self.tts.max_volume();
        (min + volume * (max - min)).clamp(min, max)
    }

    /// Select the engine voice matching the requested name
    ///
    /// No match leaves the engine on its current (default) voice.
    fn apply_voice(&mut self, name: &str) -> Result<()> {
        let voices = self
            .tts
            .voices()
            .map_err(|e| SpeakItError::Speech(format!("Failed to get voices: {}", e)))?;

        if let Some(voice) = voices.iter().find(|v| v.name() == name) {
            debug!("Selecting voice: {}", name);
            self.tts
                .set_voice(voice)
                .map_err(|e| SpeakItError::Speech(format!("Failed to set voice: {}", e)))?;
        } else {
            warn!("Voice '{}' not found, keeping engine default", name);
        }

        Ok(())
    }
}

impl SpeechService for NativeService {
    fn voices(&mut self) -> Result<Vec<Voice>> {
        let voices = self
            .tts
            .voices()
            .map_err(|e| SpeakItError::Speech(format!("Failed to get voices: {}", e)))?;

        Ok(voices
            .iter()
            .map(|v| Voice {
                name: v.name(),
                language: v.language().as_str().to_string(),
                default: self.default_voice_id.as_deref() == Some(v.id().as_str()),
            })
            .collect())
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<()> {
        let features = self.tts.supported_features();

        if features.voice {
            if let Some(ref name) = utterance.voice {
                self.apply_voice(name)?;
            }
        }

        if features.rate {
            let rate = self.convert_rate(utterance.rate);
            self.tts
                .set_rate(rate)
                .map_err(|e| SpeakItError::Speech(format!("Failed to set rate: {}", e)))?;
        } else {
            warn!("Rate control not supported on this platform");
        }

        if features.pitch {
            let pitch = self.convert_pitch(utterance.pitch);
            self.tts
                .set_pitch(pitch)
                .map_err(|e| SpeakItError::Speech(format!("Failed to set pitch: {}", e)))?;
        } else {
            warn!("Pitch control not supported on this platform");
        }

        if features.volume {
            let volume = self.convert_volume(utterance.volume);
            self.tts
                .set_volume(volume)
                .map_err(|e| SpeakItError::Speech(format!("Failed to set volume: {}", e)))?;
        } else {
            warn!("Volume control not supported on this platform");
        }

        debug!("Speaking: {}", utterance.text);
        self.tts.speak(&utterance.text, false).map_err(|e| {
            error!("Failed to speak: {}", e);
            SpeakItError::Speech(format!("Speak failed: {}", e))
        })?;

        Ok(())
    }

    fn cancel(&mut self) -> Result<()> {
        debug!("Cancelling speech");
        self.tts.stop().map_err(|e| {
            error!("Failed to cancel speech: {}", e);
            SpeakItError::Speech(format!("Cancel failed: {}", e))
        })?;

        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        // The tts crate exposes no pause on any platform it wraps
        warn!("Pause not supported by this backend");
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        warn!("Resume not supported by this backend");
        Ok(())
    }

    fn is_speaking(&self) -> bool {
        self.tts.is_speaking().unwrap_or(false)
    }

    fn is_paused(&self) -> bool {
        false
    }

    fn poll_event(&mut self) -> Option<SpeechEvent> {
        if let Ok(event) = self.events.try_recv() {
            return Some(event);
        }

        // Periodic catalog snapshot: engines populate their voice list
        // asynchronously and have no change notification of their own
        self.polls_since_catalog_check += 1;
        if self.polls_since_catalog_check >= CATALOG_POLL_INTERVAL {
            self.polls_since_catalog_check = 0;
            let snapshot = self.catalog_snapshot();
            if snapshot != self.catalog {
                debug!(
                    "Voice catalog changed: {} -> {} voices",
                    self.catalog.len(),
                    snapshot.len()
                );
                self.catalog = snapshot;
                return Some(SpeechEvent::VoicesChanged);
            }
        }

        None
    }
}
