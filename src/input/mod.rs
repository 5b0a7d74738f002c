//! Input handling and key bindings
//!
//! Bound escape sequences trigger form commands; everything else that is
//! printable lands in the text field.

pub mod keymap;

pub use keymap::{create_default_keymap, KeyAction, KeySequence};

use crate::controller::Controller;
use crate::Result;
use log::{debug, trace};
use std::collections::HashMap;

/// Action to take after processing a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerAction {
    /// Key was handled, keep running
    Handled,
    /// Exit the application
    Quit,
}

/// Key handler for the speak-it form
///
/// Resolves key sequences against the keymap and routes unbound printable
/// input into the controller's text field.
pub struct FormKeyHandler {
    /// Key bindings map
    keymap: HashMap<KeySequence, KeyAction>,
}

impl FormKeyHandler {
    /// Create a new form key handler
    pub fn new(keymap: HashMap<KeySequence, KeyAction>) -> Self {
        debug!("Creating form key handler with {} bindings", keymap.len());
        Self { keymap }
    }

    /// Process one key sequence read from the terminal
    pub fn process_key(&mut self, key: &[u8], controller: &mut Controller) -> Result<HandlerAction> {
        if let Some(action) = self.keymap.get(key).cloned() {
            trace!("Key action: {:?}", action);
            return Ok(self.execute_action(&action, controller));
        }

        // Unbound escape sequences are swallowed rather than typed
        if key.first() == Some(&0x1b) {
            trace!("Ignoring unbound escape sequence: {:?}", key);
            return Ok(HandlerAction::Handled);
        }

        // Everything printable goes into the text field
        let input: String = String::from_utf8_lossy(key)
            .chars()
            .filter(|ch| !ch.is_control())
            .collect();
        if !input.is_empty() {
            controller.insert_text(&input);
        }

        Ok(HandlerAction::Handled)
    }

    /// Execute a form command
    fn execute_action(&mut self, action: &KeyAction, controller: &mut Controller) -> HandlerAction {
        use KeyAction::*;

        match action {
            SubmitForm => {
                debug!("Form submitted");
                controller.submit();
            }
            NextVoice => controller.select_next_voice(),
            PrevVoice => controller.select_prev_voice(),
            PitchUp => controller.adjust_pitch(1),
            PitchDown => controller.adjust_pitch(-1),
            RateUp => controller.adjust_rate(1),
            RateDown => controller.adjust_rate(-1),
            VolumeUp => controller.adjust_volume(1),
            VolumeDown => controller.adjust_volume(-1),
            Backspace => controller.backspace(),
            ClearText => controller.clear_text(),
            Quit => {
                debug!("Quit requested");
                return HandlerAction::Quit;
            }
        }

        HandlerAction::Handled
    }
}
