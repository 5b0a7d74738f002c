//! Default key bindings for the speak-it form

use std::collections::HashMap;

/// Key sequence type
pub type KeySequence = Vec<u8>;

/// Action identifier for key bindings
///
/// Each variant represents a form command that can be triggered by a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Submit the form: speak, pause, or resume depending on state
    SubmitForm,

    // Voice selector
    NextVoice,
    PrevVoice,

    // Sliders
    PitchUp,
    PitchDown,
    RateUp,
    RateDown,
    VolumeUp,
    VolumeDown,

    // Text field editing
    Backspace,
    ClearText,

    // Exit
    Quit,
}

/// Create the default keymap
pub fn create_default_keymap() -> HashMap<KeySequence, KeyAction> {
    let mut map = HashMap::new();

    // Enter submits the form
    map.insert(b"\r".to_vec(), KeyAction::SubmitForm);
    map.insert(b"\n".to_vec(), KeyAction::SubmitForm);

    // Up/down arrows move through the voice selector
    map.insert(b"\x1b[A".to_vec(), KeyAction::PrevVoice);
    map.insert(b"\x1b[B".to_vec(), KeyAction::NextVoice);
    map.insert(b"\x1bOA".to_vec(), KeyAction::PrevVoice);
    map.insert(b"\x1bOB".to_vec(), KeyAction::NextVoice);

    // Sliders (alt+letter down, alt+shift+letter up)
    map.insert(b"\x1bp".to_vec(), KeyAction::PitchDown);
    map.insert(b"\x1bP".to_vec(), KeyAction::PitchUp);
    map.insert(b"\x1br".to_vec(), KeyAction::RateDown);
    map.insert(b"\x1bR".to_vec(), KeyAction::RateUp);
    map.insert(b"\x1bv".to_vec(), KeyAction::VolumeDown);
    map.insert(b"\x1bV".to_vec(), KeyAction::VolumeUp);

    // Text field editing
    map.insert(b"\x08".to_vec(), KeyAction::Backspace);
    map.insert(b"\x7f".to_vec(), KeyAction::Backspace);
    map.insert(b"\x15".to_vec(), KeyAction::ClearText); // ctrl+u

    // Exit (alt+q or ctrl+c)
    map.insert(b"\x1bq".to_vec(), KeyAction::Quit);
    map.insert(b"\x03".to_vec(), KeyAction::Quit);

    map
}
