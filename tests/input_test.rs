//! Input system tests
//!
//! Tests the key binding table and the form key handler: bound sequences
//! trigger form commands, unbound printable input lands in the text field.

mod common;

use common::{test_config, voice, MockService};
use speakit::controller::Controller;
use speakit::input::{create_default_keymap, FormKeyHandler, HandlerAction, KeyAction};

fn form() -> (FormKeyHandler, Controller) {
    let (service, _state) = MockService::with_voices(vec![
        voice("Samantha", "en-US", true),
        voice("Daniel", "en-GB", false),
    ]);
    let mut controller = Controller::new(Box::new(service), &test_config());
    controller.load_voices().expect("Failed to load voices");
    (FormKeyHandler::new(create_default_keymap()), controller)
}

#[test]
fn test_keymap_creation() {
    let keymap = create_default_keymap();

    // Submit
    assert_eq!(keymap.get(&b"\r".to_vec()), Some(&KeyAction::SubmitForm));
    assert_eq!(keymap.get(&b"\n".to_vec()), Some(&KeyAction::SubmitForm));

    // Voice selector
    assert_eq!(keymap.get(&b"\x1b[A".to_vec()), Some(&KeyAction::PrevVoice));
    assert_eq!(keymap.get(&b"\x1b[B".to_vec()), Some(&KeyAction::NextVoice));
    assert_eq!(keymap.get(&b"\x1bOA".to_vec()), Some(&KeyAction::PrevVoice));

    // Sliders
    assert_eq!(keymap.get(&b"\x1bp".to_vec()), Some(&KeyAction::PitchDown));
    assert_eq!(keymap.get(&b"\x1bP".to_vec()), Some(&KeyAction::PitchUp));
    assert_eq!(keymap.get(&b"\x1br".to_vec()), Some(&KeyAction::RateDown));
    assert_eq!(keymap.get(&b"\x1bR".to_vec()), Some(&KeyAction::RateUp));
    assert_eq!(keymap.get(&b"\x1bv".to_vec()), Some(&KeyAction::VolumeDown));
    assert_eq!(keymap.get(&b"\x1bV".to_vec()), Some(&KeyAction::VolumeUp));

    // Editing and exit
    assert_eq!(keymap.get(&b"\x7f".to_vec()), Some(&KeyAction::Backspace));
    assert_eq!(keymap.get(&b"\x15".to_vec()), Some(&KeyAction::ClearText));
    assert_eq!(keymap.get(&b"\x1bq".to_vec()), Some(&KeyAction::Quit));
    assert_eq!(keymap.get(&b"\x03".to_vec()), Some(&KeyAction::Quit));
}

#[test]
fn typed_characters_land_in_text_field() {
    let (mut handler, mut controller) = form();

    handler.process_key(b"h", &mut controller).unwrap();
    handler.process_key(b"i", &mut controller).unwrap();
    assert_eq!(controller.text(), "hi");

    // Multi-byte chunks (paste) arrive whole
    handler.process_key(" there".as_bytes(), &mut controller).unwrap();
    assert_eq!(controller.text(), "hi there");
}

#[test]
fn backspace_and_clear_edit_the_text_field() {
    let (mut handler, mut controller) = form();

    handler.process_key(b"abc", &mut controller).unwrap();
    handler.process_key(b"\x7f", &mut controller).unwrap();
    assert_eq!(controller.text(), "ab");

    handler.process_key(b"\x15", &mut controller).unwrap();
    assert_eq!(controller.text(), "");
}

#[test]
fn slider_keys_adjust_values() {
    let (mut handler, mut controller) = form();

    handler.process_key(b"\x1bP", &mut controller).unwrap();
    assert_eq!(controller.pitch(), 1.1);

    handler.process_key(b"\x1br", &mut controller).unwrap();
    assert_eq!(controller.rate(), 0.9);

    handler.process_key(b"\x1bv", &mut controller).unwrap();
    assert_eq!(controller.volume(), 95);
}

#[test]
fn enter_submits_the_form() {
    let (mut handler, mut controller) = form();

    handler.process_key(b"speak this", &mut controller).unwrap();
    let action = handler.process_key(b"\r", &mut controller).unwrap();
    assert_eq!(action, HandlerAction::Handled);

    controller.pump_events();
    assert_eq!(
        controller.state(),
        speakit::controller::SpeakState::Speaking
    );
}

#[test]
fn arrow_keys_cycle_voices() {
    let (mut handler, mut controller) = form();
    let before = controller.selected_index();

    handler.process_key(b"\x1b[B", &mut controller).unwrap();
    assert_ne!(controller.selected_index(), before);

    handler.process_key(b"\x1b[A", &mut controller).unwrap();
    assert_eq!(controller.selected_index(), before);
}

#[test]
fn quit_key_exits() {
    let (mut handler, mut controller) = form();

    let action = handler.process_key(b"\x1bq", &mut controller).unwrap();
    assert_eq!(action, HandlerAction::Quit);

    let action = handler.process_key(b"\x03", &mut controller).unwrap();
    assert_eq!(action, HandlerAction::Quit);
}

#[test]
fn unbound_escape_sequences_are_ignored() {
    let (mut handler, mut controller) = form();

    // Right arrow has no binding and must not type into the field
    handler.process_key(b"\x1b[C", &mut controller).unwrap();
    assert_eq!(controller.text(), "");

    // Control bytes are filtered from printable input
    handler.process_key(b"\x01", &mut controller).unwrap();
    assert_eq!(controller.text(), "");
}
