//! Configuration loading tests
//!
//! Tests that startup defaults load correctly, that a missing config file
//! is created with stock values, and that out-of-range values are clamped.

use speakit::config::Config;
use std::io::Write;

#[test]
fn test_missing_config_creates_defaults() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(".speakit.cfg");

    let config = Config::load_from(&path).expect("Failed to load config");

    // File was written on first load
    assert!(path.exists());
    assert!(config.path().to_str().unwrap().contains(".speakit.cfg"));

    // Stock slider defaults
    assert_eq!(config.pitch(), 1.0);
    assert_eq!(config.rate(), 1.0);
    assert_eq!(config.volume(), 100);
    assert_eq!(config.voice(), None);
    assert!(config.animation());
}

#[test]
fn test_config_values_are_read() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(".speakit.cfg");

    let mut file = std::fs::File::create(&path).expect("Failed to create config");
    writeln!(file, "[speech]").unwrap();
    writeln!(file, "pitch=1.4").unwrap();
    writeln!(file, "rate=0.8").unwrap();
    writeln!(file, "volume=60").unwrap();
    writeln!(file, "voice=Daniel").unwrap();
    writeln!(file, "[ui]").unwrap();
    writeln!(file, "animation=false").unwrap();
    drop(file);

    let config = Config::load_from(&path).expect("Failed to load config");

    assert_eq!(config.pitch(), 1.4);
    assert_eq!(config.rate(), 0.8);
    assert_eq!(config.volume(), 60);
    assert_eq!(config.voice().as_deref(), Some("Daniel"));
    assert!(!config.animation());
}

#[test]
fn test_out_of_range_values_are_clamped() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(".speakit.cfg");

    let mut file = std::fs::File::create(&path).expect("Failed to create config");
    writeln!(file, "[speech]").unwrap();
    writeln!(file, "pitch=9.0").unwrap();
    writeln!(file, "rate=0.1").unwrap();
    writeln!(file, "volume=250").unwrap();
    drop(file);

    let config = Config::load_from(&path).expect("Failed to load config");

    assert_eq!(config.pitch(), 2.0);
    assert_eq!(config.rate(), 0.5);
    assert_eq!(config.volume(), 100);
}

#[test]
fn test_unparseable_values_fall_back() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(".speakit.cfg");

    let mut file = std::fs::File::create(&path).expect("Failed to create config");
    writeln!(file, "[speech]").unwrap();
    writeln!(file, "pitch=loud").unwrap();
    writeln!(file, "volume=very").unwrap();
    drop(file);

    let config = Config::load_from(&path).expect("Failed to load config");

    assert_eq!(config.pitch(), 1.0);
    assert_eq!(config.volume(), 100);
}

#[test]
fn test_typed_getters() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config =
        Config::load_from(dir.path().join(".speakit.cfg")).expect("Failed to load config");

    assert_eq!(config.get_string("speech", "missing", "fallback"), "fallback");
    assert_eq!(config.get_int("speech", "missing", 7), 7);
    assert_eq!(config.get_float("speech", "pitch", 0.0), 1.0);
    assert!(config.get_bool("ui", "animation", false));
}
