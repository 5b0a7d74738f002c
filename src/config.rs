//! Configuration management
//!
//! Startup defaults for the form controls, loaded from ~/.speakit.cfg.
//! The file is read once at startup and never written back: changes the
//! user makes to the sliders during a session are deliberately not saved.

use crate::{Result, SpeakItError};
use ini::Ini;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Application configuration
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Config file path (~/.speakit.cfg)
    path: PathBuf,
}

impl Config {
    /// Load configuration from disk or create default
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from an explicit path (used by tests)
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(&path)
                .map_err(|e| SpeakItError::IniParse(format!("Failed to load config: {}", e)))?
        } else {
            info!("Config file not found, creating default");
            let default = Self::default_config();
            default
                .write_to_file(&path)
                .map_err(|e| SpeakItError::IniParse(format!("Failed to write config: {}", e)))?;
            default
        };

        Ok(Self { ini, path })
    }

    /// Get config file path (~/.speakit.cfg)
    fn config_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".speakit.cfg")
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Create default configuration
    fn default_config() -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some("speech"))
            .set("pitch", "1.0")
            .set("rate", "1.0")
            .set("volume", "100");

        ini.with_section(Some("ui")).set("animation", "true");

        ini
    }

    /// Get a boolean value from config
    pub fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get a string value from config
    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.ini
            .get_from(Some(section), key)
            .unwrap_or(default)
            .to_string()
    }

    /// Get an integer value from config
    pub fn get_int(&self, section: &str, key: &str, default: i32) -> i32 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get a float value from config
    pub fn get_float(&self, section: &str, key: &str, default: f32) -> f32 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    // Form-specific configuration getters

    /// Initial pitch slider value (multiplier, 0.0-2.0)
    pub fn pitch(&self) -> f32 {
        self.get_float("speech", "pitch", 1.0).clamp(0.0, 2.0)
    }

    /// Initial rate slider value (multiplier, 0.5-2.0)
    pub fn rate(&self) -> f32 {
        self.get_float("speech", "rate", 1.0).clamp(0.5, 2.0)
    }

    /// Initial volume slider value (0-100)
    pub fn volume(&self) -> u8 {
        self.get_int("speech", "volume", 100).clamp(0, 100) as u8
    }

    /// Preferred voice name to pre-select when present in the catalog
    pub fn voice(&self) -> Option<String> {
        let name = self.get_string("speech", "voice", "");
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }

    /// Whether the background wave animation is shown while speaking
    pub fn animation(&self) -> bool {
        self.get_bool("ui", "animation", true)
    }
}
