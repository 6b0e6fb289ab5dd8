//! Game settings
//!
//! Loaded from a JSON file on native builds; every field has a default, so a
//! partial file only overrides what it names. The browser build uses defaults.

use serde::{Deserialize, Serialize};

use crate::sim::SimConfig;

/// Environment variable naming the settings file
pub const SETTINGS_ENV: &str = "BRICK_ROGUE_SETTINGS";
/// Settings file used when the environment variable is unset
pub const DEFAULT_SETTINGS_PATH: &str = "settings.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
    /// High score file (native only)
    pub score_file: String,

    // === Demo driver ===
    /// Frames to simulate before exiting
    pub frames: u32,
    /// Runs to play before exiting (restarts in between)
    pub max_games: u32,
    /// Print a text frame every N frames (0 = only at game over)
    pub print_every: u32,

    // === Text renderer ===
    pub ascii_columns: usize,
    pub ascii_rows: usize,

    /// Playfield and brick layout
    pub sim: SimConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            score_file: "breakout_highscore.json".to_string(),

            frames: 20_000,
            max_games: 3,
            print_every: 0,

            ascii_columns: 86,
            ascii_rows: 30,

            sim: SimConfig::default(),
        }
    }
}

impl Settings {
    /// Parse settings JSON, falling back to defaults on malformed input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Invalid settings, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Load settings from `$BRICK_ROGUE_SETTINGS` or `settings.json`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let path =
            std::env::var(SETTINGS_ENV).unwrap_or_else(|_| DEFAULT_SETTINGS_PATH.to_string());
        match std::fs::read_to_string(&path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path);
                Self::from_json(&json)
            }
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::default()
    }
}
