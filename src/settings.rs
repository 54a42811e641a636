//! Game settings
//!
//! Every tunable lives here. Loaded from a JSON file when one is present,
//! otherwise the defaults reproduce the classic 30 second run.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// File picked up from the working directory when no path is given
pub const DEFAULT_SETTINGS_FILE: &str = "side-scroller.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === World ===
    /// Playfield width in world pixels
    pub width: f64,
    /// Playfield height in world pixels
    pub height: f64,
    /// Distance from the bottom edge to the ground line
    pub ground_margin: f64,
    /// World scroll speed at a factor of 1
    pub max_speed: f64,
    /// Horizontal speed of the player when a direction is held
    pub player_max_speed: f64,

    // === Session ===
    /// Countdown length in milliseconds
    pub max_time: f64,
    pub lives: u32,
    /// Score that must be beaten to win
    pub winning_score: u32,

    // === Scheduling ===
    /// Milliseconds between enemy waves
    pub enemy_interval: f64,
    /// Particles beyond this many are dropped each tick
    pub max_particles: usize,
    /// Upper bound on a single frame delta in milliseconds
    pub max_frame_delta: f64,
    /// Sleep between frames in milliseconds
    pub frame_sleep_ms: u64,

    // === Misc ===
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
    pub sound: bool,
    /// Start with hitboxes drawn
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 500.0,
            ground_margin: 80.0,
            max_speed: 3.0,
            player_max_speed: 10.0,

            max_time: 30_000.0,
            lives: 5,
            winning_score: 35,

            enemy_interval: 1000.0,
            max_particles: 200,
            max_frame_delta: 100.0,
            frame_sleep_ms: 8,

            seed: None,
            sound: true,
            debug: false,
        }
    }
}

impl Settings {
    /// Loads settings from `path`, or from [`DEFAULT_SETTINGS_FILE`] if it
    /// exists, falling back to defaults. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default_path = PathBuf::from(DEFAULT_SETTINGS_FILE);
                if !default_path.exists() {
                    info!("No {DEFAULT_SETTINGS_FILE} found, using default settings");
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let contents = fs::read_to_string(&path)
            .wrap_err_with(|| format!("Failed to read settings from {}", path.display()))?;
        let settings = Self::from_json(&contents)
            .wrap_err_with(|| format!("Invalid settings in {}", path.display()))?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parses and validates settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.validate();
        Ok(settings)
    }

    /// Replaces values the game cannot run with by their defaults
    pub fn validate(&mut self) {
        let defaults = Self::default();

        if !(self.width > 0.0 && self.height > 0.0) {
            warn!(
                "Playfield {}x{} is not drawable, using {}x{}",
                self.width, self.height, defaults.width, defaults.height
            );
            self.width = defaults.width;
            self.height = defaults.height;
        }
        if !(0.0..self.height).contains(&self.ground_margin) {
            warn!("Ground margin {} is off the playfield, using {}", self.ground_margin, defaults.ground_margin.min(self.height * 0.5));
            self.ground_margin = defaults.ground_margin.min(self.height * 0.5);
        }
        if !(self.enemy_interval > 0.0) {
            warn!("Enemy interval {} must be positive, using {}", self.enemy_interval, defaults.enemy_interval);
            self.enemy_interval = defaults.enemy_interval;
        }
        if !(self.max_frame_delta > 0.0) {
            warn!("Max frame delta {} must be positive, using {}", self.max_frame_delta, defaults.max_frame_delta);
            self.max_frame_delta = defaults.max_frame_delta;
        }
        if !(self.max_time > 0.0) {
            warn!("Max time {} must be positive, using {}", self.max_time, defaults.max_time);
            self.max_time = defaults.max_time;
        }
        if self.max_speed < 0.0 {
            self.max_speed = defaults.max_speed;
        }
        if self.player_max_speed < 0.0 {
            self.player_max_speed = defaults.player_max_speed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_run() {
        let settings = Settings::default();
        assert_eq!(settings.max_time, 30_000.0);
        assert_eq!(settings.enemy_interval, 1000.0);
        assert_eq!(settings.max_particles, 200);
        assert_eq!(settings.lives, 5);
        assert_eq!(settings.winning_score, 35);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "lives": 3, "seed": 42 }"#).unwrap();
        assert_eq!(settings.lives, 3);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.max_particles, 200);
    }

    #[test]
    fn test_invalid_values_are_replaced() {
        let settings =
            Settings::from_json(r#"{ "enemy_interval": 0, "width": -5, "ground_margin": 9000 }"#)
                .unwrap();
        assert_eq!(settings.enemy_interval, 1000.0);
        assert_eq!(settings.width, 900.0);
        assert_eq!(settings.ground_margin, 80.0);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Settings::from_json("{ lives: ").is_err());
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let result = Settings::load(Some(Path::new("/definitely/not/here.json")));
        assert!(result.is_err());
    }

    #[test]
    fn test_round_trips_through_json() {
        let settings = Settings {
            seed: Some(7),
            debug: true,
            ..Settings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }
}
