//! Driver settings
//!
//! Read from an optional JSON file. Missing fields fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::sim::LevelId;

/// Autopilot behavior for headless runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Autopilot {
    /// Hold position and fire
    Turret,
    /// Track the nearest enemy vertically and fire
    #[default]
    Tracking,
}

impl Autopilot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Autopilot::Turret => "Turret",
            Autopilot::Tracking => "Tracking",
        }
    }
}

/// Runtime settings for the headless driver
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Run ===
    /// Seed for the first level; each following level uses `seed + index`
    pub seed: u64,
    pub start_level: LevelId,
    pub autopilot: Autopilot,
    /// Give up on a level after this much simulated time
    pub max_seconds_per_level: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 1300.0,
            screen_height: 750.0,

            seed: 42,
            start_level: LevelId::first(),
            autopilot: Autopilot::default(),
            max_seconds_per_level: 300,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Seed for a level, offset by its position in the sequence
    pub fn seed_for(&self, level: LevelId) -> u64 {
        let index = LevelId::SEQUENCE.iter().position(|l| *l == level).unwrap_or(0);
        self.seed.wrapping_add(index as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "start_level": "BossLevel" }"#).unwrap();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.start_level, LevelId::BossLevel);
        assert_eq!(settings.screen_width, 1300.0);
        assert_eq!(settings.autopilot, Autopilot::Tracking);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(Settings::from_json("{ seed: "), Err(GameError::Settings(_))));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(matches!(
            Settings::load("/nonexistent/sky-assault.json"),
            Err(GameError::Io(_))
        ));
    }

    #[test]
    fn test_seed_per_level() {
        let settings = Settings::default();
        assert_eq!(settings.seed_for(LevelId::LevelOne), 42);
        assert_eq!(settings.seed_for(LevelId::BossLevel), 45);
    }
}
