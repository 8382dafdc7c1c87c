//! Error taxonomy
//!
//! Gameplay conditions (kills, escapes, expiry) are ordinary state
//! transitions and never show up here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid score bounds: upper bound {upper} must be less than lower bound {lower}")]
    InvalidScoreBounds { upper: f32, lower: f32 },
    #[error("unknown input intent: {0:?}")]
    UnknownIntent(String),
    #[error("unknown level: {0:?}")]
    UnknownLevel(String),
    #[error("invalid screen size {width}x{height}")]
    InvalidScreen { width: f32, height: f32 },
    #[error("failed to parse settings: {0}")]
    Settings(#[from] serde_json::Error),
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
}
