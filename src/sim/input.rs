//! Input intents forwarded by the presentation layer

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    StopMoving,
    StartFiring,
    StopFiring,
    TogglePause,
}

impl FromStr for Intent {
    type Err = GameError;

    /// Unknown tokens are rejected rather than ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "moveup" | "up" => Ok(Intent::MoveUp),
            "movedown" | "down" => Ok(Intent::MoveDown),
            "moveleft" | "left" => Ok(Intent::MoveLeft),
            "moveright" | "right" => Ok(Intent::MoveRight),
            "stopmoving" | "stop" => Ok(Intent::StopMoving),
            "startfiring" | "fire" => Ok(Intent::StartFiring),
            "stopfiring" => Ok(Intent::StopFiring),
            "togglepause" | "pause" => Ok(Intent::TogglePause),
            _ => Err(GameError::UnknownIntent(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_intents() {
        assert_eq!("moveUp".parse::<Intent>().unwrap(), Intent::MoveUp);
        assert_eq!("fire".parse::<Intent>().unwrap(), Intent::StartFiring);
        assert_eq!("TogglePause".parse::<Intent>().unwrap(), Intent::TogglePause);
    }

    #[test]
    fn test_unknown_intent_is_an_error() {
        let err = "diagonal".parse::<Intent>().unwrap_err();
        assert!(matches!(err, GameError::UnknownIntent(ref s) if s == "diagonal"));
    }
}
