//! Scoring and progression
//!
//! Per-hit rewards grow with how far right the player is when scoring,
//! and the end-of-tick outcome gives loss precedence over advancement.

use serde::{Deserialize, Serialize};

use super::entity::{Destructible, MoveBounds, UserPlane};
use crate::error::GameError;

/// Maximum positional bonus on top of the base point
pub const MAX_POSITION_BONUS: u32 = 5;

/// Reject bounds where the far ("lower") bound is not past the near one
pub fn validate_bounds(bounds: &MoveBounds) -> Result<(), GameError> {
    if bounds.x_upper >= bounds.x_lower {
        return Err(GameError::InvalidScoreBounds {
            upper: bounds.x_upper,
            lower: bounds.x_lower,
        });
    }
    Ok(())
}

/// Score for one hit, in `[1, 1 + MAX_POSITION_BONUS]`
pub fn calculate_user_score_by_position(user: &UserPlane) -> Result<u32, GameError> {
    score_for_offset(user.body().translate.x, &user.bounds)
}

/// Score for a horizontal translation against the given bounds
pub fn score_for_offset(x: f32, bounds: &MoveBounds) -> Result<u32, GameError> {
    validate_bounds(bounds)?;
    let normalized = (x - bounds.x_upper) / (bounds.x_lower - bounds.x_upper);
    let bonus = (normalized * MAX_POSITION_BONUS as f32).clamp(0.0, MAX_POSITION_BONUS as f32);
    Ok(1 + bonus as u32)
}

/// Running score with the most recent increment kept for display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameScore {
    score: u32,
    last_increment: u32,
}

impl GameScore {
    pub fn new(initial: u32) -> Self {
        Self {
            score: initial,
            last_increment: 0,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn last_increment(&self) -> u32 {
        self.last_increment
    }

    pub fn increase_by(&mut self, increment: u32) {
        if increment > 0 {
            self.last_increment = increment;
            self.score += increment;
        }
    }
}

/// Terminal result of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Advance,
    Win,
    Lose,
}

/// How a level is won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Objective {
    /// Reach a kill count, then move on
    Kills(u32),
    /// Destroy the boss, ending the game
    DefeatBoss,
}

/// Evaluate once per tick after collisions and cleanup
pub fn evaluate(user_destroyed: bool, objective: Objective, kills: u32, boss_destroyed: bool) -> Option<Outcome> {
    if user_destroyed {
        return Some(Outcome::Lose);
    }
    match objective {
        Objective::Kills(target) if kills >= target => Some(Outcome::Advance),
        Objective::DefeatBoss if boss_destroyed => Some(Outcome::Win),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_higher_x_higher_score() {
        let bounds = MoveBounds::default();
        let near = score_for_offset(0.0, &bounds).unwrap();
        let far = score_for_offset(500.0, &bounds).unwrap();
        assert!(far > near);
        assert_eq!(near, 1);
        assert_eq!(score_for_offset(600.0, &bounds).unwrap(), 6);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let bounds = MoveBounds::default();
        assert_eq!(score_for_offset(-100.0, &bounds).unwrap(), 1);
        assert_eq!(score_for_offset(10_000.0, &bounds).unwrap(), 6);
    }

    #[test]
    fn test_misconfigured_bounds_fail() {
        let bounds = MoveBounds {
            x_upper: 600.0,
            x_lower: 600.0,
            ..MoveBounds::default()
        };
        assert!(matches!(
            score_for_offset(0.0, &bounds),
            Err(GameError::InvalidScoreBounds { .. })
        ));
    }

    #[test]
    fn test_user_score_uses_translation() {
        let mut user = UserPlane::new(1, 5);
        assert_eq!(calculate_user_score_by_position(&user).unwrap(), 1);
        user.plane.body.translate.x = 400.0;
        assert_eq!(calculate_user_score_by_position(&user).unwrap(), 4);
    }

    #[test]
    fn test_game_score_tracks_last_increment() {
        let mut score = GameScore::new(0);
        score.increase_by(3);
        score.increase_by(0);
        score.increase_by(2);
        assert_eq!(score.score(), 5);
        assert_eq!(score.last_increment(), 2);
    }

    #[test]
    fn test_loss_takes_precedence() {
        assert_eq!(evaluate(true, Objective::Kills(50), 50, false), Some(Outcome::Lose));
        assert_eq!(evaluate(true, Objective::DefeatBoss, 0, true), Some(Outcome::Lose));
        assert_eq!(evaluate(false, Objective::Kills(50), 50, false), Some(Outcome::Advance));
        assert_eq!(evaluate(false, Objective::Kills(50), 49, false), None);
        assert_eq!(evaluate(false, Objective::DefeatBoss, 3, true), Some(Outcome::Win));
        assert_eq!(evaluate(false, Objective::DefeatBoss, 3, false), None);
    }

    proptest! {
        #[test]
        fn prop_score_is_monotonic_and_bounded(a in -200.0f32..800.0, b in -200.0f32..800.0) {
            let bounds = MoveBounds::default();
            let (near, far) = if a <= b { (a, b) } else { (b, a) };
            let s_near = score_for_offset(near, &bounds).unwrap();
            let s_far = score_for_offset(far, &bounds).unwrap();
            prop_assert!(s_far >= s_near);
            prop_assert!((1..=6).contains(&s_near));
            prop_assert!((1..=6).contains(&s_far));
        }
    }
}
