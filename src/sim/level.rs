//! Level sequence and per-level tuning
//!
//! All tuning is compiled in. Levels run in a fixed order; advancing past
//! the last one yields `None`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::entity::EnemyConfig;
use super::scoring::Objective;
use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelId {
    LevelOne,
    LevelTwo,
    LevelThree,
    BossLevel,
}

impl LevelId {
    /// Play order
    pub const SEQUENCE: [LevelId; 4] = [
        LevelId::LevelOne,
        LevelId::LevelTwo,
        LevelId::LevelThree,
        LevelId::BossLevel,
    ];

    pub fn first() -> Self {
        Self::SEQUENCE[0]
    }

    pub fn name(&self) -> &'static str {
        match self {
            LevelId::LevelOne => "Level1",
            LevelId::LevelTwo => "Level2",
            LevelId::LevelThree => "Level3",
            LevelId::BossLevel => "BossLevel",
        }
    }

    /// Next entry in the sequence, `None` after the last
    pub fn next(&self) -> Option<Self> {
        let index = Self::SEQUENCE.iter().position(|l| l == self)?;
        Self::SEQUENCE.get(index + 1).copied()
    }

    pub fn config(&self) -> LevelConfig {
        match self {
            LevelId::LevelOne => LevelConfig {
                background: "background1",
                total_enemies: 5,
                enemy_spawn_probability: 0.2,
                player_initial_health: 5,
                objective: Objective::Kills(50),
                enemy_variants: EnemyVariants::Standard,
                health_pickups: HealthPickupPolicy::None,
                fire_suppressors: None,
                scroll_background: true,
            },
            LevelId::LevelTwo => LevelConfig {
                background: "background1",
                total_enemies: 4,
                enemy_spawn_probability: 0.2,
                player_initial_health: 5,
                objective: Objective::Kills(50),
                enemy_variants: EnemyVariants::Mixed {
                    heavy_probability: 0.2,
                    heavy: EnemyConfig::heavy(),
                },
                health_pickups: HealthPickupPolicy::ScaledByMissingHealth(0.01),
                fire_suppressors: None,
                scroll_background: true,
            },
            LevelId::LevelThree => LevelConfig {
                background: "background1",
                total_enemies: 3,
                enemy_spawn_probability: 0.2,
                player_initial_health: 5,
                objective: Objective::Kills(20),
                enemy_variants: EnemyVariants::Only(EnemyConfig::heavy().with_fire_rate(0.02)),
                health_pickups: HealthPickupPolicy::Flat(0.01),
                fire_suppressors: None,
                scroll_background: true,
            },
            LevelId::BossLevel => LevelConfig {
                background: "background2",
                total_enemies: 0,
                enemy_spawn_probability: 0.0,
                player_initial_health: 5,
                objective: Objective::DefeatBoss,
                enemy_variants: EnemyVariants::Standard,
                health_pickups: HealthPickupPolicy::None,
                fire_suppressors: Some(0.01),
                scroll_background: false,
            },
        }
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LevelId {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::SEQUENCE
            .iter()
            .copied()
            .find(|l| l.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| GameError::UnknownLevel(s.to_string()))
    }
}

/// Which enemy variants a level spawns
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum EnemyVariants {
    Standard,
    /// Standard, with a chance of a heavier variant per spawn
    Mixed { heavy_probability: f32, heavy: EnemyConfig },
    Only(EnemyConfig),
}

/// How health pickups appear while the player is damaged
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HealthPickupPolicy {
    None,
    /// Fixed per-tick probability
    Flat(f32),
    /// Base probability scaled by the fraction of missing health
    ScaledByMissingHealth(f32),
}

impl HealthPickupPolicy {
    /// Per-tick spawn probability; zero at full health
    pub fn probability(&self, health: u32, max_health: u32) -> f32 {
        if health >= max_health || max_health == 0 {
            return 0.0;
        }
        match *self {
            HealthPickupPolicy::None => 0.0,
            HealthPickupPolicy::Flat(p) => p,
            HealthPickupPolicy::ScaledByMissingHealth(p) => {
                (max_health - health) as f32 / max_health as f32 * p
            }
        }
    }
}

/// Compiled-in tuning for one level
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelConfig {
    pub background: &'static str,
    /// Maximum concurrent enemies
    pub total_enemies: usize,
    /// Per-free-slot spawn probability each tick
    pub enemy_spawn_probability: f32,
    /// Also the repair ceiling
    pub player_initial_health: u32,
    pub objective: Objective,
    pub enemy_variants: EnemyVariants,
    pub health_pickups: HealthPickupPolicy,
    /// Per-tick spawn probability of fire-suppression pickups
    pub fire_suppressors: Option<f32>,
    pub scroll_background: bool,
}

impl LevelConfig {
    pub fn has_boss(&self) -> bool {
        self.objective == Objective::DefeatBoss
    }

    /// Target shown next to the kill counter
    pub fn kill_target(&self) -> u32 {
        match self.objective {
            Objective::Kills(target) => target,
            Objective::DefeatBoss => 1,
        }
    }
}
