//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only, time is derived from the tick counter
//! - Seeded RNG only
//! - Stable iteration order (insertion order of each collection)
//! - No rendering or platform dependencies

pub mod boss;
pub mod collision;
pub mod engine;
pub mod entity;
pub mod input;
pub mod level;
pub mod scoring;

pub use boss::Boss;
pub use engine::{
    BossView, Level, LevelAction, LevelNotification, LevelState, LevelView, Removal, RenderableScene,
    Sprite, SpriteKind, TickReport, start_level,
};
pub use entity::{
    Aabb, Body, Destructible, EnemyConfig, EnemyPlane, EntityId, FighterPlane, MoveBounds, Pickup,
    PickupKind, Projectile, ProjectileKind, RemovalReason, UserPlane,
};
pub use input::Intent;
pub use level::{EnemyVariants, HealthPickupPolicy, LevelConfig, LevelId};
pub use scoring::{GameScore, Objective, Outcome, calculate_user_score_by_position};
