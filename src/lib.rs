//! Sky Assault - A side-scrolling arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, boss, levels)
//! - `settings`: Runtime settings for the headless driver
//! - `error`: Error taxonomy shared by the simulation and the driver

pub mod error;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use settings::Settings;

use rand::Rng;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation tick (ms)
    pub const TICK_MS: u64 = 50;
    /// Interval of the held-fire timer (ms), independent of the tick
    pub const FIRE_INTERVAL_MS: u64 = 400;
    /// Maximum ticks run by a single `advance` call to prevent spiral of death
    pub const MAX_TICKS_PER_ADVANCE: u32 = 8;
    /// Delay between a terminal condition and its notification (ms)
    pub const SETTLE_DELAY_MS: u64 = 500;

    /// Player plane
    pub const USER_INITIAL_POSITION: Vec2 = Vec2::new(5.0, 300.0);
    pub const USER_SIZE: Vec2 = Vec2::new(80.0, 40.0);
    pub const USER_VELOCITY: f32 = 13.0;
    /// Screen-relative movement bounds. "Upper" is the smaller coordinate.
    pub const USER_X_UPPER_BOUND: f32 = 0.0;
    pub const USER_X_LOWER_BOUND: f32 = 600.0;
    pub const USER_Y_UPPER_BOUND: f32 = 20.0;
    pub const USER_Y_LOWER_BOUND: f32 = 650.0;
    pub const USER_PROJECTILE_OFFSET: Vec2 = Vec2::new(60.0, 10.0);

    /// Projectiles
    pub const USER_PROJECTILE_SIZE: Vec2 = Vec2::new(50.0, 20.0);
    pub const USER_PROJECTILE_VELOCITY: f32 = 15.0;
    pub const ENEMY_PROJECTILE_SIZE: Vec2 = Vec2::new(30.0, 30.0);
    pub const ENEMY_PROJECTILE_VELOCITY: f32 = -10.0;
    pub const BOSS_PROJECTILE_SIZE: Vec2 = Vec2::new(50.0, 50.0);
    pub const BOSS_PROJECTILE_VELOCITY: f32 = -15.0;

    /// Enemy defaults
    pub const ENEMY_VELOCITY: f32 = -6.0;
    pub const ENEMY_FIRE_RATE: f32 = 0.015;
    /// Enemies spawn in a band this far above the bottom of the screen
    pub const ENEMY_SPAWN_HEIGHT_ADJUSTMENT: f32 = 150.0;

    /// Boss
    pub const BOSS_INITIAL_POSITION: Vec2 = Vec2::new(1000.0, 400.0);
    pub const BOSS_SIZE: Vec2 = Vec2::new(240.0, 120.0);
    pub const BOSS_HEALTH: u32 = 100;
    pub const BOSS_VELOCITY: f32 = 8.0;
    pub const BOSS_FIRE_RATE: f32 = 0.05;
    pub const BOSS_SHIELD_PROBABILITY: f32 = 0.1;
    pub const BOSS_MAX_TICKS_WITH_SHIELD: u32 = 50;
    pub const BOSS_MAX_TICKS_WITH_SAME_MOVE: u32 = 10;
    pub const BOSS_MOVE_FREQUENCY_PER_CYCLE: usize = 5;
    pub const BOSS_Y_UPPER_BOUND: f32 = -10.0;
    pub const BOSS_Y_LOWER_BOUND: f32 = 600.0;
    pub const BOSS_PROJECTILE_OFFSET: Vec2 = Vec2::new(-50.0, 75.0);

    /// Pickups
    pub const PICKUP_SIZE: Vec2 = Vec2::new(30.0, 30.0);
    pub const PICKUP_LINGER_MS: u64 = 5_000;
    pub const PICKUP_X_OFFSET: f32 = 300.0;
    pub const PICKUP_Y_OFFSET: f32 = 100.0;

    /// Background scroll per tick (px)
    pub const BACKGROUND_SCROLL_SPEED: f32 = 2.0;
}

/// Roll a probability check against the injected RNG
#[inline]
pub fn roll(rng: &mut impl Rng, probability: f32) -> bool {
    rng.random::<f32>() < probability
}

/// Uniform value between `from` and `to` (either order)
#[inline]
pub fn random_between(rng: &mut impl Rng, from: f32, to: f32) -> f32 {
    from + rng.random::<f32>() * (to - from)
}
