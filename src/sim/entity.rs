//! Entity model
//!
//! Every simulated object shares a [`Body`] (layout position, per-tick
//! translation, bounding box, disposal state) and the [`Destructible`]
//! capability set. Variants are concrete structs; per-variant behavior
//! lives in their payload (`ProjectileKind`, `PickupKind`, `EnemyConfig`).

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::roll;

/// Entity identifier, allocated by the owning level
pub type EntityId = u32;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    /// Overlap test (touching edges do not count)
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Why an entity left play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalReason {
    /// Died in combat (or was consumed, for pickups)
    Destroyed,
    /// Left play without dying (penetrating enemy, expired pickup)
    Escaped,
}

/// Shared spatial and lifecycle state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: EntityId,
    /// Authoritative position set at creation
    pub layout: Vec2,
    /// Accumulated movement since creation
    pub translate: Vec2,
    pub size: Vec2,
    /// Simulation time of creation (ms)
    pub created_at_ms: u64,
    bbox: Aabb,
    removal: Option<RemovalReason>,
}

impl Body {
    pub fn new(id: EntityId, layout: Vec2, size: Vec2, created_at_ms: u64) -> Self {
        Self {
            id,
            layout,
            translate: Vec2::ZERO,
            size,
            created_at_ms,
            bbox: Aabb::from_origin_size(layout, size),
            removal: None,
        }
    }

    /// Effective position (layout + translation)
    pub fn position(&self) -> Vec2 {
        self.layout + self.translate
    }

    pub fn bbox(&self) -> Aabb {
        self.bbox
    }

    /// Must run after every position change, before collision tests
    pub fn refresh_bbox(&mut self) {
        self.bbox = Aabb::from_origin_size(self.position(), self.size);
    }

    pub fn move_by(&mut self, delta: Vec2) {
        self.translate += delta;
    }

    pub fn removal(&self) -> Option<RemovalReason> {
        self.removal
    }

    /// Record the first disposal reason; later ones are ignored
    fn mark(&mut self, reason: RemovalReason) {
        if self.removal.is_none() {
            self.removal = Some(reason);
        }
    }
}

/// Capability set shared by every entity
pub trait Destructible {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    /// Variant kinematics followed by a bounding-box refresh
    fn update_position(&mut self);

    fn update_actor(&mut self) {
        self.update_position();
    }

    fn take_damage(&mut self);

    /// No-op for non-repairable variants
    fn repair_damage(&mut self) {}

    fn destroy(&mut self) {
        self.body_mut().mark(RemovalReason::Destroyed);
    }

    fn remove(&mut self) {
        self.body_mut().mark(RemovalReason::Escaped);
    }

    fn id(&self) -> EntityId {
        self.body().id
    }

    fn bbox(&self) -> Aabb {
        self.body().bbox()
    }

    fn removal(&self) -> Option<RemovalReason> {
        self.body().removal()
    }

    fn is_destroyed(&self) -> bool {
        self.removal() == Some(RemovalReason::Destroyed)
    }

    fn should_remove(&self) -> bool {
        self.removal() == Some(RemovalReason::Escaped)
    }

    /// Out of play for either reason
    fn is_disposed(&self) -> bool {
        self.removal().is_some()
    }
}

/// Health-carrying core shared by the player, enemies and the boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FighterPlane {
    pub body: Body,
    health: u32,
}

impl FighterPlane {
    pub fn new(body: Body, health: u32) -> Self {
        Self { body, health }
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    /// Decrement health, destroying the plane when it reaches zero
    pub fn take_damage(&mut self) {
        if self.body.removal().is_some() {
            return;
        }
        self.health = self.health.saturating_sub(1);
        if self.health == 0 {
            self.body.mark(RemovalReason::Destroyed);
        }
    }

    /// Unclamped; callers enforce any maximum
    pub fn repair_damage(&mut self) {
        if self.body.removal().is_none() {
            self.health += 1;
        }
    }

    /// Spawn point for a projectile at a fixed offset from the plane
    pub fn projectile_origin(&self, offset: Vec2) -> Vec2 {
        self.body.position() + offset
    }
}

/// Movement bounds of the player plane.
///
/// Follows screen convention: the "upper" bound is the smaller coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveBounds {
    pub x_upper: f32,
    pub x_lower: f32,
    pub y_upper: f32,
    pub y_lower: f32,
}

impl Default for MoveBounds {
    fn default() -> Self {
        Self {
            x_upper: USER_X_UPPER_BOUND,
            x_lower: USER_X_LOWER_BOUND,
            y_upper: USER_Y_UPPER_BOUND,
            y_lower: USER_Y_LOWER_BOUND,
        }
    }
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPlane {
    pub plane: FighterPlane,
    pub bounds: MoveBounds,
    vertical: i8,
    horizontal: i8,
    kills: u32,
}

impl UserPlane {
    pub fn new(id: EntityId, initial_health: u32) -> Self {
        Self {
            plane: FighterPlane::new(
                Body::new(id, USER_INITIAL_POSITION, USER_SIZE, 0),
                initial_health,
            ),
            bounds: MoveBounds::default(),
            vertical: 0,
            horizontal: 0,
            kills: 0,
        }
    }

    pub fn health(&self) -> u32 {
        self.plane.health()
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn increment_kill_count(&mut self) {
        self.kills += 1;
    }

    pub fn move_up(&mut self) {
        self.vertical = -1;
    }

    pub fn move_down(&mut self) {
        self.vertical = 1;
    }

    pub fn move_left(&mut self) {
        self.horizontal = -1;
    }

    pub fn move_right(&mut self) {
        self.horizontal = 1;
    }

    pub fn stop(&mut self) {
        self.vertical = 0;
        self.horizontal = 0;
    }

    /// Current (vertical, horizontal) direction multipliers
    pub fn direction(&self) -> (i8, i8) {
        (self.vertical, self.horizontal)
    }

    pub fn fire_projectile(&self, id: EntityId, now_ms: u64) -> Projectile {
        Projectile::new(
            id,
            ProjectileKind::User,
            self.plane.projectile_origin(USER_PROJECTILE_OFFSET),
            now_ms,
        )
    }
}

impl Destructible for UserPlane {
    fn body(&self) -> &Body {
        &self.plane.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.plane.body
    }

    /// Vertical movement takes priority; a move that would leave the
    /// bounds is reverted.
    fn update_position(&mut self) {
        let body = &mut self.plane.body;
        if self.vertical != 0 {
            let before = body.translate.y;
            body.translate.y += USER_VELOCITY * self.vertical as f32;
            let y = body.position().y;
            if y < self.bounds.y_upper || y > self.bounds.y_lower {
                body.translate.y = before;
            }
        } else if self.horizontal != 0 {
            let before = body.translate.x;
            body.translate.x += USER_VELOCITY * self.horizontal as f32;
            let x = body.position().x;
            if x < self.bounds.x_upper || x > self.bounds.x_lower {
                body.translate.x = before;
            }
        }
        body.refresh_bbox();
    }

    fn take_damage(&mut self) {
        self.plane.take_damage();
    }

    fn repair_damage(&mut self) {
        self.plane.repair_damage();
    }
}

/// Enemy variant configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnemyConfig {
    pub sprite: &'static str,
    pub size: Vec2,
    pub health: u32,
    pub velocity: f32,
    pub projectile_offset: Vec2,
    pub fire_rate: f32,
}

impl EnemyConfig {
    /// Single-hit fighter
    pub const fn standard() -> Self {
        Self {
            sprite: "enemyplane",
            size: Vec2::new(100.0, 50.0),
            health: 1,
            velocity: ENEMY_VELOCITY,
            projectile_offset: Vec2::new(-50.0, 10.0),
            fire_rate: ENEMY_FIRE_RATE,
        }
    }

    /// Larger, five-hit fighter
    pub const fn heavy() -> Self {
        Self {
            sprite: "enemyplane-heavy",
            size: Vec2::new(200.0, 100.0),
            health: 5,
            velocity: ENEMY_VELOCITY,
            projectile_offset: Vec2::new(-50.0, 40.0),
            fire_rate: ENEMY_FIRE_RATE,
        }
    }

    pub const fn with_fire_rate(mut self, fire_rate: f32) -> Self {
        self.fire_rate = fire_rate;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyPlane {
    pub plane: FighterPlane,
    pub config: EnemyConfig,
}

impl EnemyPlane {
    pub fn new(id: EntityId, position: Vec2, config: EnemyConfig, now_ms: u64) -> Self {
        Self {
            plane: FighterPlane::new(Body::new(id, position, config.size, now_ms), config.health),
            config,
        }
    }

    pub fn health(&self) -> u32 {
        self.plane.health()
    }

    /// Roll the fire-rate check once; `id` is only used on a hit
    pub fn fire_projectile(&self, rng: &mut impl Rng, id: EntityId, now_ms: u64) -> Option<Projectile> {
        roll(rng, self.config.fire_rate).then(|| {
            Projectile::new(
                id,
                ProjectileKind::Enemy,
                self.plane.projectile_origin(self.config.projectile_offset),
                now_ms,
            )
        })
    }
}

impl Destructible for EnemyPlane {
    fn body(&self) -> &Body {
        &self.plane.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.plane.body
    }

    fn update_position(&mut self) {
        self.plane.body.move_by(Vec2::new(self.config.velocity, 0.0));
        self.plane.body.refresh_bbox();
    }

    fn take_damage(&mut self) {
        self.plane.take_damage();
    }

    fn repair_damage(&mut self) {
        self.plane.repair_damage();
    }
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    User,
    Enemy,
    Boss,
}

impl ProjectileKind {
    pub fn velocity(&self) -> f32 {
        match self {
            ProjectileKind::User => USER_PROJECTILE_VELOCITY,
            ProjectileKind::Enemy => ENEMY_PROJECTILE_VELOCITY,
            ProjectileKind::Boss => BOSS_PROJECTILE_VELOCITY,
        }
    }

    pub fn size(&self) -> Vec2 {
        match self {
            ProjectileKind::User => USER_PROJECTILE_SIZE,
            ProjectileKind::Enemy => ENEMY_PROJECTILE_SIZE,
            ProjectileKind::Boss => BOSS_PROJECTILE_SIZE,
        }
    }
}

/// Horizontal-only projectile; any hit destroys it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub body: Body,
    pub kind: ProjectileKind,
}

impl Projectile {
    pub fn new(id: EntityId, kind: ProjectileKind, position: Vec2, now_ms: u64) -> Self {
        Self {
            body: Body::new(id, position, kind.size(), now_ms),
            kind,
        }
    }
}

impl Destructible for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update_position(&mut self) {
        self.body.move_by(Vec2::new(self.kind.velocity(), 0.0));
        self.body.refresh_bbox();
    }

    fn take_damage(&mut self) {
        self.destroy();
    }
}

/// Collectible types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    /// Restores one unit of player health
    Health,
    /// Suppresses the boss's fire
    FireSuppression,
}

/// Stationary collectible with a bounded lifetime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub body: Body,
    pub kind: PickupKind,
    pub linger_ms: u64,
}

impl Pickup {
    pub fn new(id: EntityId, kind: PickupKind, position: Vec2, now_ms: u64, linger_ms: u64) -> Self {
        Self {
            body: Body::new(id, position, PICKUP_SIZE, now_ms),
            kind,
            linger_ms,
        }
    }

    /// Random spawn point in the player's reachable area
    pub fn random_position(rng: &mut impl Rng, bounds: &MoveBounds) -> Vec2 {
        Vec2::new(
            crate::random_between(rng, bounds.x_lower, bounds.x_upper + PICKUP_X_OFFSET),
            crate::random_between(rng, bounds.y_lower, bounds.y_upper + PICKUP_Y_OFFSET),
        )
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.body.created_at_ms) > self.linger_ms
    }
}

impl Destructible for Pickup {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update_position(&mut self) {
        self.body.refresh_bbox();
    }

    fn take_damage(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_aabb_intersects() {
        let a = Aabb::from_origin_size(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Aabb::from_origin_size(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        let c = Aabb::from_origin_size(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c), "touching edges do not overlap");
    }

    #[test]
    fn test_bbox_follows_translation() {
        let mut enemy = EnemyPlane::new(1, Vec2::new(1000.0, 100.0), EnemyConfig::standard(), 0);
        enemy.update_actor();
        assert_eq!(enemy.bbox().min, Vec2::new(1000.0 + ENEMY_VELOCITY, 100.0));
        assert_eq!(enemy.body().translate.x, ENEMY_VELOCITY);
    }

    #[test]
    fn test_fighter_destroyed_exactly_at_zero() {
        let mut enemy = EnemyPlane::new(1, Vec2::ZERO, EnemyConfig::heavy(), 0);
        for _ in 0..4 {
            enemy.take_damage();
            assert!(!enemy.is_destroyed());
        }
        enemy.take_damage();
        assert_eq!(enemy.health(), 0);
        assert!(enemy.is_destroyed());

        enemy.take_damage();
        assert_eq!(enemy.health(), 0);
    }

    #[test]
    fn test_repair_is_unclamped() {
        let mut user = UserPlane::new(1, 5);
        user.repair_damage();
        assert_eq!(user.health(), 6);
    }

    #[test]
    fn test_first_disposal_reason_wins() {
        let mut enemy = EnemyPlane::new(1, Vec2::ZERO, EnemyConfig::standard(), 0);
        enemy.remove();
        enemy.destroy();
        assert!(enemy.should_remove());
        assert!(!enemy.is_destroyed());
        assert_eq!(enemy.health(), 1);
    }

    #[test]
    fn test_projectile_dies_on_any_hit() {
        let mut shot = Projectile::new(1, ProjectileKind::User, Vec2::ZERO, 0);
        shot.take_damage();
        assert!(shot.is_destroyed());
        shot.update_actor();
        assert_eq!(shot.body.translate.x, USER_PROJECTILE_VELOCITY);
    }

    #[test]
    fn test_pickup_expiry() {
        let pickup = Pickup::new(1, PickupKind::Health, Vec2::ZERO, 1_000, PICKUP_LINGER_MS);
        assert!(!pickup.is_expired(1_000 + PICKUP_LINGER_MS));
        assert!(pickup.is_expired(1_001 + PICKUP_LINGER_MS));
    }

    #[test]
    fn test_pickup_spawn_area() {
        let mut rng = Pcg32::seed_from_u64(7);
        let bounds = MoveBounds::default();
        for _ in 0..200 {
            let pos = Pickup::random_position(&mut rng, &bounds);
            assert!(pos.x > 300.0 && pos.x <= 600.0);
            assert!(pos.y > 120.0 && pos.y <= 650.0);
        }
    }

    #[test]
    fn test_user_vertical_priority_and_bounds() {
        let mut user = UserPlane::new(1, 5);
        user.move_up();
        user.move_right();
        user.update_actor();
        assert_eq!(user.body().translate, Vec2::new(0.0, -USER_VELOCITY));

        // Left from x=5 would leave the bounds and is reverted
        user.stop();
        user.move_left();
        user.update_actor();
        assert_eq!(user.body().translate.x, 0.0);
    }

    proptest! {
        #[test]
        fn prop_damage_after_destroy_is_inert(health in 1u32..20, hits in 0usize..30) {
            let mut enemy = EnemyPlane::new(1, Vec2::ZERO, EnemyConfig { health, ..EnemyConfig::standard() }, 0);
            enemy.destroy();
            for _ in 0..hits {
                enemy.take_damage();
            }
            prop_assert_eq!(enemy.health(), health);
            prop_assert!(enemy.is_destroyed());
        }

        #[test]
        fn prop_health_never_underflows(health in 1u32..10, hits in 0usize..30) {
            let mut user = UserPlane::new(1, health);
            for _ in 0..hits {
                user.take_damage();
            }
            prop_assert_eq!(user.health(), health.saturating_sub(hits as u32));
            prop_assert_eq!(user.is_destroyed(), hits as u32 >= health);
        }
    }
}
