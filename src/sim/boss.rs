//! Boss behavior
//!
//! Two independent state axes:
//! - shield: `Unshielded -> Shielded` on a health-weighted roll each tick,
//!   `Shielded -> Unshielded` after a fixed number of ticks
//! - fire: `Active -> Suppressed` only through a pickup collision
//!
//! Vertical movement follows a shuffled pattern of up/down/hold moves,
//! reshuffled after a fixed run of ticks.

use glam::Vec2;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::entity::{Body, Destructible, EntityId, FighterPlane, Projectile, ProjectileKind};
use crate::consts::*;
use crate::roll;

#[derive(Debug, Clone, Serialize)]
pub struct Boss {
    pub plane: FighterPlane,
    max_health: u32,
    move_pattern: Vec<f32>,
    move_index: usize,
    consecutive_moves: u32,
    shielded: bool,
    shield_ticks: u32,
    fire_suppressed: bool,
    #[serde(skip)]
    rng: Pcg32,
}

impl Boss {
    /// Create the boss with its own RNG stream
    pub fn new(id: EntityId, mut rng: Pcg32) -> Self {
        let mut move_pattern = Vec::with_capacity(BOSS_MOVE_FREQUENCY_PER_CYCLE * 3);
        for _ in 0..BOSS_MOVE_FREQUENCY_PER_CYCLE {
            move_pattern.push(BOSS_VELOCITY);
            move_pattern.push(-BOSS_VELOCITY);
            move_pattern.push(0.0);
        }
        move_pattern.shuffle(&mut rng);

        Self {
            plane: FighterPlane::new(
                Body::new(id, BOSS_INITIAL_POSITION, BOSS_SIZE, 0),
                BOSS_HEALTH,
            ),
            max_health: BOSS_HEALTH,
            move_pattern,
            move_index: 0,
            consecutive_moves: 0,
            shielded: false,
            shield_ticks: 0,
            fire_suppressed: false,
            rng,
        }
    }

    pub fn health(&self) -> u32 {
        self.plane.health()
    }

    pub fn is_shielded(&self) -> bool {
        self.shielded
    }

    pub fn is_fire_suppressed(&self) -> bool {
        self.fire_suppressed
    }

    /// Set by a fire-suppression pickup; never cleared by the boss itself
    pub fn suppress_fire(&mut self) {
        if !self.fire_suppressed {
            log::debug!("Boss fire suppressed");
        }
        self.fire_suppressed = true;
    }

    pub fn move_pattern(&self) -> &[f32] {
        &self.move_pattern
    }

    /// Roll the fixed fire rate. Suppression is gated by the caller.
    pub fn fire_projectile(&mut self, id: EntityId, now_ms: u64) -> Option<Projectile> {
        roll(&mut self.rng, BOSS_FIRE_RATE).then(|| {
            Projectile::new(
                id,
                ProjectileKind::Boss,
                self.plane.projectile_origin(BOSS_PROJECTILE_OFFSET),
                now_ms,
            )
        })
    }

    /// Read the current move and advance the run counter
    fn next_move(&mut self) -> f32 {
        let current = self.move_pattern[self.move_index];
        self.consecutive_moves += 1;
        if self.consecutive_moves == BOSS_MAX_TICKS_WITH_SAME_MOVE {
            self.move_pattern.shuffle(&mut self.rng);
            self.consecutive_moves = 0;
            self.move_index += 1;
        }
        if self.move_index == self.move_pattern.len() {
            self.move_index = 0;
        }
        current
    }

    fn update_shield(&mut self) {
        if self.shielded {
            self.shield_ticks += 1;
        } else {
            let probability = self.shield_probability();
            if roll(&mut self.rng, probability) {
                log::debug!("Boss shield up at {} hp", self.health());
                self.shielded = true;
            }
        }
        if self.shield_ticks == BOSS_MAX_TICKS_WITH_SHIELD {
            log::debug!("Boss shield down");
            self.shielded = false;
            self.shield_ticks = 0;
        }
    }

    /// Rises as the boss takes damage
    fn shield_probability(&self) -> f32 {
        (1.0 - self.health() as f32 / self.max_health as f32) * BOSS_SHIELD_PROBABILITY
    }

    #[cfg(test)]
    pub(crate) fn set_shielded(&mut self, shielded: bool) {
        self.shielded = shielded;
    }
}

impl Destructible for Boss {
    fn body(&self) -> &Body {
        &self.plane.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.plane.body
    }

    /// Moves that would leave the vertical bounds are reverted
    fn update_position(&mut self) {
        let before = self.plane.body.translate.y;
        let delta = self.next_move();
        self.plane.body.move_by(Vec2::new(0.0, delta));
        let y = self.plane.body.position().y;
        if !(BOSS_Y_UPPER_BOUND..=BOSS_Y_LOWER_BOUND).contains(&y) {
            self.plane.body.translate.y = before;
        }
        self.plane.body.refresh_bbox();
    }

    fn update_actor(&mut self) {
        self.update_position();
        self.update_shield();
    }

    fn take_damage(&mut self) {
        if !self.shielded {
            self.plane.take_damage();
        }
    }

    fn repair_damage(&mut self) {
        self.plane.repair_damage();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn boss(seed: u64) -> Boss {
        Boss::new(1, Pcg32::seed_from_u64(seed))
    }

    #[test]
    fn test_pattern_is_balanced_multiset() {
        let boss = boss(3);
        let pattern = boss.move_pattern();
        assert_eq!(pattern.len(), BOSS_MOVE_FREQUENCY_PER_CYCLE * 3);
        for v in [BOSS_VELOCITY, -BOSS_VELOCITY, 0.0] {
            let count = pattern.iter().filter(|&&m| m == v).count();
            assert_eq!(count, BOSS_MOVE_FREQUENCY_PER_CYCLE);
        }
    }

    #[test]
    fn test_move_index_advances_after_run() {
        let mut boss = boss(11);
        for _ in 0..BOSS_MAX_TICKS_WITH_SAME_MOVE - 1 {
            boss.next_move();
        }
        assert_eq!(boss.move_index, 0);
        boss.next_move();
        assert_eq!(boss.move_index, 1);
        assert_eq!(boss.consecutive_moves, 0);
    }

    #[test]
    fn test_move_index_wraps() {
        let mut boss = boss(12);
        let ticks = BOSS_MAX_TICKS_WITH_SAME_MOVE as usize * boss.move_pattern.len();
        for _ in 0..ticks {
            boss.next_move();
        }
        assert_eq!(boss.move_index, 0);
    }

    #[test]
    fn test_stays_within_vertical_bounds() {
        let mut boss = boss(5);
        for _ in 0..5_000 {
            boss.update_position();
            let y = boss.body().position().y;
            assert!((BOSS_Y_UPPER_BOUND..=BOSS_Y_LOWER_BOUND).contains(&y));
        }
    }

    #[test]
    fn test_full_health_never_shields() {
        let mut boss = boss(9);
        for _ in 0..1_000 {
            boss.update_shield();
            assert!(!boss.is_shielded());
        }
    }

    #[test]
    fn test_shield_expires_after_fixed_ticks() {
        let mut boss = boss(9);
        boss.set_shielded(true);
        for _ in 0..BOSS_MAX_TICKS_WITH_SHIELD - 1 {
            boss.update_shield();
            assert!(boss.is_shielded());
        }
        boss.update_shield();
        assert!(!boss.is_shielded());
        assert_eq!(boss.shield_ticks, 0);
    }

    #[test]
    fn test_damaged_boss_eventually_shields() {
        let mut boss = boss(21);
        for _ in 0..60 {
            boss.take_damage();
        }
        let shielded = (0..2_000).any(|_| {
            boss.update_shield();
            boss.is_shielded()
        });
        assert!(shielded);
    }

    #[test]
    fn test_shielded_boss_ignores_damage() {
        let mut boss = boss(1);
        boss.set_shielded(true);
        for _ in 0..10 {
            boss.take_damage();
        }
        assert_eq!(boss.health(), BOSS_HEALTH);
    }

    #[test]
    fn test_suppression_is_sticky() {
        let mut boss = boss(1);
        boss.suppress_fire();
        for _ in 0..500 {
            boss.update_actor();
        }
        assert!(boss.is_fire_suppressed());
    }

    #[test]
    fn test_projectile_offset() {
        let mut boss = boss(2);
        let shot = (0..1_000).find_map(|i| boss.fire_projectile(100 + i, 0));
        let shot = shot.expect("boss should fire within 1000 rolls");
        assert_eq!(shot.kind, ProjectileKind::Boss);
        assert_eq!(shot.body.layout, BOSS_INITIAL_POSITION + BOSS_PROJECTILE_OFFSET);
    }

    proptest! {
        #[test]
        fn prop_damage_respects_shield(shielded: bool, hits in 1u32..50) {
            let mut boss = boss(4);
            boss.set_shielded(shielded);
            for _ in 0..hits {
                boss.take_damage();
            }
            let expected = if shielded { BOSS_HEALTH } else { BOSS_HEALTH - hits };
            prop_assert_eq!(boss.health(), expected);
        }
    }
}
