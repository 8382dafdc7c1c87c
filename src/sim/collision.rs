//! Collision resolution between entity collections
//!
//! Pairwise bounding-box tests (O(n·m), collections are small) with a
//! category-specific rule applied to each overlapping pair. Entities that
//! are already out of play never take part in a hit.

use super::boss::Boss;
use super::entity::{Destructible, EnemyPlane, Pickup, PickupKind, Projectile, UserPlane};
use super::scoring::calculate_user_score_by_position;
use crate::error::GameError;

/// Apply `on_hit` to every live overlapping (attacker, target) pair
pub fn for_each_hit<A, B>(attackers: &mut [A], targets: &mut [B], mut on_hit: impl FnMut(&mut A, &mut B))
where
    A: Destructible,
    B: Destructible,
{
    for attacker in attackers.iter_mut() {
        for target in targets.iter_mut() {
            if attacker.is_disposed() {
                break;
            }
            if target.is_disposed() {
                continue;
            }
            if attacker.bbox().intersects(&target.bbox()) {
                on_hit(attacker, target);
            }
        }
    }
}

/// User shots against regular enemies: both take damage, every hit scores
pub fn user_projectiles_vs_enemies(
    user: &UserPlane,
    projectiles: &mut [Projectile],
    enemies: &mut [EnemyPlane],
) -> Result<u32, GameError> {
    let per_hit = calculate_user_score_by_position(user)?;
    let mut score = 0;
    for_each_hit(projectiles, enemies, |shot, enemy| {
        shot.take_damage();
        enemy.take_damage();
        score += per_hit;
    });
    Ok(score)
}

/// User shots against the boss: shots always die, only unshielded hits score
pub fn user_projectiles_vs_boss(
    user: &UserPlane,
    projectiles: &mut [Projectile],
    boss: &mut Boss,
) -> Result<u32, GameError> {
    let per_hit = calculate_user_score_by_position(user)?;
    let mut score = 0;
    for_each_hit(projectiles, std::slice::from_mut(boss), |shot, boss| {
        shot.take_damage();
        if !boss.is_shielded() {
            boss.take_damage();
            score += per_hit;
        }
    });
    Ok(score)
}

/// Enemy and boss shots against the player
pub fn enemy_projectiles_vs_user(projectiles: &mut [Projectile], user: &mut UserPlane) {
    for_each_hit(projectiles, std::slice::from_mut(user), |shot, user| {
        shot.take_damage();
        user.take_damage();
    });
}

/// Ramming: the player takes damage, the enemy is destroyed outright
pub fn planes_vs_enemies(user: &mut UserPlane, enemies: &mut [EnemyPlane]) {
    for_each_hit(std::slice::from_mut(user), enemies, |user, enemy| {
        user.take_damage();
        enemy.destroy();
    });
}

/// The boss is an enemy plane too: ramming destroys it, shield or not
pub fn planes_vs_boss(user: &mut UserPlane, boss: &mut Boss) {
    for_each_hit(std::slice::from_mut(user), std::slice::from_mut(boss), |user, boss| {
        user.take_damage();
        boss.destroy();
    });
}

/// Health pickups repair one unit below `max_health` and are always consumed
pub fn user_vs_health_pickups(user: &mut UserPlane, pickups: &mut [Pickup], max_health: u32) {
    for_each_hit(std::slice::from_mut(user), pickups, |user, pickup| {
        if pickup.kind != PickupKind::Health {
            return;
        }
        if user.health() < max_health {
            user.repair_damage();
            log::debug!("Health restored to {}", user.health());
        }
        pickup.destroy();
    });
}

/// Touching any fire-suppression pickup suppresses the boss's fire and
/// consumes every suppression pickup in play. Returns whether it triggered.
pub fn user_vs_fire_suppressors(user: &mut UserPlane, boss: &mut Boss, pickups: &mut [Pickup]) -> bool {
    let mut collided = false;
    for_each_hit(std::slice::from_mut(user), pickups, |_, pickup| {
        if pickup.kind == PickupKind::FireSuppression {
            collided = true;
        }
    });

    if collided {
        boss.suppress_fire();
        pickups
            .iter_mut()
            .filter(|p| p.kind == PickupKind::FireSuppression)
            .for_each(|p| p.destroy());
    }
    collided
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::entity::{EnemyConfig, ProjectileKind};
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn user_at(pos: Vec2) -> UserPlane {
        let mut user = UserPlane::new(1, 5);
        user.plane.body.translate = pos - USER_INITIAL_POSITION;
        user.plane.body.refresh_bbox();
        user
    }

    fn enemy_at(id: u32, pos: Vec2) -> EnemyPlane {
        EnemyPlane::new(id, pos, EnemyConfig::standard(), 0)
    }

    fn shot_at(id: u32, kind: ProjectileKind, pos: Vec2) -> Projectile {
        Projectile::new(id, kind, pos, 0)
    }

    #[test]
    fn test_user_projectile_hits_enemy() {
        let user = user_at(USER_INITIAL_POSITION);
        let mut shots = vec![shot_at(2, ProjectileKind::User, Vec2::new(400.0, 300.0))];
        let mut enemies = vec![enemy_at(3, Vec2::new(410.0, 290.0))];

        let score = user_projectiles_vs_enemies(&user, &mut shots, &mut enemies).unwrap();

        assert!(shots[0].is_destroyed());
        assert!(enemies[0].is_destroyed());
        assert_eq!(score, 1);
    }

    #[test]
    fn test_spent_projectile_does_not_hit_twice() {
        let user = user_at(USER_INITIAL_POSITION);
        let mut shots = vec![shot_at(2, ProjectileKind::User, Vec2::new(400.0, 300.0))];
        let mut enemies = vec![
            enemy_at(3, Vec2::new(410.0, 290.0)),
            enemy_at(4, Vec2::new(420.0, 290.0)),
        ];

        let score = user_projectiles_vs_enemies(&user, &mut shots, &mut enemies).unwrap();

        assert_eq!(score, 1);
        assert_eq!(enemies.iter().filter(|e| e.is_destroyed()).count(), 1);
    }

    #[test]
    fn test_miss_changes_nothing() {
        let user = user_at(USER_INITIAL_POSITION);
        let mut shots = vec![shot_at(2, ProjectileKind::User, Vec2::new(0.0, 0.0))];
        let mut enemies = vec![enemy_at(3, Vec2::new(900.0, 500.0))];

        let score = user_projectiles_vs_enemies(&user, &mut shots, &mut enemies).unwrap();

        assert_eq!(score, 0);
        assert!(!shots[0].is_disposed());
        assert!(!enemies[0].is_disposed());
    }

    #[test]
    fn test_shielded_boss_absorbs_shot_without_score() {
        let user = user_at(USER_INITIAL_POSITION);
        let mut boss = Boss::new(9, Pcg32::seed_from_u64(1));
        boss.set_shielded(true);
        let mut shots = vec![shot_at(2, ProjectileKind::User, BOSS_INITIAL_POSITION + Vec2::new(10.0, 10.0))];

        let score = user_projectiles_vs_boss(&user, &mut shots, &mut boss).unwrap();

        assert!(shots[0].is_destroyed());
        assert_eq!(boss.health(), BOSS_HEALTH);
        assert_eq!(score, 0);
    }

    #[test]
    fn test_unshielded_boss_takes_hit_and_scores() {
        let user = user_at(USER_INITIAL_POSITION);
        let mut boss = Boss::new(9, Pcg32::seed_from_u64(1));
        let mut shots = vec![shot_at(2, ProjectileKind::User, BOSS_INITIAL_POSITION + Vec2::new(10.0, 10.0))];

        let score = user_projectiles_vs_boss(&user, &mut shots, &mut boss).unwrap();

        assert_eq!(boss.health(), BOSS_HEALTH - 1);
        assert_eq!(score, 1);
    }

    #[test]
    fn test_enemy_projectile_hits_user() {
        let mut user = user_at(USER_INITIAL_POSITION);
        let mut shots = vec![shot_at(2, ProjectileKind::Enemy, USER_INITIAL_POSITION + Vec2::new(5.0, 5.0))];

        enemy_projectiles_vs_user(&mut shots, &mut user);

        assert!(shots[0].is_destroyed());
        assert_eq!(user.health(), 4);
    }

    #[test]
    fn test_ramming_destroys_enemy_regardless_of_health() {
        let mut user = user_at(USER_INITIAL_POSITION);
        let mut enemies = vec![EnemyPlane::new(3, USER_INITIAL_POSITION, EnemyConfig::heavy(), 0)];

        planes_vs_enemies(&mut user, &mut enemies);

        assert!(enemies[0].is_destroyed());
        assert_eq!(enemies[0].health(), 5);
        assert_eq!(user.health(), 4);
    }

    #[test]
    fn test_ramming_destroys_shielded_boss() {
        let mut user = user_at(BOSS_INITIAL_POSITION + Vec2::new(10.0, 10.0));
        let mut boss = Boss::new(9, Pcg32::seed_from_u64(1));
        boss.set_shielded(true);

        planes_vs_boss(&mut user, &mut boss);

        assert!(boss.is_destroyed());
        assert_eq!(user.health(), 4);
    }

    #[test]
    fn test_health_pickup_at_max_is_consumed_without_repair() {
        let mut user = user_at(USER_INITIAL_POSITION);
        let mut pickups = vec![Pickup::new(2, PickupKind::Health, USER_INITIAL_POSITION, 0, PICKUP_LINGER_MS)];

        user_vs_health_pickups(&mut user, &mut pickups, 5);

        assert_eq!(user.health(), 5);
        assert!(pickups[0].is_destroyed());
    }

    #[test]
    fn test_health_pickup_repairs_when_damaged() {
        let mut user = user_at(USER_INITIAL_POSITION);
        user.take_damage();
        let mut pickups = vec![
            Pickup::new(2, PickupKind::Health, USER_INITIAL_POSITION, 0, PICKUP_LINGER_MS),
            Pickup::new(3, PickupKind::Health, USER_INITIAL_POSITION, 0, PICKUP_LINGER_MS),
        ];

        user_vs_health_pickups(&mut user, &mut pickups, 5);

        assert_eq!(user.health(), 5, "never repaired past the maximum");
        assert!(pickups.iter().all(|p| p.is_destroyed()));
    }

    #[test]
    fn test_fire_suppressor_consumes_all_suppressors() {
        let mut user = user_at(USER_INITIAL_POSITION);
        let mut boss = Boss::new(9, Pcg32::seed_from_u64(1));
        let mut pickups = vec![
            Pickup::new(2, PickupKind::FireSuppression, USER_INITIAL_POSITION, 0, PICKUP_LINGER_MS),
            Pickup::new(3, PickupKind::FireSuppression, Vec2::new(500.0, 600.0), 0, PICKUP_LINGER_MS),
        ];

        assert!(user_vs_fire_suppressors(&mut user, &mut boss, &mut pickups));

        assert!(boss.is_fire_suppressed());
        assert!(pickups.iter().all(|p| p.is_destroyed()));
    }

    #[test]
    fn test_fire_suppressor_untouched() {
        let mut user = user_at(USER_INITIAL_POSITION);
        let mut boss = Boss::new(9, Pcg32::seed_from_u64(1));
        let mut pickups = vec![Pickup::new(2, PickupKind::FireSuppression, Vec2::new(500.0, 600.0), 0, PICKUP_LINGER_MS)];

        assert!(!user_vs_fire_suppressors(&mut user, &mut boss, &mut pickups));
        assert!(!boss.is_fire_suppressed());
        assert!(!pickups[0].is_disposed());
    }
}
