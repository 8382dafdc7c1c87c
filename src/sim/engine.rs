//! Level engine
//!
//! Owns every entity collection of one level, runs the fixed-tick pipeline
//! and exposes the lifecycle (`Idle -> Running <-> Paused -> Stopped`) to the
//! presentation layer. Time only moves through [`Level::advance`], whose
//! capped tick loop also steps the held-fire timer, so the two never drift.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::boss::Boss;
use super::collision;
use super::entity::{
    Aabb, Destructible, EnemyConfig, EnemyPlane, EntityId, Pickup, PickupKind, Projectile, ProjectileKind,
    RemovalReason, UserPlane,
};
use super::input::Intent;
use super::level::{EnemyVariants, LevelConfig, LevelId};
use super::scoring::{self, GameScore, Outcome};
use crate::consts::*;
use crate::error::GameError;
use crate::{random_between, roll};

/// Lifecycle of a level instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LevelState {
    /// Built, not yet started
    Idle,
    Running,
    Paused,
    /// Terminal
    Stopped,
}

/// What the navigation layer should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LevelAction {
    AdvanceLevel,
    Win,
    Lose,
}

/// Outbound terminal event of a level
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelNotification {
    /// Level to load next for `AdvanceLevel`, otherwise the level that ended
    pub level_name: String,
    pub action: LevelAction,
}

/// Boss status for the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BossView {
    pub health: u32,
    pub shielded: bool,
    pub fire_suppressed: bool,
}

/// Read-only HUD state, refreshed once per tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelView {
    pub level_name: &'static str,
    pub health: u32,
    pub max_health: u32,
    pub kills: u32,
    pub kill_target: u32,
    pub score: u32,
    pub last_score_increment: u32,
    pub boss: Option<BossView>,
    pub paused: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpriteKind {
    User,
    Enemy,
    Boss { shielded: bool },
    Projectile(ProjectileKind),
    Pickup(PickupKind),
}

#[derive(Debug, Clone, Serialize)]
pub struct Sprite {
    pub id: EntityId,
    pub kind: SpriteKind,
    pub name: &'static str,
    pub bbox: Aabb,
}

/// Everything the presentation layer needs to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderableScene {
    pub width: f32,
    pub height: f32,
    pub background: &'static str,
    pub background_offset: f32,
    pub sprites: Vec<Sprite>,
    pub view: LevelView,
}

/// An entity that left play this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Removal {
    pub id: EntityId,
    pub reason: RemovalReason,
}

/// Summary of one tick
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TickReport {
    pub tick: u64,
    pub score_gained: u32,
    pub kills_gained: u32,
    pub penetrations: u32,
    pub removed: Vec<Removal>,
    pub outcome: Option<Outcome>,
}

/// Build, initialize and start a level in one call
pub fn start_level(
    id: LevelId,
    screen_height: f32,
    screen_width: f32,
    seed: u64,
) -> Result<(Level, RenderableScene), GameError> {
    let mut level = Level::new(id, screen_height, screen_width, seed)?;
    let scene = level.initialize_scene();
    level.start_game();
    Ok((level, scene))
}

/// One level instance
pub struct Level {
    id: LevelId,
    config: LevelConfig,
    screen_width: f32,
    screen_height: f32,
    enemy_max_y: f32,
    state: LevelState,
    rng: Pcg32,
    user: UserPlane,
    enemies: Vec<EnemyPlane>,
    boss: Option<Boss>,
    boss_defeated: bool,
    user_projectiles: Vec<Projectile>,
    enemy_projectiles: Vec<Projectile>,
    pickups: Vec<Pickup>,
    score: GameScore,
    current_enemy_count: usize,
    background_offset: f32,
    view: LevelView,
    tick_count: u64,
    tick_accumulator_ms: u64,
    firing: bool,
    fire_timer_ms: u64,
    pending: Option<(LevelNotification, u64)>,
    next_id: EntityId,
}

impl Level {
    /// Misconfiguration fails here, before the first tick
    pub fn new(id: LevelId, screen_height: f32, screen_width: f32, seed: u64) -> Result<Self, GameError> {
        if !(screen_width > 0.0 && screen_height > 0.0) {
            return Err(GameError::InvalidScreen {
                width: screen_width,
                height: screen_height,
            });
        }

        let config = id.config();
        let user = UserPlane::new(1, config.player_initial_health);
        scoring::validate_bounds(&user.bounds)?;

        let mut level = Self {
            id,
            config,
            screen_width,
            screen_height,
            enemy_max_y: (screen_height - ENEMY_SPAWN_HEIGHT_ADJUSTMENT).max(0.0),
            state: LevelState::Idle,
            rng: Pcg32::seed_from_u64(seed),
            user,
            enemies: Vec::new(),
            boss: None,
            boss_defeated: false,
            user_projectiles: Vec::new(),
            enemy_projectiles: Vec::new(),
            pickups: Vec::new(),
            score: GameScore::new(0),
            current_enemy_count: 0,
            background_offset: 0.0,
            view: LevelView {
                level_name: id.name(),
                health: config.player_initial_health,
                max_health: config.player_initial_health,
                kills: 0,
                kill_target: config.kill_target(),
                score: 0,
                last_score_increment: 0,
                boss: None,
                paused: false,
            },
            tick_count: 0,
            tick_accumulator_ms: 0,
            firing: false,
            fire_timer_ms: 0,
            pending: None,
            next_id: 2,
        };
        level.update_level_view();
        Ok(level)
    }

    pub fn id(&self) -> LevelId {
        self.id
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn state(&self) -> LevelState {
        self.state
    }

    pub fn view(&self) -> &LevelView {
        &self.view
    }

    pub fn user(&self) -> &UserPlane {
        &self.user
    }

    pub fn boss(&self) -> Option<&Boss> {
        self.boss.as_ref()
    }

    pub fn enemies(&self) -> &[EnemyPlane] {
        &self.enemies
    }

    pub fn user_projectiles(&self) -> &[Projectile] {
        &self.user_projectiles
    }

    pub fn enemy_projectiles(&self) -> &[Projectile] {
        &self.enemy_projectiles
    }

    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn is_firing(&self) -> bool {
        self.firing
    }

    /// Enemy count recorded during the last tick
    pub fn current_enemy_count(&self) -> usize {
        self.current_enemy_count
    }

    pub fn background_offset(&self) -> f32 {
        self.background_offset
    }

    /// Terminal notification waiting for its settle delay
    pub fn pending_notification(&self) -> Option<&LevelNotification> {
        self.pending.as_ref().map(|(n, _)| n)
    }

    /// Simulation time (ms)
    pub fn now_ms(&self) -> u64 {
        self.tick_count * TICK_MS
    }

    fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // --- Lifecycle ---

    pub fn initialize_scene(&mut self) -> RenderableScene {
        self.update_level_view();
        self.scene()
    }

    pub fn start_game(&mut self) {
        match self.state {
            LevelState::Idle => {
                log::info!("{} started", self.id);
                self.state = LevelState::Running;
            }
            state => log::warn!("start_game ignored in {:?}", state),
        }
    }

    /// Single entry point for pausing: both timers stop and resume together
    pub fn pause_game(&mut self) {
        match self.state {
            LevelState::Running => {
                log::info!("{} paused", self.id);
                self.state = LevelState::Paused;
            }
            LevelState::Paused => {
                log::info!("{} resumed", self.id);
                self.state = LevelState::Running;
            }
            LevelState::Idle | LevelState::Stopped => {}
        }
        self.view.paused = self.state == LevelState::Paused;
    }

    pub fn pause(&mut self) {
        if self.state == LevelState::Running {
            self.pause_game();
        }
    }

    pub fn resume(&mut self) {
        if self.state == LevelState::Paused {
            self.pause_game();
        }
    }

    /// Unconditional and immediate; input is ignored from here on
    pub fn stop_game(&mut self) {
        if self.state != LevelState::Stopped {
            log::info!("{} stopped after {} ticks", self.id, self.tick_count);
        }
        self.state = LevelState::Stopped;
        self.firing = false;
        self.fire_timer_ms = 0;
        self.view.paused = false;
    }

    // --- Input ---

    /// Parse and apply a raw intent token
    pub fn handle_token(&mut self, token: &str) -> Result<(), GameError> {
        let intent: Intent = token.parse()?;
        self.handle_intent(intent);
        Ok(())
    }

    /// Takes effect on the next tick. While paused only the pause toggle acts.
    pub fn handle_intent(&mut self, intent: Intent) {
        match self.state {
            LevelState::Running => {}
            LevelState::Paused => {
                if intent == Intent::TogglePause {
                    self.pause_game();
                }
                return;
            }
            LevelState::Idle | LevelState::Stopped => {
                log::trace!("{:?} ignored in {:?}", intent, self.state);
                return;
            }
        }

        match intent {
            Intent::MoveUp => self.user.move_up(),
            Intent::MoveDown => self.user.move_down(),
            Intent::MoveLeft => self.user.move_left(),
            Intent::MoveRight => self.user.move_right(),
            Intent::StopMoving => self.user.stop(),
            Intent::StartFiring => {
                if !self.firing {
                    self.firing = true;
                    self.fire_timer_ms = 0;
                }
            }
            Intent::StopFiring => {
                if self.firing {
                    self.fire_projectile();
                    self.firing = false;
                    self.fire_timer_ms = 0;
                }
            }
            Intent::TogglePause => self.pause_game(),
        }
    }

    fn fire_projectile(&mut self) {
        if self.user.is_disposed() {
            return;
        }
        let id = self.next_entity_id();
        let shot = self.user.fire_projectile(id, self.now_ms());
        self.user_projectiles.push(shot);
    }

    // --- Time ---

    /// Advance wall time. Runs due ticks and held-fire shots while running,
    /// and releases the terminal notification once the settle delay elapsed.
    pub fn advance(&mut self, elapsed_ms: u64) -> Result<Option<LevelNotification>, GameError> {
        match self.state {
            LevelState::Running => {
                self.tick_accumulator_ms += elapsed_ms;
                let mut ticks = 0;
                while self.tick_accumulator_ms >= TICK_MS && ticks < MAX_TICKS_PER_ADVANCE {
                    self.tick_accumulator_ms -= TICK_MS;
                    ticks += 1;
                    self.advance_fire_timer();
                    self.tick()?;
                    if self.state != LevelState::Running {
                        break;
                    }
                }
                // Drop any backlog beyond the substep cap
                self.tick_accumulator_ms = self.tick_accumulator_ms.min(TICK_MS - 1);
                Ok(None)
            }
            LevelState::Stopped => Ok(self.advance_settle(elapsed_ms)),
            LevelState::Idle | LevelState::Paused => Ok(None),
        }
    }

    /// Held fire runs on simulation time, one tick period at a time
    fn advance_fire_timer(&mut self) {
        if !self.firing {
            return;
        }
        self.fire_timer_ms += TICK_MS;
        if self.fire_timer_ms >= FIRE_INTERVAL_MS {
            self.fire_timer_ms -= FIRE_INTERVAL_MS;
            self.fire_projectile();
        }
    }

    fn advance_settle(&mut self, elapsed_ms: u64) -> Option<LevelNotification> {
        let (_, remaining) = self.pending.as_mut()?;
        *remaining = remaining.saturating_sub(elapsed_ms);
        if *remaining == 0 {
            let (notification, _) = self.pending.take()?;
            log::info!("Notifying {:?} ({})", notification.action, notification.level_name);
            return Some(notification);
        }
        None
    }

    /// Run one tick of the pipeline. `None` unless running.
    ///
    /// An error stops the level before it is returned.
    pub fn tick(&mut self) -> Result<Option<TickReport>, GameError> {
        if self.state != LevelState::Running {
            return Ok(None);
        }
        match self.run_tick() {
            Ok(report) => Ok(Some(report)),
            Err(err) => {
                log::error!("{} aborted: {}", self.id, err);
                self.stop_game();
                Err(err)
            }
        }
    }

    fn run_tick(&mut self) -> Result<TickReport, GameError> {
        self.tick_count += 1;
        let mut report = TickReport {
            tick: self.tick_count,
            ..TickReport::default()
        };

        self.spawn_enemy_units();
        self.spawn_transient_objects();
        self.update_actors();
        self.generate_enemy_fire();
        self.current_enemy_count = self.enemy_count();
        report.penetrations = self.handle_enemy_penetration();
        report.score_gained = self.handle_collisions()?;
        self.score.increase_by(report.score_gained);
        self.expire_transient_objects();
        report.kills_gained = self.remove_all_destroyed_actors(&mut report.removed);
        self.remove_off_screen_projectiles(&mut report.removed);
        self.update_level_view();
        self.animate_background();
        report.outcome = self.check_if_game_over();

        Ok(report)
    }

    fn enemy_count(&self) -> usize {
        self.enemies.len() + usize::from(self.boss.is_some())
    }

    // --- Pipeline steps ---

    fn spawn_enemy_units(&mut self) {
        if self.config.has_boss() {
            if self.boss.is_none() && !self.boss_defeated {
                let id = self.next_entity_id();
                let boss_rng = Pcg32::seed_from_u64(self.rng.random());
                log::debug!("Boss spawned");
                self.boss = Some(Boss::new(id, boss_rng));
            }
            return;
        }

        let free_slots = self.config.total_enemies.saturating_sub(self.enemies.len());
        let now = self.now_ms();
        for _ in 0..free_slots {
            if !roll(&mut self.rng, self.config.enemy_spawn_probability) {
                continue;
            }
            let y = random_between(&mut self.rng, 0.0, self.enemy_max_y);
            let config = self.pick_enemy_variant();
            let id = self.next_entity_id();
            log::debug!("Enemy {} ({}) spawned at y={:.0}", id, config.sprite, y);
            self.enemies.push(EnemyPlane::new(id, Vec2::new(self.screen_width, y), config, now));
        }
    }

    fn pick_enemy_variant(&mut self) -> EnemyConfig {
        match self.config.enemy_variants {
            EnemyVariants::Standard => EnemyConfig::standard(),
            EnemyVariants::Mixed { heavy_probability, heavy } => {
                if roll(&mut self.rng, heavy_probability) {
                    heavy
                } else {
                    EnemyConfig::standard()
                }
            }
            EnemyVariants::Only(config) => config,
        }
    }

    fn spawn_transient_objects(&mut self) {
        let now = self.now_ms();

        let probability = self
            .config
            .health_pickups
            .probability(self.user.health(), self.config.player_initial_health);
        if probability > 0.0 && roll(&mut self.rng, probability) {
            let position = Pickup::random_position(&mut self.rng, &self.user.bounds);
            let id = self.next_entity_id();
            log::debug!("Health pickup {} spawned", id);
            self.pickups
                .push(Pickup::new(id, PickupKind::Health, position, now, PICKUP_LINGER_MS));
        }

        if let Some(probability) = self.config.fire_suppressors {
            let boss_firing = self.boss.as_ref().is_some_and(|b| !b.is_fire_suppressed());
            let in_play = self
                .pickups
                .iter()
                .any(|p| p.kind == PickupKind::FireSuppression && !p.is_disposed());
            if boss_firing && !in_play && roll(&mut self.rng, probability) {
                let position = Pickup::random_position(&mut self.rng, &self.user.bounds);
                let id = self.next_entity_id();
                log::debug!("Fire-suppression pickup {} spawned", id);
                self.pickups.push(Pickup::new(
                    id,
                    PickupKind::FireSuppression,
                    position,
                    now,
                    PICKUP_LINGER_MS,
                ));
            }
        }
    }

    fn update_actors(&mut self) {
        self.user.update_actor();
        self.enemies.iter_mut().for_each(|e| e.update_actor());
        if let Some(boss) = self.boss.as_mut() {
            boss.update_actor();
        }
        self.user_projectiles.iter_mut().for_each(|p| p.update_actor());
        self.enemy_projectiles.iter_mut().for_each(|p| p.update_actor());
        self.pickups.iter_mut().for_each(|p| p.update_actor());
    }

    /// Each enemy rolls independently; a suppressed boss holds its fire
    fn generate_enemy_fire(&mut self) {
        let now = self.now_ms();
        for enemy in &self.enemies {
            if let Some(shot) = enemy.fire_projectile(&mut self.rng, self.next_id, now) {
                self.next_id += 1;
                self.enemy_projectiles.push(shot);
            }
        }
        if let Some(boss) = self.boss.as_mut() {
            if !boss.is_fire_suppressed() && !boss.is_disposed() {
                if let Some(shot) = boss.fire_projectile(self.next_id, now) {
                    self.next_id += 1;
                    self.enemy_projectiles.push(shot);
                }
            }
        }
    }

    /// Escaped enemies hurt the player once and leave without counting as kills
    fn handle_enemy_penetration(&mut self) -> u32 {
        let mut penetrations = 0;
        for enemy in self.enemies.iter_mut() {
            if !enemy.is_disposed() && enemy.body().translate.x.abs() > self.screen_width {
                log::debug!("Enemy {} penetrated defenses", enemy.id());
                self.user.take_damage();
                enemy.remove();
                penetrations += 1;
            }
        }
        penetrations
    }

    fn handle_collisions(&mut self) -> Result<u32, GameError> {
        let mut gained =
            collision::user_projectiles_vs_enemies(&self.user, &mut self.user_projectiles, &mut self.enemies)?;
        if let Some(boss) = self.boss.as_mut() {
            gained += collision::user_projectiles_vs_boss(&self.user, &mut self.user_projectiles, boss)?;
        }
        collision::enemy_projectiles_vs_user(&mut self.enemy_projectiles, &mut self.user);
        collision::planes_vs_enemies(&mut self.user, &mut self.enemies);
        collision::user_vs_health_pickups(&mut self.user, &mut self.pickups, self.config.player_initial_health);
        if let Some(boss) = self.boss.as_mut() {
            collision::planes_vs_boss(&mut self.user, boss);
            collision::user_vs_fire_suppressors(&mut self.user, boss, &mut self.pickups);
        }
        Ok(gained)
    }

    fn expire_transient_objects(&mut self) {
        let now = self.now_ms();
        for pickup in self.pickups.iter_mut() {
            if !pickup.is_disposed() && pickup.is_expired(now) {
                pickup.remove();
            }
        }
    }

    /// Returns the number of kills credited this tick
    fn remove_all_destroyed_actors(&mut self, removed: &mut Vec<Removal>) -> u32 {
        let mut kills = remove_disposed(&mut self.enemies, removed);
        remove_disposed(&mut self.user_projectiles, removed);
        remove_disposed(&mut self.enemy_projectiles, removed);
        remove_disposed(&mut self.pickups, removed);

        if let Some(reason) = self.boss.as_ref().and_then(|b| b.removal()) {
            if let Some(boss) = self.boss.take() {
                removed.push(Removal { id: boss.id(), reason });
            }
            match reason {
                RemovalReason::Destroyed => {
                    log::info!("Boss destroyed");
                    self.boss_defeated = true;
                    kills += 1;
                }
                RemovalReason::Escaped => {}
            }
        }

        for _ in 0..kills {
            self.user.increment_kill_count();
        }
        kills
    }

    fn remove_off_screen_projectiles(&mut self, removed: &mut Vec<Removal>) {
        let width = self.screen_width;
        for projectiles in [&mut self.user_projectiles, &mut self.enemy_projectiles] {
            projectiles.retain(|p| {
                let off_screen = p.body().translate.x.abs() > width;
                if off_screen {
                    removed.push(Removal {
                        id: p.id(),
                        reason: RemovalReason::Escaped,
                    });
                }
                !off_screen
            });
        }
    }

    fn update_level_view(&mut self) {
        self.view.health = self.user.health();
        self.view.kills = self.user.kills();
        self.view.score = self.score.score();
        self.view.last_score_increment = self.score.last_increment();
        self.view.paused = self.state == LevelState::Paused;
        self.view.boss = match (&self.boss, self.boss_defeated) {
            (Some(boss), _) => Some(BossView {
                health: boss.health(),
                shielded: boss.is_shielded(),
                fire_suppressed: boss.is_fire_suppressed(),
            }),
            (None, true) => Some(BossView {
                health: 0,
                shielded: false,
                fire_suppressed: false,
            }),
            (None, false) => None,
        };
    }

    fn animate_background(&mut self) {
        if !self.config.scroll_background {
            return;
        }
        self.background_offset -= BACKGROUND_SCROLL_SPEED;
        if self.background_offset <= -self.screen_width {
            self.background_offset = 0.0;
        }
    }

    fn check_if_game_over(&mut self) -> Option<Outcome> {
        let outcome = scoring::evaluate(
            self.user.is_destroyed(),
            self.config.objective,
            self.user.kills(),
            self.boss_defeated,
        )?;

        let notification = match outcome {
            Outcome::Advance => match self.id.next() {
                Some(next) => LevelNotification {
                    level_name: next.name().to_string(),
                    action: LevelAction::AdvanceLevel,
                },
                None => LevelNotification {
                    level_name: self.id.name().to_string(),
                    action: LevelAction::Win,
                },
            },
            Outcome::Win => LevelNotification {
                level_name: self.id.name().to_string(),
                action: LevelAction::Win,
            },
            Outcome::Lose => LevelNotification {
                level_name: self.id.name().to_string(),
                action: LevelAction::Lose,
            },
        };

        log::info!("{} finished: {:?}", self.id, outcome);
        self.stop_game();
        self.pending = Some((notification, SETTLE_DELAY_MS));
        Some(outcome)
    }

    // --- Presentation ---

    pub fn scene(&self) -> RenderableScene {
        let mut sprites = Vec::with_capacity(
            1 + self.enemies.len() + self.user_projectiles.len() + self.enemy_projectiles.len() + self.pickups.len() + 1,
        );

        if !self.user.is_disposed() {
            sprites.push(Sprite {
                id: self.user.id(),
                kind: SpriteKind::User,
                name: "userplane",
                bbox: self.user.bbox(),
            });
        }
        sprites.extend(self.enemies.iter().map(|e| Sprite {
            id: e.id(),
            kind: SpriteKind::Enemy,
            name: e.config.sprite,
            bbox: e.bbox(),
        }));
        if let Some(boss) = &self.boss {
            sprites.push(Sprite {
                id: boss.id(),
                kind: SpriteKind::Boss {
                    shielded: boss.is_shielded(),
                },
                name: "bossplane",
                bbox: boss.bbox(),
            });
        }
        sprites.extend(
            self.user_projectiles
                .iter()
                .chain(self.enemy_projectiles.iter())
                .map(|p| Sprite {
                    id: p.id(),
                    kind: SpriteKind::Projectile(p.kind),
                    name: match p.kind {
                        ProjectileKind::User => "userfire",
                        ProjectileKind::Enemy => "enemyfire",
                        ProjectileKind::Boss => "fireball",
                    },
                    bbox: p.bbox(),
                }),
        );
        sprites.extend(self.pickups.iter().map(|p| Sprite {
            id: p.id(),
            kind: SpriteKind::Pickup(p.kind),
            name: match p.kind {
                PickupKind::Health => "heart",
                PickupKind::FireSuppression => "nofire",
            },
            bbox: p.bbox(),
        }));

        RenderableScene {
            width: self.screen_width,
            height: self.screen_height,
            background: self.config.background,
            background_offset: self.background_offset,
            sprites,
            view: self.view.clone(),
        }
    }
}

/// Drop disposed actors, returning how many were destroyed
fn remove_disposed<T: Destructible>(actors: &mut Vec<T>, removed: &mut Vec<Removal>) -> u32 {
    let mut destroyed = 0;
    actors.retain(|actor| match actor.removal() {
        None => true,
        Some(reason) => {
            removed.push(Removal { id: actor.id(), reason });
            match reason {
                RemovalReason::Destroyed => destroyed += 1,
                RemovalReason::Escaped => {}
            }
            false
        }
    });
    destroyed
}
