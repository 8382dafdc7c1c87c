//! Sky Assault headless driver
//!
//! Plays through the level sequence with a simple autopilot and prints the
//! final HUD as JSON. Usage: `sky-assault [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
mod driver {
    use serde::Serialize;
    use sky_assault::consts::TICK_MS;
    use sky_assault::settings::Autopilot;
    use sky_assault::sim::{Destructible, Intent, Level, LevelAction, LevelId, LevelView, start_level};
    use sky_assault::{GameError, Settings};

    /// Result of one level run
    #[derive(Debug, Serialize)]
    struct LevelRun {
        level: LevelId,
        action: Option<LevelAction>,
        ticks: u64,
        view: LevelView,
    }

    #[derive(Debug, Serialize)]
    struct RunSummary {
        seed: u64,
        autopilot: &'static str,
        levels: Vec<LevelRun>,
    }

    /// Steer toward the nearest threat on the vertical axis
    fn steer(level: &mut Level, autopilot: Autopilot) {
        if autopilot == Autopilot::Turret {
            return;
        }

        let user = level.user().bbox();
        let user_y = (user.min.y + user.max.y) / 2.0;
        let target_y = level
            .enemies()
            .iter()
            .map(|e| e.bbox())
            .chain(level.boss().map(|b| b.bbox()))
            .min_by(|a, b| a.min.x.total_cmp(&b.min.x))
            .map(|bbox| (bbox.min.y + bbox.max.y) / 2.0);

        let intent = match target_y {
            Some(y) if y < user_y - 10.0 => Intent::MoveUp,
            Some(y) if y > user_y + 10.0 => Intent::MoveDown,
            _ => Intent::StopMoving,
        };
        level.handle_intent(intent);
    }

    /// Run one level until it notifies or runs out of time
    fn play_level(id: LevelId, settings: &Settings) -> Result<LevelRun, GameError> {
        let (mut level, scene) = start_level(id, settings.screen_height, settings.screen_width, settings.seed_for(id))?;
        log::info!("{} loaded ({} sprites, background {})", id, scene.sprites.len(), scene.background);

        level.handle_intent(Intent::StartFiring);
        let budget_ticks = settings.max_seconds_per_level * 1000 / TICK_MS;
        let mut steps: u64 = 0;

        let action = loop {
            steer(&mut level, settings.autopilot);
            if let Some(notification) = level.advance(TICK_MS)? {
                break Some(notification.action);
            }
            steps += 1;
            if steps > budget_ticks {
                log::warn!("{} timed out after {} ticks", id, level.tick_count());
                level.stop_game();
                break None;
            }
        };

        Ok(LevelRun {
            level: id,
            action,
            ticks: level.tick_count(),
            view: level.view().clone(),
        })
    }

    pub fn run() -> Result<(), GameError> {
        env_logger::init();

        let settings = match std::env::args().nth(1) {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        log::info!("Sky Assault starting with seed {}", settings.seed);

        let mut summary = RunSummary {
            seed: settings.seed,
            autopilot: settings.autopilot.as_str(),
            levels: Vec::new(),
        };

        let mut current = Some(settings.start_level);
        while let Some(id) = current {
            let run = play_level(id, &settings)?;
            current = match run.action {
                Some(LevelAction::AdvanceLevel) => id.next(),
                Some(LevelAction::Win) => {
                    log::info!("Game won");
                    None
                }
                Some(LevelAction::Lose) => {
                    log::info!("Game over in {}", id);
                    None
                }
                None => None,
            };
            summary.levels.push(run);
        }

        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), sky_assault::GameError> {
    driver::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is driven by the embedding page on the web
}
