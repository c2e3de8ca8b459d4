//! Arena Rush headless runner
//!
//! Plays runs with a simple autoplay bot and records the best level reached.
//!
//! ```text
//! arena-rush [--seed N] [--runs N] [--tuning tuning.json] [--store records.json]
//! ```

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;

    use arena_rush::consts::SIM_DT;
    use arena_rush::persistence::KeyValueStore;
    use arena_rush::sim::{Faction, Phase, ProgressionController, Snapshot, TickInput, Upgrade, World};
    use arena_rush::{BestLevel, Tuning};

    /// Give up on a level after this many ticks (10 minutes at 60 Hz)
    const MAX_TICKS_PER_LEVEL: u64 = 60 * 60 * 10;

    /// Keep at least this far from the nearest enemy
    const BOT_SAFE_DISTANCE: f32 = 140.0;

    #[derive(Parser, Debug)]
    #[command(name = "arena-rush")]
    #[command(author, version, about = "Arena Rush - headless autoplay runner")]
    pub struct Args {
        /// RNG seed for the run (defaults to the wall clock)
        #[arg(long)]
        pub seed: Option<u64>,

        /// Number of runs to play back to back
        #[arg(long, default_value_t = 1)]
        pub runs: u32,

        /// Balance overrides as JSON
        #[arg(long)]
        pub tuning: Option<PathBuf>,

        /// JSON file holding the best-level record (in-memory when omitted)
        #[arg(long)]
        pub store: Option<PathBuf>,
    }

    impl Args {
        pub fn seed(&self) -> u64 {
            self.seed.unwrap_or_else(|| {
                std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or(0)
            })
        }
    }

    /// Autoplay: keep distance from the closest enemy, hop over incoming shots
    fn bot_input(world: &World) -> TickInput {
        let player = world.player.core.bounds().center();
        let mut input = TickInput::default();

        if let Some(enemy) = world
            .enemies
            .iter()
            .map(|e| e.core.bounds().center())
            .min_by(|a, b| {
                let da = (*a - player).length_squared();
                let db = (*b - player).length_squared();
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
        {
            let dx = enemy.x - player.x;
            if dx.abs() < BOT_SAFE_DISTANCE {
                input.left = dx > 0.0;
                input.right = dx <= 0.0;
            }
        }

        input.up = world.projectiles.by_faction(Faction::Enemy).any(|p| {
            let dx = player.x - p.pos.x;
            dx.abs() < 60.0 && dx.signum() == p.vel.x.signum()
        });

        input
    }

    /// Heal when hurt, otherwise take the first offer
    fn bot_choice(world: &World, choices: [Upgrade; 2]) -> usize {
        let hurt = world.player.core.hp < world.player.core.max_hp * 0.5;
        if hurt {
            if let Some(i) = choices.iter().position(|u| *u == Upgrade::Healing) {
                return i;
            }
        }
        0
    }

    pub fn play<S: KeyValueStore>(args: &Args, seed: u64, tuning: Tuning, store: S) {
        let mut ctrl = ProgressionController::new(seed, tuning, store);

        for run in 1..=args.runs {
            let mut level_ticks = 0u64;
            loop {
                match ctrl.phase() {
                    Phase::UpgradeSelection { choices } => {
                        let pick = bot_choice(ctrl.world(), choices);
                        ctrl.choose_upgrade(pick);
                        level_ticks = 0;
                    }
                    Phase::Defeat {
                        reached_level,
                        best_level,
                    } => {
                        log::info!(
                            "Run {} over on level {} (best {:?})",
                            run,
                            reached_level,
                            best_level
                        );
                        if let Ok(json) = serde_json::to_string(&Snapshot::capture(&ctrl)) {
                            println!("{}", json);
                        }
                        break;
                    }
                    Phase::Simulating | Phase::LevelTransition => {
                        let input = bot_input(ctrl.world());
                        ctrl.tick(&input, SIM_DT);
                        level_ticks += 1;
                        if level_ticks > MAX_TICKS_PER_LEVEL {
                            log::warn!("Level {} stalled, ending run", ctrl.level());
                            ctrl.world_mut().player.core.hp = 0.0;
                        }
                    }
                }
            }
            if run < args.runs {
                ctrl.restart();
            }
        }

        match BestLevel::read(ctrl.store()) {
            Ok(best) => println!("Best level: {}", best.unwrap_or(0)),
            Err(e) => log::warn!("Could not read best level: {}", e),
        }
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use arena_rush::Tuning;
    use arena_rush::persistence::{JsonFileStore, MemoryStore};
    use clap::Parser;
    use headless::{Args, play};

    env_logger::init();
    let args = Args::parse();
    let seed = args.seed();
    log::info!("Arena Rush (headless) starting with seed {}", seed);

    let tuning = args
        .tuning
        .as_deref()
        .map(Tuning::load)
        .unwrap_or_default();

    match &args.store {
        Some(path) => play(&args, seed, tuning, JsonFileStore::new(path)),
        None => play(&args, seed, tuning, MemoryStore::new()),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is consumed as a library on the web
}
