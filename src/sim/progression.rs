//! Run progression: upgrade choice, play, level transition, defeat
//!
//! ```text
//! UpgradeSelection -> Simulating -> LevelTransition -> UpgradeSelection (next level)
//!                                \-> Defeat (terminal until restart)
//! ```

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::actor::PlayerCarryState;
use super::collision::{AabbOverlap, OverlapProvider};
use super::state::World;
use super::tick::{TickInput, TickOutcome, step_world};
use super::upgrade::{Upgrade, draw_choices};
use crate::persistence::KeyValueStore;
use crate::records::BestLevel;
use crate::tuning::Tuning;

/// Where the run currently is
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Waiting for the player to pick one of two upgrades; nothing ticks
    UpgradeSelection { choices: [Upgrade; 2] },
    /// The level is being played
    Simulating,
    /// Level cleared; the next tick builds the following level
    LevelTransition,
    /// Player died on `reached_level`; `best_level` is the stored record after
    /// this run, or `None` if the store could not be reached
    Defeat {
        reached_level: u32,
        best_level: Option<u32>,
    },
}

/// Owns the world and drives it through the level state machine
pub struct ProgressionController<S: KeyValueStore, O: OverlapProvider = AabbOverlap> {
    tuning: Tuning,
    store: S,
    overlap: O,
    rng: Pcg32,
    seed: u64,
    level: u32,
    phase: Phase,
    world: World,
    carry: Option<PlayerCarryState>,
}

impl<S: KeyValueStore> ProgressionController<S, AabbOverlap> {
    /// New run with the built-in AABB overlap provider
    pub fn new(seed: u64, tuning: Tuning, store: S) -> Self {
        Self::with_overlap(seed, tuning, store, AabbOverlap)
    }
}

impl<S: KeyValueStore, O: OverlapProvider> ProgressionController<S, O> {
    pub fn with_overlap(seed: u64, tuning: Tuning, store: S, overlap: O) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let world = World::for_level(1, None, &tuning, &mut rng);
        let choices = draw_choices(&mut rng);
        log::info!("Run started with seed {}", seed);
        Self {
            tuning,
            store,
            overlap,
            rng,
            seed,
            level: 1,
            phase: Phase::UpgradeSelection { choices },
            world,
            carry: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current level index (1-based); reset to 1 on defeat
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct world access for drivers and tests
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Snapshot waiting to seed the next level's player
    pub fn carry_state(&self) -> Option<&PlayerCarryState> {
        self.carry.as_ref()
    }

    /// The two upgrades on offer, if choosing
    pub fn choices(&self) -> Option<[Upgrade; 2]> {
        match self.phase {
            Phase::UpgradeSelection { choices } => Some(choices),
            _ => None,
        }
    }

    /// Apply offered upgrade `index` (0 or 1) and start the level
    pub fn choose_upgrade(&mut self, index: usize) -> Option<Upgrade> {
        let Phase::UpgradeSelection { choices } = self.phase else {
            debug_assert!(false, "choose_upgrade called in {:?}", self.phase);
            return None;
        };
        debug_assert!(index < choices.len(), "upgrade index {} out of range", index);
        let upgrade = *choices.get(index)?;
        upgrade.apply(&mut self.world.player, &self.tuning.upgrades);
        self.phase = Phase::Simulating;
        log::info!("Level {}: chose {}", self.level, upgrade.label());
        Some(upgrade)
    }

    /// Advance one tick. Only `Simulating` steps the world; a pending
    /// `LevelTransition` is completed here. Other phases are idle.
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> Option<TickOutcome> {
        match self.phase {
            Phase::Simulating => {}
            Phase::LevelTransition => {
                self.finish_transition();
                return None;
            }
            Phase::UpgradeSelection { .. } | Phase::Defeat { .. } => return None,
        }

        let outcome = step_world(&mut self.world, input, dt, &self.overlap, &self.tuning);

        // A player dying on the clearing tick still loses the run
        if !self.world.player.core.alive() {
            self.enter_defeat();
        } else if self.world.living_enemies() == 0 {
            self.carry = Some(self.world.player.carry_state());
            self.level += 1;
            self.phase = Phase::LevelTransition;
            log::info!("Level {} cleared", self.level - 1);
        }

        Some(outcome)
    }

    /// Build the next level from the carried snapshot and offer upgrades
    fn finish_transition(&mut self) {
        debug_assert_eq!(self.phase, Phase::LevelTransition);
        let carry = self.carry.take();
        self.world = World::for_level(self.level, carry, &self.tuning, &mut self.rng);
        self.phase = Phase::UpgradeSelection {
            choices: draw_choices(&mut self.rng),
        };
    }

    fn enter_defeat(&mut self) {
        let reached_level = self.level;
        let best_level = match BestLevel::record(&mut self.store, reached_level) {
            Ok(outcome) => Some(outcome.best()),
            Err(e) => {
                log::warn!("Could not record best level: {}", e);
                None
            }
        };
        log::info!("Defeated on level {} (best {:?})", reached_level, best_level);

        self.level = 1;
        self.carry = None;
        self.phase = Phase::Defeat {
            reached_level,
            best_level,
        };
    }

    /// Leave `Defeat` and start a new run at level 1 with base stats
    pub fn restart(&mut self) {
        if !matches!(self.phase, Phase::Defeat { .. }) {
            debug_assert!(false, "restart called in {:?}", self.phase);
            return;
        }
        self.level = 1;
        self.world = World::for_level(1, None, &self.tuning, &mut self.rng);
        self.phase = Phase::UpgradeSelection {
            choices: draw_choices(&mut self.rng),
        };
        log::info!("Run restarted");
    }
}
