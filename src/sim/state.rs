//! World state for a single level
//!
//! Everything the per-tick pipeline mutates lives in [`World`]; the
//! progression controller owns it exclusively.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::actor::{Enemy, Player, PlayerCarryState, XDirection};
use super::collision::LevelGeometry;
use super::projectile::ProjectilePool;
use crate::consts::{ENEMY_SPAWN_Y, PLAYER_SPAWN_X, PLAYER_SPAWN_Y};
use crate::platform::SimClock;
use crate::tuning::Tuning;

/// Number of enemies spawned on `level`
#[inline]
pub fn enemy_count_for_level(level: u32) -> usize {
    2 * level as usize
}

/// Entities, geometry and time for the level being played
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Level index (1-based)
    pub level: u32,
    pub player: Player,
    /// Enemies sorted by id; dead ones are removed at the end of each tick
    pub enemies: Vec<Enemy>,
    pub projectiles: ProjectilePool,
    pub geometry: LevelGeometry,
    pub clock: SimClock,
    /// Ticks simulated on this level
    pub time_ticks: u64,
}

impl World {
    /// A world with a fresh player and no enemies
    pub fn empty(level: u32, tuning: &Tuning) -> Self {
        Self {
            level,
            player: Player::new(tuning, player_spawn(&tuning.geometry, tuning)),
            enemies: Vec::new(),
            projectiles: ProjectilePool::new(),
            geometry: tuning.geometry.clone(),
            clock: SimClock::default(),
            time_ticks: 0,
        }
    }

    /// Populate `level`: player seeded from `carry`, `2 * level` enemies
    /// spread across the arena at RNG-chosen x positions
    pub fn for_level<R: Rng>(
        level: u32,
        carry: Option<PlayerCarryState>,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Self {
        let mut world = Self::empty(level, tuning);
        world.player = Player::from_carry(carry, tuning, player_spawn(&world.geometry, tuning));

        let bounds = world.geometry.bounds;
        let actor_w = tuning.actor_size.0;
        // Keep spawns clear of the player's corner
        let min_x = (bounds.min.x + actor_w * 4.0).min(bounds.max().x - actor_w);
        let max_x = (bounds.max().x - actor_w).max(min_x);

        for i in 0..enemy_count_for_level(level) {
            let x = if max_x > min_x { rng.random_range(min_x..max_x) } else { min_x };
            let direction = if i % 2 == 0 { XDirection::Left } else { XDirection::Right };
            let spawn = Vec2::new(x, bounds.min.y + ENEMY_SPAWN_Y);
            world.enemies.push(Enemy::new(i as u32 + 1, tuning, spawn, direction));
        }

        log::info!("Level {}: {} enemies", level, world.enemies.len());
        world
    }

    pub fn living_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.core.alive()).count()
    }
}

/// Player start: bottom-left of the arena, kept inside the bounds.
/// Bounds smaller than the actor pin it to the top-left corner.
fn player_spawn(geometry: &LevelGeometry, tuning: &Tuning) -> Vec2 {
    let bounds = geometry.bounds;
    let max = bounds.max();
    Vec2::new(
        PLAYER_SPAWN_X.min(max.x - tuning.actor_size.0).max(bounds.min.x),
        PLAYER_SPAWN_Y.min(max.y - tuning.actor_size.1).max(bounds.min.y),
    )
}
