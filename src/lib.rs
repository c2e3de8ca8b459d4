//! Arena Rush - wave-based 2D arena combat
//!
//! Core modules:
//! - `sim`: Deterministic simulation (actors, projectiles, AI, collisions, progression)
//! - `persistence`: Key-value stores for run records
//! - `records`: Best-level bookkeeping on top of a store
//! - `platform`: Clock abstraction
//! - `tuning`: Data-driven game balance

pub mod persistence;
pub mod platform;
pub mod records;
pub mod sim;
pub mod tuning;

pub use persistence::{KeyValueStore, MemoryStore, StoreError};
pub use records::BestLevel;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the headless runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Arena dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 608.0;

    /// Player spawn point (top-left of the bounding box)
    pub const PLAYER_SPAWN_X: f32 = 0.0;
    pub const PLAYER_SPAWN_Y: f32 = 570.0;

    /// Enemies start this high above the floor and fall into the arena
    pub const ENEMY_SPAWN_Y: f32 = 40.0;

    /// Store key for the best level ever reached
    pub const BEST_LEVEL_KEY: &str = "bestLevel";

    /// Below this `max_hp` a health bar is drawn empty instead of dividing
    pub const HP_EPSILON: f32 = 1e-4;
}

/// Unit sign of a horizontal delta; zero maps to +1 (facing right)
#[inline]
pub fn horizontal_sign(dx: f32) -> f32 {
    if dx < 0.0 { -1.0 } else { 1.0 }
}

/// Squared distance between two points
#[inline]
pub fn distance_sq(a: Vec2, b: Vec2) -> f32 {
    (a - b).length_squared()
}
