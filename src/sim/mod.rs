//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes only from the delta-times fed to `tick`
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, input-device or storage dependencies beyond injected traits

pub mod actor;
pub mod ai;
pub mod collision;
pub mod fire;
pub mod progression;
pub mod projectile;
pub mod resolve;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod upgrade;

pub use actor::{
    ActorCore, AiState, Combatant, Enemy, Faction, Player, PlayerCarryState, XDirection,
};
pub use collision::{Aabb, AabbOverlap, LevelGeometry, OverlapProvider};
pub use fire::try_fire;
pub use progression::{Phase, ProgressionController};
pub use projectile::{Projectile, ProjectilePool};
pub use resolve::{ResolveReport, resolve_interactions};
pub use snapshot::{Snapshot, hp_fill_ratio};
pub use state::{World, enemy_count_for_level};
pub use tick::{TickInput, TickOutcome, step_world};
pub use upgrade::{CATALOG, Upgrade, draw_choices};
