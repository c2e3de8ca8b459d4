//! Data-driven game balance
//!
//! Every number the simulation uses lives here so a run can be rebalanced
//! from a JSON file without touching the code.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::collision::LevelGeometry;

/// Player-side balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Horizontal walk speed (units/s)
    pub walk_speed: f32,
    /// Vertical velocity applied on jump (negative is up)
    pub jump_impulse: f32,
    /// Horizontal velocity applied by a body-contact knockback
    pub knockback: f32,
    pub max_hp: f32,
    /// Shots per second
    pub fire_rate: f32,
    pub bullet_damage: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            walk_speed: 200.0,
            jump_impulse: -500.0,
            knockback: 3000.0,
            max_hp: 100.0,
            fire_rate: 5.0,
            bullet_damage: 10.0,
        }
    }
}

/// Enemy-side balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub max_hp: f32,
    /// Shots per second while pursuing
    pub fire_rate: f32,
    pub patrol_speed: f32,
    pub chase_speed: f32,
    /// Distance at which the player is acquired as a target
    pub aggro_radius: f32,
    /// Damage dealt by an enemy projectile
    pub bullet_damage: f32,
    /// Contact damage is `contact_damage_base + level`
    pub contact_damage_base: f32,
    /// Position nudge applied to an enemy hit by a player projectile
    pub hit_nudge: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            max_hp: 20.0,
            fire_rate: 1.0,
            patrol_speed: 60.0,
            chase_speed: 100.0,
            aggro_radius: 250.0,
            bullet_damage: 5.0,
            contact_damage_base: 4.0,
            hit_nudge: 5.0,
        }
    }
}

/// Upgrade amounts offered between levels
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeTuning {
    pub fire_rate: f32,
    pub heal: f32,
    pub max_hp: f32,
    pub damage: f32,
}

impl Default for UpgradeTuning {
    fn default() -> Self {
        Self {
            fire_rate: 1.0,
            heal: 50.0,
            max_hp: 25.0,
            damage: 2.0,
        }
    }
}

/// Complete balance sheet for a run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration applied to actors (units/s²)
    pub gravity: f32,
    /// Horizontal projectile speed (units/s)
    pub projectile_speed: f32,
    /// Actor bounding box (width, height)
    pub actor_size: (f32, f32),
    /// Projectile bounding box (width, height)
    pub projectile_size: (f32, f32),
    pub player: PlayerTuning,
    pub enemy: EnemyTuning,
    pub upgrades: UpgradeTuning,
    /// Arena bounds and static platforms
    pub geometry: LevelGeometry,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 1000.0,
            projectile_speed: 400.0,
            actor_size: (20.0, 20.0),
            projectile_size: (8.0, 4.0),
            player: PlayerTuning::default(),
            enemy: EnemyTuning::default(),
            upgrades: UpgradeTuning::default(),
            geometry: LevelGeometry::default(),
        }
    }
}

impl Tuning {
    /// Parse a tuning sheet; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a tuning sheet from disk, falling back to defaults when the file
    /// is missing or malformed
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Malformed tuning file {}: {} - using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read tuning file {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Contact damage dealt to the player on the given level
    pub fn contact_damage(&self, level: u32) -> f32 {
        self.enemy.contact_damage_base + level as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 500.0, "player": { "max_hp": 150.0 } }"#)
            .expect("valid json");
        assert_eq!(tuning.gravity, 500.0);
        assert_eq!(tuning.player.max_hp, 150.0);
        assert_eq!(tuning.player.walk_speed, 200.0);
        assert_eq!(tuning.enemy.bullet_damage, 5.0);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Tuning::from_json("{ gravity: }").is_err());
    }

    #[test]
    fn test_contact_damage_scales_with_level() {
        let tuning = Tuning::default();
        assert_eq!(tuning.contact_damage(1), 5.0);
        assert_eq!(tuning.contact_damage(3), 7.0);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let tuning = Tuning::load(Path::new("/definitely/not/here/tuning.json"));
        assert_eq!(tuning.projectile_speed, 400.0);
    }
}
