//! Read-only view of the run for renderers and UI

use glam::Vec2;
use serde::Serialize;

use super::actor::{ActorCore, Faction};
use super::collision::OverlapProvider;
use super::progression::{Phase, ProgressionController};
use crate::consts::HP_EPSILON;
use crate::persistence::KeyValueStore;

/// Health-bar fill in `[0, 1]`. Zero or negative `max_hp` yields an empty bar.
pub fn hp_fill_ratio(hp: f32, max_hp: f32) -> f32 {
    if max_hp < HP_EPSILON || !hp.is_finite() {
        return 0.0;
    }
    (hp / max_hp).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Serialize)]
pub struct ActorView {
    pub pos: Vec2,
    pub size: Vec2,
    pub facing_right: bool,
    pub hp_ratio: f32,
}

impl ActorView {
    fn of(core: &ActorCore) -> Self {
        Self {
            pos: core.pos,
            size: core.size,
            facing_right: core.facing_right,
            hp_ratio: hp_fill_ratio(core.hp, core.max_hp),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub size: Vec2,
    pub faction: Faction,
}

/// Upgrade menu entry
#[derive(Debug, Clone, Serialize)]
pub struct ChoiceView {
    pub id: &'static str,
    pub label: &'static str,
}

/// Everything a frame needs to draw
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// "Level N" banner
    pub banner: String,
    pub phase: &'static str,
    pub player: ActorView,
    pub enemies: Vec<ActorView>,
    pub projectiles: Vec<ProjectileView>,
    /// Upgrade menu, empty unless choosing
    pub choices: Vec<ChoiceView>,
}

impl Snapshot {
    pub fn capture<S: KeyValueStore, O: OverlapProvider>(ctrl: &ProgressionController<S, O>) -> Self {
        let world = ctrl.world();
        let phase = match ctrl.phase() {
            Phase::UpgradeSelection { .. } => "upgrade_selection",
            Phase::Simulating => "simulating",
            Phase::LevelTransition => "level_transition",
            Phase::Defeat { .. } => "defeat",
        };
        Self {
            banner: format!("Level {}", world.level),
            phase,
            player: ActorView::of(&world.player.core),
            enemies: world.enemies.iter().map(|e| ActorView::of(&e.core)).collect(),
            projectiles: world
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    pos: p.pos,
                    size: p.size,
                    faction: p.faction,
                })
                .collect(),
            choices: ctrl
                .choices()
                .map(|cs| {
                    cs.iter()
                        .map(|u| ChoiceView {
                            id: u.id(),
                            label: u.label(),
                        })
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::tuning::Tuning;

    #[test]
    fn test_hp_ratio_is_guarded() {
        assert_eq!(hp_fill_ratio(50.0, 100.0), 0.5);
        assert_eq!(hp_fill_ratio(0.0, 100.0), 0.0);
        assert_eq!(hp_fill_ratio(-3.0, 100.0), 0.0);
        assert_eq!(hp_fill_ratio(130.0, 100.0), 1.0);
        assert_eq!(hp_fill_ratio(10.0, 0.0), 0.0);
        assert_eq!(hp_fill_ratio(f32::NAN, 100.0), 0.0);
    }

    #[test]
    fn test_capture_upgrade_menu() {
        let ctrl = ProgressionController::new(77, Tuning::default(), MemoryStore::new());
        let snap = Snapshot::capture(&ctrl);
        assert_eq!(snap.banner, "Level 1");
        assert_eq!(snap.phase, "upgrade_selection");
        assert_eq!(snap.choices.len(), 2);
        assert_ne!(snap.choices[0].id, snap.choices[1].id);
        assert_eq!(snap.enemies.len(), 2);
        assert_eq!(snap.player.hp_ratio, 1.0);

        let json = serde_json::to_string(&snap).expect("serializable");
        assert!(json.contains("\"banner\":\"Level 1\""));
    }

    #[test]
    fn test_capture_while_simulating_has_no_menu() {
        let mut ctrl = ProgressionController::new(77, Tuning::default(), MemoryStore::new());
        ctrl.choose_upgrade(0);
        let snap = Snapshot::capture(&ctrl);
        assert_eq!(snap.phase, "simulating");
        assert!(snap.choices.is_empty());
    }
}
