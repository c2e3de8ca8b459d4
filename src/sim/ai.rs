//! Enemy targeting/patrol and the player's auto-aim
//!
//! Target acquisition is re-evaluated every tick with no hysteresis band,
//! so an enemy sitting right on the aggro radius may alternate between
//! patrolling and pursuing from one tick to the next.

use super::actor::{AiState, Combatant, Enemy, MoveReport, Player, XDirection};
use super::fire::try_fire;
use super::projectile::Projectile;
use crate::tuning::Tuning;

/// Whether `player` is a valid target for `enemy` this tick
pub fn in_aggro_range(enemy: &Enemy, player: &Player, tuning: &Tuning) -> bool {
    if !player.alive() {
        return false;
    }
    let radius = tuning.enemy.aggro_radius;
    crate::distance_sq(enemy.core.bounds().center(), player.core.bounds().center()) <= radius * radius
}

/// Run one AI step for `enemy` after it has been integrated.
///
/// `moved` is the enemy's integration report, used to bounce off the world's
/// horizontal bounds. Returns a projectile when a pursuing enemy fires.
pub fn update_enemy(
    enemy: &mut Enemy,
    player: Option<&Player>,
    moved: MoveReport,
    now_ms: f64,
    tuning: &Tuning,
) -> Option<Projectile> {
    if !enemy.alive() {
        return None;
    }

    if moved.hit_left {
        enemy.x_direction = XDirection::Right;
    } else if moved.hit_right {
        enemy.x_direction = XDirection::Left;
    }

    let target = player.filter(|p| in_aggro_range(enemy, p, tuning));

    match target {
        Some(player) => {
            let target_x = player.core.bounds().center().x;
            let dx = target_x - enemy.core.bounds().center().x;
            enemy.ai = AiState::Pursuing { target_x };
            enemy.x_direction = XDirection::from_sign(dx);
            enemy.core.vel.x = enemy.x_direction.sign() * tuning.enemy.chase_speed;
            enemy.core.facing_right = enemy.x_direction == XDirection::Right;

            let direction = enemy.x_direction.sign();
            try_fire(enemy, now_ms, direction, tuning.enemy.bullet_damage, tuning)
        }
        None => {
            enemy.ai = AiState::Patrolling;
            enemy.core.vel.x = enemy.x_direction.sign() * tuning.enemy.patrol_speed;
            enemy.core.facing_right = enemy.x_direction == XDirection::Right;
            None
        }
    }
}

/// Index of the living enemy closest to the player
pub fn nearest_enemy(player: &Player, enemies: &[Enemy]) -> Option<usize> {
    let origin = player.core.bounds().center();
    enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| e.alive())
        .min_by(|(_, a), (_, b)| {
            let da = crate::distance_sq(origin, a.core.bounds().center());
            let db = crate::distance_sq(origin, b.core.bounds().center());
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
}

/// Turn the player toward the nearest enemy and fire if off cooldown
pub fn player_auto_fire(
    player: &mut Player,
    enemies: &[Enemy],
    now_ms: f64,
    tuning: &Tuning,
) -> Option<Projectile> {
    let target = nearest_enemy(player, enemies)?;
    let dx = enemies[target].core.bounds().center().x - player.core.bounds().center().x;
    let direction = crate::horizontal_sign(dx);
    player.core.facing_right = direction > 0.0;
    let damage = player.bullet_damage;
    try_fire(player, now_ms, direction, damage, tuning)
}
