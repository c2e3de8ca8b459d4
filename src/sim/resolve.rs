//! Per-tick interaction resolution
//!
//! Runs after all movement and firing. Rules are applied in a fixed order:
//! 1. enemy projectile x player  -> projectile destroyed, player damaged
//! 2. enemy body x player        -> knockback + contact damage
//! 3. player projectile x enemy  -> projectile destroyed, enemy damaged and nudged
//! 4. any projectile out of bounds -> destroyed
//!
//! Anything destroyed by an earlier rule (or earlier in the same rule) takes
//! no part in later resolutions this tick.

use glam::Vec2;

use super::actor::{Combatant, Faction};
use super::collision::{Aabb, OverlapProvider};
use super::state::World;
use crate::tuning::Tuning;

/// What the resolver did this tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolveReport {
    /// Enemy projectiles that hit the player
    pub player_hits: u32,
    /// Enemy bodies that touched the player
    pub contacts: u32,
    /// Player projectiles that hit an enemy
    pub enemy_hits: u32,
    /// Projectiles removed for leaving the world
    pub out_of_bounds: u32,
    /// Ids of enemies whose hp reached zero this tick
    pub enemies_killed: Vec<u32>,
}

/// Apply rules 1-4 to `world`
pub fn resolve_interactions<O: OverlapProvider>(
    world: &mut World,
    overlap: &O,
    tuning: &Tuning,
) -> ResolveReport {
    let mut report = ResolveReport::default();

    enemy_projectiles_vs_player(world, overlap, &mut report);
    enemy_bodies_vs_player(world, overlap, tuning, &mut report);
    player_projectiles_vs_enemies(world, overlap, tuning, &mut report);
    projectiles_out_of_bounds(world, overlap, &mut report);

    report
}

fn faction_boxes(world: &World, faction: Faction) -> (Vec<u32>, Vec<Aabb>) {
    world
        .projectiles
        .by_faction(faction)
        .map(|p| (p.id, p.bounds()))
        .unzip()
}

fn enemy_projectiles_vs_player<O: OverlapProvider>(
    world: &mut World,
    overlap: &O,
    report: &mut ResolveReport,
) {
    if !world.player.alive() {
        return;
    }
    let (ids, boxes) = faction_boxes(world, Faction::Enemy);
    let pairs = overlap.overlapping_pairs(&boxes, &[world.player.core.bounds()]);

    let mut destroyed = Vec::new();
    for (i, _) in pairs {
        if !world.player.alive() {
            break;
        }
        let id = ids[i];
        let Some(damage) = world.projectiles.get(id).map(|p| p.damage) else {
            continue;
        };
        world.player.take_damage(damage);
        destroyed.push(id);
        report.player_hits += 1;
        log::debug!("Enemy projectile {} hit player for {} (hp {})", id, damage, world.player.core.hp);
    }
    world.projectiles.remove_ids(&destroyed);
}

fn enemy_bodies_vs_player<O: OverlapProvider>(
    world: &mut World,
    overlap: &O,
    tuning: &Tuning,
    report: &mut ResolveReport,
) {
    if !world.player.alive() {
        return;
    }
    let living: Vec<usize> = (0..world.enemies.len())
        .filter(|&i| world.enemies[i].alive())
        .collect();
    let boxes: Vec<Aabb> = living.iter().map(|&i| world.enemies[i].core.bounds()).collect();
    let pairs = overlap.overlapping_pairs(&boxes, &[world.player.core.bounds()]);

    let damage = tuning.contact_damage(world.level);
    for (k, _) in pairs {
        if !world.player.alive() {
            break;
        }
        let enemy_x = world.enemies[living[k]].core.pos.x;
        let knockback = if world.player.core.pos.x < enemy_x {
            -tuning.player.knockback
        } else {
            tuning.player.knockback
        };
        world.player.push(knockback);
        world.player.take_damage(damage);
        report.contacts += 1;
        log::debug!(
            "Enemy {} touched player for {} (hp {})",
            world.enemies[living[k]].id,
            damage,
            world.player.core.hp
        );
    }
}

fn player_projectiles_vs_enemies<O: OverlapProvider>(
    world: &mut World,
    overlap: &O,
    tuning: &Tuning,
    report: &mut ResolveReport,
) {
    let (ids, boxes) = faction_boxes(world, Faction::Player);
    let living: Vec<usize> = (0..world.enemies.len())
        .filter(|&i| world.enemies[i].alive())
        .collect();
    let enemy_boxes: Vec<Aabb> = living.iter().map(|&i| world.enemies[i].core.bounds()).collect();
    let pairs = overlap.overlapping_pairs(&boxes, &enemy_boxes);

    let mut destroyed: Vec<u32> = Vec::new();
    for (pi, k) in pairs {
        let id = ids[pi];
        if destroyed.contains(&id) {
            continue;
        }
        let enemy = &mut world.enemies[living[k]];
        if !enemy.alive() {
            continue;
        }
        let Some((damage, vel)) = world.projectiles.get(id).map(|p| (p.damage, p.vel)) else {
            continue;
        };

        enemy.take_damage(damage);
        let max_x = world.geometry.bounds.max().x - enemy.core.size.x;
        enemy.core.pos.x = (enemy.core.pos.x + crate::horizontal_sign(vel.x) * tuning.enemy.hit_nudge)
            .min(max_x)
            .max(world.geometry.bounds.min.x);
        destroyed.push(id);
        report.enemy_hits += 1;
        log::debug!("Player projectile {} hit enemy {} (hp {})", id, enemy.id, enemy.core.hp);

        if !enemy.alive() {
            report.enemies_killed.push(enemy.id);
        }
    }
    world.projectiles.remove_ids(&destroyed);
}

fn projectiles_out_of_bounds<O: OverlapProvider>(
    world: &mut World,
    overlap: &O,
    report: &mut ResolveReport,
) {
    let (ids, anchors): (Vec<u32>, Vec<Vec2>) =
        world.projectiles.iter().map(|p| (p.id, p.anchor())).unzip();
    let gone: Vec<u32> = overlap
        .left_bounds(&anchors, &world.geometry.bounds)
        .into_iter()
        .map(|i| ids[i])
        .collect();
    report.out_of_bounds += gone.len() as u32;
    world.projectiles.remove_ids(&gone);
}
