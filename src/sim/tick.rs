//! Fixed-order simulation tick
//!
//! input -> velocities -> integration -> enemy AI (+ enemy fire) ->
//! player fire -> projectile movement -> interaction resolution -> cleanup

use super::actor::MoveReport;
use super::ai::{player_auto_fire, update_enemy};
use super::collision::OverlapProvider;
use super::resolve::{ResolveReport, resolve_interactions};
use super::state::World;
use crate::platform::Clock;
use crate::tuning::Tuning;

/// Digital direction snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Jump
    pub up: bool,
    /// Unused by the simulation, kept so input sources can pass the full pad
    pub down: bool,
}

/// Result of one world step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    pub resolve: ResolveReport,
    /// Projectiles registered this tick
    pub spawned: u32,
    /// Ids of enemies removed after dying this tick
    pub removed_enemies: Vec<u32>,
}

/// Advance `world` by `dt` seconds
pub fn step_world<O: OverlapProvider>(
    world: &mut World,
    input: &TickInput,
    dt: f32,
    overlap: &O,
    tuning: &Tuning,
) -> TickOutcome {
    let mut outcome = TickOutcome::default();

    world.clock.advance(dt);
    world.time_ticks += 1;
    let now = world.clock.now_ms();

    if world.player.core.alive() {
        world.player.apply_input(input, tuning);
    }

    world.player.core.integrate(dt, tuning.gravity, &world.geometry);
    let moves: Vec<MoveReport> = world
        .enemies
        .iter_mut()
        .map(|e| e.core.integrate(dt, tuning.gravity, &world.geometry))
        .collect();

    let mut shots = Vec::new();
    for (enemy, moved) in world.enemies.iter_mut().zip(moves) {
        if let Some(shot) = update_enemy(enemy, Some(&world.player), moved, now, tuning) {
            shots.push(shot);
        }
    }
    if world.player.core.alive() {
        if let Some(shot) = player_auto_fire(&mut world.player, &world.enemies, now, tuning) {
            shots.push(shot);
        }
    }
    for shot in shots {
        if world.projectiles.spawn(shot).is_some() {
            outcome.spawned += 1;
        }
    }

    world.projectiles.advance(dt);

    outcome.resolve = resolve_interactions(world, overlap, tuning);

    world.enemies.retain(|e| {
        let alive = e.core.alive();
        if !alive {
            outcome.removed_enemies.push(e.id);
        }
        alive
    });

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::actor::{Enemy, Faction, XDirection};
    use crate::sim::collision::AabbOverlap;
    use crate::sim::projectile::Projectile;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_player_walks_right() {
        let tuning = Tuning::default();
        let mut world = World::empty(1, &tuning);
        let start = world.player.core.pos.x;
        let input = TickInput { right: true, ..Default::default() };
        for _ in 0..60 {
            step_world(&mut world, &input, SIM_DT, &AabbOverlap, &tuning);
        }
        assert!((world.player.core.pos.x - (start + 200.0)).abs() < 0.5);
        assert!(world.player.core.grounded);
        assert_eq!(world.time_ticks, 60);
    }

    #[test]
    fn test_projectile_at_boundary_destroyed_next_tick() {
        let tuning = Tuning::default();
        let mut world = World::empty(1, &tuning);
        let edge = world.geometry.bounds.max().x;
        world.projectiles.spawn(Projectile::new(
            Vec2::new(edge, 100.0),
            Vec2::new(tuning.projectile_speed, 0.0),
            Vec2::new(8.0, 4.0),
            Faction::Enemy,
            5.0,
        ));
        let outcome = step_world(&mut world, &TickInput::default(), SIM_DT, &AabbOverlap, &tuning);
        assert_eq!(outcome.resolve.out_of_bounds, 1);
        assert!(world.projectiles.is_empty());
    }

    #[test]
    fn test_dead_enemies_removed() {
        let tuning = Tuning::default();
        let mut world = World::empty(1, &tuning);
        let mut enemy = Enemy::new(7, &tuning, Vec2::new(600.0, 588.0), XDirection::Left);
        enemy.core.hp = 0.0;
        world.enemies.push(enemy);
        world
            .enemies
            .push(Enemy::new(8, &tuning, Vec2::new(700.0, 588.0), XDirection::Left));
        let outcome = step_world(&mut world, &TickInput::default(), SIM_DT, &AabbOverlap, &tuning);
        assert_eq!(outcome.removed_enemies, vec![7]);
        assert_eq!(world.enemies.len(), 1);
    }

    #[test]
    fn test_player_shoots_down_lone_enemy() {
        let tuning = Tuning::default();
        let mut world = World::empty(1, &tuning);
        world.player.core.pos = Vec2::new(100.0, 588.0);
        // Far outside aggro range so it never shoots back
        world
            .enemies
            .push(Enemy::new(1, &tuning, Vec2::new(600.0, 588.0), XDirection::Right));

        let mut kills = Vec::new();
        for _ in 0..600 {
            let outcome = step_world(&mut world, &TickInput::default(), SIM_DT, &AabbOverlap, &tuning);
            kills.extend(outcome.removed_enemies);
            if world.enemies.is_empty() {
                break;
            }
        }
        assert_eq!(kills, vec![1]);
        assert_eq!(world.player.core.hp, 100.0);
    }

    #[test]
    fn test_hp_bounds_hold_through_a_brawl() {
        let tuning = Tuning::default();
        let mut world = World::for_level(4, None, &tuning, &mut Pcg32::seed_from_u64(11));
        let inputs = [
            TickInput { left: true, ..Default::default() },
            TickInput { right: true, up: true, ..Default::default() },
            TickInput::default(),
        ];
        for i in 0..1500 {
            step_world(&mut world, &inputs[i % inputs.len()], SIM_DT, &AabbOverlap, &tuning);
            let p = &world.player.core;
            assert!(p.hp >= 0.0 && p.hp <= p.max_hp);
            for e in &world.enemies {
                assert!(e.core.hp > 0.0 && e.core.hp <= e.core.max_hp);
            }
        }
    }

    #[test]
    fn test_determinism() {
        let tuning = Tuning::default();
        let mut a = World::for_level(2, None, &tuning, &mut Pcg32::seed_from_u64(42));
        let mut b = World::for_level(2, None, &tuning, &mut Pcg32::seed_from_u64(42));
        let input = TickInput { right: true, ..Default::default() };
        for _ in 0..300 {
            step_world(&mut a, &input, SIM_DT, &AabbOverlap, &tuning);
            step_world(&mut b, &input, SIM_DT, &AabbOverlap, &tuning);
        }
        assert_eq!(a.player.core.pos, b.player.core.pos);
        assert_eq!(a.player.core.hp, b.player.core.hp);
        assert_eq!(a.enemies.len(), b.enemies.len());
        assert_eq!(a.projectiles.len(), b.projectiles.len());
    }
}
