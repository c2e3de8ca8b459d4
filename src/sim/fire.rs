//! Cooldown-gated firing

use glam::Vec2;

use super::actor::Combatant;
use super::projectile::Projectile;
use crate::tuning::Tuning;

/// Milliseconds between shots for a fire rate in shots per second
#[inline]
pub fn cooldown_ms(fire_rate: f32) -> f64 {
    1000.0 / f64::from(fire_rate.max(f32::EPSILON))
}

/// Whether `actor` may fire at simulation time `now_ms`
pub fn ready_to_fire<A: Combatant>(actor: &A, now_ms: f64) -> bool {
    match actor.core().next_shot_ready_at {
        None => true,
        Some(ready_at) => now_ms >= ready_at,
    }
}

/// Fire a horizontal shot toward `direction` (sign of x) if off cooldown.
///
/// On success the actor's cooldown is restarted and the projectile is returned
/// for the caller to register in the pool. On cooldown nothing changes.
pub fn try_fire<A: Combatant>(
    actor: &mut A,
    now_ms: f64,
    direction: f32,
    damage: f32,
    tuning: &Tuning,
) -> Option<Projectile> {
    if !actor.alive() || !ready_to_fire(actor, now_ms) {
        return None;
    }

    let faction = actor.faction();
    let core = actor.core_mut();
    core.next_shot_ready_at = Some(now_ms + cooldown_ms(core.fire_rate));

    let size = Vec2::new(tuning.projectile_size.0, tuning.projectile_size.1);
    let vel = Vec2::new(crate::horizontal_sign(direction) * tuning.projectile_speed, 0.0);
    Some(Projectile::new(core.muzzle(), vel, size, faction, damage))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::{Faction, Player};
    use proptest::prelude::*;

    fn player() -> Player {
        Player::new(&Tuning::default(), Vec2::new(100.0, 500.0))
    }

    #[test]
    fn test_first_shot_is_immediate() {
        let tuning = Tuning::default();
        let mut p = player();
        let shot = try_fire(&mut p, 0.0, 1.0, 10.0, &tuning).expect("first shot fires");
        assert_eq!(shot.faction, Faction::Player);
        assert_eq!(shot.pos, Vec2::new(100.0, 510.0));
        assert_eq!(shot.vel, Vec2::new(400.0, 0.0));
        assert_eq!(p.core.next_shot_ready_at, Some(200.0));
    }

    #[test]
    fn test_cooldown_blocks_then_releases() {
        let tuning = Tuning::default();
        let mut p = player();
        assert!(try_fire(&mut p, 1000.0, -1.0, 10.0, &tuning).is_some());
        assert!(try_fire(&mut p, 1199.0, -1.0, 10.0, &tuning).is_none());
        assert_eq!(p.core.next_shot_ready_at, Some(1200.0));
        let shot = try_fire(&mut p, 1200.0, -1.0, 10.0, &tuning).expect("cooldown elapsed");
        assert!(shot.vel.x < 0.0);
    }

    #[test]
    fn test_dead_actor_does_not_fire() {
        let tuning = Tuning::default();
        let mut p = player();
        p.core.hp = 0.0;
        assert!(try_fire(&mut p, 0.0, 1.0, 10.0, &tuning).is_none());
    }

    proptest! {
        #[test]
        fn prop_shots_respect_cooldown(
            fire_rate in 0.5f32..20.0,
            steps in prop::collection::vec(1.0f64..120.0, 1..200),
        ) {
            let tuning = Tuning::default();
            let mut p = player();
            p.core.fire_rate = fire_rate;
            let gap = cooldown_ms(fire_rate);
            let mut now = 0.0;
            let mut last: Option<f64> = None;
            for step in steps {
                now += step;
                if try_fire(&mut p, now, 1.0, 10.0, &tuning).is_some() {
                    if let Some(prev) = last {
                        // Tolerance for f64 rounding in prev + gap
                        prop_assert!(now - prev >= gap - 1e-6);
                    }
                    last = Some(now);
                }
            }
        }
    }
}
