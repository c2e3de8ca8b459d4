//! Actors: the shared body/health core plus the Player and Enemy variants

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, LevelGeometry};
use super::tick::TickInput;
use crate::tuning::Tuning;

/// Which side fired a projectile / which side an actor fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Enemy,
}

/// Horizontal patrol direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum XDirection {
    Left,
    Right,
}

impl XDirection {
    pub fn flipped(self) -> Self {
        match self {
            XDirection::Left => XDirection::Right,
            XDirection::Right => XDirection::Left,
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            XDirection::Left => -1.0,
            XDirection::Right => 1.0,
        }
    }

    pub fn from_sign(dx: f32) -> Self {
        if dx < 0.0 { XDirection::Left } else { XDirection::Right }
    }
}

/// What happened to an actor during one integration step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveReport {
    pub hit_left: bool,
    pub hit_right: bool,
    pub grounded: bool,
}

/// Clamp `hp` into `[0, max_hp]`; a non-positive `max_hp` pins it at zero
#[inline]
pub fn clamp_hp(hp: f32, max_hp: f32) -> f32 {
    hp.min(max_hp).max(0.0)
}

/// State shared by every actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorCore {
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub hp: f32,
    pub max_hp: f32,
    /// Shots per second
    pub fire_rate: f32,
    /// Simulation time (ms) of the next allowed shot; `None` until the first shot
    pub next_shot_ready_at: Option<f64>,
    pub facing_right: bool,
    /// Resting on the floor or a platform after the last integration step
    pub grounded: bool,
}

impl ActorCore {
    pub fn new(pos: Vec2, size: Vec2, max_hp: f32, fire_rate: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            hp: max_hp,
            max_hp,
            fire_rate,
            next_shot_ready_at: None,
            facing_right: true,
            grounded: false,
        }
    }

    #[inline]
    pub fn alive(&self) -> bool {
        self.hp > 0.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Projectile spawn point: actor x, vertically centered on the box
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y + self.size.y / 2.0)
    }

    /// Subtract `amount` and clamp into `[0, max_hp]`
    pub fn apply_damage(&mut self, amount: f32) {
        self.hp = clamp_hp(self.hp - amount, self.max_hp);
    }

    /// Add `amount` and clamp into `[0, max_hp]`
    pub fn heal(&mut self, amount: f32) {
        self.hp = clamp_hp(self.hp + amount, self.max_hp);
    }

    /// Gravity, velocity integration, one-way platform landing and bound clamping
    pub fn integrate(&mut self, dt: f32, gravity: f32, geometry: &LevelGeometry) -> MoveReport {
        let mut report = MoveReport::default();
        let prev_bottom = self.pos.y + self.size.y;

        self.vel.y += gravity * dt;
        self.pos += self.vel * dt;

        // Platforms only catch actors falling onto their top face
        if self.vel.y >= 0.0 {
            let bottom = self.pos.y + self.size.y;
            for platform in &geometry.platforms {
                let top = platform.min.y;
                let overlaps_x =
                    self.pos.x < platform.max().x && self.pos.x + self.size.x > platform.min.x;
                if overlaps_x && prev_bottom <= top && bottom >= top {
                    self.pos.y = top - self.size.y;
                    self.vel.y = 0.0;
                    report.grounded = true;
                    break;
                }
            }
        }

        let min = geometry.bounds.min;
        let max = geometry.bounds.max();
        if self.pos.x <= min.x {
            self.pos.x = min.x;
            report.hit_left = true;
        } else if self.pos.x + self.size.x >= max.x {
            self.pos.x = max.x - self.size.x;
            report.hit_right = true;
        }
        if self.pos.y + self.size.y >= max.y {
            self.pos.y = max.y - self.size.y;
            self.vel.y = 0.0;
            report.grounded = true;
        } else if self.pos.y < min.y {
            self.pos.y = min.y;
            self.vel.y = 0.0;
        }

        self.grounded = report.grounded;
        report
    }
}

/// Capabilities the firing and damage code needs from either actor variant
pub trait Combatant {
    fn core(&self) -> &ActorCore;
    fn core_mut(&mut self) -> &mut ActorCore;
    fn faction(&self) -> Faction;

    fn alive(&self) -> bool {
        self.core().alive()
    }

    fn take_damage(&mut self, amount: f32) {
        self.core_mut().apply_damage(amount);
    }
}

/// Player stats carried from a cleared level into the next one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerCarryState {
    pub hp: f32,
    pub max_hp: f32,
    pub fire_rate: f32,
    pub bullet_damage: f32,
}

/// The player-controlled actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub core: ActorCore,
    /// Set by a knockback push; horizontal input is ignored for one tick
    pub push_cooldown_active: bool,
    pub bullet_damage: f32,
}

impl Player {
    /// Fresh player with base stats
    pub fn new(tuning: &Tuning, spawn: Vec2) -> Self {
        let size = Vec2::new(tuning.actor_size.0, tuning.actor_size.1);
        Self {
            core: ActorCore::new(spawn, size, tuning.player.max_hp, tuning.player.fire_rate),
            push_cooldown_active: false,
            bullet_damage: tuning.player.bullet_damage,
        }
    }

    /// Player for a follow-up level; `None` means base stats
    pub fn from_carry(carry: Option<PlayerCarryState>, tuning: &Tuning, spawn: Vec2) -> Self {
        let mut player = Self::new(tuning, spawn);
        if let Some(carry) = carry {
            player.core.max_hp = carry.max_hp;
            player.core.hp = clamp_hp(carry.hp, carry.max_hp);
            player.core.fire_rate = carry.fire_rate;
            player.bullet_damage = carry.bullet_damage;
        }
        player
    }

    pub fn carry_state(&self) -> PlayerCarryState {
        PlayerCarryState {
            hp: clamp_hp(self.core.hp, self.core.max_hp),
            max_hp: self.core.max_hp,
            fire_rate: self.core.fire_rate,
            bullet_damage: self.bullet_damage,
        }
    }

    /// Map the directional snapshot onto velocity
    pub fn apply_input(&mut self, input: &TickInput, tuning: &Tuning) {
        if input.up && self.core.grounded {
            self.core.vel.y = tuning.player.jump_impulse;
            self.core.grounded = false;
        }

        if self.push_cooldown_active {
            // Knockback velocity stands for this tick
            self.push_cooldown_active = false;
            return;
        }

        let walk = tuning.player.walk_speed;
        self.core.vel.x = if input.left {
            self.core.facing_right = false;
            -walk
        } else if input.right {
            self.core.facing_right = true;
            walk
        } else {
            0.0
        };
    }

    /// Knockback: overwrite horizontal velocity and suppress input for a tick
    pub fn push(&mut self, vel_x: f32) {
        self.core.vel.x = vel_x;
        self.push_cooldown_active = true;
    }
}

impl Combatant for Player {
    fn core(&self) -> &ActorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ActorCore {
        &mut self.core
    }

    fn faction(&self) -> Faction {
        Faction::Player
    }
}

/// Enemy behaviour state, re-evaluated every tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AiState {
    Patrolling,
    /// Chasing the player last seen at `target_x`
    Pursuing { target_x: f32 },
}

/// An AI-controlled actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub core: ActorCore,
    pub x_direction: XDirection,
    pub ai: AiState,
}

impl Enemy {
    pub fn new(id: u32, tuning: &Tuning, spawn: Vec2, x_direction: XDirection) -> Self {
        let size = Vec2::new(tuning.actor_size.0, tuning.actor_size.1);
        let mut core = ActorCore::new(spawn, size, tuning.enemy.max_hp, tuning.enemy.fire_rate);
        core.facing_right = x_direction == XDirection::Right;
        Self {
            id,
            core,
            x_direction,
            ai: AiState::Patrolling,
        }
    }
}

impl Combatant for Enemy {
    fn core(&self) -> &ActorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ActorCore {
        &mut self.core
    }

    fn faction(&self) -> Faction {
        Faction::Enemy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use proptest::prelude::*;

    fn player() -> Player {
        Player::new(&Tuning::default(), Vec2::new(100.0, 588.0))
    }

    #[test]
    fn test_damage_and_heal_clamp() {
        let mut p = player();
        p.take_damage(250.0);
        assert_eq!(p.core.hp, 0.0);
        assert!(!p.alive());
        p.core.heal(500.0);
        assert_eq!(p.core.hp, p.core.max_hp);
    }

    #[test]
    fn test_walk_and_release() {
        let tuning = Tuning::default();
        let mut p = player();
        p.apply_input(&TickInput { left: true, ..Default::default() }, &tuning);
        assert_eq!(p.core.vel.x, -200.0);
        assert!(!p.core.facing_right);
        p.apply_input(&TickInput { right: true, ..Default::default() }, &tuning);
        assert_eq!(p.core.vel.x, 200.0);
        p.apply_input(&TickInput::default(), &tuning);
        assert_eq!(p.core.vel.x, 0.0);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let tuning = Tuning::default();
        let geometry = LevelGeometry::default();
        let mut p = player();
        p.core.integrate(SIM_DT, tuning.gravity, &geometry);
        assert!(p.core.grounded);

        let up = TickInput { up: true, ..Default::default() };
        p.apply_input(&up, &tuning);
        assert_eq!(p.core.vel.y, -500.0);
        p.core.integrate(SIM_DT, tuning.gravity, &geometry);
        assert!(!p.core.grounded);

        // Holding up mid-air does not re-trigger the impulse
        let vy = p.core.vel.y;
        p.apply_input(&up, &tuning);
        assert_eq!(p.core.vel.y, vy);
    }

    #[test]
    fn test_push_overrides_input_for_one_tick() {
        let tuning = Tuning::default();
        let mut p = player();
        p.push(-3000.0);
        p.apply_input(&TickInput { right: true, ..Default::default() }, &tuning);
        assert_eq!(p.core.vel.x, -3000.0);
        assert!(!p.push_cooldown_active);
        p.apply_input(&TickInput { right: true, ..Default::default() }, &tuning);
        assert_eq!(p.core.vel.x, 200.0);
    }

    #[test]
    fn test_clamped_at_walls() {
        let geometry = LevelGeometry::default();
        let mut p = player();
        p.core.vel.x = -3000.0;
        let report = p.core.integrate(0.1, 0.0, &geometry);
        assert!(report.hit_left);
        assert_eq!(p.core.pos.x, 0.0);

        p.core.vel.x = 30000.0;
        let report = p.core.integrate(0.1, 0.0, &geometry);
        assert!(report.hit_right);
        assert_eq!(p.core.pos.x, 780.0);
    }

    #[test]
    fn test_lands_on_platform_from_above_only() {
        let mut geometry = LevelGeometry::default();
        geometry
            .platforms
            .push(Aabb::new(Vec2::new(0.0, 400.0), Vec2::new(200.0, 16.0)));

        // Falling onto the platform
        let mut core = ActorCore::new(Vec2::new(50.0, 375.0), Vec2::splat(20.0), 10.0, 1.0);
        core.vel.y = 300.0;
        let report = core.integrate(SIM_DT, 1000.0, &geometry);
        assert!(report.grounded);
        assert_eq!(core.pos.y, 380.0);

        // Jumping up through it
        let mut core = ActorCore::new(Vec2::new(50.0, 420.0), Vec2::splat(20.0), 10.0, 1.0);
        core.vel.y = -500.0;
        let report = core.integrate(SIM_DT, 1000.0, &geometry);
        assert!(!report.grounded);
        assert!(core.pos.y < 420.0);
    }

    #[test]
    fn test_carry_round_trip() {
        let tuning = Tuning::default();
        let mut p = player();
        p.core.hp = 42.0;
        p.core.max_hp = 125.0;
        p.core.fire_rate = 7.0;
        p.bullet_damage = 14.0;
        let carry = p.carry_state();
        let next = Player::from_carry(Some(carry), &tuning, Vec2::ZERO);
        assert_eq!(next.carry_state(), carry);

        let fresh = Player::from_carry(None, &tuning, Vec2::ZERO);
        assert_eq!(fresh.core.hp, 100.0);
        assert_eq!(fresh.bullet_damage, 10.0);
    }

    #[test]
    fn test_negative_max_hp_pins_hp_at_zero() {
        let tuning = Tuning::default();
        let carry = PlayerCarryState {
            hp: 30.0,
            max_hp: -10.0,
            fire_rate: 5.0,
            bullet_damage: 10.0,
        };
        let mut p = Player::from_carry(Some(carry), &tuning, Vec2::ZERO);
        assert_eq!(p.core.hp, 0.0);
        assert_eq!(p.carry_state().hp, 0.0);
        p.core.heal(50.0);
        assert_eq!(p.core.hp, 0.0);
        assert!(!p.alive());
    }

    proptest! {
        #[test]
        fn prop_hp_stays_in_range(hits in prop::collection::vec(-60.0f32..120.0, 0..40)) {
            let mut p = player();
            for amount in hits {
                if amount >= 0.0 {
                    p.take_damage(amount);
                } else {
                    p.core.heal(-amount);
                }
                prop_assert!(p.core.hp >= 0.0 && p.core.hp <= p.core.max_hp);
            }
        }
    }
}
