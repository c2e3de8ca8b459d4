//! Projectiles and the single faction-tagged pool they live in

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::Faction;
use super::collision::Aabb;

/// A short-lived shot travelling in a fixed direction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub faction: Faction,
    pub damage: f32,
}

impl Projectile {
    /// Build an unregistered projectile; the pool assigns the id
    pub fn new(pos: Vec2, vel: Vec2, size: Vec2, faction: Faction, damage: f32) -> Self {
        debug_assert!(damage > 0.0, "projectiles must carry positive damage");
        Self {
            id: 0,
            pos,
            vel,
            size,
            faction,
            damage,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Point used for world-bound exit checks
    pub fn anchor(&self) -> Vec2 {
        self.pos
    }

    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }
}

/// Arena of live projectiles, kept sorted by id for stable iteration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectilePool {
    items: Vec<Projectile>,
    next_id: u32,
}

impl ProjectilePool {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    /// Register a projectile; returns its id. Zero-damage shots are dropped.
    pub fn spawn(&mut self, mut projectile: Projectile) -> Option<u32> {
        if projectile.damage <= 0.0 {
            return None;
        }
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        projectile.id = id;
        self.items.push(projectile);
        Some(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.items.iter()
    }

    pub fn get(&self, id: u32) -> Option<&Projectile> {
        self.items.iter().find(|p| p.id == id)
    }

    /// Projectiles fired by one faction
    pub fn by_faction(&self, faction: Faction) -> impl Iterator<Item = &Projectile> {
        self.items.iter().filter(move |p| p.faction == faction)
    }

    /// Move every projectile along its velocity
    pub fn advance(&mut self, dt: f32) {
        for projectile in &mut self.items {
            projectile.advance(dt);
        }
    }

    /// Destroy the listed projectiles
    pub fn remove_ids(&mut self, ids: &[u32]) {
        if ids.is_empty() {
            return;
        }
        self.items.retain(|p| !ids.contains(&p.id));
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
