//! Axis-aligned overlap testing and world geometry
//!
//! The resolver never tests overlaps itself; it asks an [`OverlapProvider`].
//! [`AabbOverlap`] is the brute-force provider used by default.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};

/// Axis-aligned bounding box anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict intersection: touching edges do not overlap
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }

    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.min.x && p.x <= max.x && p.y >= self.min.y && p.y <= max.y
    }
}

/// Static arena description supplied by the level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelGeometry {
    /// World bounds; actors are clamped inside, projectiles die outside
    pub bounds: Aabb,
    /// One-way platforms: landed on from above, passed through from below
    #[serde(default)]
    pub platforms: Vec<Aabb>,
}

impl Default for LevelGeometry {
    fn default() -> Self {
        Self {
            bounds: Aabb::new(Vec2::ZERO, Vec2::new(WORLD_WIDTH, WORLD_HEIGHT)),
            platforms: Vec::new(),
        }
    }
}

/// Overlap queries the interaction resolver depends on
pub trait OverlapProvider {
    /// Every `(i, j)` with `a[i]` overlapping `b[j]`, ordered by `i` then `j`
    fn overlapping_pairs(&self, a: &[Aabb], b: &[Aabb]) -> Vec<(usize, usize)>;

    /// Indices of the points that lie outside `bounds`
    fn left_bounds(&self, points: &[Vec2], bounds: &Aabb) -> Vec<usize>;
}

/// Brute-force O(n·m) AABB provider
#[derive(Debug, Clone, Copy, Default)]
pub struct AabbOverlap;

impl OverlapProvider for AabbOverlap {
    fn overlapping_pairs(&self, a: &[Aabb], b: &[Aabb]) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, box_a) in a.iter().enumerate() {
            for (j, box_b) in b.iter().enumerate() {
                if box_a.intersects(box_b) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    fn left_bounds(&self, points: &[Vec2], bounds: &Aabb) -> Vec<usize> {
        points
            .iter()
            .enumerate()
            .filter(|(_, p)| !bounds.contains_point(**p))
            .map(|(i, _)| i)
            .collect()
    }
}
