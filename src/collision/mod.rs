//! Horizontal-plane AABB collision between the player and wall volumes.
//!
//! Walls and player are boxes aligned to the world axes; only x and z are
//! compared since the maze is flat. Two checkers share one contract:
//!
//! - `&[WallVolume]`: brute force over every wall.
//! - `WallIndex`: looks only at the grid cells a candidate can reach.
//!
//! Both return identical answers for every candidate position.
use crate::maze::{axis_to_world, GridCoord};
use crate::scene::{SceneLayout, WallVolume};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Answers "does a player box of `player_half` at `candidate` overlap a wall?".
pub trait CollisionQuery {
    fn is_colliding(&self, candidate: Vec3, player_half: f32) -> bool;
}

/// Overlap test between one wall and a player box centred at `candidate`.
#[inline]
#[must_use]
pub fn overlaps_wall(candidate: Vec3, player_half: f32, wall: &WallVolume) -> bool {
    let reach = player_half + wall.half_extent;
    (candidate.x - wall.center.x).abs() < reach && (candidate.z - wall.center.z).abs() < reach
}

impl CollisionQuery for [WallVolume] {
    fn is_colliding(&self, candidate: Vec3, player_half: f32) -> bool {
        self.iter().any(|w| overlaps_wall(candidate, player_half, w))
    }
}

impl CollisionQuery for Vec<WallVolume> {
    fn is_colliding(&self, candidate: Vec3, player_half: f32) -> bool {
        self.as_slice().is_colliding(candidate, player_half)
    }
}

/// Which checker the game uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionMode {
    #[default]
    BruteForce,
    Indexed,
}

/// Grid-indexed wall lookup.
///
/// Stores the wall (if any) of every cell and tests only cells whose wall
/// box could reach the candidate. Every wall shares the same half extent,
/// so the reachable cells form a small rectangle around the candidate.
#[derive(Debug, Clone)]
pub struct WallIndex {
    rows: usize,
    cols: usize,
    cell_size: f32,
    slots: Vec<Option<WallVolume>>,
}

impl WallIndex {
    #[must_use]
    pub fn from_layout(layout: &SceneLayout) -> Self {
        let rows = layout.grid.rows();
        let cols = layout.grid.cols();
        let mut slots = vec![None; rows * cols];
        for wall in &layout.walls {
            slots[wall.cell.row * cols + wall.cell.col] = Some(*wall);
        }
        Self { rows, cols, cell_size: layout.cell_size(), slots }
    }

    fn wall_at(&self, coord: GridCoord) -> Option<&WallVolume> {
        self.slots.get(coord.row * self.cols + coord.col).and_then(Option::as_ref)
    }

    /// Inclusive index range along one axis whose wall centres may lie
    /// within `reach` of `world`. Widened by one cell to absorb rounding;
    /// the exact test decides.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn axis_range(&self, world: f32, dimension: usize, reach: f32) -> Option<(usize, usize)> {
        if dimension == 0 || !world.is_finite() {
            return None;
        }
        let origin = axis_to_world(0, dimension, self.cell_size);
        let idx = (world - origin) / self.cell_size;
        let span = reach / self.cell_size;
        let lo = (idx - span).floor() - 1.0;
        let hi = (idx + span).ceil() + 1.0;
        let max = (dimension - 1) as f32;
        if hi < 0.0 || lo > max {
            return None;
        }
        Some((lo.max(0.0) as usize, hi.min(max) as usize))
    }
}

impl CollisionQuery for WallIndex {
    fn is_colliding(&self, candidate: Vec3, player_half: f32) -> bool {
        let reach = player_half + self.cell_size / 2.0;
        let Some((c0, c1)) = self.axis_range(candidate.x, self.cols, reach) else { return false };
        let Some((r0, r1)) = self.axis_range(candidate.z, self.rows, reach) else { return false };

        (r0..=r1).any(|row| {
            (c0..=c1).any(|col| {
                self.wall_at(GridCoord::new(row, col))
                    .is_some_and(|w| overlaps_wall(candidate, player_half, w))
            })
        })
    }
}

/// The checker chosen at startup.
#[derive(Debug, Clone)]
pub enum WallCollider {
    BruteForce(Vec<WallVolume>),
    Indexed(WallIndex),
}

impl WallCollider {
    #[must_use]
    pub fn new(layout: &SceneLayout, mode: CollisionMode) -> Self {
        match mode {
            CollisionMode::BruteForce => WallCollider::BruteForce(layout.walls.clone()),
            CollisionMode::Indexed => WallCollider::Indexed(WallIndex::from_layout(layout)),
        }
    }

    #[must_use]
    pub fn mode(&self) -> CollisionMode {
        match self {
            WallCollider::BruteForce(_) => CollisionMode::BruteForce,
            WallCollider::Indexed(_) => CollisionMode::Indexed,
        }
    }
}

impl CollisionQuery for WallCollider {
    fn is_colliding(&self, candidate: Vec3, player_half: f32) -> bool {
        match self {
            WallCollider::BruteForce(walls) => walls.is_colliding(candidate, player_half),
            WallCollider::Indexed(index) => index.is_colliding(candidate, player_half),
        }
    }
}
