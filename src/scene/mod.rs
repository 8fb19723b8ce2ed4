//! Scene layout: wall volumes, exit marker and player start built from a grid.
//!
//! `SceneLayout::build` is pure and runs once at startup. The Bevy startup
//! system spawns meshes from the resulting layout but never changes it: wall
//! volumes are fixed for the session and only the exit marker's rotation is
//! animated.
use crate::maze::{CellKind, GridCoord, MazeGrid};
use bevy::prelude::*;

/// Height of a wall box in world units.
pub const WALL_HEIGHT: f32 = 2.0;
/// Height of the exit marker box.
pub const EXIT_HEIGHT: f32 = 1.0;
/// Exit footprint relative to the cell size.
pub const EXIT_FOOTPRINT: f32 = 0.8;
/// Player centre height (a unit cube resting on the ground).
pub const PLAYER_HEIGHT: f32 = 0.5;

/// Immutable axis-aligned wall box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallVolume {
    pub cell: GridCoord,
    pub center: Vec3,
    /// Half of the cell size; applies to both horizontal axes.
    pub half_extent: f32,
}

/// The goal marker. Only `rotation` ever changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExitMarker {
    pub cell: GridCoord,
    pub center: Vec3,
    pub half_extent: f32,
    /// Accumulated spin around the vertical axis, in radians.
    pub rotation: f32,
}

/// Everything the game core needs to know about the static scene.
#[derive(Debug, Clone)]
pub struct SceneLayout {
    pub grid: MazeGrid,
    pub walls: Vec<WallVolume>,
    pub exit: Option<ExitMarker>,
    pub player_start: Vec3,
}

impl SceneLayout {
    /// Instantiate wall volumes and the exit marker from `grid` and map the
    /// start cell to a world position.
    ///
    /// Open cells produce nothing. With several exit cells the last one in
    /// row-major order is used.
    #[must_use]
    pub fn build(grid: MazeGrid, start: GridCoord) -> Self {
        let cell = grid.cell_size();
        let mut walls = Vec::new();
        let mut exit = None;
        let mut exit_count = 0usize;

        for (coord, kind) in grid.iter() {
            match kind {
                CellKind::Wall => walls.push(WallVolume {
                    cell: coord,
                    center: grid.grid_to_world(coord, WALL_HEIGHT / 2.0),
                    half_extent: cell / 2.0,
                }),
                CellKind::Exit => {
                    exit_count += 1;
                    exit = Some(ExitMarker {
                        cell: coord,
                        center: grid.grid_to_world(coord, EXIT_HEIGHT / 2.0),
                        half_extent: cell * EXIT_FOOTPRINT / 2.0,
                        rotation: 0.0,
                    });
                }
                CellKind::Open => {}
            }
        }

        if exit_count > 1 {
            warn!("maze has {exit_count} exit cells; only the last one is used");
        }

        let player_start = grid.grid_to_world(start, PLAYER_HEIGHT);
        Self { grid, walls, exit, player_start }
    }

    #[must_use]
    pub fn cell_size(&self) -> f32 {
        self.grid.cell_size()
    }

    /// Horizontal size of the whole maze `(width_x, depth_z)`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn footprint(&self) -> Vec2 {
        Vec2::new(self.grid.cols() as f32, self.grid.rows() as f32) * self.cell_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_scene_counts() {
        let grid = MazeGrid::classic();
        let wall_cells = grid.iter().filter(|(_, k)| *k == CellKind::Wall).count();
        let layout = SceneLayout::build(grid, GridCoord::new(1, 1));
        assert_eq!(layout.walls.len(), wall_cells);
        assert!(layout.walls.iter().all(|w| (w.half_extent - 1.0).abs() < f32::EPSILON));
        assert!(layout.walls.iter().all(|w| (w.center.y - 1.0).abs() < f32::EPSILON));
        assert_eq!(layout.player_start, Vec3::new(-12.0, 0.5, -12.0));
    }

    #[test]
    fn exit_uses_shared_mapping() {
        let grid = MazeGrid::classic();
        let exit_cell = grid.exit_cell().unwrap();
        let expected = grid.grid_to_world(exit_cell, EXIT_HEIGHT / 2.0);
        let layout = SceneLayout::build(grid, GridCoord::new(1, 1));
        let exit = layout.exit.unwrap();
        assert_eq!(exit.center, expected);
        assert_eq!(exit.center, Vec3::new(12.0, 0.5, 12.0));
        assert!((exit.half_extent - 0.8).abs() < 1e-6);
    }

    #[test]
    fn no_exit_cell_leaves_marker_absent() {
        let grid = MazeGrid::from_codes(&[vec![1, 1, 1], vec![1, 0, 1], vec![1, 1, 1]], 2.0).unwrap();
        let layout = SceneLayout::build(grid, GridCoord::new(1, 1));
        assert!(layout.exit.is_none());
        assert_eq!(layout.walls.len(), 8);
    }

    #[test]
    fn last_exit_wins() {
        let grid = MazeGrid::from_codes(&[vec![9, 0, 9]], 2.0).unwrap();
        let layout = SceneLayout::build(grid, GridCoord::new(0, 1));
        assert_eq!(layout.exit.unwrap().cell, GridCoord::new(0, 2));
    }
}
