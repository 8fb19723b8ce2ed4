//! Maze definitions loaded from RON files.
//!
//! Each file under `data/mazes/` holds one `MazeDefinition`:
//!
//! ```ron
//! (
//!     name: "tiny",
//!     cell_size: 2.0,
//!     start: (row: 1, col: 1),
//!     rows: [
//!         [1, 1, 1],
//!         [1, 0, 1],
//!         [1, 9, 1],
//!     ],
//! )
//! ```
//!
//! Unlike settings, mazes are not hot-reloaded: walls are fixed for the
//! whole session once the scene is built.
use super::{GridCoord, MazeGrid, CLASSIC_LAYOUT, DEFAULT_CELL_SIZE};
use crate::ron_loader::load_ron_files;
use bevy::prelude::{info, warn};
use serde::{Deserialize, Serialize};

/// Name under which the built-in layout is always available.
pub const CLASSIC_MAZE_NAME: &str = "classic";

/// Serialized form of a maze.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MazeDefinition {
    pub name: String,
    #[serde(default = "MazeDefinition::default_cell_size")]
    pub cell_size: f32,
    #[serde(default = "MazeDefinition::default_start")]
    pub start: GridCoord,
    pub rows: Vec<Vec<u8>>,
}

impl MazeDefinition {
    fn default_cell_size() -> f32 { DEFAULT_CELL_SIZE }
    fn default_start() -> GridCoord { GridCoord::new(1, 1) }

    /// The built-in layout as a definition.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            name: CLASSIC_MAZE_NAME.to_string(),
            cell_size: DEFAULT_CELL_SIZE,
            start: Self::default_start(),
            rows: CLASSIC_LAYOUT.iter().map(|r| r.to_vec()).collect(),
        }
    }

    /// Validate and convert into a grid plus the player start cell.
    ///
    /// # Errors
    /// Fails when the rows do not form a valid grid or `start` lies outside it.
    pub fn build(&self) -> Result<(MazeGrid, GridCoord), Box<dyn std::error::Error>> {
        let grid = MazeGrid::from_codes(&self.rows, self.cell_size)
            .map_err(|e| format!("maze '{}': {e}", self.name))?;
        if !grid.contains(self.start) {
            return Err(format!(
                "maze '{}': start ({}, {}) outside {}x{} grid",
                self.name, self.start.row, self.start.col, grid.rows(), grid.cols()
            )
            .into());
        }
        Ok((grid, self.start))
    }
}

/// Load every maze definition from `path`.
#[must_use]
pub fn load_mazes_from_dir(path: &str) -> Vec<MazeDefinition> {
    load_ron_files(path)
}

/// Choose the maze called `name` from `definitions`.
///
/// Falls back to the built-in layout when no definition has that name or
/// the chosen one is invalid; both cases are logged.
#[must_use]
pub fn select_maze(definitions: &[MazeDefinition], name: &str) -> (MazeGrid, GridCoord) {
    let classic = || {
        let start = MazeDefinition::default_start();
        (MazeGrid::classic(), start)
    };

    let Some(def) = definitions.iter().find(|d| d.name == name) else {
        if name != CLASSIC_MAZE_NAME {
            warn!("maze '{name}' not found, using the built-in layout");
        }
        return classic();
    };

    match def.build() {
        Ok(built) => {
            info!("loaded maze '{}' ({}x{})", def.name, built.0.rows(), built.0.cols());
            built
        }
        Err(e) => {
            warn!("{e}; using the built-in layout");
            classic()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ron_loader::parse_ron;

    const TINY: &str = r#"(
        name: "tiny",
        start: (row: 1, col: 1),
        rows: [
            [1, 1, 1],
            [1, 0, 1],
            [1, 9, 1],
        ],
    )"#;

    #[test]
    fn parses_definition_with_defaults() {
        let def: MazeDefinition = parse_ron(TINY).unwrap();
        assert_eq!(def.name, "tiny");
        assert!((def.cell_size - DEFAULT_CELL_SIZE).abs() < f32::EPSILON);
        let (grid, start) = def.build().unwrap();
        assert_eq!(start, GridCoord::new(1, 1));
        assert_eq!(grid.exit_cell(), Some(GridCoord::new(2, 1)));
    }

    #[test]
    fn classic_definition_matches_builtin() {
        let (grid, start) = MazeDefinition::classic().build().unwrap();
        assert_eq!(grid, MazeGrid::classic());
        assert_eq!(start, GridCoord::new(1, 1));
    }

    #[test]
    fn start_outside_grid_is_rejected() {
        let mut def: MazeDefinition = parse_ron(TINY).unwrap();
        def.start = GridCoord::new(5, 0);
        assert!(def.build().is_err());
    }

    #[test]
    fn select_falls_back_to_classic() {
        let def: MazeDefinition = parse_ron(TINY).unwrap();
        let defs = vec![def];
        let (grid, _) = select_maze(&defs, "missing");
        assert_eq!(grid, MazeGrid::classic());

        let (grid, _) = select_maze(&defs, "tiny");
        assert_eq!(grid.rows(), 3);
    }

    #[test]
    fn invalid_definition_falls_back() {
        let mut def: MazeDefinition = parse_ron(TINY).unwrap();
        def.rows[1].push(0);
        let (grid, _) = select_maze(&[def], "tiny");
        assert_eq!(grid, MazeGrid::classic());
    }
}
