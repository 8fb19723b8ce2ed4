//! Debug dump (F3 by default): writes a snapshot of the game state, frame
//! diagnostics and active settings to a timestamped text file under the
//! configured dump directory (`debug-dumps/` unless overridden).
use crate::game::MazeGame;
use crate::settings::Settings;
use bevy::diagnostic::{Diagnostic, DiagnosticPath, DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use chrono::{DateTime, Utc};
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

pub struct DebugDumpPlugin;

impl Plugin for DebugDumpPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, debug_dump_system);
    }
}

/// Frame statistics included in a dump.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameStats {
    pub fps: f64,
    pub frame_time_ms: f64,
    pub entities: usize,
}

/// Render the dump text for `game` at `now`.
#[must_use]
pub fn dump_text(game: &MazeGame, settings: &Settings, stats: FrameStats, now: DateTime<Utc>) -> String {
    let layout = game.layout();
    let mut out = String::new();
    writeln!(out, "Debug dump: {}", now.format("%Y-%m-%d %H:%M:%S")).ok();
    writeln!(out, "FPS: {:.1}, frame_time: {:.2} ms", stats.fps, stats.frame_time_ms).ok();
    writeln!(out, "Entities: {}", stats.entities).ok();
    writeln!(out, "Frames simulated: {}", game.frames()).ok();
    writeln!(out, "Outcome: {:?}", game.outcome()).ok();
    writeln!(out, "Health: {} / {}", game.health.current(), game.health.max()).ok();
    writeln!(out, "Player: ({:.3}, {:.3}, {:.3})", game.player.x, game.player.y, game.player.z).ok();
    writeln!(
        out,
        "Maze: {}x{} cells, cell size {}, {} walls",
        layout.grid.rows(),
        layout.grid.cols(),
        layout.cell_size(),
        layout.walls.len()
    )
    .ok();
    match layout.exit {
        Some(exit) => writeln!(
            out,
            "Exit: cell ({}, {}), rotation {:.3} rad, distance {:.3}",
            exit.cell.row,
            exit.cell.col,
            exit.rotation,
            game.player.distance(exit.center)
        )
        .ok(),
        None => writeln!(out, "Exit: none").ok(),
    };

    writeln!(out, "\nSettings:").ok();
    match ron::ser::to_string_pretty(settings, ron::ser::PrettyConfig::default()) {
        Ok(s) => out.push_str(&s),
        Err(e) => {
            writeln!(out, "  (failed to serialize: {e})").ok();
        }
    }
    out.push('\n');
    out
}

/// Write `text` into `dir`, naming the file after `now`. Returns the file path.
///
/// # Errors
/// Fails when the directory cannot be created or the file cannot be written.
pub fn write_dump(dir: &Path, now: DateTime<Utc>, text: &str) -> std::io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("debug-{}.txt", now.format("%Y%m%d-%H%M%S%.3f")));
    fs::write(&path, text)?;
    Ok(path)
}

#[allow(clippy::needless_pass_by_value)]
fn debug_dump_system(
    keys: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
    game: Res<MazeGame>,
    diagnostics: Res<DiagnosticsStore>,
    entities: Query<Entity>,
) {
    if !keys.just_pressed(settings.controls.key_or("dump_debug", KeyCode::F3)) {
        return;
    }

    let smoothed = |path: &DiagnosticPath| diagnostics.get(path).and_then(Diagnostic::smoothed).unwrap_or(0.0);
    let stats = FrameStats {
        fps: smoothed(&FrameTimeDiagnosticsPlugin::FPS),
        frame_time_ms: smoothed(&FrameTimeDiagnosticsPlugin::FRAME_TIME),
        entities: entities.iter().count(),
    };

    let now = Utc::now();
    let text = dump_text(&game, &settings, stats, now);
    match write_dump(Path::new(&settings.debug.dump_dir), now, &text) {
        Ok(path) => info!("wrote debug dump: {}", path.display()),
        Err(e) => error!("debug dump: failed to write into '{}': {e}", settings.debug.dump_dir),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{GridCoord, MazeGrid};
    use crate::scene::SceneLayout;

    fn game() -> MazeGame {
        let layout = SceneLayout::build(MazeGrid::classic(), GridCoord::new(1, 1));
        MazeGame::new(layout, &Settings::default().gameplay)
    }

    #[test]
    fn dump_lists_core_state() {
        let now = DateTime::parse_from_rfc3339("2024-05-01T12:30:00Z").unwrap().with_timezone(&Utc);
        let text = dump_text(&game(), &Settings::default(), FrameStats::default(), now);
        assert!(text.starts_with("Debug dump: 2024-05-01 12:30:00"));
        assert!(text.contains("Health: 100 / 100"));
        assert!(text.contains("Maze: 15x15 cells"));
        assert!(text.contains("Exit: cell (13, 13)"));
        assert!(text.contains("gameplay"));
    }

    #[test]
    fn dump_file_is_written() {
        let dir = std::env::temp_dir().join(format!("mazewalk_dump_{}", std::process::id()));
        let now = Utc::now();
        let path = write_dump(&dir, now, "hello").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
        let _ = fs::remove_dir_all(&dir);
    }
}
