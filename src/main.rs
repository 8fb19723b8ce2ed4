use bevy::diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin};
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};
use mazewalk::debug::DebugDumpPlugin;
use mazewalk::game::{CoreFrame, MazeGame, MazeGamePlugin};
use mazewalk::maze::loader as maze_loader;
use mazewalk::scene::SceneLayout;
use mazewalk::settings::loader as settings_loader;
use mazewalk::ui::{
    render_wall_grid, show_outcome_banner, spawn_debug_overlay, spawn_health_bar,
    sync_health_bar, toggle_debug_views, update_debug_overlay, DebugGridVisible,
    DebugOverlayState, DebugOverlayTimer,
};

mod app;
use app::{log_window_resize, setup, sync_vsync_settings};

fn main() {
    let settings = settings_loader::load_settings_from_dir(settings_loader::SETTINGS_DIR);
    let settings_watcher = settings_loader::setup_settings_watcher(settings_loader::SETTINGS_DIR)
        .unwrap_or_else(|_| settings_loader::SettingsWatcher::stub());

    let mazes = maze_loader::load_mazes_from_dir("data/mazes");
    let (grid, start) = maze_loader::select_maze(&mazes, &settings.gameplay.maze);
    let layout = SceneLayout::build(grid, start);
    let game = MazeGame::new(layout, &settings.gameplay);

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "mazewalk".into(),
                position: WindowPosition::Centered(MonitorSelection::Primary),
                present_mode: if settings.graphics.vsync { PresentMode::Fifo } else { PresentMode::AutoNoVsync },
                ..default()
            }),
            ..default()
        }))
        .add_plugins(FrameTimeDiagnosticsPlugin)
        .add_plugins(MazeGamePlugin)
        .add_plugins(DebugDumpPlugin);

    if settings.debug.log_diagnostics {
        app.add_plugins(LogDiagnosticsPlugin::default());
    }

    app.insert_resource(DebugOverlayState::default());
    app.insert_resource(DebugOverlayTimer::default());
    app.insert_resource(DebugGridVisible::default());
    app.insert_resource(game);
    app.insert_resource(settings);
    app.insert_resource(settings_watcher);

    app.add_systems(Startup, setup);
    app.add_systems(Startup, spawn_health_bar);
    app.add_systems(Startup, spawn_debug_overlay);

    app.add_systems(PreUpdate, settings_loader::check_settings_changes);
    app.add_systems(
        Update,
        (sync_health_bar, show_outcome_banner, toggle_debug_views, update_debug_overlay, render_wall_grid)
            .after(CoreFrame),
    );
    app.add_systems(Update, sync_vsync_settings);
    app.add_systems(Update, log_window_resize);

    app.run();
}
