//! User interface: health bar, end-of-game banner and debug helpers.
//!
//! The health bar is a fixed-width frame with a coloured fill whose width
//! tracks the health percentage. The banner covers the screen once the game
//! is over. F1 toggles a text overlay with frame and game statistics, F2 a
//! gizmo wireframe of every wall volume.

use crate::game::{GameOver, MazeGame};
use crate::settings::Settings;
use bevy::diagnostic::{Diagnostic, DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

/// Fill node of the health bar.
#[derive(Component)]
pub struct HealthBarFill;

/// Full-screen node shown when the game ends.
#[derive(Component)]
pub struct OutcomeBanner;

#[derive(Component)]
pub struct DebugOverlayText;

/// State for the debug overlay visibility.
#[derive(Resource, Default)]
pub struct DebugOverlayState {
    /// Whether the overlay is currently visible.
    pub visible: bool,
}

#[derive(Resource)]
pub struct DebugOverlayTimer(pub Timer);

impl Default for DebugOverlayTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(0.5, TimerMode::Repeating))
    }
}

#[derive(Resource, Default)]
pub struct DebugGridVisible(pub bool);

/// Spawn the health bar in the top-left corner.
pub fn spawn_health_bar(mut commands: Commands) {
    commands
        .spawn(NodeBundle {
            style: Style {
                position_type: PositionType::Absolute,
                left: Val::Px(20.0),
                top: Val::Px(20.0),
                width: Val::Px(200.0),
                height: Val::Px(20.0),
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            border_color: Color::WHITE.into(),
            background_color: Color::srgb(0.2, 0.2, 0.2).into(),
            ..default()
        })
        .with_children(|bar| {
            bar.spawn((
                NodeBundle {
                    style: Style {
                        width: Val::Percent(100.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    background_color: Color::srgb(0.0, 1.0, 0.0).into(),
                    ..default()
                },
                HealthBarFill,
            ));
        });
}

/// Resize and recolour the health bar fill when health changes.
///
/// Without a fill node the update is skipped; game logic does not depend
/// on the bar.
#[allow(clippy::needless_pass_by_value)]
pub fn sync_health_bar(
    game: Res<MazeGame>,
    mut fills: Query<(&mut Style, &mut BackgroundColor), With<HealthBarFill>>,
    mut last: Local<Option<i32>>,
) {
    let health = game.health.current();
    if *last == Some(health) {
        return;
    }
    let Ok((mut style, mut bg)) = fills.get_single_mut() else { return };

    let display = game.health.display();
    style.width = Val::Percent(display.percent);
    bg.0 = display.color();
    *last = Some(health);
}

/// Show the win/lose banner when the game ends.
#[allow(clippy::needless_pass_by_value)]
pub fn show_outcome_banner(mut commands: Commands, mut over: EventReader<GameOver>) {
    let Some(GameOver(outcome)) = over.read().last().copied() else { return };
    let Some(message) = outcome.message() else { return };

    info!("{message}");
    commands
        .spawn((
            NodeBundle {
                style: Style {
                    position_type: PositionType::Absolute,
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                background_color: Color::srgba(0.0, 0.0, 0.0, 0.6).into(),
                z_index: ZIndex::Global(10),
                ..default()
            },
            OutcomeBanner,
        ))
        .with_children(|p| {
            p.spawn(TextBundle::from_section(
                message,
                TextStyle { font_size: 64.0, color: Color::WHITE, ..default() },
            ));
        });
}

/// Spawn the (initially empty) debug overlay text.
pub fn spawn_debug_overlay(mut commands: Commands) {
    commands.spawn((
        TextBundle {
            text: Text::from_section(
                "",
                TextStyle { font_size: 18.0, color: Color::srgb(1.0, 1.0, 0.0), ..default() },
            ),
            style: Style {
                position_type: PositionType::Absolute,
                left: Val::Px(20.0),
                top: Val::Px(50.0),
                ..default()
            },
            ..default()
        },
        DebugOverlayText,
    ));
}

/// Toggle the debug overlay and the wall grid with their bound keys.
#[allow(clippy::needless_pass_by_value)]
pub fn toggle_debug_views(
    input: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
    mut overlay: ResMut<DebugOverlayState>,
    mut grid: ResMut<DebugGridVisible>,
) {
    if input.just_pressed(settings.controls.key_or("toggle_debug", KeyCode::F1)) {
        overlay.visible = !overlay.visible;
    }
    if input.just_pressed(settings.controls.key_or("toggle_grid", KeyCode::F2)) {
        grid.0 = !grid.0;
    }
}

/// Text shown by the debug overlay.
#[must_use]
pub fn overlay_text(game: &MazeGame, fps: f64, frame_time_ms: f64) -> String {
    let p = game.player;
    let exit = game
        .distance_to_exit()
        .map_or_else(|| "none".to_string(), |d| format!("{d:.2}"));
    format!(
        "FPS: {fps:.1}\nFrame Time: {frame_time_ms:.2} ms\nPos: ({:.2}, {:.2}, {:.2})\nHealth: {}/{}\nExit distance: {exit}\nState: {:?}",
        p.x,
        p.y,
        p.z,
        game.health.current(),
        game.health.max(),
        game.outcome(),
    )
}

/// Refresh the debug overlay text every half second.
#[allow(clippy::needless_pass_by_value)]
pub fn update_debug_overlay(
    diagnostics: Res<DiagnosticsStore>,
    state: Res<DebugOverlayState>,
    game: Res<MazeGame>,
    time: Res<Time>,
    mut timer: ResMut<DebugOverlayTimer>,
    mut query: Query<&mut Text, With<DebugOverlayText>>,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }
    let Ok(mut text) = query.get_single_mut() else { return };

    if !state.visible {
        text.sections[0].value = String::new();
        return;
    }

    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);
    let frame_time = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FRAME_TIME)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);

    text.sections[0].value = overlay_text(&game, fps, frame_time);
}

/// Draw every wall volume as a wireframe box.
#[allow(clippy::needless_pass_by_value)]
pub fn render_wall_grid(grid: Res<DebugGridVisible>, game: Res<MazeGame>, mut gizmos: Gizmos) {
    if !grid.0 {
        return;
    }
    let green = Color::srgb(0.0, 1.0, 0.0);
    for wall in &game.layout().walls {
        let size = Vec3::new(wall.half_extent * 2.0, crate::scene::WALL_HEIGHT, wall.half_extent * 2.0);
        gizmos.cuboid(Transform::from_translation(wall.center).with_scale(size), green);
    }
    if let Some(exit) = game.layout().exit {
        let radius = game.layout().cell_size() / 2.0;
        gizmos.circle(
            Vec3::new(exit.center.x, 0.01, exit.center.z),
            Dir3::Y,
            radius,
            Color::srgb(1.0, 1.0, 0.0),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{GridCoord, MazeGrid};
    use crate::scene::SceneLayout;
    use crate::settings::GameplaySettings;

    #[test]
    fn overlay_mentions_health_and_state() {
        let layout = SceneLayout::build(MazeGrid::classic(), GridCoord::new(1, 1));
        let game = MazeGame::new(layout, &GameplaySettings::default());
        let text = overlay_text(&game, 60.0, 16.6);
        assert!(text.contains("Health: 100/100"));
        assert!(text.contains("State: Playing"));
        assert!(text.contains("Pos: (-12.00, 0.50, -12.00)"));
    }

    #[test]
    fn health_bar_tracks_damage() {
        let layout = SceneLayout::build(MazeGrid::classic(), GridCoord::new(1, 1));
        let mut game = MazeGame::new(layout, &GameplaySettings::default());
        game.health.apply_damage(25);

        let mut app = App::new();
        app.insert_resource(game).add_systems(Update, sync_health_bar);
        let fill = app
            .world_mut()
            .spawn((Style::default(), BackgroundColor(Color::WHITE), HealthBarFill))
            .id();
        app.update();

        let style = app.world().get::<Style>(fill).unwrap();
        assert_eq!(style.width, Val::Percent(75.0));
        let bg = app.world().get::<BackgroundColor>(fill).unwrap();
        assert_eq!(bg.0, Color::srgb_u8(63, 191, 0));
    }

    #[test]
    fn missing_health_bar_is_skipped() {
        let layout = SceneLayout::build(MazeGrid::classic(), GridCoord::new(1, 1));
        let mut app = App::new();
        app.insert_resource(MazeGame::new(layout, &GameplaySettings::default()))
            .add_systems(Update, sync_health_bar);
        app.update();
        assert_eq!(app.world().resource::<MazeGame>().health.current(), 100);
    }
}
