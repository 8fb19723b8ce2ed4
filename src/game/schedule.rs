//! Frame ordering for the game core.
//!
//! Bevy's `Update` schedule is the frame tick. `MazeGamePlugin` registers
//! the core systems as one chain so each frame runs, in order:
//! input sample → player update + exit spin → scene transform sync →
//! camera follow. UI systems read the resulting state afterwards.
use super::{MazeGame, Outcome, StepEvent};
use crate::input::{sample_input, InputState};
use crate::player::{follow_camera, ExitMarkerMesh, Player};
use bevy::prelude::*;

/// Sent once, on the frame the game reaches `Lost` or `Won`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver(pub Outcome);

/// System set containing the chained core systems.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoreFrame;

pub struct MazeGamePlugin;

impl Plugin for MazeGamePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputState>()
            .add_event::<GameOver>()
            .add_systems(
                Update,
                (sample_input, advance_game, sync_scene_transforms, follow_camera)
                    .chain()
                    .in_set(CoreFrame),
            );
    }
}

/// Run one core frame against the sampled input.
#[allow(clippy::needless_pass_by_value)]
pub fn advance_game(mut game: ResMut<MazeGame>, input: Res<InputState>, mut over: EventWriter<GameOver>) {
    match game.advance_frame(&input) {
        StepEvent::Finished(outcome) => {
            info!(
                "game over: {:?} after {} frames, health {}",
                outcome,
                game.frames(),
                game.health.current()
            );
            over.send(GameOver(outcome));
        }
        StepEvent::Blocked { health } => debug!("wall hit, health {health}"),
        StepEvent::Moved | StepEvent::Frozen => {}
    }
}

/// Mirror the core state into the player and exit marker transforms.
#[allow(clippy::needless_pass_by_value)]
pub fn sync_scene_transforms(
    game: Res<MazeGame>,
    mut players: Query<&mut Transform, (With<Player>, Without<ExitMarkerMesh>)>,
    mut exits: Query<&mut Transform, (With<ExitMarkerMesh>, Without<Player>)>,
) {
    for mut tf in &mut players {
        tf.translation = game.player;
    }
    if let Some(exit) = game.layout().exit {
        for mut tf in &mut exits {
            tf.rotation = Quat::from_rotation_y(exit.rotation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{GridCoord, MazeGrid};
    use crate::scene::SceneLayout;
    use crate::settings::Settings;

    fn test_app(rows: &[Vec<u8>], cell_size: f32) -> App {
        let settings = Settings::default();
        let grid = MazeGrid::from_codes(rows, cell_size).unwrap();
        let game = MazeGame::new(SceneLayout::build(grid, GridCoord::new(1, 1)), &settings.gameplay);

        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .insert_resource(settings)
            .insert_resource(game)
            .add_plugins(MazeGamePlugin);
        app
    }

    #[test]
    fn held_key_moves_player_entity() {
        let mut app = test_app(&[vec![1, 1, 1, 1], vec![1, 0, 0, 1], vec![1, 1, 1, 1]], 2.0);
        let player = app.world_mut().spawn((Transform::default(), Player)).id();
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::KeyD);

        let start = app.world().resource::<MazeGame>().player;
        app.update();
        app.update();

        let game = app.world().resource::<MazeGame>();
        assert!((game.player.x - (start.x + 0.2)).abs() < 1e-5);
        let tf = app.world().get::<Transform>(player).unwrap();
        assert_eq!(tf.translation, game.player);
    }

    #[test]
    fn game_over_event_fires_once() {
        let mut app = test_app(&[vec![1, 1, 1], vec![1, 9, 1], vec![1, 1, 1]], 2.0);
        app.update();
        let mut reader = app.world().resource::<Events<GameOver>>().get_reader();
        let seen: Vec<GameOver> = reader.read(app.world().resource::<Events<GameOver>>()).copied().collect();
        assert_eq!(seen, vec![GameOver(Outcome::Won)]);

        for _ in 0..4 {
            app.update();
            assert_eq!(reader.read(app.world().resource::<Events<GameOver>>()).count(), 0);
        }
        assert_eq!(app.world().resource::<MazeGame>().outcome(), Outcome::Won);
    }

    #[test]
    fn camera_follows_in_schedule() {
        let mut app = test_app(&[vec![1, 1, 1], vec![1, 0, 1], vec![1, 1, 1]], 2.0);
        let cam = app
            .world_mut()
            .spawn((Transform::from_xyz(0.0, 20.0, 20.0), crate::player::FollowCamera))
            .id();
        app.update();
        let tf = app.world().get::<Transform>(cam).unwrap();
        // player at (0, 0.5, 0), target (0, 10.5, 10)
        assert!((tf.translation - Vec3::new(0.0, 19.05, 19.0)).length() < 1e-4);
    }
}
