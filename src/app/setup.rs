//! Startup scene construction.
//!
//! Turns the `SceneLayout` held by `MazeGame` into renderable entities: a
//! ground plane, one cube per wall cell, the exit marker, the player cube,
//! a directional light and the follow camera.
use bevy::prelude::*;
use bevy::render::camera::{PerspectiveProjection, Projection};
use mazewalk::game::MazeGame;
use mazewalk::player::{ExitMarkerMesh, FollowCamera, Player};
use mazewalk::scene::{EXIT_HEIGHT, WALL_HEIGHT};
use mazewalk::settings::Settings;

const GROUND_SIZE: f32 = 40.0;

/// Spawn every visible entity of the maze scene.
///
/// # Arguments
/// - `commands`: Commands used to spawn entities and insert resources.
/// - `meshes`: Asset storage for the plane and cuboid meshes.
/// - `materials`: Asset storage for the flat-coloured materials.
/// - `game`: Source of the wall, exit and player placement.
/// - `settings`: Shadow, field of view and initial camera position.
#[allow(clippy::needless_pass_by_value)]
pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    game: Res<MazeGame>,
    settings: Res<Settings>,
) {
    let layout = game.layout();
    let cell = layout.cell_size();

    commands.spawn(PbrBundle {
        mesh: meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE)),
        material: materials.add(Color::srgb_u8(0xcc, 0xcc, 0xcc)),
        ..default()
    });

    let wall_mesh = meshes.add(Cuboid::new(cell, WALL_HEIGHT, cell));
    let wall_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.5, 0.5, 0.5),
        perceptual_roughness: 0.9,
        ..default()
    });
    for wall in &layout.walls {
        commands.spawn(PbrBundle {
            mesh: wall_mesh.clone(),
            material: wall_material.clone(),
            transform: Transform::from_translation(wall.center),
            ..default()
        });
    }

    if let Some(exit) = layout.exit {
        let side = exit.half_extent * 2.0;
        commands.spawn((
            PbrBundle {
                mesh: meshes.add(Cuboid::new(side, EXIT_HEIGHT, side)),
                material: materials.add(Color::srgb(0.0, 1.0, 0.0)),
                transform: Transform::from_translation(exit.center)
                    .with_rotation(Quat::from_rotation_y(exit.rotation)),
                ..default()
            },
            ExitMarkerMesh,
        ));
    }

    let player_size = game.rules().player_half * 2.0;
    commands.spawn((
        PbrBundle {
            mesh: meshes.add(Cuboid::new(player_size, player_size, player_size)),
            material: materials.add(Color::srgb(0.0, 0.0, 1.0)),
            transform: Transform::from_translation(game.player),
            ..default()
        },
        Player,
    ));

    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            shadows_enabled: settings.graphics.shadows,
            ..default()
        },
        transform: Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
    });

    commands.spawn((
        Camera3dBundle {
            transform: Transform::from_translation(settings.camera.initial_vec())
                .looking_at(Vec3::ZERO, Vec3::Y),
            projection: Projection::Perspective(PerspectiveProjection {
                fov: settings.camera.fov_degrees.to_radians(),
                near: 0.1,
                far: 1000.0,
                ..default()
            }),
            ..default()
        },
        FollowCamera,
    ));

    info!(
        "scene ready: {} walls, exit {}, player at {:?}",
        layout.walls.len(),
        if layout.exit.is_some() { "present" } else { "missing" },
        game.player
    );
}
