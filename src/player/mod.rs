//! Player components and systems (controller, follow camera).
//!
//! The `Player` component tags the visual cube; its transform mirrors
//! `MazeGame::player` and is written by the game schedule, never read back.
//!
//! # Example:
//!
//! ```ignore
//! commands.spawn((PbrBundle { mesh, material, ..default() }, Player));
//! commands.spawn((Camera3dBundle::default(), FollowCamera));
//! ```
pub mod camera;
pub mod movement;

use bevy::prelude::*;

pub use camera::*;
pub use movement::*;

/// Marker for the player cube entity.
#[derive(Component, Default)]
pub struct Player;

/// Marker for the rotating exit marker entity.
#[derive(Component, Default)]
pub struct ExitMarkerMesh;
