//! Follow camera.
//!
//! Each frame the camera moves a fixed fraction of the way towards
//! `player + offset` and then looks at the player. The fraction is not
//! scaled by frame time, so the lag depends on frame rate. The camera keeps
//! following after the game ends.

use crate::game::MazeGame;
use crate::settings::Settings;
use bevy::prelude::*;

/// Marker for the camera driven by `follow_camera`.
#[derive(Component, Default)]
pub struct FollowCamera;

/// Offset and smoothing used by the follow step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub offset: Vec3,
    /// Fraction of the remaining distance covered per frame (0..=1).
    pub smoothing: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self { offset: Vec3::new(0.0, 10.0, 10.0), smoothing: 0.1 }
    }
}

impl CameraRig {
    #[must_use]
    pub fn from_settings(settings: &crate::settings::CameraSettings) -> Self {
        Self { offset: settings.offset_vec(), smoothing: settings.smoothing.clamp(0.0, 1.0) }
    }

    /// Where the camera would sit with no lag.
    #[must_use]
    pub fn target(&self, player: Vec3) -> Vec3 {
        player + self.offset
    }

    /// One exponential-smoothing step from `current` towards the target.
    #[must_use]
    pub fn step(&self, current: Vec3, player: Vec3) -> Vec3 {
        current.lerp(self.target(player), self.smoothing)
    }

    /// Full camera transform after one step: smoothed position, looking at the player.
    #[must_use]
    pub fn follow(&self, current: Vec3, player: Vec3) -> Transform {
        Transform::from_translation(self.step(current, player)).looking_at(player, Vec3::Y)
    }
}

/// Move every `FollowCamera` one smoothing step towards the player.
#[allow(clippy::needless_pass_by_value)]
pub fn follow_camera(
    game: Res<MazeGame>,
    settings: Res<Settings>,
    mut cameras: Query<&mut Transform, With<FollowCamera>>,
) {
    let rig = CameraRig::from_settings(&settings.camera);
    for mut tf in &mut cameras {
        *tf = rig.follow(tf.translation, game.player);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_covers_ten_percent() {
        let rig = CameraRig::default();
        let next = rig.step(Vec3::new(0.0, 20.0, 20.0), Vec3::ZERO);
        // target (0, 10, 10): 20 -> 19
        assert!((next - Vec3::new(0.0, 19.0, 19.0)).length() < 1e-5);
    }

    #[test]
    fn converges_geometrically() {
        let rig = CameraRig::default();
        let player = Vec3::new(3.0, 0.5, -4.0);
        let target = rig.target(player);
        let mut cam = Vec3::new(0.0, 20.0, 20.0);
        let initial = cam.distance(target);
        for _ in 0..10 {
            cam = rig.step(cam, player);
        }
        let expected = initial * 0.9f32.powi(10);
        assert!((cam.distance(target) - expected).abs() < 1e-3);
    }

    #[test]
    fn follow_looks_at_player() {
        let rig = CameraRig::default();
        let player = Vec3::new(-12.0, 0.5, -12.0);
        let tf = rig.follow(Vec3::new(0.0, 20.0, 20.0), player);
        let to_player = (player - tf.translation).normalize();
        assert!(tf.forward().dot(to_player) > 0.9999);
    }

    #[test]
    fn smoothing_is_clamped() {
        let settings = crate::settings::CameraSettings { smoothing: 3.0, ..Default::default() };
        let rig = CameraRig::from_settings(&settings);
        assert!((rig.smoothing - 1.0).abs() < f32::EPSILON);
    }
}
