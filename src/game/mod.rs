//! Game state: health, terminal outcome and the per-frame core update.
//!
//! `MazeGame` is the single explicit value the frame update works on. It
//! owns the static scene layout, the chosen wall collider, the player
//! position, the health tracker and the outcome. Everything in here is
//! plain data and pure functions, so the whole state machine can be driven
//! from tests without a window or GPU.
//!
//! # Example:
//!
//! ```ignore
//! let mut game = MazeGame::new(layout, &settings.gameplay);
//! let held = InputState::holding(&[MoveKey::Right]);
//! for _ in 0..60 {
//!     game.advance_frame(&held);
//! }
//! ```
pub mod schedule;

use crate::collision::{CollisionQuery, WallCollider};
use crate::input::InputState;
use crate::scene::SceneLayout;
use crate::settings::GameplaySettings;
use bevy::prelude::*;

pub use schedule::{CoreFrame, GameOver, MazeGamePlugin};

/// Where the session stands. `Lost` and `Won` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    Playing,
    Lost,
    Won,
}

impl Outcome {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Playing)
    }

    /// Text shown on the end-of-game banner.
    #[must_use]
    pub fn message(self) -> Option<&'static str> {
        match self {
            Outcome::Playing => None,
            Outcome::Lost => Some("You lose!"),
            Outcome::Won => Some("You win!"),
        }
    }
}

/// Health-bar values derived from the current health.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthDisplay {
    /// Fill width, always within `0..=100`.
    pub percent: f32,
    /// Red at 0 %, green at 100 %, linear in between.
    pub rgb: [u8; 3],
}

impl HealthDisplay {
    #[must_use]
    pub fn color(&self) -> Color {
        Color::srgb_u8(self.rgb[0], self.rgb[1], self.rgb[2])
    }
}

/// Raw health. Only ever decreases and is not floored at zero; the
/// displayed percentage is clamped instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthTracker {
    current: i32,
    max: i32,
}

impl HealthTracker {
    #[must_use]
    pub fn new(max: i32) -> Self {
        let max = max.max(1);
        Self { current: max, max }
    }

    #[must_use]
    pub fn current(&self) -> i32 { self.current }

    #[must_use]
    pub fn max(&self) -> i32 { self.max }

    #[must_use]
    pub fn is_depleted(&self) -> bool { self.current <= 0 }

    /// Subtract `amount` (negative amounts are ignored). Returns `true` only
    /// on the call that takes health from above zero to zero or below.
    pub fn apply_damage(&mut self, amount: i32) -> bool {
        let was_alive = !self.is_depleted();
        self.current = self.current.saturating_sub(amount.max(0));
        was_alive && self.is_depleted()
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn display(&self) -> HealthDisplay {
        let percent = self.current.clamp(0, self.max) as f32 / self.max as f32 * 100.0;
        let r = (255.0 * (1.0 - percent / 100.0)).floor() as u8;
        let g = (255.0 * (percent / 100.0)).floor() as u8;
        HealthDisplay { percent, rgb: [r, g, 0] }
    }
}

/// Fixed per-session movement and damage rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rules {
    pub speed: f32,
    pub player_half: f32,
    pub damage_per_collision: i32,
    pub exit_spin: f32,
}

impl From<&GameplaySettings> for Rules {
    fn from(g: &GameplaySettings) -> Self {
        Self {
            speed: g.speed,
            player_half: g.player_size / 2.0,
            damage_per_collision: g.damage_per_collision,
            exit_spin: g.exit_spin,
        }
    }
}

/// What one player update did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepEvent {
    /// Game already over; nothing changed.
    Frozen,
    /// Candidate accepted (possibly the same position when no key is held).
    Moved,
    /// Candidate hit a wall; the player stayed put and lost health.
    Blocked { health: i32 },
    /// This frame ended the game.
    Finished(Outcome),
}

/// The whole mutable game state.
#[derive(Resource, Debug, Clone)]
pub struct MazeGame {
    layout: SceneLayout,
    collider: WallCollider,
    rules: Rules,
    pub player: Vec3,
    pub health: HealthTracker,
    outcome: Outcome,
    frames: u64,
}

impl MazeGame {
    #[must_use]
    pub fn new(layout: SceneLayout, gameplay: &GameplaySettings) -> Self {
        let collider = WallCollider::new(&layout, gameplay.collision);
        Self {
            player: layout.player_start,
            layout,
            collider,
            rules: Rules::from(gameplay),
            health: HealthTracker::new(gameplay.max_health),
            outcome: Outcome::Playing,
            frames: 0,
        }
    }

    #[must_use]
    pub fn layout(&self) -> &SceneLayout { &self.layout }

    #[must_use]
    pub fn rules(&self) -> &Rules { &self.rules }

    #[must_use]
    pub fn outcome(&self) -> Outcome { self.outcome }

    #[must_use]
    pub fn frames(&self) -> u64 { self.frames }

    /// Collision test of a candidate position with the session's collider.
    #[must_use]
    pub fn is_colliding(&self, candidate: Vec3) -> bool {
        self.collider.is_colliding(candidate, self.rules.player_half)
    }

    /// Move from `Playing` into a terminal state. Returns `false` if the
    /// game was already over.
    pub fn finish(&mut self, outcome: Outcome) -> bool {
        if self.outcome.is_terminal() || !outcome.is_terminal() {
            return false;
        }
        self.outcome = outcome;
        true
    }

    /// Straight-line distance from the player to the exit marker, if any.
    #[must_use]
    pub fn distance_to_exit(&self) -> Option<f32> {
        self.layout.exit.map(|e| self.player.distance(e.center))
    }

    /// Rotate the exit marker by one frame's increment.
    pub fn spin_exit(&mut self) {
        let spin = self.rules.exit_spin;
        if let Some(exit) = self.layout.exit.as_mut() {
            exit.rotation += spin;
        }
    }

    /// One frame of the core loop: player update, then exit spin.
    pub fn advance_frame(&mut self, input: &InputState) -> StepEvent {
        let event = crate::player::step_player(self, input);
        self.spin_exit();
        self.frames += 1;
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_crosses_zero_once() {
        let mut h = HealthTracker::new(3);
        assert!(!h.apply_damage(1));
        assert!(!h.apply_damage(1));
        assert!(h.apply_damage(1));
        assert_eq!(h.current(), 0);
        assert!(!h.apply_damage(1));
        assert_eq!(h.current(), -1, "raw health is not floored");
    }

    #[test]
    fn negative_damage_does_not_heal() {
        let mut h = HealthTracker::new(100);
        h.apply_damage(-5);
        assert_eq!(h.current(), 100);
    }

    #[test]
    fn display_endpoints_and_clamp() {
        let mut h = HealthTracker::new(100);
        assert_eq!(h.display(), HealthDisplay { percent: 100.0, rgb: [0, 255, 0] });
        h.apply_damage(50);
        assert_eq!(h.display(), HealthDisplay { percent: 50.0, rgb: [127, 127, 0] });
        h.apply_damage(60);
        assert_eq!(h.current(), -10);
        assert_eq!(h.display(), HealthDisplay { percent: 0.0, rgb: [255, 0, 0] });
    }

    #[test]
    fn outcome_messages() {
        assert_eq!(Outcome::Playing.message(), None);
        assert_eq!(Outcome::Lost.message(), Some("You lose!"));
        assert_eq!(Outcome::Won.message(), Some("You win!"));
    }

    #[test]
    fn finish_is_one_way() {
        let layout = SceneLayout::build(crate::maze::MazeGrid::classic(), crate::maze::GridCoord::new(1, 1));
        let mut game = MazeGame::new(layout, &GameplaySettings::default());
        assert!(!game.finish(Outcome::Playing));
        assert!(game.finish(Outcome::Won));
        assert!(!game.finish(Outcome::Lost));
        assert_eq!(game.outcome(), Outcome::Won);
    }

    #[test]
    fn exit_keeps_spinning_after_game_over() {
        let layout = SceneLayout::build(crate::maze::MazeGrid::classic(), crate::maze::GridCoord::new(1, 1));
        let mut game = MazeGame::new(layout, &GameplaySettings::default());
        game.finish(Outcome::Lost);
        game.advance_frame(&InputState::default());
        game.advance_frame(&InputState::default());
        let rot = game.layout().exit.unwrap().rotation;
        assert!((rot - 0.04).abs() < 1e-6);
        assert_eq!(game.frames(), 2);
    }
}
