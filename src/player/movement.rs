//! Player controller: the per-frame movement/damage/win state machine.
//!
//! While the game is `Playing`, each frame:
//! 1. a candidate position is built from the held keys (no diagonal
//!    normalisation, two keys move faster than one),
//! 2. a colliding candidate is discarded and costs health, possibly ending
//!    the game in `Lost`,
//! 3. otherwise the candidate becomes the new position,
//! 4. and being closer than half a cell to the exit ends the game in `Won`.
//!
//! After `Lost` or `Won` the update is a no-op.
use crate::game::{MazeGame, Outcome, StepEvent};
use crate::input::InputState;
use bevy::prelude::*;

/// Apply one frame of held input to `pos`. Forward is -z, right is +x.
#[must_use]
pub fn candidate_position(pos: Vec3, input: &InputState, speed: f32) -> Vec3 {
    let mut next = pos;
    if input.forward {
        next.z -= speed;
    }
    if input.back {
        next.z += speed;
    }
    if input.left {
        next.x -= speed;
    }
    if input.right {
        next.x += speed;
    }
    next
}

/// Run the controller for one frame.
pub fn step_player(game: &mut MazeGame, input: &InputState) -> StepEvent {
    if game.outcome().is_terminal() {
        return StepEvent::Frozen;
    }

    let rules = *game.rules();
    let next = candidate_position(game.player, input, rules.speed);

    if game.is_colliding(next) {
        let crossed = game.health.apply_damage(rules.damage_per_collision);
        if crossed && game.finish(Outcome::Lost) {
            return StepEvent::Finished(Outcome::Lost);
        }
        return StepEvent::Blocked { health: game.health.current() };
    }

    game.player = next;

    let win_radius = game.layout().cell_size() / 2.0;
    if game.distance_to_exit().is_some_and(|d| d < win_radius) && game.finish(Outcome::Won) {
        return StepEvent::Finished(Outcome::Won);
    }
    StepEvent::Moved
}
