//! Discrete simulation step
//!
//! One call advances the snake by exactly one grid cell. Illegal moves are
//! modeled as a phase transition, never an error.

use crate::consts::{CELL, SPEEDUP_INTERVAL, STEP_DURATION_DECREMENT, STEP_DURATION_MIN};

use super::state::{GamePhase, GameState};

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Normal move, the tail followed the head
    Moved,
    /// The head landed on the food and the body grew by one segment
    Ate {
        /// The score just became a new best
        new_high: bool,
    },
    /// Fatal collision; the phase switched to Dying
    Died,
}

/// Advance the simulation by one tick: snapshot the body for interpolation,
/// commit the pending direction, move the head one cell, and resolve
/// collision, eating, and the speed ramp.
pub fn advance(state: &mut GameState) -> StepOutcome {
    state.prev_body = state.body.clone();
    state.direction = state.pending;

    let new_head = state.head() + state.direction.delta() * CELL;

    // Collision runs against the pre-move body: the tail cell about to be
    // vacated still counts as occupied on this tick. Deliberately stricter
    // than variants that let the head chase the vacating tail.
    if !state.grid.contains(new_head) || state.occupies(new_head) {
        state.phase = GamePhase::Dying;
        return StepOutcome::Died;
    }

    let ate = new_head == state.food.pos;
    state.body.push_front(new_head);

    if ate {
        state.score += 1;
        let new_high = state.score > state.high_score;
        if new_high {
            state.high_score = state.score;
        }
        if state.score % SPEEDUP_INTERVAL == 0 {
            state.step_duration =
                (state.step_duration - STEP_DURATION_DECREMENT).max(STEP_DURATION_MIN);
        }
        state.place_food();
        StepOutcome::Ate { new_high }
    } else {
        state.body.pop_back();
        StepOutcome::Moved
    }
}
